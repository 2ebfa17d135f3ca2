//! Server command implementation

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use finix_core::{FinanceStore, MemoryStore};
use finix_server::ServerConfig;

use super::{build_generator, open_store};

pub async fn cmd_serve(data_path: &Path, host: &str, port: u16, offline: bool) -> Result<()> {
    println!("🚀 Starting Finix web server...");
    println!("   Dataset: {}", data_path.display());
    println!("   Listening: http://{}:{}", host, port);

    // A missing dataset still serves the stateless endpoints
    let store = if data_path.exists() {
        open_store(data_path)?
    } else {
        println!("   ⚠️  Dataset not found, serving stateless endpoints only");
        MemoryStore::new()
    };

    let config = ServerConfig::from_env();
    if config.allowed_origins.is_empty() {
        println!("   🔒 CORS: same-origin only (set FINIX_ALLOWED_ORIGINS to allow more)");
    } else {
        println!(
            "   🌐 CORS origins: {} (FINIX_ALLOWED_ORIGINS)",
            config.allowed_origins.join(", ")
        );
    }
    if offline {
        println!("   📋 Model disabled (--offline), rule-based suggestions only");
    }
    println!();
    println!("   Press Ctrl+C to stop");

    let generator = build_generator(offline)?;
    let store: Arc<dyn FinanceStore> = Arc::new(store);
    finix_server::serve(store, generator, host, port, config).await?;

    Ok(())
}
