//! Finix Web Server
//!
//! Axum-based REST API for the Finix travel savings advisor.
//!
//! - Store-backed and stateless suggestion generation
//! - Transaction summaries
//! - Travel options for a destination and budgets
//! - Restrictive CORS policy and request tracing
//! - Sanitized error responses

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};

use finix_core::ai::AIBackend;
use finix_core::{FinanceStore, SuggestionGenerator};

mod handlers;

/// Service name reported by the health endpoint
pub const SERVICE_NAME: &str = "FINIX API";

/// Server configuration
#[derive(Clone, Debug, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
}

impl ServerConfig {
    /// Read `FINIX_ALLOWED_ORIGINS` (comma separated)
    pub fn from_env() -> Self {
        let allowed_origins = std::env::var("FINIX_ALLOWED_ORIGINS")
            .map(|v| parse_origins(&v))
            .unwrap_or_default();
        Self { allowed_origins }
    }
}

fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}

/// Shared application state
pub struct AppState {
    pub store: Arc<dyn FinanceStore>,
    pub generator: SuggestionGenerator,
}

/// Create the application router
pub fn create_router(
    store: Arc<dyn FinanceStore>,
    generator: SuggestionGenerator,
    config: ServerConfig,
) -> Router {
    match generator.ai() {
        Some(client) => info!(
            "AI backend configured: {} (model: {})",
            client.host(),
            client.model()
        ),
        None => info!("ℹ️  AI backend not configured, suggestions use the rule-based fallback"),
    }

    let state = Arc::new(AppState { store, generator });

    let api_routes = Router::new()
        .route("/health", get(handlers::health))
        // Suggestions
        .route("/suggestions/calculate", post(handlers::calculate_suggestions))
        .route("/suggestions/:user_id", get(handlers::get_suggestions))
        // Transactions
        .route("/transactions/summary", post(handlers::summarize))
        .route(
            "/transactions/:user_id/summary",
            get(handlers::get_user_summary),
        )
        // Travel
        .route("/travel/suggestions", post(handlers::travel_suggestions));

    let cors = build_cors(&config);

    Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

fn build_cors(config: &ServerConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        return cors;
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();
    cors.allow_origin(origins)
}

/// Start the server
pub async fn serve(
    store: Arc<dyn FinanceStore>,
    generator: SuggestionGenerator,
    host: &str,
    port: u16,
    config: ServerConfig,
) -> anyhow::Result<()> {
    check_ai_connection(&generator).await;

    let app = create_router(store, generator, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Check and log AI backend connection status
async fn check_ai_connection(generator: &SuggestionGenerator) {
    match generator.ai() {
        Some(client) => {
            if client.health_check().await {
                info!("✅ AI backend connected: {} ({})", client.host(), client.model());
            } else {
                warn!(
                    "⚠️  AI backend configured but not responding: {} ({})",
                    client.host(),
                    client.model()
                );
            }
        }
        None => {
            info!("ℹ️  AI backend not configured (set GROQ_API_KEY to enable model suggestions)");
        }
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }

    /// Map a core error, keeping not-found and invalid input visible to the client
    pub fn from_core(err: finix_core::Error) -> Self {
        match err {
            finix_core::Error::NotFound(msg) => Self::not_found(&msg),
            finix_core::Error::InvalidData(msg) => Self::bad_request(&msg),
            other => other.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}
