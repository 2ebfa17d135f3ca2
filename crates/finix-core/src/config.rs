//! Suggestion generator configuration
//!
//! Config is loaded with a two-layer resolution:
//! 1. Check for override in data dir (~/.local/share/finix/config/generator.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! Keys missing from an override keep their default values.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/generator.toml");

/// Tuning for the model call and response validation
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Sampling temperature sent with the chat request
    pub temperature: f32,
    /// Upper bound on the model call
    pub timeout: Duration,
    /// Fewest suggestions accepted from the model
    pub min_suggestions: usize,
    /// Most suggestions accepted from the model
    pub max_suggestions: usize,
    /// Destination options requested per travel query (and the most accepted)
    pub travel_suggestions: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            temperature: 0.2,
            timeout: Duration::from_secs(20),
            min_suggestions: 3,
            max_suggestions: 5,
            travel_suggestions: 8,
        }
    }
}

impl GeneratorConfig {
    /// Load from the default override path, falling back to the embedded config
    pub fn load() -> Result<Self> {
        match default_config_path() {
            Some(path) => Self::load_from(&path),
            None => parse_config(DEFAULT_CONFIG),
        }
    }

    /// Load from a specific override path, falling back to the embedded config
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return parse_config(DEFAULT_CONFIG);
        }

        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?;
        tracing::debug!(path = %path.display(), "Using generator config override");
        parse_config(&content)
    }

    /// Embedded defaults only
    pub fn embedded() -> Result<Self> {
        parse_config(DEFAULT_CONFIG)
    }

    /// Set the model call timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("finix").join("config").join("generator.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    model: Option<RawModel>,
    suggestions: Option<RawSuggestions>,
    travel: Option<RawTravel>,
}

#[derive(Debug, Deserialize)]
struct RawModel {
    temperature: Option<f32>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct RawSuggestions {
    min: Option<usize>,
    max: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawTravel {
    count: Option<usize>,
}

/// Parse config from TOML content
fn parse_config(content: &str) -> Result<GeneratorConfig> {
    let raw: RawConfig = toml::from_str(content)?;

    let mut config = GeneratorConfig::default();

    if let Some(model) = raw.model {
        if let Some(temperature) = model.temperature {
            config.temperature = temperature;
        }
        if let Some(timeout) = model.timeout_secs {
            config.timeout = Duration::from_secs(timeout);
        }
    }

    if let Some(suggestions) = raw.suggestions {
        if let Some(min) = suggestions.min {
            config.min_suggestions = min;
        }
        if let Some(max) = suggestions.max {
            config.max_suggestions = max;
        }
    }

    if let Some(count) = raw.travel.and_then(|t| t.count) {
        config.travel_suggestions = count;
    }

    if !(0.0..=2.0).contains(&config.temperature) {
        return Err(Error::Config(format!(
            "temperature must be between 0 and 2, got {}",
            config.temperature
        )));
    }
    if config.timeout.is_zero() {
        return Err(Error::Config("timeout_secs must be greater than 0".into()));
    }
    if config.min_suggestions == 0 || config.min_suggestions > config.max_suggestions {
        return Err(Error::Config(format!(
            "invalid suggestion bounds: min {} max {}",
            config.min_suggestions, config.max_suggestions
        )));
    }

    if config.travel_suggestions == 0 {
        return Err(Error::Config("travel count must be greater than 0".into()));
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_config_matches_defaults() {
        let config = GeneratorConfig::embedded().unwrap();
        assert_eq!(config, GeneratorConfig::default());
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config = parse_config("[model]\ntimeout_secs = 5\n").unwrap();
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.temperature, 0.2);
        assert_eq!(config.min_suggestions, 3);
        assert_eq!(config.max_suggestions, 5);
    }

    #[test]
    fn test_invalid_bounds_rejected() {
        let err = parse_config("[suggestions]\nmin = 6\nmax = 5\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = parse_config("[model]\ntimeout_secs = 0\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = parse_config("[travel]\ncount = 0\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_travel_count_override() {
        let config = parse_config("[travel]\ncount = 4\n").unwrap();
        assert_eq!(config.travel_suggestions, 4);
        assert_eq!(config.max_suggestions, 5);
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = parse_config("[model\ntemperature = ").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_load_from_missing_path_uses_embedded() {
        let dir = tempfile::tempdir().unwrap();
        let config = GeneratorConfig::load_from(&dir.path().join("generator.toml")).unwrap();
        assert_eq!(config, GeneratorConfig::default());
    }

    #[test]
    fn test_load_from_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("generator.toml");
        fs::write(&path, "[model]\ntemperature = 0.0\n\n[suggestions]\nmin = 4\n").unwrap();

        let config = GeneratorConfig::load_from(&path).unwrap();
        assert_eq!(config.temperature, 0.0);
        assert_eq!(config.min_suggestions, 4);
        assert_eq!(config.max_suggestions, 5);
    }
}
