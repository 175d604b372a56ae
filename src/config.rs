//! Service configuration.
//!
//! Loaded once from environment variables at startup and passed down as a
//! value. There is no process-global settings object: tests and embedders
//! build their own [`ServiceConfig`] and several configurations can coexist
//! in one process.

use std::env;

/// Default port if not specified via environment variable.
pub const DEFAULT_PORT: u16 = 8001;

/// Route prefix for the versioned API.
pub const API_V1_PREFIX: &str = "/api/v1";

/// Runtime configuration for the service.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Human-readable service name, surfaced by `/` and `/info`.
    pub service_name: String,

    /// Route prefix for the versioned API.
    pub api_prefix: String,

    /// TCP port to listen on.
    pub port: u16,

    /// Whether analysis output is synthesized. When false the analyze
    /// routes fail with 501 until a real model is wired in.
    pub mock_mode: bool,
}

impl ServiceConfig {
    /// Load configuration from `DERMALENS_*` environment variables,
    /// falling back to defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let port = env::var("DERMALENS_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let mock_mode = env::var("DERMALENS_MOCK_MODE")
            .ok()
            .and_then(|m| m.parse().ok())
            .unwrap_or(true);

        Self {
            port,
            mock_mode,
            ..Self::default()
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            service_name: "Skin Analysis Service".to_string(),
            api_prefix: API_V1_PREFIX.to_string(),
            port: DEFAULT_PORT,
            mock_mode: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();

        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.api_prefix, "/api/v1");
        assert!(config.mock_mode);
    }
}
