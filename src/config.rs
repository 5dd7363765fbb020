/// Configuration management for Meridian Trust
use crate::error::{VerifierError, VerifierResult};
use serde::{Deserialize, Serialize};
use std::env;

/// Verifier configuration
///
/// All values have defaults; a verifier can be built with
/// `VerifierConfig::default()` without any environment set up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifierConfig {
    /// User-Agent header for outbound registry requests
    pub user_agent: String,
    /// Timeout for outbound HTTP calls, in seconds
    pub http_timeout_secs: u64,
    /// Port used for the TLS handshake when fetching domain certificates
    pub tls_port: u16,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("Meridian-Trust/{}", env!("CARGO_PKG_VERSION")),
            http_timeout_secs: 10,
            tls_port: 443,
        }
    }
}

impl VerifierConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> VerifierResult<Self> {
        dotenv::dotenv().ok();

        let defaults = Self::default();

        let user_agent =
            env::var("MERIDIAN_USER_AGENT").unwrap_or(defaults.user_agent);
        let http_timeout_secs = env::var("MERIDIAN_HTTP_TIMEOUT_SECS")
            .unwrap_or_else(|_| defaults.http_timeout_secs.to_string())
            .parse()
            .map_err(|_| {
                VerifierError::Configuration("Invalid HTTP timeout".to_string())
            })?;
        let tls_port = env::var("MERIDIAN_TLS_PORT")
            .unwrap_or_else(|_| defaults.tls_port.to_string())
            .parse()
            .map_err(|_| VerifierError::Configuration("Invalid TLS port".to_string()))?;

        let config = Self {
            user_agent,
            http_timeout_secs,
            tls_port,
        };
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> VerifierResult<()> {
        if self.user_agent.is_empty() {
            return Err(VerifierError::Configuration(
                "User agent cannot be empty".to_string(),
            ));
        }

        if self.http_timeout_secs == 0 {
            return Err(VerifierError::Configuration(
                "HTTP timeout must be at least one second".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = VerifierConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tls_port, 443);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = VerifierConfig {
            http_timeout_secs: 0,
            ..VerifierConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
