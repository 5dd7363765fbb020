/// Transport seam for registry REST calls
///
/// The verifier never issues HTTP requests directly; it talks through this
/// trait so tests can substitute an in-memory registry.
use crate::config::VerifierConfig;
use crate::error::{VerifierError, VerifierResult};
use async_trait::async_trait;
use tracing::debug;

/// Read-side transport against a registry base URL
#[async_trait]
pub trait RegistryTransport: Send + Sync {
    /// HTTP GET `<base_url><resource>`, parsed as JSON
    async fn get_json(
        &self,
        base_url: &str,
        resource: &str,
    ) -> VerifierResult<serde_json::Value>;

    /// HTTP POST `<base_url><resource>` with a JSON body, parsed as JSON
    async fn post_json(
        &self,
        base_url: &str,
        resource: &str,
        body: serde_json::Value,
    ) -> VerifierResult<serde_json::Value>;
}

/// reqwest-backed transport
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build the HTTP client with the configured user agent and timeout
    pub fn new(config: &VerifierConfig) -> VerifierResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(std::time::Duration::from_secs(config.http_timeout_secs))
            .build()
            .map_err(|e| {
                VerifierError::Internal(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client })
    }

    fn url(base_url: &str, resource: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), resource)
    }

    async fn into_json(response: reqwest::Response) -> VerifierResult<serde_json::Value> {
        if !response.status().is_success() {
            return Err(VerifierError::Response(format!(
                "registry returned {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| VerifierError::Response(format!("invalid JSON body: {}", e)))
    }
}

#[async_trait]
impl RegistryTransport for HttpTransport {
    async fn get_json(
        &self,
        base_url: &str,
        resource: &str,
    ) -> VerifierResult<serde_json::Value> {
        let url = Self::url(base_url, resource);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| VerifierError::Transport(format!("GET {} failed: {}", url, e)))?;

        Self::into_json(response).await
    }

    async fn post_json(
        &self,
        base_url: &str,
        resource: &str,
        body: serde_json::Value,
    ) -> VerifierResult<serde_json::Value> {
        let url = Self::url(base_url, resource);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| VerifierError::Transport(format!("POST {} failed: {}", url, e)))?;

        Self::into_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining_strips_trailing_slash() {
        assert_eq!(
            HttpTransport::url("https://registry.example.com/", "/did/identifiers"),
            "https://registry.example.com/did/identifiers"
        );
        assert_eq!(
            HttpTransport::url("https://registry.example.com", "/did/identifiers"),
            "https://registry.example.com/did/identifiers"
        );
    }

    #[test]
    fn test_transport_creation() {
        let transport = HttpTransport::new(&VerifierConfig::default());
        assert!(transport.is_ok());
    }
}
