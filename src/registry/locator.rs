/// Registry discovery for did:web domains
///
/// Probes the domain's well-known discovery document to learn the REST
/// endpoint of the governing registry. The endpoint is discovered, never
/// guessed; two domains may legitimately answer with different registries.
use crate::did::DidWeb;
use crate::error::{VerifierError, VerifierResult};
use crate::registry::models::RegistriesConfiguration;
use crate::registry::transport::RegistryTransport;
use std::sync::Arc;
use tracing::{debug, warn};

/// Well-known resource announcing the registry for a domain
pub const WELL_KNOWN_REGISTRIES: &str = "/.well-known/registries-configuration";

/// A discovered registry endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryEndpoint {
    /// URL the discovery document was fetched from
    pub bootstrap_url: String,
    /// Base URL of the registry REST API
    pub api_endpoint: String,
}

/// Locates the registry governing a did:web identifier
pub struct RegistryLocator {
    transport: Arc<dyn RegistryTransport>,
}

impl RegistryLocator {
    pub fn new(transport: Arc<dyn RegistryTransport>) -> Self {
        Self { transport }
    }

    /// Discover the registry endpoint for a DID
    ///
    /// Probes `https://<domain>` first; when that fails and the DID carries
    /// a root-path hint, retries against `https://<domain>/<hint>`. Both
    /// attempts failing yields `RegistryUnreachable`: callers convert it
    /// to tri-state "unknown" fields, never a hard abort.
    pub async fn locate(&self, did: &DidWeb) -> VerifierResult<RegistryEndpoint> {
        let bootstrap_url = format!("https://{}", did.domain());

        match self.probe(&bootstrap_url).await {
            Ok(config) => {
                return Ok(RegistryEndpoint {
                    bootstrap_url,
                    api_endpoint: config.api_endpoint,
                })
            }
            Err(err) => {
                debug!("Discovery probe at {} failed: {}", bootstrap_url, err);
            }
        }

        if let Some(hint) = did.root_path_hint() {
            let fallback_url = format!("https://{}/{}", did.domain(), hint);
            match self.probe(&fallback_url).await {
                Ok(config) => {
                    return Ok(RegistryEndpoint {
                        bootstrap_url: fallback_url,
                        api_endpoint: config.api_endpoint,
                    })
                }
                Err(err) => {
                    debug!("Fallback probe at {} failed: {}", fallback_url, err);
                }
            }
        }

        warn!("No registry discovered for {}", did.as_str());
        Err(VerifierError::RegistryUnreachable(format!(
            "no registries-configuration served by {}",
            did.domain()
        )))
    }

    async fn probe(&self, base_url: &str) -> VerifierResult<RegistriesConfiguration> {
        let value = self
            .transport
            .get_json(base_url, WELL_KNOWN_REGISTRIES)
            .await?;

        serde_json::from_value(value).map_err(|e| {
            VerifierError::Response(format!("invalid registries-configuration: {}", e))
        })
    }
}
