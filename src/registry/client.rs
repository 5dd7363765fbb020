/// Read-only client for a discovered trust registry
///
/// Thin typed accessors over the registry REST resources. Every method is a
/// single request with no retries; callers decide how a failure maps onto
/// the verification card.
use crate::error::{VerifierError, VerifierResult};
use crate::registry::locator::RegistryEndpoint;
use crate::registry::models::{
    DidDocument, DidDocumentDetails, RegistriesConfiguration, RevocationHistory,
    TrustedIssuerRecord,
};
use crate::registry::transport::RegistryTransport;
use crate::trust::rights::{IssuerRights, IssuerRole};
use serde::de::DeserializeOwned;
use std::sync::Arc;

pub struct TrustRegistryClient {
    transport: Arc<dyn RegistryTransport>,
    endpoint: RegistryEndpoint,
}

impl TrustRegistryClient {
    pub fn new(transport: Arc<dyn RegistryTransport>, endpoint: RegistryEndpoint) -> Self {
        Self {
            transport,
            endpoint,
        }
    }

    /// The discovered endpoint this client talks to
    pub fn endpoint(&self) -> &RegistryEndpoint {
        &self.endpoint
    }

    async fn get<T: DeserializeOwned>(&self, resource: &str) -> VerifierResult<T> {
        let value = self
            .transport
            .get_json(&self.endpoint.api_endpoint, resource)
            .await?;

        serde_json::from_value(value)
            .map_err(|e| VerifierError::Response(format!("unexpected {}: {}", resource, e)))
    }

    /// GET `/did/identifiers/{did}`: the DID document
    ///
    /// A successful answer is the "is registered" signal.
    pub async fn did_document(&self, did: &str) -> VerifierResult<DidDocument> {
        self.get(&format!("/did/identifiers/{}", urlencoding::encode(did)))
            .await
    }

    /// GET `/did/identifiers/{did}/details`: registrar-side details
    pub async fn did_document_details(&self, did: &str) -> VerifierResult<DidDocumentDetails> {
        self.get(&format!(
            "/did/identifiers/{}/details",
            urlencoding::encode(did)
        ))
        .await
    }

    /// GET `/did/identifiers`: paginated identifier listing
    pub async fn did_identifiers(
        &self,
        page_after: Option<&str>,
        page_size: Option<u32>,
        domain: Option<&str>,
    ) -> VerifierResult<serde_json::Value> {
        self.get(&paged_resource("/did/identifiers", page_after, page_size, domain))
            .await
    }

    /// GET `/did/issuers/{did}`: the trusted-issuer record
    ///
    /// Absence of the record means the DID is not a trusted issuer.
    pub async fn trusted_issuer(&self, did: &str) -> VerifierResult<TrustedIssuerRecord> {
        self.get(&format!("/did/issuers/{}", urlencoding::encode(did)))
            .await
    }

    /// GET `/did/issuers`: paginated trusted-issuer listing
    pub async fn trusted_issuers(
        &self,
        page_after: Option<&str>,
        page_size: Option<u32>,
        domain: Option<&str>,
    ) -> VerifierResult<serde_json::Value> {
        self.get(&paged_resource("/did/issuers", page_after, page_size, domain))
            .await
    }

    /// Most privileged role the registry attributes grant the issuer
    pub async fn issuer_role(&self, did: &str) -> VerifierResult<Option<IssuerRole>> {
        let record = self.trusted_issuer(did).await?;
        Ok(IssuerRights::from_attributes(&record.attributes).role())
    }

    /// POST `/issuer/credential/status/history`: status-change history for
    /// a credential fingerprint, ordered by the registry
    pub async fn credential_status_history(
        &self,
        credential_hash: &str,
        domain: &str,
    ) -> VerifierResult<RevocationHistory> {
        let body = serde_json::json!({
            "credential_hash": credential_hash,
            "domain": domain,
        });

        let value = self
            .transport
            .post_json(
                &self.endpoint.api_endpoint,
                "/issuer/credential/status/history",
                body,
            )
            .await?;

        serde_json::from_value(value)
            .map_err(|e| VerifierError::Response(format!("unexpected status history: {}", e)))
    }

    /// GET `/.well-known/registries-configuration` from the API endpoint
    pub async fn registries_configuration(&self) -> VerifierResult<RegistriesConfiguration> {
        self.get(crate::registry::locator::WELL_KNOWN_REGISTRIES).await
    }

    /// GET `/.well-known/openid-configuration` from the API endpoint
    pub async fn openid_configuration(&self) -> VerifierResult<serde_json::Value> {
        self.get("/.well-known/openid-configuration").await
    }
}

fn paged_resource(
    base: &str,
    page_after: Option<&str>,
    page_size: Option<u32>,
    domain: Option<&str>,
) -> String {
    let mut params = Vec::new();
    if let Some(after) = page_after {
        params.push(format!("page[after]={}", urlencoding::encode(after)));
    }
    if let Some(size) = page_size {
        params.push(format!("page[size]={}", size));
    }
    if let Some(domain) = domain {
        params.push(format!("domain={}", urlencoding::encode(domain)));
    }

    if params.is_empty() {
        base.to_string()
    } else {
        format!("{}?{}", base, params.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paged_resource_without_params() {
        assert_eq!(paged_resource("/did/issuers", None, None, None), "/did/issuers");
    }

    #[test]
    fn test_paged_resource_with_all_params() {
        assert_eq!(
            paged_resource("/did/identifiers", Some("42"), Some(25), Some("example.com")),
            "/did/identifiers?page[after]=42&page[size]=25&domain=example.com"
        );
    }
}
