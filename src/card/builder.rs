/// Verification card assembly
///
/// Orchestrates registry discovery, DID-document and trusted-issuer
/// lookups, certificate retrieval, and revocation resolution into one
/// card. Sub-lookup failures are converted to tri-state fields at the
/// point of use; only malformed input aborts a build.
use crate::card::{TrustStatus, VerificationCard};
use crate::certificate::{CertificateFetcher, DomainCertificate, TlsCertificateFetcher};
use crate::config::VerifierConfig;
use crate::credential::{credential_fingerprint, decode_credential_token};
use crate::did::{self, DidWeb};
use crate::error::{VerifierError, VerifierResult};
use crate::registry::models::DidDocument;
use crate::registry::{
    HttpTransport, RegistryEndpoint, RegistryLocator, RegistryTransport, TrustRegistryClient,
};
use crate::trust::{resolve_revocation, IssuerRights};
use std::sync::Arc;
use tracing::{debug, info};

pub struct VerificationCardBuilder {
    config: VerifierConfig,
    transport: Arc<dyn RegistryTransport>,
    certificates: Arc<dyn CertificateFetcher>,
}

/// What a successful trust-chain pass leaves behind for the credential
/// checks
struct ChainContext {
    client: TrustRegistryClient,
    document: DidDocument,
    path: String,
}

impl VerificationCardBuilder {
    /// Build a verifier with the default HTTP and TLS collaborators
    pub fn new(config: VerifierConfig) -> VerifierResult<Self> {
        let transport = Arc::new(HttpTransport::new(&config)?);
        Ok(Self::with_collaborators(
            config,
            transport,
            Arc::new(TlsCertificateFetcher),
        ))
    }

    /// Build a verifier with explicit collaborators
    pub fn with_collaborators(
        config: VerifierConfig,
        transport: Arc<dyn RegistryTransport>,
        certificates: Arc<dyn CertificateFetcher>,
    ) -> Self {
        Self {
            config,
            transport,
            certificates,
        }
    }

    /// Verification card for a bare issuer DID
    ///
    /// Credential-specific fields stay at `0` (inapplicable).
    pub async fn build_for_issuer(&self, issuer_did: &str) -> VerifierResult<VerificationCard> {
        let did = DidWeb::parse(issuer_did)?;
        info!("Building issuer verification card for {}", did.as_str());

        let mut card = VerificationCard::default();
        self.populate_trust_chain(&did, &mut card).await;

        Ok(card)
    }

    /// Verification card for a signed credential token
    ///
    /// Decodes the token to learn the declared issuer and signing key, then
    /// adds the signing-key publication and revocation checks on top of the
    /// issuer card.
    pub async fn build_for_credential(&self, token: &str) -> VerifierResult<VerificationCard> {
        let credential = decode_credential_token(token)?;
        let did = DidWeb::parse(&credential.issuer_did)?;
        info!("Building credential verification card for {}", did.as_str());

        let mut card = VerificationCard::default();
        let chain = self.populate_trust_chain(&did, &mut card).await;

        let Some(chain) = chain else {
            // Unregistered or unreachable: revocation stays indeterminate,
            // no further network calls.
            return Ok(card);
        };

        card.is_credential_signing_publicly_confirmed =
            signing_key_status(&chain.document, credential.key_id.as_deref());

        let fingerprint = credential_fingerprint(&credential.raw);
        card.is_credential_revoked = match chain
            .client
            .credential_status_history(&fingerprint, did.domain())
            .await
        {
            Ok(history) => resolve_revocation(Some(&history.items), &chain.path),
            Err(err) => {
                debug!("Status history fetch failed for {}: {}", did.as_str(), err);
                TrustStatus::Unknown
            }
        };

        Ok(card)
    }

    /// Canonical path of a DID, registrar-assisted with structural fallback
    pub async fn did_path(&self, did: &str) -> VerifierResult<String> {
        let did = DidWeb::parse(did)?;

        match self.locate(&did).await {
            Ok(endpoint) => {
                let client = self.client(endpoint);
                Ok(did::resolve_path(&did, &client).await)
            }
            Err(_) => Ok(did.structural_path()),
        }
    }

    /// Revocation status of a credential fingerprint under an issuer's
    /// authority scope
    pub async fn credential_revocation_status(
        &self,
        issuer_did: &str,
        credential_hash: &str,
    ) -> VerifierResult<TrustStatus> {
        let did = DidWeb::parse(issuer_did)?;

        let endpoint = match self.locate(&did).await {
            Ok(endpoint) => endpoint,
            Err(_) => return Ok(TrustStatus::Unknown),
        };
        let client = self.client(endpoint);
        let path = did::resolve_path(&did, &client).await;

        match client
            .credential_status_history(credential_hash, did.domain())
            .await
        {
            Ok(history) => Ok(resolve_revocation(Some(&history.items), &path)),
            Err(_) => Ok(TrustStatus::Unknown),
        }
    }

    /// Leaf certificate presented by an HTTPS server
    pub async fn connection_certificate(
        &self,
        server_url: &str,
    ) -> VerifierResult<DomainCertificate> {
        let host = url_host(server_url).ok_or_else(|| {
            VerifierError::CertificateUnavailable(format!("no host in {}", server_url))
        })?;

        self.certificates.fetch(&host, self.config.tls_port).await
    }

    async fn locate(&self, did: &DidWeb) -> VerifierResult<RegistryEndpoint> {
        RegistryLocator::new(Arc::clone(&self.transport))
            .locate(did)
            .await
    }

    fn client(&self, endpoint: RegistryEndpoint) -> TrustRegistryClient {
        TrustRegistryClient::new(Arc::clone(&self.transport), endpoint)
    }

    /// Shared trust-chain pass over the registration, TI, TAO and RootTAO
    /// fields
    ///
    /// Returns `None` when the registry was unreachable or the DID is not
    /// registered; the credential checks are skipped in both cases.
    async fn populate_trust_chain(
        &self,
        did: &DidWeb,
        card: &mut VerificationCard,
    ) -> Option<ChainContext> {
        let endpoint = match self.locate(did).await {
            Ok(endpoint) => endpoint,
            Err(err) => {
                debug!("No registry for {}: {}", did.as_str(), err);
                return None;
            }
        };
        let client = self.client(endpoint);

        let document = match client.did_document(did.as_str()).await {
            Ok(document) => document,
            Err(err) => {
                debug!("DID document fetch failed for {}: {}", did.as_str(), err);
                card.is_did_registered = TrustStatus::Denied;
                card.is_did_trusted_issuer = TrustStatus::Denied;
                return None;
            }
        };
        card.is_did_registered = TrustStatus::Confirmed;

        let path = did::resolve_path(did, &client).await;
        let tao_did = did.tao_did(&path);
        let registry_host = url_host(&client.endpoint().api_endpoint);

        // Independent lookups; none feeds another's input.
        let (issuer_record, tao_record, certificate) = tokio::join!(
            client.trusted_issuer(did.as_str()),
            client.trusted_issuer(&tao_did),
            self.fetch_registry_certificate(registry_host.as_deref()),
        );

        match issuer_record {
            Ok(record) => {
                card.is_did_trusted_issuer = TrustStatus::Confirmed;
                let rights = IssuerRights::from_attributes(&record.attributes);
                card.ti.is_trusted = TrustStatus::from_bool(rights.is_valid_ti());
            }
            Err(_) => {
                card.is_did_trusted_issuer = TrustStatus::Denied;
                card.ti.is_trusted = TrustStatus::Denied;
            }
        }
        card.ti.identity.name = did.ti_name(&path);

        match tao_record {
            Ok(record) => {
                let rights = IssuerRights::from_attributes(&record.attributes);
                card.tao.is_trusted = TrustStatus::from_bool(rights.is_valid_tao());
            }
            Err(_) => card.tao.is_trusted = TrustStatus::Denied,
        }
        card.tao.identity.name = did.tao_name(&path);

        match certificate {
            Ok(certificate) => {
                card.root_tao.is_trusted = TrustStatus::Confirmed;
                let name = certificate.subject.common_name.clone().unwrap_or_default();
                card.root_tao.identity.link = if name.is_empty() {
                    None
                } else {
                    Some(format!("https://{}", name.trim_start_matches("*.")))
                };
                card.root_tao.identity.name = name;
                card.root_tao.identity.organization = certificate.subject.organization;
                card.root_tao.identity.organization_unit =
                    certificate.subject.organizational_unit;
                card.root_tao.identity.is_valid_from = Some(certificate.not_before);
                card.root_tao.identity.is_valid_to = Some(certificate.not_after);
                card.root_tao.identity.raw_certificate = Some(certificate.pem);
            }
            Err(err) => {
                // No certificate is not proof of anything either way.
                debug!("Certificate fetch failed for {}: {}", did.domain(), err);
                card.root_tao.is_trusted = TrustStatus::Unknown;
            }
        }

        Some(ChainContext {
            client,
            document,
            path,
        })
    }

    async fn fetch_registry_certificate(
        &self,
        host: Option<&str>,
    ) -> VerifierResult<DomainCertificate> {
        let host = host.ok_or_else(|| {
            VerifierError::CertificateUnavailable("registry endpoint has no host".to_string())
        })?;

        self.certificates.fetch(host, self.config.tls_port).await
    }
}

/// Host part of an HTTP(S) URL
fn url_host(url: &str) -> Option<String> {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_string))
}

/// Signing-key publication status: `0` when the DID document exposes no
/// verification methods, otherwise membership of `kid` in the list
fn signing_key_status(document: &DidDocument, key_id: Option<&str>) -> TrustStatus {
    if document.verification_method.is_empty() {
        return TrustStatus::Unknown;
    }

    let Some(kid) = key_id else {
        return TrustStatus::Denied;
    };

    if document
        .verification_method
        .iter()
        .any(|method| method.id == kid)
    {
        TrustStatus::Confirmed
    } else {
        TrustStatus::Denied
    }
}
