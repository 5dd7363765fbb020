/// did:web identifier parsing and path derivation
///
/// A did:web DID maps onto an HTTPS-hosted namespace:
/// `did:web:example.com:issuers:alice` denotes the path `/issuers/alice`
/// under `example.com`. The trust hierarchy follows that path: each
/// segment boundary is a potential Trust Anchor Organization, and the
/// bare domain is the RootTAO.
use crate::error::{VerifierError, VerifierResult};
use crate::registry::TrustRegistryClient;

const DID_WEB_PREFIX: &str = "did:web";

/// Returns true when the identifier uses the did:web method
pub fn is_did_web(did: &str) -> bool {
    did.starts_with(DID_WEB_PREFIX)
}

/// A parsed did:web identifier
///
/// Immutable once parsed; all derivations are pure functions over the
/// stored segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DidWeb {
    did: String,
    domain: String,
    raw_tail: String,
    root_path_hint: Option<String>,
}

impl DidWeb {
    /// Parse a `did:web:<domain>[:<segment>]*` string
    ///
    /// The domain is the third colon-delimited segment and is required.
    /// An optional fourth segment is additionally recorded as a root-path
    /// hint for registry discovery; it is not authoritative.
    pub fn parse(did: &str) -> VerifierResult<Self> {
        if !is_did_web(did) {
            return Err(VerifierError::MalformedDid(format!(
                "not a did:web identifier: {}",
                did
            )));
        }

        let parts: Vec<&str> = did.split(':').collect();
        let domain = parts
            .get(2)
            .filter(|segment| !segment.is_empty())
            .ok_or_else(|| {
                VerifierError::MalformedDid(format!("missing domain: {}", did))
            })?
            .to_string();

        let raw_tail = if parts.len() > 3 {
            parts[3..].join(":")
        } else {
            String::new()
        };
        let root_path_hint = parts
            .get(3)
            .filter(|segment| !segment.is_empty())
            .map(|segment| segment.to_string());

        Ok(Self {
            did: did.to_string(),
            domain,
            raw_tail,
            root_path_hint,
        })
    }

    /// The full DID string this value was parsed from
    pub fn as_str(&self) -> &str {
        &self.did
    }

    /// The HTTPS domain hosting the identifier
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// The colon-delimited sub-path after the domain, possibly empty
    pub fn raw_tail(&self) -> &str {
        &self.raw_tail
    }

    /// First sub-path segment, used as a discovery fallback only
    pub fn root_path_hint(&self) -> Option<&str> {
        self.root_path_hint.as_deref()
    }

    /// Derive the path structurally from the identifier alone
    ///
    /// Colon-delimited segments after the domain become `/`-delimited path
    /// segments; no segments means the domain root `/`.
    pub fn structural_path(&self) -> String {
        if self.raw_tail.is_empty() {
            "/".to_string()
        } else {
            format!("/{}", self.raw_tail.replace(':', "/"))
        }
    }

    /// DID of the parent Trust Anchor Organization for a resolved path
    ///
    /// Drops the last path segment; when nothing remains the TAO is the
    /// RootTAO, i.e. the bare domain DID.
    pub fn tao_did(&self, resolved_path: &str) -> String {
        let segments = path_segments(resolved_path);
        if segments.len() >= 2 {
            format!(
                "did:web:{}:{}",
                self.domain,
                segments[..segments.len() - 1].join(":")
            )
        } else {
            self.root_tao_did()
        }
    }

    /// DID of the Root Trust Anchor Organization (the bare domain)
    pub fn root_tao_did(&self) -> String {
        format!("did:web:{}", self.domain)
    }

    /// Display name of the Trusted Issuer: the last path segment, or the
    /// bare domain when the path has no segments
    pub fn ti_name(&self, resolved_path: &str) -> String {
        path_segments(resolved_path)
            .last()
            .map(|segment| segment.to_string())
            .unwrap_or_else(|| self.domain.clone())
    }

    /// Display name of the TAO: the second-to-last path segment, or the
    /// bare domain when fewer than two segments exist
    pub fn tao_name(&self, resolved_path: &str) -> String {
        let segments = path_segments(resolved_path);
        if segments.len() >= 2 {
            segments[segments.len() - 2].to_string()
        } else {
            self.domain.clone()
        }
    }
}

fn path_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|segment| !segment.is_empty()).collect()
}

/// Resolve the canonical path of a DID, registrar-assisted first
///
/// The registrar's `did_document_details` answer is authoritative when it
/// carries a path; any lookup failure silently falls through to structural
/// derivation, so this never fails once the DID parsed.
pub async fn resolve_path(did: &DidWeb, client: &TrustRegistryClient) -> String {
    match client.did_document_details(did.as_str()).await {
        Ok(details) => match details.path {
            Some(path) if !path.is_empty() => path,
            _ => did.structural_path(),
        },
        Err(err) => {
            tracing::debug!(
                "Registrar has no path for {}, deriving structurally: {}",
                did.as_str(),
                err
            );
            did.structural_path()
        }
    }
}
