/// Wire models for registry responses
///
/// Only the fields the verifier reads are modelled; registries are free to
/// return more, and unknown fields are ignored on deserialization.
use serde::{Deserialize, Serialize};

/// `/.well-known/registries-configuration` discovery document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistriesConfiguration {
    /// Base URL of the registry REST API for this domain
    pub api_endpoint: String,
}

/// A DID document as served by the registry
///
/// Presence of the document at all is the "is registered" signal; the
/// verification-method list backs the signing-key publication check.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DidDocument {
    pub id: Option<String>,
    #[serde(rename = "verificationMethod", default)]
    pub verification_method: Vec<VerificationMethod>,
}

/// A single entry of a DID document's verification-method list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationMethod {
    pub id: String,
    #[serde(rename = "type")]
    pub method_type: Option<String>,
    pub controller: Option<String>,
}

/// Registrar-side details for a DID
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DidDocumentDetails {
    /// Authoritative canonical path for the DID, when the registrar exposes it
    pub path: Option<String>,
}

/// A trusted-issuer record from the registry
///
/// Absence of the record means the DID is not a trusted issuer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrustedIssuerRecord {
    pub did: Option<String>,
    #[serde(default)]
    pub attributes: Vec<IssuerAttribute>,
}

/// One attribute of a trusted-issuer record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssuerAttribute {
    #[serde(rename = "issuerType")]
    pub issuer_type: Option<String>,
}

/// Credential status-change history, ordered by the registry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RevocationHistory {
    #[serde(default)]
    pub items: Vec<RevocationHistoryItem>,
}

/// One status-change entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevocationHistoryItem {
    /// Path scope of the issuer that recorded the change; the entry governs
    /// a subject only if this is a prefix of the subject's path
    pub path: String,
    /// Status word; bit 0 set means revoked or suspended
    pub credential_status: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_did_document_camel_case_wire_names() {
        let doc: DidDocument = serde_json::from_str(
            r#"{
                "id": "did:web:example.com:issuers:alice",
                "verificationMethod": [
                    {"id": "did:web:example.com:issuers:alice#key-1", "type": "JsonWebKey2020"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(doc.verification_method.len(), 1);
        assert_eq!(
            doc.verification_method[0].id,
            "did:web:example.com:issuers:alice#key-1"
        );
    }

    #[test]
    fn test_did_document_without_methods() {
        let doc: DidDocument =
            serde_json::from_str(r#"{"id": "did:web:example.com"}"#).unwrap();
        assert!(doc.verification_method.is_empty());
    }

    #[test]
    fn test_issuer_attributes_issuer_type() {
        let record: TrustedIssuerRecord = serde_json::from_str(
            r#"{"did": "did:web:example.com:issuers:alice",
                "attributes": [{"issuerType": "TI"}, {"issuerType": "TAO"}, {}]}"#,
        )
        .unwrap();

        assert_eq!(record.attributes.len(), 3);
        assert_eq!(record.attributes[0].issuer_type.as_deref(), Some("TI"));
        assert_eq!(record.attributes[2].issuer_type, None);
    }

    #[test]
    fn test_revocation_history_defaults_to_empty() {
        let history: RevocationHistory = serde_json::from_str("{}").unwrap();
        assert!(history.items.is_empty());
    }
}
