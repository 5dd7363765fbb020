/// Credential token decoding and fingerprinting
///
/// Decoding is a pure read of the JWT header and payload: no signature,
/// expiry, or audience checks happen here. The fingerprint is the SHA-256
/// hex digest of the raw serialized token and is the key the registry
/// indexes status history by.
use crate::error::{VerifierError, VerifierResult};
use jsonwebtoken::{decode, decode_header, DecodingKey, Validation};
use serde::Deserialize;
use sha2::{Digest, Sha256};

/// The claims the verifier reads from a credential payload
#[derive(Debug, Deserialize)]
struct CredentialClaims {
    iss: Option<String>,
}

/// A decoded but unverified credential token
#[derive(Debug, Clone)]
pub struct DecodedCredential {
    /// Declared issuer DID (`iss` claim)
    pub issuer_did: String,
    /// Signing-key identifier from the header, when declared
    pub key_id: Option<String>,
    /// The raw serialized token, kept for fingerprinting
    pub raw: String,
}

/// Decode a credential JWT without verifying it
///
/// Fails fast with `DecodeFailure` on anything that is not a well-formed
/// token carrying an `iss` claim; no network is touched.
pub fn decode_credential_token(token: &str) -> VerifierResult<DecodedCredential> {
    let header = decode_header(token)
        .map_err(|e| VerifierError::DecodeFailure(format!("invalid header: {}", e)))?;

    let mut validation = Validation::new(header.alg);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_nbf = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let data = decode::<CredentialClaims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map_err(|e| VerifierError::DecodeFailure(format!("invalid payload: {}", e)))?;

    let issuer_did = data
        .claims
        .iss
        .ok_or_else(|| VerifierError::DecodeFailure("missing iss claim".to_string()))?;

    Ok(DecodedCredential {
        issuer_did,
        key_id: header.kid,
        raw: token.to_string(),
    })
}

/// Content-addressed fingerprint of a serialized credential
pub fn credential_fingerprint(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine as _;

    /// Unsigned test token with the given header and payload JSON
    fn token(header: &str, payload: &str) -> String {
        format!(
            "{}.{}.{}",
            URL_SAFE_NO_PAD.encode(header),
            URL_SAFE_NO_PAD.encode(payload),
            URL_SAFE_NO_PAD.encode([0u8; 32])
        )
    }

    #[test]
    fn test_decode_reads_issuer_and_kid() {
        let jwt = token(
            r#"{"alg":"HS256","typ":"JWT","kid":"did:web:example.com:issuers:alice#key-1"}"#,
            r#"{"iss":"did:web:example.com:issuers:alice","sub":"holder"}"#,
        );

        let decoded = decode_credential_token(&jwt).unwrap();
        assert_eq!(decoded.issuer_did, "did:web:example.com:issuers:alice");
        assert_eq!(
            decoded.key_id.as_deref(),
            Some("did:web:example.com:issuers:alice#key-1")
        );
        assert_eq!(decoded.raw, jwt);
    }

    #[test]
    fn test_decode_without_kid() {
        let jwt = token(
            r#"{"alg":"HS256","typ":"JWT"}"#,
            r#"{"iss":"did:web:example.com"}"#,
        );

        let decoded = decode_credential_token(&jwt).unwrap();
        assert_eq!(decoded.key_id, None);
    }

    #[test]
    fn test_decode_rejects_missing_issuer() {
        let jwt = token(r#"{"alg":"HS256","typ":"JWT"}"#, r#"{"sub":"holder"}"#);
        assert!(decode_credential_token(&jwt).is_err());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_credential_token("not-a-jwt").is_err());
        assert!(decode_credential_token("").is_err());
    }

    #[test]
    fn test_fingerprint_is_stable_sha256_hex() {
        let fp1 = credential_fingerprint("abc");
        let fp2 = credential_fingerprint("abc");
        assert_eq!(fp1, fp2);
        // Known SHA-256 of "abc"
        assert_eq!(
            fp1,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_fingerprint_differs_per_token() {
        assert_ne!(credential_fingerprint("a"), credential_fingerprint("b"));
    }
}
