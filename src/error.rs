/// Unified error types for Meridian Trust
use thiserror::Error;

/// Main error type for the verifier
///
/// Only two variants surface to callers as hard failures: `MalformedDid`
/// and `DecodeFailure` (bad input). Everything else is caught at the point
/// of use and converted to a tri-state "unknown" field on the card.
#[derive(Error, Debug)]
pub enum VerifierError {
    /// The identifier is not a well-formed did:web DID
    #[error("Malformed DID: {0}")]
    MalformedDid(String),

    /// The governing registry could not be discovered or reached
    #[error("Registry unreachable: {0}")]
    RegistryUnreachable(String),

    /// No TLS peer certificate could be retrieved for the domain
    #[error("Certificate unavailable: {0}")]
    CertificateUnavailable(String),

    /// The credential token could not be decoded
    #[error("Credential decode failed: {0}")]
    DecodeFailure(String),

    /// Transport-level failure (connect, timeout, body read)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The registry answered with a non-success status or an unexpected body
    #[error("Registry response error: {0}")]
    Response(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for verifier operations
pub type VerifierResult<T> = Result<T, VerifierError>;
