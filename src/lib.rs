//! Meridian Trust: did:web trust registry resolution and credential
//! verification.
//!
//! Resolves a `did:web` identifier to the trust registry that governs it
//! and answers two questions for a relying party: which hierarchical trust
//! role (TI, TAO, RootTAO) the identifier holds, and whether a credential
//! it issued has been revoked by someone with authority to do so. Results
//! come back as an always-fully-populated [`card::VerificationCard`].
//!
//! Signature verification over credentials, response caching, and registry
//! write operations are out of scope.

pub mod card;
pub mod certificate;
pub mod config;
pub mod credential;
pub mod did;
pub mod error;
pub mod registry;
pub mod trust;

pub use card::{TrustStatus, VerificationCard, VerificationCardBuilder};
pub use config::VerifierConfig;
pub use error::{VerifierError, VerifierResult};
