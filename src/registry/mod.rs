/// Trust registry discovery and read-only REST access
///
/// A did:web domain publishes the location of its governing registry in a
/// well-known discovery document; everything else is read through the
/// registry's REST API.
pub mod client;
pub mod locator;
pub mod models;
pub mod transport;

pub use client::TrustRegistryClient;
pub use locator::{RegistryEndpoint, RegistryLocator};
pub use transport::{HttpTransport, RegistryTransport};
