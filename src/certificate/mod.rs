/// TLS peer-certificate retrieval for RootTAO validation
///
/// RootTAO trust is not attribute-based: presenting a certificate the web
/// PKI accepts for the domain is the proof of domain-control authority.
/// Only the leaf certificate's subject fields and validity window are
/// consumed.
use crate::error::{VerifierError, VerifierResult};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio_rustls::rustls::pki_types::ServerName;
use tokio_rustls::rustls::{ClientConfig, RootCertStore};
use tokio_rustls::TlsConnector;
use tracing::debug;
use x509_parser::prelude::*;

/// Subject fields read from the leaf certificate
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct CertificateSubject {
    pub common_name: Option<String>,
    pub organization: Option<String>,
    pub organizational_unit: Option<String>,
}

/// A domain's leaf certificate, reduced to what the verifier consumes
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct DomainCertificate {
    pub subject: CertificateSubject,
    pub not_before: DateTime<Utc>,
    pub not_after: DateTime<Utc>,
    /// PEM encoding of the raw DER certificate
    pub pem: String,
}

/// Certificate retrieval seam
#[async_trait]
pub trait CertificateFetcher: Send + Sync {
    async fn fetch(&self, host: &str, port: u16) -> VerifierResult<DomainCertificate>;
}

/// rustls-backed fetcher: full handshake against web-PKI roots, then read
/// the peer's leaf certificate
pub struct TlsCertificateFetcher;

#[async_trait]
impl CertificateFetcher for TlsCertificateFetcher {
    async fn fetch(&self, host: &str, port: u16) -> VerifierResult<DomainCertificate> {
        debug!("Fetching TLS certificate for {}:{}", host, port);

        let mut roots = RootCertStore::empty();
        roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
        let config = ClientConfig::builder()
            .with_root_certificates(roots)
            .with_no_client_auth();
        let connector = TlsConnector::from(Arc::new(config));

        let tcp = TcpStream::connect((host, port)).await.map_err(|e| {
            VerifierError::CertificateUnavailable(format!(
                "connect to {}:{} failed: {}",
                host, port, e
            ))
        })?;

        let server_name = ServerName::try_from(host.to_string()).map_err(|_| {
            VerifierError::CertificateUnavailable(format!("invalid server name: {}", host))
        })?;

        let stream = connector.connect(server_name, tcp).await.map_err(|e| {
            VerifierError::CertificateUnavailable(format!(
                "TLS handshake with {} failed: {}",
                host, e
            ))
        })?;

        let (_, session) = stream.get_ref();
        let der = session
            .peer_certificates()
            .and_then(|certs| certs.first())
            .ok_or_else(|| {
                VerifierError::CertificateUnavailable(format!(
                    "{} presented no certificate",
                    host
                ))
            })?;

        parse_leaf_certificate(der.as_ref())
    }
}

/// Reduce a DER-encoded leaf certificate to the consumed fields
pub fn parse_leaf_certificate(der: &[u8]) -> VerifierResult<DomainCertificate> {
    let (_, cert) = X509Certificate::from_der(der).map_err(|e| {
        VerifierError::CertificateUnavailable(format!("certificate parse failed: {}", e))
    })?;

    let subject = cert.subject();
    let common_name = subject
        .iter_common_name()
        .next()
        .and_then(|attr| attr.as_str().ok())
        .map(str::to_string);
    let organization = subject
        .iter_organization()
        .next()
        .and_then(|attr| attr.as_str().ok())
        .map(str::to_string);
    let organizational_unit = subject
        .iter_organizational_unit()
        .next()
        .and_then(|attr| attr.as_str().ok())
        .map(str::to_string);

    let validity = cert.validity();
    let not_before = DateTime::from_timestamp(validity.not_before.timestamp(), 0)
        .ok_or_else(|| {
            VerifierError::CertificateUnavailable("invalid notBefore timestamp".to_string())
        })?;
    let not_after = DateTime::from_timestamp(validity.not_after.timestamp(), 0)
        .ok_or_else(|| {
            VerifierError::CertificateUnavailable("invalid notAfter timestamp".to_string())
        })?;

    Ok(DomainCertificate {
        subject: CertificateSubject {
            common_name,
            organization,
            organizational_unit,
        },
        not_before,
        not_after,
        pem: pem_encode(der),
    })
}

/// PEM-armor a DER certificate, folding the base64 body at 64 columns
pub fn pem_encode(der: &[u8]) -> String {
    let encoded = STANDARD.encode(der);

    let mut pem = String::with_capacity(encoded.len() + encoded.len() / 64 + 64);
    pem.push_str("-----BEGIN CERTIFICATE-----\n");
    let mut start = 0;
    while start < encoded.len() {
        let end = usize::min(start + 64, encoded.len());
        pem.push_str(&encoded[start..end]);
        pem.push('\n');
        start = end;
    }
    pem.push_str("-----END CERTIFICATE-----");

    pem
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pem_encode_folds_at_64_columns() {
        let der = vec![0xABu8; 120];
        let pem = pem_encode(&der);

        assert!(pem.starts_with("-----BEGIN CERTIFICATE-----\n"));
        assert!(pem.ends_with("-----END CERTIFICATE-----"));

        let body: Vec<&str> = pem
            .lines()
            .filter(|line| !line.starts_with("-----"))
            .collect();
        assert!(!body.is_empty());
        for line in &body[..body.len() - 1] {
            assert_eq!(line.len(), 64);
        }
        assert!(body[body.len() - 1].len() <= 64);
    }

    #[test]
    fn test_pem_encode_round_trips_der() {
        let der = b"not a real certificate, but bytes are bytes".to_vec();
        let pem = pem_encode(&der);

        let body: String = pem
            .lines()
            .filter(|line| !line.starts_with("-----"))
            .collect();
        assert_eq!(STANDARD.decode(body).unwrap(), der);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_leaf_certificate(&[0u8; 16]).is_err());
    }
}
