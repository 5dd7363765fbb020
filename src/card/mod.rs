/// Verification card: the always-fully-populated result structure
///
/// Every field is present on every card; tri-state values encode unknown
/// and negative outcomes instead of omission.
pub mod builder;

pub use builder::VerificationCardBuilder;

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Tri-state trust outcome
///
/// Serialized as a bare integer: `1` confirmed, `-1` denied (or
/// fail-closed), `0` unknown / inapplicable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrustStatus {
    Confirmed,
    Denied,
    #[default]
    Unknown,
}

impl TrustStatus {
    pub fn as_i8(self) -> i8 {
        match self {
            TrustStatus::Confirmed => 1,
            TrustStatus::Denied => -1,
            TrustStatus::Unknown => 0,
        }
    }

    /// Map a definite check onto confirmed/denied
    pub fn from_bool(value: bool) -> Self {
        if value {
            TrustStatus::Confirmed
        } else {
            TrustStatus::Denied
        }
    }
}

impl Serialize for TrustStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i8(self.as_i8())
    }
}

impl<'de> Deserialize<'de> for TrustStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match i8::deserialize(deserializer)? {
            1 => Ok(TrustStatus::Confirmed),
            -1 => Ok(TrustStatus::Denied),
            0 => Ok(TrustStatus::Unknown),
            other => Err(D::Error::custom(format!("invalid trust status: {}", other))),
        }
    }
}

/// Display identity of a TI or TAO role
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleIdentity {
    pub name: String,
}

/// Trust outcome for the TI or TAO role
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleStatus {
    pub is_trusted: TrustStatus,
    pub identity: RoleIdentity,
}

/// Identity of the domain-level root of trust, backed by its certificate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RootTaoIdentity {
    /// Common Name of the certificate subject
    pub name: String,
    /// PEM encoding of the raw certificate, when one was retrieved
    pub raw_certificate: Option<String>,
    pub organization: Option<String>,
    pub organization_unit: Option<String>,
    pub is_valid_from: Option<DateTime<Utc>>,
    pub is_valid_to: Option<DateTime<Utc>>,
    /// Browsable link derived from the CN, wildcard marker stripped
    pub link: Option<String>,
}

/// Trust outcome for the RootTAO role
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RootTaoStatus {
    pub is_trusted: TrustStatus,
    pub identity: RootTaoIdentity,
}

/// The structured verification result for a DID or a credential
///
/// Issuer-only cards carry the credential-specific fields at `0`
/// (inapplicable); no field is ever omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerificationCard {
    pub is_did_registered: TrustStatus,
    pub is_did_trusted_issuer: TrustStatus,
    #[serde(rename = "TI")]
    pub ti: RoleStatus,
    #[serde(rename = "TAO")]
    pub tao: RoleStatus,
    #[serde(rename = "RootTAO")]
    pub root_tao: RootTaoStatus,
    pub is_credential_signing_publicly_confirmed: TrustStatus,
    pub is_credential_revoked: TrustStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trust_status_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&TrustStatus::Confirmed).unwrap(), "1");
        assert_eq!(serde_json::to_string(&TrustStatus::Denied).unwrap(), "-1");
        assert_eq!(serde_json::to_string(&TrustStatus::Unknown).unwrap(), "0");
    }

    #[test]
    fn test_trust_status_round_trip() {
        for status in [
            TrustStatus::Confirmed,
            TrustStatus::Denied,
            TrustStatus::Unknown,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            let back: TrustStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(back, status);
        }
    }

    #[test]
    fn test_trust_status_rejects_out_of_range() {
        assert!(serde_json::from_str::<TrustStatus>("2").is_err());
    }

    #[test]
    fn test_default_card_is_fully_unknown() {
        let card = VerificationCard::default();
        assert_eq!(card.is_did_registered, TrustStatus::Unknown);
        assert_eq!(card.is_did_trusted_issuer, TrustStatus::Unknown);
        assert_eq!(card.ti.is_trusted, TrustStatus::Unknown);
        assert_eq!(card.tao.is_trusted, TrustStatus::Unknown);
        assert_eq!(card.root_tao.is_trusted, TrustStatus::Unknown);
        assert_eq!(card.is_credential_revoked, TrustStatus::Unknown);
    }

    #[test]
    fn test_card_wire_names() {
        let card = VerificationCard::default();
        let json = serde_json::to_value(&card).unwrap();

        assert!(json.get("is_did_registered").is_some());
        assert!(json.get("TI").is_some());
        assert!(json.get("TAO").is_some());
        assert!(json.get("RootTAO").is_some());
        assert_eq!(json["is_did_registered"], serde_json::json!(0));
    }
}
