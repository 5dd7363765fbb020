/// Rights bitmask for hierarchical trust roles
///
/// An issuer's registry attributes grant it roles in the trust hierarchy.
/// Roles combine as bits over a common base, so one DID can be both a
/// Trusted Issuer and a Trust Anchor Organization.
use crate::registry::models::IssuerAttribute;
use serde::{Deserialize, Serialize};

/// Named trust roles, most privileged last
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssuerRole {
    Ti,
    Tao,
    RootTao,
}

impl IssuerRole {
    /// Registry wire name of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            IssuerRole::Ti => "TI",
            IssuerRole::Tao => "TAO",
            IssuerRole::RootTao => "RootTAO",
        }
    }
}

/// Bitmask of rights held by an issuer
///
/// `BASE` is always present; one additional bit is set per distinct
/// `issuerType` found in the attributes. Duplicate attributes are harmless
/// since OR is idempotent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuerRights(u32);

impl IssuerRights {
    pub const BASE: u32 = 0b011;
    pub const TI: u32 = 0b100;
    pub const TAO: u32 = 0b1000;
    pub const ROOT_TAO: u32 = 0b10000;

    /// Rights with no role attributes at all
    pub fn base() -> Self {
        Self(Self::BASE)
    }

    /// Compute rights from an issuer's registry attributes
    pub fn from_attributes(attributes: &[IssuerAttribute]) -> Self {
        let mut bits = Self::BASE;

        for attribute in attributes {
            match attribute.issuer_type.as_deref() {
                Some("TI") => bits |= Self::TI,
                Some("TAO") => bits |= Self::TAO,
                Some("RootTAO") => bits |= Self::ROOT_TAO,
                _ => {}
            }
        }

        Self(bits)
    }

    pub fn bits(&self) -> u32 {
        self.0
    }

    /// Valid Trusted Issuer: base bits plus the TI bit
    ///
    /// Only the low three bits are masked, so holding TAO or RootTAO bits
    /// in addition still passes.
    pub fn is_valid_ti(&self) -> bool {
        (self.0 & 0b111) == 0b111
    }

    /// Valid Trust Anchor Organization: base bits plus the TAO bit
    pub fn is_valid_tao(&self) -> bool {
        (self.0 & 0b1011) == 0b1011
    }

    /// Most privileged role granted, RootTAO over TAO over TI
    pub fn role(&self) -> Option<IssuerRole> {
        if self.0 & Self::ROOT_TAO != 0 {
            Some(IssuerRole::RootTao)
        } else if self.0 & Self::TAO != 0 {
            Some(IssuerRole::Tao)
        } else if self.0 & Self::TI != 0 {
            Some(IssuerRole::Ti)
        } else {
            None
        }
    }
}
