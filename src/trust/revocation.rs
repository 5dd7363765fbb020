/// Authority-scoped revocation-status resolution
///
/// A status-change entry governs a subject only if the entry's path is a
/// prefix of the subject's path; the registry's ordering encodes authority
/// precedence and is not re-sorted here.
use crate::card::TrustStatus;
use crate::registry::models::RevocationHistoryItem;

/// Resolve the authoritative revocation status of a credential
///
/// `None` means the history fetch itself failed: indeterminate. An empty
/// history is fail-closed: an issuer with no recorded status entries is
/// not yet confirmed valid. Otherwise the first entry in registry order
/// whose path covers `subject_path` decides via the low status bit, and a
/// history where no entry covers the subject is again fail-closed.
pub fn resolve_revocation(
    history: Option<&[RevocationHistoryItem]>,
    subject_path: &str,
) -> TrustStatus {
    let Some(items) = history else {
        return TrustStatus::Unknown;
    };

    if items.is_empty() {
        return TrustStatus::Denied;
    }

    for item in items {
        if subject_path.starts_with(&item.path) {
            return if item.credential_status & 1 == 1 {
                TrustStatus::Denied
            } else {
                TrustStatus::Confirmed
            };
        }
    }

    TrustStatus::Denied
}
