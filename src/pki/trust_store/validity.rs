use std::fmt;

use chrono::{DateTime, Utc};

use crate::pki::trust_store::models::CertificateRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    NotYetValid,
    Expired,
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::NotYetValid => f.write_str("not yet valid"),
            RejectionReason::Expired => f.write_str("expired"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidityVerdict {
    Accepted,
    Rejected(RejectionReason),
}

/// Checks `not_before <= now <= not_after`; both bounds are inclusive.
pub fn check_validity(record: &CertificateRecord, now: DateTime<Utc>) -> ValidityVerdict {
    if now < record.not_before {
        ValidityVerdict::Rejected(RejectionReason::NotYetValid)
    } else if now > record.not_after {
        ValidityVerdict::Rejected(RejectionReason::Expired)
    } else {
        ValidityVerdict::Accepted
    }
}
