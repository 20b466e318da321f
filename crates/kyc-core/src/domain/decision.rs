//! Verification decisions.

use std::str::FromStr;

use super::error::KycError;
use super::record::KycStatus;

/// Outcome requested by a verifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    /// Status a record moves to under this decision.
    pub fn status(self) -> KycStatus {
        match self {
            Decision::Approve => KycStatus::Verified,
            Decision::Reject => KycStatus::Rejected,
        }
    }
}

impl FromStr for Decision {
    type Err = KycError;

    /// Case-insensitive match on `APPROVE` / `REJECT`. No trimming.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("APPROVE") {
            Ok(Decision::Approve)
        } else if s.eq_ignore_ascii_case("REJECT") {
            Ok(Decision::Reject)
        } else {
            Err(KycError::InvalidDecision {
                decision: s.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_any_case() {
        for raw in ["APPROVE", "approve", "Approve", "aPpRoVe"] {
            assert_eq!(raw.parse::<Decision>().unwrap(), Decision::Approve);
        }
        for raw in ["REJECT", "reject", "Reject"] {
            assert_eq!(raw.parse::<Decision>().unwrap(), Decision::Reject);
        }
    }

    #[test]
    fn rejects_everything_else() {
        for raw in ["", "INVALID", " APPROVE", "APPROVED", "yes"] {
            let err = raw.parse::<Decision>().unwrap_err();
            assert_eq!(err.code(), "INVALID_DECISION");
        }
    }

    #[test]
    fn maps_to_status() {
        assert_eq!(Decision::Approve.status(), KycStatus::Verified);
        assert_eq!(Decision::Reject.status(), KycStatus::Rejected);
    }
}
