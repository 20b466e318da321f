//! KYC record entity and its canonical serialization.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::error::{KycError, Result};

/// Verification status of a KYC record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum KycStatus {
    Pending,
    Verified,
    Rejected,
    Expired,
}

impl KycStatus {
    /// Canonical name as it appears in serialized records.
    pub fn as_str(&self) -> &'static str {
        match self {
            KycStatus::Pending => "PENDING",
            KycStatus::Verified => "VERIFIED",
            KycStatus::Rejected => "REJECTED",
            KycStatus::Expired => "EXPIRED",
        }
    }
}

impl std::fmt::Display for KycStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-supplied fields of a new KYC record.
///
/// Everything here is immutable once the record exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KycApplication {
    pub id: String,
    pub full_name: String,
    pub dob: String,
    pub nationality: String,
    pub document_type: String,
    pub document_hash: String,
}

impl KycApplication {
    pub fn new(
        id: impl Into<String>,
        full_name: impl Into<String>,
        dob: impl Into<String>,
        nationality: impl Into<String>,
        document_type: impl Into<String>,
        document_hash: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            full_name: full_name.into(),
            dob: dob.into(),
            nationality: nationality.into(),
            document_type: document_type.into(),
            document_hash: document_hash.into(),
        }
    }
}

/// The durable KYC record stored under its `id`.
///
/// Field order is the canonical serialization order and must not change:
/// the serialized form is both the stored value and the notification payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct KycRecord {
    /// Stable primary key, assigned at creation.
    pub id: String,

    /// Legal name of the individual.
    pub full_name: String,

    /// Date of birth, as supplied.
    pub dob: String,

    /// Country of citizenship.
    pub nationality: String,

    /// Kind of identity document (passport, national ID, ...).
    pub document_type: String,

    /// Content identifier or digest of the uploaded document.
    pub document_hash: String,

    /// Current verification status.
    pub status: KycStatus,

    /// Organization that performed the most recent write.
    #[serde(rename = "issuerMSP")]
    pub issuer_msp: String,

    /// Ledger timestamp (seconds) of the most recent write.
    pub updated_at: i64,
}

impl KycRecord {
    /// A freshly created record: `PENDING`, credited to `issuer_msp` at `updated_at`.
    pub fn pending(application: KycApplication, issuer_msp: &str, updated_at: i64) -> Self {
        let KycApplication {
            id,
            full_name,
            dob,
            nationality,
            document_type,
            document_hash,
        } = application;

        Self {
            id,
            full_name,
            dob,
            nationality,
            document_type,
            document_hash,
            status: KycStatus::Pending,
            issuer_msp: issuer_msp.to_string(),
            updated_at,
        }
    }

    /// Complete replacement record with a new status and write attribution.
    ///
    /// Descriptive fields are carried over unchanged.
    pub fn transitioned(&self, status: KycStatus, issuer_msp: &str, updated_at: i64) -> Self {
        Self {
            status,
            issuer_msp: issuer_msp.to_string(),
            updated_at,
            ..self.clone()
        }
    }

    /// Canonical JSON text.
    pub fn to_canonical_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Canonical JSON bytes, as persisted in the record store.
    pub fn to_canonical_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Decode a record from its serialized form. Field order is irrelevant.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(KycError::from)
    }
}

/// Lowercase hex SHA-256 of a document, usable as a `document_hash`.
pub fn document_digest(document: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(document);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> KycRecord {
        KycRecord::pending(
            KycApplication::new(
                "kyc1",
                "John Doe",
                "1990-01-15",
                "USA",
                "Passport",
                "QmHash123",
            ),
            "Org1MSP",
            1_700_000_000,
        )
    }

    #[test]
    fn canonical_json_has_fixed_field_order() {
        let json = sample().to_canonical_json().unwrap();
        assert_eq!(
            json,
            r#"{"id":"kyc1","fullName":"John Doe","dob":"1990-01-15","nationality":"USA","documentType":"Passport","documentHash":"QmHash123","status":"PENDING","issuerMSP":"Org1MSP","updatedAt":1700000000}"#
        );
    }

    #[test]
    fn reserialization_is_stable() {
        let first = sample().to_canonical_bytes().unwrap();
        let second = KycRecord::from_slice(&first)
            .unwrap()
            .to_canonical_bytes()
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn decoding_ignores_field_order_and_whitespace() {
        let shuffled = br#"{ "updatedAt": 1700000000, "status": "PENDING", "issuerMSP": "Org1MSP",
            "documentHash": "QmHash123", "documentType": "Passport", "nationality": "USA",
            "dob": "1990-01-15", "fullName": "John Doe", "id": "kyc1" }"#;
        assert_eq!(KycRecord::from_slice(shuffled).unwrap(), sample());
    }

    #[test]
    fn unknown_status_fails_to_decode() {
        let json = sample()
            .to_canonical_json()
            .unwrap()
            .replace("PENDING", "ARCHIVED");
        let err = KycRecord::from_slice(json.as_bytes()).unwrap_err();
        assert_eq!(err.code(), "SERIALIZATION_FAILED");
    }

    #[test]
    fn transition_keeps_descriptive_fields() {
        let original = sample();
        let next = original.transitioned(KycStatus::Verified, "AuditorMSP", 1_700_000_100);

        assert_eq!(next.status, KycStatus::Verified);
        assert_eq!(next.issuer_msp, "AuditorMSP");
        assert_eq!(next.updated_at, 1_700_000_100);
        assert_eq!(next.id, original.id);
        assert_eq!(next.full_name, original.full_name);
        assert_eq!(next.dob, original.dob);
        assert_eq!(next.nationality, original.nationality);
        assert_eq!(next.document_type, original.document_type);
        assert_eq!(next.document_hash, original.document_hash);
    }

    #[test]
    fn status_display_matches_serde_name() {
        for status in [
            KycStatus::Pending,
            KycStatus::Verified,
            KycStatus::Rejected,
            KycStatus::Expired,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{status}\""));
        }
    }

    #[test]
    fn document_digest_is_sha256_hex() {
        assert_eq!(
            document_digest(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
