use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use sha2::{Digest, Sha256};

use crate::error::{Result, SaladError};
use crate::models::Receipt;

/// Pretty JSON with a 4-space indent; the exact bytes that get hashed.
pub fn to_canonical_json<T: Serialize>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    // serde_json only emits valid UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Lowercase hex SHA-256 over every field except `hash`.
pub fn compute_hash(receipt: &Receipt) -> Result<String> {
    let canonical = to_canonical_json(&receipt.unsigned())?;
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

impl Receipt {
    /// Attach the integrity hash, replacing any previous one.
    pub fn sign(mut self) -> Result<Self> {
        self.hash = Some(compute_hash(&self)?);
        Ok(self)
    }

    /// Recompute the hash and compare it with the stored one.
    pub fn verify(&self) -> Result<()> {
        let stored = self.hash.as_ref().ok_or(SaladError::UnsignedReceipt)?;
        let computed = compute_hash(self)?;
        if *stored == computed {
            Ok(())
        } else {
            Err(SaladError::TamperedReceipt {
                stored: stored.clone(),
                computed,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn receipt() -> Receipt {
        Receipt::new(
            "Grekisk".to_string(),
            60,
            vec!["kyckling".to_string(), "fetaost".to_string()],
            90,
        )
    }

    #[test]
    fn test_canonical_json_layout() {
        let json = to_canonical_json(&receipt()).unwrap();
        let expected = "{\n    \"sallad\": \"Grekisk\",\n    \"pris\": 60,\n    \"extra_ingredienser\": [\n        \"kyckling\",\n        \"fetaost\"\n    ],\n    \"totalpris\": 90\n}";
        assert_eq!(json, expected);
    }

    #[test]
    fn test_hash_ignores_existing_hash_field() {
        let plain = receipt();
        let mut with_hash = receipt();
        with_hash.hash = Some("stale".to_string());

        assert_eq!(compute_hash(&plain).unwrap(), compute_hash(&with_hash).unwrap());
    }

    #[test]
    fn test_sign_then_verify() {
        let signed = receipt().sign().unwrap();
        assert_eq!(signed.hash.as_ref().unwrap().len(), 64);
        signed.verify().unwrap();
    }

    #[test]
    fn test_tampered_total_fails_verification() {
        let mut signed = receipt().sign().unwrap();
        signed.total = 10;

        assert!(matches!(signed.verify(), Err(SaladError::TamperedReceipt { .. })));
    }

    #[test]
    fn test_injected_field_is_rejected() {
        let signed = receipt().sign().unwrap();
        let mut value = serde_json::to_value(&signed).unwrap();
        let fields = value.as_object_mut().unwrap();
        fields.insert("rabatt".to_string(), serde_json::json!(60));
        fields.insert("totalpris_efter_rabatt".to_string(), serde_json::json!(0));

        assert!(serde_json::from_value::<Receipt>(value).is_err());
    }

    #[test]
    fn test_uppercase_hash_fails_verification() {
        let mut signed = receipt().sign().unwrap();
        signed.hash = signed.hash.map(|h| h.to_uppercase());

        assert!(matches!(signed.verify(), Err(SaladError::TamperedReceipt { .. })));
    }

    #[test]
    fn test_hash_of_non_ascii_receipt_is_stable() {
        let receipt = Receipt::new(
            "Räksallad".to_string(),
            85,
            vec!["ägg".to_string(), "räkor".to_string()],
            113,
        );

        assert_eq!(
            compute_hash(&receipt).unwrap(),
            "f6eee25472ba45dc32f1eb150dd9b2d87a75456e1e96dc864d1bbf0f641702ff"
        );
    }

    #[test]
    fn test_unsigned_fails_verification() {
        assert!(matches!(receipt().verify(), Err(SaladError::UnsignedReceipt)));
    }
}
