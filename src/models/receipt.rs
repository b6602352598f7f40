use serde::{Deserialize, Serialize};

/// The persisted summary of a confirmed order.
///
/// Field order is the canonical serialization order; `hash` is only present
/// on signed receipts and is never part of the hashed content. Unknown
/// fields are rejected so nothing can be added to a signed receipt unnoticed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Receipt {
    #[serde(rename = "sallad")]
    pub salad: String,

    #[serde(rename = "pris")]
    pub salad_price: u32,

    #[serde(rename = "extra_ingredienser")]
    pub extras: Vec<String>,

    #[serde(rename = "totalpris")]
    pub total: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

impl Receipt {
    pub fn new(salad: String, salad_price: u32, extras: Vec<String>, total: u32) -> Self {
        Self {
            salad,
            salad_price,
            extras,
            total,
            hash: None,
        }
    }

    pub fn is_signed(&self) -> bool {
        self.hash.is_some()
    }

    /// Copy of the receipt with the hash field removed.
    pub fn unsigned(&self) -> Receipt {
        Receipt {
            hash: None,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_swedish_field_names_without_hash() {
        let receipt = Receipt::new("Greek".to_string(), 60, vec!["feta".to_string()], 70);
        let json = serde_json::to_string(&receipt).unwrap();
        assert_eq!(
            json,
            r#"{"sallad":"Greek","pris":60,"extra_ingredienser":["feta"],"totalpris":70}"#
        );
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let json = r#"{"sallad":"Greek","pris":60,"extra_ingredienser":[],"totalpris":60,"rabatt":60}"#;
        assert!(serde_json::from_str::<Receipt>(json).is_err());
    }

    #[test]
    fn test_unsigned_strips_hash() {
        let mut receipt = Receipt::new("Greek".to_string(), 60, vec![], 60);
        receipt.hash = Some("abc".to_string());
        assert!(receipt.is_signed());
        assert!(!receipt.unsigned().is_signed());
    }
}
