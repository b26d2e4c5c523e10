//! Decoded id mapping handed to bid adapters

use serde::{Deserialize, Serialize};

use super::IdentityRecord;

/// Namespace the decoded ids are keyed under
pub const DECODE_NAMESPACE: &str = "sharedid";

/// Id aliases for bid requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedIdEids {
    /// Primary id, always present
    pub first: String,

    /// Secondary alias, present while the id is still unsynced
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub third: Option<String>,
}

/// `{"sharedid": {"first": ..., "third": ...}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedId {
    /// Ids under the [`DECODE_NAMESPACE`] key
    pub sharedid: SharedIdEids,
}

impl DecodedId {
    /// Build the mapping for a record
    pub fn from_record(record: &IdentityRecord) -> Self {
        let third = record.needs_sync().then(|| record.id().to_string());
        Self {
            sharedid: SharedIdEids {
                first: record.id().to_string(),
                third,
            },
        }
    }

    /// JSON value form of the mapping
    pub fn to_value(&self) -> serde_json::Value {
        let mut eids = serde_json::json!({ "first": self.sharedid.first });
        if let Some(third) = &self.sharedid.third {
            eids["third"] = serde_json::Value::String(third.clone());
        }
        serde_json::json!({ DECODE_NAMESPACE: eids })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_unsynced_record_aliases_third() {
        let record = IdentityRecord::local("abc123").unwrap();
        let decoded = DecodedId::from_record(&record);
        assert_eq!(
            decoded.to_value(),
            json!({"sharedid": {"first": "abc123", "third": "abc123"}})
        );
    }

    #[test]
    fn test_confirmed_record_only_first() {
        let record = IdentityRecord::confirmed("abc123").unwrap();
        let decoded = DecodedId::from_record(&record);
        assert_eq!(decoded.to_value(), json!({"sharedid": {"first": "abc123"}}));
        assert_eq!(
            serde_json::to_value(&decoded).unwrap(),
            decoded.to_value()
        );
    }
}
