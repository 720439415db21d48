use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::fields::{FIELD_NAME, FIELD_TOPIC};

/// One entity's attribute data, read from a record directory or a log line.
///
/// A record is a free-form mapping from string keys to JSON values. No schema
/// is enforced beyond whatever attribute a dimension reads; identity is
/// implicit in the storage location or log line order.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from a parsed JSON value.
    ///
    /// Returns `None` when the value is not a JSON object, so callers can
    /// apply the skip-on-malformed policy without a control-flow exception.
    pub fn from_object(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self { fields }),
            _ => None,
        }
    }

    /// Look up a top-level attribute.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Look up a top-level attribute as a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// Insert or replace a top-level attribute.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.fields.insert(key.into(), value);
    }

    /// Name-like attribute used for display ordering and rendering.
    ///
    /// Falls back from `name` to `topic` to the empty string.
    pub fn display_name(&self) -> &str {
        self.get_str(FIELD_NAME)
            .or_else(|| self.get_str(FIELD_TOPIC))
            .unwrap_or("")
    }

    /// Number of attributes on this record.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the record carries no attributes.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_object_rejects_non_objects() {
        assert!(Record::from_object(json!({"name": "Acme"})).is_some());
        assert!(Record::from_object(json!("Acme")).is_none());
        assert!(Record::from_object(json!(42)).is_none());
        assert!(Record::from_object(json!(["Acme"])).is_none());
    }

    #[test]
    fn display_name_falls_back_from_name_to_topic_to_empty() {
        let named = Record::from_object(json!({"name": "Acme", "topic": "robots"})).unwrap();
        assert_eq!(named.display_name(), "Acme");

        let topical = Record::from_object(json!({"topic": "robots"})).unwrap();
        assert_eq!(topical.display_name(), "robots");

        let blank = Record::new();
        assert_eq!(blank.display_name(), "");
    }

    #[test]
    fn insert_overwrites_existing_attributes() {
        let mut record = Record::from_object(json!({"tier": "key"})).unwrap();
        record.insert("tier", json!("strategic"));
        assert_eq!(record.get_str("tier"), Some("strategic"));
        assert_eq!(record.len(), 1);
    }
}
