use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::tx_category::TxCategory;

// Upstream records are passed through untouched apart from the injected `type` tag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxRecord(Map<String, Value>);

impl TxRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn hash(&self) -> Option<&str> {
        self.0.get("hash").and_then(Value::as_str)
    }

    pub fn block_number(&self) -> Option<u64> {
        match self.0.get("blockNumber")? {
            Value::String(s) => s.parse().ok(),
            Value::Number(n) => n.as_u64(),
            _ => None,
        }
    }

    pub fn category(&self) -> Option<&str> {
        self.0.get("type").and_then(Value::as_str)
    }

    pub fn tagged(mut self, category: TxCategory) -> Self {
        self.0
            .insert("type".to_string(), Value::String(category.name().to_string()));
        self
    }
}
