//! Catalogue and search data models.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::classification::Classification;
use crate::filter::FieldJoin;

/// One catalogue row, carrying whatever columns the store schema defines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogueRow {
    pub columns: Map<String, Value>,
}

impl CatalogueRow {
    pub fn new(columns: Map<String, Value>) -> Self {
        Self { columns }
    }

    /// Raw column value.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns.get(column)
    }

    /// Scalar text column value; `None` when absent, null, or not a string.
    pub fn text(&self, column: &str) -> Option<&str> {
        self.columns.get(column).and_then(Value::as_str)
    }

    /// Tag-list column elements; empty when absent or null.
    pub fn tags(&self, column: &str) -> Vec<&str> {
        match self.columns.get(column) {
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }
}

impl TryFrom<Value> for CatalogueRow {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Object(columns) => Ok(Self { columns }),
            other => Err(crate::Error::StoreQuery(format!(
                "Expected catalogue row object, got {}",
                other
            ))),
        }
    }
}

/// Inbound search request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Free-text query; missing is treated as empty.
    #[serde(default)]
    pub query: String,
    /// Per-request override of the configured cross-field join.
    #[serde(default, rename = "match", skip_serializing_if = "Option::is_none")]
    pub field_join: Option<FieldJoin>,
}

/// Outbound search result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Matching catalogue rows, in store order.
    pub tools: Vec<CatalogueRow>,
    /// Classification the filter was compiled from.
    pub keywords: Classification,
}
