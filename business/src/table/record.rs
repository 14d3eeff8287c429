use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use super::value::CellValue;

/// A row type the table can display.
///
/// `Field` names the columns a record exposes, usually a small `Copy` enum.
pub trait TableRecord {
    type Field: Copy + Eq + Hash + Debug;

    fn value(&self, field: Self::Field) -> CellValue;
}

/// A JSON object row for screens that do not declare a typed record.
///
/// Columns are keyed by property name; missing properties are empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsonRecord(pub serde_json::Map<String, serde_json::Value>);

impl JsonRecord {
    /// `None` unless `value` is an object.
    pub fn from_value(value: serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }
}

impl TableRecord for JsonRecord {
    type Field = &'static str;

    fn value(&self, field: Self::Field) -> CellValue {
        self.0.get(field).map(CellValue::from_json).unwrap_or_default()
    }
}
