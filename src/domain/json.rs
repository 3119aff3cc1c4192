//! JSON-backed records for cleaning data exports

use super::errors::CleanerError;
use super::record::Record;
use super::result::Result;
use super::value::Value;
use serde_json::Map;

/// A JSON object paired with the type name used to pick its format
///
/// Top-level scalar members are addressable attributes. Nested arrays and
/// objects are left untouched and read as absent.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonRecord {
    type_name: String,
    fields: Map<String, serde_json::Value>,
}

impl JsonRecord {
    pub fn new(type_name: impl Into<String>, fields: Map<String, serde_json::Value>) -> Self {
        Self {
            type_name: type_name.into(),
            fields,
        }
    }

    /// Wraps a JSON document, which must be an object
    pub fn from_json(type_name: impl Into<String>, document: serde_json::Value) -> Result<Self> {
        match document {
            serde_json::Value::Object(fields) => Ok(Self::new(type_name, fields)),
            other => Err(CleanerError::TypeMismatch {
                expected: "a JSON object",
                found: other.to_string(),
            }),
        }
    }

    /// Parses a JSON string into a record
    pub fn parse(type_name: impl Into<String>, json: &str) -> Result<Self> {
        let document: serde_json::Value = serde_json::from_str(json)?;
        Self::from_json(type_name, document)
    }

    pub fn fields(&self) -> &Map<String, serde_json::Value> {
        &self.fields
    }

    pub fn into_json(self) -> serde_json::Value {
        serde_json::Value::Object(self.fields)
    }
}

impl Record for JsonRecord {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn get(&self, attribute: &str) -> Option<Value> {
        self.fields
            .get(attribute)
            .and_then(|json| Value::from_json(json).ok())
    }

    fn set(&mut self, attribute: &str, value: Value) -> Result<()> {
        self.fields.insert(attribute.to_string(), value.to_json());
        Ok(())
    }
}
