//! Responses in the `{"data": ..., "errors": [...]}` shape.

use serde::Serialize;
use trellis_core::Value;

use crate::error::SessionError;

/// One reported error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseError {
    pub message: String,
}

/// The result of executing a request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    /// `{"<field>": value}` on success, null on failure.
    pub data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ResponseError>,
}

impl Response {
    /// A successful response for a root field.
    pub fn ok(field: &str, value: &Value) -> Self {
        let mut data = serde_json::Map::new();
        data.insert(field.to_string(), value.to_json());
        Self {
            data: Some(serde_json::Value::Object(data)),
            errors: Vec::new(),
        }
    }

    /// A failed response.
    pub fn failed(error: &SessionError) -> Self {
        Self {
            data: None,
            errors: vec![ResponseError {
                message: error.to_string(),
            }],
        }
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// The value returned for a root field.
    pub fn get(&self, field: &str) -> Option<&serde_json::Value> {
        self.data.as_ref().and_then(|data| data.get(field))
    }

    /// The response document.
    pub fn to_json(&self) -> serde_json::Value {
        let mut doc = serde_json::Map::new();
        doc.insert(
            "data".to_string(),
            self.data.clone().unwrap_or(serde_json::Value::Null),
        );
        if !self.errors.is_empty() {
            let errors = self
                .errors
                .iter()
                .map(|e| serde_json::json!({ "message": e.message }))
                .collect();
            doc.insert("errors".to_string(), serde_json::Value::Array(errors));
        }
        serde_json::Value::Object(doc)
    }
}
