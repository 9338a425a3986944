//! Per-field validation error collection.
//!
//! Entities accumulate field failures here so a single 400 response carries
//! every problem as itemised `{field, message}` details rather than failing
//! on the first invalid field.

use serde_json::{json, Value};

use crate::domain::{ApiResult, Error};

/// Accumulator for `{field, message}` validation failures.
#[derive(Debug, Default)]
pub struct FieldErrors(Vec<Value>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure for a wire-format field name.
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(json!({ "field": field, "message": message.into() }));
    }

    /// Record a failure for an indexed element of a sequence field.
    pub fn push_indexed(&mut self, field: &str, index: usize, message: impl Into<String>) {
        self.0.push(json!({
            "field": field,
            "index": index,
            "message": message.into(),
        }));
    }

    /// Empty means valid; otherwise a `ValidationFailed` error with the
    /// collected details.
    pub fn into_result(self) -> ApiResult<()> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(Error::validation_failed(Value::Array(self.0)))
        }
    }
}
