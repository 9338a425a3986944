//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;
use uuid::Uuid;

use crate::domain::Error;

/// Parse a path parameter as a UUID, reporting the offending field on
/// failure so clients see which segment was malformed.
pub(crate) fn parse_uuid(value: &str, field: &'static str) -> Result<Uuid, Error> {
    Uuid::parse_str(value).map_err(|_| {
        Error::validation_failed(json!([{
            "field": field,
            "message": format!("{field} must be a valid UUID"),
        }]))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;

    #[test]
    fn accepts_canonical_uuids() {
        let parsed = parse_uuid("3fa85f64-5717-4562-b3fc-2c963f66afa6", "id").expect("valid");
        assert_eq!(parsed.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    }

    #[test]
    fn rejects_malformed_input_with_field_details() {
        let error = parse_uuid("not-a-uuid", "recipeId").expect_err("invalid");
        assert_eq!(error.code(), ErrorCode::ValidationFailed);
        let details = error.details().expect("details present");
        assert_eq!(details[0]["field"], "recipeId");
    }
}
