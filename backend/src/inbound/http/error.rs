//! HTTP adapter mapping for domain errors.
//!
//! Keeps the domain error type HTTP-agnostic while letting Actix handlers
//! turn domain failures into consistent JSON envelopes and status codes.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use tracing::error;

use crate::domain::{Error, ErrorCode};

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthenticated => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::InternalFailure => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::{json, Value};

    #[rstest]
    #[case(Error::validation_failed(json!([])), StatusCode::BAD_REQUEST)]
    #[case(Error::unauthenticated("Authentication required"), StatusCode::UNAUTHORIZED)]
    #[case(Error::forbidden("Access denied. This recipe is private."), StatusCode::FORBIDDEN)]
    #[case(Error::not_found("Recipe not found"), StatusCode::NOT_FOUND)]
    #[case(
        Error::conflict("You have already reviewed this recipe"),
        StatusCode::CONFLICT
    )]
    #[case(
        Error::internal("Failed to create recipe"),
        StatusCode::INTERNAL_SERVER_ERROR
    )]
    fn maps_codes_to_statuses(#[case] error: Error, #[case] expected: StatusCode) {
        assert_eq!(error.status_code(), expected);
    }

    #[actix_web::test]
    async fn response_body_carries_the_envelope() {
        let response = Error::not_found("Recipe not found").error_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let bytes = actix_web::body::to_bytes(response.into_body())
            .await
            .expect("read body");
        let body: Value = serde_json::from_slice(&bytes).expect("json body");
        assert_eq!(body["error"], "Recipe not found");
        assert_eq!(body["code"], "not_found");
    }
}
