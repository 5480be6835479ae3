//! Tests for HTTP error mapping.

use super::*;
use crate::domain::{ProvisionError, ProvisionErrorKind, Username};
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

const TRACE_ID: &str = "6f1c2d9e-3b1a-4c55-9a0e-2f7d8c1b4a60";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

async fn body_json(response: HttpResponse) -> Value {
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    serde_json::from_slice(&bytes).expect("error JSON deserialises")
}

#[rstest]
#[case(ProvisionErrorKind::CredentialsNotFound, StatusCode::SERVICE_UNAVAILABLE)]
#[case(ProvisionErrorKind::Unauthenticated, StatusCode::UNAUTHORIZED)]
#[case(ProvisionErrorKind::AlreadyExists, StatusCode::CONFLICT)]
#[case(ProvisionErrorKind::GroupNotFound, StatusCode::NOT_FOUND)]
#[case(ProvisionErrorKind::RateLimited, StatusCode::TOO_MANY_REQUESTS)]
#[case(ProvisionErrorKind::Other, StatusCode::BAD_GATEWAY)]
fn provisioning_failures_map_to_statuses(
    #[case] kind: ProvisionErrorKind,
    #[case] expected: StatusCode,
) {
    let error = Error::from(ProvisionError::new(kind, "upstream said no"));
    assert_eq!(ResponseError::status_code(&error), expected);
}

#[rstest]
#[actix_web::test]
async fn upstream_messages_are_passed_through(expected_trace_id: String) {
    let error = Error::from(ProvisionError::new(
        ProvisionErrorKind::AlreadyExists,
        "EntityAlreadyExists: User with name alice already exists.",
    ))
    .with_trace_id(expected_trace_id.clone());

    let response = ResponseError::error_response(&error);
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok()),
        Some(expected_trace_id.as_str())
    );

    let body = body_json(response).await;
    assert_eq!(body["code"], "conflict");
    assert_eq!(
        body["message"],
        "EntityAlreadyExists: User with name alice already exists."
    );
    assert_eq!(body["traceId"], expected_trace_id.as_str());
    assert_eq!(body["details"], json!({ "kind": "already_exists" }));
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted(expected_trace_id: String) {
    let error = Error::internal("scratch path /tmp/secret leaked")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({ "path": "/tmp/secret" }));

    let body = body_json(ResponseError::error_response(&error)).await;

    assert_eq!(body["code"], "internal_error");
    assert_eq!(body["message"], "Internal server error");
    assert_eq!(body["traceId"], expected_trace_id.as_str());
    assert!(body.get("details").is_none_or(Value::is_null));
}

#[rstest]
#[actix_web::test]
async fn missing_trace_id_omits_header() {
    let error = Error::invalid_request("bad");
    let response = ResponseError::error_response(&error);
    assert!(response.headers().get(TRACE_ID_HEADER).is_none());
}

#[rstest]
#[case(" ", "empty_username")]
#[case("alice smith", "invalid_username_characters")]
fn username_errors_name_the_field(#[case] raw: &str, #[case] code: &str) {
    let err = Username::new(raw).expect_err("invalid username");
    let error = username_validation_error(&err);
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        error.details(),
        Some(&json!({ "field": "username", "code": code }))
    );
}
