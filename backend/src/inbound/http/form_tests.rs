//! Tests for the provisioning form handlers.

use std::sync::Arc;

use super::*;
use crate::domain::ports::{
    FixtureAccountProvisioning, InMemoryDocumentMaterializer, MaterializeError,
    MockAccountProvisioning, MockDocumentMaterializer,
};
use crate::domain::{ProvisionError, ProvisionErrorKind};
use actix_web::http::header::CONTENT_DISPOSITION;
use actix_web::{App, test};
use rstest::rstest;

async fn call(state: HttpState, req: test::TestRequest) -> (StatusCode, String, Option<String>) {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .service(show_form)
            .service(submit_form)
            .service(download_credentials),
    )
    .await;
    let res = test::call_service(&app, req.to_request()).await;
    let status = res.status();
    let disposition = res
        .headers()
        .get(CONTENT_DISPOSITION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let body = test::read_body(res).await;
    let body = String::from_utf8(body.to_vec()).expect("utf8 body");
    (status, body, disposition)
}

fn state_with(provisioning: MockAccountProvisioning) -> HttpState {
    HttpState::new(Arc::new(provisioning), Arc::new(InMemoryDocumentMaterializer))
}

fn credentials_form() -> [(&'static str, &'static str); 5] {
    [
        ("username", "alice"),
        ("password", "alice@encode2025"),
        ("arn", "arn:aws:iam::123456789012:user/alice"),
        ("console_url", "https://console.aws.amazon.com/"),
        ("signin_url", "https://acme.signin.aws.amazon.com/console"),
    ]
}

#[rstest]
#[actix_web::test]
async fn get_renders_empty_form() {
    let (status, body, _) = call(HttpState::fixture(), test::TestRequest::get().uri("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("AWS Workshop - IAM User Creator"));
    assert!(body.contains("Create IAM User"));
}

#[rstest]
#[case("")]
#[case("   ")]
#[actix_web::test]
async fn blank_username_is_rejected_without_provisioning(#[case] raw: &str) {
    let mut provisioning = MockAccountProvisioning::new();
    provisioning.expect_provision().never();

    let (status, body, _) = call(
        state_with(provisioning),
        test::TestRequest::post()
            .uri("/")
            .set_form([("username", raw)]),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Username cannot be empty!"));
}

#[rstest]
#[actix_web::test]
async fn submitted_username_is_trimmed_before_provisioning() {
    let mut provisioning = MockAccountProvisioning::new();
    provisioning
        .expect_provision()
        .withf(|username| username.as_ref() == "alice")
        .times(1)
        .returning(|_| Err(ProvisionError::credentials_not_found()));

    let (_, body, _) = call(
        state_with(provisioning),
        test::TestRequest::post()
            .uri("/")
            .set_form([("username", "  alice  ")]),
    )
    .await;

    assert!(body.contains("Error: AWS credentials not found."));
}

#[rstest]
#[actix_web::test]
async fn successful_submission_renders_details() {
    let (status, body, _) = call(
        HttpState::fixture(),
        test::TestRequest::post()
            .uri("/")
            .set_form([("username", "alice")]),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("User &#39;alice&#39; created!"));
    assert!(body.contains("<li>Password: alice@encode2025</li>"));
    assert!(body.contains("Download Credentials"));
}

#[rstest]
#[case(ProvisionErrorKind::AlreadyExists, StatusCode::CONFLICT)]
#[case(ProvisionErrorKind::GroupNotFound, StatusCode::NOT_FOUND)]
#[case(ProvisionErrorKind::RateLimited, StatusCode::TOO_MANY_REQUESTS)]
#[actix_web::test]
async fn provisioning_failures_render_error_message(
    #[case] kind: ProvisionErrorKind,
    #[case] expected: StatusCode,
) {
    let mut provisioning = MockAccountProvisioning::new();
    provisioning
        .expect_provision()
        .times(1)
        .returning(move |_| Err(ProvisionError::new(kind, "upstream refused the call")));

    let (status, body, _) = call(
        state_with(provisioning),
        test::TestRequest::post()
            .uri("/")
            .set_form([("username", "alice")]),
    )
    .await;

    assert_eq!(status, expected);
    assert!(body.contains("Error: upstream refused the call"));
    assert!(!body.contains("created!"));
}

#[rstest]
#[actix_web::test]
async fn credentials_download_is_an_attachment() {
    let state = HttpState::new(
        Arc::new(FixtureAccountProvisioning),
        Arc::new(InMemoryDocumentMaterializer),
    );
    let (status, body, disposition) = call(
        state,
        test::TestRequest::post()
            .uri("/credentials")
            .set_form(credentials_form()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        disposition.as_deref(),
        Some("attachment; filename=\"alice_credentials.txt\"")
    );
    assert!(body.starts_with("AWS WORKSHOP CREDENTIALS\n"));
    assert!(body.contains("Sign-in Link: https://acme.signin.aws.amazon.com/console\n"));
}

#[rstest]
#[actix_web::test]
async fn staging_failure_falls_back_to_inline_text() {
    let mut materializer = MockDocumentMaterializer::new();
    materializer
        .expect_materialize()
        .times(1)
        .returning(|_| Err(MaterializeError::io("No space left on device")));
    let state = HttpState::new(Arc::new(FixtureAccountProvisioning), Arc::new(materializer));

    let (status, body, disposition) = call(
        state,
        test::TestRequest::post()
            .uri("/credentials")
            .set_form(credentials_form()),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(disposition.is_none());
    assert!(body.contains("Error creating temporary file: No space left on device"));
    assert!(body.contains("Password: alice@encode2025"));
}
