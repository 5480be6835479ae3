//! JSON API for provisioning workshop accounts.
//!
//! ```text
//! POST /api/v1/accounts {"username":"alice"}
//! ```

use actix_web::http::header::CACHE_CONTROL;
use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, Username};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::username_validation_error;
use crate::inbound::http::schemas::{ErrorSchema, ProvisionedAccountSchema};
use crate::inbound::http::state::HttpState;

/// Request body for `POST /api/v1/accounts`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    /// IAM user name; surrounding whitespace is ignored.
    #[schema(example = "alice")]
    pub username: String,
}

/// Provision a workshop account.
///
/// The response contains the console password, so it is never cached.
#[utoipa::path(
    post,
    path = "/api/v1/accounts",
    request_body = CreateAccountRequest,
    responses(
        (status = 201, description = "Account provisioned", body = ProvisionedAccountSchema),
        (status = 400, description = "Invalid username", body = ErrorSchema),
        (status = 401, description = "AWS rejected the configured credentials", body = ErrorSchema),
        (status = 404, description = "Workshop group does not exist", body = ErrorSchema),
        (status = 409, description = "User already exists", body = ErrorSchema),
        (status = 429, description = "AWS throttled the request", body = ErrorSchema),
        (status = 502, description = "AWS call failed", body = ErrorSchema),
        (status = 503, description = "No AWS credentials configured", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "createAccount"
)]
#[post("/accounts")]
pub async fn create_account(
    state: web::Data<HttpState>,
    payload: web::Json<CreateAccountRequest>,
) -> ApiResult<HttpResponse> {
    let username =
        Username::new(&payload.username).map_err(|err| username_validation_error(&err))?;
    let account = state
        .provisioning
        .provision(&username)
        .await
        .map_err(Error::from)?;
    Ok(HttpResponse::Created()
        .insert_header((CACHE_CONTROL, "no-store"))
        .json(account))
}
