//! Form handlers for the single-page provisioning tool.
//!
//! ```text
//! GET  /             empty form
//! POST /             username=alice
//! POST /credentials  username=alice&password=...&arn=...&console_url=...
//! ```
//!
//! The provisioning result is rendered straight into the response; the
//! download form echoes the account fields back so no per-session state is
//! kept on the server.

use actix_web::http::StatusCode;
use actix_web::http::header::{
    CACHE_CONTROL, ContentDisposition, ContentType, DispositionParam, DispositionType,
};
use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::domain::ports::MaterializedDocument;
use crate::domain::{
    CredentialsDocument, Error, ProvisionedAccount, SignInUrl, Username, UsernameValidationError,
};
use crate::inbound::http::error::status_for;
use crate::inbound::http::page::{PageOutcome, render_page};
use crate::inbound::http::state::HttpState;

/// Body of `POST /`.
#[derive(Debug, Deserialize)]
pub struct ProvisionForm {
    #[serde(default)]
    pub username: String,
}

/// Body of `POST /credentials`: the account shown on the result page.
#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    pub username: String,
    pub password: String,
    pub arn: String,
    pub console_url: String,
    #[serde(default)]
    pub signin_url: Option<String>,
}

impl TryFrom<CredentialsForm> for ProvisionedAccount {
    type Error = UsernameValidationError;

    fn try_from(form: CredentialsForm) -> Result<Self, Self::Error> {
        let signin_url = form
            .signin_url
            .filter(|raw| !raw.trim().is_empty())
            .and_then(|raw| SignInUrl::parse(&raw).ok());
        Ok(Self {
            username: Username::new(&form.username)?,
            password: form.password,
            arn: form.arn,
            console_url: form.console_url,
            signin_url,
        })
    }
}

fn page(status: StatusCode, outcome: &PageOutcome) -> HttpResponse {
    HttpResponse::build(status)
        .content_type(ContentType::html())
        .insert_header((CACHE_CONTROL, "no-store"))
        .body(render_page(outcome))
}

/// Show the empty form.
#[get("/")]
pub async fn show_form() -> HttpResponse {
    page(StatusCode::OK, &PageOutcome::Empty)
}

/// Provision an account for the submitted username and render the outcome.
#[post("/")]
pub async fn submit_form(
    state: web::Data<HttpState>,
    form: web::Form<ProvisionForm>,
) -> HttpResponse {
    let username = match Username::new(&form.username) {
        Ok(username) => username,
        Err(err) => {
            info!(error = %err, "rejected form submission");
            return page(StatusCode::BAD_REQUEST, &PageOutcome::Invalid(err.to_string()));
        }
    };

    match state.provisioning.provision(&username).await {
        Ok(account) => page(StatusCode::OK, &PageOutcome::Created(account)),
        Err(err) => {
            let message = err.message().to_owned();
            let status = status_for(Error::from(err).code());
            page(status, &PageOutcome::Failed(message))
        }
    }
}

/// Stage the credentials handout and return it as a download.
#[post("/credentials")]
pub async fn download_credentials(
    state: web::Data<HttpState>,
    form: web::Form<CredentialsForm>,
) -> HttpResponse {
    let account = match ProvisionedAccount::try_from(form.into_inner()) {
        Ok(account) => account,
        Err(err) => {
            return page(StatusCode::BAD_REQUEST, &PageOutcome::Invalid(err.to_string()));
        }
    };

    let document = CredentialsDocument::render(&account);
    let materializer = state.materializer.clone();
    let staged = web::block(move || materializer.materialize(&document)).await;

    match staged {
        Ok(Ok(MaterializedDocument { file_name, bytes })) => {
            info!(username = %account.username, "credentials handout downloaded");
            HttpResponse::Ok()
                .content_type(ContentType::plaintext())
                .insert_header((CACHE_CONTROL, "no-store"))
                .insert_header(ContentDisposition {
                    disposition: DispositionType::Attachment,
                    parameters: vec![DispositionParam::Filename(file_name)],
                })
                .body(bytes)
        }
        Ok(Err(err)) => {
            warn!(username = %account.username, error = %err, "credentials handout could not be staged");
            page(
                StatusCode::INTERNAL_SERVER_ERROR,
                &PageOutcome::DownloadFailed {
                    account,
                    error: err.to_string(),
                },
            )
        }
        Err(err) => {
            error!(error = %err, "credentials staging task did not complete");
            page(
                StatusCode::INTERNAL_SERVER_ERROR,
                &PageOutcome::DownloadFailed {
                    account,
                    error: err.to_string(),
                },
            )
        }
    }
}

#[cfg(test)]
#[path = "form_tests.rs"]
mod tests;
