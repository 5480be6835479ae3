//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ProvisionerSettings;

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use workshop_iam::Trace;
#[cfg(debug_assertions)]
use workshop_iam::doc::ApiDoc;
use workshop_iam::inbound::http::accounts::create_account;
use workshop_iam::inbound::http::form::{download_credentials, show_form, submit_form};
use workshop_iam::inbound::http::health::{HealthState, live, ready};
use workshop_iam::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api/v1").service(create_account);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(show_form)
        .service(submit_form)
        .service(download_credentials)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct the HTTP server from loaded settings.
///
/// The returned [`Server`] must be awaited to drive the listener. Readiness is
/// flipped once the socket is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when the bind address is invalid or binding
/// fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    settings: &ProvisionerSettings,
) -> std::io::Result<Server> {
    let bind_addr = settings.bind_addr()?;
    let http_state = web::Data::new(build_http_state(settings));
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || build_app(server_health_state.clone(), http_state.clone()))
        .bind(bind_addr)?
        .run();

    info!(
        %bind_addr,
        group = settings.group_name(),
        secrets_path = %settings.secrets_path().display(),
        "workshop provisioner listening"
    );
    health_state.mark_ready();
    Ok(server)
}
