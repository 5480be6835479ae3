//! Entry-point for the workshop IAM provisioner: loads settings, initialises
//! JSON logging and serves the form, the JSON API and health probes.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use server::{ProvisionerSettings, create_server};
use workshop_iam::inbound::http::health::HealthState;

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ProvisionerSettings::load()
        .map_err(|err| eyre!("failed to load provisioner settings: {err}"))?;
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, &settings).wrap_err("failed to start HTTP server")?;
    server.await.wrap_err("HTTP server terminated abnormally")
}
