//! OpenAPI documentation for the JSON surface.
//!
//! Registers the account creation endpoint, the health probes and the schema
//! wrappers from [`crate::inbound::http::schemas`]. The HTML form is not part
//! of the document. Swagger UI serves it in debug builds and
//! `cargo run --bin openapi-dump` prints it.

use crate::inbound::http::accounts::CreateAccountRequest;
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, ProvisionedAccountSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Workshop IAM provisioner API",
        description = "Creates console-enabled IAM users for workshop participants."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::accounts::create_account,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CreateAccountRequest,
        ProvisionedAccountSchema,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "accounts", description = "Workshop account provisioning"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
