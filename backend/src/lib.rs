//! Workshop IAM provisioner library.
//!
//! `domain` holds the provisioning use-case and its ports, `inbound` the HTTP
//! adapter, `outbound` the AWS, credential and scratch-file adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
