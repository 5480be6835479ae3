//! Shared HTTP adapter state.
//!
//! Handlers accept this via `actix_web::web::Data` and depend only on domain
//! ports, so tests can swap in fixtures or mocks without AWS or disk access.

use std::sync::Arc;

use crate::domain::ports::{
    AccountProvisioning, DocumentMaterializer, FixtureAccountProvisioning,
    InMemoryDocumentMaterializer,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub provisioning: Arc<dyn AccountProvisioning>,
    pub materializer: Arc<dyn DocumentMaterializer>,
}

impl HttpState {
    /// Bundle the provisioning use-case with the download materializer.
    pub fn new(
        provisioning: Arc<dyn AccountProvisioning>,
        materializer: Arc<dyn DocumentMaterializer>,
    ) -> Self {
        Self {
            provisioning,
            materializer,
        }
    }

    /// State backed entirely by in-process fixtures.
    pub fn fixture() -> Self {
        Self::new(
            Arc::new(FixtureAccountProvisioning),
            Arc::new(InMemoryDocumentMaterializer),
        )
    }
}
