//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod account_provisioning;
mod credential_source;
mod document_materializer;
mod identity_directory;

#[cfg(test)]
pub use account_provisioning::MockAccountProvisioning;
pub use account_provisioning::{AccountProvisioning, FixtureAccountProvisioning};
#[cfg(test)]
pub use credential_source::MockCredentialSource;
pub use credential_source::{CredentialSource, FixtureCredentialSource};
#[cfg(test)]
pub use document_materializer::MockDocumentMaterializer;
pub use document_materializer::{
    DocumentMaterializer, InMemoryDocumentMaterializer, MaterializeError, MaterializedDocument,
};
#[cfg(test)]
pub use identity_directory::{MockDirectoryConnector, MockIdentityDirectory};
pub use identity_directory::{
    DirectoryConnector, DirectoryError, DirectoryUser, FixtureDirectoryConnector,
    FixtureIdentityDirectory, IdentityDirectory,
};
