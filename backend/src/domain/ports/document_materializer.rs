//! Driven port that turns a rendered handout into downloadable bytes.
//!
//! Adapters may stage the file somewhere (a scratch directory, for example)
//! and must leave nothing behind once the bytes are returned.

use crate::domain::CredentialsDocument;

use super::define_port_error;

define_port_error! {
    /// Errors raised while staging a credentials handout.
    pub enum MaterializeError {
        /// The scratch area could not be created.
        Scratch { message: String } => "{message}",
        /// Writing or reading back the staged file failed.
        Io { message: String } => "{message}",
    }
}

/// Downloadable handout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializedDocument {
    /// Name offered to the browser.
    pub file_name: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

/// Produces the downloadable form of a [`CredentialsDocument`].
#[cfg_attr(test, mockall::automock)]
pub trait DocumentMaterializer: Send + Sync {
    /// Stage `document` and return its bytes.
    fn materialize(
        &self,
        document: &CredentialsDocument,
    ) -> Result<MaterializedDocument, MaterializeError>;
}

/// Materializer that returns the rendered text without touching storage.
#[derive(Debug, Default, Clone, Copy)]
pub struct InMemoryDocumentMaterializer;

impl DocumentMaterializer for InMemoryDocumentMaterializer {
    fn materialize(
        &self,
        document: &CredentialsDocument,
    ) -> Result<MaterializedDocument, MaterializeError> {
        Ok(MaterializedDocument {
            file_name: document.file_name().to_owned(),
            bytes: document.contents().as_bytes().to_vec(),
        })
    }
}
