//! Temporary-directory materializer for credentials handouts.
//!
//! Each call creates a fresh directory, writes the handout, reads it back and
//! removes the directory before returning. Nothing survives the call.

use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};
use tempfile::TempDir;
use tracing::{debug, warn};

use crate::domain::CredentialsDocument;
use crate::domain::ports::{DocumentMaterializer, MaterializeError, MaterializedDocument};

const SCRATCH_PREFIX: &str = "workshop-iam-";

/// Materializer staging handouts in a scoped temporary directory.
#[derive(Debug, Clone, Default)]
pub struct TempDirMaterializer {
    root: Option<PathBuf>,
}

impl TempDirMaterializer {
    /// Stage files under the operating system's temporary directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage files under `root` instead.
    pub fn in_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    /// Configured scratch root, if any.
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    fn create_scratch(&self) -> Result<TempDir, MaterializeError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(SCRATCH_PREFIX);
        let created = match &self.root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        };
        created.map_err(|err| MaterializeError::scratch(err.to_string()))
    }
}

fn write_and_read_back(scratch: &Path, document: &CredentialsDocument) -> std::io::Result<Vec<u8>> {
    let dir = Dir::open_ambient_dir(scratch, ambient_authority())?;
    dir.write(document.file_name(), document.contents())?;
    dir.read(document.file_name())
}

impl DocumentMaterializer for TempDirMaterializer {
    fn materialize(
        &self,
        document: &CredentialsDocument,
    ) -> Result<MaterializedDocument, MaterializeError> {
        let scratch = self.create_scratch()?;
        debug!(path = %scratch.path().display(), "staging credentials handout");

        // On error the TempDir guard removes the directory when dropped.
        let bytes = write_and_read_back(scratch.path(), document)
            .map_err(|err| MaterializeError::io(err.to_string()))?;

        if let Err(err) = scratch.close() {
            warn!(error = %err, "failed to remove credentials scratch directory");
        }

        Ok(MaterializedDocument {
            file_name: document.file_name().to_owned(),
            bytes,
        })
    }
}
