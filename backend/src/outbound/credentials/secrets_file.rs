//! Secrets-file credential lookup.
//!
//! Reads the `[aws]` table of a TOML secrets file:
//!
//! ```toml
//! [aws]
//! aws_access_key_id = "AKIA..."
//! aws_secret_access_key = "..."
//! region_name = "eu-west-1" # optional, defaults to ap-south-1
//! ```

use std::io;
use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};
use serde::Deserialize;
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::domain::{CredentialBundle, CredentialOrigin, SECRETS_DEFAULT_REGION};

/// Default secrets location, relative to the working directory.
pub const DEFAULT_SECRETS_PATH: &str = ".streamlit/secrets.toml";

#[derive(Debug, Default, Deserialize)]
struct SecretsDocument {
    #[serde(default)]
    aws: Option<AwsSecrets>,
}

#[derive(Default, Deserialize)]
struct AwsSecrets {
    #[serde(default)]
    aws_access_key_id: Option<String>,
    #[serde(default)]
    aws_secret_access_key: Option<Zeroizing<String>>,
    #[serde(default)]
    region_name: Option<String>,
}

impl std::fmt::Debug for AwsSecrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsSecrets")
            .field("aws_access_key_id", &self.aws_access_key_id)
            .field("region_name", &self.region_name)
            .finish_non_exhaustive()
    }
}

/// Credentials stored in a TOML secrets file.
#[derive(Debug, Clone)]
pub struct SecretsFileCredentials {
    path: PathBuf,
}

impl Default for SecretsFileCredentials {
    fn default() -> Self {
        Self::new(DEFAULT_SECRETS_PATH)
    }
}

impl SecretsFileCredentials {
    /// Read secrets from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the secrets file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load credentials, or `None` when the file is missing, unusable or
    /// lacks either key.
    pub fn load(&self) -> Option<CredentialBundle> {
        let contents = match read_secrets(&self.path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "secrets file not present");
                return None;
            }
            Err(error) => {
                warn!(path = %self.path.display(), %error, "secrets file unreadable; ignoring");
                return None;
            }
        };

        match parse_secrets(&contents) {
            Ok(bundle) => bundle,
            Err(error) => {
                warn!(
                    path = %self.path.display(),
                    error = %error.message(),
                    "secrets file is not valid TOML; ignoring",
                );
                None
            }
        }
    }
}

fn read_secrets(path: &Path) -> io::Result<String> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "secrets path has no file name")
    })?;
    let directory = Dir::open_ambient_dir(parent, ambient_authority())?;
    directory.read_to_string(file_name)
}

/// Extract a bundle from secrets-file text.
///
/// Blank values count as missing; a missing `region_name` falls back to
/// [`SECRETS_DEFAULT_REGION`].
pub(crate) fn parse_secrets(contents: &str) -> Result<Option<CredentialBundle>, toml::de::Error> {
    let document: SecretsDocument = toml::from_str(contents)?;
    let Some(aws) = document.aws else {
        return Ok(None);
    };
    let access_key_id = aws
        .aws_access_key_id
        .filter(|value| !value.trim().is_empty());
    let secret_access_key = aws
        .aws_secret_access_key
        .filter(|value| !value.trim().is_empty());
    let (Some(access_key_id), Some(secret_access_key)) = (access_key_id, secret_access_key) else {
        return Ok(None);
    };
    let region = aws
        .region_name
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| SECRETS_DEFAULT_REGION.to_owned());

    Ok(Some(CredentialBundle::new(
        access_key_id,
        secret_access_key.as_str(),
        region,
        CredentialOrigin::SecretsFile,
    )))
}
