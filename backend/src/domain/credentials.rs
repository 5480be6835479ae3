//! AWS credential bundle resolved for a single provisioning attempt.

use std::fmt;

use zeroize::Zeroizing;

/// Region used when the secrets file omits `region_name`.
pub const SECRETS_DEFAULT_REGION: &str = "ap-south-1";
/// Region used when `AWS_REGION` is not set.
pub const ENVIRONMENT_DEFAULT_REGION: &str = "us-east-1";

/// Where a [`CredentialBundle`] was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialOrigin {
    /// The `[aws]` table of the secrets file.
    SecretsFile,
    /// `AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY` environment variables.
    Environment,
}

impl fmt::Display for CredentialOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SecretsFile => f.write_str("secrets_file"),
            Self::Environment => f.write_str("environment"),
        }
    }
}

/// Access key pair plus region.
///
/// The secret key is wiped from memory when the bundle is dropped and never
/// appears in `Debug` output.
///
/// # Examples
/// ```
/// use workshop_iam::domain::{CredentialBundle, CredentialOrigin};
///
/// let bundle = CredentialBundle::new(
///     "AKIAEXAMPLE",
///     "wJalrXUtnFEMI",
///     "eu-west-1",
///     CredentialOrigin::Environment,
/// );
/// assert_eq!(bundle.region(), "eu-west-1");
/// assert!(!format!("{bundle:?}").contains("wJalrXUtnFEMI"));
/// ```
#[derive(Clone)]
pub struct CredentialBundle {
    access_key_id: String,
    secret_access_key: Zeroizing<String>,
    region: String,
    origin: CredentialOrigin,
}

impl CredentialBundle {
    /// Assemble a bundle from its parts.
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        region: impl Into<String>,
        origin: CredentialOrigin,
    ) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: Zeroizing::new(secret_access_key.into()),
            region: region.into(),
            origin,
        }
    }

    /// Access key identifier.
    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    /// Secret access key.
    pub fn secret_access_key(&self) -> &str {
        self.secret_access_key.as_str()
    }

    /// Region the API clients are configured for.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Source the bundle was read from.
    pub fn origin(&self) -> CredentialOrigin {
        self.origin
    }
}

impl fmt::Debug for CredentialBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialBundle")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("region", &self.region)
            .field("origin", &self.origin)
            .finish()
    }
}
