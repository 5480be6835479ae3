//! Driven port for locating the AWS credentials used by a provisioning attempt.

use crate::domain::CredentialBundle;

/// Resolves the credential bundle for the next provisioning attempt.
///
/// Resolution happens per attempt, so editing the secrets file or the process
/// environment takes effect without a restart. `None` means no source yielded
/// a usable key pair.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialSource: Send + Sync {
    /// Find credentials, or `None` when nothing usable is configured.
    fn resolve(&self) -> Option<CredentialBundle>;
}

/// Source that always yields the same answer.
#[derive(Debug, Clone, Default)]
pub struct FixtureCredentialSource {
    bundle: Option<CredentialBundle>,
}

impl FixtureCredentialSource {
    /// Always resolve to `bundle`.
    pub fn with_bundle(bundle: CredentialBundle) -> Self {
        Self {
            bundle: Some(bundle),
        }
    }

    /// Never resolve anything.
    pub fn empty() -> Self {
        Self::default()
    }
}

impl CredentialSource for FixtureCredentialSource {
    fn resolve(&self) -> Option<CredentialBundle> {
        self.bundle.clone()
    }
}
