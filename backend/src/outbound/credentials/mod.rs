//! Credential resolution adapters.
//!
//! [`LayeredCredentialSource`] implements the [`CredentialSource`] port by
//! consulting the secrets file first and the process environment second.
//! Both are re-read on every call.

mod environment;
mod secrets_file;

pub use environment::{
    ACCESS_KEY_ID_ENV, EnvironmentCredentials, REGION_ENV, SECRET_ACCESS_KEY_ENV,
};
pub use secrets_file::{DEFAULT_SECRETS_PATH, SecretsFileCredentials};

use mockable::{DefaultEnv, Env};
use tracing::debug;

use crate::domain::CredentialBundle;
use crate::domain::ports::CredentialSource;

/// Secrets file, then environment.
#[derive(Debug, Clone)]
pub struct LayeredCredentialSource<E = DefaultEnv> {
    secrets: SecretsFileCredentials,
    environment: EnvironmentCredentials<E>,
}

impl LayeredCredentialSource<DefaultEnv> {
    /// Use `secrets` and the real process environment.
    pub fn with_process_env(secrets: SecretsFileCredentials) -> Self {
        Self::new(secrets, DefaultEnv::new())
    }
}

impl<E: Env> LayeredCredentialSource<E> {
    /// Combine a secrets file with an environment reader.
    pub fn new(secrets: SecretsFileCredentials, env: E) -> Self {
        Self {
            secrets,
            environment: EnvironmentCredentials::new(env),
        }
    }
}

impl<E> CredentialSource for LayeredCredentialSource<E>
where
    E: Env + Send + Sync,
{
    fn resolve(&self) -> Option<CredentialBundle> {
        let bundle = self.secrets.load().or_else(|| self.environment.load());
        if let Some(bundle) = &bundle {
            debug!(
                origin = %bundle.origin(),
                region = bundle.region(),
                "resolved AWS credentials",
            );
        }
        bundle
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use std::collections::HashMap;

    use super::*;
    use crate::domain::CredentialOrigin;
    use cap_std::{ambient_authority, fs::Dir};
    use mockable::MockEnv;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn scratch() -> TempDir {
        TempDir::new().expect("tempdir")
    }

    fn env_with_keys() -> MockEnv {
        let vars: HashMap<&'static str, &'static str> = [
            (ACCESS_KEY_ID_ENV, "AKIAENV"),
            (SECRET_ACCESS_KEY_ENV, "env-secret"),
        ]
        .into_iter()
        .collect();
        let mut env = MockEnv::new();
        env.expect_string()
            .times(0..)
            .returning(move |key| vars.get(key).map(|value| (*value).to_owned()));
        env
    }

    fn empty_env() -> MockEnv {
        let mut env = MockEnv::new();
        env.expect_string().times(0..).returning(|_| None);
        env
    }

    fn write_secrets(scratch: &TempDir, contents: &str) -> SecretsFileCredentials {
        let dir = Dir::open_ambient_dir(scratch.path(), ambient_authority()).expect("open dir");
        dir.write("secrets.toml", contents).expect("write secrets");
        SecretsFileCredentials::new(scratch.path().join("secrets.toml"))
    }

    #[rstest]
    fn secrets_file_wins_over_environment(scratch: TempDir) {
        let secrets = write_secrets(
            &scratch,
            "[aws]\naws_access_key_id = \"AKIAFILE\"\naws_secret_access_key = \"s\"\n",
        );
        let source = LayeredCredentialSource::new(secrets, env_with_keys());

        let bundle = source.resolve().expect("bundle present");
        assert_eq!(bundle.access_key_id(), "AKIAFILE");
        assert_eq!(bundle.region(), "ap-south-1");
        assert_eq!(bundle.origin(), CredentialOrigin::SecretsFile);
    }

    #[rstest]
    fn incomplete_secrets_fall_through_to_environment(scratch: TempDir) {
        let secrets = write_secrets(&scratch, "[aws]\naws_access_key_id = \"AKIAFILE\"\n");
        let source = LayeredCredentialSource::new(secrets, env_with_keys());

        let bundle = source.resolve().expect("bundle present");
        assert_eq!(bundle.access_key_id(), "AKIAENV");
        assert_eq!(bundle.region(), "us-east-1");
        assert_eq!(bundle.origin(), CredentialOrigin::Environment);
    }

    #[rstest]
    fn nothing_configured_resolves_to_none(scratch: TempDir) {
        let secrets = SecretsFileCredentials::new(scratch.path().join("missing.toml"));
        let source = LayeredCredentialSource::new(secrets, empty_env());
        assert!(source.resolve().is_none());
    }

    #[rstest]
    fn secrets_are_reread_on_every_call(scratch: TempDir) {
        let secrets = SecretsFileCredentials::new(scratch.path().join("secrets.toml"));
        let source = LayeredCredentialSource::new(secrets, empty_env());
        assert!(source.resolve().is_none());

        write_secrets(
            &scratch,
            "[aws]\naws_access_key_id = \"AKIALATE\"\naws_secret_access_key = \"s\"\n",
        );
        let bundle = source.resolve().expect("bundle after edit");
        assert_eq!(bundle.access_key_id(), "AKIALATE");
    }

    #[rstest]
    fn process_environment_is_read_when_no_file_exists(scratch: TempDir) {
        let _guard = env_lock::lock_env([
            (ACCESS_KEY_ID_ENV, Some("AKIAPROCESS".to_owned())),
            (SECRET_ACCESS_KEY_ENV, Some("process-secret".to_owned())),
            (REGION_ENV, Some("eu-west-1".to_owned())),
        ]);
        let secrets = SecretsFileCredentials::new(scratch.path().join("missing.toml"));
        let source = LayeredCredentialSource::with_process_env(secrets);

        let bundle = source.resolve().expect("bundle from process env");
        assert_eq!(bundle.access_key_id(), "AKIAPROCESS");
        assert_eq!(bundle.region(), "eu-west-1");
        assert_eq!(bundle.origin(), CredentialOrigin::Environment);
    }
}
