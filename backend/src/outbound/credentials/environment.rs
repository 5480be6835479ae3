//! Environment-variable credential lookup.

use mockable::Env;

use crate::domain::{CredentialBundle, CredentialOrigin, ENVIRONMENT_DEFAULT_REGION};

/// Variable holding the access key id.
pub const ACCESS_KEY_ID_ENV: &str = "AWS_ACCESS_KEY_ID";
/// Variable holding the secret access key.
pub const SECRET_ACCESS_KEY_ENV: &str = "AWS_SECRET_ACCESS_KEY";
/// Variable holding the region.
pub const REGION_ENV: &str = "AWS_REGION";

/// Credentials taken from the standard AWS environment variables.
///
/// # Examples
/// ```
/// use mockable::DefaultEnv;
/// use workshop_iam::outbound::credentials::EnvironmentCredentials;
///
/// let source = EnvironmentCredentials::new(DefaultEnv::new());
/// let _maybe_bundle = source.load();
/// ```
#[derive(Debug, Clone)]
pub struct EnvironmentCredentials<E> {
    env: E,
}

impl<E: Env> EnvironmentCredentials<E> {
    /// Read variables through `env`.
    pub fn new(env: E) -> Self {
        Self { env }
    }

    fn non_empty(&self, name: &str) -> Option<String> {
        self.env
            .string(name)
            .filter(|value| !value.trim().is_empty())
    }

    /// Load credentials when both key variables are set and non-empty.
    pub fn load(&self) -> Option<CredentialBundle> {
        let access_key_id = self.non_empty(ACCESS_KEY_ID_ENV)?;
        let secret_access_key = self.non_empty(SECRET_ACCESS_KEY_ENV)?;
        let region = self
            .non_empty(REGION_ENV)
            .unwrap_or_else(|| ENVIRONMENT_DEFAULT_REGION.to_owned());
        Some(CredentialBundle::new(
            access_key_id,
            secret_access_key,
            region,
            CredentialOrigin::Environment,
        ))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use std::collections::HashMap;

    use super::*;
    use mockable::MockEnv;
    use rstest::rstest;

    fn mock_env(vars: &[(&str, &str)]) -> MockEnv {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        let mut env = MockEnv::new();
        env.expect_string()
            .times(0..)
            .returning(move |key| vars.get(key).cloned());
        env
    }

    #[rstest]
    fn reads_all_three_variables() {
        let source = EnvironmentCredentials::new(mock_env(&[
            (ACCESS_KEY_ID_ENV, "AKIAENV"),
            (SECRET_ACCESS_KEY_ENV, "env-secret"),
            (REGION_ENV, "eu-central-1"),
        ]));
        let bundle = source.load().expect("bundle present");
        assert_eq!(bundle.access_key_id(), "AKIAENV");
        assert_eq!(bundle.secret_access_key(), "env-secret");
        assert_eq!(bundle.region(), "eu-central-1");
        assert_eq!(bundle.origin(), CredentialOrigin::Environment);
    }

    #[rstest]
    #[case::unset(&[(ACCESS_KEY_ID_ENV, "AKIAENV"), (SECRET_ACCESS_KEY_ENV, "s")])]
    #[case::empty(&[(ACCESS_KEY_ID_ENV, "AKIAENV"), (SECRET_ACCESS_KEY_ENV, "s"), (REGION_ENV, "")])]
    fn region_defaults_to_us_east_1(#[case] vars: &[(&str, &str)]) {
        let bundle = EnvironmentCredentials::new(mock_env(vars))
            .load()
            .expect("bundle present");
        assert_eq!(bundle.region(), "us-east-1");
    }

    #[rstest]
    #[case::nothing(&[])]
    #[case::key_id_only(&[(ACCESS_KEY_ID_ENV, "AKIAENV")])]
    #[case::secret_only(&[(SECRET_ACCESS_KEY_ENV, "s")])]
    #[case::empty_secret(&[(ACCESS_KEY_ID_ENV, "AKIAENV"), (SECRET_ACCESS_KEY_ENV, "")])]
    fn incomplete_environment_yields_nothing(#[case] vars: &[(&str, &str)]) {
        assert!(EnvironmentCredentials::new(mock_env(vars)).load().is_none());
    }
}
