//! Workshop account provisioning service.
//!
//! Implements the [`AccountProvisioning`] driving port on top of the
//! [`CredentialSource`] and [`DirectoryConnector`] driven ports. Steps run
//! strictly in order and the first failure aborts the attempt; nothing already
//! created is rolled back.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use crate::domain::ports::{
    AccountProvisioning, CredentialSource, DirectoryConnector, DirectoryError, IdentityDirectory,
};
use crate::domain::{
    CONSOLE_URL, DEFAULT_GROUP_NAME, ProvisionError, ProvisionErrorKind, ProvisionResult,
    ProvisionedAccount, SignInLinkMode, SignInUrl, Username, workshop_password,
};

/// Provisioning step, used to classify directory failures and label logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    CreateUser,
    CreateLoginProfile,
    AddUserToGroup,
}

impl Step {
    const fn label(self) -> &'static str {
        match self {
            Self::CreateUser => "create_user",
            Self::CreateLoginProfile => "create_login_profile",
            Self::AddUserToGroup => "add_user_to_group",
        }
    }
}

/// Account provisioning service implementing [`AccountProvisioning`].
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use workshop_iam::domain::ports::{
///     AccountProvisioning, FixtureCredentialSource, FixtureDirectoryConnector,
///     FixtureIdentityDirectory,
/// };
/// use workshop_iam::domain::{ProvisionErrorKind, ProvisioningService, Username};
///
/// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
/// let directory = Arc::new(FixtureIdentityDirectory::new("123456789012", &[]));
/// let service = ProvisioningService::new(
///     Arc::new(FixtureCredentialSource::empty()),
///     Arc::new(FixtureDirectoryConnector::new(directory)),
/// );
/// let username = Username::new("alice").expect("valid username");
/// let err = service.provision(&username).await.expect_err("no credentials");
/// assert_eq!(err.kind(), ProvisionErrorKind::CredentialsNotFound);
/// # });
/// ```
#[derive(Clone)]
pub struct ProvisioningService<S, C> {
    credentials: Arc<S>,
    connector: Arc<C>,
    group_name: String,
    signin_mode: SignInLinkMode,
}

impl<S, C> ProvisioningService<S, C> {
    /// Create a service attaching users to the default workshop group.
    pub fn new(credentials: Arc<S>, connector: Arc<C>) -> Self {
        Self {
            credentials,
            connector,
            group_name: DEFAULT_GROUP_NAME.to_owned(),
            signin_mode: SignInLinkMode::default(),
        }
    }

    /// Attach provisioned users to `group_name` instead of the default group.
    #[must_use]
    pub fn with_group_name(mut self, group_name: impl Into<String>) -> Self {
        self.group_name = group_name.into();
        self
    }

    /// Choose whether a sign-in link is resolved.
    #[must_use]
    pub fn with_signin_mode(mut self, signin_mode: SignInLinkMode) -> Self {
        self.signin_mode = signin_mode;
        self
    }

    /// Group provisioned users are attached to.
    pub fn group_name(&self) -> &str {
        &self.group_name
    }
}

impl<S, C> ProvisioningService<S, C>
where
    S: CredentialSource,
    C: DirectoryConnector,
{
    fn step_error(step: Step, error: DirectoryError) -> ProvisionError {
        let kind = match (&error, step) {
            (DirectoryError::Unauthenticated { .. }, _) => ProvisionErrorKind::Unauthenticated,
            (DirectoryError::AlreadyExists { .. }, _) => ProvisionErrorKind::AlreadyExists,
            (DirectoryError::NotFound { .. }, Step::AddUserToGroup) => {
                ProvisionErrorKind::GroupNotFound
            }
            (DirectoryError::RateLimited { .. }, _) => ProvisionErrorKind::RateLimited,
            (DirectoryError::NotFound { .. } | DirectoryError::Other { .. }, _) => {
                ProvisionErrorKind::Other
            }
        };
        ProvisionError::new(kind, error.message())
    }

    async fn resolve_signin_url(&self, directory: &dyn IdentityDirectory) -> SignInUrl {
        match directory.list_account_aliases().await {
            Ok(aliases) => {
                if let Some(alias) = aliases.first() {
                    debug!(%alias, "sign-in link derived from account alias");
                    return SignInUrl::for_identifier(alias);
                }
            }
            Err(err) => {
                warn!(error = %err, "account alias lookup failed; using generic sign-in page");
                return SignInUrl::generic();
            }
        }

        match directory.caller_account_id().await {
            Ok(account_id) => {
                debug!(%account_id, "sign-in link derived from account id");
                SignInUrl::for_identifier(&account_id)
            }
            Err(err) => {
                warn!(error = %err, "caller identity lookup failed; using generic sign-in page");
                SignInUrl::generic()
            }
        }
    }
}

#[async_trait]
impl<S, C> AccountProvisioning for ProvisioningService<S, C>
where
    S: CredentialSource,
    C: DirectoryConnector,
{
    async fn provision(&self, username: &Username) -> ProvisionResult {
        let Some(credentials) = self.credentials.resolve() else {
            warn!(%username, "no AWS credentials resolved");
            return Err(ProvisionError::credentials_not_found());
        };
        info!(
            %username,
            origin = %credentials.origin(),
            region = credentials.region(),
            group = %self.group_name,
            "provisioning workshop account",
        );

        let directory = self.connector.connect(&credentials).await;

        let user = directory.create_user(username).await.map_err(|err| {
            error!(%username, step = Step::CreateUser.label(), error = %err, "provisioning failed");
            Self::step_error(Step::CreateUser, err)
        })?;
        debug!(%username, arn = %user.arn, "user created");

        let password = workshop_password(username);
        if let Err(err) = directory
            .create_login_profile(username, &password, false)
            .await
        {
            error!(%username, step = Step::CreateLoginProfile.label(), error = %err, "provisioning failed");
            warn!(%username, arn = %user.arn, "user left without a login profile");
            return Err(Self::step_error(Step::CreateLoginProfile, err));
        }
        debug!(%username, "login profile created");

        if let Err(err) = directory
            .add_user_to_group(username, &self.group_name)
            .await
        {
            error!(%username, step = Step::AddUserToGroup.label(), error = %err, "provisioning failed");
            warn!(
                %username,
                arn = %user.arn,
                group = %self.group_name,
                "user left outside the workshop group",
            );
            return Err(Self::step_error(Step::AddUserToGroup, err));
        }
        debug!(%username, group = %self.group_name, "user added to group");

        let signin_url = match self.signin_mode {
            SignInLinkMode::Resolve => Some(self.resolve_signin_url(directory.as_ref()).await),
            SignInLinkMode::Omit => None,
        };

        info!(%username, arn = %user.arn, "workshop account provisioned");
        Ok(ProvisionedAccount {
            username: username.clone(),
            password,
            arn: user.arn,
            console_url: CONSOLE_URL.to_owned(),
            signin_url,
        })
    }
}

#[cfg(test)]
#[path = "provisioning_service_tests.rs"]
mod tests;
