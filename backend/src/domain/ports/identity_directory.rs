//! Driven ports for the identity-management API.
//!
//! The provisioning service talks to IAM through [`IdentityDirectory`]; a
//! [`DirectoryConnector`] builds one from the credentials resolved for the
//! current attempt. Adapters classify provider failures into the closed
//! [`DirectoryError`] set so the domain can branch on the kind instead of
//! matching message text.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::{CredentialBundle, Username};

use super::define_port_error;

define_port_error! {
    /// Classified failures raised by identity directory adapters.
    ///
    /// Each variant carries the provider's own description, which is shown to
    /// the operator verbatim.
    pub enum DirectoryError {
        /// Credentials were rejected or lack the required permissions.
        Unauthenticated { message: String } => "{message}",
        /// The entity being created already exists.
        AlreadyExists { message: String } => "{message}",
        /// A referenced entity does not exist.
        NotFound { message: String } => "{message}",
        /// The provider throttled the call.
        RateLimited { message: String } => "{message}",
        /// Anything else, including transport failures.
        Other { message: String } => "{message}",
    }
}

impl DirectoryError {
    /// Provider description carried by every variant.
    pub fn message(&self) -> &str {
        match self {
            Self::Unauthenticated { message }
            | Self::AlreadyExists { message }
            | Self::NotFound { message }
            | Self::RateLimited { message }
            | Self::Other { message } => message,
        }
    }
}

/// User record returned by the directory after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryUser {
    /// Name the user was created with.
    pub user_name: String,
    /// Provider resource identifier.
    pub arn: String,
}

/// Identity-management operations used while provisioning.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityDirectory: Send + Sync {
    /// Create a user with the given name.
    async fn create_user(&self, username: &Username) -> Result<DirectoryUser, DirectoryError>;

    /// Attach a console password to an existing user.
    async fn create_login_profile(
        &self,
        username: &Username,
        password: &str,
        password_reset_required: bool,
    ) -> Result<(), DirectoryError>;

    /// Add an existing user to an existing group.
    async fn add_user_to_group(
        &self,
        username: &Username,
        group_name: &str,
    ) -> Result<(), DirectoryError>;

    /// Account aliases configured for the calling account.
    async fn list_account_aliases(&self) -> Result<Vec<String>, DirectoryError>;

    /// Numeric account id of the calling identity.
    async fn caller_account_id(&self) -> Result<String, DirectoryError>;
}

/// Builds an [`IdentityDirectory`] bound to a credential bundle.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectoryConnector: Send + Sync {
    /// Connect using `credentials`.
    async fn connect(&self, credentials: &CredentialBundle) -> Arc<dyn IdentityDirectory>;
}

/// In-memory directory used by tests and local demos.
///
/// Behaves like IAM for the calls provisioning makes: user names are unique,
/// groups must exist before users are added, and every call is counted.
#[derive(Debug, Default)]
pub struct FixtureIdentityDirectory {
    state: Mutex<FixtureDirectoryState>,
    calls: AtomicUsize,
}

#[derive(Debug, Default)]
struct FixtureDirectoryState {
    account_id: String,
    aliases: Vec<String>,
    users: BTreeMap<String, Option<String>>,
    groups: BTreeMap<String, BTreeSet<String>>,
    alias_lookup_fails: bool,
}

impl FixtureIdentityDirectory {
    /// Create a directory for `account_id` with the named groups.
    pub fn new(account_id: impl Into<String>, groups: &[&str]) -> Self {
        let state = FixtureDirectoryState {
            account_id: account_id.into(),
            groups: groups
                .iter()
                .map(|name| ((*name).to_owned(), BTreeSet::new()))
                .collect(),
            ..FixtureDirectoryState::default()
        };
        Self {
            state: Mutex::new(state),
            calls: AtomicUsize::new(0),
        }
    }

    /// Configure an account alias.
    #[must_use]
    pub fn with_alias(self, alias: impl Into<String>) -> Self {
        self.with_state(|state| state.aliases.push(alias.into()));
        self
    }

    /// Make alias and caller-identity lookups fail.
    #[must_use]
    pub fn with_failing_identity_lookup(self) -> Self {
        self.with_state(|state| state.alias_lookup_fails = true);
        self
    }

    /// Total number of directory calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Whether `username` exists.
    pub fn has_user(&self, username: &str) -> bool {
        self.with_state(|state| state.users.contains_key(username))
    }

    /// Password stored on the user's login profile, if any.
    pub fn password_for(&self, username: &str) -> Option<String> {
        self.with_state(|state| state.users.get(username).cloned().flatten())
    }

    /// Whether `username` is a member of `group_name`.
    pub fn is_member(&self, username: &str, group_name: &str) -> bool {
        self.with_state(|state| {
            state
                .groups
                .get(group_name)
                .is_some_and(|members| members.contains(username))
        })
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut FixtureDirectoryState) -> T) -> T {
        let mut guard = match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut guard)
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl IdentityDirectory for FixtureIdentityDirectory {
    async fn create_user(&self, username: &Username) -> Result<DirectoryUser, DirectoryError> {
        self.record_call();
        self.with_state(|state| {
            let name = username.as_ref();
            if state.users.contains_key(name) {
                return Err(DirectoryError::already_exists(format!(
                    "EntityAlreadyExists: User with name {name} already exists."
                )));
            }
            state.users.insert(name.to_owned(), None);
            Ok(DirectoryUser {
                user_name: name.to_owned(),
                arn: format!("arn:aws:iam::{}:user/{name}", state.account_id),
            })
        })
    }

    async fn create_login_profile(
        &self,
        username: &Username,
        password: &str,
        _password_reset_required: bool,
    ) -> Result<(), DirectoryError> {
        self.record_call();
        self.with_state(|state| match state.users.get_mut(username.as_ref()) {
            Some(Some(_)) => Err(DirectoryError::already_exists(format!(
                "EntityAlreadyExists: Login Profile for user {username} already exists."
            ))),
            Some(slot) => {
                *slot = Some(password.to_owned());
                Ok(())
            }
            None => Err(DirectoryError::not_found(format!(
                "NoSuchEntity: The user with name {username} cannot be found."
            ))),
        })
    }

    async fn add_user_to_group(
        &self,
        username: &Username,
        group_name: &str,
    ) -> Result<(), DirectoryError> {
        self.record_call();
        self.with_state(|state| match state.groups.get_mut(group_name) {
            Some(members) => {
                members.insert(username.as_ref().to_owned());
                Ok(())
            }
            None => Err(DirectoryError::not_found(format!(
                "NoSuchEntity: The group with name {group_name} cannot be found."
            ))),
        })
    }

    async fn list_account_aliases(&self) -> Result<Vec<String>, DirectoryError> {
        self.record_call();
        self.with_state(|state| {
            if state.alias_lookup_fails {
                Err(DirectoryError::unauthenticated(
                    "AccessDenied: not authorized to perform iam:ListAccountAliases",
                ))
            } else {
                Ok(state.aliases.clone())
            }
        })
    }

    async fn caller_account_id(&self) -> Result<String, DirectoryError> {
        self.record_call();
        self.with_state(|state| {
            if state.alias_lookup_fails {
                Err(DirectoryError::unauthenticated(
                    "AccessDenied: not authorized to perform sts:GetCallerIdentity",
                ))
            } else {
                Ok(state.account_id.clone())
            }
        })
    }
}

/// Connector that always hands out the same fixture directory.
#[derive(Debug, Clone)]
pub struct FixtureDirectoryConnector {
    directory: Arc<FixtureIdentityDirectory>,
    connections: Arc<AtomicUsize>,
}

impl FixtureDirectoryConnector {
    /// Wrap a shared fixture directory.
    pub fn new(directory: Arc<FixtureIdentityDirectory>) -> Self {
        Self {
            directory,
            connections: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of times [`DirectoryConnector::connect`] was called.
    pub fn connection_count(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DirectoryConnector for FixtureDirectoryConnector {
    async fn connect(&self, _credentials: &CredentialBundle) -> Arc<dyn IdentityDirectory> {
        self.connections.fetch_add(1, Ordering::SeqCst);
        self.directory.clone()
    }
}
