//! Provisioned workshop accounts and the failures provisioning can produce.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::json;
use url::Url;

use super::{Error, Username};

/// Console landing page handed to every attendee.
pub const CONSOLE_URL: &str = "https://console.aws.amazon.com/";
/// Sign-in page used when no account-specific link can be derived.
pub const GENERIC_SIGNIN_URL: &str = "https://signin.aws.amazon.com/console";
/// Group every workshop account is attached to unless configured otherwise.
pub const DEFAULT_GROUP_NAME: &str = "AWS_Participants";
/// Message reported when no credentials can be resolved.
pub const CREDENTIALS_NOT_FOUND: &str = "AWS credentials not found.";

const PASSWORD_SUFFIX: &str = "@encode2025";

/// Console password assigned to a workshop account.
///
/// The password is deliberately deterministic so facilitators can hand it out
/// in person; it is not a secret in any meaningful sense.
///
/// # Examples
/// ```
/// use workshop_iam::domain::{workshop_password, Username};
///
/// let username = Username::new("alice").expect("valid username");
/// assert_eq!(workshop_password(&username), "alice@encode2025");
/// ```
pub fn workshop_password(username: &Username) -> String {
    format!("{username}{PASSWORD_SUFFIX}")
}

/// Account-specific console sign-in link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignInUrl(String);

impl SignInUrl {
    /// Build the sign-in link for an account alias or numeric account id.
    ///
    /// Identifiers that cannot form a valid host fall back to the generic
    /// sign-in page.
    ///
    /// # Examples
    /// ```
    /// use workshop_iam::domain::SignInUrl;
    ///
    /// let url = SignInUrl::for_identifier("acme-workshop");
    /// assert_eq!(url.as_str(), "https://acme-workshop.signin.aws.amazon.com/console");
    /// ```
    pub fn for_identifier(identifier: &str) -> Self {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Self::generic();
        }
        let expected_host = format!("{identifier}.signin.aws.amazon.com");
        let candidate = format!("https://{expected_host}/console");
        match Url::parse(&candidate) {
            Ok(url) if url.host_str() == Some(expected_host.as_str()) => Self(candidate),
            _ => Self::generic(),
        }
    }

    /// Accept a link issued earlier, such as one echoed back by a form.
    ///
    /// # Errors
    /// Returns the parse error when `raw` is not an absolute URL.
    pub fn parse(raw: &str) -> Result<Self, url::ParseError> {
        let trimmed = raw.trim();
        Url::parse(trimmed)?;
        Ok(Self(trimmed.to_owned()))
    }

    /// The generic sign-in page.
    pub fn generic() -> Self {
        Self(GENERIC_SIGNIN_URL.to_owned())
    }

    /// Borrow the link as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SignInUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether provisioning looks up an account-specific sign-in link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SignInLinkMode {
    /// Alias, then account id, then the generic page.
    #[default]
    Resolve,
    /// Skip the lookup; the account carries no sign-in link.
    Omit,
}

/// Everything an attendee needs to sign in.
///
/// Only [`crate::domain::ProvisioningService`] constructs this after the user,
/// login profile and group membership were all created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionedAccount {
    pub username: Username,
    pub password: String,
    pub arn: String,
    pub console_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signin_url: Option<SignInUrl>,
}

/// Closed classification of provisioning failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProvisionErrorKind {
    /// No credentials could be resolved; nothing was called.
    CredentialsNotFound,
    /// The identity provider rejected the credentials or their permissions.
    Unauthenticated,
    /// A user with the requested name already exists.
    AlreadyExists,
    /// The workshop group does not exist.
    GroupNotFound,
    /// The identity provider throttled the call.
    RateLimited,
    /// Any other identity provider failure.
    Other,
}

/// Failed provisioning attempt.
///
/// `Display` yields the underlying message verbatim so the form can show it
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ProvisionError {
    kind: ProvisionErrorKind,
    message: String,
}

impl ProvisionError {
    /// Construct an error of the given kind.
    pub fn new(kind: ProvisionErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// The failure raised when credential resolution finds nothing.
    pub fn credentials_not_found() -> Self {
        Self::new(ProvisionErrorKind::CredentialsNotFound, CREDENTIALS_NOT_FOUND)
    }

    /// Failure category.
    pub fn kind(&self) -> ProvisionErrorKind {
        self.kind
    }

    /// Underlying error description.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Outcome of a provisioning attempt.
pub type ProvisionResult = Result<ProvisionedAccount, ProvisionError>;

impl From<ProvisionError> for Error {
    fn from(value: ProvisionError) -> Self {
        let details = json!({ "kind": value.kind });
        let message = if value.message.trim().is_empty() {
            "identity provider returned an empty error".to_owned()
        } else {
            value.message
        };
        let error = match value.kind {
            ProvisionErrorKind::CredentialsNotFound => Error::service_unavailable(message),
            ProvisionErrorKind::Unauthenticated => Error::unauthorized(message),
            ProvisionErrorKind::AlreadyExists => Error::conflict(message),
            ProvisionErrorKind::GroupNotFound => Error::not_found(message),
            ProvisionErrorKind::RateLimited => Error::rate_limited(message),
            ProvisionErrorKind::Other => Error::upstream(message),
        };
        error.with_details(details)
    }
}
