//! Domain primitives, ports and the provisioning use-case.
//!
//! Purpose: define the strongly typed values that flow from a submitted
//! username to a downloadable credentials handout, plus the ports adapters
//! implement. Nothing here depends on actix, the AWS SDK or the filesystem.
//!
//! Public surface:
//! - `Username`: validated IAM user name.
//! - `CredentialBundle`: access key pair and region for one attempt.
//! - `ProvisionedAccount` / `ProvisionError`: the two outcomes of provisioning.
//! - `CredentialsDocument`: the rendered plain-text handout.
//! - `ProvisioningService`: implementation of the `AccountProvisioning` port.
//! - `Error` / `ErrorCode`: transport-agnostic error payload.

pub mod account;
pub mod credentials;
pub mod credentials_document;
pub mod error;
pub mod ports;
pub mod provisioning_service;
pub mod trace_id;
pub mod username;

pub use self::account::{
    CONSOLE_URL, CREDENTIALS_NOT_FOUND, DEFAULT_GROUP_NAME, GENERIC_SIGNIN_URL, ProvisionError,
    ProvisionErrorKind, ProvisionResult, ProvisionedAccount, SignInLinkMode, SignInUrl,
    workshop_password,
};
pub use self::credentials::{
    CredentialBundle, CredentialOrigin, ENVIRONMENT_DEFAULT_REGION, SECRETS_DEFAULT_REGION,
};
pub use self::credentials_document::{
    CredentialsDocument, credentials_file_name, format_credentials,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::provisioning_service::ProvisioningService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::username::{USERNAME_MAX, Username, UsernameValidationError};
