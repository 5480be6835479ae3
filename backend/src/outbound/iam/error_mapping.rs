//! Classification of AWS SDK failures into [`DirectoryError`] variants.

use std::error::Error as StdError;

use aws_sdk_iam::error::{DisplayErrorContext, ProvideErrorMetadata};
use tracing::debug;

use crate::domain::ports::DirectoryError;

const UNAUTHENTICATED_CODES: &[&str] = &[
    "InvalidClientTokenId",
    "SignatureDoesNotMatch",
    "UnrecognizedClientException",
    "ExpiredToken",
    "ExpiredTokenException",
    "AccessDenied",
    "AccessDeniedException",
];

const RATE_LIMITED_CODES: &[&str] = &[
    "Throttling",
    "ThrottlingException",
    "RequestLimitExceeded",
    "TooManyRequestsException",
];

/// Map an AWS error code and its description onto a [`DirectoryError`].
///
/// Unknown or missing codes (transport failures, timeouts) become
/// [`DirectoryError::Other`].
///
/// # Examples
/// ```
/// use workshop_iam::domain::ports::DirectoryError;
/// use workshop_iam::outbound::iam::classify_error_code;
///
/// let err = classify_error_code(Some("EntityAlreadyExists"), "User with name alice already exists.");
/// assert!(matches!(err, DirectoryError::AlreadyExists { .. }));
/// ```
pub fn classify_error_code(code: Option<&str>, message: impl Into<String>) -> DirectoryError {
    let message = message.into();
    match code {
        Some("EntityAlreadyExists") => DirectoryError::already_exists(message),
        Some("NoSuchEntity") => DirectoryError::not_found(message),
        Some(code) if RATE_LIMITED_CODES.contains(&code) => DirectoryError::rate_limited(message),
        Some(code) if UNAUTHENTICATED_CODES.contains(&code) => {
            DirectoryError::unauthenticated(message)
        }
        _ => DirectoryError::other(message),
    }
}

/// Translate an SDK error raised by `operation`.
pub(super) fn map_sdk_error<E>(operation: &'static str, error: &E) -> DirectoryError
where
    E: ProvideErrorMetadata + StdError,
{
    let code = error.code();
    let message = match (code, error.message()) {
        (Some(code), Some(message)) => format!("{code}: {message}"),
        _ => DisplayErrorContext(error).to_string(),
    };
    debug!(operation, code = code.unwrap_or("none"), "AWS call failed");
    classify_error_code(code, message)
}
