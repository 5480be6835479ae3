//! OpenAPI schema definitions for domain types.
//!
//! Domain types do not derive `ToSchema`; the wrappers here mirror their
//! serialised shape and register under the domain type's name.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// AWS rejected the configured credentials.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// A resource the operation depends on does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The user already exists.
    #[schema(rename = "conflict")]
    Conflict,
    /// AWS throttled the request.
    #[schema(rename = "rate_limited")]
    RateLimited,
    /// No AWS credentials are configured.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// AWS failed in a way with no finer category.
    #[schema(rename = "upstream_error")]
    UpstreamError,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "conflict")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "EntityAlreadyExists: User with name alice already exists.")]
    message: String,
    /// Correlation identifier echoed in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary details such as the provisioning failure kind.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::ProvisionedAccount`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ProvisionedAccount, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ProvisionedAccountSchema {
    /// IAM user name.
    #[schema(example = "alice")]
    username: String,
    /// Console password; the user is not asked to change it.
    #[schema(example = "alice@encode2025")]
    password: String,
    /// ARN of the created user.
    #[schema(example = "arn:aws:iam::123456789012:user/alice")]
    arn: String,
    /// Generic AWS console address.
    #[schema(example = "https://console.aws.amazon.com/")]
    console_url: String,
    /// Account-specific sign-in page, absent when lookups are disabled.
    #[schema(example = "https://acme.signin.aws.amazon.com/console")]
    signin_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[test]
    fn error_code_schema_lists_every_code() {
        let schema_json = schema_to_json::<ErrorCodeSchema>();
        for code in [
            "invalid_request",
            "unauthorized",
            "not_found",
            "conflict",
            "rate_limited",
            "service_unavailable",
            "upstream_error",
            "internal_error",
        ] {
            assert!(schema_json.contains(code), "missing {code}");
        }
    }

    #[test]
    fn error_schema_uses_wire_field_names() {
        let schema_json = schema_to_json::<ErrorSchema>();
        // utoipa replaces :: with . in schema names
        assert_eq!(ErrorSchema::name(), "crate.domain.Error");
        assert!(schema_json.contains("traceId"));
        assert!(!schema_json.contains("trace_id"));
    }

    #[test]
    fn provisioned_account_schema_uses_wire_field_names() {
        let schema_json = schema_to_json::<ProvisionedAccountSchema>();
        assert_eq!(
            ProvisionedAccountSchema::name(),
            "crate.domain.ProvisionedAccount"
        );
        for field in ["username", "password", "arn", "consoleUrl", "signinUrl"] {
            assert!(schema_json.contains(field), "missing {field}");
        }
    }
}
