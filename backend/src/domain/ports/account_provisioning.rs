//! Driving port for creating workshop accounts.
//!
//! Inbound adapters call this port with a validated [`Username`] and render
//! whatever [`ProvisionResult`] comes back. Handler tests substitute the
//! fixture or a mock so they never need AWS credentials.

use async_trait::async_trait;

use crate::domain::{
    CONSOLE_URL, ProvisionResult, ProvisionedAccount, SignInUrl, Username, workshop_password,
};

/// Domain use-case port for workshop account provisioning.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountProvisioning: Send + Sync {
    /// Create the IAM user, its console password and its group membership.
    async fn provision(&self, username: &Username) -> ProvisionResult;
}

/// Provisioner that succeeds without contacting AWS.
///
/// The returned account uses account id `123456789012` and the generic
/// sign-in page, which keeps rendered output deterministic in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAccountProvisioning;

#[async_trait]
impl AccountProvisioning for FixtureAccountProvisioning {
    async fn provision(&self, username: &Username) -> ProvisionResult {
        Ok(ProvisionedAccount {
            username: username.clone(),
            password: workshop_password(username),
            arn: format!("arn:aws:iam::123456789012:user/{username}"),
            console_url: CONSOLE_URL.to_owned(),
            signin_url: Some(SignInUrl::generic()),
        })
    }
}
