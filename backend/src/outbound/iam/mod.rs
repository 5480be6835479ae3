//! AWS SDK adapters for the identity directory ports.
//!
//! [`AwsDirectoryConnector`] builds IAM and STS clients from a resolved
//! credential bundle; [`AwsIdentityDirectory`] issues the calls and classifies
//! SDK failures by their AWS error code.

mod error_mapping;

use std::sync::Arc;

use async_trait::async_trait;
use aws_config::{BehaviorVersion, SdkConfig};
use aws_sdk_iam::config::{Credentials, Region};
use tracing::debug;

use crate::domain::ports::{DirectoryConnector, DirectoryError, DirectoryUser, IdentityDirectory};
use crate::domain::{CredentialBundle, Username};

use error_mapping::map_sdk_error;
pub use error_mapping::classify_error_code;

const PROVIDER_NAME: &str = "workshop-iam";

/// Connector producing SDK-backed directories.
#[derive(Debug, Default, Clone, Copy)]
pub struct AwsDirectoryConnector;

#[async_trait]
impl DirectoryConnector for AwsDirectoryConnector {
    async fn connect(&self, credentials: &CredentialBundle) -> Arc<dyn IdentityDirectory> {
        let provider = Credentials::new(
            credentials.access_key_id(),
            credentials.secret_access_key(),
            None,
            None,
            PROVIDER_NAME,
        );
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(credentials.region().to_owned()))
            .credentials_provider(provider)
            .load()
            .await;
        debug!(region = credentials.region(), "AWS clients configured");
        Arc::new(AwsIdentityDirectory::new(&config))
    }
}

/// IAM and STS clients bound to one credential bundle.
#[derive(Debug, Clone)]
pub struct AwsIdentityDirectory {
    iam: aws_sdk_iam::Client,
    sts: aws_sdk_sts::Client,
}

impl AwsIdentityDirectory {
    /// Build both clients from a shared SDK configuration.
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            iam: aws_sdk_iam::Client::new(config),
            sts: aws_sdk_sts::Client::new(config),
        }
    }
}

#[async_trait]
impl IdentityDirectory for AwsIdentityDirectory {
    async fn create_user(&self, username: &Username) -> Result<DirectoryUser, DirectoryError> {
        let output = self
            .iam
            .create_user()
            .user_name(username.as_ref())
            .send()
            .await
            .map_err(|err| map_sdk_error("CreateUser", &err))?;
        let user = output.user().ok_or_else(|| {
            DirectoryError::other("CreateUser succeeded without returning the user")
        })?;
        Ok(DirectoryUser {
            user_name: user.user_name().to_owned(),
            arn: user.arn().to_owned(),
        })
    }

    async fn create_login_profile(
        &self,
        username: &Username,
        password: &str,
        password_reset_required: bool,
    ) -> Result<(), DirectoryError> {
        self.iam
            .create_login_profile()
            .user_name(username.as_ref())
            .password(password)
            .password_reset_required(password_reset_required)
            .send()
            .await
            .map_err(|err| map_sdk_error("CreateLoginProfile", &err))?;
        Ok(())
    }

    async fn add_user_to_group(
        &self,
        username: &Username,
        group_name: &str,
    ) -> Result<(), DirectoryError> {
        self.iam
            .add_user_to_group()
            .group_name(group_name)
            .user_name(username.as_ref())
            .send()
            .await
            .map_err(|err| map_sdk_error("AddUserToGroup", &err))?;
        Ok(())
    }

    async fn list_account_aliases(&self) -> Result<Vec<String>, DirectoryError> {
        let output = self
            .iam
            .list_account_aliases()
            .send()
            .await
            .map_err(|err| map_sdk_error("ListAccountAliases", &err))?;
        Ok(output.account_aliases().to_vec())
    }

    async fn caller_account_id(&self) -> Result<String, DirectoryError> {
        let output = self
            .sts
            .get_caller_identity()
            .send()
            .await
            .map_err(|err| map_sdk_error("GetCallerIdentity", &err))?;
        output
            .account()
            .map(str::to_owned)
            .ok_or_else(|| DirectoryError::other("GetCallerIdentity returned no account id"))
    }
}
