//! Builders wiring the outbound adapters into HTTP state.

use std::sync::Arc;

use workshop_iam::domain::ProvisioningService;
use workshop_iam::domain::ports::{AccountProvisioning, DocumentMaterializer};
use workshop_iam::inbound::http::state::HttpState;
use workshop_iam::outbound::credentials::{LayeredCredentialSource, SecretsFileCredentials};
use workshop_iam::outbound::iam::AwsDirectoryConnector;
use workshop_iam::outbound::scratch::TempDirMaterializer;

use super::ProvisionerSettings;

/// Provisioning backed by the secrets file, the process environment and AWS.
fn build_provisioning(settings: &ProvisionerSettings) -> Arc<dyn AccountProvisioning> {
    let credentials =
        LayeredCredentialSource::with_process_env(SecretsFileCredentials::new(settings.secrets_path()));
    Arc::new(
        ProvisioningService::new(Arc::new(credentials), Arc::new(AwsDirectoryConnector))
            .with_group_name(settings.group_name())
            .with_signin_mode(settings.signin_mode()),
    )
}

fn build_materializer(settings: &ProvisionerSettings) -> Arc<dyn DocumentMaterializer> {
    match &settings.scratch_dir {
        Some(root) => Arc::new(TempDirMaterializer::in_root(root.clone())),
        None => Arc::new(TempDirMaterializer::new()),
    }
}

/// Build the HTTP state shared by every worker.
pub(super) fn build_http_state(settings: &ProvisionerSettings) -> HttpState {
    HttpState::new(build_provisioning(settings), build_materializer(settings))
}
