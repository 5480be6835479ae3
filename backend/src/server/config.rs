//! Provisioner settings loaded via OrthoConfig.

use std::net::SocketAddr;
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use workshop_iam::domain::{DEFAULT_GROUP_NAME, SignInLinkMode};
use workshop_iam::outbound::credentials::DEFAULT_SECRETS_PATH;

const DEFAULT_BIND_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

/// Settings for the provisioning server.
///
/// Every field can be set from the command line, a configuration file or a
/// `WORKSHOP_IAM_*` environment variable.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "WORKSHOP_IAM")]
pub struct ProvisionerSettings {
    /// Interface to listen on.
    pub bind_host: Option<String>,
    /// TCP port to listen on.
    pub port: Option<u16>,
    /// IAM group every workshop user joins.
    pub group_name: Option<String>,
    /// TOML file holding the `[aws]` credential table.
    pub secrets_path: Option<PathBuf>,
    /// Resolve an account-specific sign-in link after provisioning.
    #[ortho_config(default = true)]
    pub signin_link: bool,
    /// Parent directory for scratch directories; the system temp dir when unset.
    pub scratch_dir: Option<PathBuf>,
}

impl ProvisionerSettings {
    /// Return the configured bind host, falling back to all interfaces.
    pub fn bind_host(&self) -> &str {
        self.bind_host.as_deref().unwrap_or(DEFAULT_BIND_HOST)
    }

    /// Return the configured port, falling back to 8080.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Return the socket address to bind.
    ///
    /// # Errors
    /// Returns [`std::io::Error`] when the host and port do not form an
    /// address.
    pub fn bind_addr(&self) -> std::io::Result<SocketAddr> {
        format!("{}:{}", self.bind_host(), self.port())
            .parse()
            .map_err(|err| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("invalid bind address {}:{}: {err}", self.bind_host(), self.port()),
                )
            })
    }

    /// Return the workshop group name, falling back to the default group.
    pub fn group_name(&self) -> &str {
        self.group_name.as_deref().unwrap_or(DEFAULT_GROUP_NAME)
    }

    /// Return the secrets file path, falling back to `.streamlit/secrets.toml`.
    pub fn secrets_path(&self) -> PathBuf {
        self.secrets_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SECRETS_PATH))
    }

    /// Return how the sign-in link is produced.
    pub fn signin_mode(&self) -> SignInLinkMode {
        if self.signin_link {
            SignInLinkMode::Resolve
        } else {
            SignInLinkMode::Omit
        }
    }
}
