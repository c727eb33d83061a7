use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use url::Url;

/// Environment variable naming the credential file that authorizes
/// storage access.
pub const CREDENTIALS_ENV: &str = "GOOGLE_APPLICATION_CREDENTIALS";

#[derive(Debug)]
pub struct Config {
    // http server configuration
    /// address for the HTTP server to listen on.
    ///  if not set then 0.0.0.0:33333 will be used
    pub listen_addr: Option<SocketAddr>,
    /// directory of UI assets served at the root,
    ///  if not set then no static files are served
    pub static_dir: Option<PathBuf>,

    // storage configuration
    /// storage API endpoint override (emulators);
    ///  if not set then the public endpoint is used
    pub storage_endpoint: Option<Url>,
    /// bearer token attached to storage requests
    pub storage_token: Option<String>,
    /// path to the credential file, as named by the environment
    pub credentials_path: Option<PathBuf>,

    // misc
    pub log_level: tracing::Level,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: Some(SocketAddr::new(
                IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
                33333,
            )),
            static_dir: None,
            storage_endpoint: None,
            storage_token: None,
            credentials_path: None,
            log_level: tracing::Level::INFO,
        }
    }
}

impl Config {
    /// Read the credential file path from the environment.
    pub fn credentials_from_env() -> Option<PathBuf> {
        std::env::var_os(CREDENTIALS_ENV).map(PathBuf::from)
    }

    /// Startup validation of the credential reference.
    ///
    /// An explicit endpoint override (an emulator) or bearer token waives
    /// the requirement; otherwise the credential file named by the
    /// environment must be present on disk. Returns a structured error so
    /// the entry point decides how to exit.
    pub fn validate_credentials(&self) -> Result<(), ConfigError> {
        if self.storage_endpoint.is_some() || self.storage_token.is_some() {
            return Ok(());
        }

        match self.credentials_path {
            None => Err(ConfigError::MissingCredentials),
            Some(ref path) if !path.exists() => {
                Err(ConfigError::CredentialsNotFound(path.clone()))
            }
            Some(_) => Ok(()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("GOOGLE_APPLICATION_CREDENTIALS environment variable must be set")]
    MissingCredentials,
    #[error("credentials file does not exist: {}", .0.display())]
    CredentialsNotFound(PathBuf),
}
