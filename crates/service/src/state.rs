use std::sync::Arc;

use super::config::Config;

use common::explore::Explorer;
use common::storage::{GcsClient, StorageError, StorageProvider};

/// Main service state - one storage client handle behind the explorer,
/// shared by every in-flight request.
#[derive(Debug, Clone)]
pub struct State {
    explorer: Explorer,
}

impl State {
    pub fn from_config(config: &Config) -> Result<Self, StateSetupError> {
        let client = match config.storage_endpoint {
            Some(ref endpoint) => {
                tracing::info!("Storage endpoint: {}", endpoint);
                GcsClient::new(endpoint.clone(), config.storage_token.clone())?
            }
            None => GcsClient::with_defaults(config.storage_token.clone())?,
        };

        Ok(Self::with_provider(Arc::new(client)))
    }

    /// Build state over any provider, e.g. a fake backend in tests.
    pub fn with_provider(provider: Arc<dyn StorageProvider>) -> Self {
        Self {
            explorer: Explorer::new(provider),
        }
    }

    pub fn explorer(&self) -> &Explorer {
        &self.explorer
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateSetupError {
    #[error("storage client setup error: {0}")]
    StorageClient(#[from] StorageError),
}
