//! Credits catalogue location

use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::credits::{CreditsConfig, CreditsError};

/// Where to read the credits catalogue from.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreditsSettings {
    /// YAML catalogue; the built-in catalogue is used when unset.
    pub config_path: Option<PathBuf>,
}

impl CreditsSettings {
    pub fn load_catalogue(&self) -> Result<CreditsConfig, CreditsError> {
        match &self.config_path {
            Some(path) => {
                tracing::info!(path = %path.display(), "Loading credits catalogue");
                CreditsConfig::from_yaml_file(path)
            }
            None => Ok(CreditsConfig::default()),
        }
    }
}
