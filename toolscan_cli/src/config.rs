use std::path::Path;

use anyhow::{Context, Result};
use common::SerdeFormat;
use serde::{Deserialize, Serialize};
use toolscan::{DiscoveryConfig, VerificationConfig};

/// Settings file contents. Every section and field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub discovery: DiscoveryConfig,
    pub verification: VerificationConfig,
}

impl Settings {
    /// Defaults when `path` is `None`; format is picked by file extension.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Settings::default());
        };

        let format = SerdeFormat::from_file_name(&path.to_string_lossy())?;
        let serialized = std::fs::read(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        let settings: Settings = common::serde::deserialize(&serialized, format)
            .with_context(|| format!("Failed to parse settings file {}", path.display()))?;

        tracing::debug!("Loaded settings from {}: {:?}", path.display(), settings);

        Ok(settings)
    }
}
