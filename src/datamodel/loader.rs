//! Configuration snapshot loader
//!
//! Reads a node bootstrapping configuration from a YAML or JSON file.

use super::NodeBootstrappingConfiguration;
use crate::NodeBakeError;
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Document format of a configuration file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Pick the format from the file extension (`.json`, anything else is YAML)
    pub fn from_path(path: &Path) -> Self {
        if path
            .extension()
            .is_some_and(|e| e.eq_ignore_ascii_case("json"))
        {
            Self::Json
        } else {
            Self::Yaml
        }
    }
}

/// Parse configuration content in the given format
pub fn parse_configuration(
    content: &str,
    format: ConfigFormat,
) -> Result<NodeBootstrappingConfiguration, NodeBakeError> {
    let config = match format {
        ConfigFormat::Json => NodeBootstrappingConfiguration::from_json(content)?,
        ConfigFormat::Yaml => NodeBootstrappingConfiguration::from_yaml(content)?,
    };
    Ok(config)
}

/// Load a configuration snapshot from disk
pub async fn load_configuration(
    path: impl AsRef<Path>,
) -> Result<NodeBootstrappingConfiguration, NodeBakeError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(NodeBakeError::Config(format!(
            "configuration file {} does not exist",
            path.display()
        )));
    }

    let content = fs::read_to_string(path).await?;
    let format = ConfigFormat::from_path(path);
    debug!("Loading {:?} configuration from {}", format, path.display());

    parse_configuration(&content, format)
}
