//! Errors raised while ingesting extension metadata

use thiserror::Error;

/// Errors that can occur when loading or validating a metadata dump.
#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("failed to read metadata file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse JSON metadata: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to parse YAML metadata: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to parse TOML metadata: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unsupported metadata format '{0}', expected one of: json, yaml, yml, toml")]
    UnsupportedFormat(String),

    #[error("invalid metadata for module '{module}': {reason}")]
    Invalid { module: String, reason: String },
}
