//! Metadata oracle - the source of reflected module facts
//!
//! The renderers never talk to a runtime directly. They ask an oracle for a
//! module's metadata; the shipped oracle is a dump exported by a reflection
//! shim running inside the host runtime.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::model::{MetadataError, ModuleMetadata};

/// Errors reported by an oracle lookup
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    #[error("module '{0}' not found")]
    ModuleNotFound(String),
}

/// Supplies reflected metadata for a module by name
pub trait MetadataOracle {
    /// Look up a module; names compare case-insensitively
    fn reflect(&self, module: &str) -> Result<&ModuleMetadata, OracleError>;
}

/// Serialization format of a metadata dump
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataFormat {
    Json,
    Yaml,
    Toml,
}

impl MetadataFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self, MetadataError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match ext.as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "toml" => Ok(Self::Toml),
            _ => Err(MetadataError::UnsupportedFormat(ext)),
        }
    }
}

/// A set of module metadata, usually loaded from a dump file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetadataDump {
    #[serde(default)]
    modules: Vec<ModuleMetadata>,
}

impl MetadataDump {
    /// Create a dump from in-memory modules
    pub fn new(modules: Vec<ModuleMetadata>) -> Self {
        Self { modules }
    }

    /// Load a dump, picking the parser from the file extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, MetadataError> {
        let path = path.as_ref();
        let format = MetadataFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, format)
    }

    /// Parse a dump in the given format.
    pub fn parse(content: &str, format: MetadataFormat) -> Result<Self, MetadataError> {
        let dump: Self = match format {
            MetadataFormat::Json => serde_json::from_str(content)?,
            MetadataFormat::Yaml => serde_yaml::from_str(content)?,
            MetadataFormat::Toml => toml::from_str(content)?,
        };
        dump.validate()?;
        tracing::debug!(modules = dump.modules.len(), ?format, "loaded metadata dump");
        Ok(dump)
    }

    pub fn from_json_str(content: &str) -> Result<Self, MetadataError> {
        Self::parse(content, MetadataFormat::Json)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, MetadataError> {
        Self::parse(content, MetadataFormat::Yaml)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, MetadataError> {
        Self::parse(content, MetadataFormat::Toml)
    }

    fn validate(&self) -> Result<(), MetadataError> {
        for (i, module) in self.modules.iter().enumerate() {
            module.validate()?;
            let duplicate = self.modules[..i]
                .iter()
                .any(|m| m.name.eq_ignore_ascii_case(&module.name));
            if duplicate {
                return Err(MetadataError::Invalid {
                    module: module.name.clone(),
                    reason: "module appears more than once in the dump".to_string(),
                });
            }
        }
        Ok(())
    }

    /// All modules, in dump order
    pub fn modules(&self) -> &[ModuleMetadata] {
        &self.modules
    }
}

impl MetadataOracle for MetadataDump {
    fn reflect(&self, module: &str) -> Result<&ModuleMetadata, OracleError> {
        self.modules
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(module))
            .ok_or_else(|| OracleError::ModuleNotFound(module.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DUMP: &str = r#"{
        "modules": [
            {"name": "Core", "constants": [{"name": "E_ALL", "value": 32767}]},
            {"name": "demo"}
        ]
    }"#;

    #[test]
    fn test_reflect_is_case_insensitive() {
        let dump = MetadataDump::from_json_str(DUMP).unwrap();
        assert_eq!(dump.reflect("core").unwrap().constants.len(), 1);
        assert_eq!(dump.reflect("DEMO").unwrap().name, "demo");
        assert_eq!(
            dump.reflect("redis"),
            Err(OracleError::ModuleNotFound("redis".to_string()))
        );
    }

    #[test]
    fn test_duplicate_modules_rejected() {
        let json = r#"{"modules": [{"name": "demo"}, {"name": "Demo"}]}"#;
        let err = MetadataDump::from_json_str(json).unwrap_err();
        assert!(matches!(err, MetadataError::Invalid { .. }));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let json = r#"{"modules": [{"name": "demo", "ini": []}]}"#;
        assert!(matches!(
            MetadataDump::from_json_str(json),
            Err(MetadataError::Json(_))
        ));
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(
            MetadataFormat::from_path(Path::new("dump.JSON")).unwrap(),
            MetadataFormat::Json
        );
        assert_eq!(
            MetadataFormat::from_path(Path::new("dump.yml")).unwrap(),
            MetadataFormat::Yaml
        );
        assert!(matches!(
            MetadataFormat::from_path(Path::new("dump.xml")),
            Err(MetadataError::UnsupportedFormat(ext)) if ext == "xml"
        ));
    }

    #[test]
    fn test_toml_dump() {
        let toml = r#"
[[modules]]
name = "demo"

[[modules.constants]]
name = "Demo\\VERSION"
value = "1.2.0"
"#;
        let dump = MetadataDump::from_toml_str(toml).unwrap();
        let module = dump.reflect("demo").unwrap();
        assert_eq!(module.constants[0].name, "Demo\\VERSION");
    }
}
