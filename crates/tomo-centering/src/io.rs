//! JSON configuration and report helpers.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{fs, path::Path};

use crate::dispatch::{DispatchReport, OnFrameError};
use crate::processor::FrameProcessor;
use crate::registry::{PluginRegistry, RegistryError};

#[derive(thiserror::Error, Debug)]
pub enum IoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Plugin selection for one pipeline stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginConfig {
    pub plugin: String,
    /// Plugin parameters; `null` or missing selects the registered defaults.
    #[serde(default)]
    pub params: Value,
    #[serde(default)]
    pub on_error: OnFrameError,
}

impl PluginConfig {
    /// Config for `plugin` with its default parameters.
    pub fn new(plugin: impl Into<String>) -> Self {
        Self {
            plugin: plugin.into(),
            params: Value::Null,
            on_error: OnFrameError::default(),
        }
    }

    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), IoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Instantiate the configured plugin from `registry`.
    pub fn build(&self, registry: &PluginRegistry) -> Result<Box<dyn FrameProcessor>, RegistryError> {
        registry.create(&self.plugin, &self.params)
    }
}

impl DispatchReport {
    /// Load a report from JSON on disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this report to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), IoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::FrameOutcome;
    use crate::processor::ResultRecord;
    use serde_json::json;

    #[test]
    fn config_round_trips_through_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("stage.json");
        let cfg = PluginConfig {
            plugin: "VoCentering".to_string(),
            params: json!({ "precision": 0.001 }),
            on_error: OnFrameError::Skip,
        };
        cfg.write_json(&path).expect("write");
        let loaded = PluginConfig::load_json(&path).expect("load");
        assert_eq!(loaded, cfg);

        let plugin = loaded
            .build(&PluginRegistry::with_builtin())
            .expect("build");
        assert_eq!(plugin.max_frames_per_call(), 1);
    }

    #[test]
    fn minimal_config_uses_defaults() {
        let cfg: PluginConfig = serde_json::from_str(r#"{ "plugin": "VoCentering" }"#).expect("parse");
        assert_eq!(cfg, PluginConfig::new("VoCentering"));
        assert!(cfg.build(&PluginRegistry::with_builtin()).is_ok());
    }

    #[test]
    fn report_round_trips_through_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("report.json");
        let report = DispatchReport {
            plugin: "VoCentering".to_string(),
            frames: vec![
                FrameOutcome {
                    index: 0,
                    record: Some(ResultRecord {
                        center_of_rotation: 99.75,
                    }),
                    error: None,
                },
                FrameOutcome {
                    index: 1,
                    record: None,
                    error: Some("invalid frame shape [4, 0]".to_string()),
                },
            ],
        };
        report.write_json(&path).expect("write");
        assert_eq!(DispatchReport::load_json(&path).expect("load"), report);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(matches!(
            PluginConfig::load_json(dir.path().join("absent.json")),
            Err(IoError::Io(_))
        ));
    }
}
