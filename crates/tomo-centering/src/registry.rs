//! Explicit plugin registry.
//!
//! The runtime populates a [`PluginRegistry`] at startup, either with
//! [`PluginRegistry::with_builtin`] or by calling [`PluginRegistry::register`]
//! for its own plugins. Nothing registers itself as a side effect.

use std::collections::BTreeMap;

use serde_json::Value;
use tomo_centering_vo::{CenterSearchError, VoCenteringParams};

use crate::estimator::{CenterOfRotationEstimator, VO_CENTERING};
use crate::processor::FrameProcessor;

/// Registry lookup and plugin construction errors.
#[derive(thiserror::Error, Debug)]
pub enum RegistryError {
    #[error("unknown plugin `{0}`")]
    UnknownPlugin(String),
    #[error("plugin `{0}` is already registered")]
    DuplicatePlugin(String),
    #[error("invalid parameters for plugin `{plugin}`: {source}")]
    InvalidParams {
        plugin: String,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Search(#[from] CenterSearchError),
}

/// Builds a plugin instance from its JSON parameters.
pub type PluginFactory = fn(&Value) -> Result<Box<dyn FrameProcessor>, RegistryError>;

/// Registered plugin: factory plus the parameters it uses when none are given.
#[derive(Clone, Copy)]
pub struct PluginEntry {
    pub factory: PluginFactory,
    pub default_params: fn() -> Value,
}

/// Name -> plugin factory mapping.
#[derive(Clone, Default)]
pub struct PluginRegistry {
    plugins: BTreeMap<String, PluginEntry>,
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("plugins", &self.plugins.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl PluginRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the plugins shipped with this crate.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.plugins.insert(
            VO_CENTERING.to_string(),
            PluginEntry {
                factory: vo_centering_factory,
                default_params: vo_centering_defaults,
            },
        );
        registry
    }

    pub fn register(&mut self, name: &str, entry: PluginEntry) -> Result<(), RegistryError> {
        if self.plugins.contains_key(name) {
            return Err(RegistryError::DuplicatePlugin(name.to_string()));
        }
        self.plugins.insert(name.to_string(), entry);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.plugins.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.plugins.keys().map(String::as_str)
    }

    pub fn default_params(&self, name: &str) -> Result<Value, RegistryError> {
        let entry = self.entry(name)?;
        Ok((entry.default_params)())
    }

    /// Instantiate `name` with `params`; `Value::Null` selects the defaults.
    pub fn create(&self, name: &str, params: &Value) -> Result<Box<dyn FrameProcessor>, RegistryError> {
        let entry = self.entry(name)?;
        let plugin = if params.is_null() {
            (entry.factory)(&(entry.default_params)())?
        } else {
            (entry.factory)(params)?
        };
        log::debug!("created plugin `{name}`");
        Ok(plugin)
    }

    fn entry(&self, name: &str) -> Result<&PluginEntry, RegistryError> {
        self.plugins
            .get(name)
            .ok_or_else(|| RegistryError::UnknownPlugin(name.to_string()))
    }
}

fn vo_centering_factory(params: &Value) -> Result<Box<dyn FrameProcessor>, RegistryError> {
    let params: VoCenteringParams =
        serde_json::from_value(params.clone()).map_err(|source| RegistryError::InvalidParams {
            plugin: VO_CENTERING.to_string(),
            source,
        })?;
    Ok(Box::new(CenterOfRotationEstimator::new(params)?))
}

fn vo_centering_defaults() -> Value {
    serde_json::to_value(VoCenteringParams::default()).unwrap_or(Value::Null)
}
