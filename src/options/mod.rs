//! Centralized tool and engine options with TOML preset support.
//!
//! Tool settings (filter thresholds, instrument parameters, toggles),
//! camera transition tuning, pipeline tuning and the star field are
//! consolidated here. Options serialize to/from TOML so presets can be
//! stored on disk and loaded at startup.

mod camera;
mod pipeline;
mod starfield;
mod tools;

use std::path::Path;

pub use camera::CameraOptions;
pub use pipeline::PipelineOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use starfield::StarFieldOptions;
pub use tools::{FilterThresholds, PipelineInputs, ScoringParams, ToolSettings};

use crate::error::ExovizError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[tools]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Filter thresholds, instrument parameters and toggles.
    pub tools: ToolSettings,
    /// View transition tuning.
    pub camera: CameraOptions,
    /// Background pipeline tuning.
    pub pipeline: PipelineOptions,
    /// Background star field.
    pub starfield: StarFieldOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ExovizError::Io`] if the file cannot be read, or
    /// [`ExovizError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, ExovizError> {
        let content = std::fs::read_to_string(path).map_err(ExovizError::Io)?;
        toml::from_str(&content)
            .map_err(|e| ExovizError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`ExovizError::OptionsParse`] if serialization fails, or
    /// [`ExovizError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ExovizError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ExovizError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ExovizError::Io)?;
        }
        std::fs::write(path, content).map_err(ExovizError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}
