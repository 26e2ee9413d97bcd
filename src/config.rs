//! Generator configuration.
//!
//! Read from an optional `elements-codegen.toml` in the base directory.
//! Every key has a default matching the Shoelace element library.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GenError, Result};

pub const CONFIG_FILE: &str = "elements-codegen.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Manifest location, relative to the base directory.
    pub manifest: PathBuf,
    /// Stripped from tag names to form artifact file names.
    pub tag_prefix: String,
    /// Stripped from shared event identifiers when aliasing them per component.
    pub event_prefix: String,
    /// Module specifier the element classes are imported from.
    pub element_package: String,
    /// Generic event type declared by the support module.
    pub event_base_type: String,
    pub components_dir: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            manifest: PathBuf::from(
                "node_modules/@shoelace-style/shoelace/dist/custom-elements.json",
            ),
            tag_prefix: "sl-".to_string(),
            event_prefix: "Sl".to_string(),
            element_package: "@shoelace-style/shoelace/dist".to_string(),
            event_base_type: "ShoelaceEvent".to_string(),
            components_dir: "components".to_string(),
        }
    }
}

impl GeneratorConfig {
    pub fn load(base_dir: &Path) -> Result<Self> {
        let path = base_dir.join(CONFIG_FILE);
        if !path.exists() {
            debug!("No {} found, using defaults", CONFIG_FILE);
            return Ok(Self::default());
        }

        let text = fs::read_to_string(&path).map_err(|e| GenError::fs(&path, e))?;
        Self::from_toml(&text).map_err(|e| GenError::Config {
            path,
            message: e.to_string(),
        })
    }

    pub fn from_toml(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn manifest_path(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.manifest)
    }
}
