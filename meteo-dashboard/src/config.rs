//! Dashboard configuration, stored as TOML in the platform config directory

use std::path::Path;

use meteo_core::{ModeRegistry, ProjectorConfig, SelectionPolicy};
use serde::{Deserialize, Serialize};

const APP_NAME: &str = "meteo-dashboard";
const CONFIG_NAME: &str = "config";

/// Tooltips need room for POI names; below this many columns they are hidden
pub const DEFAULT_TOOLTIPS_MIN_COLUMNS: u32 = 120;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Server serving `/{path}/data`
    pub base_url: String,
    /// Map shown at startup
    pub path: String,
    /// Weather picker order
    pub mode_order: ModeRegistry,
    pub projector: ProjectorConfig,
    pub selection: SelectionPolicy,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            path: "france".to_string(),
            mode_order: ModeRegistry::default(),
            projector: ProjectorConfig::default(),
            selection: SelectionPolicy {
                tooltips_min_width: DEFAULT_TOOLTIPS_MIN_COLUMNS,
                ..SelectionPolicy::default()
            },
        }
    }
}

impl DashboardConfig {
    /// Load from `path`, or from the platform location when `None`
    ///
    /// A missing file is created with the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, confy::ConfyError> {
        match path {
            Some(path) => confy::load_path(path),
            None => confy::load(APP_NAME, CONFIG_NAME),
        }
    }

    pub fn config_path() -> Result<std::path::PathBuf, confy::ConfyError> {
        confy::get_configuration_file_path(APP_NAME, CONFIG_NAME)
    }
}
