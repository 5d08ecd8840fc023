//! Tunable constants of the projection core
//!
//! Both structs deserialize with defaults for missing fields so they can be
//! embedded in an application config file.

use serde::{Deserialize, Serialize};

pub use crate::selection::SelectionPolicy;

/// Constants used by [`project`](crate::projector::project)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectorConfig {
    /// Gusts at or above this speed get a warning segment, in record units (m/s)
    pub gust_threshold: f64,
    /// Icon width for every mode but wind
    pub default_icon_width: u16,
    /// Wind arrows are drawn narrower
    pub wind_icon_width: u16,
}

impl Default for ProjectorConfig {
    fn default() -> Self {
        Self {
            gust_threshold: 10.0,
            default_icon_width: 40,
            wind_icon_width: 25,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let cfg: ProjectorConfig = serde_json::from_str(r#"{"gust_threshold": 11.1}"#).unwrap();
        assert_eq!(cfg.gust_threshold, 11.1);
        assert_eq!(cfg.default_icon_width, 40);
        assert_eq!(cfg.wind_icon_width, 25);
    }
}
