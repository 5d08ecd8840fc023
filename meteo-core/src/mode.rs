//! Weather modes and their display catalog

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownModeError;

/// Which measurement the dashboard is currently showing
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum WeatherMode {
    /// Forecast temperature and weather icon
    #[default]
    Prev,
    /// Wind speed, gusts and direction
    Vent,
    /// Windchill ("ressenti")
    Ress,
    /// Relative humidity
    Humi,
    /// Sea-level pressure
    Psea,
    /// UV index
    Uv,
    /// Total cloud cover
    Cloud,
}

impl WeatherMode {
    /// Every mode, in catalog order
    pub const ALL: [WeatherMode; 7] = [
        WeatherMode::Prev,
        WeatherMode::Vent,
        WeatherMode::Ress,
        WeatherMode::Humi,
        WeatherMode::Psea,
        WeatherMode::Uv,
        WeatherMode::Cloud,
    ];

    /// Wire key, as used in URLs and configuration
    pub fn key(&self) -> &'static str {
        match self {
            WeatherMode::Prev => "prev",
            WeatherMode::Vent => "vent",
            WeatherMode::Ress => "ress",
            WeatherMode::Humi => "humi",
            WeatherMode::Psea => "psea",
            WeatherMode::Uv => "uv",
            WeatherMode::Cloud => "cloud",
        }
    }

    /// Label shown in the weather picker and row titles
    pub fn label(&self) -> &'static str {
        match self {
            WeatherMode::Prev => "Prévisions",
            WeatherMode::Vent => "Vent",
            WeatherMode::Ress => "Ressenti",
            WeatherMode::Humi => "Humidité",
            WeatherMode::Psea => "Pression",
            WeatherMode::Uv => "UV",
            WeatherMode::Cloud => "Nuages",
        }
    }

    /// Whether long-range (min/max) rows are shown for this mode
    pub fn supports_tendency(&self) -> bool {
        matches!(self, WeatherMode::Prev | WeatherMode::Humi | WeatherMode::Uv)
    }
}

impl fmt::Display for WeatherMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for WeatherMode {
    type Err = UnknownModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WeatherMode::ALL
            .into_iter()
            .find(|mode| mode.key() == s)
            .ok_or_else(|| UnknownModeError(s.to_string()))
    }
}

/// Ordered catalog of the modes offered by the weather picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModeRegistry {
    order: Vec<WeatherMode>,
}

impl ModeRegistry {
    /// Catalog with a custom display order
    ///
    /// Duplicates are dropped, keeping the first occurrence.
    pub fn new(order: impl IntoIterator<Item = WeatherMode>) -> Self {
        let mut unique: Vec<WeatherMode> = Vec::new();
        for mode in order {
            if !unique.contains(&mode) {
                unique.push(mode);
            }
        }
        Self { order: unique }
    }

    /// Modes in display order
    pub fn modes(&self) -> &[WeatherMode] {
        &self.order
    }

    /// Resolve a mode key
    pub fn lookup(&self, key: &str) -> Result<WeatherMode, UnknownModeError> {
        key.parse()
    }

    /// Display label for a mode key
    pub fn label(&self, key: &str) -> Result<&'static str, UnknownModeError> {
        self.lookup(key).map(|mode| mode.label())
    }

    /// Whether a mode key supports the tendency view
    pub fn supports_tendency(&self, key: &str) -> Result<bool, UnknownModeError> {
        self.lookup(key).map(|mode| mode.supports_tendency())
    }

    /// Position of a mode in the display order
    pub fn position(&self, mode: WeatherMode) -> Option<usize> {
        self.order.iter().position(|m| *m == mode)
    }

    /// Mode following `mode` in display order, wrapping around
    pub fn next(&self, mode: WeatherMode) -> Option<WeatherMode> {
        let idx = self.position(mode).map_or(0, |i| (i + 1) % self.order.len());
        self.order.get(idx).copied()
    }

    /// Mode preceding `mode` in display order, wrapping around
    pub fn previous(&self, mode: WeatherMode) -> Option<WeatherMode> {
        let len = self.order.len();
        let idx = self.position(mode).map_or(0, |i| (i + len - 1) % len.max(1));
        self.order.get(idx).copied()
    }
}

impl Default for ModeRegistry {
    fn default() -> Self {
        Self::new([
            WeatherMode::Prev,
            WeatherMode::Vent,
            WeatherMode::Ress,
            WeatherMode::Humi,
            WeatherMode::Psea,
            WeatherMode::Cloud,
        ])
    }
}
