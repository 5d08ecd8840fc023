//! Chart configuration per weather mode, and series assembly from chroniques

use std::collections::BTreeMap;

use crate::forecast::{Chronique, Chroniques};
use crate::mode::WeatherMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesColor {
    Solid(Rgb),
    /// Vertical gradient, top color first
    Gradient { top: Rgb, bottom: Rgb },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderKind {
    #[default]
    Line,
    /// Min/max band
    AreaRange,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStyle {
    pub kind: RenderKind,
    pub line_width: u8,
    pub color: SeriesColor,
    /// Fill opacity, area ranges only
    pub opacity: Option<f32>,
    /// Drawing order, higher on top
    pub z_index: Option<i32>,
}

impl SeriesStyle {
    fn line(color: Rgb) -> Self {
        Self {
            kind: RenderKind::Line,
            line_width: 1,
            color: SeriesColor::Solid(color),
            opacity: None,
            z_index: None,
        }
    }

    fn z(mut self, z_index: i32) -> Self {
        self.z_index = Some(z_index);
        self
    }

    fn band(top: Rgb, bottom: Rgb) -> Self {
        Self {
            kind: RenderKind::AreaRange,
            line_width: 1,
            color: SeriesColor::Gradient { top, bottom },
            opacity: Some(0.1),
            z_index: Some(40),
        }
    }
}

/// Title, axis label and styled series keys of a chart
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SeriesConfig {
    pub title: String,
    pub y_axis_label: String,
    pub series: BTreeMap<String, SeriesStyle>,
}

impl SeriesConfig {
    fn new<const N: usize>(title: &str, y_axis_label: &str, series: [(&str, SeriesStyle); N]) -> Self {
        Self {
            title: title.to_string(),
            y_axis_label: y_axis_label.to_string(),
            series: series
                .into_iter()
                .map(|(key, style)| (key.to_string(), style))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

const DARK_GREEN: Rgb = Rgb(0x0f, 0x1f, 0x0f);

pub fn config_for(mode: WeatherMode) -> SeriesConfig {
    match mode {
        WeatherMode::Prev | WeatherMode::Vent | WeatherMode::Uv => SeriesConfig::new(
            "Température",
            "°C",
            [
                ("T", SeriesStyle::line(DARK_GREEN).z(50)),
                ("Trange", SeriesStyle::band(Rgb(0xFF, 0x50, 0x10), Rgb(0x10, 0x60, 0xFF))),
            ],
        ),
        WeatherMode::Ress => SeriesConfig::new(
            "Température ressentie",
            "°chill",
            [("Ress", SeriesStyle::line(Rgb(0x44, 0x44, 0x44)))],
        ),
        WeatherMode::Humi => SeriesConfig::new(
            "Humidité relative",
            "%",
            [
                ("Hrel", SeriesStyle::line(DARK_GREEN).z(50)),
                ("Hrange", SeriesStyle::band(Rgb(0x11, 0xDD, 0x11), Rgb(0xFF, 0xDD, 0x33))),
            ],
        ),
        WeatherMode::Psea => SeriesConfig::new(
            "Pression au niveau de la mer",
            "hPa",
            [("Psea", SeriesStyle::line(Rgb(0x22, 0x22, 0x22)))],
        ),
        WeatherMode::Cloud => SeriesConfig::new(
            "Couverture nuageuse",
            "%",
            [("Cloud", SeriesStyle::line(Rgb(0x22, 0x22, 0x22)))],
        ),
    }
}

/// Config for an untyped mode key; unknown keys get an empty config
pub fn config_for_key(key: &str) -> SeriesConfig {
    match key.parse::<WeatherMode>() {
        Ok(mode) => config_for(mode),
        Err(_) => {
            tracing::debug!(mode = key, "No chart configuration for mode");
            SeriesConfig::default()
        }
    }
}

/// One drawable series: a chronique with its own copy of the style
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub key: String,
    pub style: SeriesStyle,
    pub data: Chronique,
}

/// Build one series per (configured key × chronique of that key)
///
/// Keys missing from `chroniques` are skipped.
pub fn assemble(config: &SeriesConfig, chroniques: &Chroniques) -> Vec<ChartSeries> {
    config
        .series
        .iter()
        .filter_map(|(key, style)| chroniques.get(key).map(|list| (key, style, list)))
        .flat_map(|(key, style, list)| {
            list.iter().map(move |data| ChartSeries {
                key: key.clone(),
                style: *style,
                data: data.clone(),
            })
        })
        .collect()
}
