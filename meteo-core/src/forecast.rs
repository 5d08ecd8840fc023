//! Forecast data model, as served by `GET /{path}/data`

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PayloadError;

/// A `[lng, lat]` pair (GeoJSON order)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinates {
    pub lng: f64,
    pub lat: f64,
}

impl Coordinates {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}

impl From<[f64; 2]> for Coordinates {
    fn from([lng, lat]: [f64; 2]) -> Self {
        Self { lng, lat }
    }
}

impl From<Coordinates> for [f64; 2] {
    fn from(c: Coordinates) -> Self {
        [c.lng, c.lat]
    }
}

/// Geographic extent of a map
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    #[serde(rename = "s", alias = "south")]
    pub south: f64,
    #[serde(rename = "w", alias = "west")]
    pub west: f64,
    #[serde(rename = "n", alias = "north")]
    pub north: f64,
    #[serde(rename = "e", alias = "east")]
    pub east: f64,
}

impl BoundingBox {
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self {
            south,
            west,
            north,
            east,
        }
    }

    /// Latitude of the horizontal midline
    pub fn mid_lat(&self) -> f64 {
        (self.north + self.south) / 2.0
    }

    /// Longitude of the vertical midline
    pub fn mid_lng(&self) -> f64 {
        (self.west + self.east) / 2.0
    }

    /// Whether the box encloses a non-empty area
    pub fn has_area(&self) -> bool {
        self.north > self.south && self.east > self.west
    }
}

/// Icon codes come as strings or bare numbers depending on the upstream feed
#[derive(Deserialize)]
#[serde(untagged)]
enum CodeRepr {
    Text(String),
    Int(i64),
    Float(f64),
}

fn de_opt_code<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let code: Option<CodeRepr> = Option::deserialize(deserializer)?;
    Ok(code.map(|c| match c {
        CodeRepr::Text(s) => s,
        CodeRepr::Int(i) => i.to_string(),
        CodeRepr::Float(f) => f.to_string(),
    }))
}

/// Weather at one point of interest for one time offset
///
/// Every field is optional: short-range records carry instantaneous values,
/// long-range ("tendance") records carry daily min/max values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastRecord {
    #[serde(rename = "T")]
    pub temperature: Option<f64>,
    #[serde(rename = "T_min")]
    pub temperature_min: Option<f64>,
    #[serde(rename = "T_max")]
    pub temperature_max: Option<f64>,
    #[serde(rename = "T_windchill")]
    pub windchill: Option<f64>,

    /// m/s
    pub wind_speed: Option<f64>,
    /// m/s
    pub wind_speed_gust: Option<f64>,
    /// degrees
    pub wind_direction: Option<f64>,
    /// `-1` for variable wind
    #[serde(deserialize_with = "de_opt_code")]
    pub wind_icon: Option<String>,

    pub uv_index: Option<u32>,
    #[serde(rename = "P_sea")]
    pub sea_pressure: Option<f64>,
    #[serde(rename = "total_cloud_cover")]
    pub cloud_cover: Option<f64>,

    pub relative_humidity: Option<f64>,
    pub relative_humidity_min: Option<f64>,
    pub relative_humidity_max: Option<f64>,

    #[serde(deserialize_with = "de_opt_code")]
    pub weather_icon: Option<String>,
    pub weather_description: Option<String>,
    #[serde(rename = "weather_confidence_index")]
    pub confidence: Option<u8>,

    pub moment_day: Option<String>,
    /// Target time of this record
    pub time: Option<DateTime<Utc>>,
    /// Long-range record (min/max values instead of instantaneous ones)
    pub long_terme: bool,
}

/// A forecast record attached to its point of interest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoiForecast {
    #[serde(rename = "titre")]
    pub title: String,
    pub coords: Coordinates,
    #[serde(rename = "prev")]
    pub record: ForecastRecord,
}

/// All point forecasts for one map tile (one day and moment)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MomentMap {
    /// Target time ("échéance")
    pub echeance: Option<DateTime<Utc>>,
    /// Last update of the upstream data
    pub updated: Option<DateTime<Utc>>,
    /// Point forecasts keyed by POI identifier
    pub prevs: BTreeMap<String, PoiForecast>,
}

/// A row of the map grid: up to four moments, or a single long-range map
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DayRow {
    pub long_terme: bool,
    /// Missing moments (e.g. past hours) are `None`
    pub maps: Vec<Option<MomentMap>>,
}

/// One item of the navigation breadcrumb
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreadcrumbItem {
    #[serde(rename = "nom", alias = "label")]
    pub label: String,
    pub path: String,
}

/// GeoJSON geometry of a subzone; only polygons are drawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: serde_json::Value,
}

impl Geometry {
    /// Outer and inner rings of every polygon in this geometry
    pub fn rings(&self) -> Vec<Vec<Coordinates>> {
        let decoded = match self.kind.as_str() {
            "Polygon" => serde_json::from_value::<Vec<Vec<Coordinates>>>(self.coordinates.clone()),
            "MultiPolygon" => {
                serde_json::from_value::<Vec<Vec<Vec<Coordinates>>>>(self.coordinates.clone())
                    .map(|polys| polys.into_iter().flatten().collect())
            }
            other => {
                tracing::debug!(kind = other, "Skipping unsupported subzone geometry");
                return Vec::new();
            }
        };
        decoded.unwrap_or_else(|e| {
            tracing::debug!(kind = %self.kind, error = %e, "Skipping malformed subzone geometry");
            Vec::new()
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubzoneName {
    pub nom: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubzoneProperties {
    /// Dashboard path of the subzone's own map
    #[serde(rename = "customPath")]
    pub custom_path: String,
    pub prop0: SubzoneName,
}

/// A clickable sub-area of the map (e.g. a department inside a region)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subzone {
    #[serde(default)]
    pub properties: SubzoneProperties,
    pub geometry: Geometry,
}

/// One chart sample: `[ts, value]` or `[ts, min, max]`, `ts` in epoch milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeriesPoint {
    Range(i64, f64, f64),
    Value(i64, f64),
}

impl SeriesPoint {
    pub fn timestamp(&self) -> i64 {
        match self {
            SeriesPoint::Range(ts, _, _) | SeriesPoint::Value(ts, _) => *ts,
        }
    }
}

/// Time series of one measurement at one POI
pub type Chronique = Vec<SeriesPoint>;

/// Chart data: measurement name (`T`, `Trange`, `Hrel`, ...) → one chronique per POI
pub type Chroniques = BTreeMap<String, Vec<Chronique>>;

/// Full payload of `GET /{path}/data`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapPayload {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub breadcrumb: Vec<BreadcrumbItem>,
    #[serde(default)]
    pub idtech: String,
    #[serde(default)]
    pub taxonomy: String,
    pub bbox: BoundingBox,
    #[serde(default)]
    pub subzones: Option<Vec<Subzone>>,
    /// Day offset from today (negative for past days) → row
    #[serde(default)]
    pub prevs: BTreeMap<i32, DayRow>,
    #[serde(default)]
    pub chroniques: Option<Chroniques>,
}

impl MapPayload {
    /// Decode and validate a payload
    pub fn from_json(bytes: &[u8]) -> Result<Self, PayloadError> {
        let payload: MapPayload = serde_json::from_slice(bytes)?;
        if !payload.bbox.has_area() {
            return Err(PayloadError::EmptyBbox);
        }
        Ok(payload)
    }

    /// Number of distinct points of interest across all tiles
    pub fn poi_count(&self) -> usize {
        let mut ids: Vec<&str> = self
            .prevs
            .values()
            .flat_map(|row| row.maps.iter().flatten())
            .flat_map(|map| map.prevs.keys().map(String::as_str))
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids.len()
    }
}
