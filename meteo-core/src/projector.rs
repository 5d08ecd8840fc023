//! Forecast record + weather mode → marker
//!
//! [`project`] is pure and recomputed on every render. A record that lacks
//! the field the active mode needs yields [`Marker::Disabled`]; such markers
//! are never drawn.

use std::fmt::Write as _;

use crate::config::ProjectorConfig;
use crate::forecast::{BoundingBox, Coordinates, ForecastRecord, PoiForecast};
use crate::mode::WeatherMode;

/// Wind icon code meaning "no dominant direction"
const VARIABLE_WIND_CODE: &str = "-1";
const VARIABLE_WIND_ICON: &str = "Variable";

/// Result of projecting one POI
#[derive(Debug, Clone, PartialEq)]
pub enum Marker {
    Disabled,
    Rendered(MarkerDescriptor),
}

impl Marker {
    pub fn is_disabled(&self) -> bool {
        matches!(self, Marker::Disabled)
    }

    pub fn descriptor(&self) -> Option<&MarkerDescriptor> {
        match self {
            Marker::Disabled => None,
            Marker::Rendered(d) => Some(d),
        }
    }
}

/// Everything a view needs to draw a marker and its tooltip
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerDescriptor {
    pub title: String,
    pub coords: Coordinates,
    pub icon: Option<String>,
    pub icon_width: u16,
    pub description: Option<String>,
    /// `None` when the label was suppressed
    pub label: Option<Label>,
    pub label_style: LabelStyle,
    pub tooltip: TooltipPlacement,
    /// Rounded daily minimum for the tooltip body
    pub t_min: Option<i64>,
    /// Rounded daily maximum for the tooltip body
    pub t_max: Option<i64>,
}

impl MarkerDescriptor {
    /// Resource path of the icon picture
    pub fn icon_path(&self) -> Option<String> {
        self.icon.as_ref().map(|icon| format!("/pictos/{icon}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelStyle {
    #[default]
    Normal,
    /// Two-part min/max text, drawn smaller
    Condensed,
}

/// Semantic color of a label segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    TempMin,
    TempMax,
    GustWarning,
    ColdFeel,
    HumidityMin,
    HumidityMax,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSegment {
    pub text: String,
    pub tone: Tone,
}

impl LabelSegment {
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Tone::Plain)
    }
}

/// Marker text as a sequence of toned segments
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Label {
    pub segments: Vec<LabelSegment>,
}

impl Label {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            segments: vec![LabelSegment::plain(text)],
        }
    }

    pub fn toned(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            segments: vec![LabelSegment::new(text, tone)],
        }
    }

    /// Two values joined by a plain `/`
    fn pair(min: String, min_tone: Tone, max: String, max_tone: Tone) -> Self {
        Self {
            segments: vec![
                LabelSegment::new(min, min_tone),
                LabelSegment::plain("/"),
                LabelSegment::new(max, max_tone),
            ],
        }
    }

    pub fn push(&mut self, segment: LabelSegment) {
        self.segments.push(segment);
    }

    /// Concatenated segment text, without styling
    pub fn plain_text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    /// HTML fragment for browser views
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        for segment in &self.segments {
            let text = escape_html(&segment.text);
            let _ = match segment.tone {
                Tone::Plain => write!(html, "<span>{text}</span>"),
                Tone::TempMin => write!(html, r#"<span class="tmin">{text}</span>"#),
                Tone::TempMax => write!(html, r#"<span class="tmax">{text}</span>"#),
                Tone::HumidityMin => write!(html, r#"<span class="hr_min">{text}</span>"#),
                Tone::HumidityMax => write!(html, r#"<span class="hr_max">{text}</span>"#),
                Tone::GustWarning => write!(html, r#"<span style="color: red;">{text}</span>"#),
                Tone::ColdFeel => write!(html, r#"<span style="color: brown;">{text}</span>"#),
            };
        }
        html
    }

    /// Empty text and the `NaN°` arithmetic sentinel are not worth drawing
    fn is_degenerate(&self) -> bool {
        let text = self.plain_text();
        text.is_empty() || text == "NaN°"
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TooltipDirection {
    Top,
    Bottom,
}

/// Where the tooltip opens relative to its marker, offsets in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TooltipPlacement {
    pub direction: TooltipDirection,
    pub offset_x: i32,
    pub offset_y: i32,
}

impl TooltipPlacement {
    /// Open towards the center of the map so tooltips stay inside it
    pub fn for_position(coords: Coordinates, bbox: &BoundingBox) -> Self {
        let (direction, offset_y) = if coords.lat < bbox.mid_lat() {
            (TooltipDirection::Top, -30)
        } else {
            (TooltipDirection::Bottom, 10)
        };
        let offset_x = if coords.lng < bbox.mid_lng() { 100 } else { -100 };
        Self {
            direction,
            offset_x,
            offset_y,
        }
    }
}

/// Half-up rounding; NaN stays NaN
fn round_half_up(v: f64) -> f64 {
    // adding 0.0 turns -0.0 into 0.0
    (v + 0.5).floor() + 0.0
}

fn fmt_rounded(v: f64) -> String {
    format!("{:.0}", round_half_up(v))
}

/// m/s → km/h, rounded up to a multiple of 5
fn km_per_hour(meters_per_second: f64) -> String {
    format!("{:.0}", 5.0 * (3.6 * meters_per_second / 5.0).ceil() + 0.0)
}

/// Instantaneous value of a record; long-range records carry a meaningless
/// zero there and only their min/max values count
fn instant(record: &ForecastRecord, value: Option<f64>) -> Option<f64> {
    value.filter(|_| !record.long_terme)
}

/// Temperature label and style before any mode override
fn base_temperature(record: &ForecastRecord) -> Option<(Label, LabelStyle)> {
    if let Some(t) = instant(record, record.temperature) {
        return Some((Label::plain(format!("{}°", fmt_rounded(t))), LabelStyle::Normal));
    }
    match (record.temperature_min, record.temperature_max) {
        (Some(min), Some(max)) => Some((
            Label::pair(
                format!("{}°", fmt_rounded(min)),
                Tone::TempMin,
                format!("{}°", fmt_rounded(max)),
                Tone::TempMax,
            ),
            LabelStyle::Condensed,
        )),
        _ => None,
    }
}

/// Project a POI for the given mode
pub fn project(
    poi: &PoiForecast,
    mode: WeatherMode,
    bbox: &BoundingBox,
    config: &ProjectorConfig,
) -> Marker {
    let record = &poi.record;
    let base = base_temperature(record);

    let mut icon = record.weather_icon.clone();
    let mut icon_width = config.default_icon_width;

    let (label, label_style) = match mode {
        WeatherMode::Prev => match base {
            Some(base) => base,
            None => return Marker::Disabled,
        },
        WeatherMode::Vent => {
            let Some(speed) = record.wind_speed else {
                return Marker::Disabled;
            };
            icon = record.wind_icon.as_deref().map(|code| {
                if code == VARIABLE_WIND_CODE {
                    VARIABLE_WIND_ICON.to_string()
                } else {
                    code.to_string()
                }
            });
            icon_width = config.wind_icon_width;

            let mut label = Label::plain(km_per_hour(speed));
            if let Some(gust) = record
                .wind_speed_gust
                .filter(|g| *g >= config.gust_threshold)
            {
                label.push(LabelSegment::new(
                    format!("|{}", km_per_hour(gust)),
                    Tone::GustWarning,
                ));
            }
            (label, LabelStyle::Normal)
        }
        WeatherMode::Uv => {
            let Some(index) = record.uv_index else {
                return Marker::Disabled;
            };
            icon = Some(format!("UV_{index}"));
            (Label::plain(format!("indice UV {index}")), LabelStyle::Normal)
        }
        WeatherMode::Ress => {
            let Some(chill) = record.windchill else {
                return Marker::Disabled;
            };
            (Label::toned(fmt_rounded(chill), Tone::ColdFeel), LabelStyle::Normal)
        }
        WeatherMode::Psea => {
            let Some(pressure) = record.sea_pressure else {
                return Marker::Disabled;
            };
            (Label::plain(fmt_rounded(pressure)), LabelStyle::Normal)
        }
        WeatherMode::Cloud => {
            let Some(cover) = record.cloud_cover else {
                return Marker::Disabled;
            };
            (Label::plain(format!("{}%", fmt_rounded(cover))), LabelStyle::Normal)
        }
        WeatherMode::Humi => {
            if let Some(rh) = instant(record, record.relative_humidity) {
                (Label::plain(format!("{}%", fmt_rounded(rh))), LabelStyle::Normal)
            } else if let (Some(min), Some(max)) =
                (record.relative_humidity_min, record.relative_humidity_max)
            {
                (
                    Label::pair(
                        format!("{}%", fmt_rounded(min)),
                        Tone::HumidityMin,
                        format!("{}%", fmt_rounded(max)),
                        Tone::HumidityMax,
                    ),
                    LabelStyle::Condensed,
                )
            } else {
                return Marker::Disabled;
            }
        }
    };

    let label = (!label.is_degenerate()).then_some(label);

    Marker::Rendered(MarkerDescriptor {
        title: poi.title.clone(),
        coords: poi.coords,
        icon,
        icon_width,
        description: record.weather_description.clone(),
        label,
        label_style,
        tooltip: TooltipPlacement::for_position(poi.coords, bbox),
        t_min: record.temperature_min.and_then(rounded_int),
        t_max: record.temperature_max.and_then(rounded_int),
    })
}

fn rounded_int(v: f64) -> Option<i64> {
    let r = round_half_up(v);
    r.is_finite().then_some(r as i64)
}

/// Project a POI for an untyped mode key
///
/// Unknown keys are logged and give a disabled marker.
pub fn project_key(
    poi: &PoiForecast,
    key: &str,
    bbox: &BoundingBox,
    config: &ProjectorConfig,
) -> Marker {
    match key.parse::<WeatherMode>() {
        Ok(mode) => project(poi, mode, bbox, config),
        Err(err) => {
            tracing::warn!(mode = key, error = %err, "Unrecognized weather mode");
            Marker::Disabled
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::PoiBuilder;

    fn bbox() -> BoundingBox {
        BoundingBox::new(42.0, -5.0, 51.0, 8.0)
    }

    fn rendered(marker: Marker) -> MarkerDescriptor {
        match marker {
            Marker::Rendered(d) => d,
            Marker::Disabled => panic!("expected a rendered marker"),
        }
    }

    fn label_text(d: &MarkerDescriptor) -> String {
        d.label.as_ref().map(Label::plain_text).unwrap_or_default()
    }

    fn run(poi: &PoiForecast, mode: WeatherMode) -> Marker {
        project(poi, mode, &bbox(), &ProjectorConfig::default())
    }

    #[test]
    fn test_prev_instant_temperature() {
        for (t, expected) in [(18.6, "19°"), (18.5, "19°"), (-2.5, "-2°"), (-0.4, "0°"), (0.0, "0°")] {
            let poi = PoiBuilder::new("Brest").temperature(t).build();
            let d = rendered(run(&poi, WeatherMode::Prev));
            assert_eq!(label_text(&d), expected, "T = {t}");
            assert_eq!(d.label_style, LabelStyle::Normal);
        }
    }

    #[test]
    fn test_prev_min_max_fallback() {
        let poi = PoiBuilder::new("Lyon").temperature_range(7.6, 21.2).build();
        let d = rendered(run(&poi, WeatherMode::Prev));

        assert_eq!(label_text(&d), "8°/21°");
        assert_eq!(d.label_style, LabelStyle::Condensed);
        let tones: Vec<Tone> = d.label.unwrap().segments.iter().map(|s| s.tone).collect();
        assert_eq!(tones, vec![Tone::TempMin, Tone::Plain, Tone::TempMax]);
        assert_eq!((d.t_min, d.t_max), (Some(8), Some(21)));
    }

    #[test]
    fn test_prev_without_temperature_is_disabled() {
        let poi = PoiBuilder::new("Nice").humidity(60.0).build();
        assert!(run(&poi, WeatherMode::Prev).is_disabled());

        // min alone is not enough
        let mut poi = PoiBuilder::new("Nice").build();
        poi.record.temperature_min = Some(4.0);
        assert!(run(&poi, WeatherMode::Prev).is_disabled());
    }

    #[test]
    fn test_vent_without_speed_is_disabled() {
        let poi = PoiBuilder::new("Brest").temperature(12.0).gust(20.0).build();
        assert!(run(&poi, WeatherMode::Vent).is_disabled());
    }

    #[test]
    fn test_vent_rounds_up_and_appends_gust() {
        let poi = PoiBuilder::new("Brest").wind(12.0, "NO").gust(15.0).build();
        let d = rendered(run(&poi, WeatherMode::Vent));

        assert_eq!(label_text(&d), "45|55");
        let segments = d.label.unwrap().segments;
        assert_eq!(segments[1].tone, Tone::GustWarning);
        assert_eq!(d.icon.as_deref(), Some("NO"));
        assert_eq!(d.icon_width, 25);
    }

    #[test]
    fn test_vent_gust_below_threshold() {
        let poi = PoiBuilder::new("Brest").wind(3.0, "S").gust(9.9).build();
        let d = rendered(run(&poi, WeatherMode::Vent));
        assert_eq!(label_text(&d), "15");

        let cfg = ProjectorConfig {
            gust_threshold: 9.0,
            ..ProjectorConfig::default()
        };
        let d = rendered(project(&poi, WeatherMode::Vent, &bbox(), &cfg));
        assert_eq!(label_text(&d), "15|40");
    }

    #[test]
    fn test_vent_variable_icon() {
        let poi = PoiBuilder::new("Paris").wind(0.0, "-1").build();
        let d = rendered(run(&poi, WeatherMode::Vent));
        assert_eq!(d.icon.as_deref(), Some("Variable"));
        assert_eq!(label_text(&d), "0");
        assert_eq!(d.icon_path().as_deref(), Some("/pictos/Variable"));
    }

    #[test]
    fn test_uv() {
        let poi = PoiBuilder::new("Ajaccio").uv(7).build();
        let d = rendered(run(&poi, WeatherMode::Uv));
        assert_eq!(d.icon.as_deref(), Some("UV_7"));
        assert_eq!(label_text(&d), "indice UV 7");

        let poi = PoiBuilder::new("Ajaccio").temperature(20.0).build();
        assert!(run(&poi, WeatherMode::Uv).is_disabled());
    }

    #[test]
    fn test_ress_cold_feel() {
        let poi = PoiBuilder::new("Lille").temperature(3.0).windchill(-3.6).build();
        let d = rendered(run(&poi, WeatherMode::Ress));
        assert_eq!(d.label, Some(Label::toned("-4", Tone::ColdFeel)));

        let poi = PoiBuilder::new("Lille").temperature(3.0).build();
        assert!(run(&poi, WeatherMode::Ress).is_disabled());
    }

    #[test]
    fn test_psea_and_cloud() {
        let poi = PoiBuilder::new("Caen").pressure(1013.6).cloud_cover(85.0).build();
        assert_eq!(label_text(&rendered(run(&poi, WeatherMode::Psea))), "1014");
        assert_eq!(label_text(&rendered(run(&poi, WeatherMode::Cloud))), "85%");

        let empty = PoiBuilder::new("Caen").build();
        assert!(run(&empty, WeatherMode::Psea).is_disabled());
        assert!(run(&empty, WeatherMode::Cloud).is_disabled());
    }

    #[test]
    fn test_humi_chain() {
        let poi = PoiBuilder::new("Pau").humidity(66.5).build();
        let d = rendered(run(&poi, WeatherMode::Humi));
        assert_eq!(label_text(&d), "67%");

        let poi = PoiBuilder::new("Pau").humidity_range(40.0, 92.0).build();
        let d = rendered(run(&poi, WeatherMode::Humi));
        assert_eq!(label_text(&d), "40%/92%");
        assert_eq!(d.label_style, LabelStyle::Condensed);

        let poi = PoiBuilder::new("Pau").temperature(10.0).build();
        assert!(run(&poi, WeatherMode::Humi).is_disabled());
    }

    #[test]
    fn test_long_range_ignores_zero_instant_values() {
        // the server fills instantaneous fields with zeros on long-range records
        let poi: PoiForecast = serde_json::from_str(
            r#"{"titre": "Lyon", "coords": [4.84, 45.76], "prev": {
                "T": 0, "relative_humidity": 0,
                "T_min": 5.4, "T_max": 17.8,
                "relative_humidity_min": 40, "relative_humidity_max": 90,
                "weather_icon": "p2j", "long_terme": true
            }}"#,
        )
        .unwrap();

        let d = rendered(run(&poi, WeatherMode::Prev));
        assert_eq!(label_text(&d), "5°/18°");
        assert_eq!(d.label_style, LabelStyle::Condensed);

        let d = rendered(run(&poi, WeatherMode::Humi));
        assert_eq!(label_text(&d), "40%/90%");
        assert_eq!(d.label_style, LabelStyle::Condensed);
    }

    #[test]
    fn test_nan_label_is_suppressed_not_disabled() {
        let poi = PoiBuilder::new("Metz").temperature(f64::NAN).build();
        let d = rendered(run(&poi, WeatherMode::Prev));
        assert!(d.label.is_none());
    }

    #[test]
    fn test_tooltip_placement() {
        // south-west quarter
        let poi = PoiBuilder::new("Biarritz").at(-1.5, 43.5).temperature(20.0).build();
        let d = rendered(run(&poi, WeatherMode::Prev));
        assert_eq!(
            d.tooltip,
            TooltipPlacement {
                direction: TooltipDirection::Top,
                offset_x: 100,
                offset_y: -30
            }
        );

        // north-east quarter
        let poi = PoiBuilder::new("Strasbourg").at(7.7, 48.6).temperature(20.0).build();
        let d = rendered(run(&poi, WeatherMode::Prev));
        assert_eq!(d.tooltip.direction, TooltipDirection::Bottom);
        assert_eq!((d.tooltip.offset_x, d.tooltip.offset_y), (-100, 10));
    }

    #[test]
    fn test_tooltip_midpoint_is_bottom() {
        let b = bbox();
        let poi = PoiBuilder::new("Centre")
            .at(b.mid_lng(), b.mid_lat())
            .temperature(15.0)
            .build();
        let d = rendered(run(&poi, WeatherMode::Prev));
        assert_eq!(d.tooltip.direction, TooltipDirection::Bottom);
        assert_eq!(d.tooltip.offset_x, -100);
    }

    #[test]
    fn test_project_unknown_key() {
        let poi = PoiBuilder::new("Tours").temperature(15.0).build();
        let cfg = ProjectorConfig::default();
        assert!(project_key(&poi, "neige", &bbox(), &cfg).is_disabled());
        assert!(!project_key(&poi, "prev", &bbox(), &cfg).is_disabled());
    }

    #[test]
    fn test_label_html() {
        let poi = PoiBuilder::new("Brest").wind(12.0, "NO").gust(15.0).build();
        let d = rendered(run(&poi, WeatherMode::Vent));
        assert_eq!(
            d.label.unwrap().to_html(),
            r#"<span>45</span><span style="color: red;">|55</span>"#
        );
    }
}
