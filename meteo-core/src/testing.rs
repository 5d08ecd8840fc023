//! Test utilities
//!
//! - [`PoiBuilder`]: build point forecasts field by field
//! - [`TestHarness`]: state plus an action channel for checking emitted actions
//! - Assertion macros for verifying emitted actions
//!
//! # Example
//!
//! ```
//! use meteo_core::testing::PoiBuilder;
//!
//! let poi = PoiBuilder::new("Brest").at(-4.48, 48.39).temperature(18.6).build();
//! assert_eq!(poi.record.temperature, Some(18.6));
//! ```

use tokio::sync::mpsc;

use crate::forecast::{Coordinates, ForecastRecord, PoiForecast};
use crate::Action;

/// Builder for [`PoiForecast`] values in tests
#[derive(Debug, Clone)]
pub struct PoiBuilder {
    poi: PoiForecast,
}

impl PoiBuilder {
    /// A POI at (0, 0) with an empty record
    pub fn new(title: &str) -> Self {
        Self {
            poi: PoiForecast {
                title: title.to_string(),
                coords: Coordinates::new(0.0, 0.0),
                record: ForecastRecord::default(),
            },
        }
    }

    pub fn at(mut self, lng: f64, lat: f64) -> Self {
        self.poi.coords = Coordinates::new(lng, lat);
        self
    }

    pub fn temperature(mut self, t: f64) -> Self {
        self.poi.record.temperature = Some(t);
        self
    }

    /// Long-range min/max temperatures
    pub fn temperature_range(mut self, min: f64, max: f64) -> Self {
        self.poi.record.temperature_min = Some(min);
        self.poi.record.temperature_max = Some(max);
        self.poi.record.long_terme = true;
        self
    }

    pub fn windchill(mut self, t: f64) -> Self {
        self.poi.record.windchill = Some(t);
        self
    }

    pub fn wind(mut self, speed: f64, icon: &str) -> Self {
        self.poi.record.wind_speed = Some(speed);
        self.poi.record.wind_icon = Some(icon.to_string());
        self
    }

    pub fn gust(mut self, speed: f64) -> Self {
        self.poi.record.wind_speed_gust = Some(speed);
        self
    }

    pub fn uv(mut self, index: u32) -> Self {
        self.poi.record.uv_index = Some(index);
        self
    }

    pub fn pressure(mut self, hpa: f64) -> Self {
        self.poi.record.sea_pressure = Some(hpa);
        self
    }

    pub fn cloud_cover(mut self, percent: f64) -> Self {
        self.poi.record.cloud_cover = Some(percent);
        self
    }

    pub fn humidity(mut self, percent: f64) -> Self {
        self.poi.record.relative_humidity = Some(percent);
        self
    }

    pub fn humidity_range(mut self, min: f64, max: f64) -> Self {
        self.poi.record.relative_humidity_min = Some(min);
        self.poi.record.relative_humidity_max = Some(max);
        self
    }

    pub fn weather(mut self, icon: &str, description: &str) -> Self {
        self.poi.record.weather_icon = Some(icon.to_string());
        self.poi.record.weather_description = Some(description.to_string());
        self
    }

    pub fn build(self) -> PoiForecast {
        self.poi
    }
}

/// Generic test harness: state under test plus a channel of emitted actions
///
/// ```
/// use meteo_core::selection::{SelectionAction, SelectionState};
/// use meteo_core::testing::TestHarness;
///
/// let mut harness = TestHarness::<SelectionState, SelectionAction>::default();
/// harness.emit(SelectionAction::TooltipsToggle);
/// assert_eq!(harness.drain_emitted().len(), 1);
/// ```
pub struct TestHarness<S, A: Action> {
    /// The application state under test
    pub state: S,
    tx: mpsc::UnboundedSender<A>,
    rx: mpsc::UnboundedReceiver<A>,
}

impl<S, A: Action> TestHarness<S, A> {
    pub fn new(state: S) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { state, tx, rx }
    }

    /// Emit an action (simulates what a handler would do)
    pub fn emit(&self, action: A) {
        let _ = self.tx.send(action);
    }

    /// Drain all emitted actions from the channel
    pub fn drain_emitted(&mut self) -> Vec<A> {
        let mut actions = Vec::new();
        while let Ok(action) = self.rx.try_recv() {
            actions.push(action);
        }
        actions
    }

    /// Drain emitted actions of one category, leaving the others queued
    pub fn drain_category(&mut self, category: &str) -> Vec<A> {
        let (matching, rest): (Vec<A>, Vec<A>) = self
            .drain_emitted()
            .into_iter()
            .partition(|a| a.category() == Some(category));
        for action in rest {
            let _ = self.tx.send(action);
        }
        matching
    }
}

impl<S: Default, A: Action> Default for TestHarness<S, A> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

/// Assert that a specific action was emitted
///
/// ```ignore
/// let actions = harness.drain_emitted();
/// assert_emitted!(actions, Action::DataFetch);
/// ```
#[macro_export]
macro_rules! assert_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            $actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` to be emitted, but got: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Assert that a specific action was NOT emitted
#[macro_export]
macro_rules! assert_not_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            !$actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` NOT to be emitted, but it was: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Count how many actions match a pattern
#[macro_export]
macro_rules! count_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        $actions.iter().filter(|a| matches!(a, $pattern $(if $guard)?)).count()
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::WeatherMode;
    use crate::selection::SelectionAction;

    #[derive(Clone, Debug, PartialEq)]
    enum NavAction {
        Open(String),
        Back,
    }

    impl Action for NavAction {
        fn name(&self) -> &'static str {
            match self {
                NavAction::Open(_) => "Open",
                NavAction::Back => "Back",
            }
        }

        fn category(&self) -> Option<&'static str> {
            Some("nav")
        }
    }

    #[test]
    fn test_harness_emit_and_drain() {
        let mut harness = TestHarness::<(), NavAction>::new(());

        harness.emit(NavAction::Open("/bretagne".into()));
        harness.emit(NavAction::Back);

        let actions = harness.drain_emitted();
        assert_eq!(actions, vec![NavAction::Open("/bretagne".into()), NavAction::Back]);
        assert!(harness.drain_emitted().is_empty());
    }

    #[test]
    fn test_drain_category_keeps_others() {
        let mut harness = TestHarness::<(), SelectionAction>::new(());
        harness.emit(SelectionAction::TooltipsToggle);
        harness.emit(SelectionAction::ModeSelect(WeatherMode::Vent));

        assert_eq!(harness.drain_category("nav").len(), 0);
        assert_eq!(harness.drain_category("selection").len(), 2);
        assert!(harness.drain_emitted().is_empty());
    }

    #[test]
    fn test_assert_macros() {
        let actions = vec![NavAction::Open("/france".into()), NavAction::Back];

        assert_emitted!(actions, NavAction::Back);
        assert_emitted!(actions, NavAction::Open(p) if p == "/france");
        assert_not_emitted!(actions, NavAction::Open(p) if p == "/corse");

        assert_eq!(count_emitted!(actions, NavAction::Open(_)), 1);
    }

    #[test]
    fn test_poi_builder() {
        let poi = PoiBuilder::new("Lyon")
            .at(4.83, 45.76)
            .temperature_range(8.0, 19.0)
            .weather("p2j", "Éclaircies")
            .build();

        assert_eq!(poi.coords.lat, 45.76);
        assert!(poi.record.long_terme);
        assert_eq!(poi.record.weather_icon.as_deref(), Some("p2j"));
    }
}
