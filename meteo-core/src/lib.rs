//! Projection core for weather-map dashboards
//!
//! Turns a forecast payload plus the user's selection into what a view
//! draws: one [`Marker`] per point of interest and a [`SeriesConfig`] for
//! the chart. Nothing here renders; view adapters consume these values.
//!
//! # Core Concepts
//!
//! - **WeatherMode**: which measurement is shown (`prev`, `vent`, `humi`, ...)
//! - **Projector**: forecast record + mode + bounding box → marker
//! - **Series**: mode → chart configuration, chroniques → chart series
//! - **Selection**: active mode and tooltip flag, changed through actions
//! - **Store**: reducer-based state container with change listeners
//!
//! # Example
//!
//! ```
//! use meteo_core::forecast::BoundingBox;
//! use meteo_core::testing::PoiBuilder;
//! use meteo_core::{project, Marker, ProjectorConfig, WeatherMode};
//!
//! let bbox = BoundingBox::new(47.2, -5.2, 48.9, -1.0);
//! let poi = PoiBuilder::new("Brest").at(-4.48, 48.39).wind(12.0, "NO").build();
//!
//! match project(&poi, WeatherMode::Vent, &bbox, &ProjectorConfig::default()) {
//!     Marker::Rendered(marker) => assert_eq!(marker.label.unwrap().plain_text(), "45"),
//!     Marker::Disabled => unreachable!(),
//! }
//! ```
//!
//! # Async data
//!
//! Fetching is the caller's business. The dashboard uses an
//! [`EffectStore`]: `DataFetch` returns a fetch effect, the main loop spawns
//! it and dispatches `DataDidLoad` / `DataDidError` with the outcome.

pub mod action;
pub mod config;
pub mod effect;
pub mod error;
pub mod forecast;
pub mod grid;
pub mod mode;
pub mod projector;
pub mod selection;
pub mod series;
pub mod store;
pub mod testing;

pub use action::Action;
pub use config::ProjectorConfig;
pub use effect::{DispatchResult, EffectReducer, EffectStore, EffectStoreWithMiddleware};
pub use error::{PayloadError, UnknownModeError};
pub use forecast::{BoundingBox, MapPayload, PoiForecast};
pub use mode::{ModeRegistry, WeatherMode};
pub use projector::{project, project_key, Label, Marker, MarkerDescriptor};
pub use selection::{SelectionAction, SelectionPolicy, SelectionState};
pub use series::{assemble, config_for, config_for_key, ChartSeries, SeriesConfig};
pub use store::{
    ListenerId, LoggingMiddleware, Middleware, NoopMiddleware, Reducer, Store,
    StoreWithMiddleware,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::Action;
    pub use crate::effect::{DispatchResult, EffectStore, EffectStoreWithMiddleware};
    pub use crate::mode::{ModeRegistry, WeatherMode};
    pub use crate::projector::{project, Marker};
    pub use crate::selection::{SelectionAction, SelectionState};
    pub use crate::store::{LoggingMiddleware, Middleware, Store};
}
