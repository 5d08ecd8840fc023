//! Terminal weather-map dashboard
//!
//! 1. Event (keyboard, resize) -> `Component::handle_event` -> actions
//! 2. Actions dispatched to an `EffectStore`
//! 3. Reducer updates state and returns effects (the data fetch)
//! 4. The main loop spawns effects and feeds results back as actions
//! 5. If state changed, re-render: markers and chart series are recomputed

pub mod action;
pub mod api;
pub mod component;
pub mod components;
pub mod config;
pub mod effect;
pub mod event;
pub mod reducer;
pub mod state;
pub mod testing;
