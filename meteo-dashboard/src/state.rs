//! Application state - single source of truth
//!
//! Components receive `&AppState` as props; only the reducer mutates it.

use std::sync::Arc;

use meteo_core::grid::displayed_rows;
use meteo_core::{MapPayload, ModeRegistry, ProjectorConfig, SelectionState, WeatherMode};

use crate::config::DashboardConfig;

#[derive(Clone, Debug)]
pub struct AppState {
    /// Map path currently shown (or being fetched)
    pub path: String,

    /// Last payload (None = not yet fetched)
    pub payload: Option<Arc<MapPayload>>,

    pub is_loading: bool,

    /// Error message of the last fetch
    pub error: Option<String>,

    pub selection: SelectionState,

    pub modes: ModeRegistry,

    pub projector: ProjectorConfig,

    /// First grid row shown
    pub grid_scroll: usize,

    pub terminal_size: (u16, u16),
}

impl AppState {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            path: config.path.clone(),
            payload: None,
            is_loading: false,
            error: None,
            selection: SelectionState::new(config.selection.clone()),
            modes: config.mode_order.clone(),
            projector: config.projector.clone(),
            grid_scroll: 0,
            terminal_size: (80, 24),
        }
    }

    pub fn active_mode(&self) -> WeatherMode {
        self.selection.active_mode
    }

    /// Modes the picker offers, in configured order
    pub fn selectable_modes(&self) -> Vec<WeatherMode> {
        self.modes
            .modes()
            .iter()
            .copied()
            .filter(|m| self.selection.is_selectable(*m))
            .collect()
    }

    /// Number of grid rows for the active mode
    pub fn row_count(&self) -> usize {
        self.payload
            .as_ref()
            .map_or(0, |p| displayed_rows(&p.prevs, self.active_mode()).len())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&DashboardConfig::default())
    }
}
