//! Dashboard actions
//!
//! Naming convention: the prefix is the category (`DataFetch`,
//! `DataDidLoad` → "data"), `Did` marks the result of async work.

use std::sync::Arc;

use meteo_core::{MapPayload, SelectionAction};

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    // ===== Data category =====
    /// Intent: fetch the payload of the current path
    DataFetch,

    /// Result: payload of `path` decoded
    DataDidLoad {
        path: String,
        payload: Arc<MapPayload>,
    },

    /// Result: request or decoding for `path` failed
    DataDidError { path: String, error: String },

    // ===== Navigation =====
    /// Switch to another map path (breadcrumb entry) and fetch it
    NavigateTo(String),

    // ===== Selection =====
    Selection(SelectionAction),

    // ===== UI category =====
    UiTerminalResize(u16, u16),

    /// Scroll the map grid by this many rows
    UiGridScroll(i16),

    Quit,
}

impl meteo_core::Action for Action {
    fn name(&self) -> &'static str {
        match self {
            Action::DataFetch => "DataFetch",
            Action::DataDidLoad { .. } => "DataDidLoad",
            Action::DataDidError { .. } => "DataDidError",
            Action::NavigateTo(_) => "NavigateTo",
            Action::Selection(inner) => inner.name(),
            Action::UiTerminalResize(..) => "UiTerminalResize",
            Action::UiGridScroll(_) => "UiGridScroll",
            Action::Quit => "Quit",
        }
    }

    fn category(&self) -> Option<&'static str> {
        match self {
            Action::DataFetch | Action::DataDidLoad { .. } | Action::DataDidError { .. } => {
                Some("data")
            }
            Action::NavigateTo(_) => Some("nav"),
            Action::Selection(inner) => inner.category(),
            Action::UiTerminalResize(..) | Action::UiGridScroll(_) => Some("ui"),
            Action::Quit => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meteo_core::{Action as _, WeatherMode};

    #[test]
    fn test_categories() {
        assert_eq!(Action::DataFetch.category(), Some("data"));
        assert_eq!(
            Action::Selection(SelectionAction::ModeSelect(WeatherMode::Vent)).category(),
            Some("selection")
        );
        assert_eq!(Action::UiGridScroll(1).category(), Some("ui"));
        assert_eq!(Action::Quit.category(), None);
    }
}
