//! Reducer - (state, action) -> changed flag + effects
//!
//! All state mutations happen here. Selection actions are delegated to the
//! core selection reducer; the fetch is returned as an effect.

use meteo_core::{selection, DispatchResult, SelectionAction};

use crate::action::Action;
use crate::effect::Effect;
use crate::state::AppState;

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Data =====
        Action::DataFetch => {
            state.is_loading = true;
            state.error = None;
            DispatchResult::changed_with(Effect::FetchMapData {
                path: state.path.clone(),
            })
        }

        Action::DataDidLoad { path, payload } => {
            if path != state.path {
                tracing::debug!(%path, current = %state.path, "Dropping stale map data");
                return DispatchResult::unchanged();
            }
            state.payload = Some(payload);
            state.is_loading = false;
            state.error = None;
            state.grid_scroll = 0;
            DispatchResult::changed()
        }

        Action::DataDidError { path, error } => {
            if path != state.path {
                tracing::debug!(%path, current = %state.path, %error, "Dropping stale fetch error");
                return DispatchResult::unchanged();
            }
            state.is_loading = false;
            state.error = Some(error);
            DispatchResult::changed()
        }

        // ===== Navigation =====
        Action::NavigateTo(path) => {
            let path = path.trim_matches('/').to_string();
            if path.is_empty() || path == state.path {
                return DispatchResult::unchanged();
            }
            state.path = path.clone();
            state.is_loading = true;
            state.error = None;
            DispatchResult::changed_with(Effect::FetchMapData { path })
        }

        // ===== Selection =====
        Action::Selection(action) => {
            let mode_change = matches!(action, SelectionAction::ModeSelect(_));
            let changed = selection::reducer(&mut state.selection, action);
            if changed && mode_change {
                // long-range rows come and go with the mode
                state.grid_scroll = state.grid_scroll.min(state.row_count().saturating_sub(1));
            }
            DispatchResult::from_changed(changed)
        }

        // ===== UI =====
        Action::UiTerminalResize(width, height) => {
            let resized = state.terminal_size != (width, height);
            state.terminal_size = (width, height);
            let tooltips = state.selection.observe_viewport_width(u32::from(width));
            DispatchResult::from_changed(resized || tooltips)
        }

        Action::UiGridScroll(delta) => {
            let max = state.row_count().saturating_sub(1);
            let next = state
                .grid_scroll
                .saturating_add_signed(isize::from(delta))
                .min(max);
            if next == state.grid_scroll {
                return DispatchResult::unchanged();
            }
            state.grid_scroll = next;
            DispatchResult::changed()
        }

        // handled in main loop
        Action::Quit => DispatchResult::unchanged(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meteo_core::forecast::{BoundingBox, DayRow, MapPayload};
    use meteo_core::WeatherMode;
    use std::collections::BTreeMap;
    use std::sync::Arc;

    fn payload() -> Arc<MapPayload> {
        let row = |long_terme| DayRow {
            long_terme,
            maps: vec![None],
        };
        Arc::new(MapPayload {
            name: "France".into(),
            path: "france".into(),
            breadcrumb: vec![],
            idtech: String::new(),
            taxonomy: "PAYS".into(),
            bbox: BoundingBox::new(41.0, -5.0, 51.0, 10.0),
            subzones: None,
            prevs: BTreeMap::from([(0, row(false)), (1, row(false)), (8, row(true)), (9, row(true))]),
            chroniques: None,
        })
    }

    fn loaded(payload: Arc<MapPayload>) -> Action {
        Action::DataDidLoad {
            path: "france".into(),
            payload,
        }
    }

    #[test]
    fn test_fetch_sets_loading_and_emits_effect() {
        let mut state = AppState::default();
        let result = reducer(&mut state, Action::DataFetch);

        assert!(result.changed);
        assert!(state.is_loading);
        assert_eq!(
            result.effects,
            vec![Effect::FetchMapData {
                path: "france".into()
            }]
        );
    }

    #[test]
    fn test_did_load_clears_loading() {
        let mut state = AppState {
            is_loading: true,
            error: Some("old".into()),
            ..Default::default()
        };
        let result = reducer(&mut state, loaded(payload()));

        assert!(result.changed);
        assert!(!state.is_loading);
        assert!(state.error.is_none());
        assert_eq!(state.row_count(), 4);
    }

    #[test]
    fn test_did_error_keeps_message() {
        let mut state = AppState::default();
        reducer(&mut state, Action::DataFetch);
        reducer(
            &mut state,
            Action::DataDidError {
                path: "france".into(),
                error: "503 Service Unavailable".into(),
            },
        );

        assert!(!state.is_loading);
        assert_eq!(state.error.as_deref(), Some("503 Service Unavailable"));
    }

    #[test]
    fn test_navigate_fetches_new_path() {
        let mut state = AppState::default();

        let result = reducer(&mut state, Action::NavigateTo("/bretagne".into()));
        assert_eq!(state.path, "bretagne");
        assert_eq!(
            result.effects,
            vec![Effect::FetchMapData {
                path: "bretagne".into()
            }]
        );

        let result = reducer(&mut state, Action::NavigateTo("bretagne".into()));
        assert!(!result.changed);
        assert!(!result.has_effects());
    }

    #[test]
    fn test_late_result_for_previous_path_is_dropped() {
        let mut state = AppState::default();
        reducer(&mut state, Action::DataFetch);
        reducer(&mut state, Action::NavigateTo("bretagne".into()));

        let result = reducer(&mut state, loaded(payload()));
        assert!(!result.changed);
        assert!(state.payload.is_none());
        assert!(state.is_loading);

        let result = reducer(
            &mut state,
            Action::DataDidError {
                path: "france".into(),
                error: "timeout".into(),
            },
        );
        assert!(!result.changed);
        assert!(state.error.is_none());
        assert!(state.is_loading);
    }

    #[test]
    fn test_mode_select_clamps_scroll() {
        let mut state = AppState::default();
        reducer(&mut state, loaded(payload()));
        reducer(&mut state, Action::UiGridScroll(3));
        assert_eq!(state.grid_scroll, 3);

        // wind has no long-range rows: only days 0 and 1 remain
        let result = reducer(
            &mut state,
            Action::Selection(SelectionAction::ModeSelect(WeatherMode::Vent)),
        );
        assert!(result.changed);
        assert_eq!(state.grid_scroll, 1);
    }

    #[test]
    fn test_uv_selection_rejected() {
        let mut state = AppState::default();
        let result = reducer(
            &mut state,
            Action::Selection(SelectionAction::ModeSelect(WeatherMode::Uv)),
        );
        assert!(!result.changed);
        assert_eq!(state.active_mode(), WeatherMode::Prev);
    }

    #[test]
    fn test_resize_drives_tooltips() {
        let mut state = AppState::default();
        assert!(state.selection.tooltips_enabled);

        let result = reducer(&mut state, Action::UiTerminalResize(100, 40));
        assert!(result.changed);
        assert!(!state.selection.tooltips_enabled);

        reducer(&mut state, Action::UiTerminalResize(160, 40));
        assert!(state.selection.tooltips_enabled);

        let result = reducer(&mut state, Action::UiTerminalResize(160, 40));
        assert!(!result.changed);
    }

    #[test]
    fn test_grid_scroll_bounds() {
        let mut state = AppState::default();
        assert!(!reducer(&mut state, Action::UiGridScroll(1)).changed);

        reducer(&mut state, loaded(payload()));
        assert!(!reducer(&mut state, Action::UiGridScroll(-1)).changed);
        reducer(&mut state, Action::UiGridScroll(10));
        assert_eq!(state.grid_scroll, 3);
    }
}
