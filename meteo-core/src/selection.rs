//! Selection state: active weather mode and tooltip visibility
//!
//! Mutated only through [`SelectionAction`]s handled by [`reducer`], usually
//! behind a [`Store`](crate::Store).

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::mode::WeatherMode;

/// Rules applied by [`SelectionState`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionPolicy {
    /// Modes the user cannot pick
    pub non_selectable: Vec<WeatherMode>,
    /// Tooltips are shown when the viewport is strictly wider than this
    pub tooltips_min_width: u32,
    /// When false, a manual toggle pins the tooltip flag against later
    /// viewport observations
    pub viewport_overrides_manual: bool,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            non_selectable: vec![WeatherMode::Uv],
            tooltips_min_width: 800,
            viewport_overrides_manual: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    pub active_mode: WeatherMode,
    pub tooltips_enabled: bool,
    /// Set by a manual toggle, only consulted when the policy forbids overrides
    pub tooltips_pinned: bool,
    pub policy: SelectionPolicy,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new(SelectionPolicy::default())
    }
}

impl SelectionState {
    pub fn new(policy: SelectionPolicy) -> Self {
        Self {
            active_mode: WeatherMode::default(),
            tooltips_enabled: true,
            tooltips_pinned: false,
            policy,
        }
    }

    pub fn is_selectable(&self, mode: WeatherMode) -> bool {
        !self.policy.non_selectable.contains(&mode)
    }

    /// Returns true if the active mode changed
    pub fn set_active_mode(&mut self, mode: WeatherMode) -> bool {
        if !self.is_selectable(mode) {
            tracing::debug!(%mode, "Ignoring non-selectable weather mode");
            return false;
        }
        if self.active_mode == mode {
            return false;
        }
        self.active_mode = mode;
        true
    }

    pub fn toggle_tooltips(&mut self) {
        self.tooltips_enabled = !self.tooltips_enabled;
        self.tooltips_pinned = true;
    }

    /// Derived visibility, not a user choice
    ///
    /// Returns true if the flag changed.
    pub fn set_tooltips_visible(&mut self, visible: bool) -> bool {
        if self.tooltips_pinned && !self.policy.viewport_overrides_manual {
            return false;
        }
        let changed = self.tooltips_enabled != visible;
        self.tooltips_enabled = visible;
        changed
    }

    /// Feed a viewport width observation
    pub fn observe_viewport_width(&mut self, width: u32) -> bool {
        self.set_tooltips_visible(self.policy.tooltips_min_width < width)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionAction {
    ModeSelect(WeatherMode),
    TooltipsToggle,
    TooltipsSet(bool),
    ViewportResize(u32),
}

impl Action for SelectionAction {
    fn name(&self) -> &'static str {
        match self {
            SelectionAction::ModeSelect(_) => "ModeSelect",
            SelectionAction::TooltipsToggle => "TooltipsToggle",
            SelectionAction::TooltipsSet(_) => "TooltipsSet",
            SelectionAction::ViewportResize(_) => "ViewportResize",
        }
    }

    fn category(&self) -> Option<&'static str> {
        Some("selection")
    }
}

pub fn reducer(state: &mut SelectionState, action: SelectionAction) -> bool {
    match action {
        SelectionAction::ModeSelect(mode) => state.set_active_mode(mode),
        SelectionAction::TooltipsToggle => {
            state.toggle_tooltips();
            true
        }
        SelectionAction::TooltipsSet(visible) => state.set_tooltips_visible(visible),
        SelectionAction::ViewportResize(width) => state.observe_viewport_width(width),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let state = SelectionState::default();
        assert_eq!(state.active_mode, WeatherMode::Prev);
        assert!(state.tooltips_enabled);
        assert_eq!(state.policy.tooltips_min_width, 800);
    }

    #[test]
    fn test_uv_not_selectable_by_default() {
        let mut state = SelectionState::default();
        assert!(!state.set_active_mode(WeatherMode::Uv));
        assert_eq!(state.active_mode, WeatherMode::Prev);
    }

    #[test]
    fn test_non_selectable_list_is_configurable() {
        let mut state = SelectionState::new(SelectionPolicy {
            non_selectable: vec![WeatherMode::Psea],
            ..SelectionPolicy::default()
        });
        assert!(state.set_active_mode(WeatherMode::Uv));
        assert!(!state.set_active_mode(WeatherMode::Psea));
        assert_eq!(state.active_mode, WeatherMode::Uv);
    }

    #[test]
    fn test_toggle_twice_round_trips() {
        let mut state = SelectionState::default();
        let before = state.tooltips_enabled;
        state.toggle_tooltips();
        assert_ne!(state.tooltips_enabled, before);
        state.toggle_tooltips();
        assert_eq!(state.tooltips_enabled, before);
    }

    #[test]
    fn test_viewport_threshold_is_strict() {
        let mut state = SelectionState::default();
        assert!(state.observe_viewport_width(800));
        assert!(!state.tooltips_enabled);
        assert!(state.observe_viewport_width(801));
        assert!(state.tooltips_enabled);
        assert!(!state.observe_viewport_width(1200));
    }

    #[test]
    fn test_viewport_overwrites_manual_toggle() {
        let mut state = SelectionState::default();
        state.toggle_tooltips();
        assert!(!state.tooltips_enabled);

        state.observe_viewport_width(1024);
        assert!(state.tooltips_enabled);
    }

    #[test]
    fn test_manual_toggle_pinned_when_overrides_disabled() {
        let mut state = SelectionState::new(SelectionPolicy {
            viewport_overrides_manual: false,
            ..SelectionPolicy::default()
        });

        // before any manual toggle the viewport still drives the flag
        assert!(state.observe_viewport_width(640));
        assert!(!state.tooltips_enabled);

        state.toggle_tooltips();
        assert!(state.tooltips_enabled);
        assert!(!state.observe_viewport_width(640));
        assert!(state.tooltips_enabled);
    }

    #[test]
    fn test_reducer() {
        let mut state = SelectionState::default();
        assert!(reducer(&mut state, SelectionAction::ModeSelect(WeatherMode::Vent)));
        assert!(!reducer(&mut state, SelectionAction::ModeSelect(WeatherMode::Uv)));
        assert!(reducer(&mut state, SelectionAction::TooltipsSet(false)));
        assert!(!reducer(&mut state, SelectionAction::TooltipsSet(false)));
        assert!(reducer(&mut state, SelectionAction::ViewportResize(1920)));
        assert_eq!(state.active_mode, WeatherMode::Vent);
        assert!(state.tooltips_enabled);
    }
}
