//! Top-level view: header, picker, then chart and map grid
//!
//! Key events go to the sub-components in order; the first that returns
//! actions wins. Global keys (refresh, quit) are handled here.

use crossterm::event::KeyCode;
use meteo_core::MapPayload;
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{
    ChartPanel, ChartPanelProps, HelpBar, MapGrid, MapGridProps, TopNav, TopNavProps,
    WeatherPicker, WeatherPickerProps,
};
use crate::action::Action;
use crate::component::Component;
use crate::event::EventKind;
use crate::state::AppState;

pub const ERROR_ICON: &str = "⚠";

pub struct DashboardProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

#[derive(Default)]
pub struct Dashboard {
    grid: MapGrid,
}

enum BodyView<'a> {
    Error(&'a str),
    Ready(&'a MapPayload),
    Loading,
    Empty,
}

impl<'a> BodyView<'a> {
    fn from_state(state: &'a AppState) -> Self {
        if let Some(error) = state.error.as_deref() {
            BodyView::Error(error)
        } else if let Some(payload) = state.payload.as_deref() {
            BodyView::Ready(payload)
        } else if state.is_loading {
            BodyView::Loading
        } else {
            BodyView::Empty
        }
    }
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn render_message(frame: &mut Frame, area: Rect, lines: Vec<Line<'static>>) {
        let height = lines.len() as u16;
        let [center] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(area);
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), center);
    }

    fn render_ready(&mut self, frame: &mut Frame, area: Rect, state: &AppState, payload: &MapPayload) {
        let [chart_area, grid_area] = Layout::vertical([
            Constraint::Length(ChartPanel::HEIGHT),
            Constraint::Min(MapGrid::ROW_HEIGHT),
        ])
        .areas(area);

        ChartPanel.render(
            frame,
            chart_area,
            ChartPanelProps {
                chroniques: payload.chroniques.as_ref(),
                mode: state.active_mode(),
            },
        );
        self.grid.render(
            frame,
            grid_area,
            MapGridProps {
                payload,
                mode: state.active_mode(),
                tooltips_enabled: state.selection.tooltips_enabled,
                projector: &state.projector,
                scroll: state.grid_scroll,
                is_focused: true,
            },
        );
    }
}

impl Component<Action> for Dashboard {
    type Props<'a> = DashboardProps<'a>;

    fn handle_event(&mut self, event: &EventKind, props: Self::Props<'_>) -> Vec<Action> {
        if let EventKind::Resize(width, height) = event {
            return vec![Action::UiTerminalResize(*width, *height)];
        }
        if !props.is_focused {
            return vec![];
        }
        let state = props.state;

        if let EventKind::Key(key) = event {
            match key.code {
                KeyCode::Char('r') | KeyCode::F(5) => return vec![Action::DataFetch],
                KeyCode::Char('q') | KeyCode::Esc => return vec![Action::Quit],
                _ => {}
            }
        }

        let breadcrumb = state
            .payload
            .as_ref()
            .map(|p| p.breadcrumb.as_slice())
            .unwrap_or_default();
        let actions = TopNav.handle_event(
            event,
            TopNavProps {
                breadcrumb,
                tooltips_enabled: state.selection.tooltips_enabled,
                is_focused: true,
            },
        );
        if !actions.is_empty() {
            return actions;
        }

        let modes = state.selectable_modes();
        let actions = WeatherPicker.handle_event(
            event,
            WeatherPickerProps {
                modes: &modes,
                active: state.active_mode(),
                is_focused: true,
            },
        );
        if !actions.is_empty() {
            return actions;
        }

        match state.payload.as_deref() {
            Some(payload) => self.grid.handle_event(
                event,
                MapGridProps {
                    payload,
                    mode: state.active_mode(),
                    tooltips_enabled: state.selection.tooltips_enabled,
                    projector: &state.projector,
                    scroll: state.grid_scroll,
                    is_focused: true,
                },
            ),
            None => vec![],
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;

        let name = state
            .payload
            .as_ref()
            .map_or(state.path.as_str(), |p| p.name.as_str());
        let loading = if state.is_loading { " ◐" } else { "" };
        let outer = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(80, 80, 100)))
            .title(format!(" ☁ Météo · {name}{loading} "))
            .title_style(Style::default().fg(Color::Cyan).bold())
            .title_alignment(Alignment::Center);
        frame.render_widget(outer.clone(), area);
        let inner = outer.inner(area);

        let [nav_area, picker_area, body_area, help_area] = Layout::vertical([
            Constraint::Length(TopNav::HEIGHT),
            Constraint::Length(WeatherPicker::HEIGHT),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        let breadcrumb = state
            .payload
            .as_ref()
            .map(|p| p.breadcrumb.as_slice())
            .unwrap_or_default();
        TopNav.render(
            frame,
            nav_area,
            TopNavProps {
                breadcrumb,
                tooltips_enabled: state.selection.tooltips_enabled,
                is_focused: props.is_focused,
            },
        );

        let modes = state.selectable_modes();
        WeatherPicker.render(
            frame,
            picker_area,
            WeatherPickerProps {
                modes: &modes,
                active: state.active_mode(),
                is_focused: props.is_focused,
            },
        );

        match BodyView::from_state(state) {
            BodyView::Ready(payload) => self.render_ready(frame, body_area, state, payload),
            BodyView::Error(error) => Self::render_message(
                frame,
                body_area,
                vec![
                    Line::from(vec![
                        Span::styled(format!("{ERROR_ICON} Erreur : "), Style::default().fg(Color::Red).bold()),
                        Span::raw(error.to_string()),
                    ]),
                    Line::from(Span::styled(
                        "Appuyez sur r pour réessayer",
                        Style::default().fg(Color::DarkGray),
                    )),
                ],
            ),
            BodyView::Loading => Self::render_message(
                frame,
                body_area,
                vec![Line::from(Span::styled(
                    "Chargement des prévisions…",
                    Style::default().fg(Color::Cyan),
                ))],
            ),
            BodyView::Empty => Self::render_message(
                frame,
                body_area,
                vec![Line::from(Span::styled(
                    "Appuyez sur r pour charger les prévisions",
                    Style::default().fg(Color::DarkGray),
                ))],
            ),
        }

        HelpBar.render(frame, help_area, ());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{key_event, RenderHarness};
    use meteo_core::testing::TestHarness;
    use meteo_core::{assert_emitted, assert_not_emitted, count_emitted};
    use meteo_core::{SelectionAction, WeatherMode};

    fn handle(state: &AppState, key: &str) -> Vec<Action> {
        Dashboard::new().handle_event(
            &key_event(key),
            DashboardProps {
                state,
                is_focused: true,
            },
        )
    }

    #[test]
    fn test_global_keys() {
        let state = AppState::default();
        assert_eq!(handle(&state, "r"), vec![Action::DataFetch]);
        assert_eq!(handle(&state, "q"), vec![Action::Quit]);
    }

    #[test]
    fn test_routes_to_picker_and_nav() {
        let state = AppState::default();
        assert_eq!(
            handle(&state, "right"),
            vec![Action::Selection(SelectionAction::ModeSelect(WeatherMode::Vent))]
        );
        assert_eq!(
            handle(&state, "t"),
            vec![Action::Selection(SelectionAction::TooltipsToggle)]
        );
    }

    #[test]
    fn test_key_sequence_emits_by_category() {
        let mut harness = TestHarness::<AppState, Action>::default();
        let mut dashboard = Dashboard::new();
        for key in ["right", "t", "down", "r"] {
            let actions = dashboard.handle_event(
                &key_event(key),
                DashboardProps {
                    state: &harness.state,
                    is_focused: true,
                },
            );
            for action in actions {
                harness.emit(action);
            }
        }

        let selection = harness.drain_category("selection");
        assert_eq!(count_emitted!(selection, Action::Selection(_)), 2);
        assert_emitted!(
            selection,
            Action::Selection(SelectionAction::ModeSelect(WeatherMode::Vent))
        );
        assert_emitted!(selection, Action::Selection(SelectionAction::TooltipsToggle));

        // no payload yet, so the grid does not scroll
        let rest = harness.drain_emitted();
        assert_emitted!(rest, Action::DataFetch);
        assert_not_emitted!(rest, Action::UiGridScroll(_));
    }

    #[test]
    fn test_resize_passes_even_unfocused() {
        let state = AppState::default();
        let actions = Dashboard::new().handle_event(
            &EventKind::Resize(90, 30),
            DashboardProps {
                state: &state,
                is_focused: false,
            },
        );
        assert_eq!(actions, vec![Action::UiTerminalResize(90, 30)]);
    }

    #[test]
    fn test_render_loading() {
        let state = AppState {
            is_loading: true,
            ..Default::default()
        };
        let mut harness = RenderHarness::new(80, 20);
        let out = harness.render_to_string_plain(|frame| {
            Dashboard::new().render(
                frame,
                frame.area(),
                DashboardProps {
                    state: &state,
                    is_focused: true,
                },
            )
        });
        assert!(out.contains("Chargement des prévisions"));
    }
}
