use crossterm::event::KeyCode;
use meteo_core::{SelectionAction, WeatherMode};
use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::Line,
    widgets::Tabs,
    Frame,
};

use crate::action::Action;
use crate::component::Component;
use crate::event::EventKind;

/// Weather mode tabs; left/right (or h/l) cycles through them
pub struct WeatherPicker;

pub struct WeatherPickerProps<'a> {
    /// Selectable modes in display order
    pub modes: &'a [WeatherMode],
    pub active: WeatherMode,
    pub is_focused: bool,
}

impl WeatherPicker {
    pub const HEIGHT: u16 = 1;
}

fn step(modes: &[WeatherMode], active: WeatherMode, forward: bool) -> Option<WeatherMode> {
    let len = modes.len();
    if len == 0 {
        return None;
    }
    let idx = match modes.iter().position(|m| *m == active) {
        Some(i) if forward => (i + 1) % len,
        Some(i) => (i + len - 1) % len,
        None => 0,
    };
    modes.get(idx).copied()
}

impl Component<Action> for WeatherPicker {
    type Props<'a> = WeatherPickerProps<'a>;

    fn handle_event(&mut self, event: &EventKind, props: Self::Props<'_>) -> Vec<Action> {
        if !props.is_focused {
            return vec![];
        }
        let EventKind::Key(key) = event else {
            return vec![];
        };
        let target = match key.code {
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => {
                step(props.modes, props.active, true)
            }
            KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => {
                step(props.modes, props.active, false)
            }
            _ => None,
        };
        target
            .filter(|mode| *mode != props.active)
            .map(|mode| Action::Selection(SelectionAction::ModeSelect(mode)))
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let titles: Vec<Line> = props.modes.iter().map(|m| Line::from(m.label())).collect();
        let selected = props.modes.iter().position(|m| *m == props.active);

        let tabs = Tabs::new(titles)
            .select(selected.unwrap_or(0))
            .style(Style::default().fg(Color::Gray))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::Cyan).bold())
            .divider("│");
        frame.render_widget(tabs, area);
    }
}
