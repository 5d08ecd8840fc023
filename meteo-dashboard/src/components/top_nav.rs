use crossterm::event::KeyCode;
use meteo_core::forecast::BreadcrumbItem;
use meteo_core::SelectionAction;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::action::Action;
use crate::component::Component;
use crate::event::EventKind;

const SEPARATOR: &str = " › ";

/// Breadcrumb navigation and the tooltip switch
pub struct TopNav;

pub struct TopNavProps<'a> {
    pub breadcrumb: &'a [BreadcrumbItem],
    pub tooltips_enabled: bool,
    pub is_focused: bool,
}

impl TopNav {
    pub const HEIGHT: u16 = 1;
}

impl Component<Action> for TopNav {
    type Props<'a> = TopNavProps<'a>;

    fn handle_event(&mut self, event: &EventKind, props: Self::Props<'_>) -> Vec<Action> {
        if !props.is_focused {
            return vec![];
        }
        let EventKind::Key(key) = event else {
            return vec![];
        };
        match key.code {
            KeyCode::Char('t') => vec![Action::Selection(SelectionAction::TooltipsToggle)],
            // 1-9 jump to a breadcrumb entry
            KeyCode::Char(c @ '1'..='9') => {
                let idx = c as usize - '1' as usize;
                props
                    .breadcrumb
                    .get(idx)
                    .map(|item| Action::NavigateTo(item.path.clone()))
                    .into_iter()
                    .collect()
            }
            _ => vec![],
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let [crumbs_area, switch_area] =
            Layout::horizontal([Constraint::Min(1), Constraint::Length(16)]).areas(area);

        let last = props.breadcrumb.len().saturating_sub(1);
        let mut spans = vec![Span::raw(" ")];
        for (i, item) in props.breadcrumb.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(SEPARATOR, Style::default().fg(Color::DarkGray)));
            }
            spans.push(Span::styled(
                format!("{} ", i + 1),
                Style::default().fg(Color::Cyan),
            ));
            let style = if i == last {
                Style::default().fg(Color::White).bold()
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(item.label.clone(), style));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), crumbs_area);

        let (value, color) = if props.tooltips_enabled {
            ("Oui", Color::Green)
        } else {
            ("Non", Color::DarkGray)
        };
        let switch = Line::from(vec![
            Span::styled("Tooltips : ", Style::default().fg(Color::Gray)),
            Span::styled(value, Style::default().fg(color).bold()),
        ])
        .right_aligned();
        frame.render_widget(Paragraph::new(switch), switch_area);
    }
}
