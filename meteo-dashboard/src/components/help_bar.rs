use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::action::Action;
use crate::component::Component;

const HINTS: [(&str, &str); 6] = [
    ("←/→", "météo"),
    ("↑/↓", "jours"),
    ("1-9", "zone"),
    ("t", "tooltips"),
    ("r", "actualiser"),
    ("q", "quitter"),
];

pub struct HelpBar;

impl Component<Action> for HelpBar {
    type Props<'a> = ();

    fn render(&mut self, frame: &mut Frame, area: Rect, _props: Self::Props<'_>) {
        let spans: Vec<Span> = HINTS
            .iter()
            .flat_map(|(key, what)| {
                [
                    Span::styled(format!(" {key}"), Style::default().fg(Color::Cyan).bold()),
                    Span::styled(format!(" {what} "), Style::default().fg(Color::DarkGray)),
                ]
            })
            .collect();
        frame.render_widget(Paragraph::new(Line::from(spans).centered()), area);
    }
}
