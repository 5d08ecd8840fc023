use chrono::DateTime;
use chrono_tz::Europe::Paris;
use meteo_core::forecast::{Chroniques, SeriesPoint};
use meteo_core::series::{RenderKind, Rgb, SeriesColor};
use meteo_core::{assemble, config_for, ChartSeries, WeatherMode};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style, Stylize},
    symbols::Marker,
    text::Line,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::action::Action;
use crate::component::Component;

/// Time series of the active mode for every POI of the map
pub struct ChartPanel;

pub struct ChartPanelProps<'a> {
    pub chroniques: Option<&'a Chroniques>,
    pub mode: WeatherMode,
}

impl ChartPanel {
    pub const HEIGHT: u16 = 12;
}

/// Near-black series colors vanish on a dark terminal
fn terminal_color(rgb: Rgb) -> Color {
    let Rgb(r, g, b) = rgb;
    if r.max(g).max(b) < 0x50 {
        Color::Gray
    } else {
        Color::Rgb(r, g, b)
    }
}

/// One polyline per drawable curve; an area range gives its two edges
fn polylines(series: &ChartSeries) -> Vec<(Color, Vec<(f64, f64)>)> {
    let x = |ts: i64| ts as f64 / 1000.0;
    match (series.style.kind, series.style.color) {
        (RenderKind::AreaRange, color) => {
            let (top, bottom) = match color {
                SeriesColor::Gradient { top, bottom } => (top, bottom),
                SeriesColor::Solid(c) => (c, c),
            };
            let (mut lows, mut highs) = (Vec::new(), Vec::new());
            for point in &series.data {
                if let SeriesPoint::Range(ts, min, max) = *point {
                    lows.push((x(ts), min));
                    highs.push((x(ts), max));
                }
            }
            vec![(terminal_color(top), highs), (terminal_color(bottom), lows)]
        }
        (RenderKind::Line, color) => {
            let color = match color {
                SeriesColor::Solid(c) | SeriesColor::Gradient { top: c, .. } => c,
            };
            let points = series
                .data
                .iter()
                .filter_map(|p| match *p {
                    SeriesPoint::Value(ts, v) => Some((x(ts), v)),
                    SeriesPoint::Range(..) => None,
                })
                .collect();
            vec![(terminal_color(color), points)]
        }
    }
}

fn bounds(values: impl Iterator<Item = f64>) -> Option<[f64; 2]> {
    values
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some([v, v]),
            Some([lo, hi]) => Some([lo.min(v), hi.max(v)]),
        })
}

fn time_label(seconds: f64) -> String {
    DateTime::from_timestamp(seconds as i64, 0)
        .map(|ts| ts.with_timezone(&Paris).format("%d/%m %Hh").to_string())
        .unwrap_or_default()
}

impl Component<Action> for ChartPanel {
    type Props<'a> = ChartPanelProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let config = config_for(props.mode);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(80, 80, 100)))
            .title(format!(" {} ", config.title))
            .title_style(Style::default().fg(Color::Cyan).bold());

        let series = props
            .chroniques
            .map(|c| assemble(&config, c))
            .unwrap_or_default();
        let lines: Vec<(Color, Vec<(f64, f64)>)> = series.iter().flat_map(polylines).collect();

        let points = || lines.iter().flat_map(|(_, pts)| pts.iter());
        let (Some(x_bounds), Some(y_bounds)) = (
            bounds(points().map(|(x, _)| *x)),
            bounds(points().map(|(_, y)| *y)),
        ) else {
            let empty = Paragraph::new("Pas de données")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(empty, area);
            return;
        };

        let datasets: Vec<Dataset> = lines
            .iter()
            .map(|(color, pts)| {
                Dataset::default()
                    .marker(Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(*color))
                    .data(pts)
            })
            .collect();

        let x_axis = Axis::default()
            .style(Style::default().fg(Color::DarkGray))
            .bounds(x_bounds)
            .labels(vec![
                Line::from(time_label(x_bounds[0])),
                Line::from(time_label(x_bounds[1])),
            ]);
        let y_axis = Axis::default()
            .title(config.y_axis_label.clone())
            .style(Style::default().fg(Color::DarkGray))
            .bounds(y_bounds)
            .labels(vec![
                Line::from(format!("{:.0}", y_bounds[0])),
                Line::from(format!("{:.0}", y_bounds[1])),
            ]);

        let chart = Chart::new(datasets)
            .block(block)
            .x_axis(x_axis)
            .y_axis(y_axis);
        frame.render_widget(chart, area);
    }
}
