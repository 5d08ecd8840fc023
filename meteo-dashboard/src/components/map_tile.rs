use meteo_core::forecast::{MomentMap, Subzone};
use meteo_core::grid::{map_title, update_stamp, MapId};
use meteo_core::projector::{Label, Tone, TooltipDirection, TooltipPlacement};
use meteo_core::{project, BoundingBox, MarkerDescriptor, ProjectorConfig, WeatherMode};
use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as CanvasLine},
        Block, Borders,
    },
    Frame,
};

use crate::action::Action;
use crate::component::Component;

/// One map: subzone outlines with a label per point of interest
pub struct MapTile;

pub struct MapTileProps<'a> {
    /// Identity given by the grid when the tile was first mounted
    pub id: MapId,
    /// `None` for a missing moment
    pub map: Option<&'a MomentMap>,
    pub bbox: &'a BoundingBox,
    pub subzones: &'a [Subzone],
    pub mode: WeatherMode,
    pub tooltips_enabled: bool,
    pub projector: &'a ProjectorConfig,
}

/// Project every POI of a tile, dropping disabled markers
pub fn visible_markers(
    map: &MomentMap,
    mode: WeatherMode,
    bbox: &BoundingBox,
    config: &ProjectorConfig,
) -> Vec<MarkerDescriptor> {
    map.prevs
        .values()
        .filter_map(|poi| project(poi, mode, bbox, config).descriptor().cloned())
        .collect()
}

fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Plain => Color::White,
        Tone::TempMin => Color::LightBlue,
        Tone::TempMax => Color::LightRed,
        Tone::GustWarning => Color::Red,
        Tone::ColdFeel => Color::Rgb(165, 42, 42),
        Tone::HumidityMin => Color::Green,
        Tone::HumidityMax => Color::Yellow,
    }
}

pub fn styled_label(label: &Label) -> Line<'static> {
    Line::from(
        label
            .segments
            .iter()
            .map(|s| Span::styled(s.text.clone(), Style::default().fg(tone_color(s.tone))))
            .collect::<Vec<_>>(),
    )
}

/// Tooltip position in map coordinates
///
/// Pixel offsets are scaled against a nominal 400x200 px map.
fn tooltip_anchor(marker: &MarkerDescriptor, bbox: &BoundingBox) -> (f64, f64) {
    let TooltipPlacement {
        direction,
        offset_x,
        offset_y,
    } = marker.tooltip;
    let dx = f64::from(offset_x) / 400.0 * (bbox.east - bbox.west);
    let mut dy = -f64::from(offset_y) / 200.0 * (bbox.north - bbox.south);
    if direction == TooltipDirection::Bottom {
        // leave the marker's own row free
        dy = dy.min(-(bbox.north - bbox.south) / 10.0);
    }
    (marker.coords.lng + dx, marker.coords.lat + dy)
}

impl Component<Action> for MapTile {
    type Props<'a> = MapTileProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let title = map_title(props.map.and_then(|m| m.echeance));
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(80, 80, 100)))
            .title(Line::from(format!(" {title} ")).centered())
            .title_bottom(Line::from(format!(" {} ", props.id)).fg(Color::Rgb(80, 80, 100)));
        if let Some(updated) = props.map.and_then(|m| m.updated) {
            block = block.title_bottom(
                Line::from(format!(" {} ", update_stamp(updated)))
                    .right_aligned()
                    .fg(Color::DarkGray),
            );
        }

        let Some(map) = props.map else {
            frame.render_widget(block, area);
            return;
        };

        let bbox = props.bbox;
        let markers = visible_markers(map, props.mode, bbox, props.projector);
        let rings: Vec<_> = props
            .subzones
            .iter()
            .flat_map(|zone| zone.geometry.rings())
            .collect();

        let canvas = Canvas::default()
            .block(block)
            .marker(Marker::Braille)
            .x_bounds([bbox.west, bbox.east])
            .y_bounds([bbox.south, bbox.north])
            .paint(|ctx| {
                for ring in &rings {
                    for edge in ring.windows(2) {
                        ctx.draw(&CanvasLine::new(
                            edge[0].lng,
                            edge[0].lat,
                            edge[1].lng,
                            edge[1].lat,
                            Color::DarkGray,
                        ));
                    }
                }
                ctx.layer();

                for marker in &markers {
                    let text = match &marker.label {
                        Some(label) => styled_label(label),
                        None => Line::from("•"),
                    };
                    ctx.print(marker.coords.lng, marker.coords.lat, text);

                    if props.tooltips_enabled {
                        let (x, y) = tooltip_anchor(marker, bbox);
                        ctx.print(x, y, Line::from(marker.title.clone()).fg(Color::Gray).italic());
                    }
                }
            });
        frame.render_widget(canvas, area);
    }
}
