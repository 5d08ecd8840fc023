use std::collections::HashMap;

use crossterm::event::KeyCode;
use meteo_core::grid::{displayed_rows, row_title, MapId, MapIdGenerator};
use meteo_core::{MapPayload, ProjectorConfig, WeatherMode};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::Paragraph,
    Frame,
};

use super::{MapTile, MapTileProps};
use crate::action::Action;
use crate::component::Component;
use crate::event::EventKind;

/// Rows of map tiles, one row per forecast day
#[derive(Default)]
pub struct MapGrid {
    ids: MapIdGenerator,
    /// Tile identifiers by (day, moment)
    mounted: HashMap<(i32, usize), MapId>,
}

pub struct MapGridProps<'a> {
    pub payload: &'a MapPayload,
    pub mode: WeatherMode,
    pub tooltips_enabled: bool,
    pub projector: &'a ProjectorConfig,
    /// First row shown
    pub scroll: usize,
    pub is_focused: bool,
}

impl MapGrid {
    pub const ROW_HEIGHT: u16 = 14;

    pub fn new() -> Self {
        Self::default()
    }

    /// Stable identifier of a tile, allocated on first mount
    pub fn tile_id(&mut self, day: i32, moment: usize) -> MapId {
        let ids = &mut self.ids;
        *self.mounted.entry((day, moment)).or_insert_with(|| {
            let id = ids.next_id();
            tracing::debug!(%id, day, moment, "Mounting map tile");
            id
        })
    }
}

impl Component<Action> for MapGrid {
    type Props<'a> = MapGridProps<'a>;

    fn handle_event(&mut self, event: &EventKind, props: Self::Props<'_>) -> Vec<Action> {
        if !props.is_focused {
            return vec![];
        }
        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Down | KeyCode::Char('j') | KeyCode::PageDown => {
                    vec![Action::UiGridScroll(1)]
                }
                KeyCode::Up | KeyCode::Char('k') | KeyCode::PageUp => {
                    vec![Action::UiGridScroll(-1)]
                }
                _ => vec![],
            },
            EventKind::Scroll { delta, .. } => {
                let delta = (*delta).clamp(i16::MIN as isize, i16::MAX as isize) as i16;
                vec![Action::UiGridScroll(delta)]
            }
            _ => vec![],
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let payload = props.payload;
        let rows = displayed_rows(&payload.prevs, props.mode);
        if rows.is_empty() {
            let empty = Paragraph::new("Aucune prévision disponible")
                .centered()
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(empty, area);
            return;
        }

        let fitting = usize::from((area.height / Self::ROW_HEIGHT).max(1));
        let visible: Vec<_> = rows.into_iter().skip(props.scroll).take(fitting).collect();
        let row_areas = Layout::vertical(vec![Constraint::Length(Self::ROW_HEIGHT); visible.len()])
            .split(area);
        let subzones = payload.subzones.as_deref().unwrap_or_default();

        for ((day, row), row_area) in visible.into_iter().zip(row_areas.iter().copied()) {
            let [title_area, tiles_area] =
                Layout::vertical([Constraint::Length(1), Constraint::Min(1)]).areas(row_area);
            frame.render_widget(
                Paragraph::new(Line::from(format!(" {}", row_title(props.mode, day, row))).bold()),
                title_area,
            );

            if row.maps.is_empty() {
                continue;
            }
            let tile_areas =
                Layout::horizontal(vec![Constraint::Ratio(1, row.maps.len() as u32); row.maps.len()])
                    .split(tiles_area);
            for (moment, (map, tile_area)) in row.maps.iter().zip(tile_areas.iter()).enumerate() {
                let id = self.tile_id(day, moment);
                MapTile.render(
                    frame,
                    *tile_area,
                    MapTileProps {
                        id,
                        map: map.as_ref(),
                        bbox: &payload.bbox,
                        subzones,
                        mode: props.mode,
                        tooltips_enabled: props.tooltips_enabled,
                        projector: props.projector,
                    },
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{key_event, RenderHarness};
    use meteo_core::forecast::{BoundingBox, DayRow, MomentMap};
    use std::collections::BTreeMap;

    fn payload() -> MapPayload {
        let row = |long_terme, maps: usize| DayRow {
            long_terme,
            maps: (0..maps).map(|_| Some(MomentMap::default())).collect(),
        };
        MapPayload {
            name: "Corse".into(),
            path: "corse".into(),
            breadcrumb: vec![],
            idtech: String::new(),
            taxonomy: String::new(),
            bbox: BoundingBox::new(41.3, 8.5, 43.1, 9.6),
            subzones: None,
            prevs: BTreeMap::from([(0, row(false, 4)), (1, row(false, 4)), (7, row(true, 1))]),
            chroniques: None,
        }
    }

    fn props<'a>(payload: &'a MapPayload, cfg: &'a ProjectorConfig, mode: WeatherMode) -> MapGridProps<'a> {
        MapGridProps {
            payload,
            mode,
            tooltips_enabled: false,
            projector: cfg,
            scroll: 0,
            is_focused: true,
        }
    }

    #[test]
    fn test_tile_ids_are_stable() {
        let mut grid = MapGrid::new();
        let a = grid.tile_id(0, 0);
        let b = grid.tile_id(0, 1);
        assert_ne!(a, b);
        assert_eq!(grid.tile_id(0, 0), a);
    }

    #[test]
    fn test_scroll_keys() {
        let (payload, cfg) = (payload(), ProjectorConfig::default());
        let mut grid = MapGrid::new();
        let actions = grid.handle_event(&key_event("down"), props(&payload, &cfg, WeatherMode::Prev));
        assert_eq!(actions, vec![Action::UiGridScroll(1)]);
    }

    #[test]
    fn test_render_row_titles() {
        let (payload, cfg) = (payload(), ProjectorConfig::default());
        let mut grid = MapGrid::new();
        let mut harness = RenderHarness::new(100, 3 * MapGrid::ROW_HEIGHT);
        let out = harness.render_to_string_plain(|frame| {
            grid.render(frame, frame.area(), props(&payload, &cfg, WeatherMode::Prev))
        });

        assert!(out.contains("Prévisions J+0"));
        assert!(out.contains("Prévisions J+1"));
        assert!(out.contains("Tendance J+7"));
    }

    #[test]
    fn test_tile_ids_survive_rerender() {
        let (payload, cfg) = (payload(), ProjectorConfig::default());
        let mut grid = MapGrid::new();
        let mut harness = RenderHarness::new(100, 3 * MapGrid::ROW_HEIGHT);

        let first = harness.render_to_string_plain(|frame| {
            grid.render(frame, frame.area(), props(&payload, &cfg, WeatherMode::Prev))
        });
        // 4 + 4 + 1 tiles
        assert!(first.contains("map0"));
        assert!(first.contains("map8"));

        let second = harness.render_to_string_plain(|frame| {
            grid.render(frame, frame.area(), props(&payload, &cfg, WeatherMode::Prev))
        });
        assert_eq!(first, second);
        assert!(!second.contains("map9"));
        assert_eq!(grid.tile_id(7, 0), MapId(8));
    }

    #[test]
    fn test_render_hides_tendency_for_wind() {
        let (payload, cfg) = (payload(), ProjectorConfig::default());
        let mut grid = MapGrid::new();
        let mut harness = RenderHarness::new(100, 3 * MapGrid::ROW_HEIGHT);
        let out = harness.render_to_string_plain(|frame| {
            grid.render(frame, frame.area(), props(&payload, &cfg, WeatherMode::Vent))
        });

        assert!(out.contains("Vent J+1"));
        assert!(!out.contains("Tendance"));
    }
}
