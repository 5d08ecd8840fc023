//! Layout of the map grid: which rows are shown and how they are titled

use std::collections::BTreeMap;

use chrono::{DateTime, Locale, Utc};
use chrono_tz::Europe::Paris;

use crate::forecast::DayRow;
use crate::mode::WeatherMode;

/// Day offsets from this one on are never displayed
pub const MAX_DAY: i32 = 14;

/// Rows for days 0 up to (excluding) [`MAX_DAY`], in order
///
/// Past days and absent days are skipped, as are long-range rows when the
/// mode has no tendency view.
pub fn displayed_rows(prevs: &BTreeMap<i32, DayRow>, mode: WeatherMode) -> Vec<(i32, &DayRow)> {
    prevs
        .range(0..MAX_DAY)
        .filter(|(_, row)| !row.long_terme || mode.supports_tendency())
        .map(|(day, row)| (*day, row))
        .collect()
}

pub fn row_title(mode: WeatherMode, day: i32, row: &DayRow) -> String {
    if row.long_terme {
        format!("Tendance J+{day}")
    } else {
        format!("{} J+{day}", mode.label())
    }
}

/// Target time of a tile in French, Paris time, e.g. `jeudi 17 octobre 14h`
pub fn map_title(echeance: Option<DateTime<Utc>>) -> String {
    match echeance {
        Some(ts) => ts
            .with_timezone(&Paris)
            .format_localized("%A %-d %B %Hh", Locale::fr_FR)
            .to_string(),
        None => "indisponible".to_string(),
    }
}

/// Update time of a tile, e.g. `Màj : 17 oct. 14h`
pub fn update_stamp(updated: DateTime<Utc>) -> String {
    let local = updated
        .with_timezone(&Paris)
        .format_localized("%-d %b %Hh", Locale::fr_FR);
    format!("Màj : {local}")
}

/// Identifier of a mounted map tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MapId(pub u64);

impl std::fmt::Display for MapId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "map{}", self.0)
    }
}

/// Monotonic source of [`MapId`]s, owned by the view layer
#[derive(Debug, Default)]
pub struct MapIdGenerator {
    next: u64,
}

impl MapIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> MapId {
        let id = MapId(self.next);
        self.next += 1;
        id
    }
}
