pub mod chart_panel;
pub mod dashboard;
pub mod help_bar;
pub mod map_grid;
pub mod map_tile;
pub mod top_nav;
pub mod weather_picker;

pub use crate::component::Component;

pub use chart_panel::{ChartPanel, ChartPanelProps};
pub use dashboard::{Dashboard, DashboardProps, ERROR_ICON};
pub use help_bar::HelpBar;
pub use map_grid::{MapGrid, MapGridProps};
pub use map_tile::{MapTile, MapTileProps};
pub use top_nav::{TopNav, TopNavProps};
pub use weather_picker::{WeatherPicker, WeatherPickerProps};
