pub mod config;
pub mod theme;

pub use config::{AppConfig, DisplayConfig, GridConfig, SlideshowConfig};
pub use theme::ThemeConfig;
