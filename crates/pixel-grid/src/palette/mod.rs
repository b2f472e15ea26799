//! Palette types and utilities
//!
//! A palette is the five named theme colors the pipeline renders with.

mod error;
mod palette;

pub use error::{PaletteError, ParseColorError};
pub use palette::{Palette, Role};
