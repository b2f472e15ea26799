//! pixel-grid: square-grid sampling and palette quantization
//!
//! This crate turns a decoded photograph into a small, blocky pixel-art
//! grid. It holds only pure functions over in-memory buffers; decoding,
//! storage and drawing belong to callers.
//!
//! # Pipeline
//!
//! ```text
//! Bitmap (RGBA, any size)
//!     |
//!     v
//! sample_square()          center square crop + nearest-neighbor resize
//!     |
//!     v
//! RgbImage (N x N)
//!     |
//!     +--> QuantizationStrategy::Luminance   -> IntensityGrid (levels 0..L)
//!     |                                          |
//!     |                                        colorize(palette) at render time
//!     |
//!     +--> QuantizationStrategy::NearestColor -> RgbImage (five theme colors)
//! ```
//!
//! # Quick Start
//!
//! ```
//! use pixel_grid::{colorize, sample_square, Bitmap, Palette, Quantized, QuantizationStrategy};
//!
//! let bitmap = Bitmap::new(2, 2, vec![
//!     0, 0, 0, 255,        255, 255, 255, 255,
//!     255, 255, 255, 255,  0, 0, 0, 255,
//! ]).unwrap();
//!
//! let sampled = sample_square(&bitmap, 2).unwrap();
//! let Quantized::Levels(grid) = QuantizationStrategy::default().quantize(&sampled).unwrap() else {
//!     unreachable!()
//! };
//! assert_eq!(grid.cells(), &[0, 15, 15, 0]);
//!
//! let pixels = colorize(&grid, &Palette::default());
//! assert_eq!(pixels.width(), 2);
//! ```
//!
//! # Level to color mapping
//!
//! Grids store levels, never colors. The three lowest thirds of the level
//! range map to the primary, secondary and accent roles (see [`bucket()`]).
//! Changing the theme therefore never requires re-encoding stored grids.

pub mod color;
pub mod grid;
pub mod palette;
pub mod quantize;
pub mod sample;

#[cfg(test)]
mod domain_tests;

pub use color::{hsl_to_rgb, Srgb};
pub use grid::{GridError, IntensityGrid};
pub use palette::{Palette, PaletteError, ParseColorError, Role};
pub use quantize::{
    bucket, colorize, level_color, luminance_grid, nearest_colors, quantize_luminance,
    QuantizationStrategy, Quantized, DEFAULT_GRID_SIZE, DEFAULT_LEVELS,
};
pub use sample::{
    center_crop, resize_nearest, sample_aspect, sample_square, Bitmap, CropRect, RgbImage,
    SampleError,
};
