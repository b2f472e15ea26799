//! Quantizer: reduce sampled colors to either intensity levels or palette
//! colors.
//!
//! Two independent strategies share this module:
//!
//! - **Luminance**: each sample becomes one of `L` brightness levels. The
//!   mapping from level to color is deferred to render time (see
//!   [`bucket()`] and [`colorize()`]) so stored grids can be re-themed.
//! - **Nearest color**: each sample is replaced by the closest of the five
//!   palette colors. The result is a finished image, not a level grid.
//!
//! Both go through [`Palette::nearest()`] or the palette role lookup; there
//! is no separate distance code here.

use crate::color::Srgb;
use crate::grid::{check_levels, GridError, IntensityGrid};
use crate::palette::{Palette, Role};
use crate::sample::RgbImage;

/// Default number of intensity levels.
pub const DEFAULT_LEVELS: u16 = 16;

/// Default side length of the square grid.
pub const DEFAULT_GRID_SIZE: usize = 128;

/// Map a luminance value onto one of `levels` equal-width bins.
///
/// `level = floor(y * levels / 255)` in integer arithmetic, clamped to
/// `levels - 1`, so only `y == 255` would otherwise land outside the range.
///
/// # Panics
///
/// Panics if `levels` is zero or above 256.
///
/// ```
/// use pixel_grid::quantize_luminance;
/// assert_eq!(quantize_luminance(0, 16), 0);
/// assert_eq!(quantize_luminance(128, 16), 8);
/// assert_eq!(quantize_luminance(255, 16), 15);
/// ```
#[inline]
pub fn quantize_luminance(y: u8, levels: u16) -> u8 {
    assert!(
        (1..=256).contains(&levels),
        "level count {levels} outside 1..=256"
    );
    let level = y as u32 * levels as u32 / 255;
    level.min(levels as u32 - 1) as u8
}

/// Palette role for a stored level.
///
/// The level range is split at multiples of `max(levels / 3, 1)`: below
/// the first split is primary, below the second is secondary, the rest is
/// accent. With 16 levels that is 0..=4, 5..=9 and 10..=15; the top bucket
/// absorbs the remainder.
///
/// ```
/// use pixel_grid::{bucket, Role};
/// assert_eq!(bucket(4, 16), Role::Primary);
/// assert_eq!(bucket(5, 16), Role::Secondary);
/// assert_eq!(bucket(10, 16), Role::Accent);
/// ```
#[inline]
pub fn bucket(level: u8, levels: u16) -> Role {
    let third = (levels / 3).max(1);
    let level = level as u16;
    if level < third {
        Role::Primary
    } else if level < 2 * third {
        Role::Secondary
    } else {
        Role::Accent
    }
}

/// Color for a stored level under `palette`.
#[inline]
pub fn level_color(level: u8, levels: u16, palette: &Palette) -> Srgb {
    palette.color(bucket(level, levels))
}

/// Turn a level grid into pixels, one pixel per cell.
pub fn colorize(grid: &IntensityGrid, palette: &Palette) -> RgbImage {
    let levels = grid.levels();
    let pixels = grid
        .cells()
        .iter()
        .map(|&level| level_color(level, levels, palette))
        .collect();
    RgbImage::from_parts(grid.side(), grid.side(), pixels)
}

/// Result of running a [`QuantizationStrategy`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Quantized {
    /// Re-themeable level grid (luminance strategy)
    Levels(IntensityGrid),
    /// Finished palette-colored image (nearest-color strategy)
    Colors(RgbImage),
}

/// How sampled colors are reduced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuantizationStrategy {
    /// Bucket luminance into `levels` brightness levels.
    Luminance { levels: u16 },
    /// Snap every sample to the nearest of the palette's five colors.
    NearestColor(Palette),
}

impl Default for QuantizationStrategy {
    fn default() -> Self {
        QuantizationStrategy::Luminance {
            levels: DEFAULT_LEVELS,
        }
    }
}

impl QuantizationStrategy {
    /// Quantize a sampled image.
    ///
    /// # Errors
    ///
    /// The luminance strategy needs a square, non-empty image and a level
    /// count in 1..=256; it returns a [`GridError`] otherwise. Nearest-color
    /// never fails.
    pub fn quantize(&self, image: &RgbImage) -> Result<Quantized, GridError> {
        match self {
            QuantizationStrategy::Luminance { levels } => {
                luminance_grid(image, *levels).map(Quantized::Levels)
            }
            QuantizationStrategy::NearestColor(palette) => {
                Ok(Quantized::Colors(nearest_colors(image, palette)))
            }
        }
    }
}

/// Mode A: one brightness level per sample of a square image.
///
/// # Errors
///
/// [`GridError::ShapeMismatch`] if the image is not square,
/// [`GridError::EmptyGrid`] if it is empty, and
/// [`GridError::InvalidLevelCount`] if `levels` is outside 1..=256.
pub fn luminance_grid(image: &RgbImage, levels: u16) -> Result<IntensityGrid, GridError> {
    let levels = check_levels(levels)?;
    if image.width() != image.height() {
        return Err(GridError::ShapeMismatch {
            side: image.width(),
            len: image.pixels().len(),
        });
    }
    let cells = image
        .pixels()
        .iter()
        .map(|p| quantize_luminance(p.luminance(), levels))
        .collect();
    IntensityGrid::new(image.width(), levels, cells)
}

/// Mode B: snap every sample to its nearest palette color.
pub fn nearest_colors(image: &RgbImage, palette: &Palette) -> RgbImage {
    image.map(|p| palette.color(palette.nearest(p).0))
}
