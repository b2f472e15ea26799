//! Test fixtures and constants.

use pixel_grid::{Bitmap, IntensityGrid, Palette, RgbImage, Srgb};
use pixel_portrait::rendering::encode_png;

/// The 4x4, four-level quadrant grid used throughout the scenario tests
pub const SCENARIO_CELLS: [u8; 16] = [0, 0, 1, 1, 0, 0, 1, 1, 2, 2, 3, 3, 2, 2, 3, 3];

pub fn scenario_grid() -> IntensityGrid {
    IntensityGrid::new(4, 4, SCENARIO_CELLS.to_vec()).unwrap()
}

/// Saturated, mutually distant role colors
pub fn vivid_palette() -> Palette {
    Palette::new(
        Srgb::new(220, 20, 60),
        Srgb::new(34, 139, 34),
        Srgb::new(30, 144, 255),
        Srgb::new(250, 250, 250),
        Srgb::new(10, 10, 10),
    )
}

/// Theme strings in the notations a theme file typically mixes
pub mod theme {
    pub const PRIMARY: &str = "346.8 77.2% 49.8%";
    pub const SECONDARY: &str = "#228b22";
    pub const ACCENT: &str = "rgb(30, 144, 255)";
    pub const BACKGROUND: &str = "hsl(0, 0%, 98%)";
    pub const TEXT: &str = "#0a0a0a";
}

/// Horizontal grey ramp from black (left) to white (right)
pub fn gradient_bitmap(width: usize, height: usize) -> Bitmap {
    let mut data = Vec::with_capacity(width * height * 4);
    for _ in 0..height {
        for x in 0..width {
            let v = (x * 255 / (width - 1).max(1)) as u8;
            data.extend_from_slice(&[v, v, v, 255]);
        }
    }
    Bitmap::new(width, height, data).unwrap()
}

/// PNG bytes of a horizontal grey ramp
pub fn gradient_png(width: usize, height: usize) -> Vec<u8> {
    let bitmap = gradient_bitmap(width, height);
    let pixels = (0..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .map(|(x, y)| bitmap.pixel(x, y))
        .collect();
    encode_png(&RgbImage::new(width, height, pixels).unwrap()).unwrap()
}
