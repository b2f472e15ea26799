//! Assertion helpers for tests.

use pixel_grid::Srgb;
use pixel_portrait::rendering::PixelBuffer;
use pretty_assertions::assert_eq;

/// Assert every pixel of a rectangle has one color
pub fn assert_region(
    surface: &PixelBuffer,
    x: usize,
    y: usize,
    width: usize,
    height: usize,
    expected: Srgb,
) {
    for py in y..y + height {
        for px in x..x + width {
            assert_eq!(
                surface.get(px, py),
                expected,
                "Pixel ({px}, {py}) outside expected {width}x{height} block at ({x}, {y})"
            );
        }
    }
}

/// Assert bytes start with the PNG signature
pub fn assert_png(bytes: &[u8]) {
    assert!(
        bytes.starts_with(b"\x89PNG\r\n\x1a\n"),
        "Expected PNG image, got {} bytes starting with {:?}",
        bytes.len(),
        &bytes[..8.min(bytes.len())]
    );
}
