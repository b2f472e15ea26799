//! Sampler: crop a source bitmap and resample it onto a small pixel grid.
//!
//! Resampling is strictly nearest-neighbor. Every output pixel copies
//! exactly one source pixel, which keeps the result blocky.

mod bitmap;
mod crop;

pub use bitmap::{Bitmap, RgbImage, SampleError};
pub use crop::{center_crop, CropRect};

use crate::color::Srgb;

/// Crop the center square of `bitmap` and resample it to `n x n`.
///
/// # Errors
///
/// Returns [`SampleError::ZeroTarget`] if `n == 0`.
///
/// # Example
///
/// ```
/// use pixel_grid::{sample_square, Bitmap};
///
/// // 4x2 bitmap: the center square is columns 1..3
/// let mut data = Vec::new();
/// for x in 0..8u8 {
///     data.extend_from_slice(&[x * 10, 0, 0, 255]);
/// }
/// let bitmap = Bitmap::new(4, 2, data).unwrap();
/// let grid = sample_square(&bitmap, 2).unwrap();
/// assert_eq!(grid.width(), 2);
/// assert_eq!(grid.get(0, 0).r, 10);
/// ```
pub fn sample_square(bitmap: &Bitmap, n: usize) -> Result<RgbImage, SampleError> {
    sample_aspect(bitmap, n, n)
}

/// Crop `bitmap` to the aspect ratio of `width x height`, centered on both
/// axes, and resample it to exactly that size.
///
/// # Errors
///
/// Returns [`SampleError::ZeroTarget`] if either target dimension is zero.
pub fn sample_aspect(
    bitmap: &Bitmap,
    width: usize,
    height: usize,
) -> Result<RgbImage, SampleError> {
    if width == 0 || height == 0 {
        return Err(SampleError::ZeroTarget { width, height });
    }
    let crop = center_crop(bitmap.width(), bitmap.height(), width, height);
    let pixels = resample(crop, width, height, |x, y| bitmap.pixel(x, y));
    RgbImage::new(width, height, pixels)
}

/// Nearest-neighbor resize of a whole image.
///
/// Used to scale legacy bitmaps onto a display without smoothing.
pub fn resize_nearest(image: &RgbImage, width: usize, height: usize) -> RgbImage {
    if image.width() == 0 || image.height() == 0 {
        return RgbImage::filled(width, height, Srgb::BLACK);
    }
    let crop = CropRect {
        x: 0,
        y: 0,
        width: image.width(),
        height: image.height(),
    };
    let pixels = resample(crop, width, height, |x, y| image.get(x, y));
    RgbImage::from_parts(width, height, pixels)
}

/// Map each destination pixel center back into `crop` and copy that sample.
fn resample<F>(crop: CropRect, dst_w: usize, dst_h: usize, sample: F) -> Vec<Srgb>
where
    F: Fn(usize, usize) -> Srgb,
{
    let mut out = Vec::with_capacity(dst_w * dst_h);
    for dy in 0..dst_h {
        let sy = crop.y + ((2 * dy + 1) * crop.height) / (2 * dst_h);
        for dx in 0..dst_w {
            let sx = crop.x + ((2 * dx + 1) * crop.width) / (2 * dst_w);
            out.push(sample(sx, sy));
        }
    }
    out
}
