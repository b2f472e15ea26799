//! Raster surfaces the renderer draws onto.

use pixel_grid::{RgbImage, Srgb};

use crate::error::RenderError;

/// A 2-D raster target with canvas-like paint state.
///
/// Drawing is split into selecting a fill color and filling blocks with
/// it, so callers can avoid redundant paint-state changes. Implementations
/// clip blocks to their own bounds.
pub trait RenderSurface {
    /// Current size in pixels as `(width, height)`.
    fn size(&self) -> (usize, usize);

    /// Change the backing size. Contents are discarded.
    fn resize(&mut self, width: usize, height: usize);

    /// Acquire the surface for a full redraw.
    ///
    /// Returns [`RenderError::SurfaceUnavailable`] if the target cannot be
    /// drawn to; the render call is abandoned.
    fn begin_frame(&mut self) -> Result<(), RenderError>;

    /// Reset every pixel to the surface's clear color.
    fn clear(&mut self);

    /// Select the color used by subsequent [`fill_block`](Self::fill_block) calls.
    fn set_fill(&mut self, color: Srgb);

    /// Fill a rectangle with the current fill color.
    fn fill_block(&mut self, x: usize, y: usize, width: usize, height: usize);

    /// Select `color` and fill one rectangle with it.
    fn set_pixel_block(&mut self, x: usize, y: usize, width: usize, height: usize, color: Srgb) {
        self.set_fill(color);
        self.fill_block(x, y, width, height);
    }
}

/// Headless in-memory RGB surface.
///
/// Counts fill-color changes so the draw loop's batching can be observed.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    image: RgbImage,
    clear_color: Srgb,
    fill: Srgb,
    fill_changes: usize,
    frames: usize,
}

impl PixelBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            image: RgbImage::filled(width, height, Srgb::BLACK),
            clear_color: Srgb::BLACK,
            fill: Srgb::BLACK,
            fill_changes: 0,
            frames: 0,
        }
    }

    /// Use `color` for [`RenderSurface::clear`] instead of black.
    pub fn with_clear_color(mut self, color: Srgb) -> Self {
        self.clear_color = color;
        self.image.pixels_mut().fill(color);
        self
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Srgb {
        self.image.get(x, y)
    }

    pub fn pixels(&self) -> &[Srgb] {
        self.image.pixels()
    }

    /// Number of fill-color selections since creation or the last reset.
    pub fn fill_changes(&self) -> usize {
        self.fill_changes
    }

    /// Number of frames begun since creation or the last reset.
    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn reset_counters(&mut self) {
        self.fill_changes = 0;
        self.frames = 0;
    }

    /// Copy the current contents out as an image.
    pub fn to_image(&self) -> RgbImage {
        self.image.clone()
    }
}

impl RenderSurface for PixelBuffer {
    fn size(&self) -> (usize, usize) {
        (self.image.width(), self.image.height())
    }

    fn resize(&mut self, width: usize, height: usize) {
        self.image = RgbImage::filled(width, height, self.clear_color);
    }

    fn begin_frame(&mut self) -> Result<(), RenderError> {
        let (width, height) = self.size();
        if width == 0 || height == 0 {
            return Err(RenderError::SurfaceUnavailable { width, height });
        }
        self.frames += 1;
        Ok(())
    }

    fn clear(&mut self) {
        let color = self.clear_color;
        self.image.pixels_mut().fill(color);
    }

    fn set_fill(&mut self, color: Srgb) {
        self.fill = color;
        self.fill_changes += 1;
    }

    fn fill_block(&mut self, x: usize, y: usize, width: usize, height: usize) {
        let (surface_w, surface_h) = self.size();
        let x_end = (x + width).min(surface_w);
        let y_end = (y + height).min(surface_h);
        if x >= x_end || y >= y_end {
            return;
        }
        let fill = self.fill;
        let pixels = self.image.pixels_mut();
        for row in y..y_end {
            let start = row * surface_w;
            pixels[start + x..start + x_end].fill(fill);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_block_clips() {
        let mut buffer = PixelBuffer::new(4, 4);
        buffer.set_pixel_block(2, 2, 10, 10, Srgb::WHITE);

        assert_eq!(buffer.get(1, 1), Srgb::BLACK);
        assert_eq!(buffer.get(2, 2), Srgb::WHITE);
        assert_eq!(buffer.get(3, 3), Srgb::WHITE);
        assert_eq!(buffer.get(3, 1), Srgb::BLACK);
    }

    #[test]
    fn test_fill_block_outside_is_noop() {
        let mut buffer = PixelBuffer::new(2, 2);
        buffer.set_pixel_block(5, 0, 1, 1, Srgb::WHITE);
        buffer.set_pixel_block(0, 0, 0, 2, Srgb::WHITE);
        assert!(buffer.pixels().iter().all(|&p| p == Srgb::BLACK));
    }

    #[test]
    fn test_clear_uses_clear_color() {
        let grey = Srgb::new(50, 50, 50);
        let mut buffer = PixelBuffer::new(2, 2).with_clear_color(grey);
        buffer.set_pixel_block(0, 0, 2, 2, Srgb::WHITE);
        buffer.clear();
        assert!(buffer.pixels().iter().all(|&p| p == grey));
    }

    #[test]
    fn test_counts_fill_changes() {
        let mut buffer = PixelBuffer::new(2, 2);
        buffer.set_fill(Srgb::WHITE);
        buffer.fill_block(0, 0, 1, 1);
        buffer.fill_block(1, 0, 1, 1);
        assert_eq!(buffer.fill_changes(), 1);
        buffer.set_pixel_block(0, 1, 2, 1, Srgb::BLACK);
        assert_eq!(buffer.fill_changes(), 2);
        buffer.reset_counters();
        assert_eq!(buffer.fill_changes(), 0);
    }

    #[test]
    fn test_zero_sized_surface_is_unavailable() {
        let mut buffer = PixelBuffer::new(0, 10);
        assert!(matches!(
            buffer.begin_frame(),
            Err(RenderError::SurfaceUnavailable {
                width: 0,
                height: 10
            })
        ));
        assert_eq!(buffer.frames(), 0);
    }

    #[test]
    fn test_resize_discards_contents() {
        let mut buffer = PixelBuffer::new(1, 1);
        buffer.set_pixel_block(0, 0, 1, 1, Srgb::WHITE);
        buffer.resize(3, 2);
        assert_eq!(buffer.size(), (3, 2));
        assert_eq!(buffer.pixels().len(), 6);
        assert!(buffer.pixels().iter().all(|&p| p == Srgb::BLACK));
    }
}
