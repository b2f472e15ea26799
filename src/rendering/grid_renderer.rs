//! Pixel-exact renderer for level grids and legacy bitmaps.
//!
//! The draw loop walks cells in row-major order and only changes the fill
//! color when a cell's color differs from the previous cell's. Runs of
//! equal color therefore cost one paint-state change, not one per cell.

use pixel_grid::{level_color, resize_nearest, IntensityGrid, Palette, RgbImage, Srgb};

use crate::error::RenderError;
use crate::rendering::surface::RenderSurface;

/// One slide: either a re-themeable level grid or a finished bitmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// Compact path: levels mapped to palette roles at draw time
    Levels(IntensityGrid),
    /// Legacy path: pixels drawn as-is, palette ignored
    Bitmap(RgbImage),
}

impl From<IntensityGrid> for Frame {
    fn from(grid: IntensityGrid) -> Self {
        Frame::Levels(grid)
    }
}

impl From<RgbImage> for Frame {
    fn from(image: RgbImage) -> Self {
        Frame::Bitmap(image)
    }
}

/// Inputs of the last completed draw.
#[derive(Debug, Clone, PartialEq)]
struct DrawKey {
    frame: Frame,
    palette: Palette,
    width: usize,
    height: usize,
}

/// Draws frames onto a [`RenderSurface`], remembering the last draw so
/// unchanged inputs can be skipped.
#[derive(Debug, Default)]
pub struct GridRenderer {
    last: Option<DrawKey>,
}

impl GridRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear `surface` and draw `frame` into a `width x height` area.
    ///
    /// Level grids use a cell size of `width / N` on both axes, with cell
    /// edges at `floor(i * width / N)` so the grid spans exactly `width`
    /// pixels whatever N is. Bitmaps are resized nearest-neighbor to
    /// `width x height` and drawn pixel by pixel.
    ///
    /// Drawing twice with identical inputs produces an identical raster.
    pub fn render<S: RenderSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        frame: &Frame,
        palette: &Palette,
        width: usize,
        height: usize,
    ) -> Result<(), RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::UnsupportedDimensions { width, height });
        }
        surface.begin_frame()?;
        surface.clear();

        match frame {
            Frame::Levels(grid) => draw_levels(surface, grid, palette, width),
            Frame::Bitmap(image) => draw_bitmap(surface, image, width, height),
        }

        self.last = Some(DrawKey {
            frame: frame.clone(),
            palette: *palette,
            width,
            height,
        });
        Ok(())
    }

    /// Draw only if frame, palette or dimensions differ from the last draw.
    ///
    /// Returns whether a draw happened.
    pub fn render_if_changed<S: RenderSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        frame: &Frame,
        palette: &Palette,
        width: usize,
        height: usize,
    ) -> Result<bool, RenderError> {
        let unchanged = self.last.as_ref().is_some_and(|last| {
            last.width == width
                && last.height == height
                && last.palette == *palette
                && last.frame == *frame
        });
        if unchanged {
            return Ok(false);
        }
        self.render(surface, frame, palette, width, height)?;
        Ok(true)
    }

    /// Forget the last draw so the next `render_if_changed` always draws.
    pub fn invalidate(&mut self) {
        self.last = None;
    }
}

/// Pixel edge of cell `i` when `count` cells span `extent` pixels.
#[inline]
fn edge(i: usize, extent: usize, count: usize) -> usize {
    i * extent / count
}

fn draw_levels<S: RenderSurface + ?Sized>(
    surface: &mut S,
    grid: &IntensityGrid,
    palette: &Palette,
    width: usize,
) {
    let n = grid.side();
    let levels = grid.levels();
    let mut current: Option<Srgb> = None;

    for (row, cells) in grid.rows().enumerate() {
        let y0 = edge(row, width, n);
        let y1 = edge(row + 1, width, n);
        for (col, &level) in cells.iter().enumerate() {
            let color = level_color(level, levels, palette);
            if current != Some(color) {
                surface.set_fill(color);
                current = Some(color);
            }
            let x0 = edge(col, width, n);
            let x1 = edge(col + 1, width, n);
            surface.fill_block(x0, y0, x1 - x0, y1 - y0);
        }
    }
}

fn draw_bitmap<S: RenderSurface + ?Sized>(
    surface: &mut S,
    image: &RgbImage,
    width: usize,
    height: usize,
) {
    let scaled = resize_nearest(image, width, height);
    let mut current: Option<Srgb> = None;

    for (y, row) in scaled.pixels().chunks_exact(width).enumerate() {
        for (x, &color) in row.iter().enumerate() {
            if current != Some(color) {
                surface.set_fill(color);
                current = Some(color);
            }
            surface.fill_block(x, y, 1, 1);
        }
    }
}
