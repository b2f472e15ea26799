//! End-to-end pipeline: decoded bitmap in, artifact or themed image out.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use pixel_grid::{
    colorize, luminance_grid, nearest_colors, sample_aspect, sample_square, Bitmap,
    IntensityGrid, Palette, RgbImage, DEFAULT_GRID_SIZE, DEFAULT_LEVELS,
};

use crate::error::{DecodeFailure, PipelineError};
use crate::rendering::{decode_png, Frame, GridRenderer, RenderSurface};
use crate::services::codec::ArtifactCodec;

/// Where source bitmaps come from.
///
/// Decoding is the only asynchronous step of the pipeline; it resolves once
/// with a bitmap or a [`DecodeFailure`] and is never retried.
#[async_trait]
pub trait BitmapSource: Send + Sync {
    async fn decode(&self) -> Result<Bitmap, DecodeFailure>;
}

/// Reads and decodes a PNG file off the async runtime.
#[derive(Debug, Clone)]
pub struct PngFileSource {
    path: PathBuf,
}

impl PngFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl BitmapSource for PngFileSource {
    async fn decode(&self) -> Result<Bitmap, DecodeFailure> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || {
            let bytes = std::fs::read(&path)
                .map_err(|e| DecodeFailure::new(format!("{}: {e}", path.display())))?;
            decode_png(&bytes)
        })
        .await
        .map_err(|e| DecodeFailure::new(format!("Decode task failed: {e}")))?
    }
}

/// An already decoded bitmap.
#[derive(Debug, Clone)]
pub struct MemorySource {
    bitmap: Bitmap,
}

impl MemorySource {
    pub fn new(bitmap: Bitmap) -> Self {
        Self { bitmap }
    }
}

#[async_trait]
impl BitmapSource for MemorySource {
    async fn decode(&self) -> Result<Bitmap, DecodeFailure> {
        Ok(self.bitmap.clone())
    }
}

/// Sampler, quantizer and codec wired together for one grid size and
/// level count.
#[derive(Debug, Clone, Copy)]
pub struct ArtPipeline {
    grid_size: usize,
    levels: u16,
    codec: ArtifactCodec,
}

impl Default for ArtPipeline {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            levels: DEFAULT_LEVELS,
            codec: ArtifactCodec::default(),
        }
    }
}

impl ArtPipeline {
    /// The grid size doubles as the codec's fallback side.
    pub fn new(grid_size: usize, levels: u16) -> Result<Self, PipelineError> {
        Ok(Self {
            grid_size,
            levels,
            codec: ArtifactCodec::new(levels, grid_size)?,
        })
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    pub fn levels(&self) -> u16 {
        self.levels
    }

    pub fn codec(&self) -> &ArtifactCodec {
        &self.codec
    }

    /// Decode, crop square, sample and quantize to a level grid.
    pub async fn quantize(
        &self,
        source: &dyn BitmapSource,
    ) -> Result<IntensityGrid, PipelineError> {
        let bitmap = source.decode().await?;
        let sampled = sample_square(&bitmap, self.grid_size)?;
        let grid = luminance_grid(&sampled, self.levels)?;
        tracing::debug!(
            source_width = bitmap.width(),
            source_height = bitmap.height(),
            side = grid.side(),
            levels = grid.levels(),
            "Quantized bitmap"
        );
        Ok(grid)
    }

    /// Produce the compact, re-themeable artifact for a source image.
    ///
    /// Nothing is produced if decoding fails.
    pub async fn create_artifact(
        &self,
        source: &dyn BitmapSource,
    ) -> Result<String, PipelineError> {
        let grid = self.quantize(source).await?;
        Ok(self.codec.encode(&grid)?)
    }

    /// Produce a finished five-color image sized for a `width x height` slot.
    pub async fn posterize(
        &self,
        source: &dyn BitmapSource,
        palette: &Palette,
        width: usize,
        height: usize,
    ) -> Result<RgbImage, PipelineError> {
        let bitmap = source.decode().await?;
        let sampled = sample_aspect(&bitmap, width, height)?;
        Ok(nearest_colors(&sampled, palette))
    }

    /// First stage of display: artifact text back to levels.
    pub fn decode_artifact(&self, artifact: &str) -> Result<IntensityGrid, PipelineError> {
        Ok(self.codec.decode(artifact)?)
    }

    /// Second stage of display: levels to palette colors.
    pub fn colorize(&self, grid: &IntensityGrid, palette: &Palette) -> RgbImage {
        colorize(grid, palette)
    }

    /// Decode an artifact and draw it onto `surface` at `size x size`.
    pub fn render_artifact<S: RenderSurface + ?Sized>(
        &self,
        surface: &mut S,
        artifact: &str,
        palette: &Palette,
        size: usize,
    ) -> Result<(), PipelineError> {
        let frame = Frame::Levels(self.decode_artifact(artifact)?);
        GridRenderer::new().render(surface, &frame, palette, size, size)?;
        Ok(())
    }
}
