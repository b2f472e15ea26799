use pixel_grid::{GridError, SampleError};
use thiserror::Error;

/// Top-level error for the photo-to-artifact and artifact-to-raster paths.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Decode failure: {0}")]
    Decode(#[from] DecodeFailure),

    #[error("Sampling error: {0}")]
    Sample(#[from] SampleError),

    #[error("Quantization error: {0}")]
    Grid(#[from] GridError),

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),
}

/// The source image could not be turned into a bitmap.
///
/// Surfaced to the caller as-is; nothing retries.
#[derive(Debug, Error)]
#[error("Bitmap could not be decoded: {reason}")]
pub struct DecodeFailure {
    pub reason: String,
}

impl DecodeFailure {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Artifact is not valid base64: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),

    #[error("Artifact cell {index} holds level {value}, codec allows {levels} levels")]
    LevelOutOfRange { index: usize, value: u8, levels: u16 },

    #[error("Grid uses {grid} levels, codec allows {codec}")]
    LevelCountMismatch { grid: u16, codec: u16 },

    #[error("Invalid grid: {0}")]
    Grid(#[from] GridError),
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Render surface unavailable ({width}x{height})")]
    SurfaceUnavailable { width: usize, height: usize },

    #[error("Unsupported dimensions: {width}x{height}")]
    UnsupportedDimensions { width: usize, height: usize },

    #[error("PNG encode error: {0}")]
    PngEncode(String),
}
