//! Artifact codec: intensity grids to text and back.
//!
//! Each cell is one byte, base64-encoded with the standard alphabet. There
//! is no header; the grid side is recovered from the byte count.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use pixel_grid::grid::{check_levels, integer_sqrt};
use pixel_grid::{IntensityGrid, DEFAULT_GRID_SIZE, DEFAULT_LEVELS};

use crate::error::CodecError;

/// Encodes and decodes grids for one deployment's level count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtifactCodec {
    levels: u16,
    default_side: usize,
}

impl Default for ArtifactCodec {
    fn default() -> Self {
        Self {
            levels: DEFAULT_LEVELS,
            default_side: DEFAULT_GRID_SIZE,
        }
    }
}

impl ArtifactCodec {
    /// # Errors
    ///
    /// Returns [`CodecError::Grid`] if `levels` is outside 1..=256 or
    /// `default_side` is zero.
    pub fn new(levels: u16, default_side: usize) -> Result<Self, CodecError> {
        check_levels(levels)?;
        if default_side == 0 {
            return Err(pixel_grid::GridError::EmptyGrid.into());
        }
        Ok(Self {
            levels,
            default_side,
        })
    }

    pub fn levels(&self) -> u16 {
        self.levels
    }

    /// Side used when an artifact's length is not a perfect square.
    pub fn default_side(&self) -> usize {
        self.default_side
    }

    /// Serialize a grid.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::LevelCountMismatch`] if the grid was quantized
    /// with more levels than this codec accepts.
    pub fn encode(&self, grid: &IntensityGrid) -> Result<String, CodecError> {
        if grid.levels() > self.levels {
            return Err(CodecError::LevelCountMismatch {
                grid: grid.levels(),
                codec: self.levels,
            });
        }
        Ok(STANDARD.encode(grid.cells()))
    }

    /// Deserialize an artifact.
    ///
    /// A byte count that is not a positive perfect square is not an error:
    /// the cells are truncated or zero-padded to `default_side²` and a
    /// warning is logged. Bad base64 and out-of-range levels are errors.
    pub fn decode(&self, artifact: &str) -> Result<IntensityGrid, CodecError> {
        let mut cells = STANDARD.decode(artifact.trim())?;

        if let Some((index, &value)) = cells
            .iter()
            .enumerate()
            .find(|(_, &v)| v as u16 >= self.levels)
        {
            return Err(CodecError::LevelOutOfRange {
                index,
                value,
                levels: self.levels,
            });
        }

        let side = match integer_sqrt(cells.len()) {
            Some(side) if side > 0 => side,
            _ => {
                tracing::warn!(
                    len = cells.len(),
                    fallback_side = self.default_side,
                    "Artifact length is not a perfect square, using default grid size"
                );
                cells.resize(self.default_side * self.default_side, 0);
                self.default_side
            }
        };

        Ok(IntensityGrid::new(side, self.levels, cells)?)
    }
}
