//! Square grids of quantized intensity levels.

use std::fmt;

/// Maximum number of levels a single byte can hold.
pub const MAX_LEVELS: u16 = 256;

/// Error type for grid construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Side length of zero
    EmptyGrid,
    /// Level count outside 1..=256
    InvalidLevelCount(u16),
    /// Cell count does not equal `side * side`
    ShapeMismatch {
        /// Requested side length
        side: usize,
        /// Number of cells supplied
        len: usize,
    },
    /// A cell value is not below the level count
    LevelOutOfRange {
        /// Row-major index of the offending cell
        index: usize,
        /// The cell's value
        value: u8,
        /// Configured level count
        levels: u16,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::EmptyGrid => write!(f, "grid side must be positive"),
            GridError::InvalidLevelCount(levels) => {
                write!(f, "level count {} outside 1..={}", levels, MAX_LEVELS)
            }
            GridError::ShapeMismatch { side, len } => {
                write!(f, "{} cells cannot form a {}x{} grid", len, side, side)
            }
            GridError::LevelOutOfRange {
                index,
                value,
                levels,
            } => write!(
                f,
                "cell {} has level {} but only {} levels are allowed",
                index, value, levels
            ),
        }
    }
}

impl std::error::Error for GridError {}

/// Validate a level count.
pub fn check_levels(levels: u16) -> Result<u16, GridError> {
    if (1..=MAX_LEVELS).contains(&levels) {
        Ok(levels)
    } else {
        Err(GridError::InvalidLevelCount(levels))
    }
}

/// Exact integer square root, if `len` is a perfect square.
///
/// ```
/// use pixel_grid::grid::integer_sqrt;
/// assert_eq!(integer_sqrt(16_384), Some(128));
/// assert_eq!(integer_sqrt(15), None);
/// ```
pub fn integer_sqrt(len: usize) -> Option<usize> {
    let mut root = (len as f64).sqrt() as usize;
    // Correct float rounding in either direction.
    while root * root > len {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= len {
        root += 1;
    }
    (root * root == len).then_some(root)
}

/// A square, row-major grid of intensity levels.
///
/// Invariants: `side > 0`, `cells.len() == side * side`, and every cell is
/// strictly below `levels`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IntensityGrid {
    side: usize,
    levels: u16,
    cells: Vec<u8>,
}

impl IntensityGrid {
    /// Build a grid, validating every invariant.
    pub fn new(side: usize, levels: u16, cells: Vec<u8>) -> Result<Self, GridError> {
        if side == 0 {
            return Err(GridError::EmptyGrid);
        }
        check_levels(levels)?;
        if cells.len() != side * side {
            return Err(GridError::ShapeMismatch {
                side,
                len: cells.len(),
            });
        }
        if let Some((index, &value)) = cells
            .iter()
            .enumerate()
            .find(|(_, &v)| v as u16 >= levels)
        {
            return Err(GridError::LevelOutOfRange {
                index,
                value,
                levels,
            });
        }
        Ok(Self {
            side,
            levels,
            cells,
        })
    }

    /// Build a grid from a flat cell list, deriving the side from its length.
    pub fn from_cells(levels: u16, cells: Vec<u8>) -> Result<Self, GridError> {
        let side = integer_sqrt(cells.len()).ok_or(GridError::ShapeMismatch {
            side: (cells.len() as f64).sqrt() as usize,
            len: cells.len(),
        })?;
        Self::new(side, levels, cells)
    }

    /// A grid where every cell holds `level`.
    pub fn filled(side: usize, levels: u16, level: u8) -> Result<Self, GridError> {
        Self::new(side, levels, vec![level; side * side])
    }

    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    #[inline]
    pub fn levels(&self) -> u16 {
        self.levels
    }

    #[inline]
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Level at column `x`, row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `x` or `y` is outside the grid.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        assert!(x < self.side && y < self.side, "cell ({x}, {y}) out of bounds");
        self.cells[y * self.side + x]
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> std::slice::ChunksExact<'_, u8> {
        self.cells.chunks_exact(self.side)
    }
}
