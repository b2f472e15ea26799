//! Pixel containers for sampler input and output.

use std::fmt;

use crate::color::Srgb;

/// Error type for sampler inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleError {
    /// Bitmap has a zero dimension
    EmptyBitmap {
        width: usize,
        height: usize,
    },
    /// Sample buffer does not match the stated dimensions
    DataLengthMismatch {
        /// Expected number of bytes or pixels
        expected: usize,
        /// Actual number supplied
        actual: usize,
    },
    /// Requested output has a zero dimension
    ZeroTarget {
        width: usize,
        height: usize,
    },
}

impl fmt::Display for SampleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleError::EmptyBitmap { width, height } => {
                write!(f, "bitmap has no pixels ({}x{})", width, height)
            }
            SampleError::DataLengthMismatch { expected, actual } => {
                write!(
                    f,
                    "sample buffer length mismatch: expected {}, got {}",
                    expected, actual
                )
            }
            SampleError::ZeroTarget { width, height } => {
                write!(f, "target size {}x{} is empty", width, height)
            }
        }
    }
}

impl std::error::Error for SampleError {}

/// A decoded source image: `width x height` RGBA8 samples, row-major.
///
/// Produced by an external decoder; the sampler only reads it. Alpha is
/// carried but ignored when sampling.
#[derive(Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Bitmap {
    /// Wrap interleaved RGBA bytes.
    ///
    /// # Errors
    ///
    /// - [`SampleError::EmptyBitmap`] if either dimension is zero
    /// - [`SampleError::DataLengthMismatch`] if `data.len() != width * height * 4`
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self, SampleError> {
        if width == 0 || height == 0 {
            return Err(SampleError::EmptyBitmap { width, height });
        }
        let expected = width * height * 4;
        if data.len() != expected {
            return Err(SampleError::DataLengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build an opaque bitmap from RGB pixels.
    pub fn from_rgb(image: &RgbImage) -> Self {
        let data = image
            .pixels()
            .iter()
            .flat_map(|p| [p.r, p.g, p.b, 255])
            .collect();
        Self {
            width: image.width(),
            height: image.height(),
            data,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw RGBA bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// RGB value at (`x`, `y`), alpha dropped.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Srgb {
        let i = (y * self.width + x) * 4;
        Srgb::new(self.data[i], self.data[i + 1], self.data[i + 2])
    }
}

impl fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// A `width x height` grid of RGB samples, row-major.
///
/// Output of the sampler and of nearest-color quantization, and the frame
/// type for the legacy bitmap slideshow.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RgbImage {
    width: usize,
    height: usize,
    pixels: Vec<Srgb>,
}

impl RgbImage {
    /// # Errors
    ///
    /// Returns [`SampleError::DataLengthMismatch`] if `pixels.len() != width * height`.
    pub fn new(width: usize, height: usize, pixels: Vec<Srgb>) -> Result<Self, SampleError> {
        if pixels.len() != width * height {
            return Err(SampleError::DataLengthMismatch {
                expected: width * height,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Internal constructor for buffers that are correct by construction.
    pub(crate) fn from_parts(width: usize, height: usize, pixels: Vec<Srgb>) -> Self {
        debug_assert_eq!(pixels.len(), width * height);
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn filled(width: usize, height: usize, color: Srgb) -> Self {
        Self::from_parts(width, height, vec![color; width * height])
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[Srgb] {
        &self.pixels
    }

    /// Mutable row-major pixels; the dimensions stay fixed.
    pub fn pixels_mut(&mut self) -> &mut [Srgb] {
        &mut self.pixels
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Srgb {
        self.pixels[y * self.width + x]
    }

    /// Apply `f` to every pixel, keeping dimensions.
    pub fn map<F: FnMut(Srgb) -> Srgb>(&self, f: F) -> RgbImage {
        Self::from_parts(
            self.width,
            self.height,
            self.pixels.iter().copied().map(f).collect(),
        )
    }
}
