//! Drawing intensity grids and bitmaps onto raster surfaces.

pub mod grid_renderer;
pub mod png_io;
pub mod surface;

pub use grid_renderer::{Frame, GridRenderer};
pub use png_io::{decode_png, encode_png};
pub use surface::{PixelBuffer, RenderSurface};
