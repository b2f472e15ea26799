//! Color types and parsing
//!
//! Everything in the pipeline works on 8-bit sRGB triples. Theme colors
//! arrive as free-form strings and are normalized here.

mod hsl;
mod srgb;

pub use hsl::hsl_to_rgb;
pub use srgb::Srgb;
