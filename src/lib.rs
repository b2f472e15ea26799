//! Pixel Portrait
//!
//! Turns photos into small palette-quantized pixel art, stores it as a
//! compact text artifact and renders it pixel-exactly, alone or as a
//! timed slideshow. The pure algorithms live in the `pixel-grid` crate;
//! this library adds the codec, rendering surfaces, slideshow driver and
//! configuration. Modules are public for integration testing.

pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
