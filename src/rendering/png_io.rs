//! PNG decoding into bitmaps and encoding of rendered images.

use std::io::Cursor;

use pixel_grid::{Bitmap, RgbImage};

use crate::error::{DecodeFailure, RenderError};

/// Decode PNG bytes into an RGBA [`Bitmap`].
///
/// Palette, low-bit-depth and 16-bit images are normalized to 8-bit
/// channels. Grayscale is widened to RGB; missing alpha becomes opaque.
pub fn decode_png(bytes: &[u8]) -> Result<Bitmap, DecodeFailure> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| DecodeFailure::new(e.to_string()))?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| DecodeFailure::new(e.to_string()))?;
    let raw = &buf[..info.buffer_size()];
    let (width, height) = (info.width as usize, info.height as usize);

    let rgba: Vec<u8> = match info.color_type {
        png::ColorType::Rgba => raw.to_vec(),
        png::ColorType::Rgb => raw
            .chunks_exact(3)
            .flat_map(|px| [px[0], px[1], px[2], 255])
            .collect(),
        png::ColorType::Grayscale => raw.iter().flat_map(|&v| [v, v, v, 255]).collect(),
        png::ColorType::GrayscaleAlpha => raw
            .chunks_exact(2)
            .flat_map(|px| [px[0], px[0], px[0], px[1]])
            .collect(),
        png::ColorType::Indexed => {
            return Err(DecodeFailure::new("indexed PNG was not expanded"));
        }
    };

    Bitmap::new(width, height, rgba).map_err(|e| DecodeFailure::new(e.to_string()))
}

/// Encode an image as an 8-bit RGB PNG.
pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>, RenderError> {
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(RenderError::UnsupportedDimensions { width, height });
    }
    let (w, h) = match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) => (w, h),
        _ => return Err(RenderError::UnsupportedDimensions { width, height }),
    };
    let data: Vec<u8> = image.pixels().iter().flat_map(|p| p.to_bytes()).collect();

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, w, h);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(&data)
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}
