//! HSL to RGB conversion.

use super::Srgb;

/// Convert hue/saturation/lightness to an 8-bit sRGB color.
///
/// `hue` is in degrees and wraps, `saturation` and `lightness` are
/// fractions in 0.0..=1.0 (values outside are clamped).
pub fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> Srgb {
    let h = hue.rem_euclid(360.0) / 60.0;
    let s = saturation.clamp(0.0, 1.0);
    let l = lightness.clamp(0.0, 1.0);

    let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
    let (r1, g1, b1) = match h as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = l - chroma / 2.0;
    let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;

    Srgb::new(channel(r1), channel(g1), channel(b1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_hues() {
        assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), Srgb::new(255, 0, 0));
        assert_eq!(hsl_to_rgb(120.0, 1.0, 0.5), Srgb::new(0, 255, 0));
        assert_eq!(hsl_to_rgb(240.0, 1.0, 0.5), Srgb::new(0, 0, 255));
    }

    #[test]
    fn test_hue_wraps() {
        assert_eq!(hsl_to_rgb(360.0, 1.0, 0.5), hsl_to_rgb(0.0, 1.0, 0.5));
        assert_eq!(hsl_to_rgb(-120.0, 1.0, 0.5), hsl_to_rgb(240.0, 1.0, 0.5));
    }

    #[test]
    fn test_achromatic() {
        assert_eq!(hsl_to_rgb(200.0, 0.0, 0.0), Srgb::BLACK);
        assert_eq!(hsl_to_rgb(200.0, 0.0, 1.0), Srgb::WHITE);
        assert_eq!(hsl_to_rgb(0.0, 0.0, 0.5), Srgb::new(128, 128, 128));
    }
}
