//! 8-bit sRGB color type
//!
//! Samples coming out of the sampler, palette entries and rendered pixels
//! all share this representation. Distances are computed directly on the
//! 0..=255 channel values.

use std::fmt;
use std::str::FromStr;

use super::hsl::hsl_to_rgb;
use crate::palette::ParseColorError;

/// Luma weights (ITU-R BT.601).
const LUMA_R: f64 = 0.299;
const LUMA_G: f64 = 0.587;
const LUMA_B: f64 = 0.114;

/// A color in sRGB space with 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Srgb {
    /// Red channel (0..=255)
    pub r: u8,
    /// Green channel (0..=255)
    pub g: u8,
    /// Blue channel (0..=255)
    pub b: u8,
}

impl Srgb {
    /// Neutral fallback used when a theme color cannot be parsed.
    pub const BLACK: Srgb = Srgb { r: 0, g: 0, b: 0 };

    /// White, mostly useful in tests and as a background default.
    pub const WHITE: Srgb = Srgb {
        r: 255,
        g: 255,
        b: 255,
    };

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a byte array [R, G, B].
    #[inline]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Perceived brightness, rounded to the nearest integer.
    ///
    /// `Y = 0.299 R + 0.587 G + 0.114 B`, always within 0..=255.
    ///
    /// # Example
    /// ```
    /// use pixel_grid::Srgb;
    /// assert_eq!(Srgb::new(255, 255, 255).luminance(), 255);
    /// assert_eq!(Srgb::new(255, 0, 0).luminance(), 76);
    /// ```
    #[inline]
    pub fn luminance(self) -> u8 {
        let y = LUMA_R * self.r as f64 + LUMA_G * self.g as f64 + LUMA_B * self.b as f64;
        y.round().clamp(0.0, 255.0) as u8
    }

    /// Squared Euclidean distance in RGB space.
    ///
    /// Squared distances preserve ordering, so nearest-color searches never
    /// need the square root.
    #[inline]
    pub fn distance_squared(self, other: Srgb) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }

    /// Lowercase `#rrggbb` representation.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Srgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Srgb {
    type Err = ParseColorError;

    /// Parse a color from one of the textual forms themes commonly use.
    ///
    /// Supported formats (case-insensitive, surrounding whitespace trimmed):
    /// - `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`, with or without the hash
    /// - `rgb(r, g, b)` and `rgba(r, g, b, a)`, channels as 0..=255 or percentages
    /// - `hsl(h, s%, l%)` and `hsla(h, s%, l%, a)`
    /// - bare HSL triplets such as `222.2 47.4% 11.2%`
    ///
    /// Alpha is accepted but discarded.
    ///
    /// # Examples
    ///
    /// ```
    /// use pixel_grid::Srgb;
    ///
    /// let red: Srgb = "#F00".parse().unwrap();
    /// assert_eq!(red, Srgb::new(255, 0, 0));
    ///
    /// let green: Srgb = "rgb(0, 128, 0)".parse().unwrap();
    /// assert_eq!(green, Srgb::new(0, 128, 0));
    ///
    /// let blue: Srgb = "hsl(240, 100%, 50%)".parse().unwrap();
    /// assert_eq!(blue, Srgb::new(0, 0, 255));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseColorError::Empty);
        }
        let lower = s.to_ascii_lowercase();

        if let Some(args) = functional_args(&lower, &["rgba", "rgb"]) {
            return parse_rgb_args(args);
        }
        if let Some(args) = functional_args(&lower, &["hsla", "hsl"]) {
            return parse_hsl_args(args);
        }
        if let Some(hex) = lower.strip_prefix('#') {
            return parse_hex(hex);
        }
        if lower.contains('%') || lower.contains(char::is_whitespace) {
            return parse_hsl_args(&lower);
        }
        parse_hex(&lower)
    }
}

/// Return the argument list of `name(...)` for the first matching name.
fn functional_args<'a>(s: &'a str, names: &[&str]) -> Option<&'a str> {
    names.iter().find_map(|name| {
        let rest = s.strip_prefix(name)?.trim_start();
        let inner = rest.strip_prefix('(')?.strip_suffix(')')?;
        Some(inner.trim())
    })
}

fn split_components(args: &str) -> Vec<&str> {
    args.split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect()
}

fn parse_number(part: &str) -> Result<f64, ParseColorError> {
    part.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ParseColorError::InvalidComponent(part.to_string()))
}

fn parse_hex(hex: &str) -> Result<Srgb, ParseColorError> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ParseColorError::InvalidHex(hex.to_string()));
    }
    let digit = |i: usize, len: usize| {
        u8::from_str_radix(&hex[i..i + len], 16)
            .map_err(|_| ParseColorError::InvalidHex(hex.to_string()))
    };

    match hex.len() {
        // Shorthand: expand each digit by multiplying by 17 (0xF -> 0xFF)
        3 | 4 => Ok(Srgb::new(digit(0, 1)? * 17, digit(1, 1)? * 17, digit(2, 1)? * 17)),
        6 | 8 => Ok(Srgb::new(digit(0, 2)?, digit(2, 2)?, digit(4, 2)?)),
        len => Err(ParseColorError::InvalidLength(len)),
    }
}

fn parse_rgb_args(args: &str) -> Result<Srgb, ParseColorError> {
    let parts = split_components(args);
    if parts.len() != 3 && parts.len() != 4 {
        return Err(ParseColorError::UnknownFormat(args.to_string()));
    }

    let mut channels = [0u8; 3];
    for (channel, part) in channels.iter_mut().zip(&parts) {
        let value = match part.strip_suffix('%') {
            Some(pct) => parse_number(pct)? * 255.0 / 100.0,
            None => parse_number(part)?,
        };
        if !(0.0..=255.0).contains(&value) {
            return Err(ParseColorError::InvalidComponent(part.to_string()));
        }
        *channel = value.round() as u8;
    }
    Ok(Srgb::from_bytes(channels))
}

fn parse_hsl_args(args: &str) -> Result<Srgb, ParseColorError> {
    let parts = split_components(args);
    if parts.len() != 3 && parts.len() != 4 {
        return Err(ParseColorError::UnknownFormat(args.to_string()));
    }

    let hue = parse_number(parts[0].strip_suffix("deg").unwrap_or(parts[0]))?;
    let percent = |part: &str| -> Result<f64, ParseColorError> {
        let value = parse_number(part.strip_suffix('%').unwrap_or(part))?;
        if !(0.0..=100.0).contains(&value) {
            return Err(ParseColorError::InvalidComponent(part.to_string()));
        }
        Ok(value / 100.0)
    };
    let saturation = percent(parts[1])?;
    let lightness = percent(parts[2])?;

    Ok(hsl_to_rgb(hue, saturation, lightness))
}
