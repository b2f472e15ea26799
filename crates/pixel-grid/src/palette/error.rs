//! Error types for palette operations
//!
//! This module provides error types for color parsing and palette validation.

use std::fmt;

/// Error type for parsing color strings.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseColorError {
    /// Input was empty or whitespace only
    Empty,
    /// Hex string has invalid length (must be 3, 4, 6 or 8 digits after stripping '#')
    InvalidLength(usize),
    /// Non-hexadecimal character in a hex color
    InvalidHex(String),
    /// A numeric component was malformed or out of range
    InvalidComponent(String),
    /// Input did not match any supported notation
    UnknownFormat(String),
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseColorError::Empty => write!(f, "empty color string"),
            ParseColorError::InvalidLength(len) => {
                write!(
                    f,
                    "invalid hex color length {} (expected 3, 4, 6 or 8 digits)",
                    len
                )
            }
            ParseColorError::InvalidHex(s) => write!(f, "invalid hex color: {}", s),
            ParseColorError::InvalidComponent(s) => {
                write!(f, "invalid color component: {}", s)
            }
            ParseColorError::UnknownFormat(s) => write!(f, "unrecognized color format: {}", s),
        }
    }
}

impl std::error::Error for ParseColorError {}

/// Error type for palette construction.
#[derive(Debug, Clone, PartialEq)]
pub enum PaletteError {
    /// A role's color string could not be parsed
    ParseColor {
        /// Role name the color was supplied for
        role: &'static str,
        /// Underlying parse failure
        source: ParseColorError,
    },
}

impl fmt::Display for PaletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaletteError::ParseColor { role, source } => {
                write!(f, "invalid {} color: {}", role, source)
            }
        }
    }
}

impl std::error::Error for PaletteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PaletteError::ParseColor { source, .. } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color_error_display() {
        assert_eq!(
            ParseColorError::InvalidLength(5).to_string(),
            "invalid hex color length 5 (expected 3, 4, 6 or 8 digits)"
        );
        assert_eq!(ParseColorError::Empty.to_string(), "empty color string");
    }

    #[test]
    fn test_palette_error_display_names_role() {
        let err = PaletteError::ParseColor {
            role: "accent",
            source: ParseColorError::UnknownFormat("nope".into()),
        };
        assert_eq!(
            err.to_string(),
            "invalid accent color: unrecognized color format: nope"
        );
    }
}
