//! Named theme palette and nearest-color matching.

use std::fmt;

use super::error::PaletteError;
use crate::color::Srgb;

/// A named slot in the theme.
///
/// Declaration order matters: it is the tie-break order for
/// [`Palette::nearest()`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    Primary,
    Secondary,
    Accent,
    Background,
    Text,
}

impl Role {
    /// All roles in declaration order.
    pub const ALL: [Role; 5] = [
        Role::Primary,
        Role::Secondary,
        Role::Accent,
        Role::Background,
        Role::Text,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Role::Primary => "primary",
            Role::Secondary => "secondary",
            Role::Accent => "accent",
            Role::Background => "background",
            Role::Text => "text",
        }
    }

    #[inline]
    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The five resolved theme colors.
///
/// The luminance path only reads primary, secondary and accent; the
/// nearest-color path matches against all five.
///
/// # Example
///
/// ```
/// use pixel_grid::{Palette, Role, Srgb};
///
/// let palette = Palette::from_strs("#000", "#555", "#aaa", "#fff", "#f00").unwrap();
/// let (role, distance) = palette.nearest(Srgb::new(250, 250, 250));
/// assert_eq!(role, Role::Background);
/// assert_eq!(distance, 3 * 5 * 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Palette {
    colors: [Srgb; 5],
}

impl Palette {
    pub const fn new(
        primary: Srgb,
        secondary: Srgb,
        accent: Srgb,
        background: Srgb,
        text: Srgb,
    ) -> Self {
        Self {
            colors: [primary, secondary, accent, background, text],
        }
    }

    /// Parse all five roles strictly.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::ParseColor`] naming the first role whose
    /// string could not be parsed.
    pub fn from_strs(
        primary: &str,
        secondary: &str,
        accent: &str,
        background: &str,
        text: &str,
    ) -> Result<Self, PaletteError> {
        let inputs = [primary, secondary, accent, background, text];
        let mut colors = [Srgb::BLACK; 5];
        for ((slot, input), role) in colors.iter_mut().zip(inputs).zip(Role::ALL) {
            *slot = input.parse().map_err(|source| PaletteError::ParseColor {
                role: role.name(),
                source,
            })?;
        }
        Ok(Self { colors })
    }

    #[inline]
    pub fn color(&self, role: Role) -> Srgb {
        self.colors[role.index()]
    }

    /// Replace the color of one role.
    pub fn with(mut self, role: Role, color: Srgb) -> Self {
        self.colors[role.index()] = color;
        self
    }

    /// Iterate `(role, color)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Role, Srgb)> + '_ {
        Role::ALL.into_iter().zip(self.colors.iter().copied())
    }

    /// Find the role whose color is closest to `color`.
    ///
    /// Returns `(role, squared distance)`. Only a strictly smaller distance
    /// replaces the current best, so ties resolve to the earlier role.
    #[inline]
    pub fn nearest(&self, color: Srgb) -> (Role, u32) {
        let mut best = (Role::Primary, u32::MAX);
        for (role, candidate) in self.iter() {
            let dist = color.distance_squared(candidate);
            if dist < best.1 {
                best = (role, dist);
            }
        }
        best
    }
}

impl Default for Palette {
    /// A neutral grey ramp, dark to light, with black text on white.
    fn default() -> Self {
        Self::new(
            Srgb::new(0x33, 0x33, 0x33),
            Srgb::new(0x88, 0x88, 0x88),
            Srgb::new(0xdd, 0xdd, 0xdd),
            Srgb::WHITE,
            Srgb::BLACK,
        )
    }
}
