use serde::Deserialize;

use pixel_grid::{Palette, Role, Srgb};

/// Palette role colors as written by the theme, in any supported notation
/// (hex, `rgb()`, `hsl()` or bare `"H S% L%"`).
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ThemeConfig {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
    pub text: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            primary: "#333333".to_string(),
            secondary: "#888888".to_string(),
            accent: "#dddddd".to_string(),
            background: "#ffffff".to_string(),
            text: "#000000".to_string(),
        }
    }
}

/// Color used for a role whose string cannot be parsed.
pub const FALLBACK_COLOR: Srgb = Srgb::BLACK;

impl ThemeConfig {
    fn raw(&self, role: Role) -> &str {
        match role {
            Role::Primary => &self.primary,
            Role::Secondary => &self.secondary,
            Role::Accent => &self.accent,
            Role::Background => &self.background,
            Role::Text => &self.text,
        }
    }

    /// Resolve every role to a color.
    ///
    /// Never fails: an unparseable role is logged and rendered black.
    pub fn resolve(&self) -> Palette {
        Role::ALL
            .iter()
            .fold(Palette::default(), |palette, &role| {
                let raw = self.raw(role);
                let color = raw.parse::<Srgb>().unwrap_or_else(|e| {
                    tracing::warn!(
                        role = role.name(),
                        value = raw,
                        error = %e,
                        "Invalid theme color, using black"
                    );
                    FALLBACK_COLOR
                });
                palette.with(role, color)
            })
    }
}
