//! Drawing tools and stroke configuration.

use peniko::Color;
use peniko::color::{Srgb, parse_color};
use serde::{Deserialize, Serialize};

/// Available drawing tools.
///
/// Only [`ToolKind::Pen`] captures paths; the others are selectable but
/// draw nothing yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Pen,
    Eraser,
    Line,
    Circle,
    Rectangle,
}

impl ToolKind {
    /// Whether this tool records freehand paths.
    pub fn captures_paths(self) -> bool {
        matches!(self, ToolKind::Pen)
    }
}

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    /// The default pen color (violet, `#8b5cf6`).
    pub fn violet() -> Self {
        Self::new(0x8b, 0x5c, 0xf6, 255)
    }

    /// Parse `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let parsed = parse_color(&format!("#{hex}")).ok()?;
        Some(parsed.to_alpha_color::<Srgb>().into())
    }

    /// Format as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Stroke applied to newly drawn paths.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: SerializableColor,
    pub width: f64,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: SerializableColor::violet(),
            width: 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tool_is_pen() {
        assert_eq!(ToolKind::default(), ToolKind::Pen);
        assert!(ToolKind::Pen.captures_paths());
        assert!(!ToolKind::Eraser.captures_paths());
        assert!(!ToolKind::Circle.captures_paths());
    }

    #[test]
    fn test_hex_parsing() {
        assert_eq!(SerializableColor::from_hex("#8b5cf6"), Some(SerializableColor::violet()));
        assert_eq!(SerializableColor::from_hex("fff"), Some(SerializableColor::new(255, 255, 255, 255)));
        assert_eq!(
            SerializableColor::from_hex("#00000080"),
            Some(SerializableColor::new(0, 0, 0, 128))
        );
        assert_eq!(SerializableColor::from_hex("#f008"), Some(SerializableColor::new(255, 0, 0, 136)));
        assert_eq!(SerializableColor::from_hex("#12345"), None);
        assert_eq!(SerializableColor::from_hex("#zzzzzz"), None);
    }

    #[test]
    fn test_hex_rejects_non_digits() {
        assert_eq!(SerializableColor::from_hex("#+f+f+f"), None);
        assert_eq!(SerializableColor::from_hex("#-1-1-1"), None);
        assert_eq!(SerializableColor::from_hex("# fffff"), None);
        assert_eq!(SerializableColor::from_hex("red"), None);
        assert_eq!(SerializableColor::from_hex("#"), None);
    }

    #[test]
    fn test_hex_formatting() {
        assert_eq!(SerializableColor::violet().to_hex(), "#8b5cf6");
        assert_eq!(SerializableColor::new(1, 2, 3, 4).to_hex(), "#01020304");
    }

    #[test]
    fn test_peniko_conversion() {
        let color: Color = SerializableColor::violet().into();
        assert_eq!(SerializableColor::from(color), SerializableColor::violet());
    }

    #[test]
    fn test_default_stroke() {
        let style = StrokeStyle::default();
        assert_eq!(style.color.to_hex(), "#8b5cf6");
        assert_eq!(style.width, 2.0);
    }
}
