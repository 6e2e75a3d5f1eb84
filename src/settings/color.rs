//! Color values for the configurable highlight tags.

use std::fmt;
use std::str::FromStr;

/// Named colors accepted in the config file and from the color picker.
const NAMED_COLORS: &[(&str, [u8; 3])] = &[
    ("black", [0x00, 0x00, 0x00]),
    ("white", [0xff, 0xff, 0xff]),
    ("red", [0xff, 0x00, 0x00]),
    ("green", [0x00, 0x80, 0x00]),
    ("blue", [0x00, 0x00, 0xff]),
    ("yellow", [0xff, 0xff, 0x00]),
    ("orange", [0xff, 0xa5, 0x00]),
    ("purple", [0x80, 0x00, 0x80]),
    ("magenta", [0xff, 0x00, 0xff]),
    ("cyan", [0x00, 0xff, 0xff]),
    ("gray", [0x80, 0x80, 0x80]),
    ("grey", [0x80, 0x80, 0x80]),
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color '{0}': expected #rgb, #rrggbb or a color name")]
pub struct ColorError(pub String);

/// A color as the user spelled it, plus the RGB triple used for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Color {
    repr: String,
    rgb: [u8; 3],
}

impl Color {
    pub(crate) fn from_parts(repr: &str, rgb: [u8; 3]) -> Self {
        Self {
            repr: repr.to_string(),
            rgb,
        }
    }

    pub fn rgb(&self) -> [u8; 3] {
        self.rgb
    }

    pub fn as_str(&self) -> &str {
        &self.repr
    }

    fn parse_hex(hex: &str) -> Option<[u8; 3]> {
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match hex.len() {
            3 => {
                let mut rgb = [0u8; 3];
                for (slot, digit) in rgb.iter_mut().zip(hex.chars()) {
                    let v = digit.to_digit(16)? as u8;
                    *slot = v * 16 + v;
                }
                Some(rgb)
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some([r, g, b])
            }
            _ => None,
        }
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let rgb = if let Some(hex) = trimmed.strip_prefix('#') {
            Self::parse_hex(hex)
        } else {
            let lower = trimmed.to_ascii_lowercase();
            NAMED_COLORS
                .iter()
                .find(|(name, _)| *name == lower)
                .map(|(_, rgb)| *rgb)
        };

        rgb.map(|rgb| Color {
            repr: trimmed.to_string(),
            rgb,
        })
        .ok_or_else(|| ColorError(s.to_string()))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr)
    }
}
