use std::fmt;

use image::Rgba;

/// Accent color as produced by the picker.
///
/// The string is stored exactly as given so that reading it back yields the
/// same value; parsing happens only when the compositor needs pixels.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AccentColor(String);

impl AccentColor {
    pub fn new(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parsed color, `None` when the string is not `#RGB` or `#RRGGBB`.
    pub fn to_rgba(&self) -> Option<Rgba<u8>> {
        parse_hex_color(&self.0)
    }
}

impl fmt::Display for AccentColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccentColor {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Parse `#RGB`, `#RRGGBB` or `#RRGGBBAA` (leading `#` optional).
pub fn parse_hex_color(value: &str) -> Option<Rgba<u8>> {
    let hex = value.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if !hex.is_ascii() {
        return None;
    }

    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    match hex.len() {
        3 => {
            let expand = |index: usize| {
                u8::from_str_radix(&hex[index..index + 1], 16)
                    .ok()
                    .map(|value| value * 17)
            };
            Some(Rgba([expand(0)?, expand(1)?, expand(2)?, 255]))
        }
        6 => Some(Rgba([channel(0..2)?, channel(2..4)?, channel(4..6)?, 255])),
        8 => Some(Rgba([
            channel(0..2)?,
            channel(2..4)?,
            channel(4..6)?,
            channel(6..8)?,
        ])),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accent_round_trip_keeps_exact_string() {
        let color = AccentColor::new("#FF0000");
        assert_eq!(color.as_str(), "#FF0000");
        assert_eq!(color.to_rgba(), Some(Rgba([255, 0, 0, 255])));
    }

    #[test]
    fn test_parse_short_and_alpha_forms() {
        assert_eq!(parse_hex_color("#0af"), Some(Rgba([0x00, 0xaa, 0xff, 255])));
        assert_eq!(parse_hex_color("0369A1"), Some(Rgba([0x03, 0x69, 0xa1, 255])));
        assert_eq!(parse_hex_color("#11223380"), Some(Rgba([0x11, 0x22, 0x33, 0x80])));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_hex_color(""), None);
        assert_eq!(parse_hex_color("#12345"), None);
        assert_eq!(parse_hex_color("#zzzzzz"), None);
        assert_eq!(parse_hex_color("#ééé"), None);
    }
}
