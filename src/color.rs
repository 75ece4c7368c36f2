use egui::Color32;

use crate::error::ColorParseError;

const NAMED_COLORS: &[(&str, Color32)] = &[
    ("black", Color32::from_rgb(0x00, 0x00, 0x00)),
    ("darkgray", Color32::from_rgb(0x44, 0x44, 0x44)),
    ("gray", Color32::from_rgb(0x88, 0x88, 0x88)),
    ("lightgray", Color32::from_rgb(0xCC, 0xCC, 0xCC)),
    ("white", Color32::from_rgb(0xFF, 0xFF, 0xFF)),
    ("red", Color32::from_rgb(0xFF, 0x00, 0x00)),
    ("green", Color32::from_rgb(0x00, 0xFF, 0x00)),
    ("blue", Color32::from_rgb(0x00, 0x00, 0xFF)),
    ("yellow", Color32::from_rgb(0xFF, 0xFF, 0x00)),
    ("cyan", Color32::from_rgb(0x00, 0xFF, 0xFF)),
    ("magenta", Color32::from_rgb(0xFF, 0x00, 0xFF)),
    ("aqua", Color32::from_rgb(0x00, 0xFF, 0xFF)),
    ("fuchsia", Color32::from_rgb(0xFF, 0x00, 0xFF)),
    ("darkgrey", Color32::from_rgb(0x44, 0x44, 0x44)),
    ("grey", Color32::from_rgb(0x88, 0x88, 0x88)),
    ("lightgrey", Color32::from_rgb(0xCC, 0xCC, 0xCC)),
    ("lime", Color32::from_rgb(0x00, 0xFF, 0x00)),
    ("maroon", Color32::from_rgb(0x80, 0x00, 0x00)),
    ("navy", Color32::from_rgb(0x00, 0x00, 0x80)),
    ("olive", Color32::from_rgb(0x80, 0x80, 0x00)),
    ("purple", Color32::from_rgb(0x80, 0x00, 0x80)),
    ("silver", Color32::from_rgb(0xC0, 0xC0, 0xC0)),
    ("teal", Color32::from_rgb(0x00, 0x80, 0x80)),
];

/// Parse `#RRGGBB`, `#AARRGGBB` or a color name (case-insensitive).
pub fn parse_color(spec: &str) -> Result<Color32, ColorParseError> {
    let err = || ColorParseError {
        input: spec.to_owned(),
    };

    if let Some(hex) = spec.strip_prefix('#') {
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(err());
        }
        let value = u32::from_str_radix(hex, 16).map_err(|_| err())?;
        let [a, r, g, b] = value.to_be_bytes();
        return match hex.len() {
            6 => Ok(Color32::from_rgb(r, g, b)),
            8 => Ok(Color32::from_rgba_unmultiplied(r, g, b, a)),
            _ => Err(err()),
        };
    }

    let name = spec.to_ascii_lowercase();
    NAMED_COLORS
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, color)| *color)
        .ok_or_else(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rgb_hex() {
        assert_eq!(parse_color("#FF0000"), Ok(Color32::RED));
        assert_eq!(parse_color("#00ff00"), Ok(Color32::from_rgb(0, 255, 0)));
    }

    #[test]
    fn test_parse_argb_hex() {
        let color = parse_color("#800000FF").unwrap();
        assert_eq!(color.a(), 0x80);
        assert_eq!((color.r(), color.g()), (0, 0));
        assert!(color.b() > 0);

        assert_eq!(parse_color("#FF112233"), Ok(Color32::from_rgb(0x11, 0x22, 0x33)));
    }

    #[test]
    fn test_parse_named() {
        assert_eq!(parse_color("red"), Ok(Color32::RED));
        assert_eq!(parse_color("Teal"), Ok(Color32::from_rgb(0, 0x80, 0x80)));
        assert_eq!(parse_color("GREY"), parse_color("gray"));
    }

    #[test]
    fn test_reject_malformed() {
        for bad in ["notacolor", "", "#", "#FFF", "#GG0000", "#+FFFFF", "FF0000", " #FF0000", "#FF00000"] {
            let err = parse_color(bad).unwrap_err();
            assert_eq!(err.input, bad);
        }
    }
}
