use anyhow::Result;
use eframe::egui::Color32;

/// Part colors used when the configuration does not name any.
pub const DEFAULT_PALETTE: [&str; 7] = [
    "#bf5c32", "#efad57", "#69766f", "#f7e5cc", "#936454", "#9ed6cb", "#9d8f7f",
];

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub background: Color32,
    pub stroke: Color32,
    /// Fill for parts that carry no color of their own.
    pub default_fill: Color32,
    pub stroke_weight: f32,
    pub toast: Color32,
}

impl Theme {
    pub fn paper() -> Self {
        Self {
            name: "paper".to_string(),
            background: Color32::from_rgb(0xFF, 0xFB, 0xD6),
            stroke: Color32::from_rgb(0x5E, 0x1A, 0x13),
            default_fill: Color32::WHITE,
            stroke_weight: 3.0,
            toast: Color32::from_rgb(0x5E, 0x1A, 0x13),
        }
    }

    pub fn blueprint() -> Self {
        Self {
            name: "blueprint".to_string(),
            background: Color32::from_rgb(0x14, 0x2B, 0x4A),
            stroke: Color32::from_rgb(0xE4, 0xEE, 0xF7),
            default_fill: Color32::from_rgb(0x1F, 0x3D, 0x66),
            stroke_weight: 2.0,
            toast: Color32::WHITE,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "blueprint" => Self::blueprint(),
            _ => Self::paper(),
        }
    }

    pub fn toggled(&self) -> Self {
        if self.name == "blueprint" {
            Self::paper()
        } else {
            Self::blueprint()
        }
    }

    /// Apply opacity to a color
    pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
        Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), (opacity * 255.0) as u8)
    }
}

/// Parse `#rrggbb` (leading `#` optional).
pub fn parse_hex_color(value: &str) -> Result<Color32> {
    let hex = value.strip_prefix('#').unwrap_or(value);
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        anyhow::bail!("Invalid color: {value}. Expected '#rrggbb'.");
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16);
    Ok(Color32::from_rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Format as `#rrggbb`.
pub fn to_hex(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

pub fn default_palette() -> Vec<Color32> {
    DEFAULT_PALETTE
        .iter()
        .filter_map(|hex| parse_hex_color(hex).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_with_and_without_hash() {
        assert_eq!(
            parse_hex_color("#bf5c32").unwrap(),
            Color32::from_rgb(0xBF, 0x5C, 0x32)
        );
        assert_eq!(
            parse_hex_color("9ED6CB").unwrap(),
            Color32::from_rgb(0x9E, 0xD6, 0xCB)
        );
    }

    #[test]
    fn hex_round_trips() {
        for hex in DEFAULT_PALETTE {
            assert_eq!(to_hex(parse_hex_color(hex).unwrap()), hex);
        }
    }

    #[test]
    fn rejects_malformed_hex() {
        for bad in ["", "#fff", "#12345g", "#1234567", "#ééé"] {
            assert!(parse_hex_color(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn default_palette_is_complete() {
        assert_eq!(default_palette().len(), DEFAULT_PALETTE.len());
    }

    #[test]
    fn toggling_twice_returns_to_start() {
        let theme = Theme::paper();
        assert_eq!(theme.toggled().toggled().name, theme.name);
        assert_eq!(Theme::from_name("unknown").name, "paper");
    }
}
