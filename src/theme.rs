use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn name(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn palette(self) -> &'static Palette {
        match self {
            Theme::Light => &Palette::LIGHT,
            Theme::Dark => &Palette::DARK,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme `{other}` (light|dark)")),
        }
    }
}

/// Hex colors for one theme. Values are `#RRGGBB` or `#RRGGBBAA`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub bg: &'static str,
    pub text: &'static str,
    pub card: &'static str,
    pub card_pressed: &'static str,
    pub primary: &'static str,
    pub secondary: &'static str,
    pub header: &'static str,
    pub shadow: &'static str,
    pub border: &'static str,
}

impl Palette {
    pub const LIGHT: Self = Self {
        bg: "#F7F9FC",
        text: "#1A1A1A",
        card: "#FFFFFF",
        card_pressed: "#F0F0F0",
        primary: "#007AFF",
        secondary: "#34C759",
        header: "#E8ECEF",
        shadow: "#0000001A",
        border: "#E0E4E8",
    };

    pub const DARK: Self = Self {
        bg: "#1C2526",
        text: "#E6ECEF",
        card: "#2A3436",
        card_pressed: "#3A4446",
        primary: "#3399FF",
        secondary: "#40C78F",
        header: "#2F3A3C",
        shadow: "#0000004D",
        border: "#3A4648",
    };

    pub const KEYS: [&'static str; 9] = [
        "bg",
        "text",
        "card",
        "card_pressed",
        "primary",
        "secondary",
        "header",
        "shadow",
        "border",
    ];

    pub fn get(&self, key: &str) -> Option<&'static str> {
        let value = match key {
            "bg" => self.bg,
            "text" => self.text,
            "card" => self.card,
            "card_pressed" => self.card_pressed,
            "primary" => self.primary,
            "secondary" => self.secondary,
            "header" => self.header,
            "shadow" => self.shadow,
            "border" => self.border,
            _ => return None,
        };
        Some(value)
    }

    /// `(key, hex)` pairs in a fixed order.
    pub fn entries(&self) -> Vec<(&'static str, &'static str)> {
        Self::KEYS
            .iter()
            .filter_map(|k| self.get(k).map(|v| (*k, v)))
            .collect()
    }

    /// RGB triple for `key`, ignoring any alpha channel.
    pub fn rgb(&self, key: &str) -> Option<(u8, u8, u8)> {
        self.get(key).and_then(hex_to_rgb)
    }
}

pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if !(digits.len() == 6 || digits.len() == 8) || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}
