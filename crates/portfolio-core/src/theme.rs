use crate::constants::{ACCENT_DARK, ACCENT_LIGHT};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    /// An explicit page class wins; otherwise fall back to the OS preference.
    pub fn resolve(explicit: Option<&str>, prefers_light: bool) -> Self {
        match explicit.and_then(Self::from_name) {
            Some(theme) => theme,
            None if prefers_light => Theme::Light,
            None => Theme::Dark,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn accent_hex(&self) -> &'static str {
        match self {
            Theme::Light => ACCENT_LIGHT,
            Theme::Dark => ACCENT_DARK,
        }
    }

    /// Accent as authored, for targets that do no sRGB encoding.
    pub fn accent_srgba(&self) -> [f32; 4] {
        let [r, g, b] = parse_hex_rgb(self.accent_hex()).unwrap_or([0, 229, 160]);
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
    }

    /// Accent in linear space, ready for an sRGB render target.
    pub fn accent_rgba(&self) -> [f32; 4] {
        let [r, g, b, a] = self.accent_srgba();
        [srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b), a]
    }
}

pub fn parse_hex_rgb(hex: &str) -> Option<[u8; 3]> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

#[inline]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_class_beats_preference() {
        assert_eq!(Theme::resolve(Some("dark"), true), Theme::Dark);
        assert_eq!(Theme::resolve(Some("light"), false), Theme::Light);
        assert_eq!(Theme::resolve(Some("sepia"), true), Theme::Light);
        assert_eq!(Theme::resolve(None, false), Theme::Dark);
    }

    #[test]
    fn accents_parse() {
        assert_eq!(parse_hex_rgb("#00b37a"), Some([0x00, 0xb3, 0x7a]));
        assert_eq!(parse_hex_rgb("#00e5a0"), Some([0x00, 0xe5, 0xa0]));
        assert_eq!(parse_hex_rgb("#0e5"), None);
        assert_eq!(parse_hex_rgb("#zzzzzz"), None);
    }

    #[test]
    fn srgb_accent_matches_hex() {
        let [r, g, b, a] = Theme::Light.accent_srgba();
        assert_eq!((r, g, b, a), (0.0, 0xb3 as f32 / 255.0, 0x7a as f32 / 255.0, 1.0));
    }

    #[test]
    fn linear_accent_is_darker_than_srgb() {
        let [_, g, _, a] = Theme::Dark.accent_rgba();
        assert!(g < 229.0 / 255.0 && g > 0.0);
        assert_eq!(a, 1.0);
    }
}
