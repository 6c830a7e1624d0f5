//! RGBA colors, hex conversion and face shading

use serde::{Deserialize, Serialize};

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rrggbb` or `#rrggbbaa`
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
        match digits.len() {
            6 => Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Self::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }

    /// Lowercase hex; alpha is only written when not opaque
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Lighten (positive) or darken (negative) by a percentage.
    ///
    /// Each RGB channel becomes `floor(c * (100 + percent) / 100)`, clamped
    /// to `0..=255`. Alpha is left alone.
    pub fn shade(&self, percent: i32) -> Self {
        let scale = |c: u8| -> u8 {
            let scaled = (c as i32 * (100 + percent)).div_euclid(100);
            scaled.clamp(0, 255) as u8
        };
        Self {
            r: scale(self.r),
            g: scale(self.g),
            b: scale(self.b),
            a: self.a,
        }
    }

    /// Replace alpha with `opacity` in `0.0..=1.0`
    pub fn with_opacity(&self, opacity: f32) -> Self {
        Self {
            a: (opacity.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..*self
        }
    }

    /// Normalized `[r, g, b, a]` for vertex data
    pub fn to_f32_array(&self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }
}

/// Scene palette
pub mod palette {
    use super::Color;

    pub const GROUND_BASE: Color = Color::rgb(0xd1, 0xba, 0x94);
    pub const PATH: Color = Color::rgb(0xe0, 0xc8, 0x9f);
    pub const SAND_LIGHT: Color = Color::rgb(0xeb, 0xd7, 0xb2);
    pub const SAND_DARK: Color = Color::rgb(0xbf, 0xa0, 0x75);
    pub const SAND_DETAIL: Color = Color::rgb(0xbf, 0xa0, 0x75);
    pub const PEBBLE_LIGHT: Color = Color::rgb(0xd4, 0xc3, 0xa3);
    pub const PEBBLE_DARK: Color = Color::rgb(0x8b, 0x73, 0x55);
    pub const HEAT_HAZE: Color = Color::rgba(255, 255, 255, 13);

    pub const SKY_TOP: Color = Color::rgb(0x3b, 0x82, 0xf6);
    pub const SKY_BOTTOM: Color = Color::rgb(0xb4, 0xcf, 0xef);
    pub const NIGHT_SKY_TOP: Color = Color::rgb(0x0f, 0x17, 0x2a);
    pub const NIGHT_SKY_BOTTOM: Color = Color::rgb(0x1e, 0x29, 0x3b);

    pub const MOUNTAIN_FAR: Color = Color::rgb(0xbf, 0xdb, 0xfe);
    pub const MOUNTAIN_NEAR: Color = Color::rgb(0xe5, 0xe7, 0xeb);
    pub const NIGHT_MOUNTAIN_FAR: Color = Color::rgb(0x0f, 0x17, 0x2a);
    pub const NIGHT_MOUNTAIN_NEAR: Color = Color::rgb(0x1e, 0x29, 0x3b);
    pub const NIGHT_GROUND: Color = Color::rgb(0x2d, 0x37, 0x48);
    pub const NIGHT_PATH: Color = Color::rgb(0x3a, 0x4a, 0x5b);
    pub const CLOUD: Color = Color::rgba(255, 255, 255, 102);

    pub const DINO_SKIN: Color = Color::rgb(0x4a, 0xde, 0x80);
    pub const DINO_BELLY: Color = Color::rgb(0xfe, 0xf0, 0x8a);
    pub const DINO_SPOTS: Color = Color::rgb(0x15, 0x80, 0x3d);
    pub const DINO_EYE: Color = Color::rgb(0xff, 0xff, 0xff);

    pub const CACTUS_MAIN: Color = Color::rgb(0x16, 0x65, 0x34);
    pub const CACTUS_LIGHT: Color = Color::rgb(0x22, 0xc5, 0x5e);
    pub const ROCK_LIGHT: Color = Color::rgb(0x9c, 0xa3, 0xaf);
    pub const ROCK_DARK: Color = Color::rgb(0x4b, 0x55, 0x63);
    pub const SANDSTONE_LIGHT: Color = Color::rgb(0xc9, 0xac, 0x7b);
    pub const SANDSTONE_DARK: Color = Color::rgb(0xa0, 0x82, 0x54);
    pub const DRIFTWOOD: Color = Color::rgb(0x8b, 0x5a, 0x38);
    pub const DRIFTWOOD_LIGHT: Color = Color::rgb(0xaa, 0x73, 0x4a);
    pub const BUSH: Color = Color::rgb(0xb6, 0x8a, 0x55);
    pub const BUSH_HIGHLIGHT: Color = Color::rgb(0xd8, 0xb1, 0x79);
    pub const BONE: Color = Color::rgb(0xf1, 0xed, 0xe0);
    pub const BONE_SHADOW: Color = Color::rgb(0xd6, 0xcc, 0xb7);

    pub const BIRD_BODY: Color = Color::rgb(0x7c, 0x3a, 0xed);
    pub const BIRD_WING: Color = Color::rgb(0xa7, 0x8b, 0xfa);
}
