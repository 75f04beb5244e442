//! Color types and utilities

use std::str::FromStr;
use thiserror::Error;

/// RGBA color with f32 components (0.0 to 1.0)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    /// Two-thirds white, the default idle background of the button
    pub const LIGHT_GRAY: Color = Color::rgb(2.0 / 3.0, 2.0 / 3.0, 2.0 / 3.0);
    /// One-third white, the default pressed background of the button
    pub const DARK_GRAY: Color = Color::rgb(1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create from u8 components (0-255)
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Create from hex value (0xRRGGBB)
    pub fn from_hex(hex: u32) -> Self {
        Self::from_rgba8(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
            255,
        )
    }

    /// Create a grayscale color
    pub fn gray(value: f32) -> Self {
        Self::rgb(value, value, value)
    }

    /// Set alpha and return new color
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self { a: alpha, ..self }
    }

    /// Multiply alpha by a factor (used for presentation opacity)
    pub fn fade(self, opacity: f32) -> Self {
        Self {
            a: self.a * opacity.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Component-wise linear interpolation
    pub fn lerp(self, other: Color, t: f32) -> Color {
        Color {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Convert to u8 array [r, g, b, a]
    pub fn to_rgba8(&self) -> [u8; 4] {
        [
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
            (self.a * 255.0).round() as u8,
        ]
    }
}

/// Error returned when a color string cannot be parsed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseColorError {
    /// The string does not start with '#'
    #[error("color must start with '#': {0}")]
    MissingHash(String),

    /// Wrong number of hex digits
    #[error("color must have 6 or 8 hex digits, got {len}: {input}")]
    InvalidLength { input: String, len: usize },

    /// A non-hex character was found
    #[error("invalid hex digit in color: {0}")]
    InvalidDigit(String),
}

impl FromStr for Color {
    type Err = ParseColorError;

    /// Parse `#RRGGBB` or `#RRGGBBAA`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('#')
            .ok_or_else(|| ParseColorError::MissingHash(trimmed.to_string()))?;

        if digits.len() != 6 && digits.len() != 8 {
            return Err(ParseColorError::InvalidLength {
                input: trimmed.to_string(),
                len: digits.len(),
            });
        }

        // from_str_radix accepts a leading '+', so check the digits first
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ParseColorError::InvalidDigit(trimmed.to_string()));
        }
        let value = u32::from_str_radix(digits, 16)
            .map_err(|_| ParseColorError::InvalidDigit(trimmed.to_string()))?;

        Ok(if digits.len() == 8 {
            Color::from_rgba8(
                ((value >> 24) & 0xFF) as u8,
                ((value >> 16) & 0xFF) as u8,
                ((value >> 8) & 0xFF) as u8,
                (value & 0xFF) as u8,
            )
        } else {
            Color::from_hex(value)
        })
    }
}
