use crate::types::{CardError, Result};

/// Normalized RGB color, each channel in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RgbColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl RgbColor {
    pub const WHITE: RgbColor = RgbColor::new(1.0, 1.0, 1.0);
    pub const BLACK: RgbColor = RgbColor::new(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Equivalent of `hex_to_rgb` for an 8-bit gray level.
    pub const fn gray(level: u8) -> Self {
        let v = level as f32 / 255.0;
        Self::new(v, v, v)
    }
}

/// Parse `#rrggbb` or `rrggbb` into a normalized color.
pub fn hex_to_rgb(hex: &str) -> Result<RgbColor> {
    let digits = hex.trim();
    let digits = digits.strip_prefix('#').unwrap_or(digits);

    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(CardError::InvalidColorFormat(hex.to_string()));
    }

    let channel = |i: usize| -> Result<f32> {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .map(|v| v as f32 / 255.0)
            .map_err(|_| CardError::InvalidColorFormat(hex.to_string()))
    };

    Ok(RgbColor::new(channel(0)?, channel(2)?, channel(4)?))
}
