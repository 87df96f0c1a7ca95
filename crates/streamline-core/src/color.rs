// File: crates/streamline-core/src/color.rs
// Summary: RGBA colour value with CSS-like parsing (`#rgb`, `#rrggbb[aa]`, `rgb()`, `rgba()`, `none`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ChartError;

/// Straight (non-premultiplied) 8-bit RGBA colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same colour with alpha given as a 0..=1 fraction.
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self { a: unit_to_u8(alpha), ..self }
    }

    pub const fn is_transparent(&self) -> bool {
        self.a == 0
    }
}

fn unit_to_u8(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.is_ascii() {
        return None;
    }
    let digits = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let mut it = hex.chars().map(|c| c.to_digit(16).map(|d| (d * 17) as u8));
            Some(Color::rgb(it.next()??, it.next()??, it.next()??))
        }
        6 => Some(Color::rgb(digits(&hex[0..2])?, digits(&hex[2..4])?, digits(&hex[4..6])?)),
        8 => Some(Color::rgba(
            digits(&hex[0..2])?,
            digits(&hex[2..4])?,
            digits(&hex[4..6])?,
            digits(&hex[6..8])?,
        )),
        _ => None,
    }
}

fn parse_functional(body: &str, with_alpha: bool) -> Option<Color> {
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    let expected = if with_alpha { 4 } else { 3 };
    if parts.len() != expected {
        return None;
    }
    let channel = |s: &str| s.parse::<f64>().ok().filter(|v| (0.0..=255.0).contains(v)).map(|v| v.round() as u8);
    let mut c = Color::rgb(channel(parts[0])?, channel(parts[1])?, channel(parts[2])?);
    if with_alpha {
        let a = parts[3].parse::<f64>().ok().filter(|v| v.is_finite())?;
        c.a = unit_to_u8(a);
    }
    Some(c)
}

impl FromStr for Color {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim().to_ascii_lowercase();
        let parsed = if t == "none" || t == "transparent" {
            Some(Color::TRANSPARENT)
        } else if let Some(hex) = t.strip_prefix('#') {
            parse_hex(hex)
        } else if let Some(body) = t.strip_prefix("rgba(").and_then(|r| r.strip_suffix(')')) {
            parse_functional(body, true)
        } else if let Some(body) = t.strip_prefix("rgb(").and_then(|r| r.strip_suffix(')')) {
            parse_functional(body, false)
        } else {
            None
        };
        parsed.ok_or_else(|| ChartError::InvalidColor(s.to_string()))
    }
}

impl TryFrom<String> for Color {
    type Error = ChartError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}
