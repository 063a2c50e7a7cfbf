//! Series colors: the fixed [`ColorMap`] and the RGB interpolation used by the detail chart.
//!
//! Colors (de)serialize as `#rrggbb` strings so a host can carry them in JSON configuration.

use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::models::SeriesKey;

/// Opaque 8-bit RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Linear per-channel blend in sRGB space, rounded to the nearest integer.
    ///
    /// `t` is clamped to `[0, 1]`.
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let mix = |a: u8, b: u8| -> u8 {
            let v = a as f64 + (b as f64 - a as f64) * t;
            v.round().clamp(0.0, 255.0) as u8
        };
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

impl From<Rgb> for RGBColor {
    fn from(c: Rgb) -> Self {
        RGBColor(c.r, c.g, c.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| Error::InvalidColor(s.to_string()))?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(Error::InvalidColor(s.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| Error::InvalidColor(s.to_string()))
        };
        Ok(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl Serialize for Rgb {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, Visitor};
        struct RgbVisitor;

        impl<'de> Visitor<'de> for RgbVisitor {
            type Value = Rgb;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "a color string like \"#e41a1c\"")
            }

            fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                s.parse::<Rgb>().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(RgbVisitor)
    }
}

/// Total mapping from [`SeriesKey`] to its fill color. Built once, never mutated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorMap([Rgb; 5]);

/// Default palette, indexed by [`SeriesKey`] order.
const SERIES_PALETTE: [Rgb; 5] = [
    Rgb::new(0xe4, 0x1a, 0x1c), // GPT-4     red
    Rgb::new(0x37, 0x7e, 0xb8), // Gemini    blue
    Rgb::new(0x4d, 0xaf, 0x4a), // PaLM-2    green
    Rgb::new(0x98, 0x4e, 0xa3), // Claude    purple
    Rgb::new(0xff, 0x7f, 0x00), // LLaMA-3.1 orange
];

impl ColorMap {
    /// Colors in [`SeriesKey::ALL`] order.
    pub const fn new(colors: [Rgb; 5]) -> Self {
        Self(colors)
    }

    #[inline]
    pub fn get(&self, key: SeriesKey) -> Rgb {
        self.0[key.index()]
    }
}

impl Default for ColorMap {
    fn default() -> Self {
        Self(SERIES_PALETTE)
    }
}
