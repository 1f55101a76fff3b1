//! Colour type and the two generator curves behind the palette tables.
//!
//! `Srgb` uses `f64` components in [0, 1]. The conversions here are pure
//! functions; [`crate::palette`] samples them once into lookup tables.

use std::f64::consts::PI;

use crate::error::EngineError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// sRGB colour with components nominally in [0, 1].
///
/// Serializes as a hex string `"#rrggbb"`; the round-trip quantizes to 8 bits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Srgb {
    pub const BLACK: Srgb = Srgb {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    /// Parses a hex colour like "#ff00aa" or "ff00aa" (case insensitive).
    pub fn from_hex(hex: &str) -> Result<Srgb, EngineError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(EngineError::UnknownChoice {
                param: "hex colour".into(),
                value: hex.to_string(),
            });
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| EngineError::UnknownChoice {
                param: "hex colour".into(),
                value: hex.to_string(),
            })
        };
        Ok(Srgb {
            r: channel(0..2)? as f64 / 255.0,
            g: channel(2..4)? as f64 / 255.0,
            b: channel(4..6)? as f64 / 255.0,
        })
    }

    /// Formats as `"#rrggbb"`, clamping and rounding each channel to 8 bits.
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Channels quantized to 8 bits.
    pub fn to_rgb8(self) -> [u8; 3] {
        let q = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }

    /// Clamps every channel into [0, 1].
    pub fn clamped(self) -> Srgb {
        Srgb {
            r: self.r.clamp(0.0, 1.0),
            g: self.g.clamp(0.0, 1.0),
            b: self.b.clamp(0.0, 1.0),
        }
    }
}

impl Serialize for Srgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Srgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Srgb::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Standard HSL to RGB conversion. `h` in degrees [0, 360), `s` and `l` in [0, 1].
///
/// Hues outside [0, 360) fall through every sector and come out black.
pub fn hsl_to_srgb(h: f64, s: f64, l: f64) -> Srgb {
    let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let m = l - chroma * 0.5;
    let x = chroma * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let (r, g, b) = match h {
        h if (0.0..60.0).contains(&h) => (chroma, x, 0.0),
        h if (60.0..120.0).contains(&h) => (x, chroma, 0.0),
        h if (120.0..180.0).contains(&h) => (0.0, chroma, x),
        h if (180.0..240.0).contains(&h) => (0.0, x, chroma),
        h if (240.0..300.0).contains(&h) => (x, 0.0, chroma),
        h if (300.0..360.0).contains(&h) => (chroma, 0.0, x),
        _ => return Srgb::BLACK,
    };
    Srgb {
        r: r + m,
        g: g + m,
        b: b + m,
    }
}

/// Green's cubehelix curve at position `lambda`.
///
/// `start` is the starting hue (in thirds of a turn), `hue` the helix
/// amplitude. The curve makes four rotations over lambda in [0, 1]. Results
/// can leave [0, 1] slightly for large `hue`; callers clamp.
pub fn cubehelix(start: f64, lambda: f64, hue: f64) -> Srgb {
    let phi = 2.0 * PI * (start / 3.0 + lambda * 4.0);
    let a = hue * lambda * (1.0 - lambda) / 2.0;
    let (sp, cp) = phi.sin_cos();
    Srgb {
        r: lambda + a * (-0.14861 * cp + 1.78277 * sp),
        g: lambda + a * (-0.29227 * cp - 0.90649 * sp),
        b: lambda + a * (1.97294 * cp),
    }
}
