//! Color types: sRGB values as authored, linear premultiplied values as
//! stored by layers.

use palette::{FromColor, LinSrgba, Srgba};
use serde::{Deserialize, Serialize};

/// An sRGB color with 8-bit channels, the form colors are authored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const ORANGE: Color = Color::rgb(255, 165, 0);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const CLEAR: Color = Color::rgba(0, 0, 0, 0);

    /// Create an opaque color from sRGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a color from sRGB channels and alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Resolve to the linear premultiplied representation layers store.
    pub fn to_linear(self) -> LinearColor {
        let s = Srgba::new(
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        );
        let lin: LinSrgba = LinSrgba::from_color(s);
        LinearColor {
            r: lin.red * lin.alpha,
            g: lin.green * lin.alpha,
            b: lin.blue * lin.alpha,
            a: lin.alpha,
        }
    }
}

/// A premultiplied linear RGBA color, the resolved backing representation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LinearColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl LinearColor {
    /// Create directly from linear RGBA floats and premultiply.
    pub fn from_lin_rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: r * a,
            g: g * a,
            b: b * a,
            a,
        }
    }

    /// Convert back to an authored sRGB color (unpremultiplied).
    pub fn to_srgb(&self) -> Color {
        // Unpremultiply
        let (r, g, b) = if self.a > 0.0001 {
            (self.r / self.a, self.g / self.a, self.b / self.a)
        } else {
            (0.0, 0.0, 0.0)
        };

        let lin = LinSrgba::new(r, g, b, self.a);
        let srgb: Srgba = Srgba::from_color(lin);

        Color {
            r: (srgb.red * 255.0).round().clamp(0.0, 255.0) as u8,
            g: (srgb.green * 255.0).round().clamp(0.0, 255.0) as u8,
            b: (srgb.blue * 255.0).round().clamp(0.0, 255.0) as u8,
            a: (srgb.alpha * 255.0).round().clamp(0.0, 255.0) as u8,
        }
    }
}
