use serde::{Deserialize, Serialize};
use std::fmt;

/// An 8-bit sRGB color without alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Channels scaled to `0.0..=1.0`, as 3D tools expect material colors.
    pub fn normalized(self) -> [f64; 3] {
        self.channels().map(|c| c as f64 / 255.0)
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<Color> for [u8; 3] {
    fn from(color: Color) -> Self {
        color.channels()
    }
}

impl From<image::Rgb<u8>> for Color {
    fn from(px: image::Rgb<u8>) -> Self {
        Self::from(px.0)
    }
}

impl From<Color> for image::Rgb<u8> {
    fn from(color: Color) -> Self {
        image::Rgb(color.channels())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.r, self.g, self.b)
    }
}

/// A perceptual coordinate derived from a [`Color`].
///
/// Depending on configuration this is either the LAB-intermediate value (white-point
/// normalized XYZ, without the final companding step) or a complete CIE L*a*b* value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabPoint(pub [f64; 3]);

impl LabPoint {
    pub fn scaled(self, factor: f64) -> [f64; 3] {
        self.0.map(|v| v * factor)
    }
}

impl fmt::Display for LabPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.0;
        write!(
            f,
            "{}, {}, {}",
            format_decimal(a),
            format_decimal(b),
            format_decimal(c)
        )
    }
}

/// Shortest round-trip decimal for `value`, always carrying a fractional part (`1.0`, not `1`).
/// Never uses exponent notation: `0.000017`, not `1.7e-05`.
pub fn format_decimal(value: f64) -> String {
    let text = value.to_string();
    if value.is_finite() && !text.contains(['.', 'e', 'E']) {
        format!("{text}.0")
    } else {
        text
    }
}
