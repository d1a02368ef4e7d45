use crate::pipeline::types::{Color, LabPoint};
use serde::{Deserialize, Serialize};

/// D65 reference white, 2° observer.
pub const D65_WHITE: [f64; 3] = [95.047, 100.0, 108.883];

const SRGB_TO_XYZ: [[f64; 3]; 3] = [
    [0.4124, 0.3576, 0.1805],
    [0.2126, 0.7152, 0.0722],
    [0.0193, 0.1192, 0.9505],
];

const EPSILON: f64 = 0.008856;
const KAPPA_SLOPE: f64 = 7.787;
const KAPPA_OFFSET: f64 = 16.0 / 116.0;

/// Which perceptual coordinate the projector places colors by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabSpace {
    /// White-normalized XYZ ratios; the companding step is skipped.
    #[default]
    Intermediate,
    /// Complete CIE L*a*b*.
    CieLab,
}

/// Maps sRGB colors to LAB-space coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabConverter {
    space: LabSpace,
    reference_white: [f64; 3],
}

impl Default for LabConverter {
    fn default() -> Self {
        Self::new(LabSpace::Intermediate, D65_WHITE)
    }
}

impl LabConverter {
    pub fn new(space: LabSpace, reference_white: [f64; 3]) -> Self {
        Self {
            space,
            reference_white,
        }
    }

    pub fn convert(&self, color: Color) -> LabPoint {
        match self.space {
            LabSpace::Intermediate => self.to_lab_intermediate(color),
            LabSpace::CieLab => self.to_cie_lab(color),
        }
    }

    /// XYZ (rounded to 4 places) divided by the reference white.
    pub fn to_lab_intermediate(&self, color: Color) -> LabPoint {
        let linear = color.channels().map(linearize);
        let mut ratios = [0.0; 3];
        for (axis, row) in SRGB_TO_XYZ.iter().enumerate() {
            let xyz = row[0] * linear[0] + row[1] * linear[1] + row[2] * linear[2];
            ratios[axis] = round_places(xyz, 4) / self.reference_white[axis];
        }
        LabPoint(ratios)
    }

    pub fn to_cie_lab(&self, color: Color) -> LabPoint {
        let [fx, fy, fz] = self.to_lab_intermediate(color).0.map(compand);
        LabPoint([116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz)])
    }
}

/// Shorthand for the default converter's LAB-intermediate value.
pub fn to_lab_intermediate(color: Color) -> LabPoint {
    LabConverter::default().to_lab_intermediate(color)
}

// sRGB gamma expansion, scaled to 0..=100.
fn linearize(channel: u8) -> f64 {
    let v = channel as f64 / 255.0;
    let linear = if v > 0.04045 {
        ((v + 0.055) / 1.055).powf(2.4)
    } else {
        v / 12.92
    };
    linear * 100.0
}

fn compand(t: f64) -> f64 {
    if t > EPSILON {
        t.cbrt()
    } else {
        KAPPA_SLOPE * t + KAPPA_OFFSET
    }
}

fn round_places(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
