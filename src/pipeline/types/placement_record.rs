use super::Color;
use serde::{Deserialize, Serialize};

/// Placement of one distinct color in the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementRecord {
    pub color: Color,
    pub position: [f64; 3],
    pub radius: f64,
}

impl PlacementRecord {
    pub fn new(color: Color, position: [f64; 3], radius: f64) -> Self {
        Self {
            color,
            position,
            radius,
        }
    }
}
