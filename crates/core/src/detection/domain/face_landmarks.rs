//! Five-point face landmarks as produced by the detector.
//!
//! Order is fixed: left eye, right eye, nose, left mouth corner, right mouth
//! corner. The classifier uses them to align the face crop.

use serde::{Deserialize, Serialize};

use crate::shared::constants::LANDMARK_COUNT;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FaceLandmarks {
    points: [(f32, f32); LANDMARK_COUNT],
}

impl FaceLandmarks {
    pub fn new(points: [(f32, f32); LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[(f32, f32); LANDMARK_COUNT] {
        &self.points
    }

    /// True when every point lies within `tolerance` pixels of its counterpart.
    pub fn approx_eq(&self, other: &FaceLandmarks, tolerance: f32) -> bool {
        self.points
            .iter()
            .zip(other.points.iter())
            .all(|(a, b)| (a.0 - b.0).abs() <= tolerance && (a.1 - b.1).abs() <= tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frontal() -> FaceLandmarks {
        FaceLandmarks::new([
            (440.0, 350.0),
            (560.0, 350.0),
            (500.0, 420.0),
            (460.0, 470.0),
            (540.0, 470.0),
        ])
    }

    #[test]
    fn test_approx_eq_within_tolerance() {
        let mut pts = *frontal().points();
        pts[2].0 += 0.4;
        assert!(frontal().approx_eq(&FaceLandmarks::new(pts), 0.5));
    }

    #[test]
    fn test_approx_eq_outside_tolerance() {
        let mut pts = *frontal().points();
        pts[4].1 += 3.0;
        assert!(!frontal().approx_eq(&FaceLandmarks::new(pts), 0.5));
    }
}
