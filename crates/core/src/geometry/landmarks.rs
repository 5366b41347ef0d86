//! The fixed 468-point face-landmark topology and the named indices the
//! pipeline reads from it.

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::shared::constants::LANDMARK_COUNT;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Named indices into the 468-point topology.
pub mod index {
    pub const NOSE_TIP: usize = 1;
    pub const FOREHEAD_CENTER: usize = 10;
    pub const LEFT_EYE_OUTER: usize = 33;
    pub const FOREHEAD_LEFT: usize = 103;
    pub const LEFT_EYE_INNER: usize = 133;
    pub const CHIN: usize = 152;
    pub const LEFT_CHEEK: usize = 205;
    pub const RIGHT_EYE_OUTER: usize = 263;
    pub const FOREHEAD_RIGHT: usize = 332;
    pub const RIGHT_EYE_INNER: usize = 362;
    pub const RIGHT_CHEEK: usize = 425;
}

/// A complete landmark set. Construction enforces the 468-point contract;
/// anything else is a typed rejection, never a panic.
#[derive(Clone, Debug, PartialEq)]
pub struct Landmarks {
    points: Vec<Point3D>,
}

impl Landmarks {
    pub fn from_points(points: Vec<Point3D>) -> Result<Self, AnalysisError> {
        if points.len() != LANDMARK_COUNT {
            return Err(AnalysisError::LandmarkCountMismatch {
                count: points.len(),
                expected: LANDMARK_COUNT,
            });
        }
        Ok(Self { points })
    }

    pub fn point(&self, idx: usize) -> Point3D {
        self.points[idx]
    }

    pub fn points(&self) -> &[Point3D] {
        &self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_count_accepted() {
        let pts = vec![Point3D::new(0.0, 0.0, 0.0); LANDMARK_COUNT];
        assert!(Landmarks::from_points(pts).is_ok());
    }

    #[test]
    fn test_short_set_rejected_with_typed_error() {
        // A 33-point set (a different detector's contract) must not crash
        let pts = vec![Point3D::new(0.0, 0.0, 0.0); 33];
        let err = Landmarks::from_points(pts).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::LandmarkCountMismatch {
                count: 33,
                expected: LANDMARK_COUNT,
            }
        ));
    }

    #[test]
    fn test_empty_set_rejected() {
        assert!(Landmarks::from_points(Vec::new()).is_err());
    }

    #[test]
    fn test_named_indices_within_bounds() {
        for idx in [
            index::NOSE_TIP,
            index::FOREHEAD_CENTER,
            index::LEFT_EYE_OUTER,
            index::FOREHEAD_LEFT,
            index::LEFT_EYE_INNER,
            index::CHIN,
            index::LEFT_CHEEK,
            index::RIGHT_EYE_OUTER,
            index::FOREHEAD_RIGHT,
            index::RIGHT_EYE_INNER,
            index::RIGHT_CHEEK,
        ] {
            assert!(idx < LANDMARK_COUNT);
        }
    }
}
