//! Stage 2: face count, pose-angle screening, and frontality scoring.

use serde::Serialize;

use crate::error::{AnalysisError, PoseAxis};
use crate::geometry::landmarks::{Landmarks, Point3D};
use crate::geometry::pose;

/// Per-axis tolerances in degrees. Yaw is the most forgiving for skin
/// sampling, pitch the least.
pub const YAW_MAX_DEGREES: f64 = 20.0;
pub const ROLL_MAX_DEGREES: f64 = 15.0;
pub const PITCH_MAX_DEGREES: f64 = 10.0;

/// Frontality weights (yaw, pitch, roll); convex, yaw weighted highest.
pub const FRONTALITY_WEIGHTS: [f64; 3] = [0.5, 0.3, 0.2];

/// Composite floor: catches compound misalignment where every single
/// axis is still inside its own tolerance.
pub const MIN_FRONTALITY: f64 = 0.6;

#[derive(Clone, Debug, Serialize)]
pub struct FaceGeometry {
    #[serde(skip)]
    pub landmarks: Landmarks,
    pub yaw: f64,
    pub pitch: f64,
    pub roll: f64,
    pub frontality: f64,
}

pub struct FaceGeometryValidator;

impl FaceGeometryValidator {
    /// Validate raw detector output: exactly one face, 468 points,
    /// pose within tolerance.
    pub fn evaluate(faces: Vec<Vec<Point3D>>) -> Result<FaceGeometry, AnalysisError> {
        if faces.len() > 1 {
            return Err(AnalysisError::MultipleFacesDetected { count: faces.len() });
        }
        let points = faces.into_iter().next().ok_or(AnalysisError::FaceNotDetected)?;
        let landmarks = Landmarks::from_points(points)?;
        Self::validate(landmarks)
    }

    /// Angle and frontality checks; also the entry point for callers
    /// supplying pre-extracted landmarks (the detector call is bypassed,
    /// the geometry screening is not).
    pub fn validate(landmarks: Landmarks) -> Result<FaceGeometry, AnalysisError> {
        let angles = pose::estimate(&landmarks);

        let axes = [
            (PoseAxis::Yaw, angles.yaw, YAW_MAX_DEGREES),
            (PoseAxis::Pitch, angles.pitch, PITCH_MAX_DEGREES),
            (PoseAxis::Roll, angles.roll, ROLL_MAX_DEGREES),
        ];
        for (axis, degrees, limit) in axes {
            if degrees.abs() > limit {
                return Err(AnalysisError::FaceAngleExceeded {
                    axis,
                    degrees,
                    limit,
                });
            }
        }

        let frontality = Self::frontality(angles.yaw, angles.pitch, angles.roll);
        if frontality < MIN_FRONTALITY {
            return Err(AnalysisError::LowFrontality {
                score: frontality,
                minimum: MIN_FRONTALITY,
            });
        }

        Ok(FaceGeometry {
            landmarks,
            yaw: angles.yaw,
            pitch: angles.pitch,
            roll: angles.roll,
            frontality,
        })
    }

    /// 1 − Σ wᵢ · min(|angleᵢ| / limitᵢ, 1), in [0, 1].
    pub fn frontality(yaw: f64, pitch: f64, roll: f64) -> f64 {
        let deviations = [
            (yaw, YAW_MAX_DEGREES),
            (pitch, PITCH_MAX_DEGREES),
            (roll, ROLL_MAX_DEGREES),
        ];
        let penalty: f64 = FRONTALITY_WEIGHTS
            .iter()
            .zip(deviations)
            .map(|(w, (angle, limit))| w * (angle.abs() / limit).min(1.0))
            .sum();
        (1.0 - penalty).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::landmarks::index;
    use crate::shared::constants::LANDMARK_COUNT;
    use approx::assert_relative_eq;

    fn frontal_points() -> Vec<Point3D> {
        let mut pts = vec![Point3D::new(0.0, 0.0, 0.0); LANDMARK_COUNT];
        pts[index::LEFT_EYE_OUTER] = Point3D::new(400.0, 300.0, 0.0);
        pts[index::RIGHT_EYE_OUTER] = Point3D::new(600.0, 300.0, 0.0);
        pts[index::NOSE_TIP] = Point3D::new(500.0, 400.0, 0.0);
        pts[index::FOREHEAD_CENTER] = Point3D::new(500.0, 200.0, 0.0);
        pts[index::CHIN] = Point3D::new(500.0, 600.0, 0.0);
        pts
    }

    #[test]
    fn test_weights_are_convex_with_yaw_highest() {
        let sum: f64 = FRONTALITY_WEIGHTS.iter().sum();
        assert_relative_eq!(sum, 1.0, epsilon = 1e-9);
        assert!(FRONTALITY_WEIGHTS[0] > FRONTALITY_WEIGHTS[1]);
        assert!(FRONTALITY_WEIGHTS[0] > FRONTALITY_WEIGHTS[2]);
    }

    #[test]
    fn test_axis_tolerances_ordered() {
        assert!(YAW_MAX_DEGREES > ROLL_MAX_DEGREES);
        assert!(ROLL_MAX_DEGREES > PITCH_MAX_DEGREES);
    }

    #[test]
    fn test_no_face_rejected() {
        assert!(matches!(
            FaceGeometryValidator::evaluate(vec![]),
            Err(AnalysisError::FaceNotDetected)
        ));
    }

    #[test]
    fn test_multiple_faces_rejected() {
        let err =
            FaceGeometryValidator::evaluate(vec![frontal_points(), frontal_points()]).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::MultipleFacesDetected { count: 2 }
        ));
    }

    #[test]
    fn test_wrong_point_count_is_typed_rejection() {
        let err = FaceGeometryValidator::evaluate(vec![vec![
            Point3D::new(0.0, 0.0, 0.0);
            33
        ]])
        .unwrap_err();
        assert!(matches!(err, AnalysisError::LandmarkCountMismatch { .. }));
    }

    #[test]
    fn test_frontal_face_accepted_with_full_frontality() {
        let geometry = FaceGeometryValidator::evaluate(vec![frontal_points()]).unwrap();
        assert_relative_eq!(geometry.frontality, 1.0, epsilon = 1e-9);
        assert_relative_eq!(geometry.yaw, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_excessive_yaw_names_the_axis() {
        let mut pts = frontal_points();
        // Nose well toward the right eye: d_left=180, d_right=20 → asin(0.8) = 53°
        pts[index::NOSE_TIP] = Point3D::new(580.0, 400.0, 0.0);
        let err = FaceGeometryValidator::evaluate(vec![pts]).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::FaceAngleExceeded {
                axis: PoseAxis::Yaw,
                ..
            }
        ));
    }

    #[test]
    fn test_excessive_pitch_names_the_axis() {
        let mut pts = frontal_points();
        // 2*(460-400)/400 = 0.3 → asin = 17.5° > 10°
        pts[index::NOSE_TIP] = Point3D::new(500.0, 460.0, 0.0);
        let err = FaceGeometryValidator::evaluate(vec![pts]).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::FaceAngleExceeded {
                axis: PoseAxis::Pitch,
                ..
            }
        ));
    }

    #[test]
    fn test_compound_misalignment_fails_frontality() {
        // Each axis individually inside tolerance, composite below floor:
        // yaw 16/20 → 0.40 penalty, pitch 8/10 → 0.24, roll 12/15 → 0.16
        let f = FaceGeometryValidator::frontality(16.0, 8.0, 12.0);
        assert!(f < MIN_FRONTALITY);
    }

    #[test]
    fn test_compound_misalignment_surfaces_as_low_frontality() {
        let mut pts = frontal_points();
        // yaw ≈ 16° (in tolerance): nose.x = 400 + (1 + sin 16°) * 100
        let nose_x = 400.0 + (1.0 + 16.0f64.to_radians().sin()) * 100.0;
        // pitch ≈ 8° (in tolerance): nose.y = 400 + sin 8° * 200
        let nose_y = 400.0 + 8.0f64.to_radians().sin() * 200.0;
        pts[index::NOSE_TIP] = Point3D::new(nose_x, nose_y, 0.0);
        // roll ≈ 12° (in tolerance): right eye lower by tan 12° * 200
        let eye_y = 300.0 + 12.0f64.to_radians().tan() * 200.0;
        pts[index::RIGHT_EYE_OUTER] = Point3D::new(600.0, eye_y, 0.0);

        let err = FaceGeometryValidator::evaluate(vec![pts]).unwrap_err();
        assert!(matches!(err, AnalysisError::LowFrontality { .. }), "{err:?}");
    }

    #[test]
    fn test_frontality_clamped_to_unit_interval() {
        let f = FaceGeometryValidator::frontality(500.0, 500.0, 500.0);
        assert_relative_eq!(f, 0.0);
        let g = FaceGeometryValidator::frontality(0.0, 0.0, 0.0);
        assert_relative_eq!(g, 1.0);
    }
}
