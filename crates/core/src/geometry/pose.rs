//! Head-pose angles from named landmark triples.
//!
//! All ratio math degrades to 0° on degenerate geometry (coincident
//! points, NaN, infinities) rather than raising; a zeroed angle then
//! passes the axis check and the frontality floor decides.

use crate::geometry::landmarks::{index, Landmarks};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PoseAngles {
    pub yaw: f64,
    pub pitch: f64,
    pub roll: f64,
}

/// Estimate yaw/pitch/roll in degrees.
///
/// - roll: inclination of the outer-eye line.
/// - yaw: nose-tip asymmetry between the outer eye corners; positive
///   when the nose sits closer to the right eye.
/// - pitch: nose-tip offset from the forehead–chin midpoint; positive
///   when the nose sits below it (head tilted down).
pub fn estimate(landmarks: &Landmarks) -> PoseAngles {
    let nose = landmarks.point(index::NOSE_TIP);
    let left_eye = landmarks.point(index::LEFT_EYE_OUTER);
    let right_eye = landmarks.point(index::RIGHT_EYE_OUTER);
    let forehead = landmarks.point(index::FOREHEAD_CENTER);
    let chin = landmarks.point(index::CHIN);

    let roll = safe_degrees((right_eye.y - left_eye.y).atan2(right_eye.x - left_eye.x));

    let d_left = (nose.x - left_eye.x).abs();
    let d_right = (right_eye.x - nose.x).abs();
    let yaw = safe_degrees(asin_ratio(d_left - d_right, d_left + d_right));

    let face_h = chin.y - forehead.y;
    let mid_y = (chin.y + forehead.y) / 2.0;
    let pitch = safe_degrees(asin_ratio(2.0 * (nose.y - mid_y), face_h.abs()));

    PoseAngles { yaw, pitch, roll }
}

fn asin_ratio(num: f64, denom: f64) -> f64 {
    if !num.is_finite() || !denom.is_finite() || denom <= 0.0 {
        return 0.0;
    }
    (num / denom).clamp(-1.0, 1.0).asin()
}

fn safe_degrees(radians: f64) -> f64 {
    if radians.is_finite() {
        radians.to_degrees()
    } else {
        0.0
    }
}
