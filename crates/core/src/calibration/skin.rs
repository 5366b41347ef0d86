//! Skin-pixel segmentation and landmark-derived sampling zones.
//!
//! The YCbCr box is asymmetric around 128 on both chroma axes — Cb biased
//! below, Cr biased above — reflecting skin's reddish cast.

use serde::Serialize;

use crate::color::convert::rgb_to_ycbcr;
use crate::geometry::landmarks::{index, Landmarks};

pub const SKIN_Y_MIN: f64 = 40.0;
pub const SKIN_Y_MAX: f64 = 250.0;
pub const SKIN_CB_MIN: f64 = 77.0;
pub const SKIN_CB_MAX: f64 = 127.0;
pub const SKIN_CR_MIN: f64 = 133.0;
pub const SKIN_CR_MAX: f64 = 173.0;

/// Named skin-sampling zone on the face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum SkinZone {
    Forehead,
    LeftCheek,
    RightCheek,
    Chin,
}

pub const ALL_ZONES: [SkinZone; 4] = [
    SkinZone::Forehead,
    SkinZone::LeftCheek,
    SkinZone::RightCheek,
    SkinZone::Chin,
];

/// Axis-aligned sampling window in pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoneWindow {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl ZoneWindow {
    pub fn is_empty(&self) -> bool {
        !(self.x1 > self.x0 && self.y1 > self.y0)
            || !self.x0.is_finite()
            || !self.y0.is_finite()
            || !self.x1.is_finite()
            || !self.y1.is_finite()
    }
}

/// Gamma-encoded RGB pixel inside the skin YCbCr box?
pub fn is_skin_pixel(r: u8, g: u8, b: u8) -> bool {
    let (y, cb, cr) = rgb_to_ycbcr(r, g, b);
    (SKIN_Y_MIN..=SKIN_Y_MAX).contains(&y)
        && (SKIN_CB_MIN..=SKIN_CB_MAX).contains(&cb)
        && (SKIN_CR_MIN..=SKIN_CR_MAX).contains(&cr)
}

/// Sampling window for a zone, scaled by inter-ocular distance.
///
/// Degenerate landmark geometry (zero eye span, non-finite anchors)
/// yields an empty window so the zone simply contributes no coverage.
pub fn zone_window(zone: SkinZone, landmarks: &Landmarks) -> ZoneWindow {
    let left_eye = landmarks.point(index::LEFT_EYE_OUTER);
    let right_eye = landmarks.point(index::RIGHT_EYE_OUTER);
    let iod = ((right_eye.x - left_eye.x).powi(2) + (right_eye.y - left_eye.y).powi(2)).sqrt();
    if !iod.is_finite() || iod <= 0.0 {
        return ZoneWindow {
            x0: 0.0,
            y0: 0.0,
            x1: 0.0,
            y1: 0.0,
        };
    }

    let (anchor, half_w, half_h) = match zone {
        SkinZone::Forehead => (landmarks.point(index::FOREHEAD_CENTER), 0.35 * iod, 0.18 * iod),
        SkinZone::LeftCheek => (landmarks.point(index::LEFT_CHEEK), 0.22 * iod, 0.22 * iod),
        SkinZone::RightCheek => (landmarks.point(index::RIGHT_CHEEK), 0.22 * iod, 0.22 * iod),
        SkinZone::Chin => (landmarks.point(index::CHIN), 0.22 * iod, 0.14 * iod),
    };

    ZoneWindow {
        x0: anchor.x - half_w,
        y0: anchor.y - half_h,
        x1: anchor.x + half_w,
        y1: anchor.y + half_h,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::infrastructure::centered_provider::CenteredFaceProvider;
    use crate::geometry::landmarks::Point3D;
    use crate::shared::constants::LANDMARK_COUNT;
    use rstest::rstest;

    // ── YCbCr box ────────────────────────────────────────────────────

    #[test]
    fn test_box_is_asymmetric_around_128() {
        assert!(SKIN_CB_MAX <= 128.0, "Cb biased below neutral");
        assert!(SKIN_CR_MIN >= 128.0, "Cr biased above neutral");
    }

    #[rstest]
    #[case::light_skin(228, 185, 160, true)]
    #[case::medium_skin(200, 150, 120, true)]
    #[case::deep_skin(130, 90, 70, true)]
    #[case::pure_blue(0, 0, 255, false)]
    #[case::pure_green(0, 255, 0, false)]
    #[case::near_black(10, 10, 10, false)]
    #[case::neutral_gray(128, 128, 128, false)]
    fn test_skin_filter(#[case] r: u8, #[case] g: u8, #[case] b: u8, #[case] skin: bool) {
        assert_eq!(is_skin_pixel(r, g, b), skin);
    }

    // ── zone windows ─────────────────────────────────────────────────

    fn canonical() -> Landmarks {
        Landmarks::from_points(CenteredFaceProvider::landmarks_for(1080, 1440)).unwrap()
    }

    #[test]
    fn test_all_zones_yield_nonempty_windows() {
        let lm = canonical();
        for zone in ALL_ZONES {
            assert!(!zone_window(zone, &lm).is_empty(), "{zone:?}");
        }
    }

    #[test]
    fn test_forehead_sits_above_chin() {
        let lm = canonical();
        let forehead = zone_window(SkinZone::Forehead, &lm);
        let chin = zone_window(SkinZone::Chin, &lm);
        assert!(forehead.y1 < chin.y0);
    }

    #[test]
    fn test_cheeks_are_laterally_symmetric() {
        let lm = canonical();
        let left = zone_window(SkinZone::LeftCheek, &lm);
        let right = zone_window(SkinZone::RightCheek, &lm);
        assert!(left.x1 < right.x0);
        let mid = 1080.0 / 2.0;
        assert!(((mid - left.x0) - (right.x1 - mid)).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_eye_span_yields_empty_windows() {
        let pts = vec![Point3D::new(0.0, 0.0, 0.0); LANDMARK_COUNT];
        let lm = Landmarks::from_points(pts).unwrap();
        for zone in ALL_ZONES {
            assert!(zone_window(zone, &lm).is_empty());
        }
    }
}
