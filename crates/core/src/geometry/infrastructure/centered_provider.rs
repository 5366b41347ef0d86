//! Deterministic landmark provider assuming a centered frontal face.
//!
//! Substituted by the orchestrator when the real detector is exhausted,
//! so callers always receive a classification (tagged as fallback)
//! instead of an indefinite block. Also usable directly for tripod-style
//! captures where the subject is framed by an on-screen guide.

use crate::geometry::landmarks::{index, Point3D};
use crate::geometry::provider::LandmarkProvider;
use crate::shared::constants::LANDMARK_COUNT;
use crate::shared::frame::Frame;

/// Face box as a fraction of the frame.
const FACE_WIDTH_FRAC: f64 = 0.5;
const FACE_HEIGHT_FRAC: f64 = 0.6;

pub struct CenteredFaceProvider;

impl CenteredFaceProvider {
    /// Synthesize the canonical frontal 468-point layout scaled to the
    /// frame: filler points spread deterministically inside the face
    /// ellipse, named indices pinned to their canonical positions.
    pub fn landmarks_for(width: u32, height: u32) -> Vec<Point3D> {
        let cx = width as f64 / 2.0;
        let cy = height as f64 / 2.0;
        let fw = width as f64 * FACE_WIDTH_FRAC;
        let fh = height as f64 * FACE_HEIGHT_FRAC;

        let mut pts = Vec::with_capacity(LANDMARK_COUNT);
        for i in 0..LANDMARK_COUNT {
            // Golden-angle spiral inside the face ellipse
            let t = i as f64 / LANDMARK_COUNT as f64;
            let angle = i as f64 * 2.399963; // golden angle in radians
            let radius = 0.45 * t.sqrt();
            pts.push(Point3D::new(
                cx + angle.cos() * radius * fw,
                cy + angle.sin() * radius * fh,
                0.0,
            ));
        }

        let eye_y = cy - 0.15 * fh;
        pts[index::LEFT_EYE_OUTER] = Point3D::new(cx - 0.36 * fw, eye_y, 0.0);
        pts[index::LEFT_EYE_INNER] = Point3D::new(cx - 0.14 * fw, eye_y, 0.0);
        pts[index::RIGHT_EYE_INNER] = Point3D::new(cx + 0.14 * fw, eye_y, 0.0);
        pts[index::RIGHT_EYE_OUTER] = Point3D::new(cx + 0.36 * fw, eye_y, 0.0);
        pts[index::FOREHEAD_LEFT] = Point3D::new(cx - 0.25 * fw, cy - 0.42 * fh, 0.0);
        pts[index::FOREHEAD_CENTER] = Point3D::new(cx, cy - 0.45 * fh, 0.0);
        pts[index::FOREHEAD_RIGHT] = Point3D::new(cx + 0.25 * fw, cy - 0.42 * fh, 0.0);
        pts[index::LEFT_CHEEK] = Point3D::new(cx - 0.28 * fw, cy + 0.10 * fh, 0.0);
        pts[index::RIGHT_CHEEK] = Point3D::new(cx + 0.28 * fw, cy + 0.10 * fh, 0.0);
        pts[index::CHIN] = Point3D::new(cx, cy + 0.45 * fh, 0.0);
        // Nose tip exactly midway between forehead center and chin: the
        // canonical layout must read as perfectly frontal.
        pts[index::NOSE_TIP] = Point3D::new(cx, cy, 0.0);
        pts
    }
}

impl LandmarkProvider for CenteredFaceProvider {
    fn detect(
        &self,
        frame: &Frame,
    ) -> Result<Vec<Vec<Point3D>>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(vec![Self::landmarks_for(frame.width(), frame.height())])
    }
}
