use crate::geometry::landmarks::Point3D;
use crate::shared::frame::Frame;

/// Injected face-landmark detector.
///
/// Returns one raw point set per detected face; the validator enforces
/// the 468-point contract and the single-face rule. Implementations run
/// on a worker thread under a timeout, hence `Send + Sync`.
pub trait LandmarkProvider: Send + Sync {
    fn detect(
        &self,
        frame: &Frame,
    ) -> Result<Vec<Vec<Point3D>>, Box<dyn std::error::Error + Send + Sync>>;
}
