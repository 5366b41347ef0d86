use crate::shared::frame::Frame;
use crate::shared::lab::LabColor;

/// Optional best-effort oracle consulted only when the deterministic
/// calibration stage cannot produce a skin sample. Its estimate is
/// classified normally but the result is always tagged as a fallback.
pub trait VisionFallback: Send + Sync {
    fn estimate_lab(
        &self,
        frame: &Frame,
    ) -> Result<LabColor, Box<dyn std::error::Error + Send + Sync>>;
}
