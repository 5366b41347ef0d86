use thiserror::Error;

/// Why the quality gate rejected a frame outright.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum QualityRejection {
    Blur,
    LowResolution,
    Underexposed,
    Overexposed,
}

/// Pose axis named in angle-threshold rejections.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum PoseAxis {
    Yaw,
    Pitch,
    Roll,
}

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("frame dimensions invalid: {width}x{height} with {channels} channels")]
    InvalidFrame {
        width: u32,
        height: u32,
        channels: u8,
    },

    #[error("image quality rejected: {reason:?} (score {score:.1})")]
    ImageQualityRejected {
        reason: QualityRejection,
        score: f64,
    },

    #[error("no face detected in frame")]
    FaceNotDetected,

    #[error("multiple faces detected ({count})")]
    MultipleFacesDetected { count: usize },

    #[error("landmark set has {count} points, expected {expected}")]
    LandmarkCountMismatch { count: usize, expected: usize },

    #[error("face angle exceeded on {axis:?}: {degrees:.1}° (limit {limit:.1}°)")]
    FaceAngleExceeded {
        axis: PoseAxis,
        degrees: f64,
        limit: f64,
    },

    #[error("frontality {score:.2} below minimum {minimum:.2}")]
    LowFrontality { score: f64, minimum: f64 },

    #[error("insufficient skin coverage: best zone at {best_coverage:.1}% (floor {floor:.1}%)")]
    InsufficientSkinCoverage { best_coverage: f64, floor: f64 },

    #[error("landmark provider failed: {message}")]
    ProviderFailure { message: String },

    #[error("landmark provider timed out after {waited_ms}ms")]
    ProviderTimeout { waited_ms: u64 },

    #[error("pipeline cancelled by caller")]
    Cancelled,

    #[error("pipeline deadline exceeded during {stage}")]
    DeadlineExceeded { stage: &'static str },
}

impl AnalysisError {
    /// Deterministic failures are never retried; only the external
    /// provider boundary is transient.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            AnalysisError::ProviderFailure { .. } | AnalysisError::ProviderTimeout { .. }
        )
    }
}
