use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;

use crate::calibration::calibrator::ColorCalibrator;
use crate::classify::classifier::{ToneClassificationResult, ToneClassifier};
use crate::error::AnalysisError;
use crate::geometry::infrastructure::centered_provider::CenteredFaceProvider;
use crate::geometry::landmarks::Point3D;
use crate::geometry::provider::LandmarkProvider;
use crate::geometry::validator::{FaceGeometry, FaceGeometryValidator};
use crate::pipeline::budgets::StageBudgets;
use crate::pipeline::feedback::{FeedbackKey, Locale};
use crate::pipeline::vision_fallback::VisionFallback;
use crate::quality::gate::{GateOptions, QualityGate, QualityReport};
use crate::shared::frame::Frame;
use crate::shared::lab::LabColor;
use crate::uniformity::analyzer::{ShadowSeverity, UniformityAnalyzer, UniformityReport};

const DEFAULT_PROVIDER_RETRIES: u32 = 2;

/// Reliability handed to the classifier when the vision oracle supplied
/// the Lab estimate and no uniformity reading exists.
const FALLBACK_RELIABILITY: f64 = 40.0;

/// Reliability points removed per quality-gate warning before
/// classification. Warnings pass the gate but cost confidence.
pub const QUALITY_WARNING_PENALTY: f64 = 8.0;

/// Whether the tone came from real detector output or a substituted
/// fallback (centered landmarks or the vision oracle).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Classification {
    Real,
    Fallback,
}

/// Full pipeline output: the classification plus every intermediate
/// report for diagnostics, and the feedback keys the UI should surface.
#[derive(Clone, Debug, Serialize)]
pub struct PhotoAnalysis {
    pub classification: Classification,
    pub tone: ToneClassificationResult,
    pub quality: QualityReport,
    pub geometry: FaceGeometry,
    pub uniformity: UniformityReport,
    pub feedback: Vec<FeedbackKey>,
    pub elapsed_ms: u64,
}

impl PhotoAnalysis {
    pub fn feedback_messages(&self, locale: Locale) -> Vec<&'static str> {
        self.feedback.iter().map(|k| k.message(locale)).collect()
    }
}

/// Five-stage analysis pipeline: quality gate → face geometry → color
/// calibration → lighting uniformity → tone classification.
///
/// The landmark provider call runs on a worker thread under a timeout
/// and is the only retried step; the numeric stages are deterministic
/// and surface their typed rejections immediately.
pub struct AnalyzePhotoUseCase {
    provider: Arc<dyn LandmarkProvider>,
    vision: Option<Arc<dyn VisionFallback>>,
    budgets: StageBudgets,
    retries: u32,
    cancelled: Arc<AtomicBool>,
    gate: GateOptions,
}

impl AnalyzePhotoUseCase {
    pub fn new(provider: Arc<dyn LandmarkProvider>) -> Self {
        Self {
            provider,
            vision: None,
            budgets: StageBudgets::default(),
            retries: DEFAULT_PROVIDER_RETRIES,
            cancelled: Arc::new(AtomicBool::new(false)),
            gate: GateOptions::default(),
        }
    }

    pub fn with_vision_fallback(mut self, vision: Arc<dyn VisionFallback>) -> Self {
        self.vision = Some(vision);
        self
    }

    pub fn with_budgets(mut self, budgets: StageBudgets) -> Self {
        self.budgets = budgets;
        self
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    pub fn with_gate_options(mut self, gate: GateOptions) -> Self {
        self.gate = gate;
        self
    }

    /// Shared flag a caller can set from another thread to stop the run
    /// at the next stage boundary.
    pub fn cancellation_flag(&self) -> Arc<AtomicBool> {
        self.cancelled.clone()
    }

    pub fn analyze(&self, frame: &Frame) -> Result<PhotoAnalysis, AnalysisError> {
        self.analyze_with_landmarks(frame, None)
    }

    /// Pre-supplied landmarks skip the detector call entirely but still
    /// pass through every geometry check.
    pub fn analyze_with_landmarks(
        &self,
        frame: &Frame,
        landmarks: Option<Vec<Point3D>>,
    ) -> Result<PhotoAnalysis, AnalysisError> {
        let started = Instant::now();
        self.check_cancelled()?;

        let quality = QualityGate::evaluate(frame, self.gate)?;
        log::debug!(
            "quality gate passed in {:?} (grade {:?}, {} warnings)",
            started.elapsed(),
            quality.grade,
            quality.warnings.len()
        );
        self.checkpoint(started, "geometry")?;

        let (faces, mut classification) = match landmarks {
            Some(points) => (vec![points], Classification::Real),
            None => self.detect_with_retries(frame)?,
        };
        let geometry = FaceGeometryValidator::evaluate(faces)?;
        log::debug!(
            "geometry validated in {:?} (frontality {:.2})",
            started.elapsed(),
            geometry.frontality
        );
        self.checkpoint(started, "calibration")?;

        let (measured, uniformity) = match ColorCalibrator::calibrate(frame, &geometry) {
            Ok(sample) => {
                self.checkpoint(started, "uniformity")?;
                let uniformity = UniformityAnalyzer::analyze(&sample);
                (sample.measured, uniformity)
            }
            Err(err) => {
                let Some(vision) = &self.vision else {
                    return Err(err);
                };
                log::warn!("calibration failed ({err}), consulting vision fallback");
                let measured = self.vision_estimate(vision, frame)?;
                classification = Classification::Fallback;
                (measured, degraded_uniformity())
            }
        };
        log::debug!(
            "calibration and uniformity done in {:?} (composite {:.1})",
            started.elapsed(),
            uniformity.composite
        );
        self.checkpoint(started, "classification")?;

        let reliability = (uniformity.composite
            - QUALITY_WARNING_PENALTY * quality.warnings.len() as f64)
            .max(0.0);
        let tone = ToneClassifier::classify(&measured, reliability);
        let feedback = collect_feedback(&quality, &uniformity, &tone, classification);

        Ok(PhotoAnalysis {
            classification,
            tone,
            quality,
            geometry,
            uniformity,
            feedback,
            elapsed_ms: started.elapsed().as_millis() as u64,
        })
    }

    /// Calls the provider on a worker thread bounded by the geometry
    /// budget, retrying transient failures. Exhaustion substitutes the
    /// deterministic centered layout rather than failing the run.
    fn detect_with_retries(
        &self,
        frame: &Frame,
    ) -> Result<(Vec<Vec<Point3D>>, Classification), AnalysisError> {
        for attempt in 0..=self.retries {
            self.check_cancelled()?;
            match self.detect_once(frame) {
                Ok(faces) => return Ok((faces, Classification::Real)),
                Err(err) if err.is_transient() => {
                    log::warn!(
                        "landmark provider attempt {}/{} failed: {err}",
                        attempt + 1,
                        self.retries + 1
                    );
                }
                Err(err) => return Err(err),
            }
        }
        log::warn!("landmark provider exhausted, substituting centered landmarks");
        let points = CenteredFaceProvider::landmarks_for(frame.width(), frame.height());
        Ok((vec![points], Classification::Fallback))
    }

    fn detect_once(&self, frame: &Frame) -> Result<Vec<Vec<Point3D>>, AnalysisError> {
        let (tx, rx) = crossbeam_channel::bounded(1);
        let provider = self.provider.clone();
        let frame = frame.clone();
        std::thread::spawn(move || {
            let _ = tx.send(provider.detect(&frame));
        });

        match rx.recv_timeout(self.budgets.geometry) {
            Ok(Ok(faces)) => Ok(faces),
            Ok(Err(source)) => Err(AnalysisError::ProviderFailure {
                message: source.to_string(),
            }),
            Err(_) => Err(AnalysisError::ProviderTimeout {
                waited_ms: self.budgets.geometry.as_millis() as u64,
            }),
        }
    }

    fn vision_estimate(
        &self,
        vision: &Arc<dyn VisionFallback>,
        frame: &Frame,
    ) -> Result<LabColor, AnalysisError> {
        let (tx, rx) = crossbeam_channel::bounded(1);
        let vision = vision.clone();
        let frame = frame.clone();
        std::thread::spawn(move || {
            let _ = tx.send(vision.estimate_lab(&frame));
        });

        match rx.recv_timeout(self.budgets.calibration) {
            Ok(Ok(lab)) => Ok(lab),
            Ok(Err(source)) => Err(AnalysisError::ProviderFailure {
                message: source.to_string(),
            }),
            Err(_) => Err(AnalysisError::ProviderTimeout {
                waited_ms: self.budgets.calibration.as_millis() as u64,
            }),
        }
    }

    fn check_cancelled(&self) -> Result<(), AnalysisError> {
        if self.cancelled.load(Ordering::Relaxed) {
            return Err(AnalysisError::Cancelled);
        }
        Ok(())
    }

    /// Stage boundary: cancellation wins over the deadline so a caller
    /// abort is always reported as such.
    fn checkpoint(&self, started: Instant, stage: &'static str) -> Result<(), AnalysisError> {
        self.check_cancelled()?;
        if started.elapsed() > self.budgets.total {
            return Err(AnalysisError::DeadlineExceeded { stage });
        }
        Ok(())
    }
}

fn degraded_uniformity() -> UniformityReport {
    UniformityReport {
        cct_variance: 0.0,
        uniformity: 0.0,
        shadow: ShadowSeverity::None,
        composite: FALLBACK_RELIABILITY,
    }
}

fn collect_feedback(
    quality: &QualityReport,
    uniformity: &UniformityReport,
    tone: &ToneClassificationResult,
    classification: Classification,
) -> Vec<FeedbackKey> {
    let mut keys = vec![
        FeedbackKey::for_sharpness(quality.grade),
        FeedbackKey::for_exposure(quality.exposure),
        FeedbackKey::for_cct_band(quality.cct_band),
        FeedbackKey::for_shadow(uniformity.shadow),
    ];
    if classification == Classification::Fallback {
        keys.push(FeedbackKey::ProviderUnavailable);
    }
    if tone.low_confidence {
        keys.push(FeedbackKey::LowConfidence);
    }
    keys
}
