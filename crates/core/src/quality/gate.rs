//! Stage 1: screen the raw frame before any face work is attempted.

use serde::Serialize;

use crate::color::cct::{cct_from_chromaticity, classify_cct, CctBand};
use crate::color::convert::{
    linear_rgb_to_xyz, srgb_decode, xyz_to_chromaticity, LUMA_BT601, LUMA_BT709,
};
use crate::error::{AnalysisError, QualityRejection};
use crate::quality::exposure::{classify_exposure, is_hard_rejection, mean_luma, Exposure};
use crate::quality::sharpness::{laplacian_variance, ACCEPTABLE_MAX, REJECTED_MAX, WARNING_MAX};
use crate::shared::frame::Frame;

/// Hard resolution floor; frames below it are rejected.
pub const MIN_WIDTH: u32 = 480;
pub const MIN_HEIGHT: u32 = 640;

/// Published recommendation; frames below it pass with a warning.
pub const RECOMMENDED_WIDTH: u32 = 1080;
pub const RECOMMENDED_HEIGHT: u32 = 1440;

/// Stride for the gray-world illuminant estimate. Sampling every Nth
/// pixel keeps the gate cheap on full-resolution frames.
const CHROMATICITY_STRIDE: u32 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum QualityGrade {
    Rejected,
    Warning,
    Acceptable,
    Optimal,
}

/// Conditions that pass the gate but downgrade final confidence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum QualityWarning {
    SoftSharpness,
    BelowRecommendedResolution,
    Underexposed,
    Overexposed,
    AmbientTooWarm,
    AmbientTooCool,
}

#[derive(Clone, Debug, Serialize)]
pub struct QualityReport {
    pub sharpness: f64,
    pub width: u32,
    pub height: u32,
    pub exposure: Exposure,
    pub cct: f64,
    pub cct_band: CctBand,
    pub grade: QualityGrade,
    pub warnings: Vec<QualityWarning>,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct GateOptions {
    /// Use BT.709 luma weights instead of BT.601.
    pub wide_gamut: bool,
}

pub struct QualityGate;

impl QualityGate {
    /// Screens sharpness, resolution, exposure, and ambient CCT.
    ///
    /// Any band at its rejected level aborts with the typed reason;
    /// warning-level bands pass but are carried on the report.
    pub fn evaluate(frame: &Frame, opts: GateOptions) -> Result<QualityReport, AnalysisError> {
        let weights = if opts.wide_gamut {
            &LUMA_BT709
        } else {
            &LUMA_BT601
        };

        if frame.width() < MIN_WIDTH || frame.height() < MIN_HEIGHT {
            return Err(AnalysisError::ImageQualityRejected {
                reason: QualityRejection::LowResolution,
                score: (frame.width().min(frame.height())) as f64,
            });
        }

        let mean = mean_luma(frame, weights);
        if is_hard_rejection(mean) {
            let reason = if mean < 128.0 {
                QualityRejection::Underexposed
            } else {
                QualityRejection::Overexposed
            };
            return Err(AnalysisError::ImageQualityRejected {
                reason,
                score: mean,
            });
        }

        let sharpness = laplacian_variance(frame, weights);
        if sharpness < REJECTED_MAX {
            return Err(AnalysisError::ImageQualityRejected {
                reason: QualityRejection::Blur,
                score: sharpness,
            });
        }

        let mut warnings = Vec::new();
        let exposure = classify_exposure(mean);
        match exposure {
            Exposure::Underexposed => warnings.push(QualityWarning::Underexposed),
            Exposure::Overexposed => warnings.push(QualityWarning::Overexposed),
            Exposure::Normal => {}
        }

        if frame.width() < RECOMMENDED_WIDTH || frame.height() < RECOMMENDED_HEIGHT {
            warnings.push(QualityWarning::BelowRecommendedResolution);
        }

        let sharpness_grade = if sharpness < WARNING_MAX {
            warnings.push(QualityWarning::SoftSharpness);
            QualityGrade::Warning
        } else if sharpness < ACCEPTABLE_MAX {
            QualityGrade::Acceptable
        } else {
            QualityGrade::Optimal
        };

        let cct = Self::ambient_cct(frame);
        let cct_band = classify_cct(cct);
        match cct_band {
            CctBand::TooWarm => warnings.push(QualityWarning::AmbientTooWarm),
            CctBand::TooCool => warnings.push(QualityWarning::AmbientTooCool),
            _ => {}
        }

        let grade = if warnings.is_empty() {
            sharpness_grade
        } else {
            sharpness_grade.min(QualityGrade::Warning)
        };

        Ok(QualityReport {
            sharpness,
            width: frame.width(),
            height: frame.height(),
            exposure,
            cct,
            cct_band,
            grade,
            warnings,
        })
    }

    /// Gray-world estimate of the ambient CCT: mean linear RGB of a
    /// strided subsample, taken through XYZ chromaticity into McCamy.
    pub fn ambient_cct(frame: &Frame) -> f64 {
        let mut sum = [0.0f64; 3];
        let mut count = 0usize;
        let mut y = 0;
        while y < frame.height() {
            let mut x = 0;
            while x < frame.width() {
                let (r, g, b) = frame.rgb_at(x, y);
                sum[0] += srgb_decode(r);
                sum[1] += srgb_decode(g);
                sum[2] += srgb_decode(b);
                count += 1;
                x += CHROMATICITY_STRIDE;
            }
            y += CHROMATICITY_STRIDE;
        }
        let n = count.max(1) as f64;
        let mean = [sum[0] / n, sum[1] / n, sum[2] / n];
        let (cx, cy) = xyz_to_chromaticity(&linear_rgb_to_xyz(&mean));
        cct_from_chromaticity(cx, cy)
    }
}
