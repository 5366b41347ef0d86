//! Stage 4: lighting-uniformity scoring across the sampled skin zones.
//!
//! Never rejects; its composite only attenuates classification
//! confidence downstream.

use serde::Serialize;

use crate::calibration::calibrator::CalibratedSample;
use crate::calibration::skin::SkinZone;
use crate::color::cct::cct_from_chromaticity;
use crate::color::convert::{lab_to_xyz, xyz_to_chromaticity};
use crate::shared::lab::LabColor;

/// Composite fold weights (cct, uniformity, shadow); must sum to 1.0.
pub const COMPOSITE_WEIGHTS: [f64; 3] = [0.3, 0.4, 0.3];

/// CCT variance at or above this maps the CCT sub-score to 0.
const CCT_VARIANCE_CEILING: f64 = 1_000_000.0; // (1000 K)² spread

/// L*/chroma spread that zeroes the uniformity sub-score.
const LIGHTNESS_SPREAD_CEILING: f64 = 25.0;
const CHROMA_SPREAD_CEILING: f64 = 20.0;

/// Cheek |ΔL*| edges for shadow buckets: none < mild < moderate < severe.
pub const SHADOW_MILD_MIN: f64 = 3.0;
pub const SHADOW_MODERATE_MIN: f64 = 6.0;
pub const SHADOW_SEVERE_MIN: f64 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ShadowSeverity {
    None,
    Mild,
    Moderate,
    Severe,
}

impl ShadowSeverity {
    fn score(self) -> f64 {
        match self {
            ShadowSeverity::None => 100.0,
            ShadowSeverity::Mild => 70.0,
            ShadowSeverity::Moderate => 40.0,
            ShadowSeverity::Severe => 0.0,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct UniformityReport {
    pub cct_variance: f64,
    pub uniformity: f64,
    pub shadow: ShadowSeverity,
    /// Weighted fold of the three sub-scores, 0–100. This single value,
    /// not any sub-score, is what downgrades final confidence.
    pub composite: f64,
}

pub struct UniformityAnalyzer;

impl UniformityAnalyzer {
    pub fn analyze(sample: &CalibratedSample) -> UniformityReport {
        let ccts: Vec<f64> = sample
            .regions
            .iter()
            .map(|r| Self::zone_cct(&r.lab))
            .collect();
        let cct_variance = population_variance(&ccts);

        let ls: Vec<f64> = sample.regions.iter().map(|r| r.lab.l).collect();
        let chromas: Vec<f64> = sample.regions.iter().map(|r| r.lab.chroma()).collect();
        let l_spread = spread(&ls);
        let c_spread = spread(&chromas);
        let uniformity = 100.0
            * (1.0 - (l_spread / LIGHTNESS_SPREAD_CEILING).min(1.0) * 0.6
                - (c_spread / CHROMA_SPREAD_CEILING).min(1.0) * 0.4);

        let shadow = Self::shadow_severity(sample);

        let cct_score = 100.0 * (1.0 - (cct_variance / CCT_VARIANCE_CEILING).min(1.0));
        let composite = COMPOSITE_WEIGHTS[0] * cct_score
            + COMPOSITE_WEIGHTS[1] * uniformity
            + COMPOSITE_WEIGHTS[2] * shadow.score();

        UniformityReport {
            cct_variance,
            uniformity: uniformity.clamp(0.0, 100.0),
            shadow,
            composite: composite.clamp(0.0, 100.0),
        }
    }

    /// Re-derive a zone's apparent CCT from its Lab reading via XYZ
    /// chromaticity and the same McCamy polynomial the gate uses.
    pub fn zone_cct(lab: &LabColor) -> f64 {
        let (x, y) = xyz_to_chromaticity(&lab_to_xyz(lab));
        cct_from_chromaticity(x, y)
    }

    /// Asymmetric darkening between the cheek pair. A missing cheek
    /// reading means no pair to compare, so no shadow is reported.
    pub fn shadow_severity(sample: &CalibratedSample) -> ShadowSeverity {
        let left = sample
            .regions
            .iter()
            .find(|r| r.zone == SkinZone::LeftCheek);
        let right = sample
            .regions
            .iter()
            .find(|r| r.zone == SkinZone::RightCheek);
        let (Some(left), Some(right)) = (left, right) else {
            return ShadowSeverity::None;
        };

        let delta = (left.lab.l - right.lab.l).abs();
        if delta >= SHADOW_SEVERE_MIN {
            ShadowSeverity::Severe
        } else if delta >= SHADOW_MODERATE_MIN {
            ShadowSeverity::Moderate
        } else if delta >= SHADOW_MILD_MIN {
            ShadowSeverity::Mild
        } else {
            ShadowSeverity::None
        }
    }
}

fn population_variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n
}

fn spread(values: &[f64]) -> f64 {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values {
        min = min.min(v);
        max = max.max(v);
    }
    if min.is_finite() && max.is_finite() {
        max - min
    } else {
        0.0
    }
}
