//! Correlated color temperature: McCamy estimation, band classification,
//! and the daylight-locus white point used for chromatic adaptation.

use serde::Serialize;

use crate::color::matrix::Vec3;
use crate::shared::constants::D65_CCT_KELVIN;

/// McCamy epicenter of convergence.
const EPICENTER_X: f64 = 0.3320;
const EPICENTER_Y: f64 = 0.1858;

/// McCamy cubic coefficients (highest power first) and constant term.
const MCCAMY_A: f64 = 449.0;
const MCCAMY_B: f64 = 3525.0;
const MCCAMY_C: f64 = 6823.3;
const MCCAMY_D: f64 = 5520.33;

/// Plausible CCT range for photographic ambient light.
const CCT_MIN: f64 = 1000.0;
const CCT_MAX: f64 = 25000.0;

/// Contiguous band edges in Kelvin: too-warm | warm | neutral | cool | too-cool.
pub const TOO_WARM_MAX: f64 = 3500.0;
pub const WARM_MAX: f64 = 5000.0;
pub const NEUTRAL_MAX: f64 = 7500.0;
pub const COOL_MAX: f64 = 9000.0;

/// Ambient-light warmth band. D65 falls inside `Neutral`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum CctBand {
    TooWarm,
    Warm,
    Neutral,
    Cool,
    TooCool,
}

/// McCamy's polynomial approximation of CCT from CIE 1931 chromaticity.
///
/// `n = (x − xe) / (ye − y)`, `CCT = A·n³ + B·n² + C·n + D`. Chromaticity
/// on the epicenter line (or non-finite input) degrades to the D65 CCT.
pub fn cct_from_chromaticity(x: f64, y: f64) -> f64 {
    let denom = EPICENTER_Y - y;
    if !x.is_finite() || !y.is_finite() || denom.abs() < 1e-9 {
        return D65_CCT_KELVIN;
    }
    let n = (x - EPICENTER_X) / denom;
    let cct = MCCAMY_A * n * n * n + MCCAMY_B * n * n + MCCAMY_C * n + MCCAMY_D;
    if !cct.is_finite() {
        return D65_CCT_KELVIN;
    }
    cct.clamp(CCT_MIN, CCT_MAX)
}

pub fn classify_cct(kelvin: f64) -> CctBand {
    if kelvin < TOO_WARM_MAX {
        CctBand::TooWarm
    } else if kelvin < WARM_MAX {
        CctBand::Warm
    } else if kelvin < NEUTRAL_MAX {
        CctBand::Neutral
    } else if kelvin < COOL_MAX {
        CctBand::Cool
    } else {
        CctBand::TooCool
    }
}

/// XYZ white point of a daylight illuminant at the given CCT.
///
/// CIE daylight-locus polynomial; CCT is clamped to its 4000–25000 K
/// validity range before evaluation.
pub fn white_point_from_cct(kelvin: f64) -> Vec3 {
    let t = if kelvin.is_finite() {
        kelvin.clamp(4000.0, CCT_MAX)
    } else {
        D65_CCT_KELVIN
    };

    let x = if t <= 7000.0 {
        0.244063 + 99.11 / t + 2.9678e6 / (t * t) - 4.6070e9 / (t * t * t)
    } else {
        0.237040 + 247.48 / t + 1.9018e6 / (t * t) - 2.0064e9 / (t * t * t)
    };
    let y = -3.000 * x * x + 2.870 * x - 0.275;

    [x / y, 1.0, (1.0 - x - y) / y]
}
