//! Exposure screening from mean luma.

use serde::Serialize;

use crate::color::convert::luma;
use crate::shared::frame::Frame;

/// Below/above the hard edges the frame is rejected outright; between a
/// hard and soft edge it passes with an exposure warning.
pub const HARD_UNDER_MAX: f64 = 30.0;
pub const SOFT_UNDER_MAX: f64 = 60.0;
pub const SOFT_OVER_MIN: f64 = 200.0;
pub const HARD_OVER_MIN: f64 = 235.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Exposure {
    Underexposed,
    Normal,
    Overexposed,
}

/// Mean luma of the frame under the given weight set (0–255 scale).
pub fn mean_luma(frame: &Frame, weights: &[f64; 3]) -> f64 {
    let sum: f64 = frame
        .as_ndarray()
        .rows()
        .into_iter()
        .map(|px| luma(px[0], px[1], px[2], weights))
        .sum();
    sum / frame.pixel_count() as f64
}

pub fn classify_exposure(mean: f64) -> Exposure {
    if mean < SOFT_UNDER_MAX {
        Exposure::Underexposed
    } else if mean > SOFT_OVER_MIN {
        Exposure::Overexposed
    } else {
        Exposure::Normal
    }
}

pub fn is_hard_rejection(mean: f64) -> bool {
    mean < HARD_UNDER_MAX || mean > HARD_OVER_MIN
}
