//! Fixed sRGB → XYZ → Lab conversion chain, plus the YCbCr encoding used
//! for skin segmentation.
//!
//! Everything is referenced to D65. The sRGB↔XYZ matrix pair must
//! round-trip white (1,1,1) to the D65 white point; that is a standing
//! invariant, not just a test.

use crate::color::matrix::{mul_vec, Mat3, Vec3};
use crate::shared::constants::D65_WHITE_XYZ;
use crate::shared::lab::LabColor;

/// sRGB (linear) → XYZ, D65 (IEC 61966-2-1).
pub const SRGB_TO_XYZ: Mat3 = [
    [0.4124564, 0.3575761, 0.1804375],
    [0.2126729, 0.7151522, 0.0721750],
    [0.0193339, 0.1191920, 0.9503041],
];

/// XYZ → sRGB (linear), exact published inverse of [`SRGB_TO_XYZ`].
pub const XYZ_TO_SRGB: Mat3 = [
    [3.2404542, -1.5371385, -0.4985314],
    [-0.9692660, 1.8760108, 0.0415560],
    [0.0556434, -0.2040259, 1.0572252],
];

/// BT.601 luma weights (R, G, B). Sum to 1; green greatest, blue least.
pub const LUMA_BT601: [f64; 3] = [0.299, 0.587, 0.114];

/// BT.709 luma weights, used in wide-gamut mode.
pub const LUMA_BT709: [f64; 3] = [0.2126, 0.7152, 0.0722];

/// Lab segment constants (CIE 15): ε = (6/29)³, κ = (29/3)³.
const LAB_EPSILON: f64 = 216.0 / 24389.0;
const LAB_KAPPA: f64 = 24389.0 / 27.0;

/// Decode one 8-bit sRGB channel to linear light.
pub fn srgb_decode(c: u8) -> f64 {
    let c = c as f64 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Linear RGB (0..1) → XYZ under D65.
pub fn linear_rgb_to_xyz(rgb: &Vec3) -> Vec3 {
    mul_vec(&SRGB_TO_XYZ, rgb)
}

/// XYZ → Lab referenced to the D65 white point.
pub fn xyz_to_lab(xyz: &Vec3) -> LabColor {
    fn f(t: f64) -> f64 {
        if t > LAB_EPSILON {
            t.cbrt()
        } else {
            (LAB_KAPPA * t + 16.0) / 116.0
        }
    }
    let fx = f(xyz[0] / D65_WHITE_XYZ[0]);
    let fy = f(xyz[1] / D65_WHITE_XYZ[1]);
    let fz = f(xyz[2] / D65_WHITE_XYZ[2]);
    LabColor::new(116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz))
}

/// Lab → XYZ under D65 (inverse of [`xyz_to_lab`]).
pub fn lab_to_xyz(lab: &LabColor) -> Vec3 {
    let fy = (lab.l + 16.0) / 116.0;
    let fx = fy + lab.a / 500.0;
    let fz = fy - lab.b / 200.0;
    fn finv(t: f64) -> f64 {
        let t3 = t * t * t;
        if t3 > LAB_EPSILON {
            t3
        } else {
            (116.0 * t - 16.0) / LAB_KAPPA
        }
    }
    [
        finv(fx) * D65_WHITE_XYZ[0],
        finv(fy) * D65_WHITE_XYZ[1],
        finv(fz) * D65_WHITE_XYZ[2],
    ]
}

/// Gamma-encoded 8-bit RGB → full-range YCbCr (BT.601).
pub fn rgb_to_ycbcr(r: u8, g: u8, b: u8) -> (f64, f64, f64) {
    let (r, g, b) = (r as f64, g as f64, b as f64);
    let y = LUMA_BT601[0] * r + LUMA_BT601[1] * g + LUMA_BT601[2] * b;
    let cb = 128.0 - 0.168736 * r - 0.331264 * g + 0.5 * b;
    let cr = 128.0 + 0.5 * r - 0.418688 * g - 0.081312 * b;
    (y, cb, cr)
}

/// Perceived luma of a gamma-encoded pixel with the given weight set.
pub fn luma(r: u8, g: u8, b: u8, weights: &[f64; 3]) -> f64 {
    weights[0] * r as f64 + weights[1] * g as f64 + weights[2] * b as f64
}

/// CIE 1931 chromaticity (x, y) of an XYZ triple. Degenerate input
/// (zero or non-finite sum) maps to the D65 chromaticity.
pub fn xyz_to_chromaticity(xyz: &Vec3) -> (f64, f64) {
    let sum = xyz[0] + xyz[1] + xyz[2];
    if !sum.is_finite() || sum <= 0.0 {
        return (0.31271, 0.32902);
    }
    (xyz[0] / sum, xyz[1] / sum)
}
