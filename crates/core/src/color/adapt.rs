//! Bradford chromatic adaptation to the D65 reference illuminant.
//!
//! The adaptation from a source white Ws to a destination white Wd is
//! `M = B⁻¹ · diag(LMS_Wd / LMS_Ws) · B` with `LMS = B · XYZ_white`
//! (Lam 1985; the transform used throughout ICC color management).

use crate::color::matrix::{mul, mul_vec, Mat3, Vec3, IDENTITY};
use crate::shared::constants::D65_WHITE_XYZ;

/// Bradford matrix: XYZ → sharpened cone response.
pub const BRADFORD: Mat3 = [
    [0.8951, 0.2664, -0.1614],
    [-0.7502, 1.7135, 0.0367],
    [0.0389, -0.0685, 1.0296],
];

/// Published inverse of [`BRADFORD`].
pub const BRADFORD_INV: Mat3 = [
    [0.9869929, -0.1470543, 0.1599627],
    [0.4323053, 0.5183603, 0.0492912],
    [-0.0085287, 0.0400428, 0.9684867],
];

/// Adaptation matrix taking colors under `source_white` to `dest_white`.
///
/// Degenerate source whites (zero or non-finite cone response) yield the
/// identity so a bad illuminant estimate cannot poison the sample.
pub fn adaptation_matrix(source_white: &Vec3, dest_white: &Vec3) -> Mat3 {
    let lms_src = mul_vec(&BRADFORD, source_white);
    let lms_dst = mul_vec(&BRADFORD, dest_white);

    let mut gain = [0.0f64; 3];
    for i in 0..3 {
        if !lms_src[i].is_finite() || lms_src[i].abs() < 1e-9 || !lms_dst[i].is_finite() {
            return IDENTITY;
        }
        gain[i] = lms_dst[i] / lms_src[i];
    }

    let diag: Mat3 = [
        [gain[0], 0.0, 0.0],
        [0.0, gain[1], 0.0],
        [0.0, 0.0, gain[2]],
    ];
    mul(&BRADFORD_INV, &mul(&diag, &BRADFORD))
}

/// Adapt one XYZ triple from `source_white` to D65.
pub fn adapt_to_d65(xyz: &Vec3, source_white: &Vec3) -> Vec3 {
    mul_vec(&adaptation_matrix(source_white, &D65_WHITE_XYZ), xyz)
}
