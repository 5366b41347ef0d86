//! Process-wide reference constants shared across stages.
//!
//! Stage-specific thresholds live next to the stage that owns them;
//! only values referenced from more than one stage belong here.

/// D65 reference white point in CIE XYZ (CIE 15:2004).
pub const D65_WHITE_XYZ: [f64; 3] = [0.95047, 1.0, 1.08883];

/// Correlated color temperature of D65 in Kelvin.
pub const D65_CCT_KELVIN: f64 = 6500.0;

/// Fixed landmark-set size of the injected face detector.
pub const LANDMARK_COUNT: usize = 468;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_d65_white_point_matches_cie() {
        assert!((D65_WHITE_XYZ[0] - 0.95047).abs() < 1e-9);
        assert!((D65_WHITE_XYZ[1] - 1.0).abs() < 1e-9);
        assert!((D65_WHITE_XYZ[2] - 1.08883).abs() < 1e-9);
    }
}
