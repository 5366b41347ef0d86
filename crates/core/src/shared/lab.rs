use serde::Serialize;

/// CIE Lab color, the canonical cross-stage currency after calibration.
///
/// L* in [0,100]; a*/b* in [-128,127]. Every numeric stage downstream of
/// the calibrator operates on these values, never on raw pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LabColor {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl LabColor {
    pub fn new(l: f64, a: f64, b: f64) -> Self {
        Self {
            l: l.clamp(0.0, 100.0),
            a: a.clamp(-128.0, 127.0),
            b: b.clamp(-128.0, 127.0),
        }
    }

    /// C* = sqrt(a*² + b*²).
    pub fn chroma(&self) -> f64 {
        self.a.hypot(self.b)
    }

    /// Hue angle in degrees, normalized to [0, 360). Achromatic samples
    /// (a = b = 0) report 0 rather than an undefined angle.
    pub fn hue_degrees(&self) -> f64 {
        if self.a == 0.0 && self.b == 0.0 {
            return 0.0;
        }
        let h = self.b.atan2(self.a).to_degrees();
        if h < 0.0 {
            h + 360.0
        } else {
            h
        }
    }

    /// Euclidean ΔE*76 distance.
    pub fn delta_e(&self, other: &LabColor) -> f64 {
        let dl = self.l - other.l;
        let da = self.a - other.a;
        let db = self.b - other.b;
        (dl * dl + da * da + db * db).sqrt()
    }
}
