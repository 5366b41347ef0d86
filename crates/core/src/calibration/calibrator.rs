//! Stage 3: chromatic adaptation to D65 and skin sampling.
//!
//! The frame's illuminant is estimated once from the background border
//! (gray-world there, not over the face, which would read skin warmth as
//! a color cast) and every sampled pixel is Bradford-adapted to D65
//! before Lab conversion, so ambient-light warmth does not bias the
//! extracted skin tone.

use serde::Serialize;

use crate::color::adapt::adapt_to_d65;
use crate::color::cct::{cct_from_chromaticity, white_point_from_cct};
use crate::color::convert::{linear_rgb_to_xyz, srgb_decode, xyz_to_chromaticity, xyz_to_lab};
use crate::error::AnalysisError;
use crate::geometry::validator::FaceGeometry;
use crate::shared::constants::{D65_CCT_KELVIN, D65_WHITE_XYZ};
use crate::shared::frame::Frame;
use crate::shared::lab::LabColor;

use super::skin::{is_skin_pixel, zone_window, SkinZone, ALL_ZONES};

/// Fraction of a zone window that must pass the skin filter for the
/// zone to contribute a reading.
pub const MIN_ZONE_COVERAGE: f64 = 0.30;

/// Border band (fraction of each dimension) sampled for the illuminant.
const BORDER_FRAC: f64 = 0.12;

/// Estimates within this distance of D65 skip adaptation entirely.
const CCT_IDENTITY_TOLERANCE: f64 = 200.0;

#[derive(Clone, Copy, Debug, Serialize)]
pub struct SkinRegionSample {
    pub zone: SkinZone,
    pub lab: LabColor,
    /// Skin-pixel fraction of the zone window, in [0, 1].
    pub coverage: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct CalibratedSample {
    /// Coverage-weighted aggregate of the zone readings.
    pub measured: LabColor,
    pub regions: Vec<SkinRegionSample>,
}

pub struct ColorCalibrator;

impl ColorCalibrator {
    pub fn calibrate(
        frame: &Frame,
        geometry: &FaceGeometry,
    ) -> Result<CalibratedSample, AnalysisError> {
        let source_white = Self::estimate_source_white(frame);

        let mut regions = Vec::new();
        let mut best_coverage = 0.0f64;

        for zone in ALL_ZONES {
            let window = zone_window(zone, &geometry.landmarks);
            if window.is_empty() {
                continue;
            }

            let x0 = window.x0.max(0.0) as u32;
            let y0 = window.y0.max(0.0) as u32;
            let x1 = (window.x1.min(frame.width() as f64) as u32).max(x0);
            let y1 = (window.y1.min(frame.height() as f64) as u32).max(y0);
            let total = ((x1 - x0) as usize) * ((y1 - y0) as usize);
            if total == 0 {
                continue;
            }

            let mut sum = [0.0f64; 3];
            let mut skin = 0usize;
            for y in y0..y1 {
                for x in x0..x1 {
                    let (r, g, b) = frame.rgb_at(x, y);
                    if is_skin_pixel(r, g, b) {
                        sum[0] += srgb_decode(r);
                        sum[1] += srgb_decode(g);
                        sum[2] += srgb_decode(b);
                        skin += 1;
                    }
                }
            }

            let coverage = skin as f64 / total as f64;
            best_coverage = best_coverage.max(coverage);
            if coverage < MIN_ZONE_COVERAGE {
                continue;
            }

            let n = skin as f64;
            let mean = [sum[0] / n, sum[1] / n, sum[2] / n];
            let adapted = adapt_to_d65(&linear_rgb_to_xyz(&mean), &source_white);
            regions.push(SkinRegionSample {
                zone,
                lab: xyz_to_lab(&adapted),
                coverage,
            });
        }

        if regions.is_empty() {
            return Err(AnalysisError::InsufficientSkinCoverage {
                best_coverage: best_coverage * 100.0,
                floor: MIN_ZONE_COVERAGE * 100.0,
            });
        }

        Ok(CalibratedSample {
            measured: Self::weighted_average(&regions),
            regions,
        })
    }

    /// Gray-world estimate over the border band only. Estimates already
    /// close to D65 return the D65 white exactly, so near-neutral scenes
    /// are not perturbed by adaptation noise.
    pub fn estimate_source_white(frame: &Frame) -> [f64; 3] {
        let bw = ((frame.width() as f64 * BORDER_FRAC) as u32).max(1);
        let bh = ((frame.height() as f64 * BORDER_FRAC) as u32).max(1);

        let mut sum = [0.0f64; 3];
        let mut count = 0usize;
        for y in 0..frame.height() {
            for x in 0..frame.width() {
                let in_border = x < bw
                    || x >= frame.width() - bw
                    || y < bh
                    || y >= frame.height() - bh;
                if !in_border {
                    continue;
                }
                let (r, g, b) = frame.rgb_at(x, y);
                sum[0] += srgb_decode(r);
                sum[1] += srgb_decode(g);
                sum[2] += srgb_decode(b);
                count += 1;
            }
        }

        let n = count.max(1) as f64;
        let mean = [sum[0] / n, sum[1] / n, sum[2] / n];
        let (cx, cy) = xyz_to_chromaticity(&linear_rgb_to_xyz(&mean));
        let cct = cct_from_chromaticity(cx, cy);
        if (cct - D65_CCT_KELVIN).abs() < CCT_IDENTITY_TOLERANCE {
            return D65_WHITE_XYZ;
        }
        white_point_from_cct(cct)
    }

    fn weighted_average(regions: &[SkinRegionSample]) -> LabColor {
        let total: f64 = regions.iter().map(|r| r.coverage).sum();
        if total <= 0.0 {
            return regions[0].lab;
        }
        let mut l = 0.0;
        let mut a = 0.0;
        let mut b = 0.0;
        for r in regions {
            let w = r.coverage / total;
            l += w * r.lab.l;
            a += w * r.lab.a;
            b += w * r.lab.b;
        }
        LabColor::new(l, a, b)
    }
}
