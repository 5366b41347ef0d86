//! Sharpness scoring: variance of a discrete Laplacian response.
//!
//! Both kernels sum to zero by construction, so a flat field scores 0 and
//! the response measures edge energy only. The 5×5 LoG variant spreads
//! the support for high-resolution frames where single-pixel noise would
//! dominate the 3×3 response.

use ndarray::Array2;

use crate::color::convert::luma;
use crate::shared::frame::Frame;

/// 4-neighbor discrete Laplacian (center −4, neighbors +1).
pub const LAPLACIAN_3X3: [[f64; 3]; 3] = [
    [0.0, 1.0, 0.0],
    [1.0, -4.0, 1.0],
    [0.0, 1.0, 0.0],
];

/// 5×5 Laplacian-of-Gaussian (center +16).
pub const LOG_5X5: [[f64; 5]; 5] = [
    [0.0, 0.0, -1.0, 0.0, 0.0],
    [0.0, -1.0, -2.0, -1.0, 0.0],
    [-1.0, -2.0, 16.0, -2.0, -1.0],
    [0.0, -1.0, -2.0, -1.0, 0.0],
    [0.0, 0.0, -1.0, 0.0, 0.0],
];

/// Frames at or above this pixel count use the extended kernel.
pub const EXTENDED_KERNEL_PIXELS: usize = 2_000_000;

/// Contiguous sharpness band edges: rejected < warning ≤ acceptable ≤ optimal.
pub const REJECTED_MAX: f64 = 50.0;
pub const WARNING_MAX: f64 = 100.0;
pub const ACCEPTABLE_MAX: f64 = 300.0;

/// Variance of the Laplacian response over the frame's luma plane.
///
/// Returns 0.0 for frames too small to hold the kernel interior.
pub fn laplacian_variance(frame: &Frame, weights: &[f64; 3]) -> f64 {
    let px = frame.as_ndarray();
    let (h, w) = (px.shape()[0], px.shape()[1]);
    let gray = Array2::from_shape_fn((h, w), |(y, x)| {
        luma(px[[y, x, 0]], px[[y, x, 1]], px[[y, x, 2]], weights)
    });

    if frame.pixel_count() >= EXTENDED_KERNEL_PIXELS {
        response_variance(&gray, &LOG_5X5)
    } else {
        response_variance(&gray, &LAPLACIAN_3X3)
    }
}

fn response_variance<const K: usize>(gray: &Array2<f64>, kernel: &[[f64; K]; K]) -> f64 {
    let (h, w) = gray.dim();
    if w < K || h < K {
        return 0.0;
    }

    let mut sum = 0.0;
    let mut sum_sq = 0.0;
    let mut count = 0usize;

    for window in gray.windows((K, K)) {
        let mut r = 0.0;
        for (ky, row) in kernel.iter().enumerate() {
            for (kx, &k) in row.iter().enumerate() {
                if k != 0.0 {
                    r += k * window[[ky, kx]];
                }
            }
        }
        sum += r;
        sum_sq += r * r;
        count += 1;
    }

    let n = count as f64;
    let mean = sum / n;
    (sum_sq / n - mean * mean).max(0.0)
}
