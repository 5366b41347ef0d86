//! Minimal 3×3 matrix operations for the fixed color-space transforms.

pub type Mat3 = [[f64; 3]; 3];
pub type Vec3 = [f64; 3];

pub const IDENTITY: Mat3 = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

pub fn mul(a: &Mat3, b: &Mat3) -> Mat3 {
    let mut out = [[0.0; 3]; 3];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = (0..3).map(|k| a[i][k] * b[k][j]).sum();
        }
    }
    out
}

pub fn mul_vec(m: &Mat3, v: &Vec3) -> Vec3 {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

/// Largest absolute element-wise deviation between two matrices.
pub fn max_abs_diff(a: &Mat3, b: &Mat3) -> f64 {
    let mut max = 0.0f64;
    for i in 0..3 {
        for j in 0..3 {
            max = max.max((a[i][j] - b[i][j]).abs());
        }
    }
    max
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mul_by_identity() {
        let m: Mat3 = [[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]];
        assert_eq!(mul(&m, &IDENTITY), m);
        assert_eq!(mul(&IDENTITY, &m), m);
    }

    #[test]
    fn test_mul_vec() {
        let m: Mat3 = [[2.0, 0.0, 0.0], [0.0, 3.0, 0.0], [1.0, 0.0, 1.0]];
        let v = mul_vec(&m, &[1.0, 2.0, 3.0]);
        assert_relative_eq!(v[0], 2.0);
        assert_relative_eq!(v[1], 6.0);
        assert_relative_eq!(v[2], 4.0);
    }

    #[test]
    fn test_max_abs_diff() {
        let a: Mat3 = IDENTITY;
        let mut b = IDENTITY;
        b[2][1] = 0.25;
        assert_relative_eq!(max_abs_diff(&a, &b), 0.25);
    }
}
