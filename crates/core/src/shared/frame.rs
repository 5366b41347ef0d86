use ndarray::ArrayView3;

use crate::error::AnalysisError;

/// A decoded photo: contiguous RGB bytes in row-major order.
///
/// Format conversion happens at I/O boundaries only; the pipeline treats
/// pixel data as an immutable sample source.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8) -> Result<Self, AnalysisError> {
        let expected = width as usize * height as usize * channels as usize;
        if width == 0 || height == 0 || channels < 3 || data.len() != expected {
            return Err(AnalysisError::InvalidFrame {
                width,
                height,
                channels,
            });
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// RGB triple at (x, y). Out-of-bounds coordinates return black,
    /// keeping window sampling loops free of per-pixel bounds errors.
    pub fn rgb_at(&self, x: u32, y: u32) -> (u8, u8, u8) {
        if x >= self.width || y >= self.height {
            return (0, 0, 0);
        }
        let i = (y as usize * self.width as usize + x as usize) * self.channels as usize;
        (self.data[i], self.data[i + 1], self.data[i + 2])
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(
            (
                self.height as usize,
                self.width as usize,
                self.channels as usize,
            ),
            &self.data,
        )
        .expect("Frame data length must match dimensions")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_and_accessors() {
        let frame = Frame::new(vec![0u8; 12], 2, 2, 3).unwrap();
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.channels(), 3);
        assert_eq!(frame.pixel_count(), 4);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(
            Frame::new(vec![], 0, 2, 3),
            Err(AnalysisError::InvalidFrame { .. })
        ));
        assert!(matches!(
            Frame::new(vec![], 2, 0, 3),
            Err(AnalysisError::InvalidFrame { .. })
        ));
    }

    #[test]
    fn test_mismatched_data_length_rejected() {
        assert!(matches!(
            Frame::new(vec![0u8; 10], 2, 2, 3),
            Err(AnalysisError::InvalidFrame { .. })
        ));
    }

    #[test]
    fn test_rgb_at_reads_pixels() {
        // 2x1 RGB: first pixel red, second green
        let frame = Frame::new(vec![255, 0, 0, 0, 255, 0], 2, 1, 3).unwrap();
        assert_eq!(frame.rgb_at(0, 0), (255, 0, 0));
        assert_eq!(frame.rgb_at(1, 0), (0, 255, 0));
    }

    #[test]
    fn test_rgb_at_out_of_bounds_is_black() {
        let frame = Frame::new(vec![255u8; 3], 1, 1, 3).unwrap();
        assert_eq!(frame.rgb_at(5, 0), (0, 0, 0));
        assert_eq!(frame.rgb_at(0, 5), (0, 0, 0));
    }

    #[test]
    fn test_as_ndarray_shape() {
        let frame = Frame::new(vec![0u8; 24], 4, 2, 3).unwrap();
        assert_eq!(frame.as_ndarray().shape(), &[2, 4, 3]);
    }

    #[test]
    fn test_as_ndarray_agrees_with_rgb_at() {
        let frame = Frame::new(vec![1, 2, 3, 4, 5, 6], 2, 1, 3).unwrap();
        let px = frame.as_ndarray();
        assert_eq!(
            (px[[0, 1, 0]], px[[0, 1, 1]], px[[0, 1, 2]]),
            frame.rgb_at(1, 0)
        );
    }
}
