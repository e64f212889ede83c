// grid.rs - Normalized depth values
//
// Stored as (rows, cols) = (height, width) in standard layout, so linear
// index i is pixel (i % width, i / width).

use ndarray::Array2;

use crate::error::{Result, ViewerError};

/// Depth in [0, 1] per source pixel. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct DepthGrid {
    values: Array2<f32>,
}

impl DepthGrid {
    /// Build from row-major values. `values.len()` must equal `width * height`.
    pub fn from_vec(width: u32, height: u32, values: Vec<f32>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ViewerError::EmptyImage { width, height });
        }
        let expected = width as usize * height as usize;
        let actual = values.len();
        let values = Array2::from_shape_vec((height as usize, width as usize), values)
            .map_err(|_| ViewerError::DimensionMismatch { expected, actual })?;
        Ok(Self { values })
    }

    pub fn width(&self) -> u32 { self.values.ncols() as u32 }
    pub fn height(&self) -> u32 { self.values.nrows() as u32 }
    pub fn len(&self) -> usize { self.values.len() }
    pub fn is_empty(&self) -> bool { self.values.is_empty() }

    /// Depth at pixel (x, y), or None outside the grid.
    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        self.values.get((y as usize, x as usize)).copied()
    }

    /// Values in linear (row-major) order.
    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        self.values.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<f32> {
        self.iter().collect()
    }

    pub fn min_max(&self) -> (f32, f32) {
        self.iter()
            .fold((f32::MAX, f32::MIN), |(mn, mx), v| (mn.min(v), mx.max(v)))
    }

    pub fn mean(&self) -> f32 {
        self.values.mean().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_major_indexing() {
        let grid = DepthGrid::from_vec(3, 2, vec![0.0, 0.1, 0.2, 0.3, 0.4, 0.5]).unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.get(2, 0), Some(0.2));
        assert_eq!(grid.get(0, 1), Some(0.3));
        assert_eq!(grid.get(3, 0), None);
        assert_eq!(grid.to_vec(), vec![0.0, 0.1, 0.2, 0.3, 0.4, 0.5]);
    }

    #[test]
    fn wrong_length_is_rejected() {
        let err = DepthGrid::from_vec(2, 2, vec![0.0; 3]).unwrap_err();
        assert!(matches!(err, ViewerError::DimensionMismatch { expected: 4, actual: 3 }));
    }

    #[test]
    fn stats() {
        let grid = DepthGrid::from_vec(2, 2, vec![0.0, 0.5, 1.0, 0.5]).unwrap();
        assert_eq!(grid.min_max(), (0.0, 1.0));
        assert!((grid.mean() - 0.5).abs() < 1e-6);
    }
}
