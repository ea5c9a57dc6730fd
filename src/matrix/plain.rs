//! Plain integer matrices, the non-field operand of mixed arithmetic

use crate::error::{GaloisError, GaloisResult};

/// Row-major integer matrix
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlainMatrix {
    pub(crate) rows: usize,
    pub(crate) cols: usize,
    pub(crate) data: Vec<i64>,
}

impl PlainMatrix {
    pub fn new(rows: usize, cols: usize, data: Vec<i64>) -> GaloisResult<Self> {
        if data.len() != rows * cols {
            return Err(GaloisError::dimensions(
                "plain matrix",
                (rows, cols),
                (data.len(), 1),
            ));
        }
        Ok(Self { rows, cols, data })
    }

    /// Build from a grid of rows; every row must have the same length
    pub fn from_rows(grid: &[Vec<i64>]) -> GaloisResult<Self> {
        let (rows, cols) = grid_shape(grid)?;
        Ok(Self {
            rows,
            cols,
            data: grid.iter().flatten().copied().collect(),
        })
    }

    pub fn scalar(value: i64) -> Self {
        Self {
            rows: 1,
            cols: 1,
            data: vec![value],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn get(&self, row: usize, col: usize) -> i64 {
        self.data[row * self.cols + col]
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.data
    }
}

/// Shape of a rectangular grid, or `DimensionMismatch` for ragged rows
pub(crate) fn grid_shape(grid: &[Vec<i64>]) -> GaloisResult<(usize, usize)> {
    let rows = grid.len();
    let cols = grid.first().map_or(0, Vec::len);
    if let Some(bad) = grid.iter().find(|row| row.len() != cols) {
        return Err(GaloisError::dimensions(
            "matrix rows",
            (1, cols),
            (1, bad.len()),
        ));
    }
    Ok((rows, cols))
}
