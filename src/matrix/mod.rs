//! Matrices over GF(2^m)
//!
//! A [`GaloisMatrix`] is a row-major array of field elements that carries a shared
//! handle to its field's tables. Every element is kept below 2^m; all constructors
//! and mutators that accept raw integers validate that bound.
//!
//! Arithmetic lives in [`ops`], reductions and elementwise functions in [`reduce`].

pub mod ops;
pub mod plain;
pub mod reduce;

pub use ops::{binary_op, concat, Axis, BinaryOp, Operand};
pub use plain::PlainMatrix;
pub use reduce::ReduceDim;

use crate::error::{GaloisError, GaloisResult};
use crate::galois::{acquire_field, FieldHandle, GaloisField};
use plain::grid_shape;
use std::sync::Arc;

/// Rectangular array of GF(2^m) elements bound to one field
#[derive(Clone)]
pub struct GaloisMatrix {
    rows: usize,
    cols: usize,
    data: Vec<u16>,
    field: FieldHandle,
}

impl std::fmt::Debug for GaloisMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GaloisMatrix")
            .field("m", &self.field.order())
            .field("primpoly", &format_args!("{:#x}", self.field.polynomial()))
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .field("data", &self.data)
            .finish()
    }
}

impl PartialEq for GaloisMatrix {
    fn eq(&self, other: &Self) -> bool {
        self.field.same_field(&other.field)
            && self.rows == other.rows
            && self.cols == other.cols
            && self.data == other.data
    }
}

impl Eq for GaloisMatrix {}

/// Build a matrix from integer rows, validating every value against the field
pub fn build_matrix(field: &FieldHandle, grid: &[Vec<i64>]) -> GaloisResult<GaloisMatrix> {
    GaloisMatrix::from_int_grid(field, grid)
}

// ============================================================================
// Construction
// ============================================================================

impl GaloisMatrix {
    /// Internal constructor; callers guarantee shape and element range
    pub(crate) fn from_raw(rows: usize, cols: usize, data: Vec<u16>, field: &FieldHandle) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        Self {
            rows,
            cols,
            data,
            field: Arc::clone(field),
        }
    }

    pub fn zeros(rows: usize, cols: usize, field: &FieldHandle) -> Self {
        Self::from_raw(rows, cols, vec![0; rows * cols], field)
    }

    pub fn filled(rows: usize, cols: usize, value: u16, field: &FieldHandle) -> Self {
        Self::from_raw(rows, cols, vec![value; rows * cols], field)
    }

    pub fn identity(n: usize, field: &FieldHandle) -> Self {
        let mut matrix = Self::zeros(n, n, field);
        for i in 0..n {
            matrix.data[i * n + i] = 1;
        }
        matrix
    }

    /// Row-major data of exactly `rows * cols` elements
    pub fn from_vec(
        rows: usize,
        cols: usize,
        data: Vec<u16>,
        field: &FieldHandle,
    ) -> GaloisResult<Self> {
        if data.len() != rows * cols {
            return Err(GaloisError::dimensions(
                "matrix data",
                (rows, cols),
                (data.len(), 1),
            ));
        }
        check_elements(field, &data)?;
        Ok(Self::from_raw(rows, cols, data, field))
    }

    pub fn from_int_grid(field: &FieldHandle, grid: &[Vec<i64>]) -> GaloisResult<Self> {
        let (rows, cols) = grid_shape(grid)?;
        let data = grid
            .iter()
            .flatten()
            .map(|&v| field.element(v))
            .collect::<GaloisResult<Vec<_>>>()?;
        Ok(Self::from_raw(rows, cols, data, field))
    }

    pub fn from_plain(field: &FieldHandle, plain: &PlainMatrix) -> GaloisResult<Self> {
        let data = plain
            .as_slice()
            .iter()
            .map(|&v| field.element(v))
            .collect::<GaloisResult<Vec<_>>>()?;
        Ok(Self::from_raw(plain.rows(), plain.cols(), data, field))
    }

    pub fn row_vector(field: &FieldHandle, values: &[u16]) -> GaloisResult<Self> {
        Self::from_vec(1, values.len(), values.to_vec(), field)
    }

    pub fn column_vector(field: &FieldHandle, values: &[u16]) -> GaloisResult<Self> {
        Self::from_vec(values.len(), 1, values.to_vec(), field)
    }

    /// A GF(2) matrix from 0/1 rows, the representation used for binary codes
    pub fn binary(grid: &[Vec<i64>]) -> GaloisResult<Self> {
        let field = acquire_field(1, 0)?;
        Self::from_int_grid(&field, grid)
    }
}

fn check_elements(field: &GaloisField, data: &[u16]) -> GaloisResult<()> {
    match data.iter().find(|&&v| v as usize > field.max_element()) {
        Some(&v) => Err(GaloisError::OutOfRangeElement {
            value: v as i64,
            m: field.order(),
        }),
        None => Ok(()),
    }
}

// ============================================================================
// Access
// ============================================================================

impl GaloisMatrix {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_scalar(&self) -> bool {
        self.rows == 1 && self.cols == 1
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn is_vector(&self) -> bool {
        (self.rows == 1 || self.cols == 1) && !self.is_empty()
    }

    pub fn field(&self) -> &FieldHandle {
        &self.field
    }

    /// Field order m
    pub fn order(&self) -> u32 {
        self.field.order()
    }

    pub fn polynomial(&self) -> u32 {
        self.field.polynomial()
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u16 {
        self.data[row * self.cols + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: u16) -> GaloisResult<()> {
        let value = self.field.element(value as i64)?;
        self.data[row * self.cols + col] = value;
        Ok(())
    }

    #[inline]
    pub(crate) fn put(&mut self, row: usize, col: usize, value: u16) {
        self.data[row * self.cols + col] = value;
    }

    pub fn row(&self, row: usize) -> &[u16] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub(crate) fn row_mut(&mut self, row: usize) -> &mut [u16] {
        &mut self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub fn column(&self, col: usize) -> Vec<u16> {
        (0..self.rows).map(|r| self.get(r, col)).collect()
    }

    pub fn as_slice(&self) -> &[u16] {
        &self.data
    }

    pub(crate) fn swap_rows(&mut self, a: usize, b: usize) {
        if a != b {
            for c in 0..self.cols {
                self.data.swap(a * self.cols + c, b * self.cols + c);
            }
        }
    }

    pub(crate) fn swap_cols(&mut self, a: usize, b: usize) {
        if a != b {
            for r in 0..self.rows {
                self.data.swap(r * self.cols + a, r * self.cols + b);
            }
        }
    }

    /// Elements as integer rows, for persistence and display collaborators
    pub fn to_int_grid(&self) -> Vec<Vec<i64>> {
        (0..self.rows)
            .map(|r| self.row(r).iter().map(|&v| v as i64).collect())
            .collect()
    }

    /// Copy with the same shape and field but new elements
    pub(crate) fn with_data(&self, rows: usize, cols: usize, data: Vec<u16>) -> Self {
        Self::from_raw(rows, cols, data, &self.field)
    }

    pub(crate) fn map(&self, f: impl Fn(u16) -> u16) -> Self {
        self.with_data(self.rows, self.cols, self.data.iter().map(|&v| f(v)).collect())
    }
}

// ============================================================================
// Field binding
// ============================================================================

impl GaloisMatrix {
    pub fn same_field(&self, other: &GaloisMatrix) -> bool {
        Arc::ptr_eq(&self.field, &other.field) || self.field.same_field(&other.field)
    }

    pub(crate) fn check_same_field(&self, other: &GaloisMatrix) -> GaloisResult<()> {
        if self.same_field(other) {
            Ok(())
        } else {
            Err(GaloisError::FieldMismatch {
                lhs_m: self.order(),
                lhs_poly: self.polynomial(),
                rhs_m: other.order(),
                rhs_poly: other.polynomial(),
            })
        }
    }

    /// Reinterpret the elements in another field.
    ///
    /// All elements are validated before anything changes, so on error the
    /// matrix is still bound to its old field.
    pub fn rebind(&mut self, field: &FieldHandle) -> GaloisResult<()> {
        if Arc::ptr_eq(&self.field, field) {
            return Ok(());
        }
        check_elements(field, &self.data)?;
        self.field = Arc::clone(field);
        Ok(())
    }

    /// Cross-field assignment: take the other matrix's field and contents
    pub fn assign_from(&mut self, other: &GaloisMatrix) {
        let data = other.data.clone();
        let field = Arc::clone(&other.field);
        self.rows = other.rows;
        self.cols = other.cols;
        self.data = data;
        self.field = field;
    }
}

// ============================================================================
// Shape manipulation
// ============================================================================

impl GaloisMatrix {
    pub fn transpose(&self) -> GaloisMatrix {
        let mut data = Vec::with_capacity(self.data.len());
        for c in 0..self.cols {
            for r in 0..self.rows {
                data.push(self.get(r, c));
            }
        }
        self.with_data(self.cols, self.rows, data)
    }

    /// Reshape in column-major order
    pub fn reshape(&self, rows: usize, cols: usize) -> GaloisResult<GaloisMatrix> {
        if rows * cols != self.len() {
            return Err(GaloisError::dimensions("reshape", self.shape(), (rows, cols)));
        }
        let mut data = vec![0; self.len()];
        for l in 0..self.len() {
            let (sr, sc) = (l % self.rows, l / self.rows);
            let (dr, dc) = (l % rows, l / rows);
            data[dr * cols + dc] = self.get(sr, sc);
        }
        Ok(self.with_data(rows, cols, data))
    }

    /// Diagonal extraction or construction.
    ///
    /// A vector is placed on the k-th diagonal of a new square matrix. Any other
    /// matrix has its k-th diagonal extracted as a column vector; k > 0 is above
    /// the main diagonal, k < 0 below it.
    pub fn diag(&self, k: isize) -> GaloisResult<GaloisMatrix> {
        let offset = k.unsigned_abs();
        if self.is_vector() {
            let len = self.len();
            let size = len + offset;
            let mut out = Self::zeros(size, size, &self.field);
            for (i, &v) in self.data.iter().enumerate() {
                let (r, c) = if k >= 0 { (i, i + offset) } else { (i + offset, i) };
                out.put(r, c, v);
            }
            return Ok(out);
        }

        let (rows, cols) = if k >= 0 {
            (self.rows, self.cols.saturating_sub(offset))
        } else {
            (self.rows.saturating_sub(offset), self.cols)
        };
        if rows == 0 || cols == 0 {
            return Err(GaloisError::invalid(format!(
                "diag: requested diagonal {} out of range for {}x{} matrix",
                k, self.rows, self.cols
            )));
        }
        let data = (0..rows.min(cols))
            .map(|i| {
                if k >= 0 {
                    self.get(i, i + offset)
                } else {
                    self.get(i + offset, i)
                }
            })
            .collect::<Vec<_>>();
        Ok(self.with_data(data.len(), 1, data))
    }

    /// [self, other]
    pub fn hconcat(&self, other: &GaloisMatrix) -> GaloisResult<GaloisMatrix> {
        self.check_same_field(other)?;
        if other.rows == 0 && other.cols == 0 {
            return Ok(self.clone());
        }
        if self.rows == 0 && self.cols == 0 {
            return Ok(other.clone());
        }
        if self.rows != other.rows {
            return Err(GaloisError::dimensions(
                "horizontal concatenation",
                self.shape(),
                other.shape(),
            ));
        }
        let cols = self.cols + other.cols;
        let mut data = Vec::with_capacity(self.rows * cols);
        for r in 0..self.rows {
            data.extend_from_slice(self.row(r));
            data.extend_from_slice(other.row(r));
        }
        Ok(self.with_data(self.rows, cols, data))
    }

    /// [self; other]
    pub fn vconcat(&self, other: &GaloisMatrix) -> GaloisResult<GaloisMatrix> {
        self.check_same_field(other)?;
        if other.rows == 0 && other.cols == 0 {
            return Ok(self.clone());
        }
        if self.rows == 0 && self.cols == 0 {
            return Ok(other.clone());
        }
        if self.cols != other.cols {
            return Err(GaloisError::dimensions(
                "vertical concatenation",
                self.shape(),
                other.shape(),
            ));
        }
        let mut data = self.data.clone();
        data.extend_from_slice(&other.data);
        Ok(self.with_data(self.rows + other.rows, self.cols, data))
    }

    /// Copy of rows `start..end`
    pub fn row_range(&self, start: usize, end: usize) -> GaloisMatrix {
        self.with_data(
            end - start,
            self.cols,
            self.data[start * self.cols..end * self.cols].to_vec(),
        )
    }

    /// Copy of columns `start..end`
    pub fn col_range(&self, start: usize, end: usize) -> GaloisMatrix {
        let mut data = Vec::with_capacity(self.rows * (end - start));
        for r in 0..self.rows {
            data.extend_from_slice(&self.row(r)[start..end]);
        }
        self.with_data(self.rows, end - start, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gf8() -> FieldHandle {
        acquire_field(3, 0).unwrap()
    }

    #[test]
    fn test_build_matrix_validates_range() {
        let field = gf8();
        let m = build_matrix(&field, &[vec![0, 7], vec![3, 4]]).unwrap();
        assert_eq!(m.shape(), (2, 2));
        assert_eq!(m.to_int_grid(), vec![vec![0, 7], vec![3, 4]]);

        assert_eq!(
            build_matrix(&field, &[vec![0, 8]]).unwrap_err(),
            GaloisError::OutOfRangeElement { value: 8, m: 3 }
        );
        assert_eq!(
            build_matrix(&field, &[vec![-1]]).unwrap_err(),
            GaloisError::OutOfRangeElement { value: -1, m: 3 }
        );
    }

    #[test]
    fn test_set_validates_range() {
        let mut m = GaloisMatrix::zeros(2, 2, &gf8());
        assert!(m.set(0, 1, 9).is_err());
        assert_eq!(m.get(0, 1), 0);
        m.set(0, 1, 5).unwrap();
        assert_eq!(m.get(0, 1), 5);
    }

    #[test]
    fn test_rebind_is_all_or_nothing() {
        let gf16 = acquire_field(4, 0).unwrap();
        let mut m = GaloisMatrix::from_int_grid(&gf16, &[vec![1, 15]]).unwrap();
        let gf8 = gf8();
        assert!(m.rebind(&gf8).is_err());
        assert_eq!(m.order(), 4);

        let mut small = GaloisMatrix::from_int_grid(&gf16, &[vec![1, 7]]).unwrap();
        small.rebind(&gf8).unwrap();
        assert_eq!(small.order(), 3);
        assert_eq!(small.as_slice(), &[1, 7]);
    }

    #[test]
    fn test_assign_from_takes_field() {
        let gf16 = acquire_field(4, 0).unwrap();
        let mut m = GaloisMatrix::zeros(1, 1, &gf8());
        let other = GaloisMatrix::from_int_grid(&gf16, &[vec![12, 13]]).unwrap();
        m.assign_from(&other);
        assert_eq!(m, other);
    }

    #[test]
    fn test_transpose_and_reshape() {
        let field = gf8();
        let m = build_matrix(&field, &[vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
        assert_eq!(
            m.transpose().to_int_grid(),
            vec![vec![1, 4], vec![2, 5], vec![3, 6]]
        );
        // Column-major order: 1 4 2 5 3 6
        assert_eq!(
            m.reshape(3, 2).unwrap().to_int_grid(),
            vec![vec![1, 5], vec![4, 3], vec![2, 6]]
        );
        assert!(m.reshape(4, 2).is_err());
    }

    #[test]
    fn test_diag_construct_and_extract() {
        let field = gf8();
        let v = GaloisMatrix::row_vector(&field, &[1, 2]).unwrap();
        let d = v.diag(1).unwrap();
        assert_eq!(
            d.to_int_grid(),
            vec![vec![0, 1, 0], vec![0, 0, 2], vec![0, 0, 0]]
        );
        assert_eq!(d.diag(1).unwrap().as_slice(), &[1, 2]);
        assert_eq!(d.diag(0).unwrap().as_slice(), &[0, 0, 0]);

        let below = v.diag(-1).unwrap();
        assert_eq!(below.get(1, 0), 1);
        assert_eq!(below.get(2, 1), 2);

        assert!(d.diag(3).is_err());
        assert!(d.diag(-3).is_err());
    }

    #[test]
    fn test_concat_requires_same_field() {
        let a = GaloisMatrix::identity(2, &gf8());
        let b = GaloisMatrix::identity(2, &acquire_field(4, 0).unwrap());
        assert!(matches!(
            a.hconcat(&b),
            Err(GaloisError::FieldMismatch { .. })
        ));
        let h = a.hconcat(&a).unwrap();
        assert_eq!(h.shape(), (2, 4));
        let v = a.vconcat(&a).unwrap();
        assert_eq!(v.shape(), (4, 2));
        assert_eq!(v.row(3), &[0, 1]);
    }

    #[test]
    fn test_binary_matrix() {
        let m = GaloisMatrix::binary(&[vec![1, 0, 1]]).unwrap();
        assert_eq!(m.order(), 1);
        assert!(GaloisMatrix::binary(&[vec![2]]).is_err());
    }
}
