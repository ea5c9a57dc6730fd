//! Linear algebra over GF(2^m): LU factorization, solve, determinant, inverse, rank

pub mod lu;
pub mod solve;

pub use lu::{LuFactorization, PivotType};
pub use solve::{solve, solve_with_handler};

use crate::error::{GaloisError, GaloisResult};
use crate::matrix::GaloisMatrix;

/// Factor `a` with the requested pivoting strategy
pub fn lu_factor(a: &GaloisMatrix, pivot: PivotType) -> LuFactorization {
    LuFactorization::factor(a, pivot)
}

/// Determinant of a square matrix; 1 for the 0x0 matrix, 0 when singular
pub fn determinant(a: &GaloisMatrix) -> GaloisResult<u16> {
    if !a.is_square() {
        return Err(GaloisError::dimensions("det", a.shape(), (a.cols(), a.rows())));
    }
    if a.is_empty() {
        return Ok(1);
    }

    let lu = LuFactorization::factor(a, PivotType::Row);
    if lu.is_singular() {
        return Ok(0);
    }

    let field = a.field();
    let u = lu.packed();
    Ok((0..a.rows()).fold(1, |acc, i| field.mul(acc, u.get(i, i))))
}

/// Inverse of a square matrix via solve(A, I)
pub fn inverse(a: &GaloisMatrix) -> GaloisResult<GaloisMatrix> {
    if !a.is_square() {
        return Err(GaloisError::dimensions("inverse", a.shape(), (a.cols(), a.rows())));
    }
    if a.is_empty() {
        return Ok(a.clone());
    }
    solve(a, &GaloisMatrix::identity(a.rows(), a.field()))
}

/// Number of linearly independent columns, by column elimination
pub fn rank(a: &GaloisMatrix) -> usize {
    if a.is_empty() {
        return 0;
    }

    let field = a.field().clone();
    let n = field.max_element();
    let (nr, nc) = a.shape();
    let mut m = a.clone();
    let mut rank = 0;

    for i in 0..nc {
        let column = m.column(i);
        let Some(idx) = column.iter().position(|&v| v != 0) else {
            continue;
        };
        rank += 1;

        // Scale the pivot column so its pivot entry is 1
        let pivot_log = field.log(column[idx]);
        let scaled: Vec<u16> = column
            .iter()
            .map(|&v| {
                if v == 0 {
                    0
                } else {
                    field.alpha(field.modn(field.log(v) + n - pivot_log))
                }
            })
            .collect();

        for j in (i + 1)..nc {
            let factor = m.get(idx, j);
            if factor == 0 {
                continue;
            }
            let factor_log = field.log(factor);
            for (k, &c) in scaled.iter().enumerate().take(nr) {
                if c != 0 {
                    let v = m.get(k, j) ^ field.alpha(field.modn(field.log(c) + factor_log));
                    m.put(k, j, v);
                }
            }
        }
    }

    rank
}

/// A \ B, the solution of A·X = B
pub fn left_divide(a: &GaloisMatrix, b: &GaloisMatrix) -> GaloisResult<GaloisMatrix> {
    solve(a, b)
}

/// A / B, the solution of X·B = A
pub fn right_divide(a: &GaloisMatrix, b: &GaloisMatrix) -> GaloisResult<GaloisMatrix> {
    if a.cols() != b.cols() {
        return Err(GaloisError::dimensions("operator /", a.shape(), b.shape()));
    }
    Ok(solve(&b.transpose(), &a.transpose())?.transpose())
}
