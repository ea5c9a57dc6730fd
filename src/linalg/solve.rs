//! Linear system solving by LU forward/back substitution

use super::lu::{LuFactorization, PivotType};
use crate::error::{GaloisError, GaloisResult};
use crate::galois::GaloisField;
use crate::matrix::GaloisMatrix;
use log::debug;

/// Solve A·X = B, failing with `SingularMatrix` when A is singular
pub fn solve(a: &GaloisMatrix, b: &GaloisMatrix) -> GaloisResult<GaloisMatrix> {
    solve_with_handler(a, b, |_| Err(GaloisError::SingularMatrix))
}

/// Solve A·X = B, deferring to `on_singular` when the factorization is singular.
///
/// Square and overdetermined systems use row pivoting and return the first
/// `cols(A)` rows of the substitution. Underdetermined systems (more columns
/// than rows) use column pivoting and set the free variables to zero.
pub fn solve_with_handler<F>(
    a: &GaloisMatrix,
    b: &GaloisMatrix,
    on_singular: F,
) -> GaloisResult<GaloisMatrix>
where
    F: FnOnce(&LuFactorization) -> GaloisResult<GaloisMatrix>,
{
    a.check_same_field(b)?;
    let (nr, nc) = a.shape();
    if nr == 0 || nc == 0 || nr != b.rows() {
        return Err(GaloisError::dimensions("solve", a.shape(), b.shape()));
    }

    let pivot_type = if nc > nr {
        PivotType::Column
    } else {
        PivotType::Row
    };
    let lu = LuFactorization::factor(a, pivot_type);
    if lu.is_singular() {
        debug!("solve: {}x{} system is singular", nr, nc);
        return on_singular(&lu);
    }

    let field = a.field().clone();
    let factors = lu.packed();
    let mn = nr.min(nc);
    let mut x = b.clone();

    if pivot_type == PivotType::Row {
        for (j, &p) in lu.pivots().iter().enumerate() {
            x.swap_rows(j, p);
        }
    }

    forward_substitute(&field, factors, &mut x, mn);

    if pivot_type == PivotType::Column {
        x = x.vconcat(&GaloisMatrix::zeros(nc - nr, x.cols(), &field))?;
    }

    back_substitute(&field, factors, &mut x, mn)?;

    match pivot_type {
        PivotType::Row => Ok(x.row_range(0, nc)),
        PivotType::Column => {
            for (j, &p) in lu.pivots().iter().enumerate().rev() {
                x.swap_rows(j, p);
            }
            Ok(x)
        }
    }
}

/// x <- L⁻¹·x with the unit lower triangle of the packed factors
fn forward_substitute(field: &GaloisField, factors: &GaloisMatrix, x: &mut GaloisMatrix, mn: usize) {
    let nr = factors.rows();
    for k in 0..mn {
        for col in 0..x.cols() {
            let xk = x.get(k, col);
            if xk == 0 {
                continue;
            }
            let xk_log = field.log(xk);
            for i in (k + 1)..nr {
                let l = factors.get(i, k);
                if l != 0 {
                    let v = x.get(i, col) ^ field.alpha(field.modn(field.log(l) + xk_log));
                    x.put(i, col, v);
                }
            }
        }
    }
}

/// x <- U⁻¹·x over the leading mn x mn block of U
fn back_substitute(
    field: &GaloisField,
    factors: &GaloisMatrix,
    x: &mut GaloisMatrix,
    mn: usize,
) -> GaloisResult<()> {
    for k in (0..mn).rev() {
        let pivot = factors.get(k, k);
        for col in 0..x.cols() {
            let xk = x.get(k, col);
            if xk == 0 {
                continue;
            }
            let xk = field.div(xk, pivot)?;
            x.put(k, col, xk);
            let xk_log = field.log(xk);
            for i in 0..k {
                let u = factors.get(i, k);
                if u != 0 {
                    let v = x.get(i, col) ^ field.alpha(field.modn(field.log(u) + xk_log));
                    x.put(i, col, v);
                }
            }
        }
    }
    Ok(())
}
