//! LU factorization over GF(2^m)
//!
//! Pivot candidates are ranked by their raw integer encoding. That ordering has
//! no meaning inside the field; it only picks a nonzero pivot when one exists and
//! breaks ties deterministically, which keeps factorizations reproducible.

use crate::matrix::GaloisMatrix;
use log::debug;

/// Which interchanges the factorization may perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PivotType {
    /// Row interchanges: P·A = L·U
    #[default]
    Row,
    /// Column interchanges: A·Q = L·U
    Column,
}

/// Packed L\U factors with pivot bookkeeping
#[derive(Debug, Clone)]
pub struct LuFactorization {
    factors: GaloisMatrix,
    pivots: Vec<usize>,
    pivot_type: PivotType,
    singular: bool,
}

impl LuFactorization {
    /// Factor `a` with Gaussian elimination.
    ///
    /// A zero pivot marks the factorization singular; elimination continues with
    /// the remaining columns. With row pivoting a zero pivot means the column is
    /// already clear below it, so P·A = L·U holds for any input. With column
    /// pivoting the entries below a zero pivot row have no multiplier and are
    /// cleared from L, so A·Q = L·U holds only for nonsingular A.
    pub fn factor(a: &GaloisMatrix, pivot_type: PivotType) -> Self {
        let mut lu = a.clone();
        let (nr, nc) = a.shape();
        let mn = nr.min(nc);
        let field = a.field().clone();
        let n = field.max_element();
        let mut pivots = Vec::with_capacity(mn);
        let mut singular = false;

        for j in 0..mn {
            let jp = match pivot_type {
                PivotType::Row => max_index((j..nr).map(|i| (i, lu.get(i, j)))),
                PivotType::Column => max_index((j..nc).map(|i| (i, lu.get(j, i)))),
            };
            pivots.push(jp);

            let pivot = match pivot_type {
                PivotType::Row => lu.get(jp, j),
                PivotType::Column => lu.get(j, jp),
            };

            if pivot != 0 {
                match pivot_type {
                    PivotType::Row => lu.swap_rows(j, jp),
                    PivotType::Column => lu.swap_cols(j, jp),
                }

                let pivot_log = field.log(lu.get(j, j));
                for i in (j + 1)..nr {
                    let v = lu.get(i, j);
                    if v != 0 {
                        lu.put(i, j, field.alpha(field.modn(field.log(v) + n - pivot_log)));
                    }
                }
            } else {
                singular = true;
                for i in (j + 1)..nr {
                    lu.put(i, j, 0);
                }
            }

            if j + 1 < mn {
                for i in (j + 1)..nr {
                    let mult = lu.get(i, j);
                    if mult == 0 {
                        continue;
                    }
                    let mult_log = field.log(mult);
                    for k in (j + 1)..nc {
                        let u = lu.get(j, k);
                        if u != 0 {
                            let v = lu.get(i, k) ^ field.alpha(field.modn(field.log(u) + mult_log));
                            lu.put(i, k, v);
                        }
                    }
                }
            }
        }

        if singular {
            debug!("LU factorization of {}x{} matrix is singular", nr, nc);
        }

        Self {
            factors: lu,
            pivots,
            pivot_type,
            singular,
        }
    }

    pub fn is_singular(&self) -> bool {
        self.singular
    }

    pub fn pivot_type(&self) -> PivotType {
        self.pivot_type
    }

    /// Interchange performed at each step: step j swapped j with `pivots()[j]`
    pub fn pivots(&self) -> &[usize] {
        &self.pivots
    }

    /// Packed factors: U on and above the diagonal, L's multipliers below it
    pub fn packed(&self) -> &GaloisMatrix {
        &self.factors
    }

    /// Unit lower-triangular factor, rows x min(rows, cols)
    pub fn l(&self) -> GaloisMatrix {
        let (nr, nc) = self.factors.shape();
        let mn = nr.min(nc);
        let mut l = GaloisMatrix::zeros(nr, mn, self.factors.field());
        for i in 0..nr {
            for j in 0..mn.min(i + 1) {
                let v = if i == j { 1 } else { self.factors.get(i, j) };
                l.put(i, j, v);
            }
        }
        l
    }

    /// Upper-triangular factor, min(rows, cols) x cols
    pub fn u(&self) -> GaloisMatrix {
        let (nr, nc) = self.factors.shape();
        let mn = nr.min(nc);
        let mut u = GaloisMatrix::zeros(mn, nc, self.factors.field());
        for i in 0..mn {
            for j in i..nc {
                u.put(i, j, self.factors.get(i, j));
            }
        }
        u
    }

    /// The final row (or column) order as indices into the original matrix
    pub fn permutation_vector(&self) -> Vec<usize> {
        let len = match self.pivot_type {
            PivotType::Row => self.factors.rows(),
            PivotType::Column => self.factors.cols(),
        };
        let mut perm: Vec<usize> = (0..len).collect();
        for (j, &p) in self.pivots.iter().enumerate() {
            perm.swap(j, p);
        }
        perm
    }

    /// P with P·A = L·U for row pivoting, or Q with A·Q = L·U for column pivoting
    pub fn permutation(&self) -> GaloisMatrix {
        let perm = self.permutation_vector();
        let size = perm.len();
        let mut p = GaloisMatrix::zeros(size, size, self.factors.field());
        for (i, &src) in perm.iter().enumerate() {
            match self.pivot_type {
                PivotType::Row => p.put(i, src, 1),
                PivotType::Column => p.put(src, i, 1),
            }
        }
        p
    }
}

/// Index of the largest raw value; the first one wins ties
fn max_index(candidates: impl Iterator<Item = (usize, u16)>) -> usize {
    let mut best: Option<(usize, u16)> = None;
    for (i, v) in candidates {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map_or(0, |(i, _)| i)
}
