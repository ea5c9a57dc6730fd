//! Reductions (sum, product, sum of squares) and elementwise sqrt/log/exp

use super::GaloisMatrix;
use log::warn;

/// Dimension a reduction collapses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReduceDim {
    /// Row vectors reduce along the row; everything else column by column
    #[default]
    Auto,
    /// Collapse rows: one result per column (1 x cols)
    First,
    /// Collapse columns: one result per row (rows x 1)
    Second,
}

impl GaloisMatrix {
    fn reduce(&self, dim: ReduceDim, identity: u16, step: impl Fn(u16, u16) -> u16) -> GaloisMatrix {
        let (nr, nc) = self.shape();

        if nr > 0 && nc > 0 {
            let along_rows = (nr == 1 && dim == ReduceDim::Auto) || dim == ReduceDim::Second;
            return if along_rows {
                let data = (0..nr)
                    .map(|r| self.row(r).iter().fold(identity, |acc, &x| step(acc, x)))
                    .collect();
                self.with_data(nr, 1, data)
            } else {
                let data = (0..nc)
                    .map(|c| (0..nr).fold(identity, |acc, r| step(acc, self.get(r, c))))
                    .collect();
                self.with_data(1, nc, data)
            };
        }

        // Reduce-over-empty: fill with the identity element
        let (rows, cols) = match dim {
            _ if nc == 0 && (nr == 0 || (nr == 1 && dim == ReduceDim::Auto)) => (1, 1),
            ReduceDim::First | ReduceDim::Auto if nr == 0 => (1, nc),
            ReduceDim::Second if nc == 0 => (nr, 1),
            _ => ((nr > 0) as usize, (nc > 0) as usize),
        };
        GaloisMatrix::filled(rows, cols, identity, &self.field)
    }

    /// XOR-sum along a dimension
    pub fn sum(&self, dim: ReduceDim) -> GaloisMatrix {
        self.reduce(dim, 0, |acc, x| acc ^ x)
    }

    /// Field product along a dimension
    pub fn product(&self, dim: ReduceDim) -> GaloisMatrix {
        let field = self.field.clone();
        self.reduce(dim, 1, |acc, x| field.mul(acc, x))
    }

    /// Sum of squares along a dimension
    pub fn sumsq(&self, dim: ReduceDim) -> GaloisMatrix {
        let field = self.field.clone();
        self.reduce(dim, 0, |acc, x| acc ^ field.mul(x, x))
    }

    /// Elementwise square root (every element of GF(2^m) has exactly one)
    pub fn sqrt(&self) -> GaloisMatrix {
        let field = self.field.clone();
        let n = field.max_element();
        self.map(|x| {
            let idx = field.log(x);
            if idx % 2 == 1 {
                field.alpha((idx + n) / 2)
            } else {
                field.alpha(idx / 2)
            }
        })
    }

    /// Elementwise discrete log; the log of 0 is reported as n
    pub fn log(&self) -> GaloisMatrix {
        if self.data.contains(&0) {
            warn!("log of zero is undefined, returning 2^m - 1");
        }
        let field = self.field.clone();
        self.map(|x| field.log(x) as u16)
    }

    /// Elementwise α^x; α^n is reported as 0
    pub fn exp(&self) -> GaloisMatrix {
        let field = self.field.clone();
        let n = field.max_element();
        if self.data.iter().any(|&x| x as usize == n) {
            warn!("exp of 2^m - 1 is undefined, returning 0");
        }
        self.map(|x| field.alpha(x as usize))
    }
}
