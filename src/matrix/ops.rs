//! GF(2^m) matrix arithmetic
//!
//! Addition and subtraction are XOR. Products and quotients go through the
//! log/antilog tables. Elementwise operations broadcast a 1x1 operand against
//! any shape; otherwise both shapes must match.
//!
//! Mixed operations take an [`Operand`], a closed set of the three operand
//! kinds callers hold: a Galois matrix, a plain integer matrix, or a scalar.
//! Non-Galois operands are promoted into the Galois operand's field, and a
//! value outside that field is rejected.

use super::{GaloisMatrix, PlainMatrix};
use crate::error::{GaloisError, GaloisResult};
use crate::galois::FieldHandle;
use crate::linalg;
use std::borrow::Cow;

// ============================================================================
// Elementwise arithmetic
// ============================================================================

impl GaloisMatrix {
    /// Apply `f` pairwise with scalar broadcasting
    fn zip_with(
        &self,
        other: &GaloisMatrix,
        op: &'static str,
        f: impl Fn(u16, u16) -> u16,
    ) -> GaloisResult<GaloisMatrix> {
        self.check_same_field(other)?;

        if self.shape() == other.shape() {
            let data = self
                .data
                .iter()
                .zip(&other.data)
                .map(|(&a, &b)| f(a, b))
                .collect();
            Ok(self.with_data(self.rows, self.cols, data))
        } else if self.is_scalar() {
            let a = self.data[0];
            Ok(other.map(|b| f(a, b)))
        } else if other.is_scalar() {
            let b = other.data[0];
            Ok(self.map(|a| f(a, b)))
        } else {
            Err(GaloisError::dimensions(op, self.shape(), other.shape()))
        }
    }

    pub fn add(&self, other: &GaloisMatrix) -> GaloisResult<GaloisMatrix> {
        self.zip_with(other, "operator +", |a, b| a ^ b)
    }

    pub fn sub(&self, other: &GaloisMatrix) -> GaloisResult<GaloisMatrix> {
        self.zip_with(other, "operator -", |a, b| a ^ b)
    }

    /// Elementwise product `.*`
    pub fn elem_mul(&self, other: &GaloisMatrix) -> GaloisResult<GaloisMatrix> {
        let field = self.field.clone();
        self.zip_with(other, "product", |a, b| field.mul(a, b))
    }

    /// Elementwise quotient `./`; any zero in the divisor is an error
    pub fn elem_div(&self, other: &GaloisMatrix) -> GaloisResult<GaloisMatrix> {
        self.check_same_field(other)?;
        if self.shape() != other.shape() && !self.is_scalar() && !other.is_scalar() {
            return Err(GaloisError::dimensions("quotient", self.shape(), other.shape()));
        }
        if other.data.contains(&0) {
            return Err(GaloisError::DivisionByZero);
        }
        let field = self.field.clone();
        let n = field.max_element();
        self.zip_with(other, "quotient", |a, b| {
            if a == 0 {
                0
            } else {
                field.alpha(field.modn(field.log(a) + n - field.log(b)))
            }
        })
    }

    /// Elementwise power by a single integer exponent
    pub fn elem_pow(&self, exponent: i64) -> GaloisMatrix {
        let field = self.field.clone();
        self.map(|a| field.pow(a, exponent))
    }

    /// Elementwise power by a matrix of integer exponents (broadcasting 1x1 either side)
    pub fn elem_pow_by(&self, exponents: &PlainMatrix) -> GaloisResult<GaloisMatrix> {
        let field = &self.field;
        if exponents.shape() == self.shape() {
            let data = self
                .data
                .iter()
                .zip(exponents.as_slice())
                .map(|(&a, &e)| field.pow(a, e))
                .collect();
            Ok(self.with_data(self.rows, self.cols, data))
        } else if exponents.rows() == 1 && exponents.cols() == 1 {
            Ok(self.elem_pow(exponents.get(0, 0)))
        } else if self.is_scalar() {
            let a = self.data[0];
            let data = exponents
                .as_slice()
                .iter()
                .map(|&e| field.pow(a, e))
                .collect();
            Ok(self.with_data(exponents.rows(), exponents.cols(), data))
        } else {
            Err(GaloisError::dimensions(
                "operator .^",
                self.shape(),
                exponents.shape(),
            ))
        }
    }

    /// Number of differing bits between corresponding elements
    pub fn bit_errors(&self, other: &GaloisMatrix) -> GaloisResult<PlainMatrix> {
        self.check_same_field(other)?;
        if self.shape() != other.shape() {
            return Err(GaloisError::dimensions(
                "bit errors",
                self.shape(),
                other.shape(),
            ));
        }
        let counts = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(&a, &b)| (a ^ b).count_ones() as i64)
            .collect();
        PlainMatrix::new(self.rows, self.cols, counts)
    }
}

// ============================================================================
// Matrix products and powers
// ============================================================================

impl GaloisMatrix {
    /// Matrix product; a 1x1 operand degrades to an elementwise product
    pub fn matmul(&self, other: &GaloisMatrix) -> GaloisResult<GaloisMatrix> {
        self.check_same_field(other)?;
        if self.is_scalar() || other.is_scalar() {
            return self.elem_mul(other);
        }
        if self.cols != other.rows {
            return Err(GaloisError::dimensions(
                "operator *",
                self.shape(),
                other.shape(),
            ));
        }

        let field = &self.field;
        let n = field.max_element();
        let other_log: Vec<usize> = other.data.iter().map(|&b| field.log(b)).collect();
        let mut data = vec![0u16; self.rows * other.cols];

        for i in 0..self.rows {
            let out = &mut data[i * other.cols..(i + 1) * other.cols];
            for k in 0..self.cols {
                let a = self.get(i, k);
                if a == 0 {
                    continue;
                }
                let la = field.log(a);
                let row_log = &other_log[k * other.cols..(k + 1) * other.cols];
                for (o, &lb) in out.iter_mut().zip(row_log) {
                    if lb != n {
                        *o ^= field.alpha(field.modn(la + lb));
                    }
                }
            }
        }

        Ok(self.with_data(self.rows, other.cols, data))
    }

    /// Matrix power of a square matrix; negative exponents invert first
    pub fn pow(&self, exponent: i64) -> GaloisResult<GaloisMatrix> {
        if !self.is_square() {
            return Err(GaloisError::dimensions(
                "operator ^",
                self.shape(),
                (self.cols, self.rows),
            ));
        }

        let mut base = if exponent < 0 {
            linalg::inverse(self)?
        } else {
            self.clone()
        };
        let mut e = exponent.unsigned_abs();
        let mut result = GaloisMatrix::identity(self.rows, &self.field);

        while e > 0 {
            if e & 1 == 1 {
                result = result.matmul(&base)?;
            }
            e >>= 1;
            if e > 0 {
                base = base.matmul(&base)?;
            }
        }
        Ok(result)
    }
}

impl std::ops::Add for &GaloisMatrix {
    type Output = GaloisResult<GaloisMatrix>;

    fn add(self, rhs: Self) -> Self::Output {
        GaloisMatrix::add(self, rhs)
    }
}

impl std::ops::Sub for &GaloisMatrix {
    type Output = GaloisResult<GaloisMatrix>;

    fn sub(self, rhs: Self) -> Self::Output {
        GaloisMatrix::sub(self, rhs)
    }
}

impl std::ops::Mul for &GaloisMatrix {
    type Output = GaloisResult<GaloisMatrix>;

    fn mul(self, rhs: Self) -> Self::Output {
        self.matmul(rhs)
    }
}

// ============================================================================
// Mixed-operand dispatch
// ============================================================================

/// One side of a binary operation
#[derive(Debug, Clone, Copy)]
pub enum Operand<'a> {
    Galois(&'a GaloisMatrix),
    Plain(&'a PlainMatrix),
    Scalar(i64),
}

impl<'a> From<&'a GaloisMatrix> for Operand<'a> {
    fn from(m: &'a GaloisMatrix) -> Self {
        Operand::Galois(m)
    }
}

impl<'a> From<&'a PlainMatrix> for Operand<'a> {
    fn from(m: &'a PlainMatrix) -> Self {
        Operand::Plain(m)
    }
}

impl From<i64> for Operand<'_> {
    fn from(v: i64) -> Self {
        Operand::Scalar(v)
    }
}

impl<'a> Operand<'a> {
    fn field(&self) -> Option<&'a FieldHandle> {
        match *self {
            Operand::Galois(m) => Some(m.field()),
            _ => None,
        }
    }

    /// This operand as an element matrix of `field`
    fn promote(self, field: &FieldHandle) -> GaloisResult<Cow<'a, GaloisMatrix>> {
        match self {
            Operand::Galois(m) => Ok(Cow::Borrowed(m)),
            Operand::Plain(p) => GaloisMatrix::from_plain(field, p).map(Cow::Owned),
            Operand::Scalar(v) => {
                let v = field.element(v)?;
                Ok(Cow::Owned(GaloisMatrix::from_raw(1, 1, vec![v], field)))
            }
        }
    }

    /// This operand's values as raw integers (exponent position)
    fn to_plain(self) -> Cow<'a, PlainMatrix> {
        match self {
            Operand::Galois(m) => Cow::Owned(PlainMatrix {
                rows: m.rows(),
                cols: m.cols(),
                data: m.as_slice().iter().map(|&v| v as i64).collect(),
            }),
            Operand::Plain(p) => Cow::Borrowed(p),
            Operand::Scalar(v) => Cow::Owned(PlainMatrix::scalar(v)),
        }
    }
}

/// Operators available through [`binary_op`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    /// `.*`
    ElemMul,
    /// `./`
    ElemDiv,
    /// `*`
    MatMul,
    /// `.^`; the right operand is read as integer exponents
    ElemPow,
    /// `\`
    LeftDiv,
    /// `/`
    RightDiv,
}

/// Concatenation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

fn common_field<'a>(lhs: &Operand<'a>, rhs: &Operand<'a>) -> GaloisResult<&'a FieldHandle> {
    lhs.field().or_else(|| rhs.field()).ok_or_else(|| {
        GaloisError::invalid("at least one operand must be a Galois matrix")
    })
}

/// Evaluate `lhs op rhs` for any mix of operand kinds
pub fn binary_op(op: BinaryOp, lhs: Operand<'_>, rhs: Operand<'_>) -> GaloisResult<GaloisMatrix> {
    let field = common_field(&lhs, &rhs)?;

    let a: &GaloisMatrix = &*lhs.promote(field)?;
    // Promoted lazily: exponents of `.^` are integers, not field elements
    let b = || rhs.promote(field);
    match op {
        BinaryOp::Add => a.add(&*b()?),
        BinaryOp::Sub => a.sub(&*b()?),
        BinaryOp::ElemMul => a.elem_mul(&*b()?),
        BinaryOp::ElemDiv => a.elem_div(&*b()?),
        BinaryOp::MatMul => a.matmul(&*b()?),
        BinaryOp::ElemPow => a.elem_pow_by(&*rhs.to_plain()),
        BinaryOp::LeftDiv => linalg::left_divide(a, &*b()?),
        BinaryOp::RightDiv => linalg::right_divide(a, &*b()?),
    }
}

/// Concatenate two operands, promoting a plain side into the Galois side's field
pub fn concat(lhs: Operand<'_>, rhs: Operand<'_>, axis: Axis) -> GaloisResult<GaloisMatrix> {
    let field = common_field(&lhs, &rhs)?;
    let a: &GaloisMatrix = &*lhs.promote(field)?;
    let b: &GaloisMatrix = &*rhs.promote(field)?;
    match axis {
        Axis::Horizontal => a.hconcat(b),
        Axis::Vertical => a.vconcat(b),
    }
}
