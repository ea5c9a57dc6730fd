//! Error types for Galois field arithmetic and channel coding

use thiserror::Error;

/// Result type for Galois field operations
pub type GaloisResult<T> = Result<T, GaloisError>;

/// Errors that can occur while building fields, doing matrix arithmetic or coding
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GaloisError {
    /// Field order outside 1..=16
    #[error("Galois field order must be between 1 and 16, got {0}")]
    InvalidFieldOrder(u32),

    /// Primitive polynomial without bit m set, or with bits above m
    #[error("primitive polynomial {polynomial:#x} is not of degree {m}")]
    InvalidPolynomialDegree { m: u32, polynomial: u32 },

    /// Primitive polynomial does not generate the full multiplicative group
    #[error("primitive polynomial {polynomial:#x} is reducible over GF(2^{m})")]
    ReduciblePolynomial { m: u32, polynomial: u32 },

    /// Operands bound to different fields
    #[error(
        "operands are in different Galois fields: GF(2^{lhs_m}) with {lhs_poly:#x} vs GF(2^{rhs_m}) with {rhs_poly:#x}"
    )]
    FieldMismatch {
        lhs_m: u32,
        lhs_poly: u32,
        rhs_m: u32,
        rhs_poly: u32,
    },

    /// Integer value that is not an element of GF(2^m)
    #[error("value {value} is not an element of GF(2^{m})")]
    OutOfRangeElement { value: i64, m: u32 },

    /// Division by the zero element
    #[error("division by zero in Galois field")]
    DivisionByZero,

    /// Non-conformant operand shapes
    #[error("{op}: nonconformant operands {lhs:?} vs {rhs:?}")]
    DimensionMismatch {
        op: &'static str,
        lhs: (usize, usize),
        rhs: (usize, usize),
    },

    /// LU factorization found a zero pivot
    #[error("Galois matrix is singular")]
    SingularMatrix,

    /// A decoded block had more errors than the code can correct
    #[error("block {row} has more errors than the code can correct")]
    UncorrectableError { row: usize },

    /// Requested variant of an operation does not exist
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),

    /// Generator polynomial does not divide x^n + 1
    #[error("polynomial {polynomial:#x} does not produce a cyclic code of length {n}")]
    NotCyclicPolynomial { polynomial: u64, n: usize },

    /// Code parameters or operand contents rejected
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A long-running search observed its cancellation checkpoint
    #[error("search cancelled")]
    Cancelled,
}

impl GaloisError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        GaloisError::InvalidArgument(msg.into())
    }

    pub(crate) fn dimensions(op: &'static str, lhs: (usize, usize), rhs: (usize, usize)) -> Self {
        GaloisError::DimensionMismatch { op, lhs, rhs }
    }
}
