//! GF(2^m) log/antilog tables
//!
//! ## Table layout
//!
//! For a field of order m with n = 2^m - 1 nonzero elements:
//!
//! - `alpha_to[i]` is α^i for i in 0..n, and `alpha_to[n] = 0`
//! - `index_of[x]` is log_α(x) for x in 1..=n, and `index_of[0] = n`
//!
//! The value n therefore doubles as the "log of zero" sentinel (often called A0
//! in decoder literature). Any table lookup through `alpha(n)` yields 0, which lets
//! the coding routines keep zero handling branch-free where the algorithm allows it.
//!
//! Tables are built with the usual LFSR recurrence driven by the primitive
//! polynomial. A polynomial that fails to cycle through every nonzero element
//! is rejected as reducible.

use crate::error::{GaloisError, GaloisResult};
use log::trace;

/// Largest supported field order
pub const MAX_ORDER: u32 = 16;

/// Default primitive polynomials, indexed by field order (index 0 unused)
pub const DEFAULT_PRIMITIVE_POLYNOMIALS: [u32; 17] = [
    0x0, 0x3, 0x7, 0xb, 0x13, 0x25, 0x43, 0x89, 0x11d, 0x211, 0x409, 0x805, 0x1053, 0x201b,
    0x4443, 0x8003, 0x1100b,
];

/// Immutable GF(2^m) descriptor with its arithmetic tables
pub struct GaloisField {
    m: u32,
    primpoly: u32,
    n: usize,
    alpha_to: Vec<u16>,
    index_of: Vec<u16>,
}

impl std::fmt::Debug for GaloisField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GaloisField")
            .field("m", &self.m)
            .field("primpoly", &format_args!("{:#x}", self.primpoly))
            .finish()
    }
}

impl GaloisField {
    /// Build the tables for GF(2^m). A `primpoly` of 0 selects the default polynomial.
    pub fn new(m: u32, primpoly: u32) -> GaloisResult<Self> {
        let primpoly = resolve_polynomial(m, primpoly)?;
        let n = (1usize << m) - 1;
        let mut field = GaloisField {
            m,
            primpoly,
            n,
            alpha_to: vec![0; n + 1],
            index_of: vec![0; n + 1],
        };
        field.build_tables()?;
        trace!("built GF(2^{}) tables for polynomial {:#x}", m, primpoly);
        Ok(field)
    }

    fn build_tables(&mut self) -> GaloisResult<()> {
        let n = self.n;
        let mut filled = vec![false; n + 1];
        let mut mask = 1usize;

        for i in 0..n {
            self.index_of[mask] = i as u16;
            self.alpha_to[i] = mask as u16;
            filled[mask] = true;

            mask <<= 1;
            if mask & (1 << self.m) != 0 {
                mask ^= self.primpoly as usize;
            }
            mask &= n;
        }

        if mask != 1 || filled[1..].iter().any(|&f| !f) {
            return Err(GaloisError::ReduciblePolynomial {
                m: self.m,
                polynomial: self.primpoly,
            });
        }

        self.index_of[0] = n as u16;
        self.alpha_to[n] = 0;
        Ok(())
    }

    /// Field order m
    pub fn order(&self) -> u32 {
        self.m
    }

    /// Primitive polynomial as a bitmask (bit i is the coefficient of x^i)
    pub fn polynomial(&self) -> u32 {
        self.primpoly
    }

    /// n = 2^m - 1, the largest element and the size of the multiplicative group
    pub fn max_element(&self) -> usize {
        self.n
    }

    /// Number of elements, 2^m
    pub fn size(&self) -> usize {
        self.n + 1
    }

    /// Whether an integer is an element of this field
    pub fn contains(&self, value: i64) -> bool {
        value >= 0 && value <= self.n as i64
    }

    /// Validate an integer as an element of this field
    pub fn element(&self, value: i64) -> GaloisResult<u16> {
        if self.contains(value) {
            Ok(value as u16)
        } else {
            Err(GaloisError::OutOfRangeElement { value, m: self.m })
        }
    }

    /// α^i for 0 <= i <= n (α^n is defined as 0)
    #[inline]
    pub fn alpha(&self, i: usize) -> u16 {
        self.alpha_to[i]
    }

    /// Discrete log of x; log(0) is n
    #[inline]
    pub fn log(&self, x: u16) -> usize {
        self.index_of[x as usize] as usize
    }

    /// Reduce x modulo n using n = 2^m - 1
    #[inline]
    pub fn modn(&self, mut x: usize) -> usize {
        while x >= self.n {
            x -= self.n;
            x = (x >> self.m) + (x & self.n);
        }
        x
    }

    pub fn alpha_table(&self) -> &[u16] {
        &self.alpha_to
    }

    pub fn log_table(&self) -> &[u16] {
        &self.index_of
    }

    /// Same order and same polynomial
    pub fn same_field(&self, other: &GaloisField) -> bool {
        self.m == other.m && self.primpoly == other.primpoly
    }

    #[inline]
    pub fn add(&self, a: u16, b: u16) -> u16 {
        a ^ b
    }

    #[inline]
    pub fn mul(&self, a: u16, b: u16) -> u16 {
        if a == 0 || b == 0 {
            return 0;
        }
        self.alpha_to[self.modn(self.log(a) + self.log(b))]
    }

    pub fn div(&self, a: u16, b: u16) -> GaloisResult<u16> {
        if b == 0 {
            return Err(GaloisError::DivisionByZero);
        }
        if a == 0 {
            return Ok(0);
        }
        Ok(self.alpha_to[self.modn(self.log(a) + self.n - self.log(b))])
    }

    pub fn inverse(&self, a: u16) -> GaloisResult<u16> {
        self.div(1, a)
    }

    /// a^e with 0^0 = 1. Negative exponents are taken modulo the group order.
    pub fn pow(&self, a: u16, e: i64) -> u16 {
        let n = self.n as i64;
        let e = if e < 0 { e.rem_euclid(n) } else { e };
        if e == 0 {
            return 1;
        }
        if a == 0 {
            return 0;
        }
        let exp = (self.log(a) as u64 * (e % n) as u64) % self.n as u64;
        self.alpha_to[exp as usize]
    }
}

/// The built-in primitive polynomial for GF(2^m)
pub fn default_polynomial(m: u32) -> GaloisResult<u32> {
    if !(1..=MAX_ORDER).contains(&m) {
        return Err(GaloisError::InvalidFieldOrder(m));
    }
    Ok(DEFAULT_PRIMITIVE_POLYNOMIALS[m as usize])
}

/// Substitute the default polynomial for 0 and check the degree of anything else
pub(crate) fn resolve_polynomial(m: u32, primpoly: u32) -> GaloisResult<u32> {
    let default = default_polynomial(m)?;
    if primpoly == 0 {
        return Ok(default);
    }
    if primpoly >> (m + 1) != 0 || primpoly & (1 << m) == 0 {
        return Err(GaloisError::InvalidPolynomialDegree {
            m,
            polynomial: primpoly,
        });
    }
    Ok(primpoly)
}
