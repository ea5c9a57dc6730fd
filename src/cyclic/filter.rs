//! Linear shift-register filters over GF(2) and GF(2^m)
//!
//! Both filters use the transposed direct form: `y[i] = s[0] + b[0]x[i]` and
//! `s[j] = s[j+1] + b[j+1]x[i] - a[j+1]y[i]`, with subtraction equal to addition
//! in characteristic 2. Coefficient vectors are padded with zeros to a common
//! length `L`; the state holds `L - 1` elements.

use crate::error::{GaloisError, GaloisResult};
use crate::matrix::GaloisMatrix;
use std::ops::BitXor;

fn run<T>(b: &[T], a: &[T], x: &[T], state: &mut [T], mul: impl Fn(T, T) -> T) -> Vec<T>
where
    T: Copy + BitXor<Output = T>,
{
    let nz = state.len();
    let mut y = Vec::with_capacity(x.len());

    for &xi in x {
        let yi = match state.first() {
            Some(&s0) => s0 ^ mul(b[0], xi),
            None => mul(b[0], xi),
        };
        if nz > 0 {
            for j in 0..nz - 1 {
                state[j] = state[j + 1] ^ mul(a[j + 1], yi) ^ mul(b[j + 1], xi);
            }
            state[nz - 1] = mul(a[nz], yi) ^ mul(b[nz], xi);
        }
        y.push(yi);
    }

    y
}

fn padded<T: Copy + Default>(coeffs: &[T], len: usize) -> Vec<T> {
    let mut v = coeffs.to_vec();
    v.resize(len, T::default());
    v
}

/// Filter the bit sequence `x` through b(z)/a(z) over GF(2), starting from zero state.
///
/// `a[0]` must be 1. Every input must be 0 or 1.
pub fn filter_gf2(b: &[u8], a: &[u8], x: &[u8]) -> GaloisResult<Vec<u8>> {
    if let Some(&bad) = b.iter().chain(a).chain(x).find(|&&v| v > 1) {
        return Err(GaloisError::OutOfRangeElement {
            value: bad as i64,
            m: 1,
        });
    }
    if b.is_empty() || a.first() != Some(&1) {
        return Err(GaloisError::invalid(
            "filter needs a numerator and a denominator with a[0] = 1",
        ));
    }

    let len = a.len().max(b.len());
    let mut state = vec![0u8; len - 1];
    Ok(run(
        &padded(b, len),
        &padded(a, len),
        x,
        &mut state,
        |p, q| p & q,
    ))
}

/// Output and final state of a GF(2^m) filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutput {
    /// Same shape as the input sequence
    pub output: GaloisMatrix,
    /// Column vector of length `max(len(a), len(b)) - 1`
    pub state: GaloisMatrix,
}

/// Filter the GF(2^m) vector `x` through b(z)/a(z).
///
/// Coefficients are normalised by `a[0]`, which must be nonzero. `si` gives the
/// initial state; it defaults to zeros.
pub fn filter(
    b: &GaloisMatrix,
    a: &GaloisMatrix,
    x: &GaloisMatrix,
    si: Option<&GaloisMatrix>,
) -> GaloisResult<FilterOutput> {
    b.check_same_field(a)?;
    b.check_same_field(x)?;
    if !b.is_vector() || !a.is_vector() {
        return Err(GaloisError::invalid("filter coefficients must be vectors"));
    }
    if !x.is_empty() && !x.is_vector() {
        return Err(GaloisError::invalid("filter input must be a vector"));
    }

    let field = a.field().clone();
    let a0 = a.as_slice()[0];
    if a0 == 0 {
        return Err(GaloisError::DivisionByZero);
    }

    let len = a.len().max(b.len());
    let normalise = |c: &GaloisMatrix| -> GaloisResult<Vec<u16>> {
        let scaled = c
            .as_slice()
            .iter()
            .map(|&v| field.div(v, a0))
            .collect::<GaloisResult<Vec<_>>>()?;
        Ok(padded(&scaled, len))
    };
    let bn = normalise(b)?;
    let an = normalise(a)?;

    let mut state = match si {
        Some(si) => {
            si.check_same_field(a)?;
            if si.len() != len - 1 || (!si.is_empty() && !si.is_vector()) {
                return Err(GaloisError::dimensions("filter", si.shape(), (len - 1, 1)));
            }
            si.as_slice().to_vec()
        }
        None => vec![0u16; len - 1],
    };

    let y = run(&bn, &an, x.as_slice(), &mut state, |p, q| field.mul(p, q));
    let nz = state.len();

    Ok(FilterOutput {
        output: GaloisMatrix::from_raw(x.rows(), x.cols(), y, &field),
        state: GaloisMatrix::from_raw(nz, 1, state, &field),
    })
}
