//! Binary BCH code parameters and validation

use super::generator::generator_bits;
use crate::codec::{field_order_for_length, ParityPosition};
use crate::error::{GaloisError, GaloisResult};
use crate::galois::{acquire_field, FieldHandle, MAX_ORDER};
use crate::matrix::GaloisMatrix;
use log::trace;
use std::borrow::Cow;

/// Optional parameters of `bch_encode`/`bch_decode`
#[derive(Debug, Clone)]
pub struct BchOptions {
    /// Explicit GF(2) generator polynomial, constant term first
    pub generator: Option<GaloisMatrix>,
    /// Primitive polynomial of the GF(2^m) holding the roots (0 for the default)
    pub primpoly: u32,
    pub parity: ParityPosition,
}

impl Default for BchOptions {
    fn default() -> Self {
        Self {
            generator: None,
            primpoly: 0,
            parity: ParityPosition::Beginning,
        }
    }
}

impl BchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_generator(mut self, generator: GaloisMatrix) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn with_primpoly(mut self, primpoly: u32) -> Self {
        self.primpoly = primpoly;
        self
    }

    pub fn with_parity(mut self, parity: ParityPosition) -> Self {
        self.parity = parity;
        self
    }
}

/// Check that a matrix holds bits
pub(crate) fn require_binary(matrix: &GaloisMatrix, op: &str) -> GaloisResult<()> {
    if matrix.order() != 1 {
        return Err(GaloisError::invalid(format!(
            "{} operates on GF(2) matrices, got GF(2^{})",
            op,
            matrix.order()
        )));
    }
    Ok(())
}

/// A validated binary (n, k) BCH code
#[derive(Debug, Clone)]
pub struct BchCode {
    /// GF(2^m) holding the generator roots
    pub(crate) field: FieldHandle,
    pub(crate) gf2: FieldHandle,
    pub(crate) n: usize,
    pub(crate) k: usize,
    /// Explicit generator bits; built from cyclotomic cosets when absent
    pub(crate) generator: Option<Vec<u8>>,
    pub(crate) parity: ParityPosition,
}

impl BchCode {
    /// Validate (n, k) and the options.
    ///
    /// The root field is the smallest GF(2^m) with n ≤ 2^m - 1; n ≥ 3 and 1 ≤ k < n.
    pub fn new(n: usize, k: usize, options: &BchOptions) -> GaloisResult<Self> {
        let m = field_order_for_length(n);
        if n < 3 || k == 0 || k >= n || m > MAX_ORDER {
            return Err(GaloisError::invalid(format!(
                "invalid codeword and message lengths n={} k={}",
                n, k
            )));
        }
        let field = acquire_field(m, options.primpoly)?;
        let gf2 = acquire_field(1, 0)?;

        let generator = match &options.generator {
            Some(g) => {
                require_binary(g, "bch_encode")?;
                if !g.is_vector() || g.len() != n - k + 1 {
                    return Err(GaloisError::invalid(format!(
                        "generator polynomial has shape {:?}, expected a vector of {} bits",
                        g.shape(),
                        n - k + 1
                    )));
                }
                let bits = g.as_slice();
                if bits[0] != 1 || bits[n - k] != 1 {
                    return Err(GaloisError::invalid(
                        "generator polynomial must have nonzero constant and leading bits",
                    ));
                }
                Some(bits.iter().map(|&b| b as u8).collect())
            }
            None => None,
        };

        trace!(
            "BCH({}, {}) roots in GF(2^{}) with polynomial {:#x}",
            n,
            k,
            m,
            field.polynomial()
        );

        Ok(Self {
            field,
            gf2,
            n,
            k,
            generator,
            parity: options.parity,
        })
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn field(&self) -> &FieldHandle {
        &self.field
    }

    pub fn parity(&self) -> ParityPosition {
        self.parity
    }

    /// Generator bits, constant term first
    pub(crate) fn generator_bits(&self) -> GaloisResult<Cow<'_, [u8]>> {
        match &self.generator {
            Some(g) => Ok(Cow::Borrowed(g)),
            None => generator_bits(&self.field, self.n, self.k).map(Cow::Owned),
        }
    }

    /// Bit errors the generator is guaranteed to correct.
    ///
    /// Half the length of the run of consecutive roots α, α^2, ... of the
    /// generator in the root field (the BCH bound). Decoding with a larger t
    /// reads syndromes that are nonzero even on valid codewords.
    pub fn designed_capability(&self) -> GaloisResult<usize> {
        let g = self.generator_bits()?;
        let field = &self.field;
        let nn = field.max_element();
        let is_root = |i: usize| {
            g.iter()
                .enumerate()
                .filter(|&(_, &bit)| bit == 1)
                .fold(0u16, |acc, (j, _)| acc ^ field.alpha((i * j) % nn))
                == 0
        };
        Ok((1..=nn).take_while(|&i| is_root(i)).count() / 2)
    }

    /// Generator polynomial as a GF(2) row vector, constant term first
    pub fn generator(&self) -> GaloisResult<GaloisMatrix> {
        let bits = self.generator_bits()?;
        Ok(GaloisMatrix::from_raw(
            1,
            bits.len(),
            bits.iter().map(|&b| u16::from(b)).collect(),
            &self.gf2,
        ))
    }
}
