//! Reed-Solomon code parameters and validation

use super::generator::{derive_roots, gcd, generator_coefficients, inverse_prim};
use crate::codec::{field_order_for_length, ParityPosition};
use crate::error::{GaloisError, GaloisResult};
use crate::galois::{FieldHandle, MAX_ORDER};
use crate::matrix::GaloisMatrix;
use log::trace;

/// Optional parameters of `rs_encode`/`rs_decode`
#[derive(Debug, Clone)]
pub struct RsOptions {
    /// Explicit generator polynomial (leading coefficient first)
    pub generator: Option<GaloisMatrix>,
    /// First consecutive root and primitive element exponent
    pub roots: Option<(usize, usize)>,
    pub parity: ParityPosition,
}

impl Default for RsOptions {
    fn default() -> Self {
        Self {
            generator: None,
            roots: None,
            parity: ParityPosition::End,
        }
    }
}

impl RsOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_generator(mut self, generator: GaloisMatrix) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn with_roots(mut self, fcr: usize, prim: usize) -> Self {
        self.roots = Some((fcr, prim));
        self
    }

    pub fn with_parity(mut self, parity: ParityPosition) -> Self {
        self.parity = parity;
        self
    }
}

/// A validated (n, k) Reed-Solomon code over one field
#[derive(Debug, Clone)]
pub struct RsCode {
    pub(crate) field: FieldHandle,
    pub(crate) n: usize,
    pub(crate) k: usize,
    pub(crate) generator: Vec<u16>,
    /// Explicit roots; derived from the generator on first decode when absent
    pub(crate) roots: Option<(usize, usize)>,
    pub(crate) parity: ParityPosition,
}

impl RsCode {
    /// Validate (n, k) and the options against `field`.
    ///
    /// The field must be the smallest one holding n symbols, n ≥ 3, 1 ≤ k ≤ n,
    /// and n - k must be even.
    pub fn new(field: &FieldHandle, n: usize, k: usize, options: &RsOptions) -> GaloisResult<Self> {
        let m = field_order_for_length(n);
        if n < 3 || k == 0 || k > n || m > MAX_ORDER {
            return Err(GaloisError::invalid(format!(
                "invalid codeword and message lengths n={} k={}",
                n, k
            )));
        }
        if field.order() != m {
            return Err(GaloisError::invalid(format!(
                "symbols in GF(2^{}) but a length {} code needs GF(2^{})",
                field.order(),
                n,
                m
            )));
        }
        if (n - k) % 2 != 0 {
            return Err(GaloisError::invalid(
                "difference of codeword and message length must be even",
            ));
        }

        let nroots = n - k;
        let nn = field.max_element();

        if let Some((fcr, prim)) = options.roots {
            if !(1..=nn).contains(&fcr) {
                return Err(GaloisError::invalid(format!(
                    "first consecutive root {} outside 1..={}",
                    fcr, nn
                )));
            }
            if !(1..=nn).contains(&prim) || gcd(prim, nn) != 1 {
                return Err(GaloisError::invalid(format!(
                    "primitive element exponent {} must be in 1..={} and coprime to {}",
                    prim, nn, nn
                )));
            }
        }

        let generator = match &options.generator {
            Some(g) => {
                if g.field().polynomial() != field.polynomial() || g.order() != field.order() {
                    return Err(GaloisError::FieldMismatch {
                        lhs_m: field.order(),
                        lhs_poly: field.polynomial(),
                        rhs_m: g.order(),
                        rhs_poly: g.polynomial(),
                    });
                }
                if !g.is_vector() {
                    return Err(GaloisError::invalid("the generator polynomial must be a vector"));
                }
                if g.len() != nroots + 1 {
                    return Err(GaloisError::invalid(format!(
                        "generator polynomial has {} coefficients, expected {}",
                        g.len(),
                        nroots + 1
                    )));
                }
                if g.as_slice()[0] == 0 {
                    return Err(GaloisError::invalid(
                        "generator polynomial must have a nonzero leading coefficient",
                    ));
                }
                g.as_slice().to_vec()
            }
            None => {
                let (fcr, prim) = options.roots.unwrap_or((1, 1));
                generator_coefficients(field, nroots, fcr, prim)
            }
        };

        let roots = match (&options.generator, options.roots) {
            (_, Some(r)) => Some(r),
            (None, None) => Some((1, 1)),
            (Some(_), None) => None,
        };

        trace!(
            "RS({}, {}) over GF(2^{}) generator {:?} roots {:?}",
            n,
            k,
            m,
            generator,
            roots
        );

        Ok(Self {
            field: field.clone(),
            n,
            k,
            generator,
            roots,
            parity: options.parity,
        })
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn nroots(&self) -> usize {
        self.n - self.k
    }

    /// Symbols correctable per codeword
    pub fn capability(&self) -> usize {
        self.nroots() / 2
    }

    pub fn field(&self) -> &FieldHandle {
        &self.field
    }

    pub fn parity(&self) -> ParityPosition {
        self.parity
    }

    /// Generator polynomial as a row vector, leading coefficient first
    pub fn generator(&self) -> GaloisMatrix {
        GaloisMatrix::from_raw(1, self.generator.len(), self.generator.clone(), &self.field)
    }

    /// (fcr, prim, iprim) for decoding, derived from the generator when not given
    pub(crate) fn decoder_roots(&self) -> GaloisResult<(usize, usize, usize)> {
        let (fcr, prim) = match self.roots {
            Some(r) => r,
            None => derive_roots(&self.field, &self.generator)?,
        };
        Ok((fcr, prim, inverse_prim(prim, self.field.max_element())))
    }
}
