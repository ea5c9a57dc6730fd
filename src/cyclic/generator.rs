//! Cyclic code generator polynomials and their parity/generator matrices

use super::cancel::{checkpoint, CancelCheck};
use super::filter::filter_gf2;
use crate::error::{GaloisError, GaloisResult};
use crate::galois::{acquire_field, PolySelector};
use crate::matrix::GaloisMatrix;
use log::{debug, warn};

/// Largest parity length (degree of the generator polynomial) that fits a u64 mask
pub const MAX_PARITY_BITS: usize = 62;

/// Layout of the matrices produced for a cyclic code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GeneratorForm {
    /// Identity in the trailing columns of the generator matrix
    #[default]
    Systematic,
    NonSystematic,
}

/// Parity-check and generator matrices of an (n, k) cyclic code over GF(2)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CyclicCode {
    /// (n - k) x n parity-check matrix
    pub parity: GaloisMatrix,
    /// k x n generator matrix
    pub generator: GaloisMatrix,
    pub k: usize,
}

fn bits_of(poly: u64, len: usize) -> Vec<u8> {
    (0..len)
        .map(|i| if i < 64 { ((poly >> i) & 1) as u8 } else { 0 })
        .collect()
}

/// Whether the degree-m polynomial `poly` divides x^n + 1 over GF(2).
///
/// Only bits 0..=m of `poly` are considered. The check divides x^n + 1 by p(x)
/// with one filter, multiplies the quotient back with a second, and compares.
pub fn is_cyclic_polynomial(poly: u64, n: usize, m: usize) -> bool {
    if m == 0 || m > n || m > MAX_PARITY_BITS || poly & 1 == 0 {
        return false;
    }

    let mut y = vec![0u8; n + 1];
    y[0] = 1;
    y[n] = 1;
    let p = bits_of(poly & ((1u64 << (m + 1)) - 1), n + 1);

    let mut impulse = vec![0u8; n - m + 2];
    impulse[0] = 1;

    // Both filters only see 0/1 data with a leading 1 in the denominator
    let Ok(mut quotient) = filter_gf2(&y, &p, &impulse) else {
        return false;
    };
    quotient.resize(n + 1, 0);

    let mut one = vec![0u8; m + 1];
    one[0] = 1;
    match filter_gf2(&p[..=m], &one, &quotient) {
        Ok(product) => product == y,
        Err(_) => false,
    }
}

/// Generator polynomials of (n, k) cyclic codes, as bitmasks with the constant term in bit 0.
///
/// `Min` and `Max` return the first match scanning up or down through the odd
/// polynomials of degree n - k. An empty result means no polynomial qualifies.
pub fn cyclic_polynomials(
    n: usize,
    k: usize,
    selector: PolySelector,
    cancel: &dyn CancelCheck,
) -> GaloisResult<Vec<u64>> {
    if n < 1 {
        return Err(GaloisError::invalid("n must be 1 or greater"));
    }
    if k >= n {
        return Err(GaloisError::invalid("k must be less than n"));
    }
    let m = n - k;
    if m > MAX_PARITY_BITS {
        return Err(GaloisError::invalid(format!(
            "n - k must be at most {}, got {}",
            MAX_PARITY_BITS, m
        )));
    }

    let low = (1u64 << m) + 1;
    let high = (1u64 << (m + 1)) - 1;
    let mut found = Vec::new();

    match selector {
        PolySelector::Min | PolySelector::All | PolySelector::Weight(_) => {
            let mut p = low;
            while p <= high {
                checkpoint(cancel)?;
                let weight_ok = match selector {
                    PolySelector::Weight(w) => p.count_ones() == w,
                    _ => true,
                };
                if weight_ok && is_cyclic_polynomial(p, n, m) {
                    found.push(p);
                    if selector == PolySelector::Min {
                        break;
                    }
                }
                p += 2;
            }
        }
        PolySelector::Max => {
            let mut p = high;
            while p >= low {
                checkpoint(cancel)?;
                if is_cyclic_polynomial(p, n, m) {
                    found.push(p);
                    break;
                }
                p -= 2;
            }
        }
    }

    if found.is_empty() {
        warn!("no generator polynomial of a ({}, {}) cyclic code satisfies the constraints", n, k);
    } else {
        debug!("found {} ({}, {}) cyclic polynomial(s)", found.len(), n, k);
    }
    Ok(found)
}

/// Parity-check and generator matrices of the length-n cyclic code generated by `poly`.
///
/// Column i of the parity matrix holds the bits of x^i mod p(x). The systematic
/// generator places the parity columns first and the identity last.
pub fn cyclic_generator_matrix(
    n: usize,
    poly: u64,
    form: GeneratorForm,
) -> GaloisResult<CyclicCode> {
    if form == GeneratorForm::NonSystematic {
        return Err(GaloisError::NotImplemented(
            "non-systematic cyclic generator matrices",
        ));
    }

    let mm = (63 - poly.leading_zeros().min(63)) as usize;
    if poly == 0 || !is_cyclic_polynomial(poly, n, mm) {
        return Err(GaloisError::NotCyclicPolynomial {
            polynomial: poly,
            n,
        });
    }
    let k = n - mm;

    let mut alpha_to = Vec::with_capacity(n);
    let mut mask = 1u64;
    for _ in 0..n {
        alpha_to.push(mask);
        mask <<= 1;
        if mask & (1 << mm) != 0 {
            mask ^= poly;
        }
    }

    let field = acquire_field(1, 0)?;
    let mut parity = GaloisMatrix::zeros(mm, n, &field);
    for (i, &a) in alpha_to.iter().enumerate() {
        for j in 0..mm {
            if a & (1 << j) != 0 {
                parity.put(j, i, 1);
            }
        }
    }

    let mut generator = GaloisMatrix::zeros(k, n, &field);
    for i in 0..k {
        for j in 0..mm {
            generator.put(i, j, parity.get(j, i + mm));
        }
        generator.put(i, i + mm, 1);
    }

    debug!("cyclic ({}, {}) code from polynomial {:#x}", n, k, poly);
    Ok(CyclicCode {
        parity,
        generator,
        k,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cyclic::NeverCancel;

    #[test]
    fn test_is_cyclic_polynomial() {
        assert!(is_cyclic_polynomial(0xb, 7, 3));
        assert!(is_cyclic_polynomial(0xd, 7, 3));
        assert!(!is_cyclic_polynomial(0xf, 7, 3));
        assert!(!is_cyclic_polynomial(0x9, 7, 3));
        assert!(!is_cyclic_polynomial(0xa, 7, 3));
        // x + 1 divides x^n + 1 for every n
        assert!(is_cyclic_polynomial(0x3, 5, 1));
    }

    #[test]
    fn test_cyclic_polynomials() {
        let all = cyclic_polynomials(15, 11, PolySelector::All, &NeverCancel).unwrap();
        assert_eq!(all, vec![19, 25, 31]);
        assert_eq!(
            cyclic_polynomials(15, 11, PolySelector::Min, &NeverCancel).unwrap(),
            vec![19]
        );
        assert_eq!(
            cyclic_polynomials(15, 11, PolySelector::Max, &NeverCancel).unwrap(),
            vec![31]
        );
        assert_eq!(
            cyclic_polynomials(15, 9, PolySelector::All, &NeverCancel).unwrap(),
            vec![79, 93, 121]
        );
        assert_eq!(
            cyclic_polynomials(15, 11, PolySelector::Weight(3), &NeverCancel).unwrap(),
            vec![19, 25]
        );
    }

    #[test]
    fn test_cyclic_polynomials_arguments() {
        assert!(cyclic_polynomials(0, 0, PolySelector::Min, &NeverCancel).is_err());
        assert!(cyclic_polynomials(7, 7, PolySelector::Min, &NeverCancel).is_err());
    }

    #[test]
    fn test_hamming_7_4_matrices() {
        let code = cyclic_generator_matrix(7, 0xb, GeneratorForm::Systematic).unwrap();
        assert_eq!(code.k, 4);
        assert_eq!(
            code.parity.to_int_grid(),
            vec![
                vec![1, 0, 0, 1, 0, 1, 1],
                vec![0, 1, 0, 1, 1, 1, 0],
                vec![0, 0, 1, 0, 1, 1, 1],
            ]
        );
        assert_eq!(
            code.generator.to_int_grid(),
            vec![
                vec![1, 1, 0, 1, 0, 0, 0],
                vec![0, 1, 1, 0, 1, 0, 0],
                vec![1, 1, 1, 0, 0, 1, 0],
                vec![1, 0, 1, 0, 0, 0, 1],
            ]
        );
        // G·Hᵀ = 0
        let product = code.generator.matmul(&code.parity.transpose()).unwrap();
        assert!(product.as_slice().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_generator_matrix_errors() {
        assert!(matches!(
            cyclic_generator_matrix(7, 0xf, GeneratorForm::Systematic),
            Err(GaloisError::NotCyclicPolynomial { polynomial: 0xf, n: 7 })
        ));
        assert!(matches!(
            cyclic_generator_matrix(7, 0xb, GeneratorForm::NonSystematic),
            Err(GaloisError::NotImplemented(_))
        ));
        assert!(cyclic_generator_matrix(7, 0, GeneratorForm::Systematic).is_err());
    }
}
