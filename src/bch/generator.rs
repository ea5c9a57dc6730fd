//! Cyclotomic cosets and narrow-sense BCH generator polynomials

use crate::codec::field_order_for_length;
use crate::error::{GaloisError, GaloisResult};
use crate::galois::{acquire_field, GaloisField};
use crate::matrix::GaloisMatrix;
use log::debug;

/// Cyclotomic cosets of 0..n under doubling mod n = 2^m - 1.
///
/// Cosets are ordered by their smallest exponent, which is listed first.
pub fn cyclotomic_cosets(field: &GaloisField) -> Vec<Vec<usize>> {
    let n = field.max_element();
    let mut seen = vec![false; n];
    let mut cosets = Vec::new();

    for e in 0..n {
        if seen[e] {
            continue;
        }
        let mut coset = vec![e];
        seen[e] = true;
        let mut r = field.modn(e << 1);
        while r != e {
            coset.push(r);
            seen[r] = true;
            r = field.modn(r << 1);
        }
        cosets.push(coset);
    }

    cosets
}

/// Root exponents of the (nn, k) BCH generator: whole cosets containing
/// 1, 2, 3, ... are taken until nn - k roots are covered
fn generator_roots(field: &GaloisField, nn: usize, k: usize) -> GaloisResult<Vec<usize>> {
    let target = nn - k;
    let cosets = cyclotomic_cosets(field);
    let mut used = vec![false; cosets.len()];
    let mut roots = Vec::with_capacity(target);
    let mut t = 0;

    while roots.len() < target {
        t += 1;
        if 2 * t - 1 > field.max_element() {
            break;
        }
        for (i, coset) in cosets.iter().enumerate() {
            if !used[i] && (coset.contains(&(2 * t - 1)) || coset.contains(&(2 * t))) {
                used[i] = true;
                roots.extend_from_slice(coset);
            }
        }
    }

    if roots.len() != target {
        return Err(GaloisError::invalid(format!(
            "no BCH generator polynomial has exactly {} roots for a ({}, {}) code",
            target, nn, k
        )));
    }
    debug!("BCH({}, {}) designed distance {}", nn, k, 2 * t + 1);
    Ok(roots)
}

/// Binary coefficients (constant term first) of the (nn, k) BCH generator over `field`
pub(crate) fn generator_bits(field: &GaloisField, nn: usize, k: usize) -> GaloisResult<Vec<u8>> {
    let roots = generator_roots(field, nn, k)?;

    // Multiply out (x + α^r) for each root
    let mut g: Vec<u16> = vec![1];
    for &r in &roots {
        let root = field.alpha(r);
        let mut next = vec![0u16; g.len() + 1];
        for (i, &c) in g.iter().enumerate() {
            next[i + 1] ^= c;
            next[i] ^= field.mul(c, root);
        }
        g = next;
    }

    // Products over whole cosets have binary coefficients
    g.iter()
        .map(|&c| match c {
            0 | 1 => Ok(c as u8),
            _ => Err(GaloisError::invalid("BCH generator coefficient outside GF(2)")),
        })
        .collect()
}

/// Generator polynomial of the (nn, k) binary BCH code as a GF(2) row vector,
/// constant term first.
///
/// `primpoly` selects the GF(2^m) used to place the roots; 0 picks the default
/// for the smallest m with nn ≤ 2^m - 1.
pub fn bch_generator_polynomial(nn: usize, k: usize, primpoly: u32) -> GaloisResult<GaloisMatrix> {
    let m = field_order_for_length(nn);
    let field = acquire_field(m, primpoly)?;
    if k == 0 || k >= nn {
        return Err(GaloisError::invalid(format!(
            "invalid codeword and message lengths n={} k={}",
            nn, k
        )));
    }
    let bits = generator_bits(&field, nn, k)?;
    let gf2 = acquire_field(1, 0)?;
    let len = bits.len();
    Ok(GaloisMatrix::from_raw(
        1,
        len,
        bits.into_iter().map(u16::from).collect(),
        &gf2,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosets_gf16() {
        let field = acquire_field(4, 0).unwrap();
        assert_eq!(
            cyclotomic_cosets(&field),
            vec![
                vec![0],
                vec![1, 2, 4, 8],
                vec![3, 6, 12, 9],
                vec![5, 10],
                vec![7, 14, 13, 11],
            ]
        );
    }

    #[test]
    fn test_known_generators() {
        assert_eq!(
            bch_generator_polynomial(7, 4, 0).unwrap().as_slice(),
            &[1, 1, 0, 1]
        );
        assert_eq!(
            bch_generator_polynomial(15, 7, 0).unwrap().as_slice(),
            &[1, 0, 0, 0, 1, 0, 1, 1, 1]
        );
        assert_eq!(bch_generator_polynomial(15, 7, 0).unwrap().order(), 1);
    }

    #[test]
    fn test_impossible_parameters() {
        assert!(bch_generator_polynomial(15, 8, 0).is_err());
        assert!(bch_generator_polynomial(15, 15, 0).is_err());
        assert!(bch_generator_polynomial(7, 0, 0).is_err());
    }
}
