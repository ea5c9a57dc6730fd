//! Reed-Solomon generator polynomials
//!
//! Polynomials are stored leading coefficient first, so a generator with
//! `nroots` roots has `nroots + 1` coefficients and `g[0] == 1`.

use crate::error::{GaloisError, GaloisResult};
use crate::galois::{FieldHandle, GaloisField};
use crate::matrix::GaloisMatrix;
use log::debug;

pub(crate) fn gcd(a: usize, b: usize) -> usize {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

/// The prim-th root of unity exponent: the smallest iprim with iprim * prim ≡ 1 (mod n).
///
/// `prim` must be coprime to n.
pub(crate) fn inverse_prim(prim: usize, n: usize) -> usize {
    let mut iprim = 1;
    while iprim % prim != 0 {
        iprim += n;
    }
    iprim / prim
}

/// Coefficients of ∏ (x + α^((fcr + i)·prim)) for i in 0..nroots
pub(crate) fn generator_coefficients(
    field: &GaloisField,
    nroots: usize,
    fcr: usize,
    prim: usize,
) -> Vec<u16> {
    let mut g = vec![0u16; nroots + 1];
    g[nroots] = 1;
    let mut root = fcr * prim;

    for i in 0..nroots {
        g[nroots - i - 1] = 1;
        for j in (1..=i).rev() {
            let k = nroots - j;
            g[k] = if g[k] != 0 {
                g[k + 1] ^ field.alpha(field.modn(field.log(g[k]) + root))
            } else {
                g[k + 1]
            };
        }
        g[nroots] = field.alpha(field.modn(field.log(g[nroots]) + root));
        root += prim;
    }

    g
}

/// Generator polynomial of a code with `nroots` parity symbols, as a row vector.
///
/// Its roots are α^(fcr·prim), α^((fcr+1)·prim), … The leading coefficient comes first.
pub fn rs_generator_polynomial(
    field: &FieldHandle,
    nroots: usize,
    fcr: usize,
    prim: usize,
) -> GaloisResult<GaloisMatrix> {
    let n = field.max_element();
    if nroots == 0 || nroots > n {
        return Err(GaloisError::invalid(format!(
            "number of roots must be between 1 and {}, got {}",
            n, nroots
        )));
    }
    if prim == 0 {
        return Err(GaloisError::invalid("primitive element exponent must be positive"));
    }

    let g = generator_coefficients(field, nroots, fcr, prim);
    Ok(GaloisMatrix::from_raw(1, nroots + 1, g, field))
}

/// Evaluate a leading-first polynomial at x (Horner's rule in the log domain)
pub(crate) fn evaluate(field: &GaloisField, poly: &[u16], x: u16) -> u16 {
    let Some((&first, rest)) = poly.split_first() else {
        return 0;
    };
    let x_log = field.log(x);
    rest.iter().fold(first, |acc, &c| {
        if acc == 0 || x == 0 {
            c
        } else {
            c ^ field.alpha(field.modn(field.log(acc) + x_log))
        }
    })
}

/// Recover (fcr, prim) from the roots of a generator polynomial.
///
/// Every field element is tried as a root. Generators with repeated roots or
/// with roots that are not consecutive powers of some primitive element are
/// rejected. The smallest matching (fcr, prim) pair wins.
pub(crate) fn derive_roots(field: &GaloisField, generator: &[u16]) -> GaloisResult<(usize, usize)> {
    let n = field.max_element();
    let nroots = generator.len().saturating_sub(1);

    let roots: Vec<usize> = (0..=n)
        .filter(|&x| evaluate(field, generator, x as u16) == 0)
        .map(|x| field.log(x as u16))
        .collect();
    if roots.len() != nroots {
        return Err(GaloisError::invalid(
            "generator polynomial can not have repeated roots",
        ));
    }

    let mut best: Option<(usize, usize)> = None;
    for prim in (1..=n).filter(|&p| gcd(p, n) == 1) {
        let iprim = inverse_prim(prim, n);
        for &r in &roots {
            let fcr = match (r * iprim) % n {
                0 => n,
                f => f,
            };
            let matches = (0..nroots).all(|i| roots.contains(&field.modn((fcr + i) * prim)));
            if matches && best.map_or(true, |b| (fcr, prim) < b) {
                best = Some((fcr, prim));
            }
        }
    }

    match best {
        Some((fcr, prim)) => {
            debug!("generator polynomial roots give fcr={} prim={}", fcr, prim);
            Ok((fcr, prim))
        }
        None => Err(GaloisError::invalid(
            "generator polynomial roots are not consecutive powers of a primitive element",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::galois::acquire_field;

    #[test]
    fn test_rs_7_3_generator() {
        let field = acquire_field(3, 0).unwrap();
        let g = rs_generator_polynomial(&field, 4, 1, 1).unwrap();
        assert_eq!(g.shape(), (1, 5));
        assert_eq!(g.as_slice(), &[1, 3, 1, 2, 3]);
    }

    #[test]
    fn test_generator_roots() {
        let field = acquire_field(4, 0).unwrap();
        for (fcr, prim) in [(1, 1), (2, 3), (0, 2)] {
            let g = rs_generator_polynomial(&field, 6, fcr, prim).unwrap();
            for i in 0..6 {
                let root = field.alpha(field.modn((fcr + i) * prim));
                assert_eq!(evaluate(&field, g.as_slice(), root), 0);
            }
        }
    }

    #[test]
    fn test_derive_roots() {
        let field = acquire_field(3, 0).unwrap();
        for (fcr, prim) in [(1, 1), (2, 3)] {
            let g = generator_coefficients(&field, 4, fcr, prim);
            assert_eq!(derive_roots(&field, &g).unwrap(), (fcr, prim));
        }
        let g = generator_coefficients(&field, 2, 3, 1);
        assert_eq!(derive_roots(&field, &g).unwrap(), (3, 1));
    }

    #[test]
    fn test_derive_roots_rejects_repeated_root() {
        let field = acquire_field(3, 0).unwrap();
        // (x + 1)^2 = x^2 + 1
        assert!(derive_roots(&field, &[1, 0, 1]).is_err());
    }

    #[test]
    fn test_inverse_prim() {
        assert_eq!(inverse_prim(1, 7), 1);
        assert_eq!((inverse_prim(3, 7) * 3) % 7, 1);
        assert_eq!((inverse_prim(2, 15) * 2) % 15, 1);
    }

    #[test]
    fn test_generator_validation() {
        let field = acquire_field(3, 0).unwrap();
        assert!(rs_generator_polynomial(&field, 0, 1, 1).is_err());
        assert!(rs_generator_polynomial(&field, 8, 1, 1).is_err());
        assert!(rs_generator_polynomial(&field, 2, 1, 0).is_err());
    }
}
