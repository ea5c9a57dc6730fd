//! Primitive polynomial search

use crate::error::{GaloisError, GaloisResult};
use log::debug;

/// Largest degree accepted by the primitive polynomial search
pub const MAX_SEARCH_DEGREE: u32 = 22;

/// Which candidates a polynomial search returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolySelector {
    /// Smallest matching polynomial
    Min,
    /// Largest matching polynomial
    Max,
    /// Every matching polynomial, ascending
    All,
    /// Every matching polynomial with exactly this many nonzero coefficients
    Weight(u32),
}

/// Degree of a GF(2) polynomial bitmask (0 for constants)
pub(crate) fn degree(poly: u64) -> u32 {
    63u32.saturating_sub(poly.leading_zeros())
}

/// Whether `poly` (degree taken from its top bit) is primitive over GF(2)
pub fn is_primitive(poly: u32) -> bool {
    let m = degree(poly as u64);
    if m == 0 || m > MAX_SEARCH_DEGREE || poly & 1 == 0 {
        return false;
    }
    lfsr_covers_field(poly as usize, m)
}

fn lfsr_covers_field(poly: usize, m: u32) -> bool {
    let n = (1usize << m) - 1;
    let mut seen = vec![false; n + 1];
    let mut mask = 1usize;

    for _ in 0..n {
        seen[mask] = true;
        mask <<= 1;
        if mask & (1 << m) != 0 {
            mask ^= poly;
        }
    }

    mask == 1 && seen[1..].iter().all(|&s| s)
}

/// Primitive polynomials of degree m, filtered by `selector`
pub fn primitive_polynomials(m: u32, selector: PolySelector) -> GaloisResult<Vec<u32>> {
    if !(1..=MAX_SEARCH_DEGREE).contains(&m) {
        return Err(GaloisError::invalid(format!(
            "primitive polynomial degree must be between 1 and {}, got {}",
            MAX_SEARCH_DEGREE, m
        )));
    }

    let low = (1u32 << m) + 1;
    let high = (1u32 << (m + 1)) - 1;
    let candidates = (low..=high).step_by(2);

    let found: Vec<u32> = match selector {
        PolySelector::Min => candidates
            .into_iter()
            .find(|&p| is_primitive(p))
            .into_iter()
            .collect(),
        PolySelector::Max => (low..=high)
            .rev()
            .step_by(2)
            .find(|&p| is_primitive(p))
            .into_iter()
            .collect(),
        PolySelector::All => candidates.filter(|&p| is_primitive(p)).collect(),
        PolySelector::Weight(w) => candidates
            .filter(|&p| p.count_ones() == w && is_primitive(p))
            .collect(),
    };

    debug!(
        "found {} primitive polynomial(s) of degree {}",
        found.len(),
        m
    );
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::galois::DEFAULT_PRIMITIVE_POLYNOMIALS;

    #[test]
    fn test_defaults_are_primitive() {
        for m in 1..=16 {
            assert!(is_primitive(DEFAULT_PRIMITIVE_POLYNOMIALS[m]), "m={}", m);
        }
    }

    #[test]
    fn test_non_primitive() {
        assert!(!is_primitive(0x1f)); // order 5
        assert!(!is_primitive(0x15)); // reducible
        assert!(!is_primitive(0x12)); // even
        assert!(!is_primitive(0x1));
    }

    #[test]
    fn test_degree_four_search() {
        assert_eq!(
            primitive_polynomials(4, PolySelector::All).unwrap(),
            vec![0x13, 0x19]
        );
        assert_eq!(primitive_polynomials(4, PolySelector::Min).unwrap(), vec![0x13]);
        assert_eq!(primitive_polynomials(4, PolySelector::Max).unwrap(), vec![0x19]);
        assert!(primitive_polynomials(4, PolySelector::Weight(5))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_degree_eight_count() {
        let all = primitive_polynomials(8, PolySelector::All).unwrap();
        assert_eq!(all.len(), 16);
        assert!(all.contains(&0x11d));
    }

    #[test]
    fn test_degree_bounds() {
        assert!(primitive_polynomials(0, PolySelector::All).is_err());
        assert!(primitive_polynomials(23, PolySelector::All).is_err());
    }
}
