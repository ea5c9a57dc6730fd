//! Minimum distance and syndrome decoding tables for binary linear codes

use super::cancel::{checkpoint, CancelCheck};
use crate::error::{GaloisError, GaloisResult};
use crate::galois::acquire_field;
use crate::matrix::GaloisMatrix;
use log::{debug, warn};

/// Row counts above this make the minimum distance search impractically slow
pub const LARGE_SEARCH_ROWS: usize = 128;

/// Largest parity-check row count accepted by [`syndrome_table`]
pub const MAX_SYNDROME_BITS: usize = 24;

fn binary_rows(matrix: &GaloisMatrix, what: &str) -> GaloisResult<Vec<Vec<u8>>> {
    if matrix.order() != 1 {
        return Err(GaloisError::invalid(format!(
            "{} must be a GF(2) matrix, got GF(2^{})",
            what,
            matrix.order()
        )));
    }
    Ok((0..matrix.rows())
        .map(|r| matrix.row(r).iter().map(|&v| v as u8).collect())
        .collect())
}

/// Minimum Hamming distance of the code spanned by the rows of a k x n GF(2) generator.
///
/// Branch-and-bound over combinations of generator rows: a combination is only
/// extended while its depth stays below the best weight found so far. The
/// starting bound is the Singleton bound n - k + 1.
pub fn minimum_distance(generator: &GaloisMatrix, cancel: &dyn CancelCheck) -> GaloisResult<usize> {
    let rows = binary_rows(generator, "generator matrix")?;
    let (k, n) = generator.shape();
    if k == 0 || n == 0 {
        return Err(GaloisError::invalid("generator matrix must not be empty"));
    }
    if k > n {
        return Err(GaloisError::invalid(format!(
            "generator matrix has more rows ({}) than columns ({})",
            k, n
        )));
    }
    if k > LARGE_SEARCH_ROWS {
        warn!(
            "minimum distance search over {} generator rows is likely to take a very long time",
            k
        );
    }

    let mut codeword = vec![0u8; n];
    let distance = weight_search(&rows, &mut codeword, n - k + 1, 1, 0, cancel)?;
    debug!("minimum distance of ({}, {}) code is {}", n, k, distance);
    Ok(distance)
}

fn weight_search(
    rows: &[Vec<u8>],
    codeword: &mut [u8],
    mut best: usize,
    depth: usize,
    start: usize,
    cancel: &dyn CancelCheck,
) -> GaloisResult<usize> {
    for i in start..rows.len() {
        checkpoint(cancel)?;

        let mut weight = 0;
        for (c, &g) in codeword.iter_mut().zip(&rows[i]) {
            *c ^= g;
            weight += *c as usize;
        }
        best = best.min(weight);
        if depth < best {
            best = weight_search(rows, codeword, best, depth + 1, i + 1, cancel)?;
        }

        for (c, &g) in codeword.iter_mut().zip(&rows[i]) {
            *c ^= g;
        }
    }
    Ok(best)
}

/// Syndrome decoding table for an m x n GF(2) parity-check matrix.
///
/// Row s of the 2^m x n result is the lowest-weight error pattern whose syndrome
/// is s, reading row 0 of `h` as the most significant syndrome bit. Patterns are
/// enumerated by increasing weight; ties go to the pattern with the lowest
/// positions. Syndromes unreachable from any pattern keep an all-zero row.
pub fn syndrome_table(h: &GaloisMatrix, cancel: &dyn CancelCheck) -> GaloisResult<GaloisMatrix> {
    let rows = binary_rows(h, "parity check matrix")?;
    let (m, n) = h.shape();
    if m == 0 || n == 0 {
        return Err(GaloisError::invalid("parity check matrix must not be empty"));
    }
    if m > MAX_SYNDROME_BITS {
        return Err(GaloisError::invalid(format!(
            "codeword minus message length must be at most {}, got {}",
            MAX_SYNDROME_BITS, m
        )));
    }

    // Per-column syndrome contribution
    let column_syndromes: Vec<usize> = (0..n)
        .map(|k| {
            (0..m).fold(0usize, |s, i| {
                if rows[i][k] != 0 {
                    s | 1 << (m - i - 1)
                } else {
                    s
                }
            })
        })
        .collect();

    let nrows = 1usize << m;
    let mut table = GaloisMatrix::zeros(nrows, n, &acquire_field(1, 0)?);
    let mut filled = vec![false; nrows];
    filled[0] = true;
    let mut remaining = nrows - 1;

    let mut nerrs = 1;
    while remaining > 0 && nerrs <= n {
        let mut positions: Vec<usize> = (0..nerrs).collect();
        loop {
            checkpoint(cancel)?;
            let syndrome = positions
                .iter()
                .fold(0, |s, &p| s ^ column_syndromes[p]);
            if !filled[syndrome] {
                filled[syndrome] = true;
                remaining -= 1;
                for &p in &positions {
                    table.put(syndrome, p, 1);
                }
                if remaining == 0 {
                    break;
                }
            }
            if !next_combination(&mut positions, n) {
                break;
            }
        }
        nerrs += 1;
    }

    if remaining > 0 {
        warn!(
            "{} syndromes are unreachable; the parity check matrix is rank deficient",
            remaining
        );
    }
    Ok(table)
}

/// Advance to the next k-subset of 0..n in lexicographic order
fn next_combination(positions: &mut [usize], n: usize) -> bool {
    let k = positions.len();
    let Some(i) = (0..k).rev().find(|&i| positions[i] < n - k + i) else {
        return false;
    };
    positions[i] += 1;
    for j in (i + 1)..k {
        positions[j] = positions[j - 1] + 1;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cyclic::{cyclic_generator_matrix, GeneratorForm, NeverCancel};
    use std::sync::atomic::AtomicBool;

    #[test]
    fn test_minimum_distances() {
        for (n, poly, expected) in [(7, 0xb, 3), (15, 19, 3), (15, 465, 5), (23, 3189, 7)] {
            let code = cyclic_generator_matrix(n, poly, GeneratorForm::Systematic).unwrap();
            assert_eq!(
                minimum_distance(&code.generator, &NeverCancel).unwrap(),
                expected,
                "n={} poly={}",
                n,
                poly
            );
        }
    }

    #[test]
    fn test_minimum_distance_cancelled() {
        let code = cyclic_generator_matrix(23, 3189, GeneratorForm::Systematic).unwrap();
        let cancel = AtomicBool::new(true);
        assert_eq!(
            minimum_distance(&code.generator, &cancel),
            Err(GaloisError::Cancelled)
        );
    }

    #[test]
    fn test_minimum_distance_rejects_non_binary() {
        let field = acquire_field(3, 0).unwrap();
        let g = GaloisMatrix::identity(2, &field);
        assert!(minimum_distance(&g, &NeverCancel).is_err());
    }

    #[test]
    fn test_hamming_syndrome_table() {
        let code = cyclic_generator_matrix(7, 0xb, GeneratorForm::Systematic).unwrap();
        let table = syndrome_table(&code.parity, &NeverCancel).unwrap();
        assert_eq!(table.shape(), (8, 7));
        assert!(table.row(0).iter().all(|&v| v == 0));

        // Every single-bit error has its own syndrome
        for k in 0..7 {
            let syndrome = (0..3).fold(0usize, |s, i| (s << 1) | code.parity.get(i, k) as usize);
            let mut expected = vec![0u16; 7];
            expected[k] = 1;
            assert_eq!(table.row(syndrome), expected.as_slice());
        }
    }

    #[test]
    fn test_syndrome_table_weight_two() {
        let h = GaloisMatrix::binary(&[vec![1, 1, 0, 0], vec![0, 0, 1, 1]]).unwrap();
        let table = syndrome_table(&h, &NeverCancel).unwrap();
        // Syndrome 0b11 needs one error in each half; lowest positions win
        assert_eq!(table.row(3), &[1, 0, 1, 0]);
        assert_eq!(table.row(2), &[1, 0, 0, 0]);
        assert_eq!(table.row(1), &[0, 0, 1, 0]);
    }

    #[test]
    fn test_next_combination() {
        let mut p = vec![0, 1];
        let mut seen = vec![p.clone()];
        while next_combination(&mut p, 4) {
            seen.push(p.clone());
        }
        assert_eq!(
            seen,
            vec![
                vec![0, 1],
                vec![0, 2],
                vec![0, 3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3]
            ]
        );
    }
}
