//! Binary BCH decoding: syndromes, Berlekamp-Massey over GF(2^m), Chien search
//!
//! The error locator table mixes representations the same way the shift
//! register decoder does: a row is in polynomial form while it is being built
//! and converted to index form once the next row has been derived from it.

use super::code::{require_binary, BchCode};
use crate::codec::{DecodeResult, ParityPosition, RowOutcome};
use crate::config::CodecConfig;
use crate::error::{GaloisError, GaloisResult};
use crate::galois::GaloisField;
use crate::matrix::GaloisMatrix;
use log::{debug, trace};

/// Syndromes S_1..S_2t in index form; `None` when every syndrome is zero
fn syndromes(field: &GaloisField, code: &[u16], t2: usize, at_end: bool) -> Option<Vec<usize>> {
    let nn = code.len();
    let mut s = vec![0usize; t2 + 1];
    let mut any = false;

    for (i, slot) in s.iter_mut().enumerate().skip(1) {
        let mut acc = 0u16;
        for j in 0..nn {
            let bit = if at_end { code[nn - j - 1] } else { code[j] };
            if bit != 0 {
                acc ^= field.alpha(field.modn(i * j));
            }
        }
        any |= acc != 0;
        *slot = field.log(acc);
    }

    any.then_some(s)
}

/// Berlekamp-Massey error locator for up to t errors.
///
/// Returns the locator coefficients σ_1..σ_L in index form, or None when the
/// degree exceeds t.
fn error_locator(field: &GaloisField, s: &[usize], t: usize) -> Option<Vec<usize>> {
    let n = field.max_element();
    let t2 = 2 * t;
    let rows = t2 + 2;
    let width = 2 * t2 + 2;

    let mut d = vec![0usize; rows];
    let mut l = vec![0usize; rows];
    let mut u_lu = vec![0isize; rows];
    let mut elp = vec![vec![0usize; width]; rows];

    d[1] = s[1];
    elp[1][0] = 1;
    elp[0][1..].fill(n);
    u_lu[0] = -1;

    let mut u = 0;
    loop {
        u += 1;
        if d[u] == n {
            l[u + 1] = l[u];
            for i in 0..=l[u] {
                elp[u + 1][i] = elp[u][i];
                elp[u][i] = field.log(elp[u][i] as u16);
            }
        } else {
            // Earlier row with nonzero discrepancy and the largest u - l(u)
            let mut q = u - 1;
            while d[q] == n && q > 0 {
                q -= 1;
            }
            if q > 0 {
                let mut j = q;
                while j > 0 {
                    j -= 1;
                    if d[j] != n && u_lu[q] < u_lu[j] {
                        q = j;
                    }
                }
            }

            l[u + 1] = l[u].max(l[q] + u - q);
            elp[u + 1].iter_mut().for_each(|c| *c = 0);
            for i in 0..=l[q] {
                if elp[q][i] != n {
                    elp[u + 1][i + u - q] =
                        field.alpha(field.modn(d[u] + n - d[q] + elp[q][i])) as usize;
                }
            }
            for i in 0..=l[u] {
                elp[u + 1][i] ^= elp[u][i];
                elp[u][i] = field.log(elp[u][i] as u16);
            }
        }
        u_lu[u + 1] = u as isize - l[u + 1] as isize;

        if u < t2 {
            let mut next = if s[u + 1] != n { field.alpha(s[u + 1]) } else { 0 };
            for i in 1..=l[u + 1] {
                if s[u + 1 - i] != n && elp[u + 1][i] != 0 {
                    next ^= field.alpha(field.modn(s[u + 1 - i] + field.log(elp[u + 1][i] as u16)));
                }
            }
            d[u + 1] = field.log(next);
        }

        if !(u < t2 && l[u + 1] <= t) {
            break;
        }
    }
    u += 1;

    if l[u] > t {
        trace!("error locator degree {} exceeds {}", l[u], t);
        return None;
    }
    Some(
        (1..=l[u])
            .map(|i| field.log(elp[u][i] as u16))
            .collect(),
    )
}

/// Chien search: bit positions (polynomial exponents) where the locator vanishes
fn chien_search(field: &GaloisField, sigma: &[usize]) -> Vec<usize> {
    let n = field.max_element();
    let mut reg = sigma.to_vec();
    let mut locations = Vec::with_capacity(sigma.len());

    for i in 1..=n {
        let mut q = 1u16;
        for (j, r) in reg.iter_mut().enumerate() {
            if *r != n {
                *r = field.modn(*r + j + 1);
                q ^= field.alpha(*r);
            }
        }
        if q == 0 {
            locations.push(n - i);
            if locations.len() > sigma.len() {
                break;
            }
        }
    }

    locations
}

impl BchCode {
    fn decode_row_with(&self, code: &[u16], t: usize) -> RowOutcome {
        let field = &self.field;
        let nn = code.len();
        let at_end = self.parity.at_end();

        let Some(s) = syndromes(field, code, 2 * t, at_end) else {
            return (0, code.to_vec());
        };
        let Some(sigma) = error_locator(field, &s, t) else {
            return (-1, code.to_vec());
        };

        let locations = chien_search(field, &sigma);
        if locations.len() != sigma.len() {
            trace!(
                "Chien search found {} roots for degree {}",
                locations.len(),
                sigma.len()
            );
            return (-1, code.to_vec());
        }
        if locations.iter().any(|&loc| loc >= nn) {
            trace!("error located inside the shortened-code padding");
            return (-1, code.to_vec());
        }

        let mut corrected = code.to_vec();
        for loc in locations {
            let pos = if at_end { nn - loc - 1 } else { loc };
            corrected[pos] ^= 1;
        }
        (sigma.len() as i32, corrected)
    }

    fn check_capability(&self, t: usize) -> GaloisResult<()> {
        if t == 0 || 2 * t > self.n - self.k {
            return Err(GaloisError::invalid(format!(
                "error correction capability {} out of range for a ({}, {}) code",
                t, self.n, self.k
            )));
        }
        let designed = self.designed_capability()?;
        if t > designed {
            return Err(GaloisError::invalid(format!(
                "the ({}, {}) generator guarantees {} correctable bit error(s), asked for {}",
                self.n, self.k, designed, t
            )));
        }
        Ok(())
    }

    /// Decode one n-bit codeword correcting up to t bit errors
    pub fn decode_row(&self, code: &[u16], t: usize) -> GaloisResult<RowOutcome> {
        self.check_capability(t)?;
        if code.len() != self.n {
            return Err(GaloisError::dimensions(
                "bch_decode",
                (1, code.len()),
                (1, self.n),
            ));
        }
        Ok(self.decode_row_with(code, t))
    }

    pub(crate) fn message_of<'a>(&self, codeword: &'a [u16]) -> &'a [u16] {
        match self.parity {
            ParityPosition::End => &codeword[..self.k],
            ParityPosition::Beginning => &codeword[self.n - self.k..],
        }
    }

    /// Decode every row of a rows x n GF(2) codeword matrix
    pub fn decode(&self, code: &GaloisMatrix, t: usize) -> GaloisResult<DecodeResult> {
        self.decode_with_config(code, t, &CodecConfig::default())
    }

    pub fn decode_with_config(
        &self,
        code: &GaloisMatrix,
        t: usize,
        config: &CodecConfig,
    ) -> GaloisResult<DecodeResult> {
        require_binary(code, "bch_decode")?;
        self.check_capability(t)?;
        if code.cols() != self.n {
            return Err(GaloisError::dimensions(
                "bch_decode",
                code.shape(),
                (code.rows(), self.n),
            ));
        }

        let rows: Vec<&[u16]> = (0..code.rows()).map(|r| code.row(r)).collect();
        let outcomes = config.map_blocks(&rows, |row| self.decode_row_with(row, t));

        let mut error_counts = Vec::with_capacity(outcomes.len());
        let mut corrected = Vec::with_capacity(code.len());
        let mut message = Vec::with_capacity(code.rows() * self.k);
        for (row, (count, word)) in outcomes.into_iter().enumerate() {
            match count {
                -1 => debug!("BCH({}, {}) row {} uncorrectable", self.n, self.k, row),
                0 => {}
                c => trace!("BCH({}, {}) row {} corrected {} bit(s)", self.n, self.k, row, c),
            }
            message.extend_from_slice(self.message_of(&word));
            corrected.extend(word);
            error_counts.push(count);
        }

        let rows = code.rows();
        Ok(DecodeResult {
            message: GaloisMatrix::from_raw(rows, self.k, message, &self.gf2),
            error_counts,
            corrected: GaloisMatrix::from_raw(rows, self.n, corrected, &self.gf2),
        })
    }
}
