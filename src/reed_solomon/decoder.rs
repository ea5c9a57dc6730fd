//! Reed-Solomon decoding: syndromes, Berlekamp-Massey, Chien search, Forney
//!
//! All polynomial state is kept in index (log) form where that saves table
//! lookups; `nn` (the log of zero) marks a zero coefficient.

use super::code::RsCode;
use crate::codec::{DecodeResult, ParityPosition, RowOutcome};
use crate::config::CodecConfig;
use crate::error::{GaloisError, GaloisResult};
use crate::galois::GaloisField;
use crate::matrix::GaloisMatrix;
use log::{debug, trace};
use smallvec::{smallvec, SmallVec};

/// Scratch buffers sized for codes with up to 32 parity symbols without allocating
type Scratch<T> = SmallVec<[T; 33]>;

/// Located error positions (within the nn-symbol block) and their values
type Corrections = Scratch<(usize, u16)>;

/// Decoding constants resolved once per block of rows
struct RootParams {
    fcr: usize,
    prim: usize,
    iprim: usize,
}

/// Locate and evaluate the errors in a full-length (nn-symbol) block.
///
/// `msb_first` gives the order in which `data` holds polynomial coefficients.
/// Returns the number of roots of the error locator with their corrections, or
/// None when the block is uncorrectable.
fn locate_errors(
    field: &GaloisField,
    data: &[u16],
    nroots: usize,
    roots: &RootParams,
    msb_first: bool,
) -> Option<(usize, Corrections)> {
    let nn = field.max_element();
    let a0 = nn;
    let &RootParams { fcr, prim, iprim } = roots;

    // Syndromes: received polynomial evaluated at consecutive roots
    let mut syndromes: Scratch<usize> = smallvec![0; nroots];
    let mut has_errors = false;
    for (i, s) in syndromes.iter_mut().enumerate() {
        let r = field.modn((fcr + i) * prim);
        let horner = |acc: u16, d: u16| {
            if acc == 0 {
                d
            } else {
                d ^ field.alpha(field.modn(field.log(acc) + r))
            }
        };
        let value = if msb_first {
            data.iter().fold(0, |acc, &d| horner(acc, d))
        } else {
            data.iter().rev().fold(0, |acc, &d| horner(acc, d))
        };
        has_errors |= value != 0;
        *s = field.log(value);
    }
    if !has_errors {
        return Some((0, Corrections::new()));
    }

    // Berlekamp-Massey: lambda in polynomial form, b in index form
    let mut lambda: Scratch<u16> = smallvec![0; nroots + 1];
    lambda[0] = 1;
    let mut b: Scratch<usize> = smallvec![a0; nroots + 1];
    b[0] = 0;
    let mut el = 0;

    for r in 1..=nroots {
        let mut discr = 0u16;
        for i in 0..r {
            if lambda[i] != 0 && syndromes[r - i - 1] != a0 {
                discr ^= field.alpha(field.modn(field.log(lambda[i]) + syndromes[r - i - 1]));
            }
        }
        let discr = field.log(discr);

        if discr == a0 {
            b.rotate_right(1);
            b[0] = a0;
            continue;
        }

        let mut t: Scratch<u16> = smallvec![0; nroots + 1];
        t[0] = lambda[0];
        for i in 0..nroots {
            t[i + 1] = if b[i] != a0 {
                lambda[i + 1] ^ field.alpha(field.modn(discr + b[i]))
            } else {
                lambda[i + 1]
            };
        }

        if 2 * el < r {
            el = r - el;
            for (bi, &l) in b.iter_mut().zip(lambda.iter()) {
                *bi = if l == 0 {
                    a0
                } else {
                    field.modn(field.log(l) + nn - discr)
                };
            }
        } else {
            b.rotate_right(1);
            b[0] = a0;
        }
        lambda = t;
    }

    let lambda_log: Scratch<usize> = lambda.iter().map(|&l| field.log(l)).collect();
    let deg = lambda_log
        .iter()
        .rposition(|&l| l != a0)
        .unwrap_or(0);

    // Chien search over every nonzero element
    let mut reg = lambda_log.clone();
    let mut root_exps: Scratch<usize> = SmallVec::new();
    let mut locations: Scratch<usize> = SmallVec::new();
    let mut k = iprim - 1;
    for i in 1..=nn {
        let mut q = 1u16;
        for j in (1..=deg).rev() {
            if reg[j] != a0 {
                reg[j] = field.modn(reg[j] + j);
                q ^= field.alpha(reg[j]);
            }
        }
        if q == 0 {
            root_exps.push(i);
            locations.push(k);
            if root_exps.len() == deg {
                break;
            }
        }
        k = field.modn(k + iprim);
    }
    if root_exps.len() != deg {
        trace!("Chien search found {} roots for degree {}", root_exps.len(), deg);
        return None;
    }

    // Error evaluator omega = s·lambda mod x^nroots, index form
    let mut omega: Scratch<usize> = smallvec![a0; nroots + 1];
    let mut deg_omega = 0;
    for i in 0..nroots {
        let mut tmp = 0u16;
        for j in (0..=deg.min(i)).rev() {
            if syndromes[i - j] != a0 && lambda_log[j] != a0 {
                tmp ^= field.alpha(field.modn(syndromes[i - j] + lambda_log[j]));
            }
        }
        if tmp != 0 {
            deg_omega = i;
        }
        omega[i] = field.log(tmp);
    }

    // Forney: error value = omega(1/X) · X^(1-fcr) / lambda'(1/X)
    let mut corrections = Corrections::new();
    for (&root, &loc) in root_exps.iter().zip(locations.iter()) {
        let mut num1 = 0u16;
        for i in (0..=deg_omega).rev() {
            if omega[i] != a0 {
                num1 ^= field.alpha(field.modn(omega[i] + i * root));
            }
        }
        let num2 = field.alpha(field.modn(root * (fcr - 1) + nn));

        // Formal derivative: only odd-power terms of lambda survive
        let mut den = 0u16;
        let top = deg.min(nroots - 1) & !1;
        for i in (0..=top).rev().step_by(2) {
            if lambda_log[i + 1] != a0 {
                den ^= field.alpha(field.modn(lambda_log[i + 1] + i * root));
            }
        }
        if den == 0 {
            trace!("zero denominator in Forney evaluation");
            return None;
        }

        if num1 != 0 {
            let pos = if msb_first { loc } else { nn - loc - 1 };
            let value = field.alpha(field.modn(
                field.log(num1) + field.log(num2) + nn - field.log(den),
            ));
            corrections.push((pos, value));
        }
    }

    Some((root_exps.len(), corrections))
}

impl RsCode {
    fn resolve_roots(&self) -> GaloisResult<RootParams> {
        let (fcr, prim, iprim) = self.decoder_roots()?;
        Ok(RootParams { fcr, prim, iprim })
    }

    fn decode_row_with(&self, code: &[u16], roots: &RootParams) -> RowOutcome {
        let nroots = self.nroots();
        if nroots == 0 {
            return (0, code.to_vec());
        }

        let nn = self.field.max_element();
        let pad = nn - self.n;
        let at_end = self.parity.at_end();

        // Shortened codes decode as full-length codes with virtual leading zeros
        let mut data = Vec::with_capacity(nn);
        if at_end {
            data.resize(pad, 0);
            data.extend_from_slice(code);
        } else {
            data.extend_from_slice(code);
            data.resize(nn, 0);
        }

        let Some((count, corrections)) =
            locate_errors(&self.field, &data, nroots, roots, at_end)
        else {
            return (-1, code.to_vec());
        };

        let in_padding = |pos: usize| if at_end { pos < pad } else { pos >= self.n };
        if corrections.iter().any(|&(pos, _)| in_padding(pos)) {
            trace!("error located inside the shortened-code padding");
            return (-1, code.to_vec());
        }
        for &(pos, value) in &corrections {
            data[pos] ^= value;
        }

        let corrected = if at_end {
            data.split_off(pad)
        } else {
            data.truncate(self.n);
            data
        };
        (count as i32, corrected)
    }

    /// Decode one received codeword of n symbols.
    ///
    /// Returns the number of corrected symbols (-1 when uncorrectable) and the
    /// corrected codeword; an uncorrectable codeword is returned unchanged.
    pub fn decode_row(&self, code: &[u16]) -> GaloisResult<RowOutcome> {
        if code.len() != self.n {
            return Err(GaloisError::dimensions(
                "rs_decode",
                (1, code.len()),
                (1, self.n),
            ));
        }
        let roots = self.resolve_roots()?;
        Ok(self.decode_row_with(code, &roots))
    }

    /// Message symbols of a (corrected) codeword
    pub(crate) fn message_of<'a>(&self, codeword: &'a [u16]) -> &'a [u16] {
        match self.parity {
            ParityPosition::End => &codeword[..self.k],
            ParityPosition::Beginning => &codeword[self.nroots()..self.nroots() + self.k],
        }
    }

    /// Decode every row of a rows x n code matrix with the default configuration
    pub fn decode(&self, code: &GaloisMatrix) -> GaloisResult<DecodeResult> {
        self.decode_with_config(code, &CodecConfig::default())
    }

    /// Decode every row of a rows x n code matrix; rows are independent blocks
    pub fn decode_with_config(
        &self,
        code: &GaloisMatrix,
        config: &CodecConfig,
    ) -> GaloisResult<DecodeResult> {
        if !code.field().same_field(&self.field) {
            return Err(GaloisError::FieldMismatch {
                lhs_m: code.order(),
                lhs_poly: code.polynomial(),
                rhs_m: self.field.order(),
                rhs_poly: self.field.polynomial(),
            });
        }
        if code.cols() != self.n {
            return Err(GaloisError::dimensions(
                "rs_decode",
                code.shape(),
                (code.rows(), self.n),
            ));
        }

        let roots = self.resolve_roots()?;
        let rows: Vec<&[u16]> = (0..code.rows()).map(|r| code.row(r)).collect();
        let outcomes = config.map_blocks(&rows, |row| self.decode_row_with(row, &roots));

        let mut error_counts = Vec::with_capacity(outcomes.len());
        let mut corrected = Vec::with_capacity(code.len());
        let mut message = Vec::with_capacity(code.rows() * self.k);
        for (row, (count, word)) in outcomes.into_iter().enumerate() {
            match count {
                -1 => debug!("RS({}, {}) row {} uncorrectable", self.n, self.k, row),
                0 => {}
                c => trace!("RS({}, {}) row {} corrected {} symbol(s)", self.n, self.k, row, c),
            }
            message.extend_from_slice(self.message_of(&word));
            corrected.extend(word);
            error_counts.push(count);
        }

        let rows = code.rows();
        Ok(DecodeResult {
            message: GaloisMatrix::from_raw(rows, self.k, message, &self.field),
            error_counts,
            corrected: GaloisMatrix::from_raw(rows, self.n, corrected, &self.field),
        })
    }
}
