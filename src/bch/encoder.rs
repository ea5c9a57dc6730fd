//! Systematic BCH encoding with a binary feedback shift register

use super::code::{require_binary, BchCode};
use crate::codec::ParityPosition;
use crate::error::{GaloisError, GaloisResult};
use crate::matrix::GaloisMatrix;
use log::debug;

/// Remainder of the shifted message by the generator, clocked through an LFSR.
///
/// `g` is the generator constant term first; the returned register holds the
/// remainder constant term first as well.
fn remainder<'a>(g: &[u8], bits: impl Iterator<Item = &'a u16>) -> Vec<u16> {
    let deg = g.len() - 1;
    let mut reg = vec![0u16; deg];
    for &b in bits {
        let feedback = b ^ reg[deg - 1];
        for j in (1..deg).rev() {
            reg[j] = reg[j - 1] ^ (feedback & u16::from(g[j]));
        }
        reg[0] = feedback & u16::from(g[0]);
    }
    reg
}

impl BchCode {
    fn encode_with(&self, g: &[u8], message: &[u16]) -> Vec<u16> {
        match self.parity {
            ParityPosition::End => {
                let mut reg = remainder(g, message.iter());
                reg.reverse();
                [message, reg.as_slice()].concat()
            }
            ParityPosition::Beginning => {
                let reg = remainder(g, message.iter().rev());
                [reg.as_slice(), message].concat()
            }
        }
    }

    /// Encode one message of k bits into a codeword of n bits
    pub fn encode_row(&self, message: &[u16]) -> GaloisResult<Vec<u16>> {
        if message.len() != self.k {
            return Err(GaloisError::dimensions(
                "bch_encode",
                (1, message.len()),
                (1, self.k),
            ));
        }
        let g = self.generator_bits()?;
        Ok(self.encode_with(&g, message))
    }

    /// Encode every row of a rows x k GF(2) message matrix
    pub fn encode(&self, message: &GaloisMatrix) -> GaloisResult<GaloisMatrix> {
        require_binary(message, "bch_encode")?;
        if message.cols() != self.k {
            return Err(GaloisError::dimensions(
                "bch_encode",
                message.shape(),
                (message.rows(), self.k),
            ));
        }

        let g = self.generator_bits()?;
        let mut data = Vec::with_capacity(message.rows() * self.n);
        for r in 0..message.rows() {
            data.extend(self.encode_with(&g, message.row(r)));
        }

        debug!(
            "BCH({}, {}) encoded {} message(s)",
            self.n,
            self.k,
            message.rows()
        );
        Ok(GaloisMatrix::from_raw(message.rows(), self.n, data, &self.gf2))
    }
}
