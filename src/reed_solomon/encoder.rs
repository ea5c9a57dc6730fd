//! Systematic Reed-Solomon encoding by shift-register division

use super::code::RsCode;
use crate::codec::ParityPosition;
use crate::error::{GaloisError, GaloisResult};
use crate::matrix::GaloisMatrix;
use log::debug;

impl RsCode {
    /// Parity symbols of one message.
    ///
    /// With parity at the end the message is divided most significant symbol
    /// first; with parity at the beginning it is fed in reverse. Leading zero
    /// symbols of a shortened code leave the register untouched, so no explicit
    /// padding is needed.
    pub(crate) fn parity_symbols(&self, message: &[u16]) -> Vec<u16> {
        let field = &self.field;
        let nn = field.max_element();
        let g = &self.generator;
        let nroots = g.len() - 1;
        if nroots == 0 {
            return Vec::new();
        }

        let g_log: Vec<usize> = g.iter().map(|&c| field.log(c)).collect();
        let mut parity = vec![0u16; nroots];

        let mut feed = |symbol: u16| {
            let mut feedback = field.log(parity[0] ^ symbol);
            if feedback != nn {
                if g[0] != 1 {
                    feedback = field.modn(nn - g_log[0] + feedback);
                }
                for j in 1..nroots {
                    if g[j] != 0 {
                        parity[j] ^= field.alpha(field.modn(feedback + g_log[j]));
                    }
                }
            }
            parity.rotate_left(1);
            parity[nroots - 1] = if feedback != nn && g[nroots] != 0 {
                field.alpha(field.modn(feedback + g_log[nroots]))
            } else {
                0
            };
        };

        match self.parity {
            ParityPosition::End => message.iter().for_each(|&s| feed(s)),
            ParityPosition::Beginning => message.iter().rev().for_each(|&s| feed(s)),
        }

        if self.parity == ParityPosition::Beginning {
            parity.reverse();
        }
        parity
    }

    /// Encode one message of k symbols into a codeword of n symbols
    pub fn encode_row(&self, message: &[u16]) -> GaloisResult<Vec<u16>> {
        if message.len() != self.k {
            return Err(GaloisError::dimensions(
                "rs_encode",
                (1, message.len()),
                (1, self.k),
            ));
        }
        let parity = self.parity_symbols(message);
        Ok(match self.parity {
            ParityPosition::End => [message, parity.as_slice()].concat(),
            ParityPosition::Beginning => [parity.as_slice(), message].concat(),
        })
    }

    /// Encode every row of a rows x k message matrix
    pub fn encode(&self, message: &GaloisMatrix) -> GaloisResult<GaloisMatrix> {
        if !message.field().same_field(&self.field) {
            return Err(GaloisError::FieldMismatch {
                lhs_m: message.order(),
                lhs_poly: message.polynomial(),
                rhs_m: self.field.order(),
                rhs_poly: self.field.polynomial(),
            });
        }
        if message.cols() != self.k {
            return Err(GaloisError::dimensions(
                "rs_encode",
                message.shape(),
                (message.rows(), self.k),
            ));
        }

        let mut data = Vec::with_capacity(message.rows() * self.n);
        for r in 0..message.rows() {
            data.extend(self.encode_row(message.row(r))?);
        }

        debug!(
            "RS({}, {}) encoded {} message(s)",
            self.n,
            self.k,
            message.rows()
        );
        Ok(GaloisMatrix::from_raw(message.rows(), self.n, data, &self.field))
    }
}
