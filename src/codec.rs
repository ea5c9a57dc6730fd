//! Types shared by the Reed-Solomon and BCH codecs

use crate::error::{GaloisError, GaloisResult};
use crate::galois::MAX_ORDER;
use crate::matrix::GaloisMatrix;

/// Where the parity symbols sit in a systematic codeword
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParityPosition {
    /// Parity first, message last
    Beginning,
    /// Message first, parity last
    End,
}

impl ParityPosition {
    pub fn at_end(self) -> bool {
        self == ParityPosition::End
    }
}

impl std::str::FromStr for ParityPosition {
    type Err = GaloisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "beginning" => Ok(ParityPosition::Beginning),
            "end" => Ok(ParityPosition::End),
            other => Err(GaloisError::invalid(format!(
                "unrecognized parity position '{}'",
                other
            ))),
        }
    }
}

/// Outcome of decoding a block of codewords, one per row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeResult {
    /// Recovered message symbols, rows x k
    pub message: GaloisMatrix,
    /// Corrected symbols per row; -1 marks an uncorrectable row
    pub error_counts: Vec<i32>,
    /// Codewords after correction, rows x n; uncorrectable rows are left as received
    pub corrected: GaloisMatrix,
}

impl DecodeResult {
    /// True when no row was uncorrectable
    pub fn all_corrected(&self) -> bool {
        self.error_counts.iter().all(|&c| c >= 0)
    }

    /// Total number of symbols corrected over all correctable rows
    pub fn total_corrected(&self) -> usize {
        self.error_counts
            .iter()
            .filter(|&&c| c > 0)
            .map(|&c| c as usize)
            .sum()
    }

    /// Turn the first uncorrectable row into an error
    pub fn require_corrected(&self) -> GaloisResult<()> {
        match self.error_counts.iter().position(|&c| c < 0) {
            Some(row) => Err(GaloisError::UncorrectableError { row }),
            None => Ok(()),
        }
    }
}

/// Order of the smallest field holding codewords of length n (MAX_ORDER + 1 if none does)
pub fn field_order_for_length(n: usize) -> u32 {
    let mut m = 1;
    while m <= MAX_ORDER && n > (1usize << m) - 1 {
        m += 1;
    }
    m
}

/// Per-row result of a block decoder: error count and the corrected codeword
pub(crate) type RowOutcome = (i32, Vec<u16>);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::galois::acquire_field;

    #[test]
    fn test_field_order_for_length() {
        assert_eq!(field_order_for_length(3), 2);
        assert_eq!(field_order_for_length(7), 3);
        assert_eq!(field_order_for_length(8), 4);
        assert_eq!(field_order_for_length(255), 8);
        assert_eq!(field_order_for_length(200), 8);
    }

    #[test]
    fn test_parity_position_parse() {
        assert_eq!("END".parse::<ParityPosition>().unwrap(), ParityPosition::End);
        assert_eq!(
            "beginning".parse::<ParityPosition>().unwrap(),
            ParityPosition::Beginning
        );
        assert!("middle".parse::<ParityPosition>().is_err());
    }

    #[test]
    fn test_decode_result_helpers() {
        let field = acquire_field(3, 0).unwrap();
        let result = DecodeResult {
            message: GaloisMatrix::zeros(3, 1, &field),
            error_counts: vec![0, 2, -1],
            corrected: GaloisMatrix::zeros(3, 3, &field),
        };
        assert!(!result.all_corrected());
        assert_eq!(result.total_corrected(), 2);
        assert_eq!(
            result.require_corrected(),
            Err(GaloisError::UncorrectableError { row: 2 })
        );
    }
}
