//! Reed-Solomon codes over GF(2^m)
//!
//! Systematic encoding by shift-register division and decoding with
//! Berlekamp-Massey, Chien search and Forney's algorithm. Codewords are matrix
//! rows; every row is an independent block.
//!
//! Symbol order: with parity at the end a row holds the codeword polynomial's
//! coefficients highest power first; with parity at the beginning, lowest
//! power first. Shortened codes (n < 2^m - 1) are supported in both layouts.

pub mod code;
pub mod decoder;
pub mod encoder;
pub mod generator;

pub use code::{RsCode, RsOptions};
pub use generator::rs_generator_polynomial;

use crate::codec::DecodeResult;
use crate::config::CodecConfig;
use crate::error::GaloisResult;
use crate::matrix::GaloisMatrix;

/// Encode each row of a rows x k message matrix into a rows x n codeword matrix
pub fn rs_encode(
    message: &GaloisMatrix,
    n: usize,
    k: usize,
    options: &RsOptions,
) -> GaloisResult<GaloisMatrix> {
    RsCode::new(message.field(), n, k, options)?.encode(message)
}

/// Decode each row of a rows x n codeword matrix
pub fn rs_decode(
    code: &GaloisMatrix,
    n: usize,
    k: usize,
    options: &RsOptions,
) -> GaloisResult<DecodeResult> {
    rs_decode_with_config(code, n, k, options, &CodecConfig::default())
}

/// Decode each row of a rows x n codeword matrix, parallelised per `config`
pub fn rs_decode_with_config(
    code: &GaloisMatrix,
    n: usize,
    k: usize,
    options: &RsOptions,
    config: &CodecConfig,
) -> GaloisResult<DecodeResult> {
    RsCode::new(code.field(), n, k, options)?.decode_with_config(code, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::ParityPosition;
    use crate::galois::acquire_field;

    #[test]
    fn test_round_trip_rows() {
        let field = acquire_field(3, 0).unwrap();
        let msg = GaloisMatrix::from_int_grid(&field, &[vec![1, 2, 3], vec![7, 0, 5]]).unwrap();
        let options = RsOptions::default();
        let code = rs_encode(&msg, 7, 3, &options).unwrap();
        assert_eq!(code.row(0), &[1, 2, 3, 0, 0, 1, 3]);

        let decoded = rs_decode(&code, 7, 3, &options).unwrap();
        assert_eq!(decoded.message, msg);
        assert_eq!(decoded.error_counts, vec![0, 0]);
        assert_eq!(decoded.corrected, code);
    }

    #[test]
    fn test_decode_reports_uncorrectable_row() {
        let field = acquire_field(3, 0).unwrap();
        let received = GaloisMatrix::from_int_grid(
            &field,
            &[vec![0, 3, 2, 0, 0, 1, 3], vec![1, 2, 3, 0, 0, 1, 2]],
        )
        .unwrap();
        let decoded = rs_decode_with_config(
            &received,
            7,
            3,
            &RsOptions::default(),
            &CodecConfig::sequential(),
        )
        .unwrap();
        assert_eq!(decoded.error_counts, vec![-1, 1]);
        assert_eq!(decoded.corrected.row(0), received.row(0));
        assert_eq!(decoded.message.row(1), &[1, 2, 3]);
        assert!(decoded.require_corrected().is_err());
    }

    #[test]
    fn test_generator_without_roots_is_derived() {
        let field = acquire_field(3, 0).unwrap();
        let g = rs_generator_polynomial(&field, 4, 2, 3).unwrap();
        let options = RsOptions::new()
            .with_generator(g)
            .with_parity(ParityPosition::Beginning);
        let msg = GaloisMatrix::row_vector(&field, &[4, 5, 6]).unwrap();
        let code = rs_encode(&msg, 7, 3, &options).unwrap();

        let mut received = code.clone();
        received.set(0, 2, received.get(0, 2) ^ 3).unwrap();
        received.set(0, 5, received.get(0, 5) ^ 1).unwrap();
        let decoded = rs_decode(&received, 7, 3, &options).unwrap();
        assert_eq!(decoded.error_counts, vec![2]);
        assert_eq!(decoded.corrected, code);
        assert_eq!(decoded.message, msg);
    }
}
