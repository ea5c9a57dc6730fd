//! Binary BCH codes
//!
//! Narrow-sense generators are assembled from cyclotomic cosets of GF(2^m);
//! codewords are GF(2) matrix rows. Parity sits at the beginning of each
//! codeword unless asked otherwise. Decoding runs Berlekamp-Massey for a fixed
//! capability t followed by a Chien search, and shortened codes are decoded
//! against virtual zero padding.

pub mod code;
pub mod decoder;
pub mod encoder;
pub mod generator;

pub use code::{BchCode, BchOptions};
pub use generator::{bch_generator_polynomial, cyclotomic_cosets};

use crate::codec::DecodeResult;
use crate::config::CodecConfig;
use crate::error::GaloisResult;
use crate::matrix::GaloisMatrix;

/// Encode each row of a rows x k GF(2) message matrix into a rows x n codeword matrix
pub fn bch_encode(
    message: &GaloisMatrix,
    n: usize,
    k: usize,
    options: &BchOptions,
) -> GaloisResult<GaloisMatrix> {
    BchCode::new(n, k, options)?.encode(message)
}

/// Decode each row of a rows x n GF(2) codeword matrix, correcting up to t bits per row.
///
/// The codeword length is taken from the matrix width.
pub fn bch_decode(
    code: &GaloisMatrix,
    k: usize,
    t: usize,
    options: &BchOptions,
) -> GaloisResult<DecodeResult> {
    bch_decode_with_config(code, k, t, options, &CodecConfig::default())
}

pub fn bch_decode_with_config(
    code: &GaloisMatrix,
    k: usize,
    t: usize,
    options: &BchOptions,
    config: &CodecConfig,
) -> GaloisResult<DecodeResult> {
    BchCode::new(code.cols(), k, options)?.decode_with_config(code, t, config)
}
