//! Arithmetic over GF(2^m) for m = 1..16 and the channel codes built on it.
//!
//! Fields are shared through a reference-counted [`FieldRegistry`]; matrices
//! carry a handle to their field. On top of that sit LU-based linear algebra,
//! binary cyclic code tools, and Reed-Solomon and BCH codecs that encode and
//! decode matrix rows as independent blocks.

pub mod args;
pub mod bch;
pub mod codec;
pub mod config;
pub mod cyclic;
pub mod error;
pub mod galois;
pub mod linalg;
pub mod matrix;
pub mod reed_solomon;

pub use bch::{
    bch_decode, bch_decode_with_config, bch_encode, bch_generator_polynomial, cyclotomic_cosets,
    BchCode, BchOptions,
};
pub use codec::{field_order_for_length, DecodeResult, ParityPosition};
pub use config::CodecConfig;
pub use cyclic::{
    cyclic_generator_matrix, cyclic_polynomials, filter, filter_gf2, is_cyclic_polynomial,
    minimum_distance, syndrome_table, CancelCheck, CyclicCode, FilterOutput, GeneratorForm,
    NeverCancel,
};
pub use error::{GaloisError, GaloisResult};
pub use galois::{
    acquire_field, default_polynomial, is_primitive, primitive_polynomials, registry,
    FieldHandle, FieldRegistry, GaloisField, PolySelector, MAX_ORDER,
};
pub use linalg::{
    determinant, inverse, left_divide, lu_factor, rank, right_divide, solve, LuFactorization,
    PivotType,
};
pub use matrix::{binary_op, build_matrix, BinaryOp, GaloisMatrix, Operand, PlainMatrix};
pub use reed_solomon::{
    rs_decode, rs_decode_with_config, rs_encode, rs_generator_polynomial, RsCode, RsOptions,
};
