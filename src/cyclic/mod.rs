//! Binary cyclic code tools
//!
//! Generator polynomial search, parity-check/generator matrix construction,
//! minimum distance and syndrome tables. The searches are exponential in the
//! code length and poll a [`CancelCheck`] on every inner-loop iteration.

pub mod cancel;
pub mod filter;
pub mod generator;
pub mod weight;

pub use cancel::{CancelCheck, NeverCancel};
pub use filter::{filter, filter_gf2, FilterOutput};
pub use generator::{
    cyclic_generator_matrix, cyclic_polynomials, is_cyclic_polynomial, CyclicCode, GeneratorForm,
};
pub use weight::{minimum_distance, syndrome_table};
