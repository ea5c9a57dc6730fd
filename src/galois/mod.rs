//! Binary extension fields GF(2^m), 1 <= m <= 16
//!
//! Field tables live in a process-wide registry and are shared by every matrix
//! bound to the same (m, primitive polynomial) pair.

pub mod field;
pub mod primitive;
pub mod registry;

pub use field::{default_polynomial, GaloisField, DEFAULT_PRIMITIVE_POLYNOMIALS, MAX_ORDER};
pub use primitive::{is_primitive, primitive_polynomials, PolySelector};
pub use registry::{acquire_field, registry, FieldHandle, FieldRegistry};
