//! Polynomial engine
//!
//! Arithmetic over Z_Q[X]/(X^N + 1): canonical coefficient storage, the
//! negacyclic NTT with Montgomery reduction, and fixed-width coefficient
//! packing.

pub mod ntt;
pub mod params;
pub mod polynomial;
pub mod serialize;

/// Prelude for easy importing of common polynomial types and traits.
pub mod prelude {
    pub use super::ntt::{montgomery_mul, montgomery_reduce, InverseNttOperator, NttOperator};
    pub use super::params::{DilithiumModulus, Modulus, NttModulus};
    pub use super::polynomial::Polynomial;
    pub use super::serialize::{CoefficientPacker, CoefficientUnpacker, DefaultCoefficientSerde};
}
