//! Trait definitions for the latsig API

pub mod entropy;
pub mod signature;

pub use entropy::{EntropySource, RngEntropy};
#[cfg(feature = "std")]
pub use entropy::OsEntropy;
pub use signature::{Signature, SignatureDerive, SignatureSerialize};
