//! Public API traits and types for the latsig library
//!
//! This crate provides the public API surface for the latsig ecosystem: the
//! signature and entropy traits, the error type every fallible operation
//! returns, and the secret-holding byte containers shared by the other crates.

#![forbid(unsafe_code)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at the crate level for convenience
pub use error::{Error, Result, ResultExt};
pub use types::{SecretBytes, Verdict};

// Re-export all traits from the traits module
pub use traits::{EntropySource, RngEntropy, Signature, SignatureDerive, SignatureSerialize};
#[cfg(feature = "std")]
pub use traits::OsEntropy;

// Re-export trait modules for direct access
pub use traits::{entropy, signature};
