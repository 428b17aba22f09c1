//! Cryptographic primitives for the latsig library
//!
//! This crate provides the arithmetic and hashing building blocks the
//! signature scheme is assembled from:
//!
//! - [`poly`]: polynomials over Z_q[X]/(X^256 + 1), the negacyclic NTT with
//!   Montgomery reduction, and fixed-width coefficient packing
//! - [`xof`]: SHAKE128 / SHAKE256 behind an absorb/squeeze interface
//!
//! All coefficient arithmetic is branch-free with respect to coefficient
//! values.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

// Error module and re-exports
pub mod error;
pub use error::{Error, Result};

// Polynomial engine
pub mod poly;

// XOF implementations
pub mod xof;
pub use xof::{ExtendableOutputFunction, ShakeXof128, ShakeXof256};
