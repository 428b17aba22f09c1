//! Digital Signature Schemes
//!
//! This crate implements the Dilithium lattice signature scheme in its
//! standardised ML-DSA form, for the three FIPS 204 parameter sets.

#![forbid(unsafe_code)]

pub mod error;
pub mod pq;

pub use error::{Error, Result};

// Re-exports from post-quantum schemes
pub use pq::dilithium::{
    Dilithium, Dilithium2, Dilithium3, Dilithium5, DilithiumPublicKey, DilithiumSecretKey,
    DilithiumSignatureData, MlDsa44, MlDsa65, MlDsa87,
};
