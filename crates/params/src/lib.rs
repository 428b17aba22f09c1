//! Parameter sets for the latsig library
//!
//! Constants only. Every value here is fixed at compile time and shared by the
//! arithmetic and signature crates so that signer and verifier always agree on
//! encodings and bounds.

#![cfg_attr(not(test), no_std)]
#![forbid(unsafe_code)]

pub mod pqc;

pub use pqc::dilithium::{
    Dilithium2Params, Dilithium3Params, Dilithium5Params, DilithiumParams, MlDsa44Params,
    MlDsa65Params, MlDsa87Params, DILITHIUM_D, DILITHIUM_N, DILITHIUM_Q,
};
