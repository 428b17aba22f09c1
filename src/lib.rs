//! # latsig
//!
//! ML-DSA (Dilithium) lattice signatures with a pluggable entropy source.
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! latsig = "0.3"
//! ```
//!
//! ```
//! # #[cfg(feature = "sign")] {
//! use latsig::prelude::*;
//!
//! let (pk, sk) = MlDsa65::keypair(&mut OsEntropy)?;
//! let sig = MlDsa65::sign(b"launch codes", &sk)?;
//! assert_eq!(MlDsa65::verify(b"launch codes", &sig, &pk), Verdict::Accept);
//! # }
//! # Ok::<(), latsig::api::Error>(())
//! ```
//!
//! ## Features
//!
//! - `std` (default): OS entropy and `std` error integration
//! - `sign` (default): the ML-DSA signature schemes
//! - `algorithms`: direct access to the polynomial engine and SHAKE
//! - `serde`: serialization of public keys and signatures
//! - `trace`: per-attempt rejection logging in the signing loop
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports functionality from several sub-crates:
//!
//! - [`latsig-api`]: traits, `Verdict`, the error type, entropy sources
//! - [`latsig-params`]: parameter sets
//! - [`latsig-algorithms`]: polynomial arithmetic, NTT, packing, SHAKE
//! - [`latsig-sign`]: key generation, signing and verification

#![forbid(unsafe_code)]

// Core re-exports (always available)
pub use latsig_api as api;
pub use latsig_internal as internal;
pub use latsig_params as params;

// Feature-gated re-exports
#[cfg(feature = "algorithms")]
pub use latsig_algorithms as algorithms;

#[cfg(feature = "sign")]
pub use latsig_sign as sign;

/// Common imports for latsig users
pub mod prelude {
    pub use crate::api::{Error, Result};

    pub use crate::api::{
        EntropySource, RngEntropy, Signature, SignatureDerive, SignatureSerialize, Verdict,
    };

    #[cfg(feature = "std")]
    pub use crate::api::OsEntropy;

    #[cfg(feature = "sign")]
    pub use crate::sign::{
        DilithiumPublicKey, DilithiumSecretKey, DilithiumSignatureData, MlDsa44, MlDsa65, MlDsa87,
    };

    pub use zeroize::{Zeroize, Zeroizing};
}
