//! Pluggable entropy sources
//!
//! Key generation and hedged signing never reach for a global RNG. They take an
//! [`EntropySource`] from the caller, which keeps the cryptographic core
//! testable with seeded generators and lets deployments plug in whatever
//! hardware or OS source they trust.

use crate::error::{Error, Result};
use rand::{CryptoRng, RngCore};

/// A supplier of cryptographically secure random bytes
///
/// Implementations must either fill the whole buffer with fresh randomness or
/// return [`Error::EntropyError`]. Returning `Ok(())` with predictable output is
/// never acceptable.
pub trait EntropySource {
    /// Fill `dest` entirely with random bytes
    fn fill_random(&mut self, dest: &mut [u8]) -> Result<()>;
}

impl<E: EntropySource + ?Sized> EntropySource for &mut E {
    fn fill_random(&mut self, dest: &mut [u8]) -> Result<()> {
        (**self).fill_random(dest)
    }
}

/// Adapter exposing any `rand` cryptographic generator as an entropy source
///
/// Errors reported through `RngCore::try_fill_bytes` surface as
/// [`Error::EntropyError`].
#[derive(Debug, Clone)]
pub struct RngEntropy<R> {
    rng: R,
}

impl<R: RngCore + CryptoRng> RngEntropy<R> {
    /// Wrap a generator
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Give back the wrapped generator
    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: RngCore + CryptoRng> EntropySource for RngEntropy<R> {
    fn fill_random(&mut self, dest: &mut [u8]) -> Result<()> {
        self.rng.try_fill_bytes(dest).map_err(|e| {
            log::warn!("entropy source failed to supply {} bytes: {}", dest.len(), e);
            Error::EntropyError {
                context: "RngEntropy",
                message: e.to_string(),
            }
        })
    }
}

/// The operating system's random number generator
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

#[cfg(feature = "std")]
impl EntropySource for OsEntropy {
    fn fill_random(&mut self, dest: &mut [u8]) -> Result<()> {
        rand::rngs::OsRng.try_fill_bytes(dest).map_err(|e| {
            log::warn!("OS entropy source failed: {}", e);
            Error::EntropyError {
                context: "OsEntropy",
                message: e.to_string(),
            }
        })
    }
}
