//! Extendable Output Functions (XOF)
//!
//! SHAKE128 and SHAKE256 behind a small absorb/squeeze interface. Every
//! seed expansion in the signature scheme goes through this module.

use crate::error::{Error, Result};

pub mod shake;

// Re-exports
pub use shake::{ShakeXof128, ShakeXof256};

/// Trait for extendable output functions
pub trait ExtendableOutputFunction {
    /// Creates a new instance of the XOF
    fn new() -> Self;

    /// Updates the XOF state with new data
    fn update(&mut self, data: &[u8]) -> Result<()>;

    /// Finalizes the XOF state for output
    fn finalize(&mut self) -> Result<()>;

    /// Squeezes output bytes into the provided buffer
    ///
    /// Finalizes implicitly on the first call. Successive calls continue the
    /// same output stream.
    fn squeeze(&mut self, output: &mut [u8]) -> Result<()>;

    /// Squeezes the specified number of output bytes into a new vector
    fn squeeze_into_vec(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut out = vec![0u8; len];
        self.squeeze(&mut out)?;
        Ok(out)
    }

    /// Resets the XOF state
    fn reset(&mut self) -> Result<()>;

    /// Returns the security level in bits
    fn security_level() -> usize;

    /// Convenience method to generate output in a single call
    fn generate(data: &[u8], len: usize) -> Result<Vec<u8>>
    where
        Self: Sized,
    {
        if len == 0 {
            return Err(Error::param(
                "output_length",
                "XOF output length must be greater than 0",
            ));
        }

        let mut xof = Self::new();
        xof.update(data)?;
        xof.squeeze_into_vec(len)
    }
}

// Error conversion helpers for XOF-specific errors
impl Error {
    /// Create an XOF finalization error
    pub(crate) fn xof_finalized() -> Self {
        Error::Processing {
            operation: "XOF",
            details: "Cannot update after squeezing has begun",
        }
    }
}
