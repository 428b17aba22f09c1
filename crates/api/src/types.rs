//! Core types with security guarantees for the latsig library

use core::fmt;
use core::ops::{Deref, DerefMut};
use latsig_internal::constant_time::ct_eq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::traits::entropy::EntropySource;
use crate::{Error, Result};

/// A fixed-size array of bytes that is securely zeroed when dropped
///
/// Used for seeds and other short-lived secrets. Equality is constant-time and
/// `Debug` never prints the contents.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretBytes<const N: usize> {
    data: [u8; N],
}

impl<const N: usize> SecretBytes<N> {
    /// Create a new instance from an existing array
    pub fn new(data: [u8; N]) -> Self {
        Self { data }
    }

    /// Create from a slice, if it has the correct length
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        if slice.len() != N {
            return Err(Error::InvalidLength {
                context: "SecretBytes::from_slice",
                expected: N,
                actual: slice.len(),
            });
        }

        let mut data = [0u8; N];
        data.copy_from_slice(slice);

        Ok(Self { data })
    }

    /// Create an instance filled with zeros
    pub fn zeroed() -> Self {
        Self { data: [0u8; N] }
    }

    /// Draw a fresh instance from an entropy source
    ///
    /// On failure the partially written buffer is wiped before the error is
    /// returned.
    pub fn random<E: EntropySource + ?Sized>(entropy: &mut E) -> Result<Self> {
        let mut out = Self::zeroed();
        entropy.fill_random(&mut out.data)?;
        Ok(out)
    }

    /// Get the length of the contained data
    pub fn len(&self) -> usize {
        N
    }

    /// Check if the container is empty
    pub fn is_empty(&self) -> bool {
        N == 0
    }
}

impl<const N: usize> AsRef<[u8]> for SecretBytes<N> {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl<const N: usize> AsMut<[u8]> for SecretBytes<N> {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl<const N: usize> Deref for SecretBytes<N> {
    type Target = [u8; N];

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<const N: usize> DerefMut for SecretBytes<N> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.data
    }
}

impl<const N: usize> PartialEq for SecretBytes<N> {
    fn eq(&self, other: &Self) -> bool {
        ct_eq(self.data, other.data)
    }
}

impl<const N: usize> Eq for SecretBytes<N> {}

impl<const N: usize> fmt::Debug for SecretBytes<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretBytes<{}>[REDACTED]", N)
    }
}

/// Outcome of a signature verification
///
/// Rejection is an expected result for untrusted input, so it travels through
/// the success channel instead of `Err`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[must_use]
pub enum Verdict {
    /// The signature is valid for the message and public key
    Accept,
    /// The signature is not valid
    Reject,
}

impl Verdict {
    /// True for [`Verdict::Accept`]
    pub fn is_accept(self) -> bool {
        self == Verdict::Accept
    }

    /// True for [`Verdict::Reject`]
    pub fn is_reject(self) -> bool {
        self == Verdict::Reject
    }
}

impl From<subtle::Choice> for Verdict {
    fn from(choice: subtle::Choice) -> Self {
        if bool::from(choice) {
            Verdict::Accept
        } else {
            Verdict::Reject
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Accept => f.write_str("accept"),
            Verdict::Reject => f.write_str("reject"),
        }
    }
}
