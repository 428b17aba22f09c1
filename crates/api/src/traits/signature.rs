//! Digital signature traits for latsig
//!
//! This module defines the traits that signature algorithms implement.
//! The design prioritizes security by not requiring mutable access to secret keys.

use crate::traits::entropy::EntropySource;
use crate::types::Verdict;
use crate::Result;
use zeroize::{Zeroize, Zeroizing};

/// Core trait for digital signature algorithms
///
/// Secret keys are opaque types that cannot be directly manipulated as bytes.
/// All randomness enters through an explicit [`EntropySource`] argument, so
/// the only sources of nondeterminism are the ones the caller hands in.
pub trait Signature {
    /// Public key type for this algorithm
    type PublicKey: Clone;

    /// Secret key type - must be zeroizable but not byte-accessible
    type SecretKey: Zeroize + Clone;

    /// Signature data type
    type SignatureData: Clone;

    /// Key pair type (typically a tuple of public and secret keys)
    type KeyPair;

    /// Returns the name of this signature algorithm
    fn name() -> &'static str;

    /// Generate a new key pair, drawing the seed from `entropy`
    ///
    /// # Errors
    ///
    /// Returns [`Error::EntropyError`](crate::Error::EntropyError) if the
    /// source cannot supply randomness. No key is produced in that case.
    fn keypair<E: EntropySource + ?Sized>(entropy: &mut E) -> Result<Self::KeyPair>;

    /// Extract the public key from a key pair
    fn public_key(keypair: &Self::KeyPair) -> Self::PublicKey;

    /// Extract the secret key from a key pair
    fn secret_key(keypair: &Self::KeyPair) -> Self::SecretKey;

    /// Sign a message deterministically
    ///
    /// The same key and message always produce the same signature.
    fn sign(message: &[u8], secret_key: &Self::SecretKey) -> Result<Self::SignatureData>;

    /// Sign a message with fresh per-signature randomness from `entropy`
    fn sign_hedged<E: EntropySource + ?Sized>(
        message: &[u8],
        secret_key: &Self::SecretKey,
        entropy: &mut E,
    ) -> Result<Self::SignatureData>;

    /// Verify a signature against a message and public key
    ///
    /// Malformed inputs are rejected, never reported as errors. Every reject
    /// cause takes the same path through the computation.
    fn verify(
        message: &[u8],
        signature: &Self::SignatureData,
        public_key: &Self::PublicKey,
    ) -> Verdict;
}

/// Optional trait for signature algorithms that support key serialization
pub trait SignatureSerialize: Signature {
    /// Size of serialized public keys in bytes
    const PUBLIC_KEY_SIZE: usize;

    /// Size of serialized secret keys in bytes
    const SECRET_KEY_SIZE: usize;

    /// Size of serialized signatures in bytes
    const SIGNATURE_SIZE: usize;

    /// Export a public key to bytes
    fn serialize_public_key(key: &Self::PublicKey) -> Vec<u8>;

    /// Import a public key from bytes
    ///
    /// # Errors
    ///
    /// Returns an error if the length is wrong
    fn deserialize_public_key(bytes: &[u8]) -> Result<Self::PublicKey>;

    /// Export a secret key to bytes
    ///
    /// The `Zeroizing` wrapper clears the bytes when dropped.
    fn serialize_secret_key(key: &Self::SecretKey) -> Zeroizing<Vec<u8>>;

    /// Import a secret key from bytes
    ///
    /// # Errors
    ///
    /// Returns an error if the length is wrong
    fn deserialize_secret_key(bytes: &[u8]) -> Result<Self::SecretKey>;

    /// Export a signature to bytes
    fn serialize_signature(sig: &Self::SignatureData) -> Vec<u8>;

    /// Import a signature from bytes
    ///
    /// # Errors
    ///
    /// Returns an error if the length is wrong
    fn deserialize_signature(bytes: &[u8]) -> Result<Self::SignatureData>;
}

/// Optional trait for signature algorithms that support key derivation
///
/// This trait is for algorithms that can derive keys from seed material
/// in a deterministic way.
pub trait SignatureDerive: Signature {
    /// Minimum seed size in bytes
    const MIN_SEED_SIZE: usize;

    /// Derive a key pair from seed material
    ///
    /// The same seed always produces the same key pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the seed has the wrong length
    fn derive_keypair(seed: &[u8]) -> Result<Self::KeyPair>;

    /// Derive the public key from a secret key
    ///
    /// This also checks that the secret key is internally consistent.
    ///
    /// # Errors
    ///
    /// Returns an error if the secret key is malformed or inconsistent
    fn derive_public_key(secret_key: &Self::SecretKey) -> Result<Self::PublicKey>;
}
