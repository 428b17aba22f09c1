//! Dilithium Digital Signature Algorithm (ML-DSA, FIPS 204)
//!
//! This module provides ML-DSA-44, ML-DSA-65 and ML-DSA-87, the lattice-based
//! signature schemes standardised by NIST. Security rests on the hardness of
//! Module-LWE and Module-SIS over `Z_q[X]/(X^256 + 1)`; signing follows the
//! Fiat-Shamir with Aborts paradigm.
//!
//! Submodules:
//! - `polyvec.rs`: `PolyVecL`, `PolyVecK` and the public matrix `A`
//! - `arithmetic.rs`: `Power2Round`, `Decompose`, `MakeHint`, `UseHint`
//! - `sampling.rs`: short secrets, the mask `y` and the challenge `c`
//! - `encoding.rs`: key and signature byte formats
//! - `sign.rs`: `keypair_internal`, `sign_internal` and `verify_internal`
//!
//! The operations are available both as free functions generic over the
//! parameter set and through the [`Signature`](latsig_api::Signature) trait
//! on [`Dilithium<P>`].
//!
//! # Example
//!
//! ```
//! use latsig_api::{RngEntropy, Signature};
//! use latsig_sign::MlDsa44;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let mut entropy = RngEntropy::new(ChaCha20Rng::from_seed([7u8; 32]));
//! let (pk, sk) = MlDsa44::keypair(&mut entropy)?;
//! let sig = MlDsa44::sign(b"hello", &sk)?;
//! assert!(MlDsa44::verify(b"hello", &sig, &pk).is_accept());
//! # Ok::<(), latsig_api::Error>(())
//! ```

use core::fmt;
use core::marker::PhantomData;

use latsig_api::{
    EntropySource, Error as ApiError, Result as ApiResult, SecretBytes, Signature as SignatureTrait,
    SignatureDerive, SignatureSerialize, Verdict,
};
use latsig_params::DilithiumParams;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

// Internal modules for Dilithium logic
mod arithmetic;
mod encoding;
mod polyvec;
mod sampling;
mod sign;

pub use latsig_params::{
    Dilithium2Params, Dilithium3Params, Dilithium5Params, MlDsa44Params, MlDsa65Params,
    MlDsa87Params,
};
pub use sign::MAX_CONTEXT_BYTES;

/// Dilithium Public Key: `rho || t1`
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DilithiumPublicKey(pub(crate) Vec<u8>);

/// Dilithium Secret Key: `rho || K || tr || s1 || s2 || t0`
///
/// The bytes are wiped on drop and never printed.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DilithiumSecretKey(pub(crate) Vec<u8>);

/// Dilithium Signature: `c_tilde || z || h`
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DilithiumSignatureData(pub(crate) Vec<u8>);

impl DilithiumPublicKey {
    /// Wraps received bytes without checking them; verification rejects
    /// anything malformed.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl DilithiumSignatureData {
    /// Wraps received bytes without checking them; verification rejects
    /// anything malformed.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl fmt::Debug for DilithiumSecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DilithiumSecretKey({} bytes, REDACTED)", self.0.len())
    }
}

// AsRef/AsMut implementations allow access to the raw byte data.
impl AsRef<[u8]> for DilithiumPublicKey { fn as_ref(&self) -> &[u8] { &self.0 } }
impl AsMut<[u8]> for DilithiumPublicKey { fn as_mut(&mut self) -> &mut [u8] { &mut self.0 } }
impl AsRef<[u8]> for DilithiumSignatureData { fn as_ref(&self) -> &[u8] { &self.0 } }
impl AsMut<[u8]> for DilithiumSignatureData { fn as_mut(&mut self) -> &mut [u8] { &mut self.0 } }

/// Generates a keypair from a seed drawn from `entropy`
///
/// # Errors
///
/// [`ApiError::EntropyError`] when the source fails.
pub fn generate_keypair<P, E>(entropy: &mut E) -> ApiResult<(DilithiumPublicKey, DilithiumSecretKey)>
where
    P: DilithiumParams,
    E: EntropySource + ?Sized,
{
    let (pk, mut sk) = sign::keypair_internal::<P, E>(entropy)?;
    Ok((DilithiumPublicKey(pk), DilithiumSecretKey(core::mem::take(&mut *sk))))
}

/// Signs `message` deterministically
///
/// # Errors
///
/// [`ApiError::DecodeError`] for a malformed secret key and
/// [`ApiError::SigningExhausted`] if the rejection loop gives up.
pub fn sign<P: DilithiumParams>(
    secret_key: &DilithiumSecretKey,
    message: &[u8],
) -> ApiResult<DilithiumSignatureData> {
    sign_with_context::<P>(secret_key, message, &[])
}

/// Signs `message` with 32 bytes of fresh randomness from `entropy`
///
/// # Errors
///
/// As [`sign`], plus [`ApiError::EntropyError`] when the source fails.
pub fn sign_hedged<P, E>(
    secret_key: &DilithiumSecretKey,
    message: &[u8],
    entropy: &mut E,
) -> ApiResult<DilithiumSignatureData>
where
    P: DilithiumParams,
    E: EntropySource + ?Sized,
{
    let rnd = SecretBytes::<32>::random(entropy)?;
    let sig = sign::sign_internal::<P>(&secret_key.0, message, &[], &rnd)?;
    Ok(DilithiumSignatureData(sig))
}

/// Verifies `signature` over `message`
pub fn verify<P: DilithiumParams>(
    public_key: &DilithiumPublicKey,
    message: &[u8],
    signature: &DilithiumSignatureData,
) -> Verdict {
    verify_with_context::<P>(public_key, message, &[], signature)
}

/// Signs `message` deterministically under an application context string
///
/// # Errors
///
/// [`ApiError::InvalidParameter`] if `context` exceeds
/// [`MAX_CONTEXT_BYTES`], otherwise as [`sign`].
pub fn sign_with_context<P: DilithiumParams>(
    secret_key: &DilithiumSecretKey,
    message: &[u8],
    context: &[u8],
) -> ApiResult<DilithiumSignatureData> {
    let sig = sign::sign_internal::<P>(&secret_key.0, message, context, &[0u8; 32])?;
    Ok(DilithiumSignatureData(sig))
}

/// Verifies a signature made with [`sign_with_context`]
///
/// An over-long context is a [`Verdict::Reject`].
pub fn verify_with_context<P: DilithiumParams>(
    public_key: &DilithiumPublicKey,
    message: &[u8],
    context: &[u8],
    signature: &DilithiumSignatureData,
) -> Verdict {
    sign::verify_internal::<P>(&public_key.0, message, context, &signature.0)
}

/// Produces the signed message `signature || message`
pub fn sign_attached<P: DilithiumParams>(
    secret_key: &DilithiumSecretKey,
    message: &[u8],
) -> ApiResult<Vec<u8>> {
    let DilithiumSignatureData(mut signed) = sign::<P>(secret_key, message)?;
    signed.extend_from_slice(message);
    Ok(signed)
}

/// Checks a signed message and returns the message it carries
///
/// # Errors
///
/// [`ApiError::InvalidSignature`] when the input is too short or the
/// signature does not verify.
pub fn open<P: DilithiumParams>(
    public_key: &DilithiumPublicKey,
    signed_message: &[u8],
) -> ApiResult<Vec<u8>> {
    if signed_message.len() < P::SIGNATURE_SIZE {
        return Err(ApiError::InvalidSignature {
            context: P::NAME,
            message: format!(
                "signed message is {} bytes, shorter than a signature",
                signed_message.len()
            ),
        });
    }
    let (sig, message) = signed_message.split_at(P::SIGNATURE_SIZE);
    match sign::verify_internal::<P>(&public_key.0, message, &[], sig) {
        Verdict::Accept => Ok(message.to_vec()),
        Verdict::Reject => Err(ApiError::InvalidSignature {
            context: P::NAME,
            message: "signature verification failed".into(),
        }),
    }
}

/// Generic Dilithium signature scheme parameterized by `P: DilithiumParams`.
///
/// A single implementation in `sign.rs` serves every security level; the
/// type parameter selects the constants.
pub struct Dilithium<P: DilithiumParams> {
    _params: PhantomData<P>,
}

impl<P: DilithiumParams> SignatureTrait for Dilithium<P> {
    type PublicKey = DilithiumPublicKey;
    type SecretKey = DilithiumSecretKey;
    type SignatureData = DilithiumSignatureData;
    type KeyPair = (Self::PublicKey, Self::SecretKey);

    fn name() -> &'static str {
        P::NAME
    }

    fn keypair<E: EntropySource + ?Sized>(entropy: &mut E) -> ApiResult<Self::KeyPair> {
        generate_keypair::<P, E>(entropy)
    }

    fn public_key(keypair: &Self::KeyPair) -> Self::PublicKey {
        keypair.0.clone()
    }

    fn secret_key(keypair: &Self::KeyPair) -> Self::SecretKey {
        keypair.1.clone()
    }

    fn sign(message: &[u8], secret_key: &Self::SecretKey) -> ApiResult<Self::SignatureData> {
        sign::<P>(secret_key, message)
    }

    fn sign_hedged<E: EntropySource + ?Sized>(
        message: &[u8],
        secret_key: &Self::SecretKey,
        entropy: &mut E,
    ) -> ApiResult<Self::SignatureData> {
        sign_hedged::<P, E>(secret_key, message, entropy)
    }

    fn verify(
        message: &[u8],
        signature: &Self::SignatureData,
        public_key: &Self::PublicKey,
    ) -> Verdict {
        verify::<P>(public_key, message, signature)
    }
}

fn check_length(context: &'static str, expected: usize, bytes: &[u8]) -> ApiResult<()> {
    if bytes.len() != expected {
        return Err(ApiError::InvalidLength {
            context,
            expected,
            actual: bytes.len(),
        });
    }
    Ok(())
}

impl<P: DilithiumParams> SignatureSerialize for Dilithium<P> {
    const PUBLIC_KEY_SIZE: usize = P::PUBLIC_KEY_BYTES;
    const SECRET_KEY_SIZE: usize = P::SECRET_KEY_BYTES;
    const SIGNATURE_SIZE: usize = P::SIGNATURE_SIZE;

    fn serialize_public_key(key: &Self::PublicKey) -> Vec<u8> {
        key.0.clone()
    }

    fn deserialize_public_key(bytes: &[u8]) -> ApiResult<Self::PublicKey> {
        check_length("public key", Self::PUBLIC_KEY_SIZE, bytes)?;
        Ok(DilithiumPublicKey(bytes.to_vec()))
    }

    fn serialize_secret_key(key: &Self::SecretKey) -> Zeroizing<Vec<u8>> {
        Zeroizing::new(key.0.clone())
    }

    fn deserialize_secret_key(bytes: &[u8]) -> ApiResult<Self::SecretKey> {
        check_length("secret key", Self::SECRET_KEY_SIZE, bytes)?;
        Ok(DilithiumSecretKey(bytes.to_vec()))
    }

    fn serialize_signature(sig: &Self::SignatureData) -> Vec<u8> {
        sig.0.clone()
    }

    fn deserialize_signature(bytes: &[u8]) -> ApiResult<Self::SignatureData> {
        check_length("signature", Self::SIGNATURE_SIZE, bytes)?;
        Ok(DilithiumSignatureData(bytes.to_vec()))
    }
}

impl<P: DilithiumParams> SignatureDerive for Dilithium<P> {
    const MIN_SEED_SIZE: usize = 32;

    fn derive_keypair(seed: &[u8]) -> ApiResult<Self::KeyPair> {
        let xi = SecretBytes::<32>::from_slice(seed)?;
        let (pk, mut sk) = sign::keypair_from_seed::<P>(&xi)?;
        Ok((DilithiumPublicKey(pk), DilithiumSecretKey(core::mem::take(&mut *sk))))
    }

    fn derive_public_key(secret_key: &Self::SecretKey) -> ApiResult<Self::PublicKey> {
        let pk = sign::public_key_from_secret::<P>(&secret_key.0)?;
        Ok(DilithiumPublicKey(pk))
    }
}

/// ML-DSA-44 (NIST security category 2)
pub type MlDsa44 = Dilithium<MlDsa44Params>;
/// ML-DSA-65 (NIST security category 3)
pub type MlDsa65 = Dilithium<MlDsa65Params>;
/// ML-DSA-87 (NIST security category 5)
pub type MlDsa87 = Dilithium<MlDsa87Params>;

pub type Dilithium2 = MlDsa44;
pub type Dilithium3 = MlDsa65;
pub type Dilithium5 = MlDsa87;
