//! Byte encodings for Dilithium keys and signatures.
//!
//! Layouts:
//! - public key: `rho (32) || t1` at 10 bits per coefficient
//! - secret key: `rho (32) || K (32) || tr (64) || s1 || s2 || t0`, with
//!   `eta - c` at `ETA_BITS` bits for s1 and s2 and `2^12 - c` at 13 bits for t0
//! - signature: `c_tilde (lambda / 4) || z || h`, with `gamma1 - c` at
//!   `GAMMA1_BITS` bits for z and the hint as `omega` positions followed by `K`
//!   running counts
//!
//! Every decoder validates lengths and value ranges and fails with
//! [`Error::Decode`] rather than producing an inconsistent object.

use latsig_algorithms::poly::prelude::*;
use latsig_algorithms::poly::serialize::bytes_required;
use latsig_params::DilithiumParams;
use zeroize::Zeroize;

use super::polyvec::{Poly, PolyVecK, PolyVecL};
use crate::error::{Error, Result};

type Serde = DefaultCoefficientSerde;

const T0_OFFSET: i32 = 1 << 12;

/// Byte length of one polynomial at `bits` per coefficient
pub const fn poly_bytes(bits: usize) -> usize {
    bytes_required(bits, DilithiumModulus::N)
}

/// Encoded public key length for `P`
pub const fn public_key_len<P: DilithiumParams>() -> usize {
    P::SEED_RHO_BYTES + P::K_DIM * poly_bytes(P::T1_BITS)
}

/// Encoded secret key length for `P`
pub const fn secret_key_len<P: DilithiumParams>() -> usize {
    P::SEED_RHO_BYTES
        + P::SEED_KEY_BYTES
        + P::HASH_TR_BYTES
        + (P::L_DIM + P::K_DIM) * poly_bytes(P::ETA_BITS)
        + P::K_DIM * poly_bytes(P::T0_BITS)
}

/// Encoded signature length for `P`
pub const fn signature_len<P: DilithiumParams>() -> usize {
    P::SEED_C_TILDE_BYTES
        + P::L_DIM * poly_bytes(P::GAMMA1_BITS)
        + P::OMEGA_PARAM as usize
        + P::K_DIM
}

/// Decoded secret key. Secret fields are wiped on drop.
pub(crate) struct SecretKeyParts<P: DilithiumParams> {
    pub rho: [u8; 32],
    pub key: [u8; 32],
    pub tr: [u8; 64],
    pub s1: PolyVecL<P>,
    pub s2: PolyVecK<P>,
    pub t0: PolyVecK<P>,
}

impl<P: DilithiumParams> Drop for SecretKeyParts<P> {
    fn drop(&mut self) {
        self.key.zeroize();
        self.s1.zeroize();
        self.s2.zeroize();
        self.t0.zeroize();
    }
}

/// Decoded signature
pub(crate) struct SignatureParts<P: DilithiumParams> {
    pub c_tilde: Vec<u8>,
    pub z: PolyVecL<P>,
    /// Hint vector, all zero when the hint field failed to decode
    pub h: PolyVecK<P>,
    /// Whether the hint field decoded
    pub hint_ok: bool,
}

fn pack_signed(out: &mut Vec<u8>, poly: &Poly, offset: i32, bits: usize) -> Result<()> {
    let mut raw = Poly::zero();
    for (i, dst) in raw.coeffs.iter_mut().enumerate() {
        // offset - c is non-negative for every in-range coefficient
        *dst = (offset - poly.centered(i)) as u32;
    }
    let packed = Serde::pack_coeffs(&raw, bits);
    raw.zeroize();
    let mut packed = packed?;
    out.extend_from_slice(&packed);
    packed.zeroize();
    Ok(())
}

fn unpack_signed(bytes: &[u8], offset: i32, bits: usize, max_raw: u32) -> Result<Poly> {
    let mut raw =
        <Serde as CoefficientUnpacker<DilithiumModulus>>::unpack_coeffs_bounded(bytes, bits, max_raw)?;
    let mut poly = Poly::zero();
    for (dst, &r) in poly.coeffs.iter_mut().zip(raw.coeffs.iter()) {
        *dst = Poly::from_signed(offset - r as i32);
    }
    raw.zeroize();
    Ok(poly)
}

fn check_len(bytes: &[u8], expected: usize, context: &'static str) -> Result<()> {
    if bytes.len() != expected {
        return Err(Error::decode(
            context,
            format!("expected {} bytes, got {}", expected, bytes.len()),
        ));
    }
    Ok(())
}

/// Encodes `rho || t1`
pub fn pack_public_key<P: DilithiumParams>(rho: &[u8; 32], t1: &PolyVecK<P>) -> Result<Vec<u8>> {
    let mut pk = Vec::with_capacity(public_key_len::<P>());
    pk.extend_from_slice(rho);
    for p in &t1.polys {
        pk.extend_from_slice(&Serde::pack_coeffs(p, P::T1_BITS)?);
    }
    Ok(pk)
}

/// Decodes a public key into `(rho, t1)`
pub fn unpack_public_key<P: DilithiumParams>(pk: &[u8]) -> Result<([u8; 32], PolyVecK<P>)> {
    check_len(pk, public_key_len::<P>(), "public key")?;
    let mut rho = [0u8; 32];
    rho.copy_from_slice(&pk[..32]);

    let mut t1 = PolyVecK::<P>::zero();
    for (p, chunk) in t1.polys.iter_mut().zip(pk[32..].chunks_exact(poly_bytes(P::T1_BITS))) {
        *p = <Serde as CoefficientUnpacker<DilithiumModulus>>::unpack_coeffs(chunk, P::T1_BITS)?;
    }
    Ok((rho, t1))
}

/// Encodes `rho || K || tr || s1 || s2 || t0`
pub fn pack_secret_key<P: DilithiumParams>(
    rho: &[u8; 32],
    key: &[u8; 32],
    tr: &[u8; 64],
    s1: &PolyVecL<P>,
    s2: &PolyVecK<P>,
    t0: &PolyVecK<P>,
) -> Result<Vec<u8>> {
    let eta = P::ETA_S1S2 as i32;
    let mut sk = Vec::with_capacity(secret_key_len::<P>());
    sk.extend_from_slice(rho);
    sk.extend_from_slice(key);
    sk.extend_from_slice(tr);
    for p in s1.polys.iter().chain(&s2.polys) {
        pack_signed(&mut sk, p, eta, P::ETA_BITS)?;
    }
    for p in &t0.polys {
        pack_signed(&mut sk, p, T0_OFFSET, P::T0_BITS)?;
    }
    Ok(sk)
}

/// Decodes a secret key, rejecting s1 / s2 coefficients outside `[-eta, eta]`
pub(crate) fn unpack_secret_key<P: DilithiumParams>(sk: &[u8]) -> Result<SecretKeyParts<P>> {
    check_len(sk, secret_key_len::<P>(), "secret key")?;

    let mut parts = SecretKeyParts {
        rho: [0u8; 32],
        key: [0u8; 32],
        tr: [0u8; 64],
        s1: PolyVecL::<P>::zero(),
        s2: PolyVecK::<P>::zero(),
        t0: PolyVecK::<P>::zero(),
    };
    parts.rho.copy_from_slice(&sk[0..32]);
    parts.key.copy_from_slice(&sk[32..64]);
    parts.tr.copy_from_slice(&sk[64..128]);

    let eta = P::ETA_S1S2;
    let eta_len = poly_bytes(P::ETA_BITS);
    let mut rest = &sk[128..];
    for p in parts.s1.polys.iter_mut().chain(parts.s2.polys.iter_mut()) {
        let (chunk, tail) = rest.split_at(eta_len);
        *p = unpack_signed(chunk, eta as i32, P::ETA_BITS, 2 * eta)
            .map_err(|_| Error::decode("secret key", "secret coefficient outside [-eta, eta]"))?;
        rest = tail;
    }
    for (p, chunk) in parts.t0.polys.iter_mut().zip(rest.chunks_exact(poly_bytes(P::T0_BITS))) {
        // Every 13-bit value maps into (-2^12, 2^12]
        *p = unpack_signed(chunk, T0_OFFSET, P::T0_BITS, (1 << P::T0_BITS) - 1)?;
    }
    Ok(parts)
}

/// Encodes `h` as `omega` coefficient positions followed by `K` running counts
pub fn pack_hints<P: DilithiumParams>(h: &PolyVecK<P>) -> Result<Vec<u8>> {
    let omega = P::OMEGA_PARAM as usize;
    let mut out = vec![0u8; omega + P::K_DIM];
    let mut idx = 0usize;
    for (i, p) in h.polys.iter().enumerate() {
        for (j, &bit) in p.coeffs.iter().enumerate() {
            if bit != 0 {
                if idx >= omega {
                    return Err(Error::InvalidParameter(format!(
                        "hint weight exceeds omega = {}",
                        omega
                    )));
                }
                out[idx] = j as u8;
                idx += 1;
            }
        }
        out[omega + i] = idx as u8;
    }
    Ok(out)
}

/// Decodes the hint field.
///
/// Counts must be non-decreasing and at most `omega`, positions within one
/// polynomial strictly increasing, and unused position slots zero.
pub fn unpack_hints<P: DilithiumParams>(bytes: &[u8]) -> Result<PolyVecK<P>> {
    let omega = P::OMEGA_PARAM as usize;
    check_len(bytes, omega + P::K_DIM, "hint")?;

    let mut h = PolyVecK::<P>::zero();
    let mut idx = 0usize;
    for i in 0..P::K_DIM {
        let end = bytes[omega + i] as usize;
        if end < idx || end > omega {
            return Err(Error::decode("hint", "running count out of order"));
        }
        let first = idx;
        while idx < end {
            if idx > first && bytes[idx - 1] >= bytes[idx] {
                return Err(Error::decode("hint", "positions not strictly increasing"));
            }
            h.polys[i].coeffs[bytes[idx] as usize] = 1;
            idx += 1;
        }
    }
    if bytes[idx..omega].iter().any(|&b| b != 0) {
        return Err(Error::decode("hint", "non-zero padding after last position"));
    }
    Ok(h)
}

/// Encodes `c_tilde || z || h`
pub fn pack_signature<P: DilithiumParams>(
    c_tilde: &[u8],
    z: &PolyVecL<P>,
    h: &PolyVecK<P>,
) -> Result<Vec<u8>> {
    if c_tilde.len() != P::SEED_C_TILDE_BYTES {
        return Err(Error::InvalidParameter(format!(
            "challenge seed must be {} bytes",
            P::SEED_C_TILDE_BYTES
        )));
    }
    let mut sig = Vec::with_capacity(signature_len::<P>());
    sig.extend_from_slice(c_tilde);
    for p in &z.polys {
        pack_signed(&mut sig, p, P::GAMMA1_PARAM as i32, P::GAMMA1_BITS)?;
    }
    sig.extend_from_slice(&pack_hints(h)?);
    Ok(sig)
}

/// Decodes a signature of the exact length.
///
/// A malformed hint field does not fail the call; it is reported through
/// [`SignatureParts::hint_ok`] so that verification can finish its
/// computation before rejecting.
pub(crate) fn unpack_signature<P: DilithiumParams>(sig: &[u8]) -> Result<SignatureParts<P>> {
    check_len(sig, signature_len::<P>(), "signature")?;

    let (c_tilde, rest) = sig.split_at(P::SEED_C_TILDE_BYTES);
    let z_len = poly_bytes(P::GAMMA1_BITS);
    let (z_bytes, hint_bytes) = rest.split_at(P::L_DIM * z_len);

    let mut z = PolyVecL::<P>::zero();
    for (p, chunk) in z.polys.iter_mut().zip(z_bytes.chunks_exact(z_len)) {
        *p = unpack_signed(chunk, P::GAMMA1_PARAM as i32, P::GAMMA1_BITS, (1 << P::GAMMA1_BITS) - 1)?;
    }

    let (h, hint_ok) = match unpack_hints::<P>(hint_bytes) {
        Ok(h) => (h, true),
        Err(e) => {
            log::debug!("{}: {}", P::NAME, e);
            (PolyVecK::<P>::zero(), false)
        }
    };

    Ok(SignatureParts {
        c_tilde: c_tilde.to_vec(),
        z,
        h,
        hint_ok,
    })
}

/// Encodes the high part of `w` at `W1_BITS` bits per coefficient
pub fn pack_w1<P: DilithiumParams>(w1: &PolyVecK<P>) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(P::K_DIM * poly_bytes(P::W1_BITS));
    for p in &w1.polys {
        out.extend_from_slice(&Serde::pack_coeffs(p, P::W1_BITS)?);
    }
    Ok(out)
}
