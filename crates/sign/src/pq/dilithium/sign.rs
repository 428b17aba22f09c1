//! Core implementation of Dilithium key generation, signing, and verification (FIPS 204).
//!
//! Polynomial domains:
//! - `MatrixA` and every `*_hat` vector are in the NTT domain
//! - `mul_vec` and `scale_ntt` results carry a Montgomery factor that the
//!   inverse transform removes, so they must go through `inv_ntt_inplace`
//!   before they are mixed with coefficient-domain values
//!
//! Signing loop invariants:
//! - `||z||inf < gamma1 - beta`
//! - `||LowBits(w - c*s2)||inf < gamma2 - beta`
//! - `||c*t0||inf < gamma2` and at most `omega` hint bits
//!
//! Internal module; use the `Dilithium<P>` type or the free functions instead.

use latsig_algorithms::xof::{ExtendableOutputFunction, ShakeXof256};
use latsig_api::{EntropySource, SecretBytes, Verdict};
use latsig_internal::constant_time::ct_eq_choice;
use latsig_params::{DilithiumParams, DILITHIUM_D};
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroizing;

use super::arithmetic::{
    highbits_polyvec, lowbits_polyvec, make_hint_polyvec, power2round_polyvec, use_hint_polyvec,
};
use super::encoding::{
    pack_public_key, pack_secret_key, pack_signature, pack_w1, signature_len, unpack_public_key,
    unpack_secret_key, unpack_signature,
};
use super::polyvec::{MatrixA, PolyVecK, PolyVecL};
use super::sampling::{expand_mask, expand_s, sample_in_ball};
use crate::error::{Error, Result};

/// Longest application context accepted by the message digest
pub const MAX_CONTEXT_BYTES: usize = 255;

/// SHAKE256 over the concatenation of `inputs`, squeezed to `N` bytes
fn shake256<const N: usize>(inputs: &[&[u8]]) -> Result<[u8; N]> {
    let mut xof = ShakeXof256::new();
    for input in inputs {
        xof.update(input)?;
    }
    let mut out = [0u8; N];
    xof.squeeze(&mut out)?;
    Ok(out)
}

/// SHAKE256 over the concatenation of `inputs`, squeezed to `len` bytes
fn shake256_vec(inputs: &[&[u8]], len: usize) -> Result<Vec<u8>> {
    let mut xof = ShakeXof256::new();
    for input in inputs {
        xof.update(input)?;
    }
    Ok(xof.squeeze_into_vec(len)?)
}

/// `mu = SHAKE256(tr || 0 || |ctx| || ctx || M, 64)`
fn message_digest(tr: &[u8; 64], ctx: &[u8], message: &[u8]) -> Result<[u8; 64]> {
    if ctx.len() > MAX_CONTEXT_BYTES {
        return Err(Error::InvalidParameter(format!(
            "context is {} bytes, at most {} allowed",
            ctx.len(),
            MAX_CONTEXT_BYTES
        )));
    }
    shake256::<64>(&[tr, &[0u8, ctx.len() as u8], ctx, message])
}

/// `t = A*s1 + s2`, with `s1_hat` already in the NTT domain
fn compute_t<P: DilithiumParams>(
    a: &MatrixA<P>,
    s1_hat: &PolyVecL<P>,
    s2: &PolyVecK<P>,
) -> Result<Zeroizing<PolyVecK<P>>> {
    let mut t = Zeroizing::new(a.mul_vec(s1_hat));
    t.inv_ntt_inplace()?;
    Ok(Zeroizing::new(t.add(s2)))
}

/// Key generation from a 32-byte seed (ML-DSA.KeyGen_internal)
///
/// Returns the encoded public and secret keys.
pub(crate) fn keypair_from_seed<P: DilithiumParams>(
    xi: &[u8; 32],
) -> Result<(Vec<u8>, Zeroizing<Vec<u8>>)> {
    let seeds = Zeroizing::new(shake256::<128>(&[xi, &[P::K_DIM as u8, P::L_DIM as u8]])?);

    let mut rho = [0u8; 32];
    rho.copy_from_slice(&seeds[..32]);
    let mut rho_prime = Zeroizing::new([0u8; 64]);
    rho_prime.copy_from_slice(&seeds[32..96]);
    let mut key = Zeroizing::new([0u8; 32]);
    key.copy_from_slice(&seeds[96..128]);

    let a = MatrixA::<P>::expand(&rho)?;
    let (s1, s2) = expand_s::<P>(&rho_prime)?;
    let (s1, s2) = (Zeroizing::new(s1), Zeroizing::new(s2));

    let mut s1_hat = Zeroizing::new((*s1).clone());
    s1_hat.ntt_inplace()?;
    let t = compute_t(&a, &s1_hat, &s2)?;
    let (t1, t0) = power2round_polyvec::<P>(&t);
    let t0 = Zeroizing::new(t0);

    let pk = pack_public_key::<P>(&rho, &t1)?;
    let tr = shake256::<64>(&[&pk])?;
    let sk = Zeroizing::new(pack_secret_key::<P>(&rho, &key, &tr, &s1, &s2, &t0)?);

    log::debug!("{}: generated keypair", P::NAME);
    Ok((pk, sk))
}

/// Key generation with a seed drawn from `entropy`
///
/// Fails only when the entropy source fails; nothing is generated then.
pub(crate) fn keypair_internal<P, E>(entropy: &mut E) -> Result<(Vec<u8>, Zeroizing<Vec<u8>>)>
where
    P: DilithiumParams,
    E: EntropySource + ?Sized,
{
    let xi = SecretBytes::<32>::random(entropy)?;
    keypair_from_seed::<P>(&xi)
}

/// Recomputes the public key from a secret key and checks that the secret
/// key is internally consistent (`tr = H(pk)` and matching `t0`).
pub(crate) fn public_key_from_secret<P: DilithiumParams>(sk_bytes: &[u8]) -> Result<Vec<u8>> {
    let sk = unpack_secret_key::<P>(sk_bytes)?;
    let a = MatrixA::<P>::expand(&sk.rho)?;

    let mut s1_hat = Zeroizing::new(sk.s1.clone());
    s1_hat.ntt_inplace()?;
    let t = compute_t(&a, &s1_hat, &sk.s2)?;
    let (t1, t0) = power2round_polyvec::<P>(&t);
    let t0 = Zeroizing::new(t0);

    let pk = pack_public_key::<P>(&sk.rho, &t1)?;
    let tr = shake256::<64>(&[&pk])?;

    let mut consistent = ct_eq_choice(tr, sk.tr);
    for (computed, stored) in t0.polys.iter().zip(&sk.t0.polys) {
        consistent &= computed.coeffs.as_slice().ct_eq(stored.coeffs.as_slice());
    }
    if !bool::from(consistent) {
        return Err(Error::InvalidKey(
            "secret key does not match its embedded public key hash".into(),
        ));
    }
    Ok(pk)
}

/// Signing (ML-DSA.Sign_internal)
///
/// `rnd` is all zero for deterministic signatures and fresh entropy for
/// hedged ones.
pub(crate) fn sign_internal<P: DilithiumParams>(
    sk_bytes: &[u8],
    message: &[u8],
    ctx: &[u8],
    rnd: &[u8; 32],
) -> Result<Vec<u8>> {
    let sk = unpack_secret_key::<P>(sk_bytes)?;
    let mu = message_digest(&sk.tr, ctx, message)?;
    let a = MatrixA::<P>::expand(&sk.rho)?;
    let rho_pp = Zeroizing::new(shake256::<64>(&[&sk.key, rnd, &mu])?);

    let mut s1_hat = Zeroizing::new(sk.s1.clone());
    s1_hat.ntt_inplace()?;
    let mut s2_hat = Zeroizing::new(sk.s2.clone());
    s2_hat.ntt_inplace()?;
    let mut t0_hat = Zeroizing::new(sk.t0.clone());
    t0_hat.ntt_inplace()?;

    let z_bound = P::GAMMA1_PARAM - P::BETA_PARAM;
    let r0_bound = P::GAMMA2_PARAM - P::BETA_PARAM;

    let mut kappa: u16 = 0;
    for attempt in 1..=u32::from(P::MAX_SIGN_ABORTS) {
        let y = Zeroizing::new(expand_mask::<P>(&rho_pp, kappa)?);
        kappa = kappa.wrapping_add(P::L_DIM as u16);

        let mut y_hat = Zeroizing::new((*y).clone());
        y_hat.ntt_inplace()?;
        let mut w = Zeroizing::new(a.mul_vec(&y_hat));
        w.inv_ntt_inplace()?;
        let w1 = highbits_polyvec::<P>(&w);

        let c_tilde = shake256_vec(&[&mu, &pack_w1::<P>(&w1)?], P::SEED_C_TILDE_BYTES)?;
        let mut c_hat = sample_in_ball::<P>(&c_tilde)?;
        c_hat.ntt_inplace()?;

        let mut cs1 = Zeroizing::new(s1_hat.scale_ntt(&c_hat));
        cs1.inv_ntt_inplace()?;
        let z = Zeroizing::new(y.add(&cs1));

        let mut cs2 = Zeroizing::new(s2_hat.scale_ntt(&c_hat));
        cs2.inv_ntt_inplace()?;
        let w_cs2 = Zeroizing::new(w.sub(&cs2));
        let r0 = Zeroizing::new(lowbits_polyvec::<P>(&w_cs2));

        let mut ct0 = Zeroizing::new(t0_hat.scale_ntt(&c_hat));
        ct0.inv_ntt_inplace()?;

        let z_ok = z.norm_lt(z_bound);
        let r0_ok = r0.norm_lt(r0_bound);
        let ct0_ok = ct0.norm_lt(P::GAMMA2_PARAM);
        let (h, weight) = make_hint_polyvec(&ct0.neg(), &w_cs2.add(&ct0));
        let hint_ok = weight <= P::OMEGA_PARAM;

        if z_ok && r0_ok && ct0_ok && hint_ok {
            log::debug!("{}: signature accepted after {} attempt(s)", P::NAME, attempt);
            return pack_signature::<P>(&c_tilde, &z, &h);
        }

        #[cfg(feature = "trace")]
        {
            let reason = if !z_ok {
                "z out of range"
            } else if !r0_ok {
                "low bits of w - c*s2 out of range"
            } else if !ct0_ok {
                "c*t0 out of range"
            } else {
                "too many hint bits"
            };
            log::trace!("{}: attempt {} rejected: {}", P::NAME, attempt, reason);
        }
    }

    log::error!(
        "{}: signing exhausted after {} rejected attempts",
        P::NAME,
        P::MAX_SIGN_ABORTS
    );
    Err(Error::SigningExhausted {
        algorithm: P::NAME,
        attempts: u32::from(P::MAX_SIGN_ABORTS),
    })
}

/// Verification (ML-DSA.Verify_internal)
///
/// Every malformed input is a [`Verdict::Reject`]. Apart from a signature of
/// the wrong length, all reject causes run the full computation and are
/// combined at the end.
pub(crate) fn verify_internal<P: DilithiumParams>(
    pk_bytes: &[u8],
    message: &[u8],
    ctx: &[u8],
    sig_bytes: &[u8],
) -> Verdict {
    if sig_bytes.len() != signature_len::<P>() {
        log::debug!(
            "{}: rejecting signature of {} bytes, expected {}",
            P::NAME,
            sig_bytes.len(),
            signature_len::<P>()
        );
        return Verdict::Reject;
    }

    match verify_choice::<P>(pk_bytes, message, ctx, sig_bytes) {
        Ok(accept) => {
            let verdict = Verdict::from(accept);
            if verdict.is_reject() {
                log::debug!("{}: signature rejected", P::NAME);
            }
            verdict
        }
        Err(e) => {
            log::debug!("{}: signature rejected: {}", P::NAME, e);
            Verdict::Reject
        }
    }
}

fn verify_choice<P: DilithiumParams>(
    pk_bytes: &[u8],
    message: &[u8],
    ctx: &[u8],
    sig_bytes: &[u8],
) -> Result<Choice> {
    let (rho, t1) = unpack_public_key::<P>(pk_bytes)?;
    let sig = unpack_signature::<P>(sig_bytes)?;

    let tr = shake256::<64>(&[pk_bytes])?;
    let mu = message_digest(&tr, ctx, message)?;
    let a = MatrixA::<P>::expand(&rho)?;

    let mut c_hat = sample_in_ball::<P>(&sig.c_tilde)?;
    c_hat.ntt_inplace()?;

    let mut z_hat = sig.z.clone();
    z_hat.ntt_inplace()?;
    let mut t1_hat = t1.shl(DILITHIUM_D);
    t1_hat.ntt_inplace()?;

    // w' = A*z - c*t1*2^d
    let mut w_approx = a.mul_vec(&z_hat).sub(&t1_hat.scale_ntt(&c_hat));
    w_approx.inv_ntt_inplace()?;
    let w1 = use_hint_polyvec(&sig.h, &w_approx);

    let c_tilde = shake256_vec(&[&mu, &pack_w1::<P>(&w1)?], P::SEED_C_TILDE_BYTES)?;

    let z_ok = Choice::from(sig.z.norm_lt(P::GAMMA1_PARAM - P::BETA_PARAM) as u8);
    let hint_ok = Choice::from(sig.hint_ok as u8);
    Ok(ct_eq_choice(&sig.c_tilde, &c_tilde) & z_ok & hint_ok)
}
