//! Sampling routines for Dilithium: short secrets, the masking vector `y`
//! and the challenge polynomial `c`.

use latsig_algorithms::poly::prelude::*;
use latsig_algorithms::xof::{ExtendableOutputFunction, ShakeXof256};
use latsig_params::DilithiumParams;
use zeroize::Zeroize;

use super::polyvec::{Poly, PolyVecK, PolyVecL};
use crate::error::{Error, Result};

/// Samples a polynomial with coefficients in `[-eta, eta]` from
/// SHAKE256(seed || nonce) by rejection on half-bytes.
pub fn sample_short(seed: &[u8; 64], nonce: u16, eta: u32) -> Result<Poly> {
    let bound = match eta {
        2 => 15,
        4 => 9,
        _ => return Err(Error::InvalidParameter(format!("unsupported eta {}", eta))),
    };

    let mut xof = ShakeXof256::new();
    xof.update(seed)?;
    xof.update(&nonce.to_le_bytes())?;

    let mut poly = Poly::zero();
    let mut ctr = 0;
    let mut buf = [0u8; 136];
    while ctr < DilithiumModulus::N {
        xof.squeeze(&mut buf)?;
        for &byte in buf.iter() {
            for nibble in [(byte & 0x0F) as u32, (byte >> 4) as u32] {
                if ctr < DilithiumModulus::N && nibble < bound {
                    let value = if eta == 2 {
                        2 - (nibble % 5) as i32
                    } else {
                        4 - nibble as i32
                    };
                    poly.coeffs[ctr] = Poly::from_signed(value);
                    ctr += 1;
                }
            }
        }
    }
    buf.zeroize();
    Ok(poly)
}

/// Samples s1 and s2 from `rho_prime`, with nonces `0..L` and `L..L+K`
pub fn expand_s<P: DilithiumParams>(rho_prime: &[u8; 64]) -> Result<(PolyVecL<P>, PolyVecK<P>)> {
    let mut s1 = PolyVecL::<P>::zero();
    for (i, p) in s1.polys.iter_mut().enumerate() {
        *p = sample_short(rho_prime, i as u16, P::ETA_S1S2)?;
    }
    let mut s2 = PolyVecK::<P>::zero();
    for (i, p) in s2.polys.iter_mut().enumerate() {
        *p = sample_short(rho_prime, (P::L_DIM + i) as u16, P::ETA_S1S2)?;
    }
    Ok((s1, s2))
}

/// Samples the masking vector for attempt offset `kappa`.
///
/// Entry `i` unpacks SHAKE256(rho'' || kappa + i) at `GAMMA1_BITS` bits per
/// coefficient as `gamma1 - x`, giving coefficients in `(-gamma1, gamma1]`.
pub fn expand_mask<P: DilithiumParams>(rho_pp: &[u8; 64], kappa: u16) -> Result<PolyVecL<P>> {
    let mut y = PolyVecL::<P>::zero();
    let mut buf = vec![0u8; 32 * P::GAMMA1_BITS];
    for (i, p) in y.polys.iter_mut().enumerate() {
        let nonce = kappa.wrapping_add(i as u16);
        let mut xof = ShakeXof256::new();
        xof.update(rho_pp)?;
        xof.update(&nonce.to_le_bytes())?;
        xof.squeeze(&mut buf)?;

        let mut raw = <DefaultCoefficientSerde as CoefficientUnpacker<DilithiumModulus>>::unpack_coeffs(
            &buf,
            P::GAMMA1_BITS,
        )?;
        for (dst, &x) in p.coeffs.iter_mut().zip(raw.coeffs.iter()) {
            *dst = Poly::from_signed(P::GAMMA1_PARAM as i32 - x as i32);
        }
        raw.zeroize();
    }
    buf.zeroize();
    Ok(y)
}

/// Derives the challenge polynomial from `c_tilde`: exactly `tau`
/// coefficients are +/-1, the rest zero.
pub fn sample_in_ball<P: DilithiumParams>(c_tilde: &[u8]) -> Result<Poly> {
    let mut xof = ShakeXof256::new();
    xof.update(c_tilde)?;

    let mut sign_bytes = [0u8; 8];
    xof.squeeze(&mut sign_bytes)?;
    let mut signs = u64::from_le_bytes(sign_bytes);

    let mut c = Poly::zero();
    let mut byte = [0u8; 1];
    for i in (DilithiumModulus::N - P::TAU_PARAM)..DilithiumModulus::N {
        let j = loop {
            xof.squeeze(&mut byte)?;
            if (byte[0] as usize) <= i {
                break byte[0] as usize;
            }
        };
        c.coeffs[i] = c.coeffs[j];
        c.coeffs[j] = Poly::from_signed(1 - 2 * (signs & 1) as i32);
        signs >>= 1;
    }
    Ok(c)
}
