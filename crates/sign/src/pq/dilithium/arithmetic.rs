//! Rounding and hint arithmetic for Dilithium (FIPS 204, section 7.4).
//!
//! Every routine here is branch-free in the coefficient values. Inputs are
//! canonical representatives in `[0, q)`.

use latsig_algorithms::poly::prelude::*;
use latsig_params::{DilithiumParams, DILITHIUM_D};

use super::polyvec::{Poly, PolyVecK};

const Q: i32 = DilithiumModulus::Q as i32;

/// Splits `r` into `(r1, r0)` with `r = r1 * 2^d + r0` and
/// `r0` in `(-2^(d-1), 2^(d-1)]`.
#[inline]
pub fn power2round(r: u32) -> (u32, i32) {
    let r = r as i32;
    let r1 = (r + (1 << (DILITHIUM_D - 1)) - 1) >> DILITHIUM_D;
    let r0 = r - (r1 << DILITHIUM_D);
    (r1 as u32, r0)
}

/// Splits `r` into `(r1, r0)` with `r = r1 * 2 * gamma2 + r0 (mod q)` and
/// `r0` in `(-gamma2, gamma2]`.
///
/// `q - 1` is mapped to `(0, -1)` so that `r1` never reaches `(q - 1) / (2 * gamma2)`.
/// Only the two standardised `gamma2` values are supported.
#[inline]
pub fn decompose(r: u32, gamma2: u32) -> (u32, i32) {
    let a = r as i32;
    let mut r1 = (a + 127) >> 7;
    if gamma2 == (DilithiumModulus::Q - 1) / 32 {
        r1 = (r1 * 1025 + (1 << 21)) >> 22;
        r1 &= 15;
    } else {
        r1 = (r1 * 11275 + (1 << 23)) >> 24;
        // 44 wraps to 0
        r1 ^= ((43 - r1) >> 31) & r1;
    }

    let mut r0 = a - r1 * 2 * gamma2 as i32;
    r0 -= (((Q - 1) / 2 - r0) >> 31) & Q;
    (r1 as u32, r0)
}

/// High part of [`decompose`]
#[inline]
pub fn highbits(r: u32, gamma2: u32) -> u32 {
    decompose(r, gamma2).0
}

/// Low part of [`decompose`]
#[inline]
pub fn lowbits(r: u32, gamma2: u32) -> i32 {
    decompose(r, gamma2).1
}

/// Number of distinct high parts, `(q - 1) / (2 * gamma2)`
#[inline]
pub const fn highbits_range(gamma2: u32) -> u32 {
    (DilithiumModulus::Q - 1) / (2 * gamma2)
}

/// 1 when adding `z` to `r` changes the high part of `r`, else 0
#[inline]
pub fn make_hint(z: u32, r: u32, gamma2: u32) -> u32 {
    let sum = Poly::reduce_coefficient(r + z);
    let diff = highbits(r, gamma2) ^ highbits(sum, gamma2);
    (diff | diff.wrapping_neg()) >> 31
}

/// Recovers the high part of `r + z` from `r` and the hint for `z`
#[inline]
pub fn use_hint(hint: u32, r: u32, gamma2: u32) -> u32 {
    let m = highbits_range(gamma2) as i32;
    let (r1, r0) = decompose(r, gamma2);
    // +1 when r0 > 0, -1 otherwise, 0 without a hint
    let up = ((-r0) >> 31) & 1;
    let step = (2 * up - 1) * (hint as i32);
    ((r1 as i32 + m + step) % m) as u32
}

/// Power2Round on every coefficient: returns `(t1, t0)` with `t0` stored mod q
pub fn power2round_polyvec<P: DilithiumParams>(t: &PolyVecK<P>) -> (PolyVecK<P>, PolyVecK<P>) {
    let mut t1 = PolyVecK::<P>::zero();
    let mut t0 = PolyVecK::<P>::zero();
    for i in 0..P::K_DIM {
        for j in 0..DilithiumModulus::N {
            let (hi, lo) = power2round(t.polys[i].coeffs[j]);
            t1.polys[i].coeffs[j] = hi;
            t0.polys[i].coeffs[j] = Poly::from_signed(lo);
        }
    }
    (t1, t0)
}

/// HighBits on every coefficient
pub fn highbits_polyvec<P: DilithiumParams>(w: &PolyVecK<P>) -> PolyVecK<P> {
    let mut res = PolyVecK::<P>::zero();
    for (dst, src) in res.polys.iter_mut().zip(&w.polys) {
        for (d, &s) in dst.coeffs.iter_mut().zip(&src.coeffs) {
            *d = highbits(s, P::GAMMA2_PARAM);
        }
    }
    res
}

/// LowBits on every coefficient, stored mod q
pub fn lowbits_polyvec<P: DilithiumParams>(w: &PolyVecK<P>) -> PolyVecK<P> {
    let mut res = PolyVecK::<P>::zero();
    for (dst, src) in res.polys.iter_mut().zip(&w.polys) {
        for (d, &s) in dst.coeffs.iter_mut().zip(&src.coeffs) {
            *d = Poly::from_signed(lowbits(s, P::GAMMA2_PARAM));
        }
    }
    res
}

/// MakeHint on every coefficient; returns the hint vector and its weight
pub fn make_hint_polyvec<P: DilithiumParams>(
    z: &PolyVecK<P>,
    r: &PolyVecK<P>,
) -> (PolyVecK<P>, u32) {
    let mut hints = PolyVecK::<P>::zero();
    let mut weight = 0u32;
    for i in 0..P::K_DIM {
        for j in 0..DilithiumModulus::N {
            let h = make_hint(z.polys[i].coeffs[j], r.polys[i].coeffs[j], P::GAMMA2_PARAM);
            hints.polys[i].coeffs[j] = h;
            weight += h;
        }
    }
    (hints, weight)
}

/// UseHint on every coefficient
pub fn use_hint_polyvec<P: DilithiumParams>(h: &PolyVecK<P>, r: &PolyVecK<P>) -> PolyVecK<P> {
    let mut res = PolyVecK::<P>::zero();
    for i in 0..P::K_DIM {
        for j in 0..DilithiumModulus::N {
            res.polys[i].coeffs[j] =
                use_hint(h.polys[i].coeffs[j], r.polys[i].coeffs[j], P::GAMMA2_PARAM);
        }
    }
    res
}
