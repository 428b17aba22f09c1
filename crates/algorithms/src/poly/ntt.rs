//! ntt.rs - Number Theoretic Transform implementation
//!
//! Negacyclic NTT over Z_Q[X]/(X^N + 1) with Montgomery arithmetic.
//!
//! ## Domains
//! - The forward transform maps standard coefficients to NTT coefficients
//!   without changing scale; the twiddle table is stored in Montgomery form so
//!   every butterfly product `montgomery_mul(zeta·R, a)` lands back on `zeta·a`.
//! - `ntt_mul` is a Montgomery product and therefore carries a factor R⁻¹.
//! - The inverse transform scales by `R² / N`, cancelling that R⁻¹ together
//!   with the `1/N` of the transform. Inverting a polynomial that was *not*
//!   produced by `ntt_mul` leaves an extra factor R.
//!
//! All coefficients stay canonical in `[0, Q)` and every step is branch-free.

use super::params::{is_power_of_two, NttModulus};
use super::polynomial::Polynomial;
use crate::error::{Error, Result};

/// Trait for forward Number Theoretic Transform
pub trait NttOperator<M: NttModulus> {
    /// Performs the forward NTT on a polynomial
    fn ntt(poly: &mut Polynomial<M>) -> Result<()>;
}

/// Trait for inverse Number Theoretic Transform
pub trait InverseNttOperator<M: NttModulus> {
    /// Performs the inverse NTT on a polynomial, scaling by `R² / N`
    fn inv_ntt(poly: &mut Polynomial<M>) -> Result<()>;
}

/// Cooley-Tukey forward / Gentleman-Sande inverse NTT
pub struct CooleyTukeyNtt;

/// Montgomery reduction: computes a * R^-1 mod Q
///
/// Requires `a < Q * 2^32`; the result is canonical.
#[inline(always)]
pub fn montgomery_reduce<M: NttModulus>(a: u64) -> u32 {
    let q = M::Q as u64;
    let q_inv_neg = M::Q_INV_NEG as u64;

    let m = ((a as u32) as u64).wrapping_mul(q_inv_neg) & 0xFFFF_FFFF;
    let t = (a.wrapping_add(m.wrapping_mul(q)) >> 32) as u32;

    // Branch-free conditional subtraction
    let mask = ((t >= M::Q) as u32).wrapping_neg();
    t.wrapping_sub(M::Q & mask)
}

/// Montgomery multiplication: computes a * b * R^-1 mod Q
#[inline(always)]
pub fn montgomery_mul<M: NttModulus>(a: u32, b: u32) -> u32 {
    montgomery_reduce::<M>((a as u64) * (b as u64))
}

/// Modular addition with constant-time reduction
#[inline(always)]
fn add_mod<M: NttModulus>(a: u32, b: u32) -> u32 {
    let t = a.wrapping_add(b);
    t.wrapping_sub(((t >= M::Q) as u32).wrapping_neg() & M::Q)
}

/// Modular subtraction with constant-time reduction
#[inline(always)]
fn sub_mod<M: NttModulus>(a: u32, b: u32) -> u32 {
    let t = a.wrapping_sub(b).wrapping_add(M::Q);
    t.wrapping_sub(((t >= M::Q) as u32).wrapping_neg() & M::Q)
}

fn check_shape<M: NttModulus>(operation: &'static str) -> Result<()> {
    if !is_power_of_two(M::N) {
        return Err(Error::Parameter {
            name: operation.into(),
            reason: "Polynomial degree must be a power of 2".into(),
        });
    }
    if M::ZETAS.len() != M::N {
        return Err(Error::Parameter {
            name: operation.into(),
            reason: "Twiddle table length must equal the polynomial degree".into(),
        });
    }
    Ok(())
}

impl<M: NttModulus> NttOperator<M> for CooleyTukeyNtt {
    fn ntt(poly: &mut Polynomial<M>) -> Result<()> {
        check_shape::<M>("NTT")?;
        let n = M::N;
        let coeffs = poly.as_mut_coeffs_slice();

        let mut k = 0usize;
        let mut len = n >> 1;
        while len > 0 {
            for start in (0..n).step_by(len << 1) {
                k += 1;
                let zeta = M::ZETAS[k];
                for j in start..start + len {
                    let t = montgomery_mul::<M>(zeta, coeffs[j + len]);
                    coeffs[j + len] = sub_mod::<M>(coeffs[j], t);
                    coeffs[j] = add_mod::<M>(coeffs[j], t);
                }
            }
            len >>= 1;
        }

        Ok(())
    }
}

impl<M: NttModulus> InverseNttOperator<M> for CooleyTukeyNtt {
    fn inv_ntt(poly: &mut Polynomial<M>) -> Result<()> {
        check_shape::<M>("Inverse NTT")?;
        let n = M::N;
        let coeffs = poly.as_mut_coeffs_slice();

        let mut k = n;
        let mut len = 1usize;
        while len < n {
            for start in (0..n).step_by(len << 1) {
                k -= 1;
                let zeta = M::ZETAS[k];
                for j in start..start + len {
                    let t = coeffs[j];
                    coeffs[j] = add_mod::<M>(t, coeffs[j + len]);
                    // (b - a) * zeta  ==  (a - b) * (-zeta)
                    let diff = sub_mod::<M>(coeffs[j + len], t);
                    coeffs[j + len] = montgomery_mul::<M>(zeta, diff);
                }
            }
            len <<= 1;
        }

        for c in coeffs.iter_mut() {
            *c = montgomery_mul::<M>(M::N_INV, *c);
        }

        Ok(())
    }
}

/// Extension methods for Polynomial to support NTT operations
impl<M: NttModulus> Polynomial<M> {
    /// Convert polynomial to NTT domain in-place
    pub fn ntt_inplace(&mut self) -> Result<()> {
        CooleyTukeyNtt::ntt(self)
    }

    /// Convert polynomial from NTT domain in-place
    ///
    /// Intended for accumulated [`ntt_mul`](Self::ntt_mul) products, for which
    /// the result is the plain negacyclic product.
    pub fn from_ntt_inplace(&mut self) -> Result<()> {
        CooleyTukeyNtt::inv_ntt(self)
    }

    /// Multiply two polynomials in NTT domain (pointwise Montgomery product)
    pub fn ntt_mul(&self, other: &Self) -> Self {
        let mut result = Self::zero();
        for i in 0..M::N {
            result.coeffs[i] = montgomery_mul::<M>(self.coeffs[i], other.coeffs[i]);
        }
        result
    }

    /// Negacyclic product through the NTT
    pub fn mul_ntt(&self, other: &Self) -> Result<Self> {
        let mut a = self.clone();
        let mut b = other.clone();
        a.ntt_inplace()?;
        b.ntt_inplace()?;
        let mut c = a.ntt_mul(&b);
        c.from_ntt_inplace()?;
        Ok(c)
    }
}
