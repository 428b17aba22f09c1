//! polynomial.rs - Polynomials over Z_Q[X]/(X^N + 1)

use core::marker::PhantomData;
use core::ops::{Add, Neg, Sub};

use latsig_internal::constant_time::{ct_abs_i32, ct_lt_mask_u32, ct_select_u32};
use zeroize::Zeroize;

use super::params::Modulus;
use crate::error::{Error, Result};

/// A polynomial in a ring R_Q = Z_Q[X]/(X^N + 1)
///
/// Coefficients are always kept as canonical representatives in `[0, Q)`.
#[derive(Debug, Clone, PartialEq, Eq, Zeroize)]
pub struct Polynomial<M: Modulus> {
    /// Coefficients of the polynomial, stored in standard representation
    pub coeffs: Vec<u32>,
    #[zeroize(skip)]
    _marker: PhantomData<M>,
}

impl<M: Modulus> Polynomial<M> {
    /// Creates a new polynomial with all coefficients set to zero
    pub fn zero() -> Self {
        Self {
            coeffs: vec![0; M::N],
            _marker: PhantomData,
        }
    }

    /// Creates a polynomial from a slice of canonical coefficients
    pub fn from_coeffs(coeffs_slice: &[u32]) -> Result<Self> {
        if coeffs_slice.len() != M::N {
            return Err(Error::Parameter {
                name: "coeffs_slice".into(),
                reason: "Incorrect number of coefficients for polynomial degree N".into(),
            });
        }
        if coeffs_slice.iter().any(|&c| c >= M::Q) {
            return Err(Error::param("coeffs_slice", "coefficient not reduced modulo Q"));
        }

        Ok(Self {
            coeffs: coeffs_slice.to_vec(),
            _marker: PhantomData,
        })
    }

    /// Creates a polynomial from signed coefficients with `|c| < Q`
    pub fn from_centered(coeffs_slice: &[i32]) -> Result<Self> {
        if coeffs_slice.len() != M::N {
            return Err(Error::Parameter {
                name: "coeffs_slice".into(),
                reason: "Incorrect number of coefficients for polynomial degree N".into(),
            });
        }
        if coeffs_slice.iter().any(|&c| ct_abs_i32(c) >= M::Q) {
            return Err(Error::param("coeffs_slice", "coefficient magnitude exceeds Q"));
        }

        let mut poly = Self::zero();
        for (dst, &c) in poly.coeffs.iter_mut().zip(coeffs_slice) {
            *dst = Self::from_signed(c);
        }
        Ok(poly)
    }

    /// Returns the degree N of the polynomial
    pub fn degree() -> usize {
        M::N
    }

    /// Returns the modulus Q for coefficient arithmetic
    pub fn modulus_q() -> u32 {
        M::Q
    }

    /// Returns a slice view of the coefficients
    pub fn as_coeffs_slice(&self) -> &[u32] {
        &self.coeffs[..M::N]
    }

    /// Returns a mutable slice view of the coefficients
    pub fn as_mut_coeffs_slice(&mut self) -> &mut [u32] {
        &mut self.coeffs[..M::N]
    }

    /// Branch-free modular reduction of a single coefficient in `[0, 2Q)`
    #[inline(always)]
    pub fn reduce_coefficient(a: u32) -> u32 {
        let q = M::Q;
        let mask = !ct_lt_mask_u32(a, q);
        a.wrapping_sub(q & mask)
    }

    /// Maps a signed value in `(-Q, Q)` to its canonical representative
    #[inline(always)]
    pub fn from_signed(a: i32) -> u32 {
        let neg_mask = (a >> 31) as u32;
        (a as u32).wrapping_add(M::Q & neg_mask)
    }

    /// Branch-free conditional correction for signed results in `(-Q, 2Q)`
    #[inline(always)]
    fn conditional_sub_q(a: i64) -> u32 {
        let q = M::Q as i64;
        let a_neg_mask = a >> 63;
        let a_geq_q_mask = -(((q - 1 - a) >> 63) & 1);

        let adjusted = a + (q & a_neg_mask) - (q & a_geq_q_mask);
        adjusted as u32
    }

    /// Centered representative of coefficient `i` in `(-(Q-1)/2, (Q-1)/2]`
    #[inline(always)]
    pub fn centered(&self, i: usize) -> i32 {
        Self::center(self.coeffs[i])
    }

    /// Centered representative of a canonical value
    #[inline(always)]
    pub fn center(c: u32) -> i32 {
        let half = (M::Q - 1) / 2;
        // c > half  <=>  half < c
        let above = ct_lt_mask_u32(half, c);
        ct_select_u32(c, c.wrapping_sub(M::Q), above) as i32
    }

    /// Infinity norm of the centered coefficients
    pub fn infinity_norm(&self) -> u32 {
        let mut max = 0u32;
        for &c in self.as_coeffs_slice() {
            let abs = ct_abs_i32(Self::center(c));
            max = ct_select_u32(max, abs, ct_lt_mask_u32(max, abs));
        }
        max
    }

    /// True when every centered coefficient satisfies `|c| < bound`
    ///
    /// Runs over all coefficients regardless of where a violation occurs.
    pub fn norm_lt(&self, bound: u32) -> bool {
        let mut ok = u32::MAX;
        for &c in self.as_coeffs_slice() {
            ok &= ct_lt_mask_u32(ct_abs_i32(Self::center(c)), bound);
        }
        ok != 0
    }

    /// Polynomial addition modulo Q
    pub fn add(&self, other: &Self) -> Self {
        let mut result = Self::zero();
        for i in 0..M::N {
            let sum = self.coeffs[i].wrapping_add(other.coeffs[i]);
            result.coeffs[i] = Self::reduce_coefficient(sum);
        }
        result
    }

    /// In-place polynomial addition modulo Q
    pub fn add_assign(&mut self, other: &Self) {
        for (a, &b) in self.coeffs.iter_mut().zip(other.coeffs.iter()) {
            *a = Self::reduce_coefficient(a.wrapping_add(b));
        }
    }

    /// Polynomial subtraction modulo Q
    pub fn sub(&self, other: &Self) -> Self {
        let mut result = Self::zero();
        for i in 0..M::N {
            let diff = (self.coeffs[i] as i64) - (other.coeffs[i] as i64);
            result.coeffs[i] = Self::conditional_sub_q(diff);
        }
        result
    }

    /// Polynomial negation modulo Q
    pub fn neg(&self) -> Self {
        let mut result = Self::zero();
        for i in 0..M::N {
            // Mask is 0xFFFF_FFFF when coeff != 0, 0 otherwise
            let mask = ((self.coeffs[i] != 0) as u32).wrapping_neg();
            result.coeffs[i] = (M::Q - self.coeffs[i]) & mask;
        }
        result
    }

    /// Multiplies every coefficient by `2^shift`
    ///
    /// Callers guarantee `c << shift < Q` for every coefficient, which holds for
    /// the high part of a Power2Round split.
    pub fn shl(&self, shift: u32) -> Self {
        let mut result = Self::zero();
        for i in 0..M::N {
            result.coeffs[i] = Self::reduce_coefficient(self.coeffs[i] << shift);
        }
        result
    }

    /// Schoolbook negacyclic multiplication (for correctness testing)
    pub fn schoolbook_mul(&self, other: &Self) -> Self {
        let q = M::Q as u64;
        let mut acc = vec![0u64; M::N];

        for i in 0..M::N {
            for j in 0..M::N {
                let prod = (self.coeffs[i] as u64) * (other.coeffs[j] as u64) % q;
                let idx = i + j;
                if idx < M::N {
                    acc[idx] = (acc[idx] + prod) % q;
                } else {
                    // X^N = -1
                    let k = idx - M::N;
                    acc[k] = (acc[k] + q - prod) % q;
                }
            }
        }

        let mut result = Self::zero();
        for (dst, v) in result.coeffs.iter_mut().zip(acc) {
            *dst = v as u32;
        }
        result
    }

    /// In-place coefficient reduction to ensure all coefficients are < Q
    pub fn reduce_coeffs(&mut self) {
        for c in self.coeffs.iter_mut() {
            *c = Self::reduce_coefficient(*c);
        }
    }
}

// Implement standard ops traits for ergonomic usage
impl<M: Modulus> Add for Polynomial<M> {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Polynomial::add(&self, &other)
    }
}

impl<M: Modulus> Add for &Polynomial<M> {
    type Output = Polynomial<M>;

    fn add(self, other: Self) -> Self::Output {
        Polynomial::add(self, other)
    }
}

impl<M: Modulus> Sub for Polynomial<M> {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        Polynomial::sub(&self, &other)
    }
}

impl<M: Modulus> Sub for &Polynomial<M> {
    type Output = Polynomial<M>;

    fn sub(self, other: Self) -> Self::Output {
        Polynomial::sub(self, other)
    }
}

impl<M: Modulus> Neg for Polynomial<M> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Polynomial::neg(&self)
    }
}

impl<M: Modulus> Neg for &Polynomial<M> {
    type Output = Polynomial<M>;

    fn neg(self) -> Self::Output {
        Polynomial::neg(self)
    }
}
