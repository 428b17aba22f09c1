//! Polynomial vector types and the public matrix A.

use core::marker::PhantomData;

use latsig_algorithms::poly::prelude::*;
use latsig_algorithms::xof::{ExtendableOutputFunction, ShakeXof128};
use latsig_params::DilithiumParams;
use zeroize::Zeroize;

use crate::error::Result;

/// Polynomial over the Dilithium ring
pub type Poly = Polynomial<DilithiumModulus>;

macro_rules! polyvec {
    ($(#[$doc:meta])* $name:ident, $dim:ident) => {
        $(#[$doc])*
        #[derive(Debug)]
        pub struct $name<P: DilithiumParams> {
            pub(crate) polys: Vec<Poly>,
            _params: PhantomData<P>,
        }

        impl<P: DilithiumParams> Clone for $name<P> {
            fn clone(&self) -> Self {
                Self {
                    polys: self.polys.clone(),
                    _params: PhantomData,
                }
            }
        }

        impl<P: DilithiumParams> PartialEq for $name<P> {
            fn eq(&self, other: &Self) -> bool {
                self.polys == other.polys
            }
        }

        impl<P: DilithiumParams> Eq for $name<P> {}

        impl<P: DilithiumParams> Zeroize for $name<P> {
            fn zeroize(&mut self) {
                for poly in self.polys.iter_mut() {
                    poly.zeroize();
                }
            }
        }

        impl<P: DilithiumParams> $name<P> {
            /// All-zero vector
            pub fn zero() -> Self {
                Self {
                    polys: vec![Poly::zero(); P::$dim],
                    _params: PhantomData,
                }
            }

            /// Forward NTT on every entry
            pub fn ntt_inplace(&mut self) -> Result<()> {
                for p in self.polys.iter_mut() {
                    p.ntt_inplace()?;
                }
                Ok(())
            }

            /// Inverse NTT on every entry
            pub fn inv_ntt_inplace(&mut self) -> Result<()> {
                for p in self.polys.iter_mut() {
                    p.from_ntt_inplace()?;
                }
                Ok(())
            }

            /// Element-wise `self + other`
            pub fn add(&self, other: &Self) -> Self {
                let mut res = Self::zero();
                for (dst, (a, b)) in res.polys.iter_mut().zip(self.polys.iter().zip(&other.polys)) {
                    *dst = a.add(b);
                }
                res
            }

            /// Multiplies every entry by one polynomial; both sides in NTT form
            pub fn scale_ntt(&self, scalar_hat: &Poly) -> Self {
                let mut res = Self::zero();
                for (dst, p) in res.polys.iter_mut().zip(&self.polys) {
                    *dst = p.ntt_mul(scalar_hat);
                }
                res
            }

            /// True when every centered coefficient of every entry is below `bound`
            ///
            /// All entries are scanned whatever the outcome.
            pub fn norm_lt(&self, bound: u32) -> bool {
                let mut ok = true;
                for p in &self.polys {
                    ok &= p.norm_lt(bound);
                }
                ok
            }
        }
    };
}

polyvec!(
    /// A vector of L polynomials (columns of A, secret s1, mask y, response z)
    PolyVecL,
    L_DIM
);

polyvec!(
    /// A vector of K polynomials (rows of A, secret s2, t, w, hints)
    PolyVecK,
    K_DIM
);

impl<P: DilithiumParams> PolyVecK<P> {
    /// Element-wise `self - other`
    pub fn sub(&self, other: &Self) -> Self {
        let mut res = Self::zero();
        for (dst, (a, b)) in res.polys.iter_mut().zip(self.polys.iter().zip(&other.polys)) {
            *dst = a.sub(b);
        }
        res
    }

    /// Element-wise negation
    pub fn neg(&self) -> Self {
        let mut res = Self::zero();
        for (dst, p) in res.polys.iter_mut().zip(&self.polys) {
            *dst = p.neg();
        }
        res
    }

    /// Multiplies every coefficient by `2^shift`
    pub fn shl(&self, shift: u32) -> Self {
        let mut res = Self::zero();
        for (dst, p) in res.polys.iter_mut().zip(&self.polys) {
            *dst = p.shl(shift);
        }
        res
    }
}

/// The K x L public matrix, held in the NTT domain
#[derive(Debug, Clone)]
pub struct MatrixA<P: DilithiumParams> {
    rows: Vec<PolyVecL<P>>,
}

impl<P: DilithiumParams> MatrixA<P> {
    /// Expands `rho` into A.
    ///
    /// Entry (i, j) is sampled from SHAKE128(rho || j || i) by reading three
    /// bytes at a time, masking to 23 bits and keeping values below q. The
    /// samples are taken to be NTT coefficients directly.
    pub fn expand(rho: &[u8; 32]) -> Result<Self> {
        let mut rows = Vec::with_capacity(P::K_DIM);
        for i in 0..P::K_DIM {
            let mut row = PolyVecL::<P>::zero();
            for (j, entry) in row.polys.iter_mut().enumerate() {
                *entry = sample_uniform(rho, j as u8, i as u8)?;
            }
            rows.push(row);
        }
        Ok(Self { rows })
    }

    /// `A * v` with `v` in NTT form; the result stays in NTT form
    ///
    /// Each row is accumulated with Montgomery products, so the inverse
    /// transform of the result yields the plain product.
    pub fn mul_vec(&self, v_hat: &PolyVecL<P>) -> PolyVecK<P> {
        let mut res = PolyVecK::<P>::zero();
        for (acc, row) in res.polys.iter_mut().zip(&self.rows) {
            for (a, b) in row.polys.iter().zip(&v_hat.polys) {
                acc.add_assign(&a.ntt_mul(b));
            }
        }
        res
    }
}

fn sample_uniform(rho: &[u8; 32], col: u8, row: u8) -> Result<Poly> {
    const Q: u32 = DilithiumModulus::Q;

    let mut xof = ShakeXof128::new();
    xof.update(rho)?;
    xof.update(&[col, row])?;

    let mut poly = Poly::zero();
    let mut ctr = 0;
    // One SHAKE128 block holds 56 candidates
    let mut buf = [0u8; 168];
    while ctr < DilithiumModulus::N {
        xof.squeeze(&mut buf)?;
        for chunk in buf.chunks_exact(3) {
            let t = (chunk[0] as u32) | ((chunk[1] as u32) << 8) | (((chunk[2] & 0x7F) as u32) << 16);
            if t < Q {
                poly.coeffs[ctr] = t;
                ctr += 1;
                if ctr == DilithiumModulus::N {
                    break;
                }
            }
        }
    }
    Ok(poly)
}
