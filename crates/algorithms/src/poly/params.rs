//! params.rs - Polynomial ring parameters with NTT support

/// Basic trait defining the modulus and degree for a polynomial ring
///
/// Moduli are zero-sized markers; `Clone` and `Debug` let `Polynomial<M>`
/// derive both without extra bounds at every use site.
pub trait Modulus: Clone + core::fmt::Debug {
    /// The primary modulus Q for coefficient arithmetic
    const Q: u32;

    /// The polynomial degree N (number of coefficients)
    const N: usize;
}

/// Extended trait for NTT-enabled moduli
pub trait NttModulus: Modulus {
    /// Primitive 2N-th root of unity
    const ZETA: u32;

    /// Twiddle factors in Montgomery form, bit-reversed order.
    /// Entry k holds `ZETA^brv(k) * 2^32 mod Q`.
    const ZETAS: &'static [u32];

    /// Scaling applied at the end of the inverse NTT: `2^64 / N mod Q`
    const N_INV: u32;

    /// Montgomery parameter R = 2^32 mod Q
    const MONT_R: u32;

    /// -Q^-1 mod 2^32 for Montgomery reduction
    const Q_INV_NEG: u32;
}

const fn pow_mod_const(base: u64, mut exp: u32, q: u64) -> u64 {
    let mut acc = 1u64;
    let mut b = base % q;
    while exp != 0 {
        if exp & 1 == 1 {
            acc = acc * b % q;
        }
        b = b * b % q;
        exp >>= 1;
    }
    acc
}

const fn dilithium_zetas() -> [u32; 256] {
    let q = DilithiumModulus::Q as u64;
    let r = (1u64 << 32) % q;
    let mut table = [0u32; 256];
    let mut k = 0;
    while k < 256 {
        let brv = (k as u8).reverse_bits() as u32;
        let z = pow_mod_const(DilithiumModulus::ZETA as u64, brv, q);
        table[k] = (z * r % q) as u32;
        k += 1;
    }
    table
}

/// Dilithium twiddle factors, computed at compile time
pub const DILITHIUM_ZETAS: [u32; 256] = dilithium_zetas();

/// Ring parameters shared by every Dilithium parameter set
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DilithiumModulus;

impl Modulus for DilithiumModulus {
    const Q: u32 = 8380417; // 2^23 - 2^13 + 1
    const N: usize = 256;
}

impl NttModulus for DilithiumModulus {
    const ZETA: u32 = 1753; // primitive 512-th root of unity mod Q
    const ZETAS: &'static [u32] = &DILITHIUM_ZETAS;
    const N_INV: u32 = 41978; // 2^64 / 256 mod Q
    const MONT_R: u32 = 4193792; // 2^32 mod Q
    const Q_INV_NEG: u32 = 0xFC7F_DFFF; // -Q^-1 mod 2^32
}

/// Check if N is a power of 2
pub fn is_power_of_two(n: usize) -> bool {
    n > 0 && (n & (n - 1)) == 0
}
