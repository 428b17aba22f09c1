//! serialize.rs - Polynomial coefficient packing and unpacking
//!
//! Coefficients are written least-significant bit first into a continuous bit
//! stream, `bits_per_coeff` bits each. Callers map signed coefficients onto
//! non-negative raw values (for example `eta - c`) before packing.

use super::params::Modulus;
use super::polynomial::Polynomial;
use crate::error::{Error, Result};

/// Trait for packing polynomial coefficients into a byte array
pub trait CoefficientPacker<M: Modulus> {
    /// Packs the polynomial's raw coefficient values into a byte vector
    ///
    /// Every coefficient must fit in `bits_per_coeff` bits.
    fn pack_coeffs(poly: &Polynomial<M>, bits_per_coeff: usize) -> Result<Vec<u8>>;
}

/// Trait for unpacking polynomial coefficients from a byte array
pub trait CoefficientUnpacker<M: Modulus> {
    /// Unpacks raw coefficient values from exactly `bytes_required(bits, N)` bytes
    fn unpack_coeffs(bytes: &[u8], bits_per_coeff: usize) -> Result<Polynomial<M>>;

    /// Like [`unpack_coeffs`](Self::unpack_coeffs) but fails with
    /// [`Error::Decode`] if any raw value exceeds `max`
    fn unpack_coeffs_bounded(bytes: &[u8], bits_per_coeff: usize, max: u32) -> Result<Polynomial<M>> {
        let poly = Self::unpack_coeffs(bytes, bits_per_coeff)?;
        // Scan the whole polynomial before deciding
        let mut out_of_range = 0u32;
        for &c in poly.as_coeffs_slice() {
            out_of_range |= (c > max) as u32;
        }
        if out_of_range != 0 {
            return Err(Error::decode(
                "coefficient unpacking",
                format!("coefficient exceeds bound {}", max),
            ));
        }
        Ok(poly)
    }
}

/// Default implementation for coefficient serialization
pub struct DefaultCoefficientSerde;

fn check_width(bits_per_coeff: usize, name: &'static str) -> Result<()> {
    if bits_per_coeff == 0 || bits_per_coeff > 32 {
        return Err(Error::Parameter {
            name: name.into(),
            reason: format!("bits_per_coeff must be in range [1, 32], got {}", bits_per_coeff).into(),
        });
    }
    Ok(())
}

impl<M: Modulus> CoefficientPacker<M> for DefaultCoefficientSerde {
    fn pack_coeffs(poly: &Polynomial<M>, bits_per_coeff: usize) -> Result<Vec<u8>> {
        check_width(bits_per_coeff, "coefficient packing")?;

        let limit = 1u64 << bits_per_coeff;
        let mut packed = Vec::with_capacity(bytes_required(bits_per_coeff, M::N));
        let mut acc: u64 = 0;
        let mut acc_bits = 0usize;

        for &coeff in poly.as_coeffs_slice() {
            if coeff as u64 >= limit {
                return Err(Error::Parameter {
                    name: "coefficient packing".into(),
                    reason: format!("coefficient {} does not fit in {} bits", coeff, bits_per_coeff)
                        .into(),
                });
            }
            acc |= (coeff as u64) << acc_bits;
            acc_bits += bits_per_coeff;
            while acc_bits >= 8 {
                packed.push(acc as u8);
                acc >>= 8;
                acc_bits -= 8;
            }
        }
        if acc_bits > 0 {
            packed.push(acc as u8);
        }

        Ok(packed)
    }
}

impl<M: Modulus> CoefficientUnpacker<M> for DefaultCoefficientSerde {
    fn unpack_coeffs(bytes: &[u8], bits_per_coeff: usize) -> Result<Polynomial<M>> {
        check_width(bits_per_coeff, "coefficient unpacking")?;

        let required_bytes = bytes_required(bits_per_coeff, M::N);
        if bytes.len() != required_bytes {
            return Err(Error::decode(
                "coefficient unpacking",
                format!("expected {} bytes, got {}", required_bytes, bytes.len()),
            ));
        }

        let mut poly = Polynomial::<M>::zero();
        let mask = ((1u64 << bits_per_coeff) - 1) as u32;
        let mut acc: u64 = 0;
        let mut acc_bits = 0usize;
        let mut input = bytes.iter();

        for coeff in poly.as_mut_coeffs_slice() {
            while acc_bits < bits_per_coeff {
                // Length was checked above, so the stream cannot run dry here
                let byte = input.next().copied().unwrap_or(0);
                acc |= (byte as u64) << acc_bits;
                acc_bits += 8;
            }
            *coeff = (acc as u32) & mask;
            acc >>= bits_per_coeff;
            acc_bits -= bits_per_coeff;
        }

        Ok(poly)
    }
}

/// Helper function to calculate the number of bytes required for packing
#[allow(clippy::manual_div_ceil)]
pub const fn bytes_required(bits_per_coeff: usize, n: usize) -> usize {
    (n * bits_per_coeff + 7) / 8
}
