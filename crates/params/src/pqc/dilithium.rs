//! Constants for the Dilithium (ML-DSA) digital signature algorithm

/// Dilithium polynomial degree
pub const DILITHIUM_N: usize = 256;

/// Dilithium modulus q = 2^23 - 2^13 + 1
pub const DILITHIUM_Q: u32 = 8380417;

/// Number of bits dropped from t by Power2Round
pub const DILITHIUM_D: u32 = 13;

/// Common trait for Dilithium parameter sets
pub trait DilithiumParams: Send + Sync + 'static {
    /// Algorithm name
    const NAME: &'static str;

    // Ring parameters
    /// Polynomial degree (always 256 for Dilithium)
    const N: usize = DILITHIUM_N;
    /// Prime modulus q = 2^23 - 2^13 + 1
    const Q: u32 = DILITHIUM_Q;
    /// Dropped bits parameter
    const D_PARAM: u32 = DILITHIUM_D;

    // Matrix dimensions
    /// Number of polynomials in secret vector s2 and public vector t (rows in A)
    const K_DIM: usize;
    /// Number of polynomials in secret vector s1 and masking vector y (columns in A)
    const L_DIM: usize;

    // Norm bounds
    /// Bound for secret polynomials s1, s2
    const ETA_S1S2: u32;
    /// Bits per packed coefficient of s1, s2
    const ETA_BITS: usize;
    /// Range parameter for masking vector y
    const GAMMA1_PARAM: u32;
    /// Number of bits to represent z coefficients
    const GAMMA1_BITS: usize;
    /// Decomposition parameter
    const GAMMA2_PARAM: u32;
    /// Rejection bound, tau * eta
    const BETA_PARAM: u32;
    /// Maximum number of hint bits
    const OMEGA_PARAM: u32;
    /// Number of ±1 coefficients in challenge polynomial
    const TAU_PARAM: usize;
    /// Collision strength of the commitment hash in bits
    const LAMBDA: usize;

    // Byte sizes
    /// Public key size in bytes
    const PUBLIC_KEY_BYTES: usize;
    /// Secret key size in bytes
    const SECRET_KEY_BYTES: usize;
    /// Signature size in bytes
    const SIGNATURE_SIZE: usize;

    // Seed sizes
    /// Seed size for matrix A generation
    const SEED_RHO_BYTES: usize = 32;
    /// Size of the signing key K
    const SEED_KEY_BYTES: usize = 32;
    /// Master seed size for key generation
    const SEED_ZETA_BYTES: usize = 32;
    /// Seed size for secret sampling (rho')
    const SEED_RHO_PRIME_BYTES: usize = 64;
    /// Challenge hash size, lambda / 4
    const SEED_C_TILDE_BYTES: usize = Self::LAMBDA / 4;
    /// Hash output size for tr = H(pk)
    const HASH_TR_BYTES: usize = 64;
    /// Message representative size
    const MU_BYTES: usize = 64;
    /// Per-signature randomness for the hedged variant
    const RND_BYTES: usize = 32;

    // Packing widths
    /// Bits per packed t1 coefficient
    const T1_BITS: usize = 10;
    /// Bits per packed t0 coefficient
    const T0_BITS: usize = 13;
    /// Bits for packing w1 coefficients
    const W1_BITS: usize;

    // Additional parameters
    /// Maximum signing attempts
    const MAX_SIGN_ABORTS: u16 = 1000;
}

/// ML-DSA-44 (Dilithium2, NIST security category 2)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MlDsa44Params;

impl DilithiumParams for MlDsa44Params {
    const NAME: &'static str = "ML-DSA-44";
    const K_DIM: usize = 4;
    const L_DIM: usize = 4;
    const ETA_S1S2: u32 = 2;
    const ETA_BITS: usize = 3;
    const GAMMA1_PARAM: u32 = 1 << 17;
    const GAMMA1_BITS: usize = 18;
    const GAMMA2_PARAM: u32 = (DILITHIUM_Q - 1) / 88;
    const BETA_PARAM: u32 = 78;
    const OMEGA_PARAM: u32 = 80;
    const TAU_PARAM: usize = 39;
    const LAMBDA: usize = 128;
    const PUBLIC_KEY_BYTES: usize = 1312;
    const SECRET_KEY_BYTES: usize = 2560;
    const SIGNATURE_SIZE: usize = 2420;
    const W1_BITS: usize = 6;
}

/// ML-DSA-65 (Dilithium3, NIST security category 3)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MlDsa65Params;

impl DilithiumParams for MlDsa65Params {
    const NAME: &'static str = "ML-DSA-65";
    const K_DIM: usize = 6;
    const L_DIM: usize = 5;
    const ETA_S1S2: u32 = 4;
    const ETA_BITS: usize = 4;
    const GAMMA1_PARAM: u32 = 1 << 19;
    const GAMMA1_BITS: usize = 20;
    const GAMMA2_PARAM: u32 = (DILITHIUM_Q - 1) / 32;
    const BETA_PARAM: u32 = 196;
    const OMEGA_PARAM: u32 = 55;
    const TAU_PARAM: usize = 49;
    const LAMBDA: usize = 192;
    const PUBLIC_KEY_BYTES: usize = 1952;
    const SECRET_KEY_BYTES: usize = 4032;
    const SIGNATURE_SIZE: usize = 3309;
    const W1_BITS: usize = 4;
}

/// ML-DSA-87 (Dilithium5, NIST security category 5)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MlDsa87Params;

impl DilithiumParams for MlDsa87Params {
    const NAME: &'static str = "ML-DSA-87";
    const K_DIM: usize = 8;
    const L_DIM: usize = 7;
    const ETA_S1S2: u32 = 2;
    const ETA_BITS: usize = 3;
    const GAMMA1_PARAM: u32 = 1 << 19;
    const GAMMA1_BITS: usize = 20;
    const GAMMA2_PARAM: u32 = (DILITHIUM_Q - 1) / 32;
    const BETA_PARAM: u32 = 120;
    const OMEGA_PARAM: u32 = 75;
    const TAU_PARAM: usize = 60;
    const LAMBDA: usize = 256;
    const PUBLIC_KEY_BYTES: usize = 2592;
    const SECRET_KEY_BYTES: usize = 4896;
    const SIGNATURE_SIZE: usize = 4627;
    const W1_BITS: usize = 4;
}

/// Round-3 name for ML-DSA-44
pub type Dilithium2Params = MlDsa44Params;
/// Round-3 name for ML-DSA-65
pub type Dilithium3Params = MlDsa65Params;
/// Round-3 name for ML-DSA-87
pub type Dilithium5Params = MlDsa87Params;
