//! Property-based tests for ML-DSA and the polynomial engine underneath it

use latsig_algorithms::poly::prelude::*;
use latsig_api::{Signature, SignatureDerive, SignatureSerialize};
use latsig_sign::pq::dilithium::{sign_with_context, verify_with_context, MAX_CONTEXT_BYTES};
use latsig_sign::{MlDsa44, MlDsa65, MlDsa87};
use latsig_tests::fixtures::{flip_bit, ReplayEntropy};
use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

type Poly = Polynomial<DilithiumModulus>;

fn message() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=512)
}

fn ring_poly() -> impl Strategy<Value = Poly> {
    prop::collection::vec(0..DilithiumModulus::Q, 256)
        .prop_map(|coeffs| Poly::from_coeffs(&coeffs).unwrap())
}

fn small_poly(bound: i32) -> impl Strategy<Value = Poly> {
    prop::collection::vec(-bound..=bound, 256)
        .prop_map(|coeffs| Poly::from_centered(&coeffs).unwrap())
}

proptest! {
    // Key generation and signing dominate the runtime; keep case counts low
    #![proptest_config(ProptestConfig::with_cases(12))]

    #[test]
    fn mldsa44_sign_verify_roundtrip(seed in any::<[u8; 32]>(), msg in message()) {
        let (pk, sk) = MlDsa44::derive_keypair(&seed).unwrap();
        let sig = MlDsa44::sign(&msg, &sk).unwrap();
        prop_assert!(MlDsa44::verify(&msg, &sig, &pk).is_accept());
    }

    #[test]
    fn mldsa65_hedged_roundtrip(seed in any::<[u8; 32]>(), rnd in any::<[u8; 32]>(), msg in message()) {
        let (pk, sk) = MlDsa65::derive_keypair(&seed).unwrap();
        let sig = MlDsa65::sign_hedged(&msg, &sk, &mut ReplayEntropy::new(&rnd)).unwrap();
        prop_assert!(MlDsa65::verify(&msg, &sig, &pk).is_accept());
    }

    #[test]
    fn mldsa87_roundtrip_with_context(
        seed in any::<[u8; 32]>(),
        msg in message(),
        ctx in prop::collection::vec(any::<u8>(), 0..=MAX_CONTEXT_BYTES),
    ) {
        let (pk, sk) = MlDsa87::derive_keypair(&seed).unwrap();
        let sig = sign_with_context::<latsig_params::MlDsa87Params>(&sk, &msg, &ctx).unwrap();
        prop_assert!(verify_with_context::<latsig_params::MlDsa87Params>(&pk, &msg, &ctx, &sig).is_accept());
    }

    #[test]
    fn any_signature_bit_flip_is_rejected(
        seed in any::<[u8; 32]>(),
        msg in message(),
        bit in 0usize..(2420 * 8),
    ) {
        let (pk, sk) = MlDsa44::derive_keypair(&seed).unwrap();
        let sig = MlDsa44::serialize_signature(&MlDsa44::sign(&msg, &sk).unwrap());
        let tampered = MlDsa44::deserialize_signature(&flip_bit(&sig, bit)).unwrap();
        prop_assert!(MlDsa44::verify(&msg, &tampered, &pk).is_reject());
    }

    #[test]
    fn any_message_bit_flip_is_rejected(
        seed in any::<[u8; 32]>(),
        msg in prop::collection::vec(any::<u8>(), 1..=256),
        bit_seed in any::<usize>(),
    ) {
        let (pk, sk) = MlDsa44::derive_keypair(&seed).unwrap();
        let sig = MlDsa44::sign(&msg, &sk).unwrap();
        let altered = flip_bit(&msg, bit_seed % (msg.len() * 8));
        prop_assert!(MlDsa44::verify(&altered, &sig, &pk).is_reject());
    }

    #[test]
    fn signing_is_deterministic(seed in any::<[u8; 32]>(), msg in message()) {
        let (_, sk) = MlDsa44::derive_keypair(&seed).unwrap();
        prop_assert_eq!(MlDsa44::sign(&msg, &sk).unwrap(), MlDsa44::sign(&msg, &sk).unwrap());
    }

    #[test]
    fn signatures_do_not_verify_under_other_keys(
        seed_a in any::<[u8; 32]>(),
        seed_b in any::<[u8; 32]>(),
        msg in message(),
    ) {
        prop_assume!(seed_a != seed_b);
        let (_, sk_a) = MlDsa44::derive_keypair(&seed_a).unwrap();
        let (pk_b, _) = MlDsa44::derive_keypair(&seed_b).unwrap();
        let sig = MlDsa44::sign(&msg, &sk_a).unwrap();
        prop_assert!(MlDsa44::verify(&msg, &sig, &pk_b).is_reject());
    }

    #[test]
    fn arbitrary_signature_bytes_are_rejected(
        seed in any::<[u8; 32]>(),
        junk in prop::collection::vec(any::<u8>(), 2420),
    ) {
        let (pk, _) = MlDsa44::derive_keypair(&seed).unwrap();
        let sig = MlDsa44::deserialize_signature(&junk).unwrap();
        prop_assert!(MlDsa44::verify(b"anything", &sig, &pk).is_reject());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn ntt_product_matches_schoolbook(a in ring_poly(), b in ring_poly()) {
        prop_assert_eq!(a.mul_ntt(&b).unwrap(), a.schoolbook_mul(&b));
    }

    #[test]
    fn ntt_product_is_commutative(a in ring_poly(), b in small_poly(4)) {
        prop_assert_eq!(a.mul_ntt(&b).unwrap(), b.mul_ntt(&a).unwrap());
    }

    #[test]
    fn packing_recovers_short_coefficients(p in small_poly(4)) {
        // Offset into [0, 8] the way secret coefficients are stored
        let mut shifted = Poly::zero();
        for i in 0..256 {
            shifted.coeffs[i] = (4 - p.centered(i)) as u32;
        }
        let bytes = <DefaultCoefficientSerde as CoefficientPacker<DilithiumModulus>>::pack_coeffs(&shifted, 4).unwrap();
        prop_assert_eq!(bytes.len(), 128);
        let back = <DefaultCoefficientSerde as CoefficientUnpacker<DilithiumModulus>>::unpack_coeffs(&bytes, 4).unwrap();
        prop_assert_eq!(back, shifted);
    }

    #[test]
    fn infinity_norm_bounds_centered_coefficients(p in small_poly(1000)) {
        let norm = p.infinity_norm();
        prop_assert!(norm <= 1000);
        prop_assert!(p.norm_lt(norm + 1));
        prop_assert!(norm == 0 || !p.norm_lt(norm));
    }
}

/// Which encoded input a flip lands in
#[derive(Debug, Clone, Copy)]
enum FlipTarget {
    PublicKey,
    Message,
    Signature,
}

#[test]
fn random_single_bit_flips_never_verify() {
    const FLIPS: usize = 10_000;

    let mut rng = ChaCha20Rng::seed_from_u64(0x00F1_1B17);
    let (pk, sk) = MlDsa44::derive_keypair(&[0x42; 32]).unwrap();
    let msg: Vec<u8> = (0..96u32).map(|i| (i * 7 + 3) as u8).collect();
    let sig = MlDsa44::sign(&msg, &sk).unwrap();
    assert!(MlDsa44::verify(&msg, &sig, &pk).is_accept());

    let pk_bytes = MlDsa44::serialize_public_key(&pk);
    let sig_bytes = MlDsa44::serialize_signature(&sig);

    let mut accepted = Vec::new();
    for _ in 0..FLIPS {
        let target = match rng.gen_range(0..3u8) {
            0 => FlipTarget::PublicKey,
            1 => FlipTarget::Message,
            _ => FlipTarget::Signature,
        };
        let verdict = match target {
            FlipTarget::PublicKey => {
                let bit = rng.gen_range(0..pk_bytes.len() * 8);
                let pk2 = MlDsa44::deserialize_public_key(&flip_bit(&pk_bytes, bit)).unwrap();
                (bit, MlDsa44::verify(&msg, &sig, &pk2))
            }
            FlipTarget::Message => {
                let bit = rng.gen_range(0..msg.len() * 8);
                (bit, MlDsa44::verify(&flip_bit(&msg, bit), &sig, &pk))
            }
            FlipTarget::Signature => {
                let bit = rng.gen_range(0..sig_bytes.len() * 8);
                let sig2 = MlDsa44::deserialize_signature(&flip_bit(&sig_bytes, bit)).unwrap();
                (bit, MlDsa44::verify(&msg, &sig2, &pk))
            }
        };
        if verdict.1.is_accept() {
            accepted.push((target, verdict.0));
        }
    }
    assert!(accepted.is_empty(), "accepted after flips: {:?}", accepted);
}

#[test]
fn signature_verifies_under_no_other_key() {
    let (pk, sk) = MlDsa44::derive_keypair(&[0x11; 32]).unwrap();
    let msg = b"bound to exactly one key";
    let sig = MlDsa44::sign(msg, &sk).unwrap();
    assert!(MlDsa44::verify(msg, &sig, &pk).is_accept());

    let mut rng = ChaCha20Rng::seed_from_u64(0x0C05_5EED);
    for _ in 0..256 {
        let seed: [u8; 32] = rng.gen();
        if seed == [0x11; 32] {
            continue;
        }
        let (other, _) = MlDsa44::derive_keypair(&seed).unwrap();
        assert!(
            MlDsa44::verify(msg, &sig, &other).is_reject(),
            "accepted under key seed {:02x?}",
            seed
        );
    }
}
