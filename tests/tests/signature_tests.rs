//! End-to-end signature tests across all ML-DSA parameter sets

use latsig_api::{Signature, SignatureDerive, SignatureSerialize, Verdict};
use latsig_sign::pq::dilithium::{open, sign_attached, sign_with_context, verify_with_context};
use latsig_sign::{MlDsa44, MlDsa65, MlDsa87};
use latsig_tests::fixtures::{flip_bit, seeded, CountingEntropy};

macro_rules! signature_suite {
    ($module:ident, $scheme:ty, $params:ty, $pk:expr, $sk:expr, $sig:expr) => {
        mod $module {
            use super::*;

            type S = $scheme;

            #[test]
            fn sizes_match_parameter_set() {
                assert_eq!(S::PUBLIC_KEY_SIZE, $pk);
                assert_eq!(S::SECRET_KEY_SIZE, $sk);
                assert_eq!(S::SIGNATURE_SIZE, $sig);

                let (pk, sk) = S::keypair(&mut seeded(1)).unwrap();
                assert_eq!(S::serialize_public_key(&pk).len(), $pk);
                assert_eq!(S::serialize_secret_key(&sk).len(), $sk);
                assert_eq!(S::serialize_signature(&S::sign(b"m", &sk).unwrap()).len(), $sig);
            }

            #[test]
            fn sign_verify_through_serialized_keys() {
                let (pk, sk) = S::keypair(&mut seeded(2)).unwrap();
                let pk_bytes = S::serialize_public_key(&pk);
                let sk_bytes = S::serialize_secret_key(&sk);

                let sk2 = S::deserialize_secret_key(&sk_bytes).unwrap();
                let pk2 = S::deserialize_public_key(&pk_bytes).unwrap();

                let message = b"transported keys still work";
                let sig_bytes = S::serialize_signature(&S::sign(message, &sk2).unwrap());
                let sig = S::deserialize_signature(&sig_bytes).unwrap();
                assert_eq!(S::verify(message, &sig, &pk2), Verdict::Accept);
            }

            #[test]
            fn keypair_and_hedged_sign_draw_32_bytes() {
                let mut entropy = CountingEntropy::new(seeded(3));
                let (_, sk) = S::keypair(&mut entropy).unwrap();
                assert_eq!(entropy.total_bytes(), 32);

                S::sign_hedged(b"msg", &sk, &mut entropy).unwrap();
                assert_eq!(entropy.requests, vec![32, 32]);

                // Deterministic signing never touches the source
                S::sign(b"msg", &sk).unwrap();
                assert_eq!(entropy.requests.len(), 2);
            }

            #[test]
            fn every_signature_region_is_bound() {
                let (pk, sk) = S::derive_keypair(&[9u8; 32]).unwrap();
                let message = b"region check";
                let sig = S::sign(message, &sk).unwrap();
                let bytes = S::serialize_signature(&sig);

                let bits = bytes.len() * 8;
                for bit in [0, 100, bits / 3, bits / 2, bits - 9, bits - 1] {
                    let tampered = S::deserialize_signature(&flip_bit(&bytes, bit)).unwrap();
                    assert!(
                        S::verify(message, &tampered, &pk).is_reject(),
                        "flipping bit {} was accepted",
                        bit
                    );
                }
            }

            #[test]
            fn context_separation() {
                let (pk, sk) = S::derive_keypair(&[4u8; 32]).unwrap();
                let sig = sign_with_context::<$params>(&sk, b"payload", b"ctx-a").unwrap();
                assert!(verify_with_context::<$params>(&pk, b"payload", b"ctx-a", &sig).is_accept());
                assert!(verify_with_context::<$params>(&pk, b"payload", b"ctx-b", &sig).is_reject());
            }

            #[test]
            fn attached_round_trip() {
                let (pk, sk) = S::derive_keypair(&[5u8; 32]).unwrap();
                let signed = sign_attached::<$params>(&sk, b"attached").unwrap();
                assert_eq!(open::<$params>(&pk, &signed).unwrap(), b"attached".to_vec());
            }

            #[test]
            fn derived_public_key_matches() {
                let (pk, sk) = S::keypair(&mut seeded(6)).unwrap();
                assert_eq!(S::derive_public_key(&sk).unwrap(), pk);
            }
        }
    };
}

signature_suite!(mldsa44, MlDsa44, latsig_params::MlDsa44Params, 1312, 2560, 2420);
signature_suite!(mldsa65, MlDsa65, latsig_params::MlDsa65Params, 1952, 4032, 3309);
signature_suite!(mldsa87, MlDsa87, latsig_params::MlDsa87Params, 2592, 4896, 4627);

#[test]
fn signatures_do_not_cross_parameter_sets() {
    let (pk44, _) = MlDsa44::derive_keypair(&[1u8; 32]).unwrap();
    let (_, sk87) = MlDsa87::derive_keypair(&[1u8; 32]).unwrap();
    let sig = MlDsa87::sign(b"m", &sk87).unwrap();
    // Reinterpret the bytes as an ML-DSA-44 signature of the wrong length
    let foreign = latsig_sign::DilithiumSignatureData::from_bytes(sig.as_ref());
    assert!(MlDsa44::verify(b"m", &foreign, &pk44).is_reject());
}

#[test]
fn large_message_round_trip() {
    let _ = env_logger::builder().is_test(true).try_init();
    let (pk, sk) = MlDsa65::keypair(&mut seeded(7)).unwrap();
    let message: Vec<u8> = (0..3_000_000u32).map(|i| (i % 251) as u8).collect();
    let sig = MlDsa65::sign(&message, &sk).unwrap();
    assert!(MlDsa65::verify(&message, &sig, &pk).is_accept());

    let mut altered = message.clone();
    altered[2_999_999] ^= 1;
    assert!(MlDsa65::verify(&altered, &sig, &pk).is_reject());
}

#[test]
fn known_names() {
    assert_eq!(MlDsa44::name(), "ML-DSA-44");
    assert_eq!(MlDsa65::name(), "ML-DSA-65");
    assert_eq!(MlDsa87::name(), "ML-DSA-87");
}
