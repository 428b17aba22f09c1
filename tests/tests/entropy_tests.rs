//! Entropy source behaviour as seen through key generation and signing

use latsig_api::{EntropySource, Error, OsEntropy, RngEntropy, Signature, SignatureDerive};
use latsig_sign::{MlDsa44, MlDsa65};
use latsig_tests::fixtures::{seeded, CountingEntropy, FailingEntropy, ReplayEntropy};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn failing_source_aborts_keypair_without_output() {
    let mut source = FailingEntropy::default();
    match MlDsa44::keypair(&mut source) {
        Err(Error::EntropyError { context, .. }) => assert_eq!(context, "FailingEntropy"),
        Err(other) => panic!("expected an entropy error, got {}", other),
        Ok(_) => panic!("keypair produced without entropy"),
    }
    assert_eq!(source.calls, 1);
}

#[test]
fn failing_source_aborts_hedged_signing() {
    let (_, sk) = MlDsa65::derive_keypair(&[3u8; 32]).unwrap();
    let err = MlDsa65::sign_hedged(b"msg", &sk, &mut FailingEntropy::default()).unwrap_err();
    assert!(err.is_entropy());
}

#[test]
fn keypair_is_a_function_of_the_drawn_seed() {
    let seed = [0x5Au8; 32];
    let (pk_a, _) = MlDsa44::keypair(&mut ReplayEntropy::new(&seed)).unwrap();
    let (pk_b, _) = MlDsa44::derive_keypair(&seed).unwrap();
    assert_eq!(pk_a, pk_b);
}

#[test]
fn seeded_sources_reproduce_keys() {
    let (pk_a, _) = MlDsa44::keypair(&mut seeded(99)).unwrap();
    let (pk_b, _) = MlDsa44::keypair(&mut seeded(99)).unwrap();
    let (pk_c, _) = MlDsa44::keypair(&mut seeded(100)).unwrap();
    assert_eq!(pk_a, pk_b);
    assert_ne!(pk_a, pk_c);
}

#[test]
fn hedged_randomness_changes_signature_not_validity() {
    let (pk, sk) = MlDsa44::derive_keypair(&[1u8; 32]).unwrap();
    let sig_a = MlDsa44::sign_hedged(b"msg", &sk, &mut ReplayEntropy::new(&[1u8; 32])).unwrap();
    let sig_b = MlDsa44::sign_hedged(b"msg", &sk, &mut ReplayEntropy::new(&[2u8; 32])).unwrap();
    let sig_a2 = MlDsa44::sign_hedged(b"msg", &sk, &mut ReplayEntropy::new(&[1u8; 32])).unwrap();

    assert_ne!(sig_a, sig_b);
    assert_eq!(sig_a, sig_a2);
    assert!(MlDsa44::verify(b"msg", &sig_a, &pk).is_accept());
    assert!(MlDsa44::verify(b"msg", &sig_b, &pk).is_accept());
}

#[test]
fn zero_randomness_matches_deterministic_signing() {
    let (_, sk) = MlDsa44::derive_keypair(&[8u8; 32]).unwrap();
    let hedged = MlDsa44::sign_hedged(b"msg", &sk, &mut ReplayEntropy::new(&[0u8; 32])).unwrap();
    assert_eq!(hedged, MlDsa44::sign(b"msg", &sk).unwrap());
}

#[test]
fn trait_objects_and_references_are_accepted() {
    let mut inner = RngEntropy::new(StdRng::seed_from_u64(7));
    let dynamic: &mut dyn EntropySource = &mut inner;
    let (pk, sk) = MlDsa44::keypair(dynamic).unwrap();

    let mut counted = CountingEntropy::new(&mut inner);
    let sig = MlDsa44::sign_hedged(b"dyn", &sk, &mut counted).unwrap();
    assert_eq!(counted.total_bytes(), 32);
    assert!(MlDsa44::verify(b"dyn", &sig, &pk).is_accept());
}

#[test]
fn os_entropy_produces_working_keys() {
    let (pk, sk) = MlDsa44::keypair(&mut OsEntropy).unwrap();
    let sig = MlDsa44::sign_hedged(b"os", &sk, &mut OsEntropy).unwrap();
    assert!(MlDsa44::verify(b"os", &sig, &pk).is_accept());
}
