//! End-to-end PlonK verification through the `0x85` precompile
//!
//! Bundles are produced with the development prover and an insecure SRS.

use ark_bw6_761::Fr;
use ark_std::rand::{rngs::StdRng, SeedableRng};
use ec_precompiles::errors::{VerifyError, WitnessError};
use ec_precompiles::plonk::{
    circuits, prove, setup, Assignment, ConstraintSystem, ProofBundle, Srs, PROOF_SIZE, VK_SIZE,
};
use ec_precompiles::{
    CallContext, GasSchedule, PrecompileError, PrecompileSet, PLONK_VERIFY_ADDRESS,
};

fn bundle_for(circuit: (ConstraintSystem, Assignment)) -> Vec<u8> {
    let (cs, assignment) = circuit;
    let mut rng = StdRng::seed_from_u64(7);
    let srs = Srs::insecure_random(32, &mut rng);
    let (pk, vk) = setup(&cs, &srs).unwrap();
    let (proof, witness) = prove(&pk, &assignment).unwrap();
    ProofBundle::new(proof, vk, witness).to_bytes()
}

fn verify_call(input: &[u8]) -> Result<Vec<u8>, PrecompileError> {
    PrecompileSet::bw6_761(&GasSchedule::default())
        .call(&CallContext::default(), &PLONK_VERIFY_ADDRESS, input, u64::MAX)
        .unwrap()
        .map(|out| out.output)
        .map_err(|failure| failure.error)
}

#[test]
fn test_valid_bundle_returns_empty_output() {
    let bundle = bundle_for(circuits::square(Fr::from(3u64)));
    println!("Bundle size: {} bytes", bundle.len());
    assert_eq!(verify_call(&bundle).unwrap(), Vec::<u8>::new());

    let bundle = bundle_for(circuits::cubic(Fr::from(11u64)));
    assert_eq!(verify_call(&bundle).unwrap(), Vec::<u8>::new());
}

#[test]
fn test_byte_flips_in_proof_are_rejected() {
    let bundle = bundle_for(circuits::square(Fr::from(3u64)));

    // Sample positions across every commitment and evaluation
    for pos in (0..PROOF_SIZE).step_by(37) {
        let mut tampered = bundle.clone();
        tampered[pos] ^= 0x01;
        let err = verify_call(&tampered).unwrap_err();
        assert!(
            err.is_curve_or_verification_failure(),
            "flip at {pos}: {err}"
        );
    }
}

#[test]
fn test_wrong_public_input_is_rejected() {
    let mut bundle = bundle_for(circuits::square(Fr::from(3u64)));
    // Last byte of the only public input: 9 becomes 8
    let last = bundle.len() - 1;
    bundle[last] ^= 0x01;
    assert_eq!(
        verify_call(&bundle),
        Err(PrecompileError::Verify(VerifyError::VerificationFailed))
    );
}

#[test]
fn test_truncated_and_padded_bundles() {
    let bundle = bundle_for(circuits::square(Fr::from(3u64)));

    let err = verify_call(&bundle[..PROOF_SIZE + VK_SIZE]).unwrap_err();
    assert!(matches!(err, PrecompileError::Verify(VerifyError::Witness(_))));

    let mut padded = bundle.clone();
    padded.push(0);
    assert_eq!(
        verify_call(&padded),
        Err(PrecompileError::Verify(VerifyError::Witness(
            WitnessError::TrailingBytes(1)
        )))
    );

    let err = verify_call(&[]).unwrap_err();
    assert!(matches!(err, PrecompileError::Verify(VerifyError::Proof(_))));
}

#[test]
fn test_failed_verification_keeps_charge() {
    let set = PrecompileSet::bw6_761(&GasSchedule::default().with_plonk_verify(1_000));
    let failure = set
        .call(&CallContext::default(), &PLONK_VERIFY_ADDRESS, &[0u8; 64], 1_500)
        .unwrap()
        .unwrap_err();
    assert_eq!(failure.remaining_gas, 500);
}
