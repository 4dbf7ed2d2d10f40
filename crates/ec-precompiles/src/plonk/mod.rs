//! PlonK proof verification over BW6-761 with KZG commitments
//!
//! The precompile input is a proof bundle, `proof ‖ verifying key ‖ public
//! witness`. Each object is self-delimiting, so the bundle is read front to
//! back and must be consumed exactly.

pub mod circuit;
pub mod key;
pub mod kzg;
pub mod proof;
pub mod prover;
pub mod transcript;
pub mod verifier;
pub mod witness;

pub use circuit::{circuits, Assignment, ConstraintSystem, Selectors, Variable};
pub use key::{VerifyingKey, VK_SIZE};
pub use kzg::{KzgVerifyingKey, Srs};
pub use proof::{Proof, ProofEvaluations, PROOF_SIZE};
pub use prover::{prove, setup, ProvingKey};
pub use verifier::verify;
pub use witness::PublicWitness;

use crate::codec::ByteReader;
use crate::errors::{VerifyError, WitnessError};

/// Proof, verifying key and public witness, as carried by a precompile call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofBundle {
    pub proof: Proof,
    pub vk: VerifyingKey,
    pub witness: PublicWitness,
}

impl ProofBundle {
    pub fn new(proof: Proof, vk: VerifyingKey, witness: PublicWitness) -> Self {
        Self { proof, vk, witness }
    }

    /// Parse a bundle. The first failing object is named in the error.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, VerifyError> {
        let mut reader = ByteReader::new(bytes);
        let proof = Proof::read(&mut reader)?;
        let vk = VerifyingKey::read(&mut reader)?;
        let witness = PublicWitness::read(&mut reader)?;

        if reader.remaining() != 0 {
            return Err(WitnessError::TrailingBytes(reader.remaining()).into());
        }
        Ok(Self { proof, vk, witness })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = self.proof.to_bytes();
        out.extend_from_slice(&self.vk.to_bytes());
        out.extend_from_slice(&self.witness.to_bytes());
        out
    }

    pub fn verify(&self) -> Result<(), VerifyError> {
        verify(&self.vk, &self.proof, &self.witness.values)
    }
}

/// Verifies serialized proof bundles for the PlonK precompile.
pub trait ProofVerifier: Send + Sync {
    fn verify_bundle(&self, bundle: &[u8]) -> Result<(), VerifyError>;
}

/// PlonK over BW6-761 with KZG, Keccak256 transcript
#[derive(Debug, Default, Clone, Copy)]
pub struct PlonkBw6761Verifier;

impl ProofVerifier for PlonkBw6761Verifier {
    fn verify_bundle(&self, bundle: &[u8]) -> Result<(), VerifyError> {
        let bundle = ProofBundle::from_bytes(bundle).inspect_err(|e| {
            log::error!("Proof verification: {e}");
        })?;

        bundle.verify().inspect_err(|e| {
            log::error!("Proof verification: Verifying proof: {e}");
        })?;

        log::debug!("Proof verification successful");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{KeyError, ProofError};
    use ark_bw6_761::Fr;

    fn square_bundle(x: u64) -> ProofBundle {
        let (cs, assignment) = circuits::square(Fr::from(x));
        let srs = Srs::insecure_from_tau(Fr::from(424242u64), 16);
        let (pk, vk) = setup(&cs, &srs).unwrap();
        let (proof, witness) = prove(&pk, &assignment).unwrap();
        ProofBundle::new(proof, vk, witness)
    }

    #[test]
    fn test_bundle_layout() {
        let bundle = square_bundle(4);
        let bytes = bundle.to_bytes();
        assert_eq!(bytes.len(), PROOF_SIZE + VK_SIZE + 12 + 48);
        assert_eq!(ProofBundle::from_bytes(&bytes).unwrap(), bundle);
    }

    #[test]
    fn test_bundle_verifies() {
        let bytes = square_bundle(4).to_bytes();
        PlonkBw6761Verifier.verify_bundle(&bytes).unwrap();
    }

    #[test]
    fn test_failing_object_is_named() {
        let bytes = square_bundle(4).to_bytes();

        let err = PlonkBw6761Verifier
            .verify_bundle(&bytes[..PROOF_SIZE - 10])
            .unwrap_err();
        assert!(matches!(err, VerifyError::Proof(ProofError::Codec(_))));
        assert!(err.to_string().starts_with("Reading proof"));

        let err = PlonkBw6761Verifier
            .verify_bundle(&bytes[..PROOF_SIZE + 100])
            .unwrap_err();
        assert!(matches!(err, VerifyError::Key(KeyError::Codec(_))));

        let err = PlonkBw6761Verifier
            .verify_bundle(&bytes[..bytes.len() - 1])
            .unwrap_err();
        assert!(matches!(err, VerifyError::Witness(_)));
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let mut bytes = square_bundle(4).to_bytes();
        bytes.extend_from_slice(&[0, 0]);
        assert_eq!(
            ProofBundle::from_bytes(&bytes),
            Err(VerifyError::Witness(WitnessError::TrailingBytes(2)))
        );
    }

    #[test]
    fn test_wrong_witness_fails_verification() {
        let mut bundle = square_bundle(4);
        bundle.witness.values[0] = Fr::from(17u64);
        assert_eq!(
            PlonkBw6761Verifier.verify_bundle(&bundle.to_bytes()),
            Err(VerifyError::VerificationFailed)
        );
    }
}
