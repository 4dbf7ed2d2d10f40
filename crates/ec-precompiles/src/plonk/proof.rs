//! PlonK proof
//!
//! ## Binary format (2016 bytes, big-endian)
//!
//! 1. Commitments `[a] [b] [c] [z] [t] [W_ζ] [W_ζω]`: 7 × 192 bytes
//! 2. Evaluations at ζ: `ā b̄ c̄ s̄σ1 s̄σ2 s̄σ3 q̄L q̄R q̄O q̄M q̄C z̄`, then `z̄ω` at ζω,
//!    then `t̄`: 14 × 48 bytes

use ark_bw6_761::{Fr, G1Affine};
use ark_ec::AffineRepr;

use crate::codec::{put_point, put_scalar_field, ByteReader};
use crate::curve::ensure_in_subgroup;
use crate::errors::{Group, ProofError};
use crate::types::{AFFINE_POINT_SIZE, SCALAR_FIELD_SIZE};

/// Number of G1 commitments in a proof
pub const NUM_PROOF_COMMITMENTS: usize = 7;

/// Number of opening evaluations in a proof
pub const NUM_PROOF_EVALUATIONS: usize = 14;

pub const PROOF_SIZE: usize =
    NUM_PROOF_COMMITMENTS * AFFINE_POINT_SIZE + NUM_PROOF_EVALUATIONS * SCALAR_FIELD_SIZE;

/// Polynomial openings carried by the proof
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProofEvaluations {
    pub a: Fr,
    pub b: Fr,
    pub c: Fr,
    pub s_sigma: [Fr; 3],
    pub q_l: Fr,
    pub q_r: Fr,
    pub q_o: Fr,
    pub q_m: Fr,
    pub q_c: Fr,
    pub z: Fr,
    /// `z(ζω)`
    pub z_omega: Fr,
    pub t: Fr,
}

impl ProofEvaluations {
    /// Serialization order
    pub fn to_array(&self) -> [Fr; NUM_PROOF_EVALUATIONS] {
        [
            self.a,
            self.b,
            self.c,
            self.s_sigma[0],
            self.s_sigma[1],
            self.s_sigma[2],
            self.q_l,
            self.q_r,
            self.q_o,
            self.q_m,
            self.q_c,
            self.z,
            self.z_omega,
            self.t,
        ]
    }

    pub fn from_array(values: [Fr; NUM_PROOF_EVALUATIONS]) -> Self {
        let [a, b, c, s1, s2, s3, q_l, q_r, q_o, q_m, q_c, z, z_omega, t] = values;
        Self {
            a,
            b,
            c,
            s_sigma: [s1, s2, s3],
            q_l,
            q_r,
            q_o,
            q_m,
            q_c,
            z,
            z_omega,
            t,
        }
    }
}

/// Parsed PlonK proof
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proof {
    pub a: G1Affine,
    pub b: G1Affine,
    pub c: G1Affine,
    /// Permutation accumulator
    pub z: G1Affine,
    /// Quotient
    pub t: G1Affine,
    pub w_zeta: G1Affine,
    pub w_zeta_omega: G1Affine,
    pub evals: ProofEvaluations,
}

impl Proof {
    pub fn read(reader: &mut ByteReader<'_>) -> Result<Self, ProofError> {
        let mut points = [G1Affine::identity(); NUM_PROOF_COMMITMENTS];
        for point in points.iter_mut() {
            *point = reader.read_point()?;
            ensure_in_subgroup(point, Group::G1)?;
        }

        let mut evals = [Fr::default(); NUM_PROOF_EVALUATIONS];
        for eval in evals.iter_mut() {
            *eval = reader.read_scalar_field()?;
        }

        let [a, b, c, z, t, w_zeta, w_zeta_omega] = points;
        Ok(Proof {
            a,
            b,
            c,
            z,
            t,
            w_zeta,
            w_zeta_omega,
            evals: ProofEvaluations::from_array(evals),
        })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ProofError> {
        if bytes.len() != PROOF_SIZE {
            return Err(ProofError::Codec(crate::errors::CodecError::InvalidInputLength {
                expected: PROOF_SIZE,
                actual: bytes.len(),
            }));
        }
        Self::read(&mut ByteReader::new(bytes))
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(PROOF_SIZE);
        for point in self.commitments() {
            put_point(&mut out, point);
        }
        for eval in self.evals.to_array() {
            put_scalar_field(&mut out, &eval);
        }
        out
    }

    /// Commitments in serialization order
    pub fn commitments(&self) -> [&G1Affine; NUM_PROOF_COMMITMENTS] {
        [
            &self.a,
            &self.b,
            &self.c,
            &self.z,
            &self.t,
            &self.w_zeta,
            &self.w_zeta_omega,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{CodecError, CurveError};
    use ark_ec::{AffineRepr, CurveGroup};

    fn sample_proof() -> Proof {
        let g = G1Affine::generator();
        let point = |k: u64| (g * Fr::from(k)).into_affine();
        let mut evals = [Fr::default(); NUM_PROOF_EVALUATIONS];
        for (i, eval) in evals.iter_mut().enumerate() {
            *eval = Fr::from(100 + i as u64);
        }
        Proof {
            a: point(1),
            b: point(2),
            c: point(3),
            z: point(4),
            t: point(5),
            w_zeta: point(6),
            w_zeta_omega: G1Affine::identity(),
            evals: ProofEvaluations::from_array(evals),
        }
    }

    #[test]
    fn test_proof_size() {
        assert_eq!(PROOF_SIZE, 2016);
        assert_eq!(sample_proof().to_bytes().len(), PROOF_SIZE);
    }

    #[test]
    fn test_parse_serialized_proof() {
        let proof = sample_proof();
        assert_eq!(Proof::from_bytes(&proof.to_bytes()).unwrap(), proof);
    }

    #[test]
    fn test_evaluation_order() {
        let proof = sample_proof();
        assert_eq!(proof.evals.a, Fr::from(100u64));
        assert_eq!(proof.evals.s_sigma[2], Fr::from(105u64));
        assert_eq!(proof.evals.z_omega, Fr::from(112u64));
        assert_eq!(proof.evals.t, Fr::from(113u64));
    }

    #[test]
    fn test_truncated_proof() {
        let bytes = sample_proof().to_bytes();
        assert!(matches!(
            Proof::read(&mut ByteReader::new(&bytes[..PROOF_SIZE - 1])),
            Err(ProofError::Codec(CodecError::UnexpectedEof { needed: 1 }))
        ));
    }

    #[test]
    fn test_off_curve_commitment() {
        let mut bytes = sample_proof().to_bytes();
        bytes[0] ^= 0x01;
        assert!(matches!(
            Proof::from_bytes(&bytes),
            Err(ProofError::Curve(CurveError::PointNotOnCurve(Group::G1)))
                | Err(ProofError::Codec(CodecError::InvalidFieldElementLength))
        ));
    }
}
