//! PlonK verifying key
//!
//! ## Format (2176 bytes, big-endian)
//! - [0..8]: domain_size as u64
//! - [8..16]: num_public_inputs as u64
//! - [16..64]: coset_shift (Fr)
//! - [64..1600]: 8 G1 commitments `qL qR qO qM qC Sσ1 Sσ2 Sσ3` (192 bytes each)
//! - [1600..1792]: KZG G1 generator
//! - [1792..1984]: KZG G2 generator
//! - [1984..2176]: `[τ]G2`

use ark_bw6_761::{Fr, G1Affine, G2Affine};
use ark_ec::AffineRepr;
use ark_ff::Zero;

use crate::codec::{put_point, put_scalar_field, ByteReader};
use crate::constants::{MAX_LOG2_DOMAIN_SIZE, MAX_PUBLIC_INPUTS, MIN_DOMAIN_SIZE};
use crate::curve::ensure_in_subgroup;
use crate::errors::{Group, KeyError};
use crate::plonk::kzg::KzgVerifyingKey;
use crate::plonk::transcript::Transcript;
use crate::types::{AFFINE_POINT_SIZE, SCALAR_FIELD_SIZE};

/// Number of G1 circuit commitments
pub const VK_NUM_COMMITMENTS: usize = 8;

/// Serialized verifying key size
pub const VK_SIZE: usize = 16 + SCALAR_FIELD_SIZE + (VK_NUM_COMMITMENTS + 3) * AFFINE_POINT_SIZE;

/// Parsed verifying key for a PlonK circuit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyingKey {
    /// Evaluation domain size `n`
    pub domain_size: u64,
    /// Number of public inputs `ℓ`, placed in the first `ℓ` rows
    pub num_public_inputs: u64,
    /// Coset shift; the permutation identities use `k = [1, shift, shift²]`
    pub coset_shift: Fr,
    pub q_l: G1Affine,
    pub q_r: G1Affine,
    pub q_o: G1Affine,
    pub q_m: G1Affine,
    pub q_c: G1Affine,
    pub s_sigma: [G1Affine; 3],
    pub kzg: KzgVerifyingKey,
}

impl VerifyingKey {
    /// Parse and validate a verifying key.
    pub fn read(reader: &mut ByteReader<'_>) -> Result<Self, KeyError> {
        let domain_size = reader.read_u64()?;
        let num_public_inputs = reader.read_u64()?;
        let coset_shift = reader.read_scalar_field()?;

        let mut g1 = [G1Affine::identity(); VK_NUM_COMMITMENTS + 1];
        for point in g1.iter_mut() {
            *point = reader.read_point()?;
        }
        let g2: G2Affine = reader.read_point()?;
        let tau_g2: G2Affine = reader.read_point()?;

        if !domain_size.is_power_of_two()
            || domain_size < MIN_DOMAIN_SIZE
            || domain_size.trailing_zeros() > MAX_LOG2_DOMAIN_SIZE
        {
            return Err(KeyError::InvalidDomainSize(domain_size));
        }

        if num_public_inputs > domain_size || num_public_inputs > MAX_PUBLIC_INPUTS {
            return Err(KeyError::InvalidPublicInputCount {
                count: num_public_inputs,
                domain_size,
            });
        }

        if coset_shift.is_zero() {
            return Err(KeyError::ZeroCosetShift);
        }

        for point in &g1 {
            ensure_in_subgroup(point, Group::G1)?;
        }
        ensure_in_subgroup(&g2, Group::G2)?;
        ensure_in_subgroup(&tau_g2, Group::G2)?;

        let [q_l, q_r, q_o, q_m, q_c, s1, s2, s3, generator] = g1;
        Ok(VerifyingKey {
            domain_size,
            num_public_inputs,
            coset_shift,
            q_l,
            q_r,
            q_o,
            q_m,
            q_c,
            s_sigma: [s1, s2, s3],
            kzg: KzgVerifyingKey {
                g1: generator,
                g2,
                tau_g2,
            },
        })
    }

    /// Parse a standalone key; the buffer must hold exactly [`VK_SIZE`] bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        if bytes.len() != VK_SIZE {
            return Err(KeyError::Codec(crate::errors::CodecError::InvalidInputLength {
                expected: VK_SIZE,
                actual: bytes.len(),
            }));
        }
        Self::read(&mut ByteReader::new(bytes))
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(VK_SIZE);
        out.extend_from_slice(&self.domain_size.to_be_bytes());
        out.extend_from_slice(&self.num_public_inputs.to_be_bytes());
        put_scalar_field(&mut out, &self.coset_shift);
        for point in self.commitments() {
            put_point(&mut out, point);
        }
        put_point(&mut out, &self.kzg.g1);
        put_point(&mut out, &self.kzg.g2);
        put_point(&mut out, &self.kzg.tau_g2);
        out
    }

    /// Circuit commitments in serialization order
    pub fn commitments(&self) -> [&G1Affine; VK_NUM_COMMITMENTS] {
        [
            &self.q_l,
            &self.q_r,
            &self.q_o,
            &self.q_m,
            &self.q_c,
            &self.s_sigma[0],
            &self.s_sigma[1],
            &self.s_sigma[2],
        ]
    }

    /// Permutation coset representatives `[1, shift, shift²]`
    pub fn coset_representatives(&self) -> [Fr; 3] {
        [Fr::from(1u64), self.coset_shift, self.coset_shift * self.coset_shift]
    }

    /// Bind the whole key into the transcript.
    pub fn absorb(&self, transcript: &mut Transcript) {
        transcript.append_u64(self.domain_size);
        transcript.append_u64(self.num_public_inputs);
        transcript.append_scalar(&self.coset_shift);
        for point in self.commitments() {
            transcript.append_g1(point);
        }
        transcript.append_g1(&self.kzg.g1);
        transcript.append_g2(&self.kzg.g2);
        transcript.append_g2(&self.kzg.tau_g2);
    }
}
