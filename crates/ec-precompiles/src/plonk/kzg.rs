//! KZG commitments over BW6-761
//!
//! The structured reference string here is generated from a known `τ` and is
//! for development and tests only. Production keys come from a ceremony.

use ark_bw6_761::{Fr, G1Affine, G1Projective, G2Affine};
use ark_ec::{AffineRepr, CurveGroup, VariableBaseMSM};
use ark_ff::{One, UniformRand};
use ark_poly::univariate::DensePolynomial;
use ark_std::rand::Rng;

use crate::errors::ProverError;

/// Verifier side of the KZG setup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KzgVerifyingKey {
    /// G1 generator
    pub g1: G1Affine,
    /// G2 generator
    pub g2: G2Affine,
    /// `[τ]G2`
    pub tau_g2: G2Affine,
}

/// Powers of `τ` in G1 plus the verifier key
#[derive(Debug, Clone)]
pub struct Srs {
    powers_g1: Vec<G1Affine>,
    vk: KzgVerifyingKey,
}

impl Srs {
    /// `[τ⁰]G1 … [τ^{num_powers-1}]G1`. Insecure: whoever knows `τ` can forge proofs.
    pub fn insecure_from_tau(tau: Fr, num_powers: usize) -> Self {
        let g1 = G1Affine::generator();
        let g2 = G2Affine::generator();

        let mut powers = Vec::with_capacity(num_powers);
        let mut current = Fr::one();
        for _ in 0..num_powers {
            powers.push(g1 * current);
            current *= tau;
        }

        Self {
            powers_g1: G1Projective::normalize_batch(&powers),
            vk: KzgVerifyingKey {
                g1,
                g2,
                tau_g2: (g2 * tau).into_affine(),
            },
        }
    }

    /// Same as [`Srs::insecure_from_tau`] with a `τ` drawn from `rng` and dropped.
    pub fn insecure_random<R: Rng>(num_powers: usize, rng: &mut R) -> Self {
        Self::insecure_from_tau(Fr::rand(rng), num_powers)
    }

    pub fn num_powers(&self) -> usize {
        self.powers_g1.len()
    }

    pub fn verifying_key(&self) -> KzgVerifyingKey {
        self.vk
    }

    /// `[p(τ)]G1`
    pub fn commit(&self, poly: &DensePolynomial<Fr>) -> Result<G1Affine, ProverError> {
        let coeffs = &poly.coeffs;
        if coeffs.len() > self.powers_g1.len() {
            return Err(ProverError::SrsTooSmall {
                needed: coeffs.len(),
                available: self.powers_g1.len(),
            });
        }
        let bases = &self.powers_g1[..coeffs.len()];
        Ok(G1Projective::msm_unchecked(bases, coeffs).into_affine())
    }
}
