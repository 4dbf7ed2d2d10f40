//! PlonK verification logic
//!
//! 1. Replay the transcript to derive β, γ, α, ζ, v, u
//! 2. Check the gate and permutation identity at ζ against `t̄·Z_H(ζ)`
//! 3. Check the batched KZG openings at ζ and ζω with one pairing product

use ark_bw6_761::{Fr, G1Affine, G1Projective, BW6_761};
use ark_ec::pairing::Pairing;
use ark_ec::{CurveGroup, VariableBaseMSM};
use ark_ff::{batch_inversion, FftField, Field, One, Zero};

use crate::constants::PLONK_DOMAIN_SEP;
use crate::errors::{KeyError, VerifyError};
use crate::plonk::key::VerifyingKey;
use crate::plonk::proof::Proof;
use crate::plonk::transcript::Transcript;

/// Challenges for the verification protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Challenges {
    pub beta: Fr,
    pub gamma: Fr,
    pub alpha: Fr,
    pub zeta: Fr,
    /// Opening batching challenge
    pub v: Fr,
    /// Batching challenge for the two opening points
    pub u: Fr,
}

impl Challenges {
    /// Derive all challenges from the transcript, in protocol order.
    pub fn derive(vk: &VerifyingKey, proof: &Proof, public_inputs: &[Fr]) -> Self {
        let mut transcript = new_transcript(vk, public_inputs);

        transcript.append_g1(&proof.a);
        transcript.append_g1(&proof.b);
        transcript.append_g1(&proof.c);
        let beta = transcript.challenge();
        let gamma = transcript.challenge();

        transcript.append_g1(&proof.z);
        let alpha = transcript.challenge();

        transcript.append_g1(&proof.t);
        let zeta = transcript.challenge();

        for eval in proof.evals.to_array() {
            transcript.append_scalar(&eval);
        }
        let v = transcript.challenge();

        transcript.append_g1(&proof.w_zeta);
        transcript.append_g1(&proof.w_zeta_omega);
        let u = transcript.challenge();

        crate::dbg_fr!("beta", &beta);
        crate::dbg_fr!("gamma", &gamma);
        crate::dbg_fr!("alpha", &alpha);
        crate::dbg_fr!("zeta", &zeta);
        crate::dbg_fr!("v", &v);
        crate::dbg_fr!("u", &u);

        Challenges {
            beta,
            gamma,
            alpha,
            zeta,
            v,
            u,
        }
    }
}

/// Transcript seeded with the domain separator, the key and the public inputs.
pub(crate) fn new_transcript(vk: &VerifyingKey, public_inputs: &[Fr]) -> Transcript {
    let mut transcript = Transcript::new();
    transcript.append_bytes(PLONK_DOMAIN_SEP);
    vk.absorb(&mut transcript);
    for input in public_inputs {
        transcript.append_scalar(input);
    }
    transcript
}

/// Verify a PlonK proof
///
/// # Returns
/// * `Ok(())` if verification succeeds
/// * `Err(VerifyError)` if verification fails
pub fn verify(vk: &VerifyingKey, proof: &Proof, public_inputs: &[Fr]) -> Result<(), VerifyError> {
    if public_inputs.len() as u64 != vk.num_public_inputs {
        return Err(VerifyError::PublicInput {
            expected: vk.num_public_inputs,
            actual: public_inputs.len(),
        });
    }

    let n = vk.domain_size;
    let omega = Fr::get_root_of_unity(n).ok_or(KeyError::InvalidDomainSize(n))?;
    let ch = Challenges::derive(vk, proof, public_inputs);

    // Z_H(ζ) = ζⁿ − 1
    let zh = ch.zeta.pow([n]) - Fr::one();
    if zh.is_zero() {
        return Err(VerifyError::DegenerateChallenge);
    }

    let lagrange = lagrange_evaluations(ch.zeta, zh, omega, n, public_inputs.len().max(1));
    let l0 = lagrange[0];
    let pi = -public_inputs
        .iter()
        .zip(&lagrange)
        .map(|(x, l)| *x * l)
        .sum::<Fr>();
    crate::dbg_fr!("pi(zeta)", &pi);

    if !identity_holds(vk, proof, &ch, zh, l0, pi) {
        crate::trace!("FAILED: quotient identity");
        return Err(VerifyError::VerificationFailed);
    }

    if !openings_hold(vk, proof, &ch, omega) {
        crate::trace!("FAILED: opening pairing check");
        return Err(VerifyError::VerificationFailed);
    }

    Ok(())
}

/// `Lᵢ(ζ) = ωⁱ·Z_H(ζ) / (n·(ζ − ωⁱ))` for `i < count`. Requires `Z_H(ζ) ≠ 0`.
fn lagrange_evaluations(zeta: Fr, zh: Fr, omega: Fr, n: u64, count: usize) -> Vec<Fr> {
    let n_fr = Fr::from(n);
    let mut numerators = Vec::with_capacity(count);
    let mut denominators = Vec::with_capacity(count);

    let mut omega_i = Fr::one();
    for _ in 0..count {
        numerators.push(omega_i * zh);
        denominators.push(n_fr * (zeta - omega_i));
        omega_i *= omega;
    }

    batch_inversion(&mut denominators);
    numerators
        .into_iter()
        .zip(denominators)
        .map(|(num, inv)| num * inv)
        .collect()
}

fn identity_holds(vk: &VerifyingKey, proof: &Proof, ch: &Challenges, zh: Fr, l0: Fr, pi: Fr) -> bool {
    let e = &proof.evals;
    let (beta, gamma) = (ch.beta, ch.gamma);
    let k = vk.coset_representatives();

    let gate = e.q_l * e.a + e.q_r * e.b + e.q_o * e.c + e.q_m * e.a * e.b + e.q_c + pi;

    let wires = [e.a, e.b, e.c];
    let mut id_product = Fr::one();
    let mut sigma_product = Fr::one();
    for j in 0..3 {
        id_product *= wires[j] + beta * k[j] * ch.zeta + gamma;
        sigma_product *= wires[j] + beta * e.s_sigma[j] + gamma;
    }
    let permutation = e.z * id_product - e.z_omega * sigma_product;
    let boundary = (e.z - Fr::one()) * l0;

    let lhs = gate + ch.alpha * permutation + ch.alpha.square() * boundary;
    lhs == e.t * zh
}

/// `e(−(W_ζ + u·W_ζω), [τ]G2) · e(ζ·W_ζ + u·ζω·W_ζω + F − E·G + u·([z] − z̄ω·G), G2) == 1`
fn openings_hold(vk: &VerifyingKey, proof: &Proof, ch: &Challenges, omega: Fr) -> bool {
    let e = &proof.evals;

    let committed = [
        (proof.a, e.a),
        (proof.b, e.b),
        (proof.c, e.c),
        (vk.s_sigma[0], e.s_sigma[0]),
        (vk.s_sigma[1], e.s_sigma[1]),
        (vk.s_sigma[2], e.s_sigma[2]),
        (vk.q_l, e.q_l),
        (vk.q_r, e.q_r),
        (vk.q_o, e.q_o),
        (vk.q_m, e.q_m),
        (vk.q_c, e.q_c),
        (proof.z, e.z),
        (proof.t, e.t),
    ];

    let mut bases: Vec<G1Affine> = Vec::with_capacity(committed.len() + 4);
    let mut scalars: Vec<Fr> = Vec::with_capacity(committed.len() + 4);
    let mut batched_eval = Fr::zero();
    let mut v_i = Fr::one();
    for (commitment, eval) in committed {
        bases.push(commitment);
        scalars.push(v_i);
        batched_eval += v_i * eval;
        v_i *= ch.v;
    }

    let zeta_omega = ch.zeta * omega;
    bases.extend([proof.w_zeta, proof.w_zeta_omega, proof.z, vk.kzg.g1]);
    scalars.extend([
        ch.zeta,
        ch.u * zeta_omega,
        ch.u,
        -(batched_eval + ch.u * e.z_omega),
    ]);

    let rhs = G1Projective::msm_unchecked(&bases, &scalars).into_affine();
    let lhs = (-(proof.w_zeta_omega * ch.u + proof.w_zeta)).into_affine();
    crate::dbg_g1!("P0", &lhs);
    crate::dbg_g1!("P1", &rhs);

    let result = BW6_761::multi_pairing(
        [lhs, rhs],
        [vk.kzg.tau_g2, vk.kzg.g2],
    );
    result.0.is_one()
}
