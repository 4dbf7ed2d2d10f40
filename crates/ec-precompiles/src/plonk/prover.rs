//! PlonK setup and prover
//!
//! Produces keys and proofs in the format read by the verifier. There is no
//! blinding, so proofs are not zero-knowledge; this is tooling for building
//! test vectors and demo bundles.
//!
//! Round structure:
//! 1. Commit to the wire polynomials `a b c`, derive β, γ
//! 2. Commit to the permutation accumulator `z`, derive α
//! 3. Commit to the quotient `t`, derive ζ
//! 4. Open everything at ζ (and `z` at ζω), derive v
//! 5. Commit to the two opening witnesses

use ark_bw6_761::{Fr, G1Affine};
use ark_ec::AffineRepr;
use ark_ff::{batch_inversion, FftField, Field, One, Zero};
use ark_poly::univariate::DensePolynomial;
use ark_poly::{DenseUVPolynomial, EvaluationDomain, Polynomial, Radix2EvaluationDomain};

use crate::constants::{MAX_LOG2_DOMAIN_SIZE, MAX_PUBLIC_INPUTS, MIN_DOMAIN_SIZE};
use crate::errors::ProverError;
use crate::plonk::circuit::{Assignment, ConstraintSystem, Gate, Selectors, Variable};
use crate::plonk::key::VerifyingKey;
use crate::plonk::kzg::Srs;
use crate::plonk::proof::{Proof, ProofEvaluations};
use crate::plonk::verifier::new_transcript;
use crate::plonk::witness::PublicWitness;

type Poly = DensePolynomial<Fr>;

/// Everything the prover needs about a circuit
#[derive(Debug, Clone)]
pub struct ProvingKey {
    domain: Radix2EvaluationDomain<Fr>,
    /// Variable on each row, per wire column
    wires: [Vec<Variable>; 3],
    public_inputs: Vec<Variable>,
    num_variables: usize,
    /// `qL qR qO qM qC`
    selectors: [Poly; 5],
    sigma_evals: [Vec<Fr>; 3],
    sigmas: [Poly; 3],
    /// First Lagrange basis polynomial
    l0: Poly,
    srs: Srs,
    vk: VerifyingKey,
}

impl ProvingKey {
    pub fn verifying_key(&self) -> &VerifyingKey {
        &self.vk
    }

    pub fn domain_size(&self) -> usize {
        self.domain.size()
    }

    pub fn num_variables(&self) -> usize {
        self.num_variables
    }

    fn interpolate(&self, evals: &[Fr]) -> Poly {
        Poly::from_coefficients_vec(self.domain.ifft(evals))
    }
}

/// Preprocess a circuit into proving and verifying keys.
pub fn setup(cs: &ConstraintSystem, srs: &Srs) -> Result<(ProvingKey, VerifyingKey), ProverError> {
    let num_public = cs.num_public_inputs();
    if num_public as u64 > MAX_PUBLIC_INPUTS {
        return Err(ProverError::TooManyPublicInputs(num_public));
    }

    let n = cs
        .num_rows()
        .next_power_of_two()
        .max(MIN_DOMAIN_SIZE as usize);
    if n.trailing_zeros() > MAX_LOG2_DOMAIN_SIZE {
        return Err(ProverError::DomainTooLarge(n));
    }
    let domain = Radix2EvaluationDomain::<Fr>::new(n).ok_or(ProverError::DomainTooLarge(n))?;

    // The quotient has degree up to 3n - 4
    let needed = 3 * n;
    if srs.num_powers() < needed {
        return Err(ProverError::SrsTooSmall {
            needed,
            available: srs.num_powers(),
        });
    }

    // Public input rows first, then gates, then zero padding
    let public_rows = cs.public_inputs().iter().map(|var| Gate {
        a: *var,
        b: Variable::ZERO,
        c: Variable::ZERO,
        selectors: Selectors::public_input(),
    });
    let mut wires: [Vec<Variable>; 3] = core::array::from_fn(|_| vec![Variable::ZERO; n]);
    let mut selector_evals: [Vec<Fr>; 5] = core::array::from_fn(|_| vec![Fr::zero(); n]);
    for (row, gate) in public_rows.chain(cs.gates().iter().copied()).enumerate() {
        for (column, var) in wires.iter_mut().zip([gate.a, gate.b, gate.c]) {
            if var.index() >= cs.num_variables() {
                return Err(ProverError::UnknownVariable(var.index()));
            }
            column[row] = var;
        }
        let s = gate.selectors;
        for (evals, value) in selector_evals.iter_mut().zip([s.q_l, s.q_r, s.q_o, s.q_m, s.q_c]) {
            evals[row] = value;
        }
    }

    let coset_shift = Fr::GENERATOR;
    let k = [Fr::one(), coset_shift, coset_shift.square()];
    let elements: Vec<Fr> = domain.elements().collect();
    let sigma_evals = permutation(&wires, cs.num_variables(), &k, &elements);

    let interpolate = |evals: &[Fr]| Poly::from_coefficients_vec(domain.ifft(evals));
    let selectors = selector_evals.each_ref().map(|evals| interpolate(evals));
    let sigmas = sigma_evals.each_ref().map(|evals| interpolate(evals));
    let mut l0_evals = vec![Fr::zero(); n];
    l0_evals[0] = Fr::one();
    let l0 = interpolate(&l0_evals);

    let mut selector_comms = [G1Affine::identity(); 5];
    for (comm, poly) in selector_comms.iter_mut().zip(&selectors) {
        *comm = srs.commit(poly)?;
    }
    let mut sigma_comms = [G1Affine::identity(); 3];
    for (comm, poly) in sigma_comms.iter_mut().zip(&sigmas) {
        *comm = srs.commit(poly)?;
    }
    let [q_l, q_r, q_o, q_m, q_c] = selector_comms;

    let vk = VerifyingKey {
        domain_size: n as u64,
        num_public_inputs: num_public as u64,
        coset_shift,
        q_l,
        q_r,
        q_o,
        q_m,
        q_c,
        s_sigma: sigma_comms,
        kzg: srs.verifying_key(),
    };

    log::debug!(
        "PlonK setup: {} rows, domain {}, {} public inputs",
        cs.num_rows(),
        n,
        num_public
    );

    let pk = ProvingKey {
        domain,
        wires,
        public_inputs: cs.public_inputs().to_vec(),
        num_variables: cs.num_variables(),
        selectors,
        sigma_evals,
        sigmas,
        l0,
        srs: srs.clone(),
        vk: vk.clone(),
    };
    Ok((pk, vk))
}

/// Copy-constraint permutation: each wire position points at the next
/// position holding the same variable, labelled `k_col · ω^row`.
fn permutation(
    wires: &[Vec<Variable>; 3],
    num_variables: usize,
    k: &[Fr; 3],
    elements: &[Fr],
) -> [Vec<Fr>; 3] {
    let mut sigma: [Vec<Fr>; 3] =
        core::array::from_fn(|col| elements.iter().map(|w| k[col] * w).collect());

    let mut cycles: Vec<Vec<(usize, usize)>> = vec![Vec::new(); num_variables];
    for (col, column) in wires.iter().enumerate() {
        for (row, var) in column.iter().enumerate() {
            cycles[var.index()].push((col, row));
        }
    }

    for cycle in &cycles {
        for (i, &(col, row)) in cycle.iter().enumerate() {
            let (next_col, next_row) = cycle[(i + 1) % cycle.len()];
            sigma[col][row] = k[next_col] * elements[next_row];
        }
    }
    sigma
}

/// Prove that `assignment` satisfies the circuit behind `pk`.
pub fn prove(pk: &ProvingKey, assignment: &Assignment) -> Result<(Proof, PublicWitness), ProverError> {
    if assignment.len() != pk.num_variables {
        return Err(ProverError::AssignmentSize {
            expected: pk.num_variables,
            actual: assignment.len(),
        });
    }

    let n = pk.domain.size();
    let vk = &pk.vk;
    let k = vk.coset_representatives();
    let public_inputs: Vec<Fr> = pk.public_inputs.iter().map(|v| assignment.value(*v)).collect();

    // Round 1: wires
    let wire_evals: [Vec<Fr>; 3] = pk
        .wires
        .each_ref()
        .map(|column| column.iter().map(|v| assignment.value(*v)).collect());
    let wire_polys = wire_evals.each_ref().map(|evals| pk.interpolate(evals));
    let a_comm = pk.srs.commit(&wire_polys[0])?;
    let b_comm = pk.srs.commit(&wire_polys[1])?;
    let c_comm = pk.srs.commit(&wire_polys[2])?;

    let mut transcript = new_transcript(vk, &public_inputs);
    transcript.append_g1(&a_comm);
    transcript.append_g1(&b_comm);
    transcript.append_g1(&c_comm);
    let beta = transcript.challenge();
    let gamma = transcript.challenge();

    // Round 2: z(ω^{i+1}) = z(ω^i) · Π(w + β·k·ω^i + γ) / Π(w + β·σ + γ)
    let elements: Vec<Fr> = pk.domain.elements().collect();
    let mut numerators = vec![Fr::one(); n];
    let mut denominators = vec![Fr::one(); n];
    for row in 0..n {
        for col in 0..3 {
            let w = wire_evals[col][row];
            numerators[row] *= w + beta * k[col] * elements[row] + gamma;
            denominators[row] *= w + beta * pk.sigma_evals[col][row] + gamma;
        }
    }
    if denominators.iter().any(Zero::is_zero) {
        return Err(ProverError::DegenerateChallenge);
    }
    batch_inversion(&mut denominators);

    let mut z_evals = Vec::with_capacity(n);
    let mut acc = Fr::one();
    for (num, inv) in numerators.iter().zip(&denominators) {
        z_evals.push(acc);
        acc *= *num * inv;
    }
    let z_poly = pk.interpolate(&z_evals);
    let z_comm = pk.srs.commit(&z_poly)?;
    transcript.append_g1(&z_comm);
    let alpha = transcript.challenge();

    // Round 3: quotient
    let [a, b, c] = &wire_polys;
    let [q_l, q_r, q_o, q_m, q_c] = &pk.selectors;

    let mut pi_evals = vec![Fr::zero(); n];
    for (slot, x) in pi_evals.iter_mut().zip(&public_inputs) {
        *slot = -*x;
    }
    let pi_poly = pk.interpolate(&pi_evals);

    let mut numerator = q_l * a;
    numerator += &(q_r * b);
    numerator += &(q_o * c);
    numerator += &(&(q_m * a) * b);
    numerator += q_c;
    numerator += &pi_poly;

    let mut id_product = z_poly.clone();
    let mut sigma_product = shift_argument(&z_poly, pk.domain.group_gen());
    for (col, wire) in wire_polys.iter().enumerate() {
        let id_factor = wire + &Poly::from_coefficients_vec(vec![gamma, beta * k[col]]);
        id_product = &id_product * &id_factor;

        let sigma_factor = &(wire + &scale(&pk.sigmas[col], beta)) + &constant(gamma);
        sigma_product = &sigma_product * &sigma_factor;
    }
    let permutation = &id_product - &sigma_product;
    let boundary = &(&z_poly - &constant(Fr::one())) * &pk.l0;

    numerator += &scale(&permutation, alpha);
    numerator += &scale(&boundary, alpha.square());

    let (t_poly, remainder) = divide_by_vanishing(&numerator, n);
    if !remainder.is_zero() {
        return Err(ProverError::UnsatisfiedConstraints);
    }
    let t_comm = pk.srs.commit(&t_poly)?;
    transcript.append_g1(&t_comm);
    let zeta = transcript.challenge();

    if zeta.pow([n as u64]).is_one() {
        return Err(ProverError::DegenerateChallenge);
    }

    // Round 4: openings
    let zeta_omega = zeta * pk.domain.group_gen();
    let evals = ProofEvaluations {
        a: a.evaluate(&zeta),
        b: b.evaluate(&zeta),
        c: c.evaluate(&zeta),
        s_sigma: pk.sigmas.each_ref().map(|s| s.evaluate(&zeta)),
        q_l: q_l.evaluate(&zeta),
        q_r: q_r.evaluate(&zeta),
        q_o: q_o.evaluate(&zeta),
        q_m: q_m.evaluate(&zeta),
        q_c: q_c.evaluate(&zeta),
        z: z_poly.evaluate(&zeta),
        z_omega: z_poly.evaluate(&zeta_omega),
        t: t_poly.evaluate(&zeta),
    };
    for eval in evals.to_array() {
        transcript.append_scalar(&eval);
    }
    let v = transcript.challenge();

    // Round 5: opening witnesses, same batching order as the verifier
    let batched = [
        a,
        b,
        c,
        &pk.sigmas[0],
        &pk.sigmas[1],
        &pk.sigmas[2],
        q_l,
        q_r,
        q_o,
        q_m,
        q_c,
        &z_poly,
        &t_poly,
    ];
    let mut aggregate = Poly::zero();
    let mut v_i = Fr::one();
    for poly in batched {
        aggregate += &scale(poly, v_i);
        v_i *= v;
    }
    let w_zeta = pk.srs.commit(&divide_by_linear(&aggregate, zeta))?;
    let w_zeta_omega = pk.srs.commit(&divide_by_linear(&z_poly, zeta_omega))?;

    let proof = Proof {
        a: a_comm,
        b: b_comm,
        c: c_comm,
        z: z_comm,
        t: t_comm,
        w_zeta,
        w_zeta_omega,
        evals,
    };
    Ok((proof, PublicWitness::new(public_inputs)))
}

fn constant(value: Fr) -> Poly {
    Poly::from_coefficients_vec(vec![value])
}

fn scale(poly: &Poly, factor: Fr) -> Poly {
    Poly::from_coefficients_vec(poly.coeffs.iter().map(|c| *c * factor).collect())
}

/// `p(ω·X)`
fn shift_argument(poly: &Poly, omega: Fr) -> Poly {
    let mut power = Fr::one();
    let coeffs = poly
        .coeffs
        .iter()
        .map(|c| {
            let out = *c * power;
            power *= omega;
            out
        })
        .collect();
    Poly::from_coefficients_vec(coeffs)
}

/// Quotient and remainder of `p / (Xⁿ − 1)`
fn divide_by_vanishing(poly: &Poly, n: usize) -> (Poly, Poly) {
    if poly.coeffs.len() <= n {
        return (Poly::zero(), poly.clone());
    }

    let mut remainder = poly.coeffs.clone();
    let mut quotient = vec![Fr::zero(); remainder.len() - n];
    for i in (n..remainder.len()).rev() {
        // c·Xⁱ = c·X^{i-n}·(Xⁿ − 1) + c·X^{i-n}
        let c = remainder[i];
        quotient[i - n] += c;
        remainder[i - n] += c;
        remainder[i] = Fr::zero();
    }
    remainder.truncate(n);
    (
        Poly::from_coefficients_vec(quotient),
        Poly::from_coefficients_vec(remainder),
    )
}

/// Quotient of `p / (X − root)`, remainder `p(root)` dropped
fn divide_by_linear(poly: &Poly, root: Fr) -> Poly {
    if poly.coeffs.len() < 2 {
        return Poly::zero();
    }
    let mut quotient = vec![Fr::zero(); poly.coeffs.len() - 1];
    let mut carry = Fr::zero();
    for i in (1..poly.coeffs.len()).rev() {
        carry = poly.coeffs[i] + carry * root;
        quotient[i - 1] = carry;
    }
    Poly::from_coefficients_vec(quotient)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plonk::circuit::circuits;
    use crate::plonk::verifier::verify;

    fn srs() -> Srs {
        Srs::insecure_from_tau(Fr::from(0xdead_beefu64), 64)
    }

    fn poly(coeffs: &[u64]) -> Poly {
        Poly::from_coefficients_vec(coeffs.iter().map(|&c| Fr::from(c)).collect())
    }

    #[test]
    fn test_setup_square_domain() {
        let (cs, _) = circuits::square(Fr::from(3u64));
        let (pk, vk) = setup(&cs, &srs()).unwrap();
        assert_eq!(pk.domain_size(), 4);
        assert_eq!(vk.domain_size, 4);
        assert_eq!(vk.num_public_inputs, 1);
        assert_eq!(vk.coset_shift, Fr::GENERATOR);
        assert_eq!(pk.verifying_key(), &vk);
    }

    #[test]
    fn test_setup_rejects_small_srs() {
        let (cs, _) = circuits::square(Fr::from(3u64));
        let small = Srs::insecure_from_tau(Fr::from(5u64), 11);
        assert_eq!(
            setup(&cs, &small).unwrap_err(),
            ProverError::SrsTooSmall {
                needed: 12,
                available: 11
            }
        );
    }

    #[test]
    fn test_setup_rejects_foreign_variable() {
        let mut cs = ConstraintSystem::new();
        let x = cs.new_variable();
        cs.assert_equal(x, Variable(42));
        assert_eq!(
            setup(&cs, &srs()).unwrap_err(),
            ProverError::UnknownVariable(42)
        );
    }

    #[test]
    fn test_sigma_is_a_permutation_of_identity_labels() {
        let (cs, _) = circuits::cubic(Fr::from(2u64));
        let (pk, vk) = setup(&cs, &srs()).unwrap();
        let k = vk.coset_representatives();
        let elements: Vec<Fr> = pk.domain.elements().collect();

        let mut identity: Vec<Fr> = (0..3)
            .flat_map(|col| elements.iter().map(move |w| k[col] * w))
            .collect();
        let mut sigma: Vec<Fr> = pk.sigma_evals.iter().flatten().copied().collect();
        identity.sort();
        sigma.sort();
        assert_eq!(identity, sigma);
    }

    #[test]
    fn test_prove_square_and_cubic() {
        for (cs, assignment) in [
            circuits::square(Fr::from(7u64)),
            circuits::cubic(Fr::from(3u64)),
        ] {
            let (pk, vk) = setup(&cs, &srs()).unwrap();
            let (proof, witness) = prove(&pk, &assignment).unwrap();
            verify(&vk, &proof, &witness.values).unwrap();
        }
    }

    #[test]
    fn test_prove_rejects_unsatisfied_assignment() {
        let (cs, mut assignment) = circuits::square(Fr::from(3u64));
        assignment.set(cs.public_inputs()[0], Fr::from(10u64));
        let (pk, _) = setup(&cs, &srs()).unwrap();
        assert_eq!(
            prove(&pk, &assignment).unwrap_err(),
            ProverError::UnsatisfiedConstraints
        );
    }

    #[test]
    fn test_prove_rejects_wrong_assignment_size() {
        let (cs, _) = circuits::square(Fr::from(3u64));
        let (pk, _) = setup(&cs, &srs()).unwrap();
        let assignment = Assignment::from_values(vec![Fr::zero(); 2]);
        assert_eq!(
            prove(&pk, &assignment).unwrap_err(),
            ProverError::AssignmentSize {
                expected: 4,
                actual: 2
            }
        );
    }

    #[test]
    fn test_divide_by_vanishing() {
        // (X⁴ − 1)(X + 2) + 3X + 5
        let q = poly(&[2, 1]);
        let r = poly(&[5, 3]);
        let zh = &poly(&[0, 0, 0, 0, 1]) - &poly(&[1]);
        let p = &(&zh * &q) + &r;
        let (quotient, remainder) = divide_by_vanishing(&p, 4);
        assert_eq!(quotient, q);
        assert_eq!(remainder, r);

        let (quotient, remainder) = divide_by_vanishing(&r, 4);
        assert!(quotient.is_zero());
        assert_eq!(remainder, r);
    }

    #[test]
    fn test_divide_by_linear() {
        // (X − 3)(X² + 2X + 7) + p(3)
        let q = poly(&[7, 2, 1]);
        let root = Fr::from(3u64);
        let p = &(&poly(&[0, 1]) - &constant(root)) * &q;
        let p = &p + &constant(Fr::from(11u64));
        assert_eq!(divide_by_linear(&p, root), q);
    }

    #[test]
    fn test_shift_argument() {
        let p = poly(&[4, 3, 2, 1]);
        let omega = Fr::from(5u64);
        let x = Fr::from(9u64);
        assert_eq!(shift_argument(&p, omega).evaluate(&x), p.evaluate(&(omega * x)));
    }
}
