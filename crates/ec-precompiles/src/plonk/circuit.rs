//! Arithmetic circuits for the PlonK prover
//!
//! Every gate constrains three wires with
//! `qL·a + qR·b + qO·c + qM·a·b + qC = 0`. Wires that share a [`Variable`]
//! are tied together by the permutation argument.

use ark_bw6_761::Fr;
use ark_ff::{One, Zero};

/// A circuit variable. Index 0 is the constant-zero wire used for padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Variable(pub(crate) usize);

impl Variable {
    pub const ZERO: Variable = Variable(0);

    pub fn index(&self) -> usize {
        self.0
    }
}

/// Gate selector coefficients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selectors {
    pub q_l: Fr,
    pub q_r: Fr,
    pub q_o: Fr,
    pub q_m: Fr,
    pub q_c: Fr,
}

impl Selectors {
    /// `a · b = c`
    pub fn mul() -> Self {
        Self {
            q_m: Fr::one(),
            q_o: -Fr::one(),
            ..Default::default()
        }
    }

    /// `a + b = c`
    pub fn add() -> Self {
        Self {
            q_l: Fr::one(),
            q_r: Fr::one(),
            q_o: -Fr::one(),
            ..Default::default()
        }
    }

    /// `a = b`
    pub fn equal() -> Self {
        Self {
            q_l: Fr::one(),
            q_r: -Fr::one(),
            ..Default::default()
        }
    }

    /// `a = value`
    pub fn constant(value: Fr) -> Self {
        Self {
            q_l: Fr::one(),
            q_c: -value,
            ..Default::default()
        }
    }

    /// The public input row: `a + PI = 0` with `qL = 1`
    pub(crate) fn public_input() -> Self {
        Self {
            q_l: Fr::one(),
            ..Default::default()
        }
    }

    pub fn evaluate(&self, a: Fr, b: Fr, c: Fr) -> Fr {
        self.q_l * a + self.q_r * b + self.q_o * c + self.q_m * a * b + self.q_c
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gate {
    pub a: Variable,
    pub b: Variable,
    pub c: Variable,
    pub selectors: Selectors,
}

/// Circuit under construction
///
/// Public inputs take the first rows of the evaluation domain, gates follow
/// in insertion order.
#[derive(Debug, Clone)]
pub struct ConstraintSystem {
    num_variables: usize,
    public_inputs: Vec<Variable>,
    gates: Vec<Gate>,
}

impl Default for ConstraintSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstraintSystem {
    pub fn new() -> Self {
        Self {
            num_variables: 1,
            public_inputs: Vec::new(),
            gates: Vec::new(),
        }
    }

    pub fn new_variable(&mut self) -> Variable {
        let var = Variable(self.num_variables);
        self.num_variables += 1;
        var
    }

    /// A variable whose value is revealed in the public witness.
    pub fn new_public_input(&mut self) -> Variable {
        let var = self.new_variable();
        self.public_inputs.push(var);
        var
    }

    pub fn add_gate(&mut self, a: Variable, b: Variable, c: Variable, selectors: Selectors) {
        self.gates.push(Gate { a, b, c, selectors });
    }

    /// New variable constrained to `a · b`.
    pub fn mul(&mut self, a: Variable, b: Variable) -> Variable {
        let c = self.new_variable();
        self.add_gate(a, b, c, Selectors::mul());
        c
    }

    /// New variable constrained to `a + b`.
    pub fn add(&mut self, a: Variable, b: Variable) -> Variable {
        let c = self.new_variable();
        self.add_gate(a, b, c, Selectors::add());
        c
    }

    pub fn assert_equal(&mut self, a: Variable, b: Variable) {
        self.add_gate(a, b, Variable::ZERO, Selectors::equal());
    }

    pub fn assert_constant(&mut self, a: Variable, value: Fr) {
        self.add_gate(a, Variable::ZERO, Variable::ZERO, Selectors::constant(value));
    }

    pub fn num_variables(&self) -> usize {
        self.num_variables
    }

    pub fn num_public_inputs(&self) -> usize {
        self.public_inputs.len()
    }

    pub fn num_gates(&self) -> usize {
        self.gates.len()
    }

    /// Rows used before padding to the domain size
    pub fn num_rows(&self) -> usize {
        self.public_inputs.len() + self.gates.len()
    }

    pub fn public_inputs(&self) -> &[Variable] {
        &self.public_inputs
    }

    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Whether `assignment` satisfies every gate. Public input rows hold trivially.
    pub fn is_satisfied(&self, assignment: &Assignment) -> bool {
        assignment.len() == self.num_variables
            && self.gates.iter().all(|gate| {
                gate.selectors
                    .evaluate(
                        assignment.value(gate.a),
                        assignment.value(gate.b),
                        assignment.value(gate.c),
                    )
                    .is_zero()
            })
    }
}

/// Values for every variable of a circuit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    values: Vec<Fr>,
}

impl Assignment {
    /// All-zero assignment sized for `cs`
    pub fn new(cs: &ConstraintSystem) -> Self {
        Self {
            values: vec![Fr::zero(); cs.num_variables()],
        }
    }

    pub fn from_values(values: Vec<Fr>) -> Self {
        Self { values }
    }

    /// Set a variable. The zero wire and out-of-range variables are left untouched.
    pub fn set(&mut self, var: Variable, value: Fr) {
        if var == Variable::ZERO {
            return;
        }
        if let Some(slot) = self.values.get_mut(var.0) {
            *slot = value;
        }
    }

    pub fn value(&self, var: Variable) -> Fr {
        self.values.get(var.0).copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Ready-made circuits
pub mod circuits {
    use super::*;

    /// `x · x == y` with `y` public. Returns the circuit and a satisfying assignment.
    pub fn square(x: Fr) -> (ConstraintSystem, Assignment) {
        let mut cs = ConstraintSystem::new();
        let y = cs.new_public_input();
        let x_var = cs.new_variable();
        let x_squared = cs.mul(x_var, x_var);
        cs.assert_equal(x_squared, y);

        let mut assignment = Assignment::new(&cs);
        assignment.set(x_var, x);
        assignment.set(x_squared, x * x);
        assignment.set(y, x * x);
        (cs, assignment)
    }

    /// `x³ + x + 5 == y` with `y` public.
    pub fn cubic(x: Fr) -> (ConstraintSystem, Assignment) {
        let mut cs = ConstraintSystem::new();
        let y = cs.new_public_input();
        let x_var = cs.new_variable();
        let x2 = cs.mul(x_var, x_var);
        let x3 = cs.mul(x2, x_var);
        let sum = cs.add(x3, x_var);
        let five = cs.new_variable();
        cs.assert_constant(five, Fr::from(5u64));
        let out = cs.add(sum, five);
        cs.assert_equal(out, y);

        let mut assignment = Assignment::new(&cs);
        let x2_val = x * x;
        let x3_val = x2_val * x;
        let out_val = x3_val + x + Fr::from(5u64);
        assignment.set(x_var, x);
        assignment.set(x2, x2_val);
        assignment.set(x3, x3_val);
        assignment.set(sum, x3_val + x);
        assignment.set(five, Fr::from(5u64));
        assignment.set(out, out_val);
        assignment.set(y, out_val);
        (cs, assignment)
    }
}
