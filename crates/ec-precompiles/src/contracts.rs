//! BW6-761 precompiled contracts
//!
//! Each handler validates the input length, delegates to the curve or proof
//! adapter and encodes the result. Gas is charged by the dispatcher before
//! [`EcPrecompile::run`] is called.

use std::sync::Arc;

use crate::constants::{ADD_INPUT_SIZE, PAIRING_INPUT_SIZE, SCALAR_MUL_INPUT_SIZE};
use crate::curve::CurveArithmetic;
use crate::errors::PrecompileError;
use crate::gas::{GasSchedule, Operation};
use crate::plonk::ProofVerifier;
use crate::types::{ExecutionContext, AFFINE_POINT_SIZE};

/// A native contract reachable at a reserved address.
pub trait EcPrecompile: Send + Sync {
    fn operation(&self) -> Operation;

    /// Gas charged for `input`, before it is validated.
    fn required_gas(&self, input: &[u8]) -> u64;

    /// Run on `input`, returning the output bytes.
    fn run(&self, ctx: &dyn ExecutionContext, input: &[u8]) -> Result<Vec<u8>, PrecompileError>;
}

fn check_length(input: &[u8], expected: usize) -> Result<(), PrecompileError> {
    if input.len() != expected {
        return Err(PrecompileError::InvalidInputLength {
            expected,
            actual: input.len(),
        });
    }
    Ok(())
}

/// `0x80`: input `P ‖ Q`, output `P + Q`
pub struct Bw6761G1Add {
    gas: GasSchedule,
    curve: Arc<dyn CurveArithmetic>,
}

impl Bw6761G1Add {
    pub fn new(gas: GasSchedule, curve: Arc<dyn CurveArithmetic>) -> Self {
        Self { gas, curve }
    }
}

impl EcPrecompile for Bw6761G1Add {
    fn operation(&self) -> Operation {
        Operation::G1Add
    }

    fn required_gas(&self, input: &[u8]) -> u64 {
        self.gas.cost(Operation::G1Add, input)
    }

    fn run(&self, _ctx: &dyn ExecutionContext, input: &[u8]) -> Result<Vec<u8>, PrecompileError> {
        check_length(input, ADD_INPUT_SIZE)?;
        let (a, b) = input.split_at(AFFINE_POINT_SIZE);
        Ok(self.curve.g1_add(a, b)?.to_vec())
    }
}

/// `0x81`: input `P ‖ k`, output `k · P`
pub struct Bw6761G1ScalarMul {
    gas: GasSchedule,
    curve: Arc<dyn CurveArithmetic>,
}

impl Bw6761G1ScalarMul {
    pub fn new(gas: GasSchedule, curve: Arc<dyn CurveArithmetic>) -> Self {
        Self { gas, curve }
    }
}

impl EcPrecompile for Bw6761G1ScalarMul {
    fn operation(&self) -> Operation {
        Operation::G1ScalarMul
    }

    fn required_gas(&self, input: &[u8]) -> u64 {
        self.gas.cost(Operation::G1ScalarMul, input)
    }

    fn run(&self, _ctx: &dyn ExecutionContext, input: &[u8]) -> Result<Vec<u8>, PrecompileError> {
        check_length(input, SCALAR_MUL_INPUT_SIZE)?;
        let (point, scalar) = input.split_at(AFFINE_POINT_SIZE);
        Ok(self.curve.g1_scalar_mul(point, scalar)?.to_vec())
    }
}

/// `0x82`: input `P ‖ Q`, output `P + Q`
pub struct Bw6761G2Add {
    gas: GasSchedule,
    curve: Arc<dyn CurveArithmetic>,
}

impl Bw6761G2Add {
    pub fn new(gas: GasSchedule, curve: Arc<dyn CurveArithmetic>) -> Self {
        Self { gas, curve }
    }
}

impl EcPrecompile for Bw6761G2Add {
    fn operation(&self) -> Operation {
        Operation::G2Add
    }

    fn required_gas(&self, input: &[u8]) -> u64 {
        self.gas.cost(Operation::G2Add, input)
    }

    fn run(&self, _ctx: &dyn ExecutionContext, input: &[u8]) -> Result<Vec<u8>, PrecompileError> {
        check_length(input, ADD_INPUT_SIZE)?;
        let (a, b) = input.split_at(AFFINE_POINT_SIZE);
        Ok(self.curve.g2_add(a, b)?.to_vec())
    }
}

/// `0x83`: input `P ‖ k`, output `k · P`
pub struct Bw6761G2ScalarMul {
    gas: GasSchedule,
    curve: Arc<dyn CurveArithmetic>,
}

impl Bw6761G2ScalarMul {
    pub fn new(gas: GasSchedule, curve: Arc<dyn CurveArithmetic>) -> Self {
        Self { gas, curve }
    }
}

impl EcPrecompile for Bw6761G2ScalarMul {
    fn operation(&self) -> Operation {
        Operation::G2ScalarMul
    }

    fn required_gas(&self, input: &[u8]) -> u64 {
        self.gas.cost(Operation::G2ScalarMul, input)
    }

    fn run(&self, _ctx: &dyn ExecutionContext, input: &[u8]) -> Result<Vec<u8>, PrecompileError> {
        check_length(input, SCALAR_MUL_INPUT_SIZE)?;
        let (point, scalar) = input.split_at(AFFINE_POINT_SIZE);
        Ok(self.curve.g2_scalar_mul(point, scalar)?.to_vec())
    }
}

/// `0x84`: input `P ∈ G1 ‖ Q ∈ G2`, output `0x01` if `e(P, Q) = 1`, else `0x00`
pub struct Bw6761PairingCheck {
    gas: GasSchedule,
    curve: Arc<dyn CurveArithmetic>,
}

impl Bw6761PairingCheck {
    pub fn new(gas: GasSchedule, curve: Arc<dyn CurveArithmetic>) -> Self {
        Self { gas, curve }
    }
}

impl EcPrecompile for Bw6761PairingCheck {
    fn operation(&self) -> Operation {
        Operation::PairingCheck
    }

    fn required_gas(&self, input: &[u8]) -> u64 {
        self.gas.cost(Operation::PairingCheck, input)
    }

    fn run(&self, _ctx: &dyn ExecutionContext, input: &[u8]) -> Result<Vec<u8>, PrecompileError> {
        check_length(input, PAIRING_INPUT_SIZE)?;
        let (p, q) = input.split_at(AFFINE_POINT_SIZE);
        let holds = self.curve.pairing_check(p, q)?;
        Ok(vec![u8::from(holds)])
    }
}

/// `0x85`: input `proof ‖ vk ‖ public witness`, empty output on success
///
/// An invalid proof is an error, not a `0x00` result.
pub struct Bw6761PlonkVerify {
    gas: GasSchedule,
    verifier: Arc<dyn ProofVerifier>,
}

impl Bw6761PlonkVerify {
    pub fn new(gas: GasSchedule, verifier: Arc<dyn ProofVerifier>) -> Self {
        Self { gas, verifier }
    }
}

impl EcPrecompile for Bw6761PlonkVerify {
    fn operation(&self) -> Operation {
        Operation::PlonkVerify
    }

    fn required_gas(&self, input: &[u8]) -> u64 {
        self.gas.cost(Operation::PlonkVerify, input)
    }

    fn run(&self, _ctx: &dyn ExecutionContext, input: &[u8]) -> Result<Vec<u8>, PrecompileError> {
        self.verifier.verify_bundle(input)?;
        Ok(Vec::new())
    }
}
