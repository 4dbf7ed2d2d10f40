//! Gas model
//!
//! Every operation has a flat cost that does not depend on the input. The
//! schedule is a plain value injected when the registry is built, so hosts can
//! tune the fees from their own configuration.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::types::Address;

/// The six BW6-761 operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    G1Add,
    G1ScalarMul,
    G2Add,
    G2ScalarMul,
    PairingCheck,
    PlonkVerify,
}

impl Operation {
    pub const ALL: [Operation; 6] = [
        Operation::G1Add,
        Operation::G1ScalarMul,
        Operation::G2Add,
        Operation::G2ScalarMul,
        Operation::PairingCheck,
        Operation::PlonkVerify,
    ];

    /// Reserved contract address of this operation
    pub fn address(&self) -> Address {
        match self {
            Operation::G1Add => G1_ADD_ADDRESS,
            Operation::G1ScalarMul => G1_SCALAR_MUL_ADDRESS,
            Operation::G2Add => G2_ADD_ADDRESS,
            Operation::G2ScalarMul => G2_SCALAR_MUL_ADDRESS,
            Operation::PairingCheck => PAIRING_CHECK_ADDRESS,
            Operation::PlonkVerify => PLONK_VERIFY_ADDRESS,
        }
    }

    pub fn from_address(address: &Address) -> Option<Operation> {
        Self::ALL.into_iter().find(|op| op.address() == *address)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::G1Add => "BW6-761 G1 Add",
            Operation::G1ScalarMul => "BW6-761 G1 Scalar Mul",
            Operation::G2Add => "BW6-761 G2 Add",
            Operation::G2ScalarMul => "BW6-761 G2 Scalar Mul",
            Operation::PairingCheck => "BW6-761 Pairing Check",
            Operation::PlonkVerify => "BW6-761 PlonK Proof Verify",
        }
    }

    /// Exact input size, or `None` for the variable-length proof bundle
    pub fn input_size(&self) -> Option<usize> {
        match self {
            Operation::G1Add | Operation::G2Add => Some(ADD_INPUT_SIZE),
            Operation::G1ScalarMul | Operation::G2ScalarMul => Some(SCALAR_MUL_INPUT_SIZE),
            Operation::PairingCheck => Some(PAIRING_INPUT_SIZE),
            Operation::PlonkVerify => None,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Flat per-operation gas costs
///
/// Deserializes from a table where every field is optional:
///
/// ```toml
/// [gas]
/// pairing_check = 120000
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GasSchedule {
    pub g1_add: u64,
    pub g1_scalar_mul: u64,
    pub g2_add: u64,
    pub g2_scalar_mul: u64,
    pub pairing_check: u64,
    pub plonk_verify: u64,
}

impl Default for GasSchedule {
    fn default() -> Self {
        Self {
            g1_add: BW6_761_G1_ADD_GAS,
            g1_scalar_mul: BW6_761_G1_SCALAR_MUL_GAS,
            g2_add: BW6_761_G2_ADD_GAS,
            g2_scalar_mul: BW6_761_G2_SCALAR_MUL_GAS,
            pairing_check: BW6_761_PAIRING_CHECK_GAS,
            plonk_verify: BW6_761_PLONK_VERIFY_GAS,
        }
    }
}

impl GasSchedule {
    /// Gas charged for `op`. The input is not inspected.
    pub fn cost(&self, op: Operation, _input: &[u8]) -> u64 {
        match op {
            Operation::G1Add => self.g1_add,
            Operation::G1ScalarMul => self.g1_scalar_mul,
            Operation::G2Add => self.g2_add,
            Operation::G2ScalarMul => self.g2_scalar_mul,
            Operation::PairingCheck => self.pairing_check,
            Operation::PlonkVerify => self.plonk_verify,
        }
    }

    pub fn with_g1_add(mut self, gas: u64) -> Self {
        self.g1_add = gas;
        self
    }

    pub fn with_g1_scalar_mul(mut self, gas: u64) -> Self {
        self.g1_scalar_mul = gas;
        self
    }

    pub fn with_g2_add(mut self, gas: u64) -> Self {
        self.g2_add = gas;
        self
    }

    pub fn with_g2_scalar_mul(mut self, gas: u64) -> Self {
        self.g2_scalar_mul = gas;
        self
    }

    pub fn with_pairing_check(mut self, gas: u64) -> Self {
        self.pairing_check = gas;
        self
    }

    pub fn with_plonk_verify(mut self, gas: u64) -> Self {
        self.plonk_verify = gas;
        self
    }
}
