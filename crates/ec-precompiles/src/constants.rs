//! Reserved addresses, default gas costs and protocol constants

use crate::types::{Address, AFFINE_POINT_SIZE, EVM_WORD_SIZE};

/// BW6-761 G1 addition
pub const G1_ADD_ADDRESS: Address = Address::from_low_byte(0x80);

/// BW6-761 G1 scalar multiplication
pub const G1_SCALAR_MUL_ADDRESS: Address = Address::from_low_byte(0x81);

/// BW6-761 G2 addition
pub const G2_ADD_ADDRESS: Address = Address::from_low_byte(0x82);

/// BW6-761 G2 scalar multiplication
pub const G2_SCALAR_MUL_ADDRESS: Address = Address::from_low_byte(0x83);

/// BW6-761 single-pair pairing check
pub const PAIRING_CHECK_ADDRESS: Address = Address::from_low_byte(0x84);

/// PlonK proof verification over BW6-761
pub const PLONK_VERIFY_ADDRESS: Address = Address::from_low_byte(0x85);

/// Input size of the addition precompiles: two affine points.
pub const ADD_INPUT_SIZE: usize = 2 * AFFINE_POINT_SIZE;

/// Input size of the scalar multiplication precompiles: a point and a word.
pub const SCALAR_MUL_INPUT_SIZE: usize = AFFINE_POINT_SIZE + EVM_WORD_SIZE;

/// Input size of the pairing check: a G1 point and a G2 point.
pub const PAIRING_INPUT_SIZE: usize = 2 * AFFINE_POINT_SIZE;

// Default fee schedule. Hosts normally inject their own through `GasSchedule`.

pub const BW6_761_G1_ADD_GAS: u64 = 800;
pub const BW6_761_G1_SCALAR_MUL_GAS: u64 = 20_000;
pub const BW6_761_G2_ADD_GAS: u64 = 800;
pub const BW6_761_G2_SCALAR_MUL_GAS: u64 = 20_000;
pub const BW6_761_PAIRING_CHECK_GAS: u64 = 140_000;
pub const BW6_761_PLONK_VERIFY_GAS: u64 = 800_000;

/// Domain separator for the PlonK transcript
pub const PLONK_DOMAIN_SEP: &[u8] = b"BW6-761-PlonK-Keccak";

/// Smallest evaluation domain a verifying key may declare
pub const MIN_DOMAIN_SIZE: u64 = 4;

/// Maximum supported log2 domain size
pub const MAX_LOG2_DOMAIN_SIZE: u32 = 32;

/// Upper bound on public inputs, keeping verifier work bounded under a fixed gas cost
pub const MAX_PUBLIC_INPUTS: u64 = 4096;
