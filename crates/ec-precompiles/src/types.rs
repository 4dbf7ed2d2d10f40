//! Core types for the BW6-761 precompiles
//!
//! Uses raw byte arrays matching the external (big-endian) wire format.

use core::fmt;
use core::str::FromStr;

/// Size of an encoded base field element (`Fq`) in bytes.
pub const FIELD_ELEMENT_SIZE: usize = 96;

/// Size of an encoded affine point (G1 or G2) in bytes.
pub const AFFINE_POINT_SIZE: usize = 2 * FIELD_ELEMENT_SIZE;

/// Size of an EVM word, used for scalar multipliers.
pub const EVM_WORD_SIZE: usize = 32;

/// Size of an encoded scalar field element (`Fr`) in bytes.
pub const SCALAR_FIELD_SIZE: usize = 48;

/// A 96-byte base field element (big-endian, canonical).
pub type FieldBytes = [u8; FIELD_ELEMENT_SIZE];

/// A 192-byte affine point (`X ‖ Y`).
pub type PointBytes = [u8; AFFINE_POINT_SIZE];

/// A 32-byte big-endian unsigned scalar.
pub type ScalarWord = [u8; EVM_WORD_SIZE];

/// A 48-byte scalar field element (big-endian, canonical).
pub type ScalarFieldBytes = [u8; SCALAR_FIELD_SIZE];

/// Encoding of the point at infinity.
pub const POINT_AT_INFINITY: PointBytes = [0u8; AFFINE_POINT_SIZE];

/// Size of a contract address in bytes.
pub const ADDRESS_SIZE: usize = 20;

/// A 20-byte contract address.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(pub [u8; ADDRESS_SIZE]);

impl Address {
    /// Address whose only non-zero byte is the last one, e.g. `0x…80`.
    pub const fn from_low_byte(byte: u8) -> Self {
        let mut bytes = [0u8; ADDRESS_SIZE];
        bytes[ADDRESS_SIZE - 1] = byte;
        Address(bytes)
    }

    /// Left-pads `bytes` to 20 bytes, keeping the low-order end when longer.
    pub fn from_slice(bytes: &[u8]) -> Self {
        let mut out = [0u8; ADDRESS_SIZE];
        let take = bytes.len().min(ADDRESS_SIZE);
        out[ADDRESS_SIZE - take..].copy_from_slice(&bytes[bytes.len() - take..]);
        Address(out)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_SIZE] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// Error parsing an [`Address`] from a hex string.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AddressParseError {
    #[error("Address is longer than {ADDRESS_SIZE} bytes")]
    TooLong,

    #[error("Invalid hex: {0}")]
    InvalidHex(String),
}

impl FromStr for Address {
    type Err = AddressParseError;

    /// Parses `0x`-prefixed or bare hex. Short forms such as `0x80` are left-padded.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let padded = if digits.len() % 2 == 1 {
            format!("0{digits}")
        } else {
            digits.to_string()
        };
        let bytes =
            hex::decode(&padded).map_err(|e| AddressParseError::InvalidHex(e.to_string()))?;
        if bytes.len() > ADDRESS_SIZE {
            return Err(AddressParseError::TooLong);
        }
        Ok(Address::from_slice(&bytes))
    }
}

/// Capability handed through by the VM on every precompile call.
///
/// None of the BW6-761 handlers inspect it; it exists so handlers that need
/// caller or call-depth information can be registered alongside them.
pub trait ExecutionContext {
    /// Address of the account that issued the call.
    fn caller(&self) -> Address;

    /// Current call depth.
    fn depth(&self) -> usize;
}

/// Plain [`ExecutionContext`] for hosts that have nothing richer to offer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CallContext {
    pub caller: Address,
    pub depth: usize,
}

impl CallContext {
    pub fn new(caller: Address, depth: usize) -> Self {
        Self { caller, depth }
    }
}

impl ExecutionContext for CallContext {
    fn caller(&self) -> Address {
        self.caller
    }

    fn depth(&self) -> usize {
        self.depth
    }
}
