//! Error types for the BW6-761 precompiles

use core::fmt;
use thiserror::Error;

use crate::types::Address;

/// Curve group a point belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    G1,
    G2,
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Group::G1 => f.write_str("G1"),
            Group::G2 => f.write_str("G2"),
        }
    }
}

/// Byte-level decoding errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("invalid input length: expected {expected}, got {actual}")]
    InvalidInputLength { expected: usize, actual: usize },

    /// Wrong width, or not the canonical encoding of a value below the modulus
    #[error("invalid field element length")]
    InvalidFieldElementLength,

    #[error("invalid scalar field element")]
    InvalidScalarField,

    #[error("unexpected end of input: {needed} more bytes needed")]
    UnexpectedEof { needed: usize },
}

/// Curve membership errors surfaced by the arithmetic adapter
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CurveError {
    #[error("{0} point not on curve")]
    PointNotOnCurve(Group),

    #[error("{0} point not in the prime-order subgroup")]
    PointNotInSubgroup(Group),
}

/// Verifying key parsing errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("{0}")]
    Codec(#[from] CodecError),

    #[error("{0}")]
    Curve(#[from] CurveError),

    #[error("Invalid domain size: {0}")]
    InvalidDomainSize(u64),

    #[error("Invalid public input count {count} for domain size {domain_size}")]
    InvalidPublicInputCount { count: u64, domain_size: u64 },

    #[error("Coset shift must be non-zero")]
    ZeroCosetShift,
}

/// Proof parsing errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProofError {
    #[error("{0}")]
    Codec(#[from] CodecError),

    #[error("{0}")]
    Curve(#[from] CurveError),
}

/// Public witness parsing errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WitnessError {
    #[error("{0}")]
    Codec(#[from] CodecError),

    #[error("Public witness must not carry secret values (got {0})")]
    SecretPartNotEmpty(u32),

    #[error("Witness vector length {len} does not match public count {public}")]
    LengthMismatch { len: u32, public: u32 },

    #[error("Witness declares {declared} elements but only {available} bytes remain")]
    Truncated { declared: u32, available: usize },

    #[error("{0} trailing bytes after witness")]
    TrailingBytes(usize),
}

/// Top-level proof verification error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VerifyError {
    #[error("Reading proof: {0}")]
    Proof(#[from] ProofError),

    #[error("Reading vk: {0}")]
    Key(#[from] KeyError),

    #[error("Reading witness: {0}")]
    Witness(#[from] WitnessError),

    #[error("Public input error: expected {expected}, got {actual}")]
    PublicInput { expected: u64, actual: usize },

    #[error("Evaluation challenge fell inside the evaluation domain")]
    DegenerateChallenge,

    #[error("Verification failed")]
    VerificationFailed,
}

/// Errors returned by a precompile handler or by the dispatcher
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PrecompileError {
    #[error("invalid input length: expected {expected}, got {actual}")]
    InvalidInputLength { expected: usize, actual: usize },

    #[error("invalid field element length")]
    InvalidFieldElementLength,

    #[error("out of gas: required {required}, supplied {supplied}")]
    OutOfGas { required: u64, supplied: u64 },

    #[error("{0}")]
    Curve(#[from] CurveError),

    #[error("{0}")]
    Verify(#[from] VerifyError),
}

impl PrecompileError {
    /// Off-curve points, failed proofs and bundle deserialization failures.
    pub fn is_curve_or_verification_failure(&self) -> bool {
        matches!(self, PrecompileError::Curve(_) | PrecompileError::Verify(_))
    }
}

impl From<CodecError> for PrecompileError {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::InvalidInputLength { expected, actual } => {
                PrecompileError::InvalidInputLength { expected, actual }
            }
            CodecError::UnexpectedEof { needed } => PrecompileError::InvalidInputLength {
                expected: needed,
                actual: 0,
            },
            CodecError::InvalidFieldElementLength | CodecError::InvalidScalarField => {
                PrecompileError::InvalidFieldElementLength
            }
        }
    }
}

/// A failed precompile call together with the gas left after charging
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{error}")]
pub struct PrecompileFailure {
    #[source]
    pub error: PrecompileError,
    pub remaining_gas: u64,
}

/// Registry construction errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Duplicate precompile address {0}")]
    DuplicateAddress(Address),
}

/// Errors from the PlonK setup and prover
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProverError {
    #[error("No evaluation domain of size {0}")]
    DomainTooLarge(usize),

    #[error("Too many public inputs: {0}")]
    TooManyPublicInputs(usize),

    #[error("SRS too small: need {needed} powers, have {available}")]
    SrsTooSmall { needed: usize, available: usize },

    #[error("Gate references unknown variable {0}")]
    UnknownVariable(usize),

    #[error("Assignment has {actual} values, circuit has {expected} variables")]
    AssignmentSize { expected: usize, actual: usize },

    #[error("Assignment does not satisfy the circuit constraints")]
    UnsatisfiedConstraints,

    #[error("Permutation challenge produced a zero denominator")]
    DegenerateChallenge,
}
