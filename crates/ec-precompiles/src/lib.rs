//! BW6-761 elliptic curve and PlonK precompiled contracts for EVM hosts
//!
//! This crate provides the native implementations behind six reserved
//! contract addresses, so contract code can run curve arithmetic and
//! zkSNARK verification as a fixed-cost operation:
//!
//! | Address | Operation | Input | Output |
//! |---|---|---|---|
//! | `0x80` | G1 addition | 384 bytes | 192 bytes |
//! | `0x81` | G1 scalar multiplication | 224 bytes | 192 bytes |
//! | `0x82` | G2 addition | 384 bytes | 192 bytes |
//! | `0x83` | G2 scalar multiplication | 224 bytes | 192 bytes |
//! | `0x84` | Pairing check | 384 bytes | 1 byte |
//! | `0x85` | PlonK proof verification | proof ‖ vk ‖ witness | empty |
//!
//! # Encoding
//!
//! Field elements are 96-byte big-endian integers in `[0, p)`. Points are
//! `X ‖ Y`; BW6-761 G2 is defined over the base field, so both groups use
//! 192-byte points. The point at infinity is encoded as all zeros.
//!
//! # Example
//!
//! ```ignore
//! use ec_precompiles::{run_precompile, CallContext, GasSchedule, PrecompileSet, G1_ADD_ADDRESS};
//!
//! let precompiles = PrecompileSet::bw6_761(&GasSchedule::default());
//! let handler = precompiles.get(&G1_ADD_ADDRESS).unwrap();
//! let result = run_precompile(&CallContext::default(), handler, &input, 10_000)?;
//! println!("sum = 0x{}", hex::encode(&result.output));
//! ```

pub mod codec;
pub mod constants;
pub mod contracts;
pub mod curve;
pub mod debug;
pub mod errors;
pub mod gas;
pub mod plonk;
pub mod registry;
pub mod types;

pub use constants::{
    G1_ADD_ADDRESS, G1_SCALAR_MUL_ADDRESS, G2_ADD_ADDRESS, G2_SCALAR_MUL_ADDRESS,
    PAIRING_CHECK_ADDRESS, PLONK_VERIFY_ADDRESS,
};
pub use contracts::EcPrecompile;
pub use curve::{ArkworksBw6761, CurveArithmetic};
pub use errors::{CodecError, CurveError, PrecompileError, PrecompileFailure, RegistryError};
pub use gas::{GasSchedule, Operation};
pub use plonk::{PlonkBw6761Verifier, ProofVerifier};
pub use registry::{
    run_precompile, OperationRecord, PrecompileOutput, PrecompileResult, PrecompileSet,
};
pub use types::{Address, CallContext, ExecutionContext};
