//! Precompile registry and dispatcher
//!
//! A [`PrecompileSet`] is built once and never mutated, so it can be shared
//! across threads behind an `Arc`. [`run_precompile`] charges gas before the
//! handler runs and keeps the charge when the handler fails.

use std::collections::btree_map::{self, BTreeMap};
use std::sync::Arc;

use crate::contracts::{
    Bw6761G1Add, Bw6761G1ScalarMul, Bw6761G2Add, Bw6761G2ScalarMul, Bw6761PairingCheck,
    Bw6761PlonkVerify, EcPrecompile,
};
use crate::curve::{ArkworksBw6761, CurveArithmetic};
use crate::errors::{PrecompileError, PrecompileFailure, RegistryError};
use crate::gas::{GasSchedule, Operation};
use crate::plonk::{PlonkBw6761Verifier, ProofVerifier};
use crate::types::{Address, ExecutionContext};

/// An address bound to its handler
#[derive(Clone)]
pub struct OperationRecord {
    pub address: Address,
    pub handler: Arc<dyn EcPrecompile>,
}

impl OperationRecord {
    pub fn new(address: Address, handler: Arc<dyn EcPrecompile>) -> Self {
        Self { address, handler }
    }
}

/// Successful precompile call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrecompileOutput {
    pub output: Vec<u8>,
    pub remaining_gas: u64,
}

pub type PrecompileResult = Result<PrecompileOutput, PrecompileFailure>;

/// Charge gas, then run `handler` on `input`.
///
/// With too little gas the handler is not invoked and no gas remains. After a
/// successful charge the cost is kept whether or not the handler succeeds.
pub fn run_precompile(
    ctx: &dyn ExecutionContext,
    handler: &dyn EcPrecompile,
    input: &[u8],
    supplied_gas: u64,
) -> PrecompileResult {
    let cost = handler.required_gas(input);
    let Some(remaining_gas) = supplied_gas.checked_sub(cost) else {
        log::debug!(
            "{}: out of gas (required {cost}, supplied {supplied_gas})",
            handler.operation()
        );
        return Err(PrecompileFailure {
            error: PrecompileError::OutOfGas {
                required: cost,
                supplied: supplied_gas,
            },
            remaining_gas: 0,
        });
    };

    match handler.run(ctx, input) {
        Ok(output) => Ok(PrecompileOutput {
            output,
            remaining_gas,
        }),
        Err(error) => Err(PrecompileFailure {
            error,
            remaining_gas,
        }),
    }
}

/// Immutable address → handler map
#[derive(Clone, Default)]
pub struct PrecompileSet {
    records: BTreeMap<Address, Arc<dyn EcPrecompile>>,
}

impl PrecompileSet {
    /// The six BW6-761 contracts backed by arkworks.
    pub fn bw6_761(gas: &GasSchedule) -> Self {
        Self::new(gas, Arc::new(ArkworksBw6761), Arc::new(PlonkBw6761Verifier))
    }

    /// The six BW6-761 contracts with caller-supplied backends.
    pub fn new(
        gas: &GasSchedule,
        curve: Arc<dyn CurveArithmetic>,
        verifier: Arc<dyn ProofVerifier>,
    ) -> Self {
        let gas = *gas;
        let handlers: [Arc<dyn EcPrecompile>; 6] = [
            Arc::new(Bw6761G1Add::new(gas, curve.clone())),
            Arc::new(Bw6761G1ScalarMul::new(gas, curve.clone())),
            Arc::new(Bw6761G2Add::new(gas, curve.clone())),
            Arc::new(Bw6761G2ScalarMul::new(gas, curve.clone())),
            Arc::new(Bw6761PairingCheck::new(gas, curve)),
            Arc::new(Bw6761PlonkVerify::new(gas, verifier)),
        ];

        let records = handlers
            .into_iter()
            .map(|handler| (handler.operation().address(), handler))
            .collect();
        Self { records }
    }

    /// Build a set from explicit records. Addresses must be unique.
    pub fn from_records(
        records: impl IntoIterator<Item = OperationRecord>,
    ) -> Result<Self, RegistryError> {
        let mut map = BTreeMap::new();
        for record in records {
            match map.entry(record.address) {
                btree_map::Entry::Occupied(_) => {
                    return Err(RegistryError::DuplicateAddress(record.address))
                }
                btree_map::Entry::Vacant(slot) => {
                    slot.insert(record.handler);
                }
            }
        }
        Ok(Self { records: map })
    }

    pub fn get(&self, address: &Address) -> Option<&dyn EcPrecompile> {
        self.records.get(address).map(|handler| handler.as_ref())
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.records.contains_key(address)
    }

    /// Registered addresses in ascending order
    pub fn addresses(&self) -> impl Iterator<Item = &Address> + '_ {
        self.records.keys()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Address, &dyn EcPrecompile)> + '_ {
        self.records
            .iter()
            .map(|(address, handler)| (address, handler.as_ref()))
    }

    pub fn operations(&self) -> impl Iterator<Item = Operation> + '_ {
        self.records.values().map(|handler| handler.operation())
    }

    /// Dispatch to `address`. `None` when nothing is registered there.
    pub fn call(
        &self,
        ctx: &dyn ExecutionContext,
        address: &Address,
        input: &[u8],
        supplied_gas: u64,
    ) -> Option<PrecompileResult> {
        let handler = self.get(address)?;
        Some(run_precompile(ctx, handler, input, supplied_gas))
    }
}

impl core::fmt::Debug for PrecompileSet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(address, handler)| (address, handler.operation())))
            .finish()
    }
}
