use crate::{StateError, StateView};
use alloy_primitives::Address;
use stoker_primitives::{ForkRules, GasPool, GasPoolExhausted, Header, Message};
use thiserror::Error;

/// Errors the execution engine can report for a single message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The message's gas limit exceeds the gas left in the block's pool.
    #[error(transparent)]
    GasLimitReached(#[from] GasPoolExhausted),
    /// The backing state failed while executing.
    #[error(transparent)]
    State(#[from] StateError),
    /// The engine rejected or failed the message.
    #[error("message execution failed: {0}")]
    Evm(String),
}

/// The execution environment shared by every message of one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockEnv {
    /// Block number.
    pub number: u64,
    /// Block beneficiary.
    pub beneficiary: Address,
    /// Block timestamp.
    pub timestamp: u64,
    /// Block gas limit.
    pub gas_limit: u64,
    /// Base fee per gas, once the fee market is active.
    pub base_fee: Option<u64>,
    /// Rule flags active for this block.
    pub rules: ForkRules,
}

impl BlockEnv {
    /// Builds the environment for `header` under the given rules.
    pub fn new(header: &Header, rules: ForkRules) -> Self {
        Self {
            number: header.number,
            beneficiary: header.beneficiary,
            timestamp: header.timestamp,
            gas_limit: header.gas_limit,
            base_fee: header.base_fee_per_gas,
            rules,
        }
    }
}

/// Engine tuning flags, passed through opaquely by replay entry points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineConfig {
    /// Skip account nonce checks. Speculative replays run against state that
    /// may be ahead of or behind the block being replayed.
    pub disable_nonce_check: bool,
    /// Skip base-fee validity checks.
    pub no_base_fee: bool,
    /// Emit engine-level traces for every executed message.
    pub trace: bool,
}

impl EngineConfig {
    /// The configuration used for speculative replay: nonce checks off,
    /// everything else strict.
    pub const fn speculative() -> Self {
        Self { disable_nonce_check: true, no_base_fee: false, trace: false }
    }
}

/// A type that executes single messages against a state view.
///
/// Internal semantics (call stack, gas metering, storage I/O) are opaque to
/// callers; all that surfaces is gas accounting against the shared pool and
/// success or failure.
pub trait Engine<V: StateView> {
    /// Executes `message` against `view`, drawing the message's gas from
    /// `gas_pool` and applying speculative state changes to the view.
    ///
    /// Returns the gas used by the message.
    fn transact(
        &mut self,
        message: &Message,
        view: &mut V,
        gas_pool: &mut GasPool,
    ) -> Result<u64, EngineError>;
}

/// A type that builds one [`Engine`] per replayed block.
pub trait EngineFactory {
    /// The engine produced by this factory.
    type Engine<V: StateView>: Engine<V>;

    /// Returns a new engine for the given block environment.
    fn engine<V: StateView>(&self, env: BlockEnv, config: EngineConfig) -> Self::Engine<V>;
}
