//! Mock collaborators for testing replay orchestration.
//!
//! All mocks hand out cloneable recording handles, so a test can keep one
//! while the replay consumes the other.

use crate::{
    BlockEnv, Engine, EngineConfig, EngineError, EngineFactory, SenderRecoveryError,
    SenderResolver, StateError, StateView,
};
use alloy_primitives::{Address, B256};
use parking_lot::Mutex;
use std::{
    collections::{HashMap, HashSet},
    fmt,
    sync::Arc,
};
use stoker_primitives::{ForkRules, GasPool, Message, Transaction, TransactionSigned, TxHash};

#[derive(Debug, Default)]
struct StateViewInner {
    /// Seed balances standing in for the durable store. Never written.
    durable: HashMap<Address, u128>,
    /// Speculative balance overlay.
    pending: HashMap<Address, u128>,
    tx_contexts: Vec<(TxHash, usize)>,
    intermediate_roots: usize,
    final_roots: usize,
    fail_roots: bool,
}

impl StateViewInner {
    fn balance_of(&self, address: Address) -> u128 {
        self.pending
            .get(&address)
            .copied()
            .unwrap_or_else(|| self.durable.get(&address).copied().unwrap_or_default())
    }
}

/// A recording [`StateView`] over a seeded set of balances.
///
/// Speculative writes go to an overlay; the seed plays the durable store and
/// is never written through, so tests can assert that replay left it alone.
#[derive(Clone, Debug, Default)]
pub struct MockStateView {
    inner: Arc<Mutex<StateViewInner>>,
}

impl MockStateView {
    /// Creates a view over the given durable balances.
    pub fn with_balances(balances: impl IntoIterator<Item = (Address, u128)>) -> Self {
        let view = Self::default();
        view.inner.lock().durable = balances.into_iter().collect();
        view
    }

    /// Makes every root computation fail.
    pub fn fail_roots(self) -> Self {
        self.inner.lock().fail_roots = true;
        self
    }

    /// The speculative balance of `address`: the pending write if there is
    /// one, the durable seed otherwise.
    pub fn balance(&self, address: Address) -> u128 {
        self.inner.lock().balance_of(address)
    }

    /// The durable balance of `address`, ignoring speculative writes.
    pub fn durable_balance(&self, address: Address) -> u128 {
        self.inner.lock().durable.get(&address).copied().unwrap_or_default()
    }

    /// Transaction contexts bound on this view, in binding order.
    pub fn tx_contexts(&self) -> Vec<(TxHash, usize)> {
        self.inner.lock().tx_contexts.clone()
    }

    /// Number of mid-block root computations performed.
    pub fn intermediate_roots(&self) -> usize {
        self.inner.lock().intermediate_roots
    }

    /// Number of end-of-block root computations performed.
    pub fn final_roots(&self) -> usize {
        self.inner.lock().final_roots
    }
}

impl StateView for MockStateView {
    fn set_tx_context(&mut self, hash: TxHash, index: usize) {
        self.inner.lock().tx_contexts.push((hash, index));
    }

    fn drain_balances(&mut self, addresses: &[Address]) -> Result<Vec<u128>, StateError> {
        let mut inner = self.inner.lock();
        let mut drained = Vec::with_capacity(addresses.len());
        for address in addresses {
            drained.push(inner.balance_of(*address));
            inner.pending.insert(*address, 0);
        }
        Ok(drained)
    }

    fn increment_balances(
        &mut self,
        balances: impl IntoIterator<Item = (Address, u128)>,
    ) -> Result<(), StateError> {
        let mut inner = self.inner.lock();
        for (address, amount) in balances {
            let balance = inner.balance_of(address) + amount;
            inner.pending.insert(address, balance);
        }
        Ok(())
    }

    fn intermediate_root(&mut self) -> Result<B256, StateError> {
        let mut inner = self.inner.lock();
        if inner.fail_roots {
            return Err(StateError("root computation unavailable".to_string()))
        }
        inner.intermediate_roots += 1;
        Ok(B256::ZERO)
    }

    fn final_root(&mut self) -> Result<B256, StateError> {
        let mut inner = self.inner.lock();
        if inner.fail_roots {
            return Err(StateError("root computation unavailable".to_string()))
        }
        inner.final_roots += 1;
        Ok(B256::ZERO)
    }
}

#[derive(Default)]
struct EngineInner {
    executed: Vec<Message>,
    fail_at: Option<usize>,
    on_transact: Option<Box<dyn FnMut(usize) + Send>>,
}

/// A scripted [`Engine`] that records the messages it executes.
///
/// Gas accounting is real: every message draws its gas limit from the pool,
/// so an undersized pool fails the run the way a real engine would.
#[derive(Clone, Default)]
pub struct MockEngine {
    inner: Arc<Mutex<EngineInner>>,
}

impl MockEngine {
    /// Creates a new engine that executes everything it is given.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails the `index`-th executed message.
    pub fn fail_at(self, index: usize) -> Self {
        self.inner.lock().fail_at = Some(index);
        self
    }

    /// Invokes `hook` with the execution index before each message runs.
    pub fn on_transact(self, hook: impl FnMut(usize) + Send + 'static) -> Self {
        self.inner.lock().on_transact = Some(Box::new(hook));
        self
    }

    /// Messages executed so far, in execution order.
    pub fn executed(&self) -> Vec<Message> {
        self.inner.lock().executed.clone()
    }
}

impl fmt::Debug for MockEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockEngine")
            .field("executed", &self.inner.lock().executed.len())
            .finish_non_exhaustive()
    }
}

impl<V: StateView> Engine<V> for MockEngine {
    fn transact(
        &mut self,
        message: &Message,
        _view: &mut V,
        gas_pool: &mut GasPool,
    ) -> Result<u64, EngineError> {
        let mut inner = self.inner.lock();
        let index = inner.executed.len();
        if let Some(hook) = inner.on_transact.as_mut() {
            hook(index);
        }
        if inner.fail_at == Some(index) {
            return Err(EngineError::Evm("scripted failure".to_string()))
        }
        gas_pool.subtract(message.gas_limit)?;
        inner.executed.push(message.clone());
        Ok(message.gas_limit)
    }
}

/// An [`EngineFactory`] handing out clones of one [`MockEngine`] and
/// recording the environments it was asked for.
#[derive(Clone, Debug, Default)]
pub struct MockEngineFactory {
    engine: MockEngine,
    envs: Arc<Mutex<Vec<(BlockEnv, EngineConfig)>>>,
}

impl MockEngineFactory {
    /// Creates a factory handing out clones of `engine`.
    pub fn new(engine: MockEngine) -> Self {
        Self { engine, envs: Arc::default() }
    }

    /// The environments and configs engines were created for.
    pub fn envs(&self) -> Vec<(BlockEnv, EngineConfig)> {
        self.envs.lock().clone()
    }
}

impl EngineFactory for MockEngineFactory {
    type Engine<V: StateView> = MockEngine;

    fn engine<V: StateView>(&self, env: BlockEnv, config: EngineConfig) -> Self::Engine<V> {
        self.envs.lock().push((env, config));
        self.engine.clone()
    }
}

/// A [`SenderResolver`] backed by a transaction hash to sender map.
///
/// Scheme legality under the rule set is honored the way a real resolver
/// would: replay-protected legacy signatures need Spurious Dragon, dynamic
/// fee transactions need London. Unknown and poisoned hashes fail.
#[derive(Clone, Debug, Default)]
pub struct StaticSenderResolver {
    senders: HashMap<TxHash, Address>,
    poisoned: HashSet<TxHash>,
}

impl StaticSenderResolver {
    /// Creates a resolver over the given hash to sender assignments.
    pub fn new(senders: impl IntoIterator<Item = (TxHash, Address)>) -> Self {
        Self { senders: senders.into_iter().collect(), poisoned: HashSet::new() }
    }

    /// Makes resolution fail for the given transaction hash.
    pub fn poison(mut self, hash: TxHash) -> Self {
        self.poisoned.insert(hash);
        self
    }
}

impl SenderResolver for StaticSenderResolver {
    fn resolve_sender(
        &self,
        tx: &TransactionSigned,
        rules: &ForkRules,
    ) -> Result<Address, SenderRecoveryError> {
        match &tx.transaction {
            Transaction::Legacy(legacy) if legacy.chain_id.is_some() && !rules.spurious_dragon => {
                return Err(SenderRecoveryError::UnsupportedSignatureScheme)
            }
            Transaction::Eip1559(_) if !rules.london => {
                return Err(SenderRecoveryError::UnsupportedSignatureScheme)
            }
            _ => {}
        }
        if self.poisoned.contains(&tx.hash()) {
            return Err(SenderRecoveryError::InvalidSignature)
        }
        self.senders.get(&tx.hash()).copied().ok_or(SenderRecoveryError::InvalidSignature)
    }
}
