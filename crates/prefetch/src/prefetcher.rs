use crate::{
    hooks::{NoopHooks, PrefetchHooks},
    metrics::PrefetcherMetrics,
    CancelSignal,
};
use std::{sync::Arc, time::Instant};
use stoker_interfaces::{
    BlockEnv, Engine, EngineConfig, EngineFactory, ReplayError, SenderResolver, StateView,
};
use stoker_primitives::{Block, ChainSpec, GasPool, Hardfork, Message};
use tracing::trace;

/// Replays blocks against disposable state views to warm the backing caches.
///
/// A prefetcher blindly executes a block on top of an arbitrary state view
/// with the goal of pulling potentially useful data (trie nodes, recovered
/// senders, touched accounts and storage) out of cold storage before the
/// canonical processor executes the same block. All execution output is
/// discarded; only the cache side effects remain.
#[allow(missing_debug_implementations)]
pub struct StatePrefetcher<F, R, H = NoopHooks> {
    /// Chain configuration options.
    chain_spec: Arc<ChainSpec>,
    /// Builds one engine per replayed block.
    engine_factory: F,
    /// Recovers transaction senders under the block's rule set.
    sender_resolver: R,
    /// Side-channel bookkeeping.
    hooks: H,
    metrics: PrefetcherMetrics,
}

impl<F, R> StatePrefetcher<F, R> {
    /// Creates a new prefetcher without bookkeeping hooks.
    pub fn new(chain_spec: Arc<ChainSpec>, engine_factory: F, sender_resolver: R) -> Self {
        Self {
            chain_spec,
            engine_factory,
            sender_resolver,
            hooks: NoopHooks,
            metrics: PrefetcherMetrics::default(),
        }
    }
}

impl<F, R, H> StatePrefetcher<F, R, H> {
    /// Attaches bookkeeping hooks, replacing any previous ones.
    pub fn with_hooks<T: PrefetchHooks>(self, hooks: T) -> StatePrefetcher<F, R, T> {
        let Self { chain_spec, engine_factory, sender_resolver, metrics, .. } = self;
        StatePrefetcher { chain_spec, engine_factory, sender_resolver, hooks, metrics }
    }
}

impl<F, R, H> StatePrefetcher<F, R, H>
where
    F: EngineFactory,
    R: SenderResolver,
    H: PrefetchHooks,
{
    /// Replays `block` against `view` for its cache side effects.
    ///
    /// Best effort by contract: the run silently stops at the first obstacle
    /// (an unrecoverable sender, a failed message, a state failure, or an
    /// observed cancellation) and reports nothing to the caller; a block
    /// that fails here is the canonical pass's problem, not ours. The view
    /// is consumed and dropped whatever the outcome, which discards every
    /// speculative write; a failed or cancelled run only means the canonical
    /// pass executes cold instead of warm.
    pub fn prefetch<V: StateView>(
        &self,
        block: &Block,
        mut view: V,
        config: EngineConfig,
        cancel: Option<&CancelSignal>,
    ) {
        let started = Instant::now();
        self.metrics.transactions.set(block.body.len() as f64);
        self.metrics.transactions_histogram.record(block.body.len() as f64);

        // The side channel only tracks runs that replay transactions.
        let tracked = !block.body.is_empty();
        if tracked {
            self.hooks.on_run_started(block.header.number);
        }

        match self.replay(block, &mut view, config, cancel) {
            Ok(()) => {
                if tracked {
                    self.hooks.on_run_completed(block.header.number);
                }
                self.metrics.completed_runs.increment(1);
            }
            Err(err) => {
                trace!(
                    target: "prefetch",
                    block = block.header.number,
                    %err,
                    "Stopping block replay"
                );
                if tracked {
                    self.hooks.on_run_aborted(block.header.number);
                }
                self.metrics.aborted_runs.increment(1);
            }
        }

        self.metrics.total_runtime.record(started.elapsed());
        // Every speculative write dies with the view.
        drop(view);
    }

    /// Replays all transactions of `block` in order, funneling every abort
    /// cause through a single exit.
    fn replay<V: StateView>(
        &self,
        block: &Block,
        view: &mut V,
        config: EngineConfig,
        cancel: Option<&CancelSignal>,
    ) -> Result<(), ReplayError> {
        let header = &block.header;
        let rules = self.chain_spec.rules_at(header.number, header.timestamp);

        // Irregular state change at the DAO transition block, ahead of any
        // transaction. Defined entirely by chain configuration.
        if self.chain_spec.fork(Hardfork::Dao).transitions_at_block(header.number) {
            if let Some(dao) = self.chain_spec.dao_fork() {
                let drained: u128 = view.drain_balances(&dao.drain_list)?.into_iter().sum();
                view.increment_balances([(dao.refund_contract, drained)])?;
            }
        }

        let mut gas_pool = GasPool::new(header.gas_limit);
        let mut engine = self.engine_factory.engine::<V>(BlockEnv::new(header, rules), config);

        for (index, tx) in block.body.iter().enumerate() {
            // The canonical pass may have caught up, or the block may have
            // been reorged away; bail out between transactions.
            if cancel.is_some_and(|signal| signal.is_cancelled()) {
                return Err(ReplayError::Cancelled)
            }

            let sender = self.sender_resolver.resolve_sender(tx, &rules)?;
            let message = Message::new(tx, sender, header.base_fee_per_gas);

            view.set_tx_context(tx.hash(), index);
            self.hooks.on_transaction(header.number, tx.hash());

            // Receipts and gas totals are discarded; executing is what warms
            // the touched accounts and slots.
            let execution_started = Instant::now();
            engine.transact(&message, view, &mut gas_pool)?;
            self.metrics.execution_duration.record(execution_started.elapsed());

            // Pre-Byzantium the canonical pass commits a state root after
            // every transaction; recomputing it here pulls those trie nodes
            // into the cache.
            if rules.requires_intermediate_roots() {
                view.intermediate_root()?;
            }
        }

        // Post-Byzantium only the end-of-block root exists; warm it once.
        if !rules.requires_intermediate_roots() {
            view.final_root()?;
        }

        Ok(())
    }
}
