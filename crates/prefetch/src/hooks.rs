use stoker_primitives::TxHash;

/// Side-channel bookkeeping notifications for replay runs.
///
/// Purely observational: implementations must not influence replay, and the
/// replay path treats them as infallible. Every run that sees
/// [`on_run_started`](Self::on_run_started) sees exactly one of
/// [`on_run_completed`](Self::on_run_completed) or
/// [`on_run_aborted`](Self::on_run_aborted), on every exit path.
#[auto_impl::auto_impl(&, Arc)]
pub trait PrefetchHooks {
    /// Called once before the first transaction of a non-empty block is
    /// replayed.
    fn on_run_started(&self, block_number: u64);

    /// Called for each transaction as it is about to execute.
    fn on_transaction(&self, block_number: u64, hash: TxHash);

    /// Called after every transaction of the block replayed successfully.
    fn on_run_completed(&self, block_number: u64);

    /// Called when the run stops for any other reason: an unrecoverable
    /// sender, a failed message, a state failure, or cancellation.
    fn on_run_aborted(&self, block_number: u64);
}

/// A [`PrefetchHooks`] that does nothing.
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct NoopHooks;

impl PrefetchHooks for NoopHooks {
    fn on_run_started(&self, _block_number: u64) {}

    fn on_transaction(&self, _block_number: u64, _hash: TxHash) {}

    fn on_run_completed(&self, _block_number: u64) {}

    fn on_run_aborted(&self, _block_number: u64) {}
}
