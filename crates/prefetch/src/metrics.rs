use metrics::{Counter, Gauge, Histogram};

/// Metrics for block prefetching, registered under the `prefetch` scope.
#[derive(Clone)]
pub(crate) struct PrefetcherMetrics {
    /// The number of transactions in the block being replayed.
    pub(crate) transactions: Gauge,
    /// A histogram of transactions per replayed block.
    pub(crate) transactions_histogram: Histogram,
    /// A histogram of execution duration per message.
    pub(crate) execution_duration: Histogram,
    /// A histogram of wall time per run.
    pub(crate) total_runtime: Histogram,
    /// Runs that replayed every transaction.
    pub(crate) completed_runs: Counter,
    /// Runs that stopped early.
    pub(crate) aborted_runs: Counter,
}

impl Default for PrefetcherMetrics {
    fn default() -> Self {
        Self {
            transactions: metrics::gauge!("prefetch.transactions"),
            transactions_histogram: metrics::histogram!("prefetch.transactions_histogram"),
            execution_duration: metrics::histogram!("prefetch.execution_duration"),
            total_runtime: metrics::histogram!("prefetch.total_runtime"),
            completed_runs: metrics::counter!("prefetch.completed_runs"),
            aborted_runs: metrics::counter!("prefetch.aborted_runs"),
        }
    }
}
