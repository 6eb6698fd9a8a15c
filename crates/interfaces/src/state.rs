use alloy_primitives::{Address, B256};
use stoker_primitives::TxHash;
use thiserror::Error;

/// Error from the backing store of a state view.
///
/// The description is opaque to the replay path, which discards the run on
/// any state failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("state view backend error: {0}")]
pub struct StateError(pub String);

/// A disposable projection of account and storage state.
///
/// Writes are speculative: they land in the view's cache layer and are never
/// flushed to the durable store. A view backs exactly one replay run and is
/// dropped when the run ends, whatever the outcome; dropping it is the only
/// rollback that ever happens.
///
/// The underlying cache may be shared with concurrent readers and other
/// speculative writers; tolerating that is the implementation's contract.
pub trait StateView {
    /// Binds the identity and block position of the transaction that
    /// subsequent execution works on behalf of, for context-sensitive
    /// bookkeeping such as access-list tracking.
    fn set_tx_context(&mut self, hash: TxHash, index: usize);

    /// Drains the balance of each given account to zero, returning the
    /// drained amounts in order.
    fn drain_balances(&mut self, addresses: &[Address]) -> Result<Vec<u128>, StateError>;

    /// Adds the given amounts to the balances of the given accounts.
    fn increment_balances(
        &mut self,
        balances: impl IntoIterator<Item = (Address, u128)>,
    ) -> Result<(), StateError>;

    /// Computes the state root over all pending changes mid-block.
    ///
    /// Callers may discard the returned root; computing it is what pulls
    /// trie nodes into the cache.
    fn intermediate_root(&mut self) -> Result<B256, StateError>;

    /// Computes the state root a commit of the full block would produce.
    fn final_root(&mut self) -> Result<B256, StateError>;
}
