use crate::{EngineError, SenderRecoveryError, StateError};
use thiserror::Error;

/// Why a speculative replay run stopped before completing.
///
/// Replay is best effort: none of these escape the replay entry point. They
/// feed logging and metrics, nothing else. In particular they are never a
/// block validity verdict; that determination belongs to the canonical pass.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReplayError {
    /// A transaction's sender could not be recovered. A block carrying such
    /// a transaction is invalid and the canonical pass will reject it, so
    /// there is no value in replaying the rest.
    #[error(transparent)]
    SenderRecovery(#[from] SenderRecoveryError),
    /// The engine failed a message.
    #[error(transparent)]
    Engine(#[from] EngineError),
    /// The state view failed outside of message execution.
    #[error(transparent)]
    State(#[from] StateError),
    /// The run was cancelled from outside.
    #[error("replay cancelled")]
    Cancelled,
}
