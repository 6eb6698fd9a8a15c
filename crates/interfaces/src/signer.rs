use alloy_primitives::Address;
use stoker_primitives::{ForkRules, TransactionSigned};
use thiserror::Error;

/// Errors from resolving a transaction's sender.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SenderRecoveryError {
    /// The signature values are malformed or do not recover to a key.
    #[error("invalid transaction signature")]
    InvalidSignature,
    /// The transaction's signature scheme is not available under the active
    /// rule set, e.g. a replay-protected signature before Spurious Dragon or
    /// a dynamic fee transaction before London.
    #[error("signature scheme not supported by the active fork rules")]
    UnsupportedSignatureScheme,
}

/// Recovers transaction senders under a specific rule set.
///
/// The rule set decides which signature scheme variants are legal; the key
/// recovery itself is the implementor's concern. Resolution is deterministic:
/// the same transaction and rules always yield the same sender.
#[auto_impl::auto_impl(&, Arc)]
pub trait SenderResolver {
    /// Recovers the sender of `tx` under `rules`.
    fn resolve_sender(
        &self,
        tx: &TransactionSigned,
        rules: &ForkRules,
    ) -> Result<Address, SenderRecoveryError>;
}
