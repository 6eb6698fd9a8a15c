use crate::{Header, TransactionSigned};
use std::ops::Deref;

/// A block: a header and an ordered list of transactions.
///
/// Transaction order is authoritative. Replay processes the body front to
/// back because a transaction may depend on state mutated by an earlier one
/// in the same block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Block {
    /// Block header.
    pub header: Header,
    /// Transactions in this block.
    pub body: Vec<TransactionSigned>,
}

impl Deref for Block {
    type Target = Header;

    fn deref(&self) -> &Self::Target {
        &self.header
    }
}
