use alloy_primitives::{Address, B256};

/// Block header.
///
/// Only the fields the replay path consults are carried here; header decoding
/// and hash derivation happen upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Header {
    /// The hash of the parent block.
    pub parent_hash: B256,
    /// The address that receives this block's fees.
    pub beneficiary: Address,
    /// The block number.
    pub number: u64,
    /// The unix timestamp of the block.
    pub timestamp: u64,
    /// The maximum amount of gas the block's transactions may consume.
    pub gas_limit: u64,
    /// The EIP-1559 base fee per gas, once the fee market is active.
    pub base_fee_per_gas: Option<u64>,
}
