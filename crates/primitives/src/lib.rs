//! Commonly used types for speculative block replay: blocks, transactions,
//! executable messages, the per-block gas pool, and the chain specification
//! that decides which rule set a block is replayed under.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod block;
mod chainspec;
mod forkcondition;
mod gas;
mod hardfork;
mod header;
mod transaction;

pub use block::Block;
pub use chainspec::{ChainSpec, ChainSpecBuilder, DaoForkConfig, ForkRules, MAINNET};
pub use forkcondition::ForkCondition;
pub use gas::{GasPool, GasPoolExhausted};
pub use hardfork::Hardfork;
pub use header::Header;
pub use transaction::{
    Message, Signature, Transaction, TransactionSigned, TxEip1559, TxHash, TxLegacy,
};

pub use alloy_primitives::{self, Address, Bytes, TxKind, B256, U256};
