//! Speculative block replay for cache warming.
//!
//! The prefetcher blindly executes a block on top of a disposable state view
//! before the canonical processor runs the same block. Nothing it produces is
//! kept: receipts, gas totals and state mutations are discarded, failures are
//! silent, and the only product is a warmer cache (trie nodes, recovered
//! senders, touched storage) underneath the canonical pass.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod cancelled;
mod hooks;
mod metrics;
mod prefetcher;

pub use cancelled::CancelSignal;
pub use hooks::{NoopHooks, PrefetchHooks};
pub use prefetcher::StatePrefetcher;

pub use stoker_interfaces::{
    BlockEnv, Engine, EngineConfig, EngineFactory, ReplayError, SenderResolver, StateView,
};
