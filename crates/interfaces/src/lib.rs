//! Traits and errors for the collaborators of speculative block replay: the
//! disposable state view the replay mutates, the execution engine that
//! interprets messages against it, and sender resolution.
//!
//! The replay orchestrator lives in `stoker-prefetch`; implementations of
//! these traits are supplied by the embedding pipeline.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod engine;
mod error;
mod signer;
mod state;

pub use engine::{BlockEnv, Engine, EngineConfig, EngineError, EngineFactory};
pub use error::ReplayError;
pub use signer::{SenderRecoveryError, SenderResolver};
pub use state::{StateError, StateView};

#[cfg(any(test, feature = "test-utils"))]
/// Mock collaborators for testing replay orchestration.
pub mod test_utils;
