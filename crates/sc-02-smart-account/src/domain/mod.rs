//! # Domain Layer (Inner Hexagon)
//!
//! Pure batch-execution concepts: configuration, the scratch store, the state
//! journal, the per-spell context and the audit records.
//! NO locking, NO async, NO event bus.

pub mod config;
pub mod context;
pub mod journal;
pub mod records;
pub mod scratch;

pub use config::*;
pub use context::*;
pub use journal::*;
pub use records::*;
pub use scratch::*;
