//! # Simulated External Protocols
//!
//! In-memory stand-ins for the protocols the connectors wrap. Configuration
//! is immutable; every balance and debt lives in the journaled world.

pub mod lending_market;
pub mod prize_pool;

pub use lending_market::*;
pub use prize_pool::*;
