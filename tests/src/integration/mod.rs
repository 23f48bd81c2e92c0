//! Cross-crate integration tests, grouped by the behavior they pin down.

pub mod atomicity;
pub mod events;
pub mod ordering;
pub mod reentrancy;
pub mod registry;
pub mod scenarios;
