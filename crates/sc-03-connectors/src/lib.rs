//! # SC-03 Connectors - Protocol Adapters
//!
//! Stateless connectors that wrap one external protocol each and present the
//! uniform [`Connector`](sc_02_smart_account::ports::outbound::Connector)
//! interface to the casting engine.
//!
//! ## Connectors
//!
//! | Connector | Methods | Wraps |
//! |-----------|---------|-------|
//! | [`LendingConnector`] | `deposit`, `withdraw`, `borrow`, `payback` | [`LendingMarket`] |
//! | [`PrizePoolConnector`] | `depositTo`, `withdrawInstantlyFrom` | [`PrizePool`] |
//!
//! ## Argument Conventions
//!
//! Every method takes an [`Amount`](shared_types::Amount) plus a `get_id` and
//! a `set_id` scratch slot:
//!
//! - a non-zero `get_id` replaces the literal amount with the slot's value
//! - `Amount::EntireBalance` resolves to the whole wallet balance or position
//! - a non-zero `set_id` receives the amount actually moved
//!
//! ## Protocols
//!
//! The wrapped protocols are in-memory simulations whose state lives in the
//! account's journaled world, so a failed batch rolls them back too.

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod connectors;
pub mod errors;
pub mod protocols;

pub use connectors::lending::{LendingArgs, LendingConnector, TokenMapping, TokenPair};
pub use connectors::prize_pool::{DepositToArgs, PrizePoolConnector, WithdrawInstantlyArgs};
pub use errors::ProtocolError;
pub use protocols::lending_market::{LendingMarket, MarketConfig};
pub use protocols::prize_pool::PrizePool;
