//! # Error Types
//!
//! Failures signalled by the wrapped protocols. They reach the engine as
//! `ConnectorError::Protocol` and abort the batch like any other error.

use sc_02_smart_account::errors::{ConnectorError, StateError};
use shared_types::{Address, U256};
use thiserror::Error;

/// Errors from the simulated external protocols.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// The market does not list this asset.
    #[error("unsupported market: {0}")]
    UnsupportedMarket(Address),

    /// The position token does not belong to the asset's market.
    #[error("position token {ctoken} does not belong to market {underlying}")]
    MarketMismatch {
        /// Asset of the market.
        underlying: Address,
        /// Position token supplied by the caller.
        ctoken: Address,
    },

    /// Debt would exceed borrowing power.
    #[error("insufficient collateral: debt value {debt_value} exceeds borrow limit {limit}")]
    InsufficientCollateral {
        /// Debt value after the operation.
        debt_value: U256,
        /// Collateral-weighted borrowing power.
        limit: U256,
    },

    /// Repayment larger than the outstanding debt.
    #[error("repay {amount} exceeds debt {debt}")]
    RepayExceedsDebt {
        /// Requested repayment.
        amount: U256,
        /// Outstanding debt.
        debt: U256,
    },

    /// The pool does not exist.
    #[error("unknown prize pool: {0}")]
    UnknownPool(Address),

    /// The controlled token is not the pool's ticket.
    #[error("invalid controlled token: {0}")]
    InvalidControlledToken(Address),

    /// The early exit fee is above the caller's limit.
    #[error("exit fee {fee} exceeds maximum {max}")]
    ExitFeeTooHigh {
        /// Fee the pool would charge.
        fee: U256,
        /// Caller's limit.
        max: U256,
    },

    /// An operator tried to move tickets it does not own.
    #[error("{operator} may not withdraw for {owner}")]
    NotApproved {
        /// Caller.
        operator: Address,
        /// Ticket owner.
        owner: Address,
    },

    /// Fixed-point arithmetic overflowed.
    #[error("arithmetic overflow")]
    MathOverflow,

    /// A token movement failed.
    #[error(transparent)]
    State(#[from] StateError),
}

impl From<ProtocolError> for ConnectorError {
    fn from(err: ProtocolError) -> Self {
        match err {
            ProtocolError::State(state) => Self::State(state),
            other => Self::Protocol(other.to_string()),
        }
    }
}
