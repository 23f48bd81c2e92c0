//! # Amount
//!
//! Tagged amount used by every connector argument layout.
//!
//! On the wire an amount is a single `U256`; the all-ones value means "use the
//! entire available balance or position". Inside the workspace the two cases
//! are distinct variants so no connector compares against a magic constant.

use crate::entities::U256;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A connector amount: a literal quantity or "everything available".
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "U256", into = "U256")]
pub enum Amount {
    /// An exact quantity in base units.
    Literal(U256),
    /// The whole available balance/position, resolved by the connector.
    EntireBalance,
}

impl Amount {
    /// Wire value reserved for [`Amount::EntireBalance`].
    pub const ENTIRE_BALANCE_RAW: U256 = U256::MAX;

    /// Interprets a raw wire value.
    #[must_use]
    pub fn from_raw(raw: U256) -> Self {
        if raw == Self::ENTIRE_BALANCE_RAW {
            Self::EntireBalance
        } else {
            Self::Literal(raw)
        }
    }

    /// Encodes back to the wire value.
    #[must_use]
    pub fn to_raw(self) -> U256 {
        match self {
            Self::Literal(value) => value,
            Self::EntireBalance => Self::ENTIRE_BALANCE_RAW,
        }
    }

    /// Resolves against the available quantity.
    ///
    /// `available` is only evaluated for [`Amount::EntireBalance`].
    pub fn resolve_with<E>(self, available: impl FnOnce() -> Result<U256, E>) -> Result<U256, E> {
        match self {
            Self::Literal(value) => Ok(value),
            Self::EntireBalance => available(),
        }
    }

    /// Returns true for [`Amount::EntireBalance`].
    #[must_use]
    pub fn is_entire_balance(self) -> bool {
        matches!(self, Self::EntireBalance)
    }
}

impl From<U256> for Amount {
    fn from(raw: U256) -> Self {
        Self::from_raw(raw)
    }
}

impl From<Amount> for U256 {
    fn from(amount: Amount) -> Self {
        amount.to_raw()
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self::Literal(U256::from(value))
    }
}

impl fmt::Debug for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => write!(f, "Literal({value})"),
            Self::EntireBalance => write!(f, "EntireBalance"),
        }
    }
}
