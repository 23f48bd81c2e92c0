//! # Lending Market
//!
//! Compound-style money market. Supplying an asset mints its position token
//! 1:1; borrowing records debt in the market's storage. Every borrow and
//! withdrawal is followed by a solvency check across all listed assets.

use crate::errors::ProtocolError;
use sc_02_smart_account::domain::journal::StateJournal;
use shared_types::{Address, StorageKey, StorageValue, U256, WAD};
use std::collections::BTreeMap;
use tracing::debug;

/// Basis-point denominator.
pub const BPS: u64 = 10_000;

/// Listing parameters of one asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketConfig {
    /// Position token minted on supply.
    pub ctoken: Address,
    /// Price of one unit in reference currency, scaled by 1e18.
    pub price: U256,
    /// Share of supplied value usable as borrowing power, in basis points.
    pub collateral_factor_bps: u64,
}

/// A money market holding every listed asset at `address`.
#[derive(Debug, Clone)]
pub struct LendingMarket {
    address: Address,
    markets: BTreeMap<Address, MarketConfig>,
}

impl LendingMarket {
    /// Creates a market with no listings.
    #[must_use]
    pub fn new(address: Address) -> Self {
        Self {
            address,
            markets: BTreeMap::new(),
        }
    }

    /// Lists `underlying`.
    #[must_use]
    pub fn with_market(mut self, underlying: Address, config: MarketConfig) -> Self {
        self.markets.insert(underlying, config);
        self
    }

    /// Address holding the market's reserves.
    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    /// Listing of `underlying`.
    pub fn market(&self, underlying: &Address) -> Result<&MarketConfig, ProtocolError> {
        self.markets
            .get(underlying)
            .ok_or(ProtocolError::UnsupportedMarket(*underlying))
    }

    /// Fails unless `ctoken` is the position token of `underlying`.
    pub fn check_pair(&self, underlying: &Address, ctoken: &Address) -> Result<(), ProtocolError> {
        if self.market(underlying)?.ctoken == *ctoken {
            Ok(())
        } else {
            Err(ProtocolError::MarketMismatch {
                underlying: *underlying,
                ctoken: *ctoken,
            })
        }
    }

    // =========================================================================
    // POSITIONS
    // =========================================================================

    /// Supplied amount of `underlying` (the position token balance).
    pub fn supplied(
        &self,
        journal: &StateJournal<'_>,
        account: &Address,
        underlying: &Address,
    ) -> Result<U256, ProtocolError> {
        let market = self.market(underlying)?;
        Ok(journal.balance_of(account, &market.ctoken))
    }

    /// Outstanding debt in `underlying`.
    pub fn debt_of(
        &self,
        journal: &StateJournal<'_>,
        account: &Address,
        underlying: &Address,
    ) -> U256 {
        journal
            .storage(&self.address, &debt_key(account, underlying))
            .to_u256()
    }

    // =========================================================================
    // OPERATIONS
    // =========================================================================

    /// Moves `amount` of `underlying` into the market and mints position tokens.
    pub fn supply(
        &self,
        journal: &mut StateJournal<'_>,
        account: Address,
        underlying: Address,
        amount: U256,
    ) -> Result<U256, ProtocolError> {
        let market = *self.market(&underlying)?;
        journal.transfer(underlying, account, self.address, amount)?;
        journal.mint(market.ctoken, account, amount)?;
        debug!(account = %account, underlying = %underlying, amount = %amount, "Market supply");
        Ok(amount)
    }

    /// Burns position tokens and returns `amount` of `underlying`.
    pub fn redeem(
        &self,
        journal: &mut StateJournal<'_>,
        account: Address,
        underlying: Address,
        amount: U256,
    ) -> Result<U256, ProtocolError> {
        let market = *self.market(&underlying)?;
        journal.burn(market.ctoken, account, amount)?;
        journal.transfer(underlying, self.address, account, amount)?;
        self.check_solvency(journal, &account)?;
        debug!(account = %account, underlying = %underlying, amount = %amount, "Market redeem");
        Ok(amount)
    }

    /// Lends `amount` of `underlying` against the account's collateral.
    pub fn borrow(
        &self,
        journal: &mut StateJournal<'_>,
        account: Address,
        underlying: Address,
        amount: U256,
    ) -> Result<U256, ProtocolError> {
        self.market(&underlying)?;
        let debt = self
            .debt_of(journal, &account, &underlying)
            .checked_add(amount)
            .ok_or(ProtocolError::MathOverflow)?;
        self.write_debt(journal, &account, &underlying, debt);
        journal.transfer(underlying, self.address, account, amount)?;
        self.check_solvency(journal, &account)?;
        debug!(account = %account, underlying = %underlying, amount = %amount, "Market borrow");
        Ok(amount)
    }

    /// Pays back `amount` of `underlying` debt.
    pub fn repay(
        &self,
        journal: &mut StateJournal<'_>,
        account: Address,
        underlying: Address,
        amount: U256,
    ) -> Result<U256, ProtocolError> {
        self.market(&underlying)?;
        let debt = self.debt_of(journal, &account, &underlying);
        let remaining = debt
            .checked_sub(amount)
            .ok_or(ProtocolError::RepayExceedsDebt { amount, debt })?;
        journal.transfer(underlying, account, self.address, amount)?;
        self.write_debt(journal, &account, &underlying, remaining);
        debug!(account = %account, underlying = %underlying, amount = %amount, "Market repay");
        Ok(amount)
    }

    /// Fails if the account's debt value exceeds its borrowing power.
    pub fn check_solvency(
        &self,
        journal: &StateJournal<'_>,
        account: &Address,
    ) -> Result<(), ProtocolError> {
        let mut limit = U256::zero();
        let mut debt_value = U256::zero();

        for (underlying, market) in &self.markets {
            let supplied = journal.balance_of(account, &market.ctoken);
            let collateral = value_of(supplied, market.price)?
                .checked_mul(U256::from(market.collateral_factor_bps))
                .ok_or(ProtocolError::MathOverflow)?
                / U256::from(BPS);
            limit = limit.checked_add(collateral).ok_or(ProtocolError::MathOverflow)?;

            let debt = self.debt_of(journal, account, underlying);
            debt_value = debt_value
                .checked_add(value_of(debt, market.price)?)
                .ok_or(ProtocolError::MathOverflow)?;
        }

        if debt_value > limit {
            return Err(ProtocolError::InsufficientCollateral { debt_value, limit });
        }
        Ok(())
    }

    fn write_debt(
        &self,
        journal: &mut StateJournal<'_>,
        account: &Address,
        underlying: &Address,
        debt: U256,
    ) {
        journal.set_storage(
            self.address,
            debt_key(account, underlying),
            StorageValue::from_u256(debt),
        );
    }
}

/// Storage key of an account's debt in one asset.
#[must_use]
pub fn debt_key(account: &Address, underlying: &Address) -> StorageKey {
    StorageKey::derive(&[
        b"debt".as_slice(),
        account.as_bytes().as_slice(),
        underlying.as_bytes().as_slice(),
    ])
}

fn value_of(amount: U256, price: U256) -> Result<U256, ProtocolError> {
    amount
        .checked_mul(price)
        .map(|v| v / U256::from(WAD))
        .ok_or(ProtocolError::MathOverflow)
}
