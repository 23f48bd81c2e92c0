//! # Prize Pool
//!
//! No-loss lottery pool. Depositors receive tickets 1:1 for the pool's
//! underlying token; instant withdrawal burns tickets and pays out the
//! deposit minus an early-exit fee that stays in the pool.

use crate::errors::ProtocolError;
use crate::protocols::lending_market::BPS;
use sc_02_smart_account::domain::journal::StateJournal;
use shared_types::{Address, U256};
use tracing::debug;

/// A prize pool at `address` accepting `token` and issuing `ticket`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrizePool {
    address: Address,
    token: Address,
    ticket: Address,
    exit_fee_bps: u64,
}

impl PrizePool {
    /// Default early-exit fee: 1%.
    pub const DEFAULT_EXIT_FEE_BPS: u64 = 100;

    /// Creates a pool with the default exit fee.
    #[must_use]
    pub fn new(address: Address, token: Address, ticket: Address) -> Self {
        Self {
            address,
            token,
            ticket,
            exit_fee_bps: Self::DEFAULT_EXIT_FEE_BPS,
        }
    }

    /// Overrides the exit fee.
    #[must_use]
    pub fn with_exit_fee_bps(mut self, bps: u64) -> Self {
        self.exit_fee_bps = bps.min(BPS);
        self
    }

    /// Pool address, holding the deposits.
    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    /// Deposit token.
    #[must_use]
    pub fn token(&self) -> Address {
        self.token
    }

    /// Ticket token.
    #[must_use]
    pub fn ticket(&self) -> Address {
        self.ticket
    }

    /// Fee charged on an instant withdrawal of `amount`.
    pub fn exit_fee(&self, amount: U256) -> Result<U256, ProtocolError> {
        amount
            .checked_mul(U256::from(self.exit_fee_bps))
            .map(|v| v / U256::from(BPS))
            .ok_or(ProtocolError::MathOverflow)
    }

    fn check_ticket(&self, controlled_token: &Address) -> Result<(), ProtocolError> {
        if *controlled_token == self.ticket {
            Ok(())
        } else {
            Err(ProtocolError::InvalidControlledToken(*controlled_token))
        }
    }

    /// Takes `amount` of the deposit token from `payer` and mints tickets to `to`.
    pub fn deposit_to(
        &self,
        journal: &mut StateJournal<'_>,
        payer: Address,
        to: Address,
        amount: U256,
        controlled_token: Address,
    ) -> Result<U256, ProtocolError> {
        self.check_ticket(&controlled_token)?;
        journal.transfer(self.token, payer, self.address, amount)?;
        journal.mint(self.ticket, to, amount)?;
        debug!(pool = %self.address, to = %to, amount = %amount, "Prize pool deposit");
        Ok(amount)
    }

    /// Burns `amount` tickets of `from` and pays out the rest after the exit fee.
    ///
    /// Only the ticket holder may withdraw its own tickets. Returns the
    /// amount paid out and the fee retained.
    pub fn withdraw_instantly_from(
        &self,
        journal: &mut StateJournal<'_>,
        operator: Address,
        from: Address,
        amount: U256,
        controlled_token: Address,
        max_exit_fee: U256,
    ) -> Result<(U256, U256), ProtocolError> {
        if operator != from {
            return Err(ProtocolError::NotApproved {
                operator,
                owner: from,
            });
        }
        self.check_ticket(&controlled_token)?;

        let fee = self.exit_fee(amount)?;
        if fee > max_exit_fee {
            return Err(ProtocolError::ExitFeeTooHigh {
                fee,
                max: max_exit_fee,
            });
        }
        let redeemed = amount - fee;

        journal.burn(self.ticket, from, amount)?;
        journal.transfer(self.token, self.address, from, redeemed)?;
        debug!(
            pool = %self.address,
            from = %from,
            redeemed = %redeemed,
            fee = %fee,
            "Prize pool withdrawal"
        );
        Ok((redeemed, fee))
    }
}
