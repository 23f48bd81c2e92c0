//! # Prize-Pool Connector
//!
//! Wraps one or more [`PrizePool`]s. The pool is selected by address in the
//! arguments, so a single registered connector serves every pool it knows.

use super::unknown_method;
use crate::errors::ProtocolError;
use crate::protocols::prize_pool::PrizePool;
use sc_02_smart_account::domain::context::SpellContext;
use sc_02_smart_account::domain::records::SpellOutput;
use sc_02_smart_account::errors::ConnectorError;
use sc_02_smart_account::ports::outbound::Connector;
use serde::{Deserialize, Serialize};
use serde_json::json;
use shared_types::{decode_args, Address, Amount, SlotId, U256};
use std::collections::BTreeMap;
use tracing::debug;

/// `depositTo` arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositToArgs {
    /// Pool to deposit into.
    pub prize_pool: Address,
    /// Ticket recipient.
    pub to: Address,
    /// Deposit amount, or the whole wallet balance.
    pub amount: Amount,
    /// Ticket token of the pool.
    pub controlled_token: Address,
    /// Referral address, recorded in the event only.
    pub referrer: Address,
    /// Slot overriding `amount` when non-zero.
    pub get_id: SlotId,
    /// Slot receiving the deposited amount.
    pub set_id: SlotId,
}

/// `withdrawInstantlyFrom` arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawInstantlyArgs {
    /// Pool to withdraw from.
    pub prize_pool: Address,
    /// Ticket owner.
    pub from: Address,
    /// Tickets to burn, or the whole ticket balance.
    pub amount: Amount,
    /// Ticket token of the pool.
    pub controlled_token: Address,
    /// Highest acceptable exit fee.
    pub max_exit_fee: U256,
    /// Slot overriding `amount` when non-zero.
    pub get_id: SlotId,
    /// Slot receiving the tickets burned.
    pub set_id: SlotId,
}

/// Connector for PoolTogether-style prize pools.
pub struct PrizePoolConnector {
    name: String,
    pools: BTreeMap<Address, PrizePool>,
}

impl PrizePoolConnector {
    /// Name the connector is usually registered under.
    pub const DEFAULT_NAME: &'static str = "POOLTOGETHER-A";

    /// Creates a connector that knows no pools yet.
    #[must_use]
    pub fn new() -> Self {
        Self::named(Self::DEFAULT_NAME)
    }

    /// Creates a connector reporting a custom name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pools: BTreeMap::new(),
        }
    }

    /// Adds a pool.
    #[must_use]
    pub fn with_pool(mut self, pool: PrizePool) -> Self {
        self.pools.insert(pool.address(), pool);
        self
    }

    /// Looks up a pool by address.
    pub fn pool(&self, address: &Address) -> Result<&PrizePool, ProtocolError> {
        self.pools
            .get(address)
            .ok_or(ProtocolError::UnknownPool(*address))
    }

    fn deposit_to(
        &self,
        args: &[u8],
        ctx: &mut SpellContext<'_, '_>,
    ) -> Result<SpellOutput, ConnectorError> {
        let args: DepositToArgs = decode_args(args)?;
        let pool = self.pool(&args.prize_pool)?;
        let account = ctx.account();
        let amount = ctx
            .amount_from(args.amount, args.get_id)
            .resolve_with(|| {
                Ok::<_, ConnectorError>(ctx.state_ref().balance_of(&account, &pool.token()))
            })?;

        pool.deposit_to(ctx.state(), account, args.to, amount, args.controlled_token)?;
        ctx.set_slot(args.set_id, amount);

        Ok(SpellOutput::new(
            amount,
            "LogDepositTo",
            json!({
                "prizePool": args.prize_pool.to_string(),
                "to": args.to.to_string(),
                "amount": amount.to_string(),
                "controlledToken": args.controlled_token.to_string(),
                "referrer": args.referrer.to_string(),
                "getId": args.get_id.0,
                "setId": args.set_id.0,
            }),
        ))
    }

    fn withdraw_instantly_from(
        &self,
        args: &[u8],
        ctx: &mut SpellContext<'_, '_>,
    ) -> Result<SpellOutput, ConnectorError> {
        let args: WithdrawInstantlyArgs = decode_args(args)?;
        let pool = self.pool(&args.prize_pool)?;
        let account = ctx.account();
        let from = args.from;
        let amount = ctx
            .amount_from(args.amount, args.get_id)
            .resolve_with(|| {
                Ok::<_, ConnectorError>(ctx.state_ref().balance_of(&from, &pool.ticket()))
            })?;

        let (redeemed, fee) = pool.withdraw_instantly_from(
            ctx.state(),
            account,
            args.from,
            amount,
            args.controlled_token,
            args.max_exit_fee,
        )?;
        ctx.set_slot(args.set_id, amount);

        Ok(SpellOutput::new(
            amount,
            "LogWithdrawInstantlyFrom",
            json!({
                "prizePool": args.prize_pool.to_string(),
                "from": args.from.to_string(),
                "amount": amount.to_string(),
                "controlledToken": args.controlled_token.to_string(),
                "maximumExitFee": args.max_exit_fee.to_string(),
                "exitFee": fee.to_string(),
                "redeemed": redeemed.to_string(),
                "getId": args.get_id.0,
                "setId": args.set_id.0,
            }),
        ))
    }
}

impl Default for PrizePoolConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl Connector for PrizePoolConnector {
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(
        &self,
        method: &str,
        args: &[u8],
        ctx: &mut SpellContext<'_, '_>,
    ) -> Result<SpellOutput, ConnectorError> {
        debug!(connector = %self.name, method, "Prize pool call");
        match method {
            "depositTo" => self.deposit_to(args, ctx),
            "withdrawInstantlyFrom" => self.withdraw_instantly_from(args, ctx),
            other => Err(unknown_method(&self.name, other)),
        }
    }
}
