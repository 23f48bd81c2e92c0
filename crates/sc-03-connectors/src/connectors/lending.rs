//! # Lending Connector
//!
//! Wraps a [`LendingMarket`] behind the connector interface.
//!
//! | Method | Entire-balance meaning | Event |
//! |--------|------------------------|-------|
//! | `deposit` | whole wallet balance | `LogDeposit` |
//! | `withdraw` | whole supplied position | `LogWithdraw` |
//! | `borrow` | rejected | `LogBorrow` |
//! | `payback` | whole outstanding debt | `LogPayback` |

use super::unknown_method;
use crate::protocols::lending_market::LendingMarket;
use sc_02_smart_account::domain::context::SpellContext;
use sc_02_smart_account::domain::records::SpellOutput;
use sc_02_smart_account::errors::ConnectorError;
use sc_02_smart_account::ports::outbound::Connector;
use serde::{Deserialize, Serialize};
use serde_json::json;
use shared_types::{decode_args, Address, Amount, SlotId, U256};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Asset and position token behind one token id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Underlying asset.
    pub underlying: Address,
    /// Market position token.
    pub ctoken: Address,
}

/// Token ids such as `"ETH-A"` mapped to their market pair.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenMapping {
    pairs: BTreeMap<String, TokenPair>,
}

impl TokenMapping {
    /// Empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a token id.
    #[must_use]
    pub fn with(
        mut self,
        token_id: impl Into<String>,
        underlying: Address,
        ctoken: Address,
    ) -> Self {
        self.pairs
            .insert(token_id.into(), TokenPair { underlying, ctoken });
        self
    }

    /// Looks up a token id.
    pub fn get(&self, token_id: &str) -> Result<TokenPair, ConnectorError> {
        self.pairs
            .get(token_id)
            .copied()
            .ok_or_else(|| ConnectorError::InvalidArgs(format!("unknown token id: {token_id}")))
    }
}

/// Arguments shared by all four lending methods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LendingArgs {
    /// Token id from the [`TokenMapping`].
    pub token_id: String,
    /// Amount, or everything available.
    pub amount: Amount,
    /// Slot overriding `amount` when non-zero.
    pub get_id: SlotId,
    /// Slot receiving the amount moved.
    pub set_id: SlotId,
}

impl LendingArgs {
    /// Literal amount, no slots.
    #[must_use]
    pub fn new(token_id: impl Into<String>, amount: impl Into<Amount>) -> Self {
        Self {
            token_id: token_id.into(),
            amount: amount.into(),
            get_id: SlotId::NONE,
            set_id: SlotId::NONE,
        }
    }

    /// Sets the input slot.
    #[must_use]
    pub fn get_id(mut self, slot: impl Into<SlotId>) -> Self {
        self.get_id = slot.into();
        self
    }

    /// Sets the output slot.
    #[must_use]
    pub fn set_id(mut self, slot: impl Into<SlotId>) -> Self {
        self.set_id = slot.into();
        self
    }
}

#[derive(Debug, Clone, Copy)]
enum LendingMethod {
    Deposit,
    Withdraw,
    Borrow,
    Payback,
}

impl LendingMethod {
    fn parse(method: &str) -> Option<Self> {
        match method {
            "deposit" => Some(Self::Deposit),
            "withdraw" => Some(Self::Withdraw),
            "borrow" => Some(Self::Borrow),
            "payback" => Some(Self::Payback),
            _ => None,
        }
    }
}

/// Connector for a Compound-style lending market.
pub struct LendingConnector {
    name: String,
    market: Arc<LendingMarket>,
    tokens: TokenMapping,
}

impl LendingConnector {
    /// Name the connector is usually registered under.
    pub const DEFAULT_NAME: &'static str = "COMPOUND-A";

    /// Creates a connector over `market`.
    #[must_use]
    pub fn new(market: Arc<LendingMarket>, tokens: TokenMapping) -> Self {
        Self::named(Self::DEFAULT_NAME, market, tokens)
    }

    /// Creates a connector reporting a custom name.
    #[must_use]
    pub fn named(
        name: impl Into<String>,
        market: Arc<LendingMarket>,
        tokens: TokenMapping,
    ) -> Self {
        Self {
            name: name.into(),
            market,
            tokens,
        }
    }

    /// The wrapped market.
    #[must_use]
    pub fn market(&self) -> &LendingMarket {
        &self.market
    }

    fn pair(&self, token_id: &str) -> Result<TokenPair, ConnectorError> {
        let pair = self.tokens.get(token_id)?;
        self.market.check_pair(&pair.underlying, &pair.ctoken)?;
        Ok(pair)
    }

    fn deposit(
        &self,
        args: LendingArgs,
        ctx: &mut SpellContext<'_, '_>,
    ) -> Result<SpellOutput, ConnectorError> {
        let pair = self.pair(&args.token_id)?;
        let account = ctx.account();
        let amount = ctx
            .amount_from(args.amount, args.get_id)
            .resolve_with(|| {
                Ok::<_, ConnectorError>(ctx.state_ref().balance_of(&account, &pair.underlying))
            })?;

        self.market.supply(ctx.state(), account, pair.underlying, amount)?;
        ctx.set_slot(args.set_id, amount);

        Ok(lending_output("LogDeposit", &args, &pair, amount))
    }

    fn withdraw(
        &self,
        args: LendingArgs,
        ctx: &mut SpellContext<'_, '_>,
    ) -> Result<SpellOutput, ConnectorError> {
        let pair = self.pair(&args.token_id)?;
        let account = ctx.account();
        let requested = ctx.amount_from(args.amount, args.get_id);
        let amount = requested.resolve_with(|| {
            self.market
                .supplied(ctx.state_ref(), &account, &pair.underlying)
                .map_err(ConnectorError::from)
        })?;

        self.market.redeem(ctx.state(), account, pair.underlying, amount)?;
        ctx.set_slot(args.set_id, amount);

        Ok(lending_output("LogWithdraw", &args, &pair, amount))
    }

    fn borrow(
        &self,
        args: LendingArgs,
        ctx: &mut SpellContext<'_, '_>,
    ) -> Result<SpellOutput, ConnectorError> {
        let pair = self.pair(&args.token_id)?;
        let account = ctx.account();
        let amount = match ctx.amount_from(args.amount, args.get_id) {
            Amount::Literal(amount) => amount,
            Amount::EntireBalance => {
                return Err(ConnectorError::InvalidArgs(
                    "borrow does not accept an entire-balance amount".into(),
                ))
            }
        };

        self.market.borrow(ctx.state(), account, pair.underlying, amount)?;
        ctx.set_slot(args.set_id, amount);

        Ok(lending_output("LogBorrow", &args, &pair, amount))
    }

    fn payback(
        &self,
        args: LendingArgs,
        ctx: &mut SpellContext<'_, '_>,
    ) -> Result<SpellOutput, ConnectorError> {
        let pair = self.pair(&args.token_id)?;
        let account = ctx.account();
        let amount = ctx
            .amount_from(args.amount, args.get_id)
            .resolve_with(|| {
                let debt = self.market.debt_of(ctx.state_ref(), &account, &pair.underlying);
                Ok::<_, ConnectorError>(debt)
            })?;

        self.market.repay(ctx.state(), account, pair.underlying, amount)?;
        ctx.set_slot(args.set_id, amount);

        Ok(lending_output("LogPayback", &args, &pair, amount))
    }
}

impl Connector for LendingConnector {
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(
        &self,
        method: &str,
        args: &[u8],
        ctx: &mut SpellContext<'_, '_>,
    ) -> Result<SpellOutput, ConnectorError> {
        let Some(call) = LendingMethod::parse(method) else {
            return Err(unknown_method(&self.name, method));
        };
        let args: LendingArgs = decode_args(args)?;
        debug!(connector = %self.name, method, token_id = %args.token_id, "Lending call");
        match call {
            LendingMethod::Deposit => self.deposit(args, ctx),
            LendingMethod::Withdraw => self.withdraw(args, ctx),
            LendingMethod::Borrow => self.borrow(args, ctx),
            LendingMethod::Payback => self.payback(args, ctx),
        }
    }
}

fn lending_output(event: &str, args: &LendingArgs, pair: &TokenPair, amount: U256) -> SpellOutput {
    SpellOutput::new(
        amount,
        event,
        json!({
            "token": pair.underlying.to_string(),
            "tokenId": args.token_id,
            "cToken": pair.ctoken.to_string(),
            "amount": amount.to_string(),
            "getId": args.get_id.0,
            "setId": args.set_id.0,
        }),
    )
}
