//! # Scripts
//!
//! JSON description of a world, the connectors to deploy and the steps to
//! replay against one smart account. Addresses and amounts use the shared
//! hex encoding; `0xff..ff` as an amount means "entire balance".

use sc_01_connector_registry::ConnectorVersion;
use sc_02_smart_account::domain::records::Spell;
use sc_03_connectors::{
    DepositToArgs, LendingArgs, MarketConfig, TokenMapping, WithdrawInstantlyArgs,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared_types::{Address, U256};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading or compiling a script.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The file could not be read.
    #[error("failed to read script: {0}")]
    Io(#[from] std::io::Error),

    /// The JSON did not match the script layout.
    #[error("invalid script: {0}")]
    Parse(#[from] serde_json::Error),

    /// A spell names a connector the script does not deploy.
    #[error("spell targets undeclared connector {0}")]
    UndeclaredConnector(String),

    /// The connector kind has no such method.
    #[error("connector {connector} has no method {method}")]
    UnknownMethod {
        /// Connector name.
        connector: String,
        /// Method name.
        method: String,
    },

    /// Arguments could not be encoded.
    #[error("could not encode arguments for {connector}.{method}: {reason}")]
    Encoding {
        /// Connector name.
        connector: String,
        /// Method name.
        method: String,
        /// Underlying failure.
        reason: String,
    },
}

/// A complete script.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Script {
    /// Registry master.
    pub master: Address,
    /// Smart account address.
    pub account: Address,
    /// First authority of the account.
    pub owner: Address,
    /// Initial balances.
    #[serde(default)]
    pub balances: Vec<BalanceSeed>,
    /// Connectors to deploy and register.
    pub connectors: Vec<ConnectorDeployment>,
    /// Steps, replayed in order.
    pub steps: Vec<Step>,
}

/// One initial balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceSeed {
    /// Holder.
    pub owner: Address,
    /// Token (the native asset is `0xeeee..ee`).
    pub token: Address,
    /// Amount in base units.
    pub amount: U256,
}

/// A connector to deploy under `name` at `address`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectorDeployment {
    /// Registry name.
    pub name: String,
    /// Registry address.
    pub address: Address,
    /// Interface generation.
    #[serde(default)]
    pub version: ConnectorVersion,
    /// What to deploy.
    pub kind: ConnectorKind,
}

/// Deployable connector kinds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectorKind {
    /// A lending connector over a fresh market.
    Lending {
        /// Market reserve address.
        market: Address,
        /// Listed assets.
        listings: Vec<MarketListing>,
        /// Token ids.
        tokens: TokenMapping,
    },
    /// A prize-pool connector over fresh pools.
    PrizePool {
        /// Pools served.
        pools: Vec<PoolDeployment>,
    },
}

/// Serializable listing parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MarketListing {
    /// Listed asset.
    pub underlying: Address,
    /// Position token.
    pub ctoken: Address,
    /// Price scaled by 1e18.
    pub price: U256,
    /// Collateral factor in basis points.
    pub collateral_factor_bps: u64,
}

impl From<MarketListing> for MarketConfig {
    fn from(listing: MarketListing) -> Self {
        Self {
            ctoken: listing.ctoken,
            price: listing.price,
            collateral_factor_bps: listing.collateral_factor_bps,
        }
    }
}

/// Serializable pool parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PoolDeployment {
    /// Pool address.
    pub address: Address,
    /// Deposit token.
    pub token: Address,
    /// Ticket token.
    pub ticket: Address,
    /// Exit fee in basis points, pool default when absent.
    #[serde(default)]
    pub exit_fee_bps: Option<u64>,
}

/// One replayed step.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    /// Cast a batch.
    Cast {
        /// Principal submitting the batch.
        initiator: Address,
        /// Recorded origin.
        #[serde(default)]
        origin: Address,
        /// Spells in order.
        spells: Vec<ScriptSpell>,
    },
    /// Disable a connector name.
    Disable {
        /// Governor.
        caller: Address,
        /// Name.
        name: String,
    },
    /// Re-enable a connector name.
    Enable {
        /// Governor.
        caller: Address,
        /// Name.
        name: String,
    },
    /// Authorize a principal on the account.
    Grant {
        /// Existing authority.
        caller: Address,
        /// New authority.
        principal: Address,
    },
    /// Revoke a principal.
    Revoke {
        /// Existing authority.
        caller: Address,
        /// Removed authority.
        principal: Address,
    },
}

/// A spell with JSON arguments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptSpell {
    /// Connector name.
    pub connector: String,
    /// Method.
    pub method: String,
    /// Arguments in the method's JSON layout.
    pub args: Value,
}

impl Script {
    /// Reads and parses a script file.
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Parses a script from JSON text.
    pub fn parse(text: &str) -> Result<Self, ScriptError> {
        Ok(serde_json::from_str(text)?)
    }

    fn kind_of(&self, connector: &str) -> Result<&ConnectorKind, ScriptError> {
        self.connectors
            .iter()
            .find(|c| c.name == connector)
            .map(|c| &c.kind)
            .ok_or_else(|| ScriptError::UndeclaredConnector(connector.to_string()))
    }

    /// Turns JSON spells into encoded spells using the declared connector kinds.
    pub fn compile(&self, spells: &[ScriptSpell]) -> Result<Vec<Spell>, ScriptError> {
        spells.iter().map(|spell| self.compile_one(spell)).collect()
    }

    fn compile_one(&self, spell: &ScriptSpell) -> Result<Spell, ScriptError> {
        let name = spell.connector.as_str();
        let method = spell.method.as_str();
        let encoded = match (self.kind_of(name)?, method) {
            (ConnectorKind::Lending { .. }, "deposit" | "withdraw" | "borrow" | "payback") => {
                let args: LendingArgs = self.args(spell)?;
                Spell::encode(name, method, &args)
            }
            (ConnectorKind::PrizePool { .. }, "depositTo") => {
                let args: DepositToArgs = self.args(spell)?;
                Spell::encode(name, method, &args)
            }
            (ConnectorKind::PrizePool { .. }, "withdrawInstantlyFrom") => {
                let args: WithdrawInstantlyArgs = self.args(spell)?;
                Spell::encode(name, method, &args)
            }
            _ => {
                return Err(ScriptError::UnknownMethod {
                    connector: name.to_string(),
                    method: method.to_string(),
                })
            }
        };
        encoded.map_err(|err| ScriptError::Encoding {
            connector: name.to_string(),
            method: method.to_string(),
            reason: err.to_string(),
        })
    }

    fn args<T: serde::de::DeserializeOwned>(&self, spell: &ScriptSpell) -> Result<T, ScriptError> {
        serde_json::from_value(spell.args.clone()).map_err(|err| ScriptError::Encoding {
            connector: spell.connector.clone(),
            method: spell.method.clone(),
            reason: err.to_string(),
        })
    }
}
