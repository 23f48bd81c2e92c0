//! Deployed test world: a lending market listing the native asset and DAI,
//! one DAI prize pool, both connectors registered as `LEND` and `PRIZE`, and
//! one smart account holding 10 ETH.

use parking_lot::Mutex;
use sc_01_connector_registry::{ConnectorRegistry, ConnectorVersion, RegistryGovernance};
use sc_02_smart_account::adapters::InMemoryWorld;
use sc_02_smart_account::domain::records::{CastRecord, Spell};
use sc_02_smart_account::errors::CastError;
use sc_02_smart_account::ports::outbound::{ConnectorHandle, SharedRegistry, StateAccess};
use sc_02_smart_account::service::{ServiceConfig, SmartAccountService};
use sc_03_connectors::{
    DepositToArgs, LendingArgs, LendingConnector, LendingMarket, MarketConfig, PrizePool,
    PrizePoolConnector, TokenMapping, WithdrawInstantlyArgs,
};
use shared_bus::InMemoryEventBus;
use shared_types::{ether, Address, Amount, SlotId, U256, NATIVE_ASSET};
use std::sync::Arc;

pub const MASTER: Address = Address([0x01; 20]);
pub const OWNER: Address = Address([0xA0; 20]);
pub const WALLET1: Address = Address([0xA1; 20]);
pub const STRANGER: Address = Address([0xBA; 20]);
pub const ACCOUNT: Address = Address([0xAA; 20]);

pub const MARKET: Address = Address([0xC0; 20]);
pub const CETH: Address = Address([0xCE; 20]);
pub const DAI: Address = Address([0xDA; 20]);
pub const CDAI: Address = Address([0xCD; 20]);
pub const POOL: Address = Address([0xB0; 20]);
pub const TICKET: Address = Address([0xB1; 20]);

pub const LEND: &str = "LEND";
pub const PRIZE: &str = "PRIZE";
pub const LEND_ADDRESS: Address = Address([0x0C; 20]);
pub const PRIZE_ADDRESS: Address = Address([0x0D; 20]);

/// Everything a test needs.
pub struct Fixture {
    pub registry: Arc<ConnectorRegistry<ConnectorHandle>>,
    pub world: Arc<Mutex<InMemoryWorld>>,
    pub bus: Arc<InMemoryEventBus>,
    pub service: SmartAccountService<InMemoryWorld>,
}

impl Fixture {
    /// Deploys the default world.
    pub fn new() -> Self {
        Self::with_config(ServiceConfig::default())
    }

    /// Deploys the default world with custom service settings.
    pub fn with_config(config: ServiceConfig) -> Self {
        let registry = Arc::new(ConnectorRegistry::new(MASTER));
        registry
            .register(MASTER, LEND, LEND_ADDRESS, ConnectorVersion::V2, lending_connector())
            .expect("register LEND");
        registry
            .register(MASTER, PRIZE, PRIZE_ADDRESS, ConnectorVersion::V2, prize_connector())
            .expect("register PRIZE");

        let mut world = InMemoryWorld::new();
        world.set_balance(ACCOUNT, NATIVE_ASSET, ether(10));
        world.set_balance(MARKET, DAI, ether(1_000_000));
        let world = Arc::new(Mutex::new(world));

        let bus = Arc::new(InMemoryEventBus::new());
        let resolver: SharedRegistry = registry.clone();
        let service = SmartAccountService::open(
            ACCOUNT,
            OWNER,
            resolver,
            world.clone(),
            bus.clone(),
            config,
        );

        Self {
            registry,
            world,
            bus,
            service,
        }
    }

    /// Copy of the committed world.
    pub fn snapshot(&self) -> InMemoryWorld {
        self.world.lock().clone()
    }

    /// Committed balance of the account.
    pub fn balance(&self, token: Address) -> U256 {
        self.world.lock().balance_of(&ACCOUNT, &token)
    }

    /// Casts as the owner.
    pub async fn cast(&self, spells: Vec<Spell>) -> Result<CastRecord, CastError> {
        self.service.execute_cast(OWNER, spells, WALLET1).await
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

pub fn lending_market() -> LendingMarket {
    LendingMarket::new(MARKET)
        .with_market(
            NATIVE_ASSET,
            MarketConfig {
                ctoken: CETH,
                price: ether(2000),
                collateral_factor_bps: 7_500,
            },
        )
        .with_market(
            DAI,
            MarketConfig {
                ctoken: CDAI,
                price: ether(1),
                collateral_factor_bps: 8_000,
            },
        )
}

pub fn lending_connector() -> ConnectorHandle {
    let tokens = TokenMapping::new()
        .with("ETH-A", NATIVE_ASSET, CETH)
        .with("DAI-A", DAI, CDAI);
    Arc::new(LendingConnector::named(LEND, Arc::new(lending_market()), tokens))
}

pub fn prize_connector() -> ConnectorHandle {
    Arc::new(PrizePoolConnector::named(PRIZE).with_pool(PrizePool::new(POOL, DAI, TICKET)))
}

// =============================================================================
// SPELL BUILDERS
// =============================================================================

pub fn lend(method: &str, args: LendingArgs) -> Spell {
    Spell::encode(LEND, method, &args).expect("encode")
}

pub fn deposit_eth(amount: U256) -> Spell {
    lend("deposit", LendingArgs::new("ETH-A", amount))
}

pub fn borrow_dai(amount: U256, set_id: u64) -> Spell {
    lend("borrow", LendingArgs::new("DAI-A", amount).set_id(set_id))
}

pub fn deposit_to_pool(amount: impl Into<Amount>, get_id: u64) -> Spell {
    let args = DepositToArgs {
        prize_pool: POOL,
        to: ACCOUNT,
        amount: amount.into(),
        controlled_token: TICKET,
        referrer: Address::ZERO,
        get_id: SlotId(get_id),
        set_id: SlotId::NONE,
    };
    Spell::encode(PRIZE, "depositTo", &args).expect("encode")
}

pub fn withdraw_from_pool(amount: impl Into<Amount>, max_exit_fee: U256) -> Spell {
    let args = WithdrawInstantlyArgs {
        prize_pool: POOL,
        from: ACCOUNT,
        amount: amount.into(),
        controlled_token: TICKET,
        max_exit_fee,
        get_id: SlotId::NONE,
        set_id: SlotId::NONE,
    };
    Spell::encode(PRIZE, "withdrawInstantlyFrom", &args).expect("encode")
}
