//! Shared deployment used by the test modules: a contribution currency, a
//! mock token manager, and a hatch wired to both.

#![allow(dead_code)]

use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token, Address, Env, String,
};

use crate::mock_token_manager::{MockTokenManager, MockTokenManagerClient};
use crate::validation::NULL_ADDRESS;
use crate::{ContributionMedium, Hatch, HatchClient, HatchConfig, PPM};

pub const START_TIME: u64 = 1_700_000_000;
pub const MIN_GOAL: i128 = 1_000;
pub const MAX_GOAL: i128 = 5_000;
pub const PERIOD: u64 = 1_000;
pub const EXCHANGE_RATE: i128 = 2 * PPM;
pub const VESTING_CLIFF_PERIOD: u64 = 2_000;
pub const VESTING_COMPLETE_PERIOD: u64 = 4_000;
pub const SUPPLY_OFFERED_PCT: u32 = 900_000;
pub const FUNDING_FOR_BENEFICIARY_PCT: u32 = 100_000;

/// Open date used by the "explicit start date" variants.
pub const EXPLICIT_OPEN_DATE: u64 = START_TIME + 3_600;

/// Same conversion the contract applies, for expectations.
pub fn to_tokens(value: i128) -> i128 {
    value * EXCHANGE_RATE / PPM
}

/// An account (non-contract) address.
pub fn account_address(env: &Env) -> Address {
    Address::from_string(&String::from_str(env, NULL_ADDRESS))
}

pub struct Fixture {
    pub env: Env,
    pub hatch: HatchClient<'static>,
    pub token_manager: MockTokenManagerClient<'static>,
    pub currency: token::Client<'static>,
    pub currency_sac: token::StellarAssetClient<'static>,
    pub admin: Address,
    pub beneficiary: Address,
    pub reserve: Address,
    pub native: bool,
}

impl Fixture {
    /// Deploy everything but leave the hatch uninitialised.
    pub fn deploy(native: bool) -> Self {
        let env = Env::default();
        env.mock_all_auths();
        env.ledger().set_timestamp(START_TIME);

        let hatch_id = env.register(Hatch, ());
        let hatch = HatchClient::new(&env, &hatch_id);

        let tm_id = env.register(MockTokenManager, ());
        let token_manager = MockTokenManagerClient::new(&env, &tm_id);
        token_manager.init(&hatch_id);

        let currency_admin = Address::generate(&env);
        let currency_id = env
            .register_stellar_asset_contract_v2(currency_admin)
            .address();
        let currency = token::Client::new(&env, &currency_id);
        let currency_sac = token::StellarAssetClient::new(&env, &currency_id);

        let admin = Address::generate(&env);
        let beneficiary = Address::generate(&env);
        let reserve = Address::generate(&env);

        Fixture {
            env,
            hatch,
            token_manager,
            currency,
            currency_sac,
            admin,
            beneficiary,
            reserve,
            native,
        }
    }

    /// Deploy and initialise with the default parameters.
    pub fn new(native: bool, open_date: u64) -> Self {
        let f = Self::deploy(native);
        let config = f.config(open_date);
        f.hatch.init(&f.admin, &config);
        f
    }

    pub fn token_hatch() -> Self {
        Self::new(false, 0)
    }

    pub fn config(&self, open_date: u64) -> HatchConfig {
        let medium = if self.native {
            ContributionMedium::Native(self.currency.address.clone())
        } else {
            ContributionMedium::Token(self.currency.address.clone())
        };
        HatchConfig {
            contribution_medium: medium,
            token_manager: self.token_manager.address.clone(),
            reserve: self.reserve.clone(),
            beneficiary: self.beneficiary.clone(),
            max_goal: MAX_GOAL,
            min_goal: MIN_GOAL,
            period: PERIOD,
            exchange_rate: EXCHANGE_RATE,
            vesting_cliff_period: VESTING_CLIFF_PERIOD,
            vesting_complete_period: VESTING_COMPLETE_PERIOD,
            supply_offered_pct: SUPPLY_OFFERED_PCT,
            funding_for_beneficiary_pct: FUNDING_FOR_BENEFICIARY_PCT,
            open_date,
        }
    }

    pub fn set_time(&self, timestamp: u64) {
        self.env.ledger().set_timestamp(timestamp);
    }

    /// Bring the hatch to the start of its funding window and return the
    /// open date: calls `open` if no date was configured, otherwise jumps to
    /// the configured date.
    pub fn start(&self) -> u64 {
        let configured = self.hatch.open_date();
        if configured == 0 {
            self.hatch.open(&self.admin);
            self.hatch.open_date()
        } else {
            self.set_time(configured);
            configured
        }
    }

    /// A new contributor holding `balance` units, with the hatch approved to
    /// pull all of it.
    pub fn contributor(&self, balance: i128) -> Address {
        let who = Address::generate(&self.env);
        self.fund(&who, balance);
        who
    }

    pub fn fund(&self, who: &Address, amount: i128) {
        self.currency_sac.mint(who, &amount);
        let allowance = self.currency.allowance(who, &self.hatch.address) + amount;
        let expiration = self.env.ledger().sequence() + 10_000;
        self.currency
            .approve(who, &self.hatch.address, &allowance, &expiration);
    }

    /// Contribute with the right attached value for the medium.
    pub fn contribute(&self, who: &Address, value: i128) -> u32 {
        let attached = if self.native { value } else { 0 };
        self.hatch.contribute(who, &value, &attached)
    }

    pub fn balance(&self, who: &Address) -> i128 {
        self.currency.balance(who)
    }

    pub fn hatch_balance(&self) -> i128 {
        self.currency.balance(&self.hatch.address)
    }
}
