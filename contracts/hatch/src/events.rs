use soroban_sdk::{contracttype, symbol_short, Address, Env};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Opened {
    pub open_date: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Contributed {
    pub contributor: Address,
    /// Contribution units accepted.
    pub value: i128,
    /// Project tokens minted under vesting.
    pub amount: i128,
    pub record_index: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Refunded {
    pub contributor: Address,
    /// Contribution units returned.
    pub value: i128,
    /// Project tokens burned.
    pub amount: i128,
    pub record_index: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Closed {
    pub total_raised: i128,
    pub beneficiary_funds: i128,
    pub reserve_funds: i128,
    pub beneficiary_tokens: i128,
}

pub fn emit_opened(env: &Env, open_date: u64) {
    let topics = (symbol_short!("open"),);
    env.events().publish(topics, Opened { open_date });
}

pub fn emit_contributed(env: &Env, contributor: Address, value: i128, amount: i128, record_index: u32) {
    let topics = (symbol_short!("contrib"), contributor.clone());
    let data = Contributed {
        contributor,
        value,
        amount,
        record_index,
    };
    env.events().publish(topics, data);
}

pub fn emit_refunded(env: &Env, contributor: Address, value: i128, amount: i128, record_index: u32) {
    let topics = (symbol_short!("refund"), contributor.clone());
    let data = Refunded {
        contributor,
        value,
        amount,
        record_index,
    };
    env.events().publish(topics, data);
}

pub fn emit_closed(
    env: &Env,
    total_raised: i128,
    beneficiary_funds: i128,
    reserve_funds: i128,
    beneficiary_tokens: i128,
) {
    let topics = (symbol_short!("close"),);
    let data = Closed {
        total_raised,
        beneficiary_funds,
        reserve_funds,
        beneficiary_tokens,
    };
    env.events().publish(topics, data);
}
