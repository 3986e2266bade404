//! Storage keys and accessors.

use soroban_sdk::{contracttype, Env};

use crate::types::{Config, ContractError, Offer};

pub(crate) const DAY_IN_LEDGERS: u32 = 17280;
pub(crate) const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
pub(crate) const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

pub(crate) const OFFER_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub(crate) const OFFER_LIFETIME_THRESHOLD: u32 = OFFER_BUMP_AMOUNT - DAY_IN_LEDGERS;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Config,
    OfferCount,
    Offer(u64),
}

pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn read_config(env: &Env) -> Result<Config, ContractError> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(ContractError::NotInitialized)
}

pub fn write_config(env: &Env, config: &Config) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn offer_count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::OfferCount)
        .unwrap_or(0)
}

/// Hands out the next offer id. Ids start at 0 and are never reused.
pub fn next_offer_id(env: &Env) -> u64 {
    let id = offer_count(env);
    env.storage()
        .instance()
        .set(&DataKey::OfferCount, &(id + 1));
    id
}

pub fn read_offer(env: &Env, offer_id: u64) -> Result<Offer, ContractError> {
    let key = DataKey::Offer(offer_id);
    let offer = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(ContractError::OfferNotFound)?;
    env.storage()
        .persistent()
        .extend_ttl(&key, OFFER_LIFETIME_THRESHOLD, OFFER_BUMP_AMOUNT);
    Ok(offer)
}

pub fn write_offer(env: &Env, offer: &Offer) {
    let key = DataKey::Offer(offer.id);
    env.storage().persistent().set(&key, offer);
    env.storage()
        .persistent()
        .extend_ttl(&key, OFFER_LIFETIME_THRESHOLD, OFFER_BUMP_AMOUNT);
}
