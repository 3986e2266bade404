//! Custody and fund movements. Every outbound call goes through the
//! generated `try_*` client methods so a failing token or registry surfaces
//! as `TransferFailed`.

use soroban_sdk::{token, Address, Env};

use crate::registry::NftClient;
use crate::types::ContractError;

/// Fails unless `owner` currently holds `nft_id` in `nft_contract`.
pub fn ensure_nft_owner(
    env: &Env,
    nft_contract: &Address,
    nft_id: u32,
    owner: &Address,
) -> Result<(), ContractError> {
    match NftClient::new(env, nft_contract).try_owner_of(&nft_id) {
        Ok(Ok(current)) if current == *owner => Ok(()),
        _ => Err(ContractError::TransferFailed),
    }
}

/// Moves `nft_id` from `from` into the engine using the engine's approval.
pub fn take_nft(
    env: &Env,
    nft_contract: &Address,
    nft_id: u32,
    from: &Address,
) -> Result<(), ContractError> {
    move_nft(env, nft_contract, nft_id, from, &env.current_contract_address())
}

/// Hands `nft_id` held by the engine over to `to`.
pub fn release_nft(
    env: &Env,
    nft_contract: &Address,
    nft_id: u32,
    to: &Address,
) -> Result<(), ContractError> {
    move_nft(env, nft_contract, nft_id, &env.current_contract_address(), to)
}

fn move_nft(
    env: &Env,
    nft_contract: &Address,
    nft_id: u32,
    from: &Address,
    to: &Address,
) -> Result<(), ContractError> {
    let engine = env.current_contract_address();
    match NftClient::new(env, nft_contract).try_transfer_from(&engine, from, to, &nft_id) {
        Ok(Ok(())) => Ok(()),
        _ => Err(ContractError::TransferFailed),
    }
}

/// Pulls `amount` of `token` from `from` into escrow. Needs an allowance
/// granted to the engine.
pub fn take_funds(
    env: &Env,
    token: &Address,
    from: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    let engine = env.current_contract_address();
    match token::Client::new(env, token).try_transfer_from(&engine, from, &engine, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(ContractError::TransferFailed),
    }
}

/// Pays `amount` out of escrow. Zero amounts are a no-op.
pub fn pay(env: &Env, token: &Address, to: &Address, amount: i128) -> Result<(), ContractError> {
    if amount == 0 {
        return Ok(());
    }
    let engine = env.current_contract_address();
    match token::Client::new(env, token).try_transfer(&engine, to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(ContractError::TransferFailed),
    }
}
