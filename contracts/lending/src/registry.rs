//! Capability the engine needs from an NFT registry contract.
//!
//! Any registry exposing these three calls can back an offer; each offer
//! records which registry its asset lives in.

use soroban_sdk::{contractclient, Address, Env};

#[contractclient(name = "NftClient")]
pub trait NftRegistry {
    /// Current owner of `token_id`. Fails if the token does not exist.
    fn owner_of(env: Env, token_id: u32) -> Address;

    /// Lets `spender` move `token_id` on behalf of `owner`.
    fn approve(env: Env, owner: Address, spender: Address, token_id: u32);

    /// Moves `token_id` from `from` to `to`. `spender` must be `from` or
    /// the approved address.
    fn transfer_from(env: Env, spender: Address, from: Address, to: Address, token_id: u32);
}
