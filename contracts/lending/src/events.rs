//! Event types and topic constants for the lending contract.
//! Every offer transition publishes one event under the `offer` topic.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

const OFFER: Symbol = symbol_short!("offer");

/// Event emitted when a lender deposits an NFT and opens an offer.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OfferCreatedEvent {
    pub offer_id: u64,
    pub lender: Address,
    pub nft_contract: Address,
    pub nft_id: u32,
    pub liquidation_price: i128,
    pub hourly_fee: i128,
}

/// Event emitted when a borrower escrows collateral and takes the NFT.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OfferAcceptedEvent {
    pub offer_id: u64,
    pub borrower: Address,
    pub collateral: i128,
    pub start_time: u64,
}

/// Event emitted when a borrower returns the NFT.
/// `fee` went to the lender and `refund` back to the borrower.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OfferRepaidEvent {
    pub offer_id: u64,
    pub borrower: Address,
    pub fee: i128,
    pub refund: i128,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OfferLiquidatedEvent {
    pub offer_id: u64,
    pub lender: Address,
    pub borrower: Address,
    pub collateral: i128,
    pub timestamp: u64,
}

pub fn publish_offer_created(env: &Env, event: OfferCreatedEvent) {
    env.events().publish((OFFER, symbol_short!("created")), event);
}

pub fn publish_offer_accepted(env: &Env, event: OfferAcceptedEvent) {
    env.events().publish((OFFER, symbol_short!("accepted")), event);
}

pub fn publish_offer_repaid(env: &Env, event: OfferRepaidEvent) {
    env.events().publish((OFFER, symbol_short!("repaid")), event);
}

pub fn publish_offer_liquidated(env: &Env, event: OfferLiquidatedEvent) {
    env.events().publish((OFFER, symbol_short!("liquid")), event);
}
