//! Core data types for the lending contract.

use soroban_sdk::{contracttype, Address};

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OfferStatus {
    Open = 0,
    On = 1,
    Liquidated = 2,
}

#[soroban_sdk::contracterror]
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    OfferNotFound = 3,
    /// Offer is not in the status the operation needs, the caller is not the
    /// borrower, or the loan has not expired yet.
    InvalidState = 4,
    CollateralExceedsPrice = 5,
    /// A token or registry call moving custody or funds failed.
    TransferFailed = 6,
    InvalidAmount = 7,
}

/// One NFT put up for lending.
///
/// While `Open` the engine holds the NFT and `borrower`, `collateral` and
/// `start_time` are cleared. While `On` the borrower holds the NFT and the
/// engine escrows `collateral`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Offer {
    pub id: u64,
    pub nft_id: u32,
    pub nft_contract: Address,
    pub lender: Address,
    pub borrower: Option<Address>,
    pub liquidation_price: i128,
    pub hourly_fee: i128,
    pub collateral: i128,
    /// Ledger timestamp at which the current loan started.
    pub start_time: u64,
    pub status: OfferStatus,
}

/// Contract-wide settings written once by `initialize`.
///
/// * `token` – Fungible asset used for collateral and fees.
/// * `default_nft` – Registry used by `create_default_offer`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub token: Address,
    pub default_nft: Address,
}
