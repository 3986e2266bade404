#![no_std]

//! NFT lending contract: lenders deposit an NFT and publish an offer,
//! borrowers take the NFT against collateral, and the loan ends either with
//! repayment (hourly fee charged against collateral) or, after 24 hours, with
//! liquidation (lender keeps the collateral, borrower keeps the NFT).
//!
//! # Reentrancy
//! The Soroban host rejects any call back into a contract that is already
//! executing. A registry or token that tried to call back into this contract
//! fails its own invocation, which surfaces here as `TransferFailed` and rolls
//! the whole operation back.

mod custody;
mod events;
mod fee;
mod registry;
mod storage;
mod types;

#[cfg(test)]
mod testutils;

use soroban_sdk::{contract, contractimpl, Address, Env};

use events::{
    publish_offer_accepted, publish_offer_created, publish_offer_liquidated, publish_offer_repaid,
    OfferAcceptedEvent, OfferCreatedEvent, OfferLiquidatedEvent, OfferRepaidEvent,
};
pub use fee::{LIQUIDATION_PERIOD, SECONDS_PER_HOUR};
pub use registry::{NftClient, NftRegistry};
pub use types::{Config, ContractError, Offer, OfferStatus};

#[contract]
pub struct NftLending;

#[contractimpl]
impl NftLending {
    /// Initialize the contract with the collateral token and the default NFT
    /// registry used by `create_default_offer`.
    pub fn initialize(env: Env, token: Address, default_nft: Address) -> Result<(), ContractError> {
        if storage::has_config(&env) {
            return Err(ContractError::AlreadyInitialized);
        }
        storage::write_config(&env, &Config { token, default_nft });
        storage::extend_instance(&env);
        Ok(())
    }

    /// Deposit `nft_id` from `nft_contract` and open an offer for it.
    /// The lender must have approved this contract for the token.
    ///
    /// # Errors
    /// * `InvalidAmount` – `liquidation_price` <= 0 or `hourly_fee` < 0
    /// * `TransferFailed` – lender does not own the token or has not approved it
    pub fn create_offer(
        env: Env,
        lender: Address,
        nft_id: u32,
        nft_contract: Address,
        liquidation_price: i128,
        hourly_fee: i128,
    ) -> Result<u64, ContractError> {
        lender.require_auth();
        storage::read_config(&env)?;
        Self::open_offer(&env, lender, nft_id, nft_contract, liquidation_price, hourly_fee)
    }

    /// Same as `create_offer` for a token of the default registry.
    pub fn create_default_offer(
        env: Env,
        lender: Address,
        nft_id: u32,
        liquidation_price: i128,
        hourly_fee: i128,
    ) -> Result<u64, ContractError> {
        lender.require_auth();
        let config = storage::read_config(&env)?;
        Self::open_offer(
            &env,
            lender,
            nft_id,
            config.default_nft,
            liquidation_price,
            hourly_fee,
        )
    }

    /// Borrow the NFT of an open offer by escrowing `collateral`.
    /// The borrower must have approved this contract for `collateral` tokens.
    ///
    /// # Errors
    /// * `OfferNotFound` – unknown `offer_id`
    /// * `InvalidState` – offer is not `Open`
    /// * `InvalidAmount` – `collateral` <= 0
    /// * `CollateralExceedsPrice` – `collateral` > liquidation price
    /// * `TransferFailed` – collateral pull or NFT hand-over failed
    pub fn accept_offer(
        env: Env,
        borrower: Address,
        offer_id: u64,
        collateral: i128,
    ) -> Result<(), ContractError> {
        borrower.require_auth();
        let config = storage::read_config(&env)?;
        let mut offer = storage::read_offer(&env, offer_id)?;

        if offer.status != OfferStatus::Open {
            return Err(ContractError::InvalidState);
        }
        if collateral <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        if collateral > offer.liquidation_price {
            return Err(ContractError::CollateralExceedsPrice);
        }

        let now = env.ledger().timestamp();
        offer.borrower = Some(borrower.clone());
        offer.collateral = collateral;
        offer.start_time = now;
        offer.status = OfferStatus::On;
        storage::write_offer(&env, &offer);

        custody::take_funds(&env, &config.token, &borrower, collateral)?;
        custody::release_nft(&env, &offer.nft_contract, offer.nft_id, &borrower)?;

        storage::extend_instance(&env);

        publish_offer_accepted(
            &env,
            OfferAcceptedEvent {
                offer_id,
                borrower,
                collateral,
                start_time: now,
            },
        );
        Ok(())
    }

    /// Return the borrowed NFT. The fee for whole elapsed hours goes to the
    /// lender (capped at the collateral) and the rest of the collateral back
    /// to the borrower. The offer becomes `Open` again.
    ///
    /// # Errors
    /// * `OfferNotFound` – unknown `offer_id`
    /// * `InvalidState` – offer is not `On` or `borrower` is not its borrower
    /// * `TransferFailed` – NFT not approved back to this contract
    pub fn repay_offer(env: Env, borrower: Address, offer_id: u64) -> Result<(), ContractError> {
        borrower.require_auth();
        let config = storage::read_config(&env)?;
        let mut offer = storage::read_offer(&env, offer_id)?;

        if offer.status != OfferStatus::On || offer.borrower.as_ref() != Some(&borrower) {
            return Err(ContractError::InvalidState);
        }

        let now = env.ledger().timestamp();
        let fee = fee::accrued_fee(offer.start_time, now, offer.hourly_fee, offer.collateral);
        let refund = offer.collateral - fee;

        offer.borrower = None;
        offer.collateral = 0;
        offer.start_time = 0;
        offer.status = OfferStatus::Open;
        storage::write_offer(&env, &offer);

        custody::take_nft(&env, &offer.nft_contract, offer.nft_id, &borrower)?;
        custody::pay(&env, &config.token, &borrower, refund)?;
        custody::pay(&env, &config.token, &offer.lender, fee)?;

        storage::extend_instance(&env);

        publish_offer_repaid(
            &env,
            OfferRepaidEvent {
                offer_id,
                borrower,
                fee,
                refund,
                timestamp: now,
            },
        );
        Ok(())
    }

    /// Settle an expired loan: the lender receives the whole collateral and
    /// the borrower keeps the NFT. Anyone may call this.
    ///
    /// # Errors
    /// * `OfferNotFound` – unknown `offer_id`
    /// * `InvalidState` – offer is not `On` or the loan has not expired
    pub fn liquidate(env: Env, offer_id: u64) -> Result<(), ContractError> {
        let config = storage::read_config(&env)?;
        let mut offer = storage::read_offer(&env, offer_id)?;

        let now = env.ledger().timestamp();
        if offer.status != OfferStatus::On || !fee::is_expired(offer.start_time, now) {
            return Err(ContractError::InvalidState);
        }
        let borrower = offer.borrower.clone().ok_or(ContractError::InvalidState)?;

        let collateral = offer.collateral;
        offer.status = OfferStatus::Liquidated;
        storage::write_offer(&env, &offer);

        custody::pay(&env, &config.token, &offer.lender, collateral)?;

        storage::extend_instance(&env);

        publish_offer_liquidated(
            &env,
            OfferLiquidatedEvent {
                offer_id,
                lender: offer.lender,
                borrower,
                collateral,
                timestamp: now,
            },
        );
        Ok(())
    }

    /// Get an offer (view function).
    pub fn get_offer(env: Env, offer_id: u64) -> Result<Offer, ContractError> {
        storage::read_offer(&env, offer_id)
    }

    /// Number of offers ever created; also the id the next offer receives.
    pub fn offer_count(env: Env) -> u64 {
        storage::offer_count(&env)
    }

    pub fn get_config(env: Env) -> Result<Config, ContractError> {
        storage::read_config(&env)
    }

    /// Fee a repayment would charge right now. Zero unless the offer is `On`.
    pub fn accrued_fee(env: Env, offer_id: u64) -> Result<i128, ContractError> {
        let offer = storage::read_offer(&env, offer_id)?;
        if offer.status != OfferStatus::On {
            return Ok(0);
        }
        Ok(fee::accrued_fee(
            offer.start_time,
            env.ledger().timestamp(),
            offer.hourly_fee,
            offer.collateral,
        ))
    }

    /// First ledger timestamp at which `liquidate` succeeds for an active loan.
    pub fn liquidation_time(env: Env, offer_id: u64) -> Result<u64, ContractError> {
        let offer = storage::read_offer(&env, offer_id)?;
        if offer.status != OfferStatus::On {
            return Err(ContractError::InvalidState);
        }
        Ok(offer
            .start_time
            .saturating_add(LIQUIDATION_PERIOD)
            .saturating_add(1))
    }
}

impl NftLending {
    fn open_offer(
        env: &Env,
        lender: Address,
        nft_id: u32,
        nft_contract: Address,
        liquidation_price: i128,
        hourly_fee: i128,
    ) -> Result<u64, ContractError> {
        if liquidation_price <= 0 || hourly_fee < 0 {
            return Err(ContractError::InvalidAmount);
        }

        custody::ensure_nft_owner(env, &nft_contract, nft_id, &lender)?;
        custody::take_nft(env, &nft_contract, nft_id, &lender)?;

        let offer_id = storage::next_offer_id(env);
        let offer = Offer {
            id: offer_id,
            nft_id,
            nft_contract: nft_contract.clone(),
            lender: lender.clone(),
            borrower: None,
            liquidation_price,
            hourly_fee,
            collateral: 0,
            start_time: 0,
            status: OfferStatus::Open,
        };
        storage::write_offer(env, &offer);
        storage::extend_instance(env);

        publish_offer_created(
            env,
            OfferCreatedEvent {
                offer_id,
                lender,
                nft_contract,
                nft_id,
                liquidation_price,
                hourly_fee,
            },
        );
        Ok(offer_id)
    }
}
