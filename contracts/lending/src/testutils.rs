//! Test fixtures: a minimal NFT registry and a wired-up lending deployment.

use soroban_sdk::testutils::storage::Instance as _;
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::{contract, contractimpl, contracttype, token, Address, Env};

use crate::registry::{NftClient, NftRegistry};
use crate::storage::DAY_IN_LEDGERS;
use crate::{NftLending, NftLendingClient};

pub const START_TIME: u64 = 1_700_000_000;
pub const INITIAL_BALANCE: i128 = 100;
/// Minimum TTL for new persistent entries, long enough that tests can age
/// the engine's instance storage without archiving balances or NFT records.
pub const MIN_PERSISTENT_TTL: u32 = 100 * DAY_IN_LEDGERS;

#[contracttype]
#[derive(Clone)]
enum NftKey {
    Supply,
    Owner(u32),
    Approved(u32),
}

/// Sequentially minted NFT registry with single-address approvals.
#[contract]
pub struct BasicNft;

#[contractimpl]
impl BasicNft {
    pub fn mint(env: Env, to: Address) -> u32 {
        let token_id: u32 = env.storage().instance().get(&NftKey::Supply).unwrap_or(0);
        env.storage().persistent().set(&NftKey::Owner(token_id), &to);
        env.storage().instance().set(&NftKey::Supply, &(token_id + 1));
        token_id
    }
}

fn read_owner(env: &Env, token_id: u32) -> Address {
    env.storage()
        .persistent()
        .get(&NftKey::Owner(token_id))
        .expect("token does not exist")
}

#[contractimpl]
impl NftRegistry for BasicNft {
    fn owner_of(env: Env, token_id: u32) -> Address {
        read_owner(&env, token_id)
    }

    fn approve(env: Env, owner: Address, spender: Address, token_id: u32) {
        owner.require_auth();
        if read_owner(&env, token_id) != owner {
            panic!("not token owner");
        }
        env.storage()
            .persistent()
            .set(&NftKey::Approved(token_id), &spender);
    }

    fn transfer_from(env: Env, spender: Address, from: Address, to: Address, token_id: u32) {
        spender.require_auth();
        if read_owner(&env, token_id) != from {
            panic!("from is not token owner");
        }
        if spender != from {
            let approved: Option<Address> =
                env.storage().persistent().get(&NftKey::Approved(token_id));
            if approved != Some(spender) {
                panic!("spender not approved");
            }
        }
        env.storage().persistent().remove(&NftKey::Approved(token_id));
        env.storage().persistent().set(&NftKey::Owner(token_id), &to);
    }
}

// Kept in its own module: `#[contractimpl]` generates per-function helper
// items that would collide with `BasicNft`'s `NftRegistry` impl.
mod callback {
    use super::*;

    #[contracttype]
    #[derive(Clone)]
    enum CallbackKey {
        Engine,
        Owner(u32),
    }

    /// Registry whose `transfer_from` calls back into the lending engine once an
    /// engine address is set.
    #[contract]
    pub struct CallbackNft;

    #[contractimpl]
    impl CallbackNft {
        pub fn mint(env: Env, to: Address, token_id: u32) {
            env.storage()
                .persistent()
                .set(&CallbackKey::Owner(token_id), &to);
        }

        pub fn set_engine(env: Env, engine: Address) {
            env.storage().instance().set(&CallbackKey::Engine, &engine);
        }
    }

    #[contractimpl]
    impl NftRegistry for CallbackNft {
        fn owner_of(env: Env, token_id: u32) -> Address {
            env.storage()
                .persistent()
                .get(&CallbackKey::Owner(token_id))
                .expect("token does not exist")
        }

        fn approve(_env: Env, owner: Address, _spender: Address, _token_id: u32) {
            owner.require_auth();
        }

        fn transfer_from(env: Env, spender: Address, _from: Address, to: Address, token_id: u32) {
            spender.require_auth();
            let engine: Option<Address> = env.storage().instance().get(&CallbackKey::Engine);
            if let Some(engine) = engine {
                NftLendingClient::new(&env, &engine).offer_count();
            }
            env.storage()
                .persistent()
                .set(&CallbackKey::Owner(token_id), &to);
        }
    }
}
pub use callback::*;

/// A lending deployment with one collateral token, one NFT registry and two
/// funded accounts.
pub struct Setup<'a> {
    pub env: Env,
    pub lending: NftLendingClient<'a>,
    pub engine: Address,
    pub token: token::Client<'a>,
    pub token_admin: token::StellarAssetClient<'a>,
    pub nft: Address,
    pub minter: BasicNftClient<'a>,
    pub registry: NftClient<'a>,
    pub lender: Address,
    pub borrower: Address,
}

impl<'a> Setup<'a> {
    pub fn new() -> Self {
        let env = Env::default();
        env.mock_all_auths();
        env.ledger().with_mut(|li| {
            li.timestamp = START_TIME;
            li.min_persistent_entry_ttl = MIN_PERSISTENT_TTL;
        });

        let sac = env.register_stellar_asset_contract_v2(Address::generate(&env));
        let token_address = sac.address();
        let token = token::Client::new(&env, &token_address);
        let token_admin = token::StellarAssetClient::new(&env, &token_address);

        let nft = env.register(BasicNft, ());
        let minter = BasicNftClient::new(&env, &nft);
        let registry = NftClient::new(&env, &nft);

        let engine = env.register(NftLending, ());
        let lending = NftLendingClient::new(&env, &engine);
        lending.initialize(&token_address, &nft);

        let lender = Address::generate(&env);
        let borrower = Address::generate(&env);
        token_admin.mint(&lender, &INITIAL_BALANCE);
        token_admin.mint(&borrower, &INITIAL_BALANCE);

        Setup {
            env,
            lending,
            engine,
            token,
            token_admin,
            nft,
            minter,
            registry,
            lender,
            borrower,
        }
    }

    /// Mints an NFT to the lender, approves the engine and opens an offer.
    /// Returns the offer id and the NFT id.
    pub fn open_offer(&self, liquidation_price: i128, hourly_fee: i128) -> (u64, u32) {
        let nft_id = self.minter.mint(&self.lender);
        self.registry.approve(&self.lender, &self.engine, &nft_id);
        let offer_id = self.lending.create_offer(
            &self.lender,
            &nft_id,
            &self.nft,
            &liquidation_price,
            &hourly_fee,
        );
        (offer_id, nft_id)
    }

    /// Grants the engine an allowance of `amount` collateral tokens from `owner`.
    pub fn approve_tokens(&self, owner: &Address, amount: i128) {
        let expiration = self.env.ledger().sequence() + 1_000;
        self.token.approve(owner, &self.engine, &amount, &expiration);
    }

    pub fn borrow(&self, offer_id: u64, collateral: i128) {
        self.approve_tokens(&self.borrower, collateral);
        self.lending
            .accept_offer(&self.borrower, &offer_id, &collateral);
    }

    /// Approves the engine to take the NFT back and repays.
    pub fn repay(&self, offer_id: u64) {
        let offer = self.lending.get_offer(&offer_id);
        self.registry
            .approve(&self.borrower, &self.engine, &offer.nft_id);
        self.lending.repay_offer(&self.borrower, &offer_id);
    }

    pub fn advance(&self, seconds: u64) {
        self.env.ledger().with_mut(|li| li.timestamp += seconds);
    }

    pub fn advance_ledgers(&self, ledgers: u32) {
        self.env
            .ledger()
            .with_mut(|li| li.sequence_number += ledgers);
    }

    /// Remaining TTL of the engine's instance storage, in ledgers.
    pub fn instance_ttl(&self) -> u32 {
        self.env
            .as_contract(&self.engine, || self.env.storage().instance().get_ttl())
    }

    pub fn balance(&self, account: &Address) -> i128 {
        self.token.balance(account)
    }
}
