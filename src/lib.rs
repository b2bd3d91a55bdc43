#![no_std]

multiversx_sc::imports!();

pub mod errors;
pub mod schedule;
pub mod types;

use errors::*;
use types::{Deposit, Pool, PoolPhase};

// ============================================================
// Contract
// ============================================================

#[multiversx_sc::contract]
pub trait WeightedEscrow {
    // ========================================================
    // Init / Upgrade
    // ========================================================

    #[init]
    fn init(&self, max_depositor_limit: u64) {
        require!(max_depositor_limit > 0, ERR_INVALID_CONFIG);
        self.max_depositor_limit().set(max_depositor_limit);
    }

    #[upgrade]
    fn upgrade(&self) {}

    // ========================================================
    // ENDPOINT: createPool
    // One pool per (caller, token). The weight schedule is
    // validated here once and trusted by every withdrawal.
    // ========================================================

    #[endpoint(createPool)]
    fn create_pool(
        &self,
        token: EgldOrEsdtTokenIdentifier,
        depositor_limit: u64,
        deposit_amount: u64,
        expiry_time: u64,
        withdraw_weights: MultiValueEncoded<u64>,
    ) {
        let caller = self.blockchain().get_caller();
        require!(
            self.pool(&caller, &token).is_empty(),
            ERR_ALREADY_INITIALIZED
        );

        let mut weights = ManagedVec::new();
        for weight in withdraw_weights.into_iter() {
            weights.push(weight);
        }

        if let Err(err) = schedule::validate_weights(
            depositor_limit,
            self.max_depositor_limit().get(),
            weights.iter(),
        ) {
            sc_panic!(err);
        }
        require!(deposit_amount > 0, ERR_INVALID_AMOUNT);

        let created_at = self.blockchain().get_block_timestamp();
        let pool = Pool {
            authority: caller.clone(),
            token: token.clone(),
            depositor_limit,
            deposit_amount,
            expiry_time,
            withdraw_weights: weights,
            depositors_count: 0,
            withdrawers_count: 0,
            escrow: BigUint::zero(),
            rounding_remainder: BigUint::zero(),
            created_at,
        };
        self.pool(&caller, &token).set(&pool);

        self.pool_created_event(&caller, &token, depositor_limit, deposit_amount, expiry_time);
    }

    // ========================================================
    // ENDPOINT: deposit
    // Exactly `deposit_amount` of the pool token, once per address.
    // ========================================================

    #[endpoint(deposit)]
    #[payable("*")]
    fn deposit(&self, authority: ManagedAddress, token: EgldOrEsdtTokenIdentifier) {
        let caller = self.blockchain().get_caller();
        let mut pool = self.require_pool(&authority, &token);

        let now = self.blockchain().get_block_timestamp();
        require!(!pool.is_expired(now), ERR_EXPIRED);
        require!(!pool.is_full(), ERR_POOL_FULL);

        let mut depositors = self.depositors(&authority, &token);
        require!(!depositors.contains_key(&caller), ERR_ALREADY_DEPOSITED);

        let payment = self.call_value().egld_or_single_esdt();
        require!(
            payment.token_identifier == token && payment.token_nonce == 0,
            ERR_WRONG_TOKEN
        );
        require!(payment.amount == pool.deposit_value(), ERR_WRONG_AMOUNT);

        pool.escrow += &payment.amount;
        pool.depositors_count += 1;
        depositors.insert(caller.clone(), Deposit { is_claimed: false });
        self.pool(&authority, &token).set(&pool);

        self.deposit_event(&authority, &token, &caller, &payment.amount);
    }

    // ========================================================
    // ENDPOINT: withdraw
    // The n-th withdrawal is paid weights[n-1] of the pool size,
    // whoever makes it.
    // ========================================================

    #[endpoint(withdraw)]
    fn withdraw(&self, authority: ManagedAddress, token: EgldOrEsdtTokenIdentifier) {
        let caller = self.blockchain().get_caller();
        let mut pool = self.require_pool(&authority, &token);

        let now = self.blockchain().get_block_timestamp();
        require!(!pool.is_expired(now), ERR_EXPIRED);

        let mut depositors = self.depositors(&authority, &token);
        let record = match depositors.get(&caller) {
            Some(record) => record,
            None => sc_panic!(ERR_NEVER_DEPOSITED),
        };
        require!(!record.is_claimed, ERR_ALREADY_WITHDRAWN);

        let (payout, remainder) = self.next_payout(&pool);
        require!(payout <= pool.escrow, ERR_INSUFFICIENT_ESCROW);

        let order = pool.withdrawers_count + 1;
        pool.escrow -= &payout;
        pool.rounding_remainder += &remainder;
        pool.withdrawers_count = order;
        depositors.insert(caller.clone(), Deposit { is_claimed: true });
        self.pool(&authority, &token).set(&pool);

        if payout > 0u64 {
            self.send().direct(&caller, &token, 0, &payout);
        }
        self.withdraw_event(&authority, &token, &caller, order, &payout);
    }

    // ========================================================
    // INTERNAL
    // ========================================================

    fn require_pool(
        &self,
        authority: &ManagedAddress,
        token: &EgldOrEsdtTokenIdentifier,
    ) -> Pool<Self::Api> {
        let mapper = self.pool(authority, token);
        require!(!mapper.is_empty(), ERR_POOL_NOT_FOUND);
        mapper.get()
    }

    /// Share paid to whoever withdraws next, with the floor-division
    /// remainder that share leaves behind. The last withdrawal from a pool
    /// that filled every seat also collects the whole units those
    /// remainders add up to, never more than the escrow still holds.
    fn next_payout(&self, pool: &Pool<Self::Api>) -> (BigUint, BigUint) {
        if pool.withdrawers_count >= pool.depositors_count {
            return (BigUint::zero(), BigUint::zero());
        }

        let weight = pool.withdraw_weights.get(pool.withdrawers_count as usize);
        let pool_size = pool.pool_size();
        let share = schedule::share_of(&pool_size, weight);
        let remainder = schedule::share_remainder(&pool_size, weight);
        if !pool.is_final_withdrawal() {
            return (share, remainder);
        }

        let dust = (&pool.rounding_remainder + &remainder) / schedule::BPS_DENOMINATOR;
        let with_dust = &share + &dust;
        let payout = if with_dust > pool.escrow && share <= pool.escrow {
            pool.escrow.clone()
        } else {
            with_dust
        };
        (payout, remainder)
    }

    // ========================================================
    // VIEWS — read-only queries
    // ========================================================

    #[view(getPool)]
    fn get_pool(
        &self,
        authority: ManagedAddress,
        token: EgldOrEsdtTokenIdentifier,
    ) -> Pool<Self::Api> {
        self.require_pool(&authority, &token)
    }

    #[view(hasPool)]
    fn has_pool(&self, authority: ManagedAddress, token: EgldOrEsdtTokenIdentifier) -> bool {
        !self.pool(&authority, &token).is_empty()
    }

    #[view(getPoolPhase)]
    fn get_pool_phase(
        &self,
        authority: ManagedAddress,
        token: EgldOrEsdtTokenIdentifier,
    ) -> PoolPhase {
        let pool = self.require_pool(&authority, &token);
        pool.phase(self.blockchain().get_block_timestamp())
    }

    #[view(getDeposit)]
    fn get_deposit(
        &self,
        authority: ManagedAddress,
        token: EgldOrEsdtTokenIdentifier,
        depositor: ManagedAddress,
    ) -> OptionalValue<Deposit> {
        self.require_pool(&authority, &token);
        self.depositors(&authority, &token).get(&depositor).into()
    }

    #[view(getDepositors)]
    fn get_depositors(
        &self,
        authority: ManagedAddress,
        token: EgldOrEsdtTokenIdentifier,
    ) -> MultiValueEncoded<ManagedAddress> {
        self.require_pool(&authority, &token);
        let mut result = MultiValueEncoded::new();
        for depositor in self.depositors(&authority, &token).keys() {
            result.push(depositor);
        }
        result
    }

    #[view(getNextPayout)]
    fn get_next_payout(
        &self,
        authority: ManagedAddress,
        token: EgldOrEsdtTokenIdentifier,
    ) -> BigUint {
        let pool = self.require_pool(&authority, &token);
        let (payout, _) = self.next_payout(&pool);
        payout
    }

    #[view(getMaxDepositorLimit)]
    fn get_max_depositor_limit(&self) -> u64 {
        self.max_depositor_limit().get()
    }

    // ========================================================
    // EVENTS
    // ========================================================

    #[event("poolCreated")]
    fn pool_created_event(
        &self,
        #[indexed] authority: &ManagedAddress,
        #[indexed] token: &EgldOrEsdtTokenIdentifier,
        #[indexed] depositor_limit: u64,
        #[indexed] deposit_amount: u64,
        expiry_time: u64,
    );

    #[event("deposit")]
    fn deposit_event(
        &self,
        #[indexed] authority: &ManagedAddress,
        #[indexed] token: &EgldOrEsdtTokenIdentifier,
        #[indexed] depositor: &ManagedAddress,
        amount: &BigUint,
    );

    #[event("withdraw")]
    fn withdraw_event(
        &self,
        #[indexed] authority: &ManagedAddress,
        #[indexed] token: &EgldOrEsdtTokenIdentifier,
        #[indexed] withdrawer: &ManagedAddress,
        #[indexed] order: u64,
        amount: &BigUint,
    );

    // ========================================================
    // STORAGE
    // ========================================================

    // ── Configuration ──

    #[storage_mapper("maxDepositorLimit")]
    fn max_depositor_limit(&self) -> SingleValueMapper<u64>;

    // ── Pools ──

    #[storage_mapper("pool")]
    fn pool(
        &self,
        authority: &ManagedAddress,
        token: &EgldOrEsdtTokenIdentifier,
    ) -> SingleValueMapper<Pool<Self::Api>>;

    #[storage_mapper("depositors")]
    fn depositors(
        &self,
        authority: &ManagedAddress,
        token: &EgldOrEsdtTokenIdentifier,
    ) -> MapMapper<ManagedAddress, Deposit>;
}
