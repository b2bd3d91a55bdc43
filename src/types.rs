multiversx_sc::imports!();
multiversx_sc::derive_imports!();

use crate::schedule;

// ============================================================
// Pool Phase — derived on read, never stored
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Debug)]
pub enum PoolPhase {
    /// Seats left and expiry not reached. Deposits accepted.
    Open,
    /// Every seat taken, nobody has withdrawn yet.
    ClosedToDeposits,
    /// At least one depositor has withdrawn, others still waiting.
    Draining,
    /// Every depositor has withdrawn. Terminal state.
    Drained,
    /// Expiry passed before the pool drained. Value left in escrow is frozen.
    Expired,
}

// ============================================================
// Pool — one per (authority, token)
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Debug)]
pub struct Pool<M: ManagedTypeApi> {
    pub authority: ManagedAddress<M>,
    pub token: EgldOrEsdtTokenIdentifier<M>,
    pub depositor_limit: u64,
    pub deposit_amount: u64,
    pub expiry_time: u64,
    /// Basis points indexed by withdrawal order, non-decreasing, summing to 1000
    pub withdraw_weights: ManagedVec<M, u64>,
    pub depositors_count: u64,
    /// Also the index of the next weight to pay out
    pub withdrawers_count: u64,
    pub escrow: BigUint<M>,
    /// Sum of the thousandths dropped by floor division on past payouts
    pub rounding_remainder: BigUint<M>,
    pub created_at: u64,
}

impl<M: ManagedTypeApi> Pool<M> {
    pub fn is_expired(&self, now: u64) -> bool {
        now > self.expiry_time
    }

    pub fn is_full(&self) -> bool {
        self.depositors_count >= self.depositor_limit
    }

    pub fn is_drained(&self) -> bool {
        self.withdrawers_count > 0 && self.withdrawers_count == self.depositors_count
    }

    /// The withdrawal that empties a pool which filled every seat.
    pub fn is_final_withdrawal(&self) -> bool {
        self.is_full() && self.withdrawers_count + 1 == self.depositors_count
    }

    pub fn deposit_value(&self) -> BigUint<M> {
        schedule::to_big_uint(self.deposit_amount)
    }

    /// Total value the weights are applied to.
    pub fn pool_size(&self) -> BigUint<M> {
        self.deposit_value() * schedule::to_big_uint::<M>(self.depositors_count)
    }

    pub fn phase(&self, now: u64) -> PoolPhase {
        if self.is_drained() {
            PoolPhase::Drained
        } else if self.is_expired(now) {
            PoolPhase::Expired
        } else if self.withdrawers_count > 0 {
            PoolPhase::Draining
        } else if !self.is_full() {
            PoolPhase::Open
        } else {
            PoolPhase::ClosedToDeposits
        }
    }
}

// ============================================================
// Deposit — one per depositor per pool
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Debug, Default)]
pub struct Deposit {
    /// Once true, never reset.
    pub is_claimed: bool,
}
