//! Withdrawal schedule rules: validation of a weight sequence at pool
//! creation, and the share a weight earns at withdrawal time.

use multiversx_sc::api::ManagedTypeApi;
use multiversx_sc::types::BigUint;

use crate::errors::{ERR_INVALID_LIMIT, ERR_INVALID_WEIGHT, ERR_INVALID_WEIGHT_SUM};

/// 1000 basis points = 100% of the pool
pub const BPS_DENOMINATOR: u64 = 1_000;

/// Checks a weight sequence against a declared depositor limit.
///
/// The limit must match the number of weights and stay within
/// `max_limit`. Weights must be positive, non-decreasing and sum to
/// exactly [`BPS_DENOMINATOR`]. Length is checked before weights, and
/// weights before their sum.
pub fn validate_weights<I>(limit: u64, max_limit: u64, weights: I) -> Result<(), &'static str>
where
    I: IntoIterator<Item = u64>,
{
    let mut len = 0u64;
    let mut sum = 0u64;
    let mut previous = 0u64;
    let mut bad_weight = false;

    for weight in weights {
        len += 1;
        if weight == 0 || weight < previous {
            bad_weight = true;
        }
        previous = weight;
        // saturating: a sum past the denominator is rejected either way
        sum = sum.saturating_add(weight);
    }

    if len != limit || limit > max_limit {
        return Err(ERR_INVALID_LIMIT);
    }
    if bad_weight {
        return Err(ERR_INVALID_WEIGHT);
    }
    if sum != BPS_DENOMINATOR {
        return Err(ERR_INVALID_WEIGHT_SUM);
    }
    Ok(())
}

/// `pool_size * weight / 1000`, floored.
pub fn share_of<M: ManagedTypeApi>(pool_size: &BigUint<M>, weight: u64) -> BigUint<M> {
    (pool_size * weight) / BPS_DENOMINATOR
}

/// What floor division drops from `pool_size * weight / 1000`, in
/// thousandths of a unit.
pub fn share_remainder<M: ManagedTypeApi>(pool_size: &BigUint<M>, weight: u64) -> BigUint<M> {
    (pool_size * weight) % BPS_DENOMINATOR
}

/// Lossless u64 to BigUint. The VM's int64 setter rejects values above
/// `i64::MAX`, so the conversion goes through big-endian bytes.
pub fn to_big_uint<M: ManagedTypeApi>(amount: u64) -> BigUint<M> {
    BigUint::from_bytes_be(&amount.to_be_bytes())
}
