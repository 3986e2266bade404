//! Fee and expiry arithmetic.

pub const SECONDS_PER_HOUR: u64 = 3_600;
/// A loan can be liquidated once strictly more than this many seconds have
/// passed since acceptance.
pub const LIQUIDATION_PERIOD: u64 = 24 * SECONDS_PER_HOUR;

/// Whole hours elapsed between `start` and `now`. A clock behind `start`
/// counts as zero.
pub fn elapsed_hours(start: u64, now: u64) -> u64 {
    now.saturating_sub(start) / SECONDS_PER_HOUR
}

/// Fee owed for a loan started at `start`: whole hours times `hourly_fee`,
/// never more than `collateral`.
pub fn accrued_fee(start: u64, now: u64, hourly_fee: i128, collateral: i128) -> i128 {
    let hours = elapsed_hours(start, now) as i128;
    hours
        .checked_mul(hourly_fee)
        .map_or(collateral, |fee| fee.min(collateral))
        .max(0)
}

pub fn is_expired(start: u64, now: u64) -> bool {
    now.saturating_sub(start) > LIQUIDATION_PERIOD
}
