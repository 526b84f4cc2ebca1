// Fixed-point helpers shared by the ledger, reward engine and normalizer.
//
// USD values carry 18 decimals, voting power is a share of VOTING_POWER_UNIT
// and reward rates are annual basis points over RATE_BASE. Every function is
// pure so the curves can be tested without a runtime.

use anchor_lang::prelude::*;

use crate::{constants::*, errors::StakingError};

// floor(a * b / denominator) without forming a * b when a is large.
// Splits a into quotient and remainder over the denominator so the only
// intermediate products are q * b and r * b with r < denominator.
pub fn mul_div_floor(a: u128, b: u128, denominator: u128) -> Result<u128> {
    require!(denominator > 0, StakingError::MathOverflow);

    let quotient = a / denominator;
    let remainder = a % denominator;

    let whole = quotient
        .checked_mul(b)
        .ok_or(StakingError::MathOverflow)?;
    let fraction = remainder
        .checked_mul(b)
        .ok_or(StakingError::MathOverflow)?
        / denominator;

    Ok(whole
        .checked_add(fraction)
        .ok_or(StakingError::MathOverflow)?)
}

// 10^(18 - decimals): converts native token units to USD-equivalent units
pub fn usd_scale_for(decimals: u8) -> Result<u128> {
    require!(
        (MIN_TOKEN_DECIMALS..=MAX_TOKEN_DECIMALS).contains(&decimals),
        StakingError::InvalidTokenDecimals
    );
    Ok(10u128.pow((USD_DECIMALS - decimals) as u32))
}

// Stable-value tokens are valued 1:1, normalized to 18 decimals
pub fn to_usd_equivalent(amount: u64, decimals: u8) -> Result<u128> {
    Ok((amount as u128)
        .checked_mul(usd_scale_for(decimals)?)
        .ok_or(StakingError::MathOverflow)?)
}

// Whole native token units contained in a USD-equivalent value (floor)
pub fn to_token_units(usd: u128, decimals: u8) -> Result<u64> {
    let units = usd / usd_scale_for(decimals)?;
    Ok(u64::try_from(units).map_err(|_| StakingError::MathOverflow)?)
}

// Reward accrued on `usd` at `rate` basis points per year over `elapsed` seconds.
// Monotonic in elapsed; an unrepresentable result is an error, never a wrap.
pub fn accrued_reward(usd: u128, rate: u64, elapsed: i64) -> Result<u128> {
    if usd == 0 || rate == 0 || elapsed <= 0 {
        return Ok(0);
    }

    let annual = usd
        .checked_mul(rate as u128)
        .ok_or(StakingError::MathOverflow)?;

    mul_div_floor(annual, elapsed as u128, SECONDS_PER_YEAR * RATE_BASE)
}

// Annual rate for a given total stake: the initial rate minus one step per
// 1,000 whole USD staked, never below MIN_REWARD_RATE.
pub fn reward_rate_for(total_staked: u128, initial_rate: u64, reduction_step: u64) -> u64 {
    let intervals = total_staked / USD_SCALE / RATE_DECAY_INTERVAL;
    let reduction = intervals.saturating_mul(reduction_step as u128);
    let rate = (initial_rate as u128).saturating_sub(reduction);

    (rate as u64).max(MIN_REWARD_RATE)
}

// Normalized share of the total stake, saturating at one unit
pub fn voting_share(usd: u128, total_staked: u128) -> u64 {
    if usd == 0 || total_staked == 0 {
        return 0;
    }

    let unit = VOTING_POWER_UNIT as u128;
    match mul_div_floor(usd, unit, total_staked) {
        Ok(share) => share.min(unit) as u64,
        Err(_) => VOTING_POWER_UNIT,
    }
}

// votes_for * 100 / (votes_for + votes_against); None when nobody voted
pub fn approval_percentage(votes_for: u64, votes_against: u64) -> Result<Option<u64>> {
    let total = (votes_for as u128)
        .checked_add(votes_against as u128)
        .ok_or(StakingError::MathOverflow)?;

    if total == 0 {
        return Ok(None);
    }

    Ok(Some((votes_for as u128 * 100 / total) as u64))
}

// Splits a principal into (payout, penalty) for a percentage penalty
pub fn apply_penalty(amount: u64, penalty_percent: u8) -> Result<(u64, u64)> {
    require!(
        penalty_percent <= MAX_PERCENTAGE,
        StakingError::InvalidConfigValue
    );

    let penalty = (amount as u128 * penalty_percent as u128 / 100) as u64;
    let payout = amount
        .checked_sub(penalty)
        .ok_or(StakingError::MathOverflow)?;

    Ok((payout, penalty))
}
