use anchor_lang::prelude::*;

use crate::{constants::*, errors::StakingError, math, state::Config};

// Global totals shared by every staker
#[account]
#[derive(InitSpace)]
pub struct Pool {
    // Sum of usd_equivalent over active stake records
    pub total_staked: u128,
    // Accounts currently holding at least one active record
    pub total_liquidity_providers: u64,
    // Append-only registry length, bounds voting power refreshes
    pub registered_stakers: u64,
    pub total_financiers: u64,
    pub current_reward_rate: u64,
    pub rate_updated_at: i64,
    pub call_in_progress: bool,
    pub vault_authority_bump: u8,
    pub bump: u8,
}

impl Pool {
    pub fn begin_call(&mut self) -> Result<()> {
        require!(!self.call_in_progress, StakingError::ReentrantCall);
        self.call_in_progress = true;
        Ok(())
    }

    pub fn end_call(&mut self) {
        self.call_in_progress = false;
    }

    // Returns the registry index handed to the new staker
    pub fn register_staker(&mut self) -> Result<u64> {
        let index = self.registered_stakers;
        self.registered_stakers = self
            .registered_stakers
            .checked_add(1)
            .ok_or(StakingError::MathOverflow)?;
        Ok(index)
    }

    pub fn add_stake(&mut self, usd: u128) -> Result<()> {
        self.total_staked = self
            .total_staked
            .checked_add(usd)
            .ok_or(StakingError::MathOverflow)?;
        Ok(())
    }

    pub fn remove_stake(&mut self, usd: u128) -> Result<()> {
        self.total_staked = self
            .total_staked
            .checked_sub(usd)
            .ok_or(StakingError::MathOverflow)?;
        Ok(())
    }

    pub fn provider_joined(&mut self) -> Result<()> {
        self.total_liquidity_providers = self
            .total_liquidity_providers
            .checked_add(1)
            .ok_or(StakingError::MathOverflow)?;
        Ok(())
    }

    pub fn provider_left(&mut self) -> Result<()> {
        self.total_liquidity_providers = self
            .total_liquidity_providers
            .checked_sub(1)
            .ok_or(StakingError::MathOverflow)?;
        Ok(())
    }

    pub fn financier_granted(&mut self) -> Result<()> {
        self.total_financiers = self
            .total_financiers
            .checked_add(1)
            .ok_or(StakingError::MathOverflow)?;
        Ok(())
    }

    pub fn financier_revoked(&mut self) -> Result<()> {
        self.total_financiers = self
            .total_financiers
            .checked_sub(1)
            .ok_or(StakingError::MathOverflow)?;
        Ok(())
    }

    // Re-derives the rate from total_staked. Returns (old, new) when it moved.
    pub fn recompute_reward_rate(&mut self, config: &Config, now: i64) -> Option<(u64, u64)> {
        let old_rate = self.current_reward_rate;
        let new_rate = math::reward_rate_for(
            self.total_staked,
            config.initial_reward_rate,
            config.rate_reduction_step,
        );

        self.current_reward_rate = new_rate;
        self.rate_updated_at = now;

        (old_rate != new_rate).then_some((old_rate, new_rate))
    }

    // Past the registry cap stored voting power goes stale instead of failing the call
    pub fn normalization_enabled(&self) -> bool {
        self.registered_stakers <= MAX_NORMALIZED_STAKERS
    }
}
