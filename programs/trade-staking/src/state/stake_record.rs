use anchor_lang::prelude::*;

use crate::{errors::StakingError, math};

// One account's stake of one supported token
#[account]
#[derive(InitSpace)]
pub struct StakeRecord {
    pub owner: Pubkey,
    pub mint: Pubkey,
    // Native token units
    pub amount: u64,
    // 18 decimals
    pub usd_equivalent: u128,
    pub created_at: i64,
    pub last_reward_timestamp: i64,
    // Only ever moves forward
    pub lock_deadline: i64,
    // Settled but unpaid rewards, USD-equivalent
    pub pending_rewards: u128,
    // Last refreshed normalized share
    pub voting_power: u64,
    pub active: bool,
    pub bump: u8,
}

impl StakeRecord {
    pub fn is_initialized(&self) -> bool {
        self.owner != Pubkey::default()
    }

    // Accrues rewards since the last settlement at `rate` and advances the
    // reward clock. Returns the amount accrued by this call.
    pub fn settle_rewards(&mut self, now: i64, rate: u64) -> Result<u128> {
        let elapsed = now.saturating_sub(self.last_reward_timestamp);
        let accrued = if self.active {
            math::accrued_reward(self.usd_equivalent, rate, elapsed)?
        } else {
            0
        };

        self.pending_rewards = self
            .pending_rewards
            .checked_add(accrued)
            .ok_or(StakingError::MathOverflow)?;
        self.last_reward_timestamp = self.last_reward_timestamp.max(now);

        Ok(accrued)
    }

    // Pending rewards as of `now` without mutating the record
    pub fn pending_rewards_at(&self, now: i64, rate: u64) -> Result<u128> {
        let mut preview = self.clone();
        preview.settle_rewards(now, rate)?;
        Ok(preview.pending_rewards)
    }

    // Returns true when the deadline moved
    pub fn extend_lock(&mut self, deadline: i64) -> bool {
        if deadline > self.lock_deadline {
            self.lock_deadline = deadline;
            return true;
        }
        false
    }

    // Adds principal. Returns true when the record was inactive before.
    pub fn credit(&mut self, amount: u64, usd: u128, now: i64) -> Result<bool> {
        let activated = !self.active;
        if activated {
            self.created_at = now;
            self.last_reward_timestamp = now;
        }

        self.amount = self
            .amount
            .checked_add(amount)
            .ok_or(StakingError::MathOverflow)?;
        self.usd_equivalent = self
            .usd_equivalent
            .checked_add(usd)
            .ok_or(StakingError::MathOverflow)?;
        self.active = true;

        Ok(activated)
    }

    // Removes principal and the proportional USD value. Returns the USD removed.
    pub fn debit(&mut self, amount: u64) -> Result<u128> {
        require!(self.active, StakingError::StakeNotActive);
        require!(amount > 0, StakingError::ZeroAmount);
        require!(amount <= self.amount, StakingError::AmountExceedsStake);

        let usd_removed = if amount == self.amount {
            self.usd_equivalent
        } else {
            math::mul_div_floor(self.usd_equivalent, amount as u128, self.amount as u128)?
        };

        self.amount -= amount;
        self.usd_equivalent = self
            .usd_equivalent
            .checked_sub(usd_removed)
            .ok_or(StakingError::MathOverflow)?;

        if self.amount == 0 {
            self.usd_equivalent = 0;
            self.voting_power = 0;
            self.active = false;
        }

        Ok(usd_removed)
    }

    // Moves up to `available` whole token units out of pending rewards.
    // Sub-unit dust and anything above `available` stays pending.
    pub fn take_rewards(&mut self, decimals: u8, available: u64) -> Result<u64> {
        let units = math::to_token_units(self.pending_rewards, decimals)?.min(available);
        let paid = math::to_usd_equivalent(units, decimals)?;

        self.pending_rewards = self
            .pending_rewards
            .checked_sub(paid)
            .ok_or(StakingError::MathOverflow)?;

        Ok(units)
    }

    // Zeroes the position. Returns (amount, usd, forfeited rewards).
    // The lock deadline is kept so it never moves backwards.
    pub fn reset(&mut self, now: i64) -> (u64, u128, u128) {
        let snapshot = (self.amount, self.usd_equivalent, self.pending_rewards);

        self.amount = 0;
        self.usd_equivalent = 0;
        self.pending_rewards = 0;
        self.voting_power = 0;
        self.active = false;
        self.last_reward_timestamp = now;

        snapshot
    }

    pub fn refresh_voting_power(&mut self, total_staked: u128, counts_for_voting: bool) {
        self.voting_power = if self.active && counts_for_voting {
            math::voting_share(self.usd_equivalent, total_staked)
        } else {
            0
        };
    }
}
