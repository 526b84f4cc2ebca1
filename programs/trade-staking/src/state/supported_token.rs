use anchor_lang::prelude::*;

use crate::{errors::StakingError, math};

// Per-token custody and totals
#[account]
#[derive(InitSpace)]
pub struct SupportedToken {
    pub mint: Pubkey,
    pub vault: Pubkey,
    pub decimals: u8,
    // Cleared by removal; existing stakes can still leave
    pub is_supported: bool,
    // Principal held in the vault, native units
    pub total_staked: u64,
    pub total_staked_usd: u128,
    // Vault balance set aside for reward payouts, native units
    pub reward_reserve: u64,
    pub bump: u8,
}

impl SupportedToken {
    pub fn to_usd(&self, amount: u64) -> Result<u128> {
        math::to_usd_equivalent(amount, self.decimals)
    }

    pub fn add_stake(&mut self, amount: u64, usd: u128) -> Result<()> {
        self.total_staked = self
            .total_staked
            .checked_add(amount)
            .ok_or(StakingError::MathOverflow)?;
        self.total_staked_usd = self
            .total_staked_usd
            .checked_add(usd)
            .ok_or(StakingError::MathOverflow)?;
        Ok(())
    }

    pub fn remove_stake(&mut self, amount: u64, usd: u128) -> Result<()> {
        self.total_staked = self
            .total_staked
            .checked_sub(amount)
            .ok_or(StakingError::MathOverflow)?;
        self.total_staked_usd = self
            .total_staked_usd
            .checked_sub(usd)
            .ok_or(StakingError::MathOverflow)?;
        Ok(())
    }

    pub fn fund(&mut self, amount: u64) -> Result<()> {
        self.reward_reserve = self
            .reward_reserve
            .checked_add(amount)
            .ok_or(StakingError::MathOverflow)?;
        Ok(())
    }

    pub fn pay_rewards(&mut self, amount: u64) -> Result<()> {
        require!(
            amount <= self.reward_reserve,
            StakingError::InsufficientRewardReserve
        );
        self.reward_reserve -= amount;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::USD_SCALE;

    fn token(decimals: u8) -> SupportedToken {
        SupportedToken {
            mint: Pubkey::new_unique(),
            vault: Pubkey::new_unique(),
            decimals,
            is_supported: true,
            total_staked: 0,
            total_staked_usd: 0,
            reward_reserve: 0,
            bump: 0,
        }
    }

    #[test]
    fn valuation_follows_precision() {
        assert_eq!(token(6).to_usd(2_500_000).unwrap(), 5 * USD_SCALE / 2);
        assert_eq!(token(18).to_usd(7).unwrap(), 7);
    }

    #[test]
    fn totals_track_stake_movements() {
        let mut token = token(6);
        token.add_stake(3_000_000, 3 * USD_SCALE).unwrap();
        token.remove_stake(1_000_000, USD_SCALE).unwrap();
        assert_eq!(token.total_staked, 2_000_000);
        assert_eq!(token.total_staked_usd, 2 * USD_SCALE);
        assert!(token.remove_stake(3_000_000, 0).is_err());
    }

    #[test]
    fn payouts_are_bounded_by_the_reserve() {
        let mut token = token(6);
        token.fund(100).unwrap();
        token.pay_rewards(60).unwrap();
        let err = token.pay_rewards(41).unwrap_err();
        assert_eq!(err, StakingError::InsufficientRewardReserve.into());
        assert_eq!(token.reward_reserve, 40);
    }
}
