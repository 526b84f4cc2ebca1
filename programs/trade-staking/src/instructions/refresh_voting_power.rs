use anchor_lang::prelude::*;
use anchor_lang::{AccountsExit, Discriminator};

use crate::{constants::*, errors::StakingError, state::*};

// Permissionless batch refresh of stored voting power snapshots.
//
// Remaining accounts are writable staker profiles and stake records in any
// mix, with each record's owner profile placed before the record.
#[derive(Accounts)]
pub struct RefreshVotingPower<'info> {
    pub caller: Signer<'info>,

    #[account(
        seeds = [POOL],
        bump = pool.bump,
    )]
    pub pool: Account<'info, Pool>,
}

impl<'info> RefreshVotingPower<'info> {
    // Returns the number of snapshots written
    pub fn refresh_voting_power(&self, remaining: &'info [AccountInfo<'info>]) -> Result<u32> {
        require!(
            !self.pool.call_in_progress,
            StakingError::ReentrantCall
        );

        if !self.pool.normalization_enabled() {
            msg!(
                "Voting power refresh skipped: {} registered stakers",
                self.pool.registered_stakers
            );
            return Ok(0);
        }

        let total_staked = self.pool.total_staked;
        // (owner, counts for voting) of every profile seen so far
        let mut owners: Vec<(Pubkey, bool)> = Vec::with_capacity(remaining.len());
        let mut refreshed: u32 = 0;

        for info in remaining {
            require!(
                info.is_writable && info.owner == &crate::ID,
                StakingError::InvalidRemainingAccounts
            );

            let is_profile = info
                .try_borrow_data()?
                .starts_with(StakerProfile::DISCRIMINATOR);

            if is_profile {
                let mut staker = Account::<StakerProfile>::try_from(info)?;
                staker.refresh_voting_power(total_staked);
                owners.push((staker.owner, staker.privilege.counts_for_voting()));
                staker.exit(&crate::ID)?;
            } else {
                let mut record = Account::<StakeRecord>::try_from(info)
                    .map_err(|_| error!(StakingError::InvalidRemainingAccounts))?;
                let counts = owners
                    .iter()
                    .find(|(owner, _)| *owner == record.owner)
                    .map(|(_, counts)| *counts)
                    .ok_or(StakingError::InvalidRemainingAccounts)?;
                record.refresh_voting_power(total_staked, counts);
                record.exit(&crate::ID)?;
            }

            refreshed = refreshed
                .checked_add(1)
                .ok_or(StakingError::MathOverflow)?;
        }

        msg!("Refreshed {} voting power snapshots", refreshed);
        Ok(refreshed)
    }
}
