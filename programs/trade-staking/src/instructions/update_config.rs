use anchor_lang::prelude::*;

use crate::{constants::*, errors::StakingError, events::*, helpers::*, state::*};

#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [CONFIG],
        bump = config.bump,
        has_one = admin @ StakingError::UnauthorizedAdmin,
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [POOL],
        bump = pool.bump,
    )]
    pub pool: Account<'info, Pool>,
}

impl<'info> UpdateConfig<'info> {
    pub fn update_config(&mut self, update: ConfigUpdate) -> Result<()> {
        self.config.apply(update)?;

        if update.affects_reward_rate() {
            let now = Clock::get()?.unix_timestamp;
            recompute_reward_rate(&mut self.pool, &self.config, now);
        }

        msg!("Config updated: {:?}", update);
        emit!(ConfigChanged { update });

        Ok(())
    }
}
