use anchor_lang::prelude::*;

use crate::{constants::*, events::*, helpers::*, state::*};

// Remaining accounts: the caller's stake records, raised to the new lock floor
#[derive(Accounts)]
pub struct ApplyAsFinancier<'info> {
    pub owner: Signer<'info>,

    #[account(
        seeds = [CONFIG],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [POOL],
        bump = pool.bump,
    )]
    pub pool: Account<'info, Pool>,

    #[account(
        mut,
        seeds = [STAKER, owner.key().as_ref()],
        bump = staker.bump,
    )]
    pub staker: Account<'info, StakerProfile>,
}

impl<'info> ApplyAsFinancier<'info> {
    pub fn apply_as_financier(&mut self, remaining: &'info [AccountInfo<'info>]) -> Result<()> {
        enter_guard(&mut self.pool)?;
        let now = Clock::get()?.unix_timestamp;

        let lock_floor = self.staker.apply_as_financier(now, &self.config)?;
        self.pool.financier_granted()?;

        let mut records = load_owned_records(remaining, &self.owner.key())?;
        refresh_staker_snapshot(&self.pool, &mut self.staker);
        sync_owned_records(&mut records, &self.staker, &self.pool)?;

        msg!(
            "Financier status granted to {}, locked until {}",
            self.owner.key(),
            lock_floor
        );
        emit!(FinancierStatusChanged {
            owner: self.owner.key(),
            is_financier: true,
        });

        leave_guard(&mut self.pool);
        Ok(())
    }
}
