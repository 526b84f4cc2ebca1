use anchor_lang::prelude::*;

use crate::{constants::*, events::*, helpers::*, state::*};

// Request, cancel and execute share one context.
// Remaining accounts: the caller's stake records whose snapshots should follow.
#[derive(Accounts)]
pub struct FinancierRevocation<'info> {
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

impl<'info> FinancierRevocation<'info> {
    // Voting power drops to zero immediately; principal stays in custody
    pub fn request_revocation(&mut self, remaining: &'info [AccountInfo<'info>]) -> Result<()> {
        enter_guard(&mut self.pool)?;
        let now = Clock::get()?.unix_timestamp;

        self.staker.request_revocation(now)?;
        self.sync(remaining)?;

        msg!("Revocation requested by {}", self.owner.key());
        emit!(RevocationRequested {
            owner: self.owner.key(),
            requested_at: now,
        });

        leave_guard(&mut self.pool);
        Ok(())
    }

    pub fn cancel_revocation(&mut self, remaining: &'info [AccountInfo<'info>]) -> Result<()> {
        enter_guard(&mut self.pool)?;

        self.staker.cancel_revocation()?;
        self.sync(remaining)?;

        msg!("Revocation cancelled by {}", self.owner.key());
        emit!(RevocationCancelled {
            owner: self.owner.key(),
        });

        leave_guard(&mut self.pool);
        Ok(())
    }

    pub fn execute_revocation(&mut self, remaining: &'info [AccountInfo<'info>]) -> Result<()> {
        enter_guard(&mut self.pool)?;
        let now = Clock::get()?.unix_timestamp;

        self.staker
            .execute_revocation(now, self.config.revocation_period)?;
        self.pool.financier_revoked()?;
        self.sync(remaining)?;

        msg!("Financier status revoked for {}", self.owner.key());
        emit!(RevocationExecuted {
            owner: self.owner.key(),
        });
        emit!(FinancierStatusChanged {
            owner: self.owner.key(),
            is_financier: false,
        });

        leave_guard(&mut self.pool);
        Ok(())
    }

    fn sync(&mut self, remaining: &'info [AccountInfo<'info>]) -> Result<()> {
        let mut records = load_owned_records(remaining, &self.owner.key())?;
        refresh_staker_snapshot(&self.pool, &mut self.staker);
        sync_owned_records(&mut records, &self.staker, &self.pool)
    }
}
