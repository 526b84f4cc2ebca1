use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::{constants::*, errors::StakingError, events::*, helpers::*, math, state::*};

#[derive(Accounts)]
pub struct EmergencyUnstake<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        seeds = [CONFIG],
        bump = config.bump,
    )]
    pub config: Box<Account<'info, Config>>,

    #[account(
        mut,
        seeds = [POOL],
        bump = pool.bump,
    )]
    pub pool: Account<'info, Pool>,

    #[account(address = supported_token.mint @ StakingError::UnsupportedToken)]
    pub mint: Box<Account<'info, Mint>>,

    #[account(
        mut,
        seeds = [SUPPORTED_TOKEN, mint.key().as_ref()],
        bump = supported_token.bump,
    )]
    pub supported_token: Box<Account<'info, SupportedToken>>,

    /// CHECK: PDA signer that owns every vault
    #[account(
        seeds = [VAULT_AUTHORITY],
        bump = pool.vault_authority_bump,
    )]
    pub vault_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        address = supported_token.vault @ StakingError::InvalidVault,
    )]
    pub vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = mint,
        token::authority = owner,
    )]
    pub owner_token_account: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [STAKER, owner.key().as_ref()],
        bump = staker.bump,
    )]
    pub staker: Box<Account<'info, StakerProfile>>,

    #[account(
        mut,
        seeds = [STAKE_RECORD, owner.key().as_ref(), mint.key().as_ref()],
        bump = stake_record.bump,
        constraint = stake_record.owner == owner.key() @ StakingError::NotRecordOwner,
    )]
    pub stake_record: Box<Account<'info, StakeRecord>>,

    pub token_program: Program<'info, Token>,
}

impl<'info> EmergencyUnstake<'info> {
    // Full exit ignoring the lock: principal minus the penalty, rewards forfeited
    pub fn emergency_exit(&mut self) -> Result<()> {
        enter_guard(&mut self.pool)?;
        let now = Clock::get()?.unix_timestamp;

        require!(self.stake_record.active, StakingError::StakeNotActive);
        require!(
            !self.staker.privilege.holds_financier(),
            StakingError::FinancierMustRevoke
        );

        self.stake_record
            .settle_rewards(now, self.pool.current_reward_rate)?;
        let (amount, usd_equivalent, forfeited_rewards) = self.stake_record.reset(now);
        let (payout, penalty) = math::apply_penalty(amount, self.config.emergency_penalty)?;

        self.supported_token.remove_stake(amount, usd_equivalent)?;
        // The penalty never leaves custody
        self.supported_token.fund(penalty)?;
        self.staker.remove_stake(usd_equivalent)?;
        self.pool.remove_stake(usd_equivalent)?;

        if self.staker.record_deactivated()? {
            self.pool.provider_left()?;
        }

        recompute_reward_rate(&mut self.pool, &self.config, now);
        refresh_staker_snapshot(&self.pool, &mut self.staker);

        require!(
            self.vault.amount >= payout,
            StakingError::InsufficientVaultBalance
        );

        emit!(EmergencyExit {
            owner: self.owner.key(),
            mint: self.mint.key(),
            payout,
            penalty,
            forfeited_rewards,
        });
        msg!(
            "Emergency exit: {} units of {}, penalty {}",
            payout,
            self.mint.key(),
            penalty
        );

        if payout > 0 {
            transfer_from_vault(
                payout,
                &self.token_program.to_account_info(),
                &self.vault.to_account_info(),
                &self.owner_token_account.to_account_info(),
                &self.vault_authority.to_account_info(),
                self.pool.vault_authority_bump,
            )?;
        }

        leave_guard(&mut self.pool);
        Ok(())
    }
}
