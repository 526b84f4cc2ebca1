use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::{constants::*, errors::StakingError, events::*, helpers::*, state::*};

#[derive(Accounts)]
pub struct ClaimRewards<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

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
        seeds = [STAKE_RECORD, owner.key().as_ref(), mint.key().as_ref()],
        bump = stake_record.bump,
        constraint = stake_record.owner == owner.key() @ StakingError::NotRecordOwner,
    )]
    pub stake_record: Box<Account<'info, StakeRecord>>,

    pub token_program: Program<'info, Token>,
}

impl<'info> ClaimRewards<'info> {
    // Pays settled rewards only; principal and lock are untouched
    pub fn claim_rewards(&mut self) -> Result<()> {
        enter_guard(&mut self.pool)?;
        let now = Clock::get()?.unix_timestamp;

        self.stake_record
            .settle_rewards(now, self.pool.current_reward_rate)?;
        let rewards = self
            .stake_record
            .take_rewards(self.supported_token.decimals, u64::MAX)?;
        require!(rewards > 0, StakingError::NoRewardsToClaim);

        self.supported_token.pay_rewards(rewards)?;
        require!(
            self.vault.amount >= rewards,
            StakingError::InsufficientVaultBalance
        );

        emit!(RewardClaimed {
            owner: self.owner.key(),
            mint: self.mint.key(),
            amount: rewards,
        });
        msg!("Claimed {} units of {}", rewards, self.mint.key());

        transfer_from_vault(
            rewards,
            &self.token_program.to_account_info(),
            &self.vault.to_account_info(),
            &self.owner_token_account.to_account_info(),
            &self.vault_authority.to_account_info(),
            self.pool.vault_authority_bump,
        )?;

        leave_guard(&mut self.pool);
        Ok(())
    }
}
