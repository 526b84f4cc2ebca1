use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::{constants::*, errors::StakingError, events::*, helpers::*, state::*};

#[derive(Accounts)]
pub struct Withdraw<'info> {
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

    // Removed tokens can still be withdrawn
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

impl<'info> Withdraw<'info> {
    pub fn withdraw(&mut self, amount: u64) -> Result<()> {
        enter_guard(&mut self.pool)?;
        let now = Clock::get()?.unix_timestamp;

        require!(self.stake_record.active, StakingError::StakeNotActive);
        require!(
            !self.staker.privilege.holds_financier(),
            StakingError::FinancierMustRevoke
        );
        require!(
            now >= self
                .staker
                .effective_lock_deadline(self.stake_record.lock_deadline),
            StakingError::LockNotExpired
        );

        self.stake_record
            .settle_rewards(now, self.pool.current_reward_rate)?;
        let usd_removed = self.stake_record.debit(amount)?;

        // Rewards ride along with the principal as far as the reserve allows
        let rewards = self
            .stake_record
            .take_rewards(self.supported_token.decimals, self.supported_token.reward_reserve)?;
        self.supported_token.pay_rewards(rewards)?;

        self.supported_token.remove_stake(amount, usd_removed)?;
        self.staker.remove_stake(usd_removed)?;
        self.pool.remove_stake(usd_removed)?;

        if !self.stake_record.active && self.staker.record_deactivated()? {
            self.pool.provider_left()?;
        }

        recompute_reward_rate(&mut self.pool, &self.config, now);

        if refresh_staker_snapshot(&self.pool, &mut self.staker) {
            let counts = self.staker.privilege.counts_for_voting();
            self.stake_record
                .refresh_voting_power(self.pool.total_staked, counts);
        }

        let payout = amount
            .checked_add(rewards)
            .ok_or(StakingError::MathOverflow)?;
        require!(
            self.vault.amount >= payout,
            StakingError::InsufficientVaultBalance
        );

        emit!(Unstaked {
            owner: self.owner.key(),
            mint: self.mint.key(),
            amount,
            remaining: self.stake_record.amount,
        });
        if rewards > 0 {
            emit!(RewardDistributed {
                owner: self.owner.key(),
                mint: self.mint.key(),
                amount: rewards,
            });
        }

        msg!(
            "Withdraw: {} units of {} plus {} in rewards",
            amount,
            self.mint.key(),
            rewards
        );

        transfer_from_vault(
            payout,
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
