use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::{constants::*, errors::StakingError, events::*, helpers::*, state::*};

#[derive(Accounts)]
pub struct Deposit<'info> {
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
        constraint = supported_token.is_supported @ StakingError::UnsupportedToken,
    )]
    pub supported_token: Box<Account<'info, SupportedToken>>,

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
        init_if_needed,
        payer = owner,
        space = ANCHOR_DISCRIMINATOR + StakerProfile::INIT_SPACE,
        seeds = [STAKER, owner.key().as_ref()],
        bump,
    )]
    pub staker: Box<Account<'info, StakerProfile>>,

    #[account(
        init_if_needed,
        payer = owner,
        space = ANCHOR_DISCRIMINATOR + StakeRecord::INIT_SPACE,
        seeds = [STAKE_RECORD, owner.key().as_ref(), mint.key().as_ref()],
        bump,
    )]
    pub stake_record: Box<Account<'info, StakeRecord>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

impl<'info> Deposit<'info> {
    pub fn deposit(
        &mut self,
        amount: u64,
        requested_deadline: i64,
        bumps: &DepositBumps,
    ) -> Result<()> {
        enter_guard(&mut self.pool)?;
        let now = Clock::get()?.unix_timestamp;

        require!(amount > 0, StakingError::ZeroAmount);
        require!(
            self.owner_token_account.amount >= amount,
            StakingError::InsufficientBalance
        );

        let usd_equivalent = self.supported_token.to_usd(amount)?;
        let holds_financier = self.staker.privilege.holds_financier();
        require!(
            usd_equivalent >= self.config.minimum_stake_for(holds_financier),
            StakingError::BelowMinimumStake
        );

        let latest_deadline = now
            .checked_add(MAX_LOCK_DURATION)
            .ok_or(StakingError::MathOverflow)?;
        require!(
            requested_deadline <= latest_deadline,
            StakingError::LockDeadlineTooFar
        );
        // Requests shorter than the applicable lock are raised silently
        let minimum_deadline = now
            .checked_add(self.config.lock_duration_for(holds_financier))
            .ok_or(StakingError::MathOverflow)?;
        let deadline = requested_deadline.max(minimum_deadline);

        self.register(now, bumps)?;

        // Settle at the rate in force before this deposit moves the total
        self.stake_record
            .settle_rewards(now, self.pool.current_reward_rate)?;

        let activated = self.stake_record.credit(amount, usd_equivalent, now)?;
        if activated && self.staker.record_activated()? {
            self.pool.provider_joined()?;
        }

        let previous_usd = self.staker.total_usd_equivalent;
        self.supported_token.add_stake(amount, usd_equivalent)?;
        self.staker.add_stake(usd_equivalent)?;
        self.pool.add_stake(usd_equivalent)?;
        recompute_reward_rate(&mut self.pool, &self.config, now);

        // Only a crossing grants; a revoked account already above the minimum stays Normal
        if !holds_financier
            && self
                .staker
                .crossed_financier_minimum(previous_usd, &self.config)
        {
            self.staker.grant_financier(now, &self.config)?;
            self.pool.financier_granted()?;
            msg!("Financier status granted to {}", self.owner.key());
            emit!(FinancierStatusChanged {
                owner: self.owner.key(),
                is_financier: true,
            });
        }

        let floor = self.staker.effective_lock_deadline(deadline);
        if self.stake_record.extend_lock(floor) {
            emit!(LockDeadlineSet {
                owner: self.owner.key(),
                mint: self.mint.key(),
                lock_deadline: self.stake_record.lock_deadline,
            });
        }

        if refresh_staker_snapshot(&self.pool, &mut self.staker) {
            let counts = self.staker.privilege.counts_for_voting();
            self.stake_record
                .refresh_voting_power(self.pool.total_staked, counts);
        }

        if activated {
            emit!(StakeCreated {
                owner: self.owner.key(),
                mint: self.mint.key(),
                amount: self.stake_record.amount,
                usd_equivalent: self.stake_record.usd_equivalent,
                lock_deadline: self.stake_record.lock_deadline,
            });
        } else {
            emit!(StakeUpdated {
                owner: self.owner.key(),
                mint: self.mint.key(),
                amount: self.stake_record.amount,
                usd_equivalent: self.stake_record.usd_equivalent,
                voting_power: self.stake_record.voting_power,
            });
        }

        msg!(
            "Deposit: {} units of {} (usd {}), locked until {}",
            amount,
            self.mint.key(),
            usd_equivalent,
            self.stake_record.lock_deadline
        );

        // Ledger is final before tokens move
        transfer_tokens(
            amount,
            &self.token_program.to_account_info(),
            &self.owner_token_account.to_account_info(),
            &self.vault.to_account_info(),
            &self.owner.to_account_info(),
        )?;

        leave_guard(&mut self.pool);
        Ok(())
    }

    // Claims freshly created profile and record accounts for the caller
    fn register(&mut self, now: i64, bumps: &DepositBumps) -> Result<()> {
        if !self.staker.is_registered() {
            let registry_index = self.pool.register_staker()?;
            self.staker.set_inner(StakerProfile {
                owner: self.owner.key(),
                registry_index,
                total_usd_equivalent: 0,
                active_records: 0,
                privilege: Privilege::Normal,
                financier_lock_until: 0,
                voting_power: 0,
                registered_at: now,
                bump: bumps.staker,
            });
        }

        if !self.stake_record.is_initialized() {
            self.stake_record.set_inner(StakeRecord {
                owner: self.owner.key(),
                mint: self.mint.key(),
                amount: 0,
                usd_equivalent: 0,
                created_at: now,
                last_reward_timestamp: now,
                lock_deadline: 0,
                pending_rewards: 0,
                voting_power: 0,
                active: false,
                bump: bumps.stake_record,
            });
        }

        Ok(())
    }
}
