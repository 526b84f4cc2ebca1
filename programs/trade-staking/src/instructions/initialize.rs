use anchor_lang::prelude::*;

use crate::{constants::*, state::*};

// One-shot setup of the configuration, pool and governance accounts
#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        init,
        payer = admin,
        space = ANCHOR_DISCRIMINATOR + Config::INIT_SPACE,
        seeds = [CONFIG],
        bump,
    )]
    pub config: Account<'info, Config>,

    #[account(
        init,
        payer = admin,
        space = ANCHOR_DISCRIMINATOR + Pool::INIT_SPACE,
        seeds = [POOL],
        bump,
    )]
    pub pool: Account<'info, Pool>,

    #[account(
        init,
        payer = admin,
        space = ANCHOR_DISCRIMINATOR + GovernanceState::INIT_SPACE,
        seeds = [GOVERNANCE],
        bump,
    )]
    pub governance: Account<'info, GovernanceState>,

    /// CHECK: PDA signer that owns every vault
    #[account(
        seeds = [VAULT_AUTHORITY],
        bump,
    )]
    pub vault_authority: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

impl<'info> Initialize<'info> {
    pub fn initialize(
        &mut self,
        minimum_stake: u128,
        normal_lock_duration: i64,
        initial_reward_rate: u64,
        rate_reduction_step: u64,
        emergency_penalty: u8,
        bumps: &InitializeBumps,
    ) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;

        let config = Config::with_defaults(
            self.admin.key(),
            minimum_stake,
            normal_lock_duration,
            initial_reward_rate,
            rate_reduction_step,
            emergency_penalty,
            bumps.config,
        )?;

        self.pool.set_inner(Pool {
            total_staked: 0,
            total_liquidity_providers: 0,
            registered_stakers: 0,
            total_financiers: 0,
            current_reward_rate: config.initial_reward_rate,
            rate_updated_at: now,
            call_in_progress: false,
            vault_authority_bump: bumps.vault_authority,
            bump: bumps.pool,
        });

        self.governance.set_inner(GovernanceState {
            total_proposals: 0,
            active_proposals: 0,
            passed_proposals: 0,
            failed_proposals: 0,
            executed_proposals: 0,
            total_votes_cast: 0,
            bump: bumps.governance,
        });

        msg!(
            "Initialized: minimum stake {}, financier minimum {}, rate {} bps",
            config.minimum_stake,
            config.financier_minimum_stake,
            config.initial_reward_rate
        );

        self.config.set_inner(config);

        Ok(())
    }
}
