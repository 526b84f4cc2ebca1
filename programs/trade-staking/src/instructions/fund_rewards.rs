use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::{constants::*, errors::StakingError, events::*, helpers::*, state::*};

// Anyone may top up a token's reward reserve
#[derive(Accounts)]
pub struct FundRewards<'info> {
    pub funder: Signer<'info>,

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

    #[account(
        mut,
        address = supported_token.vault @ StakingError::InvalidVault,
    )]
    pub vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = mint,
        token::authority = funder,
    )]
    pub funder_token_account: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

impl<'info> FundRewards<'info> {
    pub fn fund_rewards(&mut self, amount: u64) -> Result<()> {
        enter_guard(&mut self.pool)?;

        require!(amount > 0, StakingError::ZeroAmount);
        require!(
            self.funder_token_account.amount >= amount,
            StakingError::InsufficientBalance
        );

        self.supported_token.fund(amount)?;

        emit!(RewardsFunded {
            funder: self.funder.key(),
            mint: self.mint.key(),
            amount,
            reward_reserve: self.supported_token.reward_reserve,
        });
        msg!(
            "Reward reserve of {} is now {}",
            self.mint.key(),
            self.supported_token.reward_reserve
        );

        transfer_tokens(
            amount,
            &self.token_program.to_account_info(),
            &self.funder_token_account.to_account_info(),
            &self.vault.to_account_info(),
            &self.funder.to_account_info(),
        )?;

        leave_guard(&mut self.pool);
        Ok(())
    }
}
