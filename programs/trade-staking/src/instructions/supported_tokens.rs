use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{Mint, Token, TokenAccount},
};

use crate::{constants::*, errors::StakingError, events::*, state::*};

#[derive(Accounts)]
pub struct AddSupportedToken<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        seeds = [CONFIG],
        bump = config.bump,
        has_one = admin @ StakingError::UnauthorizedAdmin,
    )]
    pub config: Account<'info, Config>,

    #[account(
        seeds = [POOL],
        bump = pool.bump,
    )]
    pub pool: Account<'info, Pool>,

    pub mint: Box<Account<'info, Mint>>,

    #[account(
        init_if_needed,
        payer = admin,
        space = ANCHOR_DISCRIMINATOR + SupportedToken::INIT_SPACE,
        seeds = [SUPPORTED_TOKEN, mint.key().as_ref()],
        bump,
    )]
    pub supported_token: Box<Account<'info, SupportedToken>>,

    /// CHECK: PDA signer that owns every vault
    #[account(
        seeds = [VAULT_AUTHORITY],
        bump = pool.vault_authority_bump,
    )]
    pub vault_authority: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = admin,
        associated_token::mint = mint,
        associated_token::authority = vault_authority,
    )]
    pub vault: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl<'info> AddSupportedToken<'info> {
    pub fn add_supported_token(&mut self, bumps: &AddSupportedTokenBumps) -> Result<()> {
        let decimals = self.mint.decimals;
        require!(
            (MIN_TOKEN_DECIMALS..=MAX_TOKEN_DECIMALS).contains(&decimals),
            StakingError::InvalidTokenDecimals
        );

        let token = &mut self.supported_token;
        require!(!token.is_supported, StakingError::TokenAlreadySupported);

        // A removed token keeps its totals and reserve when re-enabled
        if token.mint == Pubkey::default() {
            token.set_inner(SupportedToken {
                mint: self.mint.key(),
                vault: self.vault.key(),
                decimals,
                is_supported: true,
                total_staked: 0,
                total_staked_usd: 0,
                reward_reserve: 0,
                bump: bumps.supported_token,
            });
        } else {
            token.is_supported = true;
        }

        msg!("Token supported: {} ({} decimals)", self.mint.key(), decimals);
        emit!(TokenSupportChanged {
            mint: self.mint.key(),
            is_supported: true,
        });

        Ok(())
    }
}

#[derive(Accounts)]
pub struct RemoveSupportedToken<'info> {
    pub admin: Signer<'info>,

    #[account(
        seeds = [CONFIG],
        bump = config.bump,
        has_one = admin @ StakingError::UnauthorizedAdmin,
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [SUPPORTED_TOKEN, supported_token.mint.as_ref()],
        bump = supported_token.bump,
    )]
    pub supported_token: Account<'info, SupportedToken>,
}

impl<'info> RemoveSupportedToken<'info> {
    // Blocks new deposits; withdrawals and exits keep working
    pub fn remove_supported_token(&mut self) -> Result<()> {
        require!(
            self.supported_token.is_supported,
            StakingError::UnsupportedToken
        );
        self.supported_token.is_supported = false;

        msg!("Token removed: {}", self.supported_token.mint);
        emit!(TokenSupportChanged {
            mint: self.supported_token.mint,
            is_supported: false,
        });

        Ok(())
    }
}
