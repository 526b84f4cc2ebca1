// Shared CPI and account helpers.
//
// Token movements go through the SPL token program; the vault authority PDA
// signs every outbound transfer. Records passed as remaining accounts are
// loaded and persisted here so each handler checks them the same way.

use anchor_lang::prelude::*;
use anchor_lang::AccountsExit;
use anchor_spl::token::{transfer, Transfer};

use crate::{constants::*, errors::StakingError, events::*, state::*};

// CPI HELPERS

// Transfer signed by the token owner (deposits and reward funding)
pub fn transfer_tokens<'info>(
    amount: u64,
    token_program: &AccountInfo<'info>,
    from: &AccountInfo<'info>,
    to: &AccountInfo<'info>,
    authority: &AccountInfo<'info>,
) -> Result<()> {
    transfer(
        CpiContext::new(
            token_program.clone(),
            Transfer {
                from: from.clone(),
                to: to.clone(),
                authority: authority.clone(),
            },
        ),
        amount,
    )
}

// Transfer out of a vault, signed by the vault authority PDA
pub fn transfer_from_vault<'info>(
    amount: u64,
    token_program: &AccountInfo<'info>,
    vault: &AccountInfo<'info>,
    to: &AccountInfo<'info>,
    vault_authority: &AccountInfo<'info>,
    vault_authority_bump: u8,
) -> Result<()> {
    let authority_seeds: &[&[u8]] = &[VAULT_AUTHORITY, &[vault_authority_bump]];
    let signer_seeds = &[authority_seeds];

    transfer(
        CpiContext::new_with_signer(
            token_program.clone(),
            Transfer {
                from: vault.clone(),
                to: to.clone(),
                authority: vault_authority.clone(),
            },
            signer_seeds,
        ),
        amount,
    )
}

// RE-ENTRANCY GUARD

// Marks the pool busy and writes the flag to the account data right away,
// so a nested self-invocation during a CPI sees it set.
pub fn enter_guard(pool: &mut Account<'_, Pool>) -> Result<()> {
    pool.begin_call()?;
    pool.exit(&crate::ID)
}

pub fn leave_guard(pool: &mut Account<'_, Pool>) {
    pool.end_call();
}

// REMAINING ACCOUNTS

// Deserializes stake records belonging to `owner`
pub fn read_owned_records<'info>(
    remaining: &'info [AccountInfo<'info>],
    owner: &Pubkey,
) -> Result<Vec<Account<'info, StakeRecord>>> {
    remaining
        .iter()
        .map(|info| {
            let record = Account::<StakeRecord>::try_from(info)
                .map_err(|_| error!(StakingError::InvalidRemainingAccounts))?;
            require_keys_eq!(record.owner, *owner, StakingError::NotRecordOwner);
            Ok(record)
        })
        .collect()
}

// Same as read_owned_records, for records the caller is going to persist
pub fn load_owned_records<'info>(
    remaining: &'info [AccountInfo<'info>],
    owner: &Pubkey,
) -> Result<Vec<Account<'info, StakeRecord>>> {
    require!(
        remaining.iter().all(|info| info.is_writable),
        StakingError::InvalidRemainingAccounts
    );
    read_owned_records(remaining, owner)
}

// Raises each record to the account-wide lock floor, refreshes its voting
// power snapshot when normalization is enabled and persists it.
pub fn sync_owned_records(
    records: &mut [Account<'_, StakeRecord>],
    staker: &StakerProfile,
    pool: &Pool,
) -> Result<()> {
    for record in records.iter_mut() {
        if record.active && record.extend_lock(staker.financier_lock_until) {
            emit!(LockDeadlineSet {
                owner: record.owner,
                mint: record.mint,
                lock_deadline: record.lock_deadline,
            });
        }
        if pool.normalization_enabled() {
            record.refresh_voting_power(pool.total_staked, staker.privilege.counts_for_voting());
        }
        record.exit(&crate::ID)?;
    }
    Ok(())
}

// Refreshes the stored snapshot of a touched profile. Returns false when
// the registry is past the normalization cap and snapshots stay stale.
pub fn refresh_staker_snapshot(pool: &Pool, staker: &mut StakerProfile) -> bool {
    if !pool.normalization_enabled() {
        msg!(
            "Voting power refresh skipped: {} registered stakers",
            pool.registered_stakers
        );
        return false;
    }

    staker.refresh_voting_power(pool.total_staked);
    true
}

// Emits RewardRateChanged when the pool's rate moved
pub fn recompute_reward_rate(pool: &mut Pool, config: &Config, now: i64) {
    if let Some((old_rate, new_rate)) = pool.recompute_reward_rate(config, now) {
        msg!("Reward rate: {} -> {} bps", old_rate, new_rate);
        emit!(RewardRateChanged {
            old_rate,
            new_rate,
            total_staked: pool.total_staked,
        });
    }
}
