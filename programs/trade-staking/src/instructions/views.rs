// Read-only instructions.
//
// Each returns its result as instruction return data; clients simulate the
// transaction to read it. Listing views work over the accounts passed as
// remaining accounts, so callers page through large sets themselves.

use anchor_lang::prelude::*;
use anchor_spl::token::TokenAccount;

use crate::{constants::*, errors::StakingError, helpers::*, math, state::*};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct StakeInfo {
    pub owner: Pubkey,
    pub total_usd_equivalent: u128,
    // Earliest creation time over the active records passed in
    pub staked_since: i64,
    pub voting_power: u64,
    pub active: bool,
    pub pending_rewards: u128,
    pub lock_deadline: i64,
    pub time_to_unlock: i64,
    pub is_financier: bool,
    pub revocation_requested: bool,
    pub revocation_requested_at: i64,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct TokenStakeInfo {
    pub owner: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
    pub usd_equivalent: u128,
    pub created_at: i64,
    pub lock_deadline: i64,
    pub pending_rewards: u128,
    pub voting_power: u64,
    pub active: bool,
    pub is_financier: bool,
    pub revocation_requested: bool,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct PoolStats {
    pub total_staked: u128,
    pub total_liquidity_providers: u64,
    pub registered_stakers: u64,
    pub total_financiers: u64,
    pub current_reward_rate: u64,
    // Summed over the readable vaults passed in
    pub custody_balance: u128,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct StakerSummary {
    pub owner: Pubkey,
    pub registry_index: u64,
    pub total_usd_equivalent: u128,
    pub voting_power: u64,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct TokenTotals {
    pub mint: Pubkey,
    pub is_supported: bool,
    pub total_staked: u64,
    pub total_staked_usd: u128,
    pub reward_reserve: u64,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct ProposalInfo {
    pub proposal_id: u64,
    pub proposer: Pubkey,
    pub title: String,
    pub description: String,
    pub votes_for: u64,
    pub votes_against: u64,
    pub created_at: i64,
    pub voting_deadline: i64,
    pub status: ProposalStatus,
    pub executed: bool,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct VoteReceiptInfo {
    pub has_voted: bool,
    pub support: bool,
    pub power: u64,
    pub cast_at: i64,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct GovernanceStats {
    pub total_proposals: u64,
    pub active_proposals: u64,
    pub passed_proposals: u64,
    pub failed_proposals: u64,
    pub executed_proposals: u64,
    pub total_votes_cast: u64,
    pub approval_threshold: u8,
    pub voting_duration: i64,
    pub early_resolution_quorum: u64,
}

// Remaining accounts: the staker's stake records
#[derive(Accounts)]
pub struct GetStakeInfo<'info> {
    #[account(
        seeds = [POOL],
        bump = pool.bump,
    )]
    pub pool: Account<'info, Pool>,

    #[account(
        seeds = [STAKER, staker.owner.as_ref()],
        bump = staker.bump,
    )]
    pub staker: Account<'info, StakerProfile>,
}

impl<'info> GetStakeInfo<'info> {
    pub fn get_stake_info(&self, remaining: &'info [AccountInfo<'info>]) -> Result<StakeInfo> {
        let now = Clock::get()?.unix_timestamp;
        let records = read_owned_records(remaining, &self.staker.owner)?;
        let rate = self.pool.current_reward_rate;

        let mut pending_rewards: u128 = 0;
        let mut lock_deadline = self.staker.financier_lock_until;
        let mut staked_since: Option<i64> = None;

        for record in records.iter() {
            pending_rewards = pending_rewards
                .checked_add(record.pending_rewards_at(now, rate)?)
                .ok_or(StakingError::MathOverflow)?;
            if record.active {
                lock_deadline = lock_deadline.max(record.lock_deadline);
                staked_since = Some(
                    staked_since.map_or(record.created_at, |since| since.min(record.created_at)),
                );
            }
        }

        let privilege = self.staker.privilege;
        Ok(StakeInfo {
            owner: self.staker.owner,
            total_usd_equivalent: self.staker.total_usd_equivalent,
            staked_since: staked_since.unwrap_or(0),
            voting_power: self.staker.live_voting_power(self.pool.total_staked),
            active: self.staker.active_records > 0,
            pending_rewards,
            lock_deadline,
            time_to_unlock: lock_deadline.saturating_sub(now).max(0),
            is_financier: privilege.holds_financier(),
            revocation_requested: privilege.revocation_requested_at().is_some(),
            revocation_requested_at: privilege.revocation_requested_at().unwrap_or(0),
        })
    }
}

#[derive(Accounts)]
pub struct GetTokenStake<'info> {
    #[account(
        seeds = [POOL],
        bump = pool.bump,
    )]
    pub pool: Account<'info, Pool>,

    #[account(
        seeds = [STAKER, stake_record.owner.as_ref()],
        bump = staker.bump,
    )]
    pub staker: Account<'info, StakerProfile>,

    #[account(
        seeds = [STAKE_RECORD, stake_record.owner.as_ref(), stake_record.mint.as_ref()],
        bump = stake_record.bump,
    )]
    pub stake_record: Account<'info, StakeRecord>,
}

impl<'info> GetTokenStake<'info> {
    pub fn get_token_stake(&self) -> Result<TokenStakeInfo> {
        let now = Clock::get()?.unix_timestamp;
        let record = &self.stake_record;
        let privilege = self.staker.privilege;

        let voting_power = if record.active && privilege.counts_for_voting() {
            math::voting_share(record.usd_equivalent, self.pool.total_staked)
        } else {
            0
        };

        Ok(TokenStakeInfo {
            owner: record.owner,
            mint: record.mint,
            amount: record.amount,
            usd_equivalent: record.usd_equivalent,
            created_at: record.created_at,
            lock_deadline: self.staker.effective_lock_deadline(record.lock_deadline),
            pending_rewards: record.pending_rewards_at(now, self.pool.current_reward_rate)?,
            voting_power,
            active: record.active,
            is_financier: privilege.holds_financier(),
            revocation_requested: privilege.revocation_requested_at().is_some(),
        })
    }
}

// Remaining accounts: vault token accounts; unreadable ones are skipped
#[derive(Accounts)]
pub struct GetPoolStats<'info> {
    #[account(
        seeds = [POOL],
        bump = pool.bump,
    )]
    pub pool: Account<'info, Pool>,

    /// CHECK: PDA signer that owns every vault
    #[account(
        seeds = [VAULT_AUTHORITY],
        bump = pool.vault_authority_bump,
    )]
    pub vault_authority: UncheckedAccount<'info>,
}

impl<'info> GetPoolStats<'info> {
    pub fn get_pool_stats(&self, remaining: &'info [AccountInfo<'info>]) -> Result<PoolStats> {
        let authority = self.vault_authority.key();
        let mut custody_balance: u128 = 0;

        for info in remaining {
            match Account::<TokenAccount>::try_from(info) {
                Ok(vault) if vault.owner == authority => {
                    custody_balance = custody_balance
                        .checked_add(vault.amount as u128)
                        .ok_or(StakingError::MathOverflow)?;
                }
                _ => msg!("Skipping unreadable vault {}", info.key()),
            }
        }

        Ok(PoolStats {
            total_staked: self.pool.total_staked,
            total_liquidity_providers: self.pool.total_liquidity_providers,
            registered_stakers: self.pool.registered_stakers,
            total_financiers: self.pool.total_financiers,
            current_reward_rate: self.pool.current_reward_rate,
            custody_balance,
        })
    }
}

// Remaining accounts: staker profiles, for list_stakers and list_financiers
#[derive(Accounts)]
pub struct ListStakers<'info> {
    #[account(
        seeds = [POOL],
        bump = pool.bump,
    )]
    pub pool: Account<'info, Pool>,
}

impl<'info> ListStakers<'info> {
    // Stakers with at least one active record, in registry order
    pub fn list_stakers(
        &self,
        remaining: &'info [AccountInfo<'info>],
    ) -> Result<Vec<StakerSummary>> {
        let mut stakers = self
            .profiles(remaining)?
            .into_iter()
            .filter(|staker| staker.active_records > 0)
            .map(|staker| StakerSummary {
                owner: staker.owner,
                registry_index: staker.registry_index,
                total_usd_equivalent: staker.total_usd_equivalent,
                voting_power: staker.live_voting_power(self.pool.total_staked),
            })
            .collect::<Vec<_>>();

        stakers.sort_by_key(|staker| staker.registry_index);
        Ok(stakers)
    }

    // Financiers in good standing; pending revocations are excluded
    pub fn list_financiers(&self, remaining: &'info [AccountInfo<'info>]) -> Result<Vec<Pubkey>> {
        let mut financiers = self
            .profiles(remaining)?
            .into_iter()
            .filter(|staker| staker.privilege.can_govern())
            .map(|staker| (staker.registry_index, staker.owner))
            .collect::<Vec<_>>();

        financiers.sort_by_key(|(index, _)| *index);
        Ok(financiers.into_iter().map(|(_, owner)| owner).collect())
    }

    fn profiles(
        &self,
        remaining: &'info [AccountInfo<'info>],
    ) -> Result<Vec<Account<'info, StakerProfile>>> {
        remaining
            .iter()
            .map(|info| {
                Account::<StakerProfile>::try_from(info)
                    .map_err(|_| error!(StakingError::InvalidRemainingAccounts))
            })
            .collect()
    }
}

// Remaining accounts: supported token accounts
#[derive(Accounts)]
pub struct GetTokenTotals<'info> {
    #[account(
        seeds = [POOL],
        bump = pool.bump,
    )]
    pub pool: Account<'info, Pool>,
}

impl<'info> GetTokenTotals<'info> {
    pub fn get_token_totals(
        &self,
        remaining: &'info [AccountInfo<'info>],
    ) -> Result<Vec<TokenTotals>> {
        remaining
            .iter()
            .map(|info| {
                let token = Account::<SupportedToken>::try_from(info)
                    .map_err(|_| error!(StakingError::InvalidRemainingAccounts))?;
                Ok(TokenTotals {
                    mint: token.mint,
                    is_supported: token.is_supported,
                    total_staked: token.total_staked,
                    total_staked_usd: token.total_staked_usd,
                    reward_reserve: token.reward_reserve,
                })
            })
            .collect()
    }
}

// Remaining accounts: proposals
#[derive(Accounts)]
pub struct ListActiveProposals<'info> {
    #[account(
        seeds = [GOVERNANCE],
        bump = governance.bump,
    )]
    pub governance: Account<'info, GovernanceState>,
}

impl<'info> ListActiveProposals<'info> {
    // Proposals still open for votes; Active past the deadline only awaits finalization
    pub fn list_active_proposals(
        &self,
        remaining: &'info [AccountInfo<'info>],
    ) -> Result<Vec<u64>> {
        let now = Clock::get()?.unix_timestamp;
        let mut active = Vec::with_capacity(remaining.len());

        for info in remaining {
            let proposal = Account::<Proposal>::try_from(info)
                .map_err(|_| error!(StakingError::InvalidRemainingAccounts))?;
            if proposal.is_open(now) {
                active.push(proposal.proposal_id);
            }
        }

        active.sort_unstable();
        Ok(active)
    }
}

#[derive(Accounts)]
pub struct GetProposal<'info> {
    #[account(
        seeds = [PROPOSAL, proposal.proposal_id.to_le_bytes().as_ref()],
        bump = proposal.bump,
    )]
    pub proposal: Box<Account<'info, Proposal>>,
}

impl<'info> GetProposal<'info> {
    pub fn get_proposal(&self) -> Result<ProposalInfo> {
        let proposal = &self.proposal;
        Ok(ProposalInfo {
            proposal_id: proposal.proposal_id,
            proposer: proposal.proposer,
            title: proposal.title.clone(),
            description: proposal.description.clone(),
            votes_for: proposal.votes_for,
            votes_against: proposal.votes_against,
            created_at: proposal.created_at,
            voting_deadline: proposal.voting_deadline,
            status: proposal.status,
            executed: proposal.executed,
        })
    }
}

#[derive(Accounts)]
pub struct GetVoteReceipt<'info> {
    /// CHECK: only used as a seed
    pub proposal: UncheckedAccount<'info>,

    /// CHECK: only used as a seed
    pub voter: UncheckedAccount<'info>,

    /// CHECK: may not exist yet; deserialized only when it does
    #[account(
        seeds = [VOTE_RECEIPT, proposal.key().as_ref(), voter.key().as_ref()],
        bump,
    )]
    pub receipt: UncheckedAccount<'info>,
}

impl<'info> GetVoteReceipt<'info> {
    pub fn get_vote_receipt(&self) -> Result<VoteReceiptInfo> {
        let info = self.receipt.to_account_info();
        if info.data_is_empty() {
            return Ok(VoteReceiptInfo {
                has_voted: false,
                support: false,
                power: 0,
                cast_at: 0,
            });
        }

        require_keys_eq!(*info.owner, crate::ID);
        let data = info.try_borrow_data()?;
        let receipt = VoteReceipt::try_deserialize(&mut &data[..])?;
        Ok(VoteReceiptInfo {
            has_voted: receipt.has_voted,
            support: receipt.support,
            power: receipt.power,
            cast_at: receipt.cast_at,
        })
    }
}

#[derive(Accounts)]
pub struct GetGovernanceStats<'info> {
    #[account(
        seeds = [CONFIG],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    #[account(
        seeds = [GOVERNANCE],
        bump = governance.bump,
    )]
    pub governance: Account<'info, GovernanceState>,
}

impl<'info> GetGovernanceStats<'info> {
    pub fn get_governance_stats(&self) -> Result<GovernanceStats> {
        let governance = &self.governance;
        Ok(GovernanceStats {
            total_proposals: governance.total_proposals,
            active_proposals: governance.active_proposals,
            passed_proposals: governance.passed_proposals,
            failed_proposals: governance.failed_proposals,
            executed_proposals: governance.executed_proposals,
            total_votes_cast: governance.total_votes_cast,
            approval_threshold: self.config.approval_threshold,
            voting_duration: self.config.voting_duration,
            early_resolution_quorum: self.config.early_resolution_quorum,
        })
    }
}
