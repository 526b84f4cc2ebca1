// Trade-finance staking program
//
// Stable-value tokens are staked under time locks, accrue rewards at a
// globally decaying annual rate and are normalized into voting power that
// gates the financier role and governance proposals.
//
// Instructions:
// - initialize / update_config / add_supported_token / remove_supported_token
// - deposit / withdraw / emergency_exit
// - claim_rewards / fund_rewards
// - refresh_voting_power
// - apply_as_financier / request_revocation / cancel_revocation / execute_revocation
// - create_proposal / vote_on_proposal / finalize_vote / execute_proposal
// - get_* and list_* read views (return data)

use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod helpers;
pub mod instructions;
pub mod math;
pub mod state;

pub use constants::*;
use instructions::*;
use state::ConfigUpdate;

declare_id!("D9Bm7J7o9MqhEupuEDTHxrxsVj5dr2sScxjZsXfk964f");

#[program]
pub mod trade_staking {
    use super::*;

    // CONFIGURATION

    pub fn initialize(
        ctx: Context<Initialize>,
        minimum_stake: u128,
        normal_lock_duration: i64,
        initial_reward_rate: u64,
        rate_reduction_step: u64,
        emergency_penalty: u8,
    ) -> Result<()> {
        ctx.accounts.initialize(
            minimum_stake,
            normal_lock_duration,
            initial_reward_rate,
            rate_reduction_step,
            emergency_penalty,
            &ctx.bumps,
        )
    }

    pub fn update_config(ctx: Context<UpdateConfig>, update: ConfigUpdate) -> Result<()> {
        ctx.accounts.update_config(update)
    }

    pub fn add_supported_token(ctx: Context<AddSupportedToken>) -> Result<()> {
        ctx.accounts.add_supported_token(&ctx.bumps)
    }

    pub fn remove_supported_token(ctx: Context<RemoveSupportedToken>) -> Result<()> {
        ctx.accounts.remove_supported_token()
    }

    // STAKE LEDGER

    pub fn deposit(ctx: Context<Deposit>, amount: u64, requested_deadline: i64) -> Result<()> {
        ctx.accounts.deposit(amount, requested_deadline, &ctx.bumps)
    }

    pub fn withdraw(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
        ctx.accounts.withdraw(amount)
    }

    pub fn emergency_exit(ctx: Context<EmergencyUnstake>) -> Result<()> {
        ctx.accounts.emergency_exit()
    }

    // REWARDS

    pub fn claim_rewards(ctx: Context<ClaimRewards>) -> Result<()> {
        ctx.accounts.claim_rewards()
    }

    pub fn fund_rewards(ctx: Context<FundRewards>, amount: u64) -> Result<()> {
        ctx.accounts.fund_rewards(amount)
    }

    // VOTING POWER

    pub fn refresh_voting_power<'info>(
        ctx: Context<'_, '_, 'info, 'info, RefreshVotingPower<'info>>,
    ) -> Result<u32> {
        ctx.accounts.refresh_voting_power(ctx.remaining_accounts)
    }

    // FINANCIER LIFECYCLE

    pub fn apply_as_financier<'info>(
        ctx: Context<'_, '_, 'info, 'info, ApplyAsFinancier<'info>>,
    ) -> Result<()> {
        ctx.accounts.apply_as_financier(ctx.remaining_accounts)
    }

    pub fn request_revocation<'info>(
        ctx: Context<'_, '_, 'info, 'info, FinancierRevocation<'info>>,
    ) -> Result<()> {
        ctx.accounts.request_revocation(ctx.remaining_accounts)
    }

    pub fn cancel_revocation<'info>(
        ctx: Context<'_, '_, 'info, 'info, FinancierRevocation<'info>>,
    ) -> Result<()> {
        ctx.accounts.cancel_revocation(ctx.remaining_accounts)
    }

    pub fn execute_revocation<'info>(
        ctx: Context<'_, '_, 'info, 'info, FinancierRevocation<'info>>,
    ) -> Result<()> {
        ctx.accounts.execute_revocation(ctx.remaining_accounts)
    }

    // GOVERNANCE

    pub fn create_proposal(
        ctx: Context<CreateProposal>,
        proposal_id: u64,
        title: String,
        description: String,
    ) -> Result<()> {
        ctx.accounts
            .create_proposal(proposal_id, title, description, &ctx.bumps)
    }

    pub fn vote_on_proposal(ctx: Context<VoteOnProposal>, support: bool) -> Result<()> {
        ctx.accounts.vote_on_proposal(support, &ctx.bumps)
    }

    pub fn finalize_vote(ctx: Context<FinalizeVote>) -> Result<()> {
        ctx.accounts.finalize_vote()
    }

    pub fn execute_proposal(ctx: Context<ExecuteProposal>) -> Result<()> {
        ctx.accounts.execute_proposal()
    }

    // READ VIEWS

    pub fn get_stake_info<'info>(
        ctx: Context<'_, '_, 'info, 'info, GetStakeInfo<'info>>,
    ) -> Result<StakeInfo> {
        ctx.accounts.get_stake_info(ctx.remaining_accounts)
    }

    pub fn get_token_stake(ctx: Context<GetTokenStake>) -> Result<TokenStakeInfo> {
        ctx.accounts.get_token_stake()
    }

    pub fn get_pool_stats<'info>(
        ctx: Context<'_, '_, 'info, 'info, GetPoolStats<'info>>,
    ) -> Result<PoolStats> {
        ctx.accounts.get_pool_stats(ctx.remaining_accounts)
    }

    pub fn list_stakers<'info>(
        ctx: Context<'_, '_, 'info, 'info, ListStakers<'info>>,
    ) -> Result<Vec<StakerSummary>> {
        ctx.accounts.list_stakers(ctx.remaining_accounts)
    }

    pub fn list_financiers<'info>(
        ctx: Context<'_, '_, 'info, 'info, ListStakers<'info>>,
    ) -> Result<Vec<Pubkey>> {
        ctx.accounts.list_financiers(ctx.remaining_accounts)
    }

    pub fn get_token_totals<'info>(
        ctx: Context<'_, '_, 'info, 'info, GetTokenTotals<'info>>,
    ) -> Result<Vec<TokenTotals>> {
        ctx.accounts.get_token_totals(ctx.remaining_accounts)
    }

    pub fn list_active_proposals<'info>(
        ctx: Context<'_, '_, 'info, 'info, ListActiveProposals<'info>>,
    ) -> Result<Vec<u64>> {
        ctx.accounts.list_active_proposals(ctx.remaining_accounts)
    }

    pub fn get_proposal(ctx: Context<GetProposal>) -> Result<ProposalInfo> {
        ctx.accounts.get_proposal()
    }

    pub fn get_vote_receipt(ctx: Context<GetVoteReceipt>) -> Result<VoteReceiptInfo> {
        ctx.accounts.get_vote_receipt()
    }

    pub fn get_governance_stats(ctx: Context<GetGovernanceStats>) -> Result<GovernanceStats> {
        ctx.accounts.get_governance_stats()
    }
}
