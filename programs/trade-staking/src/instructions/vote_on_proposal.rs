use anchor_lang::prelude::*;

use crate::{constants::*, errors::StakingError, events::*, helpers::*, state::*};

#[derive(Accounts)]
pub struct VoteOnProposal<'info> {
    #[account(mut)]
    pub voter: Signer<'info>,

    #[account(
        seeds = [CONFIG],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [POOL],
        bump = pool.bump,
    )]
    pub pool: Account<'info, Pool>,

    #[account(
        mut,
        seeds = [GOVERNANCE],
        bump = governance.bump,
    )]
    pub governance: Account<'info, GovernanceState>,

    #[account(
        seeds = [STAKER, voter.key().as_ref()],
        bump = staker.bump,
    )]
    pub staker: Account<'info, StakerProfile>,

    #[account(
        mut,
        seeds = [PROPOSAL, proposal.proposal_id.to_le_bytes().as_ref()],
        bump = proposal.bump,
    )]
    pub proposal: Box<Account<'info, Proposal>>,

    // init_if_needed so a second vote reports AlreadyVoted
    #[account(
        init_if_needed,
        payer = voter,
        space = ANCHOR_DISCRIMINATOR + VoteReceipt::INIT_SPACE,
        seeds = [VOTE_RECEIPT, proposal.key().as_ref(), voter.key().as_ref()],
        bump,
    )]
    pub receipt: Account<'info, VoteReceipt>,

    pub system_program: Program<'info, System>,
}

impl<'info> VoteOnProposal<'info> {
    pub fn vote_on_proposal(&mut self, support: bool, bumps: &VoteOnProposalBumps) -> Result<()> {
        enter_guard(&mut self.pool)?;
        let now = Clock::get()?.unix_timestamp;

        require!(!self.receipt.has_voted, StakingError::AlreadyVoted);
        require!(
            self.staker.privilege.can_govern(),
            StakingError::NotFinancier
        );

        // Live share of the current total, never a stale snapshot
        let power = self.staker.live_voting_power(self.pool.total_staked);
        self.proposal.record_vote(support, power, now)?;

        self.receipt.set_inner(VoteReceipt {
            proposal: self.proposal.key(),
            voter: self.voter.key(),
            has_voted: true,
            support,
            power,
            cast_at: now,
            bump: bumps.receipt,
        });
        self.governance.vote_cast()?;

        emit!(ProposalVoted {
            proposal_id: self.proposal.proposal_id,
            voter: self.voter.key(),
            support,
            power,
        });
        msg!(
            "Vote on proposal {}: support {} with power {}",
            self.proposal.proposal_id,
            support,
            power
        );

        let outcome = self.proposal.evaluate(
            now,
            self.config.approval_threshold,
            self.config.early_resolution_quorum,
            Finalization::Opportunistic,
        )?;
        if let Some(status) = outcome {
            self.governance.proposal_resolved(status)?;
            msg!("Proposal {} resolved early: {:?}", self.proposal.proposal_id, status);
            emit!(ProposalStatusChanged {
                proposal_id: self.proposal.proposal_id,
                status,
            });
        }

        leave_guard(&mut self.pool);
        Ok(())
    }
}
