use anchor_lang::prelude::*;

use crate::{constants::*, errors::StakingError, events::*, helpers::*, state::*};

#[derive(Accounts)]
#[instruction(proposal_id: u64)]
pub struct CreateProposal<'info> {
    #[account(mut)]
    pub proposer: Signer<'info>,

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
        seeds = [STAKER, proposer.key().as_ref()],
        bump = staker.bump,
    )]
    pub staker: Account<'info, StakerProfile>,

    // init_if_needed so a taken identifier reports DuplicateProposalId
    #[account(
        init_if_needed,
        payer = proposer,
        space = ANCHOR_DISCRIMINATOR + Proposal::INIT_SPACE,
        seeds = [PROPOSAL, proposal_id.to_le_bytes().as_ref()],
        bump,
    )]
    pub proposal: Box<Account<'info, Proposal>>,

    pub system_program: Program<'info, System>,
}

impl<'info> CreateProposal<'info> {
    pub fn create_proposal(
        &mut self,
        proposal_id: u64,
        title: String,
        description: String,
        bumps: &CreateProposalBumps,
    ) -> Result<()> {
        enter_guard(&mut self.pool)?;
        let now = Clock::get()?.unix_timestamp;

        require!(
            !self.proposal.is_initialized(),
            StakingError::DuplicateProposalId
        );
        require!(
            self.staker.privilege.can_govern(),
            StakingError::NotFinancier
        );
        Proposal::validate_text(&title, &description)?;
        require!(
            self.staker.total_usd_equivalent >= self.config.proposal_threshold,
            StakingError::BelowProposalThreshold
        );

        let voting_deadline = now
            .checked_add(self.config.voting_window())
            .ok_or(StakingError::MathOverflow)?;

        emit!(ProposalCreated {
            proposal_id,
            proposer: self.proposer.key(),
            title: title.clone(),
            voting_deadline,
        });

        self.proposal.set_inner(Proposal {
            proposal_id,
            proposer: self.proposer.key(),
            title,
            description,
            votes_for: 0,
            votes_against: 0,
            created_at: now,
            voting_deadline,
            status: ProposalStatus::Active,
            executed: false,
            finalized_at: 0,
            bump: bumps.proposal,
        });
        self.governance.proposal_created()?;

        msg!(
            "Proposal {} created, voting closes at {}",
            proposal_id,
            voting_deadline
        );

        leave_guard(&mut self.pool);
        Ok(())
    }
}
