use anchor_lang::prelude::*;

use crate::{constants::*, events::*, helpers::*, state::*};

// Permissionless resolution once the voting window has closed
#[derive(Accounts)]
pub struct FinalizeVote<'info> {
    pub caller: Signer<'info>,

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
        mut,
        seeds = [PROPOSAL, proposal.proposal_id.to_le_bytes().as_ref()],
        bump = proposal.bump,
    )]
    pub proposal: Box<Account<'info, Proposal>>,
}

impl<'info> FinalizeVote<'info> {
    pub fn finalize_vote(&mut self) -> Result<()> {
        enter_guard(&mut self.pool)?;
        let now = Clock::get()?.unix_timestamp;

        let outcome = self.proposal.evaluate(
            now,
            self.config.approval_threshold,
            self.config.early_resolution_quorum,
            Finalization::Explicit,
        )?;

        if let Some(status) = outcome {
            self.governance.proposal_resolved(status)?;
            msg!(
                "Proposal {} finalized: {:?} ({} for, {} against)",
                self.proposal.proposal_id,
                status,
                self.proposal.votes_for,
                self.proposal.votes_against
            );
            emit!(ProposalStatusChanged {
                proposal_id: self.proposal.proposal_id,
                status,
            });
        }

        leave_guard(&mut self.pool);
        Ok(())
    }
}
