use anchor_lang::prelude::*;

use crate::{constants::*, events::*, helpers::*, state::*};

// Marks a passed proposal executed; the governed change itself happens off-chain
#[derive(Accounts)]
pub struct ExecuteProposal<'info> {
    pub executor: Signer<'info>,

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

impl<'info> ExecuteProposal<'info> {
    pub fn execute_proposal(&mut self) -> Result<()> {
        enter_guard(&mut self.pool)?;

        self.proposal.execute()?;
        self.governance.proposal_executed()?;

        msg!("Proposal {} executed", self.proposal.proposal_id);
        emit!(ProposalExecuted {
            proposal_id: self.proposal.proposal_id,
            executor: self.executor.key(),
        });

        leave_guard(&mut self.pool);
        Ok(())
    }
}
