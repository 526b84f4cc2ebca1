use anchor_lang::prelude::*;

use crate::{errors::StakingError, state::ProposalStatus};

// Aggregate proposal counters
#[account]
#[derive(InitSpace)]
pub struct GovernanceState {
    pub total_proposals: u64,
    pub active_proposals: u64,
    pub passed_proposals: u64,
    pub failed_proposals: u64,
    pub executed_proposals: u64,
    pub total_votes_cast: u64,
    pub bump: u8,
}

impl GovernanceState {
    pub fn proposal_created(&mut self) -> Result<()> {
        self.total_proposals = self
            .total_proposals
            .checked_add(1)
            .ok_or(StakingError::MathOverflow)?;
        self.active_proposals = self
            .active_proposals
            .checked_add(1)
            .ok_or(StakingError::MathOverflow)?;
        Ok(())
    }

    pub fn vote_cast(&mut self) -> Result<()> {
        self.total_votes_cast = self
            .total_votes_cast
            .checked_add(1)
            .ok_or(StakingError::MathOverflow)?;
        Ok(())
    }

    // Moves an Active proposal into its decided bucket
    pub fn proposal_resolved(&mut self, outcome: ProposalStatus) -> Result<()> {
        self.active_proposals = self
            .active_proposals
            .checked_sub(1)
            .ok_or(StakingError::MathOverflow)?;

        let bucket = match outcome {
            ProposalStatus::Passed => &mut self.passed_proposals,
            _ => &mut self.failed_proposals,
        };
        *bucket = bucket.checked_add(1).ok_or(StakingError::MathOverflow)?;
        Ok(())
    }

    pub fn proposal_executed(&mut self) -> Result<()> {
        self.executed_proposals = self
            .executed_proposals
            .checked_add(1)
            .ok_or(StakingError::MathOverflow)?;
        Ok(())
    }
}
