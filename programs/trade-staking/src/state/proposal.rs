use anchor_lang::prelude::*;

use crate::{constants::*, errors::StakingError, math};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum ProposalStatus {
    Active,
    Passed,
    Failed,
    Executed,
}

// How a proposal is being resolved
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Finalization {
    // After a vote: decides early once enough power has been cast
    Opportunistic,
    // After the deadline: always decides
    Explicit,
}

#[account]
#[derive(InitSpace)]
pub struct Proposal {
    pub proposal_id: u64,
    pub proposer: Pubkey,
    #[max_len(MAX_TITLE_LENGTH)]
    pub title: String,
    #[max_len(MAX_DESCRIPTION_LENGTH)]
    pub description: String,
    // Accumulated normalized voting power
    pub votes_for: u64,
    pub votes_against: u64,
    pub created_at: i64,
    pub voting_deadline: i64,
    pub status: ProposalStatus,
    pub executed: bool,
    pub finalized_at: i64,
    pub bump: u8,
}

impl Proposal {
    pub fn is_initialized(&self) -> bool {
        self.proposer != Pubkey::default()
    }

    pub fn validate_text(title: &str, description: &str) -> Result<()> {
        require!(
            !title.trim().is_empty() && title.len() <= MAX_TITLE_LENGTH,
            StakingError::InvalidTitle
        );
        require!(
            description.len() <= MAX_DESCRIPTION_LENGTH,
            StakingError::DescriptionTooLong
        );
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.status == ProposalStatus::Active
    }

    // Active and still inside its voting window
    pub fn is_open(&self, now: i64) -> bool {
        self.is_active() && now < self.voting_deadline
    }

    pub fn total_votes(&self) -> u128 {
        self.votes_for as u128 + self.votes_against as u128
    }

    pub fn record_vote(&mut self, support: bool, power: u64, now: i64) -> Result<()> {
        require!(self.is_active(), StakingError::ProposalNotActive);
        require!(now < self.voting_deadline, StakingError::VotingClosed);
        require!(power > 0, StakingError::NoVotingPower);

        let tally = if support {
            &mut self.votes_for
        } else {
            &mut self.votes_against
        };
        *tally = tally.checked_add(power).ok_or(StakingError::MathOverflow)?;

        Ok(())
    }

    // Single resolution rule shared by voting and finalization.
    // Returns the new status when this call decided the proposal.
    pub fn evaluate(
        &mut self,
        now: i64,
        approval_threshold: u8,
        early_resolution_quorum: u64,
        mode: Finalization,
    ) -> Result<Option<ProposalStatus>> {
        if !self.is_active() {
            return match mode {
                Finalization::Explicit => err!(StakingError::ProposalNotActive),
                Finalization::Opportunistic => Ok(None),
            };
        }

        match mode {
            Finalization::Explicit => {
                require!(
                    now >= self.voting_deadline,
                    StakingError::VotingStillActive
                );
            }
            Finalization::Opportunistic => {
                let cast = self.total_votes();
                if cast == 0 || cast < early_resolution_quorum as u128 {
                    return Ok(None);
                }
            }
        }

        let outcome = match math::approval_percentage(self.votes_for, self.votes_against)? {
            Some(approval) if approval >= approval_threshold as u64 => ProposalStatus::Passed,
            _ => ProposalStatus::Failed,
        };

        self.status = outcome;
        self.finalized_at = now;
        Ok(Some(outcome))
    }

    pub fn execute(&mut self) -> Result<()> {
        require!(
            !self.executed && self.status != ProposalStatus::Executed,
            StakingError::ProposalAlreadyExecuted
        );
        require!(
            self.status == ProposalStatus::Passed,
            StakingError::ProposalNotPassed
        );

        self.status = ProposalStatus::Executed;
        self.executed = true;
        Ok(())
    }
}
