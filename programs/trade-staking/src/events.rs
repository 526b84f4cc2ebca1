use anchor_lang::prelude::*;

use crate::state::{ConfigUpdate, ProposalStatus};

#[event]
pub struct StakeCreated {
    pub owner: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
    pub usd_equivalent: u128,
    pub lock_deadline: i64,
}

#[event]
pub struct StakeUpdated {
    pub owner: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
    pub usd_equivalent: u128,
    pub voting_power: u64,
}

#[event]
pub struct FinancierStatusChanged {
    pub owner: Pubkey,
    pub is_financier: bool,
}

#[event]
pub struct LockDeadlineSet {
    pub owner: Pubkey,
    pub mint: Pubkey,
    pub lock_deadline: i64,
}

#[event]
pub struct Unstaked {
    pub owner: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
    pub remaining: u64,
}

#[event]
pub struct RewardDistributed {
    pub owner: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
}

#[event]
pub struct RewardClaimed {
    pub owner: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
}

#[event]
pub struct RewardsFunded {
    pub funder: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
    pub reward_reserve: u64,
}

#[event]
pub struct EmergencyExit {
    pub owner: Pubkey,
    pub mint: Pubkey,
    pub payout: u64,
    pub penalty: u64,
    pub forfeited_rewards: u128,
}

#[event]
pub struct RewardRateChanged {
    pub old_rate: u64,
    pub new_rate: u64,
    pub total_staked: u128,
}

#[event]
pub struct ConfigChanged {
    pub update: ConfigUpdate,
}

#[event]
pub struct TokenSupportChanged {
    pub mint: Pubkey,
    pub is_supported: bool,
}

#[event]
pub struct ProposalCreated {
    pub proposal_id: u64,
    pub proposer: Pubkey,
    pub title: String,
    pub voting_deadline: i64,
}

#[event]
pub struct ProposalVoted {
    pub proposal_id: u64,
    pub voter: Pubkey,
    pub support: bool,
    pub power: u64,
}

#[event]
pub struct ProposalStatusChanged {
    pub proposal_id: u64,
    pub status: ProposalStatus,
}

#[event]
pub struct ProposalExecuted {
    pub proposal_id: u64,
    pub executor: Pubkey,
}

#[event]
pub struct RevocationRequested {
    pub owner: Pubkey,
    pub requested_at: i64,
}

#[event]
pub struct RevocationCancelled {
    pub owner: Pubkey,
}

#[event]
pub struct RevocationExecuted {
    pub owner: Pubkey,
}
