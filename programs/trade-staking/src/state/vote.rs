use anchor_lang::prelude::*;

// One per (proposal, voter); written once
#[account]
#[derive(InitSpace)]
pub struct VoteReceipt {
    pub proposal: Pubkey,
    pub voter: Pubkey,
    pub has_voted: bool,
    pub support: bool,
    pub power: u64,
    pub cast_at: i64,
    pub bump: u8,
}
