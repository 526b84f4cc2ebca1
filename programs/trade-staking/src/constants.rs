use anchor_lang::prelude::*;

#[constant]
pub const SEED: &str = "trade-staking";

// PDA seeds
pub const CONFIG: &[u8] = b"config";
pub const POOL: &[u8] = b"pool";
pub const GOVERNANCE: &[u8] = b"governance";
pub const VAULT_AUTHORITY: &[u8] = b"vault_authority";
pub const SUPPORTED_TOKEN: &[u8] = b"token";
pub const STAKER: &[u8] = b"staker";
pub const STAKE_RECORD: &[u8] = b"stake";
pub const PROPOSAL: &[u8] = b"proposal";
pub const VOTE_RECEIPT: &[u8] = b"receipt";

pub const ANCHOR_DISCRIMINATOR: usize = 8;

// Fixed-point scales
pub const USD_DECIMALS: u8 = 18;
pub const USD_SCALE: u128 = 1_000_000_000_000_000_000;
pub const VOTING_POWER_UNIT: u64 = 1_000_000;

// Reward curve, rates in basis points
pub const RATE_BASE: u128 = 10_000;
pub const SECONDS_PER_YEAR: u128 = 365 * 24 * 60 * 60;
pub const MIN_REWARD_RATE: u64 = 100;
pub const MAX_INITIAL_REWARD_RATE: u64 = 5_000;
pub const MAX_RATE_REDUCTION_STEP: u64 = 1_000;
// Whole USD units of total stake per rate reduction step
pub const RATE_DECAY_INTERVAL: u128 = 1_000;

// Voting power snapshots are not refreshed past this registry size
pub const MAX_NORMALIZED_STAKERS: u64 = 10_000;

// Supported token precision
pub const MIN_TOKEN_DECIMALS: u8 = 6;
pub const MAX_TOKEN_DECIMALS: u8 = 18;

// Durations (seconds)
pub const HOUR: i64 = 60 * 60;
pub const DAY: i64 = 24 * HOUR;
pub const MAX_LOCK_DURATION: i64 = 365 * DAY;
pub const MIN_NORMAL_LOCK_DURATION: i64 = DAY;
pub const MIN_FINANCIER_LOCK_DURATION: i64 = HOUR;
pub const MIN_VOTING_DURATION: i64 = DAY;
pub const MAX_VOTING_DURATION: i64 = 30 * DAY;
pub const MAX_VOTING_WINDOW: i64 = 365 * DAY;
pub const MIN_REVOCATION_PERIOD: i64 = DAY;
pub const MAX_REVOCATION_PERIOD: i64 = 365 * DAY;

// Initializer defaults, derived from the normal minimum stake and lock
pub const FINANCIER_MINIMUM_MULTIPLIER: u128 = 10;
pub const FINANCIER_LOCK_MULTIPLIER: i64 = 2;
pub const PROPOSAL_THRESHOLD_MULTIPLIER: u128 = 5;
pub const DEFAULT_APPROVAL_THRESHOLD: u8 = 51;
pub const DEFAULT_VOTING_DURATION: i64 = 7 * DAY;
pub const DEFAULT_REVOCATION_PERIOD: i64 = 30 * DAY;
pub const DEFAULT_EARLY_RESOLUTION_QUORUM: u64 = VOTING_POWER_UNIT / 2;

pub const MAX_PERCENTAGE: u8 = 100;

// Proposal text bounds (bytes)
pub const MAX_TITLE_LENGTH: usize = 100;
pub const MAX_DESCRIPTION_LENGTH: usize = 500;
