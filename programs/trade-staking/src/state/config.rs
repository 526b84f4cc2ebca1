use anchor_lang::prelude::*;

use crate::{constants::*, errors::StakingError};

// Protocol tunables, written only through the admin key
#[account]
#[derive(InitSpace)]
pub struct Config {
    pub admin: Pubkey,

    // USD-equivalent thresholds, 18 decimals
    pub minimum_stake: u128,
    pub financier_minimum_stake: u128,
    pub proposal_threshold: u128,

    // Reward curve, basis points
    pub initial_reward_rate: u64,
    pub rate_reduction_step: u64,

    // Durations in seconds
    pub normal_lock_duration: i64,
    pub financier_lock_duration: i64,
    pub voting_duration: i64,
    pub revocation_period: i64,

    // Percentages
    pub approval_threshold: u8,
    pub emergency_penalty: u8,

    // Cast power (out of VOTING_POWER_UNIT) needed before a vote may
    // resolve a proposal ahead of its deadline
    pub early_resolution_quorum: u64,

    pub bump: u8,
}

// One administrative setter per variant
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigUpdate {
    MinimumStake(u128),
    FinancierMinimumStake(u128),
    ProposalThreshold(u128),
    VotingDuration(i64),
    ApprovalThreshold(u8),
    FinancierLockDuration(i64),
    NormalLockDuration(i64),
    InitialRewardRate(u64),
    RateReductionStep(u64),
    EmergencyPenalty(u8),
    RevocationPeriod(i64),
    EarlyResolutionQuorum(u64),
    Admin(Pubkey),
}

impl ConfigUpdate {
    pub fn affects_reward_rate(&self) -> bool {
        matches!(
            self,
            ConfigUpdate::InitialRewardRate(_) | ConfigUpdate::RateReductionStep(_)
        )
    }
}

impl Config {
    // Seeds every tunable from the normal minimum stake and lock duration
    pub fn with_defaults(
        admin: Pubkey,
        minimum_stake: u128,
        normal_lock_duration: i64,
        initial_reward_rate: u64,
        rate_reduction_step: u64,
        emergency_penalty: u8,
        bump: u8,
    ) -> Result<Self> {
        let config = Config {
            admin,
            minimum_stake,
            financier_minimum_stake: minimum_stake
                .checked_mul(FINANCIER_MINIMUM_MULTIPLIER)
                .ok_or(StakingError::MathOverflow)?,
            proposal_threshold: minimum_stake
                .checked_mul(PROPOSAL_THRESHOLD_MULTIPLIER)
                .ok_or(StakingError::MathOverflow)?,
            initial_reward_rate,
            rate_reduction_step,
            normal_lock_duration,
            financier_lock_duration: normal_lock_duration
                .checked_mul(FINANCIER_LOCK_MULTIPLIER)
                .ok_or(StakingError::MathOverflow)?
                .min(MAX_LOCK_DURATION),
            voting_duration: DEFAULT_VOTING_DURATION,
            revocation_period: DEFAULT_REVOCATION_PERIOD,
            approval_threshold: DEFAULT_APPROVAL_THRESHOLD,
            emergency_penalty,
            early_resolution_quorum: DEFAULT_EARLY_RESOLUTION_QUORUM,
            bump,
        };
        config.validate()?;
        Ok(config)
    }

    // Range checks first, then the cross-parameter invariants
    pub fn validate(&self) -> Result<()> {
        require!(self.minimum_stake > 0, StakingError::InvalidConfigValue);
        require!(
            (MIN_VOTING_DURATION..=MAX_VOTING_DURATION).contains(&self.voting_duration),
            StakingError::InvalidConfigValue
        );
        require!(
            (1..=MAX_PERCENTAGE).contains(&self.approval_threshold),
            StakingError::InvalidConfigValue
        );
        require!(
            (MIN_FINANCIER_LOCK_DURATION..=MAX_LOCK_DURATION)
                .contains(&self.financier_lock_duration),
            StakingError::InvalidConfigValue
        );
        require!(
            (MIN_NORMAL_LOCK_DURATION..=MAX_LOCK_DURATION).contains(&self.normal_lock_duration),
            StakingError::InvalidConfigValue
        );
        require!(
            (MIN_REWARD_RATE..=MAX_INITIAL_REWARD_RATE).contains(&self.initial_reward_rate),
            StakingError::InvalidConfigValue
        );
        require!(
            self.rate_reduction_step <= MAX_RATE_REDUCTION_STEP,
            StakingError::InvalidConfigValue
        );
        require!(
            self.emergency_penalty <= MAX_PERCENTAGE,
            StakingError::InvalidConfigValue
        );
        require!(
            (MIN_REVOCATION_PERIOD..=MAX_REVOCATION_PERIOD).contains(&self.revocation_period),
            StakingError::InvalidConfigValue
        );
        require!(
            self.early_resolution_quorum <= VOTING_POWER_UNIT,
            StakingError::InvalidConfigValue
        );

        require!(
            self.financier_minimum_stake >= self.minimum_stake,
            StakingError::ConfigInvariantViolated
        );
        require!(
            self.proposal_threshold >= self.minimum_stake,
            StakingError::ConfigInvariantViolated
        );

        Ok(())
    }

    // Applies a setter on a copy and only commits it if the result validates
    pub fn apply(&mut self, update: ConfigUpdate) -> Result<()> {
        let mut candidate = self.clone();

        match update {
            ConfigUpdate::MinimumStake(value) => candidate.minimum_stake = value,
            ConfigUpdate::FinancierMinimumStake(value) => {
                candidate.financier_minimum_stake = value
            }
            ConfigUpdate::ProposalThreshold(value) => candidate.proposal_threshold = value,
            ConfigUpdate::VotingDuration(value) => candidate.voting_duration = value,
            ConfigUpdate::ApprovalThreshold(value) => candidate.approval_threshold = value,
            ConfigUpdate::FinancierLockDuration(value) => {
                candidate.financier_lock_duration = value
            }
            ConfigUpdate::NormalLockDuration(value) => candidate.normal_lock_duration = value,
            ConfigUpdate::InitialRewardRate(value) => candidate.initial_reward_rate = value,
            ConfigUpdate::RateReductionStep(value) => candidate.rate_reduction_step = value,
            ConfigUpdate::EmergencyPenalty(value) => candidate.emergency_penalty = value,
            ConfigUpdate::RevocationPeriod(value) => candidate.revocation_period = value,
            ConfigUpdate::EarlyResolutionQuorum(value) => {
                candidate.early_resolution_quorum = value
            }
            ConfigUpdate::Admin(value) => {
                require!(value != Pubkey::default(), StakingError::InvalidConfigValue);
                candidate.admin = value
            }
        }

        candidate.validate()?;
        *self = candidate;
        Ok(())
    }

    pub fn minimum_stake_for(&self, holds_financier: bool) -> u128 {
        if holds_financier {
            self.financier_minimum_stake
        } else {
            self.minimum_stake
        }
    }

    pub fn lock_duration_for(&self, holds_financier: bool) -> i64 {
        if holds_financier {
            self.financier_lock_duration
        } else {
            self.normal_lock_duration
        }
    }

    // Capped so a misconfigured duration can never overflow the deadline
    pub fn voting_window(&self) -> i64 {
        self.voting_duration.min(MAX_VOTING_WINDOW)
    }
}
