use anchor_lang::prelude::*;

#[error_code]
pub enum StakingError {
    // Validation errors
    #[msg("Token is not supported for staking")]
    UnsupportedToken,

    #[msg("Token is already supported")]
    TokenAlreadySupported,

    #[msg("Token decimal precision must be between 6 and 18")]
    InvalidTokenDecimals,

    #[msg("Amount must be greater than zero")]
    ZeroAmount,

    #[msg("Stake value is below the applicable minimum")]
    BelowMinimumStake,

    #[msg("Requested lock deadline is too far in the future")]
    LockDeadlineTooFar,

    #[msg("Withdrawal amount exceeds the staked balance")]
    AmountExceedsStake,

    #[msg("Proposal title must be between 1 and 100 bytes")]
    InvalidTitle,

    #[msg("Proposal description must be at most 500 bytes")]
    DescriptionTooLong,

    #[msg("A proposal with this identifier already exists")]
    DuplicateProposalId,

    #[msg("Configuration value is out of range")]
    InvalidConfigValue,

    #[msg("Configuration value violates a dependent threshold")]
    ConfigInvariantViolated,

    // Authorization errors
    #[msg("Only the admin can perform this action")]
    UnauthorizedAdmin,

    #[msg("Signer does not own this stake record")]
    NotRecordOwner,

    #[msg("Account is not an active financier")]
    NotFinancier,

    #[msg("Stake is below the proposal threshold")]
    BelowProposalThreshold,

    // State errors
    #[msg("Stake record is missing or inactive")]
    StakeNotActive,

    #[msg("Account has no active stake")]
    NoActiveStake,

    #[msg("Stake is still locked")]
    LockNotExpired,

    #[msg("Financiers must complete revocation before withdrawing")]
    FinancierMustRevoke,

    #[msg("Account is already a financier")]
    AlreadyFinancier,

    #[msg("Aggregate stake is below the financier minimum")]
    BelowFinancierMinimum,

    #[msg("Revocation has already been requested")]
    RevocationAlreadyRequested,

    #[msg("Revocation has not been requested")]
    RevocationNotRequested,

    #[msg("Revocation period has not elapsed")]
    RevocationPeriodActive,

    #[msg("No rewards available to claim")]
    NoRewardsToClaim,

    #[msg("Proposal is not active")]
    ProposalNotActive,

    #[msg("Voting period has ended")]
    VotingClosed,

    #[msg("Voting period has not ended yet")]
    VotingStillActive,

    #[msg("Account has already voted on this proposal")]
    AlreadyVoted,

    #[msg("Account has no voting power")]
    NoVotingPower,

    #[msg("Proposal has not passed")]
    ProposalNotPassed,

    #[msg("Proposal has already been executed")]
    ProposalAlreadyExecuted,

    #[msg("Re-entrant call rejected")]
    ReentrantCall,

    #[msg("Account list does not match the staker")]
    InvalidRemainingAccounts,

    // Arithmetic errors
    #[msg("Math overflow occurred")]
    MathOverflow,

    // Collaborator errors
    #[msg("Insufficient token balance")]
    InsufficientBalance,

    #[msg("Insufficient vault balance")]
    InsufficientVaultBalance,

    #[msg("Insufficient reward reserve")]
    InsufficientRewardReserve,

    #[msg("Invalid vault account")]
    InvalidVault,
}
