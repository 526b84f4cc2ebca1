use anchor_lang::prelude::*;

use crate::{errors::StakingError, math, state::Config};

// Privilege tier of an account.
//
// Normal: may stake and withdraw after the lock expires.
// Financier: may propose and vote; cannot withdraw or exit directly.
// FinancierPendingRevocation: still holds financier stake but has no
//   voting power; becomes Normal once the revocation period elapses.
#[derive(
    AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace,
)]
pub enum Privilege {
    #[default]
    Normal,
    Financier,
    FinancierPendingRevocation { requested_at: i64 },
}

impl Privilege {
    // Financier stake rules (minimums, locks, no direct exit) still apply
    pub fn holds_financier(&self) -> bool {
        !matches!(self, Privilege::Normal)
    }

    // Governance access predicate
    pub fn can_govern(&self) -> bool {
        matches!(self, Privilege::Financier)
    }

    pub fn counts_for_voting(&self) -> bool {
        !matches!(self, Privilege::FinancierPendingRevocation { .. })
    }

    pub fn revocation_requested_at(&self) -> Option<i64> {
        match self {
            Privilege::FinancierPendingRevocation { requested_at } => Some(*requested_at),
            _ => None,
        }
    }
}

// Per-account aggregate across every token the account stakes
#[account]
#[derive(InitSpace)]
pub struct StakerProfile {
    pub owner: Pubkey,
    pub registry_index: u64,
    pub total_usd_equivalent: u128,
    pub active_records: u8,
    pub privilege: Privilege,
    // Lock floor applied to every record while financier status was granted
    pub financier_lock_until: i64,
    // Last refreshed normalized share
    pub voting_power: u64,
    pub registered_at: i64,
    pub bump: u8,
}

impl StakerProfile {
    pub fn is_registered(&self) -> bool {
        self.owner != Pubkey::default()
    }

    pub fn add_stake(&mut self, usd: u128) -> Result<()> {
        self.total_usd_equivalent = self
            .total_usd_equivalent
            .checked_add(usd)
            .ok_or(StakingError::MathOverflow)?;
        Ok(())
    }

    pub fn remove_stake(&mut self, usd: u128) -> Result<()> {
        self.total_usd_equivalent = self
            .total_usd_equivalent
            .checked_sub(usd)
            .ok_or(StakingError::MathOverflow)?;
        Ok(())
    }

    // Returns true when this is the account's first active record
    pub fn record_activated(&mut self) -> Result<bool> {
        self.active_records = self
            .active_records
            .checked_add(1)
            .ok_or(StakingError::MathOverflow)?;
        Ok(self.active_records == 1)
    }

    // Returns true when the account no longer holds any active record
    pub fn record_deactivated(&mut self) -> Result<bool> {
        self.active_records = self
            .active_records
            .checked_sub(1)
            .ok_or(StakingError::MathOverflow)?;
        Ok(self.active_records == 0)
    }

    // Live normalized share; zero while revocation is pending
    pub fn live_voting_power(&self, total_staked: u128) -> u64 {
        if self.active_records == 0 || !self.privilege.counts_for_voting() {
            return 0;
        }
        math::voting_share(self.total_usd_equivalent, total_staked)
    }

    pub fn refresh_voting_power(&mut self, total_staked: u128) {
        self.voting_power = self.live_voting_power(total_staked);
    }

    pub fn effective_lock_deadline(&self, record_deadline: i64) -> i64 {
        record_deadline.max(self.financier_lock_until)
    }

    pub fn qualifies_for_financier(&self, config: &Config) -> bool {
        self.active_records > 0 && self.total_usd_equivalent >= config.financier_minimum_stake
    }

    // True when the total just moved from below the financier minimum to at or above it
    pub fn crossed_financier_minimum(&self, previous_usd: u128, config: &Config) -> bool {
        previous_usd < config.financier_minimum_stake && self.qualifies_for_financier(config)
    }

    // Grants Financier and raises the account-wide lock floor.
    // Returns the new floor.
    pub fn grant_financier(&mut self, now: i64, config: &Config) -> Result<i64> {
        require!(
            !self.privilege.holds_financier(),
            StakingError::AlreadyFinancier
        );

        let floor = now
            .checked_add(config.financier_lock_duration)
            .ok_or(StakingError::MathOverflow)?;

        self.privilege = Privilege::Financier;
        self.financier_lock_until = self.financier_lock_until.max(floor);
        Ok(self.financier_lock_until)
    }

    pub fn apply_as_financier(&mut self, now: i64, config: &Config) -> Result<i64> {
        require!(self.active_records > 0, StakingError::NoActiveStake);
        require!(
            !self.privilege.holds_financier(),
            StakingError::AlreadyFinancier
        );
        require!(
            self.total_usd_equivalent >= config.financier_minimum_stake,
            StakingError::BelowFinancierMinimum
        );

        self.grant_financier(now, config)
    }

    pub fn request_revocation(&mut self, now: i64) -> Result<()> {
        match self.privilege {
            Privilege::Financier => {
                self.privilege = Privilege::FinancierPendingRevocation { requested_at: now };
                Ok(())
            }
            Privilege::FinancierPendingRevocation { .. } => {
                err!(StakingError::RevocationAlreadyRequested)
            }
            Privilege::Normal => err!(StakingError::NotFinancier),
        }
    }

    pub fn cancel_revocation(&mut self) -> Result<()> {
        match self.privilege {
            Privilege::FinancierPendingRevocation { .. } => {
                self.privilege = Privilege::Financier;
                Ok(())
            }
            _ => err!(StakingError::RevocationNotRequested),
        }
    }

    pub fn execute_revocation(&mut self, now: i64, revocation_period: i64) -> Result<()> {
        let requested_at = self
            .privilege
            .revocation_requested_at()
            .ok_or(StakingError::RevocationNotRequested)?;

        let earliest = requested_at
            .checked_add(revocation_period)
            .ok_or(StakingError::MathOverflow)?;
        require!(now >= earliest, StakingError::RevocationPeriodActive);

        self.privilege = Privilege::Normal;
        Ok(())
    }
}
