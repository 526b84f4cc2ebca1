pub mod apply_as_financier;
pub mod claim_rewards;
pub mod create_proposal;
pub mod deposit;
pub mod emergency_exit;
pub mod execute_proposal;
pub mod finalize_vote;
pub mod fund_rewards;
pub mod initialize;
pub mod refresh_voting_power;
pub mod revocation;
pub mod supported_tokens;
pub mod update_config;
pub mod views;
pub mod vote_on_proposal;
pub mod withdraw;

pub use apply_as_financier::*;
pub use claim_rewards::*;
pub use create_proposal::*;
pub use deposit::*;
pub use emergency_exit::*;
pub use execute_proposal::*;
pub use finalize_vote::*;
pub use fund_rewards::*;
pub use initialize::*;
pub use refresh_voting_power::*;
pub use revocation::*;
pub use supported_tokens::*;
pub use update_config::*;
pub use views::*;
pub use vote_on_proposal::*;
pub use withdraw::*;
