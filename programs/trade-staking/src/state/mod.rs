pub mod config;
pub mod governance;
pub mod pool;
pub mod proposal;
pub mod stake_record;
pub mod staker;
pub mod supported_token;
pub mod vote;

pub use config::*;
pub use governance::*;
pub use pool::*;
pub use proposal::*;
pub use stake_record::*;
pub use staker::*;
pub use supported_token::*;
pub use vote::*;
