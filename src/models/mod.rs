pub mod auth;
pub mod comercio;
pub mod common;
pub mod discount;
pub mod member;
pub mod pagination;
pub mod participation;
pub mod raffle;

pub use auth::*;
pub use comercio::*;
pub use common::*;
pub use discount::*;
pub use member::*;
pub use pagination::*;
pub use participation::*;
pub use raffle::*;
