pub mod auth;
pub mod comercio;
pub mod dashboard;
pub mod discount;
pub mod member;
pub mod participation;
pub mod raffle;

pub use auth::auth_config;
pub use comercio::{comercio_admin_config, comercio_public_config};
pub use dashboard::dashboard_admin_config;
pub use discount::discount_admin_config;
pub use member::member_admin_config;
pub use participation::participation_config;
pub use raffle::{raffle_admin_config, raffle_public_config};
