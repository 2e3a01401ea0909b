pub mod auth_service;
pub mod comercio_service;
pub mod dashboard_service;
pub mod discount_service;
pub mod member_service;
pub mod participation_service;
pub mod raffle_service;

pub use auth_service::*;
pub use comercio_service::*;
pub use dashboard_service::*;
pub use discount_service::*;
pub use member_service::*;
pub use participation_service::*;
pub use raffle_service::*;
