pub mod admin_users;
pub mod comercios;
pub mod discounts;
pub mod members;
pub mod raffle_participants;
pub mod raffle_prizes;
pub mod raffles;
pub mod segments;

pub use admin_users as admin_user_entity;
pub use comercios as comercio_entity;
pub use discounts as discount_entity;
pub use members as member_entity;
pub use raffle_participants as participant_entity;
pub use raffle_prizes as prize_entity;
pub use raffles as raffle_entity;
pub use segments as segment_entity;
