pub mod jwt;
pub mod participation_date;
pub mod password;
pub mod phone;
pub mod privacy;
pub mod secret_code;
pub mod ticket;

pub use jwt::*;
pub use participation_date::{is_participation_allowed, today_in_uruguay};
pub use password::*;
pub use phone::{normalize_phone, validate_phone};
pub use privacy::{initials, mask_phone};
pub use secret_code::generate_unique_secret_code;
pub use ticket::{talon_filename, TicketNumber};
