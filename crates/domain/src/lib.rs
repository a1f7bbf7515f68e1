mod date;
mod reminder;
mod shared;

pub use date::{format_local, is_valid_date, is_valid_time, to_utc};
pub use reminder::{Channel, Reminder, Status};
pub use shared::entity::{Entity, ID};
