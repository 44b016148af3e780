mod datetime;
mod destination;
mod dispatch;
mod local_time;
mod medication;
mod reminder;
mod shared;

pub use datetime::{is_valid_date, is_valid_time};
pub use destination::Destination;
pub use dispatch::{DispatchOutcome, DispatchReport, DispatchResult, PushMessage, PushMessageData};
pub use local_time::{add_minutes_to_time, resolve_timezone, LocalStamp};
pub use medication::Medication;
pub use reminder::{group_reminders_by_user, Reminder, SNOOZE_DELAY_MINUTES};
pub use shared::entity::{Entity, ID};
