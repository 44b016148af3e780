mod document;
mod inmemory;

pub use document::DocumentReminderRepo;
pub use inmemory::InMemoryReminderRepo;
use medly_domain::{Reminder, ID};

#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()>;
    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()>;
    async fn find(&self, reminder_id: &ID) -> Option<Reminder>;
    /// Every reminder matching the dispatch eligibility predicate:
    /// `(!taken && !notification_sent) || (repeat_schedule && total_reminders_left > 0)`
    async fn find_eligible(&self) -> anyhow::Result<Vec<Reminder>>;
    /// A user's reminders with `from <= date <= to`, for adherence reporting
    async fn find_by_user_in_range(
        &self,
        user_id: &ID,
        from: &str,
        to: &str,
    ) -> anyhow::Result<Vec<Reminder>>;
    /// Partial update flipping only the de-duplication guard. Best-effort:
    /// there is no conditional write, so overlapping runs can still race.
    async fn mark_notified(&self, reminder_id: &ID) -> anyhow::Result<()>;
}
