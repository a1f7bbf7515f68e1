mod inmemory;
mod postgres;

pub use inmemory::InMemoryReminderRepo;
pub use postgres::PostgresReminderRepo;

use notify_domain::{Reminder, ID};

#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()>;
    async fn find(&self, reminder_id: &ID) -> Option<Reminder>;
    /// All `pending` reminders ordered by due instant ascending, ties
    /// broken by id ascending. Processing order of simultaneously due
    /// reminders depends on this ordering.
    async fn find_pending(&self) -> Vec<Reminder>;
    /// All reminders, same ordering as `find_pending`
    async fn find_all(&self) -> Vec<Reminder>;
    /// Idempotent transition to `sent`, marking an already sent
    /// reminder is a no-op
    async fn mark_sent(&self, reminder_id: &ID) -> anyhow::Result<()>;
}
