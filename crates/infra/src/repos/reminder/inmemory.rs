use super::IReminderRepo;
use crate::repos::shared::inmemory_repo::*;
use notify_domain::{Reminder, Status, ID};
use std::cmp::Ordering;

pub struct InMemoryReminderRepo {
    reminders: std::sync::Mutex<Vec<Reminder>>,
}

impl InMemoryReminderRepo {
    pub fn new() -> Self {
        Self {
            reminders: std::sync::Mutex::new(Vec::new()),
        }
    }
}

fn sort_by_due(reminders: &mut Vec<Reminder>) {
    reminders.sort_by(|r1, r2| match r1.due_at.cmp(&r2.due_at) {
        Ordering::Equal => r1.id.as_string().cmp(&r2.id.as_string()),
        val => val,
    });
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        insert(reminder, &self.reminders);
        Ok(())
    }

    async fn find(&self, reminder_id: &ID) -> Option<Reminder> {
        find(reminder_id, &self.reminders)
    }

    async fn find_pending(&self) -> Vec<Reminder> {
        let mut reminders = find_by(&self.reminders, |reminder| {
            reminder.status == Status::Pending
        });
        sort_by_due(&mut reminders);
        reminders
    }

    async fn find_all(&self) -> Vec<Reminder> {
        let mut reminders = find_by(&self.reminders, |_| true);
        sort_by_due(&mut reminders);
        reminders
    }

    async fn mark_sent(&self, reminder_id: &ID) -> anyhow::Result<()> {
        if let Some(mut reminder) = find(reminder_id, &self.reminders) {
            reminder.mark_sent();
            save(&reminder, &self.reminders);
        }
        Ok(())
    }
}
