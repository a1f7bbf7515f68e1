use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use notify_domain::{format_local, Channel, Reminder, Status, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDTO {
    pub id: ID,
    pub title: String,
    pub message: Option<String>,
    pub due_at: DateTime<Utc>,
    /// Due instant rendered in the configured display time zone
    pub due_local: String,
    pub created_at: DateTime<Utc>,
    pub created_local: String,
    pub channel: Channel,
    pub status: Status,
}

impl ReminderDTO {
    pub fn new(reminder: Reminder, timezone: &Tz) -> Self {
        Self {
            id: reminder.id.clone(),
            title: reminder.title,
            message: reminder.message,
            due_at: reminder.due_at,
            due_local: format_local(&reminder.due_at, timezone),
            created_at: reminder.created_at,
            created_local: format_local(&reminder.created_at, timezone),
            channel: reminder.channel,
            status: reminder.status,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryFailureDTO {
    pub reminder_id: ID,
    pub error: String,
}

impl DeliveryFailureDTO {
    pub fn new(reminder_id: ID, error: String) -> Self {
        Self { reminder_id, error }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReminderStatsDTO {
    pub total: usize,
    pub pending: usize,
    pub sent: usize,
    pub email: usize,
    pub in_app: usize,
}
