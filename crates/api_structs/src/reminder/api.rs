use crate::dtos::{DeliveryFailureDTO, ReminderDTO, ReminderStatsDTO};
use chrono_tz::Tz;
use notify_domain::{Channel, Reminder};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderResponse {
    pub reminder: ReminderDTO,
}

impl ReminderResponse {
    pub fn new(reminder: Reminder, timezone: &Tz) -> Self {
        Self {
            reminder: ReminderDTO::new(reminder, timezone),
        }
    }
}

pub mod create_reminder {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub title: String,
        pub message: Option<String>,
        /// Local calendar date, `YYYY-M-D`
        pub due_date: String,
        /// Local wall clock time, `HH:MM`
        pub due_time: String,
        pub channel: Channel,
    }

    pub type APIResponse = ReminderResponse;
}

pub mod get_reminders {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        #[serde(default)]
        pub include_sent: bool,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub reminders: Vec<ReminderDTO>,
    }

    impl APIResponse {
        pub fn new(reminders: Vec<Reminder>, timezone: &Tz) -> Self {
            Self {
                reminders: reminders
                    .into_iter()
                    .map(|reminder| ReminderDTO::new(reminder, timezone))
                    .collect(),
            }
        }
    }
}

pub mod get_reminder_stats {
    use super::*;

    pub type APIResponse = ReminderStatsDTO;
}

pub mod send_due_reminders {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub sent_count: usize,
        pub failures: Vec<DeliveryFailureDTO>,
    }
}
