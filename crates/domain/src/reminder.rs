use crate::shared::entity::{Entity, ID};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// A `Reminder` is a one-shot notification scheduled by a user.
/// The due instant is stored in UTC and compared in UTC, the local
/// wall-clock time it was entered with only exists at the edges.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: ID,
    /// Short headline, never empty
    pub title: String,
    pub message: Option<String>,
    /// The UTC instant at or after which this `Reminder` is eligible
    /// for delivery
    pub due_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    /// How this `Reminder` should be delivered, fixed at creation
    pub channel: Channel,
    pub status: Status,
}

impl Reminder {
    pub fn new(
        title: String,
        message: Option<String>,
        due_at: DateTime<Utc>,
        created_at: DateTime<Utc>,
        channel: Channel,
    ) -> Self {
        Self {
            id: Default::default(),
            title,
            message,
            due_at,
            created_at,
            channel,
            status: Status::Pending,
        }
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.due_at <= now
    }

    /// `Status` is monotonic: `Pending -> Sent` is the only transition
    /// and applying it twice is the same as applying it once
    pub fn mark_sent(&mut self) {
        self.status = Status::Sent;
    }
}

impl Entity for Reminder {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Channel {
    #[serde(rename = "in-app")]
    InApp,
    #[serde(rename = "email")]
    Email,
}

impl Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let repr = match self {
            Self::InApp => "in-app",
            Self::Email => "email",
        };
        write!(f, "{}", repr)
    }
}

#[derive(Error, Debug)]
pub enum InvalidChannelError {
    #[error("Channel: {0} is not a valid delivery channel")]
    Malformed(String),
}

impl FromStr for Channel {
    type Err = InvalidChannelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in-app" => Ok(Self::InApp),
            "email" => Ok(Self::Email),
            _ => Err(InvalidChannelError::Malformed(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pending,
    Sent,
}

impl Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let repr = match self {
            Self::Pending => "pending",
            Self::Sent => "sent",
        };
        write!(f, "{}", repr)
    }
}

#[derive(Error, Debug)]
pub enum InvalidStatusError {
    #[error("Status: {0} is not a valid reminder status")]
    Malformed(String),
}

impl FromStr for Status {
    type Err = InvalidStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "sent" => Ok(Self::Sent),
            _ => Err(InvalidStatusError::Malformed(s.to_string())),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn reminder_factory(due_at: DateTime<Utc>) -> Reminder {
        Reminder::new(
            "Send weekly report".into(),
            None,
            due_at,
            Utc.ymd(2024, 1, 1).and_hms(12, 0, 0),
            Channel::InApp,
        )
    }

    #[test]
    fn new_reminder_is_pending() {
        let r = reminder_factory(Utc.ymd(2024, 3, 10).and_hms(7, 0, 0));
        assert_eq!(r.status, Status::Pending);
    }

    #[test]
    fn due_at_boundary_counts_as_due() {
        let now = Utc.ymd(2024, 3, 10).and_hms(7, 0, 0);
        let r = reminder_factory(now);
        assert!(r.is_due(now));
        assert!(r.is_due(now + Duration::seconds(1)));
        assert!(!r.is_due(now - Duration::seconds(1)));
    }

    #[test]
    fn mark_sent_is_idempotent() {
        let mut r = reminder_factory(Utc.ymd(2024, 3, 10).and_hms(7, 0, 0));
        r.mark_sent();
        assert_eq!(r.status, Status::Sent);
        r.mark_sent();
        assert_eq!(r.status, Status::Sent);
    }

    #[test]
    fn channel_and_status_parse_their_display_repr() {
        for channel in [Channel::InApp, Channel::Email].iter() {
            assert_eq!(channel.to_string().parse::<Channel>().unwrap(), *channel);
        }
        for status in [Status::Pending, Status::Sent].iter() {
            assert_eq!(status.to_string().parse::<Status>().unwrap(), *status);
        }
        assert!("sms".parse::<Channel>().is_err());
        assert!("done".parse::<Status>().is_err());
    }
}
