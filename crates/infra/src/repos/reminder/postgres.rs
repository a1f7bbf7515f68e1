use super::IReminderRepo;

use notify_domain::{Reminder, ID};
use sqlx::{
    types::{
        chrono::{DateTime, Utc},
        Uuid,
    },
    FromRow, PgPool,
};
use tracing::error;

pub struct PostgresReminderRepo {
    pool: PgPool,
}

impl PostgresReminderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderRaw {
    reminder_uid: Uuid,
    title: String,
    message: Option<String>,
    due_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
    channel: String,
    status: String,
}

impl From<ReminderRaw> for Reminder {
    fn from(e: ReminderRaw) -> Self {
        Self {
            id: e.reminder_uid.into(),
            title: e.title,
            message: e.message,
            due_at: e.due_at,
            created_at: e.created_at,
            channel: e.channel.parse().unwrap(),
            status: e.status.parse().unwrap(),
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for PostgresReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reminders
            (reminder_uid, title, message, due_at, created_at, channel, status)
            VALUES($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(*reminder.id.inner_ref())
        .bind(reminder.title.as_str())
        .bind(reminder.message.as_deref())
        .bind(reminder.due_at)
        .bind(reminder.created_at)
        .bind(reminder.channel.to_string())
        .bind(reminder.status.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert reminder: {:?}. DB returned error: {:?}",
                reminder, e
            );
            e
        })?;
        Ok(())
    }

    async fn find(&self, reminder_id: &ID) -> Option<Reminder> {
        let res: Option<ReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminders
            WHERE reminder_uid = $1
            "#,
        )
        .bind(*reminder_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find reminder with id: {:?} failed. DB returned error: {:?}",
                reminder_id, e
            );
            e
        })
        .ok()?;
        res.map(|reminder| reminder.into())
    }

    async fn find_pending(&self) -> Vec<Reminder> {
        let reminders: Vec<ReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminders
            WHERE status = 'pending'
            ORDER BY due_at ASC, reminder_uid ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .unwrap_or(vec![]);
        reminders.into_iter().map(|reminder| reminder.into()).collect()
    }

    async fn find_all(&self) -> Vec<Reminder> {
        let reminders: Vec<ReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminders
            ORDER BY due_at ASC, reminder_uid ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .unwrap_or(vec![]);
        reminders.into_iter().map(|reminder| reminder.into()).collect()
    }

    async fn mark_sent(&self, reminder_id: &ID) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE reminders
            SET status = 'sent'
            WHERE reminder_uid = $1
            "#,
        )
        .bind(*reminder_id.inner_ref())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to mark reminder with id: {:?} as sent. DB returned error: {:?}",
                reminder_id, e
            );
            e
        })?;
        Ok(())
    }
}
