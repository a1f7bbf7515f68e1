use crate::error::NotifyError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use notify_api_structs::create_reminder::*;
use notify_domain::{is_valid_date, is_valid_time, to_utc, Channel, Reminder};
use notify_infra::NotifyContext;

pub async fn create_reminder_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<NotifyContext>,
) -> Result<HttpResponse, NotifyError> {
    let body = body.0;
    let usecase = CreateReminderUseCase {
        title: body.title,
        message: body.message,
        due_date: body.due_date,
        due_time: body.due_time,
        channel: body.channel,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| {
            HttpResponse::Created().json(APIResponse::new(reminder, &ctx.config.timezone))
        })
        .map_err(NotifyError::from)
}

#[derive(Debug)]
pub struct CreateReminderUseCase {
    pub title: String,
    pub message: Option<String>,
    /// Local calendar date the due time was entered with
    pub due_date: String,
    /// Local wall clock time the due time was entered with
    pub due_time: String,
    pub channel: Channel,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    EmptyTitle,
    InvalidDate(String),
    InvalidTime(String),
    InvalidDateTime(String),
    StorageError,
}

impl From<UseCaseError> for NotifyError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::EmptyTitle => Self::BadClientData("Title is required.".into()),
            UseCaseError::InvalidDate(date) => Self::BadClientData(format!(
                "Invalid due date: {}. Expected format: YYYY-M-D",
                date
            )),
            UseCaseError::InvalidTime(time) => Self::BadClientData(format!(
                "Invalid due time: {}. Expected format: HH:MM",
                time
            )),
            UseCaseError::InvalidDateTime(datetime) => Self::BadClientData(format!(
                "The local due time: {} does not exist in the configured time zone",
                datetime
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    async fn execute(&mut self, ctx: &NotifyContext) -> Result<Self::Response, Self::Error> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(UseCaseError::EmptyTitle);
        }

        let date = is_valid_date(&self.due_date)
            .map_err(|_| UseCaseError::InvalidDate(self.due_date.clone()))?;
        let time = is_valid_time(&self.due_time)
            .map_err(|_| UseCaseError::InvalidTime(self.due_time.clone()))?;

        // The local due time is converted to UTC exactly once, at
        // creation. Everything downstream compares UTC instants.
        let due_at = to_utc(date, time, &ctx.config.timezone).ok_or_else(|| {
            UseCaseError::InvalidDateTime(format!("{} {}", self.due_date, self.due_time))
        })?;

        let message = self
            .message
            .as_ref()
            .map(|message| message.trim())
            .filter(|message| !message.is_empty())
            .map(|message| message.to_string());

        let reminder = Reminder::new(
            title.to_string(),
            message,
            due_at,
            ctx.sys.get_utc_now(),
            self.channel,
        );

        ctx.repos
            .reminders
            .insert(&reminder)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(reminder)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::prelude::*;
    use notify_domain::Status;
    use notify_infra::setup_inmemory_context;

    fn usecase_factory() -> CreateReminderUseCase {
        CreateReminderUseCase {
            title: "Send weekly report".into(),
            message: Some("Attach the numbers".into()),
            due_date: "2024-3-10".into(),
            due_time: "09:00".into(),
            channel: Channel::InApp,
        }
    }

    #[actix_web::main]
    #[test]
    async fn creates_pending_reminder() {
        let ctx = setup_inmemory_context();

        let mut usecase = usecase_factory();
        let res = usecase.execute(&ctx).await;

        assert!(res.is_ok());
        let reminder = res.unwrap();
        assert_eq!(reminder.status, Status::Pending);
        assert_eq!(reminder.title, "Send weekly report");
        assert_eq!(ctx.repos.reminders.find_pending().await.len(), 1);
    }

    #[actix_web::main]
    #[test]
    async fn converts_local_due_time_to_utc() {
        let mut ctx = setup_inmemory_context();
        ctx.config.timezone = chrono_tz::Europe::Athens;

        let mut usecase = usecase_factory();
        let reminder = usecase.execute(&ctx).await.unwrap();

        assert_eq!(reminder.due_at, Utc.ymd(2024, 3, 10).and_hms(7, 0, 0));
    }

    #[actix_web::main]
    #[test]
    async fn rejects_empty_title_without_touching_the_store() {
        let ctx = setup_inmemory_context();

        let mut usecase = usecase_factory();
        usecase.title = "   ".into();
        let res = usecase.execute(&ctx).await;

        assert!(res.is_err());
        assert_eq!(res.unwrap_err(), UseCaseError::EmptyTitle);
        assert!(ctx.repos.reminders.find_all().await.is_empty());
    }

    #[actix_web::main]
    #[test]
    async fn rejects_malformed_dates_and_times() {
        let ctx = setup_inmemory_context();

        let mut usecase = usecase_factory();
        usecase.due_date = "2024-2-30".into();
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::InvalidDate("2024-2-30".into())
        );

        let mut usecase = usecase_factory();
        usecase.due_time = "25:00".into();
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::InvalidTime("25:00".into())
        );

        assert!(ctx.repos.reminders.find_all().await.is_empty());
    }

    #[actix_web::main]
    #[test]
    async fn rejects_local_times_skipped_by_dst() {
        let mut ctx = setup_inmemory_context();
        ctx.config.timezone = chrono_tz::Europe::Athens;

        // Clocks in Athens jump from 03:00 to 04:00 on 2024-03-31
        let mut usecase = usecase_factory();
        usecase.due_date = "2024-3-31".into();
        usecase.due_time = "03:30".into();

        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::InvalidDateTime("2024-3-31 03:30".into())
        );
    }

    #[actix_web::main]
    #[test]
    async fn stores_blank_message_as_absent() {
        let ctx = setup_inmemory_context();

        let mut usecase = usecase_factory();
        usecase.message = Some("   ".into());
        let reminder = usecase.execute(&ctx).await.unwrap();

        assert_eq!(reminder.message, None);
    }
}
