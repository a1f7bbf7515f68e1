use crate::error::NotifyError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use notify_api_structs::dtos::DeliveryFailureDTO;
use notify_api_structs::send_due_reminders::*;
use notify_domain::{Channel, Reminder, ID};
use notify_infra::NotifyContext;
use tracing::{info, warn};

pub async fn send_due_reminders_controller(
    ctx: web::Data<NotifyContext>,
) -> Result<HttpResponse, NotifyError> {
    let usecase = SendDueRemindersUseCase {};

    execute(usecase, &ctx)
        .await
        .map(|report| {
            HttpResponse::Ok().json(APIResponse {
                sent_count: report.sent_count,
                failures: report
                    .failures
                    .into_iter()
                    .map(|failure| DeliveryFailureDTO::new(failure.reminder_id, failure.error))
                    .collect(),
            })
        })
        .map_err(|_| NotifyError::InternalError)
}

/// Processes every `pending` reminder that is due at the time of the
/// call: delivers it through its channel and marks it as sent on
/// success. Failures are collected per reminder, one failing delivery
/// never aborts the rest of the batch.
#[derive(Debug)]
pub struct SendDueRemindersUseCase {}

#[derive(Debug)]
pub enum UseCaseErrors {}

#[derive(Debug)]
pub struct DeliveryFailure {
    pub reminder_id: ID,
    pub error: String,
}

#[derive(Debug)]
pub struct BatchReport {
    pub sent_count: usize,
    pub failures: Vec<DeliveryFailure>,
}

async fn deliver_email(reminder: &Reminder, ctx: &NotifyContext) -> anyhow::Result<()> {
    let recipient = match &ctx.config.smtp {
        Some(smtp) => smtp.to.clone(),
        None => return Err(anyhow::Error::msg("SMTP transport is not configured")),
    };
    let subject = format!("[Notify] {}", reminder.title);
    let body = reminder
        .message
        .clone()
        .unwrap_or_else(|| "(no message)".into());
    ctx.mail.send(&subject, &body, &recipient).await
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendDueRemindersUseCase {
    type Response = BatchReport;

    type Error = UseCaseErrors;

    async fn execute(&mut self, ctx: &NotifyContext) -> Result<Self::Response, Self::Error> {
        // One snapshot per batch. Reminders inserted while the batch is
        // running are picked up by the next one.
        let now = ctx.sys.get_utc_now();
        let pending = ctx.repos.reminders.find_pending().await;

        let mut report = BatchReport {
            sent_count: 0,
            failures: Vec::new(),
        };

        for reminder in pending {
            if !reminder.is_due(now) {
                continue;
            }

            match reminder.channel {
                Channel::Email => {
                    if let Err(e) = deliver_email(&reminder, ctx).await {
                        warn!(
                            "Email delivery failed for reminder with id: {}: {:?}",
                            reminder.id, e
                        );
                        report.failures.push(DeliveryFailure {
                            reminder_id: reminder.id.clone(),
                            error: e.to_string(),
                        });
                        continue;
                    }
                }
                Channel::InApp => {
                    // A local notification, it cannot fail
                    info!("Reminder: {}", reminder.title);
                }
            }

            if let Err(e) = ctx.repos.reminders.mark_sent(&reminder.id).await {
                warn!(
                    "Unable to mark reminder with id: {} as sent: {:?}",
                    reminder.id, e
                );
                report.failures.push(DeliveryFailure {
                    reminder_id: reminder.id.clone(),
                    error: e.to_string(),
                });
                continue;
            }
            report.sent_count += 1;
        }

        Ok(report)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::prelude::*;
    use chrono::Duration;
    use notify_domain::Status;
    use notify_infra::{
        setup_inmemory_context, ISys, InMemoryMailService, NotifyContext, SmtpConfig,
    };
    use std::sync::Arc;

    pub struct StaticTimeSys {}
    impl ISys for StaticTimeSys {
        fn get_utc_now(&self) -> DateTime<Utc> {
            Utc.ymd(2024, 3, 10).and_hms(7, 0, 0)
        }
    }

    fn smtp_config_factory() -> SmtpConfig {
        SmtpConfig {
            host: "smtp.example.com".into(),
            port: 587,
            username: "notify@example.com".into(),
            password: "hunter2".into(),
            from: "notify@example.com".into(),
            to: "inbox@example.com".into(),
        }
    }

    fn setup() -> NotifyContext {
        let mut ctx = setup_inmemory_context();
        ctx.sys = Arc::new(StaticTimeSys {});
        ctx.config.smtp = Some(smtp_config_factory());
        ctx
    }

    fn reminder_factory(title: &str, due_at: DateTime<Utc>, channel: Channel) -> Reminder {
        Reminder::new(
            title.into(),
            None,
            due_at,
            due_at - Duration::days(1),
            channel,
        )
    }

    async fn insert(ctx: &NotifyContext, reminder: &Reminder) {
        ctx.repos.reminders.insert(reminder).await.unwrap();
    }

    async fn status_of(ctx: &NotifyContext, reminder: &Reminder) -> Status {
        ctx.repos
            .reminders
            .find(&reminder.id)
            .await
            .expect("Reminder to exist")
            .status
    }

    #[actix_web::main]
    #[test]
    async fn sends_due_in_app_reminder_and_skips_future_one() {
        let ctx = setup();
        let now = ctx.sys.get_utc_now();
        let due = reminder_factory("A", now - Duration::hours(1), Channel::InApp);
        let future = reminder_factory("B", now + Duration::hours(1), Channel::InApp);
        insert(&ctx, &due).await;
        insert(&ctx, &future).await;

        let mut usecase = SendDueRemindersUseCase {};
        let report = usecase.execute(&ctx).await.unwrap();

        assert_eq!(report.sent_count, 1);
        assert!(report.failures.is_empty());
        assert_eq!(status_of(&ctx, &due).await, Status::Sent);
        assert_eq!(status_of(&ctx, &future).await, Status::Pending);
    }

    #[actix_web::main]
    #[test]
    async fn reminder_due_exactly_now_is_sent() {
        let ctx = setup();
        let now = ctx.sys.get_utc_now();
        let reminder = reminder_factory("On the dot", now, Channel::InApp);
        insert(&ctx, &reminder).await;

        let mut usecase = SendDueRemindersUseCase {};
        let report = usecase.execute(&ctx).await.unwrap();

        assert_eq!(report.sent_count, 1);
        assert_eq!(status_of(&ctx, &reminder).await, Status::Sent);
    }

    #[actix_web::main]
    #[test]
    async fn sends_due_email_reminder_through_the_mail_transport() {
        let mut ctx = setup();
        let mail = Arc::new(InMemoryMailService::new());
        ctx.mail = mail.clone();
        let now = ctx.sys.get_utc_now();
        let reminder = Reminder::new(
            "Pay rent".into(),
            Some("Wire the deposit".into()),
            now - Duration::minutes(5),
            now - Duration::days(1),
            Channel::Email,
        );
        insert(&ctx, &reminder).await;

        let mut usecase = SendDueRemindersUseCase {};
        let report = usecase.execute(&ctx).await.unwrap();

        assert_eq!(report.sent_count, 1);
        assert!(report.failures.is_empty());
        assert_eq!(status_of(&ctx, &reminder).await, Status::Sent);

        let sent = mail.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].subject, "[Notify] Pay rent");
        assert_eq!(sent[0].body, "Wire the deposit");
        assert_eq!(sent[0].recipient, "inbox@example.com");
    }

    #[actix_web::main]
    #[test]
    async fn email_without_message_falls_back_to_placeholder_body() {
        let mut ctx = setup();
        let mail = Arc::new(InMemoryMailService::new());
        ctx.mail = mail.clone();
        let now = ctx.sys.get_utc_now();
        let reminder = reminder_factory("C", now - Duration::hours(2), Channel::Email);
        insert(&ctx, &reminder).await;

        let mut usecase = SendDueRemindersUseCase {};
        usecase.execute(&ctx).await.unwrap();

        let sent = mail.sent.lock().unwrap();
        assert_eq!(sent[0].body, "(no message)");
    }

    #[actix_web::main]
    #[test]
    async fn failed_email_delivery_leaves_reminder_pending_and_continues() {
        let mut ctx = setup();
        ctx.mail = Arc::new(InMemoryMailService::new_broken());
        let now = ctx.sys.get_utc_now();
        let failing = reminder_factory("C", now - Duration::hours(2), Channel::Email);
        let after = reminder_factory("D", now - Duration::hours(1), Channel::InApp);
        insert(&ctx, &failing).await;
        insert(&ctx, &after).await;

        let mut usecase = SendDueRemindersUseCase {};
        let report = usecase.execute(&ctx).await.unwrap();

        assert_eq!(report.sent_count, 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].reminder_id, failing.id);
        assert_eq!(status_of(&ctx, &failing).await, Status::Pending);
        assert_eq!(status_of(&ctx, &after).await, Status::Sent);
    }

    #[actix_web::main]
    #[test]
    async fn email_without_smtp_configuration_is_reported_not_sent() {
        let mut ctx = setup();
        ctx.config.smtp = None;
        let now = ctx.sys.get_utc_now();
        let reminder = reminder_factory("C", now - Duration::hours(2), Channel::Email);
        insert(&ctx, &reminder).await;

        let mut usecase = SendDueRemindersUseCase {};
        let report = usecase.execute(&ctx).await.unwrap();

        assert_eq!(report.sent_count, 0);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].reminder_id, reminder.id);
        assert_eq!(status_of(&ctx, &reminder).await, Status::Pending);
    }

    #[actix_web::main]
    #[test]
    async fn second_batch_does_not_send_again() {
        let ctx = setup();
        let now = ctx.sys.get_utc_now();
        let reminder = reminder_factory("A", now - Duration::hours(1), Channel::InApp);
        insert(&ctx, &reminder).await;

        let mut usecase = SendDueRemindersUseCase {};
        let report = usecase.execute(&ctx).await.unwrap();
        assert_eq!(report.sent_count, 1);

        let mut usecase = SendDueRemindersUseCase {};
        let report = usecase.execute(&ctx).await.unwrap();
        assert_eq!(report.sent_count, 0);
        assert_eq!(status_of(&ctx, &reminder).await, Status::Sent);
    }

    #[actix_web::main]
    #[test]
    async fn processes_reminders_in_due_order_with_id_tiebreak() {
        let ctx = setup();
        let now = ctx.sys.get_utc_now();
        let later = reminder_factory("Later", now - Duration::minutes(1), Channel::InApp);
        let earlier = reminder_factory("Earlier", now - Duration::hours(1), Channel::InApp);
        insert(&ctx, &later).await;
        insert(&ctx, &earlier).await;
        let tied = (0..5)
            .map(|i| reminder_factory(&format!("Tied {}", i), now, Channel::InApp))
            .collect::<Vec<_>>();
        for reminder in &tied {
            insert(&ctx, reminder).await;
        }

        let snapshot = ctx.repos.reminders.find_pending().await;
        assert_eq!(snapshot[0].id, earlier.id);
        assert_eq!(snapshot[1].id, later.id);

        let mut tied_ids = tied.iter().map(|r| r.id.as_string()).collect::<Vec<_>>();
        tied_ids.sort();
        let snapshot_tied_ids = snapshot[2..]
            .iter()
            .map(|r| r.id.as_string())
            .collect::<Vec<_>>();
        assert_eq!(snapshot_tied_ids, tied_ids);
    }
}
