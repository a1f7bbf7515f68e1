use crate::error::NotifyError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use notify_api_structs::get_reminder_stats::*;
use notify_domain::{Channel, Status};
use notify_infra::NotifyContext;

pub async fn get_reminder_stats_controller(
    ctx: web::Data<NotifyContext>,
) -> Result<HttpResponse, NotifyError> {
    let usecase = GetReminderStatsUseCase {};

    execute(usecase, &ctx)
        .await
        .map(|stats| {
            HttpResponse::Ok().json(APIResponse {
                total: stats.total,
                pending: stats.pending,
                sent: stats.sent,
                email: stats.email,
                in_app: stats.in_app,
            })
        })
        .map_err(|_| NotifyError::InternalError)
}

/// Counts for the dashboard overview
#[derive(Debug)]
pub struct GetReminderStatsUseCase {}

#[derive(Debug)]
pub enum UseCaseErrors {}

#[derive(Debug)]
pub struct ReminderStats {
    pub total: usize,
    pub pending: usize,
    pub sent: usize,
    pub email: usize,
    pub in_app: usize,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetReminderStatsUseCase {
    type Response = ReminderStats;

    type Error = UseCaseErrors;

    async fn execute(&mut self, ctx: &NotifyContext) -> Result<Self::Response, Self::Error> {
        let reminders = ctx.repos.reminders.find_all().await;

        let mut stats = ReminderStats {
            total: reminders.len(),
            pending: 0,
            sent: 0,
            email: 0,
            in_app: 0,
        };
        for reminder in &reminders {
            match reminder.status {
                Status::Pending => stats.pending += 1,
                Status::Sent => stats.sent += 1,
            }
            match reminder.channel {
                Channel::Email => stats.email += 1,
                Channel::InApp => stats.in_app += 1,
            }
        }

        Ok(stats)
    }
}
