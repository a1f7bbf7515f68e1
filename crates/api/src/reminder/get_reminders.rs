use crate::error::NotifyError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use notify_api_structs::get_reminders::*;
use notify_domain::Reminder;
use notify_infra::NotifyContext;

pub async fn get_reminders_controller(
    query_params: web::Query<QueryParams>,
    ctx: web::Data<NotifyContext>,
) -> Result<HttpResponse, NotifyError> {
    let usecase = GetRemindersUseCase {
        include_sent: query_params.include_sent,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminders| HttpResponse::Ok().json(APIResponse::new(reminders, &ctx.config.timezone)))
        .map_err(|_| NotifyError::InternalError)
}

#[derive(Debug)]
pub struct GetRemindersUseCase {
    pub include_sent: bool,
}

#[derive(Debug)]
pub enum UseCaseErrors {}

#[async_trait::async_trait(?Send)]
impl UseCase for GetRemindersUseCase {
    type Response = Vec<Reminder>;

    type Error = UseCaseErrors;

    async fn execute(&mut self, ctx: &NotifyContext) -> Result<Self::Response, Self::Error> {
        let reminders = if self.include_sent {
            ctx.repos.reminders.find_all().await
        } else {
            ctx.repos.reminders.find_pending().await
        };
        Ok(reminders)
    }
}
