mod create_reminder;
mod get_reminder_stats;
mod get_reminders;
mod send_due_reminders;

use actix_web::web;
use create_reminder::create_reminder_controller;
use get_reminder_stats::get_reminder_stats_controller;
use get_reminders::get_reminders_controller;
use send_due_reminders::send_due_reminders_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/reminders", web::post().to(create_reminder_controller));
    cfg.route("/reminders", web::get().to(get_reminders_controller));
    cfg.route(
        "/reminders/stats",
        web::get().to(get_reminder_stats_controller),
    );
    cfg.route(
        "/reminders/send-due",
        web::post().to(send_due_reminders_controller),
    );
}
