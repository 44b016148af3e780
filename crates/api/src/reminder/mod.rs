mod get_adherence_report;
mod mark_reminder_taken;
mod snooze_reminder;
mod update_reminder_time;

use actix_web::web;
use get_adherence_report::get_adherence_report_controller;
use mark_reminder_taken::mark_reminder_taken_controller;
use snooze_reminder::snooze_reminder_controller;
use update_reminder_time::update_reminder_time_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/reminders/{reminder_id}/taken",
        web::post().to(mark_reminder_taken_controller),
    );
    cfg.route(
        "/reminders/{reminder_id}/snooze",
        web::post().to(snooze_reminder_controller),
    );
    cfg.route(
        "/reminders/{reminder_id}/time",
        web::put().to(update_reminder_time_controller),
    );
    cfg.route(
        "/users/{user_id}/reminders/report",
        web::get().to(get_adherence_report_controller),
    );
}
