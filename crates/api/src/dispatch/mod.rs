mod send_due_reminders;

use actix_web::web;
use send_due_reminders::run_dispatch_controller;
pub use send_due_reminders::SendDueRemindersUseCase;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/dispatch/run", web::post().to(run_dispatch_controller));
}
