mod add_medication;

use actix_web::web;
use add_medication::add_medication_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/medications", web::post().to(add_medication_controller));
}
