mod register_destination;

use actix_web::web;
use register_destination::register_destination_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/destinations",
        web::post().to(register_destination_controller),
    );
}
