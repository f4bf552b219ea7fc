mod get_user_notifications;
pub mod process_reminders;

use actix_web::web;
use get_user_notifications::get_user_notifications_controller;
use process_reminders::process_reminders_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/reminders/process",
        web::post().to(process_reminders_controller),
    );
    cfg.route(
        "/users/{user_id}/notifications",
        web::get().to(get_user_notifications_controller),
    );
}
