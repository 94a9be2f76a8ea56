mod create_reminder;
mod delete_reminder;
mod get_event_reminders;
pub mod send_due_reminders;

use actix_web::web;
use create_reminder::create_reminder_controller;
use delete_reminder::delete_reminder_controller;
use get_event_reminders::get_event_reminders_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/reminders/event/{event_id}/reminders",
        web::get().to(get_event_reminders_controller),
    );
    cfg.route(
        "/reminders/event/{event_id}/reminders",
        web::post().to(create_reminder_controller),
    );
    cfg.route(
        "/reminders/{reminder_id}",
        web::delete().to(delete_reminder_controller),
    );
}
