mod get_me;
mod login;
mod logout;
mod refresh;
mod register;

use actix_web::web;
use get_me::get_me_controller;
use login::login_controller;
use logout::logout_controller;
use refresh::refresh_controller;
use register::register_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/auth/register", web::post().to(register_controller));
    cfg.route("/auth/login", web::post().to(login_controller));
    cfg.route("/auth/logout", web::post().to(logout_controller));
    cfg.route("/auth/refresh", web::post().to(refresh_controller));

    cfg.route("/users/me", web::get().to(get_me_controller));
}
