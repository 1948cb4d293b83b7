mod locations;
mod notifications;
mod pairs;
mod path_params;

use actix_web::web;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.configure(locations::init_routes)
        .configure(pairs::init_routes)
        .configure(notifications::init_routes);
}
