pub mod health;
pub mod registration;
pub mod swagger;
pub mod welcome;

use actix_web::web;

/// Routes served by the registration backend.
pub fn configure(max_form_bytes: usize) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(registration::multipart_config(max_form_bytes))
            .route("/", web::get().to(welcome::welcome))
            .route("/health", web::get().to(health::health_check))
            .route("/user/registration", web::post().to(registration::register));
    }
}
