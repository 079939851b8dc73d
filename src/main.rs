mod api;
mod config;
mod database;
mod middleware;
mod models;
mod services;
mod utils;

use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::io;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::AppConfig;
use crate::database::MongoDB;
use crate::services::{RegistrationService, SmtpNotifier};

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(|e| io::Error::other(e.to_string()))?;

    log::info!("🚀 Starting LinuxDiary registration backend...");
    log::info!("📊 Database: {} on {}", config.mongo.database, config.mongo.host);

    // A storage failure here is fatal: nothing can be registered without it.
    let db = MongoDB::new(&config.mongo).await.map_err(|e| {
        log::error!("❌ Failed to connect to MongoDB: {}", e);
        io::Error::other(e.to_string())
    })?;
    log::info!("✅ MongoDB connected successfully");

    if config.mail.host.is_empty() || config.mail.sender.is_empty() {
        log::warn!("⚠️  BACKEND_MAIL_HOST/BACKEND_MAIL_USER not set, confirmation emails will fail");
    }

    let service = web::Data::new(RegistrationService::new(
        Arc::new(db.clone()),
        Arc::new(SmtpNotifier::new(&config.mail)),
    ));

    let max_form_bytes = config.max_form_bytes;

    log::info!("🌐 Server started at {}:{}", config.host, config.port);
    log::info!(
        "📚 Swagger UI available at: http://{}:{}/swagger-ui/",
        config.host,
        config.port
    );

    let openapi = api::swagger::ApiDoc::openapi();

    let result = HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .wrap(middleware::cors())
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone()),
            )
            .configure(api::configure(max_form_bytes))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await;

    if let Err(e) = &result {
        log::error!("❌ Server stopped: {}", e);
    }

    db.close().await;
    result
}
