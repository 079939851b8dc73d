use actix_cors::Cors;
use actix_web::http::header;

/// Any origin, credentials allowed, limited to the methods and headers the
/// registration form needs.
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![
            header::HeaderName::from_static("x-requested-with"),
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
        ])
        .supports_credentials()
        .max_age(3600)
}
