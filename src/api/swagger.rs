use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "LinuxDiary Registration API",
        version = "1.0.0",
        description = "Event registration backend for LinuxDiary 5.0.\n\nSubmissions are multipart forms. Every outcome is returned as the same envelope: `message`, `data`, `success`, `error`.",
        contact(
            name = "Walchand Linux Users' Group"
        )
    ),
    paths(
        crate::api::welcome::welcome,
        crate::api::health::health_check,
        crate::api::registration::register,
    ),
    components(
        schemas(
            crate::api::welcome::WelcomeResponse,
            crate::api::health::HealthResponse,
            crate::models::RegistrationInput,
            crate::models::ApiResponse,
        )
    ),
    tags(
        (name = "Registration", description = "Event registration endpoints. A successful registration triggers a confirmation email."),
        (name = "Health", description = "Service and database liveness."),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_public_routes() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        assert!(paths.iter().any(|p| p.as_str() == "/"));
        assert!(paths.iter().any(|p| p.as_str() == "/health"));
        assert!(paths.iter().any(|p| p.as_str() == "/user/registration"));
    }
}
