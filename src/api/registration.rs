use actix_multipart::form::{text::Text, MultipartForm, MultipartFormConfig};
use actix_web::{web, HttpResponse};

use crate::models::{ApiResponse, RegistrationInput};
use crate::services::RegistrationService;
use crate::utils::AppError;

/// Multipart body of `POST /user/registration`. Absent parts read as empty.
#[derive(MultipartForm)]
pub struct RegistrationForm {
    name: Option<Text<String>>,
    email: Option<Text<String>>,
    phone: Option<Text<String>>,
    #[multipart(rename = "collegeName")]
    college_name: Option<Text<String>>,
    #[multipart(rename = "yearOfStudy")]
    year_of_study: Option<Text<String>>,
}

impl From<RegistrationForm> for RegistrationInput {
    fn from(form: RegistrationForm) -> Self {
        fn text(field: Option<Text<String>>) -> String {
            field.map(|t| t.0).unwrap_or_default()
        }

        Self {
            name: text(form.name),
            email: text(form.email),
            phone: text(form.phone),
            college_name: text(form.college_name),
            year_of_study: text(form.year_of_study),
        }
    }
}

/// Size limits for the form, with decoding failures rendered as the envelope.
pub fn multipart_config(max_form_bytes: usize) -> MultipartFormConfig {
    MultipartFormConfig::default()
        .total_limit(max_form_bytes)
        .memory_limit(max_form_bytes)
        .error_handler(|err, _req| {
            log::warn!("❌ POST /user/registration - malformed form: {}", err);
            AppError::MalformedInput(err.to_string()).into()
        })
}

#[utoipa::path(
    post,
    path = "/user/registration",
    tag = "Registration",
    request_body(content = RegistrationInput, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Registration stored, data holds the generated id", body = ApiResponse),
        (status = 400, description = "Missing field, malformed form or already registered", body = ApiResponse),
        (status = 500, description = "Storage unavailable", body = ApiResponse)
    )
)]
pub async fn register(
    service: web::Data<RegistrationService>,
    form: Result<MultipartForm<RegistrationForm>, actix_web::Error>,
) -> Result<HttpResponse, AppError> {
    // Content-type rejections happen before the config error handler runs.
    let form = form.map_err(|e| {
        log::warn!("❌ POST /user/registration - rejected form: {}", e);
        match e.as_error::<AppError>() {
            Some(AppError::MalformedInput(detail)) => AppError::MalformedInput(detail.clone()),
            _ => AppError::MalformedInput(e.to_string()),
        }
    })?;

    let input = RegistrationInput::from(form.into_inner());
    log::info!("📝 POST /user/registration - {:?}", input);

    match service.register(input).await {
        Ok(response) => {
            log::info!("✅ Registration successful: {:?}", response.data);
            Ok(HttpResponse::Ok().json(response))
        }
        Err(e) => {
            log::warn!("❌ Registration failed: {}", e);
            Err(e)
        }
    }
}
