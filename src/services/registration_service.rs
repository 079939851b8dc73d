use std::sync::Arc;

use crate::database::UserStore;
use crate::models::{ApiResponse, RegistrationInput};
use crate::services::notification_service::Notifier;
use crate::utils::AppError;

/// Validation policy, persistence and confirmation dispatch for registrations.
#[derive(Clone)]
pub struct RegistrationService {
    store: Arc<dyn UserStore>,
    notifier: Arc<dyn Notifier>,
}

impl RegistrationService {
    pub fn new(store: Arc<dyn UserStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self { store, notifier }
    }

    pub fn store(&self) -> &Arc<dyn UserStore> {
        &self.store
    }

    /// Fails on the first empty field, checked in form order. Content is not
    /// otherwise inspected.
    pub fn validate(input: &RegistrationInput) -> Result<(), AppError> {
        let required = [
            (&input.name, "Name is required"),
            (&input.email, "Email is required"),
            (&input.phone, "Phone is required"),
            (&input.college_name, "CollegeName is required"),
            (&input.year_of_study, "YearOfStudy is required"),
        ];

        match required.iter().find(|(value, _)| value.is_empty()) {
            Some((_, reason)) => Err(AppError::Validation(reason.to_string())),
            None => Ok(()),
        }
    }

    /// Validates and stores the registration, then fires the confirmation
    /// email without waiting for it.
    pub async fn register(&self, input: RegistrationInput) -> Result<ApiResponse, AppError> {
        Self::validate(&input)?;

        let user_id = self.store.insert(&input).await?;
        log::info!("✅ User registered: {} ({})", input.email, user_id);

        self.dispatch_confirmation(input);

        Ok(ApiResponse::success("User created successfully", user_id))
    }

    /// Detached: no handle is kept and the originating request cannot cancel it.
    fn dispatch_confirmation(&self, input: RegistrationInput) {
        let notifier = Arc::clone(&self.notifier);

        // The notifier logs the delivery outcome itself.
        tokio::spawn(async move {
            let delivered = notifier.send(&input.email, &input.name).await;
            log::debug!(
                "Confirmation task for {} finished (delivered: {})",
                input.email,
                delivered
            );
        });
    }
}
