pub mod notification_service;
pub mod registration_service;

pub use notification_service::{Notifier, SmtpNotifier};
pub use registration_service::RegistrationService;
