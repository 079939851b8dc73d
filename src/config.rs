use std::env;

use crate::utils::AppError;

const DEFAULT_MAX_FORM_BYTES: usize = 10 * 1024 * 1024;

/// MongoDB connection parameters
#[derive(Debug, Clone)]
pub struct MongoConfig {
    pub protocol: String,
    pub user: String,
    pub password: String,
    pub host: String,
    pub database: String,
}

impl MongoConfig {
    /// Builds the connection string. Credentials are omitted when no user is set.
    pub fn uri(&self) -> String {
        let credentials = if self.user.is_empty() {
            String::new()
        } else {
            format!("{}:{}@", self.user, self.password)
        };

        format!(
            "{}://{}{}/{}?retryWrites=true&w=majority",
            self.protocol, credentials, self.host, self.database
        )
    }
}

/// SMTP parameters for the confirmation mailer
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub sender: String,
    pub password: String,
    pub host: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound for a multipart registration body
    pub max_form_bytes: usize,
    pub mongo: MongoConfig,
    pub mail: MailConfig,
}

impl AppConfig {
    /// Reads configuration from the process environment (after `.env` is loaded).
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let port = var("BACKEND_PORT", "5000")
            .parse::<u16>()
            .map_err(|e| AppError::Config(format!("BACKEND_PORT: {}", e)))?;

        let max_form_bytes = match lookup("BACKEND_MAX_FORM_BYTES").filter(|v| !v.is_empty()) {
            Some(raw) => raw
                .parse::<usize>()
                .map_err(|e| AppError::Config(format!("BACKEND_MAX_FORM_BYTES: {}", e)))?,
            None => DEFAULT_MAX_FORM_BYTES,
        };

        Ok(Self {
            host: var("BACKEND_HOST", "0.0.0.0"),
            port,
            max_form_bytes,
            mongo: MongoConfig {
                protocol: var("BACKEND_MONGO_PROTOCOL", "mongodb"),
                user: var("BACKEND_MONGO_USER", ""),
                password: var("BACKEND_MONGO_PASS", ""),
                host: var("BACKEND_MONGO_HOST", "localhost:27017"),
                database: var("BACKEND_MONGO_DB", "osd"),
            },
            mail: MailConfig {
                sender: var("BACKEND_MAIL_USER", ""),
                password: var("BACKEND_MAIL_PASSWORD", ""),
                host: var("BACKEND_MAIL_HOST", ""),
            },
        })
    }
}
