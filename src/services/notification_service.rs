use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::{Credentials, Mechanism};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::MailConfig;

const SMTP_PORT: u16 = 587;
const SUBJECT: &str = "Welcome to LinuxDiary 5.0";
const TEMPLATE: &str = include_str!("../../templates/registration_email.html");

/// Best-effort confirmation mailer. Reports only whether delivery succeeded.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, recipient_email: &str, display_name: &str) -> bool;
}

/// Renders the confirmation email body for `display_name`.
pub fn render_confirmation(display_name: &str) -> String {
    TEMPLATE.replace("{{name}}", &escape_html(display_name))
}

fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// SMTP notifier: STARTTLS on port 587 with PLAIN authentication.
#[derive(Clone)]
pub struct SmtpNotifier {
    sender: String,
    host: String,
    credentials: Credentials,
}

impl SmtpNotifier {
    pub fn new(config: &MailConfig) -> Self {
        Self {
            sender: config.sender.clone(),
            host: config.host.clone(),
            credentials: Credentials::new(config.sender.clone(), config.password.clone()),
        }
    }

    fn build_message(&self, recipient_email: &str, display_name: &str) -> Result<Message, String> {
        Message::builder()
            .from(
                self.sender
                    .parse()
                    .map_err(|e| format!("Invalid from address: {}", e))?,
            )
            .to(recipient_email
                .parse()
                .map_err(|e| format!("Invalid to address: {}", e))?)
            .subject(SUBJECT)
            .header(ContentType::TEXT_HTML)
            .body(render_confirmation(display_name))
            .map_err(|e| format!("Failed to build email: {}", e))
    }

    async fn deliver(&self, message: Message) -> Result<(), String> {
        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.host)
            .map_err(|e| format!("SMTP relay error: {}", e))?
            .port(SMTP_PORT)
            .credentials(self.credentials.clone())
            .authentication(vec![Mechanism::Plain])
            .build();

        mailer
            .send(message)
            .await
            .map(|_| ())
            .map_err(|e| format!("Failed to send email: {}", e))
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send(&self, recipient_email: &str, display_name: &str) -> bool {
        let result = match self.build_message(recipient_email, display_name) {
            Ok(message) => self.deliver(message).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => {
                log::info!("📧 Confirmation email sent to {}", recipient_email);
                true
            }
            Err(e) => {
                log::error!("❌ Failed to send email to {}: {}", recipient_email, e);
                false
            }
        }
    }
}


#[cfg(test)]
pub(crate) mod fakes {
    use super::*;
    use tokio::sync::mpsc;

    /// Reports every send attempt on a channel, then returns `outcome`.
    pub struct RecordingNotifier {
        sent: mpsc::UnboundedSender<(String, String)>,
        outcome: bool,
    }

    impl RecordingNotifier {
        pub fn new(outcome: bool) -> (Self, mpsc::UnboundedReceiver<(String, String)>) {
            let (sent, received) = mpsc::unbounded_channel();
            (Self { sent, outcome }, received)
        }
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn send(&self, recipient_email: &str, display_name: &str) -> bool {
            let _ = self
                .sent
                .send((recipient_email.to_string(), display_name.to_string()));
            self.outcome
        }
    }
}
