//! Mail notification
//!
//! The recommendation goes out as one plain-text UTF-8 mail from the account
//! to itself over an implicit-TLS SMTP session.

use crate::error::{PickError, Result};
use crate::prompts::Language;
use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use std::sync::Arc;
use tracing::{info, instrument};

/// A composed mail, independent of the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl OutgoingMail {
    /// Convert into a lettre message with a plain-text UTF-8 body
    pub fn to_message(&self) -> Result<Message> {
        let from: Mailbox = self
            .from
            .parse()
            .map_err(|e| PickError::Mail(format!("Invalid from address: {e}")))?;
        let to: Mailbox = self
            .to
            .parse()
            .map_err(|e| PickError::Mail(format!("Invalid recipient: {e}")))?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(self.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(self.body.clone())
            .map_err(|e| PickError::Mail(format!("Failed to build email: {e}")))
    }
}

/// Delivers composed mail
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver one mail; any failure is final
    async fn deliver(&self, mail: &OutgoingMail) -> Result<()>;
}

/// SMTP delivery through an authenticated implicit-TLS relay
pub struct SmtpMailer {
    transport: SmtpTransport,
}

impl SmtpMailer {
    /// Create a mailer for the given relay and account
    pub fn new(
        host: &str,
        port: u16,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self> {
        let transport = SmtpTransport::relay(host)
            .map_err(|e| PickError::Mail(format!("Invalid SMTP relay {host}: {e}")))?
            .port(port)
            .credentials(Credentials::new(username.into(), password.into()))
            .build();

        Ok(Self { transport })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn deliver(&self, mail: &OutgoingMail) -> Result<()> {
        let message = mail.to_message()?;
        let transport = self.transport.clone();

        // lettre's SMTP transport is blocking
        let response = tokio::task::spawn_blocking(move || transport.send(&message))
            .await
            .map_err(|e| PickError::Mail(format!("SMTP task failed: {e}")))?
            .map_err(|e| PickError::Mail(format!("SMTP send failed: {e}")))?;

        info!(code = %response.code(), "Mail accepted by relay");
        Ok(())
    }
}

/// Mails the recommendation to the configured account
pub struct Notifier {
    mailer: Arc<dyn Mailer>,
    account: String,
    language: Language,
}

impl Notifier {
    /// Create a new notifier
    pub fn new(mailer: Arc<dyn Mailer>, account: impl Into<String>, language: Language) -> Self {
        Self {
            mailer,
            account: account.into(),
            language,
        }
    }

    /// Compose the mail for a recommendation text
    pub fn compose(&self, text: &str) -> OutgoingMail {
        OutgoingMail {
            from: self.account.clone(),
            to: self.account.clone(),
            subject: self.language.mail_subject().to_string(),
            body: text.to_string(),
        }
    }

    /// Compose and deliver
    #[instrument(skip(self, text), fields(to = %self.account))]
    pub async fn notify(&self, text: &str) -> Result<()> {
        let mail = self.compose(text);
        self.mailer.deliver(&mail).await?;
        info!("Recommendation mailed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_SMTP_HOST, DEFAULT_SMTP_PORT};

    fn mail(from: &str) -> OutgoingMail {
        OutgoingMail {
            from: from.to_string(),
            to: "me@example.com".to_string(),
            subject: Language::Korean.mail_subject().to_string(),
            body: "🏆 오늘의 추천 종목: AAPL".to_string(),
        }
    }

    #[test]
    fn test_compose_is_self_addressed() {
        let notifier = Notifier::new(
            Arc::new(MockMailer::new()),
            "me@example.com",
            Language::Korean,
        );
        let composed = notifier.compose("body text");

        assert_eq!(composed.from, "me@example.com");
        assert_eq!(composed.to, "me@example.com");
        assert_eq!(composed.subject, "📈 오늘의 주식 추천");
        assert_eq!(composed.body, "body text");
    }

    #[test]
    fn test_to_message_envelope() {
        let message = mail("me@example.com").to_message().unwrap();
        let envelope = message.envelope();

        assert_eq!(
            envelope.from().map(ToString::to_string).as_deref(),
            Some("me@example.com")
        );
        assert_eq!(envelope.to().len(), 1);
        assert_eq!(envelope.to()[0].to_string(), "me@example.com");

        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("Content-Type: text/plain; charset=utf-8"));
    }

    #[test]
    fn test_invalid_address_rejected() {
        let err = mail("not an address").to_message().unwrap_err();
        assert!(matches!(err, PickError::Mail(msg) if msg.contains("from address")));
    }

    #[test]
    fn test_smtp_mailer_for_default_relay() {
        assert_eq!(DEFAULT_SMTP_HOST, "smtp.gmail.com");
        assert_eq!(DEFAULT_SMTP_PORT, 465);

        let mailer = SmtpMailer::new(
            DEFAULT_SMTP_HOST,
            DEFAULT_SMTP_PORT,
            "me@example.com",
            "abcd efgh ijkl mnop",
        );
        assert!(mailer.is_ok());
    }

    #[test]
    fn test_smtp_mailer_rejects_unusable_relay() {
        let result = SmtpMailer::new("", DEFAULT_SMTP_PORT, "me@example.com", "pw");
        assert!(matches!(result, Err(PickError::Mail(msg)) if msg.contains("Invalid SMTP relay")));
    }

    #[tokio::test]
    async fn test_notify_delivers_once() {
        let mut mailer = MockMailer::new();
        mailer
            .expect_deliver()
            .withf(|mail| {
                mail.subject == "📈 Today's stock pick"
                    && mail.from == "me@example.com"
                    && mail.to == "me@example.com"
                    && mail.body == "Pick: MSFT"
            })
            .times(1)
            .returning(|_| Ok(()));

        let notifier = Notifier::new(Arc::new(mailer), "me@example.com", Language::English);
        notifier.notify("Pick: MSFT").await.unwrap();
    }

    #[tokio::test]
    async fn test_delivery_failure_propagates() {
        let mut mailer = MockMailer::new();
        mailer
            .expect_deliver()
            .times(1)
            .returning(|_| Err(PickError::Mail("535 authentication failed".to_string())));

        let notifier = Notifier::new(Arc::new(mailer), "me@example.com", Language::Korean);
        let err = notifier.notify("text").await.unwrap_err();

        assert!(err.to_string().contains("535"));
    }
}
