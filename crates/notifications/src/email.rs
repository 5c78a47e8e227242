//! SMTP channels for change messages and emergency alerts.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use log::{info, warn};
use std::time::Duration;

use symbolsync_core::notifications::{
    EmergencyAlert, EmergencyNotifier, NotificationChannel, SymbolChangeBatch,
    SymbolChangeNotifier,
};
use symbolsync_core::Result;

use crate::config::SmtpSettings;
use crate::errors::NotificationError;
use crate::formatters::{FormatOptions, HtmlEmergencyFormatter, HtmlFormatter};

const SMTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Sends HTML mail through one SMTP relay.
#[derive(Debug, Clone)]
pub struct SmtpMailer {
    settings: SmtpSettings,
}

impl SmtpMailer {
    pub fn new(settings: SmtpSettings) -> Self {
        Self { settings }
    }

    fn sender(&self) -> std::result::Result<Mailbox, NotificationError> {
        let address: Address = self.settings.sender_email.trim().parse()?;
        let name = Some(self.settings.sender_name.trim())
            .filter(|n| !n.is_empty())
            .map(str::to_string);
        Ok(Mailbox::new(name, address))
    }

    /// Builds the message. Blank recipients are skipped; none left is an error.
    pub fn build_message(
        &self,
        recipients: &[String],
        subject: &str,
        html_body: &str,
    ) -> std::result::Result<Message, NotificationError> {
        let mut builder = Message::builder()
            .from(self.sender()?)
            .subject(subject)
            .header(ContentType::TEXT_HTML);

        let mut any = false;
        for recipient in recipients.iter().map(|r| r.trim()).filter(|r| !r.is_empty()) {
            builder = builder.to(recipient.parse::<Mailbox>()?);
            any = true;
        }
        if !any {
            return Err(NotificationError::NotConfigured("Email recipients".to_string()));
        }

        Ok(builder.body(html_body.to_string())?)
    }

    fn transport(&self) -> std::result::Result<AsyncSmtpTransport<Tokio1Executor>, NotificationError> {
        let server = self.settings.server.trim();
        let builder = if self.settings.use_ssl {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(server)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(server)
        };
        Ok(builder
            .port(self.settings.port)
            .credentials(Credentials::new(
                self.settings.username.clone(),
                self.settings.password.clone(),
            ))
            .timeout(Some(SMTP_TIMEOUT))
            .build())
    }

    pub async fn send(
        &self,
        recipients: &[String],
        subject: &str,
        html_body: &str,
    ) -> std::result::Result<(), NotificationError> {
        if html_body.is_empty() {
            return Ok(());
        }
        if !self.settings.is_valid() {
            return Err(NotificationError::NotConfigured("SMTP".to_string()));
        }

        let message = self.build_message(recipients, subject, html_body)?;
        self.transport()?.send(message).await?;
        info!("Email '{}' sent to {} recipients", subject, recipients.len());
        Ok(())
    }
}

/// Combined change messages to the regular recipients.
pub struct EmailNotifier {
    mailer: SmtpMailer,
    recipients: Vec<String>,
    formatter: HtmlFormatter,
}

impl EmailNotifier {
    pub fn new(mailer: SmtpMailer, recipients: Vec<String>, options: FormatOptions) -> Self {
        Self {
            mailer,
            recipients,
            formatter: HtmlFormatter::new(options),
        }
    }
}

#[async_trait]
impl SymbolChangeNotifier for EmailNotifier {
    fn channel(&self) -> NotificationChannel {
        NotificationChannel::Email
    }

    async fn send_combined_changes(&self, batch: &SymbolChangeBatch) -> Result<()> {
        let body = self.formatter.format_changes(batch);
        let subject = self.formatter.subject(batch);
        Ok(self.mailer.send(&self.recipients, &subject, &body).await?)
    }
}

/// Emergency alerts to the on-call recipients.
pub struct EmailEmergencyNotifier {
    mailer: SmtpMailer,
    recipients: Vec<String>,
    formatter: HtmlEmergencyFormatter,
}

impl EmailEmergencyNotifier {
    pub fn new(mailer: SmtpMailer, recipients: Vec<String>) -> Self {
        Self {
            mailer,
            recipients,
            formatter: HtmlEmergencyFormatter,
        }
    }
}

#[async_trait]
impl EmergencyNotifier for EmailEmergencyNotifier {
    fn channel(&self) -> NotificationChannel {
        NotificationChannel::EmergencyEmail
    }

    async fn send_emergency(&self, alert: &EmergencyAlert) -> Result<()> {
        let subject = self.formatter.subject(alert);
        let body = self.formatter.format(alert);
        if let Err(e) = self.mailer.send(&self.recipients, &subject, &body).await {
            warn!("Emergency email '{}' could not be sent: {}", subject, e);
            return Err(e.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mailer() -> SmtpMailer {
        SmtpMailer::new(SmtpSettings {
            server: "smtp.example.com".into(),
            port: 587,
            use_ssl: true,
            sender_email: "alerts@example.com".into(),
            sender_name: "Symbol Sync".into(),
            username: "alerts".into(),
            password: "secret".into(),
        })
    }

    #[test]
    fn message_has_sender_recipients_and_html_body() {
        let message = mailer()
            .build_message(
                &["ops@example.com".into(), " ".into(), "dev@example.com".into()],
                "Symbol Changes on BinanceSpot (Spot)",
                "<p>hi</p>",
            )
            .unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();

        assert!(raw.contains("Symbol Sync"));
        assert!(raw.contains("<alerts@example.com>"));
        assert!(raw.contains("ops@example.com"));
        assert!(raw.contains("dev@example.com"));
        assert!(raw.contains("Subject: Symbol Changes on BinanceSpot (Spot)"));
        assert!(raw.contains("Content-Type: text/html; charset=utf-8"));
        assert!(raw.contains("<p>hi</p>"));
    }

    #[test]
    fn bad_addresses_are_reported() {
        let err = mailer()
            .build_message(&["not-an-address".into()], "s", "b")
            .unwrap_err();
        assert!(matches!(err, NotificationError::Address(_)));

        let err = mailer().build_message(&[" ".into()], "s", "b").unwrap_err();
        assert!(matches!(err, NotificationError::NotConfigured(_)));
    }

    #[tokio::test]
    async fn invalid_smtp_settings_are_not_configured() {
        let err = SmtpMailer::new(SmtpSettings::default())
            .send(&["ops@example.com".into()], "s", "<p>b</p>")
            .await
            .unwrap_err();
        assert!(matches!(err, NotificationError::NotConfigured(_)));
    }
}
