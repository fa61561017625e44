//! SMTP mail sender via lettre, one long-lived STARTTLS transport per process.

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::response::Response;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use secrecy::ExposeSecret;

use super::{MailSender, OutgoingMail};
use crate::config::MailConfig;
use crate::error::DispatchError;

/// Sends notifications through an authenticated SMTP relay.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    host: String,
}

impl SmtpMailer {
    /// Build the transport. No connection is made until the first send or
    /// [`verify`](MailSender::verify).
    pub fn new(config: &MailConfig) -> Result<Self, DispatchError> {
        let creds = Credentials::new(
            config.username.clone(),
            config.password.expose_secret().to_string(),
        );

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|e| DispatchError::Transport(format!("SMTP relay error: {e}")))?
            .port(config.smtp_port)
            .credentials(creds)
            .build();

        Ok(Self {
            transport,
            host: config.smtp_host.clone(),
        })
    }
}

#[async_trait]
impl MailSender for SmtpMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<(), DispatchError> {
        let message = build_message(mail)?;

        let response = self
            .transport
            .send(message)
            .await
            .map_err(|e| DispatchError::Transport(e.to_string()))?;

        check_response(&response)?;

        tracing::debug!(host = %self.host, "Email handed to SMTP relay");
        Ok(())
    }

    async fn verify(&self) -> Result<(), DispatchError> {
        let ok = self
            .transport
            .test_connection()
            .await
            .map_err(|e| DispatchError::Transport(e.to_string()))?;

        check_connection(ok)
    }
}

/// Map the relay's final reply to a result. Only 2xx/3xx count as accepted.
fn check_response(response: &Response) -> Result<(), DispatchError> {
    if response.is_positive() {
        return Ok(());
    }
    Err(DispatchError::Rejected(format!(
        "{} {}",
        response.code(),
        response.message().collect::<Vec<_>>().join(" ")
    )))
}

fn check_connection(ok: bool) -> Result<(), DispatchError> {
    if ok { Ok(()) } else { Err(DispatchError::Unreachable) }
}

/// Turn an [`OutgoingMail`] into a lettre message with an HTML body.
pub fn build_message(mail: OutgoingMail) -> Result<Message, DispatchError> {
    Message::builder()
        .from(parse_mailbox("from", &mail.from)?)
        .to(parse_mailbox("to", &mail.to)?)
        .reply_to(parse_mailbox("reply-to", &mail.reply_to)?)
        .subject(mail.subject)
        .header(ContentType::TEXT_HTML)
        .body(mail.html_body)
        .map_err(|e| DispatchError::Build(e.to_string()))
}

fn parse_mailbox(field: &'static str, address: &str) -> Result<Mailbox, DispatchError> {
    address
        .parse()
        .map_err(|e: lettre::address::AddressError| DispatchError::InvalidAddress {
            field,
            reason: e.to_string(),
        })
}
