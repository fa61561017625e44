//! Outbound mail: the `MailSender` seam and its SMTP implementation.

pub mod smtp;

pub use smtp::SmtpMailer;

use async_trait::async_trait;

use crate::error::DispatchError;

/// One HTML email, fully addressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub from: String,
    pub to: String,
    /// Where replies from the studio inbox should go.
    pub reply_to: String,
    pub subject: String,
    pub html_body: String,
}

/// Something that can deliver an [`OutgoingMail`].
///
/// Implementations own their connection handling; callers make a single
/// `send` per message and never retry.
#[async_trait]
pub trait MailSender: Send + Sync {
    /// Hand the message to the transport.
    async fn send(&self, mail: OutgoingMail) -> Result<(), DispatchError>;

    /// Check that the transport is reachable and accepts our credentials.
    async fn verify(&self) -> Result<(), DispatchError>;
}
