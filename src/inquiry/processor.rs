//! Inquiry processor. Validates, composes and dispatches each inquiry once.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use super::compose::{NotificationComposer, NotificationMessage};
use super::model::{InquirySubmission, ValidatedInquiry};
use super::validate;
use crate::config::MailConfig;
use crate::error::{ComposeError, DispatchError, ValidationError};
use crate::mail::{MailSender, OutgoingMail};

/// Shown to the parent once the notification is on its way.
pub const SUCCESS_MESSAGE: &str = "Your message has been sent successfully! We will get back to you soon to schedule your child's musical adventure.";

/// Shown to the parent when anything after validation goes wrong.
pub const FAILURE_MESSAGE: &str =
    "Sorry, there was an error sending your message. Please try again or contact us directly.";

/// Fixed addressing for every notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessorConfig {
    /// Operator identity the mail is sent as.
    pub from: String,
    /// Business inbox that receives every inquiry.
    pub to: String,
}

impl From<&MailConfig> for ProcessorConfig {
    fn from(config: &MailConfig) -> Self {
        Self {
            from: config.from_address.clone(),
            to: config.recipient.clone(),
        }
    }
}

/// What happened to one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InquiryOutcome {
    /// Notification accepted by the mail transport.
    Sent,
    /// Submission failed validation; nothing was sent.
    Rejected(ValidationError),
    /// Composition or dispatch failed. Details are logged only.
    Failed,
}

/// Handles inquiries. Holds only read-only, process-scoped resources, so a
/// single instance is shared across all requests.
pub struct InquiryProcessor {
    mailer: Arc<dyn MailSender>,
    composer: NotificationComposer,
    config: ProcessorConfig,
}

impl InquiryProcessor {
    pub fn new(mailer: Arc<dyn MailSender>, config: ProcessorConfig) -> Result<Self, ComposeError> {
        Ok(Self {
            mailer,
            composer: NotificationComposer::new()?,
            config,
        })
    }

    pub fn validate(&self, submission: &InquirySubmission) -> Result<ValidatedInquiry, ValidationError> {
        validate::validate(submission)
    }

    pub fn compose(
        &self,
        inquiry: &ValidatedInquiry,
        now: DateTime<Utc>,
    ) -> Result<NotificationMessage, ComposeError> {
        self.composer.compose(inquiry, now)
    }

    /// Send `message` to the business inbox with replies going to `reply_to`.
    /// A single attempt; failures are returned, not retried.
    pub async fn dispatch(
        &self,
        message: NotificationMessage,
        reply_to: &str,
    ) -> Result<(), DispatchError> {
        self.mailer
            .send(OutgoingMail {
                from: self.config.from.clone(),
                to: self.config.to.clone(),
                reply_to: reply_to.to_string(),
                subject: message.subject,
                html_body: message.html_body,
            })
            .await
    }

    /// Run one submission end to end.
    pub async fn process(&self, submission: InquirySubmission) -> InquiryOutcome {
        debug!(?submission, "Piano lesson inquiry received");

        let inquiry = match self.validate(&submission) {
            Ok(inquiry) => inquiry,
            Err(e) => {
                warn!(error = %e, "Inquiry rejected");
                return InquiryOutcome::Rejected(e);
            }
        };

        let message = match self.compose(&inquiry, Utc::now()) {
            Ok(message) => message,
            Err(e) => {
                error!(error = %e, "Failed to compose inquiry notification");
                return InquiryOutcome::Failed;
            }
        };

        if let Err(e) = self.dispatch(message, &inquiry.email).await {
            error!(error = %e, "Failed to send inquiry notification");
            return InquiryOutcome::Failed;
        }

        info!(
            parent = %inquiry.parent_name,
            email = %inquiry.email,
            child = inquiry.child_name.as_deref().unwrap_or("Not provided"),
            age = inquiry.child_age,
            lesson_type = inquiry.lesson.label(),
            "Piano lesson inquiry sent"
        );
        InquiryOutcome::Sent
    }
}
