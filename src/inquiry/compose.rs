//! Notification composition: subject line and HTML body for the studio inbox.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tera::Tera;

use super::model::ValidatedInquiry;
use crate::error::ComposeError;

/// Where every inquiry comes from.
pub const SOURCE_LABEL: &str = "Piano Corner Studio Website";

const TEMPLATE_NAME: &str = "inquiry.html";
const INQUIRY_TEMPLATE: &str = include_str!("templates/inquiry.html");

/// A rendered notification, ready to hand to a mail sender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMessage {
    pub subject: String,
    pub html_body: String,
}

/// Values the template sees. User-provided text is escaped by the
/// template engine; only server-generated strings are marked safe.
#[derive(Debug, Serialize)]
struct NotificationContext<'a> {
    received_at: String,
    parent_name: &'a str,
    email: &'a str,
    phone: Option<&'a str>,
    child_name: Option<&'a str>,
    child_age: u8,
    lesson_type: &'a str,
    price: &'static str,
    needs_guidance: bool,
    message: Option<&'a str>,
    submitted_at: String,
    source: &'static str,
}

/// Renders inquiries through a compiled template set shared by all requests.
#[derive(Debug, Clone)]
pub struct NotificationComposer {
    tera: Arc<Tera>,
}

impl NotificationComposer {
    /// Compile the notification template.
    pub fn new() -> Result<Self, ComposeError> {
        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, INQUIRY_TEMPLATE)?;
        Ok(Self {
            tera: Arc::new(tera),
        })
    }

    /// Build the notification for `inquiry`. `now` stands in for the
    /// submission time when the client did not send a usable one.
    pub fn compose(
        &self,
        inquiry: &ValidatedInquiry,
        now: DateTime<Utc>,
    ) -> Result<NotificationMessage, ComposeError> {
        let context = NotificationContext {
            received_at: format_long(now),
            parent_name: &inquiry.parent_name,
            email: &inquiry.email,
            phone: inquiry.phone.as_deref(),
            child_name: inquiry.child_name.as_deref(),
            child_age: inquiry.child_age,
            lesson_type: inquiry.lesson.label(),
            price: inquiry.lesson.price(),
            needs_guidance: inquiry.lesson.needs_guidance(),
            message: inquiry.message.as_deref(),
            submitted_at: format_short(inquiry.submitted_at.unwrap_or(now)),
            source: SOURCE_LABEL,
        };

        let html_body = self
            .tera
            .render(TEMPLATE_NAME, &tera::Context::from_serialize(&context)?)?;

        Ok(NotificationMessage {
            subject: subject_for(inquiry),
            html_body,
        })
    }
}

/// `🎹 New Piano Lesson Inquiry - Lily (Age 8)`; "Child" stands in for a missing name.
pub fn subject_for(inquiry: &ValidatedInquiry) -> String {
    format!(
        "🎹 New Piano Lesson Inquiry - {} (Age {})",
        inquiry.child_name.as_deref().unwrap_or("Child"),
        inquiry.child_age
    )
}

/// `Saturday, March 14, 2026 at 03:09 PM UTC`
fn format_long(at: DateTime<Utc>) -> String {
    at.format("%A, %B %-d, %Y at %I:%M %p UTC").to_string()
}

/// `3/14/2026, 3:09:26 PM UTC`
fn format_short(at: DateTime<Utc>) -> String {
    at.format("%-m/%-d/%Y, %-I:%M:%S %p UTC").to_string()
}
