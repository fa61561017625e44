//! Submission checks. Runs before anything is composed or sent.

use std::sync::LazyLock;

use lettre::message::Mailbox;
use regex::Regex;

use super::model::{FieldValue, InquirySubmission, ValidatedInquiry};
use super::pricing::LessonTier;
use crate::error::ValidationError;

/// Youngest and oldest ages the studio teaches.
pub const MIN_AGE: i64 = 5;
pub const MAX_AGE: i64 = 14;

/// `local@domain.tld`, no whitespace, at least one dot after the `@`.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Whether `email` looks like a deliverable address.
///
/// Callers pass the trimmed field, so surrounding whitespace is already gone.
/// The address must also parse as a mailbox, since it becomes the
/// notification's `Reply-To`.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email) && email.parse::<Mailbox>().is_ok()
}

/// Check a submission.
///
/// Reports a single error category, checked in order: missing fields,
/// email format, age. Missing fields are all collected before failing.
pub fn validate(submission: &InquirySubmission) -> Result<ValidatedInquiry, ValidationError> {
    let mut missing = Vec::new();
    let mut require = |name: &'static str, value: &Option<FieldValue>| {
        let text = text_of(value);
        if text.is_none() {
            missing.push(name);
        }
        text
    };

    let parent_name = require("parentName", &submission.parent_name);
    let email = require("email", &submission.email);
    let age = require("childAge", &submission.child_age);
    let lesson_type = require("lessonType", &submission.lesson_type);

    let (Some(parent_name), Some(email), Some(_), Some(lesson_type)) =
        (parent_name, email, age, lesson_type)
    else {
        return Err(ValidationError::MissingFields(missing));
    };

    if !is_valid_email(&email) {
        return Err(ValidationError::InvalidEmail);
    }

    let child_age = submission
        .child_age
        .as_ref()
        .and_then(FieldValue::as_integer)
        .filter(|age| (MIN_AGE..=MAX_AGE).contains(age))
        .and_then(|age| u8::try_from(age).ok())
        .ok_or(ValidationError::InvalidAge)?;

    let message = submission
        .message
        .as_ref()
        .map(FieldValue::to_text)
        .filter(|text| !text.trim().is_empty());

    Ok(ValidatedInquiry {
        parent_name,
        email,
        phone: text_of(&submission.phone),
        child_name: text_of(&submission.child_name),
        child_age,
        lesson: LessonTier::from_label(&lesson_type),
        message,
        submitted_at: submission.timestamp.as_ref().and_then(FieldValue::as_datetime),
    })
}

fn text_of(value: &Option<FieldValue>) -> Option<String> {
    value.as_ref().and_then(FieldValue::non_blank)
}
