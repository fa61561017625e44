//! Inquiry data model: the raw form submission and its validated form.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;

use super::pricing::LessonTier;

/// A single form field as it arrives over JSON.
///
/// Browsers and form libraries disagree on whether numeric inputs are sent
/// as strings or numbers, so scalar values of either kind are accepted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
}

impl FieldValue {
    /// Textual form of the value, as it would be printed.
    pub fn to_text(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Bool(b) => b.to_string(),
        }
    }

    /// Trimmed text, or `None` if the value is blank.
    pub fn non_blank(&self) -> Option<String> {
        let text = self.to_text();
        let trimmed = text.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    /// Integer value, parsed leniently from text (leading digits win).
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Text(s) => parse_leading_int(s),
            FieldValue::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite())
                    .map(|f| f.trunc() as i64)
            }),
            FieldValue::Bool(_) => None,
        }
    }

    /// Date value, or `None` if the value cannot be read as one.
    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            FieldValue::Text(s) => parse_timestamp(s),
            FieldValue::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
            FieldValue::Bool(_) => None,
        }
    }
}

/// A contact-form submission, exactly as posted by the website.
///
/// Every field is optional at this level; presence is checked by
/// [`validate`](super::validate::validate).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InquirySubmission {
    pub parent_name: Option<FieldValue>,
    pub email: Option<FieldValue>,
    pub phone: Option<FieldValue>,
    pub child_name: Option<FieldValue>,
    pub child_age: Option<FieldValue>,
    pub lesson_type: Option<FieldValue>,
    pub message: Option<FieldValue>,
    pub timestamp: Option<FieldValue>,
}

/// A submission that passed every check and can be turned into a notification.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedInquiry {
    pub parent_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub child_name: Option<String>,
    pub child_age: u8,
    pub lesson: LessonTier,
    /// Free text from the parent, whitespace preserved.
    pub message: Option<String>,
    /// When the form was submitted, if the client sent a readable timestamp.
    pub submitted_at: Option<DateTime<Utc>>,
}

/// Parse an optional sign followed by a run of ASCII digits, ignoring
/// anything after the digits. `"8 years"` → 8, `"abc"` → `None`.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Read a client-supplied timestamp. Accepts RFC 3339 and a few common
/// naive forms, which are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn deserializes_camel_case_fields() {
        let submission: InquirySubmission = serde_json::from_value(serde_json::json!({
            "parentName": "Jane Doe",
            "email": "jane@example.com",
            "childAge": 8,
            "lessonType": "Little Sprouts",
            "phone": null,
        }))
        .unwrap();

        assert_eq!(
            submission.parent_name,
            Some(FieldValue::Text("Jane Doe".into()))
        );
        assert_eq!(submission.child_age.unwrap().as_integer(), Some(8));
        assert!(submission.phone.is_none());
        assert!(submission.message.is_none());
    }

    #[test]
    fn non_blank_trims_and_drops_whitespace() {
        assert_eq!(
            FieldValue::Text("  Jane ".into()).non_blank(),
            Some("Jane".to_string())
        );
        assert_eq!(FieldValue::Text(" \t ".into()).non_blank(), None);
        assert_eq!(
            FieldValue::Number(7.into()).non_blank(),
            Some("7".to_string())
        );
    }

    #[test]
    fn leading_int_parsing() {
        assert_eq!(parse_leading_int("8"), Some(8));
        assert_eq!(parse_leading_int("  12"), Some(12));
        assert_eq!(parse_leading_int("8 years"), Some(8));
        assert_eq!(parse_leading_int("9.5"), Some(9));
        assert_eq!(parse_leading_int("-3"), Some(-3));
        assert_eq!(parse_leading_int("+6"), Some(6));
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int("eight"), None);
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int("99999999999999999999999"), None);
    }

    #[test]
    fn numeric_ages_truncate() {
        let value: FieldValue = serde_json::from_str("10.9").unwrap();
        assert_eq!(value.as_integer(), Some(10));
        assert_eq!(FieldValue::Bool(true).as_integer(), None);
    }

    #[test]
    fn timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2026, 3, 14, 15, 9, 26).unwrap();

        assert_eq!(parse_timestamp("2026-03-14T15:09:26Z"), Some(expected));
        assert_eq!(parse_timestamp("2026-03-14T15:09:26.000Z"), Some(expected));
        assert_eq!(parse_timestamp("2026-03-14T16:09:26+01:00"), Some(expected));
        assert_eq!(parse_timestamp("2026-03-14 15:09:26"), Some(expected));
        assert_eq!(
            parse_timestamp("2026-03-14"),
            Some(Utc.with_ymd_and_hms(2026, 3, 14, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_timestamp("yesterday-ish"), None);
    }

    #[test]
    fn numeric_timestamp_is_epoch_millis() {
        let value = FieldValue::Number(1_773_500_966_000_i64.into());
        assert_eq!(
            value.as_datetime(),
            Some(Utc.with_ymd_and_hms(2026, 3, 14, 15, 9, 26).unwrap())
        );
    }
}
