//! Inquiry handling: model, pricing, validation, notification, processing.

pub mod compose;
pub mod model;
pub mod pricing;
pub mod processor;
pub mod validate;

pub use compose::{NotificationComposer, NotificationMessage};
pub use model::{FieldValue, InquirySubmission, ValidatedInquiry};
pub use pricing::LessonTier;
pub use processor::{InquiryOutcome, InquiryProcessor, ProcessorConfig};
