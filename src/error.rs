//! Error types for the contact relay.

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Reasons a submitted inquiry is rejected before anything is sent.
///
/// The `Display` text is shown to the caller as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Child age must be between 5 and 14")]
    InvalidAge,
}

/// Notification rendering errors.
#[derive(Debug, thiserror::Error)]
pub enum ComposeError {
    #[error("Failed to render notification template: {0}")]
    Render(#[from] tera::Error),
}

/// Outbound mail errors. Logged for operators, never shown to callers.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Invalid {field} address: {reason}")]
    InvalidAddress { field: &'static str, reason: String },

    #[error("Failed to build email: {0}")]
    Build(String),

    #[error("SMTP send failed: {0}")]
    Transport(String),

    #[error("SMTP server rejected the message: {0}")]
    Rejected(String),

    #[error("SMTP server did not accept the connection test")]
    Unreachable,
}
