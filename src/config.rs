//! Configuration types, built once from environment variables at startup.

use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Business inbox that receives inquiry notifications when `PIANO_EMAIL` is unset.
pub const DEFAULT_RECIPIENT: &str = "info@pianocorner.studio";

/// Listen port when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 3000;

/// Process-wide configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port the HTTP server listens on.
    pub port: u16,
    pub mail: MailConfig,
    pub rate_limit: RateLimitConfig,
}

/// Outbound SMTP settings and the fixed sender/recipient pair.
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub username: String,
    pub password: SecretString,
    /// Operator identity used as the `From` header.
    pub from_address: String,
    /// Business address every notification is delivered to.
    pub recipient: String,
}

/// Limit applied to the inquiry endpoint.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Requests allowed per source within one window.
    pub max_requests: u32,
    pub window: Duration,
    /// Key sources on the first `X-Forwarded-For` entry instead of the peer address.
    pub trust_forwarded_for: bool,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 5,
            window: Duration::from_secs(15 * 60), // 15 minutes
            trust_forwarded_for: false,
        }
    }
}

impl AppConfig {
    /// Build config from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = parse_or(&lookup, "PORT", DEFAULT_PORT)?;

        let username = required(&lookup, "EMAIL_USER")?;
        let password = SecretString::from(required(&lookup, "EMAIL_PASS")?);

        let smtp_host = lookup("SMTP_HOST")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "smtp.protonmail.ch".to_string());
        let smtp_port = parse_or(&lookup, "SMTP_PORT", 587)?;

        let recipient = lookup("PIANO_EMAIL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_RECIPIENT.to_string());

        let defaults = RateLimitConfig::default();
        let window_secs = parse_or(&lookup, "CONTACT_RATE_WINDOW_SECS", defaults.window.as_secs())?;
        if window_secs == 0 {
            // A zero window expires every count immediately.
            return Err(ConfigError::InvalidValue {
                key: "CONTACT_RATE_WINDOW_SECS".to_string(),
                message: "window must be at least one second".to_string(),
            });
        }
        let rate_limit = RateLimitConfig {
            max_requests: parse_or(&lookup, "CONTACT_RATE_LIMIT", defaults.max_requests)?,
            window: Duration::from_secs(window_secs),
            trust_forwarded_for: parse_or(&lookup, "TRUST_PROXY", defaults.trust_forwarded_for)?,
        };

        Ok(Self {
            port,
            mail: MailConfig {
                smtp_host,
                smtp_port,
                from_address: username.clone(),
                username,
                password,
                recipient,
            },
            rate_limit,
        })
    }
}

fn required<F>(lookup: &F, key: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => {
            raw.trim()
                .parse()
                .map_err(|e: T::Err| ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: e.to_string(),
                })
        }
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_credentials_set() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("EMAIL_USER", "studio@proton.me"),
            ("EMAIL_PASS", "hunter2"),
        ]))
        .unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.mail.smtp_host, "smtp.protonmail.ch");
        assert_eq!(config.mail.smtp_port, 587);
        assert_eq!(config.mail.recipient, DEFAULT_RECIPIENT);
        assert_eq!(config.mail.from_address, "studio@proton.me");
        assert_eq!(config.mail.password.expose_secret(), "hunter2");
        assert_eq!(config.rate_limit.max_requests, 5);
        assert_eq!(config.rate_limit.window, Duration::from_secs(900));
        assert!(!config.rate_limit.trust_forwarded_for);
    }

    #[test]
    fn overrides_are_read() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("EMAIL_USER", "studio@proton.me"),
            ("EMAIL_PASS", "hunter2"),
            ("PORT", "8081"),
            ("PIANO_EMAIL", "lessons@example.com"),
            ("SMTP_HOST", "smtp.example.com"),
            ("SMTP_PORT", "2525"),
            ("CONTACT_RATE_LIMIT", "10"),
            ("CONTACT_RATE_WINDOW_SECS", "60"),
            ("TRUST_PROXY", "true"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8081);
        assert_eq!(config.mail.recipient, "lessons@example.com");
        assert_eq!(config.mail.smtp_host, "smtp.example.com");
        assert_eq!(config.mail.smtp_port, 2525);
        assert_eq!(config.rate_limit.max_requests, 10);
        assert_eq!(config.rate_limit.window, Duration::from_secs(60));
        assert!(config.rate_limit.trust_forwarded_for);
    }

    #[test]
    fn missing_credentials_are_reported() {
        let err = AppConfig::from_lookup(lookup_from(&[("EMAIL_PASS", "x")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref key) if key == "EMAIL_USER"));

        let err = AppConfig::from_lookup(lookup_from(&[("EMAIL_USER", "a@b.co")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref key) if key == "EMAIL_PASS"));
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("EMAIL_USER", "a@b.co"),
            ("EMAIL_PASS", "x"),
            ("PORT", "eighty"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "PORT"));
    }

    #[test]
    fn zero_rate_window_is_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("EMAIL_USER", "a@b.co"),
            ("EMAIL_PASS", "x"),
            ("CONTACT_RATE_WINDOW_SECS", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref key, .. } if key == "CONTACT_RATE_WINDOW_SECS"
        ));
    }

    #[test]
    fn blank_recipient_falls_back_to_default() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("EMAIL_USER", "a@b.co"),
            ("EMAIL_PASS", "x"),
            ("PIANO_EMAIL", "   "),
        ]))
        .unwrap();
        assert_eq!(config.mail.recipient, DEFAULT_RECIPIENT);
    }
}
