//! Studio Contact: turns website contact-form inquiries into studio email notifications.

pub mod config;
pub mod error;
pub mod inquiry;
pub mod mail;
pub mod server;
