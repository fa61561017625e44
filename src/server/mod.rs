//! HTTP surface for the contact relay.

pub mod rate_limit;
pub mod routes;

pub use rate_limit::RateLimiter;
pub use routes::{ApiResponse, app_routes};
