//! Shared building blocks for the liquor demand advisor.
//!
//! This crate holds the small value types every other crate leans on:
//! error locations, HTTP status classification and the redacted
//! credential wrapper. It has no I/O and no business logic.
//!
//! ## Architecture
//!
//! - **common** (this crate): Leaf value types
//! - **advisor-core**: Completion client, config, credential loading
//! - **advisor**: Command-line shell wiring everything together

pub mod error;
pub mod http_status;
pub mod redacted_key;

#[cfg(test)]
mod tests;

pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::HttpStatusCode;
pub use redacted_key::RedactedApiKey;
