//! Error types for timestamp parsing and calendar generation.

use thiserror::Error;

/// Errors that can occur while parsing timestamps or rendering a calendar.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IcsError {
    /// A date-time string does not match the configured format, or names a
    /// timezone that is not in the IANA database.
    #[error("timestamp format does not match {format}: {input}")]
    InvalidTimestampFormat { input: String, format: String },

    /// A required calendar property is absent or blank.
    #[error("Missing calendar property: {0}")]
    MissingProperty(&'static str),

    /// There is no minimum or maximum over zero timestamps.
    #[error("Empty timestamp list")]
    EmptyTimestampList,

    /// The document timezone is not an IANA zone name.
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// A request scheme/host or event URL cannot be made into an absolute
    /// http(s) URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Convenience alias used throughout ics-core.
pub type Result<T> = std::result::Result<T, IcsError>;
