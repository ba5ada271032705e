//! Utility functions for id generation, timestamps and text handling.

pub mod text;

use chrono::{DateTime, Datelike, Utc};
use uuid::Uuid;

pub use text::{truncate_chars, truncate_with_ellipsis};

/// Represents a timestamp that can be serialized/deserialized.
pub type Timestamp = DateTime<Utc>;

/// Generates a new UUID v4.
#[must_use]
pub fn generate_uuid() -> Uuid {
    Uuid::new_v4()
}

/// Generates a new UUID v4 as a hyphenated string.
#[must_use]
pub fn generate_id() -> String {
    generate_uuid().to_string()
}

/// Returns the current UTC timestamp.
#[must_use]
pub fn now_utc() -> Timestamp {
    Utc::now()
}

/// Returns the current calendar year in UTC.
#[must_use]
pub fn current_year() -> i32 {
    Utc::now().year()
}
