//! The event property bag a calendar document is rendered from.

use serde::{Deserialize, Serialize};

use crate::error::{IcsError, Result};

/// Properties of one downloadable calendar.
///
/// Deserializes from JSON with the snake_case field names below. Absent keys
/// deserialize as empty values so that [`CalendarProperties::validate`] can
/// report which one is missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarProperties {
    /// IANA zone of the document (`X-WR-TIMEZONE`, `VTIMEZONE`). Also the zone
    /// for timestamp formats that carry no zone token.
    pub timezone: String,
    /// Free text, rendered as `PRODID`.
    pub product_identifier: String,
    pub summary: String,
    /// Rendered as `DESCRIPTION` and, unchanged, as the HTML alternate.
    pub description: String,
    /// One VEVENT per entry, in this order.
    pub dates_list: Vec<String>,
    /// Seed for per-event UIDs.
    pub uuid: String,
    /// Optional link attached to every event. Relative references are
    /// resolved against the request's base URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl CalendarProperties {
    /// Check that every required property is present and not blank.
    ///
    /// # Errors
    /// Returns `IcsError::MissingProperty` naming the first blank text field,
    /// or `IcsError::EmptyTimestampList` when `dates_list` has no entries.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("timezone", &self.timezone),
            ("product_identifier", &self.product_identifier),
            ("summary", &self.summary),
            ("description", &self.description),
            ("uuid", &self.uuid),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(IcsError::MissingProperty(key));
            }
        }

        if self.dates_list.is_empty() {
            return Err(IcsError::EmptyTimestampList);
        }

        Ok(())
    }
}
