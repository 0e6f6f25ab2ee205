//! # ics-core
//!
//! Timezone-aware timestamp validation and iCalendar (ICS) generation for
//! downloadable calendars.
//!
//! Timestamps arrive as `"1970-01-01 01:00:00 Europe/Zurich"`-style strings,
//! each carrying its own IANA zone. They are validated against a strict
//! layout, compared by absolute instant, and rendered into one VEVENT each.
//! Zone data comes from `chrono-tz`.
//!
//! ## Quick start
//!
//! ```rust
//! use ics_core::{CalendarDocument, CalendarProperties};
//!
//! let props = CalendarProperties {
//!     timezone: "Europe/Zurich".into(),
//!     product_identifier: "my domain".into(),
//!     summary: "An exciting event".into(),
//!     description: "with a lot more information".into(),
//!     dates_list: vec![
//!         "1970-01-01 01:00:00 Europe/Zurich".into(),
//!         "1971-02-02 02:00:00 Europe/Zurich".into(),
//!     ],
//!     uuid: "123456789".into(),
//!     url: None,
//! };
//! let ics = CalendarDocument::new(props).generate().unwrap();
//! assert!(ics.starts_with("BEGIN:VCALENDAR\r\nVERSION:2.0\r\n"));
//! assert_eq!(ics.matches("BEGIN:VEVENT").count(), 2);
//! ```
//!
//! ## Modules
//!
//! - [`timestamp`] - `TimestampSet` parser and `ParsedInstant` min/max bounds
//! - [`format`] - `TimestampFormat` layout strings (`Y-m-d H:i:s T`)
//! - [`dst`] - resolution policy for local times in DST gaps
//! - [`document`] - `CalendarDocument` ICS rendering
//! - [`properties`] - the typed `CalendarProperties` bag
//! - [`request_url`] - base URL normalization from request scheme/host
//! - [`escape`] - TEXT escaping and content-line folding
//! - [`error`] - Error types

pub mod document;
pub mod dst;
pub mod error;
pub mod escape;
pub mod format;
pub mod properties;
pub mod request_url;
pub mod timestamp;

pub use document::{CalendarDocument, UidStrategy};
pub use dst::DstPolicy;
pub use error::IcsError;
pub use format::{TimestampFormat, DEFAULT_TIMESTAMP_FORMAT};
pub use properties::CalendarProperties;
pub use request_url::RequestContext;
pub use timestamp::{ParsedInstant, TimestampSet};
