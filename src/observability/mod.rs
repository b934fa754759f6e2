//! Observability for seekql
//!
//! Structured JSON-line logging over a closed set of typed events.
//! Logging is read-only: it never changes compilation or pagination results.
//!
//! ```ignore
//! use seekql::observability::{log_event, Event, Severity};
//!
//! log_event(Severity::Trace, Event::FilterSkippedUnknownField, &[("field", "bogus")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log a typed event with fields
pub fn log_event(severity: Severity, event: Event, fields: &[(&str, &str)]) {
    Logger::log(severity, event.as_str(), fields);
}
