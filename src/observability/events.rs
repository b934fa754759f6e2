//! Observable events
//!
//! Events are explicit and typed so log consumers can match on stable names.

use std::fmt;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Configuration loaded
    ConfigLoaded,
    /// Table schema loaded
    SchemaLoaded,

    /// A filter referenced a column the registry does not know
    FilterSkippedUnknownField,
    /// A filter carried a blank value
    FilterSkippedBlankValue,
    /// A filter was rejected and aborted compilation
    FilterRejected,
    /// Filter compilation finished
    FiltersCompiled,

    /// A page was fetched and its cursor emitted
    PageEmitted,
    /// Pagination reached the end of the ordered result set
    PaginationExhausted,

    /// Fixture rows written by the seed tool
    FixturesSeeded,
    /// A CLI command failed
    CommandFailed,
}

impl Event {
    /// Returns the stable event name
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SchemaLoaded => "SCHEMA_LOADED",
            Event::FilterSkippedUnknownField => "FILTER_SKIPPED_UNKNOWN_FIELD",
            Event::FilterSkippedBlankValue => "FILTER_SKIPPED_BLANK_VALUE",
            Event::FilterRejected => "FILTER_REJECTED",
            Event::FiltersCompiled => "FILTERS_COMPILED",
            Event::PageEmitted => "PAGE_EMITTED",
            Event::PaginationExhausted => "PAGINATION_EXHAUSTED",
            Event::FixturesSeeded => "FIXTURES_SEEDED",
            Event::CommandFailed => "COMMAND_FAILED",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_are_screaming_snake_case() {
        let all = [
            Event::ConfigLoaded,
            Event::SchemaLoaded,
            Event::FilterSkippedUnknownField,
            Event::FilterSkippedBlankValue,
            Event::FilterRejected,
            Event::FiltersCompiled,
            Event::PageEmitted,
            Event::PaginationExhausted,
            Event::FixturesSeeded,
            Event::CommandFailed,
        ];

        for event in all {
            let name = event.as_str();
            assert!(name
                .chars()
                .all(|c| c.is_ascii_uppercase() || c == '_'));
        }
    }
}
