//! Filter compilation error types
//!
//! Error codes:
//! - SEEKQL_UNKNOWN_FIELD (SKIP)
//! - SEEKQL_BLANK_VALUE (SKIP)
//! - SEEKQL_INVALID_FILTER_VALUE (REJECT)
//! - SEEKQL_UNSUPPORTED_OPERATOR (REJECT)
//!
//! SKIP errors drop the one filter and compilation continues. REJECT errors
//! abort the whole compile call: one bad value invalidates the request.

use std::fmt;

use super::input::Operator;
use crate::schema::ColumnKind;

/// What happens to the request when a filter fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Filter is dropped, compilation continues
    Skip,
    /// Compilation aborts, request is rejected
    Reject,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Skip => write!(f, "SKIP"),
            Severity::Reject => write!(f, "REJECT"),
        }
    }
}

/// Filter error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterErrorCode {
    /// Field is not in the registry
    UnknownField,
    /// Raw value is empty or whitespace
    BlankValue,
    /// A value element failed to parse as the column kind
    InvalidFilterValue,
    /// Operator has no meaning for the column kind
    UnsupportedOperatorForKind,
}

impl FilterErrorCode {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            FilterErrorCode::UnknownField => "SEEKQL_UNKNOWN_FIELD",
            FilterErrorCode::BlankValue => "SEEKQL_BLANK_VALUE",
            FilterErrorCode::InvalidFilterValue => "SEEKQL_INVALID_FILTER_VALUE",
            FilterErrorCode::UnsupportedOperatorForKind => "SEEKQL_UNSUPPORTED_OPERATOR",
        }
    }

    /// Returns the severity for this code
    pub fn severity(&self) -> Severity {
        match self {
            FilterErrorCode::UnknownField | FilterErrorCode::BlankValue => Severity::Skip,
            FilterErrorCode::InvalidFilterValue | FilterErrorCode::UnsupportedOperatorForKind => {
                Severity::Reject
            }
        }
    }
}

impl fmt::Display for FilterErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Filter error with full context
#[derive(Debug, Clone, PartialEq)]
pub struct FilterError {
    code: FilterErrorCode,
    message: String,
    field: String,
    raw_value: Option<String>,
    kind: Option<ColumnKind>,
    operator: Option<Operator>,
}

impl FilterError {
    /// Field not present in the registry
    pub fn unknown_field(field: impl Into<String>) -> Self {
        let field = field.into();
        Self {
            code: FilterErrorCode::UnknownField,
            message: format!("Unknown field '{}'", field),
            field,
            raw_value: None,
            kind: None,
            operator: None,
        }
    }

    /// Blank raw value
    pub fn blank_value(field: impl Into<String>) -> Self {
        let field = field.into();
        Self {
            code: FilterErrorCode::BlankValue,
            message: format!("Blank value for field '{}'", field),
            field,
            raw_value: None,
            kind: None,
            operator: None,
        }
    }

    /// Raw value does not parse as the column kind
    pub fn invalid_value(
        field: impl Into<String>,
        raw_value: impl Into<String>,
        kind: ColumnKind,
        reason: impl Into<String>,
    ) -> Self {
        let field = field.into();
        let raw_value = raw_value.into();
        Self {
            code: FilterErrorCode::InvalidFilterValue,
            message: format!(
                "Invalid {} value '{}' for field '{}': {}",
                kind.type_name(),
                raw_value,
                field,
                reason.into()
            ),
            field,
            raw_value: Some(raw_value),
            kind: Some(kind),
            operator: None,
        }
    }

    /// Operator cannot be applied to the column kind
    pub fn unsupported_operator(field: impl Into<String>, operator: Operator, kind: ColumnKind) -> Self {
        let field = field.into();
        Self {
            code: FilterErrorCode::UnsupportedOperatorForKind,
            message: format!(
                "Operator {} is not supported for {} field '{}'",
                operator,
                kind.type_name(),
                field
            ),
            field,
            raw_value: None,
            kind: Some(kind),
            operator: Some(operator),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> FilterErrorCode {
        self.code
    }

    /// Returns the severity
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns true if the filter is dropped rather than the request rejected
    pub fn is_skip(&self) -> bool {
        self.severity() == Severity::Skip
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the offending field
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Returns the raw value if applicable
    pub fn raw_value(&self) -> Option<&str> {
        self.raw_value.as_deref()
    }

    /// Returns the column kind if applicable
    pub fn kind(&self) -> Option<ColumnKind> {
        self.kind
    }

    /// Returns the operator if applicable
    pub fn operator(&self) -> Option<Operator> {
        self.operator
    }
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity(), self.code.code(), self.message)
    }
}

impl std::error::Error for FilterError {}

/// Result type for filter compilation
pub type FilterResult<T> = Result<T, FilterError>;
