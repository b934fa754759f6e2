//! Filter compiler
//!
//! Turns `(field, rawValue, operator)` triples into typed predicates and
//! appends them to a base query. Every filter narrows the result further;
//! the compiler never emits a disjunction across filters.
//!
//! Per filter:
//! 1. unknown field: skip
//! 2. blank value: skip
//! 3. split on `,`, parse each element as the column kind
//! 4. dispatch on `(kind, operator)`
//! 5. append to the conjunction

use super::errors::{FilterError, FilterErrorCode, FilterResult};
use super::input::{FilterInput, Operator};
use crate::observability::{log_event, Event, Severity};
use crate::query::{CompareOp, ContainsTarget, Predicate, Query};
use crate::schema::{ColumnDescriptor, ColumnKind, ColumnRegistry, TypedValue};
use crate::temporal::TimestampCodec;

/// A filter that was dropped during compilation
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedFilter {
    /// The filter as supplied
    pub filter: FilterInput,
    /// Why it was dropped
    pub reason: FilterErrorCode,
}

/// Compiled query plus the filters that did not contribute to it
#[derive(Debug, Clone, PartialEq)]
pub struct CompileReport {
    pub query: Query,
    /// Number of predicates appended to the base query
    pub applied: usize,
    pub skipped: Vec<SkippedFilter>,
}

/// Compiles filters against a column registry.
///
/// Holds only shared references and a `Copy` codec, so one compiler can be
/// used from any number of threads.
#[derive(Debug, Clone, Copy)]
pub struct FilterCompiler<'a> {
    registry: &'a ColumnRegistry,
    codec: TimestampCodec,
}

impl<'a> FilterCompiler<'a> {
    /// Create a compiler using the default (Postgres) timestamp codec
    pub fn new(registry: &'a ColumnRegistry) -> Self {
        Self::with_codec(registry, TimestampCodec::default())
    }

    /// Create a compiler with an explicit timestamp codec
    pub fn with_codec(registry: &'a ColumnRegistry, codec: TimestampCodec) -> Self {
        Self { registry, codec }
    }

    /// Appends one predicate per accepted filter to `base`.
    ///
    /// Unknown fields and blank values are skipped. An unparseable value or
    /// an operator the column kind cannot support rejects the whole call.
    pub fn compile(&self, base: Query, filters: &[FilterInput]) -> FilterResult<Query> {
        self.compile_with_report(base, filters).map(|report| report.query)
    }

    /// Like [`compile`](Self::compile), also reporting skipped filters
    pub fn compile_with_report(
        &self,
        base: Query,
        filters: &[FilterInput],
    ) -> FilterResult<CompileReport> {
        let mut query = base;
        let mut applied = 0;
        let mut skipped = Vec::new();

        for filter in filters {
            match self.compile_filter(filter) {
                Ok(predicate) => {
                    query = query.and_where(predicate);
                    applied += 1;
                }
                Err(err) if err.is_skip() => {
                    let event = match err.code() {
                        FilterErrorCode::BlankValue => Event::FilterSkippedBlankValue,
                        _ => Event::FilterSkippedUnknownField,
                    };
                    log_event(
                        Severity::Trace,
                        event,
                        &[("field", filter.field.as_str()), ("operator", filter.operator.as_str())],
                    );
                    skipped.push(SkippedFilter {
                        filter: filter.clone(),
                        reason: err.code(),
                    });
                }
                Err(err) => {
                    log_event(
                        Severity::Warn,
                        Event::FilterRejected,
                        &[
                            ("code", err.code().code()),
                            ("field", filter.field.as_str()),
                            ("operator", filter.operator.as_str()),
                        ],
                    );
                    return Err(err);
                }
            }
        }

        log_event(
            Severity::Trace,
            Event::FiltersCompiled,
            &[
                ("applied", applied.to_string().as_str()),
                ("skipped", skipped.len().to_string().as_str()),
                ("table", query.table.as_str()),
            ],
        );

        Ok(CompileReport {
            query,
            applied,
            skipped,
        })
    }

    /// Compiles a single filter.
    ///
    /// Skips come back as errors whose severity is `Skip`, so callers can
    /// tell them apart from rejections.
    pub fn compile_filter(&self, filter: &FilterInput) -> FilterResult<Predicate> {
        let column = self
            .registry
            .lookup(&filter.field)
            .ok_or_else(|| FilterError::unknown_field(&filter.field))?;

        if filter.is_blank() {
            return Err(FilterError::blank_value(&filter.field));
        }

        if filter.operator.is_ordering() && !column.kind.is_ordered() {
            return Err(FilterError::unsupported_operator(
                &filter.field,
                filter.operator,
                column.kind,
            ));
        }

        // Free-text search over the rendered value; the raw string need not
        // be a valid identifier or timestamp.
        if filter.operator == Operator::Contains
            && matches!(column.kind, ColumnKind::Identifier | ColumnKind::DateTimeTz)
        {
            return Ok(Predicate::contains(
                &column.name,
                ContainsTarget::TextCast,
                filter.raw_value.as_str(),
            ));
        }

        let values = self.parse_values(column, &filter.raw_value)?;
        self.dispatch(column, filter, values)
    }

    fn parse_values(&self, column: &ColumnDescriptor, raw: &str) -> FilterResult<Vec<TypedValue>> {
        split_raw(column.kind, raw)
            .map(|element| {
                column
                    .kind
                    .parse(element, &self.codec)
                    .map_err(|reason| FilterError::invalid_value(&column.name, raw, column.kind, reason))
            })
            .collect()
    }

    fn dispatch(
        &self,
        column: &ColumnDescriptor,
        filter: &FilterInput,
        values: Vec<TypedValue>,
    ) -> FilterResult<Predicate> {
        let op = match filter.operator {
            Operator::In => return Ok(Predicate::in_list(&column.name, values)),
            Operator::Contains => return self.contains(column, filter, values),
            Operator::Eq => CompareOp::Eq,
            Operator::Lt => CompareOp::Lt,
            Operator::Le => CompareOp::Le,
            Operator::Gt => CompareOp::Gt,
            Operator::Ge => CompareOp::Ge,
        };

        // Only the first value counts for single-value operators.
        let value = first_value(column, filter, values)?;
        Ok(Predicate::compare(&column.name, op, value))
    }

    fn contains(
        &self,
        column: &ColumnDescriptor,
        filter: &FilterInput,
        values: Vec<TypedValue>,
    ) -> FilterResult<Predicate> {
        let value = first_value(column, filter, values)?;
        let predicate = match value {
            TypedValue::Text(needle) => {
                Predicate::contains(&column.name, ContainsTarget::Column, needle)
            }
            other => Predicate::contains(
                &column.name,
                ContainsTarget::TextCast,
                other.render(&self.codec),
            ),
        };
        Ok(predicate)
    }
}

/// Splits a raw value into elements, dropping empty ones.
///
/// Text elements keep their whitespace; other kinds trim before parsing.
fn split_raw(kind: ColumnKind, raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').filter(move |element| match kind {
        ColumnKind::Text => !element.is_empty(),
        _ => !element.trim().is_empty(),
    })
}

fn first_value(
    column: &ColumnDescriptor,
    filter: &FilterInput,
    values: Vec<TypedValue>,
) -> FilterResult<TypedValue> {
    values.into_iter().next().ok_or_else(|| {
        FilterError::invalid_value(
            &column.name,
            &filter.raw_value,
            column.kind,
            format!("{} requires a value", filter.operator),
        )
    })
}

/// Compiles `filters` onto `base` using `registry`
pub fn compile(base: Query, filters: &[FilterInput], registry: &ColumnRegistry) -> FilterResult<Query> {
    FilterCompiler::new(registry).compile(base, filters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::TableSchema;
    use chrono::NaiveDate;

    fn registry() -> ColumnRegistry {
        ColumnRegistry::from_schema(&TableSchema::new(
            "user",
            vec![
                ColumnDescriptor::new("id", ColumnKind::Identifier),
                ColumnDescriptor::new("name", ColumnKind::Text),
                ColumnDescriptor::new("created_at", ColumnKind::DateTimeTz),
                ColumnDescriptor::new("age", ColumnKind::Integer64),
                ColumnDescriptor::new("score", ColumnKind::Float64),
                ColumnDescriptor::new("birthday", ColumnKind::Date),
                ColumnDescriptor::new("active", ColumnKind::Boolean),
            ],
        ))
        .unwrap()
    }

    fn compile_one(filter: FilterInput) -> FilterResult<Query> {
        let registry = registry();
        FilterCompiler::new(&registry).compile(Query::new("user"), &[filter])
    }

    #[test]
    fn test_unknown_field_is_skipped() {
        let query = compile_one(FilterInput::new("bogus_field", "x", Operator::Eq)).unwrap();
        assert!(query.is_unfiltered());
    }

    #[test]
    fn test_field_lookup_is_case_sensitive() {
        let query = compile_one(FilterInput::new("Name", "User5", Operator::Eq)).unwrap();
        assert!(query.is_unfiltered());
    }

    #[test]
    fn test_blank_value_is_skipped_for_every_operator() {
        for op in [Operator::Eq, Operator::In, Operator::Contains, Operator::Lt] {
            let query = compile_one(FilterInput::new("age", "  ", op)).unwrap();
            assert!(query.is_unfiltered());
        }
    }

    #[test]
    fn test_report_lists_skips() {
        let registry = registry();
        let report = FilterCompiler::new(&registry)
            .compile_with_report(
                Query::new("user"),
                &[
                    FilterInput::new("bogus", "x", Operator::Eq),
                    FilterInput::new("name", "", Operator::Eq),
                    FilterInput::new("age", "3", Operator::Ge),
                ],
            )
            .unwrap();

        assert_eq!(report.applied, 1);
        assert_eq!(report.skipped.len(), 2);
        assert_eq!(report.skipped[0].reason, FilterErrorCode::UnknownField);
        assert_eq!(report.skipped[1].reason, FilterErrorCode::BlankValue);
        assert_eq!(
            report.query.predicates,
            vec![Predicate::ge("age", TypedValue::Integer64(3))]
        );
    }

    #[test]
    fn test_invalid_value_rejects_whole_compile() {
        let registry = registry();
        let err = FilterCompiler::new(&registry)
            .compile(
                Query::new("user"),
                &[
                    FilterInput::new("name", "User5", Operator::Eq),
                    FilterInput::new("age", "not-an-int", Operator::Eq),
                ],
            )
            .unwrap_err();

        assert_eq!(err.code(), FilterErrorCode::InvalidFilterValue);
        assert_eq!(err.field(), "age");
        assert_eq!(err.raw_value(), Some("not-an-int"));
        assert_eq!(err.kind(), Some(ColumnKind::Integer64));
    }

    #[test]
    fn test_one_bad_in_element_rejects() {
        let err = compile_one(FilterInput::new("age", "1,2,x", Operator::In)).unwrap_err();
        assert_eq!(err.code(), FilterErrorCode::InvalidFilterValue);
        assert_eq!(err.raw_value(), Some("1,2,x"));
    }

    #[test]
    fn test_single_value_operators_use_first_element() {
        let query = compile_one(FilterInput::new("age", "5, 9", Operator::Lt)).unwrap();
        assert_eq!(
            query.predicates,
            vec![Predicate::lt("age", TypedValue::Integer64(5))]
        );
    }

    #[test]
    fn test_comparison_directions() {
        let cases = [
            (Operator::Eq, CompareOp::Eq),
            (Operator::Lt, CompareOp::Lt),
            (Operator::Le, CompareOp::Le),
            (Operator::Gt, CompareOp::Gt),
            (Operator::Ge, CompareOp::Ge),
        ];
        for (operator, op) in cases {
            let query = compile_one(FilterInput::new("score", "1.5", operator)).unwrap();
            assert_eq!(
                query.predicates,
                vec![Predicate::compare("score", op, TypedValue::Float64(1.5))]
            );
        }
    }

    #[test]
    fn test_in_uses_full_list() {
        let query = compile_one(FilterInput::new("name", "User5,User50", Operator::In)).unwrap();
        assert_eq!(
            query.predicates,
            vec![Predicate::in_list(
                "name",
                vec![TypedValue::Text("User5".into()), TypedValue::Text("User50".into())]
            )]
        );
    }

    #[test]
    fn test_in_with_no_elements_matches_nothing() {
        let query = compile_one(FilterInput::new("age", ",,", Operator::In)).unwrap();
        assert_eq!(query.predicates, vec![Predicate::MatchNone]);
    }

    #[test]
    fn test_eq_with_no_elements_is_invalid() {
        let err = compile_one(FilterInput::new("age", " , ", Operator::Eq)).unwrap_err();
        assert_eq!(err.code(), FilterErrorCode::InvalidFilterValue);
    }

    #[test]
    fn test_contains_on_text_matches_column() {
        let query = compile_one(FilterInput::new("name", "User", Operator::Contains)).unwrap();
        assert_eq!(
            query.predicates,
            vec![Predicate::contains("name", ContainsTarget::Column, "User")]
        );
    }

    #[test]
    fn test_contains_on_timestamp_uses_raw_string() {
        let query = compile_one(FilterInput::new("created_at", "43", Operator::Contains)).unwrap();
        assert_eq!(
            query.predicates,
            vec![Predicate::contains("created_at", ContainsTarget::TextCast, "43")]
        );
    }

    #[test]
    fn test_contains_on_identifier_skips_uuid_parse() {
        let query = compile_one(FilterInput::new("id", "abc-", Operator::Contains)).unwrap();
        assert_eq!(
            query.predicates,
            vec![Predicate::contains("id", ContainsTarget::TextCast, "abc-")]
        );
    }

    #[test]
    fn test_contains_on_numeric_uses_first_rendered_value() {
        let query = compile_one(FilterInput::new("age", " 42 ,7", Operator::Contains)).unwrap();
        assert_eq!(
            query.predicates,
            vec![Predicate::contains("age", ContainsTarget::TextCast, "42")]
        );
    }

    #[test]
    fn test_contains_on_date_uses_parsed_rendering() {
        let query =
            compile_one(FilterInput::new("birthday", "2024-03-09", Operator::Contains)).unwrap();
        let rendered = TypedValue::Date(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap())
            .render(&TimestampCodec::default());
        assert_eq!(
            query.predicates,
            vec![Predicate::contains("birthday", ContainsTarget::TextCast, rendered)]
        );
    }

    #[test]
    fn test_contains_on_date_still_validates() {
        let err = compile_one(FilterInput::new("birthday", "03/09", Operator::Contains)).unwrap_err();
        assert_eq!(err.code(), FilterErrorCode::InvalidFilterValue);
    }

    #[test]
    fn test_ordering_on_boolean_is_unsupported() {
        let err = compile_one(FilterInput::new("active", "true", Operator::Gt)).unwrap_err();
        assert_eq!(err.code(), FilterErrorCode::UnsupportedOperatorForKind);
        assert_eq!(err.operator(), Some(Operator::Gt));

        let query = compile_one(FilterInput::new("active", "TRUE", Operator::Eq)).unwrap();
        assert_eq!(
            query.predicates,
            vec![Predicate::eq("active", TypedValue::Boolean(true))]
        );
    }

    #[test]
    fn test_timestamp_range_goes_through_codec() {
        let query =
            compile_one(FilterInput::new("created_at", "2024-01-02 03:04:05+02", Operator::Ge))
                .unwrap();
        let expected = TimestampCodec::default()
            .decode_text("2024-01-02 01:04:05")
            .unwrap();
        assert_eq!(
            query.predicates,
            vec![Predicate::ge("created_at", TypedValue::DateTimeTz(expected))]
        );
    }

    #[test]
    fn test_base_query_is_preserved() {
        let registry = registry();
        let base = Query::new("user").and_where(Predicate::eq("active", TypedValue::Boolean(true)));
        let query = compile(
            base,
            &[FilterInput::new("age", "30", Operator::Le)],
            &registry,
        )
        .unwrap();

        assert_eq!(query.predicates.len(), 2);
        assert_eq!(query.predicates[0], Predicate::eq("active", TypedValue::Boolean(true)));
    }
}
