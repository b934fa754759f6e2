//! Filter Compiler Scenario Tests
//!
//! End-to-end behavior of filter compilation over the in-memory store:
//! - Unknown fields and blank values are skipped, never fatal
//! - Unparseable values reject the whole filter set
//! - IN with no usable elements matches nothing
//! - CONTAINS on zoned timestamps matches the rendered text

use seekql::filter::{FilterCompiler, FilterErrorCode, FilterInput, Operator};
use seekql::query::{Query, QueryExecutor, Row};
use seekql::schema::{ColumnDescriptor, ColumnKind, ColumnRegistry, TableSchema, TypedValue};
use seekql::store::MemoryTable;
use seekql::temporal::ZonedInstant;
use uuid::Uuid;

// =============================================================================
// Helper Functions
// =============================================================================

const START_MILLIS: i64 = 1_704_067_200_000; // 2024-01-01T00:00:00Z
const STEP_MILLIS: i64 = 61_000;

fn users_registry() -> ColumnRegistry {
    ColumnRegistry::from_schema(&TableSchema::users()).unwrap()
}

fn created_at(i: usize) -> ZonedInstant {
    ZonedInstant::from_epoch_millis(START_MILLIS + i as i64 * STEP_MILLIS).unwrap()
}

/// 100 users, `User1..User100`, with strictly increasing `created_at`.
fn hundred_users() -> MemoryTable {
    let mut table = MemoryTable::new(users_registry());
    for i in 0..100 {
        table
            .insert(
                Row::new()
                    .with("id", TypedValue::Identifier(Uuid::from_u128(i as u128 + 1)))
                    .with("name", TypedValue::Text(format!("User{}", i + 1)))
                    .with("created_at", TypedValue::DateTimeTz(created_at(i))),
            )
            .unwrap();
    }
    table
}

fn run(table: &MemoryTable, filters: &[FilterInput]) -> Vec<Row> {
    let query = FilterCompiler::new(table.registry())
        .compile(Query::new("user"), filters)
        .unwrap();
    table.execute(&query).unwrap()
}

fn names(rows: &[Row]) -> Vec<String> {
    let mut names: Vec<String> = rows
        .iter()
        .map(|r| match r.get("name") {
            Some(TypedValue::Text(n)) => n.clone(),
            other => panic!("unexpected name {:?}", other),
        })
        .collect();
    names.sort();
    names
}

// =============================================================================
// Reference Scenario
// =============================================================================

/// IN over two names returns exactly those two rows.
#[test]
fn test_in_returns_exactly_matching_rows() {
    let table = hundred_users();
    let rows = run(
        &table,
        &[FilterInput::new("name", "User5,User50", Operator::In)],
    );
    assert_eq!(names(&rows), vec!["User5", "User50"]);
}

/// A filter on a field the registry does not know is dropped.
#[test]
fn test_unknown_field_returns_all_rows() {
    let table = hundred_users();
    let rows = run(&table, &[FilterInput::new("bogus_field", "x", Operator::Eq)]);
    assert_eq!(rows.len(), 100);
}

/// A non-numeric value against an integer column rejects the request.
#[test]
fn test_non_integer_value_is_rejected() {
    let registry = ColumnRegistry::from_schema(&TableSchema::new(
        "user",
        vec![
            ColumnDescriptor::new("id", ColumnKind::Identifier),
            ColumnDescriptor::new("name", ColumnKind::Integer64),
            ColumnDescriptor::new("created_at", ColumnKind::DateTimeTz),
        ],
    ))
    .unwrap();

    let err = FilterCompiler::new(&registry)
        .compile(
            Query::new("user"),
            &[FilterInput::new("name", "not-an-int", Operator::Eq)],
        )
        .unwrap_err();

    assert_eq!(err.code(), FilterErrorCode::InvalidFilterValue);
    assert_eq!(err.field(), "name");
    assert_eq!(err.raw_value(), Some("not-an-int"));
    assert_eq!(err.kind(), Some(ColumnKind::Integer64));
}

// =============================================================================
// Tolerance Tests
// =============================================================================

/// Unknown fields contribute zero predicates under every operator.
#[test]
fn test_unknown_fields_never_fail() {
    let registry = users_registry();
    let compiler = FilterCompiler::new(&registry);
    let operators = [
        Operator::Eq,
        Operator::Contains,
        Operator::Lt,
        Operator::Le,
        Operator::Gt,
        Operator::Ge,
        Operator::In,
    ];

    for field in ["bogus", "Name", "created", "ID", ""] {
        for op in operators {
            let report = compiler
                .compile_with_report(Query::new("user"), &[FilterInput::new(field, "zzz", op)])
                .unwrap();
            assert!(report.query.is_unfiltered());
            assert_eq!(report.skipped[0].reason, FilterErrorCode::UnknownField);
        }
    }
}

/// Blank values are skipped regardless of operator or kind.
#[test]
fn test_blank_values_never_fail() {
    let registry = users_registry();
    let compiler = FilterCompiler::new(&registry);

    for field in ["id", "name", "created_at"] {
        for op in [Operator::Eq, Operator::Contains, Operator::Ge, Operator::In] {
            for blank in ["", " ", "\t\n"] {
                let query = compiler
                    .compile(Query::new("user"), &[FilterInput::new(field, blank, op)])
                    .unwrap();
                assert!(query.is_unfiltered());
            }
        }
    }
}

/// One bad value invalidates the whole filter set, even after good ones.
#[test]
fn test_bad_value_invalidates_whole_set() {
    let registry = users_registry();
    let err = FilterCompiler::new(&registry)
        .compile(
            Query::new("user"),
            &[
                FilterInput::new("name", "User5", Operator::Eq),
                FilterInput::new("bogus", "x", Operator::Eq),
                FilterInput::new("created_at", "2024-13-45 99:99:99", Operator::Ge),
            ],
        )
        .unwrap_err();
    assert_eq!(err.code(), FilterErrorCode::InvalidFilterValue);
    assert_eq!(err.field(), "created_at");
}

// =============================================================================
// Operator Semantics
// =============================================================================

/// IN whose raw value has no elements matches no rows.
#[test]
fn test_in_with_empty_list_matches_nothing() {
    let table = hundred_users();
    assert!(run(&table, &[FilterInput::new("name", ",,,", Operator::In)]).is_empty());
}

/// Filters conjoin: each one narrows the result further.
#[test]
fn test_filters_narrow_conjunctively() {
    let table = hundred_users();
    let rows = run(
        &table,
        &[
            FilterInput::new("name", "User5,User50,User99", Operator::In),
            FilterInput::new("created_at", "2024-01-01 00:10:00", Operator::Ge),
        ],
    );
    assert_eq!(names(&rows), vec!["User50", "User99"]);
}

/// CONTAINS on a zoned timestamp matches the engine's text rendering.
#[test]
fn test_contains_on_timestamp_matches_rendered_text() {
    let table = hundred_users();
    let rows = run(
        &table,
        &[FilterInput::new("created_at", "43", Operator::Contains)],
    );

    let expected: Vec<String> = (0..100)
        .filter(|&i| {
            created_at(i)
                .as_utc()
                .format("%Y-%m-%d %H:%M:%S+00")
                .to_string()
                .contains("43")
        })
        .map(|i| format!("User{}", i + 1))
        .collect();

    let mut expected_sorted = expected.clone();
    expected_sorted.sort();

    assert!(!expected.is_empty());
    // 00:43:43
    assert!(expected.contains(&"User44".to_string()));
    // 00:00:00
    assert!(!expected.contains(&"User1".to_string()));
    assert_eq!(names(&rows), expected_sorted);
}

/// CONTAINS on an identifier accepts fragments that are not UUIDs.
#[test]
fn test_contains_on_identifier_fragment() {
    let table = hundred_users();
    // Uuid::from_u128(100) renders as 00000000-0000-0000-0000-000000000064
    let rows = run(&table, &[FilterInput::new("id", "000000000064", Operator::Contains)]);
    assert_eq!(names(&rows), vec!["User100"]);
}

/// CONTAINS on text is a case-sensitive substring match.
#[test]
fn test_contains_on_text_is_case_sensitive() {
    let table = hundred_users();
    assert_eq!(
        run(&table, &[FilterInput::new("name", "User10", Operator::Contains)]).len(),
        2 // User10, User100
    );
    assert!(run(&table, &[FilterInput::new("name", "user10", Operator::Contains)]).is_empty());
}

/// Range filters on zoned timestamps honor the offset in the input.
#[test]
fn test_timestamp_range_with_offset() {
    let table = hundred_users();
    // 01:00:00+01:00 is 00:00:00Z, the first row.
    let rows = run(
        &table,
        &[FilterInput::new("created_at", "2024-01-01 01:00:00+01:00", Operator::Le)],
    );
    assert_eq!(names(&rows), vec!["User1"]);
}
