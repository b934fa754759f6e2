//! Predicate evaluation for the in-memory store
//!
//! Applies predicates strictly as the storage engine would: no coercion
//! across kinds, missing values never match, containment on cast columns
//! runs over the engine's text rendering.

use std::cmp::Ordering;

use crate::query::{CompareOp, ContainsTarget, Predicate, Row};
use crate::schema::TypedValue;
use crate::temporal::TimestampCodec;

/// Evaluates predicates against rows
pub struct PredicateEvaluator<'a> {
    codec: &'a TimestampCodec,
}

impl<'a> PredicateEvaluator<'a> {
    pub fn new(codec: &'a TimestampCodec) -> Self {
        Self { codec }
    }

    /// Checks if a row matches all predicates (AND semantics)
    pub fn matches(&self, row: &Row, predicates: &[Predicate]) -> bool {
        predicates.iter().all(|p| self.matches_predicate(row, p))
    }

    /// Checks if a row matches a single predicate
    pub fn matches_predicate(&self, row: &Row, predicate: &Predicate) -> bool {
        match predicate {
            Predicate::Compare { column, op, value } => match row.get(column) {
                Some(actual) => compare_match(actual, *op, value),
                None => false,
            },
            Predicate::In { column, values } => match row.get(column) {
                Some(actual) => values.iter().any(|v| v == actual),
                None => false,
            },
            Predicate::Contains {
                column,
                target,
                needle,
            } => match row.get(column) {
                Some(actual) => self.contains_match(actual, *target, needle),
                None => false,
            },
            Predicate::MatchNone => false,
            Predicate::Any(parts) => parts.iter().any(|p| self.matches_predicate(row, p)),
            Predicate::All(parts) => parts.iter().all(|p| self.matches_predicate(row, p)),
        }
    }

    fn contains_match(&self, actual: &TypedValue, target: ContainsTarget, needle: &str) -> bool {
        match (target, actual) {
            (ContainsTarget::Column, TypedValue::Text(text)) => text.contains(needle),
            _ => actual.render(self.codec).contains(needle),
        }
    }
}

fn compare_match(actual: &TypedValue, op: CompareOp, bound: &TypedValue) -> bool {
    if op == CompareOp::Eq {
        return actual == bound;
    }

    match actual.compare(bound) {
        Some(ordering) => match op {
            CompareOp::Lt => ordering == Ordering::Less,
            CompareOp::Le => ordering != Ordering::Greater,
            CompareOp::Gt => ordering == Ordering::Greater,
            CompareOp::Ge => ordering != Ordering::Less,
            CompareOp::Eq => ordering == Ordering::Equal,
        },
        None => false,
    }
}
