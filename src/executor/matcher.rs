//! Filter evaluation against JSON documents
//!
//! Evaluates store-native filter documents with document-store semantics:
//! dotted paths descend through arrays, comparison operators match a field
//! holding an array when any element matches, and a missing field only
//! satisfies negations, `$exists: false` and `$eq: null`.
//!
//! No type coercion: `"1"` never equals `1`, and ordering comparisons only
//! hold between two numbers or two strings.

use std::cmp::Ordering;

use regex::RegexBuilder;
use serde_json::{Map, Value};

use super::errors::{ExecutorError, ExecutorResult};
use crate::query::ELEM_MATCH;

/// Evaluates filter documents against documents
pub struct DocumentMatcher;

impl DocumentMatcher {
    /// Checks if a document satisfies a filter document
    pub fn matches(document: &Value, filter: &Value) -> ExecutorResult<bool> {
        let query = filter
            .as_object()
            .ok_or_else(|| ExecutorError::malformed("filter must be an object"))?;
        Self::matches_query(document, query)
    }

    fn matches_query(document: &Value, query: &Map<String, Value>) -> ExecutorResult<bool> {
        for (key, condition) in query {
            let matched = match key.as_str() {
                "$and" => {
                    let clauses = Self::clauses(key, condition)?;
                    !Self::any_clause(document, clauses, false)?
                }
                "$or" => Self::any_clause(document, Self::clauses(key, condition)?, true)?,
                "$nor" => !Self::any_clause(document, Self::clauses(key, condition)?, true)?,
                op if op.starts_with('$') => {
                    return Err(ExecutorError::UnknownOperator(op.to_string()))
                }
                path => {
                    let values = resolve(document, path);
                    Self::matches_condition(&values, condition)?
                }
            };

            if !matched {
                return Ok(false);
            }
        }

        Ok(true)
    }

    fn clauses<'f>(key: &str, condition: &'f Value) -> ExecutorResult<&'f [Value]> {
        match condition {
            Value::Array(clauses) if !clauses.is_empty() => Ok(clauses),
            _ => Err(ExecutorError::malformed(format!(
                "{} requires a non-empty list of filters",
                key
            ))),
        }
    }

    /// Returns true if any clause evaluates to `wanted`
    fn any_clause(document: &Value, clauses: &[Value], wanted: bool) -> ExecutorResult<bool> {
        for clause in clauses {
            if Self::matches(document, clause)? == wanted {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn matches_condition(values: &[&Value], condition: &Value) -> ExecutorResult<bool> {
        match condition {
            Value::Object(ops) if is_operator_object(ops) => {
                for (op, operand) in ops {
                    if !Self::apply(values, op, operand, ops)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            _ => Self::equals_any(values, condition),
        }
    }

    fn apply(
        values: &[&Value],
        op: &str,
        operand: &Value,
        siblings: &Map<String, Value>,
    ) -> ExecutorResult<bool> {
        match op {
            "$eq" => Self::equals_any(values, operand),
            "$ne" => Ok(!Self::equals_any(values, operand)?),
            "$gt" => Ok(compare_any(values, operand, |o| o == Ordering::Greater)),
            "$gte" => Ok(compare_any(values, operand, |o| o != Ordering::Less)),
            "$lt" => Ok(compare_any(values, operand, |o| o == Ordering::Less)),
            "$lte" => Ok(compare_any(values, operand, |o| o != Ordering::Greater)),
            "$in" => Self::in_list(values, op, operand),
            "$nin" => Ok(!Self::in_list(values, op, operand)?),
            "$exists" => match operand {
                Value::Bool(wanted) => Ok(!values.is_empty() == *wanted),
                _ => Err(ExecutorError::malformed("$exists requires a boolean")),
            },
            "$regex" => Self::regex_any(values, operand, siblings.get("$options")),
            "$options" if siblings.contains_key("$regex") => Ok(true),
            "$options" => Err(ExecutorError::malformed("$options requires $regex")),
            "$all" => Self::all(values, operand),
            "$elemMatch" => Self::elem_match(values, operand),
            "$size" => {
                let size = operand
                    .as_u64()
                    .ok_or_else(|| ExecutorError::malformed("$size requires a non-negative integer"))?;
                Ok(values
                    .iter()
                    .any(|value| matches!(value, Value::Array(items) if items.len() as u64 == size)))
            }
            "$not" => match operand {
                Value::Object(_) => Ok(!Self::matches_condition(values, operand)?),
                _ => Err(ExecutorError::malformed("$not requires an operator object")),
            },
            other => Err(ExecutorError::UnknownOperator(other.to_string())),
        }
    }

    fn equals_any(values: &[&Value], expected: &Value) -> ExecutorResult<bool> {
        if expected.is_null() && values.is_empty() {
            return Ok(true);
        }
        for &value in values {
            if Self::item_matches(value, expected)? {
                return Ok(true);
            }
            if let Value::Array(items) = value {
                for item in items {
                    if Self::item_matches(item, expected)? {
                        return Ok(true);
                    }
                }
            }
        }
        Ok(false)
    }

    /// Equality, where an expected `{ "$elemMatch": .. }` wrapper acts as a
    /// predicate on the actual value
    fn item_matches(actual: &Value, expected: &Value) -> ExecutorResult<bool> {
        if let Some(condition) = elem_match_wrapper(expected) {
            return Self::element_matches(actual, condition);
        }

        match (actual, expected) {
            (Value::Array(items), Value::Array(patterns)) => {
                if items.len() != patterns.len() {
                    return Ok(false);
                }
                for (item, pattern) in items.iter().zip(patterns) {
                    if !Self::item_matches(item, pattern)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            (Value::Number(a), Value::Number(b)) => Ok(a.as_f64() == b.as_f64()),
            _ => Ok(actual == expected),
        }
    }

    fn in_list(values: &[&Value], op: &str, operand: &Value) -> ExecutorResult<bool> {
        let list = operand
            .as_array()
            .ok_or_else(|| ExecutorError::malformed(format!("{} requires a list", op)))?;
        for expected in list {
            if Self::equals_any(values, expected)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn all(values: &[&Value], operand: &Value) -> ExecutorResult<bool> {
        let required = operand
            .as_array()
            .ok_or_else(|| ExecutorError::malformed("$all requires a list"))?;
        if required.is_empty() {
            return Ok(false);
        }

        for &value in values {
            let elements = match value {
                Value::Array(items) => items.as_slice(),
                other => std::slice::from_ref(other),
            };
            if Self::holds_all(elements, required)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn holds_all(elements: &[Value], required: &[Value]) -> ExecutorResult<bool> {
        'required: for expected in required {
            for element in elements {
                if Self::item_matches(element, expected)? {
                    continue 'required;
                }
            }
            return Ok(false);
        }
        Ok(true)
    }

    fn elem_match(values: &[&Value], condition: &Value) -> ExecutorResult<bool> {
        for &value in values {
            if let Value::Array(items) = value {
                for item in items {
                    if Self::element_matches(item, condition)? {
                        return Ok(true);
                    }
                }
            }
        }
        Ok(false)
    }

    /// Applies an `$elemMatch` body to one array element: operator bodies
    /// constrain the element itself, anything else is a query on the
    /// element as a sub-document.
    fn element_matches(element: &Value, condition: &Value) -> ExecutorResult<bool> {
        let body = condition
            .as_object()
            .ok_or_else(|| ExecutorError::malformed("$elemMatch requires an object"))?;

        if is_operator_object(body) && !body.keys().any(|key| is_logical(key)) {
            return Self::matches_condition(&[element], condition);
        }
        if element.is_object() {
            Self::matches_query(element, body)
        } else {
            Ok(false)
        }
    }

    fn regex_any(
        values: &[&Value],
        pattern: &Value,
        options: Option<&Value>,
    ) -> ExecutorResult<bool> {
        let pattern = pattern
            .as_str()
            .ok_or_else(|| ExecutorError::malformed("$regex requires a string"))?;
        let options = match options {
            None => "",
            Some(Value::String(flags)) => flags.as_str(),
            Some(_) => return Err(ExecutorError::malformed("$options requires a string")),
        };

        let mut builder = RegexBuilder::new(pattern);
        for flag in options.chars() {
            match flag {
                'i' => builder.case_insensitive(true),
                'm' => builder.multi_line(true),
                's' => builder.dot_matches_new_line(true),
                'x' => builder.ignore_whitespace(true),
                other => {
                    return Err(ExecutorError::invalid_regex(
                        pattern,
                        format!("unsupported option '{}'", other),
                    ))
                }
            };
        }
        let regex = builder
            .build()
            .map_err(|err| ExecutorError::invalid_regex(pattern, err))?;

        Ok(values.iter().any(|value| match value {
            Value::String(s) => regex.is_match(s),
            Value::Array(items) => items
                .iter()
                .any(|item| item.as_str().is_some_and(|s| regex.is_match(s))),
            _ => false,
        }))
    }
}

/// Resolves a dotted path to every value it reaches.
///
/// Arrays met mid-path are traversed: a numeric segment indexes into the
/// array, any other segment is looked up in each object element.
pub fn resolve<'d>(document: &'d Value, path: &str) -> Vec<&'d Value> {
    let segments: Vec<&str> = path.split('.').collect();
    let mut found = Vec::new();
    descend(document, &segments, &mut found);
    found
}

fn descend<'d>(value: &'d Value, segments: &[&str], found: &mut Vec<&'d Value>) {
    let Some((head, rest)) = segments.split_first() else {
        found.push(value);
        return;
    };

    match value {
        Value::Object(map) => {
            if let Some(child) = map.get(*head) {
                descend(child, rest, found);
            }
        }
        Value::Array(items) => {
            if let Ok(index) = head.parse::<usize>() {
                if let Some(item) = items.get(index) {
                    descend(item, rest, found);
                }
            } else {
                for item in items.iter().filter(|item| item.is_object()) {
                    descend(item, segments, found);
                }
            }
        }
        _ => {}
    }
}

fn is_operator_object(map: &Map<String, Value>) -> bool {
    !map.is_empty() && map.keys().all(|key| key.starts_with('$'))
}

fn is_logical(key: &str) -> bool {
    matches!(key, "$and" | "$or" | "$nor")
}

fn elem_match_wrapper(value: &Value) -> Option<&Value> {
    value
        .as_object()
        .filter(|map| map.len() == 1)
        .and_then(|map| map.get(ELEM_MATCH))
}

/// Ordering between two values of the same comparable type
fn compare(actual: &Value, bound: &Value) -> Option<Ordering> {
    match (actual, bound) {
        (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

fn compare_any(values: &[&Value], bound: &Value, accept: impl Fn(Ordering) -> bool) -> bool {
    let holds = |value: &Value| compare(value, bound).is_some_and(&accept);
    values.iter().any(|&value| {
        holds(value)
            || matches!(value, Value::Array(items) if items.iter().any(|item| holds(item)))
    })
}
