//! Single-value filter fragments

use serde_json::{json, Value};

pub fn equal(value: impl Into<Value>) -> Value {
    json!({ "$eq": value.into() })
}

pub fn not_equal(value: impl Into<Value>) -> Value {
    json!({ "$ne": value.into() })
}

pub fn greater_than(value: impl Into<Value>) -> Value {
    json!({ "$gt": value.into() })
}

pub fn greater_or_equal_to(value: impl Into<Value>) -> Value {
    json!({ "$gte": value.into() })
}

pub fn lesser_than(value: impl Into<Value>) -> Value {
    json!({ "$lt": value.into() })
}

pub fn lesser_or_equal_to(value: impl Into<Value>) -> Value {
    json!({ "$lte": value.into() })
}

/// Matches when the field equals any of `values`
pub fn is_one_of<I, V>(values: I) -> Value
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    json!({ "$in": values.into_iter().map(Into::into).collect::<Vec<Value>>() })
}

/// Matches when the field equals none of `values`
pub fn is_none_of<I, V>(values: I) -> Value
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    json!({ "$nin": values.into_iter().map(Into::into).collect::<Vec<Value>>() })
}

pub fn exists(exists: bool) -> Value {
    json!({ "$exists": exists })
}

/// Flags for [`matches_regex`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegexOptions {
    pub case_insensitive: bool,
    pub multiline: bool,
    pub dot_matches_newline: bool,
}

impl RegexOptions {
    /// Flag string in `i`, `m`, `s` order; `None` when no flag is set
    pub fn flags(&self) -> Option<String> {
        let flags: String = [
            (self.case_insensitive, 'i'),
            (self.multiline, 'm'),
            (self.dot_matches_newline, 's'),
        ]
        .into_iter()
        .filter_map(|(set, flag)| set.then_some(flag))
        .collect();

        (!flags.is_empty()).then_some(flags)
    }
}

/// Matches string fields against `regex`; `$options` is only emitted when a
/// flag is set
pub fn matches_regex(regex: &str, options: RegexOptions) -> Value {
    match options.flags() {
        Some(flags) => json!({ "$regex": regex, "$options": flags }),
        None => json!({ "$regex": regex }),
    }
}
