//! Logical filter fragments and result ordering

use serde_json::{json, Value};

pub fn and<I: IntoIterator<Item = Value>>(values: I) -> Value {
    json!({ "$and": values.into_iter().collect::<Vec<Value>>() })
}

pub fn or<I: IntoIterator<Item = Value>>(values: I) -> Value {
    json!({ "$or": values.into_iter().collect::<Vec<Value>>() })
}

pub fn nor<I: IntoIterator<Item = Value>>(values: I) -> Value {
    json!({ "$nor": values.into_iter().collect::<Vec<Value>>() })
}

/// Negates an operator object
pub fn not(value: Value) -> Value {
    json!({ "$not": value })
}

/// Result ordering for [`sort_result`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    Ascending,
    Descending,
}

impl SortMode {
    /// Store-native direction: `1` ascending, `-1` descending
    pub fn direction(&self) -> i32 {
        match self {
            SortMode::Ascending => 1,
            SortMode::Descending => -1,
        }
    }
}

pub fn sort_result(mode: SortMode) -> Value {
    json!({ "sort": mode.direction() })
}
