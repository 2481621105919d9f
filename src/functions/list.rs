//! Array filter fragments

use serde_json::{json, Map, Value};

/// Matches arrays holding at least one element that satisfies every rule.
///
/// Rule objects are unioned into a single element-match body; a later rule
/// replaces an earlier one on the same key.
pub fn contains_element_that<I>(rules: I) -> Value
where
    I: IntoIterator<Item = Value>,
{
    let mut body = Map::new();
    for rule in rules {
        if let Value::Object(entries) = rule {
            body.extend(entries);
        }
    }
    json!({ "$elemMatch": body })
}

/// Matches arrays holding every listed element
pub fn all_elements<I>(rules: I) -> Value
where
    I: IntoIterator<Item = Value>,
{
    json!({ "$all": rules.into_iter().collect::<Vec<Value>>() })
}

pub fn list_size_is(size: u64) -> Value {
    json!({ "$size": size })
}
