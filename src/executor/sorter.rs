//! Result sorting
//!
//! Sorts matched documents by a single field path, deterministically.

use std::cmp::Ordering;

use serde_json::Value;

use super::matcher::resolve;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Field and direction to sort results by
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    /// Dotted field path
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    /// Ascending sort on `field`
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    /// Descending sort on `field`
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Sorts result documents
pub struct ResultSorter;

impl ResultSorter {
    /// Sorts documents according to the sort specification.
    ///
    /// Sort is stable: documents with equal keys keep their input order.
    pub fn sort(documents: &mut [Value], spec: &SortSpec) {
        documents.sort_by(|a, b| {
            let ordering = Self::compare_values(
                resolve(a, &spec.field).first().copied(),
                resolve(b, &spec.field).first().copied(),
            );

            match spec.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
    }

    /// Compares two sort keys.
    ///
    /// Missing < null < bool < number < string < array < object; arrays and
    /// objects compare equal among themselves.
    fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
        let (a, b) = match (a, b) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(a), Some(b)) => (a, b),
        };

        let rank = |v: &Value| -> u8 {
            match v {
                Value::Null => 0,
                Value::Bool(_) => 1,
                Value::Number(_) => 2,
                Value::String(_) => 3,
                Value::Array(_) => 4,
                Value::Object(_) => 5,
            }
        };

        rank(a).cmp(&rank(b)).then_with(|| match (a, b) {
            (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
            (Value::Number(x), Value::Number(y)) => {
                let x = x.as_f64().unwrap_or(0.0);
                let y = y.as_f64().unwrap_or(0.0);
                x.partial_cmp(&y).unwrap_or(Ordering::Equal)
            }
            (Value::String(x), Value::String(y)) => x.cmp(y),
            _ => Ordering::Equal,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ids(docs: &[Value]) -> Vec<&str> {
        docs.iter().map(|d| d["_id"].as_str().unwrap()).collect()
    }

    #[test]
    fn test_sort_ascending_and_descending() {
        let mut docs = vec![
            json!({ "_id": "c", "age": 30 }),
            json!({ "_id": "a", "age": 20 }),
            json!({ "_id": "b", "age": 25 }),
        ];

        ResultSorter::sort(&mut docs, &SortSpec::asc("age"));
        assert_eq!(ids(&docs), vec!["a", "b", "c"]);

        ResultSorter::sort(&mut docs, &SortSpec::desc("age"));
        assert_eq!(ids(&docs), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_sort_stable() {
        let mut docs = vec![
            json!({ "_id": "a", "age": 25 }),
            json!({ "_id": "b", "age": 25 }),
            json!({ "_id": "c", "age": 25 }),
        ];

        ResultSorter::sort(&mut docs, &SortSpec::desc("age"));
        assert_eq!(ids(&docs), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_sort_nested_path_and_missing() {
        let mut docs = vec![
            json!({ "_id": "1", "address": { "city": "Porto" } }),
            json!({ "_id": "2" }),
            json!({ "_id": "3", "address": { "city": "Lisbon" } }),
        ];

        ResultSorter::sort(&mut docs, &SortSpec::asc("address.city"));
        assert_eq!(ids(&docs), vec!["2", "3", "1"]);
    }

    #[test]
    fn test_type_ordering() {
        let mut docs = vec![
            json!({ "_id": "s", "v": "x" }),
            json!({ "_id": "n", "v": 1 }),
            json!({ "_id": "z", "v": null }),
            json!({ "_id": "b", "v": true }),
        ];

        ResultSorter::sort(&mut docs, &SortSpec::asc("v"));
        assert_eq!(ids(&docs), vec!["z", "b", "n", "s"]);
    }
}
