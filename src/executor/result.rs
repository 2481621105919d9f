//! Result types for filter execution

use serde::Serialize;
use serde_json::Value;

/// One page of matching documents
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FindResult {
    /// Documents in result order, after offset and limit
    pub data: Vec<Value>,
    /// Number of matching documents before paging
    pub total: usize,
}

impl FindResult {
    /// Returns true if the page holds no documents
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of documents in the page
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns an iterator over the page's documents
    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.data.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_result() {
        let result = FindResult::default();
        assert!(result.is_empty());
        assert_eq!(result.len(), 0);
        assert_eq!(result.total, 0);
    }

    #[test]
    fn test_serialized_shape() {
        let result = FindResult {
            data: vec![json!({ "_id": "a" })],
            total: 4,
        };
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({ "data": [{ "_id": "a" }], "total": 4 })
        );
    }
}
