//! Operator translation tables
//!
//! One table per category, mapping abstract operators to filter templates.
//! Templates are built once, on first use, and shared by every compilation.
//!
//! The (category, operator) decision lives in a single exhaustive match, so
//! a new operator cannot be added without deciding where it is legal.

use indexmap::IndexMap;
use once_cell::sync::Lazy;

use super::category::QueryCategory;
use super::operator::Operator;
use super::template::{Placeholder, Template, ELEM_MATCH};

type Table = IndexMap<Operator, Template>;

static TABLES: Lazy<IndexMap<QueryCategory, Table>> = Lazy::new(|| {
    QueryCategory::ALL
        .into_iter()
        .map(|category| {
            let table = Operator::ALL
                .into_iter()
                .filter_map(|op| build_template(category, op).map(|template| (op, template)))
                .collect();
            (category, table)
        })
        .collect()
});

/// Returns the shared template for an operator on a category, if legal
pub fn lookup(category: QueryCategory, op: Operator) -> Option<&'static Template> {
    TABLES.get(&category).and_then(|table| table.get(&op))
}

/// Iterates over a category's table in operator declaration order
pub fn table(category: QueryCategory) -> impl Iterator<Item = (Operator, &'static Template)> {
    TABLES
        .get(&category)
        .into_iter()
        .flat_map(|table| table.iter().map(|(op, template)| (*op, template)))
}

fn value_slot(category: QueryCategory) -> Placeholder {
    match category.element().unwrap_or(category) {
        QueryCategory::String => Placeholder::String,
        QueryCategory::Number => Placeholder::Number,
        QueryCategory::Boolean => Placeholder::Boolean,
        QueryCategory::Date => Placeholder::Date,
        _ => Placeholder::Object,
    }
}

fn list_slot(category: QueryCategory) -> Placeholder {
    match category.element().unwrap_or(category) {
        QueryCategory::String => Placeholder::StringList,
        QueryCategory::Number => Placeholder::NumberList,
        QueryCategory::Boolean => Placeholder::BooleanList,
        QueryCategory::Date => Placeholder::DateList,
        _ => Placeholder::ObjectList,
    }
}

fn build_template(category: QueryCategory, op: Operator) -> Option<Template> {
    use QueryCategory as C;

    let scalar = !category.is_array();
    let ordered = matches!(category, C::Number | C::Date);
    let ordered_array = matches!(category, C::NumberArray | C::DateArray);
    let listable = matches!(category, C::String | C::Number | C::Date);

    let value = value_slot(category);
    let list = list_slot(category);

    match op {
        Operator::EqualTo => scalar.then(|| Template::slot("$eq", value)),
        Operator::NotEqualTo => scalar.then(|| Template::slot("$ne", value)),
        Operator::GreaterThan => ordered.then(|| Template::slot("$gt", value)),
        Operator::GreaterOrEqualTo => ordered.then(|| Template::slot("$gte", value)),
        Operator::LessThan => ordered.then(|| Template::slot("$lt", value)),
        Operator::LessOrEqualTo => ordered.then(|| Template::slot("$lte", value)),
        Operator::OneOf => listable.then(|| Template::slot("$in", list)),
        Operator::NotOneOf => listable.then(|| Template::slot("$nin", list)),
        Operator::Exists => Some(Template::slot("$exists", Placeholder::Boolean)),
        Operator::Regexp => {
            (category == C::String).then(|| Template::slot("$regex", Placeholder::String))
        }

        Operator::Contains => (!scalar).then(|| {
            let element = if category == C::ObjectArray {
                Template::op(ELEM_MATCH, Template::Placeholder(Placeholder::Object))
            } else {
                Template::Placeholder(value)
            };
            Template::op("$all", Template::Array(vec![element]))
        }),
        Operator::ContainsAll => (!scalar).then(|| Template::slot("$all", list)),
        Operator::IdenticalTo => (!scalar).then(|| Template::slot("$eq", list)),
        Operator::ContainsOneOf => {
            (!scalar).then(|| Template::op(ELEM_MATCH, Template::slot("$in", list)))
        }
        Operator::ContainsNoneOf => (!scalar).then(|| Template::slot("$nin", list)),
        Operator::NotContains => (!scalar).then(|| {
            Template::op("$nin", Template::Array(vec![Template::Placeholder(value)]))
        }),
        Operator::Size => (!scalar).then(|| Template::slot("$size", Placeholder::Number)),
        Operator::ContainsGreaterThan => {
            ordered_array.then(|| Template::op(ELEM_MATCH, Template::slot("$gt", value)))
        }
        Operator::ContainsGreaterOrEqualTo => {
            ordered_array.then(|| Template::op(ELEM_MATCH, Template::slot("$gte", value)))
        }
        Operator::ContainsLessThan => {
            ordered_array.then(|| Template::op(ELEM_MATCH, Template::slot("$lt", value)))
        }
        Operator::ContainsLessOrEqualTo => {
            ordered_array.then(|| Template::op(ELEM_MATCH, Template::slot("$lte", value)))
        }
        Operator::ContainsRegexp => (category == C::StringArray)
            .then(|| Template::op(ELEM_MATCH, Template::slot("$regex", Placeholder::String))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn names(category: QueryCategory) -> Vec<&'static str> {
        table(category).map(|(op, _)| op.as_str()).collect()
    }

    #[test]
    fn test_string_table() {
        assert_eq!(
            names(QueryCategory::String),
            vec!["equal_to", "not_equal_to", "one_of", "not_one_of", "exists", "regexp"]
        );
    }

    #[test]
    fn test_number_and_date_tables() {
        let expected = vec![
            "equal_to",
            "not_equal_to",
            "greater_than",
            "greater_or_equal_to",
            "less_than",
            "less_or_equal_to",
            "one_of",
            "not_one_of",
            "exists",
        ];
        assert_eq!(names(QueryCategory::Number), expected);
        assert_eq!(names(QueryCategory::Date), expected);
    }

    #[test]
    fn test_boolean_and_object_tables() {
        assert_eq!(
            names(QueryCategory::Boolean),
            vec!["equal_to", "not_equal_to", "exists"]
        );
        assert_eq!(
            names(QueryCategory::Object),
            vec!["equal_to", "not_equal_to", "exists"]
        );
    }

    #[test]
    fn test_array_tables() {
        let common = vec![
            "exists",
            "contains",
            "contains_all",
            "identical_to",
            "contains_one_of",
            "contains_none_of",
            "not_contains",
            "size",
        ];
        assert_eq!(names(QueryCategory::BooleanArray), common);
        assert_eq!(names(QueryCategory::ObjectArray), common);

        let mut strings = common.clone();
        strings.push("contains_regexp");
        assert_eq!(names(QueryCategory::StringArray), strings);

        let mut ordered = common.clone();
        ordered.extend([
            "contains_greater_than",
            "contains_greater_or_equal_to",
            "contains_less_than",
            "contains_less_or_equal_to",
        ]);
        assert_eq!(names(QueryCategory::NumberArray), ordered);
        assert_eq!(names(QueryCategory::DateArray), ordered);
    }

    #[test]
    fn test_rendered_templates() {
        let render = |category, op| lookup(category, op).map(Template::render);

        assert_eq!(
            render(QueryCategory::StringArray, Operator::Contains),
            Some(json!({ "$all": ["<string>"] }))
        );
        assert_eq!(
            render(QueryCategory::ObjectArray, Operator::Contains),
            Some(json!({ "$all": [{ "$elemMatch": "<object>" }] }))
        );
        assert_eq!(
            render(QueryCategory::ObjectArray, Operator::IdenticalTo),
            Some(json!({ "$eq": "<object[]>" }))
        );
        assert_eq!(
            render(QueryCategory::NumberArray, Operator::NotContains),
            Some(json!({ "$nin": ["<number>"] }))
        );
        assert_eq!(
            render(QueryCategory::DateArray, Operator::Size),
            Some(json!({ "$size": "<number>" }))
        );
        assert_eq!(
            render(QueryCategory::Number, Operator::Exists),
            Some(json!({ "$exists": "<boolean>" }))
        );
    }

    #[test]
    fn test_illegal_pairs() {
        assert!(lookup(QueryCategory::Boolean, Operator::GreaterThan).is_none());
        assert!(lookup(QueryCategory::Number, Operator::Regexp).is_none());
        assert!(lookup(QueryCategory::Number, Operator::Contains).is_none());
        assert!(lookup(QueryCategory::StringArray, Operator::EqualTo).is_none());
        assert!(lookup(QueryCategory::BooleanArray, Operator::ContainsGreaterThan).is_none());
        assert!(lookup(QueryCategory::NumberArray, Operator::ContainsRegexp).is_none());
    }

    #[test]
    fn test_lookup_returns_shared_instance() {
        let first = lookup(QueryCategory::Number, Operator::EqualTo).unwrap();
        let second = lookup(QueryCategory::Number, Operator::EqualTo).unwrap();
        assert!(std::ptr::eq(first, second));
    }
}
