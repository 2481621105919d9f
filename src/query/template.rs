//! Filter templates and placeholder substitution
//!
//! A template is a filter fragment in the store's native vocabulary whose
//! operand positions are typed placeholders. Placeholders are tree nodes of
//! their own, so no operand value can ever be mistaken for one.
//!
//! Templates are shared and never mutated; substitution always builds a
//! fresh value.

use serde_json::{Map, Value};

/// Element-match envelope key
pub const ELEM_MATCH: &str = "$elemMatch";

/// Operand slot kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    String,
    StringList,
    Number,
    NumberList,
    Boolean,
    BooleanList,
    Date,
    DateList,
    Object,
    /// List of objects; every element gets its own element-match envelope
    ObjectList,
}

impl Placeholder {
    /// Returns the slot name used when rendering templates
    pub fn as_str(&self) -> &'static str {
        match self {
            Placeholder::String => "string",
            Placeholder::StringList => "string[]",
            Placeholder::Number => "number",
            Placeholder::NumberList => "number[]",
            Placeholder::Boolean => "boolean",
            Placeholder::BooleanList => "boolean[]",
            Placeholder::Date => "date",
            Placeholder::DateList => "date[]",
            Placeholder::Object => "object",
            Placeholder::ObjectList => "object[]",
        }
    }
}

/// A filter fragment with typed operand slots
#[derive(Debug, Clone, PartialEq)]
pub enum Template {
    /// Constant copied verbatim into every output
    Literal(Value),
    /// Operand slot
    Placeholder(Placeholder),
    /// Document with ordered keys
    Object(Vec<(&'static str, Template)>),
    /// List of sub-templates
    Array(Vec<Template>),
}

impl Template {
    /// Single-key document `{ key: inner }`
    pub fn op(key: &'static str, inner: Template) -> Self {
        Template::Object(vec![(key, inner)])
    }

    /// Single-key document whose value is a slot
    pub fn slot(key: &'static str, placeholder: Placeholder) -> Self {
        Template::op(key, Template::Placeholder(placeholder))
    }

    /// Builds a filter fragment by replacing every slot with `operand`.
    ///
    /// An `ObjectList` slot becomes the operand list with each element
    /// wrapped as `{ "$elemMatch": element }`, in order. A non-list operand
    /// there is treated as a list of one.
    pub fn substitute(&self, operand: &Value) -> Value {
        match self {
            Template::Literal(value) => value.clone(),
            Template::Placeholder(Placeholder::ObjectList) => wrap_each(operand),
            Template::Placeholder(_) => operand.clone(),
            Template::Object(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(key, inner)| (key.to_string(), inner.substitute(operand)))
                    .collect(),
            ),
            Template::Array(items) => {
                Value::Array(items.iter().map(|item| item.substitute(operand)).collect())
            }
        }
    }

    /// Renders the template with slots shown as `"<kind>"` strings
    pub fn render(&self) -> Value {
        match self {
            Template::Literal(value) => value.clone(),
            Template::Placeholder(placeholder) => {
                Value::String(format!("<{}>", placeholder.as_str()))
            }
            Template::Object(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(key, inner)| (key.to_string(), inner.render()))
                    .collect(),
            ),
            Template::Array(items) => Value::Array(items.iter().map(Template::render).collect()),
        }
    }
}

fn wrap_each(operand: &Value) -> Value {
    let envelope = |element: &Value| {
        let mut map = Map::new();
        map.insert(ELEM_MATCH.to_string(), element.clone());
        Value::Object(map)
    };

    match operand {
        Value::Array(elements) => Value::Array(elements.iter().map(envelope).collect()),
        other => Value::Array(vec![envelope(other)]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_substitute_scalar_slot() {
        let template = Template::slot("$gt", Placeholder::Number);
        assert_eq!(template.substitute(&json!(10)), json!({ "$gt": 10 }));
    }

    #[test]
    fn test_substitute_nested_slot() {
        let template = Template::op(
            ELEM_MATCH,
            Template::slot("$in", Placeholder::StringList),
        );
        assert_eq!(
            template.substitute(&json!(["a", "b"])),
            json!({ "$elemMatch": { "$in": ["a", "b"] } })
        );
    }

    #[test]
    fn test_substitute_inside_array() {
        let template = Template::op(
            "$all",
            Template::Array(vec![Template::Placeholder(Placeholder::String)]),
        );
        assert_eq!(template.substitute(&json!("x")), json!({ "$all": ["x"] }));
    }

    #[test]
    fn test_object_list_wraps_each_element() {
        let template = Template::slot("$eq", Placeholder::ObjectList);
        assert_eq!(
            template.substitute(&json!([{ "a": 1 }, { "b": 2 }])),
            json!({ "$eq": [{ "$elemMatch": { "a": 1 } }, { "$elemMatch": { "b": 2 } }] })
        );
    }

    #[test]
    fn test_object_list_single_operand() {
        let template = Template::slot("$all", Placeholder::ObjectList);
        assert_eq!(
            template.substitute(&json!({ "a": 1 })),
            json!({ "$all": [{ "$elemMatch": { "a": 1 } }] })
        );
    }

    #[test]
    fn test_literals_survive_substitution() {
        let template = Template::Object(vec![
            ("$exists", Template::Literal(json!(true))),
            ("$ne", Template::Placeholder(Placeholder::Boolean)),
        ]);
        assert_eq!(
            template.substitute(&json!(false)),
            json!({ "$exists": true, "$ne": false })
        );
    }

    #[test]
    fn test_operand_looking_like_slot_is_plain_data() {
        // A string that happens to read like a rendered slot is still an operand
        let template = Template::slot("$eq", Placeholder::String);
        assert_eq!(
            template.substitute(&json!("<string>")),
            json!({ "$eq": "<string>" })
        );
    }

    #[test]
    fn test_template_unchanged_after_substitution() {
        let template = Template::slot("$size", Placeholder::Number);
        let before = template.clone();
        let _ = template.substitute(&json!(3));
        assert_eq!(template, before);
    }

    #[test]
    fn test_render() {
        let template = Template::op(
            ELEM_MATCH,
            Template::slot("$regex", Placeholder::String),
        );
        assert_eq!(
            template.render(),
            json!({ "$elemMatch": { "$regex": "<string>" } })
        );
    }
}
