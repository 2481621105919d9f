//! Per-path leaf compilation
//!
//! Turns one property query (operator name -> operand) into the constraint
//! objects for a single field path. Fragments share one object unless
//! merging would overwrite a constraint.

use serde_json::{Map, Value};

use super::category::QueryCategory;
use super::errors::{QueryError, QueryResult};
use super::operator::{Operator, ONE_FULFILLS};
use super::tables;
use super::template::ELEM_MATCH;

/// Keys whose list values are concatenated when two operators emit them
const LIST_KEYS: [&str; 2] = ["$all", "$nin"];

/// Constraint objects on one path, all of which must hold
pub type Conjuncts = Vec<Map<String, Value>>;

/// Path under which the element query of an array path is spelled
pub fn element_path(path: &str) -> String {
    format!("{}.{}", path, ONE_FULFILLS)
}

/// Compiles property-query entries for `path` against its category.
///
/// Fragments are merged into one constraint object where they can be; a
/// fragment that would overwrite an earlier constraint opens a further
/// object instead, so the result holds one or more conjuncts.
///
/// On array categories the `one_fulfills` key holds a property query over a
/// single element; it is compiled with the element category and folded in
/// as an element-match envelope.
pub fn compile_property<'q, I>(
    path: &str,
    category: QueryCategory,
    entries: I,
) -> QueryResult<Conjuncts>
where
    I: IntoIterator<Item = (&'q String, &'q Value)>,
{
    let mut conjuncts = Conjuncts::new();

    for (key, operand) in entries {
        if key == ONE_FULFILLS {
            if let Some(element) = category.element() {
                let inner = operand.as_object().ok_or_else(|| {
                    QueryError::malformed(
                        &element_path(path),
                        "element query must be an object of operators",
                    )
                })?;
                for envelope in compile_element_query(path, element, inner)? {
                    fold_fragment(&mut conjuncts, envelope);
                }
                continue;
            }
        }

        let template = key
            .parse::<Operator>()
            .ok()
            .and_then(|op| tables::lookup(category, op))
            .ok_or_else(|| QueryError::unknown_operator(path, category, key.as_str()))?;
        tracing::trace!(path, category = %category, operator = %key, "operator translated");

        if let Value::Object(fragment) = template.substitute(operand) {
            fold_fragment(&mut conjuncts, fragment);
        }
    }

    Ok(conjuncts)
}

/// Compiles the element query of an array path into element-match envelopes
pub fn compile_element_query(
    path: &str,
    element: QueryCategory,
    inner: &Map<String, Value>,
) -> QueryResult<Conjuncts> {
    let envelopes = compile_property(&element_path(path), element, inner)?
        .into_iter()
        .map(|body| {
            let mut envelope = Map::new();
            envelope.insert(ELEM_MATCH.to_string(), Value::Object(body));
            envelope
        })
        .collect();
    Ok(envelopes)
}

/// Folds a fragment into the first conjunct that takes it whole, opening a
/// new conjunct when none does.
pub fn fold_fragment(conjuncts: &mut Conjuncts, fragment: Map<String, Value>) {
    let mut pending = fragment;
    for target in conjuncts.iter_mut() {
        match merge_constraints(target, pending) {
            Ok(()) => return,
            Err(rejected) => pending = rejected,
        }
    }
    conjuncts.push(pending);
}

/// Merges a compiled fragment into the constraints of the same path.
///
/// - `$elemMatch` bodies are unioned when their keys are disjoint
/// - `$all` / `$nin` lists are concatenated
/// - new keys are added
///
/// Any other overlap would drop a constraint, so the fragment is handed
/// back untouched.
pub fn merge_constraints(
    target: &mut Map<String, Value>,
    fragment: Map<String, Value>,
) -> Result<(), Map<String, Value>> {
    let clash = fragment
        .iter()
        .any(|(key, incoming)| collides(key, target.get(key), incoming));
    if clash {
        return Err(fragment);
    }

    for (key, incoming) in fragment {
        if let Some(existing) = target.get_mut(&key) {
            combine(existing, incoming);
        } else {
            target.insert(key, incoming);
        }
    }
    Ok(())
}

fn combine(existing: &mut Value, incoming: Value) {
    match (existing, incoming) {
        (Value::Object(into), Value::Object(from)) => into.extend(from),
        (Value::Array(into), Value::Array(from)) => into.extend(from),
        (slot, other) => *slot = other,
    }
}

fn collides(key: &str, existing: Option<&Value>, incoming: &Value) -> bool {
    match (existing, incoming) {
        (None, _) => false,
        (Some(Value::Object(body)), Value::Object(other)) if key == ELEM_MATCH => {
            other.keys().any(|inner| body.contains_key(inner))
        }
        (Some(Value::Array(_)), Value::Array(_)) => !LIST_KEYS.contains(&key),
        _ => true,
    }
}
