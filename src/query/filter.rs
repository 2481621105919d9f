//! Compiled filters and their assembly
//!
//! A compiled filter is an AND-group of field clauses and an OR-group of
//! alternatives. Its document form is `{ "$and": [...], "$or": [...] }`
//! with empty groups left out, so the empty query compiles to `{}`.

use std::collections::HashMap;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use super::leaf::{merge_constraints, Conjuncts};
use super::operator::Combinator;

/// Constraints on a single field path
#[derive(Debug, Clone, PartialEq)]
pub struct FieldClause {
    /// Dotted field path
    pub path: String,
    /// Store-native operator -> operand
    pub constraints: Map<String, Value>,
}

impl FieldClause {
    /// Create a new clause
    pub fn new(path: impl Into<String>, constraints: Map<String, Value>) -> Self {
        Self {
            path: path.into(),
            constraints,
        }
    }

    /// Returns the clause as `{ path: constraints }`
    pub fn to_document(&self) -> Value {
        let mut document = Map::new();
        document.insert(self.path.clone(), Value::Object(self.constraints.clone()));
        Value::Object(document)
    }
}

/// Output of a compilation, owned by the caller
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompiledFilter {
    and: Vec<FieldClause>,
    or: Vec<Vec<FieldClause>>,
}

impl CompiledFilter {
    /// Clauses that must all hold
    pub fn and_group(&self) -> &[FieldClause] {
        &self.and
    }

    /// Alternatives of which at least one must hold; the clauses of one
    /// alternative hold together
    pub fn or_group(&self) -> &[Vec<FieldClause>] {
        &self.or
    }

    /// Returns true if the filter matches every document
    pub fn is_empty(&self) -> bool {
        self.and.is_empty() && self.or.is_empty()
    }

    /// Returns the filter in the store's native document form
    pub fn to_document(&self) -> Value {
        let mut document = Map::new();
        if !self.and.is_empty() {
            document.insert(
                "$and".to_string(),
                Value::Array(self.and.iter().map(FieldClause::to_document).collect()),
            );
        }
        if !self.or.is_empty() {
            document.insert(
                "$or".to_string(),
                Value::Array(self.or.iter().map(|clauses| alternative(clauses)).collect()),
            );
        }
        Value::Object(document)
    }
}

fn alternative(clauses: &[FieldClause]) -> Value {
    match clauses {
        [single] => single.to_document(),
        _ => {
            let mut document = Map::new();
            document.insert(
                "$and".to_string(),
                Value::Array(clauses.iter().map(FieldClause::to_document).collect()),
            );
            Value::Object(document)
        }
    }
}

impl Serialize for CompiledFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_document().serialize(serializer)
    }
}

impl From<CompiledFilter> for Value {
    fn from(filter: CompiledFilter) -> Self {
        filter.to_document()
    }
}

/// Collects compiled clauses into a [`CompiledFilter`]
#[derive(Debug, Default)]
pub struct FilterAssembler {
    and: Vec<FieldClause>,
    or: Vec<Vec<FieldClause>>,
    /// Positions of each path's plain clauses in the AND-group
    plain: HashMap<String, Vec<usize>>,
}

impl FilterAssembler {
    /// Adds plain constraints for a path, merging into the first earlier
    /// plain clause on the same path that takes them without overwriting a
    /// constraint. Otherwise they open another clause for the path.
    pub fn push_plain(&mut self, path: &str, constraints: Map<String, Value>) {
        let indices = self.plain.entry(path.to_string()).or_default();
        let mut pending = constraints;
        for &index in indices.iter() {
            match merge_constraints(&mut self.and[index].constraints, pending) {
                Ok(()) => return,
                Err(rejected) => pending = rejected,
            }
        }

        indices.push(self.and.len());
        self.and.push(FieldClause::new(path, pending));
    }

    /// Adds one combinator item compiled for `path`, kept independent of
    /// every other clause
    pub fn hoist(&mut self, combinator: Combinator, path: &str, conjuncts: Conjuncts) {
        if conjuncts.is_empty() {
            return;
        }

        let clauses = conjuncts
            .into_iter()
            .map(|constraints| FieldClause::new(path, constraints));
        if combinator.is_disjunction() {
            self.or.push(clauses.collect());
        } else {
            self.and.extend(clauses);
        }
    }

    /// Finishes assembly
    pub fn finish(self) -> CompiledFilter {
        CompiledFilter {
            and: self.and,
            or: self.or,
        }
    }
}
