//! Abstract query operators
//!
//! Operator names are the storage-agnostic vocabulary callers write in
//! queries. Which of them a path accepts depends on its category.

use std::fmt;
use std::str::FromStr;

/// Key under which an array path carries a query over its elements
pub const ONE_FULFILLS: &str = "one_fulfills";

/// Abstract operator names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operator {
    // Scalar comparisons
    EqualTo,
    NotEqualTo,
    GreaterThan,
    GreaterOrEqualTo,
    LessThan,
    LessOrEqualTo,
    OneOf,
    NotOneOf,
    Exists,
    Regexp,

    // Array operators
    Contains,
    ContainsAll,
    IdenticalTo,
    ContainsOneOf,
    ContainsNoneOf,
    NotContains,
    Size,
    ContainsGreaterThan,
    ContainsGreaterOrEqualTo,
    ContainsLessThan,
    ContainsLessOrEqualTo,
    ContainsRegexp,
}

impl Operator {
    /// Every operator, in declaration order
    pub const ALL: [Operator; 22] = [
        Operator::EqualTo,
        Operator::NotEqualTo,
        Operator::GreaterThan,
        Operator::GreaterOrEqualTo,
        Operator::LessThan,
        Operator::LessOrEqualTo,
        Operator::OneOf,
        Operator::NotOneOf,
        Operator::Exists,
        Operator::Regexp,
        Operator::Contains,
        Operator::ContainsAll,
        Operator::IdenticalTo,
        Operator::ContainsOneOf,
        Operator::ContainsNoneOf,
        Operator::NotContains,
        Operator::Size,
        Operator::ContainsGreaterThan,
        Operator::ContainsGreaterOrEqualTo,
        Operator::ContainsLessThan,
        Operator::ContainsLessOrEqualTo,
        Operator::ContainsRegexp,
    ];

    /// Returns the operator name as written in queries
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::EqualTo => "equal_to",
            Operator::NotEqualTo => "not_equal_to",
            Operator::GreaterThan => "greater_than",
            Operator::GreaterOrEqualTo => "greater_or_equal_to",
            Operator::LessThan => "less_than",
            Operator::LessOrEqualTo => "less_or_equal_to",
            Operator::OneOf => "one_of",
            Operator::NotOneOf => "not_one_of",
            Operator::Exists => "exists",
            Operator::Regexp => "regexp",
            Operator::Contains => "contains",
            Operator::ContainsAll => "contains_all",
            Operator::IdenticalTo => "identical_to",
            Operator::ContainsOneOf => "contains_one_of",
            Operator::ContainsNoneOf => "contains_none_of",
            Operator::NotContains => "not_contains",
            Operator::Size => "size",
            Operator::ContainsGreaterThan => "contains_greater_than",
            Operator::ContainsGreaterOrEqualTo => "contains_greater_or_equal_to",
            Operator::ContainsLessThan => "contains_less_than",
            Operator::ContainsLessOrEqualTo => "contains_less_or_equal_to",
            Operator::ContainsRegexp => "contains_regexp",
        }
    }
}

impl FromStr for Operator {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or(())
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Logical grouping keys accepted at a field path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Combinator {
    And,
    Or,
    /// Alias of `Or`
    Either,
}

impl Combinator {
    /// Returns the combinator key as written in queries
    pub fn key(&self) -> &'static str {
        match self {
            Combinator::And => "$and",
            Combinator::Or => "$or",
            Combinator::Either => "$either",
        }
    }

    /// Parses a query key into a combinator
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "$and" => Some(Combinator::And),
            "$or" => Some(Combinator::Or),
            "$either" => Some(Combinator::Either),
            _ => None,
        }
    }

    /// Returns true if this combinator hoists into the OR-group
    pub fn is_disjunction(&self) -> bool {
        matches!(self, Combinator::Or | Combinator::Either)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_names_round_trip() {
        for op in Operator::ALL {
            assert_eq!(op.as_str().parse::<Operator>(), Ok(op));
        }
    }

    #[test]
    fn test_unknown_operator_name() {
        assert!("between".parse::<Operator>().is_err());
        assert!(ONE_FULFILLS.parse::<Operator>().is_err());
        assert!("$eq".parse::<Operator>().is_err());
    }

    #[test]
    fn test_combinators() {
        assert_eq!(Combinator::from_key("$either"), Some(Combinator::Either));
        assert_eq!(Combinator::from_key("$nor"), None);
        assert!(Combinator::Either.is_disjunction());
        assert!(Combinator::Or.is_disjunction());
        assert!(!Combinator::And.is_disjunction());
        assert_eq!(Combinator::And.key(), "$and");
    }
}
