//! # Raw filter builders
//!
//! Helpers that build store-native filter fragments directly, without a
//! schema. Fragments compose by nesting: a field condition is
//! `{ path: fragment }`, and logical builders take whole filter documents.

pub mod list;
pub mod logic;
pub mod query;

pub use list::{all_elements, contains_element_that, list_size_is};
pub use logic::{and, nor, not, or, sort_result, SortMode};
pub use query::{
    equal, exists, greater_or_equal_to, greater_than, is_none_of, is_one_of, lesser_or_equal_to,
    lesser_than, matches_regex, not_equal, RegexOptions,
};
