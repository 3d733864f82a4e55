//! Composable matchers for composite values.
//!
//! Each matcher compares a candidate with an expected value and, on failure,
//! reports only the first mismatch it found: which property, which position,
//! which nested member, and what was expected versus found. A matcher
//! remembers its last evaluation, so describing a mismatch right after
//! `matches` reports the same failure without comparing again.
//!
//! ## Modules
//!
//! - [`matcher`] - The matcher protocol and basic value matchers
//! - [`description`] - Description sink and rendering helpers
//! - [`cache`] - Memo of the last evaluation, keyed by candidate identity
//! - [`members`] - Normalization of collections, maps and iterators
//! - [`function`] - Matching a value derived from the candidate
//! - [`composite`] - Ordered named expectations about one value
//! - [`contains`] - Order-insensitive collection matching
//! - [`lists`] - Order-sensitive collection matching
//! - [`lists_matching`] - Positional matching with member delegates only
//! - [`entries`] - Map entry matching
//! - [`composites`] - Constructors and assertion helpers
//! - [`expected_failure`] - Asserting that an action fails
//! - [`config`] - Rendering configuration
//! - [`errors`] - Error types

pub mod cache;
pub mod composite;
pub mod composites;
pub mod config;
pub mod contains;
pub mod description;
pub mod entries;
pub mod errors;
pub mod expected_failure;
pub mod function;
pub mod kind;
pub mod lists;
pub mod lists_matching;
pub mod matcher;
pub mod members;

pub use cache::{Identity, MatchCache};
pub use composite::{CompositeBuilder, CompositeMatcher, Expectation};
pub use composites::{
    assert_that, assert_that_array, assert_that_iterator, check_that, contains_elements,
    contains_entries, contains_entries_matching, contains_entries_matching_keys, contains_members,
    contains_members_matching, lists_elements, lists_matching, lists_matching_with,
    lists_members, lists_members_matching, matches_function, visits_list, visits_members,
};
pub use config::DescribeConfig;
pub use contains::ContainsMembers;
pub use description::{description_of, mismatch_for, Description};
pub use entries::{entry_matcher, ContainsEntries};
pub use errors::{AssertionFailure, MatcherError, MatcherResult};
pub use expected_failure::{expect_failure, expect_failure_of, Caught, ExpectedFailure, Failure};
pub use function::{value_of, MatchesFunction, ValueOf};
pub use kind::Kind;
pub use lists::ListsMembers;
pub use lists_matching::ListsMatching;
pub use matcher::{
    equal_to, is_absent, is_present, of_kind, BoxedMatcher, Matcher, MemberSupplier,
    SelfDescribing,
};
pub use members::{visits, Entry, Layout, Members, Visits};
