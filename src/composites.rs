//! Constructors for the collection matchers and the assertion helpers.
//!
//! Matchers built from a container accept any candidate collection with the
//! same member type, and the constructors also serve as result suppliers in
//! composite declarations:
//!
//! ```
//! use composite_matchers::{assert_that, contains_members, equal_to, value_of, CompositeBuilder};
//! use std::fmt;
//!
//! struct Palette {
//!     name: String,
//!     colors: Vec<String>,
//! }
//!
//! impl fmt::Display for Palette {
//!     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
//!         write!(f, "Palette[{}]", self.name)
//!     }
//! }
//!
//! let expected = Palette { name: "Warm".into(), colors: vec!["Red".into(), "Orange".into()] };
//! let actual = Palette { name: "Warm".into(), colors: vec!["Orange".into(), "Red".into()] };
//!
//! let matcher = CompositeBuilder::new(&expected)
//!     .expect_that(value_of("name", |p: &Palette| Some(p.name.as_str())).matches(equal_to))
//!     .expect_that(value_of("colors", |p: &Palette| Some(&p.colors)).matches(contains_members))
//!     .build();
//!
//! assert_that("Palette", Some(&actual), &matcher);
//! ```

use crate::contains::ContainsMembers;
use crate::description::Description;
use crate::entries::{entry_matcher, ContainsEntries};
use crate::errors::{AssertionFailure, MatcherResult};
use crate::function::MatchesFunction;
use crate::lists::ListsMembers;
use crate::lists_matching::ListsMatching;
use crate::matcher::{BoxedMatcher, Matcher, MemberSupplier};
use crate::members::{visits, Entry, Members, Visits};
use std::fmt;
use std::rc::Rc;

/// Same members as `expected`, in any order.
pub fn contains_members<T, C>(expected: &C) -> ContainsMembers<T>
where
    T: PartialEq + Clone + fmt::Display,
    C: Members<T> + ?Sized,
{
    ContainsMembers::of(expected)
}

/// Result supplier for [`contains_members`] that also applies a member
/// matcher to each member.
pub fn contains_members_matching<T, C, S>(member_supplier: S) -> impl Fn(&C) -> BoxedMatcher<C>
where
    T: PartialEq + Clone + fmt::Display + 'static,
    C: Members<T> + ?Sized + 'static,
    S: Fn(&T) -> BoxedMatcher<T> + 'static,
{
    let member_supplier: MemberSupplier<T> = Rc::new(member_supplier);
    move |expected: &C| -> BoxedMatcher<C> {
        Box::new(ContainsMembers::of(expected).matching(Rc::clone(&member_supplier)))
    }
}

/// Same members as the `expected` array, in any order.
pub fn contains_elements<T>(expected: &[T]) -> ContainsMembers<T>
where
    T: PartialEq + Clone + fmt::Display,
{
    ContainsMembers::from_members(expected.to_vec())
}

/// Same members as those the `expected` iterator visits, in any order.
pub fn visits_members<I>(expected: I) -> ContainsMembers<I::Item>
where
    I: IntoIterator,
    I::Item: PartialEq + Clone + fmt::Display,
{
    ContainsMembers::from_members(expected.into_iter().collect())
}

/// Same members as `expected`, in the same order.
pub fn lists_members<T, C>(expected: &C) -> ListsMembers<T>
where
    T: PartialEq + Clone + fmt::Display,
    C: Members<T> + ?Sized,
{
    ListsMembers::of(expected)
}

/// Result supplier for [`lists_members`] that also applies a member matcher
/// at each position.
pub fn lists_members_matching<T, C, S>(member_supplier: S) -> impl Fn(&C) -> BoxedMatcher<C>
where
    T: PartialEq + Clone + fmt::Display + 'static,
    C: Members<T> + ?Sized + 'static,
    S: Fn(&T) -> BoxedMatcher<T> + 'static,
{
    let member_supplier: MemberSupplier<T> = Rc::new(member_supplier);
    move |expected: &C| -> BoxedMatcher<C> {
        Box::new(ListsMembers::of(expected).matching(Rc::clone(&member_supplier)))
    }
}

/// Same members as the `expected` array, in the same order.
pub fn lists_elements<T>(expected: &[T]) -> ListsMembers<T>
where
    T: PartialEq + Clone + fmt::Display,
{
    ListsMembers::from_members(expected.to_vec())
}

/// Same members as those the `expected` iterator visits, in the same order.
pub fn visits_list<I>(expected: I) -> ListsMembers<I::Item>
where
    I: IntoIterator,
    I::Item: PartialEq + Clone + fmt::Display,
{
    ListsMembers::from_members(expected.into_iter().collect())
}

/// Each member matches the matcher supplied for the expected member at the
/// same position.
pub fn lists_matching<T, C, S>(expected: &C, member_supplier: S) -> ListsMatching<T>
where
    T: Clone + fmt::Display,
    C: Members<T> + ?Sized,
    S: Fn(&T) -> BoxedMatcher<T> + 'static,
{
    ListsMatching::of(expected, Rc::new(member_supplier))
}

/// Result supplier for [`lists_matching`].
pub fn lists_matching_with<T, C, S>(member_supplier: S) -> impl Fn(&C) -> BoxedMatcher<C>
where
    T: Clone + fmt::Display + 'static,
    C: Members<T> + ?Sized + 'static,
    S: Fn(&T) -> BoxedMatcher<T> + 'static,
{
    let member_supplier: MemberSupplier<T> = Rc::new(member_supplier);
    move |expected: &C| -> BoxedMatcher<C> {
        Box::new(ListsMatching::of(expected, Rc::clone(&member_supplier)))
    }
}

/// Same entries as the `expected` map.
pub fn contains_entries<K, V, M>(expected: &M) -> ContainsEntries<K, V>
where
    K: PartialEq + Clone + fmt::Display + fmt::Debug + 'static,
    V: PartialEq + Clone + fmt::Display + fmt::Debug + 'static,
    M: Members<Entry<K, V>> + ?Sized,
{
    ContainsEntries::of(expected)
}

/// Result supplier for [`contains_entries`] that also applies a value
/// matcher to each entry. Keys are compared for equality.
pub fn contains_entries_matching<K, V, M, S>(value_supplier: S) -> impl Fn(&M) -> BoxedMatcher<M>
where
    K: PartialEq + Clone + fmt::Display + fmt::Debug + 'static,
    V: PartialEq + Clone + fmt::Display + fmt::Debug + 'static,
    M: Members<Entry<K, V>> + ?Sized + 'static,
    S: Fn(&V) -> BoxedMatcher<V> + 'static,
{
    let value_supplier: MemberSupplier<V> = Rc::new(value_supplier);
    move |expected: &M| -> BoxedMatcher<M> {
        Box::new(ContainsEntries::of(expected).matching_values(Rc::clone(&value_supplier)))
    }
}

/// Result supplier for [`contains_entries`] that applies both a key matcher
/// and a value matcher to each entry.
pub fn contains_entries_matching_keys<K, V, M, SK, SV>(
    key_supplier: SK,
    value_supplier: SV,
) -> impl Fn(&M) -> BoxedMatcher<M>
where
    K: PartialEq + Clone + fmt::Display + fmt::Debug + 'static,
    V: PartialEq + Clone + fmt::Display + fmt::Debug + 'static,
    M: Members<Entry<K, V>> + ?Sized + 'static,
    SK: Fn(&K) -> BoxedMatcher<K> + 'static,
    SV: Fn(&V) -> BoxedMatcher<V> + 'static,
{
    let entry_supplier = entry_matcher(Rc::new(key_supplier), Rc::new(value_supplier));
    move |expected: &M| -> BoxedMatcher<M> {
        Box::new(ContainsEntries::of(expected).matching(Rc::clone(&entry_supplier)))
    }
}

/// Matcher for the value `function` derives from a candidate. See
/// [`MatchesFunction::new`].
pub fn matches_function<T, R, F, S, M>(
    name: impl Into<String>,
    function: F,
    source: Option<&T>,
    supplier: S,
) -> MatcherResult<MatchesFunction<T, R>>
where
    T: ?Sized,
    R: ?Sized + fmt::Debug + 'static,
    F: for<'a> Fn(&'a T) -> Option<&'a R> + 'static,
    S: FnOnce(&R) -> M,
    M: Matcher<R> + 'static,
{
    MatchesFunction::new(name, function, source, supplier)
}

/// Check `actual` against `matcher`, producing the failure message on a
/// mismatch.
pub fn check_that<T, M>(reason: &str, actual: Option<&T>, matcher: &M) -> Result<(), AssertionFailure>
where
    T: ?Sized,
    M: Matcher<T> + ?Sized,
{
    if matcher.matches(actual) {
        return Ok(());
    }

    let mut description = Description::new();
    description
        .append_text(reason)
        .append_text("\nExpected: ")
        .append_description_of(matcher)
        .append_text("\n     but: ");
    matcher.describe_mismatch(actual, &mut description);
    Err(AssertionFailure::new(description.into_string()))
}

/// Panic with the failure message if `actual` does not match.
pub fn assert_that<T, M>(reason: &str, actual: Option<&T>, matcher: &M)
where
    T: ?Sized,
    M: Matcher<T> + ?Sized,
{
    if let Err(failure) = check_that(reason, actual, matcher) {
        panic!("{}", failure);
    }
}

/// [`assert_that`] for an array candidate.
pub fn assert_that_array<T, M>(reason: &str, actual: &[T], matcher: &M)
where
    M: Matcher<[T]> + ?Sized,
{
    assert_that(reason, Some(actual), matcher);
}

/// [`assert_that`] for an iterator candidate, which is drained once.
pub fn assert_that_iterator<I, M>(reason: &str, actual: I, matcher: &M)
where
    I: IntoIterator,
    M: Matcher<Visits<I::IntoIter>> + ?Sized,
{
    let actual = visits(actual);
    assert_that(reason, Some(&actual), matcher);
}
