//! Matching the entries of a map.
//!
//! A map is compared as its entry set, using [`ContainsMembers`] named
//! `entry set`. Entry matchers are composites over `key` and `value`, so a
//! failing entry reads like any other composite:
//!
//! ```text
//! Map entry set containing 1=Drawing[Greens] matching value=...
//! ```

use crate::cache::MatchCache;
use crate::composite::CompositeBuilder;
use crate::config::DescribeConfig;
use crate::contains::{presence_mismatch, ContainsMembers};
use crate::description::{description_of, Description};
use crate::matcher::{equal_to, BoxedMatcher, Matcher, MemberSupplier, SelfDescribing};
use crate::members::{Entry, Layout, Members};
use std::fmt;
use std::rc::Rc;

struct EntriesVerdict<K, V> {
    entries: Vec<Entry<K, V>>,
    mismatch: Option<&'static str>,
    entries_failed: bool,
}

impl<K, V> EntriesVerdict<K, V> {
    fn mismatched(mismatch: &'static str) -> Self {
        Self {
            entries: Vec::new(),
            mismatch: Some(mismatch),
            entries_failed: false,
        }
    }
}

/// Matches a map with the same entries as the expected one.
pub struct ContainsEntries<K, V> {
    expected_len: Option<usize>,
    contains: ContainsMembers<Entry<K, V>>,
    cache: MatchCache<EntriesVerdict<K, V>>,
}

impl<K, V> ContainsEntries<K, V>
where
    K: PartialEq + Clone + fmt::Display + fmt::Debug + 'static,
    V: PartialEq + Clone + fmt::Display + fmt::Debug + 'static,
{
    pub fn of<M: Members<Entry<K, V>> + ?Sized>(expected: &M) -> Self {
        let entries = expected.layout().into_members();
        Self {
            expected_len: Some(entries.len()),
            contains: ContainsMembers::from_members(entries).named("entry set"),
            cache: MatchCache::new(),
        }
    }

    pub fn absent() -> Self {
        Self {
            expected_len: None,
            contains: ContainsMembers::absent().named("entry set"),
            cache: MatchCache::new(),
        }
    }

    /// Match each entry with the matcher supplied for its expected entry.
    pub fn matching(mut self, entry_supplier: MemberSupplier<Entry<K, V>>) -> Self {
        self.contains = self.contains.matching(entry_supplier);
        self
    }

    /// Match each value with the matcher supplied for its expected value.
    /// Keys are compared for equality.
    pub fn matching_values(self, value_supplier: MemberSupplier<V>) -> Self {
        let key_supplier: MemberSupplier<K> = Rc::new(|key: &K| equal_to(key));
        self.matching(entry_matcher(key_supplier, value_supplier))
    }

    pub fn with_config(mut self, config: DescribeConfig) -> Self {
        self.contains = self.contains.with_config(config);
        self
    }

    fn evaluate<M: Members<Entry<K, V>> + ?Sized>(&self, actual: Option<&M>) -> EntriesVerdict<K, V> {
        if let Some(mismatch) = presence_mismatch(self.expected_len, actual) {
            return EntriesVerdict::mismatched(mismatch);
        }
        let entries = match actual.map(<M as Members<Entry<K, V>>>::layout) {
            Some(Layout::Entries(entries)) => entries,
            Some(_) => return EntriesVerdict::mismatched("was not a Map"),
            None => {
                return EntriesVerdict {
                    entries: Vec::new(),
                    mismatch: None,
                    entries_failed: false,
                }
            }
        };

        let entries_failed = !self.contains.matches(Some(entries.as_slice()));
        EntriesVerdict {
            entries,
            mismatch: None,
            entries_failed,
        }
    }
}

impl<K, V> SelfDescribing for ContainsEntries<K, V> {
    fn describe_to(&self, description: &mut Description) {
        let expected_len = match self.expected_len {
            Some(len) => len,
            None => {
                description.append_text("null");
                return;
            }
        };

        let entries_failed = self
            .cache
            .current()
            .map(|verdict| verdict.entries_failed)
            .unwrap_or(false);
        if entries_failed {
            description.append_text("Map ").append_text(&description_of(&self.contains));
        } else {
            description.append_text(&format!("Map with {} entries", expected_len));
        }
    }
}

impl<K, V, M> Matcher<M> for ContainsEntries<K, V>
where
    K: PartialEq + Clone + fmt::Display + fmt::Debug + 'static,
    V: PartialEq + Clone + fmt::Display + fmt::Debug + 'static,
    M: Members<Entry<K, V>> + ?Sized,
{
    fn matches(&self, actual: Option<&M>) -> bool {
        let verdict = self.cache.refresh(actual, |actual| self.evaluate(actual));
        verdict.mismatch.is_none() && !verdict.entries_failed
    }

    fn describe_mismatch(&self, actual: Option<&M>, description: &mut Description) {
        let verdict = self.cache.evaluate(actual, |actual| self.evaluate(actual));
        if let Some(mismatch) = verdict.mismatch {
            description.append_text(mismatch);
        } else if verdict.entries_failed {
            self.contains
                .describe_mismatch(Some(verdict.entries.as_slice()), description);
        }
    }
}

/// Supplier of entry matchers: a composite of the `key` and `value`
/// matchers supplied for the expected entry.
pub fn entry_matcher<K, V>(
    key_supplier: MemberSupplier<K>,
    value_supplier: MemberSupplier<V>,
) -> MemberSupplier<Entry<K, V>>
where
    K: fmt::Display + fmt::Debug + 'static,
    V: fmt::Display + fmt::Debug + 'static,
{
    Rc::new(move |expected: &Entry<K, V>| -> BoxedMatcher<Entry<K, V>> {
        let key_supplier = Rc::clone(&key_supplier);
        let value_supplier = Rc::clone(&value_supplier);
        Box::new(
            CompositeBuilder::new(expected)
                .expect_value("key", |e: &Entry<K, V>| Some(&e.key), move |key: &K| {
                    key_supplier(key)
                })
                .expect_value("value", |e: &Entry<K, V>| Some(&e.value), move |value: &V| {
                    value_supplier(value)
                })
                .build(),
        )
    })
}
