//! Normalization of candidates into a stable list of members.
//!
//! Collection matchers never look at a candidate directly. They ask for its
//! [`Layout`], which is a closed set of shapes: a sequence of members, the
//! entries of a map, or something that has no members at all. Single-pass
//! iterators are drained once and remember what they visited.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;
use std::hash::BuildHasher;

/// The shape of a candidate, with its members in encounter order.
#[derive(Debug, Clone, PartialEq)]
pub enum Layout<T> {
    Sequence(Vec<T>),
    Entries(Vec<T>),
    /// Names the shape that could not be walked.
    Incompatible(&'static str),
}

impl<T> Layout<T> {
    /// Members of a sequence, if this is one.
    pub fn into_sequence(self) -> Option<Vec<T>> {
        match self {
            Layout::Sequence(members) => Some(members),
            _ => None,
        }
    }

    /// Entries of a map, if this is one.
    pub fn into_entries(self) -> Option<Vec<T>> {
        match self {
            Layout::Entries(entries) => Some(entries),
            _ => None,
        }
    }

    /// Members of either shape. An incompatible value has none.
    pub fn into_members(self) -> Vec<T> {
        match self {
            Layout::Sequence(members) | Layout::Entries(members) => members,
            Layout::Incompatible(_) => Vec::new(),
        }
    }
}

/// Values that can be normalized into members of type `T`.
pub trait Members<T> {
    fn layout(&self) -> Layout<T>;
}

impl<T: Clone> Members<T> for [T] {
    fn layout(&self) -> Layout<T> {
        Layout::Sequence(self.to_vec())
    }
}

impl<T: Clone, const N: usize> Members<T> for [T; N] {
    fn layout(&self) -> Layout<T> {
        Layout::Sequence(self.to_vec())
    }
}

impl<T: Clone> Members<T> for Vec<T> {
    fn layout(&self) -> Layout<T> {
        Layout::Sequence(self.clone())
    }
}

impl<T: Clone> Members<T> for VecDeque<T> {
    fn layout(&self) -> Layout<T> {
        Layout::Sequence(self.iter().cloned().collect())
    }
}

impl<T: Clone> Members<T> for BTreeSet<T> {
    fn layout(&self) -> Layout<T> {
        Layout::Sequence(self.iter().cloned().collect())
    }
}

impl<T: Clone, S: BuildHasher> Members<T> for HashSet<T, S> {
    fn layout(&self) -> Layout<T> {
        Layout::Sequence(self.iter().cloned().collect())
    }
}

impl<K: Clone, V: Clone> Members<Entry<K, V>> for BTreeMap<K, V> {
    fn layout(&self) -> Layout<Entry<K, V>> {
        Layout::Entries(self.iter().map(|(k, v)| Entry::new(k.clone(), v.clone())).collect())
    }
}

impl<K: Clone, V: Clone, S: BuildHasher> Members<Entry<K, V>> for HashMap<K, V, S> {
    fn layout(&self) -> Layout<Entry<K, V>> {
        Layout::Entries(self.iter().map(|(k, v)| Entry::new(k.clone(), v.clone())).collect())
    }
}

impl<T> Members<T> for str {
    fn layout(&self) -> Layout<T> {
        Layout::Incompatible("str")
    }
}

impl<T> Members<T> for String {
    fn layout(&self) -> Layout<T> {
        Layout::Incompatible("String")
    }
}

/// One key-value pair of a map.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Entry<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> Entry<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for Entry<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// A single-pass iterator presented as a collection.
///
/// The iterator is drained the first time the value is normalized. The
/// drained members are kept, so every later normalization sees the same
/// list and a matcher can be asked about the same `Visits` repeatedly.
pub struct Visits<I: Iterator> {
    state: RefCell<VisitState<I>>,
}

enum VisitState<I: Iterator> {
    Pending(I),
    Drained(Vec<I::Item>),
}

impl<I: Iterator> Visits<I> {
    pub fn new(source: I) -> Self {
        Self {
            state: RefCell::new(VisitState::Pending(source)),
        }
    }

    /// Whether the iterator has already been drained.
    pub fn is_consumed(&self) -> bool {
        matches!(*self.state.borrow(), VisitState::Drained(_))
    }
}

impl<I> Members<I::Item> for Visits<I>
where
    I: Iterator,
    I::Item: Clone,
{
    fn layout(&self) -> Layout<I::Item> {
        let mut state = self.state.borrow_mut();
        if let VisitState::Pending(source) = &mut *state {
            let members = source.collect();
            *state = VisitState::Drained(members);
        }
        match &*state {
            VisitState::Drained(members) => Layout::Sequence(members.clone()),
            VisitState::Pending(_) => Layout::Sequence(Vec::new()),
        }
    }
}

impl<I: Iterator> fmt::Debug for Visits<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.is_consumed() { "consumed" } else { "pending" };
        f.debug_struct("Visits").field("state", &state).finish()
    }
}

/// Wrap an iterator so it can be matched as a candidate.
pub fn visits<I: IntoIterator>(source: I) -> Visits<I::IntoIter> {
    Visits::new(source.into_iter())
}
