//! Order-insensitive matching of collection members.

use crate::cache::MatchCache;
use crate::config::DescribeConfig;
use crate::description::{join_members, Description};
use crate::matcher::{BoxedMatcher, Matcher, MemberSupplier, SelfDescribing};
use crate::members::{Layout, Members};
use std::fmt;
use tracing::debug;

/// A member delegate that rejected the candidate member at `index`.
pub(crate) struct MemberMismatch<T> {
    pub(crate) index: usize,
    pub(crate) matcher: BoxedMatcher<T>,
}

/// Outcome of evaluating a collection candidate.
///
/// Keeps the normalized members, so member delegates can be asked to describe
/// the exact member they rejected.
pub(crate) struct SequenceVerdict<T> {
    pub(crate) members: Vec<T>,
    pub(crate) mismatch: Option<String>,
    pub(crate) member_mismatch: Option<MemberMismatch<T>>,
}

impl<T> SequenceVerdict<T> {
    pub(crate) fn new(members: Vec<T>) -> Self {
        Self {
            members,
            mismatch: None,
            member_mismatch: None,
        }
    }

    pub(crate) fn mismatched(mismatch: impl Into<String>) -> Self {
        Self {
            members: Vec::new(),
            mismatch: Some(mismatch.into()),
            member_mismatch: None,
        }
    }

    pub(crate) fn is_match(&self) -> bool {
        self.mismatch.is_none() && self.member_mismatch.is_none()
    }

    pub(crate) fn describe_mismatch(&self, description: &mut Description) {
        if let Some(mismatch) = &self.mismatch {
            description.append_text(mismatch);
        } else if let Some(member) = &self.member_mismatch {
            member
                .matcher
                .describe_mismatch(self.members.get(member.index), description);
        }
    }
}

/// Mismatch text for exactly one absent side, if that is the case.
pub(crate) fn presence_mismatch<E, A>(expected: Option<E>, actual: Option<A>) -> Option<&'static str> {
    match (expected.is_some(), actual.is_some()) {
        (false, true) => Some("was not null"),
        (true, false) => Some("was null"),
        _ => None,
    }
}

/// First position whose member delegate rejects the candidate member.
/// Delegates are supplied lazily, one position at a time.
pub(crate) fn first_member_mismatch<'m, T, I>(
    pairs: I,
    supplier: &MemberSupplier<T>,
) -> Option<MemberMismatch<T>>
where
    T: 'm,
    I: IntoIterator<Item = (usize, &'m T, &'m T)>,
{
    pairs.into_iter().find_map(|(index, expected, actual)| {
        let matcher = supplier(expected);
        if matcher.matches(Some(actual)) {
            None
        } else {
            Some(MemberMismatch { index, matcher })
        }
    })
}

/// Matches a collection with the same members as the expected one, in any
/// order. Duplicates count: each expected member matches one candidate
/// member.
///
/// With a member supplier, each candidate member is then also checked by the
/// matcher supplied for its expected counterpart, and the first failure is
/// reported.
pub struct ContainsMembers<T> {
    name: String,
    expected: Option<Vec<T>>,
    member_supplier: Option<MemberSupplier<T>>,
    config: DescribeConfig,
    cache: MatchCache<SequenceVerdict<T>>,
}

impl<T> ContainsMembers<T>
where
    T: PartialEq + Clone + fmt::Display,
{
    /// Expect the members of `expected`.
    pub fn of<C: Members<T> + ?Sized>(expected: &C) -> Self {
        Self::from_members(expected.layout().into_members())
    }

    pub fn from_members(expected: Vec<T>) -> Self {
        Self::with_expected(Some(expected))
    }

    /// Expect an absent collection.
    pub fn absent() -> Self {
        Self::with_expected(None)
    }

    fn with_expected(expected: Option<Vec<T>>) -> Self {
        Self {
            name: "Iterable".to_string(),
            expected,
            member_supplier: None,
            config: DescribeConfig::standard(),
            cache: MatchCache::new(),
        }
    }

    /// Also match each member with the matcher supplied for its counterpart.
    pub fn matching(mut self, member_supplier: MemberSupplier<T>) -> Self {
        self.member_supplier = Some(member_supplier);
        self
    }

    /// Name of the collection used in descriptions.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_config(mut self, config: DescribeConfig) -> Self {
        self.config = config;
        self
    }

    /// Number of expected members, `None` if the collection is expected absent.
    pub fn expected_len(&self) -> Option<usize> {
        self.expected.as_ref().map(Vec::len)
    }

    fn evaluate<C: Members<T> + ?Sized>(&self, actual: Option<&C>) -> SequenceVerdict<T> {
        if let Some(mismatch) = presence_mismatch(self.expected.as_ref(), actual) {
            return SequenceVerdict::mismatched(mismatch);
        }
        let (expected, actual) = match (&self.expected, actual) {
            (Some(expected), Some(actual)) => (expected, actual),
            _ => return SequenceVerdict::new(Vec::new()),
        };
        let members = match actual.layout() {
            Layout::Sequence(members) => members,
            _ => return SequenceVerdict::mismatched("was not an Iterable"),
        };

        let mut unmatched: Vec<&T> = expected.iter().collect();
        let mut unexpected: Vec<&T> = Vec::new();
        for member in &members {
            match unmatched.iter().position(|e| *e == member) {
                Some(i) => {
                    unmatched.remove(i);
                }
                None => unexpected.push(member),
            }
        }

        let mut mismatches = Vec::new();
        if !unmatched.is_empty() {
            mismatches.push(format!(
                "was missing {} members=[{}]",
                unmatched.len(),
                join_members(&unmatched, &self.config)
            ));
        }
        if !unexpected.is_empty() {
            mismatches.push(format!(
                "had {} unexpected members=[{}]",
                unexpected.len(),
                join_members(&unexpected, &self.config)
            ));
        }
        if !mismatches.is_empty() {
            let mismatch = mismatches.join("\n     and: ");
            debug!(matcher = %self.name, %mismatch, "contains mismatch");
            return SequenceVerdict::mismatched(mismatch);
        }

        let member_mismatch = self.member_supplier.as_ref().and_then(|supplier| {
            let pairs = members.iter().enumerate().filter_map(|(index, member)| {
                expected
                    .iter()
                    .find(|e| *e == member)
                    .map(|counterpart| (index, counterpart, member))
            });
            first_member_mismatch(pairs, supplier)
        });

        SequenceVerdict {
            members,
            mismatch: None,
            member_mismatch,
        }
    }
}

impl<T> SelfDescribing for ContainsMembers<T> {
    fn describe_to(&self, description: &mut Description) {
        let expected = match &self.expected {
            Some(expected) => expected,
            None => {
                description.append_text("null");
                return;
            }
        };

        let verdict = self.cache.current().ok();
        match verdict.as_deref().and_then(|v| v.member_mismatch.as_ref()) {
            Some(member) => {
                description
                    .append_text(&self.name)
                    .append_text(" containing ")
                    .append_description_of(&member.matcher);
            }
            None => {
                description.append_text(&format!("{} with {} members", self.name, expected.len()));
            }
        }
    }
}

impl<T, C> Matcher<C> for ContainsMembers<T>
where
    T: PartialEq + Clone + fmt::Display,
    C: Members<T> + ?Sized,
{
    fn matches(&self, actual: Option<&C>) -> bool {
        self.cache
            .refresh(actual, |actual| self.evaluate(actual))
            .is_match()
    }

    fn describe_mismatch(&self, actual: Option<&C>, description: &mut Description) {
        self.cache
            .evaluate(actual, |actual| self.evaluate(actual))
            .describe_mismatch(description);
    }
}
