//! Order-sensitive matching of collection members.

use crate::cache::MatchCache;
use crate::config::DescribeConfig;
use crate::contains::{first_member_mismatch, ContainsMembers, SequenceVerdict};
use crate::description::{mismatch_for, Description};
use crate::matcher::{Matcher, MemberSupplier, SelfDescribing};
use crate::members::{Layout, Members};
use std::fmt;
use tracing::debug;

/// Matches a sequence with the expected members in the expected order.
///
/// Membership is checked first, with the same report as
/// [`ContainsMembers`]. Only a candidate with the right members is then
/// checked position by position.
pub struct ListsMembers<T> {
    expected: Option<Vec<T>>,
    contains: ContainsMembers<T>,
    member_supplier: Option<MemberSupplier<T>>,
    cache: MatchCache<SequenceVerdict<T>>,
}

impl<T> ListsMembers<T>
where
    T: PartialEq + Clone + fmt::Display,
{
    pub fn of<C: Members<T> + ?Sized>(expected: &C) -> Self {
        Self::from_members(expected.layout().into_members())
    }

    pub fn from_members(expected: Vec<T>) -> Self {
        Self {
            contains: ContainsMembers::from_members(expected.clone()),
            expected: Some(expected),
            member_supplier: None,
            cache: MatchCache::new(),
        }
    }

    pub fn absent() -> Self {
        Self {
            expected: None,
            contains: ContainsMembers::absent(),
            member_supplier: None,
            cache: MatchCache::new(),
        }
    }

    /// Also match each member with the matcher supplied for the expected
    /// member at the same position.
    pub fn matching(mut self, member_supplier: MemberSupplier<T>) -> Self {
        self.member_supplier = Some(member_supplier);
        self
    }

    pub fn with_config(mut self, config: DescribeConfig) -> Self {
        self.contains = self.contains.with_config(config);
        self
    }

    fn evaluate<C: Members<T> + ?Sized>(&self, actual: Option<&C>) -> SequenceVerdict<T> {
        let members = match actual.map(<C as Members<T>>::layout) {
            None => None,
            Some(Layout::Sequence(members)) => Some(members),
            Some(_) => return SequenceVerdict::mismatched("was not an Iterable"),
        };

        if !self.contains.matches(members.as_deref()) {
            let mismatch = mismatch_for(&self.contains, members.as_deref());
            // The inner verdict refers to these members by address.
            return SequenceVerdict {
                members: members.unwrap_or_default(),
                mismatch: Some(mismatch),
                member_mismatch: None,
            };
        }

        let (expected, members) = match (&self.expected, members) {
            (Some(expected), Some(members)) => (expected, members),
            _ => return SequenceVerdict::new(Vec::new()),
        };

        let out_of_place = expected
            .iter()
            .zip(&members)
            .position(|(expected, member)| member != expected);
        if let Some(index) = out_of_place {
            let mismatch = format!(
                "at index={}, found {} instead of {}",
                index, members[index], expected[index]
            );
            debug!(matcher = "ListsMembers", %mismatch, "lists mismatch");
            return SequenceVerdict {
                members,
                mismatch: Some(mismatch),
                member_mismatch: None,
            };
        }

        let member_mismatch = self.member_supplier.as_ref().and_then(|supplier| {
            let pairs = expected
                .iter()
                .zip(&members)
                .enumerate()
                .map(|(index, (expected, member))| (index, expected, member));
            first_member_mismatch(pairs, supplier)
        });

        SequenceVerdict {
            members,
            mismatch: None,
            member_mismatch,
        }
    }
}

impl<T> SelfDescribing for ListsMembers<T> {
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
                    .append_text("Sequence containing ")
                    .append_description_of(&member.matcher);
            }
            None => {
                description.append_text(&format!("Sequence of {} members", expected.len()));
            }
        }
    }
}

impl<T, C> Matcher<C> for ListsMembers<T>
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
