//! Positional matching with member delegates only.

use crate::cache::MatchCache;
use crate::config::DescribeConfig;
use crate::contains::{first_member_mismatch, presence_mismatch, SequenceVerdict};
use crate::description::{join_members, Description};
use crate::matcher::{Matcher, MemberSupplier, SelfDescribing};
use crate::members::{Layout, Members};
use std::fmt;
use tracing::debug;

/// Matches each candidate member with the matcher supplied for the expected
/// member at the same position. No equality is involved, so a wrong order is
/// reported the same way as wrong content: as the first position that fails.
///
/// When every shared position matches, extra members on either side are
/// reported along with the position where they start.
pub struct ListsMatching<T> {
    expected: Option<Vec<T>>,
    member_supplier: MemberSupplier<T>,
    config: DescribeConfig,
    cache: MatchCache<SequenceVerdict<T>>,
}

impl<T> ListsMatching<T>
where
    T: Clone + fmt::Display,
{
    pub fn of<C: Members<T> + ?Sized>(expected: &C, member_supplier: MemberSupplier<T>) -> Self {
        Self::from_members(expected.layout().into_members(), member_supplier)
    }

    pub fn from_members(expected: Vec<T>, member_supplier: MemberSupplier<T>) -> Self {
        Self::with_expected(Some(expected), member_supplier)
    }

    /// Expect an absent sequence. The supplier is never invoked.
    pub fn absent(member_supplier: MemberSupplier<T>) -> Self {
        Self::with_expected(None, member_supplier)
    }

    fn with_expected(expected: Option<Vec<T>>, member_supplier: MemberSupplier<T>) -> Self {
        Self {
            expected,
            member_supplier,
            config: DescribeConfig::standard(),
            cache: MatchCache::new(),
        }
    }

    pub fn with_config(mut self, config: DescribeConfig) -> Self {
        self.config = config;
        self
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

        let shared = expected.len().min(members.len());
        let pairs = expected
            .iter()
            .zip(&members)
            .enumerate()
            .map(|(index, (expected, member))| (index, expected, member));
        let member_mismatch = first_member_mismatch(pairs, &self.member_supplier);

        let mismatch = if member_mismatch.is_some() {
            None
        } else if expected.len() > shared {
            let missing = &expected[shared..];
            Some(format!(
                "was missing {} members=[{}] starting at position={}",
                missing.len(),
                join_members(missing, &self.config),
                shared
            ))
        } else if members.len() > shared {
            let unexpected = &members[shared..];
            Some(format!(
                "had {} unexpected members=[{}] starting at position={}",
                unexpected.len(),
                join_members(unexpected, &self.config),
                shared
            ))
        } else {
            None
        };
        if let Some(mismatch) = &mismatch {
            debug!(matcher = "ListsMatching", %mismatch, "lists mismatch");
        }

        SequenceVerdict {
            members,
            mismatch,
            member_mismatch,
        }
    }
}

impl<T> SelfDescribing for ListsMatching<T> {
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
                    .append_text(&format!("At position={}, ", member.index))
                    .append_description_of(&member.matcher);
            }
            None => {
                description.append_text(&format!("Sequence of {} members", expected.len()));
            }
        }
    }
}

impl<T, C> Matcher<C> for ListsMatching<T>
where
    T: Clone + fmt::Display,
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::description::{description_of, mismatch_for};
    use crate::matcher::{equal_to, BoxedMatcher};
    use std::cell::Cell;
    use std::rc::Rc;

    fn exact() -> MemberSupplier<&'static str> {
        Rc::new(|expected: &&'static str| equal_to(expected))
    }

    #[test]
    fn test_all_positions_match() {
        let matcher = ListsMatching::of(&["Red", "Green"], exact());
        assert!(matcher.matches(Some(&vec!["Red", "Green"])));
        assert_eq!(description_of(&matcher), "Sequence of 2 members");
    }

    #[test]
    fn test_first_failing_position() {
        let matcher = ListsMatching::of(&["Red", "Green", "Blue"], exact());
        let actual = vec!["Red", "Blue", "Green"];
        assert!(!matcher.matches(Some(&actual)));
        assert_eq!(description_of(&matcher), "At position=1, \"Green\"");
        assert_eq!(mismatch_for(&matcher, Some(&actual)), "was \"Blue\"");
    }

    #[test]
    fn test_missing_tail() {
        let matcher = ListsMatching::of(&["Red", "Green", "Blue"], exact());
        let actual = vec!["Red"];
        assert!(!matcher.matches(Some(&actual)));
        assert_eq!(description_of(&matcher), "Sequence of 3 members");
        assert_eq!(
            mismatch_for(&matcher, Some(&actual)),
            "was missing 2 members=[Green, Blue] starting at position=1"
        );
    }

    #[test]
    fn test_unexpected_tail() {
        let matcher = ListsMatching::of(&["Red"], exact());
        let actual = vec!["Red", "Green", "Blue"];
        assert!(!matcher.matches(Some(&actual)));
        assert_eq!(
            mismatch_for(&matcher, Some(&actual)),
            "had 2 unexpected members=[Green, Blue] starting at position=1"
        );
    }

    #[test]
    fn test_supplier_is_lazy() {
        let calls = Rc::new(Cell::new(0));
        let counted = Rc::clone(&calls);
        let supplier: MemberSupplier<&'static str> = Rc::new(move |expected: &&'static str| {
            counted.set(counted.get() + 1);
            equal_to(expected) as BoxedMatcher<&'static str>
        });

        let matcher = ListsMatching::of(&["Red", "Green", "Blue"], supplier);
        let actual = vec!["Yellow", "Green", "Blue"];
        assert!(!matcher.matches(Some(&actual)));
        assert_eq!(calls.get(), 1);

        mismatch_for(&matcher, Some(&actual));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_absent() {
        let absent = ListsMatching::absent(exact());
        let actual = vec!["Red"];
        assert!(absent.matches(None::<&Vec<&str>>));
        assert_eq!(description_of(&absent), "null");
        assert!(!absent.matches(Some(&actual)));
        assert_eq!(mismatch_for(&absent, Some(&actual)), "was not null");
    }
}
