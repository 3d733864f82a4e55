//! The matcher protocol and the basic value matchers.
//!
//! A [`Matcher`] is built from an expected value and later asked about one
//! candidate at a time. `None` stands for an absent candidate. Every call to
//! `matches` evaluates the candidate afresh. Matchers that remember that
//! evaluation key it on the identity of the candidate reference, so
//! `describe_mismatch` with the same reference describes the evaluation that
//! produced the verdict.

use crate::description::Description;
use crate::kind::Kind;
use std::borrow::Borrow;
use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

/// Anything that can describe itself into a [`Description`].
pub trait SelfDescribing {
    /// Describe what is expected. After a failed evaluation, composite
    /// matchers narrow this to the point of failure.
    fn describe_to(&self, description: &mut Description);
}

/// Decides whether a candidate satisfies an expectation.
pub trait Matcher<T: ?Sized>: SelfDescribing {
    fn matches(&self, actual: Option<&T>) -> bool;

    /// Explain why `actual` failed. Meaningful only for the candidate most
    /// recently passed to [`Matcher::matches`].
    fn describe_mismatch(&self, actual: Option<&T>, description: &mut Description);
}

/// An owned, type-erased matcher.
pub type BoxedMatcher<T> = Box<dyn Matcher<T>>;

/// Supplies the matcher applied to a member, given its expected counterpart.
pub type MemberSupplier<T> = Rc<dyn Fn(&T) -> BoxedMatcher<T>>;

impl<S: SelfDescribing + ?Sized> SelfDescribing for Box<S> {
    fn describe_to(&self, description: &mut Description) {
        (**self).describe_to(description)
    }
}

impl<T: ?Sized, M: Matcher<T> + ?Sized> Matcher<T> for Box<M> {
    fn matches(&self, actual: Option<&T>) -> bool {
        (**self).matches(actual)
    }

    fn describe_mismatch(&self, actual: Option<&T>, description: &mut Description) {
        (**self).describe_mismatch(actual, description)
    }
}

/// Matches a value equal to the expected one.
pub struct EqualTo<R: ?Sized + ToOwned> {
    expected: R::Owned,
}

impl<R> EqualTo<R>
where
    R: ?Sized + ToOwned,
{
    pub fn new(expected: &R) -> Self {
        Self {
            expected: expected.to_owned(),
        }
    }

    fn expected(&self) -> &R {
        self.expected.borrow()
    }
}

impl<R> SelfDescribing for EqualTo<R>
where
    R: ?Sized + ToOwned + fmt::Debug,
{
    fn describe_to(&self, description: &mut Description) {
        description.append_value(self.expected());
    }
}

impl<R> Matcher<R> for EqualTo<R>
where
    R: ?Sized + ToOwned + PartialEq + fmt::Debug,
{
    fn matches(&self, actual: Option<&R>) -> bool {
        actual.map_or(false, |actual| self.expected() == actual)
    }

    fn describe_mismatch(&self, actual: Option<&R>, description: &mut Description) {
        match actual {
            Some(actual) => description.append_text("was ").append_value(actual),
            None => description.append_text("was null"),
        };
    }
}

/// Matcher for a value equal to `expected`. Usable directly as a supplier.
pub fn equal_to<R>(expected: &R) -> BoxedMatcher<R>
where
    R: ?Sized + ToOwned + PartialEq + fmt::Debug + 'static,
    R::Owned: 'static,
{
    Box::new(EqualTo::new(expected))
}

/// Matches only an absent value.
pub struct IsAbsent<R: ?Sized> {
    _marker: PhantomData<fn(&R)>,
}

impl<R: ?Sized> SelfDescribing for IsAbsent<R> {
    fn describe_to(&self, description: &mut Description) {
        description.append_text("null");
    }
}

impl<R: ?Sized + fmt::Debug> Matcher<R> for IsAbsent<R> {
    fn matches(&self, actual: Option<&R>) -> bool {
        actual.is_none()
    }

    fn describe_mismatch(&self, actual: Option<&R>, description: &mut Description) {
        if let Some(actual) = actual {
            description.append_text("was ").append_value(actual);
        }
    }
}

pub fn is_absent<R: ?Sized + fmt::Debug + 'static>() -> BoxedMatcher<R> {
    Box::new(IsAbsent {
        _marker: PhantomData,
    })
}

/// Matches any present value.
pub struct IsPresent<R: ?Sized> {
    _marker: PhantomData<fn(&R)>,
}

impl<R: ?Sized> SelfDescribing for IsPresent<R> {
    fn describe_to(&self, description: &mut Description) {
        description.append_text("not null");
    }
}

impl<R: ?Sized> Matcher<R> for IsPresent<R> {
    fn matches(&self, actual: Option<&R>) -> bool {
        actual.is_some()
    }

    fn describe_mismatch(&self, actual: Option<&R>, description: &mut Description) {
        if actual.is_none() {
            description.append_text("was null");
        }
    }
}

pub fn is_present<R: ?Sized + 'static>() -> BoxedMatcher<R> {
    Box::new(IsPresent {
        _marker: PhantomData,
    })
}

/// Matches a value of the given [`Kind`].
pub struct OfKind<T: ?Sized> {
    kind: &'static str,
    _marker: PhantomData<fn(&T)>,
}

impl<T: ?Sized> SelfDescribing for OfKind<T> {
    fn describe_to(&self, description: &mut Description) {
        description.append_text("an instance of ").append_text(self.kind);
    }
}

impl<T: Kind + ?Sized> Matcher<T> for OfKind<T> {
    fn matches(&self, actual: Option<&T>) -> bool {
        actual.map_or(false, |actual| actual.kind() == self.kind)
    }

    fn describe_mismatch(&self, actual: Option<&T>, description: &mut Description) {
        match actual {
            Some(actual) => description.append_text("was of kind ").append_text(actual.kind()),
            None => description.append_text("was null"),
        };
    }
}

pub fn of_kind<T: Kind + ?Sized + 'static>(kind: &'static str) -> BoxedMatcher<T> {
    Box::new(OfKind {
        kind,
        _marker: PhantomData,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::description::{description_of, mismatch_for};

    #[derive(Debug, PartialEq)]
    enum Token {
        Word(String),
        Number(i64),
    }

    impl Kind for Token {
        fn kind(&self) -> &'static str {
            match self {
                Token::Word(_) => "Word",
                Token::Number(_) => "Number",
            }
        }
    }

    #[test]
    fn test_equal_to_string() {
        let matcher = equal_to(&"Empty".to_string());
        assert!(matcher.matches(Some(&"Empty".to_string())));
        assert!(!matcher.matches(Some(&"Not Empty".to_string())));
        assert_eq!(description_of(&matcher), "\"Empty\"");
        assert_eq!(mismatch_for(&matcher, Some(&"Not Empty".to_string())), "was \"Not Empty\"");
    }

    #[test]
    fn test_equal_to_unsized() {
        let matcher = equal_to("Empty");
        assert!(matcher.matches(Some("Empty")));
        assert!(!matcher.matches(None::<&str>));
        assert_eq!(mismatch_for(&matcher, None::<&str>), "was null");
    }

    #[test]
    fn test_is_absent() {
        let matcher = is_absent::<str>();
        assert!(matcher.matches(None::<&str>));
        assert!(!matcher.matches(Some("Empty")));
        assert_eq!(description_of(&matcher), "null");
        assert_eq!(mismatch_for(&matcher, Some("Empty")), "was \"Empty\"");
    }

    #[test]
    fn test_is_present() {
        let matcher = is_present::<i32>();
        assert!(matcher.matches(Some(&1)));
        assert!(!matcher.matches(None::<&i32>));
        assert_eq!(description_of(&matcher), "not null");
        assert_eq!(mismatch_for(&matcher, None::<&i32>), "was null");
    }

    #[test]
    fn test_of_kind() {
        let matcher = of_kind::<Token>("Word");
        assert!(matcher.matches(Some(&Token::Word("shall".into()))));
        assert!(!matcher.matches(Some(&Token::Number(3))));
        assert_eq!(description_of(&matcher), "an instance of Word");
        assert_eq!(mismatch_for(&matcher, Some(&Token::Number(3))), "was of kind Number");
    }
}
