//! Matching a value derived from the candidate.
//!
//! A [`MatchesFunction`] is built from a name, an accessor and an expected
//! source. The accessor applied to the source gives the expected derived
//! value, and a supplier turns that value into the delegate matcher. When a
//! candidate arrives, the same accessor derives its value and the delegate
//! decides.

use crate::cache::MatchCache;
use crate::composite::Expectation;
use crate::description::{mismatch_for, Description};
use crate::errors::{MatcherError, MatcherResult};
use crate::kind::Kind;
use crate::matcher::{is_absent, BoxedMatcher, Matcher, SelfDescribing};
use std::fmt;

/// Derives a value from the candidate. `None` stands for an absent value.
pub type Accessor<T, R> = Box<dyn for<'a> Fn(&'a T) -> Option<&'a R>>;

/// The expected kind of the source, and how to read it from a candidate.
struct KindCheck<T: ?Sized> {
    expected: &'static str,
    kind_of: fn(&T) -> &'static str,
}

/// Matches the value an accessor derives from the candidate.
pub struct MatchesFunction<T: ?Sized, R: ?Sized> {
    name: String,
    accessor: Accessor<T, R>,
    kind_check: Option<KindCheck<T>>,
    delegate: BoxedMatcher<R>,
    cache: MatchCache<Option<String>>,
}

impl<T, R> MatchesFunction<T, R>
where
    T: ?Sized,
    R: ?Sized + fmt::Debug + 'static,
{
    /// Build from an expected source. Fails if the source is absent.
    pub fn new<F, S, M>(
        name: impl Into<String>,
        accessor: F,
        source: Option<&T>,
        supplier: S,
    ) -> MatcherResult<Self>
    where
        F: for<'a> Fn(&'a T) -> Option<&'a R> + 'static,
        S: FnOnce(&R) -> M,
        M: Matcher<R> + 'static,
    {
        let name = name.into();
        match source {
            Some(source) => Ok(Self::from_source(name, Box::new(accessor), None, source, supplier)),
            None => Err(MatcherError::AbsentSource { function: name }),
        }
    }

    /// Like [`MatchesFunction::new`], but a candidate must also have the
    /// kind of the source.
    pub fn new_of_kind<F, S, M>(
        name: impl Into<String>,
        accessor: F,
        source: Option<&T>,
        supplier: S,
    ) -> MatcherResult<Self>
    where
        T: Kind,
        F: for<'a> Fn(&'a T) -> Option<&'a R> + 'static,
        S: FnOnce(&R) -> M,
        M: Matcher<R> + 'static,
    {
        let name = name.into();
        match source {
            Some(source) => Ok(Self::from_source(
                name,
                Box::new(accessor),
                Some(<T as Kind>::kind as fn(&T) -> &'static str),
                source,
                supplier,
            )),
            None => Err(MatcherError::AbsentSource { function: name }),
        }
    }

    fn from_source<S, M>(
        name: String,
        accessor: Accessor<T, R>,
        kind_of: Option<fn(&T) -> &'static str>,
        source: &T,
        supplier: S,
    ) -> Self
    where
        S: FnOnce(&R) -> M,
        M: Matcher<R> + 'static,
    {
        let delegate: BoxedMatcher<R> = match accessor(source) {
            Some(expected) => Box::new(supplier(expected)),
            None => is_absent(),
        };
        let kind_check = kind_of.map(|kind_of| KindCheck {
            expected: kind_of(source),
            kind_of,
        });

        Self {
            name,
            accessor,
            kind_check,
            delegate,
            cache: MatchCache::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, actual: Option<&T>) -> Option<String> {
        let actual = match actual {
            Some(actual) => actual,
            None => return Some(format!("{} can't be derived from a null object", self.name)),
        };

        if let Some(check) = &self.kind_check {
            let found = (check.kind_of)(actual);
            if found != check.expected {
                return Some(format!(
                    "{} can't be derived from an object of kind={}",
                    self.name, found
                ));
            }
        }

        let derived = (self.accessor)(actual);
        if self.delegate.matches(derived) {
            None
        } else {
            Some(mismatch_for(&self.delegate, derived))
        }
    }
}

impl<T: ?Sized, R: ?Sized> SelfDescribing for MatchesFunction<T, R> {
    fn describe_to(&self, description: &mut Description) {
        description
            .append_text(&self.name)
            .append_text("=")
            .append_description_of(&self.delegate);
    }
}

impl<T, R> Matcher<T> for MatchesFunction<T, R>
where
    T: ?Sized,
    R: ?Sized + fmt::Debug + 'static,
{
    fn matches(&self, actual: Option<&T>) -> bool {
        self.cache
            .refresh(actual, |actual| self.evaluate(actual))
            .is_none()
    }

    fn describe_mismatch(&self, actual: Option<&T>, description: &mut Description) {
        let verdict = self.cache.evaluate(actual, |actual| self.evaluate(actual));
        if let Some(mismatch) = &*verdict {
            description.append_text(mismatch);
        }
    }
}

/// First stage of a function expectation: a named accessor waiting for the
/// supplier of its delegate.
pub struct ValueOf<T: ?Sized, R: ?Sized> {
    name: String,
    accessor: Accessor<T, R>,
    kind_of: Option<fn(&T) -> &'static str>,
}

impl<T, R> ValueOf<T, R>
where
    T: ?Sized + 'static,
    R: ?Sized + fmt::Debug + 'static,
{
    /// Complete the expectation. The supplier receives the value derived
    /// from the expected source and is invoked only if that value is present.
    pub fn matches<S, M>(self, supplier: S) -> Expectation<T>
    where
        S: FnOnce(&R) -> M + 'static,
        M: Matcher<R> + 'static,
    {
        let ValueOf {
            name,
            accessor,
            kind_of,
        } = self;

        Expectation::new(name.clone(), move |source: &T| -> BoxedMatcher<T> {
            Box::new(MatchesFunction::from_source(
                name, accessor, kind_of, source, supplier,
            ))
        })
    }
}

impl<T, R> ValueOf<T, R>
where
    T: ?Sized + Kind,
    R: ?Sized,
{
    /// Also require a candidate of the same kind as the expected source.
    pub fn of_kind(mut self) -> Self {
        self.kind_of = Some(<T as Kind>::kind as fn(&T) -> &'static str);
        self
    }
}

/// Start a function expectation on the value named `name`.
pub fn value_of<T, R, F>(name: impl Into<String>, accessor: F) -> ValueOf<T, R>
where
    T: ?Sized,
    R: ?Sized,
    F: for<'a> Fn(&'a T) -> Option<&'a R> + 'static,
{
    ValueOf {
        name: name.into(),
        accessor: Box::new(accessor),
        kind_of: None,
    }
}
