//! Composite matchers: ordered named expectations about one value.
//!
//! A [`CompositeBuilder`] captures the expected value and turns each declared
//! [`Expectation`] into a sub-matcher. The built [`CompositeMatcher`] is
//! immutable; it evaluates sub-matchers in declaration order and stops at the
//! first one that fails. Its description then narrows to that sub-matcher:
//!
//! ```text
//! Drawing[Dots] matching elements=Iterable with 2 members
//! ```

use crate::cache::MatchCache;
use crate::description::Description;
use crate::errors::MatcherResult;
use crate::function::value_of;
use crate::kind::Kind;
use crate::matcher::{of_kind, BoxedMatcher, Matcher, SelfDescribing};
use std::fmt;
use tracing::debug;

/// A named sub-matcher, built from the expected value once it is known.
pub struct Expectation<T: ?Sized> {
    name: String,
    build: Box<dyn FnOnce(&T) -> BoxedMatcher<T>>,
}

impl<T: ?Sized> Expectation<T> {
    pub fn new<F>(name: impl Into<String>, build: F) -> Self
    where
        F: FnOnce(&T) -> BoxedMatcher<T> + 'static,
    {
        Self {
            name: name.into(),
            build: Box::new(build),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T: ?Sized> fmt::Debug for Expectation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Expectation").field("name", &self.name).finish()
    }
}

struct SubMatcher<T: ?Sized> {
    name: String,
    matcher: BoxedMatcher<T>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Matched,
    /// Exactly one of expected and candidate is absent.
    Presence { expected_absent: bool },
    TypeMismatch,
    Failed(usize),
}

/// Declares the expectations of a [`CompositeMatcher`].
pub struct CompositeBuilder<'e, T: ?Sized> {
    expected: Option<&'e T>,
    type_check: Option<BoxedMatcher<T>>,
    matchers: Vec<SubMatcher<T>>,
}

impl<'e, T> CompositeBuilder<'e, T>
where
    T: ?Sized + fmt::Display + 'static,
{
    /// Start declaring expectations about `expected`, which may be absent.
    pub fn new(expected: impl Into<Option<&'e T>>) -> Self {
        Self {
            expected: expected.into(),
            type_check: None,
            matchers: Vec::new(),
        }
    }

    /// Add a sub-matcher. Without an expected value there is nothing to
    /// build it from, and the expectation is dropped.
    pub fn expect_that(mut self, expectation: Expectation<T>) -> Self {
        if let Some(expected) = self.expected {
            let Expectation { name, build } = expectation;
            self.matchers.push(SubMatcher {
                name,
                matcher: build(expected),
            });
        }
        self
    }

    /// Add a sub-matcher supplied directly from the expected value.
    pub fn expect<F>(self, name: impl Into<String>, supplier: F) -> Self
    where
        F: FnOnce(&T) -> BoxedMatcher<T> + 'static,
    {
        self.expect_that(Expectation::new(name, supplier))
    }

    /// Shorthand for `expect_that(value_of(name, accessor).matches(supplier))`.
    pub fn expect_value<R, F, S, M>(self, name: impl Into<String>, accessor: F, supplier: S) -> Self
    where
        R: ?Sized + fmt::Debug + 'static,
        F: for<'a> Fn(&'a T) -> Option<&'a R> + 'static,
        S: FnOnce(&R) -> M + 'static,
        M: Matcher<R> + 'static,
    {
        self.expect_that(value_of(name, accessor).matches(supplier))
    }

    /// Run `check` before any sub-matcher. If it fails, it is the mismatch.
    pub fn with_type_check(mut self, check: BoxedMatcher<T>) -> Self {
        self.type_check = Some(check);
        self
    }

    pub fn build(self) -> CompositeMatcher<T> {
        CompositeMatcher {
            expected: self.expected.map(|expected| expected.to_string()),
            type_check: self.type_check,
            matchers: self.matchers,
            cache: MatchCache::new(),
        }
    }
}

impl<'e, T> CompositeBuilder<'e, T>
where
    T: ?Sized + Kind + fmt::Display + 'static,
{
    /// Require candidates of the same kind as the expected value.
    pub fn expecting_kind(self) -> Self {
        match self.expected {
            Some(expected) => {
                let check = of_kind(expected.kind());
                self.with_type_check(check)
            }
            None => self,
        }
    }
}

/// Matches a value against an ordered list of named sub-matchers.
pub struct CompositeMatcher<T: ?Sized> {
    expected: Option<String>,
    type_check: Option<BoxedMatcher<T>>,
    matchers: Vec<SubMatcher<T>>,
    cache: MatchCache<Outcome>,
}

impl<T: ?Sized> CompositeMatcher<T> {
    fn evaluate(&self, actual: Option<&T>) -> Outcome {
        match (&self.expected, actual) {
            (None, None) => Outcome::Matched,
            (None, Some(_)) => Outcome::Presence {
                expected_absent: true,
            },
            (Some(_), None) => Outcome::Presence {
                expected_absent: false,
            },
            (Some(_), Some(_)) => {
                if let Some(check) = &self.type_check {
                    if !check.matches(actual) {
                        return Outcome::TypeMismatch;
                    }
                }

                match self.matchers.iter().position(|m| !m.matcher.matches(actual)) {
                    Some(index) => {
                        debug!(expectation = %self.matchers[index].name, "composite mismatch");
                        Outcome::Failed(index)
                    }
                    None => Outcome::Matched,
                }
            }
        }
    }

    /// Names of the declared expectations, in evaluation order.
    pub fn expectations(&self) -> impl Iterator<Item = &str> {
        self.matchers.iter().map(|m| m.name.as_str())
    }

    /// Name of the expectation that failed the last evaluation, if any.
    pub fn failing_expectation(&self) -> MatcherResult<Option<String>> {
        let outcome = self.cache.current()?;
        Ok(match *outcome {
            Outcome::Failed(index) => Some(self.matchers[index].name.clone()),
            _ => None,
        })
    }
}

impl<T: ?Sized> SelfDescribing for CompositeMatcher<T> {
    fn describe_to(&self, description: &mut Description) {
        description.append_text(self.expected.as_deref().unwrap_or("null"));
        let outcome = match self.cache.current() {
            Ok(outcome) => *outcome,
            Err(_) => return,
        };
        match outcome {
            Outcome::Presence { expected_absent } => {
                description.append_text(if expected_absent {
                    " matching null"
                } else {
                    " matching not null"
                });
            }
            Outcome::TypeMismatch => {
                if let Some(check) = &self.type_check {
                    description.append_text(" matching ").append_description_of(check);
                }
            }
            Outcome::Failed(index) => {
                description
                    .append_text(" matching ")
                    .append_description_of(&self.matchers[index].matcher);
            }
            Outcome::Matched => {}
        }
    }
}

impl<T: ?Sized> Matcher<T> for CompositeMatcher<T> {
    fn matches(&self, actual: Option<&T>) -> bool {
        *self.cache.refresh(actual, |actual| self.evaluate(actual)) == Outcome::Matched
    }

    fn describe_mismatch(&self, actual: Option<&T>, description: &mut Description) {
        let outcome = *self.cache.evaluate(actual, |actual| self.evaluate(actual));
        match outcome {
            Outcome::Matched => {}
            Outcome::Presence { expected_absent } => {
                description.append_text(if expected_absent {
                    "was not null"
                } else {
                    "was null"
                });
            }
            Outcome::TypeMismatch => {
                if let Some(check) = &self.type_check {
                    check.describe_mismatch(actual, description);
                }
            }
            Outcome::Failed(index) => {
                self.matchers[index].matcher.describe_mismatch(actual, description);
            }
        }
    }
}
