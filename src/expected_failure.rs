//! Asserting that an action fails, then inspecting the failure.
//!
//! ```
//! use composite_matchers::{assert_that, equal_to, expect_failure};
//!
//! expect_failure()
//!     .when(|| assert_that("Count", Some(&3), &equal_to(&4)))
//!     .then(|failure| {
//!         assert_eq!(failure.message(), "Count\nExpected: 4\n     but: was 3");
//!     });
//! ```

use crate::errors::AssertionFailure;
use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::panic::{self, AssertUnwindSafe};

/// A failure that can be recovered from a panic payload.
pub trait Failure: Sized {
    /// Name used when the failure is missing.
    const NAME: &'static str;

    /// Recover the failure, or give the payload back if it is something else.
    fn recover(payload: Box<dyn Any + Send>) -> Result<Self, Box<dyn Any + Send>>;
}

impl Failure for AssertionFailure {
    const NAME: &'static str = "AssertionFailure";

    fn recover(payload: Box<dyn Any + Send>) -> Result<Self, Box<dyn Any + Send>> {
        let payload = match payload.downcast::<AssertionFailure>() {
            Ok(failure) => return Ok(*failure),
            Err(payload) => payload,
        };
        let payload = match payload.downcast::<String>() {
            Ok(message) => return Ok(AssertionFailure::new(*message)),
            Err(payload) => payload,
        };
        match payload.downcast::<&'static str>() {
            Ok(message) => Ok(AssertionFailure::new(*message)),
            Err(payload) => Err(payload),
        }
    }
}

/// Expects the next action to fail with `F`.
pub struct ExpectedFailure<F> {
    _failure: PhantomData<F>,
}

impl<F: Failure> ExpectedFailure<F> {
    pub fn new() -> Self {
        Self {
            _failure: PhantomData,
        }
    }

    /// Run `action`, which must panic with a payload recoverable as `F`.
    ///
    /// # Panics
    ///
    /// If `action` returns normally, or panics with some other payload.
    pub fn when<A: FnOnce()>(self, action: A) -> Caught<F> {
        let payload = match panic::catch_unwind(AssertUnwindSafe(action)) {
            Ok(()) => panic!("Expected {} was not raised", F::NAME),
            Err(payload) => payload,
        };

        match F::recover(payload) {
            Ok(failure) => Caught { failure },
            Err(payload) => panic!("Unexpected failure: {}", payload_text(&*payload)),
        }
    }
}

impl<F: Failure> Default for ExpectedFailure<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Failure> fmt::Debug for ExpectedFailure<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExpectedFailure[{}]", F::NAME)
    }
}

/// The failure an action raised.
#[derive(Debug)]
pub struct Caught<F> {
    failure: F,
}

impl<F> Caught<F> {
    /// Inspect the failure.
    pub fn then<C: FnOnce(&F)>(self, check: C) {
        check(&self.failure);
    }

    pub fn failure(&self) -> &F {
        &self.failure
    }

    pub fn into_failure(self) -> F {
        self.failure
    }
}

/// Expect an [`AssertionFailure`].
pub fn expect_failure() -> ExpectedFailure<AssertionFailure> {
    ExpectedFailure::new()
}

/// Expect a failure of type `F`.
pub fn expect_failure_of<F: Failure>() -> ExpectedFailure<F> {
    ExpectedFailure::new()
}

fn payload_text(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = payload.downcast_ref::<&'static str>() {
        (*message).to_string()
    } else {
        "<non-text panic payload>".to_string()
    }
}
