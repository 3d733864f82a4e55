//! Single-slot memo of the last evaluation, keyed by candidate identity.
//!
//! `matches` always evaluates afresh through [`MatchCache::refresh`]. The
//! describing methods go through [`MatchCache::evaluate`], which reuses the
//! verdict when handed the same reference `matches` last saw.

use crate::errors::{MatcherError, MatcherResult};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::trace;

/// Address and size of a candidate, `None` for an absent candidate.
///
/// The size keeps a slice apart from a shorter slice starting at the same
/// element.
pub type Identity = Option<(*const (), usize)>;

pub fn identity_of<T: ?Sized>(actual: Option<&T>) -> Identity {
    actual.map(|actual| (actual as *const T as *const (), std::mem::size_of_val(actual)))
}

/// Remembers the verdict for the most recently evaluated candidate.
///
/// The cache never holds the candidate, so an address may be reused once the
/// candidate is dropped. Only the evaluation started by `matches` is trusted
/// for a new candidate. Not `Sync`: a matcher instance belongs to one thread.
pub struct MatchCache<V> {
    last: RefCell<Option<(Identity, Rc<V>)>>,
}

impl<V> MatchCache<V> {
    pub fn new() -> Self {
        Self {
            last: RefCell::new(None),
        }
    }

    /// Verdict for `actual`, computed only if `actual` is not the candidate
    /// evaluated last.
    pub fn evaluate<T, F>(&self, actual: Option<&T>, compute: F) -> Rc<V>
    where
        T: ?Sized,
        F: FnOnce(Option<&T>) -> V,
    {
        let identity = identity_of(actual);
        let hit = self
            .last
            .borrow()
            .as_ref()
            .filter(|(last, _)| *last == identity)
            .map(|(_, verdict)| Rc::clone(verdict));

        match hit {
            Some(verdict) => {
                trace!(?identity, "reusing cached verdict");
                verdict
            }
            None => self.refresh(actual, compute),
        }
    }

    /// Evaluate `actual` and remember the verdict, replacing whatever was
    /// cached.
    pub fn refresh<T, F>(&self, actual: Option<&T>, compute: F) -> Rc<V>
    where
        T: ?Sized,
        F: FnOnce(Option<&T>) -> V,
    {
        let identity = identity_of(actual);
        trace!(?identity, "evaluating candidate");
        // The previous verdict stays alive until the new one is stored.
        let verdict = Rc::new(compute(actual));
        *self.last.borrow_mut() = Some((identity, Rc::clone(&verdict)));
        verdict
    }

    /// The verdict of the last evaluation.
    pub fn current(&self) -> MatcherResult<Rc<V>> {
        self.last
            .borrow()
            .as_ref()
            .map(|(_, verdict)| Rc::clone(verdict))
            .ok_or(MatcherError::NotEvaluated)
    }

    pub fn is_evaluated(&self) -> bool {
        self.last.borrow().is_some()
    }
}

impl<V> Default for MatchCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_same_identity_reuses_verdict() {
        let cache = MatchCache::new();
        let calls = Cell::new(0);
        let candidate = vec![1, 2, 3];

        for _ in 0..3 {
            let verdict = cache.evaluate(Some(&candidate), |actual| {
                calls.set(calls.get() + 1);
                actual.map(|v| v.len())
            });
            assert_eq!(*verdict, Some(3));
        }
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_new_identity_recomputes() {
        let cache = MatchCache::new();
        let calls = Cell::new(0);
        let first = vec![1];
        let second = vec![1];

        cache.evaluate(Some(&first), |_| calls.set(calls.get() + 1));
        cache.evaluate(Some(&second), |_| calls.set(calls.get() + 1));
        cache.evaluate(Some(&first), |_| calls.set(calls.get() + 1));
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_absent_is_its_own_identity() {
        let cache = MatchCache::new();
        let calls = Cell::new(0);

        cache.evaluate(None::<&str>, |_| calls.set(calls.get() + 1));
        cache.evaluate(None::<&str>, |_| calls.set(calls.get() + 1));
        assert_eq!(calls.get(), 1);

        cache.evaluate(Some("present"), |_| calls.set(calls.get() + 1));
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_refresh_always_recomputes() {
        let cache = MatchCache::new();
        let calls = Cell::new(0);
        let candidate = vec![1, 2, 3];

        cache.refresh(Some(&candidate), |_| calls.set(calls.get() + 1));
        cache.refresh(Some(&candidate), |_| calls.set(calls.get() + 1));
        assert_eq!(calls.get(), 2);

        cache.evaluate(Some(&candidate), |_| calls.set(calls.get() + 1));
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_shorter_slice_is_another_candidate() {
        let cache = MatchCache::new();
        let candidate = vec!["Red", "Green"];

        let full = cache.evaluate(Some(&candidate[..]), |actual| actual.map(<[&str]>::len));
        let head = cache.evaluate(Some(&candidate[..1]), |actual| actual.map(<[&str]>::len));
        assert_eq!((*full, *head), (Some(2), Some(1)));
        assert_ne!(identity_of(Some(&candidate[..])), identity_of(Some(&candidate[..1])));
    }

    #[test]
    fn test_current_before_evaluation() {
        let cache = MatchCache::<bool>::new();
        assert!(!cache.is_evaluated());
        assert_eq!(cache.current().err(), Some(MatcherError::NotEvaluated));

        cache.evaluate(Some(&1), |_| true);
        assert_eq!(cache.current().map(|v| *v), Ok(true));
    }
}
