//! Consumers: units run only for their side effects.
//!
//! A [`ConsumerFn`] is either a single wrapped unit or a flat group of
//! consumers. Combining onto a group appends to it, so a chain built by
//! repeated pairwise [`combine`] stays one group with `N` members.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use parking_lot::Mutex;
//! use forma_fn::prelude::*;
//!
//! let log = Arc::new(Mutex::new(Vec::new()));
//! let (a, b, c) = (log.clone(), log.clone(), log.clone());
//!
//! let all = consumer(move |x: &i32| a.lock().push(("a", *x)))
//!     .combine(move |x: &i32| b.lock().push(("b", *x)))
//!     .combine(move |x: &i32| c.lock().push(("c", *x)));
//!
//! assert_eq!(all.len(), 3);
//! all.accept(&1).unwrap();
//! assert_eq!(*log.lock(), vec![("a", 1), ("b", 1), ("c", 1)]);
//! ```

use core::fmt;

use crate::construction::{Construction, run_members};
use crate::erased::{SharedFunc, erase};
use crate::error::FnError;
use crate::func::{Func, Value};

enum ConsumerKind<I> {
    Single(SharedFunc),
    Group(Construction<I, ()>),
}

/// A unit with no output.
///
/// Consumers are impure unless marked otherwise with
/// [`with_purity`](Self::with_purity).
pub struct ConsumerFn<I> {
    kind: ConsumerKind<I>,
    pure: bool,
}

impl<I: Value> ConsumerFn<I> {
    /// Creates a consumer from a closure.
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&I) + Send + Sync + 'static,
    {
        Self::wrap::<F, ()>(func)
    }

    /// Wraps any unit, discarding its output.
    pub fn wrap<F, O>(func: F) -> Self
    where
        F: Func<I, O>,
        O: Value,
    {
        Self {
            kind: ConsumerKind::Single(erase(func)),
            pure: false,
        }
    }

    /// Returns a consumer that runs `self` then `other` on the same input.
    ///
    /// When `self` is already a group, `other` is appended to it.
    pub fn combine<C, X>(self, other: C) -> Self
    where
        C: Func<I, X>,
        X: Value,
    {
        let other = other.into_consumer();
        let pure = self.pure && other.pure;
        let kind = match self.kind {
            ConsumerKind::Group(group) => ConsumerKind::Group(group.with_consumer(other)),
            single @ ConsumerKind::Single(_) => {
                let first = ConsumerFn {
                    kind: single,
                    pure: self.pure,
                };
                ConsumerKind::Group(Construction::from_consumer(first).with_consumer(other))
            }
        };
        Self { kind, pure }
    }

    /// Runs the consumer.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a member.
    pub fn accept(&self, input: &I) -> Result<(), FnError> {
        self.apply(input)
    }

    /// Overrides the purity flag.
    #[must_use]
    pub fn with_purity(mut self, pure: bool) -> Self {
        self.pure = pure;
        self
    }

    /// Number of consumers this unit runs: 1 for a single consumer, the
    /// member count for a group.
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.kind {
            ConsumerKind::Single(_) => 1,
            ConsumerKind::Group(group) => group.len(),
        }
    }

    /// Always `false`: a consumer wraps at least one unit.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if this consumer is a flat group.
    #[must_use]
    pub fn is_group(&self) -> bool {
        matches!(self.kind, ConsumerKind::Group(_))
    }
}

impl<I: Value> Func<I, ()> for ConsumerFn<I> {
    fn apply(&self, input: &I) -> Result<(), FnError> {
        match &self.kind {
            ConsumerKind::Single(unit) => {
                unit.apply_erased(input)?;
            }
            ConsumerKind::Group(group) => {
                run_members(&group.members, input)?;
            }
        }
        Ok(())
    }

    fn is_pure(&self) -> bool {
        self.pure
    }

    fn name(&self) -> &'static str {
        "consumer"
    }

    fn into_consumer(self) -> ConsumerFn<I> {
        self
    }
}

impl<I> fmt::Debug for ConsumerFn<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ConsumerKind::Single(unit) => f.debug_tuple("Consumer").field(&unit.name()).finish(),
            ConsumerKind::Group(group) => f
                .debug_struct("ConsumerGroup")
                .field("members", &group.members.len())
                .finish(),
        }
    }
}

/// Creates a consumer from a closure.
pub fn consumer<I, F>(func: F) -> ConsumerFn<I>
where
    I: Value,
    F: Fn(&I) + Send + Sync + 'static,
{
    ConsumerFn::new(func)
}

/// Combines two consumers into one running both, `first` then `second`.
pub fn combine<I: Value>(first: ConsumerFn<I>, second: ConsumerFn<I>) -> ConsumerFn<I> {
    first.combine(second)
}
