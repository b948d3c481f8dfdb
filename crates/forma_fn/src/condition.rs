//! Conditional branching.
//!
//! `condition(p).then(f).otherwise(g)` evaluates `p` and runs `f` or `g`.
//! Without an `otherwise` branch a false predicate yields `None`; that is an
//! ordinary result, never an error.
//!
//! # Example
//!
//! ```
//! use forma_fn::prelude::*;
//!
//! let halve_evens = if_true(|x: &i32| x % 2 == 0)
//!     .then(|x: &i32| x / 2)
//!     .build();
//!
//! assert_eq!(halve_evens.apply(&8).unwrap(), Some(4));
//! assert_eq!(halve_evens.apply(&7).unwrap(), None);
//! ```

use core::fmt;
use std::sync::Arc;

use crate::error::FnError;
use crate::func::{Func, Value};
use crate::predicate::Predicate;

/// A condition awaiting its `then` branch.
pub struct When<I> {
    predicate: Predicate<I>,
}

/// Starts a condition on `predicate`.
pub fn condition<I: Value>(predicate: Predicate<I>) -> When<I> {
    When { predicate }
}

/// Starts a condition on a closure.
pub fn if_true<I, F>(test: F) -> When<I>
where
    I: Value,
    F: Fn(&I) -> bool + Send + Sync + 'static,
{
    condition(Predicate::new(test))
}

impl<I: Value> When<I> {
    /// Registers the branch taken when the predicate holds.
    pub fn then<O, F>(self, branch: F) -> Condition<I, O>
    where
        O: Value,
        F: Func<I, O>,
    {
        Condition {
            predicate: self.predicate,
            then: Arc::new(branch),
            otherwise: None,
        }
    }
}

/// Builder for a two-way branch.
pub struct Condition<I, O> {
    predicate: Predicate<I>,
    then: Arc<dyn Func<I, O>>,
    otherwise: Option<Arc<dyn Func<I, O>>>,
}

impl<I: Value, O: Value> Condition<I, O> {
    /// Registers the branch taken when the predicate fails, replacing any
    /// earlier one.
    #[must_use]
    pub fn otherwise<G: Func<I, O>>(mut self, branch: G) -> Self {
        self.otherwise = Some(Arc::new(branch));
        self
    }

    /// Returns `true` if an `otherwise` branch is registered.
    #[must_use]
    pub fn has_otherwise(&self) -> bool {
        self.otherwise.is_some()
    }

    /// Freezes the condition into an immutable unit.
    #[must_use]
    pub fn build(self) -> Conditional<I, O> {
        Conditional {
            predicate: self.predicate,
            then: self.then,
            otherwise: self.otherwise,
        }
    }
}

/// A frozen condition, producing `Option<O>`.
pub struct Conditional<I, O> {
    predicate: Predicate<I>,
    then: Arc<dyn Func<I, O>>,
    otherwise: Option<Arc<dyn Func<I, O>>>,
}

impl<I, O> Clone for Conditional<I, O> {
    fn clone(&self) -> Self {
        Self {
            predicate: self.predicate.clone(),
            then: Arc::clone(&self.then),
            otherwise: self.otherwise.clone(),
        }
    }
}

impl<I: Value, O: Value> Func<I, Option<O>> for Conditional<I, O> {
    fn apply(&self, input: &I) -> Result<Option<O>, FnError> {
        if self.predicate.test(input)? {
            return self.then.apply(input).map(Some);
        }
        match &self.otherwise {
            Some(otherwise) => otherwise.apply(input).map(Some),
            None => Ok(None),
        }
    }

    fn is_pure(&self) -> bool {
        self.predicate.is_pure()
            && self.then.is_pure()
            && self.otherwise.as_ref().is_none_or(|branch| branch.is_pure())
    }

    fn name(&self) -> &'static str {
        "condition"
    }
}

impl<I: 'static, O: 'static> fmt::Debug for Conditional<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Conditional")
            .field("predicate", &self.predicate)
            .field("then", &self.then.name())
            .field("otherwise", &self.otherwise.as_ref().map(|branch| branch.name()))
            .finish()
    }
}
