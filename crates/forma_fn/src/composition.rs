//! Sequential composition.
//!
//! A [`Composition`] is a builder holding one flat list of stages. Appending
//! a stage moves the same list forward under a new output type, so a chain of
//! any length is a single combinator rather than a tower of wrappers.
//! [`Composition::build`] freezes the list into a [`Composed`] unit.
//!
//! # Example
//!
//! ```
//! use forma_fn::prelude::*;
//!
//! let pipeline = Composition::new(|x: &i32| x + 1)
//!     .and_then(|x: &i32| x * 10)
//!     .and_then(|x: &i32| format!("<{x}>"))
//!     .build();
//!
//! assert_eq!(pipeline.stage_count(), 3);
//! assert_eq!(pipeline.apply(&1).unwrap(), "<20>");
//! ```

use core::any::type_name;
use core::fmt;
use core::marker::PhantomData;
use std::sync::Arc;

use crate::erased::{SharedFunc, downcast_value, erase};
use crate::error::FnError;
use crate::func::{Func, Signature, Value};

const UNIT_NAME: &str = "composition";

// ─────────────────────────────────────────────────────────────────────────────
// Composition (builder)
// ─────────────────────────────────────────────────────────────────────────────

/// Builder for a chain of stages from `I` to `O`.
pub struct Composition<I, O> {
    stages: Vec<SharedFunc>,
    _signature: Signature<I, O>,
}

impl<I: Value, O: Value> Composition<I, O> {
    /// Starts a composition with its first stage.
    pub fn new<F: Func<I, O>>(first: F) -> Self {
        Self {
            stages: vec![erase(first)],
            _signature: PhantomData,
        }
    }

    /// Appends `next`, whose input is this composition's current output.
    ///
    /// The stage list is moved, not copied or nested.
    pub fn and_then<O2, G>(mut self, next: G) -> Composition<I, O2>
    where
        O2: Value,
        G: Func<O, O2>,
    {
        self.stages.push(erase(next));
        Composition {
            stages: self.stages,
            _signature: PhantomData,
        }
    }

    /// Number of stages registered so far.
    #[must_use]
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Freezes the stage list into an immutable, shareable unit.
    #[must_use]
    pub fn build(self) -> Composed<I, O> {
        tracing::trace!(stages = self.stages.len(), "composition built");
        Composed {
            stages: self.stages.into(),
            _signature: PhantomData,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Composed (frozen)
// ─────────────────────────────────────────────────────────────────────────────

/// A frozen composition.
///
/// Applying it threads the input through every stage in order and returns
/// the last stage's output. The first failing stage ends evaluation and its
/// error is returned as-is.
pub struct Composed<I, O> {
    stages: Arc<[SharedFunc]>,
    _signature: Signature<I, O>,
}

impl<I, O> Clone for Composed<I, O> {
    fn clone(&self) -> Self {
        Self {
            stages: Arc::clone(&self.stages),
            _signature: PhantomData,
        }
    }
}

impl<I: Value, O: Value> Composed<I, O> {
    /// Number of stages.
    #[must_use]
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// The erased stages, in execution order.
    #[must_use]
    pub fn stages(&self) -> &[SharedFunc] {
        &self.stages
    }

    /// Returns a builder seeded with this composition's stages, so further
    /// stages extend the same flat list.
    #[must_use]
    pub fn reopen(&self) -> Composition<I, O> {
        Composition {
            stages: self.stages.to_vec(),
            _signature: PhantomData,
        }
    }

    /// Shorthand for `self.reopen().and_then(next)`.
    pub fn and_then<O2, G>(&self, next: G) -> Composition<I, O2>
    where
        O2: Value,
        G: Func<O, O2>,
    {
        self.reopen().and_then(next)
    }
}

impl<I: Value, O: Value> Func<I, O> for Composed<I, O> {
    fn apply(&self, input: &I) -> Result<O, FnError> {
        let Some((first, rest)) = self.stages.split_first() else {
            return Err(FnError::MissingOutput {
                expected: type_name::<O>(),
                unit: UNIT_NAME,
            });
        };

        let mut value = first.apply_erased(input)?;
        for stage in rest {
            value = stage.apply_erased(&*value)?;
        }
        downcast_value(value, UNIT_NAME)
    }

    fn is_pure(&self) -> bool {
        self.stages.iter().all(|stage| stage.is_pure())
    }

    fn name(&self) -> &'static str {
        UNIT_NAME
    }
}

impl<I, O> fmt::Debug for Composed<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.stages.iter().map(|stage| stage.name()))
            .finish()
    }
}

/// Composes two units: `first` runs, then `second` runs on its output.
pub fn compose<I, M, O, F, G>(first: F, second: G) -> Composed<I, O>
where
    I: Value,
    M: Value,
    O: Value,
    F: Func<I, M>,
    G: Func<M, O>,
{
    Composition::new(first).and_then(second).build()
}
