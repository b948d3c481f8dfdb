//! Decorators: side effects around an existing unit.
//!
//! A [`Decorator`] observes (and may substitute) the input before the wrapped
//! unit runs and the output after. It cannot replace the wrapped unit's
//! behavior. A decorator that substitutes values should report itself impure.

use core::marker::PhantomData;

use crate::error::FnError;
use crate::func::{Func, Signature, Value};

/// Hooks run around a decorated unit.
///
/// # Example
///
/// ```
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use forma_fn::prelude::*;
///
/// #[derive(Default)]
/// struct CallCounter(AtomicUsize);
///
/// impl Decorator<i32, i32> for CallCounter {
///     fn before(&self, _input: &i32) -> Option<i32> {
///         self.0.fetch_add(1, Ordering::SeqCst);
///         None
///     }
/// }
///
/// let counted = (|x: &i32| x * 3).decorate(CallCounter::default());
/// assert_eq!(counted.apply(&2).unwrap(), 6);
/// assert_eq!(counted.decorator().0.load(Ordering::SeqCst), 1);
/// ```
pub trait Decorator<I, O>: Send + Sync + 'static {
    /// Runs before the decorated unit. Returning `Some` substitutes the input.
    fn before(&self, _input: &I) -> Option<I> {
        None
    }

    /// Runs after the decorated unit with the input it saw and its output.
    /// The returned value becomes the output.
    fn after(&self, _input: &I, output: O) -> O {
        output
    }

    /// Whether the hooks leave inputs, outputs and observable state alone.
    fn is_pure(&self) -> bool {
        true
    }
}

/// A unit wrapped by a [`Decorator`].
pub struct Decorated<D, F, I, O> {
    decorator: D,
    decorated: F,
    _signature: Signature<I, O>,
}

impl<D, F, I, O> Decorated<D, F, I, O>
where
    D: Decorator<I, O>,
    F: Func<I, O>,
{
    /// Wraps `decorated` with `decorator`.
    pub fn new(decorator: D, decorated: F) -> Self {
        Self {
            decorator,
            decorated,
            _signature: PhantomData,
        }
    }

    /// The decorator.
    pub fn decorator(&self) -> &D {
        &self.decorator
    }

    /// The wrapped unit.
    pub fn decorated(&self) -> &F {
        &self.decorated
    }
}

impl<D, F, I, O> Func<I, O> for Decorated<D, F, I, O>
where
    D: Decorator<I, O>,
    F: Func<I, O>,
    I: Value,
    O: Value,
{
    fn apply(&self, input: &I) -> Result<O, FnError> {
        let substituted = self.decorator.before(input);
        let input = substituted.as_ref().unwrap_or(input);
        let output = self.decorated.apply(input)?;
        Ok(self.decorator.after(input, output))
    }

    fn is_pure(&self) -> bool {
        self.decorator.is_pure() && self.decorated.is_pure()
    }

    fn name(&self) -> &'static str {
        self.decorated.name()
    }
}
