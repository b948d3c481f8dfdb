//! The functional unit abstraction.
//!
//! A [`Func<I, O>`] maps a borrowed input to an owned output and reports
//! whether it is pure. Closures of shape `Fn(&I) -> O` are functional units
//! out of the box, so most graphs are assembled directly from closures.
//!
//! # Example
//!
//! ```
//! use forma_fn::prelude::*;
//!
//! let inc = |x: &i32| x + 1;
//! let double = |x: &i32| x * 2;
//!
//! let both = inc.pipe(double).build();
//! assert_eq!(both.apply(&3).unwrap(), 8);
//!
//! let pair = inc.fork(double).build();
//! assert_eq!(pair.apply(&3).unwrap(), (4, 6));
//! ```

use core::any::type_name;
use core::marker::PhantomData;

use crate::composition::Composition;
use crate::construction::Construction;
use crate::consumer::ConsumerFn;
use crate::decorator::{Decorated, Decorator};
use crate::error::FnError;

/// Bound shared by every value that flows through a functional unit.
pub trait Value: Send + Sync + 'static {}

impl<T: Send + Sync + 'static> Value for T {}

/// A typed transformation from `I` to `O`.
///
/// Implementations must be safe to share across threads. A frozen combinator
/// graph is immutable, so the same unit can be applied concurrently.
pub trait Func<I, O>: Send + Sync + 'static {
    /// Applies the unit to `input`.
    ///
    /// # Errors
    ///
    /// Returns whatever error the unit (or any unit it is built from) raises.
    fn apply(&self, input: &I) -> Result<O, FnError>;

    /// Whether equal inputs always produce equal outputs with no observable
    /// side effect.
    fn is_pure(&self) -> bool {
        true
    }

    /// A human-readable name used in errors and logs.
    fn name(&self) -> &'static str {
        type_name::<Self>()
    }

    /// Converts this unit into a consumer that discards its output.
    ///
    /// A [`ConsumerFn`] is returned unchanged.
    fn into_consumer(self) -> ConsumerFn<I>
    where
        Self: Sized,
        I: Value,
        O: Value,
    {
        ConsumerFn::wrap(self)
    }
}

impl<I, O, F> Func<I, O> for F
where
    F: Fn(&I) -> O + Send + Sync + 'static,
{
    fn apply(&self, input: &I) -> Result<O, FnError> {
        Ok(self(input))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Adapters
// ─────────────────────────────────────────────────────────────────────────────

/// A unit built from a fallible closure.
///
/// Created by [`try_fn`].
pub struct TryFn<F> {
    func: F,
}

/// Lifts a closure returning `Result<O, FnError>` into a functional unit whose
/// errors propagate instead of becoming the output value.
///
/// ```
/// use forma_fn::prelude::*;
///
/// let parse = try_fn(|s: &String| s.parse::<i32>().map_err(FnError::custom));
///
/// assert_eq!(parse.apply(&"42".to_string()).unwrap(), 42);
/// assert!(parse.apply(&"x".to_string()).is_err());
/// ```
pub fn try_fn<I, O, F>(func: F) -> TryFn<F>
where
    F: Fn(&I) -> Result<O, FnError> + Send + Sync + 'static,
{
    TryFn { func }
}

impl<I, O, F> Func<I, O> for TryFn<F>
where
    F: Fn(&I) -> Result<O, FnError> + Send + Sync + 'static,
{
    fn apply(&self, input: &I) -> Result<O, FnError> {
        (self.func)(input)
    }

    fn name(&self) -> &'static str {
        type_name::<F>()
    }
}

/// A unit explicitly marked as impure.
///
/// Created by [`impure`].
pub struct Impure<F> {
    func: F,
}

/// Marks `func` as having side effects.
pub fn impure<F>(func: F) -> Impure<F> {
    Impure { func }
}

impl<I, O, F> Func<I, O> for Impure<F>
where
    F: Func<I, O>,
{
    fn apply(&self, input: &I) -> Result<O, FnError> {
        self.func.apply(input)
    }

    fn is_pure(&self) -> bool {
        false
    }

    fn name(&self) -> &'static str {
        self.func.name()
    }
}

/// Returns its input unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

/// Creates an identity unit. Each call returns a fresh stateless value.
#[must_use]
pub fn identity() -> Identity {
    Identity
}

impl<I: Clone + Value> Func<I, I> for Identity {
    fn apply(&self, input: &I) -> Result<I, FnError> {
        Ok(input.clone())
    }

    fn name(&self) -> &'static str {
        "identity"
    }
}

/// Ignores its input and always yields the same value.
#[derive(Debug, Clone)]
pub struct Const<V> {
    value: V,
}

/// Creates a unit that yields a clone of `value` for any input.
pub fn constant<V: Clone + Value>(value: V) -> Const<V> {
    Const { value }
}

impl<I, V: Clone + Value> Func<I, V> for Const<V> {
    fn apply(&self, _input: &I) -> Result<V, FnError> {
        Ok(self.value.clone())
    }

    fn name(&self) -> &'static str {
        "constant"
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// FuncExt
// ─────────────────────────────────────────────────────────────────────────────

/// Combinator methods available on every functional unit.
pub trait FuncExt<I: Value, O: Value>: Func<I, O> + Sized {
    /// Starts a composition running `self` then `next`.
    fn pipe<O2, G>(self, next: G) -> Composition<I, O2>
    where
        O2: Value,
        G: Func<O, O2>,
    {
        Composition::new(self).and_then(next)
    }

    /// Starts a composition running `first` then `self`.
    fn after<I0, G>(self, first: G) -> Composition<I0, O>
    where
        I0: Value,
        G: Func<I0, I>,
    {
        Composition::new(first).and_then(self)
    }

    /// Starts a construction feeding the same input to `self` and `other`.
    fn fork<O2, G>(self, other: G) -> Construction<I, (O, O2)>
    where
        O2: Value,
        G: Func<I, O2>,
    {
        Construction::new(self).fork(other)
    }

    /// Starts a construction of `self` plus a side-effect-only `consumer`.
    fn fork_consumer<C, X>(self, consumer: C) -> Construction<I, (O,)>
    where
        C: Func<I, X>,
        X: Value,
    {
        Construction::new(self).with_consumer(consumer)
    }

    /// Wraps `self` with `decorator`'s before and after hooks.
    fn decorate<D>(self, decorator: D) -> Decorated<D, Self, I, O>
    where
        D: Decorator<I, O>,
    {
        Decorated::new(decorator, self)
    }
}

impl<I: Value, O: Value, F: Func<I, O>> FuncExt<I, O> for F {}

/// Marker used by erased adapters to carry `I` and `O` without owning them.
pub(crate) type Signature<I, O> = PhantomData<fn(&I) -> O>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_pure_units() {
        let inc = |x: &i32| x + 1;
        assert_eq!(inc.apply(&1).unwrap(), 2);
        assert!(Func::<i32, i32>::is_pure(&inc));
    }

    #[test]
    fn try_fn_propagates_errors() {
        let fail = try_fn(|_: &i32| -> Result<i32, FnError> { Err(FnError::failed("no")) });
        assert!(matches!(fail.apply(&0), Err(FnError::Failed(msg)) if msg == "no"));
    }

    #[test]
    fn impure_flag() {
        let unit = impure(|x: &i32| *x);
        assert!(!unit.is_pure());
        assert_eq!(unit.apply(&5).unwrap(), 5);
    }

    #[test]
    fn identity_returns_input() {
        let id = identity();
        assert_eq!(Func::<String, String>::apply(&id, &"fl".to_string()).unwrap(), "fl");
        assert_eq!(Func::<i32, i32>::name(&id), "identity");
    }

    #[test]
    fn constant_ignores_input() {
        let seven = constant(7_u8);
        assert_eq!(Func::<&str, u8>::apply(&seven, &"anything").unwrap(), 7);
        assert_eq!(Func::<(), u8>::apply(&seven, &()).unwrap(), 7);
    }

    #[test]
    fn after_runs_argument_first() {
        let double = |x: &i32| x * 2;
        let inc = |x: &i32| x + 1;
        let composed = double.after(inc).build();
        assert_eq!(composed.apply(&3).unwrap(), 8);
    }
}
