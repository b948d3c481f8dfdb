//! Map and reduce over lists.
//!
//! ```
//! use forma_fn::prelude::*;
//!
//! let sum_of_squares = map(|x: &i32| x * x).reduce(|(acc, v): &(i32, i32)| acc + v, 0);
//!
//! assert_eq!(sum_of_squares.apply(&vec![1, 2, 3]).unwrap(), 14);
//! assert_eq!(sum_of_squares.apply(&Vec::new()).unwrap(), 0);
//! ```

use crate::composition::{Composed, Composition};
use crate::error::FnError;
use crate::func::{Func, Value};

/// Applies a mapper to every element of a list, preserving order.
#[derive(Debug, Clone)]
pub struct MapFn<F> {
    mapper: F,
}

/// Creates a map unit from `mapper`.
pub fn map<F>(mapper: F) -> MapFn<F> {
    MapFn { mapper }
}

impl<F> MapFn<F> {
    /// Composes this map with a reduction starting from `initial`.
    pub fn reduce<I, O, R>(self, reducer: R, initial: O) -> Composed<Vec<I>, O>
    where
        F: Func<I, O>,
        I: Value,
        O: Value + Clone,
        R: Func<(O, O), O>,
    {
        Composition::new(self)
            .and_then(ReduceFn::new(reducer, initial))
            .build()
    }
}

impl<I, O, F> Func<Vec<I>, Vec<O>> for MapFn<F>
where
    F: Func<I, O>,
{
    fn apply(&self, input: &Vec<I>) -> Result<Vec<O>, FnError> {
        input.iter().map(|item| self.mapper.apply(item)).collect()
    }

    fn is_pure(&self) -> bool {
        self.mapper.is_pure()
    }

    fn name(&self) -> &'static str {
        "map"
    }
}

/// Folds a list into one value with a reducer over `(accumulator, item)`.
#[derive(Debug, Clone)]
pub struct ReduceFn<T, R> {
    reducer: R,
    initial: T,
}

impl<T, R> ReduceFn<T, R>
where
    T: Value + Clone,
    R: Func<(T, T), T>,
{
    /// Creates a reduction starting from `initial`.
    pub fn new(reducer: R, initial: T) -> Self {
        Self { reducer, initial }
    }
}

/// Creates a reduction unit.
pub fn reduce<T, R>(reducer: R, initial: T) -> ReduceFn<T, R>
where
    T: Value + Clone,
    R: Func<(T, T), T>,
{
    ReduceFn::new(reducer, initial)
}

impl<T, R> Func<Vec<T>, T> for ReduceFn<T, R>
where
    T: Value + Clone,
    R: Func<(T, T), T>,
{
    fn apply(&self, input: &Vec<T>) -> Result<T, FnError> {
        input.iter().try_fold(self.initial.clone(), |acc, item| {
            self.reducer.apply(&(acc, item.clone()))
        })
    }

    fn is_pure(&self) -> bool {
        self.reducer.is_pure()
    }

    fn name(&self) -> &'static str {
        "reduce"
    }
}
