//! Suppliers: units that take no input.
//!
//! Any `Func<(), O>` is a [`Supplier`]. Because a construction over suppliers
//! is itself a `Func<(), _>`, forking suppliers yields a supplier of the
//! collected tuple.
//!
//! ```
//! use forma_fn::prelude::*;
//!
//! let pair = Construction::new(supplier(|| 1_u8))
//!     .fork(supplier(|| "one"))
//!     .build();
//!
//! assert_eq!(pair.get().unwrap(), (1, "one"));
//! ```

use core::any::type_name;

use crate::error::FnError;
use crate::func::Func;

/// A unit with no input.
pub trait Supplier<O>: Func<(), O> {
    /// Produces a value.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the underlying unit.
    fn get(&self) -> Result<O, FnError> {
        self.apply(&())
    }
}

impl<O, S: Func<(), O>> Supplier<O> for S {}

/// A supplier built from a zero-argument closure.
///
/// Created by [`supplier`].
#[derive(Clone)]
pub struct SupplierFn<F> {
    func: F,
}

/// Creates a supplier from a closure.
pub fn supplier<O, F>(func: F) -> SupplierFn<F>
where
    F: Fn() -> O + Send + Sync + 'static,
{
    SupplierFn { func }
}

impl<O, F> Func<(), O> for SupplierFn<F>
where
    F: Fn() -> O + Send + Sync + 'static,
{
    fn apply(&self, _input: &()) -> Result<O, FnError> {
        Ok((self.func)())
    }

    fn name(&self) -> &'static str {
        type_name::<F>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construction::Construction;
    use crate::func::{FuncExt, constant};

    #[test]
    fn supplier_get_calls_closure() {
        let answer = supplier(|| 42);
        assert_eq!(answer.get().unwrap(), 42);
    }

    #[test]
    fn constant_is_a_supplier() {
        let fixed = constant("fixed");
        assert_eq!(Supplier::<&str>::get(&fixed).unwrap(), "fixed");
    }

    #[test]
    fn forked_suppliers_supply_a_tuple() {
        let three = Construction::new(supplier(|| 1))
            .fork(supplier(|| 'b'))
            .fork(supplier(|| String::from("c")))
            .build();
        assert_eq!(three.get().unwrap(), (1, 'b', String::from("c")));
    }

    #[test]
    fn supplier_feeds_a_composition() {
        let chain = supplier(|| 20).pipe(|x: &i32| x + 1).build();
        assert_eq!(chain.get().unwrap(), 21);
    }
}
