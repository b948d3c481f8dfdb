//! Type-erased functional units.
//!
//! Combinators keep their stages and members in flat lists. Because adjacent
//! stages have different types, the lists hold [`ErasedFunc`] trait objects
//! while the builders that fill them stay fully typed.
//!
//! - [`ErasedFunc`] - Object-safe trait applying a unit to `dyn Any` input
//! - [`SharedFunc`] - Reference-counted erased unit stored in frozen graphs

use core::any::{Any, type_name};
use core::fmt;
use core::marker::PhantomData;
use std::sync::Arc;

use crate::error::FnError;
use crate::func::{Func, Signature, Value};

/// An owned, type-erased value passed between erased stages.
pub type AnyValue = Box<dyn Any + Send + Sync>;

/// Object-safe view of a [`Func`] whose input and output types are erased.
pub trait ErasedFunc: Send + Sync {
    /// Applies the unit to an erased input.
    ///
    /// # Errors
    ///
    /// Returns [`FnError::TypeMismatch`] if `input` is not the unit's input
    /// type, or any error raised by the unit itself.
    fn apply_erased(&self, input: &(dyn Any + Send + Sync)) -> Result<AnyValue, FnError>;

    /// Whether the underlying unit is pure.
    fn is_pure(&self) -> bool;

    /// The underlying unit's name.
    fn name(&self) -> &'static str;

    /// Name of the input type, for diagnostics.
    fn input_type_name(&self) -> &'static str;

    /// Name of the output type, for diagnostics.
    fn output_type_name(&self) -> &'static str;
}

impl fmt::Debug for dyn ErasedFunc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErasedFunc")
            .field("name", &self.name())
            .field("input", &self.input_type_name())
            .field("output", &self.output_type_name())
            .finish()
    }
}

/// Reference-counted erased unit.
pub type SharedFunc = Arc<dyn ErasedFunc>;

struct Erased<F, I, O> {
    func: F,
    _signature: Signature<I, O>,
}

impl<F, I, O> ErasedFunc for Erased<F, I, O>
where
    F: Func<I, O>,
    I: Value,
    O: Value,
{
    fn apply_erased(&self, input: &(dyn Any + Send + Sync)) -> Result<AnyValue, FnError> {
        let input = input
            .downcast_ref::<I>()
            .ok_or_else(|| FnError::TypeMismatch {
                expected: type_name::<I>(),
                unit: self.func.name(),
            })?;
        Ok(Box::new(self.func.apply(input)?))
    }

    fn is_pure(&self) -> bool {
        self.func.is_pure()
    }

    fn name(&self) -> &'static str {
        self.func.name()
    }

    fn input_type_name(&self) -> &'static str {
        type_name::<I>()
    }

    fn output_type_name(&self) -> &'static str {
        type_name::<O>()
    }
}

/// Erases the input and output types of `func`.
pub fn erase<F, I, O>(func: F) -> SharedFunc
where
    F: Func<I, O>,
    I: Value,
    O: Value,
{
    Arc::new(Erased {
        func,
        _signature: PhantomData,
    })
}

/// Recovers a typed output from an erased value.
///
/// # Errors
///
/// Returns [`FnError::TypeMismatch`] naming `unit` if `value` is not a `T`.
pub fn downcast_value<T: Value>(value: AnyValue, unit: &'static str) -> Result<T, FnError> {
    value
        .downcast::<T>()
        .map(|boxed| *boxed)
        .map_err(|_| FnError::TypeMismatch {
            expected: type_name::<T>(),
            unit,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn erased_unit_round_trips_typed_values() {
        let unit = erase(|x: &i32| x.to_string());
        let output = unit.apply_erased(&5_i32).unwrap();
        assert_eq!(downcast_value::<String>(output, "test").unwrap(), "5");
        assert_eq!(unit.input_type_name(), "i32");
        assert_eq!(unit.output_type_name(), "alloc::string::String");
    }

    #[test]
    fn wrong_input_type_is_reported() {
        let unit = erase(|x: &i32| x + 1);
        let result = unit.apply_erased(&"not an int");
        assert!(matches!(result, Err(FnError::TypeMismatch { expected: "i32", .. })));
    }

    #[test]
    fn wrong_output_type_is_reported() {
        let value: AnyValue = Box::new(1_u8);
        assert!(matches!(
            downcast_value::<u16>(value, "probe"),
            Err(FnError::TypeMismatch { unit: "probe", .. })
        ));
    }
}
