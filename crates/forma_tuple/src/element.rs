//! Dynamically typed tuple elements.
//!
//! Every value stored in a tuple is viewed through [`Element`], an object-safe
//! trait that keeps structural equality and hashing available after the
//! concrete type has been erased.
//!
//! `dyn Element` deliberately does not implement `PartialEq` itself, so a
//! `Box<dyn Element>` never becomes an element in its own right.
//!
//! Elements need not be `Hash`: floats and structs holding them are valid
//! elements. [`Element::dyn_hash`] mixes in the concrete type and, for the
//! primitive and string types, the value itself. Every other type hashes by
//! type alone, which stays consistent with [`Element::dyn_eq`].

use core::any::{Any, TypeId};
use core::fmt;
use core::hash::{Hash, Hasher};

use downcast_rs::{DowncastSync, impl_downcast};

/// A value that can occupy a tuple position.
///
/// Implemented automatically for every `PartialEq + Debug + Send + Sync` type
/// with a `'static` lifetime. Two elements compare equal only when they
/// share a concrete type and that type's `PartialEq` says so.
///
/// # Example
///
/// ```
/// use forma_tuple::element::Element;
///
/// let a: &dyn Element = &7_i32;
/// let b: &dyn Element = &7_i32;
/// let c: &dyn Element = &7_i64;
///
/// assert!(a.dyn_eq(b));
/// assert!(!a.dyn_eq(c));
/// assert_eq!(a.downcast_ref::<i32>(), Some(&7));
/// ```
pub trait Element: DowncastSync + fmt::Debug + 'static {
    /// Compares against another element, false when the concrete types differ.
    fn dyn_eq(&self, other: &dyn Element) -> bool;

    /// Feeds the concrete type identity into `state`, followed by the value
    /// for primitive and string types. Equal elements always hash equally.
    fn dyn_hash(&self, state: &mut dyn Hasher);

    /// Returns the concrete type name, for diagnostics.
    fn type_name(&self) -> &'static str;
}

impl_downcast!(sync Element);

impl<T> Element for T
where
    T: PartialEq + fmt::Debug + Send + Sync + 'static,
{
    fn dyn_eq(&self, other: &dyn Element) -> bool {
        other.downcast_ref::<T>().is_some_and(|other| self == other)
    }

    fn dyn_hash(&self, mut state: &mut dyn Hasher) {
        TypeId::of::<T>().hash(&mut state);
        hash_value(self, state);
    }

    fn type_name(&self) -> &'static str {
        core::any::type_name::<T>()
    }
}

macro_rules! hash_known {
    ($value:ident, $state:ident; $($ty:ty),+ $(,)?) => {
        $(
            if let Some(value) = $value.downcast_ref::<$ty>() {
                value.hash(&mut $state);
                return;
            }
        )+
    };
}

fn hash_value(value: &dyn Any, mut state: &mut dyn Hasher) {
    hash_known!(
        value, state;
        bool, char, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize,
        String, &'static str, (),
    );

    // -0.0 == 0.0, so both zeros share one bit pattern
    if let Some(value) = value.downcast_ref::<f64>() {
        let value = if *value == 0.0 { 0.0 } else { *value };
        value.to_bits().hash(&mut state);
    } else if let Some(value) = value.downcast_ref::<f32>() {
        let value = if *value == 0.0 { 0.0 } else { *value };
        value.to_bits().hash(&mut state);
    }
}

/// Compares two optional elements, treating two absent values as equal.
#[must_use]
pub fn elements_equal(a: Option<&dyn Element>, b: Option<&dyn Element>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.dyn_eq(b),
        (None, None) => true,
        _ => false,
    }
}
