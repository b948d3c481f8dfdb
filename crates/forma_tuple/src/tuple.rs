//! The object-safe [`Tuple`] view shared by every arity.
//!
//! Native Rust tuples of arity 0 through [`MAX_FIXED_ARITY`] implement
//! [`Tuple`] when each of their fields is an [`Element`]. Longer sequences use
//! [`TpN`](crate::tpn::TpN).

use core::fmt;
use core::hash::{Hash, Hasher};

use variadics_please::all_tuples_with_size;

use crate::element::{Element, elements_equal};

/// The largest arity represented by a native tuple.
pub const MAX_FIXED_ARITY: usize = 8;

/// Positional read access to an immutable heterogeneous sequence.
///
/// Reads outside the tuple's arity return `None` rather than failing.
///
/// # Example
///
/// ```
/// use forma_tuple::tuple::Tuple;
///
/// let tuple = (1_i32, "a", true);
///
/// assert_eq!(tuple.size(), 3);
/// assert_eq!(tuple.get_as::<&str>(1), Some(&"a"));
/// assert!(tuple.get(3).is_none());
/// assert_eq!(tuple.display().to_string(), r#"{1,"a",true}"#);
/// ```
pub trait Tuple {
    /// Returns the number of elements.
    fn size(&self) -> usize;

    /// Returns the element at `index`, or `None` when out of range.
    fn get(&self, index: usize) -> Option<&dyn Element>;

    /// Returns `true` for the zero-arity tuple.
    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Returns the elements as a boxed slice, in positional order.
    fn to_array(&self) -> Box<[&dyn Element]> {
        (0..self.size()).filter_map(|index| self.get(index)).collect()
    }

    /// Returns the elements as a list, in positional order.
    fn to_ordered_list(&self) -> Vec<&dyn Element> {
        (0..self.size()).filter_map(|index| self.get(index)).collect()
    }

    /// Returns the element at `index` if it has concrete type `T`.
    fn get_as<T: Element>(&self, index: usize) -> Option<&T>
    where
        Self: Sized,
    {
        self.get(index)?.downcast_ref::<T>()
    }

    /// Returns a view of the first `len` elements.
    fn view(&self, len: usize) -> Prefix<'_>
    where
        Self: Sized,
    {
        Prefix::new(self, len)
    }

    /// Returns `true` when every element of `other` matches this tuple's
    /// element at the same position.
    fn starts_with(&self, other: &dyn Tuple) -> bool
    where
        Self: Sized,
    {
        other.size() <= self.size() && tuples_equal(&self.view(other.size()), other)
    }

    /// Formats the tuple as `{a,b,c}` using each element's debug form.
    fn display(&self) -> TupleDisplay<'_>
    where
        Self: Sized,
    {
        TupleDisplay(self)
    }
}

/// Structural equality across any two tuples: same size and pairwise-equal
/// elements.
#[must_use]
pub fn tuples_equal(a: &dyn Tuple, b: &dyn Tuple) -> bool {
    a.size() == b.size() && (0..a.size()).all(|index| elements_equal(a.get(index), b.get(index)))
}

/// Structural hash matching [`tuples_equal`]: the size, then each element's
/// [`Element::dyn_hash`].
///
/// Tuples that are equal under [`tuples_equal`] hash alike whatever their
/// representation. A native tuple's derived `Hash` is a different function and
/// must not be mixed with this one in the same table.
///
/// # Example
///
/// ```
/// use std::hash::{DefaultHasher, Hasher};
/// use forma_tuple::prelude::*;
///
/// fn hash(tuple: &dyn Tuple) -> u64 {
///     let mut state = DefaultHasher::new();
///     tuple_hash(tuple, &mut state);
///     state.finish()
/// }
///
/// assert_eq!(hash(&(1_i32, 'a')), hash(&tpn![1_i32, 'a']));
/// ```
pub fn tuple_hash(tuple: &dyn Tuple, mut state: &mut dyn Hasher) {
    tuple.size().hash(&mut state);
    for element in (0..tuple.size()).filter_map(|index| tuple.get(index)) {
        element.dyn_hash(state);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Native tuple impls
// ─────────────────────────────────────────────────────────────────────────────

macro_rules! impl_tuple {
    ($N:expr, $(($P:ident, $p:ident)),*) => {
        impl<$($P: Element),*> Tuple for ($($P,)*) {
            fn size(&self) -> usize {
                $N
            }

            fn get(&self, index: usize) -> Option<&dyn Element> {
                let ($($p,)*) = self;
                let elements: [&dyn Element; $N] = [$($p as &dyn Element),*];
                elements.get(index).copied()
            }
        }
    };
}

all_tuples_with_size!(impl_tuple, 0, 8, P, p);

// ─────────────────────────────────────────────────────────────────────────────
// Prefix
// ─────────────────────────────────────────────────────────────────────────────

/// A narrowed view over the leading elements of another tuple.
///
/// The view never extends past the underlying tuple: its size is the smaller
/// of the requested length and the tuple's own size.
#[derive(Clone, Copy)]
pub struct Prefix<'a> {
    inner: &'a dyn Tuple,
    len: usize,
}

impl<'a> Prefix<'a> {
    /// Creates a view of the first `len` elements of `inner`.
    #[must_use]
    pub fn new(inner: &'a dyn Tuple, len: usize) -> Self {
        Self {
            inner,
            len: len.min(inner.size()),
        }
    }
}

impl Tuple for Prefix<'_> {
    fn size(&self) -> usize {
        self.len
    }

    fn get(&self, index: usize) -> Option<&dyn Element> {
        if index < self.len {
            self.inner.get(index)
        } else {
            None
        }
    }
}

impl fmt::Debug for Prefix<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Prefix{}", TupleDisplay(self))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Display
// ─────────────────────────────────────────────────────────────────────────────

/// Formats any tuple as `{a,b,c}`.
pub struct TupleDisplay<'a>(pub &'a dyn Tuple);

impl fmt::Display for TupleDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (position, element) in self.0.to_ordered_list().into_iter().enumerate() {
            if position > 0 {
                f.write_str(",")?;
            }
            write!(f, "{element:?}")?;
        }
        f.write_str("}")
    }
}
