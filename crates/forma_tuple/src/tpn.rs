//! Variable-arity tuples.
//!
//! [`TpN`] carries any number of elements, including more than
//! [`MAX_FIXED_ARITY`](crate::tuple::MAX_FIXED_ARITY). It follows the same
//! access, equality and formatting rules as the native tuples, and hashes with
//! [`tuple_hash`] so it agrees with any native tuple it equals.
//!
//! `Eq` is not reflexive for a `TpN` holding a NaN element.

use core::fmt;
use core::hash::{Hash, Hasher};
use std::sync::Arc;

use variadics_please::all_tuples;

use crate::element::Element;
use crate::tuple::{Tuple, TupleDisplay, tuple_hash, tuples_equal};

/// An immutable tuple of arbitrary arity.
///
/// Cloning is cheap: clones share the same backing elements.
///
/// # Example
///
/// ```
/// use forma_tuple::tpn;
/// use forma_tuple::tuple::Tuple;
///
/// let tuple = tpn![1_i32, "two", 3_u32, 'x', 5_u8, 6_i64, 7_u16, 8_i8, true];
///
/// assert_eq!(tuple.size(), 9);
/// assert_eq!(tuple.get_as::<bool>(8), Some(&true));
/// assert!(tuple.get(9).is_none());
/// ```
#[derive(Clone)]
pub struct TpN {
    elements: Arc<[Box<dyn Element>]>,
}

impl TpN {
    /// Creates a tuple from already boxed elements.
    #[must_use]
    pub fn new(elements: Vec<Box<dyn Element>>) -> Self {
        Self {
            elements: elements.into(),
        }
    }

    /// Creates the zero-arity tuple.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Iterates over the elements in positional order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Element> {
        self.elements.iter().map(|element| &**element)
    }
}

impl Tuple for TpN {
    fn size(&self) -> usize {
        self.elements.len()
    }

    fn get(&self, index: usize) -> Option<&dyn Element> {
        self.elements.get(index).map(|element| &**element)
    }
}

impl FromIterator<Box<dyn Element>> for TpN {
    fn from_iter<T: IntoIterator<Item = Box<dyn Element>>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl PartialEq for TpN {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.elements, &other.elements) || tuples_equal(self, other)
    }
}

impl Eq for TpN {}

impl Hash for TpN {
    fn hash<H: Hasher>(&self, state: &mut H) {
        tuple_hash(self, state);
    }
}

impl fmt::Display for TpN {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&TupleDisplay(self), f)
    }
}

impl fmt::Debug for TpN {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TpN{}", TupleDisplay(self))
    }
}

macro_rules! impl_from_tuple {
    ($(($P:ident, $p:ident)),*) => {
        impl<$($P: Element),*> From<($($P,)*)> for TpN {
            fn from(($($p,)*): ($($P,)*)) -> Self {
                Self::new(vec![$(Box::new($p) as Box<dyn Element>),*])
            }
        }
    };
}

all_tuples!(impl_from_tuple, 0, 8, P, p);

/// Builds a [`TpN`] from a list of element expressions.
///
/// ```
/// use forma_tuple::tpn;
///
/// let tuple = tpn!["a", 1_u8];
/// assert_eq!(tuple.to_string(), r#"{"a",1}"#);
/// assert_eq!(tpn![].to_string(), "{}");
/// ```
#[macro_export]
macro_rules! tpn {
    () => {
        $crate::tpn::TpN::empty()
    };
    ($($element:expr),+ $(,)?) => {
        $crate::tpn::TpN::new(vec![
            $(Box::new($element) as Box<dyn $crate::element::Element>),+
        ])
    };
}
