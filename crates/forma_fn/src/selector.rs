//! Positional projection out of any tuple.

use core::any::type_name;
use core::fmt;
use core::marker::PhantomData;

use forma_tuple::element::Element;
use forma_tuple::tuple::Tuple;

use crate::error::FnError;
use crate::func::{Func, Value};

/// Selects the element at a fixed index from any tuple.
///
/// Works for every arity, including [`TpN`](forma_tuple::tpn::TpN). An index
/// past the tuple's end, or an element of a different type, yields `None`.
///
/// ```
/// use forma_fn::prelude::*;
///
/// let second = select::<&str>(1);
///
/// assert_eq!(second.apply(&(1_i32, "a")).unwrap(), Some("a"));
/// assert_eq!(second.apply(&(1_i32, "a", true)).unwrap(), Some("a"));
/// assert_eq!(second.apply(&(1_i32,)).unwrap(), None);
/// ```
pub struct Selector<T> {
    index: usize,
    _element: PhantomData<fn() -> T>,
}

/// Creates a selector for position `index`.
#[must_use]
pub fn select<T: Element + Clone>(index: usize) -> Selector<T> {
    Selector {
        index,
        _element: PhantomData,
    }
}

impl<T> Selector<T> {
    /// The selected position.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }
}

impl<T> Clone for Selector<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Selector<T> {}

impl<Tup, T> Func<Tup, Option<T>> for Selector<T>
where
    Tup: Tuple + Value,
    T: Element + Clone,
{
    fn apply(&self, input: &Tup) -> Result<Option<T>, FnError> {
        Ok(input
            .get(self.index)
            .and_then(|element| element.downcast_ref::<T>())
            .cloned())
    }

    fn name(&self) -> &'static str {
        "select"
    }
}

impl<T> fmt::Debug for Selector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selector")
            .field("index", &self.index)
            .field("element", &type_name::<T>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construction::Construction;
    use forma_tuple::tpn;

    #[test]
    fn selects_across_arities() {
        let first = select::<i32>(0);
        assert_eq!(first.apply(&(7_i32,)).unwrap(), Some(7));
        assert_eq!(first.apply(&(7_i32, 'x', "y", 0_u8)).unwrap(), Some(7));
        assert_eq!(first.apply(&()).unwrap(), None);
    }

    #[test]
    fn selects_from_overflow_tuple() {
        let tenth = select::<char>(9);
        let tuple = tpn![0_u8, 1_u8, 2_u8, 3_u8, 4_u8, 5_u8, 6_u8, 7_u8, 8_u8, 'j'];
        assert_eq!(tenth.apply(&tuple).unwrap(), Some('j'));
    }

    #[test]
    fn wrong_type_is_absent() {
        let as_string = select::<String>(0);
        assert_eq!(as_string.apply(&(1_i32,)).unwrap(), None);
    }

    #[test]
    fn selects_float_elements() {
        let ratio = select::<f64>(0);
        assert_eq!(ratio.apply(&(1.5_f64, 2_i32)).unwrap(), Some(1.5));
        assert_eq!(select::<f32>(0).apply(&(1.5_f64,)).unwrap(), None);
    }

    #[test]
    fn selectors_compose_with_constructions() {
        let swap = Construction::<(i32, char), ()>::new(select::<char>(1))
            .fork(select::<i32>(0))
            .build();
        assert_eq!(swap.apply(&(1_i32, 'a')).unwrap(), (Some('a'), Some(1)));
    }
}
