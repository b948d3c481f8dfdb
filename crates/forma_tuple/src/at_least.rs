//! Arity subsumption: a tuple of arity `M` satisfies every `AtLeastN` with
//! `N <= M`.
//!
//! Each trait in the chain adds one typed accessor and a typed reference view
//! of the leading `N` elements, so a function written against
//! `T: AtLeast2` accepts `(A, B)`, `(A, B, C)` and so on up to arity eight.
//!
//! ```
//! use forma_tuple::at_least::{AtLeast1, AtLeast2};
//!
//! fn describe<T: AtLeast2<T0 = i32, T1 = &'static str>>(tuple: &T) -> String {
//!     format!("{}:{}", tuple.item0(), tuple.item1())
//! }
//!
//! assert_eq!(describe(&(1, "a")), "1:a");
//! assert_eq!(describe(&(1, "a", true)), "1:a");
//! ```

use variadics_please::all_tuples_enumerated;

use crate::element::Element;
use crate::tuple::Tuple;

/// A tuple with at least one element.
pub trait AtLeast1: Tuple {
    /// Type at position 0.
    type T0: Element;

    /// Element at position 0.
    fn item0(&self) -> &Self::T0;

    /// The leading element as a one-element view.
    fn prefix1(&self) -> (&Self::T0,) {
        (self.item0(),)
    }
}

/// A tuple with at least two elements.
pub trait AtLeast2: AtLeast1 {
    /// Type at position 1.
    type T1: Element;

    /// Element at position 1.
    fn item1(&self) -> &Self::T1;

    /// The leading two elements.
    fn prefix2(&self) -> (&Self::T0, &Self::T1) {
        (self.item0(), self.item1())
    }
}

/// A tuple with at least three elements.
pub trait AtLeast3: AtLeast2 {
    /// Type at position 2.
    type T2: Element;

    /// Element at position 2.
    fn item2(&self) -> &Self::T2;

    /// The leading three elements.
    fn prefix3(&self) -> (&Self::T0, &Self::T1, &Self::T2) {
        (self.item0(), self.item1(), self.item2())
    }
}

/// A tuple with at least four elements.
pub trait AtLeast4: AtLeast3 {
    /// Type at position 3.
    type T3: Element;

    /// Element at position 3.
    fn item3(&self) -> &Self::T3;

    /// The leading four elements.
    fn prefix4(&self) -> (&Self::T0, &Self::T1, &Self::T2, &Self::T3) {
        (self.item0(), self.item1(), self.item2(), self.item3())
    }
}

/// A tuple with at least five elements.
pub trait AtLeast5: AtLeast4 {
    /// Type at position 4.
    type T4: Element;

    /// Element at position 4.
    fn item4(&self) -> &Self::T4;

    /// The leading five elements.
    fn prefix5(&self) -> (&Self::T0, &Self::T1, &Self::T2, &Self::T3, &Self::T4) {
        (
            self.item0(),
            self.item1(),
            self.item2(),
            self.item3(),
            self.item4(),
        )
    }
}

/// A tuple with at least six elements.
pub trait AtLeast6: AtLeast5 {
    /// Type at position 5.
    type T5: Element;

    /// Element at position 5.
    fn item5(&self) -> &Self::T5;

    /// The leading six elements.
    fn prefix6(
        &self,
    ) -> (
        &Self::T0,
        &Self::T1,
        &Self::T2,
        &Self::T3,
        &Self::T4,
        &Self::T5,
    ) {
        (
            self.item0(),
            self.item1(),
            self.item2(),
            self.item3(),
            self.item4(),
            self.item5(),
        )
    }
}

/// A tuple with at least seven elements.
pub trait AtLeast7: AtLeast6 {
    /// Type at position 6.
    type T6: Element;

    /// Element at position 6.
    fn item6(&self) -> &Self::T6;

    /// The leading seven elements.
    fn prefix7(
        &self,
    ) -> (
        &Self::T0,
        &Self::T1,
        &Self::T2,
        &Self::T3,
        &Self::T4,
        &Self::T5,
        &Self::T6,
    ) {
        (
            self.item0(),
            self.item1(),
            self.item2(),
            self.item3(),
            self.item4(),
            self.item5(),
            self.item6(),
        )
    }
}

/// A tuple with all eight fixed positions occupied.
pub trait AtLeast8: AtLeast7 {
    /// Type at position 7.
    type T7: Element;

    /// Element at position 7.
    fn item7(&self) -> &Self::T7;

    /// All eight elements.
    fn prefix8(
        &self,
    ) -> (
        &Self::T0,
        &Self::T1,
        &Self::T2,
        &Self::T3,
        &Self::T4,
        &Self::T5,
        &Self::T6,
        &Self::T7,
    ) {
        (
            self.item0(),
            self.item1(),
            self.item2(),
            self.item3(),
            self.item4(),
            self.item5(),
            self.item6(),
            self.item7(),
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Native tuple impls
// ─────────────────────────────────────────────────────────────────────────────

macro_rules! impl_level {
    ($Trait:ident, $Assoc:ident, $item:ident, $idx:tt, $P:ident, ($($All:ident),+)) => {
        impl<$($All: Element),+> $Trait for ($($All,)+) {
            type $Assoc = $P;

            fn $item(&self) -> &$P {
                &self.$idx
            }
        }
    };
}

macro_rules! impl_at_least_level {
    (0, $P:ident, $all:tt) => { impl_level!(AtLeast1, T0, item0, 0, $P, $all); };
    (1, $P:ident, $all:tt) => { impl_level!(AtLeast2, T1, item1, 1, $P, $all); };
    (2, $P:ident, $all:tt) => { impl_level!(AtLeast3, T2, item2, 2, $P, $all); };
    (3, $P:ident, $all:tt) => { impl_level!(AtLeast4, T3, item3, 3, $P, $all); };
    (4, $P:ident, $all:tt) => { impl_level!(AtLeast5, T4, item4, 4, $P, $all); };
    (5, $P:ident, $all:tt) => { impl_level!(AtLeast6, T5, item5, 5, $P, $all); };
    (6, $P:ident, $all:tt) => { impl_level!(AtLeast7, T6, item6, 6, $P, $all); };
    (7, $P:ident, $all:tt) => { impl_level!(AtLeast8, T7, item7, 7, $P, $all); };
}

macro_rules! impl_at_least {
    ($(($idx:tt, $P:ident)),+) => {
        impl_at_least!(@levels ($($P),+); $(($idx, $P))+);
    };
    (@levels $all:tt; $(($idx:tt, $P:ident))+) => {
        $(impl_at_least_level!($idx, $P, $all);)+
    };
}

all_tuples_enumerated!(impl_at_least, 1, 8, P);
