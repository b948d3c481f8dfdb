//! Functional units and FL-style combinators (Layer 2).
//!
//! `forma_fn` builds composite functions out of primitive ones, after the
//! combining forms of Backus's FL:
//!
//! - [`mod@func`] - The [`Func`](func::Func) trait, closures as units, `identity`, `constant`
//! - [`composition`] - Sequential composition over a flat stage list
//! - [`construction`] - One input fanned out to many members, collected positionally
//! - [`consumer`] - Output-less units and flat consumer groups
//! - [`supplier`] - Input-less units
//! - [`condition`] - Two-way branching on a predicate
//! - [`predicate`] - Predicate algebra with short-circuiting and flattening
//! - [`selector`] - Positional projection from any tuple
//! - [`lifecycle`] - Exactly-once startup for resource-owning units
//! - [`decorator`] - Before/after hooks around a unit
//! - [`map`] - Map and reduce over lists
//!
//! # Architecture
//!
//! - **Layer 1** (`forma_tuple`): tuple model
//! - **Layer 2** (`forma_fn`): functional units and combinators (this crate)
//! - **Layer 3** (`forma_tracing`): logging configuration
//!
//! Every combinator is assembled by a typed builder, then frozen with
//! `build()` into an immutable unit that can be shared and applied from any
//! thread. Evaluation is synchronous: members of a construction run one after
//! another on the caller's thread, in registration order.
//!
//! # Example
//!
//! ```
//! use forma_fn::prelude::*;
//!
//! let is_even = Predicate::new(|x: &i32| x % 2 == 0);
//!
//! let describe = Construction::new(|x: &i32| x + 1)
//!     .fork(|x: &i32| x * 2)
//!     .build()
//!     .pipe(|(inc, dbl): &(i32, i32)| inc + dbl)
//!     .build();
//!
//! let only_even = condition(is_even).then(describe).build();
//!
//! assert_eq!(only_even.apply(&4).unwrap(), Some(13));
//! assert_eq!(only_even.apply(&3).unwrap(), None);
//! ```

/// Errors raised by functional units.
pub mod error;

/// The functional unit trait and basic units.
pub mod func;

/// Type-erased units backing the flat combinator lists.
pub mod erased;

/// Sequential composition.
pub mod composition;

/// Construction (fork) combinator.
pub mod construction;

/// Consumer units.
pub mod consumer;

/// Supplier units.
pub mod supplier;

/// Conditional combinator.
pub mod condition;

/// Predicate algebra.
pub mod predicate;

/// Tuple element selection.
pub mod selector;

/// Parametric unit lifecycle.
pub mod lifecycle;

/// Decorators.
pub mod decorator;

/// Map and reduce.
pub mod map;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::composition::{Composed, Composition, compose};
    pub use crate::condition::{Condition, Conditional, When, condition, if_true};
    pub use crate::construction::{
        Collected, Constructed, Construction, DynFunc, Many, Push, Slots,
    };
    pub use crate::consumer::{ConsumerFn, combine, consumer};
    pub use crate::decorator::{Decorated, Decorator};
    pub use crate::erased::{ErasedFunc, SharedFunc};
    pub use crate::error::FnError;
    pub use crate::func::{
        Const, Func, FuncExt, Identity, Impure, TryFn, Value, constant, identity, impure, try_fn,
    };
    pub use crate::lifecycle::{Lifecycle, Managed, Parametric, ParametricFn};
    pub use crate::map::{MapFn, ReduceFn, map, reduce};
    pub use crate::predicate::{Predicate, PredicateConstruction, PredicateKind};
    pub use crate::selector::{Selector, select};
    pub use crate::supplier::{Supplier, SupplierFn, supplier};
}
