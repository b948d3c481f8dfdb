//! Immutable heterogeneous tuples for function-level programming (Layer 1).
//!
//! `forma_tuple` is the multi-value carrier used by the combinators in
//! `forma_fn`:
//!
//! - [`element`] - Type-erased tuple elements with structural equality
//! - [`mod@tuple`] - The object-safe [`Tuple`](tuple::Tuple) view over native tuples of arity 0..=8
//! - [`at_least`] - Arity subsumption through the `AtLeastN` trait chain
//! - [`tpn`] - [`TpN`](tpn::TpN), the variable-arity overflow tuple
//!
//! # Architecture
//!
//! - **Layer 1** (`forma_tuple`): tuple model (this crate)
//! - **Layer 2** (`forma_fn`): functional units and combinators
//! - **Layer 3** (`forma_tracing`): logging configuration
//!
//! Fixed arities are plain Rust tuples, so `(1, "a", true)` is already a
//! three-element tuple. Reads outside a tuple's arity return `None`.
//!
//! # Example
//!
//! ```
//! use forma_tuple::prelude::*;
//!
//! let narrow = (1_i32, "a");
//! let wide = (1_i32, "a", true);
//!
//! assert!(tuples_equal(&wide.view(2), &narrow));
//! assert!(!tuples_equal(&wide, &narrow));
//! assert_eq!(wide.prefix2(), (&1, &"a"));
//! ```

/// Type-erased tuple elements.
pub mod element;

/// The `Tuple` trait and native tuple support.
pub mod tuple;

/// Arity subsumption traits.
pub mod at_least;

/// Variable-arity tuples.
pub mod tpn;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::at_least::*;
    pub use crate::element::{Element, elements_equal};
    pub use crate::tpn;
    pub use crate::tpn::TpN;
    pub use crate::tuple::{MAX_FIXED_ARITY, Prefix, Tuple, TupleDisplay, tuple_hash, tuples_equal};
}
