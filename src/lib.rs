//! Backus-style functional combinators over heterogeneous tuples.
//!
//! ```
//! use forma::prelude::*;
//!
//! let stats = Construction::new(|xs: &Vec<i32>| xs.len())
//!     .fork(|xs: &Vec<i32>| xs.iter().sum::<i32>())
//!     .build();
//!
//! let (count, sum) = stats.apply(&vec![1, 2, 3]).unwrap();
//! assert_eq!((count, sum), (3, 6));
//! assert_eq!((count, sum).display().to_string(), "{3,6}");
//! ```

pub use forma_internal::*;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use forma_internal::prelude::*;
}
