//! # Forma Internal Library
//!
//! Re-exports the core Forma crates for convenience.

/// Layer 1: Tuple model.
pub use forma_tuple;

/// Layer 2: Functional units and combinators.
pub use forma_fn;

/// Layer 3: Logging configuration.
pub use forma_tracing;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use forma_fn::prelude::*;
    pub use forma_tracing::{Source as TracingSource, TracingConfig, TracingFormat};
    pub use forma_tuple::prelude::*;
}
