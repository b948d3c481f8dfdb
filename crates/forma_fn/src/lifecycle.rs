//! Started/stopped lifecycle for units that own expensive resources.
//!
//! A [`ParametricFn`] starts stopped. The first `apply` runs the unit's
//! [`Parametric::start`] hook exactly once, even under concurrent first use:
//! one caller performs startup while the others block on the start gate and
//! then observe the started state. [`ParametricFn::stop`] returns the unit to
//! the stopped state; the next `apply` starts it again.
//!
//! Ordering starts and stops across many units is the job of whatever
//! registry owns them, through the object-safe [`Managed`] trait.
//!
//! # Example
//!
//! ```
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use forma_fn::prelude::*;
//!
//! #[derive(Default)]
//! struct Pool {
//!     opened: AtomicUsize,
//! }
//!
//! impl Parametric for Pool {
//!     fn start(&self) -> Result<(), FnError> {
//!         self.opened.fetch_add(1, Ordering::SeqCst);
//!         Ok(())
//!     }
//! }
//!
//! impl Func<u32, u32> for Pool {
//!     fn apply(&self, input: &u32) -> Result<u32, FnError> {
//!         Ok(input + 1)
//!     }
//! }
//!
//! let pooled = ParametricFn::new(Pool::default());
//! assert!(pooled.is_stopped());
//!
//! assert_eq!(pooled.apply(&1).unwrap(), 2);
//! assert_eq!(pooled.apply(&2).unwrap(), 3);
//! assert!(!pooled.is_stopped());
//! assert_eq!(pooled.inner().opened.load(Ordering::SeqCst), 1);
//! ```

use core::any::type_name;
use core::fmt;
use core::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use crate::error::FnError;
use crate::func::Func;

// ─────────────────────────────────────────────────────────────────────────────
// Lifecycle
// ─────────────────────────────────────────────────────────────────────────────

/// The stopped flag plus the gate serializing transitions.
///
/// `stopped` is read without locking on the hot path; transitions happen with
/// the gate held and are published with release ordering.
pub struct Lifecycle {
    stopped: AtomicBool,
    gate: Mutex<()>,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifecycle {
    /// Creates a lifecycle in the stopped state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stopped: AtomicBool::new(true),
            gate: Mutex::new(()),
        }
    }

    /// Returns `true` while stopped.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }

    /// Runs `start` if stopped, exactly once across concurrent callers.
    ///
    /// Returns `Ok(true)` for the caller that performed the start and
    /// `Ok(false)` for every caller that found the unit already started.
    ///
    /// # Errors
    ///
    /// Returns the error from `start`; the lifecycle then stays stopped.
    pub fn ensure_started<F>(&self, start: F) -> Result<bool, FnError>
    where
        F: FnOnce() -> Result<(), FnError>,
    {
        if !self.is_stopped() {
            return Ok(false);
        }

        let _gate = self.gate.lock();
        if !self.is_stopped() {
            return Ok(false);
        }

        start()?;
        self.stopped.store(false, Ordering::Release);
        Ok(true)
    }

    /// Runs `stop` and marks the lifecycle stopped, if it was started.
    ///
    /// Returns `true` if a transition happened.
    pub fn stop_with<F: FnOnce()>(&self, stop: F) -> bool {
        let _gate = self.gate.lock();
        if self.is_stopped() {
            return false;
        }
        stop();
        self.stopped.store(true, Ordering::Release);
        true
    }
}

impl fmt::Debug for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lifecycle")
            .field("stopped", &self.is_stopped())
            .finish_non_exhaustive()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Parametric units
// ─────────────────────────────────────────────────────────────────────────────

/// Startup and shutdown hooks for a resource-owning unit.
pub trait Parametric: Send + Sync + 'static {
    /// Acquires resources. Runs once before the first application after
    /// construction or after a stop.
    ///
    /// # Errors
    ///
    /// A failed start leaves the unit stopped; the error reaches the caller of
    /// `apply`.
    fn start(&self) -> Result<(), FnError> {
        Ok(())
    }

    /// Releases resources.
    fn stop(&self) {}
}

/// A unit guarded by a [`Lifecycle`].
pub struct ParametricFn<P> {
    inner: P,
    lifecycle: Lifecycle,
}

impl<P: Parametric> ParametricFn<P> {
    /// Wraps `inner` in the stopped state.
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            lifecycle: Lifecycle::new(),
        }
    }

    /// The wrapped unit.
    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Returns `true` while stopped.
    pub fn is_stopped(&self) -> bool {
        self.lifecycle.is_stopped()
    }

    /// Starts the unit if it is stopped.
    ///
    /// Returns `Ok(true)` if this call performed the start.
    ///
    /// # Errors
    ///
    /// Returns the error raised by [`Parametric::start`].
    pub fn start(&self) -> Result<bool, FnError> {
        let started = self.lifecycle.ensure_started(|| {
            tracing::debug!(unit = type_name::<P>(), "starting parametric unit");
            self.inner.start()
        })?;
        if started {
            tracing::debug!(unit = type_name::<P>(), "parametric unit started");
        }
        Ok(started)
    }

    /// Stops the unit. Nested units are not stopped.
    ///
    /// Returns `true` if the unit was running.
    pub fn stop(&self) -> bool {
        self.lifecycle.stop_with(|| {
            tracing::debug!(unit = type_name::<P>(), "stopping parametric unit");
            self.inner.stop();
        })
    }
}

impl<I, O, P> Func<I, O> for ParametricFn<P>
where
    P: Parametric + Func<I, O>,
{
    fn apply(&self, input: &I) -> Result<O, FnError> {
        self.start()?;
        self.inner.apply(input)
    }

    fn is_pure(&self) -> bool {
        self.inner.is_pure()
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}

impl<P> fmt::Debug for ParametricFn<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParametricFn")
            .field("unit", &type_name::<P>())
            .field("lifecycle", &self.lifecycle)
            .finish()
    }
}

/// Object-safe lifecycle control, for registries that manage many units.
pub trait Managed: Send + Sync {
    /// Returns `true` while stopped.
    fn is_stopped(&self) -> bool;

    /// Starts the unit if stopped. Returns `Ok(true)` if this call started it.
    ///
    /// # Errors
    ///
    /// Returns the error raised by the unit's start hook.
    fn start(&self) -> Result<bool, FnError>;

    /// Stops the unit. Returns `true` if it was running.
    fn stop(&self) -> bool;

    /// The managed unit's type name.
    fn name(&self) -> &'static str;
}

impl<P: Parametric> Managed for ParametricFn<P> {
    fn is_stopped(&self) -> bool {
        ParametricFn::is_stopped(self)
    }

    fn start(&self) -> Result<bool, FnError> {
        ParametricFn::start(self)
    }

    fn stop(&self) -> bool {
        ParametricFn::stop(self)
    }

    fn name(&self) -> &'static str {
        type_name::<P>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    #[derive(Default)]
    struct Counting {
        starts: AtomicUsize,
        stops: AtomicUsize,
        fail_start: AtomicBool,
    }

    impl Parametric for Counting {
        fn start(&self) -> Result<(), FnError> {
            if self.fail_start.load(Ordering::SeqCst) {
                return Err(FnError::failed("resource unavailable"));
            }
            self.starts.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn stop(&self) {
            self.stops.fetch_add(1, Ordering::SeqCst);
        }
    }

    impl Func<i32, i32> for Counting {
        fn apply(&self, input: &i32) -> Result<i32, FnError> {
            Ok(input * 2)
        }
    }

    #[test]
    fn starts_stopped() {
        let unit = ParametricFn::new(Counting::default());
        assert!(unit.is_stopped());
        assert_eq!(unit.inner().starts.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn first_apply_starts_once() {
        let unit = ParametricFn::new(Counting::default());
        assert_eq!(unit.apply(&1).unwrap(), 2);
        assert_eq!(unit.apply(&2).unwrap(), 4);
        assert!(!unit.is_stopped());
        assert_eq!(unit.inner().starts.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn stop_then_apply_restarts() {
        let unit = ParametricFn::new(Counting::default());
        unit.apply(&1).unwrap();

        assert!(unit.stop());
        assert!(unit.is_stopped());
        assert!(!unit.stop());
        assert_eq!(unit.inner().stops.load(Ordering::SeqCst), 1);

        unit.apply(&1).unwrap();
        assert_eq!(unit.inner().starts.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn failed_start_stays_stopped() {
        let unit = ParametricFn::new(Counting::default());
        unit.inner().fail_start.store(true, Ordering::SeqCst);

        assert!(matches!(unit.apply(&1), Err(FnError::Failed(_))));
        assert!(unit.is_stopped());

        unit.inner().fail_start.store(false, Ordering::SeqCst);
        assert_eq!(unit.apply(&1).unwrap(), 2);
        assert!(!unit.is_stopped());
    }

    #[test]
    fn managed_through_trait_object() {
        let unit: Arc<dyn Managed> = Arc::new(ParametricFn::new(Counting::default()));
        assert!(unit.is_stopped());
        assert!(unit.start().unwrap());
        assert!(!unit.start().unwrap());
        assert!(unit.stop());
        assert!(unit.name().ends_with("Counting"));
    }

    #[test]
    fn lifecycle_reports_the_starting_caller() {
        let lifecycle = Lifecycle::new();
        assert!(lifecycle.ensure_started(|| Ok(())).unwrap());
        assert!(!lifecycle.ensure_started(|| Ok(())).unwrap());
        assert!(lifecycle.stop_with(|| {}));
        assert!(lifecycle.is_stopped());
    }
}
