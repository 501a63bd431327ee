//! Step observer trait for monitoring cloth simulation progress.

/// Hooks called at each phase of [`Cloth::step`](crate::cloth::Cloth::step).
///
/// All methods default to no-ops. Useful for profiling, debug overlays or
/// counting contacts in tests.
pub trait StepObserver {
    /// Called after gravity, drag, wind and springs have been accumulated.
    fn on_forces(&mut self) {}

    /// Called after every point has been integrated, floor and sphere
    /// contacts included.
    fn on_integrate(&mut self) {}

    /// Called after the self-collision pass with the number of pairs pushed
    /// apart. Not called while self-collision is off.
    fn on_self_collision(&mut self, _pairs_resolved: usize) {}

    /// Called when a step is fully complete.
    fn on_step_complete(&mut self) {}
}

/// A no-op observer. Use as default when no observation needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}
