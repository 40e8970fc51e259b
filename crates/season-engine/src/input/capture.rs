//! Pointer capture: scoped registration of process-wide move/release listeners.
//!
//! A drag can carry the pointer off the drawing surface, so while dragging the
//! host must listen on something wider than the surface (the whole document in
//! a browser). Registration is acquired when a drag starts and handed back as a
//! [`CaptureGuard`]; dropping the guard deregisters, on every exit path.

use std::cell::Cell;
use std::rc::Rc;

/// Live listener registration. Dropping it runs the host's deregistration.
#[must_use = "dropping the guard immediately deregisters the listeners"]
pub struct CaptureGuard {
    release: Option<Box<dyn FnOnce()>>,
}

impl CaptureGuard {
    /// Wrap a host deregistration callback.
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A guard with nothing to release.
    pub fn detached() -> Self {
        Self { release: None }
    }
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl std::fmt::Debug for CaptureGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureGuard")
            .field("live", &self.release.is_some())
            .finish()
    }
}

/// Host hook for registering move/release listeners for one drag episode.
pub trait PointerCapture {
    /// Register the listeners. The returned guard deregisters them on drop.
    fn attach(&mut self) -> CaptureGuard;
}

/// For hosts that already forward every pointer event (tests, native shells).
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCapture;

impl PointerCapture for NoCapture {
    fn attach(&mut self) -> CaptureGuard {
        CaptureGuard::detached()
    }
}

/// Headless capture that only counts registrations.
///
/// Clones share the same counters, so a test can keep one clone and hand
/// the other to the simulation.
#[derive(Debug, Default, Clone)]
pub struct CountingCapture {
    live: Rc<Cell<usize>>,
    total: Rc<Cell<usize>>,
}

impl CountingCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registrations currently held.
    pub fn live(&self) -> usize {
        self.live.get()
    }

    /// Registrations ever made.
    pub fn total(&self) -> usize {
        self.total.get()
    }
}

impl PointerCapture for CountingCapture {
    fn attach(&mut self) -> CaptureGuard {
        self.live.set(self.live.get() + 1);
        self.total.set(self.total.get() + 1);
        let live = Rc::clone(&self.live);
        CaptureGuard::new(move || live.set(live.get() - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_releases_on_drop() {
        let mut capture = CountingCapture::new();
        let guard = capture.attach();
        assert_eq!(capture.live(), 1);
        drop(guard);
        assert_eq!(capture.live(), 0);
        assert_eq!(capture.total(), 1);
    }

    #[test]
    fn clones_share_counters() {
        let probe = CountingCapture::new();
        let mut handed_out = probe.clone();
        let _a = handed_out.attach();
        let _b = handed_out.attach();
        assert_eq!(probe.live(), 2);
    }

    #[test]
    fn detached_guard_is_inert() {
        let guard = NoCapture.attach();
        assert_eq!(format!("{guard:?}"), "CaptureGuard { live: false }");
    }
}
