//! Bookkeeping for JS calls that re-enter the bridge from inside a dispatch.
//!
//! A DOM listener closure dispatches into the runner and then hands the new
//! model to the JS change callback. If that callback unmounts, the runner
//! (and the closure still on the stack) must survive until the outermost
//! dispatch returns, so the unmount is recorded and replayed there.

use std::cell::Cell;

#[derive(Debug, Default)]
pub struct DispatchScope {
    depth: Cell<u32>,
    unmount_requested: Cell<bool>,
}

impl DispatchScope {
    pub const fn new() -> Self {
        Self {
            depth: Cell::new(0),
            unmount_requested: Cell::new(false),
        }
    }

    pub fn in_dispatch(&self) -> bool {
        self.depth.get() > 0
    }

    pub fn enter(&self) {
        self.depth.set(self.depth.get() + 1);
    }

    /// Leave one dispatch level. Returns true when this was the outermost
    /// level and an unmount was requested inside it.
    pub fn exit(&self) -> bool {
        let depth = self.depth.get().saturating_sub(1);
        self.depth.set(depth);
        depth == 0 && self.unmount_requested.replace(false)
    }

    /// Record an unmount to run once the outermost dispatch ends.
    /// Returns false when no dispatch is running and the caller should
    /// unmount right away.
    pub fn defer_unmount(&self) -> bool {
        if !self.in_dispatch() {
            return false;
        }
        self.unmount_requested.set(true);
        true
    }

    /// Forget a pending unmount, e.g. once a fresh mount replaced the runner.
    pub fn clear(&self) {
        self.unmount_requested.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmount_outside_dispatch_is_immediate() {
        let scope = DispatchScope::new();
        assert!(!scope.defer_unmount());
        scope.enter();
        assert!(!scope.exit());
    }

    #[test]
    fn unmount_from_change_callback_waits_for_outermost_exit() {
        let scope = DispatchScope::new();
        scope.enter();
        // callback re-enters with another control event
        scope.enter();
        assert!(scope.defer_unmount());
        assert!(!scope.exit());
        assert!(scope.in_dispatch());
        assert!(scope.exit());
        assert!(!scope.in_dispatch());
        // replayed once only
        scope.enter();
        assert!(!scope.exit());
    }

    #[test]
    fn cleared_request_is_not_replayed() {
        let scope = DispatchScope::new();
        scope.enter();
        assert!(scope.defer_unmount());
        scope.clear();
        assert!(!scope.exit());
    }
}
