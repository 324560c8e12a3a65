//! Timer primitives with an explicit owner.
//!
//! - [`Debouncer`]: cancellable. Each trigger cancels the pending timeout and
//!   arms a fresh one, so the task runs once a burst has paused.
//! - [`AnimationGuard`]: its timeout is not cancellable. It stays active until
//!   that timeout fires or it is released explicitly; a timeout left over
//!   from an earlier arm never releases a later one.

use std::cell::Cell;
use std::rc::Rc;

use crate::host::{Host, TimerId};

#[derive(Debug)]
pub struct Debouncer {
    delay_ms: u32,
    pending: Rc<Cell<Option<TimerId>>>,
}

impl Debouncer {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            delay_ms,
            pending: Rc::new(Cell::new(None)),
        }
    }

    pub fn trigger<H: Host>(&self, host: &H, task: impl FnOnce() + 'static) {
        if let Some(previous) = self.pending.take() {
            host.clear_timeout(previous);
        }
        let pending = self.pending.clone();
        let id = host.set_timeout(
            self.delay_ms,
            Box::new(move || {
                pending.set(None);
                task();
            }),
        );
        self.pending.set(Some(id));
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get().is_some()
    }
}

#[derive(Debug, Clone, Default)]
pub struct AnimationGuard {
    active: Rc<Cell<bool>>,
    generation: Rc<Cell<u32>>,
}

impl AnimationGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    /// Hold the guard for `duration_ms`.
    pub fn arm<H: Host>(&self, host: &H, duration_ms: u32) {
        let armed = self.generation.get().wrapping_add(1);
        self.generation.set(armed);
        self.active.set(true);

        let active = self.active.clone();
        let generation = self.generation.clone();
        host.set_timeout(
            duration_ms,
            Box::new(move || {
                if generation.get() == armed {
                    active.set(false);
                }
            }),
        );
    }

    pub fn release(&self) {
        self.active.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::fake::FakeHost;

    #[test]
    fn debouncer_runs_once_after_burst_settles() {
        let host = FakeHost::new();
        let debouncer = Debouncer::new(100);
        let runs = Rc::new(Cell::new(0));

        for _ in 0..5 {
            let runs = runs.clone();
            debouncer.trigger(&host, move || runs.set(runs.get() + 1));
            host.advance(60);
        }
        assert_eq!(runs.get(), 0);
        assert!(debouncer.is_pending());

        host.advance(40);
        assert_eq!(runs.get(), 1);
        assert!(!debouncer.is_pending());
        assert_eq!(host.pending_timers(), 0);
    }

    #[test]
    fn guard_releases_after_duration() {
        let host = FakeHost::new();
        let guard = AnimationGuard::new();
        guard.arm(&host, 600);

        host.advance(599);
        assert!(guard.is_active());
        host.advance(1);
        assert!(!guard.is_active());
    }

    #[test]
    fn released_guard_is_not_cut_short_by_an_earlier_timeout() {
        let host = FakeHost::new();
        let guard = AnimationGuard::new();
        guard.arm(&host, 600);
        host.advance(400);

        guard.release();
        assert!(!guard.is_active());

        guard.arm(&host, 600);
        host.advance(200);
        assert!(guard.is_active(), "the first arm's timeout must not release");
        host.advance(400);
        assert!(!guard.is_active());
    }
}
