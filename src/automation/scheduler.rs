//! The periodic-callback capability supplied by the host environment.

use std::time::Duration;

/// Start-periodic/cancel primitive injected into the automation loop.
///
/// The engine never sleeps or spawns on its own: the host owns the clock
/// and delivers ticks by calling back into the engine. This keeps the loop
/// deterministic under test: substitute a [`ManualScheduler`] and drive
/// ticks by hand.
pub trait Scheduler {
    type Handle;

    /// Arrange for a callback every `period`; returns the handle used to
    /// cancel it.
    fn start_periodic(&mut self, period: Duration) -> Self::Handle;

    /// Cancel a previously started timer. Cancelling a timer that already
    /// fired its last callback must be harmless.
    fn cancel(&mut self, handle: Self::Handle);
}

/// A scheduler that never fires on its own.
///
/// It only records what was asked of it; the caller delivers ticks
/// explicitly. This is the deterministic stand-in for a host timer in
/// tests and host-driven event loops.
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    next_handle: u64,
    active: Option<(u64, Duration)>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a periodic timer is currently registered.
    pub fn is_scheduled(&self) -> bool {
        self.active.is_some()
    }

    /// Period of the registered timer, if any.
    pub fn period(&self) -> Option<Duration> {
        self.active.map(|(_, period)| period)
    }
}

impl Scheduler for ManualScheduler {
    type Handle = u64;

    fn start_periodic(&mut self, period: Duration) -> u64 {
        self.next_handle += 1;
        self.active = Some((self.next_handle, period));
        self.next_handle
    }

    fn cancel(&mut self, handle: u64) {
        if self.active.map(|(id, _)| id) == Some(handle) {
            self.active = None;
        }
    }
}
