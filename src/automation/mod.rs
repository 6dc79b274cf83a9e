//! Timed automation of repeated randomization.
//!
//! The loop is a small state machine, `Idle <-> Running`, owning the one
//! timer handle in the system. It decides *when* a randomization happens;
//! the engine performs the actual commit and snapshot dispatch, so the
//! loop itself stays free of token semantics.
//!
//! Tick accounting: the immediate seed randomization performed by `start`
//! goes through the same tick path as scheduled callbacks, so mutations
//! occur at `tick_count` 1..=total, exactly `total` visible
//! randomizations. The tick that pushes `tick_count` past `total` stops
//! the loop without generating.

mod config;
mod scheduler;

pub use config::{AutomationConfig, ConfigViolation, InvalidAutomationConfig};
pub use scheduler::{ManualScheduler, Scheduler};

use serde::{Deserialize, Serialize};
use std::time::Duration;
use stillwater::validation::Validation;

/// Current phase of the automation loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AutomationState {
    Idle,
    Running {
        /// Completed randomizations this run, 0 before the seed tick.
        tick_count: u32,
        /// Target randomization count.
        total: u32,
        /// Timer period.
        interval: Duration,
    },
}

impl AutomationState {
    pub fn name(&self) -> &str {
        match self {
            Self::Idle => "Idle",
            Self::Running { .. } => "Running",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running { .. })
    }
}

/// What a delivered tick asks of the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickDecision {
    /// Nothing running; a late callback after stop. Ignore.
    Idle,
    /// Perform randomization number `tick` (1-based within the run).
    Step { tick: u32 },
    /// The run went one past its target and has stopped.
    Finished,
}

/// The timed state machine driving repeated randomization.
///
/// # Example
///
/// ```rust
/// use tokenlab::automation::{
///     AutomationConfig, AutomationLoop, ManualScheduler, TickDecision,
/// };
///
/// let mut automation = AutomationLoop::new(ManualScheduler::new());
/// automation.start(AutomationConfig::new(2, 10)).unwrap();
///
/// assert_eq!(automation.tick(), TickDecision::Step { tick: 1 });
/// assert_eq!(automation.tick(), TickDecision::Step { tick: 2 });
/// assert_eq!(automation.tick(), TickDecision::Finished);
/// assert!(automation.state().is_idle());
/// assert_eq!(automation.progress_percent(), 100);
/// ```
pub struct AutomationLoop<S: Scheduler> {
    scheduler: S,
    handle: Option<S::Handle>,
    state: AutomationState,
    progress_percent: u8,
}

impl<S: Scheduler> AutomationLoop<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            handle: None,
            state: AutomationState::Idle,
            progress_percent: 0,
        }
    }

    pub fn state(&self) -> &AutomationState {
        &self.state
    }

    /// Percentage of the current run completed; 100 after any stop.
    pub fn progress_percent(&self) -> u8 {
        self.progress_percent
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Begin a run: validate, register the periodic timer, reset counters.
    ///
    /// All rejection reasons are accumulated: a zero total, a zero
    /// interval, and a run already in flight are reported together. The
    /// loop stays `Idle` on rejection. The caller is expected to deliver
    /// the immediate seed tick right after a successful start.
    pub fn start(&mut self, config: AutomationConfig) -> Result<(), InvalidAutomationConfig> {
        let mut checks = vec![config.validate()];
        if self.state.is_running() {
            checks.push(Validation::fail(ConfigViolation::AlreadyRunning));
        }

        match Validation::all_vec(checks).map(|_| ()) {
            Validation::Success(()) => {}
            Validation::Failure(violations) => {
                return Err(InvalidAutomationConfig {
                    violations: violations.iter().cloned().collect(),
                });
            }
        }

        self.handle = Some(self.scheduler.start_periodic(config.interval));
        self.state = AutomationState::Running {
            tick_count: 0,
            total: config.total,
            interval: config.interval,
        };
        self.progress_percent = 0;
        Ok(())
    }

    /// Account for one delivered tick.
    ///
    /// Increments the tick count; once it passes the target the loop stops
    /// itself and reports `Finished` without requesting a randomization.
    pub fn tick(&mut self) -> TickDecision {
        match self.state {
            AutomationState::Idle => TickDecision::Idle,
            AutomationState::Running {
                tick_count,
                total,
                interval,
            } => {
                let tick = tick_count + 1;
                if tick > total {
                    self.stop();
                    return TickDecision::Finished;
                }
                self.state = AutomationState::Running {
                    tick_count: tick,
                    total,
                    interval,
                };
                self.progress_percent = progress(tick, total);
                TickDecision::Step { tick }
            }
        }
    }

    /// Cancel the run: clear the timer handle, clamp progress to 100,
    /// return to `Idle`.
    ///
    /// Idempotent; a cleared handle means there is nothing to cancel, and
    /// a second stop changes nothing.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.scheduler.cancel(handle);
        }
        self.state = AutomationState::Idle;
        self.progress_percent = 100;
    }
}

fn progress(tick: u32, total: u32) -> u8 {
    ((u64::from(tick) * 100) / u64::from(total)).min(100) as u8
}
