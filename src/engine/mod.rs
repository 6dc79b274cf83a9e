//! The engine coordinator.
//!
//! `TokenEngine` is the imperative shell around the pure core: it owns the
//! current [`TokenState`], the randomizer, the automation loop, and the
//! renderer boundary, and guarantees every operation leaves the model
//! consistent. There is no ambient instance; hosts construct one engine
//! and pass it where it is needed.

mod builder;
mod command;
mod error;

pub use builder::{BuildError, EngineBuilder};
pub use command::{apply, Command};
pub use error::EngineError;

use crate::automation::{AutomationConfig, AutomationLoop, Scheduler, TickDecision};
use crate::checkpoint::{Checkpoint, CheckpointError};
use crate::core::{TokenHash, TokenState};
use crate::random::Randomizer;
use crate::render::{RendererTarget, SnapshotSink};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Bookkeeping tracked for the engine's lifetime.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineMetadata {
    /// When the engine was created.
    pub created_at: DateTime<Utc>,

    /// Last committed change.
    pub updated_at: DateTime<Utc>,

    /// State-changing commands committed so far.
    pub commits: u64,
}

impl Default for EngineMetadata {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            created_at: now,
            updated_at: now,
            commits: 0,
        }
    }
}

/// Outcome of one delivered automation tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AutomationTick {
    /// No run in flight; late callbacks land here harmlessly.
    Idle,
    /// One randomization was committed and, for a valid renderer target,
    /// its snapshot requested.
    Stepped { tick: u32, hash: TokenHash },
    /// The run reached its target and returned to idle.
    Finished,
}

/// The coordinator owning all session state.
///
/// # Example
///
/// ```rust
/// use tokenlab::{ManualScheduler, TokenEngine};
///
/// let mut engine = TokenEngine::new(ManualScheduler::new());
/// engine.set_value(0, 255).unwrap();
/// assert!(engine.state().hash().as_str().starts_with("0xff"));
///
/// engine.undo().unwrap();
/// assert_eq!(engine.state().hash().as_str(), format!("0x{}", "0".repeat(64)));
/// ```
pub struct TokenEngine<S: Scheduler> {
    state: TokenState,
    randomizer: Randomizer,
    automation: AutomationLoop<S>,
    sink: Box<dyn SnapshotSink>,
    renderer: RendererTarget,
    metadata: EngineMetadata,
}

impl<S: Scheduler> TokenEngine<S> {
    /// An engine with default configuration; see [`EngineBuilder`] for the
    /// knobs.
    pub fn new(scheduler: S) -> Self {
        Self {
            state: TokenState::new(),
            randomizer: Randomizer::from_entropy(),
            automation: AutomationLoop::new(scheduler),
            sink: Box::new(crate::render::NullSink),
            renderer: RendererTarget::default(),
            metadata: EngineMetadata::default(),
        }
    }

    pub fn builder(scheduler: S) -> EngineBuilder<S> {
        EngineBuilder::new(scheduler)
    }

    pub fn state(&self) -> &TokenState {
        &self.state
    }

    pub fn hash(&self) -> &TokenHash {
        self.state.hash()
    }

    pub fn metadata(&self) -> &EngineMetadata {
        &self.metadata
    }

    pub fn automation(&self) -> &AutomationLoop<S> {
        &self.automation
    }

    pub fn renderer(&self) -> &RendererTarget {
        &self.renderer
    }

    /// Install the renderer configuration. The engine reads only the
    /// validity flag; address validation happened upstream.
    pub fn set_renderer(&mut self, renderer: RendererTarget) {
        self.renderer = renderer;
    }

    /// Run one command through the pure transition function and commit the
    /// result. On error the current state is untouched.
    pub fn dispatch(&mut self, command: Command) -> Result<&TokenState, EngineError> {
        let next = apply(&self.state, &command, &mut self.randomizer)?;
        if next != self.state {
            self.metadata.commits += 1;
            self.metadata.updated_at = Utc::now();
        }
        tracing::debug!(command = command.name(), "command applied");
        self.state = next;
        Ok(&self.state)
    }

    pub fn set_value(&mut self, index: usize, value: u16) -> Result<&TokenState, EngineError> {
        self.dispatch(Command::SetValue { index, value })
    }

    pub fn set_hash(&mut self, text: impl Into<String>) -> Result<&TokenState, EngineError> {
        self.dispatch(Command::SetHash { text: text.into() })
    }

    pub fn undo(&mut self) -> Result<&TokenState, EngineError> {
        self.dispatch(Command::Undo)
    }

    pub fn reset(&mut self) -> Result<&TokenState, EngineError> {
        self.dispatch(Command::Reset)
    }

    pub fn toggle_lock(&mut self, index: usize) -> Result<&TokenState, EngineError> {
        self.dispatch(Command::ToggleLock { index })
    }

    pub fn randomize(&mut self) -> Result<&TokenState, EngineError> {
        self.dispatch(Command::Randomize)
    }

    pub fn set_number(&mut self, number: u64) -> Result<&TokenState, EngineError> {
        self.dispatch(Command::SetNumber { number })
    }

    /// Begin an automation run and perform the immediate seed
    /// randomization, so the first frame renders without waiting a full
    /// interval.
    pub fn start_automation(
        &mut self,
        config: AutomationConfig,
    ) -> Result<AutomationTick, EngineError> {
        self.automation.start(config)?;
        tracing::debug!(
            total = config.total,
            interval_ms = config.interval.as_millis() as u64,
            "automation started"
        );
        self.automation_tick()
    }

    /// Account for one delivered timer callback.
    ///
    /// Any failure while committing or dispatching the snapshot stops the
    /// loop before the error propagates, so the timer never outlives a
    /// broken cycle.
    pub fn automation_tick(&mut self) -> Result<AutomationTick, EngineError> {
        match self.automation.tick() {
            TickDecision::Idle => Ok(AutomationTick::Idle),
            TickDecision::Finished => {
                tracing::debug!("automation finished");
                Ok(AutomationTick::Finished)
            }
            TickDecision::Step { tick } => match self.randomize_and_capture() {
                Ok(hash) => Ok(AutomationTick::Stepped { tick, hash }),
                Err(error) => {
                    self.automation.stop();
                    Err(error)
                }
            },
        }
    }

    /// Cancel any run in flight. Safe to call from any state, any number
    /// of times.
    pub fn stop_automation(&mut self) {
        self.automation.stop();
        tracing::debug!("automation stopped");
    }

    /// Capture the full session state for later restore or replay.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint::capture(&self.state, &self.metadata)
    }

    /// Replace the session state from a checkpoint.
    ///
    /// The checkpoint is validated first; a run in flight is stopped so
    /// the restored state is not immediately mutated by a stale timer.
    pub fn restore(&mut self, checkpoint: Checkpoint) -> Result<&TokenState, CheckpointError> {
        checkpoint.validate()?;
        if self.automation.state().is_running() {
            self.automation.stop();
        }
        self.state = checkpoint.state;
        self.metadata = checkpoint.metadata;
        self.metadata.updated_at = Utc::now();
        tracing::debug!("session state restored from checkpoint");
        Ok(&self.state)
    }

    fn randomize_and_capture(&mut self) -> Result<TokenHash, EngineError> {
        let hash = self.dispatch(Command::Randomize)?.hash().clone();
        if self.renderer.is_valid {
            self.sink.capture(&hash)?;
        } else {
            tracing::trace!("renderer target not valid, snapshot skipped");
        }
        Ok(hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automation::{AutomationState, ManualScheduler};
    use crate::render::{MemorySink, RenderError};

    fn test_engine(sink: MemorySink) -> TokenEngine<ManualScheduler> {
        TokenEngine::builder(ManualScheduler::new())
            .seed(1234)
            .sink(sink)
            .renderer(RendererTarget::new("https://viewer.example/token", true))
            .build()
            .unwrap()
    }

    #[test]
    fn dispatch_counts_only_state_changing_commits() {
        let mut engine = test_engine(MemorySink::new());

        engine.set_value(0, 9).unwrap();
        engine.set_number(3).unwrap(); // changes the ordinal, counts
        engine.set_number(3).unwrap(); // no change, does not count

        assert_eq!(engine.metadata().commits, 2);
    }

    #[test]
    fn failed_dispatch_leaves_state_untouched() {
        let mut engine = test_engine(MemorySink::new());
        engine.set_value(0, 8).unwrap();
        let before = engine.state().clone();

        assert!(engine.set_value(40, 8).is_err());
        assert!(engine.set_value(0, 300).is_err());
        assert!(engine.set_hash("0xzz").is_err());

        assert_eq!(*engine.state(), before);
    }

    #[test]
    fn automation_runs_to_completion_with_exact_counts() {
        let sink = MemorySink::new();
        let mut engine = test_engine(sink.clone());

        let seed = engine
            .start_automation(AutomationConfig::new(5, 10))
            .unwrap();
        assert!(matches!(seed, AutomationTick::Stepped { tick: 1, .. }));

        let mut ticks = vec![1u32];
        loop {
            match engine.automation_tick().unwrap() {
                AutomationTick::Stepped { tick, .. } => ticks.push(tick),
                AutomationTick::Finished => break,
                AutomationTick::Idle => panic!("loop went idle mid-run"),
            }
        }

        assert_eq!(ticks, vec![1, 2, 3, 4, 5]);
        assert_eq!(sink.len(), 5);
        assert_eq!(engine.metadata().commits, 5);
        assert_eq!(engine.state().history().len(), 5);
        assert!(engine.automation().state().is_idle());
        assert_eq!(engine.automation().progress_percent(), 100);
        assert!(!engine.automation().scheduler().is_scheduled());
    }

    #[test]
    fn automation_snapshots_carry_the_committed_hashes() {
        let sink = MemorySink::new();
        let mut engine = test_engine(sink.clone());

        engine
            .start_automation(AutomationConfig::new(2, 10))
            .unwrap();
        let hash_after_seed = engine.hash().clone();
        engine.automation_tick().unwrap();
        engine.automation_tick().unwrap(); // finishes

        let frames = sink.frames();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0], hash_after_seed);
        assert_eq!(frames[1], *engine.hash());
    }

    #[test]
    fn invalid_renderer_target_gates_snapshot_dispatch() {
        let sink = MemorySink::new();
        let mut engine = TokenEngine::builder(ManualScheduler::new())
            .seed(9)
            .sink(sink.clone())
            .build()
            .unwrap(); // default target: not valid

        engine
            .start_automation(AutomationConfig::new(2, 10))
            .unwrap();
        engine.automation_tick().unwrap();
        engine.automation_tick().unwrap();

        assert!(sink.is_empty());
        assert_eq!(engine.metadata().commits, 2); // commits still happen
    }

    #[test]
    fn set_renderer_enables_snapshot_dispatch() {
        let sink = MemorySink::new();
        let mut engine = TokenEngine::builder(ManualScheduler::new())
            .seed(9)
            .sink(sink.clone())
            .build()
            .unwrap();

        engine.set_renderer(RendererTarget::new("https://viewer.example/token", true));
        engine
            .start_automation(AutomationConfig::new(1, 10))
            .unwrap();

        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn start_while_running_is_rejected_and_run_survives() {
        let mut engine = test_engine(MemorySink::new());
        engine
            .start_automation(AutomationConfig::new(5, 10))
            .unwrap();

        let error = engine
            .start_automation(AutomationConfig::new(3, 10))
            .unwrap_err();
        assert!(matches!(error, EngineError::InvalidAutomationConfig(_)));
        assert!(engine.automation().state().is_running());
    }

    #[test]
    fn stop_automation_twice_never_panics() {
        let mut engine = test_engine(MemorySink::new());
        engine
            .start_automation(AutomationConfig::new(5, 10))
            .unwrap();

        engine.stop_automation();
        engine.stop_automation();

        assert!(engine.automation().state().is_idle());
        assert_eq!(engine.automation().progress_percent(), 100);
    }

    #[test]
    fn manual_edits_and_automation_share_one_history() {
        let mut engine = test_engine(MemorySink::new());
        engine.set_value(0, 5).unwrap();

        engine
            .start_automation(AutomationConfig::new(1, 10))
            .unwrap();
        engine.automation_tick().unwrap(); // finishes

        // One manual commit + one automation commit; undo rewinds the
        // automation commit first.
        assert_eq!(engine.state().history().len(), 2);
        let automated = engine.hash().clone();
        engine.undo().unwrap();
        assert_ne!(*engine.hash(), automated);
    }

    #[test]
    fn sink_failure_stops_the_loop_before_propagating() {
        struct FailingSink;
        impl SnapshotSink for FailingSink {
            fn capture(&self, _hash: &TokenHash) -> Result<(), RenderError> {
                Err(RenderError::ChannelClosed)
            }
        }

        let mut engine = TokenEngine::builder(ManualScheduler::new())
            .seed(3)
            .sink(FailingSink)
            .renderer(RendererTarget::new("https://viewer.example/token", true))
            .build()
            .unwrap();

        let error = engine
            .start_automation(AutomationConfig::new(5, 10))
            .unwrap_err();

        assert!(matches!(error, EngineError::Snapshot(_)));
        assert!(engine.automation().state().is_idle());
        assert!(!engine.automation().scheduler().is_scheduled());
    }

    #[test]
    fn late_ticks_after_stop_are_harmless() {
        let mut engine = test_engine(MemorySink::new());
        engine
            .start_automation(AutomationConfig::new(5, 10))
            .unwrap();
        engine.stop_automation();

        assert!(matches!(
            engine.automation_tick().unwrap(),
            AutomationTick::Idle
        ));
    }

    #[test]
    fn checkpoint_and_restore_round_trip() {
        let mut engine = test_engine(MemorySink::new());
        engine.set_value(0, 200).unwrap();
        engine.toggle_lock(3).unwrap();
        engine.set_number(42).unwrap();

        let checkpoint = engine.checkpoint();
        let saved = engine.state().clone();

        engine.reset().unwrap();
        assert_ne!(*engine.state(), saved);

        engine.restore(checkpoint).unwrap();
        assert_eq!(*engine.state(), saved);
        assert_eq!(engine.state().number(), 42);
    }

    #[test]
    fn restore_stops_a_running_automation() {
        let mut engine = test_engine(MemorySink::new());
        let checkpoint = engine.checkpoint();

        engine
            .start_automation(AutomationConfig::new(10, 10))
            .unwrap();
        assert!(matches!(
            engine.automation().state(),
            AutomationState::Running { .. }
        ));

        engine.restore(checkpoint).unwrap();
        assert!(engine.automation().state().is_idle());
    }

    #[test]
    fn automation_progress_is_monotonic_within_a_run() {
        let mut engine = test_engine(MemorySink::new());
        engine
            .start_automation(AutomationConfig::new(4, 10))
            .unwrap();

        let mut last = engine.automation().progress_percent();
        loop {
            match engine.automation_tick().unwrap() {
                AutomationTick::Finished => break,
                _ => {
                    let now = engine.automation().progress_percent();
                    assert!(now >= last);
                    last = now;
                }
            }
        }
        assert_eq!(engine.automation().progress_percent(), 100);
    }
}
