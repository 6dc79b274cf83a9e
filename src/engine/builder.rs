//! Fluent construction of a [`TokenEngine`].

use super::TokenEngine;
use crate::automation::{AutomationLoop, Scheduler};
use crate::core::{TokenParams, TokenState};
use crate::random::Randomizer;
use crate::render::{NullSink, RendererTarget, SnapshotSink};
use thiserror::Error;

/// Errors that can occur when building an engine.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("randomization range is inverted ({min} > {max})")]
    InvalidRange { min: u8, max: u8 },
}

/// Builder for a [`TokenEngine`] with sensible defaults: entropy-seeded
/// randomization, a [`NullSink`], and an invalid renderer target (so no
/// snapshots are dispatched until a host installs a real one).
pub struct EngineBuilder<S: Scheduler> {
    scheduler: S,
    sink: Box<dyn SnapshotSink>,
    params: TokenParams,
    seed: Option<u64>,
    renderer: RendererTarget,
}

impl<S: Scheduler> EngineBuilder<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            sink: Box::new(NullSink),
            params: TokenParams::default(),
            seed: None,
            renderer: RendererTarget::default(),
        }
    }

    /// Install the snapshot sink automation reports frames to.
    pub fn sink(mut self, sink: impl SnapshotSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Override the randomization parameters.
    pub fn params(mut self, params: TokenParams) -> Self {
        self.params = params;
        self
    }

    /// Seed the randomizer for reproducible runs.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Install the renderer target configuration.
    pub fn renderer(mut self, renderer: RendererTarget) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn build(self) -> Result<TokenEngine<S>, BuildError> {
        if self.params.min > self.params.max {
            return Err(BuildError::InvalidRange {
                min: self.params.min,
                max: self.params.max,
            });
        }

        let randomizer = match self.seed {
            Some(seed) => Randomizer::seeded(seed),
            None => Randomizer::from_entropy(),
        };

        Ok(TokenEngine {
            state: TokenState::with_params(self.params),
            randomizer,
            automation: AutomationLoop::new(self.scheduler),
            sink: self.sink,
            renderer: self.renderer,
            metadata: Default::default(),
        })
    }
}
