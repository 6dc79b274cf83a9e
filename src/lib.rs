//! Tokenlab: an interactive token state engine
//!
//! Tokenlab backs tools that let a user sculpt a 32-byte "token" value,
//! watch an external generator render it, and replay, undo, or automate
//! its evolution. The crate follows a "pure core, imperative shell"
//! layout: the state model is pure functions over immutable snapshots,
//! while timers, randomness, and renderer messaging are capabilities
//! injected at the edges.
//!
//! # Core Concepts
//!
//! - **State**: one immutable [`core::TokenState`] snapshot holding value array,
//!   canonical hash, lock mask, undo history
//! - **Commands**: a tagged [`engine::Command`] type with a pure
//!   transition function, committed by [`engine::TokenEngine`]
//! - **Automation**: a timed loop that redraws unlocked bytes and signals
//!   a renderer to capture each frame, driven by a host-supplied
//!   [`automation::Scheduler`]
//!
//! # Example
//!
//! ```rust
//! use tokenlab::{ManualScheduler, TokenEngine};
//!
//! let mut engine = TokenEngine::new(ManualScheduler::new());
//!
//! engine.set_value(0, 255)?;
//! assert!(engine.hash().as_str().starts_with("0xff"));
//!
//! engine.toggle_lock(0)?;
//! engine.randomize()?;
//! assert!(engine.hash().as_str().starts_with("0xff")); // locked byte survives
//!
//! engine.undo()?;
//! engine.undo()?;
//! assert_eq!(*engine.hash(), tokenlab::core::TokenHash::zero());
//! # Ok::<(), tokenlab::EngineError>(())
//! ```

pub mod automation;
pub mod checkpoint;
pub mod core;
pub mod engine;
pub mod random;
pub mod render;

// Re-export commonly used types
pub use automation::{AutomationConfig, AutomationLoop, AutomationState, ManualScheduler, Scheduler};
pub use core::{decode, encode, TokenHash, TokenState, TokenValues, TOKEN_WIDTH};
pub use engine::{AutomationTick, Command, EngineError, TokenEngine};
pub use random::Randomizer;
pub use render::{RendererTarget, ScreenshotRequest, SnapshotSink};
