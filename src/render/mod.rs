//! The renderer boundary.
//!
//! The engine never talks to a renderer directly. It exposes the current
//! hash and, during automation, asks an injected [`SnapshotSink`] to
//! capture a frame for that hash. Fire-and-forget, no reply expected.
//! The wire form is a structured [`ScreenshotRequest`] message; the
//! transport, typically an embedded-document messaging channel, is the
//! host's concern.

use crate::core::TokenHash;
use serde::{Deserialize, Serialize};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use stillwater::effect::BoxedEffect;
use stillwater::prelude::*;
use thiserror::Error;

/// Command word carried by every snapshot message.
pub const SCREENSHOT_COMMAND: &str = "screenshot";

/// Errors at the renderer boundary.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to encode screenshot request: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("snapshot channel is closed")]
    ChannelClosed,
}

/// The message posted to the renderer for each captured frame:
/// `{"command": "screenshot", "token": <hash>}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenshotRequest {
    pub command: String,
    pub token: TokenHash,
}

impl ScreenshotRequest {
    pub fn new(token: TokenHash) -> Self {
        Self {
            command: SCREENSHOT_COMMAND.to_string(),
            token,
        }
    }

    pub fn to_json(&self) -> Result<String, RenderError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Renderer configuration consumed by the engine.
///
/// The address is validated elsewhere; the engine only reads `is_valid`
/// to decide whether snapshot dispatch is worth attempting.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RendererTarget {
    pub url: String,
    pub is_valid: bool,
}

impl RendererTarget {
    pub fn new(url: impl Into<String>, is_valid: bool) -> Self {
        Self {
            url: url.into(),
            is_valid,
        }
    }
}

/// Capability that delivers a "take snapshot" signal tagged with a hash.
pub trait SnapshotSink: Send + Sync {
    fn capture(&self, hash: &TokenHash) -> Result<(), RenderError>;
}

/// Sink that drops every signal; the default when no renderer is wired.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl SnapshotSink for NullSink {
    fn capture(&self, _hash: &TokenHash) -> Result<(), RenderError> {
        Ok(())
    }
}

/// Sink that records every captured hash in memory.
///
/// Clones share the same buffer, so a test can keep one clone and hand the
/// other to the engine.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    frames: Arc<Mutex<Vec<TokenHash>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every captured hash, oldest first.
    pub fn frames(&self) -> Vec<TokenHash> {
        self.frames
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn len(&self) -> usize {
        self.frames
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SnapshotSink for MemorySink {
    fn capture(&self, hash: &TokenHash) -> Result<(), RenderError> {
        self.frames
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(hash.clone());
        Ok(())
    }
}

/// Sink that serializes each request and posts it on a channel, the
/// in-process stand-in for a messaging-channel transport.
pub struct ChannelSink {
    sender: mpsc::Sender<String>,
}

impl ChannelSink {
    pub fn new(sender: mpsc::Sender<String>) -> Self {
        Self { sender }
    }
}

impl SnapshotSink for ChannelSink {
    fn capture(&self, hash: &TokenHash) -> Result<(), RenderError> {
        let message = ScreenshotRequest::new(hash.clone()).to_json()?;
        self.sender
            .send(message)
            .map_err(|_| RenderError::ChannelClosed)
    }
}

/// Snapshot capture as a composable effect, for hosts that run their
/// shell through an effect environment.
pub fn capture_effect<Env>(hash: TokenHash) -> BoxedEffect<(), RenderError, Env>
where
    Env: SnapshotSink + Clone + Send + Sync + 'static,
{
    from_fn(move |env: &Env| env.capture(&hash)).boxed()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_to_the_wire_shape() {
        let json = ScreenshotRequest::new(TokenHash::zero()).to_json().unwrap();
        let expected = format!(
            "{{\"command\":\"screenshot\",\"token\":\"0x{}\"}}",
            "0".repeat(64)
        );
        assert_eq!(json, expected);
    }

    #[test]
    fn memory_sink_records_in_order() {
        let sink = MemorySink::new();
        let shared = sink.clone();

        sink.capture(&TokenHash::zero()).unwrap();
        assert_eq!(shared.frames(), vec![TokenHash::zero()]);
    }

    #[test]
    fn channel_sink_posts_serialized_requests() {
        let (sender, receiver) = mpsc::channel();
        let sink = ChannelSink::new(sender);

        sink.capture(&TokenHash::zero()).unwrap();

        let message = receiver.recv().unwrap();
        let request: ScreenshotRequest = serde_json::from_str(&message).unwrap();
        assert_eq!(request.command, SCREENSHOT_COMMAND);
        assert_eq!(request.token, TokenHash::zero());
    }

    #[test]
    fn channel_sink_reports_a_closed_channel() {
        let (sender, receiver) = mpsc::channel();
        drop(receiver);
        let sink = ChannelSink::new(sender);

        assert!(matches!(
            sink.capture(&TokenHash::zero()),
            Err(RenderError::ChannelClosed)
        ));
    }

    #[tokio::test]
    async fn capture_effect_runs_against_a_sink_environment() {
        let sink = MemorySink::new();

        capture_effect::<MemorySink>(TokenHash::zero())
            .run(&sink)
            .await
            .unwrap();

        assert_eq!(sink.frames(), vec![TokenHash::zero()]);
    }
}
