//! Progress events and broadcast channel for campaign telemetry.
//!
//! The campaign loop emits one [`ProgressEvent`] after every attempt. Events
//! flow through a `tokio::sync::broadcast` channel to any subscriber (a
//! progress bar, an extension bridge, a log). When no subscriber exists,
//! events are silently dropped.

use serde::{Deserialize, Serialize};

/// Per-attempt progress, serialized as
/// `{"type":"FORM_FILL_PROGRESS","current":..,"total":..,"successful":..,"failed":..}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "FORM_FILL_PROGRESS")]
pub struct ProgressEvent {
    /// 1-based index of the attempt that just finished.
    pub current: u32,
    pub total: u32,
    /// Cumulative successes so far.
    pub successful: u32,
    /// Cumulative failures so far.
    pub failed: u32,
}

impl ProgressEvent {
    /// Fraction of attempts completed, in `0.0..=1.0`.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        f64::from(self.current) / f64::from(self.total)
    }
}

/// Sender handle for emitting progress events.
pub type ProgressSender = tokio::sync::broadcast::Sender<ProgressEvent>;

/// Receiver handle for consuming progress events.
pub type ProgressReceiver = tokio::sync::broadcast::Receiver<ProgressEvent>;

/// Create a new progress broadcast channel with a bounded buffer.
pub fn channel() -> (ProgressSender, ProgressReceiver) {
    tokio::sync::broadcast::channel(256)
}

/// Emit a progress event, ignoring send errors (no receivers listening).
pub fn emit(tx: &Option<ProgressSender>, event: ProgressEvent) {
    if let Some(ref sender) = tx {
        let _ = sender.send(event);
    }
}
