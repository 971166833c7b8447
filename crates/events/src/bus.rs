//! Event bus abstraction for decoupled event emission.
//!
//! The monitor loop publishes through this trait, so the same reports can go
//! to stdout as JSON lines, into memory for tests, or nowhere at all.

use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::warn;

/// Trait for emitting events to subscribers.
pub trait EventBus: Send + Sync {
    /// Emit an event with a JSON payload.
    ///
    /// # Arguments
    /// * `topic` - Event name/topic (e.g., "mode:changed")
    /// * `payload` - JSON payload to emit
    fn emit(&self, topic: &str, payload: serde_json::Value);
}

/// Type alias for shared event bus reference.
pub type EventBusRef = Arc<dyn EventBus>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// In-memory event bus for testing.
///
/// Captures all emitted events for later inspection.
#[derive(Default)]
pub struct InMemoryEventBus {
    events: Mutex<Vec<EmittedEvent>>,
}

/// A captured event from InMemoryEventBus.
#[derive(Debug, Clone)]
pub struct EmittedEvent {
    pub topic: String,
    pub payload: serde_json::Value,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all captured events.
    pub fn events(&self) -> Vec<EmittedEvent> {
        lock(&self.events).clone()
    }

    /// Get events for a specific topic.
    pub fn events_for(&self, topic: &str) -> Vec<EmittedEvent> {
        lock(&self.events)
            .iter()
            .filter(|e| e.topic == topic)
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        lock(&self.events).clear();
    }

    pub fn len(&self) -> usize {
        lock(&self.events).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.events).is_empty()
    }
}

impl EventBus for InMemoryEventBus {
    fn emit(&self, topic: &str, payload: serde_json::Value) {
        lock(&self.events).push(EmittedEvent {
            topic: topic.to_string(),
            payload,
        });
    }
}

/// Writes one `{"event": topic, "payload": ...}` object per line.
///
/// Write failures are logged and the event is dropped.
pub struct JsonLinesEventBus {
    out: Mutex<Box<dyn Write + Send>>,
}

impl JsonLinesEventBus {
    pub fn new<W: Write + Send + 'static>(out: W) -> Self {
        Self {
            out: Mutex::new(Box::new(out)),
        }
    }

    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl EventBus for JsonLinesEventBus {
    fn emit(&self, topic: &str, payload: serde_json::Value) {
        let line = serde_json::json!({ "event": topic, "payload": payload });
        let mut out = lock(&self.out);
        let result = serde_json::to_writer(&mut *out, &line)
            .map_err(std::io::Error::from)
            .and_then(|()| out.write_all(b"\n"))
            .and_then(|()| out.flush());
        if let Err(e) = result {
            warn!(topic, error = %e, "failed to write event");
        }
    }
}
