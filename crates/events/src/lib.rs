//! Shared event contracts for mode reporting.
//!
//! This crate defines the DTOs that leave the process when a cycle
//! completes. Using shared types keeps field names stable for consumers
//! reading the JSON stream.
//!
//! Also provides the `EventBus` trait for decoupled event emission.

mod bus;

pub use bus::{EmittedEvent, EventBus, EventBusRef, InMemoryEventBus, JsonLinesEventBus};

use ambimode_context::{AppCategory, CycleReport, Mode};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Event emitted after every evaluation cycle.
///
/// Producers: monitor loop
/// Consumers: lighting controllers, log collectors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeCycleEvent {
    /// Decided mode.
    pub mode: Mode,
    /// Human-readable mode label.
    pub mode_label: String,
    /// Category of the foreground application.
    pub category: AppCategory,
    /// Foreground process name, if a window was observed.
    #[serde(default)]
    pub process_name: Option<String>,
    /// Foreground window title, if a window was observed.
    #[serde(default)]
    pub window_title: Option<String>,
    #[serde(default)]
    pub cpu_usage: f64,
    #[serde(default)]
    pub idle_minutes: f64,
    #[serde(default)]
    pub has_audio: bool,
    /// Name of the rule that produced the mode.
    #[serde(default)]
    pub rule: Option<String>,
    /// Priority of the rule that produced the mode.
    #[serde(default)]
    pub priority: Option<i32>,
    /// Timestamp in milliseconds.
    #[serde(default)]
    pub timestamp_ms: i64,
}

impl From<&CycleReport> for ModeCycleEvent {
    fn from(report: &CycleReport) -> Self {
        Self {
            mode: report.mode,
            mode_label: report.mode.label().to_string(),
            category: report.state.category,
            process_name: report.window.as_ref().map(|w| w.process_name.clone()),
            window_title: report.window.as_ref().map(|w| w.window_title.clone()),
            cpu_usage: report.state.cpu_usage,
            idle_minutes: report.state.idle_minutes,
            has_audio: report.state.has_audio,
            rule: report.matched_rule.as_ref().and_then(|r| r.name.clone()),
            priority: report.matched_rule.as_ref().map(|r| r.priority),
            timestamp_ms: report.timestamp_ms,
        }
    }
}

/// Event emitted when the decided mode differs from the previous cycle's.
///
/// Producers: monitor loop
/// Consumers: lighting controllers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeChangedEvent {
    pub from: Mode,
    pub to: Mode,
    /// Timestamp in milliseconds.
    #[serde(default)]
    pub timestamp_ms: i64,
}

impl ModeChangedEvent {
    /// Build from a report; `None` when the cycle kept the previous mode.
    pub fn from_report(report: &CycleReport) -> Option<Self> {
        report.transition.map(|t| Self {
            from: t.from,
            to: t.to,
            timestamp_ms: report.timestamp_ms,
        })
    }
}

/// Event names as constants to prevent typos.
pub mod event_names {
    /// Emitted every cycle.
    pub const MODE_CYCLE: &str = "mode:cycle";
    /// Emitted on mode transitions only.
    pub const MODE_CHANGED: &str = "mode:changed";
}

/// Publish a cycle report: always `mode:cycle`, plus `mode:changed` on a transition.
pub fn publish_report(bus: &dyn EventBus, report: &CycleReport) {
    emit_json(bus, event_names::MODE_CYCLE, &ModeCycleEvent::from(report));
    if let Some(changed) = ModeChangedEvent::from_report(report) {
        emit_json(bus, event_names::MODE_CHANGED, &changed);
    }
}

fn emit_json<T: Serialize>(bus: &dyn EventBus, topic: &str, event: &T) {
    match serde_json::to_value(event) {
        Ok(payload) => bus.emit(topic, payload),
        Err(e) => warn!(topic, error = %e, "failed to serialize event"),
    }
}
