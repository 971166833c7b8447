//! Per-cycle snapshots: what the readers observed and what the engine decided.

use crate::category::AppCategory;
use crate::mode::{Mode, ModeTransition};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Snapshot of the foreground window, produced by a window reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowObservation {
    /// Executable file name (e.g., "chrome.exe"). May still carry a path prefix.
    pub process_name: String,

    /// Window title text.
    pub window_title: String,

    /// Process identifier.
    pub process_id: u32,

    /// Full executable path, when the reader could resolve it.
    #[serde(default)]
    pub executable_path: Option<PathBuf>,

    /// Whether the window covers most of its display.
    #[serde(default)]
    pub is_near_fullscreen: bool,
}

impl WindowObservation {
    pub fn new(process_name: impl Into<String>, window_title: impl Into<String>) -> Self {
        Self {
            process_name: process_name.into(),
            window_title: window_title.into(),
            process_id: 0,
            executable_path: None,
            is_near_fullscreen: false,
        }
    }

    /// Executable name with any `/` or `\` path prefix removed, lower-cased.
    pub fn executable_name(&self) -> String {
        strip_path(&self.process_name).to_lowercase()
    }

    /// Text searched by keyword heuristics: `"<executable> <title>"`, lower-cased.
    pub fn match_text(&self) -> String {
        format!(
            "{} {}",
            self.executable_name(),
            self.window_title.to_lowercase()
        )
    }
}

/// Strip everything up to the last path separator of either flavour.
pub(crate) fn strip_path(name: &str) -> &str {
    match name.rfind(|c| c == '/' || c == '\\') {
        Some(idx) => &name[idx + 1..],
        None => name,
    }
}

/// Immutable per-cycle snapshot evaluated by the rule engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct SystemState {
    /// Category of the foreground application.
    pub category: AppCategory,

    /// CPU usage percentage (0-100).
    pub cpu_usage: f64,

    /// Minutes since the last keyboard or mouse input.
    pub idle_minutes: f64,

    /// Local hour (0-23).
    pub hour: u8,

    /// Local minute (0-59).
    pub minute: u8,

    /// Monday through Friday.
    pub is_weekday: bool,

    /// Whether audio output is currently active.
    pub has_audio: bool,
}

impl SystemState {
    pub fn minutes_since_midnight(&self) -> u32 {
        u32::from(self.hour) * 60 + u32::from(self.minute)
    }
}

/// Identifies the rule that produced a cycle's mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedRule {
    pub name: Option<String>,
    pub priority: i32,
}

/// Everything one evaluation cycle produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CycleReport {
    /// Wall-clock time the cycle started.
    pub timestamp_ms: i64,

    /// Foreground window, if one was resolvable.
    pub window: Option<WindowObservation>,

    /// Snapshot handed to the rule engine.
    pub state: SystemState,

    /// Decided mode.
    pub mode: Mode,

    /// Rule that matched; `None` when the mode fell through to `Default`.
    pub matched_rule: Option<MatchedRule>,

    /// Set when `mode` differs from the previous cycle's mode.
    pub transition: Option<ModeTransition>,
}
