//! Ambient mode resolution for ambimode.
//!
//! This crate turns a handful of host signals into one discrete lighting
//! mode. Each cycle it tracks:
//! - Foreground application (classified into an [`AppCategory`])
//! - CPU load and user idle time
//! - Audio output activity
//! - Local time of day and weekday
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Domain Layer                             │
//! │  category.rs   - AppCategory enum                           │
//! │  keywords.rs   - keyword heuristics                         │
//! │  table.rs      - exact process-name table + file loader     │
//! │  classifier.rs - WindowObservation -> AppCategory (pure)    │
//! │  rule.rs       - Condition / Rule                           │
//! │  engine.rs     - SystemState -> Mode (pure)                 │
//! │  provider.rs   - traits for the external readers            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Infrastructure Layer                        │
//! │  platform/     - sysinfo CPU, macOS frontmost app + idle    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Application Layer                          │
//! │  monitor.rs - per-cycle loop, transitions, reload requests  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use ambimode_context::{platform::PlatformProvider, AppClassifier, ModeMonitor, RuleEngine};
//! use std::sync::Arc;
//!
//! let provider = Arc::new(PlatformProvider::new());
//! let monitor = ModeMonitor::new(provider, AppClassifier::new(), RuleEngine::with_default_rules());
//!
//! monitor.run(interval, cancel_token, Arc::new(|report| {
//!     println!("Mode: {}", report.mode);
//! })).await;
//! ```

mod category;
mod classifier;
mod engine;
mod error;
mod keywords;
mod mode;
mod monitor;
mod provider;
mod rule;
mod state;
mod table;

pub mod platform;

// Re-export main types
pub use category::AppCategory;
pub use classifier::{AppClassifier, MappingSource};
pub use engine::{default_rules, load_rules, parse_rules, RuleEngine};
pub use error::{ContextError, ContextResult};
pub use keywords::{
    KeywordSet, KeywordSets, BROWSER_KEYWORDS, CREATIVE_KEYWORDS, DEVELOPMENT_KEYWORDS,
    DOCUMENT_KEYWORDS, GAME_KEYWORDS, MUSIC_KEYWORDS, VIDEO_KEYWORDS,
};
pub use mode::{Mode, ModeTransition};
pub use monitor::{
    clamp_interval, CycleCallback, ModeMonitor, ReloadHandle, DEFAULT_INTERVAL, MIN_INTERVAL,
};
pub use provider::{
    AudioSampler, CpuSampler, IdleSampler, LocalTime, NullProvider, SystemStateProvider,
    WindowProvider,
};
pub use rule::{Condition, Rule, TimeWindow, WeekdayFilter};
pub use state::{CycleReport, MatchedRule, SystemState, WindowObservation};
pub use table::ProcessCategoryTable;
