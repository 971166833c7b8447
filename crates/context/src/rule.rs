//! Rule and condition definitions.
//!
//! A rule is an AND of conditions mapping to one target mode. Conditions
//! are a closed sum type, so every variant carries exactly the payload it
//! needs.

use crate::category::AppCategory;
use crate::mode::Mode;
use crate::state::SystemState;
use serde::{Deserialize, Serialize};

/// Which days a time window applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeekdayFilter {
    #[default]
    Any,
    WeekdaysOnly,
    WeekendOnly,
}

impl WeekdayFilter {
    pub fn allows(&self, is_weekday: bool) -> bool {
        match self {
            WeekdayFilter::Any => true,
            WeekdayFilter::WeekdaysOnly => is_weekday,
            WeekdayFilter::WeekendOnly => !is_weekday,
        }
    }
}

/// Local time-of-day window, inclusive at both ends.
///
/// A start later than the end wraps past midnight (e.g. 23:00-07:00).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start_hour: u8,
    pub start_minute: u8,
    pub end_hour: u8,
    pub end_minute: u8,
    #[serde(default)]
    pub days: WeekdayFilter,
}

impl TimeWindow {
    pub const fn new(start_hour: u8, start_minute: u8, end_hour: u8, end_minute: u8) -> Self {
        Self {
            start_hour,
            start_minute,
            end_hour,
            end_minute,
            days: WeekdayFilter::Any,
        }
    }

    pub const fn on(mut self, days: WeekdayFilter) -> Self {
        self.days = days;
        self
    }

    pub fn start_minutes(&self) -> u32 {
        u32::from(self.start_hour) * 60 + u32::from(self.start_minute)
    }

    pub fn end_minutes(&self) -> u32 {
        u32::from(self.end_hour) * 60 + u32::from(self.end_minute)
    }

    pub fn contains(&self, minutes_since_midnight: u32, is_weekday: bool) -> bool {
        if !self.days.allows(is_weekday) {
            return false;
        }

        let start = self.start_minutes();
        let end = self.end_minutes();
        let current = minutes_since_midnight;

        if start <= end {
            start <= current && current <= end
        } else {
            current >= start || current <= end
        }
    }

    /// Reject hours above 23 and minutes above 59.
    pub fn validate(&self) -> Result<(), String> {
        for (label, hour, minute) in [
            ("start", self.start_hour, self.start_minute),
            ("end", self.end_hour, self.end_minute),
        ] {
            if hour > 23 || minute > 59 {
                return Err(format!("{} time {:02}:{:02} out of range", label, hour, minute));
            }
        }
        Ok(())
    }
}

/// One predicate over a [`SystemState`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
    /// Foreground application category equals `category`.
    AppCategory { category: AppCategory },

    /// Current local time lies inside the window.
    TimeWindow(TimeWindow),

    /// CPU usage `> threshold` when `above`, otherwise `<= threshold`.
    Cpu { threshold: f64, above: bool },

    /// Idle time `>= minutes` when `at_least`, otherwise `< minutes`.
    Idle { minutes: f64, at_least: bool },

    /// Audio activity equals `active`.
    Audio { active: bool },
}

impl Condition {
    pub fn app_category(category: AppCategory) -> Self {
        Condition::AppCategory { category }
    }

    pub fn time_window(window: TimeWindow) -> Self {
        Condition::TimeWindow(window)
    }

    pub fn cpu_above(threshold: f64) -> Self {
        Condition::Cpu {
            threshold,
            above: true,
        }
    }

    pub fn cpu_at_or_below(threshold: f64) -> Self {
        Condition::Cpu {
            threshold,
            above: false,
        }
    }

    pub fn idle_at_least(minutes: f64) -> Self {
        Condition::Idle {
            minutes,
            at_least: true,
        }
    }

    pub fn idle_less_than(minutes: f64) -> Self {
        Condition::Idle {
            minutes,
            at_least: false,
        }
    }

    pub fn audio(active: bool) -> Self {
        Condition::Audio { active }
    }

    /// Evaluate against one snapshot.
    ///
    /// NaN thresholds compare false either way, so such a condition never matches.
    pub fn check(&self, state: &SystemState) -> bool {
        match *self {
            Condition::AppCategory { category } => state.category == category,
            Condition::TimeWindow(window) => {
                window.contains(state.minutes_since_midnight(), state.is_weekday)
            }
            Condition::Cpu {
                threshold,
                above: true,
            } => state.cpu_usage > threshold,
            Condition::Cpu {
                threshold,
                above: false,
            } => state.cpu_usage <= threshold,
            Condition::Idle {
                minutes,
                at_least: true,
            } => state.idle_minutes >= minutes,
            Condition::Idle {
                minutes,
                at_least: false,
            } => state.idle_minutes < minutes,
            Condition::Audio { active } => state.has_audio == active,
        }
    }

    /// Returns a human-readable label for the condition kind.
    pub fn kind_label(&self) -> &'static str {
        match self {
            Condition::AppCategory { .. } => "App category",
            Condition::TimeWindow(_) => "Time window",
            Condition::Cpu { .. } => "CPU usage",
            Condition::Idle { .. } => "Idle time",
            Condition::Audio { .. } => "Audio activity",
        }
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        match self {
            Condition::TimeWindow(window) => window.validate(),
            Condition::Cpu { threshold, .. } if !threshold.is_finite() => {
                Err("cpu threshold must be a finite number".to_string())
            }
            Condition::Idle { minutes, .. } if !minutes.is_finite() => {
                Err("idle minutes must be a finite number".to_string())
            }
            _ => Ok(()),
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Condition::AppCategory { category } => write!(f, "category = {}", category),
            Condition::TimeWindow(w) => write!(
                f,
                "{:02}:{:02}-{:02}:{:02} ({:?})",
                w.start_hour, w.start_minute, w.end_hour, w.end_minute, w.days
            ),
            Condition::Cpu { threshold, above } => {
                write!(f, "cpu {} {}", if *above { ">" } else { "<=" }, threshold)
            }
            Condition::Idle { minutes, at_least } => {
                write!(f, "idle {} {}", if *at_least { ">=" } else { "<" }, minutes)
            }
            Condition::Audio { active } => write!(f, "audio = {}", active),
        }
    }
}

/// Priority-weighted AND of conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Optional name for logs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// All must hold. Empty matches everything.
    #[serde(default)]
    pub conditions: Vec<Condition>,

    /// Mode selected when the rule matches.
    pub mode: Mode,

    /// Higher is evaluated first.
    #[serde(default)]
    pub priority: i32,
}

impl Rule {
    pub fn new(mode: Mode, priority: i32) -> Self {
        Self {
            name: None,
            conditions: Vec::new(),
            mode,
            priority,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn when(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn matches(&self, state: &SystemState) -> bool {
        self.conditions.iter().all(|c| c.check(state))
    }
}
