//! Provider traits for the external readers.
//!
//! These traits abstract platform-specific implementations, allowing the
//! decision logic to remain pure and testable. Readers never report errors:
//! failures map to sentinels (no window, 0% CPU, unknown idle, no audio).

use crate::state::WindowObservation;
use chrono::{DateTime, Datelike, Local, TimeZone, Timelike, Weekday};

/// Provider for the foreground window.
pub trait WindowProvider: Send + Sync {
    /// `None` when no foreground window is currently resolvable.
    fn foreground_window(&self) -> Option<WindowObservation>;
}

/// Provider for whole-machine CPU utilization.
pub trait CpuSampler: Send + Sync {
    /// Percentage in 0-100.
    fn cpu_usage(&self) -> f64;
}

/// Provider for time since the last user input.
pub trait IdleSampler: Send + Sync {
    /// `None` when the platform cannot tell.
    fn idle_minutes(&self) -> Option<f64>;
}

/// Provider for audio output activity.
pub trait AudioSampler: Send + Sync {
    fn has_audio_activity(&self) -> bool;
}

/// Wall-clock reading used by time-window rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalTime {
    pub hour: u8,
    pub minute: u8,
    pub is_weekday: bool,
}

impl LocalTime {
    pub fn from_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> Self {
        Self {
            hour: dt.hour() as u8,
            minute: dt.minute() as u8,
            is_weekday: !matches!(dt.weekday(), Weekday::Sat | Weekday::Sun),
        }
    }

    pub fn now() -> Self {
        Self::from_datetime(&Local::now())
    }
}

/// Combined provider for all per-cycle readings.
pub trait SystemStateProvider: Send + Sync {
    fn foreground_window(&self) -> Option<WindowObservation>;

    fn cpu_usage(&self) -> f64;

    fn idle_minutes(&self) -> Option<f64>;

    fn has_audio_activity(&self) -> bool;

    /// Current local time. Override for deterministic tests.
    fn local_time(&self) -> LocalTime {
        LocalTime::now()
    }
}

impl<T> SystemStateProvider for T
where
    T: WindowProvider + CpuSampler + IdleSampler + AudioSampler,
{
    fn foreground_window(&self) -> Option<WindowObservation> {
        WindowProvider::foreground_window(self)
    }

    fn cpu_usage(&self) -> f64 {
        CpuSampler::cpu_usage(self)
    }

    fn idle_minutes(&self) -> Option<f64> {
        IdleSampler::idle_minutes(self)
    }

    fn has_audio_activity(&self) -> bool {
        AudioSampler::has_audio_activity(self)
    }
}

/// Null implementation for testing or unsupported platforms.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProvider;

impl WindowProvider for NullProvider {
    fn foreground_window(&self) -> Option<WindowObservation> {
        None
    }
}

impl CpuSampler for NullProvider {
    fn cpu_usage(&self) -> f64 {
        0.0
    }
}

impl IdleSampler for NullProvider {
    fn idle_minutes(&self) -> Option<f64> {
        None
    }
}

impl AudioSampler for NullProvider {
    fn has_audio_activity(&self) -> bool {
        false
    }
}
