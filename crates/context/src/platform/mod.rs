//! Platform-specific reader implementations.

use crate::provider::{AudioSampler, CpuSampler, IdleSampler, WindowProvider};
use crate::state::WindowObservation;
use std::sync::Mutex;
use sysinfo::System;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "macos")]
pub use macos::MacOSProvider;

// Re-export the appropriate provider for the current platform
#[cfg(target_os = "macos")]
pub type PlatformProvider = MacOSProvider;

#[cfg(not(target_os = "macos"))]
pub type PlatformProvider = GenericProvider;

/// Whole-machine CPU usage via `sysinfo`.
///
/// Usage is computed between two consecutive calls, so the first reading is 0.
pub struct SysinfoCpuSampler {
    system: Mutex<System>,
}

impl SysinfoCpuSampler {
    pub fn new() -> Self {
        let mut system = System::new();
        system.refresh_cpu_usage();
        Self {
            system: Mutex::new(system),
        }
    }
}

impl Default for SysinfoCpuSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SysinfoCpuSampler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SysinfoCpuSampler").finish_non_exhaustive()
    }
}

impl CpuSampler for SysinfoCpuSampler {
    fn cpu_usage(&self) -> f64 {
        let Ok(mut system) = self.system.lock() else {
            return 0.0;
        };
        system.refresh_cpu_usage();
        clamp_percent(f64::from(system.global_cpu_usage()))
    }
}

/// Clamp into 0-100; NaN becomes 0.
pub(crate) fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

/// Provider for platforms without native window/idle/audio readers.
///
/// Only CPU usage is real; everything else reports its sentinel.
#[derive(Debug, Default)]
pub struct GenericProvider {
    cpu: SysinfoCpuSampler,
}

impl GenericProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WindowProvider for GenericProvider {
    fn foreground_window(&self) -> Option<WindowObservation> {
        None
    }
}

impl CpuSampler for GenericProvider {
    fn cpu_usage(&self) -> f64 {
        self.cpu.cpu_usage()
    }
}

impl IdleSampler for GenericProvider {
    fn idle_minutes(&self) -> Option<f64> {
        None
    }
}

impl AudioSampler for GenericProvider {
    fn has_audio_activity(&self) -> bool {
        false
    }
}

/// Extract `HIDIdleTime` (nanoseconds) from `ioreg -c IOHIDSystem` output, in minutes.
#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
pub(crate) fn parse_hid_idle_minutes(ioreg_output: &str) -> Option<f64> {
    let line = ioreg_output
        .lines()
        .find(|line| line.contains("\"HIDIdleTime\""))?;
    let (_, value) = line.rsplit_once('=')?;
    let nanos: u64 = value.trim().parse().ok()?;
    Some(nanos as f64 / 60_000_000_000.0)
}
