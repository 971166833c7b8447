//! macOS readers: frontmost application via Cocoa, idle time via `ioreg`,
//! output activity via Core Audio.

use super::{parse_hid_idle_minutes, SysinfoCpuSampler};
use crate::provider::{AudioSampler, CpuSampler, IdleSampler, WindowProvider};
use crate::state::{strip_path, WindowObservation};
use std::path::PathBuf;
use std::process::Command;

// Native Cocoa imports for efficient frontmost app detection
use objc::runtime::{Class, Object};
use objc::{msg_send, sel, sel_impl};

use cidre::core_audio as ca;

const DEVICE_IS_RUNNING_SOMEWHERE: ca::PropAddr = ca::PropAddr {
    selector: ca::PropSelector::DEVICE_IS_RUNNING_SOMEWHERE,
    scope: ca::PropScope::GLOBAL,
    element: ca::PropElement::MAIN,
};

/// macOS provider.
///
/// NSWorkspace exposes the frontmost application, not its window title, so
/// the observation carries the app's localized name as title. Window bounds
/// are not read either, so `is_near_fullscreen` is always `false`.
#[derive(Debug, Default)]
pub struct MacOSProvider {
    cpu: SysinfoCpuSampler,
}

impl MacOSProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WindowProvider for MacOSProvider {
    fn foreground_window(&self) -> Option<WindowObservation> {
        get_frontmost_app()
    }
}

impl CpuSampler for MacOSProvider {
    fn cpu_usage(&self) -> f64 {
        self.cpu.cpu_usage()
    }
}

impl IdleSampler for MacOSProvider {
    fn idle_minutes(&self) -> Option<f64> {
        let output = Command::new("ioreg")
            .args(["-c", "IOHIDSystem", "-d", "4"])
            .output()
            .ok()?;

        if !output.status.success() {
            return None;
        }

        parse_hid_idle_minutes(&String::from_utf8_lossy(&output.stdout))
    }
}

impl AudioSampler for MacOSProvider {
    /// `false` when no default output device can be queried.
    fn has_audio_activity(&self) -> bool {
        is_output_running().unwrap_or(false)
    }
}

/// Whether any process is doing IO on the default output device.
fn is_output_running() -> Option<bool> {
    let device = ca::System::default_output_device().ok()?;
    device
        .prop::<u32>(&DEVICE_IS_RUNNING_SOMEWHERE)
        .ok()
        .map(|v| v != 0)
}

/// Frontmost application using `[[NSWorkspace sharedWorkspace] frontmostApplication]`.
fn get_frontmost_app() -> Option<WindowObservation> {
    unsafe {
        let workspace_class = Class::get("NSWorkspace")?;

        let shared_workspace: *mut Object = msg_send![workspace_class, sharedWorkspace];
        if shared_workspace.is_null() {
            return None;
        }

        let frontmost_app: *mut Object = msg_send![shared_workspace, frontmostApplication];
        if frontmost_app.is_null() {
            return None;
        }

        let pid: i32 = msg_send![frontmost_app, processIdentifier];

        let exe_url: *mut Object = msg_send![frontmost_app, executableURL];
        let exe_path = if exe_url.is_null() {
            None
        } else {
            let path_ns: *mut Object = msg_send![exe_url, path];
            nsstring_to_string(path_ns)
        };

        let name_ns: *mut Object = msg_send![frontmost_app, localizedName];
        let name = nsstring_to_string(name_ns);

        let process_name = exe_path
            .as_deref()
            .map(|p| strip_path(p).to_string())
            .or_else(|| name.clone())?;

        Some(WindowObservation {
            process_name,
            window_title: name.unwrap_or_default(),
            process_id: u32::try_from(pid).unwrap_or_default(),
            executable_path: exe_path.map(PathBuf::from),
            is_near_fullscreen: false,
        })
    }
}

/// Convert NSString to Rust String.
unsafe fn nsstring_to_string(nsstring: *mut Object) -> Option<String> {
    if nsstring.is_null() {
        return None;
    }

    let c_str: *const std::os::raw::c_char = msg_send![nsstring, UTF8String];
    if c_str.is_null() {
        return None;
    }

    let rust_str = std::ffi::CStr::from_ptr(c_str).to_str().ok()?;
    Some(rust_str.to_string())
}
