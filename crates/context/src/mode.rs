//! Mode definitions.
//!
//! Pure domain types - no I/O, no platform dependencies.

use serde::{Deserialize, Serialize};

/// Ambient output mode driven by the rule engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Lighting follows the screen (games, heavy load).
    GameSync,

    /// Dimmed, film-friendly lighting.
    Cinematic,

    /// Lighting pulses with audio.
    Music,

    /// Steady, neutral light for office work and coding.
    WorkFocus,

    /// Low-intensity night light.
    NightDim,

    /// Lighting switched off.
    Off,

    /// No rule matched.
    #[default]
    Default,
}

impl Mode {
    /// Returns a human-readable label for the mode.
    pub fn label(&self) -> &'static str {
        match self {
            Mode::GameSync => "Game / Screen Sync",
            Mode::Cinematic => "Cinematic",
            Mode::Music => "Music Rhythm",
            Mode::WorkFocus => "Work Focus",
            Mode::NightDim => "Night Dim",
            Mode::Off => "Off",
            Mode::Default => "Default",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A change of mode between two consecutive cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeTransition {
    pub from: Mode,
    pub to: Mode,
}

impl ModeTransition {
    /// Compare the previous cycle's mode (if any) with the current one.
    ///
    /// The first cycle has no predecessor and never produces a transition.
    pub fn between(previous: Option<Mode>, current: Mode) -> Option<Self> {
        match previous {
            Some(from) if from != current => Some(Self { from, to: current }),
            _ => None,
        }
    }
}
