//! Human-readable console output for cycle reports.

use ambimode_context::{CycleReport, ModeTransition};
use std::fmt::Write;

const RULE: &str = "------------------------------------------------------------";

pub fn render_transition(transition: &ModeTransition) -> String {
    format!(
        ">>> Mode changed to: {} (from {})",
        transition.to, transition.from
    )
}

/// One block per cycle. `debug` adds the raw window details and the rule
/// that fired.
pub fn render_report(report: &CycleReport, debug: bool) -> String {
    let state = &report.state;
    let mut out = String::new();

    let day = if state.is_weekday { "weekday" } else { "weekend" };
    let _ = writeln!(out, "[{:02}:{:02} {}]", state.hour, state.minute, day);

    match &report.window {
        Some(_) => {
            let _ = writeln!(out, "  Category:  {}", state.category);
        }
        None => {
            let _ = writeln!(out, "  Category:  {} (no foreground window)", state.category);
        }
    }
    let _ = writeln!(out, "  CPU:       {:.1}%", state.cpu_usage);
    let _ = writeln!(out, "  Idle:      {:.1} min", state.idle_minutes);
    let _ = writeln!(
        out,
        "  Audio:     {}",
        if state.has_audio { "active" } else { "silent" }
    );
    let _ = writeln!(out, "  Mode:      {}", report.mode);

    if debug {
        if let Some(window) = &report.window {
            let _ = writeln!(out, "  [debug] process:    {}", window.process_name);
            let _ = writeln!(out, "  [debug] title:      {}", window.window_title);
            let _ = writeln!(out, "  [debug] pid:        {}", window.process_id);
            let _ = writeln!(out, "  [debug] fullscreen: {}", window.is_near_fullscreen);
            let _ = writeln!(out, "  [debug] match text: {}", window.match_text());
        }
        match &report.matched_rule {
            Some(rule) => {
                let _ = writeln!(
                    out,
                    "  [debug] rule:       {} (priority {})",
                    rule.name.as_deref().unwrap_or("unnamed"),
                    rule.priority
                );
            }
            None => {
                let _ = writeln!(out, "  [debug] rule:       none");
            }
        }
    }

    out.push_str(RULE);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ambimode_context::{AppCategory, MatchedRule, Mode, SystemState, WindowObservation};

    fn report() -> CycleReport {
        CycleReport {
            timestamp_ms: 0,
            window: Some(WindowObservation {
                process_id: 4242,
                ..WindowObservation::new("Code.exe", "Main.rs - Project")
            }),
            state: SystemState {
                category: AppCategory::Development,
                cpu_usage: 23.456,
                idle_minutes: 0.5,
                hour: 9,
                minute: 5,
                is_weekday: true,
                has_audio: false,
            },
            mode: Mode::WorkFocus,
            matched_rule: Some(MatchedRule {
                name: Some("development".to_string()),
                priority: 5,
            }),
            transition: None,
        }
    }

    #[test]
    fn test_render_report() {
        let text = render_report(&report(), false);
        assert!(text.starts_with("[09:05 weekday]"));
        assert!(text.contains("CPU:       23.5%"));
        assert!(text.contains("Mode:      Work Focus"));
        assert!(!text.contains("[debug]"));
        assert!(text.ends_with(RULE));
    }

    #[test]
    fn test_render_report_debug() {
        let text = render_report(&report(), true);
        assert!(text.contains("[debug] process:    Code.exe"));
        assert!(text.contains("[debug] pid:        4242"));
        assert!(text.contains("[debug] match text: code.exe main.rs - project"));
        assert!(text.contains("development (priority 5)"));
    }

    #[test]
    fn test_render_report_without_window() {
        let mut report = report();
        report.window = None;
        report.state.category = AppCategory::Unknown;
        report.matched_rule = None;

        let text = render_report(&report, true);
        assert!(text.contains("(no foreground window)"));
        assert!(!text.contains("[debug] process"));
        assert!(text.contains("[debug] rule:       none"));
    }

    #[test]
    fn test_render_transition() {
        let line = render_transition(&ModeTransition {
            from: Mode::WorkFocus,
            to: Mode::GameSync,
        });
        assert_eq!(line, ">>> Mode changed to: Game / Screen Sync (from Work Focus)");
    }
}
