//! Mode monitor - the per-cycle control loop.
//!
//! One cycle runs to completion (gather readings, classify, decide, detect
//! transition) before the next begins. Cancellation and reload requests are
//! only observed between cycles.

use crate::classifier::AppClassifier;
use crate::engine::RuleEngine;
use crate::mode::{Mode, ModeTransition};
use crate::platform::clamp_percent;
use crate::provider::SystemStateProvider;
use crate::state::{CycleReport, MatchedRule, SystemState};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Default sampling interval.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(3000);

/// Shortest accepted sampling interval.
pub const MIN_INTERVAL: Duration = Duration::from_millis(100);

/// Callback invoked with every cycle report.
pub type CycleCallback = Arc<dyn Fn(&CycleReport) + Send + Sync + 'static>;

pub fn clamp_interval(interval: Duration) -> Duration {
    interval.max(MIN_INTERVAL)
}

/// Requests a category table reload at the next cycle boundary.
#[derive(Debug, Clone, Default)]
pub struct ReloadHandle {
    pending: Arc<AtomicBool>,
}

impl ReloadHandle {
    pub fn request(&self) {
        self.pending.store(true, Ordering::SeqCst);
    }

    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::SeqCst)
    }

    fn take(&self) -> bool {
        self.pending.swap(false, Ordering::SeqCst)
    }
}

/// Owns the classifier and rule engine and drives them once per cycle.
pub struct ModeMonitor<P> {
    provider: Arc<P>,
    classifier: AppClassifier,
    engine: RuleEngine,
    last_mode: Option<Mode>,
    reload: ReloadHandle,
}

impl<P> ModeMonitor<P>
where
    P: SystemStateProvider,
{
    pub fn new(provider: Arc<P>, classifier: AppClassifier, engine: RuleEngine) -> Self {
        Self {
            provider,
            classifier,
            engine,
            last_mode: None,
            reload: ReloadHandle::default(),
        }
    }

    pub fn reload_handle(&self) -> ReloadHandle {
        self.reload.clone()
    }

    pub fn classifier(&self) -> &AppClassifier {
        &self.classifier
    }

    pub fn engine(&self) -> &RuleEngine {
        &self.engine
    }

    /// Mutable access between cycles (e.g. to replace rules).
    pub fn engine_mut(&mut self) -> &mut RuleEngine {
        &mut self.engine
    }

    /// Mode produced by the most recent cycle.
    pub fn last_mode(&self) -> Option<Mode> {
        self.last_mode
    }

    /// Run one evaluation cycle.
    pub fn run_cycle(&mut self) -> CycleReport {
        if self.reload.take() {
            match self.classifier.reload() {
                Ok(count) => info!(entries = count, "category table reloaded"),
                Err(e) => warn!(error = %e, "category reload failed, using built-in table"),
            }
        }

        let timestamp_ms = chrono::Utc::now().timestamp_millis();
        let window = self.provider.foreground_window();
        let category = self.classifier.classify_optional(window.as_ref());
        let time = self.provider.local_time();

        let state = SystemState {
            category,
            cpu_usage: clamp_percent(self.provider.cpu_usage()),
            idle_minutes: self
                .provider
                .idle_minutes()
                .filter(|m| m.is_finite() && *m >= 0.0)
                .unwrap_or(0.0),
            hour: time.hour,
            minute: time.minute,
            is_weekday: time.is_weekday,
            has_audio: self.provider.has_audio_activity(),
        };

        let matched = self.engine.matching_rule(&state);
        let mode = matched.map(|rule| rule.mode).unwrap_or_default();
        let matched_rule = matched.map(|rule| MatchedRule {
            name: rule.name.clone(),
            priority: rule.priority,
        });

        let transition = ModeTransition::between(self.last_mode, mode);
        if let Some(t) = transition {
            info!(from = %t.from, to = %t.to, "mode changed");
        }

        debug!(
            mode = %mode,
            category = %state.category,
            cpu = state.cpu_usage,
            idle = state.idle_minutes,
            audio = state.has_audio,
            rule = ?matched_rule.as_ref().and_then(|r| r.name.as_deref()),
            "cycle evaluated"
        );

        self.last_mode = Some(mode);

        CycleReport {
            timestamp_ms,
            window,
            state,
            mode,
            matched_rule,
            transition,
        }
    }

    /// Run cycles every `interval` until `cancel` fires.
    ///
    /// The first cycle runs immediately. Intervals below [`MIN_INTERVAL`]
    /// are raised to it.
    pub async fn run(
        mut self,
        interval: Duration,
        cancel: CancellationToken,
        callback: CycleCallback,
    ) {
        let interval = clamp_interval(interval);
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            interval_ms = interval.as_millis() as u64,
            rules = self.engine.len(),
            "mode monitor started"
        );

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    let report = self.run_cycle();
                    callback(&report);
                }
            }
        }

        info!("mode monitor stopped");
    }
}
