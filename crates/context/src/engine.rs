//! Priority rule engine.
//!
//! Rules are kept sorted by priority (descending) with ties in insertion
//! order. The first rule whose conditions all hold decides the mode;
//! `Mode::Default` when none does.

use crate::category::AppCategory;
use crate::error::{ContextError, ContextResult};
use crate::mode::Mode;
use crate::rule::{Condition, Rule, TimeWindow, WeekdayFilter};
use crate::state::SystemState;
use serde::de::Error as _;
use std::path::Path;
use tracing::info;

/// Ordered rule set plus the decision function.
#[derive(Debug, Clone, Default)]
pub struct RuleEngine {
    rules: Vec<Rule>,
}

impl RuleEngine {
    /// Engine with no rules; every decision is `Mode::Default`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine preloaded with [`default_rules`].
    pub fn with_default_rules() -> Self {
        let mut engine = Self::new();
        engine.replace_rules(default_rules());
        engine
    }

    /// Insert after every rule of equal or higher priority.
    pub fn add_rule(&mut self, rule: Rule) {
        let idx = self
            .rules
            .partition_point(|existing| existing.priority >= rule.priority);
        self.rules.insert(idx, rule);
    }

    pub fn clear_rules(&mut self) {
        self.rules.clear();
    }

    /// Drop all rules and add `rules` in iteration order.
    pub fn replace_rules(&mut self, rules: impl IntoIterator<Item = Rule>) {
        self.rules.clear();
        for rule in rules {
            self.add_rule(rule);
        }
        info!(count = self.rules.len(), "rule set replaced");
    }

    /// Rules in evaluation order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// First rule, in evaluation order, whose conditions all hold.
    pub fn matching_rule(&self, state: &SystemState) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.matches(state))
    }

    /// Decide the mode for one snapshot. Total and side-effect free.
    pub fn decide(&self, state: &SystemState) -> Mode {
        self.matching_rule(state)
            .map(|rule| rule.mode)
            .unwrap_or(Mode::Default)
    }
}

/// The stock rule set.
///
/// | prio | when | mode |
/// |---|---|---|
/// | 10 | 23:00-07:00 | NightDim |
/// | 9 | idle >= 10 min | Off |
/// | 8..4 | Game / Video / Music / Development / Document | GameSync / Cinematic / Music / WorkFocus / WorkFocus |
/// | 3 | cpu > 80% | GameSync |
/// | 2 | audio playing | Music |
/// | 1 | weekdays 09:00-18:00 | WorkFocus |
/// | 0 | weekend 09:00-18:00 | Music |
pub fn default_rules() -> Vec<Rule> {
    vec![
        Rule::new(Mode::NightDim, 10)
            .named("night")
            .when(Condition::time_window(TimeWindow::new(23, 0, 7, 0))),
        Rule::new(Mode::Off, 9)
            .named("idle")
            .when(Condition::idle_at_least(10.0)),
        Rule::new(Mode::GameSync, 8)
            .named("game")
            .when(Condition::app_category(AppCategory::Game)),
        Rule::new(Mode::Cinematic, 7)
            .named("video")
            .when(Condition::app_category(AppCategory::Video)),
        Rule::new(Mode::Music, 6)
            .named("music")
            .when(Condition::app_category(AppCategory::Music)),
        Rule::new(Mode::WorkFocus, 5)
            .named("development")
            .when(Condition::app_category(AppCategory::Development)),
        Rule::new(Mode::WorkFocus, 4)
            .named("document")
            .when(Condition::app_category(AppCategory::Document)),
        Rule::new(Mode::GameSync, 3)
            .named("high-cpu")
            .when(Condition::cpu_above(80.0)),
        Rule::new(Mode::Music, 2)
            .named("audio")
            .when(Condition::audio(true)),
        Rule::new(Mode::WorkFocus, 1).named("weekday-hours").when(
            Condition::time_window(TimeWindow::new(9, 0, 18, 0).on(WeekdayFilter::WeekdaysOnly)),
        ),
        Rule::new(Mode::Music, 0).named("weekend-hours").when(
            Condition::time_window(TimeWindow::new(9, 0, 18, 0).on(WeekdayFilter::WeekendOnly)),
        ),
    ]
}

/// Parse a JSON rule list: either `[...]` or `{"rules": [...]}`.
///
/// Each condition is validated; errors name the rule index and condition kind.
pub fn parse_rules(content: &str, path: &Path) -> ContextResult<Vec<Rule>> {
    let parse_error = |source: serde_json::Error| ContextError::ParseRules {
        path: path.to_path_buf(),
        source,
    };

    let document: serde_json::Value = serde_json::from_str(content).map_err(parse_error)?;
    let list = match document {
        serde_json::Value::Array(items) => serde_json::Value::Array(items),
        serde_json::Value::Object(mut map) => map.remove("rules").ok_or_else(|| {
            parse_error(serde_json::Error::custom("missing `rules` array"))
        })?,
        _ => {
            return Err(parse_error(serde_json::Error::custom(
                "expected a rule array or an object with a `rules` array",
            )))
        }
    };
    let rules: Vec<Rule> = serde_json::from_value(list).map_err(parse_error)?;

    for (index, rule) in rules.iter().enumerate() {
        for condition in &rule.conditions {
            condition
                .validate()
                .map_err(|message| ContextError::InvalidRule {
                    path: path.to_path_buf(),
                    index,
                    message: format!("{} condition: {}", condition.kind_label(), message),
                })?;
        }
    }

    Ok(rules)
}

/// Read and validate a JSON rules file.
pub fn load_rules(path: &Path) -> ContextResult<Vec<Rule>> {
    let content = std::fs::read_to_string(path).map_err(|e| ContextError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    let rules = parse_rules(&content, path)?;
    info!(path = %path.display(), count = rules.len(), "rules loaded");
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> SystemState {
        SystemState {
            hour: 12,
            minute: 0,
            is_weekday: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_engine_returns_default() {
        let engine = RuleEngine::new();
        assert_eq!(engine.decide(&state()), Mode::Default);
    }

    #[test]
    fn test_higher_priority_wins() {
        let mut engine = RuleEngine::new();
        engine.add_rule(Rule::new(Mode::Music, 5));
        engine.add_rule(Rule::new(Mode::Off, 10));
        assert_eq!(engine.decide(&state()), Mode::Off);
    }

    #[test]
    fn test_equal_priority_keeps_insertion_order() {
        let mut engine = RuleEngine::new();
        engine.add_rule(Rule::new(Mode::Cinematic, 3).named("first"));
        engine.add_rule(Rule::new(Mode::Music, 3).named("second"));
        engine.add_rule(Rule::new(Mode::Off, 1));
        engine.add_rule(Rule::new(Mode::NightDim, 3).named("third"));

        assert_eq!(engine.decide(&state()), Mode::Cinematic);
        let names: Vec<_> = engine
            .rules()
            .iter()
            .map(|r| r.name.as_deref().unwrap_or("-"))
            .collect();
        assert_eq!(names, vec!["first", "second", "third", "-"]);
    }

    #[test]
    fn test_order_stable_across_many_ties() {
        let mut engine = RuleEngine::new();
        for i in 0..50 {
            engine.add_rule(Rule::new(Mode::Default, i % 3).named(i.to_string()));
        }
        for pair in engine.rules().windows(2) {
            assert!(pair[0].priority >= pair[1].priority);
            if pair[0].priority == pair[1].priority {
                let a: u32 = pair[0].name.as_deref().unwrap().parse().unwrap();
                let b: u32 = pair[1].name.as_deref().unwrap().parse().unwrap();
                assert!(a < b);
            }
        }
    }

    #[test]
    fn test_non_matching_rule_skipped() {
        let mut engine = RuleEngine::new();
        engine.add_rule(Rule::new(Mode::Off, 10).when(Condition::audio(true)));
        engine.add_rule(Rule::new(Mode::WorkFocus, 1));
        assert_eq!(engine.decide(&state()), Mode::WorkFocus);
    }

    #[test]
    fn test_clear_rules() {
        let mut engine = RuleEngine::with_default_rules();
        assert!(!engine.is_empty());
        engine.clear_rules();
        assert_eq!(engine.decide(&state()), Mode::Default);
        let night = SystemState {
            hour: 23,
            minute: 30,
            ..state()
        };
        assert_eq!(engine.decide(&night), Mode::Default);
    }

    #[test]
    fn test_replace_rules() {
        let mut engine = RuleEngine::with_default_rules();
        engine.replace_rules(vec![Rule::new(Mode::Off, 0)]);
        assert_eq!(engine.len(), 1);
        assert_eq!(engine.decide(&state()), Mode::Off);
    }

    #[test]
    fn test_default_rules_scenarios() {
        let engine = RuleEngine::with_default_rules();

        let night = SystemState {
            hour: 23,
            minute: 30,
            category: AppCategory::Game,
            ..state()
        };
        assert_eq!(engine.decide(&night), Mode::NightDim);

        let idle = SystemState {
            idle_minutes: 12.0,
            category: AppCategory::Game,
            ..state()
        };
        assert_eq!(engine.decide(&idle), Mode::Off);

        let coding = SystemState {
            category: AppCategory::Development,
            has_audio: true,
            ..state()
        };
        assert_eq!(engine.decide(&coding), Mode::WorkFocus);

        let browsing_with_audio = SystemState {
            category: AppCategory::Browser,
            has_audio: true,
            ..state()
        };
        assert_eq!(engine.decide(&browsing_with_audio), Mode::Music);

        let weekend = SystemState {
            category: AppCategory::Browser,
            is_weekday: false,
            ..state()
        };
        assert_eq!(engine.decide(&weekend), Mode::Music);

        let evening = SystemState {
            hour: 20,
            category: AppCategory::Unknown,
            ..state()
        };
        assert_eq!(engine.decide(&evening), Mode::Default);
    }

    #[test]
    fn test_matching_rule_reports_name() {
        let engine = RuleEngine::with_default_rules();
        let busy = SystemState {
            cpu_usage: 95.0,
            hour: 20,
            ..state()
        };
        let rule = engine.matching_rule(&busy).unwrap();
        assert_eq!(rule.name.as_deref(), Some("high-cpu"));
        assert_eq!(rule.mode, Mode::GameSync);
    }

    #[test]
    fn test_parse_rules_bare_and_wrapped() {
        let bare = r#"[{"mode": "off", "priority": 3, "conditions": [{"type": "audio", "active": false}]}]"#;
        let wrapped = r#"{"rules": [{"name": "n", "mode": "night_dim"}]}"#;

        let rules = parse_rules(bare, Path::new("bare.json")).unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].mode, Mode::Off);
        assert_eq!(rules[0].conditions, vec![Condition::audio(false)]);

        let rules = parse_rules(wrapped, Path::new("wrapped.json")).unwrap();
        assert_eq!(rules[0].priority, 0);
        assert!(rules[0].conditions.is_empty());
    }

    #[test]
    fn test_parse_rules_rejects_invalid_time() {
        let json = r#"[{"mode": "off", "conditions": [
            {"type": "time_window", "start_hour": 25, "start_minute": 0, "end_hour": 7, "end_minute": 0}
        ]}]"#;
        let err = parse_rules(json, Path::new("bad.json")).unwrap_err();
        assert!(matches!(err, ContextError::InvalidRule { index: 0, .. }));
        assert!(err.to_string().contains("Time window condition"));
    }

    #[test]
    fn test_parse_rules_reports_unknown_mode_by_name() {
        for json in [
            r#"{"rules": [{"mode": "offf"}]}"#,
            r#"[{"mode": "offf"}]"#,
        ] {
            let err = parse_rules(json, Path::new("typo.json")).unwrap_err();
            assert!(matches!(err, ContextError::ParseRules { .. }));
            assert!(err.to_string().contains("offf"), "{err}");
        }
    }

    #[test]
    fn test_parse_rules_rejects_wrong_shape() {
        for json in [r#"{"rule": []}"#, "42"] {
            let err = parse_rules(json, Path::new("shape.json")).unwrap_err();
            assert!(matches!(err, ContextError::ParseRules { .. }));
        }
    }

    #[test]
    fn test_parse_rules_rejects_garbage() {
        let err = parse_rules("{not json", Path::new("x.json")).unwrap_err();
        assert!(matches!(err, ContextError::ParseRules { .. }));
    }
}
