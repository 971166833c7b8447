//! Command-line configuration.

use ambimode_context::{DEFAULT_INTERVAL, MIN_INTERVAL};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File name looked up in the working directory and the user config dir.
pub const CATEGORY_FILE_NAME: &str = "app_category_config.txt";

pub const HELP: &str = "\
ambimode - pick an ambient lighting mode from what the machine is doing

USAGE:
    ambimode [INTERVAL_MS] [OPTIONS]

ARGS:
    INTERVAL_MS            Sampling interval in milliseconds (default 3000, minimum 100)

OPTIONS:
    -d, --debug            Verbose logging and per-cycle window details
    -c, --config <PATH>    Process category file (name=category per line)
    -r, --rules <PATH>     JSON rules file replacing the built-in rules
        --json             Emit mode:cycle / mode:changed events as JSON lines
    -w, --watch            Reload the category file when it changes
    -h, --help             Print this help
";

#[derive(Debug, Clone, PartialEq)]
pub struct MonitorConfig {
    pub interval: Duration,
    pub debug: bool,
    pub json: bool,
    pub watch: bool,
    /// Explicit `--config` path; `None` means look in the default locations.
    pub category_config: Option<PathBuf>,
    pub rules_path: Option<PathBuf>,
    pub show_help: bool,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            debug: false,
            json: false,
            watch: false,
            category_config: None,
            rules_path: None,
            show_help: false,
        }
    }
}

impl MonitorConfig {
    /// Category file to load: the explicit path, else the first default
    /// location that exists, else `None` (built-in table).
    pub fn category_source(&self) -> Option<PathBuf> {
        if let Some(path) = &self.category_config {
            return Some(path.clone());
        }
        default_category_paths().into_iter().find(|p| p.is_file())
    }

    pub fn log_filter(&self) -> &'static str {
        if self.debug {
            "debug,ambimode=debug"
        } else {
            "info,ambimode=info"
        }
    }
}

/// Parsed arguments plus anything worth warning about once logging is up.
#[derive(Debug, Default)]
pub struct ParsedArgs {
    pub config: MonitorConfig,
    pub warnings: Vec<String>,
}

/// Parse arguments, excluding the program name. Never fails; problems are
/// collected as warnings and the offending argument is ignored.
pub fn parse_args<I>(args: I) -> ParsedArgs
where
    I: IntoIterator<Item = String>,
{
    let mut parsed = ParsedArgs::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-d" | "--debug" => parsed.config.debug = true,
            "--json" => parsed.config.json = true,
            "-w" | "--watch" => parsed.config.watch = true,
            "-h" | "--help" => parsed.config.show_help = true,
            "-c" | "--config" => match args.next() {
                Some(path) => parsed.config.category_config = Some(PathBuf::from(path)),
                None => parsed.warnings.push(format!("{arg} needs a path, ignoring")),
            },
            "-r" | "--rules" => match args.next() {
                Some(path) => parsed.config.rules_path = Some(PathBuf::from(path)),
                None => parsed.warnings.push(format!("{arg} needs a path, ignoring")),
            },
            other => match other.parse::<u64>() {
                Ok(ms) => {
                    let requested = Duration::from_millis(ms);
                    if requested < MIN_INTERVAL {
                        parsed.warnings.push(format!(
                            "interval {ms}ms is below the minimum, using {}ms",
                            MIN_INTERVAL.as_millis()
                        ));
                        parsed.config.interval = MIN_INTERVAL;
                    } else {
                        parsed.config.interval = requested;
                    }
                }
                Err(_) => parsed.warnings.push(format!("unknown argument '{other}', ignoring")),
            },
        }
    }

    parsed
}

/// Default category file locations, in lookup order.
pub fn default_category_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(CATEGORY_FILE_NAME)];
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("ambimode").join(CATEGORY_FILE_NAME));
    }
    paths
}

pub fn display_path(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| "built-in".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> ParsedArgs {
        parse_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_defaults() {
        let parsed = parse(&[]);
        assert_eq!(parsed.config, MonitorConfig::default());
        assert_eq!(parsed.config.interval, Duration::from_millis(3000));
        assert!(parsed.warnings.is_empty());
    }

    #[test]
    fn test_interval_and_flags() {
        let parsed = parse(&["1500", "-d", "--json", "--watch"]);
        assert_eq!(parsed.config.interval, Duration::from_millis(1500));
        assert!(parsed.config.debug);
        assert!(parsed.config.json);
        assert!(parsed.config.watch);
        assert!(parsed.warnings.is_empty());
    }

    #[test]
    fn test_interval_clamped() {
        let parsed = parse(&["20"]);
        assert_eq!(parsed.config.interval, MIN_INTERVAL);
        assert_eq!(parsed.warnings.len(), 1);
    }

    #[test]
    fn test_paths() {
        let parsed = parse(&["--config", "cats.txt", "-r", "rules.json"]);
        assert_eq!(parsed.config.category_config, Some(PathBuf::from("cats.txt")));
        assert_eq!(parsed.config.rules_path, Some(PathBuf::from("rules.json")));
        assert_eq!(parsed.config.category_source(), Some(PathBuf::from("cats.txt")));
    }

    #[test]
    fn test_missing_value_warns() {
        let parsed = parse(&["--config"]);
        assert_eq!(parsed.config.category_config, None);
        assert_eq!(parsed.warnings.len(), 1);
        assert!(parsed.warnings[0].contains("--config"));
    }

    #[test]
    fn test_unknown_argument_warns() {
        let parsed = parse(&["--fast", "-d"]);
        assert!(parsed.config.debug);
        assert_eq!(parsed.warnings.len(), 1);
        assert!(parsed.warnings[0].contains("--fast"));
    }

    #[test]
    fn test_help() {
        assert!(parse(&["-h"]).config.show_help);
        assert!(HELP.contains("--rules"));
    }

    #[test]
    fn test_log_filter() {
        let mut config = MonitorConfig::default();
        assert_eq!(config.log_filter(), "info,ambimode=info");
        config.debug = true;
        assert_eq!(config.log_filter(), "debug,ambimode=debug");
    }

    #[test]
    fn test_default_category_paths() {
        let paths = default_category_paths();
        assert_eq!(paths[0], PathBuf::from(CATEGORY_FILE_NAME));
        assert!(paths.iter().all(|p| p.ends_with(CATEGORY_FILE_NAME)));
    }

    #[test]
    fn test_display_path() {
        assert_eq!(display_path(None), "built-in");
        assert_eq!(display_path(Some(Path::new("a.txt"))), "a.txt");
    }
}
