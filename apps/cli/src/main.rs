mod config;
mod render;
mod watcher;

use ambimode_context::{
    load_rules, platform::PlatformProvider, AppClassifier, CycleCallback, ModeMonitor, RuleEngine,
};
use ambimode_events::{publish_report, EventBusRef, JsonLinesEventBus};
use anyhow::Result;
use config::{display_path, parse_args, MonitorConfig, HELP};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use watcher::CategoryFileWatcher;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let parsed = parse_args(std::env::args().skip(1));
    let config = parsed.config;

    if config.show_help {
        print!("{HELP}");
        return Ok(());
    }

    // Logs go to stderr so stdout stays clean for --json consumers.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    for warning in &parsed.warnings {
        warn!("{warning}");
    }

    info!(
        interval_ms = config.interval.as_millis() as u64,
        debug = config.debug,
        json = config.json,
        "Starting ambimode"
    );

    let category_source = config.category_source();
    let mut classifier = AppClassifier::new();
    // On failure the built-in table is already installed and the reason logged.
    if let Ok(count) = classifier.initialize_mapping(category_source.as_deref()) {
        info!(
            entries = count,
            source = %display_path(category_source.as_deref()),
            "category table ready"
        );
    }

    let engine = build_engine(&config);
    let provider = Arc::new(PlatformProvider::new());
    let monitor = ModeMonitor::new(provider, classifier, engine);

    let _watcher = match (&category_source, config.watch) {
        (Some(path), true) => match CategoryFileWatcher::new(path, monitor.reload_handle()) {
            Ok(w) => Some(w),
            Err(e) => {
                warn!(error = %e, "category file watcher disabled");
                None
            }
        },
        (None, true) => {
            warn!("--watch given but no category file is in use");
            None
        }
        _ => None,
    };

    let cancel = CancellationToken::new();
    let cancel_on_signal = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for Ctrl+C");
            return;
        }
        info!("Ctrl+C received, stopping");
        cancel_on_signal.cancel();
    });

    monitor.run(config.interval, cancel, output_callback(&config)).await;

    info!("ambimode exited");
    Ok(())
}

/// Built-in rules, replaced by the rules file when one is given and valid.
fn build_engine(config: &MonitorConfig) -> RuleEngine {
    let mut engine = RuleEngine::with_default_rules();
    if let Some(path) = &config.rules_path {
        match load_rules(path) {
            Ok(rules) => engine.replace_rules(rules),
            Err(e) => error!(error = %e, "rules file rejected, keeping built-in rules"),
        }
    }
    engine
}

fn output_callback(config: &MonitorConfig) -> CycleCallback {
    if config.json {
        let bus: EventBusRef = Arc::new(JsonLinesEventBus::stdout());
        return Arc::new(move |report| publish_report(bus.as_ref(), report));
    }

    let debug = config.debug;
    Arc::new(move |report| {
        if let Some(transition) = &report.transition {
            println!();
            println!("{}", render::render_transition(transition));
            println!();
        }
        println!("{}", render::render_report(report, debug));
    })
}
