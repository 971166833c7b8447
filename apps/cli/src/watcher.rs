//! File watcher for category table hot reloading.
//!
//! Watches the directory holding the category file (editors often replace
//! the file rather than write it in place) and requests a reload whenever
//! an event touches that file name.

use ambimode_context::ReloadHandle;
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

const DEBOUNCE: Duration = Duration::from_millis(500);

/// Keeps the underlying watcher alive; dropping it stops watching.
pub struct CategoryFileWatcher {
    _watcher: RecommendedWatcher,
    path: PathBuf,
}

impl CategoryFileWatcher {
    pub fn new(path: &Path, reload: ReloadHandle) -> Result<Self, WatcherError> {
        let file_name = path
            .file_name()
            .map(|n| n.to_os_string())
            .ok_or_else(|| WatcherError::NotAFile(path.to_path_buf()))?;
        let directory = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let (tx, rx) = mpsc::channel();
        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| {
                if let Err(e) = tx.send(result) {
                    error!(error = %e, "failed to forward watcher event");
                }
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )
        .map_err(WatcherError::Create)?;

        watcher
            .watch(&directory, RecursiveMode::NonRecursive)
            .map_err(|e| WatcherError::Watch(directory.clone(), e))?;
        info!(path = %path.display(), "watching category file");

        thread::spawn(move || event_loop(rx, file_name, reload));

        Ok(Self {
            _watcher: watcher,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl std::fmt::Debug for CategoryFileWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategoryFileWatcher")
            .field("path", &self.path)
            .finish()
    }
}

fn event_loop(
    rx: mpsc::Receiver<Result<Event, notify::Error>>,
    file_name: OsString,
    reload: ReloadHandle,
) {
    let mut last_request: Option<Instant> = None;

    loop {
        match rx.recv() {
            Ok(Ok(event)) => {
                if !touches(&event, &file_name) {
                    continue;
                }
                let now = Instant::now();
                if last_request.is_some_and(|t| now.duration_since(t) < DEBOUNCE) {
                    debug!("skipping reload request due to debounce");
                    continue;
                }
                info!(paths = ?event.paths, "category file changed, requesting reload");
                reload.request();
                last_request = Some(now);
            }
            Ok(Err(e)) => warn!(error = %e, "file watcher error"),
            Err(_) => {
                debug!("watcher channel closed");
                break;
            }
        }
    }
}

fn touches(event: &Event, file_name: &OsString) -> bool {
    event
        .paths
        .iter()
        .any(|p| p.file_name().is_some_and(|n| n == file_name.as_os_str()))
}

#[derive(Debug, thiserror::Error)]
pub enum WatcherError {
    #[error("{0} does not name a file")]
    NotAFile(PathBuf),

    #[error("failed to create watcher: {0}")]
    Create(#[source] notify::Error),

    #[error("failed to watch {0}: {1}")]
    Watch(PathBuf, #[source] notify::Error),
}
