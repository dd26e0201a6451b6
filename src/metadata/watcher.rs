//! File watcher for project metadata files.
//!
//! Watches the project root (non-recursively) for changes to `.bowerrc` and
//! `bower.json`, and publishes them through a tokio watch channel. Rapid
//! successive writes are debounced into a single event.

use super::bower_json::BOWER_JSON_FILE;
use super::bowerrc::BOWERRC_FILE;
use notify_debouncer_mini::{DebouncedEventKind, new_debouncer};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, error, info};

/// Event types emitted when metadata files change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataChangeEvent {
    /// `.bowerrc` changed
    BowerRc(PathBuf),
    /// `bower.json` changed
    BowerJson(PathBuf),
    /// Both files changed within one debounce window
    BatchChange(Vec<PathBuf>),
    /// Watcher encountered an error
    Error(String),
}

impl MetadataChangeEvent {
    /// Whether the `.bowerrc` should be reloaded for this event.
    pub fn affects_bowerrc(&self) -> bool {
        match self {
            MetadataChangeEvent::BowerRc(_) => true,
            MetadataChangeEvent::BatchChange(paths) => {
                paths.iter().any(|p| file_name_is(p, BOWERRC_FILE))
            }
            _ => false,
        }
    }

    /// Whether the manifest should be re-read for this event.
    pub fn affects_bower_json(&self) -> bool {
        match self {
            MetadataChangeEvent::BowerJson(_) => true,
            MetadataChangeEvent::BatchChange(paths) => {
                paths.iter().any(|p| file_name_is(p, BOWER_JSON_FILE))
            }
            _ => false,
        }
    }

    pub fn affected_paths(&self) -> Vec<&Path> {
        match self {
            MetadataChangeEvent::BowerRc(p) | MetadataChangeEvent::BowerJson(p) => {
                vec![p.as_path()]
            }
            MetadataChangeEvent::BatchChange(paths) => paths.iter().map(|p| p.as_path()).collect(),
            MetadataChangeEvent::Error(_) => vec![],
        }
    }
}

/// Configuration for the metadata watcher.
#[derive(Debug, Clone)]
pub struct WatcherConfig {
    /// Debounce duration for coalescing rapid changes.
    pub debounce_duration: Duration,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            debounce_duration: Duration::from_millis(500),
        }
    }
}

/// Handle to a running metadata watcher. Dropping it stops the watcher.
pub struct MetadataWatcherHandle {
    pub events: watch::Receiver<Option<MetadataChangeEvent>>,
    _task_handle: tokio::task::JoinHandle<()>,
}

impl MetadataWatcherHandle {
    /// Wait for the next change event. Returns `None` once the watcher stops.
    pub async fn wait_for_change(&mut self) -> Option<MetadataChangeEvent> {
        loop {
            if self.events.changed().await.is_err() {
                return None;
            }
            let event = self.events.borrow_and_update().clone();
            if event.is_some() {
                return event;
            }
        }
    }
}

/// Start watching `project_root` for metadata changes.
///
/// Must be called from within a tokio runtime.
pub fn start_metadata_watcher(
    project_root: &Path,
    config: WatcherConfig,
) -> Result<MetadataWatcherHandle, notify::Error> {
    let (event_tx, event_rx) = watch::channel(None);
    let (notify_tx, notify_rx) = mpsc::channel();

    let mut debouncer = new_debouncer(config.debounce_duration, notify_tx)?;
    debouncer
        .watcher()
        .watch(project_root, notify::RecursiveMode::NonRecursive)?;
    info!("Watching project metadata in {}", project_root.display());

    let task_handle = tokio::task::spawn_blocking(move || {
        // Keep the debouncer alive
        let _debouncer = debouncer;
        process_notify_events(notify_rx, event_tx);
    });

    Ok(MetadataWatcherHandle {
        events: event_rx,
        _task_handle: task_handle,
    })
}

fn process_notify_events(
    rx: mpsc::Receiver<Result<Vec<notify_debouncer_mini::DebouncedEvent>, notify::Error>>,
    tx: watch::Sender<Option<MetadataChangeEvent>>,
) {
    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let paths = events
                    .into_iter()
                    .filter(|e| {
                        matches!(
                            e.kind,
                            DebouncedEventKind::Any | DebouncedEventKind::AnyContinuous
                        )
                    })
                    .map(|e| e.path)
                    .collect();

                if let Some(event) = classify_paths(paths) {
                    debug!("Metadata change detected: {:?}", event);
                    if tx.send(Some(event)).is_err() {
                        info!("Metadata watcher receiver dropped, stopping");
                        return;
                    }
                }
            }
            Ok(Err(e)) => {
                error!("File watcher error: {}", e);
                let _ = tx.send(Some(MetadataChangeEvent::Error(e.to_string())));
            }
            Err(_) => {
                info!("Metadata watcher channel closed, stopping");
                return;
            }
        }
    }
}

/// Collapse a debounced batch of paths into at most one event.
fn classify_paths(paths: Vec<PathBuf>) -> Option<MetadataChangeEvent> {
    let mut relevant: Vec<PathBuf> = paths
        .into_iter()
        .filter(|p| classify_path(p).is_some())
        .collect();
    relevant.dedup();

    if relevant.len() > 1 {
        Some(MetadataChangeEvent::BatchChange(relevant))
    } else {
        relevant.pop().and_then(|p| classify_path(&p))
    }
}

fn classify_path(path: &Path) -> Option<MetadataChangeEvent> {
    if file_name_is(path, BOWERRC_FILE) {
        Some(MetadataChangeEvent::BowerRc(path.to_path_buf()))
    } else if file_name_is(path, BOWER_JSON_FILE) {
        Some(MetadataChangeEvent::BowerJson(path.to_path_buf()))
    } else {
        None
    }
}

fn file_name_is(path: &Path, name: &str) -> bool {
    path.file_name().and_then(|n| n.to_str()) == Some(name)
}
