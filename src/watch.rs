//! Watch mode: regenerate the report whenever the tree changes.
//!
//! Events are filtered with the analyzer's own skip rules, so edits to
//! hidden, built-in, excluded or ignored paths never trigger a run. Each
//! directory's `.gitignore` is read fresh per check, so ignore edits take
//! effect on the next event. Writes to the report file itself are dropped.

use std::path::{Component, Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use notify::event::ModifyKind;
use notify::{Event, EventKind, RecursiveMode, Watcher};
use tracing::{debug, info, warn};

use crate::analyzer::AnalysisOptions;
use crate::analyzer::scanner::gitignore::{self, GITIGNORE_FILE};
use crate::analyzer::scanner::{FileSystem, IgnoreMatcher, LocalFileSystem, skip_reason};
use crate::types::Result;

/// Quiet period that closes one batch of events
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(200);

/// What to watch and which changes to ignore
#[derive(Debug, Clone)]
pub struct WatchSettings {
    pub root: PathBuf,
    pub output_path: PathBuf,
    pub exclude_dirs: Vec<String>,
    pub ignore_patterns: Vec<String>,
    pub respect_gitignore: bool,
    pub debounce: Duration,
}

impl WatchSettings {
    pub fn new(root: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            output_path: output_path.into(),
            exclude_dirs: Vec::new(),
            ignore_patterns: Vec::new(),
            respect_gitignore: true,
            debounce: DEFAULT_DEBOUNCE,
        }
    }

    /// Reuse the exclusions of an analysis run
    pub fn with_options(mut self, options: &AnalysisOptions) -> Self {
        self.exclude_dirs = options.exclude_dirs.clone();
        self.ignore_patterns = options.ignore_patterns.clone();
        self.respect_gitignore = options.respect_gitignore;
        self
    }
}

/// Content and tree changes count; reads and metadata touches do not.
pub fn is_relevant_kind(kind: &EventKind) -> bool {
    match kind {
        EventKind::Create(_) | EventKind::Remove(_) | EventKind::Any => true,
        EventKind::Modify(ModifyKind::Metadata(_)) => false,
        EventKind::Modify(_) => true,
        EventKind::Access(_) | EventKind::Other => false,
    }
}

/// Decides which filesystem events warrant a re-run
pub struct WatchFilter<F: FileSystem = LocalFileSystem> {
    root: PathBuf,
    output_path: PathBuf,
    ignore_patterns: Vec<String>,
    exclude_dirs: Vec<String>,
    respect_gitignore: bool,
    fs: F,
}

impl WatchFilter<LocalFileSystem> {
    pub fn new(settings: &WatchSettings) -> Self {
        Self::with_file_system(settings, LocalFileSystem)
    }
}

impl<F: FileSystem> WatchFilter<F> {
    pub fn with_file_system(settings: &WatchSettings, fs: F) -> Self {
        Self {
            root: settings.root.clone(),
            output_path: settings.output_path.clone(),
            ignore_patterns: settings.ignore_patterns.clone(),
            exclude_dirs: settings.exclude_dirs.clone(),
            respect_gitignore: settings.respect_gitignore,
            fs,
        }
    }

    /// Caller patterns plus `dir/.gitignore`, as the analyzer builds them.
    /// An unreadable ignore file counts as empty here; the run reports it.
    fn extend_with_gitignore(&self, patterns: &mut Vec<String>, dir: &Path) {
        if !self.respect_gitignore {
            return;
        }
        match gitignore::load_patterns(&self.fs, dir) {
            Ok(local) => patterns.extend(local),
            Err(e) => debug!("Ignoring unreadable ignore file: {}", e),
        }
    }

    pub fn is_relevant_path(&self, path: &Path) -> bool {
        if path == self.output_path {
            return false;
        }
        let Ok(relative) = path.strip_prefix(&self.root) else {
            return false;
        };

        let segments: Vec<String> = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();

        let mut patterns = self.ignore_patterns.clone();
        let mut dir = self.root.clone();
        self.extend_with_gitignore(&mut patterns, &dir);

        let mut prefix = String::new();
        for (i, name) in segments.iter().enumerate() {
            if !prefix.is_empty() {
                prefix.push('/');
            }
            prefix.push_str(name);

            // A changed .gitignore alters what the next run sees
            if i + 1 == segments.len() && name == GITIGNORE_FILE {
                return true;
            }
            let matcher = IgnoreMatcher::new(&patterns);
            if skip_reason(name, &prefix, &matcher, &self.exclude_dirs).is_some() {
                return false;
            }

            dir.push(name);
            if i + 1 < segments.len() {
                self.extend_with_gitignore(&mut patterns, &dir);
            }
        }
        true
    }

    /// Paths of `event` that should trigger a re-run
    pub fn relevant_paths<'a>(&self, event: &'a Event) -> Vec<&'a Path> {
        if !is_relevant_kind(&event.kind) {
            return Vec::new();
        }
        event
            .paths
            .iter()
            .map(PathBuf::as_path)
            .filter(|p| self.is_relevant_path(p))
            .collect()
    }
}

/// Watch `settings.root` and call `on_change` once per relevant batch.
///
/// Blocks until the event channel closes. A failing `on_change` is logged and
/// watching continues.
pub fn watch<F>(settings: &WatchSettings, mut on_change: F) -> Result<()>
where
    F: FnMut(&[PathBuf]) -> Result<()>,
{
    let (tx, rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(tx)?;
    watcher.watch(&settings.root, RecursiveMode::Recursive)?;
    info!("Watching {}", settings.root.display());

    let filter = WatchFilter::new(settings);
    while let Some(changed) = next_batch(&rx, &filter, settings.debounce) {
        if changed.is_empty() {
            continue;
        }
        debug!("{} relevant path(s) changed", changed.len());
        if let Err(e) = on_change(&changed) {
            warn!("Regeneration failed: {}", e);
        }
    }

    debug!("Watch channel closed");
    Ok(())
}

/// Block for the next event, then gather more until `debounce` passes
/// quietly. `None` once the channel is closed and drained.
fn next_batch<F: FileSystem>(
    rx: &Receiver<notify::Result<Event>>,
    filter: &WatchFilter<F>,
    debounce: Duration,
) -> Option<Vec<PathBuf>> {
    let mut changed: Vec<PathBuf> = Vec::new();
    let mut first = true;

    loop {
        let received = if first {
            first = false;
            match rx.recv() {
                Ok(r) => r,
                Err(_) => return None,
            }
        } else {
            match rx.recv_timeout(debounce) {
                Ok(r) => r,
                Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => {
                    return Some(changed);
                }
            }
        };

        match received {
            Ok(event) => {
                for path in filter.relevant_paths(&event) {
                    if !changed.iter().any(|c| c == path) {
                        changed.push(path.to_path_buf());
                    }
                }
            }
            Err(e) => warn!("Watch error: {}", e),
        }
    }
}
