//! File system watcher for live index rebuilds.
//!
//! Monitors the content directory and rebuilds the whole index when a
//! content file is created, modified or removed.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────┐    ┌───────────┐    ┌──────────────────────────────┐
//! │ notify   │───▶│ Debouncer │───▶│ handle_changes()             │
//! │ events   │    │ (300ms)   │    │  rebuild → publish → export  │
//! └──────────┘    └───────────┘    └──────────────────────────────┘
//!       ▲
//!   Ctrl-C ──▶ Shutdown
//! ```
//!
//! A burst of edits yields exactly one rebuild. A failed rebuild keeps the
//! previously published snapshot.

use crate::{
    config::SiteConfig,
    content::{CollectionPattern, file_name},
    export,
    index::IndexHandle,
    log,
    logger::WatchStatus,
    pipeline,
};
use anyhow::{Context, Result};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use rustc_hash::FxHashSet;
use std::{
    path::{Path, PathBuf},
    sync::mpsc::{self, RecvTimeoutError},
    time::{Duration, Instant},
};

/// Idle wait when nothing is pending.
const IDLE_TIMEOUT: Duration = Duration::from_secs(60);

enum WatchEvent {
    Fs(notify::Result<Event>),
    Shutdown,
}

// =============================================================================
// Path Utilities
// =============================================================================

/// Check if path is a temp/backup file (editor artifacts).
fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    matches!(ext, "bck" | "bak" | "backup" | "swp" | "swo" | "tmp")
        || name.ends_with('~')
        || name.starts_with('.')
}

/// Whether `path` is a corpus file the next rebuild would load.
fn is_content_path(path: &Path, root: &Path, recursive: bool, patterns: &[CollectionPattern]) -> bool {
    let Ok(rel) = path.strip_prefix(root) else {
        return false;
    };
    if !recursive && rel.components().count() != 1 {
        return false;
    }
    let rel = rel.to_string_lossy();
    let name = file_name(&rel);
    patterns.iter().any(|p| p.matches(name))
}

/// Format path relative to the content root for log display.
fn rel_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}

const fn is_relevant(event: &Event) -> bool {
    matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    )
}

// =============================================================================
// Debounce State
// =============================================================================

/// Batches rapid file events with debouncing and rebuild cooldown.
///
/// Events arriving during the cooldown stay pending and are handled once it
/// has passed.
struct Debouncer {
    debounce: Duration,
    cooldown: Duration,
    pending: FxHashSet<PathBuf>,
    last_event: Option<Instant>,
    last_rebuild: Option<Instant>,
}

impl Debouncer {
    fn new(debounce: Duration, cooldown: Duration) -> Self {
        Self {
            debounce,
            cooldown,
            pending: FxHashSet::default(),
            last_event: None,
            last_rebuild: None,
        }
    }

    fn in_cooldown(&self) -> bool {
        self.last_rebuild.is_some_and(|t| t.elapsed() < self.cooldown)
    }

    fn add(&mut self, event: Event) {
        for path in event.paths {
            if !is_temp_file(&path) {
                self.pending.insert(path);
            }
        }
        self.last_event = Some(Instant::now());
    }

    fn ready(&self) -> bool {
        !self.pending.is_empty()
            && !self.in_cooldown()
            && self.last_event.is_some_and(|t| t.elapsed() >= self.debounce)
    }

    fn take(&mut self) -> Vec<PathBuf> {
        self.last_event = None;
        let mut paths: Vec<_> = self.pending.drain().collect();
        paths.sort();
        paths
    }

    fn mark_rebuild(&mut self) {
        self.last_rebuild = Some(Instant::now());
    }

    fn timeout(&self) -> Duration {
        if self.pending.is_empty() {
            IDLE_TIMEOUT
        } else {
            self.debounce
        }
    }
}

// =============================================================================
// Event Handler
// =============================================================================

/// Rebuild once for a batch of changed paths. Returns true if a rebuild ran.
fn handle_changes(
    paths: &[PathBuf],
    config: &SiteConfig,
    handle: &IndexHandle,
    status: &mut WatchStatus,
) -> bool {
    let root = &config.content.root;
    let patterns = config.content.patterns();
    let changed: Vec<String> = paths
        .iter()
        .filter(|p| is_content_path(p, root, config.content.recursive, &patterns))
        .map(|p| rel_path(p, root))
        .collect();
    if changed.is_empty() {
        return false;
    }

    log!("watch"; "{} changed, rebuilding...", changed.join(", "));

    match pipeline::rebuild_site(config, handle) {
        Ok(snapshot) => {
            status.success(&format!(
                "rebuilt {} (generation {})",
                pipeline::summarize(&snapshot),
                snapshot.generation
            ));
            snapshot.report.log();
            if config.watch.export
                && let Err(e) = export::write_to_disk(&snapshot, &config.content.output)
            {
                log!("error"; "{e:#}");
            }
        }
        Err(e) => status.error("rebuild failed, keeping previous index", &e.to_string()),
    }
    true
}

// =============================================================================
// Public API
// =============================================================================

/// Watch the content directory and rebuild on change until Ctrl-C.
pub fn watch_for_changes_blocking(config: &SiteConfig, handle: &IndexHandle) -> Result<()> {
    let root = &config.content.root;
    let (tx, rx) = mpsc::channel();

    let fs_tx = tx.clone();
    let mut watcher = notify::recommended_watcher(move |res| {
        fs_tx.send(WatchEvent::Fs(res)).ok();
    })
    .context("Failed to create file watcher")?;

    let mode = if config.content.recursive {
        RecursiveMode::Recursive
    } else {
        RecursiveMode::NonRecursive
    };
    watcher
        .watch(root, mode)
        .with_context(|| format!("Failed to watch content: {}", root.display()))?;

    ctrlc::set_handler(move || {
        tx.send(WatchEvent::Shutdown).ok();
    })
    .context("Failed to set Ctrl-C handler")?;

    log!("watch"; "watching {}/ (Ctrl-C to stop)", root.display());

    let mut debouncer = Debouncer::new(
        Duration::from_millis(config.watch.debounce_ms),
        Duration::from_millis(config.watch.cooldown_ms),
    );
    let mut status = WatchStatus::new();

    loop {
        match rx.recv_timeout(debouncer.timeout()) {
            Ok(WatchEvent::Fs(Ok(event))) if is_relevant(&event) => debouncer.add(event),
            Ok(WatchEvent::Fs(Err(e))) => log!("watch"; "error: {e}"),
            Ok(WatchEvent::Shutdown) | Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) if debouncer.ready() => {
                if handle_changes(&debouncer.take(), config, handle, &mut status) {
                    debouncer.mark_rebuild();
                }
            }
            // Irrelevant events, timeout while still settling
            _ => {}
        }
    }

    log!("watch"; "stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentKind;
    use notify::event::{CreateKind, ModifyKind, RemoveKind};
    use std::fs;
    use std::thread::sleep;
    use tempfile::TempDir;

    fn patterns() -> Vec<CollectionPattern> {
        ContentKind::ALL.into_iter().map(CollectionPattern::default_for).collect()
    }

    fn event(kind: EventKind, paths: &[&str]) -> Event {
        let mut event = Event::new(kind);
        for p in paths {
            event = event.add_path(PathBuf::from(p));
        }
        event
    }

    #[test]
    fn test_is_temp_file() {
        assert!(is_temp_file(Path::new("/r/notes.a.mdx.swp")));
        assert!(is_temp_file(Path::new("/r/notes.a.mdx~")));
        assert!(is_temp_file(Path::new("/r/.notes.a.mdx")));
        assert!(!is_temp_file(Path::new("/r/notes.a.mdx")));
    }

    #[test]
    fn test_is_content_path() {
        let root = Path::new("/site/app/routes");
        let p = patterns();
        assert!(is_content_path(&root.join("notes.a.mdx"), root, false, &p));
        assert!(is_content_path(&root.join("portfolio.x.mdx"), root, false, &p));
        assert!(!is_content_path(&root.join("about.mdx"), root, false, &p));
        assert!(!is_content_path(&root.join("notes.a.md"), root, false, &p));
        assert!(!is_content_path(Path::new("/elsewhere/notes.a.mdx"), root, false, &p));

        let nested = root.join("2024/notes.a.mdx");
        assert!(!is_content_path(&nested, root, false, &p));
        assert!(is_content_path(&nested, root, true, &p));
    }

    #[test]
    fn test_is_relevant() {
        assert!(is_relevant(&event(EventKind::Create(CreateKind::File), &[])));
        assert!(is_relevant(&event(EventKind::Modify(ModifyKind::Any), &[])));
        assert!(is_relevant(&event(EventKind::Remove(RemoveKind::File), &[])));
        assert!(!is_relevant(&event(EventKind::Any, &[])));
    }

    #[test]
    fn test_debouncer_batches_events() {
        let mut debouncer = Debouncer::new(Duration::from_millis(20), Duration::ZERO);
        assert!(!debouncer.ready());
        assert_eq!(debouncer.timeout(), IDLE_TIMEOUT);

        let modify = EventKind::Modify(ModifyKind::Any);
        debouncer.add(event(modify, &["/r/notes.b.mdx", "/r/notes.b.mdx.swp"]));
        debouncer.add(event(modify, &["/r/notes.a.mdx", "/r/notes.b.mdx"]));
        assert!(!debouncer.ready());
        assert_eq!(debouncer.timeout(), Duration::from_millis(20));

        sleep(Duration::from_millis(30));
        assert!(debouncer.ready());
        assert_eq!(
            debouncer.take(),
            vec![PathBuf::from("/r/notes.a.mdx"), PathBuf::from("/r/notes.b.mdx")]
        );
        assert!(!debouncer.ready());
    }

    #[test]
    fn test_debouncer_holds_events_during_cooldown() {
        let mut debouncer = Debouncer::new(Duration::ZERO, Duration::from_secs(60));
        debouncer.mark_rebuild();
        debouncer.add(event(EventKind::Create(CreateKind::File), &["/r/notes.a.mdx"]));
        assert!(debouncer.in_cooldown());
        assert!(!debouncer.ready());
        assert_eq!(debouncer.pending.len(), 1);
    }

    #[test]
    fn test_handle_changes_rebuilds_once() {
        let dir = TempDir::new().unwrap();
        let mut config = SiteConfig::default();
        config.content.root = dir.path().to_path_buf();
        config.content.output = dir.path().join("out");
        fs::write(dir.path().join("notes.a.mdx"), "---\ntitle: A\n---\n").unwrap();
        fs::write(dir.path().join("notes.b.mdx"), "---\ntitle: B\n---\n").unwrap();

        let handle = IndexHandle::new();
        let rx = handle.subscribe();
        let mut status = WatchStatus::new();

        let paths = vec![dir.path().join("notes.a.mdx"), dir.path().join("notes.b.mdx")];
        assert!(handle_changes(&paths, &config, &handle, &mut status));
        assert_eq!(rx.try_iter().count(), 1);
        assert_eq!(handle.load().notes.len(), 2);
        assert!(config.content.output.join("notes.json").is_file());

        let unrelated = vec![dir.path().join("README.md")];
        assert!(!handle_changes(&unrelated, &config, &handle, &mut status));
        assert_eq!(rx.try_iter().count(), 0);
    }

    #[test]
    fn test_handle_changes_keeps_snapshot_on_failure() {
        let dir = TempDir::new().unwrap();
        let mut config = SiteConfig::default();
        config.content.root = dir.path().join("routes");
        config.watch.export = false;
        fs::create_dir(&config.content.root).unwrap();
        fs::write(config.content.root.join("notes.a.mdx"), "---\ntitle: A\n---\n").unwrap();

        let handle = IndexHandle::new();
        let mut status = WatchStatus::new();
        let changed = vec![config.content.root.join("notes.a.mdx")];
        handle_changes(&changed, &config, &handle, &mut status);
        assert_eq!(handle.load().generation, 1);

        fs::remove_dir_all(&config.content.root).unwrap();
        assert!(handle_changes(&changed, &config, &handle, &mut status));
        let current = handle.load();
        assert_eq!(current.generation, 1);
        assert!(current.notes.get("a").is_some());
    }
}
