//! Rebuild orchestration.
//!
//! A rebuild loads the whole corpus, builds a fresh [`Snapshot`] and
//! publishes it. If the corpus cannot be read at all, nothing is published
//! and the previous snapshot stays current.

use crate::config::SiteConfig;
use crate::content::{CollectionPattern, ContentSource};
use crate::error::IndexError;
use crate::index::{BuildOptions, IndexHandle, Snapshot, build_snapshot};
use std::sync::Arc;

/// Rebuild from `source` and publish the result through `handle`.
pub fn rebuild(
    source: &dyn ContentSource,
    patterns: &[CollectionPattern],
    options: &BuildOptions,
    handle: &IndexHandle,
) -> Result<Arc<Snapshot>, IndexError> {
    let generation = handle.next_generation();
    let snapshot = build_snapshot(source, patterns, options, generation)?;
    handle.publish(snapshot);
    Ok(handle.load())
}

/// Rebuild the corpus described by `config`.
pub fn rebuild_site(config: &SiteConfig, handle: &IndexHandle) -> Result<Arc<Snapshot>, IndexError> {
    rebuild(
        &config.source(),
        &config.content.patterns(),
        &config.build_options(),
        handle,
    )
}

/// One-line summary of a published snapshot.
pub fn summarize(snapshot: &Snapshot) -> String {
    let report = &snapshot.report;
    let mut summary = format!(
        "{} notes, {} portfolio entries",
        snapshot.notes.len(),
        snapshot.portfolio.len()
    );
    let skipped = report.notes.rejected + report.portfolio.rejected;
    if skipped > 0 {
        summary.push_str(&format!(", {skipped} skipped"));
    }
    if !report.warnings.is_empty() {
        summary.push_str(&format!(", {} warning(s)", report.warnings.len()));
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentKind, FsSource, MemorySource};
    use crate::index::IndexUpdated;
    use std::fs;
    use tempfile::TempDir;

    fn patterns() -> Vec<CollectionPattern> {
        ContentKind::ALL.into_iter().map(CollectionPattern::default_for).collect()
    }

    #[test]
    fn test_rebuild_publishes_and_notifies() {
        let handle = IndexHandle::new();
        let rx = handle.subscribe();
        let mut source = MemorySource::new("routes").with("notes.a.mdx", "---\ntitle: A\n---\n");

        let snap = rebuild(&source, &patterns(), &BuildOptions::default(), &handle).unwrap();
        assert_eq!(snap.generation, 1);
        assert!(snap.notes.get("a").is_some());
        assert_eq!(rx.try_recv(), Ok(IndexUpdated { generation: 1 }));

        source.insert("notes.b.mdx", "---\ntitle: B\n---\n");
        let snap = rebuild(&source, &patterns(), &BuildOptions::default(), &handle).unwrap();
        assert_eq!(snap.notes.len(), 2);
        assert_eq!(rx.try_recv(), Ok(IndexUpdated { generation: 2 }));
    }

    #[test]
    fn test_failed_rebuild_keeps_previous_snapshot() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("notes.a.mdx"), "---\ntitle: A\n---\n").unwrap();
        let handle = IndexHandle::new();
        let rx = handle.subscribe();

        let source = FsSource::new(dir.path());
        rebuild(&source, &patterns(), &BuildOptions::default(), &handle).unwrap();
        assert!(rx.try_recv().is_ok());

        let missing = FsSource::new(dir.path().join("gone"));
        let err = rebuild(&missing, &patterns(), &BuildOptions::default(), &handle).unwrap_err();
        assert!(matches!(err, IndexError::RootMissing(_)));

        let current = handle.load();
        assert_eq!(current.generation, 1);
        assert!(current.notes.get("a").is_some());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_rebuild_site_from_config() {
        let dir = TempDir::new().unwrap();
        let mut config = SiteConfig::default();
        config.content.root = dir.path().to_path_buf();
        fs::write(dir.path().join("notes.x.mdx"), "---\ntitle: X\n---\nbody").unwrap();
        fs::write(dir.path().join("portfolio.p.mdx"), "---\ntitle: P\n---\n").unwrap();

        let handle = IndexHandle::new();
        let snap = rebuild_site(&config, &handle).unwrap();
        assert_eq!(summarize(&snap), "1 notes, 1 portfolio entries");
    }

    #[test]
    fn test_summary_mentions_skipped() {
        let handle = IndexHandle::new();
        let source = MemorySource::new("routes")
            .with("notes.ok.mdx", "---\ndate: \"later\"\n---\n")
            .with("notes.bad.mdx", "---\ntitle: 1\n---\n");
        let snap = rebuild(&source, &patterns(), &BuildOptions::default(), &handle).unwrap();
        assert_eq!(summarize(&snap), "1 notes, 0 portfolio entries, 1 skipped, 1 warning(s)");
    }
}
