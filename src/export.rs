//! JSON data files for external renderers.
//!
//! Each rebuild can be written out as a fixed set of `*.json` files in one
//! directory. Renderers read these instead of touching content files.

use crate::index::Snapshot;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

type DataFileGenerator = fn(&Snapshot) -> serde_json::Result<String>;

/// Data files and their generators.
const DATA_FILES: &[(&str, DataFileGenerator)] = &[
    ("notes.json", |s| to_json(s.notes.entries())),
    ("portfolio.json", |s| to_json(s.portfolio.entries())),
    ("search-index.json", |s| to_json(s.notes.search_entries())),
    ("categories.json", |s| to_json(&s.notes.categories())),
    ("tags.json", |s| to_json(&s.notes.tag_summaries())),
];

fn to_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

/// Write every data file of `snapshot` into `dir`, creating it if needed.
pub fn write_to_disk(snapshot: &Snapshot, dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create export directory `{}`", dir.display()))?;

    let mut written = Vec::with_capacity(DATA_FILES.len());
    for (name, generator) in DATA_FILES {
        let path = dir.join(name);
        let json = generator(snapshot).with_context(|| format!("failed to serialize {name}"))?;
        std::fs::write(&path, json)
            .with_context(|| format!("failed to write `{}`", path.display()))?;
        written.push(path);
    }
    Ok(written)
}
