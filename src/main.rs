//! fieldnotes - content indexer for a notes and portfolio site.

use anyhow::{Result, bail};
use clap::Parser;
use colored::Colorize;
use fieldnotes::{
    ContentEntry, ContentIndex, IndexHandle, SiteConfig, Snapshot,
    cli::{Cli, Commands, ListFilter},
    export,
    index::{TaxonomySummary, paginate},
    log, pipeline,
    text::format_reading_time,
    watch,
};
use std::sync::Arc;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = SiteConfig::load(&cli)?;
    let handle = IndexHandle::new();

    match &cli.command {
        Commands::Build { no_export, .. } => {
            let snapshot = build_index(&config, &handle, !no_export)?;
            if snapshot.report.has_duplicates() {
                bail!("{} duplicate slug(s) found", snapshot.report.duplicates.len());
            }
            Ok(())
        }
        Commands::Watch { .. } => {
            build_index(&config, &handle, config.watch.export)?;
            watch::watch_for_changes_blocking(&config, &handle)
        }
        Commands::Search { query, limit } => {
            let snapshot = query_index(&config, &handle)?;
            search(&snapshot.notes, query, &config, *limit);
            Ok(())
        }
        Commands::Related { slug, limit } => {
            let snapshot = query_index(&config, &handle)?;
            let Some(entry) = snapshot.notes.get(slug) else {
                bail!("no note with slug `{slug}`");
            };
            let limit = limit.unwrap_or(config.related.limit);
            let related = snapshot.notes.related(entry, limit);
            if related.is_empty() {
                log!("related"; "nothing related to {slug}");
            }
            related.iter().for_each(|e| print_entry(e));
            Ok(())
        }
        Commands::List { filter, page, portfolio } => {
            let snapshot = query_index(&config, &handle)?;
            let index = if *portfolio { &snapshot.portfolio } else { &snapshot.notes };
            list(index, filter, *page, &config)
        }
        Commands::Tags => {
            let snapshot = query_index(&config, &handle)?;
            print_summaries(&snapshot.notes.tag_summaries(), "#");
            Ok(())
        }
        Commands::Categories => {
            let snapshot = query_index(&config, &handle)?;
            print_summaries(&snapshot.notes.categories(), "");
            Ok(())
        }
    }
}

/// Rebuild, log the full report and optionally export data files.
fn build_index(config: &SiteConfig, handle: &IndexHandle, export: bool) -> Result<Arc<Snapshot>> {
    let snapshot = pipeline::rebuild_site(config, handle)?;
    snapshot.report.log();

    if export {
        let written = export::write_to_disk(&snapshot, &config.content.output)?;
        log!("export"; "{} files to {}", written.len(), config.content.output.display());
    }
    Ok(snapshot)
}

/// Rebuild for a read-only query, keeping the log short.
fn query_index(config: &SiteConfig, handle: &IndexHandle) -> Result<Arc<Snapshot>> {
    let snapshot = pipeline::rebuild_site(config, handle)?;
    if !snapshot.report.is_clean() {
        log!("warn"; "index has problems, run `fieldnotes build` for details");
    }
    Ok(snapshot)
}

// ============================================================================
// Output
// ============================================================================

fn search(index: &ContentIndex, query: &str, config: &SiteConfig, limit: Option<usize>) {
    let results = index.search(query, &config.search.options(limit));
    if !results.attempted {
        log!("search"; "empty query");
        return;
    }
    if results.is_empty() {
        if config.search.policy().is_too_short(query) {
            log!("search"; "query too short (at least {} characters)", config.search.min_match_len);
        } else {
            log!("search"; "no matches for `{query}`");
        }
        return;
    }
    for hit in &results.hits {
        print!("{} ", format!("{:>3.0}%", hit.relevance * 100.0).dimmed());
        print_entry(&hit.entry);
    }
}

fn list(index: &ContentIndex, filter: &ListFilter, page: usize, config: &SiteConfig) -> Result<()> {
    let entries = if let Some(label) = &filter.category {
        index.by_category(label)
    } else if let Some(slug) = &filter.category_slug {
        index.by_category_slug(slug)
    } else if let Some(label) = &filter.tag {
        index.by_tag(label)
    } else if let Some(slug) = &filter.tag_slug {
        index.by_tag_slug(slug)
    } else {
        Some(index.entries())
    };
    let entries = entries.unwrap_or_default();

    let per_page = config.listing.page_size(index.kind());
    let page = paginate(entries, page, per_page, config.listing.window);
    if page.is_out_of_range() {
        bail!("page {} not found ({} pages)", page.current, page.total_pages);
    }
    if page.items.is_empty() {
        log!("index"; "no {} found", index.kind().name());
        return Ok(());
    }

    page.items.iter().for_each(|e| print_entry(e));

    let pages: Vec<String> = page
        .visible_pages
        .iter()
        .map(|&n| if n == page.current { format!("[{n}]") } else { n.to_string() })
        .collect();
    let prev = if page.has_prev { "<" } else { " " };
    let next = if page.has_next { ">" } else { " " };
    println!(
        "\n{prev} {} {next}  ({} of {} {})",
        pages.join(" "),
        page.items.len(),
        page.total_items,
        index.kind().name()
    );
    Ok(())
}

fn print_entry(entry: &ContentEntry) {
    let mut line = format!("{} {}", entry.display_title().bold(), entry.slug.dimmed());
    if let Some(date) = &entry.date {
        line = format!("{} {line}", date.cyan());
    }
    if let Some(minutes) = entry.reading_time_minutes {
        line.push_str(&format!(" · {}", format_reading_time(minutes)));
    }
    if let Some(category) = entry.category() {
        line.push_str(&format!(" [{category}]"));
    }
    let tags: Vec<String> = entry.tags().map(|t| format!("#{t}")).collect();
    if !tags.is_empty() {
        line.push_str(&format!(" {}", tags.join(" ").yellow()));
    }
    println!("{line}");
}

fn print_summaries(summaries: &[TaxonomySummary], mark: &str) {
    if summaries.is_empty() {
        log!("index"; "none");
        return;
    }
    for s in summaries {
        println!("{:>4}  {mark}{} {}", s.count, s.label.bold(), s.slug.dimmed());
    }
}
