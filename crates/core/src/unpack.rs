use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::UnpackConfig;
use crate::decode::decode_content;
use crate::path_reconstruct::{resolve_module_path, Resolution, SkipReason};
use crate::report::{Event, Reporter};
use crate::sm_parse::{load_map_file, MapEntry, SourcemapError};
use crate::storage::{AssetStore, StoreError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedEntry {
    pub module_path: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedEntry {
    pub module_path: String,
    pub error: String,
}

/// What happened to every entry of one map file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MapSummary {
    pub map_file: PathBuf,
    pub written: Vec<PathBuf>,
    pub skipped: Vec<SkippedEntry>,
    pub failed: Vec<FailedEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    Written(PathBuf),
    Skipped(SkipReason),
}

/// Resolve, decode and write a single entry.
///
/// Skips are reported here; a write error is returned to the caller untouched.
pub async fn unpack_entry<S, R>(
    entry: &MapEntry,
    output_root: &Path,
    config: &UnpackConfig,
    store: &S,
    reporter: &R,
) -> Result<EntryOutcome, StoreError>
where
    S: AssetStore + ?Sized,
    R: Reporter + ?Sized,
{
    let skip = |reason: SkipReason| {
        reporter.report(Event::Skipped { module_path: entry.module_path.clone(), reason });
        Ok(EntryOutcome::Skipped(reason))
    };

    let target = match resolve_module_path(&entry.module_path, output_root) {
        Resolution::Target(t) => t,
        Resolution::Skip(reason) => return skip(reason),
    };
    let raw = match entry.content.as_deref() {
        Some(c) => c,
        None => return skip(SkipReason::MissingContent),
    };

    let decoded = decode_content(raw, config.asset_kind(&target.extension), &target.output_path);
    if let Some(note) = decoded.note.clone() {
        reporter.report(Event::Fallback { path: target.output_path.clone(), note });
    }

    if let Some(parent) = decoded.final_path.parent() {
        store.ensure_dir(parent).await?;
    }
    store.write_file(&decoded.final_path, &decoded.bytes).await?;
    reporter.report(Event::FileWritten(decoded.final_path.clone()));
    Ok(EntryOutcome::Written(decoded.final_path))
}

/// Unpack all entries of one map in order. A failing entry never stops its siblings.
pub async fn unpack_entries<S, R>(
    entries: &[MapEntry],
    output_root: &Path,
    config: &UnpackConfig,
    store: &S,
    reporter: &R,
) -> MapSummary
where
    S: AssetStore + ?Sized,
    R: Reporter + ?Sized,
{
    let mut summary = MapSummary::default();
    for entry in entries {
        match unpack_entry(entry, output_root, config, store, reporter).await {
            Ok(EntryOutcome::Written(path)) => summary.written.push(path),
            Ok(EntryOutcome::Skipped(reason)) => summary.skipped.push(SkippedEntry {
                module_path: entry.module_path.clone(),
                reason,
            }),
            Err(e) => {
                let error = e.to_string();
                reporter.report(Event::EntryFailed { module_path: entry.module_path.clone(), error: error.clone() });
                summary.failed.push(FailedEntry { module_path: entry.module_path.clone(), error });
            }
        }
    }
    summary
}

/// Load one map file and unpack every source it embeds.
pub async fn unpack_map<S, R>(
    map_file: &Path,
    output_root: &Path,
    config: &UnpackConfig,
    store: &S,
    reporter: &R,
) -> Result<MapSummary, SourcemapError>
where
    S: AssetStore + ?Sized,
    R: Reporter + ?Sized,
{
    reporter.report(Event::MapOpened(map_file.to_path_buf()));
    let entries = load_map_file(map_file).await?;
    let mut summary = unpack_entries(&entries, output_root, config, store, reporter).await;
    summary.map_file = map_file.to_path_buf();
    Ok(summary)
}
