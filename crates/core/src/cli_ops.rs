use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use futures::future::join_all;
use serde::Serialize;
use tokio::task;

use crate::config::UnpackConfig;
use crate::file_io::{find_map_files, FileAnalysisError};
use crate::report::{Event, Reporter};
use crate::storage::AssetStore;
use crate::unpack::{unpack_map, MapSummary};

#[derive(thiserror::Error, Debug)]
pub enum CLIError {
    #[error(transparent)]
    Files(#[from] FileAnalysisError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedMap {
    pub map_file: PathBuf,
    pub error: String,
}

/// Outcome of a whole run, one summary per map that could be read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub maps: Vec<MapSummary>,
    pub failed_maps: Vec<FailedMap>,
}

impl RunReport {
    pub fn has_failures(&self) -> bool {
        !self.failed_maps.is_empty() || self.maps.iter().any(|m| !m.failed.is_empty())
    }

    pub fn written_count(&self) -> usize {
        self.maps.iter().map(|m| m.written.len()).sum()
    }
}

/// Handle the unpack command: expand the input glob and unpack every matched map.
///
/// No match is not an error; it is reported and an empty report is returned.
pub async fn handle_unpack<S, R>(config: &UnpackConfig, store: Arc<S>, reporter: Arc<R>) -> Result<RunReport, CLIError>
where
    S: AssetStore + 'static,
    R: Reporter + 'static,
{
    // glob walks the filesystem synchronously
    let pattern = config.input.clone();
    let files = task::spawn_blocking(move || find_map_files(&pattern))
        .await
        .map_err(|e| CLIError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))??;
    if files.is_empty() {
        reporter.report(Event::NoInput { pattern: config.input.clone() });
        return Ok(RunReport::default());
    }

    let output_root = absolute_root(&config.output)?;
    reporter.report(Event::OutputRoot(output_root.clone()));
    Ok(unpack_all(files, output_root, config, store, reporter).await)
}

/// Unpack each map in its own task and wait for every task before returning,
/// so all writes are complete once this resolves.
pub async fn unpack_all<S, R>(
    files: Vec<PathBuf>,
    output_root: PathBuf,
    config: &UnpackConfig,
    store: Arc<S>,
    reporter: Arc<R>,
) -> RunReport
where
    S: AssetStore + 'static,
    R: Reporter + 'static,
{
    let config = Arc::new(config.clone());
    let output_root = Arc::new(output_root);

    let handles = files.iter().cloned().map(|map_file| {
        let store = Arc::clone(&store);
        let reporter = Arc::clone(&reporter);
        let config = Arc::clone(&config);
        let output_root = Arc::clone(&output_root);
        task::spawn(async move {
            unpack_map(&map_file, &output_root, &config, store.as_ref(), reporter.as_ref()).await
        })
    });

    // Wait for all workers to finish
    let results = join_all(handles).await;
    let mut report = RunReport::default();
    for (map_file, result) in files.into_iter().zip(results) {
        let error = match result {
            Ok(Ok(summary)) => {
                report.maps.push(summary);
                continue;
            }
            Ok(Err(e)) => e.to_string(),
            Err(join_err) => format!("worker task failed: {join_err}"),
        };
        reporter.report(Event::MapFailed { map_file: map_file.clone(), error: error.clone() });
        report.failed_maps.push(FailedMap { map_file, error });
    }
    report
}

/// Anchor a relative output folder at the working directory, dropping `.` segments.
fn absolute_root(output: &Path) -> std::io::Result<PathBuf> {
    let base = if output.is_absolute() { PathBuf::new() } else { std::env::current_dir()? };
    Ok(output
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .fold(base, |mut acc, c| {
            acc.push(c);
            acc
        }))
}
