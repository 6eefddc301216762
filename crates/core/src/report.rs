use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::decode::DecodeNote;
use crate::path_reconstruct::SkipReason;

/// Something worth telling the user while unpacking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    NoInput { pattern: String },
    OutputRoot(PathBuf),
    MapOpened(PathBuf),
    FileWritten(PathBuf),
    Skipped { module_path: String, reason: SkipReason },
    Fallback { path: PathBuf, note: DecodeNote },
    EntryFailed { module_path: String, error: String },
    MapFailed { map_file: PathBuf, error: String },
}

/// Sink for unpacking diagnostics.
pub trait Reporter: Send + Sync {
    fn report(&self, event: Event);
}

/// Forwards events to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report(&self, event: Event) {
        match event {
            Event::NoInput { pattern } => log::warn!("There is no {pattern} in current directory"),
            Event::OutputRoot(p) => log::info!("output src to {}", p.display()),
            Event::MapOpened(p) => log::info!("extract sourcemap: {}", p.display()),
            Event::FileWritten(p) => log::info!("output to file: {}", p.display()),
            Event::Skipped { module_path, reason } => log::info!("ignore file: {module_path} ({reason})"),
            Event::Fallback { path, note } => log::warn!("{note}: {}", path.display()),
            Event::EntryFailed { module_path, error } => log::error!("failed to unpack {module_path}: {error}"),
            Event::MapFailed { map_file, error } => log::error!("failed to unpack {}: {error}", map_file.display()),
        }
    }
}

/// Keeps every event in order – useful for testing.
#[derive(Debug, Default, Clone)]
pub struct MemoryReporter {
    events: Arc<Mutex<Vec<Event>>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        match self.events.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn skipped(&self) -> Vec<(String, SkipReason)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Skipped { module_path, reason } => Some((module_path, reason)),
                _ => None,
            })
            .collect()
    }

    pub fn written(&self) -> Vec<PathBuf> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::FileWritten(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    pub fn contains_map_failure(&self, map_file: &Path) -> bool {
        self.events()
            .iter()
            .any(|e| matches!(e, Event::MapFailed { map_file: f, .. } if f == map_file))
    }
}

impl Reporter for MemoryReporter {
    fn report(&self, event: Event) {
        match self.events.lock() {
            Ok(mut guard) => guard.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}
