use std::path::{Path, PathBuf};

use sourcemap::{DecodedMap, SourceMap};
use thiserror::Error;
use tokio::fs;

#[derive(Error, Debug)]
pub enum SourcemapError {
    #[error("invalid JSON or sourcemap: {0}")]
    Parse(String),
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One `sources` entry of a map together with its `sourcesContent` slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapEntry {
    pub module_path: String,
    pub content: Option<String>,
}

/// Parse a sourcemap JSON string and return the `sourcemap::SourceMap` object.
/// Index maps are flattened; Hermes maps are cloned out of their wrapper.
pub fn parse_sourcemap(json: &str) -> Result<SourceMap, SourcemapError> {
    let decoded = sourcemap::decode_slice(json.as_bytes()).map_err(|e| SourcemapError::Parse(e.to_string()))?;
    match decoded {
        DecodedMap::Regular(sm) => Ok(sm),
        DecodedMap::Index(smi) => smi.flatten().map_err(|e| SourcemapError::Parse(e.to_string())),
        DecodedMap::Hermes(smh) => Ok(SourceMap::clone(&smh)),
    }
}

/// Convenience helper: return the list of original source paths contained in the map.
pub fn sources_list(sm: &SourceMap) -> Vec<String> {
    (0..sm.get_source_count())
        .filter_map(|i| sm.get_source(i).map(|s| s.to_string()))
        .collect()
}

/// Pair every source path with its embedded content, preserving map order.
pub fn map_entries(sm: &SourceMap) -> Vec<MapEntry> {
    (0..sm.get_source_count())
        .filter_map(|i| {
            let module_path = sm.get_source(i)?.to_string();
            let content = sm.get_source_contents(i).map(|c| c.to_string());
            Some(MapEntry { module_path, content })
        })
        .collect()
}

/// Read and parse a map file from disk.
pub async fn load_map_file(path: &Path) -> Result<Vec<MapEntry>, SourcemapError> {
    let text = fs::read_to_string(path).await.map_err(|source| SourcemapError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let sm = parse_sourcemap(&text)?;
    Ok(map_entries(&sm))
}
