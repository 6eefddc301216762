use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FileAnalysisError {
    #[error("invalid glob pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Expand the input glob into the list of regular files it matches, sorted by path.
/// Directories matched by the pattern are ignored.
pub fn find_map_files(pattern: &str) -> Result<Vec<PathBuf>, FileAnalysisError> {
    let paths = glob::glob(pattern).map_err(|source| FileAnalysisError::Pattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in paths {
        match entry {
            Ok(p) if p.is_file() => files.push(p),
            Ok(_) => {}
            Err(e) => {
                let path = e.path().to_path_buf();
                let source = std::io::Error::from(e);
                if source.kind() == std::io::ErrorKind::PermissionDenied {
                    return Err(FileAnalysisError::PermissionDenied(path));
                }
                return Err(FileAnalysisError::Io { path, source });
            }
        }
    }
    files.sort();
    Ok(files)
}
