use std::fmt;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

// `webpack:///<relative path>` with an optional `?xxxx` cache-busting hash.
static WEBPACK_MODULE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^webpack:///([0-9a-zA-Z_/.\-]+?)(\?[0-9a-zA-Z_]{4})?$").unwrap()
});

/// Where a kept source-map entry will be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub output_path: PathBuf,
    /// Extension of the file name including the dot, empty if there is none.
    pub extension: String,
}

/// Why an entry produced no file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Not a `webpack:///` path made of plain path characters (externals, runtime helpers, ...).
    Unrecognized,
    /// Path carries a `?hash` suffix; it duplicates another entry.
    Hashed,
    /// Path climbs above the output root with `..`.
    EscapesRoot,
    /// The map has no embedded content for this source.
    MissingContent,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SkipReason::Unrecognized => "special or unrecognized path",
            SkipReason::Hashed => "hashed filename",
            SkipReason::EscapesRoot => "path escapes the output folder",
            SkipReason::MissingContent => "no embedded source content",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Target(ResolvedTarget),
    Skip(SkipReason),
}

/// Turn a module path recorded in a source map into an output location below `output_root`.
///
/// Rules:
/// 1. Only `webpack:///` paths built from `[0-9a-zA-Z_/.-]` are kept.
/// 2. A trailing `?` plus four word characters marks a hashed duplicate, which is skipped.
/// 3. The relative part is normalized: empty and `.` segments vanish, `..` pops a segment.
///    Popping past the root skips the entry so nothing is written outside `output_root`.
/// 4. The extension follows Node's `extname` rules (`.bashrc` has none).
pub fn resolve_module_path(module_path: &str, output_root: &Path) -> Resolution {
    let caps = match WEBPACK_MODULE_RE.captures(module_path) {
        Some(c) => c,
        None => return Resolution::Skip(SkipReason::Unrecognized),
    };
    if caps.get(2).is_some() {
        return Resolution::Skip(SkipReason::Hashed);
    }
    let relative = match caps.get(1) {
        Some(m) => m.as_str(),
        None => return Resolution::Skip(SkipReason::Unrecognized),
    };

    let segments = match normalize_segments(relative) {
        Some(s) if !s.is_empty() => s,
        Some(_) => return Resolution::Skip(SkipReason::Unrecognized),
        None => return Resolution::Skip(SkipReason::EscapesRoot),
    };

    let file_name = segments[segments.len() - 1];
    let mut output_path = output_root.to_path_buf();
    for seg in &segments {
        output_path.push(seg);
    }

    Resolution::Target(ResolvedTarget {
        output_path,
        extension: extname(file_name).to_string(),
    })
}

/// Lexically normalize a `/`-separated relative path. `None` if `..` leaves the root.
fn normalize_segments(relative: &str) -> Option<Vec<&str>> {
    let mut out: Vec<&str> = Vec::new();
    for seg in relative.split('/') {
        match seg {
            "" | "." => {}
            ".." => {
                out.pop()?;
            }
            other => out.push(other),
        }
    }
    Some(out)
}

/// Extension of a file name, Node style: from the last dot, unless that dot leads the name.
pub fn extname(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(0) | None => "",
        Some(idx) => &file_name[idx..],
    }
}
