use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::AssetKind;
use crate::data_uri::decode_data_uri;
use crate::webpack::extract_module_export;

/// A fallback the decoder had to take. The file is still written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeNote {
    /// Expected a data URI for a binary asset; the exported string was written as text.
    NotBinary { reason: String },
    /// The wrapper has no literal export; the wrapper source itself was written.
    NoLiteralExport,
}

impl fmt::Display for DecodeNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeNote::NotBinary { reason } => write!(f, "it's not a binary file ({reason})"),
            DecodeNote::NoLiteralExport => f.write_str("no literal module export found, kept module source"),
        }
    }
}

/// Final bytes for one entry and the path they go to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedContent {
    pub bytes: Vec<u8>,
    pub final_path: PathBuf,
    pub note: Option<DecodeNote>,
}

impl DecodedContent {
    fn unchanged(bytes: Vec<u8>, path: &Path) -> Self {
        Self { bytes, final_path: path.to_path_buf(), note: None }
    }

    fn as_module(bytes: Vec<u8>, path: &Path, note: DecodeNote) -> Self {
        Self { bytes, final_path: with_js_suffix(path), note: Some(note) }
    }
}

/// Produce the content to write for a raw `sourcesContent` string.
pub fn decode_content(raw: &str, kind: AssetKind, output_path: &Path) -> DecodedContent {
    match kind {
        AssetKind::PlainText => DecodedContent::unchanged(raw.as_bytes().to_vec(), output_path),
        AssetKind::WrappedText => match extract_module_export(raw) {
            Some(text) => DecodedContent::unchanged(text.into_bytes(), output_path),
            None => DecodedContent::as_module(raw.as_bytes().to_vec(), output_path, DecodeNote::NoLiteralExport),
        },
        AssetKind::WrappedBinary => {
            let exported = match extract_module_export(raw) {
                Some(v) => v,
                None => {
                    return DecodedContent::as_module(
                        raw.as_bytes().to_vec(),
                        output_path,
                        DecodeNote::NoLiteralExport,
                    )
                }
            };
            match decode_data_uri(&exported) {
                Ok(uri) => DecodedContent::unchanged(uri.bytes, output_path),
                Err(e) => DecodedContent::as_module(
                    exported.into_bytes(),
                    output_path,
                    DecodeNote::NotBinary { reason: e.to_string() },
                ),
            }
        }
    }
}

/// `icon.png` -> `icon.png.js`
fn with_js_suffix(path: &Path) -> PathBuf {
    let mut s = path.as_os_str().to_os_string();
    s.push(".js");
    PathBuf::from(s)
}
