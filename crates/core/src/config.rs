use std::path::PathBuf;

/// How a recovered file's raw content must be interpreted before writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    /// Content is the file itself.
    PlainText,
    /// Content is a loader module whose exported string is the file.
    WrappedText,
    /// Content is a loader module exporting a data URI with the file's bytes.
    WrappedBinary,
}

/// Settings for one unpacking run.
#[derive(Debug, Clone)]
pub struct UnpackConfig {
    /// Glob pattern selecting the map files.
    pub input: String,
    /// Root directory the recovered tree is written under.
    pub output: PathBuf,
    pub text_module_exts: Vec<String>,
    pub binary_module_exts: Vec<String>,
}

impl Default for UnpackConfig {
    fn default() -> Self {
        Self {
            input: "*.map".to_string(),
            output: PathBuf::from("."),
            text_module_exts: vec![".glsl".to_string()],
            binary_module_exts: [".jpg", ".gif", ".png", ".obj"]
                .iter()
                .map(|e| e.to_string())
                .collect(),
        }
    }
}

impl UnpackConfig {
    /// Register additional wrapped-text extensions. A missing leading dot is added.
    pub fn with_text_exts<I, S>(mut self, exts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        extend_exts(&mut self.text_module_exts, exts);
        self
    }

    /// Register additional wrapped-binary extensions. A missing leading dot is added.
    pub fn with_binary_exts<I, S>(mut self, exts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        extend_exts(&mut self.binary_module_exts, exts);
        self
    }

    /// Classify an extension (as produced by the path resolver, e.g. `".png"`).
    /// Matching is case sensitive.
    pub fn asset_kind(&self, extension: &str) -> AssetKind {
        if extension.is_empty() {
            return AssetKind::PlainText;
        }
        if self.text_module_exts.iter().any(|e| e == extension) {
            AssetKind::WrappedText
        } else if self.binary_module_exts.iter().any(|e| e == extension) {
            AssetKind::WrappedBinary
        } else {
            AssetKind::PlainText
        }
    }
}

fn extend_exts<I, S>(target: &mut Vec<String>, exts: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for ext in exts {
        let ext = ext.as_ref().trim();
        if ext.is_empty() {
            continue;
        }
        let normalized = if ext.starts_with('.') {
            ext.to_string()
        } else {
            format!(".{ext}")
        };
        if !target.contains(&normalized) {
            target.push(normalized);
        }
    }
}
