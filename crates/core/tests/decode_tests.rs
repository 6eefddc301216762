use std::path::Path;
use unpacker_core::{decode_content, AssetKind, DecodeNote, UnpackConfig};

#[test]
fn plain_text_is_verbatim() {
    let raw = "export const answer = 42;\n// module.exports = \"ignored\"\n";
    let out = decode_content(raw, AssetKind::PlainText, Path::new("/out/src/answer.txt"));
    assert_eq!(out.bytes, raw.as_bytes());
    assert_eq!(out.final_path, Path::new("/out/src/answer.txt"));
    assert_eq!(out.note, None);
}

#[test]
fn wrapped_text_uses_export() {
    let raw = "module.exports = \"void main() {}\\n\";";
    let out = decode_content(raw, AssetKind::WrappedText, Path::new("/out/shader.glsl"));
    assert_eq!(out.bytes, b"void main() {}\n");
    assert_eq!(out.final_path, Path::new("/out/shader.glsl"));
}

#[test]
fn wrapped_binary_decodes_data_uri() {
    let raw = "module.exports = \"data:image/png;base64,iVBORw0KGgo=\"";
    let out = decode_content(raw, AssetKind::WrappedBinary, Path::new("/out/src/icon.png"));
    assert_eq!(out.bytes, [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    assert_eq!(out.final_path, Path::new("/out/src/icon.png"));
    assert_eq!(out.note, None);
}

#[test]
fn wrapped_binary_falls_back_to_text() {
    let raw = "module.exports = \"hello\";";
    let out = decode_content(raw, AssetKind::WrappedBinary, Path::new("/out/src/icon.png"));
    assert_eq!(out.bytes, b"hello");
    assert_eq!(out.final_path, Path::new("/out/src/icon.png.js"));
    assert!(matches!(out.note, Some(DecodeNote::NotBinary { .. })));
}

#[test]
fn missing_literal_keeps_module_source() {
    let raw = "module.exports = require(\"./real.png\");";
    let out = decode_content(raw, AssetKind::WrappedBinary, Path::new("/out/a.png"));
    assert_eq!(out.bytes, raw.as_bytes());
    assert_eq!(out.final_path, Path::new("/out/a.png.js"));
    assert_eq!(out.note, Some(DecodeNote::NoLiteralExport));

    let out = decode_content(raw, AssetKind::WrappedText, Path::new("/out/a.glsl"));
    assert_eq!(out.final_path, Path::new("/out/a.glsl.js"));
}

#[test]
fn default_extension_classes() {
    let config = UnpackConfig::default();
    assert_eq!(config.asset_kind(".glsl"), AssetKind::WrappedText);
    for ext in [".jpg", ".gif", ".png", ".obj"] {
        assert_eq!(config.asset_kind(ext), AssetKind::WrappedBinary);
    }
    assert_eq!(config.asset_kind(".js"), AssetKind::PlainText);
    assert_eq!(config.asset_kind(".PNG"), AssetKind::PlainText);
    assert_eq!(config.asset_kind(""), AssetKind::PlainText);
}

#[test]
fn extra_extensions_are_normalized() {
    let config = UnpackConfig::default()
        .with_text_exts(["frag", ".vert"])
        .with_binary_exts(["svg", ".png"]);
    assert_eq!(config.asset_kind(".frag"), AssetKind::WrappedText);
    assert_eq!(config.asset_kind(".vert"), AssetKind::WrappedText);
    assert_eq!(config.asset_kind(".svg"), AssetKind::WrappedBinary);
    assert_eq!(config.binary_module_exts.iter().filter(|e| *e == ".png").count(), 1);
}
