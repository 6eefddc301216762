use unpacker_core::extract_module_export;

#[test]
fn raw_loader_string() {
    let src = "module.exports = \"precision mediump float;\\nvoid main() {\\n\\tgl_FragColor = vec4(1.0);\\n}\\n\";";
    let value = extract_module_export(src).expect("literal export");
    assert_eq!(value, "precision mediump float;\nvoid main() {\n\tgl_FragColor = vec4(1.0);\n}\n");
}

#[test]
fn file_loader_public_path() {
    let src = r#"module.exports = __webpack_public_path__ + "static/img/logo.8f2a.png";"#;
    assert_eq!(extract_module_export(src).as_deref(), Some("static/img/logo.8f2a.png"));

    let src = r#"module.exports = __webpack_require__.p + "media/a.gif";"#;
    assert_eq!(extract_module_export(src).as_deref(), Some("media/a.gif"));
}

#[test]
fn esm_default_export() {
    let src = "// loader output\nexport default \"data:image/gif;base64,R0lGODlhAQABAAAAACw=\"\n";
    assert_eq!(extract_module_export(src).as_deref(), Some("data:image/gif;base64,R0lGODlhAQABAAAAACw="));
}

#[test]
fn quotes_and_escapes() {
    let src = r#"module.exports = 'it\'s' + "A\x42" + `tpl` + "\u{1F600}😀";"#;
    assert_eq!(extract_module_export(src).as_deref(), Some("it'sABtpl\u{1F600}\u{1F600}"));
}

#[test]
fn stops_at_line_break() {
    let src = "module.exports = \"a\"\nif (module.hot) { module.hot.accept(); }";
    assert_eq!(extract_module_export(src).as_deref(), Some("a"));

    let multi = "module.exports = \"a\" +\n  \"b\";";
    assert_eq!(extract_module_export(multi).as_deref(), Some("ab"));
}

#[test]
fn non_literal_exports_are_rejected() {
    assert!(extract_module_export(r#"module.exports = require("./logo.png");"#).is_none());
    assert!(extract_module_export("module.exports = `a${b}c`;").is_none());
    assert!(extract_module_export(r#"module.exports = "a".toUpperCase();"#).is_none());
    assert!(extract_module_export(r#"module.exports = "unterminated"#).is_none());
    assert!(extract_module_export("console.log('no export');").is_none());
    assert!(extract_module_export(r#"foo.module.exports = "x";"#).is_none());
}

#[test]
fn minified_default_export() {
    assert_eq!(extract_module_export(r#"export default"x""#).as_deref(), Some("x"));
    assert!(extract_module_export(r#"export defaultValue = "x""#).is_none());
}

#[test]
fn stops_at_closing_bracket() {
    let src = r#"function(module){module.exports="a"+"b"}"#;
    assert_eq!(extract_module_export(src).as_deref(), Some("ab"));
    let src = r#"define((module) => module.exports = "c")"#;
    assert_eq!(extract_module_export(src).as_deref(), Some("c"));
}
