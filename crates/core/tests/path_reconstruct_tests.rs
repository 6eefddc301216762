use std::path::Path;
use unpacker_core::{extname, resolve_module_path, Resolution, ResolvedTarget, SkipReason};

fn target(module_path: &str) -> ResolvedTarget {
    match resolve_module_path(module_path, Path::new("/out")) {
        Resolution::Target(t) => t,
        Resolution::Skip(reason) => panic!("{module_path} skipped: {reason}"),
    }
}

fn skip_reason(module_path: &str) -> SkipReason {
    match resolve_module_path(module_path, Path::new("/out")) {
        Resolution::Skip(reason) => reason,
        Resolution::Target(t) => panic!("{module_path} resolved to {}", t.output_path.display()),
    }
}

#[test]
fn webpack_path_maps_under_output_root() {
    let t = target("webpack:///src/app.js");
    assert_eq!(t.output_path, Path::new("/out/src/app.js"));
    assert_eq!(t.extension, ".js");

    let nested = target("webpack:///./src/components/Button.vue");
    assert_eq!(nested.output_path, Path::new("/out/src/components/Button.vue"));
    assert_eq!(nested.extension, ".vue");
}

#[test]
fn hashed_paths_are_skipped() {
    assert_eq!(skip_reason("webpack:///external?a1b2"), SkipReason::Hashed);
    assert_eq!(skip_reason("webpack:///src/style.css?3f_9"), SkipReason::Hashed);
}

#[test]
fn special_paths_are_skipped() {
    assert_eq!(skip_reason("webpack:///~other"), SkipReason::Unrecognized);
    assert_eq!(skip_reason("webpack:///(webpack)/buildin/global.js"), SkipReason::Unrecognized);
    assert_eq!(skip_reason("webpack://namespace/./baz.js"), SkipReason::Unrecognized);
    assert_eq!(skip_reason("webpack:///webpack/bootstrap 5d0c2f1"), SkipReason::Unrecognized);
    assert_eq!(skip_reason("src/app.js"), SkipReason::Unrecognized);
    assert_eq!(skip_reason("prefix webpack:///src/app.js"), SkipReason::Unrecognized);
    // hash must be exactly four characters
    assert_eq!(skip_reason("webpack:///src/app.js?abc"), SkipReason::Unrecognized);
    assert_eq!(skip_reason("webpack:///src/app.js?abcde"), SkipReason::Unrecognized);
    assert_eq!(skip_reason("webpack:///./"), SkipReason::Unrecognized);
}

#[test]
fn parent_segments_stay_inside_root() {
    assert_eq!(target("webpack:///a/../b.txt").output_path, Path::new("/out/b.txt"));
    assert_eq!(skip_reason("webpack:///../../etc/passwd"), SkipReason::EscapesRoot);
    assert_eq!(skip_reason("webpack:///src/../../secret.js"), SkipReason::EscapesRoot);
}

#[test]
fn resolution_is_deterministic() {
    let first = resolve_module_path("webpack:///lib/util.js", Path::new("dist"));
    let second = resolve_module_path("webpack:///lib/util.js", Path::new("dist"));
    assert_eq!(first, second);
    assert_eq!(
        first,
        Resolution::Target(ResolvedTarget {
            output_path: Path::new("dist/lib/util.js").to_path_buf(),
            extension: ".js".into(),
        })
    );
}

#[test]
fn node_style_extname() {
    assert_eq!(extname("icon.png"), ".png");
    assert_eq!(extname("archive.tar.gz"), ".gz");
    assert_eq!(extname(".bashrc"), "");
    assert_eq!(extname("Makefile"), "");
    assert_eq!(target("webpack:///.eslintrc").extension, "");
}
