use std::fs;

/// Keys `Config` reads from the bundled defaults; user files may omit any of them.
const REQUIRED_KEYS: &[&str] = &["content_dir", "public_dir", "static_dir", "template", "on_error"];

fn main() {
    let path = "src/default_config.toml";
    println!("cargo:rerun-if-changed={path}");

    let text = fs::read_to_string(path).unwrap_or_else(|e| panic!("cannot read {path}: {e}"));
    let table: toml::Table = text
        .parse()
        .unwrap_or_else(|e| panic!("{path} is not valid TOML: {e}"));

    let missing: Vec<_> = REQUIRED_KEYS
        .iter()
        .filter(|key| !table.contains_key(**key))
        .collect();
    if !missing.is_empty() {
        panic!("{path} is missing keys: {missing:?}");
    }

    match table.get("on_error").and_then(|v| v.as_str()) {
        Some("abort" | "skip") => {}
        other => panic!("{path}: on_error must be \"abort\" or \"skip\", got {other:?}"),
    }
}
