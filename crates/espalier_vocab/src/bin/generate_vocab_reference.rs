//! Generate Markdown reference docs from the `espalier_vocab` registries.
//!
//! This binary renders the vocabulary registries (test kinds, metadata keys,
//! annotation names) into a human-readable Markdown table document under
//! `docs/reference/`.
//!
//! ## Notes
//! - The generated file is meant to be checked into the repo and treated as a
//!   derived artifact.
//! - Do not edit the generated Markdown by hand; update the registries instead.
//!
//! ## Examples
//! Run from the workspace root:
//! ```bash
//! cargo run -p espalier_vocab --bin generate_vocab_reference
//! ```
//!
//! ## Panics
//! - If the workspace root cannot be resolved.
//! - If the output file cannot be written.

use std::fs;
use std::path::{Path, PathBuf};

use espalier_vocab::{attrs, kinds, metadata_keys};

fn main() {
    let root = workspace_root();

    let out_dir = root.join("docs/reference");
    fs::create_dir_all(&out_dir).expect("create docs/reference/");

    write_vocab_reference(&out_dir.join("vocabulary.md"));
}

/// Write `docs/reference/vocabulary.md`.
///
/// This is a single consolidated reference document generated from the
/// `espalier_vocab` registries.
fn write_vocab_reference(path: &Path) {
    let mut out = String::new();
    out.push_str("# Espalier vocabulary reference\n\n");
    out.push_str("!!! warning \"Generated file\"\n");
    out.push_str("    Do not edit this page by hand.\n");
    out.push_str("    If it looks wrong/outdated, regenerate it from source and commit the result.\n");
    out.push('\n');
    out.push_str("    Regenerate with: `cargo run -p espalier_vocab --bin generate_vocab_reference`\n\n");

    out.push_str("## Contents\n\n");
    out.push_str("- [Test kinds](#test-kinds)\n");
    out.push_str("- [Metadata keys](#metadata-keys)\n");
    out.push_str("- [Annotation names](#annotation-names)\n\n");

    render_kinds_section(&mut out);
    render_keys_section(&mut out);
    render_attrs_section(&mut out);

    while out.ends_with("\n\n") {
        out.pop();
    }
    fs::write(path, out).expect("write vocabulary.md");
}

fn render_kinds_section(out: &mut String) {
    out.push_str("## Test kinds\n\n");
    out.push_str("| Id | Canonical | Description | Stability |\n");
    out.push_str("|---|---|---|---|\n");

    for k in kinds::KINDS {
        let id = format!("{:?}", k.id);
        let canonical = format!("`{}`", k.canonical);
        let desc = k.description;
        let stability = format!("{:?}", k.stability);

        out.push_str(&format!("| {id} | {canonical} | {desc} | {stability} |\n"));
    }
    out.push('\n');
}

fn render_keys_section(out: &mut String) {
    out.push_str("## Metadata keys\n\n");
    out.push_str("| Id | Canonical | Description | Stability |\n");
    out.push_str("|---|---|---|---|\n");

    for k in metadata_keys::KEYS {
        let id = format!("{:?}", k.id);
        let canonical = format!("`{}`", k.canonical);
        let desc = k.description;
        let stability = format!("{:?}", k.stability);

        out.push_str(&format!("| {id} | {canonical} | {desc} | {stability} |\n"));
    }
    out.push('\n');
}

fn render_attrs_section(out: &mut String) {
    out.push_str("## Annotation names\n\n");
    out.push_str("| Id | Canonical | Aliases | Description | Stability |\n");
    out.push_str("|---|---|---|---|---|\n");

    for a in attrs::ATTRS {
        let id = format!("{:?}", a.id);
        let canonical = format!("`{}`", a.canonical);
        let aliases = if a.aliases.is_empty() {
            String::new()
        } else {
            a.aliases
                .iter()
                .map(|s| format!("`{}`", s))
                .collect::<Vec<_>>()
                .join(", ")
        };
        let desc = a.description;
        let stability = format!("{:?}", a.stability);

        out.push_str(&format!("| {id} | {canonical} | {aliases} | {desc} | {stability} |\n"));
    }
    out.push('\n');
}

/// Resolve the workspace root directory.
///
/// ## Returns
/// - The workspace root path (two levels above `crates/espalier_vocab`).
///
/// ## Panics
/// - If the path cannot be resolved (this indicates a broken workspace layout).
fn workspace_root() -> PathBuf {
    // crates/espalier_vocab -> crates -> workspace root
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .map(|p| p.to_path_buf())
        .expect("workspace root (two levels above crates/espalier_vocab)")
}
