//! Command implementations for the espalier CLI.
//!
//! Every command returns `CliResult<ExitCode>`. Printing happens here; only
//! the top-level `run()` exits the process.

use std::fs;
use std::path::Path;

use espalier_model::annotation::AnnotationSeverity;
use espalier_model::archive::Archive;
use espalier_model::element::CodeGraph;
use espalier_vocab::registry::Stability;
use espalier_vocab::{attrs, kinds, metadata_keys};

use crate::explore::explore;
use crate::pattern::registry::PatternRegistry;
use crate::render;

use super::{CliError, CliResult, ExitCode};

/// Load an archive, build the test model, and print it.
///
/// Exits nonzero when the model carries error annotations: the printed tree
/// then contains placeholders instead of real assembly content. `quiet`
/// suppresses the annotation listing, not the exit code.
pub fn explore_archive(path: &Path, as_json: bool, quiet: bool) -> CliResult<ExitCode> {
    let graph = load_graph(path)?;
    let registry = PatternRegistry::with_builtins();
    let model = explore(&graph, &registry);

    if as_json {
        let value = render::render_json(&graph, &model);
        let rendered = serde_json::to_string_pretty(&value)
            .map_err(|e| CliError::failure(format!("Error rendering JSON: {e}")))?;
        println!("{rendered}");
    } else if quiet {
        print!("{}", render::render_tree_text(&model));
    } else {
        print!("{}", render::render_text(&graph, &model));
    }

    let errors = model
        .annotations()
        .iter()
        .filter(|a| a.severity == AnnotationSeverity::Error)
        .count();
    if errors > 0 {
        if !quiet {
            eprintln!("{errors} error annotation(s) recorded during exploration");
        }
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Load an archive and dump the lowered code graph (debug aid).
pub fn dump_archive(path: &Path) -> CliResult<ExitCode> {
    let graph = load_graph(path)?;
    println!("{graph:#?}");
    Ok(ExitCode::SUCCESS)
}

/// List the vocabulary: test kinds, metadata keys, annotation names.
pub fn show_vocab() -> CliResult<ExitCode> {
    println!("test kinds:");
    for entry in kinds::KINDS {
        println!("  {:<12} {}", entry.canonical, entry.description);
    }
    println!();
    println!("metadata keys:");
    for entry in metadata_keys::KEYS {
        let flag = if entry.stability == Stability::Deprecated {
            " (deprecated)"
        } else {
            ""
        };
        println!("  {:<24} {}{}", entry.canonical, entry.description, flag);
    }
    println!();
    println!("annotation names:");
    for entry in attrs::ATTRS {
        if entry.aliases.is_empty() {
            println!("  {:<12} {}", entry.canonical, entry.description);
        } else {
            println!(
                "  {:<12} {} (aliases: {})",
                entry.canonical,
                entry.description,
                entry.aliases.join(", ")
            );
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Read and lower an archive file into a code graph.
fn load_graph(path: &Path) -> CliResult<CodeGraph> {
    let raw = fs::read_to_string(path)
        .map_err(|e| CliError::failure(format!("Error reading {}: {e}", path.display())))?;
    let archive: Archive = serde_json::from_str(&raw)
        .map_err(|e| CliError::failure(format!("Error parsing {}: {e}", path.display())))?;
    archive.into_graph().map_err(|e| {
        // Report's Debug output is miette's full diagnostic rendering.
        let report = miette::Report::new(e);
        CliError::failure(format!("Error loading {}: {report:?}", path.display()))
    })
}
