//! CLI logic for the Caliper selection tool.
//!
//! Loads a document description from TOML, resolves a selection through
//! the engine, and prints a report of the resolved objects together with
//! any diagnostics the resolution produced.

pub mod error_adapter;

mod args;
mod document_spec;
mod error;

pub use args::Args;
pub use error::CliError;

use std::fs;

use log::info;

use caliper::{ModifierOptions, SelectionEntry, SelectionResolver, diagnostics::Diagnostic};
use caliper_core::{document::Document, identifier::Id, placement::Placement};

use document_spec::DocumentSpec;
use error_adapter::DiagnosticAdapter;

/// Run the Caliper CLI application.
///
/// Loads the document named by `args`, resolves the requested selection
/// in whole-object or sub-element mode, and prints the result to stdout.
/// Diagnostics are rendered to stderr.
///
/// # Errors
///
/// Returns [`CliError`] for:
/// - File I/O errors
/// - Document description errors
/// - Unknown selection names
/// - A traversal exceeding the engine's depth bound
pub fn run(args: &Args) -> Result<(), CliError> {
    info!(input_path = args.input; "Loading document description");

    let source = fs::read_to_string(&args.input)?;
    let doc = DocumentSpec::parse(&source)?.into_document()?;
    info!(objects = doc.len(); "Document loaded");

    let entries = parse_selection(&doc, &args.select)?;
    let resolver = SelectionResolver::new(&doc);

    if args.sub_elements {
        let resolution = resolver.process_sub_selection(&entries, args.copy);
        println!("Resolved {} sub-element target(s):", resolution.targets().len());
        for target in resolution.targets() {
            let element = if target.vertex_index() >= 0 {
                format!("vertex {}", target.vertex_index())
            } else {
                format!("edge {}", target.edge_index())
            };
            println!(
                "  {:<16} {:<10} at {}",
                target.object().to_string(),
                element,
                format_placement(&target.placement())
            );
        }
        report_diagnostics(resolution.diagnostics());
    } else {
        let options = ModifierOptions {
            copying: args.copy,
            scaling: args.scale,
            include_movable_children: args.movable_children,
        };
        let resolution = resolver.process_selection(&entries, options)?;
        println!("Resolved {} object(s):", resolution.len());
        for (object, placement) in resolution.pairs() {
            println!(
                "  {:<16} at {}",
                object.to_string(),
                format_placement(&placement)
            );
        }
        if !resolution.provenance().is_empty() {
            println!("Provenance:");
            for record in resolution.provenance() {
                println!("  {} \"{}\"", record.origin(), record.sub_element());
            }
        }
        report_diagnostics(resolution.diagnostics());
    }

    info!("Selection resolved successfully");
    Ok(())
}

/// Parses `--select` arguments (`NAME` or `NAME:SUB[,SUB...]`) into
/// selection entries, resolving names and labels against the document.
fn parse_selection(doc: &Document, selects: &[String]) -> Result<Vec<SelectionEntry>, CliError> {
    if selects.is_empty() {
        return Err(CliError::EmptySelection);
    }

    let mut entries = Vec::new();
    for select in selects {
        let (name, subs) = match select.split_once(':') {
            Some((name, subs)) => (name, Some(subs)),
            None => (select.as_str(), None),
        };
        let object = find_object(doc, name)?;
        let mut entry = SelectionEntry::new(object);
        if let Some(subs) = subs {
            for sub in subs.split(',').filter(|sub| !sub.is_empty()) {
                entry = entry.with_sub_element(sub);
            }
        }
        entries.push(entry);
    }
    Ok(entries)
}

/// Finds an object by name, falling back to a label search.
fn find_object(doc: &Document, name: &str) -> Result<Id, CliError> {
    let id = Id::new(name);
    if doc.contains(id) {
        return Ok(id);
    }
    doc.find_by_label(name)
        .map(|obj| obj.name())
        .ok_or_else(|| CliError::UnknownObject(name.to_string()))
}

fn format_placement(placement: &Placement) -> String {
    let translation = placement.translation();
    let rotation = if placement.rotation().is_identity() {
        ""
    } else {
        ", rotated"
    };
    format!(
        "({:.3}, {:.3}, {:.3}){rotation}",
        translation.x(),
        translation.y(),
        translation.z()
    )
}

/// Renders resolution diagnostics to stderr.
fn report_diagnostics(diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        return;
    }
    let reporter = miette::GraphicalReportHandler::new();
    for diagnostic in diagnostics {
        let mut writer = String::new();
        reporter
            .render_report(&mut writer, &DiagnosticAdapter::new(diagnostic))
            .expect("Writing to String buffer is infallible");
        eprintln!("{writer}");
    }
}
