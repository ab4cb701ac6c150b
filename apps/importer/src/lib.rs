//! Command-line importer turning Roam Research exports into Anki notes.
//!
//! Provides:
//! - Export loading from a Roam zip archive, a JSON file or a directory
//! - Configuration from the environment and command-line flags
//! - De-duplication against notes imported by earlier runs
//! - Output as a tab-separated file for Anki's text importer

pub mod added_notes;
pub mod cli;
pub mod config;
pub mod error;
pub mod importer;
pub mod loader;
pub mod sink;

use std::path::Path;

use roam_cloze_core::NoteExtractor;

pub use added_notes::{normalized_content, AddedNotesFile, NormalizedNotes};
pub use cli::Cli;
pub use config::ImportConfig;
pub use error::{ImportError, Result};
pub use importer::{ImportSummary, NoteImporter, Selection};
pub use loader::load_export;
pub use sink::{NoteSink, TsvNoteWriter};

/// Import every new cloze note found in `export`.
///
/// With `dry_run` nothing is written and the summary reports what an import
/// would have added.
pub fn run(export: &Path, config: &ImportConfig, dry_run: bool) -> Result<ImportSummary> {
    tracing::info!("Importing Roam export {}", export.display());

    let pages = load_export(export)?;
    let notes = NoteExtractor::new(config.time_zone).extract_notes(&pages);
    tracing::info!("Found {} cloze notes in {} pages", notes.len(), pages.len());

    let added_notes = AddedNotesFile::new(&config.added_notes);
    let mut previous = added_notes.read()?;
    tracing::debug!(
        "Read {} previously imported notes from {}",
        previous.len(),
        added_notes.path().display()
    );
    let mut importer = NoteImporter::new(previous.iter().collect());
    let selection = importer.select_new_notes(notes);
    let summary = selection.summary();

    if dry_run {
        tracing::info!("Dry run, no files written");
        return Ok(summary);
    }

    if !selection.new_notes.is_empty() {
        let mut sink = TsvNoteWriter::create(&config.output, &config.deck, &config.notetype)?;
        sink.add_notes(&selection.new_notes)?;
        sink.finish()?;

        previous.extend(selection.new_contents().map(str::to_string));
        added_notes.write(&previous)?;
        tracing::info!(
            "Wrote {} notes to {}",
            summary.added,
            config.output.display()
        );
    }

    Ok(summary)
}
