//! Destinations for imported notes.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use roam_cloze_core::AnkiNote;

use crate::error::{ImportError, Result};

/// Something that accepts new notes.
pub trait NoteSink {
    fn add_note(&mut self, note: &AnkiNote) -> Result<()>;

    fn add_notes(&mut self, notes: &[AnkiNote]) -> Result<()> {
        for note in notes {
            self.add_note(note)?;
        }
        Ok(())
    }
}

/// Notes written as a tab-separated file for Anki's text importer, with
/// header lines naming the note type and deck. Every field is quoted.
pub struct TsvNoteWriter<W: Write> {
    writer: W,
    destination: PathBuf,
}

impl TsvNoteWriter<BufWriter<File>> {
    /// Create (or truncate) the file at `path` and write the header.
    pub fn create(path: &Path, deck: &str, notetype: &str) -> Result<Self> {
        let file = File::create(path).map_err(|e| ImportError::output(path, e))?;
        Self::new(BufWriter::new(file), path, deck, notetype)
    }
}

impl<W: Write> TsvNoteWriter<W> {
    /// Write the header to `writer`. `destination` names it in errors.
    pub fn new(writer: W, destination: &Path, deck: &str, notetype: &str) -> Result<Self> {
        let mut sink = Self {
            writer,
            destination: destination.to_path_buf(),
        };
        sink.write_line(&format!(
            "#separator:tab\n#html:true\n#notetype:{}\n#deck:{}\n#columns:Text\tSource",
            header_value(notetype),
            header_value(deck)
        ))?;
        Ok(sink)
    }

    /// Flush and hand back the writer.
    pub fn finish(mut self) -> Result<W> {
        self.writer
            .flush()
            .map_err(|e| ImportError::output(&self.destination, e))?;
        Ok(self.writer)
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.writer, "{line}").map_err(|e| ImportError::output(&self.destination, e))
    }
}

impl<W: Write> NoteSink for TsvNoteWriter<W> {
    fn add_note(&mut self, note: &AnkiNote) -> Result<()> {
        let line = format!("{}\t{}", field(&note.content), field(&note.source));
        self.write_line(&line)
    }
}

/// A quoted field with inner quotes doubled, so the importer's CSV reader
/// keeps them. Tabs and raw line breaks never reach the file.
fn field(value: &str) -> String {
    let flat = value
        .replace('\t', " ")
        .replace("\r\n", "<br/>")
        .replace(['\n', '\r'], "<br/>");
    format!("\"{}\"", flat.replace('"', "\"\""))
}

fn header_value(value: &str) -> String {
    value.replace(['\t', '\n', '\r'], " ")
}
