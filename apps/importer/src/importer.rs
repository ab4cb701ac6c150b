//! Selecting which notes are new and summarising an import.

use std::fmt;

use roam_cloze_core::AnkiNote;

use crate::added_notes::NormalizedNotes;

/// Counts reported at the end of an import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub added: usize,
    pub ignored: usize,
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.added == 0 && self.ignored == 0 {
            return f.write_str("No notes found.");
        }

        let mut parts = Vec::new();
        if self.added > 0 {
            parts.push(format!("{} new notes imported", self.added));
        }
        if self.ignored > 0 {
            parts.push(format!(
                "{} notes were imported before and were not imported again",
                self.ignored
            ));
        }
        write!(f, "{}.", parts.join(", "))
    }
}

/// Notes chosen for import along with the number skipped as duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub new_notes: Vec<AnkiNote>,
    pub ignored: usize,
}

impl Selection {
    pub fn summary(&self) -> ImportSummary {
        ImportSummary {
            added: self.new_notes.len(),
            ignored: self.ignored,
        }
    }

    /// Raw contents of the new notes, as stored in the added-notes file.
    pub fn new_contents(&self) -> impl Iterator<Item = &str> {
        self.new_notes.iter().map(|note| note.content.as_str())
    }
}

/// Filters out notes equivalent to ones imported before or earlier in the
/// same run.
#[derive(Debug, Clone, Default)]
pub struct NoteImporter {
    seen: NormalizedNotes,
}

impl NoteImporter {
    pub fn new(seen: NormalizedNotes) -> Self {
        Self { seen }
    }

    pub fn select_new_notes(&mut self, notes: Vec<AnkiNote>) -> Selection {
        let mut selection = Selection::default();

        for note in notes {
            if self.seen.insert(&note.content) {
                selection.new_notes.push(note);
            } else {
                tracing::debug!("Ignoring previously imported note: {}", note.content);
                selection.ignored += 1;
            }
        }

        selection
    }
}
