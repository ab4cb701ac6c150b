//! Common test utilities and fixtures for importer integration tests.
//!
//! This module provides:
//! - TestContext owning a temporary directory with export, output and
//!   added-notes files
//! - Fixture builders for Roam export JSON

#![allow(dead_code)]

pub mod fixtures;

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use roam_anki_import::ImportConfig;
use roam_cloze_core::TimeZoneSetting;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

/// Temporary working directory for one import test.
pub struct TestContext {
    dir: TempDir,
}

impl TestContext {
    /// Create a new test context in a fresh temporary directory.
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temporary directory"),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write `pages` as an export file and return its path.
    pub fn write_export(&self, name: &str, pages: &serde_json::Value) -> PathBuf {
        let path = self.path(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create export directory");
        }
        fs::write(&path, pages.to_string()).expect("Failed to write export");
        path
    }

    /// Configuration writing into this context, with timestamps in UTC.
    pub fn config(&self) -> ImportConfig {
        ImportConfig {
            time_zone: TimeZoneSetting::Utc,
            added_notes: self.path("added_notes.json"),
            output: self.path("roam_notes.txt"),
            ..ImportConfig::default()
        }
    }

    pub fn output_exists(&self) -> bool {
        self.path("roam_notes.txt").exists()
    }

    /// Note lines of the output file, without the header.
    pub fn output_notes(&self) -> Vec<String> {
        fs::read_to_string(self.path("roam_notes.txt"))
            .expect("Failed to read output")
            .lines()
            .filter(|line| !line.starts_with('#'))
            .map(str::to_string)
            .collect()
    }

    /// Path of a zip archive holding `entries` as `(name, pages)` pairs.
    pub fn write_zip_export(&self, name: &str, entries: &[(&str, serde_json::Value)]) -> PathBuf {
        let path = self.path(name);
        let file = fs::File::create(&path).expect("Failed to create zip export");
        let mut zip = zip::ZipWriter::new(file);
        for (entry, pages) in entries {
            zip.start_file(*entry, SimpleFileOptions::default())
                .expect("Failed to start zip entry");
            zip.write_all(pages.to_string().as_bytes())
                .expect("Failed to write zip entry");
        }
        zip.finish().expect("Failed to finish zip export");
        path
    }

    pub fn added_notes(&self) -> Vec<String> {
        let content =
            fs::read_to_string(self.path("added_notes.json")).expect("Failed to read added notes");
        serde_json::from_str(&content).expect("Added notes are not a JSON array")
    }
}

/// An output line as the note sink writes it.
pub fn note_line(content: &str, source: &str) -> String {
    format!("\"{}\"\t\"{}\"", content.replace('"', "\"\""), source.replace('"', "\"\""))
}
