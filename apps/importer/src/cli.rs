//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use roam_cloze_core::TimeZoneSetting;

use crate::config::ImportConfig;

#[derive(Debug, Parser)]
#[command(
    name = "roam-anki-import",
    version,
    about = "Turn clozes in a Roam Research export into Anki notes"
)]
pub struct Cli {
    /// Roam export: a .zip or .json file, or a directory of JSON files
    pub export: PathBuf,

    /// Tab-separated file for Anki's text importer
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// JSON file remembering notes imported by earlier runs
    #[arg(long)]
    pub added_notes: Option<PathBuf>,

    /// Time zone for block timestamps: local, utc or an offset like +02:00
    #[arg(long, allow_hyphen_values = true)]
    pub time_zone: Option<TimeZoneSetting>,

    /// Deck the notes are imported into
    #[arg(long)]
    pub deck: Option<String>,

    /// Note type with Text and Source fields
    #[arg(long)]
    pub notetype: Option<String>,

    /// Report what would be imported without writing any file
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    /// Override `config` with every flag that was given.
    pub fn apply(&self, mut config: ImportConfig) -> ImportConfig {
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        if let Some(added_notes) = &self.added_notes {
            config.added_notes = added_notes.clone();
        }
        if let Some(time_zone) = self.time_zone {
            config.time_zone = time_zone;
        }
        if let Some(deck) = &self.deck {
            config.deck = deck.clone();
        }
        if let Some(notetype) = &self.notetype {
            config.notetype = notetype.clone();
        }
        config
    }
}
