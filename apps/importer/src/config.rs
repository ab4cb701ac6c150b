//! Import settings resolved from the environment.

use std::path::PathBuf;

use roam_cloze_core::{TimeZoneError, TimeZoneSetting};

use crate::error::{ImportError, Result};

pub const TIME_ZONE_VAR: &str = "ROAM_IMPORT_TIME_ZONE";
pub const ADDED_NOTES_VAR: &str = "ROAM_IMPORT_ADDED_NOTES";
pub const DECK_VAR: &str = "ROAM_IMPORT_DECK";
pub const NOTETYPE_VAR: &str = "ROAM_IMPORT_NOTETYPE";

pub const DEFAULT_ADDED_NOTES: &str = "added_notes.json";
pub const DEFAULT_OUTPUT: &str = "roam_notes.txt";
pub const DEFAULT_DECK: &str = "Default";
pub const DEFAULT_NOTETYPE: &str = "Cloze";

/// Settings for one import run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportConfig {
    /// Zone used for block timestamps in citations.
    pub time_zone: TimeZoneSetting,
    /// JSON file listing the contents of notes imported by earlier runs.
    pub added_notes: PathBuf,
    /// Tab-separated file the new notes are written to.
    pub output: PathBuf,
    pub deck: String,
    pub notetype: String,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            time_zone: TimeZoneSetting::default(),
            added_notes: PathBuf::from(DEFAULT_ADDED_NOTES),
            output: PathBuf::from(DEFAULT_OUTPUT),
            deck: DEFAULT_DECK.to_string(),
            notetype: DEFAULT_NOTETYPE.to_string(),
        }
    }
}

impl ImportConfig {
    /// Resolve settings through `lookup`, falling back to defaults for
    /// missing or blank values.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(time_zone) = value(TIME_ZONE_VAR) {
            config.time_zone = time_zone
                .parse()
                .map_err(|e: TimeZoneError| ImportError::InvalidConfig {
                    key: TIME_ZONE_VAR.to_string(),
                    message: e.to_string(),
                })?;
        }
        if let Some(added_notes) = value(ADDED_NOTES_VAR) {
            config.added_notes = PathBuf::from(added_notes);
        }
        if let Some(deck) = value(DECK_VAR) {
            config.deck = deck;
        }
        if let Some(notetype) = value(NOTETYPE_VAR) {
            config.notetype = notetype;
        }

        Ok(config)
    }

    /// Resolve settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}
