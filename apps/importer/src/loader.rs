//! Loading Roam JSON exports from disk.

use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use roam_cloze_core::Page;
use zip::ZipArchive;

use crate::error::{ImportError, Result};

/// Load pages from a `.json` export, or from every `.json` file in a
/// directory or in a `.zip` archive as Roam exports it, in name order.
pub fn load_export(path: &Path) -> Result<Vec<Page>> {
    if path.is_dir() {
        load_directory(path)
    } else if is_json(path) {
        load_file(path)
    } else if has_extension(path, "zip") {
        load_zip(path)
    } else {
        Err(ImportError::UnsupportedExport {
            path: path.to_path_buf(),
        })
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .map_or(false, |ext| ext.eq_ignore_ascii_case(extension))
}

fn is_json(path: &Path) -> bool {
    has_extension(path, "json")
}

fn load_file(path: &Path) -> Result<Vec<Page>> {
    let content = fs::read_to_string(path).map_err(|e| ImportError::io(path, e))?;
    let pages: Vec<Page> = serde_json::from_str(&content).map_err(|e| ImportError::json(path, e))?;

    tracing::debug!("Loaded {} pages from {}", pages.len(), path.display());
    Ok(pages)
}

fn load_directory(dir: &Path) -> Result<Vec<Page>> {
    let mut files: Vec<PathBuf> = Vec::new();

    for entry in fs::read_dir(dir).map_err(|e| ImportError::io(dir, e))? {
        let entry = entry.map_err(|e| ImportError::io(dir, e))?;
        let path = entry.path();

        if path.is_file() && is_json(&path) {
            files.push(path);
        }
    }
    files.sort();

    let mut pages = Vec::new();
    for file in &files {
        pages.extend(load_file(file)?);
    }

    tracing::info!(
        "Loaded {} pages from {} files in {}",
        pages.len(),
        files.len(),
        dir.display()
    );
    Ok(pages)
}

fn load_zip(path: &Path) -> Result<Vec<Page>> {
    let file = File::open(path).map_err(|e| ImportError::io(path, e))?;
    let mut archive =
        ZipArchive::new(BufReader::new(file)).map_err(|e| ImportError::archive(path, e))?;

    // Directory entries end in '/', which `Path::extension` would ignore.
    let mut names: Vec<String> = archive
        .file_names()
        .filter(|name| !name.ends_with('/') && is_json(Path::new(name)))
        .map(str::to_string)
        .collect();
    names.sort();

    let mut pages = Vec::new();
    for name in &names {
        let mut content = String::new();
        archive
            .by_name(name)
            .map_err(|e| ImportError::archive(path, e))?
            .read_to_string(&mut content)
            .map_err(|e| ImportError::io(path, e))?;

        let entry_pages: Vec<Page> =
            serde_json::from_str(&content).map_err(|e| ImportError::json(&path.join(name), e))?;
        pages.extend(entry_pages);
    }

    tracing::info!(
        "Loaded {} pages from {} entries in {}",
        pages.len(),
        names.len(),
        path.display()
    );
    Ok(pages)
}
