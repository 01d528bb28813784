//! Zip packaging of processed catalogs: one directory per folder path, one
//! entry per file.

use std::collections::HashSet;
use std::fs::File;
use std::io::{Seek, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use thiserror::Error;
use zip::write::FileOptions;
use zip::CompressionMethod;

use crate::catalog::{sanitize_filename, sanitize_folder_path, DEFAULT_ROOT};
use crate::output::ProcessedCatalog;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("zip: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

/// Counts of what went into an archive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArchiveSummary {
    pub folders: usize,
    pub files: usize,
}

/// `{user}-{ddMMyyyyHHmmssSSS}.zip`; `user` falls back to "user".
pub fn archive_file_name(user: &str, at: DateTime<Local>) -> String {
    let user = match sanitize_filename(user).replace(' ', "_") {
        u if u.is_empty() => "user".to_string(),
        u => u,
    };
    format!("{}-{}.zip", user, at.format("%d%m%Y%H%M%S%3f"))
}

/// Entry path for one file: sanitized folder, sanitized sub-path and name.
fn entry_path(folder_path: &str, filename: &str) -> String {
    let folder = match sanitize_folder_path(folder_path) {
        f if f.is_empty() => DEFAULT_ROOT.to_string(),
        f => f,
    };
    let normalized = filename.replace('\\', "/");
    let (sub, name) = match normalized.rsplit_once('/') {
        Some((sub, name)) => (sanitize_folder_path(sub), sanitize_filename(name)),
        None => (String::new(), sanitize_filename(&normalized)),
    };
    let name = if name.is_empty() { "image".to_string() } else { name };
    if sub.is_empty() {
        format!("{folder}/{name}")
    } else {
        format!("{folder}/{sub}/{name}")
    }
}

/// `a.jpg` -> `a-2.jpg`, `a` -> `a-2`.
fn with_suffix(path: &str, n: usize) -> String {
    let (dir, name) = match path.rsplit_once('/') {
        Some((dir, name)) => (Some(dir), name),
        None => (None, path),
    };
    let renamed = match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{stem}-{n}.{ext}"),
        _ => format!("{name}-{n}"),
    };
    match dir {
        Some(dir) => format!("{dir}/{renamed}"),
        None => renamed,
    }
}

/// Write all catalogs into a Deflated zip. Duplicate entry paths get a
/// numeric suffix so nothing is overwritten.
pub fn write_archive<W: Write + Seek>(
    writer: W,
    catalogs: &[ProcessedCatalog],
) -> Result<ArchiveSummary, ArchiveError> {
    let mut zip = zip::ZipWriter::new(writer);
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o644);

    let mut used = HashSet::new();
    let mut summary = ArchiveSummary::default();
    for catalog in catalogs {
        if catalog.files.is_empty() {
            continue;
        }
        summary.folders += 1;
        for file in &catalog.files {
            let base = entry_path(&catalog.folder_path, &file.filename);
            let mut path = base.clone();
            let mut n = 2;
            while !used.insert(path.clone()) {
                path = with_suffix(&base, n);
                n += 1;
            }
            zip.start_file(path.as_str(), options)?;
            zip.write_all(&file.bytes)?;
            summary.files += 1;
        }
    }
    zip.finish()?;
    Ok(summary)
}

/// Create `dir` if needed and open a new, timestamped archive file in it for
/// `user`.
pub fn create_archive_file(dir: &Path, user: &str) -> Result<(PathBuf, File), ArchiveError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(archive_file_name(user, Local::now()));
    let file = File::create(&path)?;
    tracing::debug!(path = %path.display(), "archive file created");
    Ok((path, file))
}
