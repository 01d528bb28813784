//! Catalog text parsing.
//!
//! Turns pasted or uploaded tab-delimited text into ordered [`Catalog`]s:
//! folder path → files (source URL, target filename). The format is
//! heuristic; unusable lines are skipped or become folder markers, parsing
//! never fails.

mod merge;
mod render;
mod sanitize;

pub use merge::merge_catalogs;
pub use render::render;
pub use sanitize::{sanitize_filename, sanitize_folder_path};

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::drive_url;

/// Folder used when a record carries no usable path.
pub const DEFAULT_ROOT: &str = "katalog";

static URL_IN_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)https?://[^\s]+").unwrap());
static TRAILING_PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([^()]+)\)\s*$").unwrap());
static FILE_EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.[a-z0-9]{2,4}$").unwrap());
static IMAGE_EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(jpe?g|png|gif|webp)$").unwrap());

/// One file to fetch: where from, and what to call it in the archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogFile {
    pub source_url: String,
    pub target_filename: String,
}

/// All files that go into one archive folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Sanitized, `/`-joined, no leading slash, no `..` segments.
    pub folder_path: String,
    /// Last segment of `folder_path`, for display.
    pub name: String,
    pub files: Vec<CatalogFile>,
}

impl Catalog {
    pub fn new(folder_path: impl Into<String>) -> Self {
        let folder_path = folder_path.into();
        let name = folder_path
            .rsplit('/')
            .find(|s| !s.is_empty())
            .unwrap_or(DEFAULT_ROOT)
            .to_string();
        Self {
            folder_path,
            name,
            files: Vec::new(),
        }
    }
}

/// Folder and file counts for a parse result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogSummary {
    pub folders: usize,
    pub files: usize,
}

impl CatalogSummary {
    pub fn of(catalogs: &[Catalog]) -> Self {
        Self {
            folders: catalogs.len(),
            files: catalogs.iter().map(|c| c.files.len()).sum(),
        }
    }
}

/// Parse catalog text with the default root folder.
pub fn parse(text: &str) -> Vec<Catalog> {
    parse_with_root(text, DEFAULT_ROOT)
}

/// Parse catalog text; records without any path land in `default_root`.
pub fn parse_with_root(text: &str, default_root: &str) -> Vec<Catalog> {
    let mut builder = CatalogBuilder::new(default_root);
    for raw_line in text.split(['\n', '\r']) {
        builder.push_line(raw_line);
    }
    builder.finish()
}

/// Accumulates catalogs in first-seen folder order with per-folder counters.
struct CatalogBuilder {
    default_root: String,
    current_folder: String,
    catalogs: Vec<Catalog>,
    index: HashMap<String, usize>,
}

impl CatalogBuilder {
    fn new(default_root: &str) -> Self {
        let default_root = match sanitize_folder_path(default_root) {
            root if root.is_empty() => DEFAULT_ROOT.to_string(),
            root => root,
        };
        Self {
            current_folder: default_root.clone(),
            default_root,
            catalogs: Vec::new(),
            index: HashMap::new(),
        }
    }

    fn push_line(&mut self, raw_line: &str) {
        let line = raw_line.trim();
        if line.is_empty() {
            return;
        }

        let columns: Vec<&str> = line
            .split('\t')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .collect();
        if columns.iter().any(|c| is_header_marker(c)) {
            return;
        }

        let Some(url) = find_url(line, &columns) else {
            let folder = sanitize_folder_path(line);
            if !folder.is_empty() {
                self.current_folder = folder;
            }
            return;
        };

        let path_hint = columns
            .iter()
            .map(|c| c.replace(url, "").trim().to_string())
            .find(|c| !c.is_empty() && !is_bare_parenthetical(c))
            .unwrap_or_else(|| self.current_folder.clone());
        let parenthetical = parenthetical_name(line, url);
        let (folder_path, explicit) = self.split_path(&path_hint);
        self.current_folder = folder_path.clone();

        let catalog = self.catalog_mut(&folder_path);
        let filename = explicit
            .filter(|name| !name.is_empty())
            .or_else(|| parenthetical.filter(|name| !name.is_empty()))
            .unwrap_or_else(|| {
                format!(
                    "image-{}{}",
                    catalog.files.len() + 1,
                    guess_extension(url).unwrap_or_else(|| ".png".to_string())
                )
            });

        catalog.files.push(CatalogFile {
            source_url: drive_url::normalize(url),
            target_filename: filename,
        });
    }

    /// Split a path hint into (folder path, explicit filename). A last segment
    /// with a 2-4 character extension is a filename.
    fn split_path(&self, hint: &str) -> (String, Option<String>) {
        let cleaned = sanitize_folder_path(hint);
        let mut parts: Vec<&str> = cleaned.split('/').filter(|s| !s.is_empty()).collect();
        let Some(last) = parts.last().copied() else {
            return (self.default_root.clone(), None);
        };
        if FILE_EXTENSION.is_match(last) {
            parts.pop();
            let folder = if parts.is_empty() {
                self.default_root.clone()
            } else {
                parts.join("/")
            };
            return (folder, Some(sanitize_filename(last)));
        }
        (cleaned, None)
    }

    fn catalog_mut(&mut self, folder_path: &str) -> &mut Catalog {
        let idx = match self.index.get(folder_path) {
            Some(&idx) => idx,
            None => {
                self.catalogs.push(Catalog::new(folder_path));
                let idx = self.catalogs.len() - 1;
                self.index.insert(folder_path.to_string(), idx);
                idx
            }
        };
        &mut self.catalogs[idx]
    }

    fn finish(self) -> Vec<Catalog> {
        self.catalogs
    }
}

fn is_header_marker(column: &str) -> bool {
    let lower = column.to_lowercase();
    lower == "sku" || lower.contains("packshot") || lower.contains("etalase")
}

fn is_bare_parenthetical(column: &str) -> bool {
    column.starts_with('(') && column.ends_with(')') && TRAILING_PARENTHETICAL.is_match(column)
}

fn is_likely_url(value: &str) -> bool {
    let lower = value.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://") || lower.contains("drive.google.com")
}

/// A column that is itself a URL wins; otherwise the first `http(s)://` token in the line.
fn find_url<'a>(line: &'a str, columns: &[&'a str]) -> Option<&'a str> {
    columns
        .iter()
        .copied()
        .find(|c| is_likely_url(c))
        .or_else(|| URL_IN_TEXT.find(line).map(|m| m.as_str()))
}

/// Sanitized `(...)` group at the end of the line once the URL is removed.
fn parenthetical_name(line: &str, url: &str) -> Option<String> {
    let without_url = line.replacen(url, "", 1);
    TRAILING_PARENTHETICAL
        .captures(without_url.trim())
        .map(|c| sanitize_filename(c[1].trim()))
}

/// `.jpg`/`.jpeg`/`.png`/`.gif`/`.webp` from the URL path, lowercased.
fn guess_extension(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    IMAGE_EXTENSION
        .find(parsed.path())
        .map(|m| m.as_str().to_ascii_lowercase())
}

#[cfg(test)]
mod tests;
