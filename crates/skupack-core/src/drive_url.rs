//! Google Drive URL recognition: file/folder ids, classification, and the
//! canonical `uc?id=` form stored in catalogs.

use regex::Regex;
use std::sync::LazyLock;

static FILE_PATH_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"file/d/([^/?#&\s]+)").unwrap());
static ID_PARAM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[?&]id=([^&#\s]+)").unwrap());
static FOLDER_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"folders/([^/?#&\s]+)").unwrap());
static SHARE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"file/d/|open\?id=|uc\?|[?&]id=").unwrap());

const DRIVE_HOSTS: [&str; 2] = ["drive.google.com", "drive.usercontent.google.com"];

/// How the resolver has to treat a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlKind {
    /// Drive container; needs the listing API.
    Folder,
    /// Drive single-file link; needs the consent-page dance.
    Share,
    /// Anything else: fetched as-is.
    Direct,
}

pub fn is_drive_url(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    DRIVE_HOSTS.iter().any(|host| lower.contains(host))
}

/// Drive file id from a `file/d/{id}` path segment or an `id=` query parameter.
pub fn extract_file_id(url: &str) -> Option<String> {
    FILE_PATH_ID
        .captures(url)
        .or_else(|| ID_PARAM.captures(url))
        .map(|c| c[1].to_string())
        .filter(|id| !id.is_empty())
}

/// Drive folder id from a `folders/{id}` path segment.
pub fn extract_folder_id(url: &str) -> Option<String> {
    FOLDER_ID.captures(url).map(|c| c[1].to_string())
}

pub fn classify(url: &str) -> UrlKind {
    if !is_drive_url(url) {
        return UrlKind::Direct;
    }
    if FOLDER_ID.is_match(url) {
        return UrlKind::Folder;
    }
    if SHARE_MARKER.is_match(url) {
        return UrlKind::Share;
    }
    UrlKind::Direct
}

/// Canonical catalog form: Drive file links become
/// `https://drive.google.com/uc?id={id}`; folder links and non-Drive URLs are
/// only trimmed.
pub fn normalize(url: &str) -> String {
    let url = url.trim();
    if !is_drive_url(url) || classify(url) == UrlKind::Folder {
        return url.to_string();
    }
    match extract_file_id(url) {
        Some(id) => canonical_file_url(&id),
        None => url.to_string(),
    }
}

pub fn canonical_file_url(id: &str) -> String {
    format!("https://drive.google.com/uc?id={}", id)
}
