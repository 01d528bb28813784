//! Drive REST API v3 calls (key-authenticated): metadata, `alt=media`
//! content, and paginated folder listings.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use super::endpoints::DriveEndpoints;
use super::{DownloadResult, DriveResolver};
use crate::http::{HttpRequest, Transport};
use crate::retry::FetchError;

/// MIME type of a Drive folder.
pub const FOLDER_MIME: &str = "application/vnd.google-apps.folder";
/// Prefix shared by Drive-native documents (Docs, Sheets, shortcuts...).
pub const NATIVE_MIME_PREFIX: &str = "application/vnd.google-apps.";

/// One entry of a `files.list` response, or a `files.get` metadata response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveEntry {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mime_type: String,
}

impl DriveEntry {
    pub fn is_folder(&self) -> bool {
        self.mime_type == FOLDER_MIME
    }

    /// Docs/Sheets/shortcuts and other entries without binary content.
    pub fn is_native_document(&self) -> bool {
        !self.is_folder() && self.mime_type.starts_with(NATIVE_MIME_PREFIX)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileList {
    #[serde(default)]
    pub files: Vec<DriveEntry>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("API answered HTTP {0}")]
    Status(u32),
    #[error("invalid API response: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid API URL: {0}")]
    Url(#[from] url::ParseError),
}

pub(super) fn list_url(
    endpoints: &DriveEndpoints,
    folder_id: &str,
    key: &str,
    page_token: Option<&str>,
) -> Result<Url, url::ParseError> {
    let mut params = vec![
        ("q", format!("'{}' in parents and trashed = false", folder_id)),
        ("fields", "nextPageToken,files(id,name,mimeType)".to_string()),
        ("pageSize", "1000".to_string()),
        ("key", key.to_string()),
    ];
    if let Some(token) = page_token {
        params.push(("pageToken", token.to_string()));
    }
    Url::parse_with_params(&format!("{}/files", endpoints.api_root()), &params)
}

pub(super) fn metadata_url(
    endpoints: &DriveEndpoints,
    id: &str,
    key: &str,
) -> Result<Url, url::ParseError> {
    Url::parse_with_params(
        &format!("{}/files/{}", endpoints.api_root(), id),
        &[("fields", "id,name,mimeType"), ("key", key)],
    )
}

pub(super) fn media_url(
    endpoints: &DriveEndpoints,
    id: &str,
    key: &str,
) -> Result<Url, url::ParseError> {
    Url::parse_with_params(
        &format!("{}/files/{}", endpoints.api_root(), id),
        &[("alt", "media"), ("key", key)],
    )
}

impl<T: Transport> DriveResolver<T> {
    fn api_json<D: DeserializeOwned>(&self, url: &Url) -> Result<D, ApiError> {
        let request = HttpRequest::get(url.as_str())
            .header("User-Agent", self.settings.user_agent.as_str())
            .header("Accept", "application/json");
        let response = self.transport.get(&request)?;
        if !response.is_success() {
            return Err(ApiError::Status(response.status));
        }
        Ok(serde_json::from_slice(&response.body)?)
    }

    /// Every direct child of a folder, following `nextPageToken`.
    pub(super) fn list_children(&self, key: &str, folder_id: &str) -> Result<Vec<DriveEntry>, ApiError> {
        let endpoints = &self.settings.endpoints;
        let mut entries = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let url = list_url(endpoints, folder_id, key, page_token.as_deref())?;
            let page: FileList = self.api_json(&url)?;
            entries.extend(page.files);
            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }
        tracing::debug!(folder_id, entries = entries.len(), "folder listed");
        Ok(entries)
    }

    pub(super) fn api_metadata(&self, key: &str, id: &str) -> Result<DriveEntry, ApiError> {
        let url = metadata_url(&self.settings.endpoints, id, key)?;
        self.api_json(&url)
    }

    /// Metadata lookup, then `alt=media` content with the declared name.
    pub(super) fn api_download(&self, key: &str, id: &str) -> Option<DownloadResult> {
        let name = match self.api_metadata(key, id) {
            Ok(entry) => Some(entry.name).filter(|n| !n.is_empty()),
            Err(e) => {
                tracing::debug!(file_id = id, error = %e, "metadata lookup failed");
                return None;
            }
        };
        let url = media_url(&self.settings.endpoints, id, key).ok()?;
        let response = self.fetch(url.as_str(), None)?;
        self.accept_drive_payload(response, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_response_parses() {
        let json = r#"{
            "nextPageToken": "p2",
            "files": [
                {"id": "a", "name": "x.jpg", "mimeType": "image/jpeg"},
                {"id": "b", "name": "Sub", "mimeType": "application/vnd.google-apps.folder"},
                {"id": "c", "name": "Notes", "mimeType": "application/vnd.google-apps.document"}
            ]
        }"#;
        let list: FileList = serde_json::from_str(json).unwrap();
        assert_eq!(list.next_page_token.as_deref(), Some("p2"));
        assert_eq!(list.files.len(), 3);
        assert!(!list.files[0].is_folder());
        assert!(list.files[1].is_folder());
        assert!(!list.files[1].is_native_document());
        assert!(list.files[2].is_native_document());
    }

    #[test]
    fn empty_list_response() {
        let list: FileList = serde_json::from_str("{}").unwrap();
        assert!(list.files.is_empty());
        assert!(list.next_page_token.is_none());
    }

    #[test]
    fn list_url_carries_query_and_token() {
        let e = DriveEndpoints::default();
        let url = list_url(&e, "F1", "k", Some("tok")).unwrap();
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(url.as_str().starts_with("https://www.googleapis.com/drive/v3/files?"));
        assert!(pairs.contains(&("q".into(), "'F1' in parents and trashed = false".into())));
        assert!(pairs.contains(&("pageToken".into(), "tok".into())));
        assert!(pairs.contains(&("key".into(), "k".into())));
    }

    #[test]
    fn media_url_uses_alt_media() {
        let e = DriveEndpoints::default();
        let url = media_url(&e, "ID", "k").unwrap();
        assert_eq!(url.as_str(), "https://www.googleapis.com/drive/v3/files/ID?alt=media&key=k");
    }
}
