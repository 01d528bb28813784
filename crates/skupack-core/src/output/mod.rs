//! Processed results: files ready to be packaged, grouped per folder.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DataUriError {
    #[error("not a data URI")]
    NotDataUri,
    #[error("data URI is not base64-encoded")]
    NotBase64,
    #[error("invalid base64 payload: {0}")]
    Payload(String),
}

/// One finished image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedFile {
    /// Name inside the folder; may contain `/` for folder expansions.
    pub filename: String,
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl ProcessedFile {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
            mime_type: mime_type.into(),
        }
    }

    /// `data:<mime>;base64,<payload>`
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.bytes))
    }

    pub fn from_data_uri(filename: impl Into<String>, uri: &str) -> Result<Self, DataUriError> {
        let rest = uri.trim().strip_prefix("data:").ok_or(DataUriError::NotDataUri)?;
        let (meta, payload) = rest.split_once(',').ok_or(DataUriError::NotDataUri)?;
        let mime = meta.strip_suffix(";base64").ok_or(DataUriError::NotBase64)?;
        let bytes = STANDARD
            .decode(payload.trim())
            .map_err(|e| DataUriError::Payload(e.to_string()))?;
        let mime = if mime.is_empty() { "application/octet-stream" } else { mime };
        Ok(Self::new(filename, bytes, mime))
    }
}

/// All finished files of one catalog folder, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessedCatalog {
    pub folder_path: String,
    pub files: Vec<ProcessedFile>,
}

impl ProcessedCatalog {
    pub fn new(folder_path: impl Into<String>) -> Self {
        Self {
            folder_path: folder_path.into(),
            files: Vec::new(),
        }
    }
}

/// Append `file` to the catalog for `folder_path`, creating it at the end
/// when first seen.
pub fn push_processed(catalogs: &mut Vec<ProcessedCatalog>, folder_path: &str, file: ProcessedFile) {
    match catalogs.iter_mut().find(|c| c.folder_path == folder_path) {
        Some(catalog) => catalog.files.push(file),
        None => {
            let mut catalog = ProcessedCatalog::new(folder_path);
            catalog.files.push(file);
            catalogs.push(catalog);
        }
    }
}

/// Total number of files across catalogs.
pub fn file_count(catalogs: &[ProcessedCatalog]) -> usize {
    catalogs.iter().map(|c| c.files.len()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_uri_shape() {
        let f = ProcessedFile::new("a.png", vec![0x89, 0x50, 0x4E, 0x47], "image/png");
        assert_eq!(f.data_uri(), "data:image/png;base64,iVBORw==");
        let back = ProcessedFile::from_data_uri("a.png", &f.data_uri()).unwrap();
        assert_eq!(back, f);
    }

    #[test]
    fn malformed_data_uris() {
        assert_eq!(
            ProcessedFile::from_data_uri("x", "https://example.com/a.png"),
            Err(DataUriError::NotDataUri)
        );
        assert_eq!(
            ProcessedFile::from_data_uri("x", "data:text/plain,hello"),
            Err(DataUriError::NotBase64)
        );
        assert!(matches!(
            ProcessedFile::from_data_uri("x", "data:image/png;base64,@@@"),
            Err(DataUriError::Payload(_))
        ));
    }

    #[test]
    fn push_groups_by_folder_in_first_seen_order() {
        let mut catalogs = Vec::new();
        push_processed(&mut catalogs, "b", ProcessedFile::new("1.png", vec![1], "image/png"));
        push_processed(&mut catalogs, "a", ProcessedFile::new("1.png", vec![2], "image/png"));
        push_processed(&mut catalogs, "b", ProcessedFile::new("2.png", vec![3], "image/png"));
        let folders: Vec<&str> = catalogs.iter().map(|c| c.folder_path.as_str()).collect();
        assert_eq!(folders, vec!["b", "a"]);
        assert_eq!(catalogs[0].files.len(), 2);
        assert_eq!(file_count(&catalogs), 3);
    }
}
