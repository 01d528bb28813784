//! Folder links: depth-first listing through the Drive API, then one
//! download per collected file.

use std::collections::HashSet;

use super::{DownloadResult, DriveResolver, ResolveError};
use crate::catalog::sanitize_filename;
use crate::drive_url;
use crate::http::Transport;

/// A file found while walking a folder tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FolderFile {
    pub id: String,
    /// `sub/dir/name.jpg`, relative to the linked folder.
    pub path: String,
}

impl<T: Transport> DriveResolver<T> {
    pub(super) fn resolve_folder(&self, url: &str) -> Result<Vec<DownloadResult>, ResolveError> {
        let key = self
            .settings
            .api_key
            .as_deref()
            .ok_or(ResolveError::FolderUnsupported)?;
        let folder_id = drive_url::extract_folder_id(url)
            .ok_or_else(|| ResolveError::InvalidDriveUrl(url.to_string()))?;

        let files = self.walk_folder(key, &folder_id)?;
        if files.is_empty() {
            tracing::warn!(folder_id = %folder_id, "folder has no downloadable files");
            return Err(ResolveError::FolderEmpty(folder_id));
        }
        tracing::info!(folder_id = %folder_id, files = files.len(), "folder expanded");

        let mut results = Vec::with_capacity(files.len());
        for file in &files {
            match self.download_file(&file.id) {
                Some(mut result) => {
                    result.filename = Some(file.path.clone());
                    results.push(result);
                }
                None => tracing::warn!(file_id = %file.id, path = %file.path, "folder entry failed"),
            }
        }
        if results.is_empty() {
            return Err(ResolveError::Exhausted(url.to_string()));
        }
        Ok(results)
    }

    /// LIFO traversal seeded with (folder id, ""). Subfolders extend the
    /// prefix, Drive-native documents are skipped, everything else is a file.
    pub(crate) fn walk_folder(&self, key: &str, root_id: &str) -> Result<Vec<FolderFile>, ResolveError> {
        let mut stack = vec![(root_id.to_string(), String::new())];
        let mut visited = HashSet::new();
        let mut files = Vec::new();

        while let Some((folder_id, prefix)) = stack.pop() {
            if !visited.insert(folder_id.clone()) {
                continue;
            }
            let entries = self
                .list_children(key, &folder_id)
                .map_err(|source| ResolveError::Listing {
                    folder_id: folder_id.clone(),
                    source,
                })?;
            for entry in entries {
                let name = sanitize_filename(&entry.name);
                let name = if name.is_empty() { entry.id.clone() } else { name };
                if entry.is_folder() {
                    stack.push((entry.id, format!("{prefix}{name}/")));
                } else if entry.is_native_document() {
                    tracing::debug!(file_id = %entry.id, mime = %entry.mime_type, "skipping native document");
                } else {
                    files.push(FolderFile {
                        id: entry.id,
                        path: format!("{prefix}{name}"),
                    });
                }
            }
        }
        Ok(files)
    }
}
