//! Merging catalogs from repeated pastes or several input files.

use super::Catalog;

/// Merge `incoming` into `existing` keyed by folder path. Files whose source
/// URL is already present in that folder are dropped; folder and file order
/// follow first appearance.
pub fn merge_catalogs(existing: &mut Vec<Catalog>, incoming: Vec<Catalog>) {
    for catalog in incoming {
        let idx = match existing
            .iter()
            .position(|c| c.folder_path == catalog.folder_path)
        {
            Some(idx) => idx,
            None => {
                existing.push(Catalog::new(catalog.folder_path.clone()));
                existing.len() - 1
            }
        };
        let target = &mut existing[idx];
        for file in catalog.files {
            if !target.files.iter().any(|f| f.source_url == file.source_url) {
                target.files.push(file);
            }
        }
    }
}
