//! Render catalogs back into parseable text.

use super::{Catalog, FILE_EXTENSION};

/// One line per file. Filenames with an extension ride in the path column
/// (`folder/name.png<TAB>url`); others go into a trailing parenthetical
/// column (`folder<TAB>url<TAB>(name)`). Parsing the output yields the same
/// catalogs.
pub fn render(catalogs: &[Catalog]) -> String {
    let mut out = String::new();
    for catalog in catalogs {
        for file in &catalog.files {
            if FILE_EXTENSION.is_match(&file.target_filename) {
                out.push_str(&format!(
                    "{}/{}\t{}\n",
                    catalog.folder_path, file.target_filename, file.source_url
                ));
            } else {
                out.push_str(&format!(
                    "{}\t{}\t({})\n",
                    catalog.folder_path, file.source_url, file.target_filename
                ));
            }
        }
    }
    out
}
