//! `skupack parse` – preview the folders a set of catalog files produces.

use anyhow::{Context, Result};
use skupack_core::catalog::{self, Catalog, CatalogSummary};
use skupack_core::config::SkupackConfig;
use std::path::PathBuf;

/// Read, parse and merge catalog files in the order given.
pub(crate) fn load_catalogs(cfg: &SkupackConfig, inputs: &[PathBuf]) -> Result<Vec<Catalog>> {
    let mut catalogs = Vec::new();
    for path in inputs {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading catalog {}", path.display()))?;
        let parsed = catalog::parse_with_root(&text, &cfg.default_root);
        tracing::debug!(path = %path.display(), folders = parsed.len(), "parsed catalog file");
        catalog::merge_catalogs(&mut catalogs, parsed);
    }
    Ok(catalogs)
}

pub fn run_parse(cfg: &SkupackConfig, inputs: &[PathBuf], render: bool) -> Result<()> {
    let catalogs = load_catalogs(cfg, inputs)?;
    if render {
        print!("{}", catalog::render(&catalogs));
        return Ok(());
    }

    if catalogs.is_empty() {
        println!("No catalog entries found.");
        return Ok(());
    }
    println!("{:<48} {}", "FOLDER", "FILES");
    for c in &catalogs {
        println!("{:<48} {}", c.folder_path, c.files.len());
    }
    let summary = CatalogSummary::of(&catalogs);
    println!("{} folder(s), {} file(s)", summary.folders, summary.files);
    Ok(())
}
