//! `skupack resolve` – fetch one URL through the resolver and report the results.

use anyhow::Result;
use skupack_core::config::SkupackConfig;
use skupack_core::resolver::{DriveResolver, Resolver};

pub async fn run_resolve(cfg: &SkupackConfig, url: String) -> Result<()> {
    let resolver = DriveResolver::from_config(cfg);
    let results = tokio::task::spawn_blocking(move || resolver.resolve(&url)).await??;

    println!("{:<40} {:<12} {}", "NAME", "TYPE", "BYTES");
    for r in &results {
        let name = r
            .filename
            .as_deref()
            .or(r.source_name.as_deref())
            .unwrap_or("-");
        println!("{:<40} {:<12} {}", name, r.mime_type, r.bytes.len());
    }
    Ok(())
}
