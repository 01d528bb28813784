//! `skupack run` – download, frame and archive every catalog file.

use anyhow::{bail, Context, Result};
use skupack_core::archive;
use skupack_core::catalog;
use skupack_core::compose::Frame;
use skupack_core::config::SkupackConfig;
use skupack_core::http::loggable_url;
use skupack_core::output;
use skupack_core::pipeline::{self, Pipeline, Progress, RunReport};
use skupack_core::resolver::DriveResolver;
use std::path::PathBuf;

use super::parse::load_catalogs;

/// Options of one `skupack run` invocation.
#[derive(Debug, Clone)]
pub struct RunArgs {
    pub inputs: Vec<PathBuf>,
    pub frame: Option<PathBuf>,
    pub out: PathBuf,
    pub user: String,
    pub retries: u32,
    pub failed_out: Option<PathBuf>,
}

pub async fn run_pipeline(cfg: &SkupackConfig, args: RunArgs) -> Result<()> {
    let catalogs = load_catalogs(cfg, &args.inputs)?;
    let frame = match &args.frame {
        Some(path) => Some(Frame::open(path)?),
        None => None,
    };

    let mut pipeline = Pipeline::new(DriveResolver::from_config(cfg));
    pipeline.set_frame(frame);
    let summary = pipeline.set_catalogs(catalogs)?;
    println!(
        "{} folder(s), {} file(s) to download",
        summary.folders, summary.files
    );

    let (progress_tx, mut progress_rx) = tokio::sync::mpsc::channel::<Progress>(64);
    pipeline.set_progress_sender(progress_tx);
    let progress_handle = tokio::spawn(async move {
        while let Some(p) = progress_rx.recv().await {
            println!("\r  [{}/{}] {:>3}%  {}", p.current, p.total, p.percent(), p.message);
        }
    });

    let cancel = pipeline.cancel_token();
    let ctrl_c = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("cancellation requested");
            cancel.cancel();
        }
    });

    let retries = args.retries;
    let (mut pipeline, report) = tokio::task::spawn_blocking(move || -> Result<_> {
        let mut report = pipeline.run()?;
        let mut attempt = 0;
        while attempt < retries
            && !report.is_cancelled()
            && !pipeline.cancel_token().is_cancelled()
            && !pipeline.failed().is_empty()
        {
            attempt += 1;
            tracing::info!(attempt, failed = pipeline.failed().len(), "retrying failed downloads");
            report = pipeline.retry_failed()?;
        }
        Ok((pipeline, report))
    })
    .await??;
    ctrl_c.abort();

    print_report(&report);

    if let Some(path) = &args.failed_out {
        if !pipeline.failed().is_empty() {
            let text = catalog::render(&pipeline::failed_catalogs(pipeline.failed()));
            std::fs::write(path, text)
                .with_context(|| format!("writing failed list {}", path.display()))?;
            println!("Failed items written to {}", path.display());
        }
    }
    for f in pipeline.failed() {
        tracing::debug!(url = loggable_url(&f.source_url), reason = %f.reason, "still failed");
    }

    let downloaded = output::file_count(pipeline.processed());
    if downloaded == 0 {
        drop(pipeline);
        let _ = progress_handle.await;
        if report.is_cancelled() {
            bail!("cancelled before any file was downloaded");
        }
        bail!(
            "{}",
            report
                .message
                .unwrap_or_else(|| "no files were downloaded".to_string())
        );
    }

    let (path, file) = archive::create_archive_file(&args.out, &args.user)
        .with_context(|| format!("creating archive in {}", args.out.display()))?;
    let archived = pipeline.package(file)?;

    drop(pipeline);
    let _ = progress_handle.await;

    println!(
        "Wrote {} ({} folder(s), {} file(s))",
        path.display(),
        archived.folders,
        archived.files
    );
    Ok(())
}

fn print_report(report: &RunReport) {
    if report.is_cancelled() {
        println!(
            "Cancelled: {} file(s) downloaded before stopping.",
            report.succeeded
        );
        return;
    }
    match &report.message {
        Some(message) => println!("{message}"),
        None => println!("All {} file(s) downloaded.", report.succeeded),
    }
}
