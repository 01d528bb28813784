//! Batch orchestration: catalogs in, processed catalogs and a failed set out.
//!
//! [`Pipeline`] owns all run state (catalogs, results, failures, progress,
//! error message) and drives one item at a time:
//! resolve -> composite -> accumulate. Per-item failures land in the failed
//! set and never abort the batch. A [`CancelToken`] is polled before each
//! file, before each expanded sub-result, and before compositing.

mod control;
mod error;
mod progress;
mod report;
mod run;
mod state;

pub use control::CancelToken;
pub use error::PipelineError;
pub use progress::Progress;
pub use report::{RunOutcome, RunReport};
pub use state::PipelineState;

use std::io::{Seek, Write};

use tokio::sync::mpsc;

use crate::archive::{self, ArchiveSummary};
use crate::catalog::{Catalog, CatalogFile, CatalogSummary};
use crate::compose::Frame;
use crate::output::{self, ProcessedCatalog};
use crate::resolver::Resolver;

/// A catalog file that produced no content, kept for a later retry pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedDownload {
    pub folder_path: String,
    pub source_url: String,
    pub target_filename: String,
    /// Resolver error text.
    pub reason: String,
}

/// Group failed downloads back into catalogs (e.g. to write a retry input file).
pub fn failed_catalogs(failed: &[FailedDownload]) -> Vec<Catalog> {
    let mut catalogs: Vec<Catalog> = Vec::new();
    for f in failed {
        let file = CatalogFile {
            source_url: f.source_url.clone(),
            target_filename: f.target_filename.clone(),
        };
        match catalogs.iter_mut().find(|c| c.folder_path == f.folder_path) {
            Some(catalog) => catalog.files.push(file),
            None => {
                let mut catalog = Catalog::new(f.folder_path.clone());
                catalog.files.push(file);
                catalogs.push(catalog);
            }
        }
    }
    catalogs
}

pub struct Pipeline<R: Resolver> {
    resolver: R,
    frame: Option<Frame>,
    cancel: CancelToken,
    state: PipelineState,
    catalogs: Vec<Catalog>,
    processed: Vec<ProcessedCatalog>,
    failed: Vec<FailedDownload>,
    progress: Progress,
    error: Option<String>,
    progress_tx: Option<mpsc::Sender<Progress>>,
}

impl<R: Resolver> Pipeline<R> {
    pub fn new(resolver: R) -> Self {
        Self {
            resolver,
            frame: None,
            cancel: CancelToken::new(),
            state: PipelineState::Idle,
            catalogs: Vec::new(),
            processed: Vec::new(),
            failed: Vec::new(),
            progress: Progress::default(),
            error: None,
            progress_tx: None,
        }
    }

    /// Frame composited onto every image; `None` disables compositing.
    pub fn set_frame(&mut self, frame: Option<Frame>) {
        self.frame = frame;
    }

    /// Progress snapshots are sent with `try_send`; a full channel drops them.
    pub fn set_progress_sender(&mut self, tx: mpsc::Sender<Progress>) {
        self.progress_tx = Some(tx);
    }

    /// Handle for requesting cancellation from another thread.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn catalogs(&self) -> &[Catalog] {
        &self.catalogs
    }

    pub fn processed(&self) -> &[ProcessedCatalog] {
        &self.processed
    }

    pub fn failed(&self) -> &[FailedDownload] {
        &self.failed
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn ensure_ready(&self) -> Result<(), PipelineError> {
        if self.state.is_active() {
            return Err(PipelineError::Busy(self.state));
        }
        Ok(())
    }

    fn emit_progress(&self) {
        if let Some(tx) = &self.progress_tx {
            let _ = tx.try_send(self.progress.clone());
        }
    }

    /// Store parsed catalogs for the next run.
    pub fn set_catalogs(&mut self, catalogs: Vec<Catalog>) -> Result<CatalogSummary, PipelineError> {
        self.ensure_ready()?;
        self.state = PipelineState::Parsing;
        let summary = CatalogSummary::of(&catalogs);
        self.catalogs = catalogs;
        self.state = PipelineState::Idle;
        tracing::info!(folders = summary.folders, files = summary.files, "catalogs loaded");
        Ok(summary)
    }

    /// Clear everything and return to idle.
    pub fn reset(&mut self) -> Result<(), PipelineError> {
        self.ensure_ready()?;
        self.catalogs.clear();
        self.processed.clear();
        self.failed.clear();
        self.progress = Progress::default();
        self.error = None;
        self.cancel.reset();
        self.state = PipelineState::Idle;
        Ok(())
    }

    /// Write processed catalogs as a zip. Allowed after a completed or
    /// cancelled run; archive failures move the pipeline to `error`.
    pub fn package<W: Write + Seek>(&mut self, writer: W) -> Result<ArchiveSummary, PipelineError> {
        self.ensure_ready()?;
        if output::file_count(&self.processed) == 0 {
            return Err(PipelineError::NothingToPackage);
        }
        let previous = self.state;
        self.state = PipelineState::Zipping;
        self.progress.message = "Creating archive".to_string();
        self.emit_progress();
        match archive::write_archive(writer, &self.processed) {
            Ok(summary) => {
                self.state = previous;
                Ok(summary)
            }
            Err(e) => {
                self.state = PipelineState::Error;
                self.error = Some(e.to_string());
                Err(e.into())
            }
        }
    }
}
