//! The per-item loop shared by full runs and retry passes.

use super::{FailedDownload, Pipeline, PipelineError, PipelineState, Progress, RunReport};
use crate::compose::apply_frame;
use crate::http::loggable_url;
use crate::output::{push_processed, ProcessedFile};
use crate::resolver::{DownloadResult, Resolver};

const CANCELLED_MESSAGE: &str = "Process cancelled";

/// One catalog file scheduled for download.
#[derive(Debug, Clone)]
struct WorkItem {
    folder_path: String,
    source_url: String,
    target_filename: String,
}

impl From<FailedDownload> for WorkItem {
    fn from(f: FailedDownload) -> Self {
        Self {
            folder_path: f.folder_path,
            source_url: f.source_url,
            target_filename: f.target_filename,
        }
    }
}

impl WorkItem {
    fn failed(self, reason: String) -> FailedDownload {
        FailedDownload {
            folder_path: self.folder_path,
            source_url: self.source_url,
            target_filename: self.target_filename,
            reason,
        }
    }
}

enum ItemOutcome {
    /// Files added to the processed set.
    Done(usize),
    Failed(FailedDownload),
    /// Stopped at a checkpoint; nothing from this item was kept.
    Cancelled,
}

/// Totals of one pass over a work list.
struct Pass {
    succeeded: usize,
    failed: Vec<FailedDownload>,
    /// Items never started or interrupted partway.
    untouched: Vec<WorkItem>,
    cancelled: bool,
}

impl<R: Resolver> Pipeline<R> {
    /// Download, composite and accumulate every catalog file. Starts from an
    /// empty result set.
    pub fn run(&mut self) -> Result<RunReport, PipelineError> {
        self.ensure_ready()?;
        let items: Vec<WorkItem> = self
            .catalogs
            .iter()
            .flat_map(|c| {
                c.files.iter().map(|f| WorkItem {
                    folder_path: c.folder_path.clone(),
                    source_url: f.source_url.clone(),
                    target_filename: f.target_filename.clone(),
                })
            })
            .collect();
        if items.is_empty() {
            return Err(PipelineError::NothingToProcess);
        }

        self.processed.clear();
        self.failed.clear();
        self.error = None;
        tracing::info!(items = items.len(), "run started");

        let pass = self.process(items);
        let failed = pass.failed.len();
        self.failed = pass.failed;
        if pass.cancelled {
            return Ok(self.finish_cancelled(pass.succeeded));
        }

        let report = RunReport::for_run(pass.succeeded, failed, self.progress.total);
        self.finish(report)
    }

    /// Re-run only the failed set, merging successes into the existing
    /// results. Items that fail again replace the failed set.
    pub fn retry_failed(&mut self) -> Result<RunReport, PipelineError> {
        self.ensure_ready()?;
        if self.failed.is_empty() {
            return Err(PipelineError::NothingToRetry);
        }
        let items: Vec<WorkItem> = std::mem::take(&mut self.failed)
            .into_iter()
            .map(WorkItem::from)
            .collect();
        self.error = None;
        tracing::info!(items = items.len(), "retry started");

        let pass = self.process(items);
        if pass.cancelled {
            let mut failed = pass.failed;
            failed.extend(
                pass.untouched
                    .into_iter()
                    .map(|item| item.failed("not retried (cancelled)".to_string())),
            );
            self.failed = failed;
            return Ok(self.finish_cancelled(pass.succeeded));
        }

        let failed = pass.failed.len();
        self.failed = pass.failed;
        let report = RunReport::for_retry(pass.succeeded, failed, self.progress.total);
        self.finish(report)
    }

    fn finish(&mut self, report: RunReport) -> Result<RunReport, PipelineError> {
        self.state = PipelineState::Complete;
        self.error = report.message.clone();
        self.progress.message = "Done".to_string();
        self.emit_progress();
        match &report.message {
            Some(message) => tracing::warn!(succeeded = report.succeeded, failed = report.failed, "{message}"),
            None => tracing::info!(succeeded = report.succeeded, "run complete"),
        }
        Ok(report)
    }

    fn finish_cancelled(&mut self, succeeded: usize) -> RunReport {
        let total = self.progress.total;
        self.state = PipelineState::Idle;
        self.progress = Progress::start(0, CANCELLED_MESSAGE);
        self.emit_progress();
        tracing::info!(succeeded, total, "run cancelled");
        RunReport::cancelled(succeeded, total)
    }

    fn process(&mut self, items: Vec<WorkItem>) -> Pass {
        self.cancel.reset();
        self.progress = Progress::start(items.len(), "Starting");
        self.state = PipelineState::Downloading;
        self.emit_progress();

        let mut pass = Pass {
            succeeded: 0,
            failed: Vec::new(),
            untouched: Vec::new(),
            cancelled: false,
        };
        let mut queue = items.into_iter();
        while let Some(item) = queue.next() {
            if self.cancel.is_cancelled() {
                pass.cancelled = true;
                pass.untouched.push(item);
                pass.untouched.extend(queue);
                break;
            }
            match self.process_item(&item) {
                ItemOutcome::Done(added) => pass.succeeded += added,
                ItemOutcome::Failed(failed) => pass.failed.push(failed),
                ItemOutcome::Cancelled => {
                    pass.cancelled = true;
                    pass.untouched.push(item);
                    pass.untouched.extend(queue);
                    break;
                }
            }
        }
        pass
    }

    fn process_item(&mut self, item: &WorkItem) -> ItemOutcome {
        self.state = PipelineState::Downloading;
        self.progress.message = format!("Downloading {}", item.target_filename);
        self.emit_progress();

        let results = match self.resolver.resolve(&item.source_url) {
            Ok(results) if !results.is_empty() => results,
            Ok(_) => return self.item_failed(item, "no content".to_string()),
            Err(e) => {
                if e.is_request_level() {
                    tracing::warn!(url = loggable_url(&item.source_url), error = %e, "folder link failed");
                } else {
                    tracing::warn!(url = loggable_url(&item.source_url), "download failed");
                }
                return self.item_failed(item, e.to_string());
            }
        };

        if results.len() > 1 {
            self.progress.total += results.len() - 1;
        }
        self.process_results(item, results)
    }

    /// Composite and accumulate the results of one item. Files are committed
    /// only once every result is through, so a cancelled item can be
    /// re-queued whole.
    fn process_results(
        &mut self,
        item: &WorkItem,
        results: impl IntoIterator<Item = DownloadResult>,
    ) -> ItemOutcome {
        let mut finished = Vec::new();
        for result in results {
            if self.cancel.is_cancelled() {
                return ItemOutcome::Cancelled;
            }
            let filename = result
                .filename
                .unwrap_or_else(|| item.target_filename.clone());
            self.state = PipelineState::Processing;
            self.progress.message = format!("Processing {}", filename);
            self.emit_progress();

            if self.frame.is_some() && self.cancel.is_cancelled() {
                return ItemOutcome::Cancelled;
            }
            let composited = apply_frame(&result.bytes, &result.mime_type, self.frame.as_ref());
            finished.push(ProcessedFile::new(filename, composited.bytes, composited.mime_type));
            self.progress.current += 1;
            self.emit_progress();
        }
        let added = finished.len();
        for file in finished {
            push_processed(&mut self.processed, &item.folder_path, file);
        }
        ItemOutcome::Done(added)
    }

    fn item_failed(&mut self, item: &WorkItem, reason: String) -> ItemOutcome {
        self.progress.current += 1;
        self.emit_progress();
        ItemOutcome::Failed(item.clone().failed(reason))
    }
}
