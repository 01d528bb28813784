//! Run summaries and their user-facing messages.

/// How a run (or retry pass) ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every item succeeded.
    Complete,
    /// Some items failed; they are in the failed set.
    PartialFailure,
    /// Nothing succeeded.
    TotalFailure,
    /// Stopped early; partial results kept.
    Cancelled,
}

/// Summary of a run or retry pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub outcome: RunOutcome,
    pub succeeded: usize,
    pub failed: usize,
    /// Work units discovered (catalog files plus folder expansions).
    pub total: usize,
    /// Error message shown to the user, if any.
    pub message: Option<String>,
}

impl RunReport {
    pub(crate) fn for_run(succeeded: usize, failed: usize, total: usize) -> Self {
        let (outcome, message) = if failed == 0 {
            (RunOutcome::Complete, None)
        } else if succeeded == 0 {
            (
                RunOutcome::TotalFailure,
                Some(format!(
                    "All {total} downloads failed. The files may require Google account access or are not publicly shared."
                )),
            )
        } else {
            (
                RunOutcome::PartialFailure,
                Some(format!("{failed} of {total} files failed to download.")),
            )
        };
        Self {
            outcome,
            succeeded,
            failed,
            total,
            message,
        }
    }

    pub(crate) fn for_retry(succeeded: usize, failed: usize, total: usize) -> Self {
        let outcome = match (succeeded, failed) {
            (_, 0) => RunOutcome::Complete,
            (0, _) => RunOutcome::TotalFailure,
            _ => RunOutcome::PartialFailure,
        };
        let message = (failed > 0).then(|| {
            format!("{failed} files still failed. They may require Google account access.")
        });
        Self {
            outcome,
            succeeded,
            failed,
            total,
            message,
        }
    }

    pub(crate) fn cancelled(succeeded: usize, total: usize) -> Self {
        Self {
            outcome: RunOutcome::Cancelled,
            succeeded,
            failed: 0,
            total,
            message: None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.outcome == RunOutcome::Cancelled
    }
}
