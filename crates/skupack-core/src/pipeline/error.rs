use thiserror::Error;

use super::state::PipelineState;
use crate::archive::ArchiveError;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Single-flight: another operation is still in progress.
    #[error("pipeline is busy ({0})")]
    Busy(PipelineState),
    #[error("no catalogs to process")]
    NothingToProcess,
    #[error("no failed downloads to retry")]
    NothingToRetry,
    #[error("no processed files to package")]
    NothingToPackage,
    #[error("could not write archive: {0}")]
    Archive(#[from] ArchiveError),
}
