use std::fmt;

/// Pipeline lifecycle. `Parsing`, `Downloading`, `Processing` and `Zipping`
/// are active; a new run may only start from the others.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PipelineState {
    #[default]
    Idle,
    Parsing,
    Downloading,
    Processing,
    Zipping,
    Complete,
    Error,
}

impl PipelineState {
    pub fn is_active(self) -> bool {
        matches!(
            self,
            PipelineState::Parsing
                | PipelineState::Downloading
                | PipelineState::Processing
                | PipelineState::Zipping
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PipelineState::Idle => "idle",
            PipelineState::Parsing => "parsing",
            PipelineState::Downloading => "downloading",
            PipelineState::Processing => "processing",
            PipelineState::Zipping => "zipping",
            PipelineState::Complete => "complete",
            PipelineState::Error => "error",
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
