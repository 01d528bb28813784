//! Progress snapshots for a pipeline run.

/// Running (current, total) count plus a human-readable step message.
/// `total` grows when a folder link expands into several files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
    pub message: String,
}

impl Progress {
    pub fn start(total: usize, message: impl Into<String>) -> Self {
        Self {
            current: 0,
            total,
            message: message.into(),
        }
    }

    /// Fraction complete in [0.0, 1.0].
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.current as f64 / self.total as f64).min(1.0)
    }

    /// Whole-number percentage for display.
    pub fn percent(&self) -> u32 {
        (self.fraction() * 100.0).round() as u32
    }
}
