use std::fmt;

use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Checking source tracks against the destination playlist
    Comparing,
    /// Searching the destination for a source track
    Resolving,
    /// Writing a batch of references to the destination playlist
    Applying,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Comparing => "comparing",
            Stage::Resolving => "resolving",
            Stage::Applying => "applying",
        })
    }
}

pub trait ProgressSink {
    /// `current` never exceeds `total`
    fn on_progress(&self, stage: Stage, current: usize, total: usize);
}

impl<F> ProgressSink for F
where
    F: Fn(Stage, usize, usize),
{
    fn on_progress(&self, stage: Stage, current: usize, total: usize) {
        self(stage, current, total)
    }
}

/// Emits progress as tracing events
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn on_progress(&self, stage: Stage, current: usize, total: usize) {
        match stage {
            Stage::Resolving => debug!("[{current}/{total}] {stage}"),
            Stage::Comparing | Stage::Applying => info!("[{current}/{total}] {stage}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[test]
    fn test_closure_sink() {
        let events = RefCell::new(Vec::new());
        let sink = |stage: Stage, current: usize, total: usize| {
            events.borrow_mut().push((stage, current, total))
        };
        sink.on_progress(Stage::Applying, 1, 3);
        assert_eq!(*events.borrow(), vec![(Stage::Applying, 1, 3)]);
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::Resolving.to_string(), "resolving");
    }
}
