// Per-page unit of work: cancellation check -> clean -> write

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::clean::{CleanStats, clean_file};
use crate::config::CleanConfig;
use crate::error::CleanError;

/// One image to clean and where its result goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTask {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl PageTask {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        PageTask {
            input: input.into(),
            output: output.into(),
        }
    }
}

/// Shared flag for best-effort cancellation between pages.
///
/// Pages already being cleaned when the flag is raised run to completion.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Result of a single page.
pub struct ProcessedPage {
    pub task: PageTask,
    pub result: crate::error::Result<CleanStats>,
}

/// Clean a single page unless cancellation was requested first.
pub fn process_page(
    task: &PageTask,
    config: &CleanConfig,
    cancel: Option<&CancelFlag>,
) -> ProcessedPage {
    if cancel.is_some_and(CancelFlag::is_cancelled) {
        return ProcessedPage {
            task: task.clone(),
            result: Err(CleanError::Cancelled),
        };
    }

    let result = clean_file(&task.input, &task.output, config);
    if let Err(e) = &result {
        tracing::warn!(input = %task.input.display(), error = %e, "page failed");
    }

    ProcessedPage {
        task: task.clone(),
        result,
    }
}
