// Batch fan-out: independent pages on a bounded rayon pool, results in input order

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;

use crate::clean::CleanStats;
use crate::config::CleanConfig;
use crate::error::CleanError;
use crate::pipeline::page_processor::{CancelFlag, PageTask, ProcessedPage, process_page};

/// How a batch is executed.
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Worker threads; 0 lets rayon decide.
    pub parallel_workers: usize,
    pub cancel: Option<CancelFlag>,
}

/// Final state of one page.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PageStatus {
    Cleaned { stats: CleanStats },
    Failed { error: String },
    Cancelled,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageReport {
    pub input: PathBuf,
    pub output: PathBuf,
    #[serde(flatten)]
    pub status: PageStatus,
}

/// Per-page outcomes of a batch, in input order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub pages: Vec<PageReport>,
}

impl BatchReport {
    pub fn succeeded(&self) -> impl Iterator<Item = &PageReport> {
        self.pages
            .iter()
            .filter(|p| matches!(p.status, PageStatus::Cleaned { .. }))
    }

    pub fn failed(&self) -> impl Iterator<Item = &PageReport> {
        self.pages
            .iter()
            .filter(|p| matches!(p.status, PageStatus::Failed { .. }))
    }

    pub fn cancelled(&self) -> impl Iterator<Item = &PageReport> {
        self.pages
            .iter()
            .filter(|p| matches!(p.status, PageStatus::Cancelled))
    }

    /// True when every page was cleaned.
    pub fn is_success(&self) -> bool {
        self.succeeded().count() == self.pages.len()
    }

    /// Write the report as pretty-printed JSON.
    pub fn write_json(&self, path: &Path) -> crate::error::Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| CleanError::encode(path, e))?;
        std::fs::write(path, json).map_err(|e| CleanError::write(path, e))
    }
}

impl From<ProcessedPage> for PageReport {
    fn from(page: ProcessedPage) -> Self {
        let status = match page.result {
            Ok(stats) => PageStatus::Cleaned { stats },
            Err(CleanError::Cancelled) => PageStatus::Cancelled,
            Err(e) => PageStatus::Failed {
                error: e.to_string(),
            },
        };
        PageReport {
            input: page.task.input,
            output: page.task.output,
            status,
        }
    }
}

/// Clean every task, collecting results.
/// One page failure does NOT prevent other pages from running.
///
/// Fails only if the worker pool cannot be built.
pub fn run_batch(
    tasks: &[PageTask],
    config: &CleanConfig,
    options: &BatchOptions,
) -> crate::error::Result<BatchReport> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.parallel_workers)
        .build()
        .map_err(|e| CleanError::invalid_argument(format!("worker pool: {e}")))?;

    let cancel = options.cancel.as_ref();
    let processed: Vec<ProcessedPage> = pool.install(|| {
        tasks
            .par_iter()
            .map(|task| process_page(task, config, cancel))
            .collect()
    });

    let report = BatchReport {
        pages: processed.into_iter().map(PageReport::from).collect(),
    };

    tracing::info!(
        pages = report.pages.len(),
        succeeded = report.succeeded().count(),
        failed = report.failed().count(),
        cancelled = report.cancelled().count(),
        "batch finished"
    );
    Ok(report)
}
