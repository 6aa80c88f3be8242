//! Sequential batch processing with running totals.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use brain_core::Brain;
use chrono::{DateTime, Local, TimeDelta};
use serde::Serialize;
use tracing::{info, warn};

use crate::orchestrator::Orchestrator;
use crate::prompt::Segment;
use crate::result::{CompletionOutput, CompletionResult};
use crate::task::Task;

/// Where a document's processing stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStage {
    Load,
    Completion,
}

/// Per-document outcome inside a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DocumentOutcome {
    Succeeded(CompletionOutput),
    Failed { stage: FailureStage, error: String },
}

/// One processed document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentRecord {
    pub filename: String,
    #[serde(flatten)]
    pub outcome: DocumentOutcome,
}

impl DocumentRecord {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, DocumentOutcome::Succeeded(_))
    }

    pub fn cost(&self) -> f64 {
        match &self.outcome {
            DocumentOutcome::Succeeded(output) => output.estimated_cost_usd,
            DocumentOutcome::Failed { .. } => 0.0,
        }
    }
}

/// Accumulated state of a batch run.
///
/// `successful + failed` always equals `records.len()`, and `total_cost`
/// is the sum of the successful records' costs.
#[derive(Debug, Clone, Serialize)]
pub struct BatchRun {
    pub records: Vec<DocumentRecord>,
    pub total_documents: usize,
    pub successful: usize,
    pub failed: usize,
    pub total_cost: f64,
    pub started_at: DateTime<Local>,
    pub finished_at: Option<DateTime<Local>>,
}

impl BatchRun {
    /// Start an empty run for `total_documents` inputs.
    pub fn new(total_documents: usize) -> Self {
        Self {
            records: Vec::with_capacity(total_documents),
            total_documents,
            successful: 0,
            failed: 0,
            total_cost: 0.0,
            started_at: Local::now(),
            finished_at: None,
        }
    }

    pub fn record_success(&mut self, filename: impl Into<String>, output: CompletionOutput) {
        self.successful += 1;
        self.total_cost += output.estimated_cost_usd;
        self.records.push(DocumentRecord {
            filename: filename.into(),
            outcome: DocumentOutcome::Succeeded(output),
        });
    }

    pub fn record_failure(
        &mut self,
        filename: impl Into<String>,
        stage: FailureStage,
        error: impl Into<String>,
    ) {
        self.failed += 1;
        self.records.push(DocumentRecord {
            filename: filename.into(),
            outcome: DocumentOutcome::Failed {
                stage,
                error: error.into(),
            },
        });
    }

    /// Mark the run as finished. Later calls keep the first timestamp.
    pub fn finish(&mut self) {
        if self.finished_at.is_none() {
            self.finished_at = Some(Local::now());
        }
    }

    /// Documents handled so far.
    pub fn processed(&self) -> usize {
        self.records.len()
    }

    /// True when fewer documents were handled than requested.
    pub fn is_partial(&self) -> bool {
        self.processed() < self.total_documents
    }

    /// Elapsed time, up to now if the run has not finished.
    pub fn duration(&self) -> TimeDelta {
        self.finished_at.unwrap_or_else(Local::now) - self.started_at
    }

    /// Mean cost per successful document.
    pub fn average_cost(&self) -> Option<f64> {
        (self.successful > 0).then(|| self.total_cost / self.successful as f64)
    }
}

/// Regular files directly inside `dir`, sorted by name.
///
/// Subdirectories are skipped; extension filtering is left to the loader.
pub fn collect_batch_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}

/// Summarize every path in order, appending to `run`.
///
/// A failing document is recorded and the batch continues. The run is
/// finished only after the last path; a caller that drops this future
/// midway keeps the records gathered so far.
pub async fn run_batch<B: Brain>(orchestrator: &Orchestrator<B>, paths: &[PathBuf], run: &mut BatchRun) {
    let total = paths.len();

    for (index, path) in paths.iter().enumerate() {
        let filename = display_name(path);
        info!("[{}/{}] Processing {}", index + 1, total, filename);

        let doc = match doc_loader::load(path) {
            Ok(doc) => doc,
            Err(e) => {
                warn!("[{}/{}] {} could not be loaded: {}", index + 1, total, filename, e);
                run.record_failure(filename, FailureStage::Load, e.to_string());
                continue;
            }
        };

        match orchestrator
            .complete(Task::BatchSummary, &[Segment::from(doc)])
            .await
        {
            CompletionResult::Success(output) => {
                info!(
                    "[{}/{}] {} done (${:.6})",
                    index + 1,
                    total,
                    filename,
                    output.estimated_cost_usd
                );
                run.record_success(filename, output);
            }
            CompletionResult::Failure { error_message } => {
                warn!("[{}/{}] {} failed: {}", index + 1, total, filename, error_message);
                run.record_failure(filename, FailureStage::Completion, error_message);
            }
        }
    }

    run.finish();
    info!(
        "Batch complete: {}/{} succeeded, total cost ${:.6}",
        run.successful, total, run.total_cost
    );
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
