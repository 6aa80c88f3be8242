//! Timestamped report files for batch, comparison, synthesis and export runs.
//!
//! Every writer renders into a `String` first (the `render_*` functions are
//! pure and take the generation time) and then writes
//! `<kind>_<YYYYMMDD_HHMMSS>.<ext>` into the given directory.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::info;

use crate::batch::{BatchRun, DocumentOutcome, DocumentRecord};
use crate::error::ReportError;
use crate::result::CompletionOutput;
use crate::sections::parse_sections;

const RULE_WIDTH: usize = 70;

/// `<kind>_<YYYYMMDD_HHMMSS>.<ext>`
pub fn timestamped_filename(kind: &str, ext: &str, at: &DateTime<Local>) -> String {
    format!("{}_{}.{}", kind, at.format("%Y%m%d_%H%M%S"), ext)
}

/// Dollar amount with six decimals, e.g. `$0.000270`.
pub fn format_cost(cost: f64) -> String {
    format!("${:.6}", cost)
}

fn format_generated(at: &DateTime<Local>) -> String {
    at.format("%Y-%m-%d %H:%M:%S").to_string()
}

fn heavy_rule() -> String {
    "=".repeat(RULE_WIDTH)
}

fn light_rule() -> String {
    "-".repeat(RULE_WIDTH)
}

fn write_report(
    out_dir: &Path,
    kind: &str,
    ext: &str,
    at: &DateTime<Local>,
    contents: &str,
) -> Result<PathBuf, ReportError> {
    fs::create_dir_all(out_dir)?;
    let path = out_dir.join(timestamped_filename(kind, ext, at));
    fs::write(&path, contents)?;
    info!("Saved {} to {}", kind, path.display());
    Ok(path)
}

#[derive(Serialize)]
struct BatchStatistics {
    total_documents: usize,
    successful: usize,
    failed: usize,
    total_cost: String,
}

#[derive(Serialize)]
struct BatchResultsFile<'a> {
    timestamp: String,
    statistics: BatchStatistics,
    results: &'a [DocumentRecord],
}

/// Pretty JSON with run statistics and every per-document record.
pub fn render_batch_json(run: &BatchRun, at: &DateTime<Local>) -> Result<String, ReportError> {
    let file = BatchResultsFile {
        timestamp: at.to_rfc3339(),
        statistics: BatchStatistics {
            total_documents: run.total_documents,
            successful: run.successful,
            failed: run.failed,
            total_cost: format_cost(run.total_cost),
        },
        results: &run.records,
    };
    Ok(serde_json::to_string_pretty(&file)?)
}

/// Plain-text report listing each document's summary or failure.
pub fn render_batch_report(run: &BatchRun, at: &DateTime<Local>) -> String {
    let mut out = String::new();
    let heavy = heavy_rule();
    let light = light_rule();

    let _ = writeln!(out, "{}", heavy);
    let _ = writeln!(out, "BATCH PROCESSING REPORT");
    let _ = writeln!(out, "Generated: {}", format_generated(at));
    let _ = writeln!(out, "{}\n", heavy);

    let _ = writeln!(out, "Total Documents: {}", run.total_documents);
    let _ = writeln!(out, "Successfully Processed: {}", run.successful);
    let _ = writeln!(out, "Failed: {}", run.failed);
    let _ = writeln!(out, "Total Cost: {}", format_cost(run.total_cost));
    if run.is_partial() {
        let _ = writeln!(
            out,
            "Interrupted: {} of {} documents processed",
            run.processed(),
            run.total_documents
        );
    }
    let _ = writeln!(out, "\n{}\n", heavy);

    for (i, record) in run.records.iter().enumerate() {
        let _ = writeln!(out, "DOCUMENT {}: {}", i + 1, record.filename);
        let _ = writeln!(out, "{}", light);
        match &record.outcome {
            DocumentOutcome::Succeeded(output) => {
                let _ = writeln!(out, "{}", output.output_text);
                let _ = writeln!(
                    out,
                    "Tokens: {} | Cost: {}",
                    output.total_tokens,
                    format_cost(output.estimated_cost_usd)
                );
            }
            DocumentOutcome::Failed { error, .. } => {
                let _ = writeln!(out, "FAILED: {}", error);
            }
        }
        let _ = writeln!(out, "{}\n", heavy);
    }

    out
}

/// Plain-text comparison of two named documents.
pub fn render_comparison_report(
    first: &str,
    second: &str,
    output: &CompletionOutput,
    at: &DateTime<Local>,
) -> String {
    let heavy = heavy_rule();
    format!(
        "{heavy}\nDOCUMENT COMPARISON\nGenerated: {}\n{heavy}\n\n\
         Document 1: {first}\nDocument 2: {second}\n\n{}\n\n{}\n\n{heavy}\nCost: {}\n",
        format_generated(at),
        light_rule(),
        output.output_text,
        format_cost(output.estimated_cost_usd),
    )
}

/// Plain-text synthesis across the named documents.
pub fn render_synthesis_report(
    names: &[String],
    output: &CompletionOutput,
    at: &DateTime<Local>,
) -> String {
    let heavy = heavy_rule();
    let mut out = String::new();

    let _ = writeln!(out, "{}", heavy);
    let _ = writeln!(out, "MULTI-DOCUMENT SYNTHESIS");
    let _ = writeln!(out, "Generated: {}", format_generated(at));
    let _ = writeln!(out, "{}\n", heavy);
    let _ = writeln!(out, "Documents synthesized: {}", names.len());
    for name in names {
        let _ = writeln!(out, "  - {}", name);
    }
    let _ = writeln!(out, "\n{}\n", light_rule());
    let _ = writeln!(out, "{}", output.output_text);
    let _ = writeln!(out, "\n{}", heavy);
    let _ = writeln!(out, "Cost: {}", format_cost(output.estimated_cost_usd));

    out
}

#[derive(Serialize)]
struct ExportMetadata<'a> {
    original_document: &'a str,
    generated: String,
    tokens_used: u32,
    cost: String,
}

#[derive(Serialize)]
struct ExportFile<'a> {
    metadata: ExportMetadata<'a>,
    summary: IndexMap<String, String>,
    full_text: &'a str,
}

/// Pretty JSON holding parsed sections alongside the full text.
pub fn render_export_json(
    original_document: &str,
    output: &CompletionOutput,
    at: &DateTime<Local>,
) -> Result<String, ReportError> {
    let file = ExportFile {
        metadata: ExportMetadata {
            original_document,
            generated: at.to_rfc3339(),
            tokens_used: output.total_tokens,
            cost: format_cost(output.estimated_cost_usd),
        },
        summary: parse_sections(&output.output_text),
        full_text: &output.output_text,
    };
    Ok(serde_json::to_string_pretty(&file)?)
}

/// Write `batch_results_<ts>.json`.
pub fn write_batch_json(run: &BatchRun, out_dir: &Path) -> Result<PathBuf, ReportError> {
    let now = Local::now();
    let contents = render_batch_json(run, &now)?;
    write_report(out_dir, "batch_results", "json", &now, &contents)
}

/// Write `batch_report_<ts>.txt`.
pub fn write_batch_report(run: &BatchRun, out_dir: &Path) -> Result<PathBuf, ReportError> {
    let now = Local::now();
    write_report(out_dir, "batch_report", "txt", &now, &render_batch_report(run, &now))
}

/// Write `comparison_<ts>.txt`.
pub fn write_comparison_report(
    first: &str,
    second: &str,
    output: &CompletionOutput,
    out_dir: &Path,
) -> Result<PathBuf, ReportError> {
    let now = Local::now();
    let contents = render_comparison_report(first, second, output, &now);
    write_report(out_dir, "comparison", "txt", &now, &contents)
}

/// Write `synthesis_<ts>.txt`.
pub fn write_synthesis_report(
    names: &[String],
    output: &CompletionOutput,
    out_dir: &Path,
) -> Result<PathBuf, ReportError> {
    let now = Local::now();
    let contents = render_synthesis_report(names, output, &now);
    write_report(out_dir, "synthesis", "txt", &now, &contents)
}

/// Write `summary_json_<ts>.json`.
pub fn write_export_json(
    original_document: &str,
    output: &CompletionOutput,
    out_dir: &Path,
) -> Result<PathBuf, ReportError> {
    let now = Local::now();
    let contents = render_export_json(original_document, output, &now)?;
    write_report(out_dir, "summary_json", "json", &now, &contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::FailureStage;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap()
    }

    fn output(text: &str, cost: f64) -> CompletionOutput {
        CompletionOutput {
            output_text: text.to_string(),
            prompt_tokens: 1000,
            completion_tokens: 200,
            total_tokens: 1200,
            estimated_cost_usd: cost,
            model: "gpt-4o-mini".to_string(),
        }
    }

    fn sample_run() -> BatchRun {
        let mut run = BatchRun::new(2);
        run.record_success("a.txt", output("Summary of A.", 0.00027));
        run.record_failure("b.csv", FailureStage::Load, "unsupported file type: .csv");
        run.finish();
        run
    }

    #[test]
    fn test_timestamped_filename() {
        assert_eq!(
            timestamped_filename("batch_results", "json", &fixed_time()),
            "batch_results_20240309_140507.json"
        );
    }

    #[test]
    fn test_format_cost() {
        assert_eq!(format_cost(0.00027), "$0.000270");
        assert_eq!(format_cost(0.0), "$0.000000");
    }

    #[test]
    fn test_batch_json_shape() {
        let json = render_batch_json(&sample_run(), &fixed_time()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["statistics"]["total_documents"], 2);
        assert_eq!(value["statistics"]["successful"], 1);
        assert_eq!(value["statistics"]["failed"], 1);
        assert_eq!(value["statistics"]["total_cost"], "$0.000270");
        assert_eq!(value["results"][0]["status"], "succeeded");
        assert_eq!(value["results"][0]["output_text"], "Summary of A.");
        assert_eq!(value["results"][1]["error"], "unsupported file type: .csv");
    }

    #[test]
    fn test_batch_report_text() {
        let report = render_batch_report(&sample_run(), &fixed_time());

        assert!(report.contains("Generated: 2024-03-09 14:05:07"));
        assert!(report.contains("Total Documents: 2"));
        assert!(report.contains("Successfully Processed: 1"));
        assert!(report.contains("Total Cost: $0.000270"));
        assert!(report.contains("DOCUMENT 1: a.txt"));
        assert!(report.contains("Tokens: 1200 | Cost: $0.000270"));
        assert!(report.contains("DOCUMENT 2: b.csv"));
        assert!(report.contains("FAILED: unsupported file type: .csv"));
        assert!(!report.contains("Interrupted"));
    }

    #[test]
    fn test_partial_batch_report_is_marked() {
        let mut run = BatchRun::new(3);
        run.record_success("a.txt", output("A", 0.001));
        run.finish();

        let report = render_batch_report(&run, &fixed_time());
        assert!(report.contains("Interrupted: 1 of 3 documents processed"));
    }

    #[test]
    fn test_comparison_and_synthesis_reports() {
        let comparison =
            render_comparison_report("one.txt", "two.pdf", &output("Alike.", 0.0005), &fixed_time());
        assert!(comparison.starts_with(&"=".repeat(70)));
        assert!(comparison.contains("DOCUMENT COMPARISON"));
        assert!(comparison.contains("Document 1: one.txt\nDocument 2: two.pdf"));
        assert!(comparison.contains("Alike."));
        assert!(comparison.ends_with("Cost: $0.000500\n"));

        let names = vec!["a.txt".to_string(), "b.txt".to_string(), "c.txt".to_string()];
        let synthesis = render_synthesis_report(&names, &output("Unified.", 0.001), &fixed_time());
        assert!(synthesis.contains("Documents synthesized: 3\n  - a.txt\n  - b.txt\n  - c.txt"));
        assert!(synthesis.contains("Unified."));
        assert!(synthesis.ends_with("Cost: $0.001000\n"));
    }

    #[test]
    fn test_export_json_sections() {
        let text = "TITLE:\nQuarterly Review\nKEY POINTS:\n- Up\n- Down";
        let json = render_export_json("report.pdf", &output(text, 0.0004), &fixed_time()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["metadata"]["original_document"], "report.pdf");
        assert_eq!(value["metadata"]["tokens_used"], 1200);
        assert_eq!(value["metadata"]["cost"], "$0.000400");
        assert_eq!(value["summary"]["TITLE"], "Quarterly Review");
        assert_eq!(value["summary"]["KEY POINTS"], "- Up\n- Down");
        assert_eq!(value["full_text"], text);
    }

    #[test]
    fn test_writers_create_timestamped_files() {
        let dir = TempDir::new().unwrap();
        let out_dir = dir.path().join("reports");
        let run = sample_run();

        let json_path = write_batch_json(&run, &out_dir).unwrap();
        let txt_path = write_batch_report(&run, &out_dir).unwrap();

        let json_name = json_path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(json_name.starts_with("batch_results_"));
        assert!(json_name.ends_with(".json"));
        // batch_results_YYYYMMDD_HHMMSS.json
        assert_eq!(json_name.len(), "batch_results_".len() + 15 + ".json".len());

        let txt = fs::read_to_string(&txt_path).unwrap();
        assert!(txt.contains("BATCH PROCESSING REPORT"));

        let export = write_export_json("a.txt", &output("TITLE:\nX", 0.0), &out_dir).unwrap();
        assert!(export.exists());
    }
}
