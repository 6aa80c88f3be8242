use std::error::Error;
use std::future::pending;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use doc_loader::{NormalizedDocument, StructuralCount};
use openai_brain::OpenAiBrain;
use orchestrator::{
    collect_batch_files, format_cost, run_batch, write_batch_json, write_batch_report,
    write_comparison_report, write_export_json, write_synthesis_report, BatchRun, Brain,
    CompletionOutput, CompletionResult, Orchestrator, Task,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const PREVIEW_CHARS: usize = 300;

#[derive(Debug, Parser)]
#[command(name = "docsuite")]
#[command(about = "Summarize, analyze, compare and batch-process documents (.txt, .pdf, .docx)")]
struct Args {
    /// Directory for report files
    #[arg(long, global = true, default_value = ".")]
    out_dir: PathBuf,

    /// Print results without writing report files
    #[arg(long, global = true)]
    no_save: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show format, counts and a short preview without calling the model
    Info { file: PathBuf },
    /// Executive summary of one document
    Summary { file: PathBuf },
    /// Detailed analysis of one document
    Analyze { file: PathBuf },
    /// Structured summary saved as JSON
    Export { file: PathBuf },
    /// Compare exactly two documents
    Compare { first: PathBuf, second: PathBuf },
    /// Synthesize three or more documents
    Synthesize {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Summarize every file in a directory
    Batch {
        #[arg(default_value = "test_documents")]
        dir: PathBuf,
    },
}

#[derive(Debug, Clone)]
struct OutputOptions {
    out_dir: PathBuf,
    save: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let output = OutputOptions {
        out_dir: args.out_dir,
        save: !args.no_save,
    };

    if let Command::Info { file } = &args.command {
        return show_info(file);
    }

    let brain = OpenAiBrain::from_env()?;
    let prices = brain.config().prices;
    info!("Using model {} via {}", brain.config().model, brain.name());
    let orchestrator = Orchestrator::new(brain).with_prices(prices);

    run_command(args.command, &orchestrator, &output).await
}

async fn run_command<B: Brain>(
    command: Command,
    orchestrator: &Orchestrator<B>,
    output: &OutputOptions,
) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Info { file } => show_info(&file),
        Command::Summary { file } => {
            let doc = load_announced(&file)?;
            let result = orchestrator
                .complete_document(Task::ExecutiveSummary, &doc)
                .await;
            print_output("EXECUTIVE SUMMARY", &require_output(result)?);
            Ok(())
        }
        Command::Analyze { file } => {
            let doc = load_announced(&file)?;
            let result = orchestrator
                .complete_document(Task::DetailedAnalysis, &doc)
                .await;
            print_output("DETAILED ANALYSIS", &require_output(result)?);
            Ok(())
        }
        Command::Export { file } => {
            let doc = load_announced(&file)?;
            let result = orchestrator.complete_document(Task::ExportSummary, &doc).await;
            let completion = require_output(result)?;
            print_output("STRUCTURED SUMMARY", &completion);
            if output.save {
                let path = write_export_json(&doc.file_name(), &completion, &output.out_dir)?;
                println!("Saved: {}", path.display());
            }
            Ok(())
        }
        Command::Compare { first, second } => {
            let first = load_announced(&first)?;
            let second = load_announced(&second)?;
            let result = orchestrator.compare(&first, &second).await;
            let completion = require_output(result)?;
            print_output("DOCUMENT COMPARISON", &completion);
            if output.save {
                let path = write_comparison_report(
                    &first.file_name(),
                    &second.file_name(),
                    &completion,
                    &output.out_dir,
                )?;
                println!("Saved: {}", path.display());
            }
            Ok(())
        }
        Command::Synthesize { files } => {
            let docs = files
                .iter()
                .map(|file| load_announced(file))
                .collect::<Result<Vec<_>, _>>()?;
            let result = orchestrator.synthesize(&docs).await;
            let completion = require_output(result)?;
            print_output("MULTI-DOCUMENT SYNTHESIS", &completion);
            if output.save {
                let names: Vec<String> = docs.iter().map(NormalizedDocument::file_name).collect();
                let path = write_synthesis_report(&names, &completion, &output.out_dir)?;
                println!("Saved: {}", path.display());
            }
            Ok(())
        }
        Command::Batch { dir } => {
            let interrupt = async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    warn!("Could not listen for Ctrl+C: {}", e);
                    pending::<()>().await;
                }
            };
            run_batch_command(&dir, orchestrator, output, interrupt).await
        }
    }
}

/// Run a batch until it completes or `interrupt` resolves, then report.
///
/// An interrupted run keeps the documents already processed and is saved
/// like a complete one.
async fn run_batch_command<B, F>(
    dir: &Path,
    orchestrator: &Orchestrator<B>,
    output: &OutputOptions,
    interrupt: F,
) -> Result<(), Box<dyn Error>>
where
    B: Brain,
    F: std::future::Future<Output = ()>,
{
    let paths = collect_batch_files(dir)
        .map_err(|e| format!("cannot read folder {}: {}", dir.display(), e))?;
    if paths.is_empty() {
        println!("No files found in {}", dir.display());
        return Ok(());
    }

    info!("Found {} file(s) in {}", paths.len(), dir.display());
    let mut run = BatchRun::new(paths.len());

    let interrupted = tokio::select! {
        biased;
        () = interrupt => true,
        () = run_batch(orchestrator, &paths, &mut run) => false,
    };
    if interrupted {
        warn!(
            "Batch interrupted after {} of {} documents",
            run.processed(),
            run.total_documents
        );
        run.finish();
    }

    print_batch_summary(&run);

    if output.save && !run.records.is_empty() {
        let json = write_batch_json(&run, &output.out_dir)?;
        let report = write_batch_report(&run, &output.out_dir)?;
        println!("Saved: {}", json.display());
        println!("Saved: {}", report.display());
    }
    Ok(())
}

fn load_announced(path: &Path) -> Result<NormalizedDocument, doc_loader::LoadError> {
    let doc = doc_loader::load(path)?;
    println!("Loaded {} ({} words)", doc.file_name(), doc.word_count());
    Ok(doc)
}

fn require_output(result: CompletionResult) -> Result<CompletionOutput, Box<dyn Error>> {
    match result {
        CompletionResult::Success(output) => Ok(output),
        CompletionResult::Failure { error_message } => Err(error_message.into()),
    }
}

fn show_info(path: &Path) -> Result<(), Box<dyn Error>> {
    let doc = doc_loader::load(path)?;
    println!("File:       {}", doc.file_name());
    println!("Format:     {}", doc.format().as_str());
    println!("Words:      {}", doc.word_count());
    println!("Characters: {}", doc.char_count());
    match doc.structural_count() {
        Some(StructuralCount::Pages(n)) => println!("Pages:      {}", n),
        Some(StructuralCount::Paragraphs(n)) => println!("Paragraphs: {}", n),
        None => {}
    }
    println!("\n{}", doc.preview(PREVIEW_CHARS));
    Ok(())
}

fn print_output(title: &str, output: &CompletionOutput) {
    let rule = "=".repeat(70);
    println!("\n{}\n{}\n{}\n", rule, title, rule);
    println!("{}", output.output_text);
    println!(
        "\n{}\nTokens: {} | Cost: {}",
        rule,
        output.total_tokens,
        format_cost(output.estimated_cost_usd)
    );
}

fn print_batch_summary(run: &BatchRun) {
    let rule = "=".repeat(70);
    let seconds = run.duration().num_seconds().max(0);
    println!("\n{}\nBATCH PROCESSING COMPLETE\n{}", rule, rule);
    println!("Total documents: {}", run.total_documents);
    println!("Successful: {}", run.successful);
    println!("Failed: {}", run.failed);
    println!("Total cost: {}", format_cost(run.total_cost));
    println!("Duration: {}m {}s", seconds / 60, seconds % 60);
    if let Some(average) = run.average_cost() {
        println!("Average cost per doc: {}", format_cost(average));
    }
    println!("{}", rule);
}

#[cfg(test)]
mod tests {
    use super::*;
    use mock_brain::{EchoBrain, StallingBrain};
    use std::fs;
    use std::time::Duration;
    use tempfile::TempDir;

    fn options(dir: &TempDir) -> OutputOptions {
        OutputOptions {
            out_dir: dir.path().join("out"),
            save: true,
        }
    }

    fn saved_files(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .map(|entries| {
                entries
                    .filter_map(Result::ok)
                    .map(|e| e.file_name().to_string_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default();
        names.sort();
        names
    }

    #[test]
    fn test_parse_global_flags_and_defaults() {
        let args = Args::try_parse_from(["docsuite", "batch", "--no-save"]).unwrap();
        assert!(args.no_save);
        assert_eq!(args.out_dir, PathBuf::from("."));
        match args.command {
            Command::Batch { dir } => assert_eq!(dir, PathBuf::from("test_documents")),
            other => panic!("unexpected command: {:?}", other),
        }

        let args =
            Args::try_parse_from(["docsuite", "--out-dir", "reports", "compare", "a.txt", "b.pdf"])
                .unwrap();
        assert_eq!(args.out_dir, PathBuf::from("reports"));
        assert!(matches!(args.command, Command::Compare { .. }));
    }

    #[test]
    fn test_parse_rejects_missing_inputs() {
        assert!(Args::try_parse_from(["docsuite", "synthesize"]).is_err());
        assert!(Args::try_parse_from(["docsuite", "compare", "a.txt"]).is_err());
    }

    #[tokio::test]
    async fn test_export_writes_json() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("notes.txt");
        fs::write(&file, "Some notes.").unwrap();
        let orchestrator = Orchestrator::new(EchoBrain::with_reply("TITLE:\nNotes"));
        let output = options(&dir);

        run_command(Command::Export { file }, &orchestrator, &output)
            .await
            .unwrap();

        let saved = saved_files(&output.out_dir);
        assert_eq!(saved.len(), 1);
        assert!(saved[0].starts_with("summary_json_"));
    }

    #[tokio::test]
    async fn test_synthesize_with_two_files_fails() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        fs::write(&a, "one").unwrap();
        fs::write(&b, "two").unwrap();
        let brain = EchoBrain::new();
        let orchestrator = Orchestrator::new(brain.clone());

        let err = run_command(Command::Synthesize { files: vec![a, b] }, &orchestrator, &options(&dir))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("at least 3"));
        assert!(brain.requests().is_empty());
    }

    #[tokio::test]
    async fn test_batch_saves_both_reports() {
        let dir = TempDir::new().unwrap();
        let docs = dir.path().join("docs");
        fs::create_dir(&docs).unwrap();
        fs::write(docs.join("a.txt"), "alpha").unwrap();
        fs::write(docs.join("b.txt"), "beta").unwrap();
        let orchestrator = Orchestrator::new(EchoBrain::with_reply("summary"));
        let output = options(&dir);

        run_batch_command(&docs, &orchestrator, &output, pending::<()>())
            .await
            .unwrap();

        let saved = saved_files(&output.out_dir);
        assert_eq!(saved.len(), 2);
        assert!(saved[0].starts_with("batch_report_"));
        assert!(saved[1].starts_with("batch_results_"));
    }

    #[tokio::test]
    async fn test_interrupted_batch_saves_nothing_when_empty() {
        let dir = TempDir::new().unwrap();
        let docs = dir.path().join("docs");
        fs::create_dir(&docs).unwrap();
        fs::write(docs.join("a.txt"), "alpha").unwrap();
        let orchestrator = Orchestrator::new(EchoBrain::new());
        let output = options(&dir);

        // Interrupt wins before the first document is processed
        run_batch_command(&docs, &orchestrator, &output, async {})
            .await
            .unwrap();

        assert!(saved_files(&output.out_dir).is_empty());
    }

    #[tokio::test]
    async fn test_interrupted_batch_saves_partial_run() {
        let dir = TempDir::new().unwrap();
        let docs = dir.path().join("docs");
        fs::create_dir(&docs).unwrap();
        fs::write(docs.join("a.txt"), "alpha").unwrap();
        fs::write(docs.join("b.txt"), "beta").unwrap();
        fs::write(docs.join("c.txt"), "gamma").unwrap();
        let brain = StallingBrain::after(1, EchoBrain::with_reply("summary of a"));
        let orchestrator = Orchestrator::new(brain.clone());
        let output = options(&dir);

        // The second document hangs until the interrupt fires
        run_batch_command(
            &docs,
            &orchestrator,
            &output,
            tokio::time::sleep(Duration::from_millis(200)),
        )
        .await
        .unwrap();

        assert_eq!(brain.calls(), 2);
        let saved = saved_files(&output.out_dir);
        assert_eq!(saved.len(), 2);
        assert!(saved[0].starts_with("batch_report_"));
        assert!(saved[1].starts_with("batch_results_"));

        let report = fs::read_to_string(output.out_dir.join(&saved[0])).unwrap();
        assert!(report.contains("Interrupted: 1 of 3 documents processed"));
        assert!(report.contains("DOCUMENT 1: a.txt"));
        assert!(report.contains("summary of a"));
        assert!(!report.contains("b.txt"));

        let json = fs::read_to_string(output.out_dir.join(&saved[1])).unwrap();
        assert!(json.contains("\"total_documents\": 3"));
        assert!(json.contains("\"successful\": 1"));
    }

    #[tokio::test]
    async fn test_batch_missing_folder() {
        let dir = TempDir::new().unwrap();
        let orchestrator = Orchestrator::new(EchoBrain::new());

        let err = run_batch_command(
            &dir.path().join("missing"),
            &orchestrator,
            &options(&dir),
            pending::<()>(),
        )
        .await
        .unwrap_err();

        assert!(err.to_string().starts_with("cannot read folder"));
    }
}
