//! pdfedit - Merge PDF files and split PDFs into page ranges.

mod cli;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, MergeArgs, OutputArgs, SplitArgs};
use pdfedit::config::{MergeConfig, SplitConfig};
use pdfedit::error::{PdfEditError, Result};
use pdfedit::io::{PdfReader, PdfWriter};
use pdfedit::merge::Merger;
use pdfedit::output::{
    MERGE_SUCCESS_MESSAGE, OutputFormatter, SPLIT_SUCCESS_MESSAGE, display_merge_plan,
    display_merge_statistics, display_split_plan, display_split_statistics,
};
use pdfedit::split::{SplitOutput, Splitter, plan_split};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.output);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start the async runtime")?;

    let code = runtime.block_on(run(cli));
    drop(runtime);

    if code != 0 {
        process::exit(code);
    }
    Ok(())
}

/// Log to stderr, honoring `RUST_LOG` over the verbosity flags.
fn init_tracing(output: &OutputArgs) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(output.log_filter()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Run one subcommand and return the process exit code.
async fn run(cli: Cli) -> i32 {
    let formatter = cli.output.formatter();
    let operation = cli.command.operation();

    let result = match cli.command {
        Command::Merge(args) => run_merge(args, &cli.output, &formatter).await,
        Command::Split(args) => run_split(args, &cli.output, &formatter).await,
    };

    match result {
        Ok(()) => 0,
        Err(err) => {
            error!(error = %err, kind = ?err.kind(), "failed to {operation}");
            formatter.error(&err.user_message(operation));
            err.exit_code()
        }
    }
}

async fn run_merge(args: MergeArgs, output: &OutputArgs, formatter: &OutputFormatter) -> Result<()> {
    let mut inputs = args.expand_inputs()?;
    if let Some(list) = &args.input_list {
        inputs.extend(read_input_list(list).await?);
    }

    let (config, duplicates) = args.to_config(inputs);
    for duplicate in &duplicates {
        formatter.warning(&format!(
            "Skipping duplicate input: {}",
            duplicate.display()
        ));
    }

    config.validate()?;

    if config.dry_run {
        return preview_merge(&config, output, formatter).await;
    }

    formatter.info(&format!("Merging {} files...", config.inputs.len()));

    let merger = Merger::with_writer(PdfWriter::with_options(config.write.clone()));
    let inputs = config.inputs.paths().to_vec();
    let target = config.output.clone();
    let stats = blocking(move || merger.merge(&inputs, &target)).await?;

    if output.json {
        print_json(&stats)?;
    } else {
        display_merge_statistics(formatter, &stats);
        formatter.success(MERGE_SUCCESS_MESSAGE);
    }

    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MergePlan<'a> {
    inputs: &'a [PathBuf],
    pages_per_file: Vec<usize>,
    total_pages: usize,
    output: &'a Path,
}

async fn preview_merge(
    config: &MergeConfig,
    output: &OutputArgs,
    formatter: &OutputFormatter,
) -> Result<()> {
    let inputs = config.inputs.paths().to_vec();
    let pages_per_file = blocking(move || {
        let reader = PdfReader::new();
        inputs
            .iter()
            .map(|path| reader.page_count(path))
            .collect::<Result<Vec<_>>>()
    })
    .await?;

    if output.json {
        return print_json(&MergePlan {
            inputs: config.inputs.paths(),
            total_pages: pages_per_file.iter().sum(),
            pages_per_file,
            output: &config.output,
        });
    }

    formatter.section("Dry run");
    display_merge_plan(formatter, config.inputs.paths(), &pages_per_file, &config.output);
    formatter.blank_line();
    formatter.success("Dry run completed successfully");
    formatter.info("  Run without --dry-run to create the merged PDF");
    Ok(())
}

async fn run_split(args: SplitArgs, output: &OutputArgs, formatter: &OutputFormatter) -> Result<()> {
    // Range syntax is checked here, before any file is touched.
    let config = args.to_config()?;
    config.validate()?;

    let prefix = config.output_prefix()?;
    debug!(prefix = %prefix.display(), ranges = config.ranges.len(), "split outputs");

    if config.dry_run {
        return preview_split(&config, &prefix, output, formatter).await;
    }

    formatter.info(&format!("Splitting {}...", config.input.display()));

    let splitter = Splitter::with_writer(PdfWriter::with_options(config.write.clone()));
    let input = config.input.clone();
    let ranges = config.ranges.clone();
    let stats = blocking(move || splitter.split(&input, &ranges, &prefix)).await?;

    if output.json {
        print_json(&stats)?;
    } else {
        display_split_statistics(formatter, &stats);
        formatter.success(SPLIT_SUCCESS_MESSAGE);
    }

    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SplitPlan<'a> {
    input: &'a Path,
    source_pages: usize,
    outputs: Vec<SplitOutput>,
}

async fn preview_split(
    config: &SplitConfig,
    prefix: &Path,
    output: &OutputArgs,
    formatter: &OutputFormatter,
) -> Result<()> {
    let input = config.input.clone();
    let source_pages = blocking(move || PdfReader::new().page_count(&input)).await?;
    let plan = plan_split(&config.ranges, source_pages, prefix);

    if output.json {
        return print_json(&SplitPlan {
            input: &config.input,
            source_pages,
            outputs: plan,
        });
    }

    formatter.section("Dry run");
    display_split_plan(formatter, source_pages, &plan);
    formatter.blank_line();
    formatter.success("Dry run completed successfully");
    formatter.info("  Run without --dry-run to write the files");
    Ok(())
}

/// Run synchronous PDF work off the async executor.
async fn blocking<T, F>(work: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| PdfEditError::other(format!("Worker task failed: {e}")))?
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| PdfEditError::other(format!("Failed to serialize result: {e}")))?;
    println!("{json}");
    Ok(())
}

/// Read input paths from a file, or from stdin when `path` is `-`.
///
/// One path per line. Blank lines and lines starting with `#` are skipped.
async fn read_input_list(path: &Path) -> Result<Vec<PathBuf>> {
    use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

    let read_error = |source| PdfEditError::FailedToReadInputList {
        path: path.to_path_buf(),
        source,
    };

    let reader: Box<dyn AsyncBufRead + Unpin + Send> = if path.as_os_str() == "-" {
        Box::new(BufReader::new(tokio::io::stdin()))
    } else {
        let file = tokio::fs::File::open(path).await.map_err(read_error)?;
        Box::new(BufReader::new(file))
    };

    let mut lines = reader.lines();
    let mut paths = Vec::new();
    let mut line_number = 0;

    while let Some(line) = lines.next_line().await.map_err(read_error)? {
        line_number += 1;
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.contains('\0') {
            return Err(PdfEditError::InvalidInputList {
                path: path.to_path_buf(),
                line_number,
                details: "Path contains a NUL byte".to_string(),
            });
        }

        paths.push(PathBuf::from(line));
    }

    debug!(count = paths.len(), list = %path.display(), "read input list");
    Ok(paths)
}
