use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Instant, SystemTime};
use tracing::info;

use longform::discovery::{self, DiscoveryConfig, DEFAULT_PATTERN};
use longform::parallel_processing::write_stats;
use longform::{
    process_documents_parallel, AbbreviationMap, DocumentOutcome, ProcessingOptions,
    ResolutionPipeline, ResolverConfig, RunStats,
};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    /// Two-column table per document
    Table,
    /// `{path: {abbreviation: expansion}}`
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "longform")]
#[command(about = "Resolve abbreviations in text documents to their full-form expansions")]
#[command(version)]
struct Args {
    /// Documents or directories to process
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Minimum similarity score (0-100) for an expansion to be accepted
    #[arg(long)]
    threshold: Option<u8>,

    /// Context window size as a multiple of the abbreviation length
    #[arg(long)]
    window_multiplier: Option<usize>,

    /// JSON file with resolver configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip parenthetical definitions as a fallback source
    #[arg(long)]
    no_fallback: bool,

    /// Glob pattern for documents inside input directories
    #[arg(long, default_value = DEFAULT_PATTERN)]
    pattern: String,

    /// Reprocess documents whose output already exists
    #[arg(long)]
    overwrite_all: bool,

    /// Abort on first error
    #[arg(long)]
    fail_fast: bool,

    /// Use memory-mapped I/O instead of async buffered
    #[arg(long)]
    use_mmap: bool,

    /// Suppress console progress bars
    #[arg(long)]
    no_progress: bool,

    /// Use parallel directory traversal
    #[arg(long)]
    parallel_discovery: bool,

    /// Output format for resolved abbreviations
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Stats output file path
    #[arg(long, default_value = "run_stats.json")]
    stats_out: PathBuf,
}

/// Load resolver configuration, letting CLI flags override the file
fn load_resolver_config(args: &Args) -> Result<ResolverConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("Invalid config file {}", path.display()))?
        }
        None => ResolverConfig::default(),
    };

    if let Some(threshold) = args.threshold {
        config.threshold = threshold;
    }
    if let Some(multiplier) = args.window_multiplier {
        config.window_multiplier = multiplier;
    }

    config.validate()?;
    Ok(config)
}

fn progress_factory(args: &Args) -> Result<impl Fn(&Path) -> ProgressBar> {
    let multi = (!args.no_progress).then(MultiProgress::new);
    let style = ProgressStyle::with_template("{prefix:>24} [{bar:40}] {pos:>3}% {msg}")?;

    Ok(move |path: &Path| match &multi {
        Some(multi) => {
            let bar = multi.add(ProgressBar::new(100));
            bar.set_style(style.clone());
            bar.set_prefix(
                path.file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default(),
            );
            bar
        }
        None => ProgressBar::hidden(),
    })
}

fn print_table(outcomes: &[DocumentOutcome]) {
    for outcome in outcomes.iter().filter(|o| o.stats.status == "success") {
        println!("{}", outcome.stats.path);
        if outcome.mapping.is_empty() {
            println!("  (no abbreviations resolved)");
            continue;
        }
        let width = outcome.mapping.keys().map(|k| k.chars().count()).max().unwrap_or(0);
        for (abbreviation, expansion) in &outcome.mapping {
            println!("  {abbreviation:<width$}  {expansion}");
        }
    }
}

fn print_json(outcomes: &[DocumentOutcome]) -> Result<()> {
    let by_path: BTreeMap<&str, &AbbreviationMap> = outcomes
        .iter()
        .filter(|o| o.stats.status == "success")
        .map(|o| (o.stats.path.as_str(), &o.mapping))
        .collect();
    println!("{}", serde_json::to_string_pretty(&by_path)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // WHY: logs go to stderr so stdout carries only the resolved abbreviations
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .json()
        .init();

    let args = Args::parse();

    info!("Starting longform");
    info!(?args, "Parsed CLI arguments");

    for input in &args.inputs {
        if !input.exists() {
            anyhow::bail!("Input path does not exist: {}", input.display());
        }
    }

    let resolver_config = load_resolver_config(&args)?;
    let pipeline = Arc::new(ResolutionPipeline::with_defaults(
        resolver_config,
        !args.no_fallback,
    )?);

    let discovery_config = DiscoveryConfig {
        fail_fast: args.fail_fast,
        pattern: args.pattern.clone(),
    };
    let discovered =
        discovery::collect_inputs(&args.inputs, &discovery_config, args.parallel_discovery).await?;

    let (valid, invalid): (Vec<_>, Vec<_>) = discovered.into_iter().partition(|f| f.error.is_none());
    for file in &invalid {
        if let Some(ref error) = file.error {
            info!("Issue with {}: {}", file.path.display(), error);
        }
    }
    info!("Documents to process: {}, with issues: {}", valid.len(), invalid.len());

    let options = ProcessingOptions {
        fail_fast: args.fail_fast,
        overwrite_all: args.overwrite_all,
        use_mmap: args.use_mmap,
        ..ProcessingOptions::default()
    };

    let run_start = SystemTime::now();
    let start_time = Instant::now();
    let paths = valid.into_iter().map(|f| f.path).collect();
    let mut outcomes =
        process_documents_parallel(pipeline, paths, &options, progress_factory(&args)?).await?;
    outcomes.sort_by(|a, b| a.stats.path.cmp(&b.stats.path));

    let stats = RunStats::from_outcomes(run_start, start_time.elapsed().as_millis() as u64, &outcomes);
    write_stats(&args.stats_out, &stats).await?;

    match args.format {
        OutputFormat::Table => {
            print_table(&outcomes);
            println!(
                "Processed {} documents ({} skipped, {} failed), {} abbreviations resolved",
                stats.documents_processed,
                stats.documents_skipped,
                stats.documents_failed,
                stats.total_abbreviations_resolved
            );
        }
        OutputFormat::Json => print_json(&outcomes)?,
    }

    info!(
        "Run completed in {}ms: {} processed, {} skipped, {} failed",
        stats.total_processing_time_ms,
        stats.documents_processed,
        stats.documents_skipped,
        stats.documents_failed
    );
    Ok(())
}
