// WHY: Batch processing across documents for the CLI, integration tests, and benchmarks
// Documents share nothing, so each one is read, resolved, rendered, and saved independently

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt, TryStreamExt};
use indicatif::ProgressBar;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};

use crate::document::TextDocument;
use crate::incremental::{generate_output_path, should_process_document};
use crate::long_form::{LongFormDetector, NoLongForms, ParentheticalDetector};
use crate::reader::{DocumentReader, ReaderConfig};
use crate::resolver::{
    AbbreviationMap, AbbreviationResolver, ProgressObserver, Resolution, ResolveError,
    ResolverConfig,
};
use crate::tokenizer::{TokenSource, WhitespaceTokenizer};

/// Progress position once the document text is loaded
pub const MILESTONE_LOADED: u64 = 20;
/// Progress position once the abbreviation table is rendered
pub const MILESTONE_RENDERED: u64 = 90;
/// Progress position once the output is saved
pub const MILESTONE_SAVED: u64 = 100;

/// Per-document processing statistics
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DocumentStats {
    /// Document path as given or discovered
    pub path: String,
    /// Number of characters processed
    pub chars_processed: u64,
    /// Distinct abbreviation-shaped tokens found
    pub abbreviations_detected: u64,
    /// Entries resolved by alignment scoring
    pub primary_resolved: u64,
    /// Entries added from parenthetical definitions
    pub fallback_added: u64,
    /// Processing time in milliseconds
    pub processing_time_ms: u64,
    /// Processing status (success, skipped, failed)
    pub status: String,
    /// Error message if processing failed
    pub error: Option<String>,
}

impl DocumentStats {
    fn skipped(path: String) -> Self {
        Self {
            path,
            chars_processed: 0,
            abbreviations_detected: 0,
            primary_resolved: 0,
            fallback_added: 0,
            processing_time_ms: 0,
            status: "skipped".to_string(),
            error: None,
        }
    }

    fn failed(path: String, error: String, processing_time_ms: u64) -> Self {
        Self {
            status: "failed".to_string(),
            error: Some(error),
            processing_time_ms,
            ..Self::skipped(path)
        }
    }
}

/// Whole-run statistics written to the stats file
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RunStats {
    /// Run start as seconds since the Unix epoch
    pub run_start: u64,
    pub total_processing_time_ms: u64,
    pub total_chars_processed: u64,
    pub total_abbreviations_resolved: u64,
    pub documents_processed: u64,
    pub documents_skipped: u64,
    pub documents_failed: u64,
    pub document_stats: Vec<DocumentStats>,
}

impl RunStats {
    pub fn from_outcomes(run_start: SystemTime, elapsed_ms: u64, outcomes: &[DocumentOutcome]) -> Self {
        let count = |status: &str| outcomes.iter().filter(|o| o.stats.status == status).count() as u64;

        Self {
            run_start: run_start
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
            total_processing_time_ms: elapsed_ms,
            total_chars_processed: outcomes.iter().map(|o| o.stats.chars_processed).sum(),
            total_abbreviations_resolved: outcomes.iter().map(|o| o.mapping.len() as u64).sum(),
            documents_processed: count("success"),
            documents_skipped: count("skipped"),
            documents_failed: count("failed"),
            document_stats: outcomes.iter().map(|o| o.stats.clone()).collect(),
        }
    }
}

/// Result of processing one document
#[derive(Debug, Clone)]
pub struct DocumentOutcome {
    pub stats: DocumentStats,
    pub mapping: AbbreviationMap,
    /// Where the rendered document was written, if it was
    pub output_path: Option<PathBuf>,
}

/// Host-side processing knobs
#[derive(Debug, Clone)]
pub struct ProcessingOptions {
    /// Abort the batch on the first per-document error
    pub fail_fast: bool,
    /// Reprocess documents whose output already exists
    pub overwrite_all: bool,
    pub use_mmap: bool,
    /// Documents processed concurrently
    pub concurrency: usize,
}

impl Default for ProcessingOptions {
    fn default() -> Self {
        Self {
            fail_fast: false,
            overwrite_all: false,
            use_mmap: false,
            concurrency: num_cpus::get(),
        }
    }
}

/// Resolver plus the collaborators it needs for a full text pass
pub struct ResolutionPipeline {
    resolver: AbbreviationResolver,
    tokenizer: Box<dyn TokenSource>,
    secondary: Box<dyn LongFormDetector>,
}

impl ResolutionPipeline {
    pub fn new(
        resolver: AbbreviationResolver,
        tokenizer: Box<dyn TokenSource>,
        secondary: Box<dyn LongFormDetector>,
    ) -> Self {
        Self {
            resolver,
            tokenizer,
            secondary,
        }
    }

    /// Whitespace tokenizer, with or without parenthetical fallback definitions
    pub fn with_defaults(config: ResolverConfig, use_fallback: bool) -> Result<Self, ResolveError> {
        let secondary: Box<dyn LongFormDetector> = if use_fallback {
            Box::new(ParentheticalDetector::new())
        } else {
            Box::new(NoLongForms)
        };
        Ok(Self::new(
            AbbreviationResolver::new(config)?,
            Box::new(WhitespaceTokenizer::new()),
            secondary,
        ))
    }

    pub fn resolve(&self, text: &str, observer: &dyn ProgressObserver) -> Resolution {
        self.resolver
            .resolve_text(text, self.tokenizer.as_ref(), self.secondary.as_ref(), observer)
    }
}

/// Process one document: read, resolve, render the table, and save next to the source
///
/// Per-document failures become `failed` stats unless `fail_fast` is set.
pub async fn process_document(
    pipeline: Arc<ResolutionPipeline>,
    path: PathBuf,
    options: ProcessingOptions,
    progress: ProgressBar,
) -> Result<DocumentOutcome> {
    let start_time = Instant::now();
    let display_path = path.display().to_string();

    if !should_process_document(&path, options.overwrite_all) {
        info!("Skipping {}: output already exists", display_path);
        progress.finish_and_clear();
        return Ok(DocumentOutcome {
            stats: DocumentStats::skipped(display_path),
            mapping: AbbreviationMap::new(),
            output_path: None,
        });
    }

    match resolve_and_render(&pipeline, &path, &options, &progress).await {
        Ok(mut outcome) => {
            outcome.stats.processing_time_ms = start_time.elapsed().as_millis() as u64;
            progress.finish_with_message("saved");
            Ok(outcome)
        }
        Err(e) if options.fail_fast => Err(e.context(format!("Failed to process {display_path}"))),
        Err(e) => {
            warn!("Failed to process {} (continuing): {:#}", display_path, e);
            progress.abandon_with_message("failed");
            Ok(DocumentOutcome {
                stats: DocumentStats::failed(
                    display_path,
                    format!("{e:#}"),
                    start_time.elapsed().as_millis() as u64,
                ),
                mapping: AbbreviationMap::new(),
                output_path: None,
            })
        }
    }
}

async fn resolve_and_render(
    pipeline: &Arc<ResolutionPipeline>,
    path: &Path,
    options: &ProcessingOptions,
    progress: &ProgressBar,
) -> Result<DocumentOutcome> {
    let reader = DocumentReader::new(ReaderConfig {
        use_mmap: options.use_mmap,
    });
    let mut document = TextDocument::open(path, &reader).await?;
    progress.set_position(MILESTONE_LOADED);

    let text = document.get_text().to_string();
    let chars_processed = text.chars().count() as u64;

    // WHY: resolution is synchronous CPU work; keep it off the async workers
    let worker = Arc::clone(pipeline);
    let observer = progress.clone();
    let resolution = tokio::task::spawn_blocking(move || worker.resolve(&text, &observer))
        .await
        .context("Resolution task panicked")?;

    document.update_document(&resolution.mapping);
    progress.set_position(MILESTONE_RENDERED);

    let output_path = document
        .save_with_fallback(generate_output_path(path))
        .await?;
    progress.set_position(MILESTONE_SAVED);

    debug!(
        "Processed {}: {} abbreviations written to {}",
        path.display(),
        resolution.mapping.len(),
        output_path.display()
    );

    Ok(DocumentOutcome {
        stats: DocumentStats {
            path: path.display().to_string(),
            chars_processed,
            abbreviations_detected: resolution.abbreviations_detected as u64,
            primary_resolved: resolution.primary_resolved as u64,
            fallback_added: resolution.fallback_added as u64,
            processing_time_ms: 0,
            status: "success".to_string(),
            error: None,
        },
        mapping: resolution.mapping,
        output_path: Some(output_path),
    })
}

/// Process documents concurrently, returning outcomes in completion order
///
/// `make_progress` supplies the bar for each document; pass `|_| ProgressBar::hidden()`
/// to suppress progress output.
pub async fn process_documents_parallel<F>(
    pipeline: Arc<ResolutionPipeline>,
    paths: Vec<PathBuf>,
    options: &ProcessingOptions,
    make_progress: F,
) -> Result<Vec<DocumentOutcome>>
where
    F: Fn(&Path) -> ProgressBar,
{
    let concurrency = options.concurrency.max(1);
    info!("Processing {} documents with concurrency {}", paths.len(), concurrency);

    let tasks = paths.into_iter().map(|path| {
        let progress = make_progress(&path);
        process_document(Arc::clone(&pipeline), path, options.clone(), progress)
    });

    let outcomes: Vec<DocumentOutcome> = stream::iter(tasks)
        .buffer_unordered(concurrency)
        .try_collect()
        .await?;

    info!("Batch completed: {} documents", outcomes.len());
    Ok(outcomes)
}

/// Write run statistics as pretty-printed JSON
pub async fn write_stats(stats_path: &Path, stats: &RunStats) -> Result<()> {
    let json = serde_json::to_string_pretty(stats)?;
    tokio::fs::write(stats_path, json)
        .await
        .with_context(|| format!("Failed to write stats file {}", stats_path.display()))?;
    info!("Run statistics written to {}", stats_path.display());
    Ok(())
}
