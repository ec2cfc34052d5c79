use anyhow::Result;
use futures::stream::{self, Stream, StreamExt};
use glob::{glob, MatchOptions, Pattern};
use ignore::{WalkBuilder, WalkState};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::incremental::is_output_path;

/// Default glob for documents under a root directory
pub const DEFAULT_PATTERN: &str = "**/*.txt";

/// Configuration for document discovery behavior
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Whether to fail fast on first error or continue processing
    pub fail_fast: bool,
    /// Glob pattern, relative to each root directory
    pub pattern: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            fail_fast: false,
            pattern: DEFAULT_PATTERN.to_string(),
        }
    }
}

/// Result of document discovery validation
#[derive(Debug, Clone)]
pub struct FileValidation {
    pub path: PathBuf,
    pub error: Option<String>,
}

/// Discovers documents matching the configured pattern under the given root directory.
/// Returns an async stream of validated document paths.
///
/// Files that are themselves rendered outputs (`*-updated.*`) are never yielded.
pub fn discover_files(
    root_dir: impl AsRef<Path>,
    config: DiscoveryConfig,
) -> impl Stream<Item = Result<FileValidation>> {
    let root_path = root_dir.as_ref().to_path_buf();

    futures::stream::unfold(
        DiscoveryState::new(root_path, config),
        |mut state| async move {
            state.next_file().await.map(|result| (result, state))
        },
    )
}

/// Parallel directory traversal for large document trees
/// WHY: the ignore walker runs on several threads while glob is inherently sequential
pub fn discover_files_parallel(
    root_dir: impl AsRef<Path>,
    config: DiscoveryConfig,
) -> impl Stream<Item = Result<FileValidation>> {
    let root_path = root_dir.as_ref().to_path_buf();
    let config = Arc::new(config);

    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        info!("Starting directory traversal in: {}", root_path.display());
        let traversal_start = std::time::Instant::now();

        let pattern = match Pattern::new(&config.pattern) {
            Ok(pattern) => pattern,
            Err(e) => {
                let _ = tx.send(Err(anyhow::anyhow!("Failed to create glob pattern: {}", e)));
                return;
            }
        };

        let walker = WalkBuilder::new(&root_path)
            .threads((num_cpus::get() / 2).max(1))
            .follow_links(false)
            .hidden(false)
            .ignore(false)
            .git_ignore(false)
            .build_parallel();

        let (path_tx, mut path_rx) = mpsc::unbounded_channel::<PathBuf>();
        let walk_root = root_path.clone();

        // Walker blocks its thread until traversal completes
        std::thread::spawn(move || {
            walker.run(|| {
                let path_tx = path_tx.clone();
                let pattern = pattern.clone();
                let walk_root = walk_root.clone();
                Box::new(move |result| {
                    if let Ok(entry) = result {
                        if entry.file_type().is_some_and(|ft| ft.is_file())
                            && matches_relative(&pattern, &walk_root, entry.path())
                            && !is_output_path(entry.path())
                        {
                            debug!("Found matching file: {}", entry.path().display());
                            if path_tx.send(entry.path().to_path_buf()).is_err() {
                                return WalkState::Quit;
                            }
                        }
                    }
                    WalkState::Continue
                })
            });
        });

        let mut file_count = 0;
        while let Some(path) = path_rx.recv().await {
            file_count += 1;

            match validate_file(path, &config).await {
                Ok(validation) => {
                    if tx.send(Ok(validation)).is_err() {
                        debug!("Receiver dropped, stopping discovery");
                        break;
                    }
                }
                Err(e) => {
                    if config.fail_fast {
                        let _ = tx.send(Err(e));
                        break;
                    }
                    warn!("File validation error (continuing): {}", e);
                }
            }
        }

        info!(
            "Discovery and validation completed in {:.2}ms, streamed {} files",
            traversal_start.elapsed().as_millis(),
            file_count
        );
    });

    stream::unfold(rx, |mut receiver| async move {
        receiver.recv().await.map(|result| (result, receiver))
    })
}

fn matches_relative(pattern: &Pattern, root: &Path, path: &Path) -> bool {
    let relative = path.strip_prefix(root).unwrap_or(path);
    // Same separator semantics as the glob walker
    let options = MatchOptions {
        require_literal_separator: true,
        ..MatchOptions::new()
    };
    pattern.matches_path_with(relative, options)
}

/// Check that a discovered path is an accessible regular file
async fn validate_file(path: PathBuf, config: &DiscoveryConfig) -> Result<FileValidation> {
    debug!("Validating file: {}", path.display());

    match fs::metadata(&path).await {
        Ok(metadata) => {
            if !metadata.is_file() {
                let error = format!("Path is not a file: {}", path.display());
                warn!("{}", error);
                return Ok(FileValidation {
                    path,
                    error: Some(error),
                });
            }
        }
        Err(e) => {
            let error = format!("Cannot access file {}: {}", path.display(), e);
            warn!("{}", error);

            if config.fail_fast {
                return Err(anyhow::anyhow!(error));
            }
            return Ok(FileValidation {
                path,
                error: Some(error),
            });
        }
    }

    // UTF-8 validation happens while reading
    Ok(FileValidation { path, error: None })
}

/// Internal state for glob-based discovery iteration
struct DiscoveryState {
    root_dir: PathBuf,
    config: DiscoveryConfig,
    glob_iter: Option<glob::Paths>,
}

impl DiscoveryState {
    fn new(root_dir: PathBuf, config: DiscoveryConfig) -> Self {
        Self {
            root_dir,
            config,
            glob_iter: None,
        }
    }

    async fn next_file(&mut self) -> Option<Result<FileValidation>> {
        if self.glob_iter.is_none() {
            let pattern = format!("{}/{}", self.root_dir.display(), self.config.pattern);
            debug!("Starting file discovery with pattern: {}", pattern);

            match glob(&pattern) {
                Ok(paths) => {
                    self.glob_iter = Some(paths);
                    info!("File discovery initialized for root: {}", self.root_dir.display());
                }
                Err(e) => {
                    return Some(Err(anyhow::anyhow!("Failed to create glob pattern: {}", e)));
                }
            }
        }

        let glob_iter = self.glob_iter.as_mut()?;
        loop {
            match glob_iter.next() {
                Some(Ok(path)) => {
                    if is_output_path(&path) {
                        debug!("Skipping rendered output: {}", path.display());
                        continue;
                    }
                    debug!("Found file: {}", path.display());
                    return Some(validate_file(path, &self.config).await);
                }
                Some(Err(e)) => {
                    let error_msg = format!("Glob iteration error: {e}");
                    warn!("{}", error_msg);

                    if self.config.fail_fast {
                        return Some(Err(anyhow::anyhow!(error_msg)));
                    }
                }
                None => {
                    info!("File discovery completed");
                    return None;
                }
            }
        }
    }
}

async fn collect_stream(
    stream: impl Stream<Item = Result<FileValidation>>,
) -> Result<Vec<FileValidation>> {
    let mut files = Vec::new();
    let mut stream = Box::pin(stream);

    while let Some(result) = stream.next().await {
        files.push(result?);
    }

    let valid_count = files.iter().filter(|f| f.error.is_none()).count();
    let invalid_count = files.len() - valid_count;

    if invalid_count > 0 {
        warn!("Found {} files with validation issues", invalid_count);
    }

    info!("File discovery summary: {} valid, {} invalid", valid_count, invalid_count);

    Ok(files)
}

/// Collect all discovered documents into a Vec for easier processing
pub async fn collect_discovered_files(
    root_dir: impl AsRef<Path>,
    config: DiscoveryConfig,
) -> Result<Vec<FileValidation>> {
    collect_stream(discover_files(root_dir, config)).await
}

/// Collect all discovered documents using parallel directory traversal
pub async fn collect_discovered_files_parallel(
    root_dir: impl AsRef<Path>,
    config: DiscoveryConfig,
) -> Result<Vec<FileValidation>> {
    collect_stream(discover_files_parallel(root_dir, config)).await
}

/// Resolve CLI inputs: explicit files are validated as given, directories are scanned
pub async fn collect_inputs(
    inputs: &[PathBuf],
    config: &DiscoveryConfig,
    parallel: bool,
) -> Result<Vec<FileValidation>> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let found = if parallel {
                collect_discovered_files_parallel(input, config.clone()).await?
            } else {
                collect_discovered_files(input, config.clone()).await?
            };
            files.extend(found);
        } else {
            files.push(validate_file(input.clone(), config).await?);
        }
    }

    info!("Discovered {} documents total", files.len());
    Ok(files)
}

/// Convenience function to find all valid documents (only paths, not validation details)
/// WHY: Simplifies common use case for integration tests and external callers
pub async fn find_documents<P: AsRef<Path>>(root_dir: P) -> Result<Vec<PathBuf>> {
    let validations = collect_discovered_files(root_dir, DiscoveryConfig::default()).await?;

    Ok(validations
        .into_iter()
        .filter(|v| v.error.is_none())
        .map(|v| v.path)
        .collect())
}
