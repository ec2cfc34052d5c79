use anyhow::{Context, Result};
use memmap2::MmapOptions;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Configuration for document reading behavior
#[derive(Debug, Clone, Default)]
pub struct ReaderConfig {
    /// Use memory-mapped I/O instead of async buffered reads
    pub use_mmap: bool,
}

/// Reads whole documents as validated UTF-8 text
#[derive(Debug, Clone)]
pub struct DocumentReader {
    config: ReaderConfig,
}

impl DocumentReader {
    pub fn new(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Read document contents, failing on missing files or invalid UTF-8
    pub async fn read_document<P: AsRef<Path>>(&self, file_path: P) -> Result<String> {
        let path = file_path.as_ref().to_path_buf();
        let start_time = std::time::Instant::now();

        debug!("Starting read of document: {}", path.display());

        let text = if self.config.use_mmap {
            // WHY: mapping and UTF-8 validation are blocking work
            let mapped_path = path.clone();
            tokio::task::spawn_blocking(move || read_document_mmap(&mapped_path))
                .await
                .context("mmap reader task panicked")??
        } else {
            read_document_buffered(&path).await?
        };

        info!(
            "Read {}: {} bytes in {}ms",
            path.display(),
            text.len(),
            start_time.elapsed().as_millis()
        );
        Ok(text)
    }
}

/// Async read with UTF-8 validation
async fn read_document_buffered(path: &Path) -> Result<String> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to open file {}", path.display()))?;
    String::from_utf8(bytes).with_context(|| format!("UTF-8 decoding error in {}", path.display()))
}

/// Memory-mapped read with UTF-8 validation
pub fn read_document_mmap(path: &Path) -> Result<String> {
    let file_handle = std::fs::File::open(path)
        .with_context(|| format!("Failed to open file {}", path.display()))?;

    // Empty files cannot be mapped on every platform
    if file_handle.metadata()?.len() == 0 {
        return Ok(String::new());
    }

    // SAFETY: the mapping is read-only and dropped before returning
    let mmap = unsafe { MmapOptions::new().map(&file_handle) }
        .with_context(|| format!("Failed to map file {}", path.display()))?;
    let content = std::str::from_utf8(&mmap)
        .with_context(|| format!("UTF-8 decoding error in {}", path.display()))?;
    Ok(content.to_string())
}

/// Convenience function for reading a single document with default configuration
/// WHY: Simplifies common use case for integration tests and external callers
pub async fn read_file_async<P: AsRef<Path>>(file_path: P) -> Result<String> {
    DocumentReader::new(ReaderConfig::default())
        .read_document(file_path)
        .await
}
