// WHY: host document surface around the resolver: text in, abbreviation table out
// Rendered documents append a "List of Abbreviations" table and save beside the source

use anyhow::{Context, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{info, warn};

use crate::incremental::fallback_output_path;
use crate::reader::DocumentReader;
use crate::resolver::AbbreviationMap;

/// Heading written above the abbreviation table
pub const TABLE_HEADING: &str = "List of Abbreviations";

/// A plain-text document loaded for resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDocument {
    path: PathBuf,
    text: String,
}

impl TextDocument {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    /// Load a document through the configured reader
    pub async fn open(path: impl AsRef<Path>, reader: &DocumentReader) -> Result<Self> {
        let path = path.as_ref();
        let text = reader.read_document(path).await?;
        Ok(Self::new(path, text))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Full document text
    pub fn get_text(&self) -> &str {
        &self.text
    }

    /// Append the abbreviation table to the document text
    pub fn update_document(&mut self, mapping: &AbbreviationMap) {
        if !self.text.is_empty() && !self.text.ends_with('\n') {
            self.text.push('\n');
        }
        self.text.push('\n');
        self.text.push_str(&render_table(mapping));
    }

    /// Write the document text to `path`
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.write_to(path)
            .await
            .with_context(|| format!("Failed to save document {}", path.display()))
    }

    /// Save to `path`, retrying in the temp directory when permission is denied
    ///
    /// Returns the path actually written.
    pub async fn save_with_fallback(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let path = path.as_ref();
        match self.write_to(path).await {
            Ok(()) => {
                info!("Saved document: {}", path.display());
                Ok(path.to_path_buf())
            }
            Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                let fallback = fallback_output_path(path);
                warn!(
                    "Permission denied writing {}, saving to {} instead",
                    path.display(),
                    fallback.display()
                );
                self.save(&fallback).await?;
                Ok(fallback)
            }
            Err(e) => Err(e).with_context(|| format!("Failed to save document {}", path.display())),
        }
    }

    async fn write_to(&self, path: &Path) -> std::io::Result<()> {
        let file = tokio::fs::File::create(path).await?;
        let mut writer = BufWriter::new(file);
        writer.write_all(self.text.as_bytes()).await?;
        writer.flush().await
    }
}

/// Render the mapping as a two-column markdown table in abbreviation order
pub fn render_table(mapping: &AbbreviationMap) -> String {
    let mut table = format!("{TABLE_HEADING}\n\n| Abbreviation | Definition |\n| --- | --- |\n");
    for (abbreviation, expansion) in mapping {
        table.push_str("| ");
        table.push_str(&escape_cell(abbreviation));
        table.push_str(" | ");
        table.push_str(&escape_cell(expansion));
        table.push_str(" |\n");
    }
    table
}

fn escape_cell(cell: &str) -> String {
    cell.replace('|', "\\|")
}
