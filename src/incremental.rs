// WHY: Output naming and skip checks for incremental runs
// Outputs live next to their source as <stem>-updated.<ext>

use std::path::{Path, PathBuf};

/// Suffix appended to the file stem of every rendered output
pub const OUTPUT_SUFFIX: &str = "-updated";

/// Generate output file path from source file path
pub fn generate_output_path(source_path: &Path) -> PathBuf {
    let mut output_path = source_path.to_path_buf();
    let file_stem = source_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document");

    let file_name = match source_path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{file_stem}{OUTPUT_SUFFIX}.{ext}"),
        None => format!("{file_stem}{OUTPUT_SUFFIX}"),
    };
    output_path.set_file_name(file_name);
    output_path
}

/// Output path used when the source directory is not writable
pub fn fallback_output_path(output_path: &Path) -> PathBuf {
    let file_name = output_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| format!("document{OUTPUT_SUFFIX}").into());
    std::env::temp_dir().join(file_name)
}

/// Check if the path is itself a rendered output
/// WHY: discovery must not feed outputs back in as new documents
pub fn is_output_path(path: &Path) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| stem.ends_with(OUTPUT_SUFFIX))
}

/// Check if output file exists for given source file
pub fn output_exists<P: AsRef<Path>>(source_path: P) -> bool {
    generate_output_path(source_path.as_ref()).exists()
}

/// Decide whether a document still needs processing
pub fn should_process_document<P: AsRef<Path>>(source_path: P, overwrite_all: bool) -> bool {
    overwrite_all || !output_exists(source_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_generate_output_path() {
        let output = generate_output_path(Path::new("/docs/proposal.txt"));
        assert_eq!(output, PathBuf::from("/docs/proposal-updated.txt"));

        let output = generate_output_path(Path::new("notes"));
        assert_eq!(output, PathBuf::from("notes-updated"));

        let output = generate_output_path(Path::new("archive.tar.md"));
        assert_eq!(output, PathBuf::from("archive.tar-updated.md"));
    }

    #[test]
    fn test_is_output_path() {
        assert!(is_output_path(Path::new("proposal-updated.txt")));
        assert!(!is_output_path(Path::new("proposal.txt")));
        assert!(!is_output_path(Path::new("updated.txt")));
    }

    #[test]
    fn test_fallback_output_path_keeps_file_name() {
        let fallback = fallback_output_path(Path::new("/readonly/proposal-updated.txt"));
        assert_eq!(fallback, std::env::temp_dir().join("proposal-updated.txt"));
    }

    #[test]
    fn test_should_process_document() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("proposal.txt");
        std::fs::write(&source, "text").unwrap();

        assert!(!output_exists(&source));
        assert!(should_process_document(&source, false));

        std::fs::write(generate_output_path(&source), "rendered").unwrap();
        assert!(output_exists(&source));
        assert!(!should_process_document(&source, false));
        assert!(should_process_document(&source, true));
    }
}
