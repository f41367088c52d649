//! tex2md-batch: directory-level operations for LaTeX to Markdown conversion
//!
//! This crate walks a directory for `.tex` sources, converts each one with
//! [`tex2md_core::convert`], and writes the result under a mirror of the
//! input tree with the extension swapped. Files are converted in parallel;
//! the stage list in the core is read-only and document buffers are never
//! shared, so no coordination is needed. A failure on one file is recorded
//! in the summary and does not stop the rest of the batch.

use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Errors that can occur during batch operations
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Directory not found: {0}")]
    DirectoryNotFound(PathBuf),
}

/// Result type for batch operations
pub type Result<T> = std::result::Result<T, BatchError>;

/// Options for converting a directory of documents
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Output directory; inputs' relative paths are mirrored under it.
    /// `None` writes each output next to its input.
    pub output_dir: Option<PathBuf>,
    /// File extension for output files (e.g. "md")
    pub output_extension: String,
    /// Whether to descend into subdirectories
    pub recursive: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            output_dir: None,
            output_extension: "md".to_string(),
            recursive: false,
        }
    }
}

/// One file that could not be converted
#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    /// Input file the failure belongs to
    pub file: PathBuf,
    /// Human-readable cause
    pub message: String,
}

/// Outcome of a batch conversion
#[derive(Debug, Default, Serialize)]
pub struct BatchSummary {
    /// Output paths written, in input order
    pub converted: Vec<PathBuf>,
    /// Files that could not be read or written
    pub failures: Vec<FileFailure>,
}

impl BatchSummary {
    /// Number of files the batch attempted
    pub fn total(&self) -> usize {
        self.converted.len() + self.failures.len()
    }
}

/// Collect all .tex files in a directory, sorted by path
pub fn collect_tex_files(dir: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_file() {
            if let Some(ext) = path.extension() {
                if ext.eq_ignore_ascii_case("tex") {
                    files.push(path);
                }
            }
        } else if path.is_dir() && recursive {
            files.extend(collect_tex_files(&path, recursive)?);
        }
    }

    files.sort();
    Ok(files)
}

/// Convert one file, creating the output's parent directory as needed
pub fn convert_file(input: &Path, output: &Path) -> Result<()> {
    let content = fs::read_to_string(input)?;
    let markdown = tex2md_core::convert(&content);

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(output, markdown)?;

    Ok(())
}

/// Convert every .tex file under `input`
///
/// A per-file read or write error lands in [`BatchSummary::failures`] and
/// never aborts the remaining files.
pub fn convert_directory(input: &Path, options: &BatchOptions) -> Result<BatchSummary> {
    if !input.is_dir() {
        return Err(BatchError::DirectoryNotFound(input.to_path_buf()));
    }

    let files = collect_tex_files(input, options.recursive)?;
    let output_dir = options.output_dir.as_deref().unwrap_or(input);

    let results: Vec<_> = files
        .par_iter()
        .map(|file| {
            let relative = file.strip_prefix(input).unwrap_or(file);
            let output = output_dir
                .join(relative)
                .with_extension(&options.output_extension);

            convert_file(file, &output)
                .map(|()| output)
                .map_err(|e| FileFailure {
                    file: file.clone(),
                    message: e.to_string(),
                })
        })
        .collect();

    let mut summary = BatchSummary::default();
    for result in results {
        match result {
            Ok(path) => summary.converted.push(path),
            Err(failure) => summary.failures.push(failure),
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_collect_tex_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.tex"), "x").unwrap();
        fs::write(dir.path().join("b.TEX"), "x").unwrap();
        fs::write(dir.path().join("notes.md"), "x").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/c.tex"), "x").unwrap();

        let flat = collect_tex_files(dir.path(), false).unwrap();
        assert_eq!(flat.len(), 2);

        let deep = collect_tex_files(dir.path(), true).unwrap();
        assert_eq!(deep.len(), 3);
    }

    #[test]
    fn test_convert_directory_in_place() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.tex"), "\\section{One}\nText.").unwrap();

        let summary = convert_directory(dir.path(), &BatchOptions::default()).unwrap();

        assert_eq!(summary.converted.len(), 1);
        assert!(summary.failures.is_empty());

        let output = fs::read_to_string(dir.path().join("a.md")).unwrap();
        assert_eq!(output, "# One\nText.");
    }

    #[test]
    fn test_convert_directory_mirrors_tree() {
        let dir = tempdir().unwrap();
        let out = tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/b.tex"), "\\subsection{Two}").unwrap();

        let options = BatchOptions {
            output_dir: Some(out.path().to_path_buf()),
            recursive: true,
            ..Default::default()
        };
        let summary = convert_directory(dir.path(), &options).unwrap();

        assert_eq!(summary.converted.len(), 1);
        let output = fs::read_to_string(out.path().join("sub/b.md")).unwrap();
        assert_eq!(output, "## Two");
    }

    #[test]
    fn test_output_extension_is_configurable() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.tex"), "text").unwrap();

        let options = BatchOptions {
            output_extension: "markdown".to_string(),
            ..Default::default()
        };
        convert_directory(dir.path(), &options).unwrap();

        assert!(dir.path().join("a.markdown").is_file());
    }

    #[test]
    fn test_per_file_failure_does_not_abort_batch() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("good.tex"), "\\section{Ok}").unwrap();
        // Invalid UTF-8 cannot be read to a string
        fs::write(dir.path().join("bad.tex"), [0xff, 0xfe, 0xfd]).unwrap();

        let summary = convert_directory(dir.path(), &BatchOptions::default()).unwrap();

        assert_eq!(summary.converted.len(), 1);
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.total(), 2);
        assert!(summary.failures[0].file.ends_with("bad.tex"));
        assert!(dir.path().join("good.md").is_file());
    }

    #[test]
    fn test_missing_directory() {
        let err = convert_directory(Path::new("/nonexistent/tex2md"), &BatchOptions::default());
        assert!(matches!(err, Err(BatchError::DirectoryNotFound(_))));
    }
}
