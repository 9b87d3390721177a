use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::evaluation::Candidate;

// @module: File and directory utilities

/// Extensions accepted as speech payload files.
pub const SPEECH_EXTENSIONS: &[&str] = &["json", "txt"];

/// File-stem suffix of generated reports; such files are never speech payloads.
pub const REPORT_SUFFIX: &str = "evaluation";

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    // @generates: Sibling report path, e.g. speech.json -> speech_evaluation.txt
    pub fn generate_output_path<P: AsRef<Path>>(input_file: P, suffix: &str, extension: &str) -> PathBuf {
        let input_file = input_file.as_ref();
        let stem = input_file.file_stem().unwrap_or_default().to_string_lossy();

        let file_name = format!("{}_{}.{}", stem, suffix, extension);
        match input_file.parent() {
            Some(parent) => parent.join(file_name),
            None => PathBuf::from(file_name),
        }
    }

    /// Find files with one of the given extensions under a directory, sorted by path
    pub fn find_files<P: AsRef<Path>>(dir: P, extensions: &[&str]) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if !path.is_file() {
                continue;
            }

            let matches = path
                .extension()
                .map(|ext| {
                    let ext = ext.to_string_lossy();
                    extensions
                        .iter()
                        .any(|wanted| ext.eq_ignore_ascii_case(wanted.trim_start_matches('.')))
                })
                .unwrap_or(false);

            if matches {
                result.push(path.to_path_buf());
            }
        }

        result.sort();
        Ok(result)
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path).with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content).with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Expand files and directories into speech payload paths.
    ///
    /// Directories are searched recursively for `.json` and `.txt` files,
    /// skipping reports written by an earlier comparison and the `exclude`
    /// file (the slide text usually sits next to the speeches).
    pub fn collect_speech_files<P: AsRef<Path>>(inputs: &[P], exclude: Option<&Path>) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        let report_ending = format!("_{}", REPORT_SUFFIX);
        let excluded = exclude.map(|path| fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf()));

        for input in inputs {
            let input = input.as_ref();
            if Self::dir_exists(input) {
                files.extend(Self::find_files(input, SPEECH_EXTENSIONS)?.into_iter().filter(|path| {
                    let is_report = path
                        .file_stem()
                        .is_some_and(|stem| stem.to_string_lossy().ends_with(&report_ending));
                    let is_excluded = excluded
                        .as_ref()
                        .is_some_and(|excluded| Self::same_file(path, excluded));
                    !is_report && !is_excluded
                }));
            } else if Self::file_exists(input) {
                files.push(input.to_path_buf());
            } else {
                anyhow::bail!("Speech file or directory not found: {:?}", input);
            }
        }

        Ok(files)
    }

    // @checks: Whether a path resolves to an already canonical path
    fn same_file(path: &Path, canonical: &Path) -> bool {
        fs::canonicalize(path)
            .map(|resolved| resolved == canonical)
            .unwrap_or_else(|_| path == canonical)
    }

    /// Load speech payloads as batch candidates named by file stem.
    pub fn load_candidates(paths: &[PathBuf]) -> Result<Vec<Candidate>> {
        paths
            .iter()
            .map(|path| {
                let payload = Self::read_to_string(path)?;
                let name = path.file_stem().unwrap_or_default().to_string_lossy().to_string();
                Ok(Candidate::new(name, payload))
            })
            .collect()
    }
}
