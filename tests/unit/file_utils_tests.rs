/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use std::path::Path;
use speecheval::file_utils::FileManager;

use crate::common::{self, SPEECH};

/// Test that file_exists returns false for non-existent files
#[test]
fn test_file_exists_withNonExistentFile_shouldReturnFalse() {
    assert!(!FileManager::file_exists("non_existent_file.tmp"));
}

/// Test that generate_output_path creates the correct path
#[test]
fn test_generate_output_path_withValidInputs_shouldCreateCorrectPath() {
    let output_path = FileManager::generate_output_path(Path::new("/tmp/runs/qwen.json"), "evaluation", "txt");
    assert_eq!(output_path, Path::new("/tmp/runs/qwen_evaluation.txt"));
}

/// Test recursive discovery of speech files
#[test]
fn test_collect_speech_files_withDirectory_shouldFindSortedPayloads() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path();
    common::create_test_file(dir, "b.json", SPEECH)?;
    common::create_test_file(dir, "a.TXT", SPEECH)?;
    common::create_test_file(dir, "notes.md", "ignored")?;
    common::create_test_file(dir, "more/c.json", SPEECH)?;

    let files = FileManager::collect_speech_files(&[dir], None)?;
    let names: Vec<String> = files
        .iter()
        .map(|p| p.strip_prefix(dir).unwrap().to_string_lossy().replace('\\', "/"))
        .collect();

    assert_eq!(names, vec!["a.TXT", "b.json", "more/c.json"]);
    Ok(())
}

/// Test explicit files are kept and missing paths rejected
#[test]
fn test_collect_speech_files_withMissingPath_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_test_file(temp_dir.path(), "speech.md", SPEECH)?;

    // explicit files are taken whatever their extension
    assert_eq!(FileManager::collect_speech_files(&[&file], None)?, vec![file.clone()]);
    assert!(FileManager::collect_speech_files(&[temp_dir.path().join("missing.json")], None).is_err());
    Ok(())
}

/// Test candidates are named after their file stem
#[test]
fn test_load_candidates_shouldUseFileStems() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let first = common::create_test_file(temp_dir.path(), "gemini.json", SPEECH)?;
    let second = common::create_test_file(temp_dir.path(), "qwen.json", "{}")?;

    let candidates = FileManager::load_candidates(&[first, second])?;

    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].name, "gemini");
    assert_eq!(candidates[0].payload, SPEECH);
    assert_eq!(candidates[1].name, "qwen");
    Ok(())
}

/// Test writing creates parent directories
#[test]
fn test_write_to_file_withNestedPath_shouldCreateParents() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("reports/deep/out.txt");

    FileManager::write_to_file(&path, "report")?;

    assert!(FileManager::file_exists(&path));
    assert_eq!(FileManager::read_to_string(&path)?, "report");
    Ok(())
}

/// Test that earlier comparison reports are not picked up as speeches
#[test]
fn test_collect_speech_files_withReports_shouldSkipThem() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path();
    common::create_test_file(dir, "qwen.json", SPEECH)?;
    common::create_test_file(dir, "qwen_evaluation.txt", "report")?;

    let files = FileManager::collect_speech_files(&[dir], None)?;
    assert_eq!(files, vec![dir.join("qwen.json")]);
    Ok(())
}

/// Test that the slide text next to the speeches is not taken as a candidate
#[test]
fn test_collect_speech_files_withSlidesInDirectory_shouldSkipSlides() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path();
    let slides = common::create_test_file(dir, "slides.txt", "Deck text")?;
    common::create_test_file(dir, "gemini.json", SPEECH)?;
    common::create_test_file(dir, "qwen.txt", SPEECH)?;

    let files = FileManager::collect_speech_files(&[dir], Some(slides.as_path()))?;
    assert_eq!(files, vec![dir.join("gemini.json"), dir.join("qwen.txt")]);

    // a relative spelling of the same file is skipped as well
    let relative = dir.join(".").join("slides.txt");
    let files = FileManager::collect_speech_files(&[dir], Some(relative.as_path()))?;
    assert_eq!(files.len(), 2);

    // without an exclusion the slides are picked up
    assert_eq!(FileManager::collect_speech_files(&[dir], None)?.len(), 3);
    Ok(())
}
