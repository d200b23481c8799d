/*!
 * Tests for file system utilities
 */

use std::path::Path;
use subburn::file_utils::FileManager;
use crate::common;

#[test]
fn test_generate_output_path_withLanguage_shouldAppendSuffix() {
    let path = FileManager::generate_output_path("clip.mp4", "workdir", "en", "srt");
    assert_eq!(path, Path::new("workdir").join("clip_en.srt"));
}

#[test]
fn test_generate_output_path_withNestedInput_shouldUseStemOnly() {
    let path = FileManager::generate_output_path("/videos/movie.final.mkv", "out", "fr", "mp4");
    assert_eq!(path, Path::new("out").join("movie.final_fr.mp4"));
}

#[test]
fn test_with_extension_in_dir_shouldSwapExtension() {
    let path = FileManager::with_extension_in_dir("clip.mp4", "workdir", "srt");
    assert_eq!(path, Path::new("workdir").join("clip.srt"));
}

#[test]
fn test_write_to_file_withMissingParents_shouldCreateThem() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = temp_dir.path().join("a").join("b").join("out.txt");

    FileManager::write_to_file(&path, "content").unwrap();
    assert!(FileManager::file_exists(&path));
    assert_eq!(FileManager::read_to_string_lossy(&path).unwrap(), "content");
}

#[test]
fn test_read_to_string_lossy_withInvalidUtf8_shouldReplaceBytes() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = temp_dir.path().join("latin1.srt");
    std::fs::write(&path, b"Caf\xE9").unwrap();

    let content = FileManager::read_to_string_lossy(&path).unwrap();
    assert!(content.starts_with("Caf"));
    assert!(content.contains('\u{FFFD}'));
}

#[test]
fn test_read_to_string_lossy_withMissingFile_shouldFail() {
    assert!(FileManager::read_to_string_lossy("/nonexistent/file.srt").is_err());
}

#[test]
fn test_ensure_dir_shouldCreateAndBeIdempotent() {
    let temp_dir = common::create_temp_dir().unwrap();
    let dir = temp_dir.path().join("nested").join("dir");

    FileManager::ensure_dir(&dir).unwrap();
    assert!(FileManager::dir_exists(&dir));
    FileManager::ensure_dir(&dir).unwrap();
}
