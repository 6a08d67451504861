//! File resolver module for locating candidate video files
//!
//! This module lists a single directory (non-recursively) and picks out the
//! files carrying the supported video extension.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The only video container extension considered for renaming
pub const VIDEO_EXTENSION: &str = "mkv";

/// Errors that can occur during file resolution
#[derive(Debug, Error)]
pub enum FileResolverError {
    /// Path is not a directory
    #[error("Path is not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Failed to read directory
    #[error("Failed to read directory {path}: {source}")]
    ReadDirectoryFailed { path: PathBuf, source: io::Error },

    /// Failed to read directory entry
    #[error("Failed to read directory entry: {0}")]
    ReadEntryFailed(#[from] io::Error),
}

/// Represents a detected video file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoFile {
    /// Path to the video file
    pub path: PathBuf,
    /// The bare filename as found in the directory
    pub filename: String,
}

/// Lists the video files directly inside `dir_path`
///
/// Subdirectories are not descended into. Entries whose names are not valid
/// UTF-8 are skipped, as are files without the `.mkv` extension. The result
/// is sorted by filename.
///
/// # Errors
///
/// Returns an error if `dir_path` is not a directory or cannot be read.
pub fn scan_for_videos(dir_path: &Path) -> Result<Vec<VideoFile>, FileResolverError> {
    if !dir_path.is_dir() {
        return Err(FileResolverError::NotADirectory(dir_path.to_path_buf()));
    }

    let entries = fs::read_dir(dir_path).map_err(|e| FileResolverError::ReadDirectoryFailed {
        path: dir_path.to_path_buf(),
        source: e,
    })?;

    let mut video_files = Vec::new();

    for entry in entries {
        let entry = entry?;
        let path = entry.path();

        if !path.is_file() || !has_video_extension(&path) {
            continue;
        }

        let Some(filename) = entry.file_name().to_str().map(str::to_string) else {
            tracing::debug!(path = %path.display(), "skipping non UTF-8 filename");
            continue;
        };

        video_files.push(VideoFile { path, filename });
    }

    video_files.sort_by(|a, b| a.filename.cmp(&b.filename));

    Ok(video_files)
}

fn has_video_extension(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(VIDEO_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use tempfile::TempDir;

    #[test]
    fn test_scan_nonexistent_directory() {
        let result = scan_for_videos(Path::new("/nonexistent/path/that/does/not/exist"));
        assert!(matches!(result, Err(FileResolverError::NotADirectory(_))));
    }

    #[test]
    fn test_scan_file_instead_of_directory() {
        let temp_dir = TempDir::new().unwrap();
        let temp_file = temp_dir.path().join("test_file.txt");
        File::create(&temp_file).unwrap();

        let result = scan_for_videos(&temp_file);
        assert!(result.is_err());
    }

    #[test]
    fn test_scan_filters_by_extension() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("Show - 02.mkv"), "fake").unwrap();
        fs::write(temp_dir.path().join("Show - 01.mkv"), "fake").unwrap();
        fs::write(temp_dir.path().join("Show - 03.mp4"), "fake").unwrap();
        fs::write(temp_dir.path().join("Show - 04.MKV"), "fake").unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "fake").unwrap();

        let videos = scan_for_videos(temp_dir.path()).unwrap();
        let names: Vec<&str> = videos.iter().map(|v| v.filename.as_str()).collect();

        assert_eq!(names, vec!["Show - 01.mkv", "Show - 02.mkv"]);
        assert_eq!(videos[0].path, temp_dir.path().join("Show - 01.mkv"));
    }

    #[test]
    fn test_scan_is_not_recursive() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("Season 2");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("Show - 14.mkv"), "fake").unwrap();
        fs::create_dir(temp_dir.path().join("folder.mkv")).unwrap();

        let videos = scan_for_videos(temp_dir.path()).unwrap();
        assert!(videos.is_empty());
    }
}
