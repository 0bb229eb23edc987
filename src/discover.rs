use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiscoverError {
    #[error("input path {0} does not exist or is not a directory")]
    NotADirectory(PathBuf),
    #[error("failed walking input directory: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Case-sensitive suffix a file must carry to be collected.
const WAV_SUFFIX: &str = ".wav";

/// Recursively collect every `.wav` file under `root`, as paths relative
/// to `root`.
///
/// The result is sorted by relative path, so downstream index assignment
/// is reproducible across runs and platforms regardless of the order the
/// filesystem lists entries in.
pub fn discover_wav_files(root: &Path) -> Result<Vec<PathBuf>, DiscoverError> {
    if !root.is_dir() {
        return Err(DiscoverError::NotADirectory(root.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(root) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.file_name().to_string_lossy().ends_with(WAV_SUFFIX) {
            let relative = entry
                .path()
                .strip_prefix(root)
                .expect("walked path is always under root")
                .to_path_buf();
            files.push(relative);
        }
    }

    files.sort();
    Ok(files)
}
