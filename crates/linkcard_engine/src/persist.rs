//! Saving generated cards to disk.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("cannot use output directory {path:?}: {reason}")]
    OutputDir { path: PathBuf, reason: String },
    #[error("invalid file name: {0:?}")]
    InvalidFileName(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Create `dir` (and parents) unless it already exists as a directory.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    let dir_error = |reason: String| PersistError::OutputDir {
        path: dir.to_path_buf(),
        reason,
    };
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(dir_error("not a directory".to_string())),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(dir).map_err(|err| dir_error(err.to_string()))
        }
        Err(err) => Err(dir_error(err.to_string())),
    }
}

/// Writes downloads into one directory without ever exposing a half-written file.
#[derive(Debug, Clone)]
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Store `content` as `{dir}/{filename}`, replacing an earlier download of the same name.
    pub fn write(&self, filename: &str, content: &[u8]) -> Result<PathBuf, PersistError> {
        if !is_bare_file_name(filename) {
            return Err(PersistError::InvalidFileName(filename.to_string()));
        }
        ensure_output_dir(&self.dir)?;

        let mut staged = NamedTempFile::new_in(&self.dir)?;
        staged.write_all(content)?;
        staged.as_file().sync_all()?;

        let target = self.dir.join(filename);
        staged.persist(&target).map_err(|err| err.error)?;
        Ok(target)
    }
}

fn is_bare_file_name(name: &str) -> bool {
    !name.is_empty() && Path::new(name).file_name().is_some_and(|file| file == name)
}

#[cfg(test)]
mod tests {
    use super::is_bare_file_name;

    #[test]
    fn only_plain_names_are_bare() {
        assert!(is_bare_file_name("link-to-image.png"));
        assert!(!is_bare_file_name(""));
        assert!(!is_bare_file_name(".."));
        assert!(!is_bare_file_name("out/link.png"));
    }
}
