//! Destinations for finished exports.
//!
//! In a browser the sink is the download mechanism. Here it is a trait so
//! hosts can write to disk, keep files in memory, or hand them elsewhere.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::export::ExportFile;

/// Persists an [`ExportFile`] under its file name.
pub trait ExportSink {
    /// Saves the file and returns where it went.
    fn save(&mut self, file: &ExportFile) -> Result<PathBuf>;
}

/// Writes exports into a directory, creating it if needed.
///
/// File names must be a single path component; anything that would resolve
/// outside the directory is rejected with [`Error::InvalidFileName`].
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Creates a sink writing into `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the target directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ExportSink for DirectorySink {
    fn save(&mut self, file: &ExportFile) -> Result<PathBuf> {
        let name = Path::new(&file.file_name);
        if name.file_name() != Some(OsStr::new(&file.file_name)) {
            warn!(file = %file.file_name, "export file name rejected");
            return Err(Error::InvalidFileName(file.file_name.clone()));
        }
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(name);
        fs::write(&path, &file.contents)?;
        debug!(
            path = %path.display(),
            mime = file.mime_type,
            bytes = file.len(),
            "export written"
        );
        Ok(path)
    }
}

/// Keeps exports in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    files: Vec<ExportFile>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every file saved so far, oldest first.
    pub fn files(&self) -> &[ExportFile] {
        &self.files
    }

    /// Returns the most recent file.
    pub fn last(&self) -> Option<&ExportFile> {
        self.files.last()
    }
}

impl ExportSink for MemorySink {
    fn save(&mut self, file: &ExportFile) -> Result<PathBuf> {
        self.files.push(file.clone());
        Ok(PathBuf::from(&file.file_name))
    }
}
