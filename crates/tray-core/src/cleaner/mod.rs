use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{Result, TrayError};
use crate::normalize::normalize_value;
use crate::utils::{Clock, SystemClock};
use crate::vfs::FileSystem;


/// What happened to a single tray file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Rewritten with the normalized record.
    Cleaned,
    /// Deleted because the record had no name.
    Removed,
    /// Left untouched; the message says why.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: FileOutcome,
}

impl fmt::Display for FileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            FileOutcome::Cleaned => write!(f, "Cleaned file: {}", self.path.display()),
            FileOutcome::Removed => write!(f, "Removed file: {}", self.path.display()),
            FileOutcome::Failed(message) => {
                write!(f, "Error handling file {}: {}", self.path.display(), message)
            }
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct CleanReport {
    pub found: usize,
    pub files: Vec<FileReport>,
}

impl CleanReport {
    fn count(&self, wanted: fn(&FileOutcome) -> bool) -> usize {
        self.files.iter().filter(|f| wanted(&f.outcome)).count()
    }

    pub fn cleaned(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Cleaned))
    }

    pub fn removed(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Removed))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Failed(_)))
    }
}

/// Normalizes every tray file in a directory, one file at a time.
///
/// A failure on one file is recorded and the batch moves on; only an
/// unreadable directory stops the run.
pub struct TrayCleaner<'a> {
    fs: &'a dyn FileSystem,
    clock: &'a dyn Clock,
    extension: String,
    dry_run: bool,
}

impl<'a> TrayCleaner<'a> {
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self {
            fs,
            clock: &SystemClock,
            extension: "md".to_string(),
            dry_run: false,
        }
    }

    pub fn with_clock(mut self, clock: &'a dyn Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// List the tray files that [`run`](Self::run) would visit.
    pub fn discover(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        self.fs
            .list_files(dir, &self.extension)
            .map_err(|e| TrayError::io(dir, e))
    }

    pub fn run(&self, dir: &Path) -> Result<CleanReport> {
        let files = self.discover(dir)?;
        let mut report = CleanReport {
            found: files.len(),
            files: Vec::with_capacity(files.len()),
        };

        for path in files {
            let outcome = match self.clean_file(&path) {
                Ok(outcome) => outcome,
                Err(e) => FileOutcome::Failed(e.to_string()),
            };
            match &outcome {
                FileOutcome::Removed => log::info!("removed invalid tray {}", path.display()),
                FileOutcome::Failed(message) => {
                    log::warn!("skipping {}: {}", path.display(), message)
                }
                FileOutcome::Cleaned => log::debug!("normalized {}", path.display()),
            }
            report.files.push(FileReport { path, outcome });
        }

        Ok(report)
    }

    /// Normalize one file in place, deleting it when the record is invalid.
    pub fn clean_file(&self, path: &Path) -> Result<FileOutcome> {
        let text = self
            .fs
            .read_to_string(path)
            .map_err(|e| TrayError::io(path, e))?;
        let document: serde_json::Value = serde_json::from_str(&text)?;

        match normalize_value(&document, self.clock)? {
            None => {
                if !self.dry_run {
                    self.fs
                        .remove_file(path)
                        .map_err(|e| TrayError::io(path, e))?;
                }
                Ok(FileOutcome::Removed)
            }
            Some(tray) => {
                let pretty = serde_json::to_string_pretty(&tray)?;
                if !self.dry_run {
                    self.fs
                        .write(path, &pretty)
                        .map_err(|e| TrayError::io(path, e))?;
                }
                Ok(FileOutcome::Cleaned)
            }
        }
    }
}
