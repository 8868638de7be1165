use crate::generators::emitter::EmitOutcome;
use crate::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// How per-domain artifacts treat files that are already on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WritePolicy {
    /// Keep hand-edited files; only missing artifacts are written
    #[default]
    SkipExisting,
    Overwrite,
}

impl WritePolicy {
    pub fn from_force(force: bool) -> Self {
        if force {
            WritePolicy::Overwrite
        } else {
            WritePolicy::SkipExisting
        }
    }
}

/// Writes generated files below a source root, keeping track of what it touched
pub struct FileWriter {
    root: PathBuf,
    policy: WritePolicy,
    written_files: Vec<PathBuf>,
    skipped_files: Vec<PathBuf>,
}

impl FileWriter {
    pub fn new(root: impl Into<PathBuf>, policy: WritePolicy) -> Self {
        Self {
            root: root.into(),
            policy,
            written_files: Vec::new(),
            skipped_files: Vec::new(),
        }
    }

    /// Absolute location of a path given relative to the root
    pub fn resolve(&self, relative: &Path) -> PathBuf {
        self.root.join(relative)
    }

    pub fn would_skip(&self, relative: &Path) -> bool {
        self.policy == WritePolicy::SkipExisting && self.resolve(relative).exists()
    }

    pub fn record_skip(&mut self, relative: &Path) -> EmitOutcome {
        let path = self.resolve(relative);
        self.skipped_files.push(path.clone());
        EmitOutcome::Skipped(path)
    }

    /// Write a per-domain artifact, honouring the write policy
    pub fn write_artifact(&mut self, relative: &Path, content: &str) -> Result<EmitOutcome> {
        if self.would_skip(relative) {
            return Ok(self.record_skip(relative));
        }
        let path = self.write_file(relative, content)?;
        Ok(EmitOutcome::Written(path))
    }

    /// Write unconditionally; barrels and the registry always reflect the current tree
    pub fn write_file(&mut self, relative: &Path, content: &str) -> Result<PathBuf> {
        let path = self.resolve(relative);
        if let Some(parent) = path.parent() {
            Self::ensure_directory_exists(parent)?;
        }
        fs::write(&path, content)?;
        self.written_files.push(path.clone());
        Ok(path)
    }

    pub fn get_written_files(&self) -> &[PathBuf] {
        &self.written_files
    }

    pub fn get_skipped_files(&self) -> &[PathBuf] {
        &self.skipped_files
    }

    pub fn ensure_directory_exists(path: &Path) -> Result<()> {
        fs::create_dir_all(path)?;
        Ok(())
    }
}
