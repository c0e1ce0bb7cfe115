//! Audio artifact persistence.
//!
//! Generated audio is written append-only under a fixed directory, one file
//! per successful run, named with a fresh UUID so concurrent runs never
//! collide. An optional retention bound prunes the oldest files.

use crate::error::{PratError, Result};
use crate::synthesis::{AudioArtifact, AudioFormat};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use uuid::Uuid;

/// Prefix for generated audio filenames.
const FILE_PREFIX: &str = "podcast_";

/// A persisted audio file.
#[derive(Debug, Clone)]
pub struct SavedAudio {
    /// Filename within the output directory.
    pub file_name: String,
    /// Full path to the written file.
    pub path: PathBuf,
    /// Audio container format.
    pub format: AudioFormat,
}

/// Append-only store for generated audio files.
pub struct AudioStore {
    dir: PathBuf,
    retain_last: Option<usize>,
}

impl AudioStore {
    /// Create a store rooted at the given directory.
    ///
    /// The directory is created lazily on first save.
    pub fn new(dir: impl Into<PathBuf>, retain_last: Option<usize>) -> Self {
        Self {
            dir: dir.into(),
            retain_last,
        }
    }

    /// The output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write an artifact under a freshly generated unique filename.
    pub fn save(&self, artifact: &AudioArtifact) -> Result<SavedAudio> {
        std::fs::create_dir_all(&self.dir)?;

        let file_name = format!("{}{}.{}", FILE_PREFIX, Uuid::new_v4(), artifact.format.extension());
        let path = self.dir.join(&file_name);
        std::fs::write(&path, &artifact.bytes)?;

        info!("Wrote {} bytes to {}", artifact.bytes.len(), path.display());

        if let Some(keep) = self.retain_last {
            if let Err(e) = self.prune(keep) {
                warn!("Retention sweep failed: {}", e);
            }
        }

        Ok(SavedAudio {
            file_name,
            path,
            format: artifact.format,
        })
    }

    /// Read a generated file back for playback.
    ///
    /// Only bare generated filenames are accepted; anything that looks like a
    /// path is rejected.
    pub fn read(&self, file_name: &str) -> Result<Vec<u8>> {
        if !is_generated_name(file_name) {
            return Err(PratError::AudioStore(format!("Invalid audio file name: {}", file_name)));
        }

        let path = self.dir.join(file_name);
        std::fs::read(&path)
            .map_err(|_| PratError::AudioStore(format!("Audio file not found: {}", file_name)))
    }

    /// Delete generated files beyond the newest `keep`.
    fn prune(&self, keep: usize) -> Result<()> {
        let mut entries: Vec<(PathBuf, std::time::SystemTime)> = Vec::new();

        for entry in std::fs::read_dir(&self.dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().to_string();
            if !name.starts_with(FILE_PREFIX) {
                continue;
            }
            let modified = entry.metadata()?.modified()?;
            entries.push((entry.path(), modified));
        }

        if entries.len() <= keep {
            return Ok(());
        }

        // Newest first; everything past `keep` goes.
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        for (path, _) in entries.into_iter().skip(keep) {
            info!("Pruning old audio file {}", path.display());
            std::fs::remove_file(&path)?;
        }

        Ok(())
    }
}

/// True for filenames this store could have generated.
fn is_generated_name(name: &str) -> bool {
    name.starts_with(FILE_PREFIX)
        && !name.contains('/')
        && !name.contains('\\')
        && !name.contains("..")
}
