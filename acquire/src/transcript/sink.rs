//! Persistence of accepted transcripts.

use std::path::{Path, PathBuf};

/// Destination for accepted transcripts.
pub trait TranscriptSink {
    /// Persists the transcript accepted for the 1-based `slot`.
    fn persist(&mut self, slot: usize, transcript: &str) -> std::io::Result<()>;
}

/// Writes one `NNN.txt` file per accepted slot into a directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Creates the output directory (and parents) if needed.
    pub fn create(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// File name used for a slot, zero-padded to three digits.
    #[must_use]
    pub fn file_name(slot: usize) -> String {
        format!("{slot:03}.txt")
    }

    /// The output directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl TranscriptSink for DirectorySink {
    fn persist(&mut self, slot: usize, transcript: &str) -> std::io::Result<()> {
        let path = self.dir.join(Self::file_name(slot));
        std::fs::write(&path, format!("{transcript}\n"))?;
        tracing::debug!(path = %path.display(), "Wrote transcript");
        Ok(())
    }
}
