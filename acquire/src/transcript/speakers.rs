//! Speaker pools and the per-slot allowed speaker set.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;
use thiserror::Error;

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]+$").expect("name pattern is valid"));

/// Smallest number of speakers in a conversation.
pub const MIN_SPEAKERS: usize = 2;

/// Largest number of speakers drawn for a single conversation.
pub const MAX_SPEAKERS: usize = 4;

/// Errors raised while building a speaker pool.
#[derive(Debug, Error)]
pub enum SpeakerError {
    /// A name contains something other than lowercase ASCII letters.
    #[error("invalid character name {0:?} (must be lowercase a-z only)")]
    InvalidName(String),

    /// Fewer than two distinct names were supplied.
    #[error("at least 2 characters are required, got {0}")]
    TooFew(usize),

    /// The characters file could not be read.
    #[error("cannot read characters file {}: {source}", path.display())]
    Io {
        /// Path of the characters file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The characters file is not a JSON array of strings.
    #[error("characters file {} must contain a JSON array of strings: {reason}", path.display())]
    Malformed {
        /// Path of the characters file.
        path: PathBuf,
        /// Parser message.
        reason: String,
    },
}

/// The fixed set of names a transcript may use.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpeakerSet(BTreeSet<String>);

impl SpeakerSet {
    /// Returns `true` if `name` is allowed.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    /// Number of allowed names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no name is allowed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for SpeakerSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// The configured pool that per-slot speakers are drawn from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeakerPool {
    names: Vec<String>,
}

impl SpeakerPool {
    /// Builds a pool from already split names.
    ///
    /// Duplicates are dropped, keeping first occurrence order.
    pub fn new<I, S>(names: I) -> Result<Self, SpeakerError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for name in names {
            let name = name.into();
            if !NAME_RE.is_match(&name) {
                return Err(SpeakerError::InvalidName(name));
            }
            if !unique.contains(&name) {
                unique.push(name);
            }
        }

        if unique.len() < MIN_SPEAKERS {
            return Err(SpeakerError::TooFew(unique.len()));
        }
        Ok(Self { names: unique })
    }

    /// Parses a comma-separated list such as `"alex, sam,kim"`.
    pub fn parse_list(list: &str) -> Result<Self, SpeakerError> {
        Self::new(list.split(',').map(str::trim).filter(|name| !name.is_empty()))
    }

    /// Loads a JSON array of names from `path`.
    pub fn from_json_file(path: &Path) -> Result<Self, SpeakerError> {
        let content = std::fs::read_to_string(path).map_err(|source| SpeakerError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let names: Vec<String> =
            serde_json::from_str(&content).map_err(|e| SpeakerError::Malformed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        Self::new(names)
    }

    /// All names in the pool.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Draws between 2 and `min(4, pool size)` distinct speakers.
    ///
    /// The returned order is the draw order, which is how the names are
    /// presented to the model.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Vec<String> {
        let upper = MAX_SPEAKERS.min(self.names.len());
        let count = rng.gen_range(MIN_SPEAKERS..=upper);
        self.names.choose_multiple(rng, count).cloned().collect()
    }
}
