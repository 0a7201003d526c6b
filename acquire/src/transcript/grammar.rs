//! Line grammar for conversation transcripts.
//!
//! Every non-blank line must read `<speaker>: <message>` where the speaker is
//! one or more lowercase ASCII letters and the message is non-empty.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use super::speakers::SpeakerSet;

static MESSAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-z]+): (.+)$").expect("message pattern is valid"));

/// One accepted transcript line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptLine {
    /// 1-based line number in the validated text.
    pub number: usize,
    /// Speaker name.
    pub speaker: String,
    /// Message text after `": "`.
    pub message: String,
}

/// A transcript that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    lines: Vec<TranscriptLine>,
    raw: String,
}

impl Transcript {
    /// Accepted message lines in order.
    #[must_use]
    pub fn lines(&self) -> &[TranscriptLine] {
        &self.lines
    }

    /// The exact text that was validated.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Number of message lines.
    #[must_use]
    pub fn message_count(&self) -> usize {
        self.lines.len()
    }

    /// Consumes the transcript and returns the validated text.
    #[must_use]
    pub fn into_raw(self) -> String {
        self.raw
    }
}

/// Why a transcript was rejected. Validation stops at the first problem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranscriptError {
    /// A non-blank line does not match `<speaker>: <message>`.
    #[error("line {line}: invalid format: {text:?}")]
    InvalidFormat {
        /// 1-based line number.
        line: usize,
        /// The offending line.
        text: String,
    },

    /// A line names a speaker outside the allowed set.
    #[error("line {line}: unexpected speaker {speaker:?}")]
    UnexpectedSpeaker {
        /// 1-based line number.
        line: usize,
        /// The speaker that is not allowed.
        speaker: String,
    },

    /// The text holds no message lines at all.
    #[error("no valid messages found")]
    NoMessages,
}

impl TranscriptError {
    /// Line number of the violation, when it is tied to a line.
    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        match self {
            Self::InvalidFormat { line, .. } | Self::UnexpectedSpeaker { line, .. } => Some(*line),
            Self::NoMessages => None,
        }
    }
}

/// Validates `text` against the line grammar and the allowed speakers.
///
/// Blank lines are skipped but still counted for line numbers.
///
/// # Examples
///
/// ```
/// use acquire::transcript::{validate_transcript, SpeakerSet, TranscriptError};
///
/// let allowed = SpeakerSet::from_iter(["alex", "sam"]);
/// let transcript = validate_transcript("alex: hi\n\nsam: hello", &allowed).unwrap();
/// assert_eq!(transcript.message_count(), 2);
///
/// let err = validate_transcript("alex: hi\nkim: hey", &allowed).unwrap_err();
/// assert_eq!(err.line(), Some(2));
/// ```
pub fn validate_transcript(text: &str, allowed: &SpeakerSet) -> Result<Transcript, TranscriptError> {
    let mut lines = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let number = index + 1;
        if line.trim().is_empty() {
            continue;
        }

        let captures = MESSAGE_RE
            .captures(line)
            .ok_or_else(|| TranscriptError::InvalidFormat {
                line: number,
                text: line.to_string(),
            })?;

        let speaker = &captures[1];
        if !allowed.contains(speaker) {
            return Err(TranscriptError::UnexpectedSpeaker {
                line: number,
                speaker: speaker.to_string(),
            });
        }

        lines.push(TranscriptLine {
            number,
            speaker: speaker.to_string(),
            message: captures[2].to_string(),
        });
    }

    if lines.is_empty() {
        return Err(TranscriptError::NoMessages);
    }

    Ok(Transcript {
        lines,
        raw: text.to_string(),
    })
}
