//! Error types for barsmith

use thiserror::Error;

use crate::chord::ChordKind;
use crate::clip::PcmFormat;
use crate::note::PitchClass;

#[derive(Debug, Error)]
pub enum BarsmithError {
    #[error("Invalid pitch: {0:?}")]
    InvalidPitch(String),
    #[error("Invalid note duration: {0} (expected one of 1, 2, 4, 8, 16)")]
    InvalidDuration(u8),
    #[error("Invalid chord kind: {0:?} (expected major, minor or m7b5)")]
    InvalidChordKind(String),
    #[error("Unknown mode: {0:?}")]
    UnknownMode(String),
    #[error("No candidate chords follow {root} {kind}")]
    NoCandidates { root: PitchClass, kind: ChordKind },
    #[error("PCM format mismatch: expected {expected}, found {found}")]
    FormatMismatch { expected: PcmFormat, found: PcmFormat },
    #[error("Unsupported sample width: {0} bits")]
    UnsupportedFormat(u16),
    #[error("Nothing to mix")]
    EmptyMix,
}

pub type Result<T> = std::result::Result<T, BarsmithError>;
