//! Pitch classes and notes

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{BarsmithError, Result};

/// Note durations as fractions of a whole note (4 = quarter, 16 = sixteenth)
pub const VALID_DURATIONS: [u8; 5] = [1, 2, 4, 8, 16];

/// Duration of one riff grid slot
pub const SIXTEENTH: u8 = 16;

/// One of the 12 chromatic pitch names, or a rest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PitchClass {
    #[serde(rename = "a")]
    A,
    #[serde(rename = "a#")]
    ASharp,
    #[serde(rename = "b")]
    B,
    #[serde(rename = "c")]
    C,
    #[serde(rename = "c#")]
    CSharp,
    #[serde(rename = "d")]
    D,
    #[serde(rename = "d#")]
    DSharp,
    #[serde(rename = "e")]
    E,
    #[serde(rename = "f")]
    F,
    #[serde(rename = "f#")]
    FSharp,
    #[serde(rename = "g")]
    G,
    #[serde(rename = "g#")]
    GSharp,
    #[serde(rename = "r")]
    Rest,
}

impl PitchClass {
    /// Chromatic reference in cyclic order, starting at A
    pub const CHROMATIC: [PitchClass; 12] = [
        Self::A,
        Self::ASharp,
        Self::B,
        Self::C,
        Self::CSharp,
        Self::D,
        Self::DSharp,
        Self::E,
        Self::F,
        Self::FSharp,
        Self::G,
        Self::GSharp,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::A => "a",
            Self::ASharp => "a#",
            Self::B => "b",
            Self::C => "c",
            Self::CSharp => "c#",
            Self::D => "d",
            Self::DSharp => "d#",
            Self::E => "e",
            Self::F => "f",
            Self::FSharp => "f#",
            Self::G => "g",
            Self::GSharp => "g#",
            Self::Rest => "r",
        }
    }

    pub fn is_rest(&self) -> bool {
        *self == Self::Rest
    }

    /// Position in [`PitchClass::CHROMATIC`], `None` for rests
    pub fn chromatic_index(&self) -> Option<usize> {
        Self::CHROMATIC.iter().position(|p| p == self)
    }

    /// MIDI note number in the fourth octave (C4 = 60, A4 = 69).
    ///
    /// The chromatic reference starts at A, so A..B land above C4 and
    /// C..G# count up from middle C.
    pub fn midi_note(&self) -> Option<u8> {
        let idx = self.chromatic_index()? as u8;
        Some(if idx < 3 { 69 + idx } else { 57 + idx })
    }

    /// Equal-tempered frequency in Hz (A4 = 440)
    pub fn frequency(&self) -> Option<f64> {
        let midi = self.midi_note()?;
        Some(440.0 * 2.0_f64.powf((midi as f64 - 69.0) / 12.0))
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PitchClass {
    type Err = BarsmithError;

    fn from_str(s: &str) -> Result<Self> {
        if s == "r" {
            return Ok(Self::Rest);
        }
        Self::CHROMATIC
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| BarsmithError::InvalidPitch(s.to_string()))
    }
}

/// An immutable pitch + duration pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Note {
    pitch: PitchClass,
    duration: u8,
}

impl Note {
    pub fn new(pitch: PitchClass, duration: u8) -> Result<Self> {
        if !VALID_DURATIONS.contains(&duration) {
            return Err(BarsmithError::InvalidDuration(duration));
        }
        Ok(Self { pitch, duration })
    }

    /// Build a note from its lowercase name, e.g. `"c#"` or `"r"`
    pub fn from_name(name: &str, duration: u8) -> Result<Self> {
        let pitch = name.parse()?;
        Self::new(pitch, duration)
    }

    pub fn rest(duration: u8) -> Result<Self> {
        Self::new(PitchClass::Rest, duration)
    }

    /// A sixteenth note; infallible since [`SIXTEENTH`] is a valid duration
    pub(crate) fn sixteenth(pitch: PitchClass) -> Self {
        Self { pitch, duration: SIXTEENTH }
    }

    pub fn pitch(&self) -> PitchClass {
        self.pitch
    }

    pub fn duration(&self) -> u8 {
        self.duration
    }

    pub fn is_rest(&self) -> bool {
        self.pitch.is_rest()
    }

    /// Length in quarter-note beats
    pub fn beats(&self) -> f64 {
        4.0 / self.duration as f64
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.pitch, self.duration)
    }
}
