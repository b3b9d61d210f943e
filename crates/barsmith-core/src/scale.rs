//! Mode derivation: scales built by walking a rotated Ionian interval pattern

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::chord::ChordKind;
use crate::error::{BarsmithError, Result};
use crate::note::PitchClass;

/// Whole/half-step distances of the major scale
pub const IONIAN_PATTERN: [usize; 7] = [2, 2, 1, 2, 2, 2, 1];

/// Number of pitches in a built scale (7 steps plus the octave)
pub const SCALE_LEN: usize = 8;

/// The seven diatonic modes, each a rotation of [`IONIAN_PATTERN`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    Ionian,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Aeolian,
    Locrian,
}

impl Mode {
    pub const ALL: [Mode; 7] = [
        Self::Ionian,
        Self::Dorian,
        Self::Phrygian,
        Self::Lydian,
        Self::Mixolydian,
        Self::Aeolian,
        Self::Locrian,
    ];

    /// How far the Ionian pattern is rotated to produce this mode
    pub fn shift(&self) -> usize {
        match self {
            Self::Ionian => 0,
            Self::Dorian => 1,
            Self::Phrygian => 2,
            Self::Lydian => 3,
            Self::Mixolydian => 4,
            Self::Aeolian => 5,
            Self::Locrian => 6,
        }
    }

    /// Step pattern for this mode
    pub fn intervals(&self) -> [usize; 7] {
        let mut pattern = IONIAN_PATTERN;
        pattern.rotate_left(self.shift());
        pattern
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Ionian => "Ionian",
            Self::Dorian => "Dorian",
            Self::Phrygian => "Phrygian",
            Self::Lydian => "Lydian",
            Self::Mixolydian => "Mixolydian",
            Self::Aeolian => "Aeolian",
            Self::Locrian => "Locrian",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = BarsmithError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| BarsmithError::UnknownMode(s.to_string()))
    }
}

/// An 8-pitch mode rooted on a pitch class. Degree 7 repeats the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Scale {
    mode: Mode,
    notes: [PitchClass; SCALE_LEN],
}

impl Scale {
    /// Pick a mode from `kind`'s whitelist and build it on `root`
    pub fn for_chord(root: PitchClass, kind: ChordKind, rng: &mut fastrand::Rng) -> Result<Self> {
        let modes = kind.modes();
        let mode = modes[rng.usize(..modes.len())];
        build_mode(root, mode)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn notes(&self) -> &[PitchClass; SCALE_LEN] {
        &self.notes
    }

    pub fn root(&self) -> PitchClass {
        self.notes[0]
    }

    /// Pitch at a 0-based scale degree (0..=7)
    pub fn degree(&self, degree: usize) -> Option<PitchClass> {
        self.notes.get(degree).copied()
    }

    /// The triad: degrees 0, 2 and 4
    pub fn chord_tones(&self) -> [PitchClass; 3] {
        [self.notes[0], self.notes[2], self.notes[4]]
    }

    pub fn contains(&self, pitch: PitchClass) -> bool {
        self.notes.contains(&pitch)
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} [", self.root(), self.mode)?;
        for (i, p) in self.notes.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{p}")?;
        }
        f.write_str("]")
    }
}

/// Build `mode` on `root`.
///
/// Walks a doubled chromatic reference so the cumulative index never has to
/// wrap: the root sits in the first copy and the pattern spans 12 semitones.
pub fn build_mode(root: PitchClass, mode: Mode) -> Result<Scale> {
    let doubled: [PitchClass; 24] = std::array::from_fn(|i| PitchClass::CHROMATIC[i % 12]);
    let start = doubled
        .iter()
        .position(|&p| p == root)
        .ok_or_else(|| BarsmithError::InvalidPitch(root.to_string()))?;

    let mut notes = [root; SCALE_LEN];
    let mut idx = start;
    for (slot, step) in notes.iter_mut().skip(1).zip(mode.intervals()) {
        idx += step;
        *slot = doubled[idx];
    }

    Ok(Scale { mode, notes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use PitchClass::*;

    #[test]
    fn test_c_ionian() {
        let scale = build_mode(C, Mode::Ionian).unwrap();
        assert_eq!(scale.notes(), &[C, D, E, F, G, A, B, C]);
        assert_eq!(scale.chord_tones(), [C, E, G]);
    }

    #[test]
    fn test_modes_on_white_keys() {
        assert_eq!(build_mode(D, Mode::Dorian).unwrap().notes(), &[D, E, F, G, A, B, C, D]);
        assert_eq!(build_mode(E, Mode::Phrygian).unwrap().notes(), &[E, F, G, A, B, C, D, E]);
        assert_eq!(build_mode(F, Mode::Lydian).unwrap().notes(), &[F, G, A, B, C, D, E, F]);
        assert_eq!(build_mode(G, Mode::Mixolydian).unwrap().notes(), &[G, A, B, C, D, E, F, G]);
        assert_eq!(build_mode(A, Mode::Aeolian).unwrap().notes(), &[A, B, C, D, E, F, G, A]);
        assert_eq!(build_mode(B, Mode::Locrian).unwrap().notes(), &[B, C, D, E, F, G, A, B]);
    }

    #[test]
    fn test_wraps_past_top_of_reference() {
        // G# sits at the end of the reference; its scale runs into the second copy
        let scale = build_mode(GSharp, Mode::Ionian).unwrap();
        assert_eq!(scale.notes(), &[GSharp, ASharp, C, CSharp, DSharp, F, G, GSharp]);
    }

    #[test]
    fn test_every_root_and_mode() {
        for root in PitchClass::CHROMATIC {
            for mode in Mode::ALL {
                let scale = build_mode(root, mode).unwrap();
                let notes = scale.notes();
                assert_eq!(notes.len(), 8);
                assert_eq!(notes[0], root);
                assert_eq!(notes[7], root);
                assert!(notes.iter().all(|p| PitchClass::CHROMATIC.contains(p)));
                assert_eq!(scale.mode(), mode);
            }
        }
    }

    #[test]
    fn test_rest_root_rejected() {
        assert!(matches!(build_mode(Rest, Mode::Dorian), Err(BarsmithError::InvalidPitch(_))));
    }

    #[test]
    fn test_mode_intervals_sum_to_octave() {
        for mode in Mode::ALL {
            assert_eq!(mode.intervals().iter().sum::<usize>(), 12);
        }
        assert_eq!(Mode::Locrian.intervals(), [1, 2, 2, 1, 2, 2, 2]);
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("dorian".parse::<Mode>().unwrap(), Mode::Dorian);
        assert_eq!("LOCRIAN".parse::<Mode>().unwrap(), Mode::Locrian);
        assert!(matches!("blues".parse::<Mode>(), Err(BarsmithError::UnknownMode(_))));
    }

    #[test]
    fn test_for_chord_respects_whitelist() {
        let mut rng = fastrand::Rng::with_seed(7);
        for kind in ChordKind::ALL {
            for _ in 0..50 {
                let scale = Scale::for_chord(D, kind, &mut rng).unwrap();
                assert!(kind.modes().contains(&scale.mode()));
                assert_eq!(scale.root(), D);
            }
        }
    }
}
