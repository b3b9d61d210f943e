//! Chords and the chord-transition state machine

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use self::ChordKind::{HalfDiminished as M7b5, Major as Maj, Minor as Min};
use crate::error::{BarsmithError, Result};
use crate::note::PitchClass;
use crate::scale::{Mode, Scale, build_mode};

/// Chord quality. Each kind carries its own mode whitelist and transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ChordKind {
    #[serde(rename = "major")]
    Major,
    #[serde(rename = "minor")]
    Minor,
    #[serde(rename = "m7b5")]
    HalfDiminished,
}

/// One row of a transition table: chords rooted on `degree` of the current
/// chord's scale may take any of the `next` kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub degree: usize,
    pub next: &'static [ChordKind],
}

const fn row(degree: usize, next: &'static [ChordKind]) -> Transition {
    Transition { degree, next }
}

const MAJOR_TRANSITIONS: [Transition; 5] = [
    row(0, &[Maj, Min]),
    row(1, &[Min]),
    row(3, &[Maj]),
    row(4, &[Maj]),
    // leading-tone chord
    row(6, &[M7b5]),
];

const MINOR_TRANSITIONS: [Transition; 5] = [
    row(0, &[Maj, Min]),
    row(1, &[M7b5, Min]),
    row(3, &[Maj]),
    row(4, &[Min]),
    row(6, &[Maj]),
];

const HALF_DIMINISHED_TRANSITIONS: [Transition; 5] = [
    row(0, &[M7b5]),
    row(1, &[Maj]),
    row(3, &[Min]),
    row(4, &[Maj, Min]),
    row(6, &[Maj]),
];

impl ChordKind {
    pub const ALL: [ChordKind; 3] = [Self::Major, Self::Minor, Self::HalfDiminished];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Major => "major",
            Self::Minor => "minor",
            Self::HalfDiminished => "m7b5",
        }
    }

    /// Modes a chord of this kind may take its scale from
    pub fn modes(&self) -> &'static [Mode] {
        match self {
            Self::Major => &[Mode::Ionian, Mode::Mixolydian, Mode::Lydian],
            Self::Minor => &[Mode::Dorian, Mode::Aeolian],
            Self::HalfDiminished => &[Mode::Locrian, Mode::Phrygian],
        }
    }

    pub fn transitions(&self) -> &'static [Transition] {
        match self {
            Self::Major => &MAJOR_TRANSITIONS,
            Self::Minor => &MINOR_TRANSITIONS,
            Self::HalfDiminished => &HALF_DIMINISHED_TRANSITIONS,
        }
    }

    /// Kinds allowed for a chord rooted on `degree`; empty if the degree has no row
    pub fn candidates(&self, degree: usize) -> &'static [ChordKind] {
        self.transitions()
            .iter()
            .find(|t| t.degree == degree)
            .map(|t| t.next)
            .unwrap_or(&[])
    }
}

impl fmt::Display for ChordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ChordKind {
    type Err = BarsmithError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| BarsmithError::InvalidChordKind(s.to_string()))
    }
}

/// A chord: root, kind and the scale derived for it at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Chord {
    root: PitchClass,
    kind: ChordKind,
    scale: Scale,
}

impl Chord {
    /// Build a chord, choosing its scale from the kind's mode whitelist
    pub fn new(root: PitchClass, kind: ChordKind, rng: &mut fastrand::Rng) -> Result<Self> {
        let scale = Scale::for_chord(root, kind, rng)?;
        Ok(Self { root, kind, scale })
    }

    /// Build a chord on an explicit mode
    pub fn with_mode(root: PitchClass, kind: ChordKind, mode: Mode) -> Result<Self> {
        let scale = build_mode(root, mode)?;
        Ok(Self { root, kind, scale })
    }

    /// Parse a root name and kind name, e.g. `("c#", "m7b5")`
    pub fn parse(root: &str, kind: &str, rng: &mut fastrand::Rng) -> Result<Self> {
        let root: PitchClass = root.parse()?;
        let kind: ChordKind = kind.parse()?;
        Self::new(root, kind, rng)
    }

    pub fn root(&self) -> PitchClass {
        self.root
    }

    pub fn kind(&self) -> ChordKind {
        self.kind
    }

    pub fn scale(&self) -> &Scale {
        &self.scale
    }

    pub fn chord_tones(&self) -> [PitchClass; 3] {
        self.scale.chord_tones()
    }

    /// One candidate successor per row of this kind's transition table.
    ///
    /// Each successor is rooted on the scale pitch at the row's degree and
    /// takes a kind drawn uniformly from that row.
    pub fn next_chords(&self, rng: &mut fastrand::Rng) -> Result<Vec<Chord>> {
        self.follow(self.kind.transitions(), rng)
    }

    fn follow(&self, transitions: &[Transition], rng: &mut fastrand::Rng) -> Result<Vec<Chord>> {
        let no_candidates = || BarsmithError::NoCandidates {
            root: self.root,
            kind: self.kind,
        };

        if transitions.is_empty() {
            return Err(no_candidates());
        }

        transitions
            .iter()
            .map(|t| {
                if t.next.is_empty() {
                    return Err(no_candidates());
                }
                let root = self.scale.degree(t.degree).ok_or_else(no_candidates)?;
                let kind = t.next[rng.usize(..t.next.len())];
                Chord::new(root, kind, rng)
            })
            .collect()
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.root, self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chord_tones() {
        let chord = Chord::with_mode(PitchClass::C, ChordKind::Major, Mode::Ionian).unwrap();
        assert_eq!(chord.chord_tones(), [PitchClass::C, PitchClass::E, PitchClass::G]);

        let chord = Chord::with_mode(PitchClass::B, ChordKind::HalfDiminished, Mode::Locrian).unwrap();
        assert_eq!(chord.chord_tones(), [PitchClass::B, PitchClass::D, PitchClass::F]);
    }

    #[test]
    fn test_construction_validation() {
        let mut rng = fastrand::Rng::with_seed(1);
        assert!(matches!(
            Chord::parse("c", "dominant", &mut rng),
            Err(BarsmithError::InvalidChordKind(_))
        ));
        assert!(matches!(Chord::parse("x", "major", &mut rng), Err(BarsmithError::InvalidPitch(_))));
        assert!(matches!(
            Chord::new(PitchClass::Rest, ChordKind::Minor, &mut rng),
            Err(BarsmithError::InvalidPitch(_))
        ));

        let chord = Chord::parse("f#", "m7b5", &mut rng).unwrap();
        assert_eq!(chord.root(), PitchClass::FSharp);
        assert_eq!(chord.kind(), ChordKind::HalfDiminished);
    }

    #[test]
    fn test_next_chords_follow_transition_table() {
        let mut rng = fastrand::Rng::with_seed(42);
        for kind in ChordKind::ALL {
            for root in PitchClass::CHROMATIC {
                for _ in 0..10 {
                    let chord = Chord::new(root, kind, &mut rng).unwrap();
                    let next = chord.next_chords(&mut rng).unwrap();
                    assert_eq!(next.len(), kind.transitions().len());

                    for (t, candidate) in kind.transitions().iter().zip(&next) {
                        assert!(t.next.contains(&candidate.kind()));
                        assert_eq!(Some(candidate.root()), chord.scale().degree(t.degree));
                    }
                }
            }
        }
    }

    #[test]
    fn test_missing_degrees_have_no_candidates() {
        for kind in ChordKind::ALL {
            assert!(kind.candidates(2).is_empty());
            assert!(kind.candidates(5).is_empty());
            assert!(!kind.candidates(0).is_empty());
        }
        assert_eq!(ChordKind::Major.candidates(6), &[ChordKind::HalfDiminished]);
    }

    #[test]
    fn test_transition_tables_are_never_exhausted() {
        for kind in ChordKind::ALL {
            let table = kind.transitions();
            assert!(!table.is_empty(), "{kind} has no transitions");
            for t in table {
                assert!(!t.next.is_empty(), "{kind} degree {} has no kinds", t.degree);
                assert!(t.degree < 7, "{kind} degree {} outside the scale", t.degree);
            }
        }
    }

    #[test]
    fn test_exhausted_table_reports_no_candidates() {
        let mut rng = fastrand::Rng::with_seed(6);
        let chord = Chord::with_mode(PitchClass::D, ChordKind::Minor, Mode::Dorian).unwrap();
        let exhausted = |r: Result<Vec<Chord>>| {
            matches!(
                r,
                Err(BarsmithError::NoCandidates { root: PitchClass::D, kind: ChordKind::Minor })
            )
        };

        assert!(exhausted(chord.follow(&[], &mut rng)));
        assert!(exhausted(chord.follow(&[row(0, &[Maj]), row(3, &[])], &mut rng)));
        assert!(exhausted(chord.follow(&[row(9, &[Maj])], &mut rng)));
        assert_eq!(chord.follow(&[row(4, &[Maj])], &mut rng).unwrap()[0].root(), PitchClass::A);
    }

    #[test]
    fn test_leading_tone_chord() {
        // C Ionian degree 6 is B; a major chord always offers B half-diminished there
        let mut rng = fastrand::Rng::with_seed(3);
        let chord = Chord::with_mode(PitchClass::C, ChordKind::Major, Mode::Ionian).unwrap();
        let next = chord.next_chords(&mut rng).unwrap();
        let last = next.last().unwrap();
        assert_eq!(last.root(), PitchClass::B);
        assert_eq!(last.kind(), ChordKind::HalfDiminished);
    }

    #[test]
    fn test_kind_names() {
        for kind in ChordKind::ALL {
            assert_eq!(kind.name().parse::<ChordKind>().unwrap(), kind);
        }
        assert_eq!(Chord::with_mode(PitchClass::A, ChordKind::Minor, Mode::Aeolian).unwrap().to_string(), "aminor");
    }
}
