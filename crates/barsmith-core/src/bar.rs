//! Bar composition: a Markov walk over chords, then one riff per chord

use serde::Serialize;
use tracing::debug;

use crate::chord::{Chord, ChordKind};
use crate::error::{BarsmithError, Result};
use crate::note::{Note, PitchClass};
use crate::riff::{RIFF_SLOTS, generate_riff};

pub const CHORDS_PER_BAR: usize = 4;
pub const NOTES_PER_BAR: usize = CHORDS_PER_BAR * RIFF_SLOTS;

/// Chord the walk starts from when nothing has been composed yet
pub const SEED_ROOT: PitchClass = PitchClass::C;
pub const SEED_KIND: ChordKind = ChordKind::Major;

/// A composed bar: four chords and the 64-note melody riffed over them
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub chords: Vec<Chord>,
    pub notes: Vec<Note>,
}

impl Bar {
    /// The sixteen notes played over chord `index`
    pub fn riff(&self, index: usize) -> Option<&[Note]> {
        let start = index * RIFF_SLOTS;
        self.notes.get(start..start + RIFF_SLOTS)
    }

    pub fn last_chord(&self) -> Option<&Chord> {
        self.chords.last()
    }
}

/// Walk [`CHORDS_PER_BAR`] steps of the chord graph starting after `last`.
///
/// With no `last`, the walk starts from [`SEED_KIND`] on [`SEED_ROOT`]. The
/// seed chord itself is not part of the result.
pub fn build_progression(last: Option<Chord>, rng: &mut fastrand::Rng) -> Result<Vec<Chord>> {
    let mut current = match last {
        Some(chord) => chord,
        None => Chord::new(SEED_ROOT, SEED_KIND, rng)?,
    };

    let mut chords = Vec::with_capacity(CHORDS_PER_BAR);
    for _ in 0..CHORDS_PER_BAR {
        let options = current.next_chords(rng)?;
        if options.is_empty() {
            return Err(BarsmithError::NoCandidates {
                root: current.root(),
                kind: current.kind(),
            });
        }
        current = options[rng.usize(..options.len())];
        chords.push(current);
    }

    Ok(chords)
}

/// Composes bars one at a time, carrying the last chord forward so
/// successive bars connect harmonically.
#[derive(Debug, Clone)]
pub struct BarComposer {
    rng: fastrand::Rng,
    last: Option<Chord>,
}

impl Default for BarComposer {
    fn default() -> Self {
        Self::with_rng(fastrand::Rng::new())
    }
}

impl BarComposer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deterministic composer: same seed, same sequence of bars
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(fastrand::Rng::with_seed(seed))
    }

    pub fn with_rng(rng: fastrand::Rng) -> Self {
        Self { rng, last: None }
    }

    /// Continue from `chord` instead of the default seed chord
    pub fn with_last(mut self, chord: Chord) -> Self {
        self.last = Some(chord);
        self
    }

    pub fn last_chord(&self) -> Option<&Chord> {
        self.last.as_ref()
    }

    /// Forget harmonic history; the next bar starts from the seed chord
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Compose one bar.
    ///
    /// The carried chord only advances once the whole bar is built, so a
    /// failed call leaves the composer as it was.
    pub fn compose_bar(&mut self) -> Result<Bar> {
        let chords = build_progression(self.last, &mut self.rng)?;
        debug!(
            progression = %chords.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(" "),
            "Built chord progression"
        );

        let mut notes = Vec::with_capacity(NOTES_PER_BAR);
        for chord in &chords {
            let riff = generate_riff(chord.scale(), &mut self.rng);
            notes.extend(riff.notes);
        }

        self.last = chords.last().copied();
        Ok(Bar { chords, notes })
    }
}
