//! Stochastic riff generation over a 16-slot sixteenth-note grid

use serde::Serialize;

use crate::note::{Note, PitchClass};
use crate::scale::Scale;

/// Grid slots per riff (one bar of sixteenth notes)
pub const RIFF_SLOTS: usize = 16;

/// Bounds on the number of chord-tone anchors per riff
pub const MIN_ANCHORS: usize = 2;
pub const MAX_ANCHORS: usize = 5;

/// Fill probabilities for empty slots, chosen once per riff
pub const ENERGY_LEVELS: [f64; 3] = [0.4, 0.6, 0.8];

/// One chord's worth of melody
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Riff {
    pub notes: Vec<Note>,
    /// Even slots where a chord tone was placed, in placement order
    pub anchors: Vec<usize>,
    /// Probability used to fill remaining rests with scale tones
    pub energy: f64,
}

/// Generate a riff against `scale`.
///
/// Chord tones go down first on 2-5 distinct even slots, each lasting one or
/// two grid cells. Remaining rests are then filled with scale tones, each
/// with probability equal to the riff's energy.
pub fn generate_riff(scale: &Scale, rng: &mut fastrand::Rng) -> Riff {
    let mut mask = [PitchClass::Rest; RIFF_SLOTS];
    let anchor_count = rng.usize(MIN_ANCHORS..=MAX_ANCHORS);
    let energy = ENERGY_LEVELS[rng.usize(..ENERGY_LEVELS.len())];

    let chord_tones = scale.chord_tones();
    let scale_tones = scale.notes();

    let mut starts: Vec<usize> = (0..RIFF_SLOTS).step_by(2).collect();
    rng.shuffle(&mut starts);
    starts.truncate(anchor_count);

    for &pos in &starts {
        let tone = chord_tones[rng.usize(..chord_tones.len())];
        let eighth = rng.bool();
        mask[pos] = tone;
        if eighth {
            mask[pos + 1] = tone;
        }
    }

    for slot in mask.iter_mut() {
        if slot.is_rest() && rng.f64() < energy {
            *slot = scale_tones[rng.usize(..scale_tones.len())];
        }
    }

    Riff {
        notes: mask.into_iter().map(Note::sixteenth).collect(),
        anchors: starts,
        energy,
    }
}
