//! Note and chord rendering with a per-(root, kind) chord clip cache

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use barsmith_core::{Chord, ChordKind, Note, PcmClip, PcmFormat, PitchClass, concat, mix_all};
use tracing::{debug, trace};

use crate::error::{RenderError, Result};
use crate::synth::{SynthParams, render_tone};

pub const DEFAULT_BPM: f64 = 90.0;

/// Accepted tempo range in BPM
pub const MIN_BPM: f64 = 1.0;
pub const MAX_BPM: f64 = 1000.0;

/// Accepted sample rate range in Hz
pub const MIN_SAMPLE_RATE: u32 = 1000;
pub const MAX_SAMPLE_RATE: u32 = 192_000;

/// Chord tones sound for a whole note
const CHORD_TONE_DURATION: u8 = 1;

type ChordKey = (PitchClass, ChordKind);

/// Turns notes and chords into PCM clips at a fixed tempo.
///
/// Chord clips are cached by root and kind; notes are rendered fresh on
/// every call. The cache is safe to share between threads: clips are
/// synthesized outside the lock and the first insert for a key wins.
pub struct AudioRenderer {
    format: PcmFormat,
    bpm: f64,
    params: SynthParams,
    chord_cache: Mutex<HashMap<ChordKey, Arc<PcmClip>>>,
}

impl Default for AudioRenderer {
    fn default() -> Self {
        Self::build(barsmith_core::DEFAULT_SAMPLE_RATE, DEFAULT_BPM, SynthParams::default())
    }
}

/// Reject tempos and sample rates that would produce empty or unbounded clips
pub fn check_settings(sample_rate: u32, bpm: f64) -> Result<()> {
    if !(MIN_BPM..=MAX_BPM).contains(&bpm) {
        return Err(RenderError::InvalidSettings(format!(
            "tempo {bpm} BPM outside {MIN_BPM}..={MAX_BPM}"
        )));
    }
    if !(MIN_SAMPLE_RATE..=MAX_SAMPLE_RATE).contains(&sample_rate) {
        return Err(RenderError::InvalidSettings(format!(
            "sample rate {sample_rate} Hz outside {MIN_SAMPLE_RATE}..={MAX_SAMPLE_RATE}"
        )));
    }
    Ok(())
}

impl AudioRenderer {
    pub fn new(sample_rate: u32, bpm: f64) -> Result<Self> {
        Self::with_params(sample_rate, bpm, SynthParams::default())
    }

    pub fn with_params(sample_rate: u32, bpm: f64, params: SynthParams) -> Result<Self> {
        check_settings(sample_rate, bpm)?;
        Ok(Self::build(sample_rate, bpm, params))
    }

    fn build(sample_rate: u32, bpm: f64, params: SynthParams) -> Self {
        Self {
            format: PcmFormat::mono16(sample_rate),
            bpm,
            params,
            chord_cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn format(&self) -> PcmFormat {
        self.format
    }

    pub fn bpm(&self) -> f64 {
        self.bpm
    }

    /// Seconds per beat (quarter note) at current tempo
    pub fn seconds_per_beat(&self) -> f64 {
        60.0 / self.bpm
    }

    /// Frames occupied by a note of the given duration value
    pub fn note_frames(&self, duration: u8) -> usize {
        let seconds = self.seconds_per_beat() * 4.0 / duration as f64;
        (seconds * self.format.sample_rate as f64).round() as usize
    }

    fn render_pitch(&self, pitch: PitchClass, duration: u8) -> PcmClip {
        let frames = self.note_frames(duration);
        match pitch.frequency() {
            Some(freq) => {
                let samples = render_tone(freq, frames, self.format.sample_rate, &self.params);
                PcmClip::from_f32(self.format, &samples)
            }
            None => PcmClip::silence(self.format, frames),
        }
    }

    /// Render one note; rests come back as silence of the same length
    pub fn render_note(&self, note: &Note) -> PcmClip {
        self.render_pitch(note.pitch(), note.duration())
    }

    /// Render a chord's three tones sounding together for a whole note
    pub fn render_chord(&self, chord: &Chord) -> Result<Arc<PcmClip>> {
        let key = (chord.root(), chord.kind());

        let cached = self
            .chord_cache
            .lock()
            .ok()
            .and_then(|cache| cache.get(&key).cloned());
        if let Some(clip) = cached {
            trace!("Chord cache hit for {}", chord);
            return Ok(clip);
        }

        let tones: Vec<PcmClip> = chord
            .chord_tones()
            .iter()
            .map(|&p| self.render_pitch(p, CHORD_TONE_DURATION))
            .collect();
        let clip = Arc::new(mix_all(&tones)?);
        debug!("Rendered chord {} ({})", chord, chord.scale());

        let Ok(mut cache) = self.chord_cache.lock() else {
            return Ok(clip);
        };
        Ok(cache.entry(key).or_insert(clip).clone())
    }

    /// Chord clips back to back, one per chord
    pub fn render_harmony(&self, chords: &[Chord]) -> Result<PcmClip> {
        let clips = chords
            .iter()
            .map(|c| self.render_chord(c).map(|clip| (*clip).clone()))
            .collect::<Result<Vec<_>>>()?;
        Ok(concat(&clips)?)
    }

    /// Note clips back to back
    pub fn render_melody(&self, notes: &[Note]) -> Result<PcmClip> {
        let clips: Vec<PcmClip> = notes.iter().map(|n| self.render_note(n)).collect();
        Ok(concat(&clips)?)
    }

    /// Number of distinct chords currently cached
    pub fn cached_chords(&self) -> usize {
        self.chord_cache.lock().map(|c| c.len()).unwrap_or(0)
    }

    pub fn clear_cache(&self) {
        if let Ok(mut cache) = self.chord_cache.lock() {
            cache.clear();
        }
    }
}
