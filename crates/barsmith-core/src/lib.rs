//! barsmith-core: Composition model and PCM mixing for barsmith
//!
//! A bar is composed by walking a chord-transition graph for four steps,
//! deriving a modal scale for each chord, and riffing sixteen sixteenth notes
//! over each scale. Rendering lives in `barsmith-services`; this crate only
//! holds the musical model and the pure clip mixer.

pub mod bar;
pub mod chord;
mod clip;
mod error;
pub mod mixer;
pub mod note;
pub mod riff;
pub mod scale;

pub use bar::{Bar, BarComposer, CHORDS_PER_BAR, NOTES_PER_BAR, build_progression};
pub use chord::{Chord, ChordKind, Transition};
pub use clip::{DEFAULT_SAMPLE_RATE, PcmClip, PcmFormat};
pub use error::{BarsmithError, Result};
pub use mixer::{concat, mix, mix_all};
pub use note::{Note, PitchClass, SIXTEENTH, VALID_DURATIONS};
pub use riff::{RIFF_SLOTS, Riff, generate_riff};
pub use scale::{Mode, Scale, build_mode};
