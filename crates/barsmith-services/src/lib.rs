//! barsmith-services: Synthesis, WAV I/O, and the bar rendering pipeline

mod error;
pub mod pipeline;
pub mod renderer;
pub mod synth;
pub mod wav_io;

pub use error::{RenderError, Result};
pub use pipeline::{BarPipeline, RenderSettings, RenderedBar, bar_path, render_bars, stem_path};
pub use renderer::{
    AudioRenderer, DEFAULT_BPM, MAX_BPM, MAX_SAMPLE_RATE, MIN_BPM, MIN_SAMPLE_RATE, check_settings,
};
pub use synth::{SynthParams, render_tone};
pub use wav_io::{append_files, mix_files, read_wav, write_wav};
