//! PCM clip representation

use std::fmt;

use serde::{Deserialize, Serialize};

pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// Format triple shared by every clip that gets mixed together
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PcmFormat {
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
}

impl Default for PcmFormat {
    fn default() -> Self {
        Self::mono16(DEFAULT_SAMPLE_RATE)
    }
}

impl PcmFormat {
    /// Mono, 16-bit signed samples
    pub fn mono16(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            channels: 1,
            bits_per_sample: 16,
        }
    }
}

impl fmt::Display for PcmFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Hz / {} ch / {}-bit",
            self.sample_rate, self.channels, self.bits_per_sample
        )
    }
}

/// A block of interleaved 16-bit PCM audio
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PcmClip {
    pub format: PcmFormat,
    /// Interleaved samples
    pub samples: Vec<i16>,
}

impl PcmClip {
    pub fn new(format: PcmFormat, samples: Vec<i16>) -> Self {
        Self { format, samples }
    }

    /// `frames` frames of digital silence
    pub fn silence(format: PcmFormat, frames: usize) -> Self {
        Self::new(format, vec![0; frames * format.channels as usize])
    }

    /// Quantize normalized `[-1.0, 1.0]` samples to 16-bit. Out-of-range
    /// input saturates.
    pub fn from_f32(format: PcmFormat, samples: &[f32]) -> Self {
        let samples = samples
            .iter()
            .map(|&s| (s * i16::MAX as f32) as i16)
            .collect();
        Self::new(format, samples)
    }

    /// Number of stored samples (all channels)
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Number of frames (samples per channel)
    pub fn frames(&self) -> usize {
        self.samples.len() / self.format.channels.max(1) as usize
    }

    /// Duration in seconds
    pub fn duration_secs(&self) -> f64 {
        self.frames() as f64 / self.format.sample_rate as f64
    }

    /// Largest absolute sample value
    pub fn peak(&self) -> u16 {
        self.samples.iter().map(|s| s.unsigned_abs()).max().unwrap_or(0)
    }
}
