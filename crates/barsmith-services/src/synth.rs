//! Subtractive tone voice: sawtooth into a one-pole low-pass with an
//! attack/decay envelope and a short release ramp at the end of the note.

/// Voice parameters
#[derive(Debug, Clone)]
pub struct SynthParams {
    /// Peak output level (full scale = 1.0)
    pub level: f64,
    /// Linear attack time in seconds
    pub attack: f64,
    /// Exponential decay time constant in seconds
    pub decay: f64,
    /// Fraction of the peak the decay settles towards
    pub sustain: f64,
    /// Linear fade-out at the end of the note, in seconds
    pub release: f64,
    /// Low-pass cutoff in Hz
    pub cutoff: f64,
}

impl Default for SynthParams {
    fn default() -> Self {
        // Four simultaneous tones (a triad plus the melody) peak at 0.8
        Self {
            level: 0.2,
            attack: 0.005,
            decay: 0.35,
            sustain: 0.4,
            release: 0.01,
            cutoff: 2400.0,
        }
    }
}

/// State for one sounding tone
#[derive(Debug, Clone)]
struct ToneVoice {
    freq: f64,
    phase: f64,
    amp_env: f64,
    filter_state: f64,
    age: usize,
}

impl ToneVoice {
    fn new(freq: f64) -> Self {
        Self {
            freq,
            phase: 0.0,
            amp_env: 0.0,
            filter_state: 0.0,
            age: 0,
        }
    }

    fn tick(&mut self, sample_rate: f64, remaining: usize, params: &SynthParams) -> f64 {
        let dt = 1.0 / sample_rate;
        let t = self.age as f64 * dt;
        self.age += 1;

        // Naive sawtooth in [-1, 1)
        self.phase = (self.phase + self.freq * dt).fract();
        let osc = 2.0 * self.phase - 1.0;

        // One-pole low-pass
        let alpha = 1.0 - (-std::f64::consts::TAU * params.cutoff * dt).exp();
        self.filter_state += alpha * (osc - self.filter_state);

        // Attack ramp, then decay towards the sustain level
        self.amp_env = if t < params.attack {
            t / params.attack
        } else {
            let decayed = (-(t - params.attack) / params.decay).exp();
            params.sustain + (1.0 - params.sustain) * decayed
        };

        let release_len = (params.release * sample_rate).max(1.0);
        let release_gain = (remaining as f64 / release_len).min(1.0);

        self.filter_state * self.amp_env * release_gain * params.level
    }
}

/// Render `frames` mono samples of a tone at `freq` Hz
pub fn render_tone(freq: f64, frames: usize, sample_rate: u32, params: &SynthParams) -> Vec<f32> {
    let mut voice = ToneVoice::new(freq);
    let sr = sample_rate as f64;
    (0..frames)
        .map(|i| voice.tick(sr, frames - i - 1, params) as f32)
        .collect()
}
