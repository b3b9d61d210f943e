//! Compose, render and write bars to WAV files

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use barsmith_core::{Bar, BarComposer, DEFAULT_SAMPLE_RATE, PcmClip, mix};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::renderer::{AudioRenderer, DEFAULT_BPM};
use crate::wav_io::write_wav;

/// Tempo, output format and randomness for a rendering run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub bpm: f64,
    pub sample_rate: u32,
    /// Fixed RNG seed; `None` seeds from the OS
    pub seed: Option<u64>,
    /// Also write the harmony and melody tracks of each bar
    pub write_stems: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            bpm: DEFAULT_BPM,
            sample_rate: DEFAULT_SAMPLE_RATE,
            seed: None,
            write_stems: false,
        }
    }
}

/// A composed bar with its rendered tracks
#[derive(Debug, Clone)]
pub struct RenderedBar {
    pub bar: Bar,
    pub harmony: PcmClip,
    pub melody: PcmClip,
    /// Harmony and melody summed; this is what gets written
    pub mix: PcmClip,
}

/// Path of bar `index` under `prefix`: `{prefix}_{index}.wav`
pub fn bar_path(prefix: &Path, index: usize) -> PathBuf {
    suffixed(prefix, &format!("_{index}.wav"))
}

/// Path of one stem of bar `index`: `{prefix}_{index}_{stem}.wav`
pub fn stem_path(prefix: &Path, index: usize, stem: &str) -> PathBuf {
    with_stem(&bar_path(prefix, index), stem)
}

/// `dir/name.wav` -> `dir/name_{stem}.wav`
fn with_stem(path: &Path, stem: &str) -> PathBuf {
    suffixed(&path.with_extension(""), &format!("_{stem}.wav"))
}

fn suffixed(prefix: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(prefix.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

pub struct BarPipeline {
    composer: BarComposer,
    renderer: AudioRenderer,
    write_stems: bool,
}

impl BarPipeline {
    /// Fails with [`crate::RenderError::InvalidSettings`] when the tempo or sample
    /// rate is out of range
    pub fn new(settings: &RenderSettings) -> Result<Self> {
        let composer = match settings.seed {
            Some(seed) => BarComposer::with_seed(seed),
            None => BarComposer::new(),
        };
        Self::with_composer(composer, settings)
    }

    pub fn with_composer(composer: BarComposer, settings: &RenderSettings) -> Result<Self> {
        Ok(Self {
            composer,
            renderer: AudioRenderer::new(settings.sample_rate, settings.bpm)?,
            write_stems: settings.write_stems,
        })
    }

    pub fn composer(&self) -> &BarComposer {
        &self.composer
    }

    pub fn renderer(&self) -> &AudioRenderer {
        &self.renderer
    }

    /// Render an already composed bar
    pub fn render(&self, bar: Bar) -> Result<RenderedBar> {
        let harmony = self.renderer.render_harmony(&bar.chords)?;
        let melody = self.renderer.render_melody(&bar.notes)?;
        let mix = mix(&harmony, &melody)?;
        Ok(RenderedBar {
            bar,
            harmony,
            melody,
            mix,
        })
    }

    /// Compose and render the next bar without touching the filesystem
    pub fn render_bar(&mut self) -> Result<RenderedBar> {
        let mut composer = self.composer.clone();
        let rendered = self.render(composer.compose_bar()?)?;
        self.composer = composer;
        Ok(rendered)
    }

    /// Compose, render and write the next bar to `path`.
    ///
    /// Harmonic state only advances when the file (and any stems) were
    /// written, so a failed bar can be retried from the same chord.
    pub fn write_bar(&mut self, path: &Path) -> Result<RenderedBar> {
        let mut composer = self.composer.clone();
        let rendered = self.render(composer.compose_bar()?)?;

        write_wav(path, &rendered.mix)?;
        if self.write_stems {
            write_wav(&with_stem(path, "harmony"), &rendered.harmony)?;
            write_wav(&with_stem(path, "melody"), &rendered.melody)?;
        }

        self.composer = composer;
        Ok(rendered)
    }

    /// Write `count` bars as `{prefix}_0.wav` .. `{prefix}_{count-1}.wav`
    pub fn render_bars(&mut self, count: usize, prefix: &Path) -> Result<Vec<PathBuf>> {
        let mut paths = Vec::with_capacity(count);
        for index in 0..count {
            let path = bar_path(prefix, index);
            let rendered = self.write_bar(&path)?;
            let chords: Vec<String> = rendered.bar.chords.iter().map(|c| c.to_string()).collect();
            info!(
                bar = index,
                chords = %chords.join(" "),
                frames = rendered.mix.frames(),
                "Wrote {}",
                path.display()
            );
            paths.push(path);
        }
        Ok(paths)
    }
}

/// Render `count` bars with default settings and an OS-seeded RNG
pub fn render_bars(count: usize, prefix: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    BarPipeline::new(&RenderSettings::default())?.render_bars(count, prefix.as_ref())
}
