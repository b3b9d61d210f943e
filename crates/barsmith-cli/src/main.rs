//! barsmith - compose bars of music and render them to WAV files.
//!
//! Settings come from `$CONFIG_DIR/barsmith/config.toml` when present;
//! command-line flags override them.

mod config;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use barsmith_core::Bar;
use barsmith_services::{BarPipeline, bar_path};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::{AppConfig, config_path, load_config};

/// Procedural bar composer
#[derive(Parser, Debug)]
#[command(name = "barsmith")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Compose chord progressions with riffs and render them to WAV", long_about = None)]
struct Args {
    /// Output prefix; bar i is written to PREFIX_i.wav
    #[arg(value_name = "PREFIX")]
    prefix: Option<PathBuf>,

    /// Number of bars to render
    #[arg(short = 'n', long)]
    bars: Option<usize>,

    /// RNG seed for reproducible output
    #[arg(short, long)]
    seed: Option<u64>,

    /// Tempo in beats per minute
    #[arg(long)]
    bpm: Option<f64>,

    /// Output sample rate in Hz
    #[arg(long)]
    sample_rate: Option<u32>,

    /// Also write PREFIX_i_harmony.wav and PREFIX_i_melody.wav
    #[arg(long)]
    stems: bool,

    /// Print each bar's chords and notes as JSON
    #[arg(long)]
    describe: bool,

    /// Config file to read instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

impl Args {
    /// Overlay command-line flags on top of file settings
    fn apply(&self, config: &mut AppConfig) {
        let render = &mut config.render;
        if let Some(bpm) = self.bpm {
            render.bpm = bpm;
        }
        if let Some(rate) = self.sample_rate {
            render.sample_rate = rate;
        }
        if self.seed.is_some() {
            render.seed = self.seed;
        }
        render.write_stems |= self.stems;

        if let Some(prefix) = &self.prefix {
            config.output.prefix = prefix.clone();
        }
        if let Some(bars) = self.bars {
            config.output.bars = bars;
        }
    }
}

/// One `--describe` line; non-UTF-8 paths are printed lossily
fn describe(index: usize, path: &Path, bar: &Bar) -> serde_json::Value {
    serde_json::json!({
        "index": index,
        "path": path.display().to_string(),
        "chords": bar.chords,
        "notes": bar.notes,
    })
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(
                    "barsmith=info"
                        .parse::<tracing_subscriber::filter::Directive>()
                        .context("Invalid log directive")?,
                ),
        )
        .init();

    let args = Args::parse();

    let path = args.config.clone().unwrap_or_else(config_path);
    let mut config = load_config(&path);
    args.apply(&mut config);
    let mut pipeline = BarPipeline::new(&config.render).context("Invalid render settings")?;

    if let Some(parent) = config.output.prefix.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory {}", parent.display()))?;
    }

    tracing::info!(
        bars = config.output.bars,
        bpm = config.render.bpm,
        sample_rate = config.render.sample_rate,
        "Rendering to {}_*.wav",
        config.output.prefix.display()
    );

    let prefix = &config.output.prefix;

    if !args.describe {
        pipeline
            .render_bars(config.output.bars, prefix)
            .with_context(|| format!("Failed to render bars to {}", prefix.display()))?;
        return Ok(());
    }

    for index in 0..config.output.bars {
        let path = bar_path(prefix, index);
        let rendered = pipeline
            .write_bar(&path)
            .with_context(|| format!("Failed to render {}", path.display()))?;
        println!("{}", describe(index, &path, &rendered.bar));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_BARS;
    use barsmith_core::{BarComposer, CHORDS_PER_BAR, NOTES_PER_BAR};

    #[test]
    fn test_flags_override_config() {
        let args = Args::parse_from([
            "barsmith", "out/take", "--bars", "2", "--bpm", "100", "--seed", "9", "--stems",
        ]);
        let mut config = AppConfig::default();
        config.render.sample_rate = 22050;
        args.apply(&mut config);

        assert_eq!(config.output.prefix, PathBuf::from("out/take"));
        assert_eq!(config.output.bars, 2);
        assert_eq!(config.render.bpm, 100.0);
        assert_eq!(config.render.seed, Some(9));
        assert_eq!(config.render.sample_rate, 22050);
        assert!(config.render.write_stems);
    }

    #[test]
    fn test_unset_flags_keep_config() {
        let args = Args::parse_from(["barsmith"]);
        let mut config = AppConfig::default();
        config.render.seed = Some(3);
        config.render.write_stems = true;
        args.apply(&mut config);

        assert_eq!(config.render.seed, Some(3));
        assert!(config.render.write_stems);
        assert_eq!(config.output.bars, DEFAULT_BARS);
    }

    #[test]
    fn test_bad_tempo_flag_rejected_before_rendering() {
        let args = Args::parse_from(["barsmith", "--bpm", "0"]);
        let mut config = AppConfig::default();
        args.apply(&mut config);
        assert!(BarPipeline::new(&config.render).is_err());
    }

    #[test]
    fn test_describe_line() {
        let bar = BarComposer::with_seed(4).compose_bar().unwrap();
        let value = describe(2, Path::new("out/take_2.wav"), &bar);
        assert_eq!(value["index"], 2);
        assert_eq!(value["path"], "out/take_2.wav");
        assert_eq!(value["chords"].as_array().unwrap().len(), CHORDS_PER_BAR);
        assert_eq!(value["notes"].as_array().unwrap().len(), NOTES_PER_BAR);
    }

    #[cfg(unix)]
    #[test]
    fn test_describe_non_utf8_path() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let bar = BarComposer::with_seed(4).compose_bar().unwrap();
        let path = Path::new(OsStr::from_bytes(b"take_\xff_0.wav"));
        let value = describe(0, path, &bar);
        assert!(value["path"].as_str().unwrap().starts_with("take_"));
    }
}
