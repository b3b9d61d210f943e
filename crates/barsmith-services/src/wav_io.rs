//! 16-bit PCM WAV reading/writing and file-level mix/append helpers

use std::path::Path;

use barsmith_core::{BarsmithError, PcmClip, PcmFormat, concat, mix};
use tracing::debug;

use crate::error::{RenderError, Result};

/// Read a 16-bit integer PCM WAV file
pub fn read_wav(path: &Path) -> Result<PcmClip> {
    let mut reader = hound::WavReader::open(path)?;
    let spec = reader.spec();
    if spec.sample_format != hound::SampleFormat::Int || spec.bits_per_sample != 16 {
        return Err(BarsmithError::UnsupportedFormat(spec.bits_per_sample).into());
    }

    let samples = reader.samples::<i16>().collect::<std::result::Result<Vec<_>, _>>()?;
    let format = PcmFormat {
        sample_rate: spec.sample_rate,
        channels: spec.channels,
        bits_per_sample: spec.bits_per_sample,
    };
    Ok(PcmClip::new(format, samples))
}

/// Write `clip` as a 16-bit integer PCM WAV file, replacing any existing file
pub fn write_wav(path: &Path, clip: &PcmClip) -> Result<()> {
    if clip.format.bits_per_sample != 16 {
        return Err(BarsmithError::UnsupportedFormat(clip.format.bits_per_sample).into());
    }

    let spec = hound::WavSpec {
        channels: clip.format.channels,
        sample_rate: clip.format.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec)?;
    for &sample in &clip.samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;

    debug!("Wrote {} frames to {}", clip.frames(), path.display());
    Ok(())
}

/// Sum exactly two WAV files into `out`, truncating to the shorter one
pub fn mix_files<P: AsRef<Path>>(inputs: &[P], out: &Path) -> Result<PcmClip> {
    let [a, b] = inputs else {
        return Err(RenderError::WrongInputCount {
            expected: 2,
            found: inputs.len(),
        });
    };
    let mixed = mix(&read_wav(a.as_ref())?, &read_wav(b.as_ref())?)?;
    write_wav(out, &mixed)?;
    Ok(mixed)
}

/// Join WAV files end to end into `out`
pub fn append_files<P: AsRef<Path>>(inputs: &[P], out: &Path) -> Result<PcmClip> {
    let clips = inputs
        .iter()
        .map(|p| read_wav(p.as_ref()))
        .collect::<Result<Vec<_>>>()?;
    let joined = concat(&clips)?;
    write_wav(out, &joined)?;
    Ok(joined)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip(samples: &[i16]) -> PcmClip {
        PcmClip::new(PcmFormat::mono16(22050), samples.to_vec())
    }

    #[test]
    fn test_write_then_read_preserves_clip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.wav");
        let original = clip(&[0, 1, -1, i16::MAX, i16::MIN, 1234]);

        write_wav(&path, &original).unwrap();
        assert_eq!(read_wav(&path).unwrap(), original);
    }

    #[test]
    fn test_stereo_format_survives() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stereo.wav");
        let format = PcmFormat { channels: 2, ..PcmFormat::mono16(48000) };
        let original = PcmClip::new(format, vec![1, 2, 3, 4]);

        write_wav(&path, &original).unwrap();
        let read = read_wav(&path).unwrap();
        assert_eq!(read.format, format);
        assert_eq!(read.frames(), 2);
    }

    #[test]
    fn test_missing_input_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.wav");
        assert!(matches!(read_wav(&missing), Err(RenderError::Wav(_))));
    }

    #[test]
    fn test_float_wav_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("float.wav");
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 44100,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        writer.write_sample(0.5f32).unwrap();
        writer.finalize().unwrap();

        assert!(matches!(
            read_wav(&path),
            Err(RenderError::Core(BarsmithError::UnsupportedFormat(32)))
        ));
    }

    #[test]
    fn test_mix_and_append_files() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.wav");
        let b = dir.path().join("b.wav");
        write_wav(&a, &clip(&[10, 20, 30])).unwrap();
        write_wav(&b, &clip(&[1, 2])).unwrap();

        let mixed_path = dir.path().join("mix.wav");
        let mixed = mix_files(&[&a, &b], &mixed_path).unwrap();
        assert_eq!(mixed.samples, vec![11, 22]);
        assert_eq!(read_wav(&mixed_path).unwrap(), mixed);

        let joined_path = dir.path().join("joined.wav");
        let joined = append_files(&[&a, &b], &joined_path).unwrap();
        assert_eq!(joined.samples, vec![10, 20, 30, 1, 2]);
        assert_eq!(read_wav(&joined_path).unwrap().len(), 5);
    }

    #[test]
    fn test_mix_files_needs_two_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.wav");
        write_wav(&a, &clip(&[1])).unwrap();
        let out = dir.path().join("out.wav");
        assert!(matches!(
            mix_files(&[&a], &out),
            Err(RenderError::WrongInputCount { expected: 2, found: 1 })
        ));
    }
}
