//! Sample-level clip combination: sequencing and summing

use crate::clip::PcmClip;
use crate::error::{BarsmithError, Result};

fn check_format(expected: &PcmClip, found: &PcmClip) -> Result<()> {
    if expected.format != found.format {
        return Err(BarsmithError::FormatMismatch {
            expected: expected.format,
            found: found.format,
        });
    }
    Ok(())
}

/// Play `clips` back to back. The output takes the first clip's format;
/// every other clip must match it.
pub fn concat(clips: &[PcmClip]) -> Result<PcmClip> {
    let (first, rest) = clips.split_first().ok_or(BarsmithError::EmptyMix)?;
    for clip in rest {
        check_format(first, clip)?;
    }

    let total = clips.iter().map(PcmClip::len).sum();
    let mut samples = Vec::with_capacity(total);
    for clip in clips {
        samples.extend_from_slice(&clip.samples);
    }
    Ok(PcmClip::new(first.format, samples))
}

/// Sum two clips sample by sample.
///
/// The result is as long as the shorter input. Samples are added in `i32`
/// and narrowed back to `i16` by two's-complement wrapping, so sums beyond
/// the 16-bit range wrap instead of clipping; callers keep headroom.
pub fn mix(a: &PcmClip, b: &PcmClip) -> Result<PcmClip> {
    check_format(a, b)?;
    if a.format.bits_per_sample != 16 {
        return Err(BarsmithError::UnsupportedFormat(a.format.bits_per_sample));
    }

    let samples = a
        .samples
        .iter()
        .zip(&b.samples)
        .map(|(&x, &y)| (x as i32 + y as i32) as i16)
        .collect();
    Ok(PcmClip::new(a.format, samples))
}

/// Fold [`mix`] over `clips` from left to right
pub fn mix_all(clips: &[PcmClip]) -> Result<PcmClip> {
    let (first, rest) = clips.split_first().ok_or(BarsmithError::EmptyMix)?;
    rest.iter().try_fold(first.clone(), |acc, clip| mix(&acc, clip))
}
