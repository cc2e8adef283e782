/// Scale `samples` in place so the largest magnitude becomes exactly 1.0.
///
/// Returns `false` and leaves the buffer untouched when there is nothing to
/// scale (empty or all-zero buffers).
pub fn normalize_peak(samples: &mut [f32]) -> bool {
    let peak = samples.iter().fold(0.0f32, |m, s| m.max(s.abs()));
    if !(peak > 0.0 && peak.is_finite()) {
        return false;
    }

    for sample in samples.iter_mut() {
        *sample /= peak;
    }
    true
}

/// Convert normalized f32 samples to signed 16-bit PCM: `round(s * 32767)`,
/// clamped to the i16 range. NaN becomes silence.
pub fn to_pcm16(samples: &[f32]) -> Vec<i16> {
    samples
        .iter()
        .map(|&s| {
            if s.is_nan() {
                return 0;
            }
            (s * i16::MAX as f32)
                .round()
                .clamp(i16::MIN as f32, i16::MAX as f32) as i16
        })
        .collect()
}
