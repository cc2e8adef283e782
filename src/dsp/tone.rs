use crate::types::waveform::Waveform;

/// Amplitude of a single tone before normalization
pub const DEFAULT_AMPLITUDE: f64 = 0.5;

/// Longest waveform a mono 16-bit WAV can hold: the data chunk size is a u32
/// byte count and every sample takes 2 bytes.
pub const MAX_SAMPLES: usize = (u32::MAX / 2) as usize;

/// Number of samples covering `duration` seconds: `round(sample_rate * duration)`,
/// or `None` when that is more than [`MAX_SAMPLES`].
/// Non-positive or non-finite durations cover no samples.
pub fn checked_sample_count(sample_rate: u32, duration: f64) -> Option<usize> {
    if !duration.is_finite() || duration <= 0.0 {
        return Some(0);
    }
    let count = (sample_rate as f64 * duration).round();
    if count > MAX_SAMPLES as f64 {
        return None;
    }
    Some(count as usize)
}

/// Like [`checked_sample_count`], saturating at [`MAX_SAMPLES`]
pub fn sample_count(sample_rate: u32, duration: f64) -> usize {
    let count = checked_sample_count(sample_rate, duration);
    count.unwrap_or(MAX_SAMPLES)
}

/// Renders one fixed-length monophonic tone per call.
/// Stateless: the same inputs always produce the same buffer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneSynth {
    sample_rate: u32,
    amplitude: f64,
    waveform: Waveform,
}

impl ToneSynth {
    /// Sine tones at the default amplitude
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            amplitude: DEFAULT_AMPLITUDE,
            waveform: Waveform::Sine,
        }
    }

    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    pub fn with_waveform(mut self, waveform: Waveform) -> Self {
        self.waveform = waveform;
        self
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Render `duration` seconds of a tone at `frequency` Hz.
    ///
    /// Samples are taken at `duration * i / n` for `i` in `0..n`, so the
    /// endpoint itself is never sampled. A non-positive frequency renders
    /// `n` samples of silence.
    pub fn render(&self, frequency: f64, duration: f64) -> Vec<f32> {
        let n = sample_count(self.sample_rate, duration);
        if !frequency.is_finite() || frequency <= 0.0 {
            return vec![0.0; n];
        }

        let step = duration / n as f64;
        (0..n)
            .map(|i| {
                let t = i as f64 * step;
                let phase = (frequency * t).fract();
                (self.amplitude * self.waveform.generate(phase)) as f32
            })
            .collect()
    }
}

/// Render a sine tone at the default amplitude
pub fn synthesize_tone(frequency: f64, duration: f64, sample_rate: u32) -> Vec<f32> {
    ToneSynth::new(sample_rate).render(frequency, duration)
}
