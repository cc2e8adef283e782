pub mod tone;

pub use tone::{MAX_SAMPLES, ToneSynth, checked_sample_count, sample_count, synthesize_tone};
